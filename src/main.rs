mod app;
mod domain;
mod models;
mod net;
mod ui;

use gpui::Application;

fn main() {
    tracing_subscriber::fmt::init();
    Application::new().run(app::run);
}
