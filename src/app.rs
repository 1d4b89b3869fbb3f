//! Application setup and window creation.

use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;

use crate::models::SessionModel;
use crate::net::GameClient;
use crate::ui::views::BoardView;

/// Initialize and run the chess client
pub fn run(cx: &mut App) {
    gpui_component::init(cx);

    // Create the session model and start the first game immediately,
    // like a web client would on page load.
    let session = cx.new(|_| SessionModel::new(GameClient::from_env()));
    session.update(cx, |session, cx| session.start(cx));

    let bounds = Bounds::centered(None, size(px(920.0), px(640.0)), cx);
    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| BoardView::new(session, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    )
    .unwrap();
}
