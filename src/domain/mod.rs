pub mod chess;
pub mod coords;
pub mod history;
pub mod session;
