mod board_view;
mod control_panel;
mod move_list;

pub use board_view::BoardView;
pub use control_panel::render_control_panel;
pub use move_list::render_move_list_panel;
