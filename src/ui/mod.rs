pub mod game_common;
pub mod game_scene;

use crate::core::controller::GameController;
use crate::input::GameOverMenu;
use crate::surface::ShapeCanvas;
use ratatui::Frame;

/// Main UI drawing function.
pub fn draw_ui(frame: &mut Frame, controller: &GameController<ShapeCanvas>, menu: &GameOverMenu) {
    let size = frame.size();
    game_scene::render_game(frame, size, controller, menu);
}
