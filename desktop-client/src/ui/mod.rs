mod game;
mod menu;

pub use menu::MenuApp;

/// Pixels per grid cell on the game canvas.
pub const CELL_SIZE: f32 = 20.0;
