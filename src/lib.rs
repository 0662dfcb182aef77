// Bouncing screensaver toy: savers drift around a bordered board, flash when
// they hit a wall and freeze for a moment when they hit a corner exactly.

pub mod app;
pub mod board;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod draw;
pub mod error;
pub mod image_source;
pub mod resources;
pub mod saver;
pub mod sidebar;
pub mod types;
