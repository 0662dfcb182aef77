// Everything the window loop drives, minus the window itself.
//
// The loop turns raw input into `Command`s and hands them to `App::dispatch`;
// buttons carry a command instead of a callback, so the whole thing can be
// exercised without a display.

use log::{info, warn};
use rand::Rng;

use crate::board::{Board, Placement};
use crate::catalog::ResourceCatalog;
use crate::clock::Clock;
use crate::saver::Direction;
use crate::sidebar::Sidebar;
use crate::types::FrameBuffer;

pub const BACKGROUND_COLOR: u32 = 0x00FF_FFFF;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Spawn a randomly placed saver from catalog bundle `n`.
    Spawn(usize),
    ClearSavers,
    PointerDown { x: f32, y: f32 },
    DeleteFocused,
    Resize { width: usize, height: usize },
    Digit(char),
    Backspace,
}

pub struct App<R: Rng> {
    catalog: ResourceCatalog,
    board: Board,
    sidebar: Sidebar,
    rng: R,
    window: (usize, usize),
}

impl<R: Rng> App<R> {
    pub fn new(catalog: ResourceCatalog, speed_text: &str, window_width: usize, window_height: usize, rng: R) -> Self {
        let labels: Vec<String> = catalog.bundles().iter().map(|b| b.descriptor.name.clone()).collect();
        Self {
            sidebar: Sidebar::new(&labels, speed_text, window_width, window_height),
            board: Board::for_window(window_width, window_height),
            catalog,
            rng,
            window: (window_width, window_height),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn window_size(&self) -> (usize, usize) {
        self.window
    }

    /// Put the named bundle in the middle of the board. False if no such bundle.
    pub fn spawn_centered(&mut self, name: &str) -> bool {
        let Some(bundle) = self.catalog.get_by_name(name) else {
            warn!("no resource named \"{name}\", nothing spawned");
            return false;
        };
        let speed = self.sidebar.speed();
        self.board.add_saver(&bundle.art, Placement::Center, speed, Direction::default());
        true
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Spawn(index) => match self.catalog.get(index) {
                Some(bundle) => {
                    let speed = self.sidebar.speed();
                    self.board.generate_saver(&bundle.art, speed, &mut self.rng);
                }
                None => warn!("spawn requested for unknown bundle #{index}"),
            },
            Command::ClearSavers => self.board.clear_savers(),
            Command::PointerDown { x, y } => {
                if let Some(button) = self.sidebar.handle_pointer_down(x, y) {
                    self.dispatch(button);
                }
                self.board.handle_pointer_down(x, y);
            }
            Command::DeleteFocused => {
                self.board.delete_focused();
            }
            Command::Resize { width, height } => {
                if (width, height) == self.window || width == 0 || height == 0 {
                    return;
                }
                info!("window resized to {width}x{height}");
                self.window = (width, height);
                self.board.resize(width, height);
                self.sidebar.resize(width, height);
            }
            Command::Digit(ch) => self.sidebar.type_digit(ch),
            Command::Backspace => self.sidebar.backspace(),
        }
    }

    pub fn tick(&mut self, clock: &dyn Clock) {
        self.board.update_savers(clock);
    }

    pub fn render(&mut self, fb: &mut FrameBuffer) {
        fb.clear(BACKGROUND_COLOR);
        self.sidebar.render(fb);
        self.board.render(fb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn app() -> App<StdRng> {
        App::new(ResourceCatalog::default(), "5", 800, 600, StdRng::seed_from_u64(1))
    }

    #[test]
    fn unknown_spawn_is_ignored() {
        let mut app = app();
        assert!(app.catalog().is_empty());
        app.dispatch(Command::Spawn(3));
        assert!(app.board().is_empty());
        assert!(!app.spawn_centered("waltuh"));
    }

    #[test]
    fn resize_updates_board_layout() {
        let mut app = app();
        app.dispatch(Command::Resize { width: 400, height: 300 });
        assert_eq!(app.window_size(), (400, 300));
        assert_eq!(app.board().layout().rect.width, 360.0);

        app.dispatch(Command::Resize { width: 0, height: 300 });
        assert_eq!(app.window_size(), (400, 300));
    }

    #[test]
    fn digits_reach_the_speed_box_once_focused() {
        let mut app = app();
        // speed box is the second row when there are no bundles
        app.dispatch(Command::PointerDown { x: 760.0, y: 90.0 });
        app.dispatch(Command::Backspace);
        app.dispatch(Command::Digit('9'));
        assert_eq!(app.sidebar().speed_text(), "9");
        assert_eq!(app.sidebar().speed(), 9);
    }
}
