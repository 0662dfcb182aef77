// What you SEE:
// • A white board with a black frame; savers bounce around inside it.
// • A bounce flashes the saver's wall-hit art; a perfect corner freezes it for 2.5 s.
// • Right column: one button per saver bundle (spawns one at random), CLEAR!, and a speed box.
// • Click a saver to select it (red; everything pauses), DEL removes it. ESC quits.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use saver_board::app::{App, Command};
use saver_board::catalog::ResourceCatalog;
use saver_board::clock::SystemClock;
use saver_board::config::Args;
use saver_board::draw::Drawer;
use saver_board::types::FrameBuffer;

const TITLE: &str = "Breaking Screensaver";

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
    info!("{TITLE} starting");

    /* --- Resources ---
       Visual: nothing yet; bundles that fail to load are logged and skipped. */
    let catalog = ResourceCatalog::scan(&args.resources);

    /* --- Window + screen buffer --- */
    let mut drawer = Drawer::new(TITLE, args.width, args.height, args.fps)
        .context("opening the window")?;
    let (w, h) = drawer.size();
    let mut screen = FrameBuffer::new(w, h);

    let mut app = App::new(catalog, &args.speed, w, h, StdRng::from_entropy());
    app.spawn_centered(&args.initial);

    let clock = SystemClock::new();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs -> commands */
        let mut commands = Vec::new();

        let (w, h) = drawer.size();
        if (w, h) != (screen.width, screen.height) && w > 0 && h > 0 {
            screen = FrameBuffer::new(w, h); // visual: board and buttons re-laid for the new size
            commands.push(Command::Resize { width: w, height: h });
        }

        if drawer.left_mouse_pressed_once() {
            if let Some((x, y)) = drawer.mouse_pos() {
                commands.push(Command::PointerDown { x, y });
            }
        }
        if drawer.delete_pressed_once() {
            commands.push(Command::DeleteFocused);
        }
        if drawer.backspace_pressed() {
            commands.push(Command::Backspace);
        }
        commands.extend(drawer.digits_pressed().into_iter().map(Command::Digit));

        for command in commands {
            app.dispatch(command);
        }

        /* 2) Physics: every saver moves one step (unless something is selected) */
        app.tick(&clock);

        /* 3) Draw sidebar, board, savers */
        app.render(&mut screen);

        /* 4) Present (this is when the on-screen image updates). */
        drawer.present(&screen).context("presenting a frame")?;
    }

    info!("window closed, exiting");
    Ok(())
}
