// Command-line options. Everything has a default, so running with no
// arguments opens the usual 800x600 window over ./resources.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "saver-board", about = "Bouncing screensaver toy")]
pub struct Args {
    /// Directory holding one subdirectory per saver bundle.
    #[arg(long, default_value = "resources")]
    pub resources: PathBuf,

    /// Initial window width in pixels.
    #[arg(long, default_value_t = 800)]
    pub width: usize,

    /// Initial window height in pixels.
    #[arg(long, default_value_t = 600)]
    pub height: usize,

    /// Target frames (ticks) per second.
    #[arg(long, default_value_t = 60)]
    pub fps: usize,

    /// Starting text of the speed box.
    #[arg(long, default_value = "5")]
    pub speed: String,

    /// Bundle spawned in the middle of the board at startup.
    #[arg(long, default_value = "waltuh")]
    pub initial: String,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    pub verbose: bool,
}
