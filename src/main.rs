// What you SEE:
// • A window with an action button, a status line and the canvas below.
// • "Ladda upp foto" opens a photo; it shows in grayscale with the watermark
//   in the bottom-right corner. Drag the watermark with the left mouse button.
// • "Ladda ner bild" saves the canvas as PNG. ESC quits.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use gray_stamp::Config;
use gray_stamp::types::Point;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "gray-stamp", version, about = "Grayscale a photo and stamp a watermark on it")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the editor window (the default).
    Edit {
        /// Photo to open right away.
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Render one photo without a window and write the PNG.
    Render {
        /// Input photo.
        #[arg(long)]
        photo: PathBuf,

        /// Output PNG path.
        #[arg(long)]
        out: PathBuf,

        /// Stamp left edge in photo pixels (default: bottom-right placement).
        #[arg(long, requires = "y")]
        x: Option<f32>,

        /// Stamp top edge in photo pixels.
        #[arg(long, requires = "x")]
        y: Option<f32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = Config::default();
    match cli.cmd.unwrap_or(Command::Edit { photo: None }) {
        Command::Edit { photo } => gray_stamp::app::run(config, photo).context("editor window")?,
        Command::Render { photo, out, x, y } => {
            let position = x.zip(y).map(|(x, y)| Point::new(x, y));
            let outcome = gray_stamp::app::render_once(config, &photo, &out, position)
                .with_context(|| format!("render {}", photo.display()))?;
            tracing::info!(?outcome, "done");
        }
    }
    Ok(())
}
