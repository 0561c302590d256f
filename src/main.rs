//! Treemap Viewer - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Treemap Viewer - slice-and-dice treemap in the terminal
#[derive(Parser, Debug)]
#[command(name = "tmv")]
#[command(version)]
#[command(about = "Draw weighted items as a slice-and-dice treemap")]
pub struct Args {
    /// Items file (.toml or .json); shows demo data if not provided
    pub file: Option<PathBuf>,

    /// Print the layout for this container width instead of running the TUI
    #[arg(long, requires = "height")]
    pub width: Option<f64>,

    /// Print the layout for this container height instead of running the TUI
    #[arg(long, requires = "width")]
    pub height: Option<f64>,

    /// Print the layout as JSON (with --width/--height)
    #[arg(long, requires = "width")]
    pub json: bool,

    /// Hover delay before the detail popup, in milliseconds (negative means 0)
    #[arg(long, allow_negative_numbers = true)]
    pub popup_delay: Option<i64>,

    /// Do not draw labels inside rectangles
    #[arg(long)]
    pub no_labels: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tmv::config::load_config_with_precedence(args.config.clone())?;
        let merged = tmv::config::merge_config(config_file);
        let with_env = tmv::config::apply_env_overrides(merged);
        tmv::config::apply_cli_overrides(with_env, args.popup_delay, args.no_labels)
    };

    tmv::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let items = match &args.file {
        Some(path) => tmv::source::load_items(path)?,
        None => tmv::source::demo_items(),
    };
    info!(count = items.len(), "Items loaded");

    if let (Some(width), Some(height)) = (args.width, args.height) {
        let placed = tmv::layout::layout(width, height, &items)?;
        let rendered = if args.json {
            tmv::output::format_json(&placed)?
        } else {
            tmv::output::format_table(&placed)
        };
        println!("{rendered}");
        return Ok(());
    }

    tmv::view::run(items, &config)?;

    Ok(())
}
