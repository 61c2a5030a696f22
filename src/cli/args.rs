//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::POLL_INTERVAL_SECS_RANGE;

/// Festival jewellery banner generator
#[derive(Parser, Debug)]
#[command(name = "festive-banner")]
#[command(version, about = "Festival banner generator for jewellery shops", long_about = None)]
#[command(after_help = "EXAMPLES:
    # One-shot banner with the default shop details
    festive-banner generate --festival Diwali

    # Banner plus animated video, written next to each other
    festive-banner generate -f Dhanteras --video -o dhanteras.html

    # Interactive session (type /help for commands)
    festive-banner session

Set API_KEY in .env or the environment before generating.")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a banner in one go
    Generate(GenerateArgs),
    /// Edit and generate banners interactively
    Session(SessionArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    /// Festival name (e.g. Diwali, Dhanteras)
    #[arg(long, short)]
    pub festival: Option<String>,

    /// Offer lines; repeat for several lines
    #[arg(long = "offer")]
    pub offers: Vec<String>,

    /// Shop name shown in the footer
    #[arg(long)]
    pub shop: Option<String>,

    /// Accent colour (#rrggbb)
    #[arg(long)]
    pub accent: Option<String>,

    /// Shop logo image
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Remove the logo background before composing
    #[arg(long, requires = "logo")]
    pub remove_bg: bool,

    /// Extra text overlay; repeat for several
    #[arg(long = "text")]
    pub texts: Vec<String>,

    /// Also animate the banner into a video
    #[arg(long)]
    pub video: bool,

    /// HTML file the banner is written to
    #[arg(long, short, default_value = "banner.html")]
    pub output: PathBuf,

    #[command(flatten)]
    pub video_options: VideoOptions,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SessionArgs {
    /// Default HTML file for /render
    #[arg(long, short, default_value = "banner.html")]
    pub output: PathBuf,

    #[command(flatten)]
    pub video_options: VideoOptions,
}

/// Overrides for video generation.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct VideoOptions {
    /// Seconds between video status checks
    #[arg(long, value_parser = parse_poll_interval)]
    pub poll_interval: Option<u64>,

    /// Directory downloaded videos are saved to
    #[arg(long)]
    pub video_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Parse and validate the poll interval (1-600 seconds)
fn parse_poll_interval(s: &str) -> Result<u64, String> {
    let secs: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number of seconds", s))?;
    if !POLL_INTERVAL_SECS_RANGE.contains(&secs) {
        return Err(format!(
            "Poll interval must be between {} and {} seconds, got {}",
            POLL_INTERVAL_SECS_RANGE.start(),
            POLL_INTERVAL_SECS_RANGE.end(),
            secs
        ));
    }
    Ok(secs)
}
