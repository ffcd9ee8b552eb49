//! Cutline CLI - Command-line interface for timeline projects.
//!
//! Usage:
//!   cutline new <PATH>            Create an empty project snapshot
//!   cutline info <PATH>           Show project information
//!   cutline validate <PATH>       Validate a project snapshot
//!   cutline import <PATH> <FILES> Import media and place it on a track
//!   cutline frame <PATH>          Composite one preview frame as JSON
//!   cutline export <PATH>         Hand a project to the export backend
//!   cutline recent                List recently opened projects

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cutline_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "cutline",
    about = "Multi-track video timeline editing from the command line",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new empty project snapshot
    New {
        /// Snapshot file to write
        path: PathBuf,

        /// Output format preset (youtube-hd, youtube-fhd, youtube-4k, tiktok, instagram-reel, instagram-post)
        #[arg(short, long)]
        preset: Option<String>,

        /// Output width (ignored when a preset is given)
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Output height (ignored when a preset is given)
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Output FPS (ignored when a preset is given)
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show project information
    Info {
        /// Path to the project snapshot
        path: PathBuf,
    },

    /// Validate a project snapshot
    Validate {
        /// Path to the project snapshot
        path: PathBuf,
    },

    /// Import media files and append them to a track
    Import {
        /// Path to the project snapshot
        path: PathBuf,

        /// Media files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Track to place clips on (defaults to the first video track)
        #[arg(short, long)]
        track: Option<String>,

        /// ffprobe binary used to read media durations
        #[arg(long, default_value = "ffprobe")]
        ffprobe: PathBuf,

        /// Only probe and list the media; do not modify the project
        #[arg(long)]
        dry_run: bool,
    },

    /// Composite a single preview frame and print the draw list as JSON
    Frame {
        /// Path to the project snapshot
        path: PathBuf,

        /// Timeline time to render (seconds)
        #[arg(short, long, default_value = "0.0")]
        at: f64,

        /// Natural width assumed for every source
        #[arg(long, default_value = "1920")]
        source_width: f64,

        /// Natural height assumed for every source
        #[arg(long, default_value = "1080")]
        source_height: f64,
    },

    /// Export a project to video
    Export {
        /// Path to the project snapshot
        path: PathBuf,

        /// Output file name without extension
        #[arg(short, long, default_value = "cutline-export")]
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Output format: mp4|webm|gif
        #[arg(long, default_value = "mp4")]
        format: String,

        /// Output resolution: 720p|1080p|4k
        #[arg(long, default_value = "1080p")]
        resolution: String,
    },

    /// List recently opened projects
    Recent,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load();
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    cutline_common::logging::init_logging(&logging);

    match cli.command {
        Commands::New {
            path,
            preset,
            width,
            height,
            fps,
            force,
        } => commands::new::run(path, preset, width, height, fps, force),
        Commands::Info { path } => commands::info::run(path, &config),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Import {
            path,
            files,
            track,
            ffprobe,
            dry_run,
        } => commands::import::run(path, files, track, ffprobe, dry_run).await,
        Commands::Frame {
            path,
            at,
            source_width,
            source_height,
        } => commands::frame::run(path, at, source_width, source_height, &config),
        Commands::Export {
            path,
            name,
            output,
            format,
            resolution,
        } => commands::export::run(path, name, output, format, resolution).await,
        Commands::Recent => commands::recent::run(&config),
    }
}
