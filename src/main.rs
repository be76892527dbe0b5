use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use lantern::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "lantern", about = "Terminal chat window (Phase 1: UI only)")]
struct Args {
    /// Config file to use instead of ~/.lantern/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Echo reply latency in milliseconds
    #[arg(short, long)]
    delay_ms: Option<u64>,

    /// Where to write the debug log
    #[arg(long, default_value = "lantern.log")]
    log_file: PathBuf,

    /// Skip the system welcome message
    #[arg(long)]
    no_welcome: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("lantern: {e}");
            log::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            delay_ms: args.delay_ms,
            no_welcome: args.no_welcome,
        },
    );

    log::info!(
        "Lantern starting up (echo delay {:?}, composer {:?})",
        resolved.echo_delay,
        resolved.composer_bounds
    );

    lantern::tui::run(resolved)
}
