//! `lyrics` command.

use std::panic;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use lyrics_shower::app::App;
use lyrics_shower::cli::{Cli, Mode};
use lyrics_shower::config::Config;
use lyrics_shower::constants::paths;
use lyrics_shower::{deps, ui, version};

// Logs go to a daily file: stdout belongs to the lyric display
fn init_logging(dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(dir, paths::LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lyrics_shower=info"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Leave the alternate screen before the panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ui::restore_terminal();
        original_hook(panic_info);
    }));

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;
    let _guard = init_logging(&config.paths.config_dir);
    tracing::info!("lyrics-shower {} starting", lyrics_shower::constants::version::VERSION);

    let mode = cli.mode();
    let banner = if mode == Mode::Version { None } else { version::check(&config.settings).await };
    if let Some(banner) = &banner {
        println!("{banner}");
    }

    let maintenance = matches!(mode, Mode::Version | Mode::Update | Mode::Uninstall | Mode::Install);
    if !maintenance {
        deps::check_dependencies(&config.settings);
    }

    let mut app = App::new(config);
    let result = app.run(&cli).await;

    if !maintenance && mode != Mode::Interactive {
        if let Some(banner) = &banner {
            println!("\n{banner}");
        }
    }

    result.context("lyrics failed")
}
