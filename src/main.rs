use anyhow::{Context, Result};
use clap::Parser;
use dwm_statusbar::engine::{DisplaySink, FileLogSink};
use dwm_statusbar::sinks::{RootNameSink, StdoutSink};
use dwm_statusbar::{config, runtime};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

/// dwm-statusbar - status, top and bottom bars for dwm
#[derive(Parser, Debug)]
#[command(name = "dwm-statusbar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Configuration file (defaults to config.json in the user config dir)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Print bars to stdout instead of setting the root window name
    #[arg(long)]
    stdout: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting dwm-statusbar v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load(cli.config.as_deref())?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let log_sink = FileLogSink::open(&config.paths.statusbar_log).with_context(|| {
        format!(
            "Failed to open statusbar log {}",
            config.paths.statusbar_log.display()
        )
    })?;
    let mut driver = runtime::build_driver(&config, Box::new(log_sink));

    let mut sink: Box<dyn DisplaySink> = if cli.stdout {
        Box::new(StdoutSink::new())
    } else {
        Box::new(RootNameSink::new(config.bars.joiner.clone()))
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    rt.block_on(async {
        if cli.once {
            let written = runtime::run_once(&mut driver, sink.as_mut()).await;
            if written == 0 {
                warn!("No bars written");
            }
            Ok(())
        } else {
            let interval = Duration::from_millis(config.poll.interval_ms);
            runtime::run(&mut driver, sink.as_mut(), interval).await
        }
    })
}
