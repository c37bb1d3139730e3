//! Poll-cycle runtime
//!
//! Builds the engine and probes from the configuration and drives them on a
//! tokio interval until interrupted.

mod driver;

pub use driver::Driver;

use anyhow::{Context, Result};
use chrono::Local;
use log::{info, warn};
use statusbar_core::{DisplaySink, Engine, LogSink};
use statusbar_types::StatusbarConfig;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Build a driver with every enabled segment's probe
pub fn build_driver(config: &StatusbarConfig, log_sink: Box<dyn LogSink>) -> Driver {
    let engine = Engine::from_config(config, log_sink);
    let probes = statusbar_sources::build_probes(config);
    info!(
        "{} of {} segments active",
        probes.len(),
        engine.registry().segments().count()
    );
    Driver::new(
        engine,
        probes,
        Duration::from_millis(config.poll.probe_timeout_ms),
    )
}

/// Run a single cycle, for `--once`
pub async fn run_once(driver: &mut Driver, sink: &mut dyn DisplaySink) -> usize {
    driver.cycle(Local::now().naive_local(), sink).await
}

/// Run cycles every `interval` until ctrl-c
pub async fn run(
    driver: &mut Driver,
    sink: &mut dyn DisplaySink,
    interval: Duration,
) -> Result<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("Polling every {} ms", interval.as_millis());
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let started = std::time::Instant::now();
                let written = run_once(driver, sink).await;
                let elapsed = started.elapsed();
                if elapsed > interval {
                    warn!("Cycle took {} ms, longer than the poll interval", elapsed.as_millis());
                }
                log::trace!("Cycle wrote {} bars in {:?}", written, elapsed);
            }
            result = &mut shutdown => {
                result.context("Failed to listen for ctrl-c")?;
                info!("Interrupted, stopping");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusbar_core::{BarId, MemoryLogSink, RecordingSink, SegmentId};

    #[tokio::test]
    async fn test_run_once_with_built_probes() {
        let dir = tempfile::tempdir().unwrap();
        let todo = dir.path().join(".TODO");
        std::fs::write(&todo, "ship it\n").unwrap();

        let mut config = StatusbarConfig::default();
        config.paths.todo_file = todo;
        config.paths.dwm_log = dir.path().join("dwm.log");
        config.paths.backup_status = dir.path().join(".sb");
        let config = crate::config::finalize(config, None).unwrap();

        let mut driver = build_driver(&config, Box::new(MemoryLogSink::new()));
        let mut sink = RecordingSink::new();
        let written = run_once(&mut driver, &mut sink).await;

        assert!(written >= 2);
        assert!(sink.last(BarId::Top).unwrap().contains("ship it"));
        assert!(!driver.engine().lookup(SegmentId::Weather).unwrap().is_enabled());
        for bar in BarId::ALL {
            let text = driver.engine().assemble(bar);
            assert!(text.len() <= config.bars.capacity(bar));
        }
    }
}
