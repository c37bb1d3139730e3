//! Startup configuration: file location, loading, path expansion and
//! validation.

use anyhow::{Context, Result};
use statusbar_core::EngineError;
use statusbar_types::{BarId, SegmentId, StatusbarConfig};
use std::path::{Path, PathBuf};

/// Load the configuration from `path`, or from the default location when no
/// path is given. A missing default file yields the built-in defaults.
pub fn load(path: Option<&Path>) -> Result<StatusbarConfig> {
    let config = match path {
        Some(path) => load_from_path(path)?,
        None => {
            let path = config_path()?;
            if path.exists() {
                load_from_path(&path)?
            } else {
                log::info!("No config at {}, using defaults", path.display());
                StatusbarConfig::default()
            }
        }
    };

    let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    finalize(config, home.as_deref()).context("Invalid configuration")
}

/// Default configuration file path
pub fn config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("org", "suckless", "dwm-statusbar")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().join("config.json"))
}

/// Load configuration from a specific file path, without validating it
pub fn load_from_path(path: &Path) -> Result<StatusbarConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve `~/` paths, disable command segments with no command, and
/// validate the result.
pub fn finalize(
    mut config: StatusbarConfig,
    home: Option<&Path>,
) -> statusbar_core::Result<StatusbarConfig> {
    if let Some(home) = home {
        let paths = &mut config.paths;
        for path in [
            &mut paths.todo_file,
            &mut paths.statusbar_log,
            &mut paths.dwm_log,
            &mut paths.backup_status,
            &mut paths.net_class_dir,
            &mut paths.wireless_stats,
            &mut paths.cpu_temp_dir,
            &mut paths.fan_dir,
            &mut paths.screen_brightness,
            &mut paths.battery_status,
            &mut paths.battery_capacity,
            &mut paths.disk_mount,
        ] {
            *path = expand_home(path, home);
        }
        if let Some(kbd) = paths.kbd_brightness.as_mut() {
            *kbd = expand_home(kbd, home);
        }
    }

    let commands = [
        (SegmentId::Weather, config.commands.weather.is_some()),
        (SegmentId::Portfolio, config.commands.portfolio.is_some()),
        (SegmentId::Volume, config.commands.volume.is_some()),
    ];
    for (id, configured) in commands {
        if !configured && config.segments.is_enabled(id) {
            log::debug!("Disabling {}: no command configured", id);
            config.segments.disabled.push(id);
        }
    }

    validate(&config)?;
    Ok(config)
}

/// Replace a leading `~` component with `home`
pub fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// Reject values the engine cannot work with
pub fn validate(config: &StatusbarConfig) -> statusbar_core::Result<()> {
    for bar in BarId::ALL {
        if config.bars.capacity(bar) == 0 {
            return Err(EngineError::config(format!(
                "{} bar capacity must be greater than zero",
                bar
            )));
        }
    }

    let limits = &config.limits;
    if limits.fan_min >= limits.fan_max {
        return Err(EngineError::config(format!(
            "fan_min ({}) must be below fan_max ({})",
            limits.fan_min, limits.fan_max
        )));
    }
    if !(limits.cpu_ratio > 0.0) {
        return Err(EngineError::config("cpu_ratio must be positive"));
    }
    if !(limits.temp_max > 0.0) {
        return Err(EngineError::config("temp_max must be positive"));
    }
    if limits.screen_brightness_max == 0 || limits.kbd_brightness_max == 0 {
        return Err(EngineError::config("brightness maxima must be positive"));
    }
    if limits.block_size < 2 {
        return Err(EngineError::config("block_size must be at least 2"));
    }

    let format = &config.format;
    if format.error_token.is_empty() || format.error_width == 0 {
        return Err(EngineError::config("error token must not be empty"));
    }

    if config.poll.interval_ms == 0 {
        return Err(EngineError::config("poll interval must be greater than zero"));
    }
    if config.poll.probe_timeout_ms == 0 {
        return Err(EngineError::config("probe timeout must be greater than zero"));
    }

    Ok(())
}
