//! Thermal and fan sensor discovery
//!
//! The hwmon directories are scanned once at startup. The resulting list is
//! shared read-only by the probes that average over several devices.

use statusbar_core::{ProbeFailure, ProbeOutcome};
use std::path::{Path, PathBuf};

/// Immutable list of discovered sensor input files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorPaths {
    thermal: Vec<PathBuf>,
    fans: Vec<PathBuf>,
}

impl SensorPaths {
    pub fn new(thermal: Vec<PathBuf>, fans: Vec<PathBuf>) -> Self {
        Self { thermal, fans }
    }

    /// Scan for `temp*_input` and `fan*_input` files
    pub fn discover(thermal_dir: &Path, fan_dir: &Path) -> Self {
        log::info!("Scanning for thermal and fan sensors...");
        let thermal = list_inputs(thermal_dir, "temp");
        let fans = list_inputs(fan_dir, "fan");

        for path in thermal.iter().chain(&fans) {
            log::info!("  {}", path.display());
        }
        log::info!(
            "Sensor discovery complete: {} thermal, {} fan",
            thermal.len(),
            fans.len()
        );

        Self { thermal, fans }
    }

    pub fn thermal(&self) -> &[PathBuf] {
        &self.thermal
    }

    pub fn fans(&self) -> &[PathBuf] {
        &self.fans
    }
}

/// Mean of several numeric sensor inputs
#[derive(Debug)]
pub(crate) struct SensorAverage {
    pub mean: Option<f64>,
    /// Inputs that could not be read, with the error text
    pub failures: Vec<String>,
}

impl SensorAverage {
    pub fn read(paths: &[PathBuf]) -> Self {
        let mut sum = 0.0;
        let mut count = 0usize;
        let mut failures = Vec::new();
        for path in paths {
            match crate::sysfs::read_number::<i64>(path) {
                Ok(value) => {
                    sum += value as f64;
                    count += 1;
                }
                Err(e) => failures.push(format!("{}: {}", path.display(), e)),
            }
        }
        Self {
            mean: (count > 0).then(|| sum / count as f64),
            failures,
        }
    }

    /// Turn the average into an outcome.
    ///
    /// No readable input is a full failure; some unreadable inputs are a
    /// minor failure that still renders the mean of the rest.
    pub fn into_outcome<F>(self, what: &str, render: F) -> ProbeOutcome
    where
        F: FnOnce(f64) -> String,
    {
        match self.mean {
            None => ProbeOutcome::Failed(ProbeFailure::new(
                format!("No readable {} sensors", what),
                if self.failures.is_empty() {
                    "no sensors discovered".to_string()
                } else {
                    self.failures.join("; ")
                },
            )),
            Some(mean) if !self.failures.is_empty() => ProbeOutcome::Degraded {
                failure: ProbeFailure::new(
                    format!("Some {} sensors unreadable", what),
                    self.failures.join("; "),
                ),
                text: Some(render(mean)),
            },
            Some(mean) => ProbeOutcome::Render(render(mean)),
        }
    }
}

fn list_inputs(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Cannot scan {} for sensors: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut inputs: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(prefix) && name.ends_with("_input")
        })
        .map(|entry| entry.path())
        .collect();
    inputs.sort();
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_and_sorts() {
        let hwmon = tempfile::tempdir().unwrap();
        for name in ["temp2_input", "temp1_input", "temp1_label", "fan1_input", "name"] {
            std::fs::write(hwmon.path().join(name), "0\n").unwrap();
        }
        let fan_dir = tempfile::tempdir().unwrap();
        for name in ["fan2_input", "fan1_input", "fan1_min"] {
            std::fs::write(fan_dir.path().join(name), "0\n").unwrap();
        }

        let sensors = SensorPaths::discover(hwmon.path(), fan_dir.path());
        assert_eq!(
            sensors.thermal(),
            &[hwmon.path().join("temp1_input"), hwmon.path().join("temp2_input")]
        );
        assert_eq!(
            sensors.fans(),
            &[fan_dir.path().join("fan1_input"), fan_dir.path().join("fan2_input")]
        );
    }

    #[test]
    fn test_average_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("temp1_input");
        let b = dir.path().join("temp2_input");
        std::fs::write(&a, "40000\n").unwrap();
        std::fs::write(&b, "60000\n").unwrap();
        let missing = dir.path().join("temp3_input");

        let outcome = SensorAverage::read(&[a.clone(), b.clone()])
            .into_outcome("thermal", |mean| format!("{}", mean));
        assert_eq!(outcome, ProbeOutcome::Render("50000".to_string()));

        let outcome = SensorAverage::read(&[a, missing.clone()])
            .into_outcome("thermal", |mean| format!("{}", mean));
        assert!(matches!(
            outcome,
            ProbeOutcome::Degraded { text: Some(ref t), .. } if t == "40000"
        ));

        let outcome = SensorAverage::read(&[missing]).into_outcome("thermal", |_| String::new());
        assert!(matches!(outcome, ProbeOutcome::Failed(_)));

        let outcome = SensorAverage::read(&[]).into_outcome("fan", |_| String::new());
        match outcome {
            ProbeOutcome::Failed(failure) => assert_eq!(failure.detail, "no sensors discovered"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory_yields_empty_list() {
        let sensors = SensorPaths::discover(
            Path::new("/nonexistent/hwmon"),
            Path::new("/nonexistent/fans"),
        );
        assert!(sensors.thermal().is_empty());
        assert!(sensors.fans().is_empty());
    }
}
