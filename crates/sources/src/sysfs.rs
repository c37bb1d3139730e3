//! Helpers for reading single-value sysfs/procfs files and formatting readings

use std::fmt::Display;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Read a file and trim surrounding whitespace
pub(crate) fn read_trimmed(path: &Path) -> io::Result<String> {
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

/// Read a file holding one decimal number
pub(crate) fn read_number<T>(path: &Path) -> io::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let text = read_trimmed(path)?;
    text.parse::<T>().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: {:?}: {}", path.display(), text, e),
        )
    })
}

/// `value / max` as a whole percentage, clamped to 0..=100
pub(crate) fn percent(value: f64, max: f64) -> u32 {
    if max <= 0.0 {
        return 0;
    }
    (value / max * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Scale a byte count into the largest unit below one block of the next
///
/// Returns a value with one decimal place and the unit letter.
pub(crate) fn scale_bytes(bytes: f64, block_size: u64) -> String {
    const UNITS: [char; 5] = ['B', 'K', 'M', 'G', 'T'];
    let block = block_size.max(2) as f64;
    let mut value = bytes;
    let mut unit = 0;
    while value >= block && unit < UNITS.len() - 1 {
        value /= block;
        unit += 1;
    }
    if unit == 0 {
        format!("{}{}", value.round() as u64, UNITS[unit])
    } else {
        format!("{:.1}{}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_number() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("capacity");
        let bad = dir.path().join("status");
        std::fs::write(&good, "87\n").unwrap();
        std::fs::write(&bad, "Charging\n").unwrap();

        assert_eq!(read_number::<u32>(&good).unwrap(), 87);
        let err = read_number::<u32>(&bad).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(read_number::<u32>(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_percent_clamps() {
        assert_eq!(percent(50.0, 200.0), 25);
        assert_eq!(percent(300.0, 200.0), 100);
        assert_eq!(percent(-5.0, 200.0), 0);
        assert_eq!(percent(5.0, 0.0), 0);
    }

    #[test]
    fn test_scale_bytes() {
        assert_eq!(scale_bytes(512.0, 1024), "512B");
        assert_eq!(scale_bytes(1536.0, 1024), "1.5K");
        assert_eq!(scale_bytes(5.0 * 1024.0 * 1024.0 * 1024.0, 1024), "5.0G");
        assert_eq!(scale_bytes(2500.0, 1000), "2.5K");
    }
}
