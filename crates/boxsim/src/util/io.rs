//! I/O utility functions

use std::fs;
use std::io;
use std::path::Path;

/// Write content to a file atomically using write-then-rename pattern.
///
/// A report is never left half-written when a run is interrupted: the content
/// goes to a sibling `.tmp` file first and is then renamed over the target.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("output/transition_50yrs_100k.json"), &json)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// `report.svg` -> `report.svg.tmp`, so different artifacts never share a temp file
fn temp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");

        atomic_write(&path, "{\"mode\":\"static\"}").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\"mode\":\"static\"}");

        // Temp file should not exist
        assert!(!dir.path().join("summary.json.tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.svg");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_atomic_write_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.svg");
        assert!(atomic_write(&path, "x").is_err());
    }
}
