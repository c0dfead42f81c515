//! Legacy Z override file.
//!
//! Older tooling drove the batch from a small text file holding one Z per
//! line (historically at most two). The semantics are deliberately loose:
//!
//! - a missing file is not an error; the caller's fallback list is used and
//!   the file is never opened
//! - values are parsed as floats and truncated toward zero, so "10.0" reads
//!   as 10
//! - blank and unparsable lines are skipped
//! - reading stops once `max_n` values have been collected
//!
//! A zero in the file is passed through: the batch driver records it as a
//! skipped Z rather than failing the whole run.

use std::path::Path;

use crate::error::AppError;

/// Read up to `max_n` Z values from `path`, or return `fallback` if the file
/// does not exist.
pub fn load_z_list(path: &Path, fallback: &[u32], max_n: usize) -> Result<Vec<u32>, AppError> {
    if !path.exists() {
        return Ok(fallback.to_vec());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::new(2, format!("Failed to read Z list '{}': {e}", path.display()))
    })?;

    let mut values = Vec::new();
    for line in content.lines() {
        let s = line.trim();
        if s.is_empty() {
            continue;
        }
        if let Ok(v) = s.parse::<f64>() {
            let truncated = v.trunc();
            if truncated >= 0.0 && truncated <= f64::from(u32::MAX) {
                values.push(truncated as u32);
            }
        }
        if values.len() >= max_n {
            break;
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("melt-zlist-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_silently() {
        let path = std::env::temp_dir().join("melt-zlist-definitely-missing.txt");
        let zs = load_z_list(&path, &[10, 1000], 2).unwrap();
        assert_eq!(zs, vec![10, 1000]);
    }

    #[test]
    fn reads_first_two_integers() {
        let path = temp_file("two", "10\n1000\n50\n");
        let zs = load_z_list(&path, &[], 2).unwrap();
        assert_eq!(zs, vec![10, 1000]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn truncates_floats_and_skips_junk() {
        let path = temp_file("junk", "\n2.9\nnot-a-number\n7\n");
        let zs = load_z_list(&path, &[], 2).unwrap();
        assert_eq!(zs, vec![2, 7]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn zero_is_passed_through_for_the_driver_to_skip() {
        let path = temp_file("zero", "0\n5\n");
        let zs = load_z_list(&path, &[], 2).unwrap();
        assert_eq!(zs, vec![0, 5]);
        std::fs::remove_file(&path).unwrap();
    }
}
