//! Filesystem Sweep
//!
//! Shallow scan of user-facing directories (downloads, caches). Only file
//! names and paths are inspected; contents are never read. Unreadable
//! directories and entries are skipped silently because partial visibility
//! is the norm on sandboxed platforms.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::classifier::file::scan_file;
use crate::types::ThreatDraft;

/// Sweep the given directories (non-recursively) and classify every regular
/// file by name. Directories that cannot be read contribute nothing.
pub fn scan_directories<P: AsRef<Path>>(dirs: &[P]) -> Vec<ThreatDraft> {
    let mut findings = Vec::new();

    for dir in dirs {
        let dir = dir.as_ref();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "directory not readable, skipping");
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(dir = %dir.display(), error = %err, "entry not readable, skipping");
                    continue;
                }
            };
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            let outcome = scan_file(&file_name, path.to_str());
            if let Some(threat) = outcome.threat {
                findings.push(threat);
            }
        }
    }

    info!(findings = findings.len(), dirs = dirs.len(), "filesystem sweep completed");
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("vigil-fs-scan-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn missing_directory_is_skipped() {
        let findings = scan_directories(&["/nonexistent/vigil-test-path"]);
        assert!(findings.is_empty());
    }

    #[test]
    fn flags_suspicious_files_and_ignores_clean_ones() {
        let dir = temp_dir("mixed");
        File::create(dir.join("notes.txt")).expect("create file");
        File::create(dir.join("trojan_loader.exe")).expect("create file");

        let findings = scan_directories(&[&dir]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].source.contains("trojan_loader.exe"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn subdirectories_are_not_descended_into() {
        let dir = temp_dir("shallow");
        fs::create_dir_all(dir.join("nested")).expect("create nested dir");
        File::create(dir.join("nested").join("keylogger.exe")).expect("create file");

        let findings = scan_directories(&[&dir]);
        assert!(findings.is_empty());

        let _ = fs::remove_dir_all(&dir);
    }
}
