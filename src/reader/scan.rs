use super::{ParseReport, parse_file};
use crate::error::ParseError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of loading one file during a scan.
#[derive(Debug)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub result: Result<ParseReport, ParseError>,
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Gather colour table files under each root. Paths given directly are always
/// kept; files found while walking a directory must carry a known extension.
pub fn find_table_files(roots: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = roots
        .iter()
        .flat_map(|root| {
            WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| match e {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        tracing::warn!("Skipping unreadable entry: {}", err);
                        None
                    }
                })
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.depth() == 0 || has_extension(e.path(), extensions))
                .map(|e| e.into_path())
        })
        .collect();

    files.sort();
    files.dedup();
    files
}

pub fn load_entry(path: &Path) -> ScanEntry {
    let size_bytes = path.metadata().map(|m| m.len()).unwrap_or(0);
    ScanEntry {
        path: path.to_path_buf(),
        size_bytes,
        result: parse_file(path),
    }
}
