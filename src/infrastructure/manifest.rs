use crate::domain::errors::SamplerError;
use log::warn;
use std::fs;
use std::path::Path;

/// Reads a newline-delimited list of audio paths, stripping trailing whitespace.
pub fn read_manifest(path: &Path) -> Result<Vec<String>, SamplerError> {
    let content = fs::read_to_string(path).map_err(|source| SamplerError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let entry = line.trim_end();
        if entry.is_empty() {
            warn!("{}:{}: skipping blank manifest line", path.display(), line_no + 1);
            continue;
        }
        files.push(entry.to_string());
    }
    Ok(files)
}
