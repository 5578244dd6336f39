// File Operations
// Whole-file reads and writes for cipher input/output and key records

use std::fs;
use std::io;
use std::path::Path;

use crate::error::CryptoResult;

/// Read entire file into memory
pub fn read_file(path: &Path) -> CryptoResult<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Read a file, treating a missing file as `None`
pub fn read_optional(path: &Path) -> CryptoResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write data to file, creating missing parent directories
pub fn write_file(path: &Path, data: &[u8]) -> CryptoResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;
    Ok(())
}

/// Format file size for display
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
