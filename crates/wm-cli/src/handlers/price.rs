//! Price command handler.

use std::path::Path;

use anyhow::Result;
use wm_core::calculate_price;

use crate::error::CliError;

/// Size of the file at `path`, rejecting directories.
pub fn file_size(path: &Path) -> Result<u64, CliError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    if !metadata.is_file() {
        return Err(CliError::Arguments(format!(
            "not a file: {}",
            path.display()
        )));
    }
    Ok(metadata.len())
}

pub fn execute(path: Option<&Path>, bytes: Option<u64>) -> Result<()> {
    let size = match (path, bytes) {
        (_, Some(bytes)) => bytes,
        (Some(path), None) => file_size(path)?,
        (None, None) => {
            return Err(CliError::Arguments("a path or --bytes is required".into()).into());
        }
    };
    println!("{size} bytes: {} UNIT", calculate_price(size));
    Ok(())
}
