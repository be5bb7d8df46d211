//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics.

use anyhow::Result;
use wm_core::{data_root, default_files_dir, env_file_path, ledger_path};

/// Print every resolved path in `key = value` form.
pub fn execute() -> Result<()> {
    println!("data_root = {}", data_root()?.display());
    println!("ledger = {}", ledger_path()?.display());
    println!("files_dir = {}", default_files_dir()?.display());
    println!("env_file = {}", env_file_path()?.display());
    Ok(())
}
