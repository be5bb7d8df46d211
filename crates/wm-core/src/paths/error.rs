use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to resolve or prepare a marketplace directory.
#[derive(Debug, Error)]
pub enum PathError {
    /// Neither `WMARKET_DATA_DIR` nor a platform data directory is available.
    #[error("no data directory: set WMARKET_DATA_DIR")]
    NoDataDir,

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
