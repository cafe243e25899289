//! CSV table holding every recorded point.

mod io;
mod path;

pub use io::{LoadedTable, ensure_table, load_points, save_points};
pub use path::write_atomic;

use std::path::PathBuf;

/// Failure reading or writing the point table.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode table {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed row {row} in {}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        /// 1-based line number, header included.
        row: u64,
        reason: String,
    },
}
