use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Driver-level failures. The table core itself never errors: unknown ids
/// and degenerate declarations resolve to defined defaults, so the only
/// things that can go wrong live at the file and terminal boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Io(#[from] io::Error),
}
