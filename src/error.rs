use thiserror::Error;

use crate::dynload::{install_hint, library_filename};

#[derive(Debug, Error)]
pub enum BindingError {
    #[error(
        "cannot locate {} (set MBT_WGPU_NATIVE_LIB or install to {})",
        library_filename(),
        install_hint()
    )]
    Unresolved,
    #[error(
        "failed to load {path}: {source} (set MBT_WGPU_NATIVE_LIB or install to {})",
        install_hint()
    )]
    Load {
        path: String,
        #[source]
        source: libloading::Error,
    },
    #[error("required symbol name is empty")]
    EmptySymbolName,
    #[error("symbol name is not valid UTF-8: {0:?}")]
    InvalidSymbolName(Vec<u8>),
    #[error("failed to resolve required wgpu symbol {name}: {source}")]
    MissingSymbol {
        name: String,
        #[source]
        source: libloading::Error,
    },
    #[error("marker file: {0}")]
    Marker(#[from] std::io::Error),
}

/// Convenient crate-wide result type.
pub type Result<T, E = BindingError> = std::result::Result<T, E>;

/// Terminates the process for a misconfigured deployment.
///
/// Only reached on the required paths: there is no degraded mode for a
/// binding layer whose native library is gone.
pub fn fatal(err: &BindingError) -> ! {
    log::error!("{err}");
    eprintln!("wgpu-mbt: {err}");
    std::process::abort()
}
