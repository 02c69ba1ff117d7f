//! Locating, loading, and resolving symbols from `wgpu-native`.
//!
//! The three stages run strictly in order: the [`LibraryLocator`] turns the
//! environment into a path, the [`LibraryLoader`] opens that path once and
//! caches the handle, and the [`SymbolResolver`] looks up entry points in the
//! cached handle. Every stage distinguishes [`Requirement::Required`] (abort
//! with diagnostics) from [`Requirement::Optional`] (silently absent).
//!
//! Symbols are looked up through the platform loader rather than through
//! `wgpuGetProcAddress`, which some `wgpu-native` builds ship as a stub that
//! panics for any name it does not special-case.

mod diagnostic;
mod loader;
mod locator;
mod resolver;

pub use diagnostic::*;
pub use loader::*;
pub use locator::*;
pub use resolver::*;

/// Whether a failure to open or resolve terminates the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

impl From<bool> for Requirement {
    fn from(required: bool) -> Self {
        if required {
            Requirement::Required
        } else {
            Requirement::Optional
        }
    }
}

/// Platform-specific filename of the native library.
pub const fn library_filename() -> &'static str {
    if cfg!(windows) {
        "wgpu_native.dll"
    } else if cfg!(target_os = "macos") {
        "libwgpu_native.dylib"
    } else {
        "libwgpu_native.so"
    }
}

/// Human-readable default install directory, used in fatal diagnostics.
pub const fn install_hint() -> &'static str {
    if cfg!(windows) {
        "%USERPROFILE%\\.local\\lib"
    } else {
        "~/.local/lib"
    }
}
