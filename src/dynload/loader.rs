use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use libloading::Library;
use parking_lot::Mutex;

use super::{LibraryLocator, Requirement};
use crate::error::{fatal, BindingError, Result};

/// Opens the native library at most once and caches the handle.
///
/// The handle is never closed; it lives as long as the loader, which for the
/// process-wide context is the whole process.
pub struct LibraryLoader {
    locator: LibraryLocator,
    cached: Mutex<Option<Arc<Library>>>,
    load_attempts: AtomicUsize,
}

impl LibraryLoader {
    pub fn new(locator: LibraryLocator) -> Self {
        Self {
            locator,
            cached: Mutex::new(None),
            load_attempts: AtomicUsize::new(0),
        }
    }

    pub fn locator(&self) -> &LibraryLocator {
        &self.locator
    }

    /// Fallible open. Returns the cached handle if one exists; otherwise
    /// resolves a path and invokes the platform loader while holding the lock,
    /// so concurrent first users observe a single load.
    pub fn try_open(&self) -> Result<Arc<Library>> {
        let mut slot = self.cached.lock();
        if let Some(lib) = slot.as_ref() {
            return Ok(Arc::clone(lib));
        }

        let path = self.locator.resolve_path().ok_or(BindingError::Unresolved)?;
        log::debug!("opening wgpu-native from {path}");
        self.load_attempts.fetch_add(1, Ordering::Relaxed);
        let lib = unsafe { Library::new(&path) }.map_err(|source| BindingError::Load {
            path: path.clone(),
            source,
        })?;

        let lib = Arc::new(lib);
        *slot = Some(Arc::clone(&lib));
        log::info!("loaded wgpu-native from {path}");
        Ok(lib)
    }

    pub fn open(&self, requirement: Requirement) -> Option<Arc<Library>> {
        match self.try_open() {
            Ok(lib) => Some(lib),
            Err(err) => match requirement {
                Requirement::Required => fatal(&err),
                Requirement::Optional => {
                    log::debug!("optional open of wgpu-native failed: {err}");
                    None
                }
            },
        }
    }

    pub fn open_required(&self) -> Arc<Library> {
        match self.try_open() {
            Ok(lib) => lib,
            Err(err) => fatal(&err),
        }
    }

    pub fn open_optional(&self) -> Option<Arc<Library>> {
        self.open(Requirement::Optional)
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.lock().is_some()
    }

    /// Number of times the platform loader has been invoked.
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::Relaxed)
    }
}
