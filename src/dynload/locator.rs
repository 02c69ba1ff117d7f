use std::sync::Arc;

use super::library_filename;
use crate::env::{Environment, HOME_VAR, NATIVE_LIB_VAR};

/// Resolves the filesystem path of the native library.
///
/// Resolution order is the `MBT_WGPU_NATIVE_LIB` override (used verbatim),
/// then `<home>/.local/lib/<filename>`. No I/O happens here beyond environment
/// lookups; an unresolvable path is a valid outcome that the loader interprets.
#[derive(Clone)]
pub struct LibraryLocator {
    env: Arc<dyn Environment>,
}

impl LibraryLocator {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }

    pub fn resolve_path(&self) -> Option<String> {
        if let Some(path) = self.env.non_empty(NATIVE_LIB_VAR) {
            return Some(path);
        }
        let home = self.env.non_empty(HOME_VAR)?;
        Some(default_install_path(&home))
    }

    /// Raw value of the override variable, for diagnostics.
    pub fn override_value(&self) -> Option<String> {
        self.env.non_empty(NATIVE_LIB_VAR)
    }

    pub(crate) fn env(&self) -> &Arc<dyn Environment> {
        &self.env
    }
}

pub fn default_install_path(home: &str) -> String {
    if cfg!(windows) {
        format!("{home}\\.local\\lib\\{}", library_filename())
    } else {
        format!("{home}/.local/lib/{}", library_filename())
    }
}
