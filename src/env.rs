use std::collections::HashMap;

/// Absolute path override for the native library.
pub const NATIVE_LIB_VAR: &str = "MBT_WGPU_NATIVE_LIB";
pub const ENABLE_PIPELINE_ASYNC_VAR: &str = "MBT_WGPU_ENABLE_PIPELINE_ASYNC";
pub const DISABLE_PIPELINE_ASYNC_VAR: &str = "MBT_WGPU_DISABLE_PIPELINE_ASYNC";
pub const ENABLE_COMPILATION_INFO_VAR: &str = "MBT_WGPU_ENABLE_COMPILATION_INFO";
pub const DISABLE_COMPILATION_INFO_VAR: &str = "MBT_WGPU_DISABLE_COMPILATION_INFO";
pub const DEBUG_REQUEST_ADAPTER_VAR: &str = "MBT_WGPU_DEBUG_REQUEST_ADAPTER";
pub const DEBUG_REQUEST_DEVICE_VAR: &str = "MBT_WGPU_DEBUG_REQUEST_DEVICE";
pub const DEBUG_LABELS_VAR: &str = "MBT_WGPU_DEBUG_LABELS";
pub const XDG_DATA_HOME_VAR: &str = "XDG_DATA_HOME";

#[cfg(windows)]
pub const HOME_VAR: &str = "USERPROFILE";
#[cfg(not(windows))]
pub const HOME_VAR: &str = "HOME";

/// Source of configuration variables.
///
/// The process singleton reads the real environment through [`ProcessEnv`];
/// tests hand a [`MapEnv`] to an isolated context instead of mutating
/// process-wide state.
pub trait Environment: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;

    /// Like [`Environment::var`], but treats an empty value as unset.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.is_empty())
    }

    fn flag(&self, key: &str) -> bool {
        self.var(key).map(|v| is_truthy(&v)).unwrap_or(false)
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Default, Clone, Debug)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn is_truthy(value: &str) -> bool {
    matches!(
        value,
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On"
    )
}
