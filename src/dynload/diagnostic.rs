use std::fmt;

use libloading::{Library, Symbol};

use super::{LibraryLocator, SymbolResolver};

/// Symbol probed to tell `wgpu-native` apart from an arbitrary library.
pub const CORE_SYMBOL: &str = "wgpuCreateInstance";

// Report keys follow the platform loader's vocabulary.
#[cfg(unix)]
const OPEN_FAILED: &str = "dlopen failed";
#[cfg(unix)]
const ERROR_KEY: &str = "dlerror";
#[cfg(unix)]
const LOOKUP: &str = "dlsym";
#[cfg(not(unix))]
const OPEN_FAILED: &str = "LoadLibrary failed";
#[cfg(not(unix))]
const ERROR_KEY: &str = "error";
#[cfg(not(unix))]
const LOOKUP: &str = "GetProcAddress";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "mbt-serde", derive(serde::Serialize))]
pub enum ProbeStatus {
    Unresolved,
    LoadFailed(String),
    MissingSymbol(String),
    Available,
}

/// How the native library would be located and loaded right now.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "mbt-serde", derive(serde::Serialize))]
pub struct LibraryReport {
    pub override_value: Option<String>,
    pub resolved_path: Option<String>,
    pub status: ProbeStatus,
}

impl LibraryReport {
    /// Probes with a fresh, uncached handle so the report never disturbs the
    /// loader's cache and never aborts.
    pub fn probe(locator: &LibraryLocator) -> Self {
        let override_value = locator.override_value();
        let resolved_path = locator.resolve_path();
        let status = match resolved_path.as_deref() {
            None => ProbeStatus::Unresolved,
            Some(path) => match unsafe { Library::new(path) } {
                Err(err) => ProbeStatus::LoadFailed(err.to_string()),
                Ok(lib) => {
                    let sym: Result<Symbol<*mut std::ffi::c_void>, _> =
                        unsafe { lib.get(CORE_SYMBOL.as_bytes()) };
                    match sym {
                        Ok(_) => ProbeStatus::Available,
                        Err(err) => ProbeStatus::MissingSymbol(err.to_string()),
                    }
                }
            },
        };
        Self {
            override_value,
            resolved_path,
            status,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == ProbeStatus::Available
    }
}

impl fmt::Display for LibraryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "MBT_WGPU_NATIVE_LIB={}",
            self.override_value.as_deref().unwrap_or("<unset>")
        )?;
        writeln!(
            f,
            "resolved_path={}",
            self.resolved_path.as_deref().unwrap_or("<none>")
        )?;
        match &self.status {
            ProbeStatus::Unresolved => writeln!(f, "status=unavailable (cannot resolve path)"),
            ProbeStatus::LoadFailed(err) => {
                writeln!(f, "{OPEN_FAILED}")?;
                if !err.is_empty() {
                    writeln!(f, "{ERROR_KEY}={err}")?;
                }
                Ok(())
            }
            ProbeStatus::MissingSymbol(err) => {
                writeln!(f, "{LOOKUP}({CORE_SYMBOL})=failed")?;
                if !err.is_empty() {
                    writeln!(f, "{ERROR_KEY}={err}")?;
                }
                writeln!(f, "status=unavailable (missing symbol)")
            }
            ProbeStatus::Available => {
                writeln!(f, "{LOOKUP}({CORE_SYMBOL})=ok")?;
                writeln!(f, "status=available")
            }
        }
    }
}

/// True iff the library opens (optionally) and exports the core symbol.
pub fn available(resolver: &SymbolResolver) -> bool {
    resolver
        .resolve_raw(CORE_SYMBOL, super::Requirement::Optional)
        .is_some()
}

/// Longest symbol name accepted from the host.
pub const MAX_SYMBOL_NAME_LEN: usize = 256;

/// Optional presence probe for a host-supplied (not NUL-terminated) name.
pub fn optional_symbol_present(resolver: &SymbolResolver, name: &[u8]) -> bool {
    if name.is_empty() || name.len() > MAX_SYMBOL_NAME_LEN {
        return false;
    }
    resolver
        .resolve_raw_bytes(name, super::Requirement::Optional)
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynload::LibraryLoader;
    use crate::env::{MapEnv, HOME_VAR, NATIVE_LIB_VAR};
    use std::sync::Arc;

    fn locator(env: MapEnv) -> LibraryLocator {
        LibraryLocator::new(Arc::new(env))
    }

    #[test]
    fn report_without_any_path() {
        let report = LibraryReport::probe(&locator(MapEnv::new()));
        assert_eq!(report.status, ProbeStatus::Unresolved);
        assert_eq!(
            report.to_string(),
            "MBT_WGPU_NATIVE_LIB=<unset>\nresolved_path=<none>\nstatus=unavailable (cannot resolve path)\n"
        );
    }

    #[test]
    fn report_with_missing_file() {
        let report = LibraryReport::probe(&locator(
            MapEnv::new().set(NATIVE_LIB_VAR, "/nonexistent/libwgpu_native.so"),
        ));
        assert!(matches!(report.status, ProbeStatus::LoadFailed(_)));
        let text = report.to_string();
        assert!(text.starts_with("MBT_WGPU_NATIVE_LIB=/nonexistent/libwgpu_native.so\n"));
        assert!(text.contains("resolved_path=/nonexistent/libwgpu_native.so\n"));
        assert!(text.contains(&format!("{OPEN_FAILED}\n")));
    }

    #[cfg(unix)]
    #[test]
    fn unix_report_uses_loader_keys() {
        let failed = LibraryReport {
            override_value: None,
            resolved_path: Some("/x/libwgpu_native.so".into()),
            status: ProbeStatus::LoadFailed("cannot open shared object file".into()),
        };
        assert_eq!(
            failed.to_string(),
            "MBT_WGPU_NATIVE_LIB=<unset>\nresolved_path=/x/libwgpu_native.so\n\
             dlopen failed\ndlerror=cannot open shared object file\n"
        );

        let missing = LibraryReport {
            status: ProbeStatus::MissingSymbol("undefined symbol".into()),
            ..failed.clone()
        };
        assert!(missing
            .to_string()
            .ends_with("dlsym(wgpuCreateInstance)=failed\ndlerror=undefined symbol\nstatus=unavailable (missing symbol)\n"));

        let ok = LibraryReport {
            status: ProbeStatus::Available,
            ..failed
        };
        assert!(ok
            .to_string()
            .ends_with("dlsym(wgpuCreateInstance)=ok\nstatus=available\n"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn report_for_a_library_without_the_core_symbol() {
        let loc = locator(MapEnv::new().set(NATIVE_LIB_VAR, "libc.so.6"));
        let report = LibraryReport::probe(&loc);
        assert!(matches!(report.status, ProbeStatus::MissingSymbol(_)));
        assert!(report.to_string().ends_with("status=unavailable (missing symbol)\n"));

        let resolver = SymbolResolver::new(LibraryLoader::new(loc));
        assert!(!available(&resolver));
        assert!(optional_symbol_present(&resolver, b"strlen"));
    }

    #[test]
    fn symbol_presence_rejects_bad_names() {
        let resolver = SymbolResolver::new(LibraryLoader::new(locator(
            MapEnv::new().set(HOME_VAR, "/tmp/nohome"),
        )));
        assert!(!optional_symbol_present(&resolver, b""));
        assert!(!optional_symbol_present(&resolver, &[b'a'; MAX_SYMBOL_NAME_LEN + 1]));
        assert!(!optional_symbol_present(&resolver, b"wgpuCreateInstance"));
    }
}
