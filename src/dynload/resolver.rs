use std::ffi::c_void;
use std::ptr::NonNull;

use libloading::Symbol;

use super::{LibraryLoader, LibraryLocator, Requirement};
use crate::error::{fatal, BindingError, Result};

/// Looks up entry points in the cached native library.
///
/// Optional lookups never force the library open as required: against an
/// unloadable library they simply yield `None`.
pub struct SymbolResolver {
    loader: LibraryLoader,
}

impl SymbolResolver {
    pub fn new(loader: LibraryLoader) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &LibraryLoader {
        &self.loader
    }

    pub fn locator(&self) -> &LibraryLocator {
        self.loader.locator()
    }

    /// Fallible lookup with required semantics for the library open.
    ///
    /// # Safety
    /// `F` must match the native signature of `name`.
    pub unsafe fn try_resolve<F: Copy>(&self, name: &str) -> Result<F> {
        if name.is_empty() {
            return Err(BindingError::EmptySymbolName);
        }
        let lib = self.loader.try_open()?;
        // libloading clears the platform error state before dlsym.
        let sym: Symbol<F> = lib
            .get(name.as_bytes())
            .map_err(|source| BindingError::MissingSymbol {
                name: name.to_string(),
                source,
            })?;
        Ok(*sym)
    }

    /// # Safety
    /// `F` must match the native signature of `name`.
    pub unsafe fn resolve<F: Copy>(&self, name: &str, requirement: Requirement) -> Option<F> {
        match requirement {
            Requirement::Required => match self.try_resolve(name) {
                Ok(f) => Some(f),
                Err(err) => fatal(&err),
            },
            Requirement::Optional => {
                if name.is_empty() {
                    return None;
                }
                let lib = self.loader.open_optional()?;
                let sym = lib.get::<F>(name.as_bytes()).ok()?;
                Some(*sym)
            }
        }
    }

    /// # Safety
    /// `F` must match the native signature of `name`.
    pub unsafe fn required<F: Copy>(&self, name: &str) -> F {
        match self.try_resolve(name) {
            Ok(f) => f,
            Err(err) => fatal(&err),
        }
    }

    /// # Safety
    /// `F` must match the native signature of `name`.
    pub unsafe fn optional<F: Copy>(&self, name: &str) -> Option<F> {
        self.resolve(name, Requirement::Optional)
    }

    /// Untyped lookup of a host-supplied name. Bytes that are not UTF-8 never
    /// name a symbol: absent when optional, fatal when required.
    pub fn resolve_raw_bytes(
        &self,
        name: &[u8],
        requirement: Requirement,
    ) -> Option<NonNull<c_void>> {
        match (symbol_name(name), requirement) {
            (Ok(name), _) => self.resolve_raw(name, requirement),
            (Err(err), Requirement::Required) => fatal(&err),
            (Err(_), Requirement::Optional) => None,
        }
    }

    /// Untyped lookup for callers that only need the address.
    pub fn resolve_raw(&self, name: &str, requirement: Requirement) -> Option<NonNull<c_void>> {
        let ptr = unsafe { self.resolve::<*mut c_void>(name, requirement) }?;
        NonNull::new(ptr)
    }
}

/// Borrows a host-supplied symbol name as text, without any lossy repair.
pub fn symbol_name(name: &[u8]) -> Result<&str> {
    std::str::from_utf8(name).map_err(|_| BindingError::InvalidSymbolName(name.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapEnv, NATIVE_LIB_VAR};
    use std::sync::Arc;

    fn resolver(env: MapEnv) -> SymbolResolver {
        SymbolResolver::new(LibraryLoader::new(LibraryLocator::new(Arc::new(env))))
    }

    #[test]
    fn optional_lookup_without_library_is_absent() {
        let r = resolver(MapEnv::new());
        assert!(r.resolve_raw("wgpuCreateInstance", Requirement::Optional).is_none());
        assert!(r.resolve_raw("", Requirement::Optional).is_none());
        assert!(!r.loader().is_loaded());
    }

    #[test]
    fn empty_required_name_is_rejected_before_opening() {
        let r = resolver(MapEnv::new());
        let err = unsafe { r.try_resolve::<*mut c_void>("") }.err().unwrap();
        assert!(matches!(err, BindingError::EmptySymbolName));
        assert_eq!(r.loader().load_attempts(), 0);
    }

    #[test]
    fn required_lookup_reports_unresolved_library() {
        let r = resolver(MapEnv::new());
        let err = unsafe { r.try_resolve::<*mut c_void>("wgpuCreateInstance") }
            .err()
            .unwrap();
        assert!(matches!(err, BindingError::Unresolved));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn missing_symbol_is_silent_optionally_and_an_error_otherwise() {
        let r = resolver(MapEnv::new().set(NATIVE_LIB_VAR, "libc.so.6"));
        assert!(r.resolve_raw("strlen", Requirement::Optional).is_some());
        assert!(r
            .resolve_raw("wgpu_mbt_definitely_not_here", Requirement::Optional)
            .is_none());
        let err = unsafe { r.try_resolve::<*mut c_void>("wgpu_mbt_definitely_not_here") }
            .err()
            .unwrap();
        assert!(matches!(err, BindingError::MissingSymbol { .. }));
        assert!(err.to_string().contains("wgpu_mbt_definitely_not_here"));
        assert_eq!(r.loader().load_attempts(), 1);

        assert!(r.resolve_raw_bytes(b"strlen", Requirement::Optional).is_some());
        assert!(r
            .resolve_raw_bytes(b"strlen\xff", Requirement::Optional)
            .is_none());
    }

    #[test]
    fn non_utf8_names_are_rejected_not_repaired() {
        assert_eq!(symbol_name(b"strlen").ok(), Some("strlen"));
        let err = symbol_name(b"strlen\xff").err().unwrap();
        assert!(matches!(&err, BindingError::InvalidSymbolName(bytes) if bytes == b"strlen\xff"));

        let r = resolver(MapEnv::new());
        assert!(r
            .resolve_raw_bytes(b"wgpu\xc3(", Requirement::Optional)
            .is_none());
        assert_eq!(r.loader().load_attempts(), 0);
    }
}
