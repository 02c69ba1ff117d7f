use std::sync::{Arc, OnceLock};

use crate::dynload::{self, LibraryLoader, LibraryLocator, LibraryReport, SymbolResolver};
use crate::env::{Environment, ProcessEnv};
use crate::ffi::WGPUInstance;
use crate::gate::FeatureGate;
use crate::procs::WgpuProcs;
use crate::registry::DeviceLostRegistry;

/// Everything the binding layer keeps between calls: the cached library
/// handle, feature gates, device-lost registry, and the native entry points.
///
/// The exported C surface runs against [`NativeContext::global`]. Tests and
/// embedders build private contexts with [`NativeContext::with_env`] or
/// inject entry points with [`NativeContext::with_procs`].
pub struct NativeContext {
    resolver: SymbolResolver,
    gate: FeatureGate,
    device_lost: Arc<DeviceLostRegistry>,
    procs: WgpuProcs,
}

static GLOBAL: OnceLock<NativeContext> = OnceLock::new();

impl NativeContext {
    /// The process-wide context, reading the real process environment.
    pub fn global() -> &'static NativeContext {
        GLOBAL.get_or_init(|| NativeContext::with_env(Arc::new(ProcessEnv)))
    }

    pub fn with_env(env: Arc<dyn Environment>) -> Self {
        Self::with_procs(env, WgpuProcs::default())
    }

    pub fn with_procs(env: Arc<dyn Environment>, procs: WgpuProcs) -> Self {
        let locator = LibraryLocator::new(env);
        Self {
            gate: FeatureGate::new(locator.clone()),
            resolver: SymbolResolver::new(LibraryLoader::new(locator)),
            device_lost: Arc::new(DeviceLostRegistry::new()),
            procs,
        }
    }

    pub fn resolver(&self) -> &SymbolResolver {
        &self.resolver
    }

    pub fn loader(&self) -> &LibraryLoader {
        self.resolver.loader()
    }

    pub fn locator(&self) -> &LibraryLocator {
        self.resolver.locator()
    }

    pub fn env(&self) -> &Arc<dyn Environment> {
        self.locator().env()
    }

    pub fn gate(&self) -> &FeatureGate {
        &self.gate
    }

    pub fn device_lost(&self) -> &Arc<DeviceLostRegistry> {
        &self.device_lost
    }

    pub fn procs(&self) -> &WgpuProcs {
        &self.procs
    }

    /// True iff the library loads and exports `wgpuCreateInstance`.
    pub fn available(&self) -> bool {
        dynload::available(&self.resolver)
    }

    pub fn report(&self) -> LibraryReport {
        LibraryReport::probe(self.locator())
    }

    pub fn optional_symbol_present(&self, name: &[u8]) -> bool {
        dynload::optional_symbol_present(&self.resolver, name)
    }

    /// `wgpuCreateInstance(NULL)`.
    pub fn create_instance(&self) -> WGPUInstance {
        let create = self.procs.create_instance.required(&self.resolver);
        unsafe { create(std::ptr::null()) }
    }

    /// One `wgpuInstanceProcessEvents` call; no-op for a null instance.
    pub fn process_events(&self, instance: WGPUInstance) {
        if instance.is_null() {
            return;
        }
        let process = self.procs.instance_process_events.required(&self.resolver);
        unsafe { process(instance) }
    }
}

impl std::fmt::Debug for NativeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeContext")
            .field("resolved_path", &self.locator().resolve_path())
            .field("loaded", &self.loader().is_loaded())
            .field("pending_device_lost", &self.device_lost.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapEnv, HOME_VAR, NATIVE_LIB_VAR};
    use crate::ffi::{PFN_wgpuCreateInstance, WGPUInstanceDescriptor};
    use crate::procs::Proc;

    unsafe extern "C" fn fake_create(_desc: *const WGPUInstanceDescriptor) -> WGPUInstance {
        0x40 as WGPUInstance
    }

    #[test]
    fn private_context_reads_its_own_environment() {
        let ctx = NativeContext::with_env(Arc::new(
            MapEnv::new().set(NATIVE_LIB_VAR, "/opt/wgpu/libwgpu_native.so"),
        ));
        assert_eq!(
            ctx.locator().resolve_path().as_deref(),
            Some("/opt/wgpu/libwgpu_native.so")
        );
        assert!(!ctx.loader().is_loaded());
    }

    #[test]
    fn unavailable_without_a_library() {
        let ctx = NativeContext::with_env(Arc::new(MapEnv::new().set(HOME_VAR, "/tmp/nohome")));
        assert!(!ctx.available());
        assert!(!ctx.report().is_available());
        assert!(!ctx.optional_symbol_present(b"wgpuDeviceDestroy"));
    }

    #[test]
    fn injected_entry_points_bypass_the_loader() {
        let procs = WgpuProcs {
            create_instance: Proc::preset(
                "wgpuCreateInstance",
                fake_create as PFN_wgpuCreateInstance,
            ),
            ..WgpuProcs::default()
        };
        let ctx = NativeContext::with_procs(Arc::new(MapEnv::new()), procs);
        assert_eq!(ctx.create_instance() as usize, 0x40);
        assert_eq!(ctx.loader().load_attempts(), 0);
        ctx.process_events(std::ptr::null_mut());
    }
}
