use std::sync::OnceLock;

use crate::dynload::SymbolResolver;
use crate::error::fatal;
use crate::ffi::*;

/// One named native entry point, resolved on first use and remembered for
/// the lifetime of its table.
pub struct Proc<F: Copy> {
    name: &'static str,
    slot: OnceLock<Option<F>>,
}

impl<F: Copy> Proc<F> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: OnceLock::new(),
        }
    }

    /// A slot that is already resolved to `f`, bypassing the loader.
    pub fn preset(name: &'static str, f: F) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(Some(f));
        Self { name, slot }
    }

    /// A slot that is already known to be missing.
    pub fn absent(name: &'static str) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(None);
        Self { name, slot }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Aborts the process if the entry point cannot be resolved.
    pub fn required(&self, resolver: &SymbolResolver) -> F {
        if let Some(f) = self.lookup(resolver) {
            return f;
        }
        // Rerun with required semantics for the full diagnostics.
        match unsafe { resolver.try_resolve::<F>(self.name) } {
            Ok(f) => f,
            Err(err) => fatal(&err),
        }
    }

    pub fn optional(&self, resolver: &SymbolResolver) -> Option<F> {
        self.lookup(resolver)
    }

    fn lookup(&self, resolver: &SymbolResolver) -> Option<F> {
        *self
            .slot
            .get_or_init(|| unsafe { resolver.optional::<F>(self.name) })
    }
}

impl<F: Copy> std::fmt::Debug for Proc<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.slot.get() {
            None => "unresolved",
            Some(None) => "absent",
            Some(Some(_)) => "resolved",
        };
        write!(f, "Proc({} {state})", self.name)
    }
}

macro_rules! procs {
    ($($field:ident: $ty:ty = $name:literal),* $(,)?) => {
        /// Every native entry point this layer calls.
        ///
        /// Fields start unresolved; replace individual fields with
        /// [`Proc::preset`] or [`Proc::absent`] to inject entry points.
        pub struct WgpuProcs {
            $(pub $field: Proc<$ty>,)*
        }

        impl Default for WgpuProcs {
            fn default() -> Self {
                Self {
                    $($field: Proc::new($name),)*
                }
            }
        }
    };
}

procs! {
    create_instance: PFN_wgpuCreateInstance = "wgpuCreateInstance",
    instance_process_events: PFN_wgpuInstanceProcessEvents = "wgpuInstanceProcessEvents",
    instance_request_adapter: PFN_wgpuInstanceRequestAdapter = "wgpuInstanceRequestAdapter",
    instance_create_surface: PFN_wgpuInstanceCreateSurface = "wgpuInstanceCreateSurface",
    adapter_request_device: PFN_wgpuAdapterRequestDevice = "wgpuAdapterRequestDevice",
    queue_on_submitted_work_done: PFN_wgpuQueueOnSubmittedWorkDone = "wgpuQueueOnSubmittedWorkDone",
    device_create_compute_pipeline: PFN_wgpuDeviceCreateComputePipeline = "wgpuDeviceCreateComputePipeline",
    device_create_render_pipeline: PFN_wgpuDeviceCreateRenderPipeline = "wgpuDeviceCreateRenderPipeline",
    device_create_compute_pipeline_async: PFN_wgpuDeviceCreateComputePipelineAsync = "wgpuDeviceCreateComputePipelineAsync",
    device_create_render_pipeline_async: PFN_wgpuDeviceCreateRenderPipelineAsync = "wgpuDeviceCreateRenderPipelineAsync",
    shader_module_get_compilation_info: PFN_wgpuShaderModuleGetCompilationInfo = "wgpuShaderModuleGetCompilationInfo",
    device_push_error_scope: PFN_wgpuDevicePushErrorScope = "wgpuDevicePushErrorScope",
    device_pop_error_scope: PFN_wgpuDevicePopErrorScope = "wgpuDevicePopErrorScope",
    device_poll: PFN_wgpuDevicePoll = "wgpuDevicePoll",
    device_destroy: PFN_wgpuDeviceDestroy = "wgpuDeviceDestroy",
    buffer_map_async: PFN_wgpuBufferMapAsync = "wgpuBufferMapAsync",
    buffer_get_mapped_range: PFN_wgpuBufferGetMappedRange = "wgpuBufferGetMappedRange",
    buffer_get_const_mapped_range: PFN_wgpuBufferGetConstMappedRange = "wgpuBufferGetConstMappedRange",
    buffer_unmap: PFN_wgpuBufferUnmap = "wgpuBufferUnmap",
    get_proc_address: PFN_wgpuGetProcAddress = "wgpuGetProcAddress",
    adapter_get_limits: PFN_wgpuAdapterGetLimits = "wgpuAdapterGetLimits",
    device_get_limits: PFN_wgpuDeviceGetLimits = "wgpuDeviceGetLimits",
    adapter_get_features: PFN_wgpuAdapterGetFeatures = "wgpuAdapterGetFeatures",
    device_get_features: PFN_wgpuDeviceGetFeatures = "wgpuDeviceGetFeatures",
    supported_features_free_members: PFN_wgpuSupportedFeaturesFreeMembers = "wgpuSupportedFeaturesFreeMembers",
    surface_get_capabilities: PFN_wgpuSurfaceGetCapabilities = "wgpuSurfaceGetCapabilities",
    surface_capabilities_free_members: PFN_wgpuSurfaceCapabilitiesFreeMembers = "wgpuSurfaceCapabilitiesFreeMembers",
    surface_configure: PFN_wgpuSurfaceConfigure = "wgpuSurfaceConfigure",
    surface_unconfigure: PFN_wgpuSurfaceUnconfigure = "wgpuSurfaceUnconfigure",
    surface_present: PFN_wgpuSurfacePresent = "wgpuSurfacePresent",
}

impl std::fmt::Debug for WgpuProcs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuProcs")
            .field("create_instance", &self.create_instance)
            .field("instance_process_events", &self.instance_process_events)
            .finish_non_exhaustive()
    }
}
