//! Synchronous capability getters: adapter/device limits and features, and
//! what a surface supports on a given adapter.
//!
//! The native side fills structs whose arrays it owns; everything is copied
//! out and released with the matching `*FreeMembers` call before returning.

use std::slice;

use crate::context::NativeContext;
use crate::ffi::*;

/// The object whose limits or features are queried.
#[derive(Clone, Copy, Debug)]
pub enum CapabilitySource {
    Adapter(WGPUAdapter),
    Device(WGPUDevice),
}

impl CapabilitySource {
    fn is_null(self) -> bool {
        match self {
            CapabilitySource::Adapter(h) => h.is_null(),
            CapabilitySource::Device(h) => h.is_null(),
        }
    }
}

/// Owned copy of `WGPUSurfaceCapabilities`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mbt-serde", derive(serde::Serialize))]
pub struct SurfaceCapabilities {
    pub usages: u64,
    pub formats: Vec<WGPUTextureFormat>,
    pub present_modes: Vec<WGPUPresentMode>,
    pub alpha_modes: Vec<WGPUCompositeAlphaMode>,
}

/// # Safety
/// `data` must be null or valid for `count` reads.
unsafe fn copy_list(data: *const u32, count: usize) -> Vec<u32> {
    if data.is_null() || count == 0 {
        return Vec::new();
    }
    slice::from_raw_parts(data, count).to_vec()
}

impl NativeContext {
    /// `None` for a null handle or a non-success status.
    pub fn limits(&self, source: CapabilitySource) -> Option<WGPULimits> {
        if source.is_null() {
            return None;
        }
        let mut limits = WGPULimits::default();
        let st = match source {
            CapabilitySource::Adapter(adapter) => {
                let get = self.procs().adapter_get_limits.required(self.resolver());
                unsafe { get(adapter, &mut limits) }
            }
            CapabilitySource::Device(device) => {
                let get = self.procs().device_get_limits.required(self.resolver());
                unsafe { get(device, &mut limits) }
            }
        };
        if st != status::Success {
            log::debug!("{source:?}: get limits failed with status {st}");
            return None;
        }
        Some(limits)
    }

    /// Features the object supports, in native order. Empty for a null handle.
    pub fn supported_features(&self, source: CapabilitySource) -> Vec<WGPUFeatureName> {
        if source.is_null() {
            return Vec::new();
        }
        let mut features = WGPUSupportedFeatures::default();
        match source {
            CapabilitySource::Adapter(adapter) => {
                let get = self.procs().adapter_get_features.required(self.resolver());
                unsafe { get(adapter, &mut features) }
            }
            CapabilitySource::Device(device) => {
                let get = self.procs().device_get_features.required(self.resolver());
                unsafe { get(device, &mut features) }
            }
        }
        let out = unsafe { copy_list(features.features, features.featureCount) };
        let free = self
            .procs()
            .supported_features_free_members
            .required(self.resolver());
        unsafe { free(features) };
        out
    }

    pub fn surface_capabilities(
        &self,
        surface: WGPUSurface,
        adapter: WGPUAdapter,
    ) -> Option<SurfaceCapabilities> {
        if surface.is_null() || adapter.is_null() {
            return None;
        }
        let get = self.procs().surface_get_capabilities.required(self.resolver());
        let mut caps = WGPUSurfaceCapabilities::default();
        let st = unsafe { get(surface, adapter, &mut caps) };
        if st != status::Success {
            log::debug!("surface capabilities failed with status {st}");
            return None;
        }
        let out = unsafe {
            SurfaceCapabilities {
                usages: caps.usages,
                formats: copy_list(caps.formats, caps.formatCount),
                present_modes: copy_list(caps.presentModes, caps.presentModeCount),
                alpha_modes: copy_list(caps.alphaModes, caps.alphaModeCount),
            }
        };
        let free = self
            .procs()
            .surface_capabilities_free_members
            .required(self.resolver());
        unsafe { free(caps) };
        Some(out)
    }
}
