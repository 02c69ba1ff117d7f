//! Best-effort debug labels and debug groups.
//!
//! Everything here is gated by [`Feature::DebugLabels`] and looks its entry
//! point up through the optional `wgpuGetProcAddress` on every call; a build
//! that does not export a setter simply drops the label.

use std::ffi::c_void;
use std::mem;

use crate::context::NativeContext;
use crate::ffi::*;
use crate::gate::Feature;

// Every `*SetLabel`, `*InsertDebugMarker`, and `*PushDebugGroup` takes the
// object handle plus one string view; every `*PopDebugGroup` takes the handle.
type StringCall = unsafe extern "C" fn(handle: *mut c_void, label: WGPUStringView);
type HandleCall = unsafe extern "C" fn(handle: *mut c_void);

macro_rules! label_targets {
    ($($variant:ident($handle:ty) => $object:literal),* $(,)?) => {
        /// A native object that can carry a debug label.
        #[derive(Clone, Copy, Debug)]
        pub enum LabelTarget {
            $($variant($handle),)*
        }

        impl LabelTarget {
            /// webgpu.h object name, e.g. `Buffer` for `wgpuBufferSetLabel`.
            pub fn object_name(self) -> &'static str {
                match self {
                    $(LabelTarget::$variant(_) => $object,)*
                }
            }

            fn handle(self) -> *mut c_void {
                match self {
                    $(LabelTarget::$variant(h) => h as *mut c_void,)*
                }
            }
        }
    };
}

label_targets! {
    BindGroup(WGPUBindGroup) => "BindGroup",
    BindGroupLayout(WGPUBindGroupLayout) => "BindGroupLayout",
    Buffer(WGPUBuffer) => "Buffer",
    CommandBuffer(WGPUCommandBuffer) => "CommandBuffer",
    CommandEncoder(WGPUCommandEncoder) => "CommandEncoder",
    ComputePass(WGPUComputePassEncoder) => "ComputePassEncoder",
    ComputePipeline(WGPUComputePipeline) => "ComputePipeline",
    Device(WGPUDevice) => "Device",
    PipelineLayout(WGPUPipelineLayout) => "PipelineLayout",
    QuerySet(WGPUQuerySet) => "QuerySet",
    Queue(WGPUQueue) => "Queue",
    RenderBundle(WGPURenderBundle) => "RenderBundle",
    RenderBundleEncoder(WGPURenderBundleEncoder) => "RenderBundleEncoder",
    RenderPass(WGPURenderPassEncoder) => "RenderPassEncoder",
    RenderPipeline(WGPURenderPipeline) => "RenderPipeline",
    Sampler(WGPUSampler) => "Sampler",
    ShaderModule(WGPUShaderModule) => "ShaderModule",
    Surface(WGPUSurface) => "Surface",
    Texture(WGPUTexture) => "Texture",
    TextureView(WGPUTextureView) => "TextureView",
}

/// An encoder that records debug markers and groups.
#[derive(Clone, Copy, Debug)]
pub enum DebugScope {
    CommandEncoder(WGPUCommandEncoder),
    ComputePass(WGPUComputePassEncoder),
    RenderPass(WGPURenderPassEncoder),
}

impl DebugScope {
    fn target(self) -> LabelTarget {
        match self {
            DebugScope::CommandEncoder(h) => LabelTarget::CommandEncoder(h),
            DebugScope::ComputePass(h) => LabelTarget::ComputePass(h),
            DebugScope::RenderPass(h) => LabelTarget::RenderPass(h),
        }
    }
}

impl NativeContext {
    /// Resolves `wgpu{object}{op}` for a non-null handle with labels enabled.
    fn debug_proc(&self, target: LabelTarget, op: &str) -> Option<unsafe extern "C" fn()> {
        if target.handle().is_null() || !self.gate().is_enabled(Feature::DebugLabels) {
            return None;
        }
        let get_proc = self.procs().get_proc_address.optional(self.resolver())?;
        let name = format!("wgpu{}{op}", target.object_name());
        let found = unsafe { get_proc(WGPUStringView::from_bytes(name.as_bytes())) };
        if found.is_none() {
            log::debug!("{name} not exported; dropped");
        }
        found
    }

    fn call_with_string(&self, target: LabelTarget, op: &str, text: &[u8]) -> bool {
        let Some(proc) = self.debug_proc(target, op) else {
            return false;
        };
        // The name looked up implies this signature.
        unsafe {
            let f: StringCall = mem::transmute(proc);
            f(target.handle(), WGPUStringView::from_bytes(text));
        }
        true
    }

    /// Best-effort label propagation. Returns true only if a setter was
    /// actually called.
    pub fn set_label(&self, target: LabelTarget, label: &[u8]) -> bool {
        self.call_with_string(target, "SetLabel", label)
    }

    pub fn insert_debug_marker(&self, scope: DebugScope, marker: &[u8]) -> bool {
        self.call_with_string(scope.target(), "InsertDebugMarker", marker)
    }

    pub fn push_debug_group(&self, scope: DebugScope, group: &[u8]) -> bool {
        self.call_with_string(scope.target(), "PushDebugGroup", group)
    }

    pub fn pop_debug_group(&self, scope: DebugScope) -> bool {
        let target = scope.target();
        let Some(proc) = self.debug_proc(target, "PopDebugGroup") else {
            return false;
        };
        unsafe {
            let f: HandleCall = mem::transmute(proc);
            f(target.handle());
        }
        true
    }
}
