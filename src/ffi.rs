//! `#[repr(C)]` mirrors of the parts of `webgpu.h` / `wgpu.h` this layer builds
//! or reads. Descriptors that are only passed through are kept opaque.
//!
//! Native enums are modelled as `u32` constants rather than Rust enums so an
//! out-of-range value coming back from the library is never undefined
//! behaviour.
#![allow(non_camel_case_types, non_snake_case, non_upper_case_globals)]

use std::ffi::{c_char, c_void};
use std::ptr;

macro_rules! opaque_handles {
    ($($impl_name:ident => $handle:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $impl_name {
                _private: [u8; 0],
            }
            pub type $handle = *mut $impl_name;
        )*
    };
}

opaque_handles! {
    WGPUInstanceImpl => WGPUInstance,
    WGPUAdapterImpl => WGPUAdapter,
    WGPUDeviceImpl => WGPUDevice,
    WGPUQueueImpl => WGPUQueue,
    WGPUBufferImpl => WGPUBuffer,
    WGPUTextureImpl => WGPUTexture,
    WGPUCommandEncoderImpl => WGPUCommandEncoder,
    WGPUShaderModuleImpl => WGPUShaderModule,
    WGPUComputePipelineImpl => WGPUComputePipeline,
    WGPURenderPipelineImpl => WGPURenderPipeline,
    WGPUSurfaceImpl => WGPUSurface,
    WGPUTextureViewImpl => WGPUTextureView,
    WGPUSamplerImpl => WGPUSampler,
    WGPUBindGroupImpl => WGPUBindGroup,
    WGPUBindGroupLayoutImpl => WGPUBindGroupLayout,
    WGPUPipelineLayoutImpl => WGPUPipelineLayout,
    WGPUCommandBufferImpl => WGPUCommandBuffer,
    WGPUComputePassEncoderImpl => WGPUComputePassEncoder,
    WGPURenderPassEncoderImpl => WGPURenderPassEncoder,
    WGPURenderBundleImpl => WGPURenderBundle,
    WGPURenderBundleEncoderImpl => WGPURenderBundleEncoder,
    WGPUQuerySetImpl => WGPUQuerySet,
}

macro_rules! opaque_structs {
    ($($name:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }
        )*
    };
}

// Passed through untouched; their layout belongs to the descriptor builders.
opaque_structs! {
    WGPURequestAdapterOptions,
    WGPUComputePipelineDescriptor,
    WGPURenderPipelineDescriptor,
    WGPUInstanceDescriptor,
}

pub type WGPUBool = u32;
pub type WGPUFlags = u64;
pub type WGPUFeatureName = u32;
pub type WGPUSType = u32;
pub type WGPUCallbackMode = u32;
pub type WGPUSubmissionIndex = u64;
pub type WGPUTextureFormat = u32;
pub type WGPUPresentMode = u32;
pub type WGPUCompositeAlphaMode = u32;

/// `WGPUStatus`, returned by the synchronous getters.
pub mod status {
    pub const Success: u32 = 1;
    pub const Error: u32 = 2;
}

pub mod callback_mode {
    pub const WaitAnyOnly: u32 = 1;
    pub const AllowProcessEvents: u32 = 2;
    pub const AllowSpontaneous: u32 = 3;
}

pub mod request_adapter_status {
    pub const Success: u32 = 1;
    pub const InstanceDropped: u32 = 2;
    pub const Unavailable: u32 = 3;
    pub const Error: u32 = 4;
}

pub mod request_device_status {
    pub const Success: u32 = 1;
    pub const InstanceDropped: u32 = 2;
    pub const Error: u32 = 3;
}

pub mod queue_work_done_status {
    pub const Success: u32 = 1;
    pub const InstanceDropped: u32 = 2;
    pub const Error: u32 = 3;
}

pub mod create_pipeline_async_status {
    pub const Success: u32 = 1;
    pub const InstanceDropped: u32 = 2;
    pub const ValidationError: u32 = 3;
    pub const InternalError: u32 = 4;
}

pub mod compilation_info_request_status {
    pub const Success: u32 = 1;
    pub const InstanceDropped: u32 = 2;
}

pub mod compilation_message_type {
    pub const Error: u32 = 1;
    pub const Warning: u32 = 2;
    pub const Info: u32 = 3;
}

pub mod pop_error_scope_status {
    pub const Success: u32 = 1;
    pub const InstanceDropped: u32 = 2;
    pub const EmptyStack: u32 = 3;
}

pub mod error_type {
    pub const NoError: u32 = 1;
    pub const Validation: u32 = 2;
    pub const OutOfMemory: u32 = 3;
    pub const Internal: u32 = 4;
    pub const Unknown: u32 = 5;
}

pub mod error_filter {
    pub const Validation: u32 = 1;
    pub const OutOfMemory: u32 = 2;
    pub const Internal: u32 = 3;
}

pub mod device_lost_reason {
    pub const Unknown: u32 = 1;
    pub const Destroyed: u32 = 2;
    pub const InstanceDropped: u32 = 3;
    pub const FailedCreation: u32 = 4;
}

pub mod map_async_status {
    pub const Success: u32 = 1;
    pub const InstanceDropped: u32 = 2;
    pub const Error: u32 = 3;
    pub const Aborted: u32 = 4;
}

pub mod map_mode {
    pub const Read: u64 = 0x1;
    pub const Write: u64 = 0x2;
}

pub mod stype {
    pub const SurfaceSourceMetalLayer: u32 = 0x0000_0004;
    pub const SurfaceSourceWindowsHWND: u32 = 0x0000_0005;
    pub const SurfaceSourceXlibWindow: u32 = 0x0000_0006;
    pub const SurfaceSourceWaylandSurface: u32 = 0x0000_0007;
    pub const SurfaceSourceXCBWindow: u32 = 0x0000_0009;
}

/// `WGPU_STRLEN`: the string is NUL-terminated.
pub const WGPU_STRLEN: usize = usize::MAX;

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct WGPUStringView {
    pub data: *const c_char,
    pub length: usize,
}

impl WGPUStringView {
    pub const fn null() -> Self {
        Self {
            data: ptr::null(),
            length: 0,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.as_ptr() as *const c_char,
            length: bytes.len(),
        }
    }

    /// Borrow the viewed bytes.
    ///
    /// # Safety
    /// `data` must be valid for `length` bytes (or NUL-terminated when
    /// `length == WGPU_STRLEN`) for the returned lifetime.
    pub unsafe fn as_bytes<'a>(&self) -> &'a [u8] {
        if self.data.is_null() {
            return &[];
        }
        if self.length == WGPU_STRLEN {
            return std::ffi::CStr::from_ptr(self.data).to_bytes();
        }
        std::slice::from_raw_parts(self.data as *const u8, self.length)
    }
}

impl Default for WGPUStringView {
    fn default() -> Self {
        Self::null()
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct WGPUChainedStruct {
    pub next: *const WGPUChainedStruct,
    pub sType: WGPUSType,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct WGPUFuture {
    pub id: u64,
}

pub type WGPURequestAdapterCallback = unsafe extern "C" fn(
    status: u32,
    adapter: WGPUAdapter,
    message: WGPUStringView,
    userdata1: *mut c_void,
    userdata2: *mut c_void,
);

pub type WGPURequestDeviceCallback = unsafe extern "C" fn(
    status: u32,
    device: WGPUDevice,
    message: WGPUStringView,
    userdata1: *mut c_void,
    userdata2: *mut c_void,
);

pub type WGPUDeviceLostCallback = unsafe extern "C" fn(
    device: *const WGPUDevice,
    reason: u32,
    message: WGPUStringView,
    userdata1: *mut c_void,
    userdata2: *mut c_void,
);

pub type WGPUUncapturedErrorCallback = unsafe extern "C" fn(
    device: *const WGPUDevice,
    error_type: u32,
    message: WGPUStringView,
    userdata1: *mut c_void,
    userdata2: *mut c_void,
);

pub type WGPUQueueWorkDoneCallback =
    unsafe extern "C" fn(status: u32, userdata1: *mut c_void, userdata2: *mut c_void);

pub type WGPUCreateComputePipelineAsyncCallback = unsafe extern "C" fn(
    status: u32,
    pipeline: WGPUComputePipeline,
    message: WGPUStringView,
    userdata1: *mut c_void,
    userdata2: *mut c_void,
);

pub type WGPUCreateRenderPipelineAsyncCallback = unsafe extern "C" fn(
    status: u32,
    pipeline: WGPURenderPipeline,
    message: WGPUStringView,
    userdata1: *mut c_void,
    userdata2: *mut c_void,
);

pub type WGPUCompilationInfoCallback = unsafe extern "C" fn(
    status: u32,
    info: *const WGPUCompilationInfo,
    userdata1: *mut c_void,
    userdata2: *mut c_void,
);

pub type WGPUPopErrorScopeCallback = unsafe extern "C" fn(
    status: u32,
    error_type: u32,
    message: WGPUStringView,
    userdata1: *mut c_void,
    userdata2: *mut c_void,
);

pub type WGPUBufferMapCallback = unsafe extern "C" fn(
    status: u32,
    message: WGPUStringView,
    userdata1: *mut c_void,
    userdata2: *mut c_void,
);

macro_rules! callback_info {
    ($($name:ident => $callback:ty),* $(,)?) => {
        $(
            #[repr(C)]
            #[derive(Clone, Copy)]
            pub struct $name {
                pub nextInChain: *const WGPUChainedStruct,
                pub mode: WGPUCallbackMode,
                pub callback: Option<$callback>,
                pub userdata1: *mut c_void,
                pub userdata2: *mut c_void,
            }

            impl $name {
                pub fn process_events(callback: $callback, userdata1: *mut c_void) -> Self {
                    Self {
                        nextInChain: ptr::null(),
                        mode: callback_mode::AllowProcessEvents,
                        callback: Some(callback),
                        userdata1,
                        userdata2: ptr::null_mut(),
                    }
                }
            }
        )*
    };
}

callback_info! {
    WGPURequestAdapterCallbackInfo => WGPURequestAdapterCallback,
    WGPURequestDeviceCallbackInfo => WGPURequestDeviceCallback,
    WGPUDeviceLostCallbackInfo => WGPUDeviceLostCallback,
    WGPUQueueWorkDoneCallbackInfo => WGPUQueueWorkDoneCallback,
    WGPUCreateComputePipelineAsyncCallbackInfo => WGPUCreateComputePipelineAsyncCallback,
    WGPUCreateRenderPipelineAsyncCallbackInfo => WGPUCreateRenderPipelineAsyncCallback,
    WGPUCompilationInfoCallbackInfo => WGPUCompilationInfoCallback,
    WGPUPopErrorScopeCallbackInfo => WGPUPopErrorScopeCallback,
    WGPUBufferMapCallbackInfo => WGPUBufferMapCallback,
}

/// Unlike the other callback infos this one carries no mode.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct WGPUUncapturedErrorCallbackInfo {
    pub nextInChain: *const WGPUChainedStruct,
    pub callback: Option<WGPUUncapturedErrorCallback>,
    pub userdata1: *mut c_void,
    pub userdata2: *mut c_void,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct WGPUQueueDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: WGPUStringView,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct WGPUDeviceDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: WGPUStringView,
    pub requiredFeatureCount: usize,
    pub requiredFeatures: *const WGPUFeatureName,
    pub requiredLimits: *const WGPULimits,
    pub defaultQueue: WGPUQueueDescriptor,
    pub deviceLostCallbackInfo: WGPUDeviceLostCallbackInfo,
    pub uncapturedErrorCallbackInfo: WGPUUncapturedErrorCallbackInfo,
}

impl Default for WGPUDeviceDescriptor {
    fn default() -> Self {
        Self {
            nextInChain: ptr::null(),
            label: WGPUStringView::null(),
            requiredFeatureCount: 0,
            requiredFeatures: ptr::null(),
            requiredLimits: ptr::null(),
            defaultQueue: WGPUQueueDescriptor {
                nextInChain: ptr::null(),
                label: WGPUStringView::null(),
            },
            deviceLostCallbackInfo: WGPUDeviceLostCallbackInfo {
                nextInChain: ptr::null(),
                mode: 0,
                callback: None,
                userdata1: ptr::null_mut(),
                userdata2: ptr::null_mut(),
            },
            uncapturedErrorCallbackInfo: WGPUUncapturedErrorCallbackInfo {
                nextInChain: ptr::null(),
                callback: None,
                userdata1: ptr::null_mut(),
                userdata2: ptr::null_mut(),
            },
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct WGPUCompilationMessage {
    pub nextInChain: *const WGPUChainedStruct,
    pub message: WGPUStringView,
    pub messageType: u32,
    pub lineNum: u64,
    pub linePos: u64,
    pub offset: u64,
    pub length: u64,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct WGPUCompilationInfo {
    pub nextInChain: *const WGPUChainedStruct,
    pub messageCount: usize,
    pub messages: *const WGPUCompilationMessage,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct WGPULimits {
    pub nextInChain: *mut WGPUChainedStruct,
    pub maxTextureDimension1D: u32,
    pub maxTextureDimension2D: u32,
    pub maxTextureDimension3D: u32,
    pub maxTextureArrayLayers: u32,
    pub maxBindGroups: u32,
    pub maxBindGroupsPlusVertexBuffers: u32,
    pub maxBindingsPerBindGroup: u32,
    pub maxDynamicUniformBuffersPerPipelineLayout: u32,
    pub maxDynamicStorageBuffersPerPipelineLayout: u32,
    pub maxSampledTexturesPerShaderStage: u32,
    pub maxSamplersPerShaderStage: u32,
    pub maxStorageBuffersPerShaderStage: u32,
    pub maxStorageTexturesPerShaderStage: u32,
    pub maxUniformBuffersPerShaderStage: u32,
    pub maxUniformBufferBindingSize: u64,
    pub maxStorageBufferBindingSize: u64,
    pub minUniformBufferOffsetAlignment: u32,
    pub minStorageBufferOffsetAlignment: u32,
    pub maxVertexBuffers: u32,
    pub maxBufferSize: u64,
    pub maxVertexAttributes: u32,
    pub maxVertexBufferArrayStride: u32,
    pub maxInterStageShaderVariables: u32,
    pub maxColorAttachments: u32,
    pub maxColorAttachmentBytesPerSample: u32,
    pub maxComputeWorkgroupStorageSize: u32,
    pub maxComputeInvocationsPerWorkgroup: u32,
    pub maxComputeWorkgroupSizeX: u32,
    pub maxComputeWorkgroupSizeY: u32,
    pub maxComputeWorkgroupSizeZ: u32,
    pub maxComputeWorkgroupsPerDimension: u32,
}

impl Default for WGPULimits {
    /// All zero: the getters overwrite every field they know.
    fn default() -> Self {
        Self {
            nextInChain: ptr::null_mut(),
            maxTextureDimension1D: 0,
            maxTextureDimension2D: 0,
            maxTextureDimension3D: 0,
            maxTextureArrayLayers: 0,
            maxBindGroups: 0,
            maxBindGroupsPlusVertexBuffers: 0,
            maxBindingsPerBindGroup: 0,
            maxDynamicUniformBuffersPerPipelineLayout: 0,
            maxDynamicStorageBuffersPerPipelineLayout: 0,
            maxSampledTexturesPerShaderStage: 0,
            maxSamplersPerShaderStage: 0,
            maxStorageBuffersPerShaderStage: 0,
            maxStorageTexturesPerShaderStage: 0,
            maxUniformBuffersPerShaderStage: 0,
            maxUniformBufferBindingSize: 0,
            maxStorageBufferBindingSize: 0,
            minUniformBufferOffsetAlignment: 0,
            minStorageBufferOffsetAlignment: 0,
            maxVertexBuffers: 0,
            maxBufferSize: 0,
            maxVertexAttributes: 0,
            maxVertexBufferArrayStride: 0,
            maxInterStageShaderVariables: 0,
            maxColorAttachments: 0,
            maxColorAttachmentBytesPerSample: 0,
            maxComputeWorkgroupStorageSize: 0,
            maxComputeInvocationsPerWorkgroup: 0,
            maxComputeWorkgroupSizeX: 0,
            maxComputeWorkgroupSizeY: 0,
            maxComputeWorkgroupSizeZ: 0,
            maxComputeWorkgroupsPerDimension: 0,
        }
    }
}

/// Filled by the native side; release with `wgpuSupportedFeaturesFreeMembers`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct WGPUSupportedFeatures {
    pub featureCount: usize,
    pub features: *const WGPUFeatureName,
}

impl Default for WGPUSupportedFeatures {
    fn default() -> Self {
        Self {
            featureCount: 0,
            features: ptr::null(),
        }
    }
}

/// Filled by the native side; release with
/// `wgpuSurfaceCapabilitiesFreeMembers`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct WGPUSurfaceCapabilities {
    pub nextInChain: *mut WGPUChainedStruct,
    pub usages: WGPUFlags,
    pub formatCount: usize,
    pub formats: *const WGPUTextureFormat,
    pub presentModeCount: usize,
    pub presentModes: *const WGPUPresentMode,
    pub alphaModeCount: usize,
    pub alphaModes: *const WGPUCompositeAlphaMode,
}

impl Default for WGPUSurfaceCapabilities {
    fn default() -> Self {
        Self {
            nextInChain: ptr::null_mut(),
            usages: 0,
            formatCount: 0,
            formats: ptr::null(),
            presentModeCount: 0,
            presentModes: ptr::null(),
            alphaModeCount: 0,
            alphaModes: ptr::null(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct WGPUSurfaceConfiguration {
    pub nextInChain: *const WGPUChainedStruct,
    pub device: WGPUDevice,
    pub format: WGPUTextureFormat,
    pub usage: WGPUFlags,
    pub width: u32,
    pub height: u32,
    pub viewFormatCount: usize,
    pub viewFormats: *const WGPUTextureFormat,
    pub alphaMode: WGPUCompositeAlphaMode,
    pub presentMode: WGPUPresentMode,
}

#[repr(C)]
pub struct WGPUSurfaceDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: WGPUStringView,
}

#[repr(C)]
pub struct WGPUSurfaceSourceXlibWindow {
    pub chain: WGPUChainedStruct,
    pub display: *mut c_void,
    pub window: u64,
}

#[repr(C)]
pub struct WGPUSurfaceSourceXCBWindow {
    pub chain: WGPUChainedStruct,
    pub connection: *mut c_void,
    pub window: u32,
}

#[repr(C)]
pub struct WGPUSurfaceSourceWaylandSurface {
    pub chain: WGPUChainedStruct,
    pub display: *mut c_void,
    pub surface: *mut c_void,
}

#[repr(C)]
pub struct WGPUSurfaceSourceWindowsHWND {
    pub chain: WGPUChainedStruct,
    pub hinstance: *mut c_void,
    pub hwnd: *mut c_void,
}

#[repr(C)]
pub struct WGPUSurfaceSourceMetalLayer {
    pub chain: WGPUChainedStruct,
    pub layer: *mut c_void,
}

pub type WGPUProc = Option<unsafe extern "C" fn()>;

pub type PFN_wgpuCreateInstance =
    unsafe extern "C" fn(descriptor: *const WGPUInstanceDescriptor) -> WGPUInstance;
pub type PFN_wgpuInstanceProcessEvents = unsafe extern "C" fn(instance: WGPUInstance);
pub type PFN_wgpuInstanceRequestAdapter = unsafe extern "C" fn(
    instance: WGPUInstance,
    options: *const WGPURequestAdapterOptions,
    info: WGPURequestAdapterCallbackInfo,
) -> WGPUFuture;
pub type PFN_wgpuInstanceCreateSurface = unsafe extern "C" fn(
    instance: WGPUInstance,
    descriptor: *const WGPUSurfaceDescriptor,
) -> WGPUSurface;
pub type PFN_wgpuAdapterRequestDevice = unsafe extern "C" fn(
    adapter: WGPUAdapter,
    descriptor: *const WGPUDeviceDescriptor,
    info: WGPURequestDeviceCallbackInfo,
) -> WGPUFuture;
pub type PFN_wgpuQueueOnSubmittedWorkDone =
    unsafe extern "C" fn(queue: WGPUQueue, info: WGPUQueueWorkDoneCallbackInfo) -> WGPUFuture;
pub type PFN_wgpuDeviceCreateComputePipeline = unsafe extern "C" fn(
    device: WGPUDevice,
    descriptor: *const WGPUComputePipelineDescriptor,
) -> WGPUComputePipeline;
pub type PFN_wgpuDeviceCreateRenderPipeline = unsafe extern "C" fn(
    device: WGPUDevice,
    descriptor: *const WGPURenderPipelineDescriptor,
) -> WGPURenderPipeline;
pub type PFN_wgpuDeviceCreateComputePipelineAsync = unsafe extern "C" fn(
    device: WGPUDevice,
    descriptor: *const WGPUComputePipelineDescriptor,
    info: WGPUCreateComputePipelineAsyncCallbackInfo,
) -> WGPUFuture;
pub type PFN_wgpuDeviceCreateRenderPipelineAsync = unsafe extern "C" fn(
    device: WGPUDevice,
    descriptor: *const WGPURenderPipelineDescriptor,
    info: WGPUCreateRenderPipelineAsyncCallbackInfo,
) -> WGPUFuture;
pub type PFN_wgpuShaderModuleGetCompilationInfo = unsafe extern "C" fn(
    module: WGPUShaderModule,
    info: WGPUCompilationInfoCallbackInfo,
) -> WGPUFuture;
pub type PFN_wgpuDevicePushErrorScope = unsafe extern "C" fn(device: WGPUDevice, filter: u32);
pub type PFN_wgpuDevicePopErrorScope =
    unsafe extern "C" fn(device: WGPUDevice, info: WGPUPopErrorScopeCallbackInfo) -> WGPUFuture;
pub type PFN_wgpuDevicePoll = unsafe extern "C" fn(
    device: WGPUDevice,
    wait: WGPUBool,
    submission_index: *const WGPUSubmissionIndex,
) -> WGPUBool;
pub type PFN_wgpuDeviceDestroy = unsafe extern "C" fn(device: WGPUDevice);
pub type PFN_wgpuBufferMapAsync = unsafe extern "C" fn(
    buffer: WGPUBuffer,
    mode: WGPUFlags,
    offset: usize,
    size: usize,
    info: WGPUBufferMapCallbackInfo,
) -> WGPUFuture;
pub type PFN_wgpuBufferGetMappedRange =
    unsafe extern "C" fn(buffer: WGPUBuffer, offset: usize, size: usize) -> *mut c_void;
pub type PFN_wgpuBufferGetConstMappedRange =
    unsafe extern "C" fn(buffer: WGPUBuffer, offset: usize, size: usize) -> *const c_void;
pub type PFN_wgpuBufferUnmap = unsafe extern "C" fn(buffer: WGPUBuffer);
pub type PFN_wgpuGetProcAddress = unsafe extern "C" fn(name: WGPUStringView) -> WGPUProc;
pub type PFN_wgpuAdapterGetLimits =
    unsafe extern "C" fn(adapter: WGPUAdapter, limits: *mut WGPULimits) -> u32;
pub type PFN_wgpuDeviceGetLimits =
    unsafe extern "C" fn(device: WGPUDevice, limits: *mut WGPULimits) -> u32;
pub type PFN_wgpuAdapterGetFeatures =
    unsafe extern "C" fn(adapter: WGPUAdapter, features: *mut WGPUSupportedFeatures);
pub type PFN_wgpuDeviceGetFeatures =
    unsafe extern "C" fn(device: WGPUDevice, features: *mut WGPUSupportedFeatures);
pub type PFN_wgpuSupportedFeaturesFreeMembers =
    unsafe extern "C" fn(features: WGPUSupportedFeatures);
pub type PFN_wgpuSurfaceGetCapabilities = unsafe extern "C" fn(
    surface: WGPUSurface,
    adapter: WGPUAdapter,
    capabilities: *mut WGPUSurfaceCapabilities,
) -> u32;
pub type PFN_wgpuSurfaceCapabilitiesFreeMembers =
    unsafe extern "C" fn(capabilities: WGPUSurfaceCapabilities);
pub type PFN_wgpuSurfaceConfigure =
    unsafe extern "C" fn(surface: WGPUSurface, config: *const WGPUSurfaceConfiguration);
pub type PFN_wgpuSurfaceUnconfigure = unsafe extern "C" fn(surface: WGPUSurface);
pub type PFN_wgpuSurfacePresent = unsafe extern "C" fn(surface: WGPUSurface) -> u32;
