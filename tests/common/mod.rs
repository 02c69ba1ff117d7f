#![allow(dead_code)]

//! In-process stand-in for `wgpu-native`.
//!
//! Every mock entry point queues its callback on a per-thread list that
//! `wgpuInstanceProcessEvents` drains, the same contract the real library has
//! for `AllowProcessEvents` callbacks. Per-thread state keeps tests running in
//! parallel from seeing each other's callbacks.

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::ptr;
use std::sync::Arc;

use wgpu_mbt::ffi::*;
use wgpu_mbt::{MapEnv, NativeContext, Proc, WgpuProcs};

pub const INSTANCE: usize = 0x1000;
pub const ADAPTER: usize = 0x2000;
pub const DEVICE: usize = 0x3000;
pub const QUEUE: usize = 0x3100;
pub const BUFFER: usize = 0x3200;
pub const MODULE: usize = 0x3300;
pub const ASYNC_PIPELINE: usize = 0x4000;
pub const SYNC_PIPELINE: usize = 0x5000;
pub const SURFACE: usize = 0x6000;

pub const ADAPTER_FEATURES: [WGPUFeatureName; 3] = [0x1, 0x9, 0x0003_0001];
pub const DEVICE_FEATURES: [WGPUFeatureName; 1] = [0x9];
pub const SURFACE_FORMATS: [WGPUTextureFormat; 2] = [0x1B, 0x17];
pub const PRESENT_MODES: [WGPUPresentMode; 2] = [0x1, 0x3];
pub const ALPHA_MODES: [WGPUCompositeAlphaMode; 1] = [0x1];
pub const SURFACE_USAGES: u64 = 0x10;

/// `wgpuGetProcAddress` reports this setter as not exported.
pub const UNEXPORTED_SETTER: &str = "wgpuQuerySetSetLabel";

pub const COMPILE_ERROR: &str = "expected ';' after expression";

/// How the mock answers the next call of each kind on this thread.
#[derive(Clone, Copy, Debug)]
pub struct Behaviour {
    pub adapter_status: u32,
    pub device_status: u32,
    pub pipeline_status: u32,
    /// Never invoke async pipeline callbacks.
    pub pipeline_hangs: bool,
    pub pop_error_type: u32,
    pub map_status: u32,
    /// Fire the recorded device-lost callback from `wgpuDevicePoll`.
    pub lose_device_on_poll: bool,
    /// Status of the limits and surface-capability getters.
    pub getter_status: u32,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            adapter_status: request_adapter_status::Success,
            device_status: request_device_status::Success,
            pipeline_status: create_pipeline_async_status::Success,
            pipeline_hangs: false,
            pop_error_type: error_type::NoError,
            map_status: map_async_status::Success,
            lose_device_on_poll: false,
            getter_status: status::Success,
        }
    }
}

type Job = Box<dyn FnOnce()>;

thread_local! {
    static BEHAVIOUR: Cell<Behaviour> = Cell::new(Behaviour::default());
    static PENDING: RefCell<Vec<Job>> = RefCell::new(Vec::new());
    static LOST_CALLBACK: Cell<Option<WGPUDeviceLostCallbackInfo>> = Cell::new(None);
    static SEEN_FEATURES: RefCell<Vec<WGPUFeatureName>> = RefCell::new(Vec::new());
    static MAPPED: RefCell<Vec<u8>> = RefCell::new((0u8..16).collect());
    static COUNTERS: Cell<Counters> = Cell::new(Counters::default());
    static CONFIGURED: Cell<Option<WGPUSurfaceConfiguration>> = Cell::new(None);
    static PROC_LOOKUPS: RefCell<Vec<String>> = RefCell::new(Vec::new());
    static DEBUG_CALLS: RefCell<Vec<DebugCall>> = RefCell::new(Vec::new());
}

/// One call into a label or debug-group entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugCall {
    pub handle: usize,
    /// `None` for `*PopDebugGroup`.
    pub text: Option<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub process_events: usize,
    pub sync_pipelines: usize,
    pub destroys: usize,
    pub polls: usize,
    pub unmaps: usize,
    pub pushed_scopes: usize,
    pub freed_features: usize,
    pub freed_capabilities: usize,
    pub unconfigures: usize,
    pub presents: usize,
}

pub fn set_behaviour(behaviour: Behaviour) {
    BEHAVIOUR.with(|b| b.set(behaviour));
}

fn behaviour() -> Behaviour {
    BEHAVIOUR.with(|b| b.get())
}

pub fn counters() -> Counters {
    COUNTERS.with(|c| c.get())
}

fn bump(f: impl FnOnce(&mut Counters)) {
    COUNTERS.with(|c| {
        let mut counters = c.get();
        f(&mut counters);
        c.set(counters);
    });
}

pub fn mapped_bytes() -> Vec<u8> {
    MAPPED.with(|m| m.borrow().clone())
}

pub fn seen_features() -> Vec<WGPUFeatureName> {
    SEEN_FEATURES.with(|f| f.borrow().clone())
}

pub fn configured_surface() -> Option<WGPUSurfaceConfiguration> {
    CONFIGURED.with(|c| c.get())
}

/// Names looked up through `wgpuGetProcAddress`, oldest first.
pub fn proc_lookups() -> Vec<String> {
    PROC_LOOKUPS.with(|l| l.borrow().clone())
}

pub fn debug_calls() -> Vec<DebugCall> {
    DEBUG_CALLS.with(|c| c.borrow().clone())
}

/// The device-lost callback info the last device request handed to the mock.
pub fn lost_callback() -> Option<WGPUDeviceLostCallbackInfo> {
    LOST_CALLBACK.with(|c| c.get())
}

fn defer(job: impl FnOnce() + 'static) {
    PENDING.with(|p| p.borrow_mut().push(Box::new(job)));
}

fn text(s: &'static str) -> WGPUStringView {
    WGPUStringView::from_bytes(s.as_bytes())
}

unsafe extern "C" fn create_instance(_desc: *const WGPUInstanceDescriptor) -> WGPUInstance {
    INSTANCE as WGPUInstance
}

unsafe extern "C" fn process_events(_instance: WGPUInstance) {
    bump(|c| c.process_events += 1);
    let jobs = PENDING.with(|p| std::mem::take(&mut *p.borrow_mut()));
    for job in jobs {
        job();
    }
}

unsafe extern "C" fn request_adapter(
    _instance: WGPUInstance,
    _options: *const WGPURequestAdapterOptions,
    info: WGPURequestAdapterCallbackInfo,
) -> WGPUFuture {
    let status = behaviour().adapter_status;
    defer(move || unsafe {
        let callback = info.callback.expect("adapter callback");
        if status == request_adapter_status::Success {
            callback(status, ADAPTER as WGPUAdapter, text(""), info.userdata1, info.userdata2);
        } else {
            callback(
                status,
                ptr::null_mut(),
                text("no suitable adapter"),
                info.userdata1,
                info.userdata2,
            );
        }
    });
    WGPUFuture { id: 1 }
}

unsafe extern "C" fn request_device(
    _adapter: WGPUAdapter,
    descriptor: *const WGPUDeviceDescriptor,
    info: WGPURequestDeviceCallbackInfo,
) -> WGPUFuture {
    let descriptor = &*descriptor;
    LOST_CALLBACK.with(|c| c.set(Some(descriptor.deviceLostCallbackInfo)));
    let features = if descriptor.requiredFeatures.is_null() {
        Vec::new()
    } else {
        std::slice::from_raw_parts(descriptor.requiredFeatures, descriptor.requiredFeatureCount)
            .to_vec()
    };
    SEEN_FEATURES.with(|f| *f.borrow_mut() = features);

    let status = behaviour().device_status;
    defer(move || unsafe {
        let callback = info.callback.expect("device callback");
        if status == request_device_status::Success {
            callback(status, DEVICE as WGPUDevice, text(""), info.userdata1, info.userdata2);
        } else {
            callback(
                status,
                ptr::null_mut(),
                text("limits exceed adapter"),
                info.userdata1,
                info.userdata2,
            );
        }
    });
    WGPUFuture { id: 2 }
}

unsafe extern "C" fn work_done(_queue: WGPUQueue, info: WGPUQueueWorkDoneCallbackInfo) -> WGPUFuture {
    defer(move || unsafe {
        let callback = info.callback.expect("work done callback");
        callback(queue_work_done_status::Success, info.userdata1, info.userdata2);
    });
    WGPUFuture { id: 3 }
}

unsafe extern "C" fn create_compute_pipeline(
    _device: WGPUDevice,
    _desc: *const WGPUComputePipelineDescriptor,
) -> WGPUComputePipeline {
    bump(|c| c.sync_pipelines += 1);
    SYNC_PIPELINE as WGPUComputePipeline
}

unsafe extern "C" fn create_render_pipeline(
    _device: WGPUDevice,
    _desc: *const WGPURenderPipelineDescriptor,
) -> WGPURenderPipeline {
    bump(|c| c.sync_pipelines += 1);
    SYNC_PIPELINE as WGPURenderPipeline
}

unsafe extern "C" fn create_compute_pipeline_async(
    _device: WGPUDevice,
    _desc: *const WGPUComputePipelineDescriptor,
    info: WGPUCreateComputePipelineAsyncCallbackInfo,
) -> WGPUFuture {
    let b = behaviour();
    if !b.pipeline_hangs {
        defer(move || unsafe {
            let callback = info.callback.expect("pipeline callback");
            let pipeline = if b.pipeline_status == create_pipeline_async_status::Success {
                ASYNC_PIPELINE as WGPUComputePipeline
            } else {
                ptr::null_mut()
            };
            callback(b.pipeline_status, pipeline, text("shader rejected"), info.userdata1, info.userdata2);
        });
    }
    WGPUFuture { id: 4 }
}

unsafe extern "C" fn create_render_pipeline_async(
    _device: WGPUDevice,
    _desc: *const WGPURenderPipelineDescriptor,
    info: WGPUCreateRenderPipelineAsyncCallbackInfo,
) -> WGPUFuture {
    let b = behaviour();
    if !b.pipeline_hangs {
        defer(move || unsafe {
            let callback = info.callback.expect("pipeline callback");
            let pipeline = if b.pipeline_status == create_pipeline_async_status::Success {
                ASYNC_PIPELINE as WGPURenderPipeline
            } else {
                ptr::null_mut()
            };
            callback(b.pipeline_status, pipeline, text("shader rejected"), info.userdata1, info.userdata2);
        });
    }
    WGPUFuture { id: 5 }
}

unsafe extern "C" fn compilation_info(
    _module: WGPUShaderModule,
    info: WGPUCompilationInfoCallbackInfo,
) -> WGPUFuture {
    defer(move || unsafe {
        let messages = [
            WGPUCompilationMessage {
                nextInChain: ptr::null(),
                message: text(COMPILE_ERROR),
                messageType: compilation_message_type::Error,
                lineNum: 12,
                linePos: 4,
                offset: 210,
                length: 1,
            },
            WGPUCompilationMessage {
                nextInChain: ptr::null(),
                message: text("unused variable"),
                messageType: compilation_message_type::Warning,
                lineNum: 3,
                linePos: 9,
                offset: 40,
                length: 6,
            },
        ];
        let compilation = WGPUCompilationInfo {
            nextInChain: ptr::null(),
            messageCount: messages.len(),
            messages: messages.as_ptr(),
        };
        let callback = info.callback.expect("compilation callback");
        callback(
            compilation_info_request_status::Success,
            &compilation,
            info.userdata1,
            info.userdata2,
        );
    });
    WGPUFuture { id: 6 }
}

unsafe extern "C" fn push_error_scope(_device: WGPUDevice, _filter: u32) {
    bump(|c| c.pushed_scopes += 1);
}

unsafe extern "C" fn pop_error_scope(
    _device: WGPUDevice,
    info: WGPUPopErrorScopeCallbackInfo,
) -> WGPUFuture {
    let kind = behaviour().pop_error_type;
    defer(move || unsafe {
        let callback = info.callback.expect("pop callback");
        callback(
            pop_error_scope_status::Success,
            kind,
            text("binding out of range"),
            info.userdata1,
            info.userdata2,
        );
    });
    WGPUFuture { id: 7 }
}

unsafe extern "C" fn device_poll(
    device: WGPUDevice,
    _wait: WGPUBool,
    _index: *const WGPUSubmissionIndex,
) -> WGPUBool {
    bump(|c| c.polls += 1);
    if behaviour().lose_device_on_poll {
        if let Some(info) = LOST_CALLBACK.with(|c| c.take()) {
            let callback = info.callback.expect("lost callback");
            callback(
                &device,
                device_lost_reason::Unknown,
                text("adapter removed"),
                info.userdata1,
                info.userdata2,
            );
        }
    }
    1
}

unsafe extern "C" fn device_destroy(_device: WGPUDevice) {
    bump(|c| c.destroys += 1);
}

unsafe extern "C" fn map_async(
    _buffer: WGPUBuffer,
    _mode: WGPUFlags,
    _offset: usize,
    _size: usize,
    info: WGPUBufferMapCallbackInfo,
) -> WGPUFuture {
    let status = behaviour().map_status;
    defer(move || unsafe {
        let callback = info.callback.expect("map callback");
        callback(status, text(""), info.userdata1, info.userdata2);
    });
    WGPUFuture { id: 8 }
}

unsafe extern "C" fn mapped_range(_buffer: WGPUBuffer, offset: usize, _size: usize) -> *mut c_void {
    MAPPED.with(|m| m.borrow_mut().as_mut_ptr().add(offset) as *mut c_void)
}

unsafe extern "C" fn const_mapped_range(
    _buffer: WGPUBuffer,
    offset: usize,
    _size: usize,
) -> *const c_void {
    MAPPED.with(|m| m.borrow().as_ptr().add(offset) as *const c_void)
}

unsafe extern "C" fn unmap(_buffer: WGPUBuffer) {
    bump(|c| c.unmaps += 1);
}

fn fill_limits(limits: *mut WGPULimits) -> u32 {
    let b = behaviour();
    if b.getter_status == status::Success {
        unsafe {
            (*limits).maxTextureDimension2D = 8192;
            (*limits).maxBindGroups = 4;
            (*limits).maxBufferSize = 1 << 28;
            (*limits).maxComputeWorkgroupSizeX = 256;
        }
    }
    b.getter_status
}

unsafe extern "C" fn adapter_limits(_adapter: WGPUAdapter, limits: *mut WGPULimits) -> u32 {
    fill_limits(limits)
}

unsafe extern "C" fn device_limits(_device: WGPUDevice, limits: *mut WGPULimits) -> u32 {
    fill_limits(limits)
}

unsafe extern "C" fn adapter_features(_adapter: WGPUAdapter, out: *mut WGPUSupportedFeatures) {
    (*out).featureCount = ADAPTER_FEATURES.len();
    (*out).features = ADAPTER_FEATURES.as_ptr();
}

unsafe extern "C" fn device_features(_device: WGPUDevice, out: *mut WGPUSupportedFeatures) {
    (*out).featureCount = DEVICE_FEATURES.len();
    (*out).features = DEVICE_FEATURES.as_ptr();
}

unsafe extern "C" fn free_features(_features: WGPUSupportedFeatures) {
    bump(|c| c.freed_features += 1);
}

unsafe extern "C" fn surface_capabilities(
    _surface: WGPUSurface,
    _adapter: WGPUAdapter,
    out: *mut WGPUSurfaceCapabilities,
) -> u32 {
    let st = behaviour().getter_status;
    if st == status::Success {
        *out = WGPUSurfaceCapabilities {
            nextInChain: ptr::null_mut(),
            usages: SURFACE_USAGES,
            formatCount: SURFACE_FORMATS.len(),
            formats: SURFACE_FORMATS.as_ptr(),
            presentModeCount: PRESENT_MODES.len(),
            presentModes: PRESENT_MODES.as_ptr(),
            alphaModeCount: ALPHA_MODES.len(),
            alphaModes: ALPHA_MODES.as_ptr(),
        };
    }
    st
}

unsafe extern "C" fn free_capabilities(_caps: WGPUSurfaceCapabilities) {
    bump(|c| c.freed_capabilities += 1);
}

unsafe extern "C" fn surface_configure(_surface: WGPUSurface, config: *const WGPUSurfaceConfiguration) {
    CONFIGURED.with(|c| c.set(Some(*config)));
}

unsafe extern "C" fn surface_unconfigure(_surface: WGPUSurface) {
    bump(|c| c.unconfigures += 1);
}

unsafe extern "C" fn surface_present(_surface: WGPUSurface) -> u32 {
    bump(|c| c.presents += 1);
    status::Success
}

unsafe extern "C" fn record_text(handle: *mut c_void, text: WGPUStringView) {
    let text = text.as_bytes().to_vec();
    DEBUG_CALLS.with(|c| {
        c.borrow_mut().push(DebugCall {
            handle: handle as usize,
            text: Some(text),
        })
    });
}

unsafe extern "C" fn record_pop(handle: *mut c_void) {
    DEBUG_CALLS.with(|c| {
        c.borrow_mut().push(DebugCall {
            handle: handle as usize,
            text: None,
        })
    });
}

unsafe extern "C" fn get_proc_address(name: WGPUStringView) -> WGPUProc {
    let name = String::from_utf8_lossy(name.as_bytes()).into_owned();
    PROC_LOOKUPS.with(|l| l.borrow_mut().push(name.clone()));
    if name == UNEXPORTED_SETTER {
        return None;
    }
    if name.ends_with("PopDebugGroup") {
        let f: unsafe extern "C" fn(*mut c_void) = record_pop;
        return Some(std::mem::transmute(f));
    }
    if name.ends_with("SetLabel") || name.ends_with("InsertDebugMarker") || name.ends_with("PushDebugGroup") {
        let f: unsafe extern "C" fn(*mut c_void, WGPUStringView) = record_text;
        return Some(std::mem::transmute(f));
    }
    None
}

/// Entry points backed by the mock. Async pipeline creators are present.
pub fn mock_procs() -> WgpuProcs {
    WgpuProcs {
        create_instance: Proc::preset("wgpuCreateInstance", create_instance as PFN_wgpuCreateInstance),
        instance_process_events: Proc::preset(
            "wgpuInstanceProcessEvents",
            process_events as PFN_wgpuInstanceProcessEvents,
        ),
        instance_request_adapter: Proc::preset(
            "wgpuInstanceRequestAdapter",
            request_adapter as PFN_wgpuInstanceRequestAdapter,
        ),
        adapter_request_device: Proc::preset(
            "wgpuAdapterRequestDevice",
            request_device as PFN_wgpuAdapterRequestDevice,
        ),
        queue_on_submitted_work_done: Proc::preset(
            "wgpuQueueOnSubmittedWorkDone",
            work_done as PFN_wgpuQueueOnSubmittedWorkDone,
        ),
        device_create_compute_pipeline: Proc::preset(
            "wgpuDeviceCreateComputePipeline",
            create_compute_pipeline as PFN_wgpuDeviceCreateComputePipeline,
        ),
        device_create_render_pipeline: Proc::preset(
            "wgpuDeviceCreateRenderPipeline",
            create_render_pipeline as PFN_wgpuDeviceCreateRenderPipeline,
        ),
        device_create_compute_pipeline_async: Proc::preset(
            "wgpuDeviceCreateComputePipelineAsync",
            create_compute_pipeline_async as PFN_wgpuDeviceCreateComputePipelineAsync,
        ),
        device_create_render_pipeline_async: Proc::preset(
            "wgpuDeviceCreateRenderPipelineAsync",
            create_render_pipeline_async as PFN_wgpuDeviceCreateRenderPipelineAsync,
        ),
        shader_module_get_compilation_info: Proc::preset(
            "wgpuShaderModuleGetCompilationInfo",
            compilation_info as PFN_wgpuShaderModuleGetCompilationInfo,
        ),
        device_push_error_scope: Proc::preset(
            "wgpuDevicePushErrorScope",
            push_error_scope as PFN_wgpuDevicePushErrorScope,
        ),
        device_pop_error_scope: Proc::preset(
            "wgpuDevicePopErrorScope",
            pop_error_scope as PFN_wgpuDevicePopErrorScope,
        ),
        device_poll: Proc::preset("wgpuDevicePoll", device_poll as PFN_wgpuDevicePoll),
        device_destroy: Proc::preset("wgpuDeviceDestroy", device_destroy as PFN_wgpuDeviceDestroy),
        buffer_map_async: Proc::preset("wgpuBufferMapAsync", map_async as PFN_wgpuBufferMapAsync),
        buffer_get_mapped_range: Proc::preset(
            "wgpuBufferGetMappedRange",
            mapped_range as PFN_wgpuBufferGetMappedRange,
        ),
        buffer_get_const_mapped_range: Proc::preset(
            "wgpuBufferGetConstMappedRange",
            const_mapped_range as PFN_wgpuBufferGetConstMappedRange,
        ),
        buffer_unmap: Proc::preset("wgpuBufferUnmap", unmap as PFN_wgpuBufferUnmap),
        get_proc_address: Proc::preset(
            "wgpuGetProcAddress",
            get_proc_address as PFN_wgpuGetProcAddress,
        ),
        adapter_get_limits: Proc::preset(
            "wgpuAdapterGetLimits",
            adapter_limits as PFN_wgpuAdapterGetLimits,
        ),
        device_get_limits: Proc::preset(
            "wgpuDeviceGetLimits",
            device_limits as PFN_wgpuDeviceGetLimits,
        ),
        adapter_get_features: Proc::preset(
            "wgpuAdapterGetFeatures",
            adapter_features as PFN_wgpuAdapterGetFeatures,
        ),
        device_get_features: Proc::preset(
            "wgpuDeviceGetFeatures",
            device_features as PFN_wgpuDeviceGetFeatures,
        ),
        supported_features_free_members: Proc::preset(
            "wgpuSupportedFeaturesFreeMembers",
            free_features as PFN_wgpuSupportedFeaturesFreeMembers,
        ),
        surface_get_capabilities: Proc::preset(
            "wgpuSurfaceGetCapabilities",
            surface_capabilities as PFN_wgpuSurfaceGetCapabilities,
        ),
        surface_capabilities_free_members: Proc::preset(
            "wgpuSurfaceCapabilitiesFreeMembers",
            free_capabilities as PFN_wgpuSurfaceCapabilitiesFreeMembers,
        ),
        surface_configure: Proc::preset(
            "wgpuSurfaceConfigure",
            surface_configure as PFN_wgpuSurfaceConfigure,
        ),
        surface_unconfigure: Proc::preset(
            "wgpuSurfaceUnconfigure",
            surface_unconfigure as PFN_wgpuSurfaceUnconfigure,
        ),
        surface_present: Proc::preset("wgpuSurfacePresent", surface_present as PFN_wgpuSurfacePresent),
        ..WgpuProcs::default()
    }
}

/// A context over the mock with an isolated environment. The library itself
/// is never opened: every entry point the wrappers need is preset.
pub fn mock_context(env: MapEnv) -> NativeContext {
    set_behaviour(Behaviour::default());
    COUNTERS.with(|c| c.set(Counters::default()));
    PENDING.with(|p| p.borrow_mut().clear());
    CONFIGURED.with(|c| c.set(None));
    PROC_LOOKUPS.with(|l| l.borrow_mut().clear());
    DEBUG_CALLS.with(|c| c.borrow_mut().clear());
    NativeContext::with_procs(Arc::new(env), mock_procs())
}

pub fn instance() -> WGPUInstance {
    INSTANCE as WGPUInstance
}

pub fn device() -> WGPUDevice {
    DEVICE as WGPUDevice
}

pub fn adapter() -> WGPUAdapter {
    ADAPTER as WGPUAdapter
}

pub fn surface() -> WGPUSurface {
    SURFACE as WGPUSurface
}

/// Saves an environment variable and restores it on drop.
pub struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self { key, original }
    }

    pub fn unset(key: &'static str) -> Self {
        let original = std::env::var(key).ok();
        std::env::remove_var(key);
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}
