//! C ABI consumed by the host runtime.
//!
//! Every export is a thin shim over [`NativeContext::global`]: arguments are
//! fixed-width integers, raw handles, and (pointer, length) byte slices;
//! failures map to null / 0 / false. Status and error-kind details of the
//! last blocking call are read back through the `mbt_wgpu_last_*` getters on
//! the same thread.

use std::ffi::c_void;
use std::ptr;

use crate::capabilities::{CapabilitySource, SurfaceCapabilities};
use crate::context::NativeContext;
use crate::dynload::Requirement;
use crate::ffi::*;
use crate::gate::Feature;
use crate::labels::{DebugScope, LabelTarget};
use crate::registry::last::{self, AsyncOp, Request};

fn ctx() -> &'static NativeContext {
    NativeContext::global()
}

/// # Safety
/// `data` must be null or valid for `len` bytes.
unsafe fn bytes<'a>(data: *const u8, len: u64) -> Option<&'a [u8]> {
    let len = usize::try_from(len).ok()?;
    if len == 0 {
        return Some(&[]);
    }
    if data.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts(data, len))
}

/// # Safety
/// `data` must be null or valid for writes of `len` bytes.
unsafe fn bytes_mut<'a>(data: *mut u8, len: u64) -> Option<&'a mut [u8]> {
    let len = usize::try_from(len).ok()?;
    if data.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts_mut(data, len))
}

// Library loading and diagnostics.

/// Opaque token for the cached library, identical across calls; null when an
/// optional open fails. A failed required open aborts.
#[no_mangle]
pub extern "C" fn mbt_wgpu_native_open(required: bool) -> *mut c_void {
    match ctx().loader().open(Requirement::from(required)) {
        Some(lib) => std::sync::Arc::as_ptr(&lib) as *mut c_void,
        None => ptr::null_mut(),
    }
}

/// Null when an optional lookup fails. A required lookup of a missing,
/// empty, or non-UTF-8 name aborts.
///
/// # Safety
/// `name` must be valid for `name_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn mbt_wgpu_native_sym(
    name: *const u8,
    name_len: u64,
    required: bool,
) -> *mut c_void {
    let name = bytes(name, name_len).unwrap_or_default();
    ctx()
        .resolver()
        .resolve_raw_bytes(name, Requirement::from(required))
        .map_or(ptr::null_mut(), |p| p.as_ptr())
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_native_available() -> bool {
    ctx().available()
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_native_diagnostic_utf8_len() -> u64 {
    ctx().report().to_string().len() as u64
}

/// # Safety
/// `out` must be null or valid for writes of `out_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn mbt_wgpu_native_diagnostic_utf8(out: *mut u8, out_len: u64) -> bool {
    let text = ctx().report().to_string();
    match bytes_mut(out, out_len) {
        Some(out) if out.len() >= text.len() => {
            out[..text.len()].copy_from_slice(text.as_bytes());
            true
        }
        _ => false,
    }
}

/// # Safety
/// `name` must be valid for `name_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn mbt_wgpu_native_optional_sym_present_utf8(
    name: *const u8,
    name_len: u64,
) -> bool {
    match bytes(name, name_len) {
        Some(name) => ctx().optional_symbol_present(name),
        None => false,
    }
}

// Feature gates.

#[no_mangle]
pub extern "C" fn mbt_wgpu_feature_enabled(feature: u32) -> bool {
    Feature::try_from(feature).map_or(false, |f| ctx().gate().is_enabled(f))
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_feature_set_enabled(feature: u32, enabled: bool) {
    if let Ok(f) = Feature::try_from(feature) {
        ctx().gate().set_enabled(f, enabled);
    }
}

/// Writes the marker that enables `feature` for the current library path.
#[no_mangle]
pub extern "C" fn mbt_wgpu_feature_record_marker(feature: u32) -> bool {
    let Ok(f) = Feature::try_from(feature) else {
        return false;
    };
    match ctx().gate().record_marker(f) {
        Ok(path) => path.is_some(),
        Err(err) => {
            log::warn!("cannot record marker for {f:?}: {err}");
            false
        }
    }
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_pipeline_async_enabled() -> bool {
    ctx().gate().is_enabled(Feature::PipelineAsync)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_set_pipeline_async_enabled(enabled: bool) {
    ctx().gate().set_enabled(Feature::PipelineAsync, enabled);
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_compilation_info_enabled() -> bool {
    ctx().gate().is_enabled(Feature::CompilationInfo)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_set_compilation_info_enabled(enabled: bool) {
    ctx().gate().set_enabled(Feature::CompilationInfo, enabled);
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_set_debug_labels_enabled(enabled: bool) {
    ctx().gate().set_enabled(Feature::DebugLabels, enabled);
}

// Instance, adapter, and device.

#[no_mangle]
pub extern "C" fn mbt_wgpu_create_instance() -> WGPUInstance {
    ctx().create_instance()
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_instance_process_events(instance: WGPUInstance) {
    ctx().process_events(instance)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_instance_request_adapter_sync(
    instance: WGPUInstance,
    options: *const WGPURequestAdapterOptions,
) -> WGPUAdapter {
    ctx()
        .request_adapter(instance, options)
        .unwrap_or(ptr::null_mut())
}

/// # Safety
/// `descriptor` must be null or point to a valid device descriptor.
#[no_mangle]
pub unsafe extern "C" fn mbt_wgpu_adapter_request_device_sync(
    instance: WGPUInstance,
    adapter: WGPUAdapter,
    descriptor: *const WGPUDeviceDescriptor,
) -> WGPUDevice {
    ctx()
        .request_device(instance, adapter, descriptor.as_ref())
        .unwrap_or(ptr::null_mut())
}

/// # Safety
/// `features` must be valid for `count` entries.
#[no_mangle]
pub unsafe extern "C" fn mbt_wgpu_adapter_request_device_sync_features(
    instance: WGPUInstance,
    adapter: WGPUAdapter,
    features: *const WGPUFeatureName,
    count: u64,
) -> WGPUDevice {
    let features = match usize::try_from(count) {
        Ok(0) => &[][..],
        Ok(n) if !features.is_null() => std::slice::from_raw_parts(features, n),
        _ => return ptr::null_mut(),
    };
    ctx()
        .request_device_with_features(instance, adapter, features)
        .unwrap_or(ptr::null_mut())
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_last_request_adapter_status_u32() -> u32 {
    last::request_status(Request::Adapter)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_last_request_adapter_message_len_u64() -> u64 {
    last::request_message_len(Request::Adapter) as u64
}

/// # Safety
/// `out` must be null or valid for writes of `out_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn mbt_wgpu_last_request_adapter_message_copy(
    out: *mut u8,
    out_len: u64,
) -> bool {
    bytes_mut(out, out_len).map_or(false, |out| {
        last::copy_request_message(Request::Adapter, out)
    })
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_last_request_device_status_u32() -> u32 {
    last::request_status(Request::Device)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_last_request_device_message_len_u64() -> u64 {
    last::request_message_len(Request::Device) as u64
}

/// # Safety
/// `out` must be null or valid for writes of `out_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn mbt_wgpu_last_request_device_message_copy(
    out: *mut u8,
    out_len: u64,
) -> bool {
    bytes_mut(out, out_len).map_or(false, |out| {
        last::copy_request_message(Request::Device, out)
    })
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_queue_work_done_sync_status_u32(
    instance: WGPUInstance,
    queue: WGPUQueue,
) -> u32 {
    ctx().queue_work_done(instance, queue)
}

// Pipelines.

#[no_mangle]
pub extern "C" fn mbt_wgpu_device_create_compute_pipeline_async_sync(
    instance: WGPUInstance,
    device: WGPUDevice,
    descriptor: *const WGPUComputePipelineDescriptor,
) -> WGPUComputePipeline {
    ctx().create_compute_pipeline_async(instance, device, descriptor)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_device_create_compute_pipeline_async_strict(
    instance: WGPUInstance,
    device: WGPUDevice,
    descriptor: *const WGPUComputePipelineDescriptor,
) -> WGPUComputePipeline {
    ctx()
        .create_compute_pipeline_async_strict(instance, device, descriptor)
        .unwrap_or(ptr::null_mut())
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_device_create_render_pipeline_async_sync(
    instance: WGPUInstance,
    device: WGPUDevice,
    descriptor: *const WGPURenderPipelineDescriptor,
) -> WGPURenderPipeline {
    ctx().create_render_pipeline_async(instance, device, descriptor)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_device_create_render_pipeline_async_strict(
    instance: WGPUInstance,
    device: WGPUDevice,
    descriptor: *const WGPURenderPipelineDescriptor,
) -> WGPURenderPipeline {
    ctx()
        .create_render_pipeline_async_strict(instance, device, descriptor)
        .unwrap_or(ptr::null_mut())
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_last_pipeline_async_status_u32() -> u32 {
    last::async_record(AsyncOp::Pipeline).status
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_last_pipeline_async_error_kind_u32() -> u32 {
    last::async_record(AsyncOp::Pipeline).error_kind
}

// Shader diagnostics and error scopes.

/// Native request status, or 0 if the request never completed (details in
/// the last compilation-info error kind).
#[no_mangle]
pub extern "C" fn mbt_wgpu_shader_module_get_compilation_info_sync_status_u32(
    instance: WGPUInstance,
    module: WGPUShaderModule,
) -> u32 {
    match ctx().compilation_info(instance, module) {
        Ok(report) => report.status,
        Err(err) => err.status(),
    }
}

/// Number of error-type messages, or `u32::MAX` if info was unavailable.
#[no_mangle]
pub extern "C" fn mbt_wgpu_shader_module_compilation_error_count_u32(
    instance: WGPUInstance,
    module: WGPUShaderModule,
) -> u32 {
    ctx()
        .compilation_info(instance, module)
        .map_or(u32::MAX, |report| report.error_count() as u32)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_last_compilation_info_status_u32() -> u32 {
    last::async_record(AsyncOp::CompilationInfo).status
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_last_compilation_info_error_kind_u32() -> u32 {
    last::async_record(AsyncOp::CompilationInfo).error_kind
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_device_push_error_scope(device: WGPUDevice, filter: u32) {
    ctx().push_error_scope(device, filter)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_device_pop_error_scope_sync_u32(
    instance: WGPUInstance,
    device: WGPUDevice,
) -> u32 {
    ctx().pop_error_scope(instance, device)
}

// Device loss.

#[no_mangle]
pub extern "C" fn mbt_wgpu_device_take_lost_reason_u32(device: WGPUDevice) -> u32 {
    ctx().take_device_lost(device)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_device_wait_lost_reason_u32(
    instance: WGPUInstance,
    device: WGPUDevice,
) -> u32 {
    ctx().wait_device_lost(instance, device)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_device_destroy_record_lost(device: WGPUDevice) {
    ctx().destroy_device(device)
}

// Buffers.

/// # Safety
/// `out` must be null or valid for writes of `out_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn mbt_wgpu_buffer_map_read_sync(
    instance: WGPUInstance,
    buffer: WGPUBuffer,
    offset: u64,
    size: u64,
    out: *mut u8,
    out_len: u64,
) -> bool {
    let (Ok(offset), Ok(size)) = (usize::try_from(offset), usize::try_from(size)) else {
        return false;
    };
    match bytes_mut(out, out_len) {
        Some(out) => ctx().buffer_map_read(instance, buffer, offset, size, out),
        None => false,
    }
}

/// # Safety
/// `data` must be valid for `data_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn mbt_wgpu_buffer_map_write_sync(
    instance: WGPUInstance,
    buffer: WGPUBuffer,
    offset: u64,
    data: *const u8,
    data_len: u64,
) -> bool {
    let (Ok(offset), Some(data)) = (usize::try_from(offset), bytes(data, data_len)) else {
        return false;
    };
    ctx().buffer_map_write(instance, buffer, offset, data)
}

// Labels and debug groups.

macro_rules! label_exports {
    ($($export:ident => $variant:ident($handle:ty)),* $(,)?) => {
        $(
            /// # Safety
            /// `label` must be valid for `label_len` bytes.
            #[no_mangle]
            pub unsafe extern "C" fn $export(
                handle: $handle,
                label: *const u8,
                label_len: u64,
            ) -> bool {
                bytes(label, label_len).map_or(false, |label| {
                    ctx().set_label(LabelTarget::$variant(handle), label)
                })
            }
        )*
    };
}

label_exports! {
    mbt_wgpu_bind_group_set_label_utf8 => BindGroup(WGPUBindGroup),
    mbt_wgpu_bind_group_layout_set_label_utf8 => BindGroupLayout(WGPUBindGroupLayout),
    mbt_wgpu_buffer_set_label_utf8 => Buffer(WGPUBuffer),
    mbt_wgpu_command_buffer_set_label_utf8 => CommandBuffer(WGPUCommandBuffer),
    mbt_wgpu_command_encoder_set_label_utf8 => CommandEncoder(WGPUCommandEncoder),
    mbt_wgpu_compute_pass_set_label_utf8 => ComputePass(WGPUComputePassEncoder),
    mbt_wgpu_compute_pipeline_set_label_utf8 => ComputePipeline(WGPUComputePipeline),
    mbt_wgpu_device_set_label_utf8 => Device(WGPUDevice),
    mbt_wgpu_pipeline_layout_set_label_utf8 => PipelineLayout(WGPUPipelineLayout),
    mbt_wgpu_query_set_set_label_utf8 => QuerySet(WGPUQuerySet),
    mbt_wgpu_queue_set_label_utf8 => Queue(WGPUQueue),
    mbt_wgpu_render_bundle_set_label_utf8 => RenderBundle(WGPURenderBundle),
    mbt_wgpu_render_bundle_encoder_set_label_utf8 => RenderBundleEncoder(WGPURenderBundleEncoder),
    mbt_wgpu_render_pass_set_label_utf8 => RenderPass(WGPURenderPassEncoder),
    mbt_wgpu_render_pipeline_set_label_utf8 => RenderPipeline(WGPURenderPipeline),
    mbt_wgpu_sampler_set_label_utf8 => Sampler(WGPUSampler),
    mbt_wgpu_shader_module_set_label_utf8 => ShaderModule(WGPUShaderModule),
    mbt_wgpu_surface_set_label_utf8 => Surface(WGPUSurface),
    mbt_wgpu_texture_set_label_utf8 => Texture(WGPUTexture),
    mbt_wgpu_texture_view_set_label_utf8 => TextureView(WGPUTextureView),
}

macro_rules! debug_group_exports {
    ($($scope:ident($handle:ty) => $marker:ident, $push:ident, $pop:ident);* $(;)?) => {
        $(
            /// # Safety
            /// `label` must be valid for `label_len` bytes.
            #[no_mangle]
            pub unsafe extern "C" fn $marker(
                handle: $handle,
                label: *const u8,
                label_len: u64,
            ) -> bool {
                bytes(label, label_len).map_or(false, |label| {
                    ctx().insert_debug_marker(DebugScope::$scope(handle), label)
                })
            }

            /// # Safety
            /// `label` must be valid for `label_len` bytes.
            #[no_mangle]
            pub unsafe extern "C" fn $push(
                handle: $handle,
                label: *const u8,
                label_len: u64,
            ) -> bool {
                bytes(label, label_len).map_or(false, |label| {
                    ctx().push_debug_group(DebugScope::$scope(handle), label)
                })
            }

            #[no_mangle]
            pub extern "C" fn $pop(handle: $handle) -> bool {
                ctx().pop_debug_group(DebugScope::$scope(handle))
            }
        )*
    };
}

debug_group_exports! {
    CommandEncoder(WGPUCommandEncoder) =>
        mbt_wgpu_command_encoder_insert_debug_marker_utf8,
        mbt_wgpu_command_encoder_push_debug_group_utf8,
        mbt_wgpu_command_encoder_pop_debug_group;
    ComputePass(WGPUComputePassEncoder) =>
        mbt_wgpu_compute_pass_insert_debug_marker_utf8,
        mbt_wgpu_compute_pass_push_debug_group_utf8,
        mbt_wgpu_compute_pass_pop_debug_group;
    RenderPass(WGPURenderPassEncoder) =>
        mbt_wgpu_render_pass_insert_debug_marker_utf8,
        mbt_wgpu_render_pass_push_debug_group_utf8,
        mbt_wgpu_render_pass_pop_debug_group;
}

// Limits and features. Every getter yields 0 / false for a null handle or a
// failed native query.

macro_rules! limit_exports {
    ($($export:ident: $source:ident($handle:ty).$field:ident -> $ty:ty),* $(,)?) => {
        $(
            #[no_mangle]
            pub extern "C" fn $export(handle: $handle) -> $ty {
                ctx()
                    .limits(CapabilitySource::$source(handle))
                    .map_or(0, |limits| limits.$field as $ty)
            }
        )*
    };
}

limit_exports! {
    mbt_wgpu_adapter_limits_max_texture_dimension_2d_u32: Adapter(WGPUAdapter).maxTextureDimension2D -> u32,
    mbt_wgpu_device_limits_max_texture_dimension_2d_u32: Device(WGPUDevice).maxTextureDimension2D -> u32,
    mbt_wgpu_adapter_limits_max_bind_groups_u32: Adapter(WGPUAdapter).maxBindGroups -> u32,
    mbt_wgpu_device_limits_max_bind_groups_u32: Device(WGPUDevice).maxBindGroups -> u32,
    mbt_wgpu_adapter_limits_max_buffer_size_u64: Adapter(WGPUAdapter).maxBufferSize -> u64,
    mbt_wgpu_device_limits_max_buffer_size_u64: Device(WGPUDevice).maxBufferSize -> u64,
    mbt_wgpu_adapter_limits_max_compute_workgroup_size_x_u32: Adapter(WGPUAdapter).maxComputeWorkgroupSizeX -> u32,
    mbt_wgpu_device_limits_max_compute_workgroup_size_x_u32: Device(WGPUDevice).maxComputeWorkgroupSizeX -> u32,
}

macro_rules! feature_exports {
    ($($source:ident($handle:ty) => $count:ident, $contains:ident, $at:ident);* $(;)?) => {
        $(
            #[no_mangle]
            pub extern "C" fn $count(handle: $handle) -> u64 {
                ctx().supported_features(CapabilitySource::$source(handle)).len() as u64
            }

            #[no_mangle]
            pub extern "C" fn $contains(handle: $handle, feature: u32) -> bool {
                ctx()
                    .supported_features(CapabilitySource::$source(handle))
                    .contains(&feature)
            }

            /// 0 when `index` is out of range.
            #[no_mangle]
            pub extern "C" fn $at(handle: $handle, index: u64) -> u32 {
                let features = ctx().supported_features(CapabilitySource::$source(handle));
                at(&features, index)
            }
        )*
    };
}

feature_exports! {
    Adapter(WGPUAdapter) =>
        mbt_wgpu_adapter_supported_features_count,
        mbt_wgpu_adapter_supported_features_contains,
        mbt_wgpu_adapter_supported_feature_u32_at;
    Device(WGPUDevice) =>
        mbt_wgpu_device_supported_features_count,
        mbt_wgpu_device_supported_features_contains,
        mbt_wgpu_device_supported_feature_u32_at;
}

fn at(list: &[u32], index: u64) -> u32 {
    usize::try_from(index)
        .ok()
        .and_then(|i| list.get(i))
        .copied()
        .unwrap_or(0)
}

// Surfaces.

fn surface_caps(surface: WGPUSurface, adapter: WGPUAdapter) -> SurfaceCapabilities {
    ctx()
        .surface_capabilities(surface, adapter)
        .unwrap_or_default()
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_capabilities_formats_count(
    surface: WGPUSurface,
    adapter: WGPUAdapter,
) -> u64 {
    surface_caps(surface, adapter).formats.len() as u64
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_capabilities_present_modes_count(
    surface: WGPUSurface,
    adapter: WGPUAdapter,
) -> u64 {
    surface_caps(surface, adapter).present_modes.len() as u64
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_capabilities_alpha_modes_count(
    surface: WGPUSurface,
    adapter: WGPUAdapter,
) -> u64 {
    surface_caps(surface, adapter).alpha_modes.len() as u64
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_capabilities_usages_u64(
    surface: WGPUSurface,
    adapter: WGPUAdapter,
) -> u64 {
    surface_caps(surface, adapter).usages
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_capabilities_format_u32_at(
    surface: WGPUSurface,
    adapter: WGPUAdapter,
    index: u64,
) -> u32 {
    at(&surface_caps(surface, adapter).formats, index)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_capabilities_present_mode_u32_at(
    surface: WGPUSurface,
    adapter: WGPUAdapter,
    index: u64,
) -> u32 {
    at(&surface_caps(surface, adapter).present_modes, index)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_capabilities_alpha_mode_u32_at(
    surface: WGPUSurface,
    adapter: WGPUAdapter,
    index: u64,
) -> u32 {
    at(&surface_caps(surface, adapter).alpha_modes, index)
}

/// The configured texture format, or 0 if nothing was configured.
#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_configure_default(
    surface: WGPUSurface,
    adapter: WGPUAdapter,
    device: WGPUDevice,
    width: u32,
    height: u32,
    usage: u64,
) -> u32 {
    ctx()
        .configure_surface_default(surface, adapter, device, width, height, usage)
        .unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_present_u32(surface: WGPUSurface) -> u32 {
    ctx().present_surface(surface)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_surface_unconfigure(surface: WGPUSurface) {
    ctx().unconfigure_surface(surface)
}

#[no_mangle]
pub extern "C" fn mbt_wgpu_instance_create_surface_metal_layer(
    instance: WGPUInstance,
    layer: *mut c_void,
) -> WGPUSurface {
    ctx()
        .create_surface_from_metal_layer(instance, layer)
        .unwrap_or(ptr::null_mut())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_slices_from_host_pointers() {
        let data = [1u8, 2, 3];
        assert_eq!(unsafe { bytes(data.as_ptr(), 3) }, Some(&data[..]));
        assert_eq!(unsafe { bytes(ptr::null(), 0) }, Some(&[][..]));
        assert_eq!(unsafe { bytes(ptr::null(), 4) }, None);
        assert!(unsafe { bytes_mut(ptr::null_mut(), 0) }.is_none());
    }

    #[test]
    fn indexed_getters_are_zero_out_of_range() {
        assert_eq!(at(&[4, 9], 1), 9);
        assert_eq!(at(&[4, 9], 2), 0);
        assert_eq!(at(&[], u64::MAX), 0);
    }

    #[test]
    fn unknown_feature_codes_are_ignored() {
        assert!(!mbt_wgpu_feature_enabled(99));
        mbt_wgpu_feature_set_enabled(99, true);
        assert!(!mbt_wgpu_feature_record_marker(99));
    }

    #[test]
    fn last_getters_read_the_calling_thread() {
        last::reset_request(Request::Adapter);
        assert_eq!(mbt_wgpu_last_request_adapter_status_u32(), 0);
        assert_eq!(mbt_wgpu_last_request_adapter_message_len_u64(), 0);
        let mut out = [0u8; 1];
        assert!(unsafe { mbt_wgpu_last_request_adapter_message_copy(out.as_mut_ptr(), 1) });
        assert!(!unsafe { mbt_wgpu_last_request_adapter_message_copy(ptr::null_mut(), 1) });
    }
}
