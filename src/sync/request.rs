use std::ffi::c_void;
use std::ptr;
use std::sync::Arc;

use super::{Completion, PollBudget};
use crate::context::NativeContext;
use crate::env::{DEBUG_REQUEST_ADAPTER_VAR, DEBUG_REQUEST_DEVICE_VAR};
use crate::ffi::*;
use crate::registry::last::{self, Request};
use crate::registry::{DeviceLostRegistry, MessageBuf};

struct RequestOutcome<H> {
    status: u32,
    handle: *mut H,
    message: MessageBuf,
}

unsafe extern "C" fn on_request<H>(
    status: u32,
    handle: *mut H,
    message: WGPUStringView,
    userdata1: *mut c_void,
    _userdata2: *mut c_void,
) {
    Completion::complete(
        userdata1,
        RequestOutcome {
            status,
            handle,
            message: MessageBuf::from_bytes(message.as_bytes()),
        },
    );
}

/// Records every device loss into the registry passed as `userdata1`.
///
/// The registry reference handed to the native side is never released: the
/// callback may fire at any point until the device is gone.
unsafe extern "C" fn on_device_lost(
    device: *const WGPUDevice,
    reason: u32,
    message: WGPUStringView,
    userdata1: *mut c_void,
    _userdata2: *mut c_void,
) {
    let device = if device.is_null() {
        ptr::null_mut()
    } else {
        *device
    };
    let registry = if userdata1.is_null() {
        NativeContext::global().device_lost().as_ref()
    } else {
        &*(userdata1 as *const DeviceLostRegistry)
    };
    log::debug!(
        "device {:p} lost (reason {reason}): {}",
        device,
        String::from_utf8_lossy(message.as_bytes())
    );
    registry.record(device, reason);
}

unsafe extern "C" fn on_uncaptured_error(
    _device: *const WGPUDevice,
    error_type: u32,
    message: WGPUStringView,
    _userdata1: *mut c_void,
    _userdata2: *mut c_void,
) {
    log::warn!(
        "uncaptured wgpu error (type {error_type}): {}",
        String::from_utf8_lossy(message.as_bytes())
    );
}

impl NativeContext {
    /// Requests an adapter and blocks until the native callback fires.
    ///
    /// The outcome (status and message) is left in the per-thread adapter
    /// slot; on failure the adapter is `None`.
    pub fn request_adapter(
        &self,
        instance: WGPUInstance,
        options: *const WGPURequestAdapterOptions,
    ) -> Option<WGPUAdapter> {
        last::reset_request(Request::Adapter);
        if instance.is_null() {
            return None;
        }
        let request = self
            .procs()
            .instance_request_adapter
            .required(self.resolver());
        let done = Completion::<RequestOutcome<WGPUAdapterImpl>>::new();
        let info = WGPURequestAdapterCallbackInfo::process_events(
            on_request::<WGPUAdapterImpl>,
            done.userdata(),
        );
        unsafe { request(instance, options, info) };
        let outcome = self
            .pump_events(instance, PollBudget::Unbounded, || done.take())
            .ok()?;
        self.finish_request(
            Request::Adapter,
            outcome,
            request_adapter_status::Success,
            DEBUG_REQUEST_ADAPTER_VAR,
        )
    }

    /// Requests a device, filling in device-lost and uncaptured-error
    /// callbacks the caller left empty. `descriptor` is copied, never
    /// modified; `None` requests a default device.
    pub fn request_device(
        &self,
        instance: WGPUInstance,
        adapter: WGPUAdapter,
        descriptor: Option<&WGPUDeviceDescriptor>,
    ) -> Option<WGPUDevice> {
        last::reset_request(Request::Device);
        if instance.is_null() || adapter.is_null() {
            return None;
        }
        let mut descriptor = descriptor.copied().unwrap_or_default();
        self.install_device_callbacks(&mut descriptor);

        let request = self.procs().adapter_request_device.required(self.resolver());
        let done = Completion::<RequestOutcome<WGPUDeviceImpl>>::new();
        let info = WGPURequestDeviceCallbackInfo::process_events(
            on_request::<WGPUDeviceImpl>,
            done.userdata(),
        );
        unsafe { request(adapter, &descriptor, info) };
        let outcome = self
            .pump_events(instance, PollBudget::Unbounded, || done.take())
            .ok()?;
        self.finish_request(
            Request::Device,
            outcome,
            request_device_status::Success,
            DEBUG_REQUEST_DEVICE_VAR,
        )
    }

    /// [`NativeContext::request_device`] with a list of required features.
    pub fn request_device_with_features(
        &self,
        instance: WGPUInstance,
        adapter: WGPUAdapter,
        features: &[WGPUFeatureName],
    ) -> Option<WGPUDevice> {
        let descriptor = WGPUDeviceDescriptor {
            requiredFeatureCount: features.len(),
            requiredFeatures: features.as_ptr(),
            ..WGPUDeviceDescriptor::default()
        };
        self.request_device(instance, adapter, Some(&descriptor))
    }

    fn install_device_callbacks(&self, descriptor: &mut WGPUDeviceDescriptor) {
        let lost = &mut descriptor.deviceLostCallbackInfo;
        if lost.callback.is_none() {
            lost.mode = callback_mode::AllowSpontaneous;
            lost.callback = Some(on_device_lost);
            lost.userdata1 = Arc::into_raw(Arc::clone(self.device_lost())) as *mut c_void;
            lost.userdata2 = ptr::null_mut();
        }
        let uncaptured = &mut descriptor.uncapturedErrorCallbackInfo;
        if uncaptured.callback.is_none() {
            uncaptured.callback = Some(on_uncaptured_error);
            uncaptured.userdata1 = ptr::null_mut();
            uncaptured.userdata2 = ptr::null_mut();
        }
    }

    fn finish_request<H>(
        &self,
        kind: Request,
        outcome: RequestOutcome<H>,
        success: u32,
        debug_var: &str,
    ) -> Option<*mut H> {
        last::set_request(kind, outcome.status, &outcome.message);
        if outcome.status == success && !outcome.handle.is_null() {
            return Some(outcome.handle);
        }
        log::debug!(
            "{kind:?} request failed: status={} message={}",
            outcome.status,
            outcome.message
        );
        if self.env().flag(debug_var) {
            eprintln!(
                "wgpu-mbt: {kind:?} request failed: status={} message={}",
                outcome.status, outcome.message
            );
        }
        None
    }
}
