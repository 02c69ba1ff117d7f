use std::ffi::c_void;
use std::ptr;

use super::{AsyncError, Completion, PollBudget};
use crate::context::NativeContext;
use crate::ffi::*;
use crate::gate::Feature;
use crate::procs::Proc;
use crate::registry::last::{self, AsyncOp, AsyncRecord};
use crate::registry::MessageBuf;

struct PipelineOutcome<H> {
    status: u32,
    pipeline: *mut H,
    message: MessageBuf,
}

unsafe extern "C" fn on_pipeline<H>(
    status: u32,
    pipeline: *mut H,
    message: WGPUStringView,
    userdata1: *mut c_void,
    _userdata2: *mut c_void,
) {
    Completion::complete(
        userdata1,
        PipelineOutcome {
            status,
            pipeline,
            message: MessageBuf::from_bytes(message.as_bytes()),
        },
    );
}

impl NativeContext {
    /// Runs one async pipeline creation to completion and records the
    /// outcome in the per-thread pipeline slot.
    fn pipeline_async<H, F: Copy>(
        &self,
        instance: WGPUInstance,
        device: WGPUDevice,
        descriptor_is_null: bool,
        entry: &Proc<F>,
        start: impl FnOnce(F, *mut c_void),
    ) -> Result<*mut H, AsyncError> {
        last::reset_async(AsyncOp::Pipeline);
        let result = self.pipeline_async_inner(instance, device, descriptor_is_null, entry, start);
        let record = match &result {
            Ok(_) => AsyncRecord {
                status: create_pipeline_async_status::Success,
                error_kind: super::error_kind::NONE,
            },
            Err(err) => AsyncRecord {
                status: err.status(),
                error_kind: err.code(),
            },
        };
        last::set_async(AsyncOp::Pipeline, record);
        result
    }

    fn pipeline_async_inner<H, F: Copy>(
        &self,
        instance: WGPUInstance,
        device: WGPUDevice,
        descriptor_is_null: bool,
        entry: &Proc<F>,
        start: impl FnOnce(F, *mut c_void),
    ) -> Result<*mut H, AsyncError> {
        if instance.is_null() || device.is_null() || descriptor_is_null {
            return Err(AsyncError::InvalidInput);
        }
        if !self.gate().is_enabled(Feature::PipelineAsync) {
            return Err(AsyncError::Disabled);
        }
        let Some(create) = entry.optional(self.resolver()) else {
            return Err(AsyncError::MissingSymbol);
        };
        let done = Completion::<PipelineOutcome<H>>::new();
        start(create, done.userdata());
        let outcome = self
            .pump_events(instance, PollBudget::BOUNDED, || done.take())
            .map_err(|_| {
                log::warn!("{} did not complete in time", entry.name());
                AsyncError::Timeout
            })?;
        if outcome.status == create_pipeline_async_status::Success && !outcome.pipeline.is_null() {
            return Ok(outcome.pipeline);
        }
        log::debug!(
            "{} failed: status={} message={}",
            entry.name(),
            outcome.status,
            outcome.message
        );
        Err(AsyncError::Failed(outcome.status))
    }

    /// Async compute pipeline creation with no fallback.
    pub fn create_compute_pipeline_async_strict(
        &self,
        instance: WGPUInstance,
        device: WGPUDevice,
        descriptor: *const WGPUComputePipelineDescriptor,
    ) -> Result<WGPUComputePipeline, AsyncError> {
        self.pipeline_async(
            instance,
            device,
            descriptor.is_null(),
            &self.procs().device_create_compute_pipeline_async,
            |create, userdata| unsafe {
                create(
                    device,
                    descriptor,
                    WGPUCreateComputePipelineAsyncCallbackInfo::process_events(
                        on_pipeline::<WGPUComputePipelineImpl>,
                        userdata,
                    ),
                );
            },
        )
    }

    /// Async render pipeline creation with no fallback.
    pub fn create_render_pipeline_async_strict(
        &self,
        instance: WGPUInstance,
        device: WGPUDevice,
        descriptor: *const WGPURenderPipelineDescriptor,
    ) -> Result<WGPURenderPipeline, AsyncError> {
        self.pipeline_async(
            instance,
            device,
            descriptor.is_null(),
            &self.procs().device_create_render_pipeline_async,
            |create, userdata| unsafe {
                create(
                    device,
                    descriptor,
                    WGPUCreateRenderPipelineAsyncCallbackInfo::process_events(
                        on_pipeline::<WGPURenderPipelineImpl>,
                        userdata,
                    ),
                );
            },
        )
    }

    /// Async creation when enabled and exported, synchronous creation when
    /// the feature is disabled or the entry point is missing. Other failures
    /// (timeout, native error) yield null without a retry.
    pub fn create_compute_pipeline_async(
        &self,
        instance: WGPUInstance,
        device: WGPUDevice,
        descriptor: *const WGPUComputePipelineDescriptor,
    ) -> WGPUComputePipeline {
        match self.create_compute_pipeline_async_strict(instance, device, descriptor) {
            Ok(pipeline) => pipeline,
            Err(AsyncError::Disabled | AsyncError::MissingSymbol) => {
                let create = self
                    .procs()
                    .device_create_compute_pipeline
                    .required(self.resolver());
                unsafe { create(device, descriptor) }
            }
            Err(_) => ptr::null_mut(),
        }
    }

    pub fn create_render_pipeline_async(
        &self,
        instance: WGPUInstance,
        device: WGPUDevice,
        descriptor: *const WGPURenderPipelineDescriptor,
    ) -> WGPURenderPipeline {
        match self.create_render_pipeline_async_strict(instance, device, descriptor) {
            Ok(pipeline) => pipeline,
            Err(AsyncError::Disabled | AsyncError::MissingSymbol) => {
                let create = self
                    .procs()
                    .device_create_render_pipeline
                    .required(self.resolver());
                unsafe { create(device, descriptor) }
            }
            Err(_) => ptr::null_mut(),
        }
    }
}
