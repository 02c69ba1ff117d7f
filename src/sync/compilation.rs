use std::ffi::c_void;

use super::{AsyncError, Completion, PollBudget};
use crate::context::NativeContext;
use crate::ffi::*;
use crate::gate::Feature;
use crate::registry::last::{self, AsyncOp, AsyncRecord};

/// One diagnostic produced by shader compilation, copied out of native memory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "mbt-serde", derive(serde::Serialize))]
pub struct CompilationMessage {
    /// `compilation_message_type` value.
    pub kind: u32,
    pub text: String,
    pub line: u64,
    pub column: u64,
    pub offset: u64,
    pub length: u64,
}

impl CompilationMessage {
    pub fn is_error(&self) -> bool {
        self.kind == compilation_message_type::Error
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mbt-serde", derive(serde::Serialize))]
pub struct CompilationReport {
    pub status: u32,
    pub messages: Vec<CompilationMessage>,
}

impl CompilationReport {
    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_error()).count()
    }
}

unsafe fn copy_messages(info: *const WGPUCompilationInfo) -> Vec<CompilationMessage> {
    let Some(info) = info.as_ref() else {
        return Vec::new();
    };
    if info.messages.is_null() || info.messageCount == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(info.messages, info.messageCount)
        .iter()
        .map(|m| CompilationMessage {
            kind: m.messageType,
            text: String::from_utf8_lossy(m.message.as_bytes()).into_owned(),
            line: m.lineNum,
            column: m.linePos,
            offset: m.offset,
            length: m.length,
        })
        .collect()
}

unsafe extern "C" fn on_compilation_info(
    status: u32,
    info: *const WGPUCompilationInfo,
    userdata1: *mut c_void,
    _userdata2: *mut c_void,
) {
    // The info pointer is only valid for the duration of the callback.
    let messages = copy_messages(info);
    Completion::complete(userdata1, CompilationReport { status, messages });
}

impl NativeContext {
    /// Fetches shader compilation diagnostics, giving up after the bounded
    /// budget. Gated by [`Feature::CompilationInfo`]; the outcome is recorded
    /// in the per-thread compilation slot.
    pub fn compilation_info(
        &self,
        instance: WGPUInstance,
        module: WGPUShaderModule,
    ) -> Result<CompilationReport, AsyncError> {
        last::reset_async(AsyncOp::CompilationInfo);
        let result = self.compilation_info_inner(instance, module);
        let record = match &result {
            Ok(report) => AsyncRecord {
                status: report.status,
                error_kind: super::error_kind::NONE,
            },
            Err(err) => AsyncRecord {
                status: err.status(),
                error_kind: err.code(),
            },
        };
        last::set_async(AsyncOp::CompilationInfo, record);
        result
    }

    fn compilation_info_inner(
        &self,
        instance: WGPUInstance,
        module: WGPUShaderModule,
    ) -> Result<CompilationReport, AsyncError> {
        if instance.is_null() || module.is_null() {
            return Err(AsyncError::InvalidInput);
        }
        if !self.gate().is_enabled(Feature::CompilationInfo) {
            return Err(AsyncError::Disabled);
        }
        let entry = &self.procs().shader_module_get_compilation_info;
        let Some(get_info) = entry.optional(self.resolver()) else {
            return Err(AsyncError::MissingSymbol);
        };
        let done = Completion::<CompilationReport>::new();
        let info = WGPUCompilationInfoCallbackInfo::process_events(on_compilation_info, done.userdata());
        unsafe { get_info(module, info) };
        let report = self
            .pump_events(instance, PollBudget::BOUNDED, || done.take())
            .map_err(|_| {
                log::warn!("{} did not complete in time", entry.name());
                AsyncError::Timeout
            })?;
        if report.status != compilation_info_request_status::Success {
            return Err(AsyncError::Failed(report.status));
        }
        Ok(report)
    }
}
