use std::ffi::c_void;
use std::ptr;

use super::{Completion, PollBudget};
use crate::context::NativeContext;
use crate::ffi::*;

unsafe extern "C" fn on_work_done(status: u32, userdata1: *mut c_void, _userdata2: *mut c_void) {
    Completion::complete(userdata1, status);
}

unsafe extern "C" fn on_mapped(
    status: u32,
    message: WGPUStringView,
    userdata1: *mut c_void,
    _userdata2: *mut c_void,
) {
    if status != map_async_status::Success {
        log::debug!(
            "buffer map failed (status {status}): {}",
            String::from_utf8_lossy(message.as_bytes())
        );
    }
    Completion::complete(userdata1, status);
}

impl NativeContext {
    /// Waits for all work submitted to `queue` so far and returns the native
    /// status, or 0 for a null handle.
    pub fn queue_work_done(&self, instance: WGPUInstance, queue: WGPUQueue) -> u32 {
        if instance.is_null() || queue.is_null() {
            return 0;
        }
        let on_done = self
            .procs()
            .queue_on_submitted_work_done
            .required(self.resolver());
        let done = Completion::<u32>::new();
        let info = WGPUQueueWorkDoneCallbackInfo::process_events(on_work_done, done.userdata());
        unsafe { on_done(queue, info) };
        self.pump_events(instance, PollBudget::Unbounded, || done.take())
            .unwrap_or(0)
    }

    fn map_buffer(
        &self,
        instance: WGPUInstance,
        buffer: WGPUBuffer,
        mode: WGPUFlags,
        offset: usize,
        size: usize,
    ) -> bool {
        let map = self.procs().buffer_map_async.required(self.resolver());
        let done = Completion::<u32>::new();
        let info = WGPUBufferMapCallbackInfo::process_events(on_mapped, done.userdata());
        unsafe { map(buffer, mode, offset, size, info) };
        self.pump_events(instance, PollBudget::Unbounded, || done.take())
            == Ok(map_async_status::Success)
    }

    fn unmap(&self, buffer: WGPUBuffer) {
        let unmap = self.procs().buffer_unmap.required(self.resolver());
        unsafe { unmap(buffer) }
    }

    /// Maps `size` bytes at `offset` for reading, copies them into the front
    /// of `out`, and unmaps. False if `out` is shorter than `size` or the map
    /// fails.
    pub fn buffer_map_read(
        &self,
        instance: WGPUInstance,
        buffer: WGPUBuffer,
        offset: usize,
        size: usize,
        out: &mut [u8],
    ) -> bool {
        if instance.is_null() || buffer.is_null() || size > out.len() {
            return false;
        }
        if !self.map_buffer(instance, buffer, map_mode::Read, offset, size) {
            return false;
        }
        let range = self
            .procs()
            .buffer_get_const_mapped_range
            .required(self.resolver());
        let mapped = unsafe { range(buffer, offset, size) } as *const u8;
        let copied = !mapped.is_null();
        if copied {
            unsafe { ptr::copy_nonoverlapping(mapped, out.as_mut_ptr(), size) };
        }
        self.unmap(buffer);
        copied
    }

    /// Maps `data.len()` bytes at `offset` for writing, copies `data` in, and
    /// unmaps.
    pub fn buffer_map_write(
        &self,
        instance: WGPUInstance,
        buffer: WGPUBuffer,
        offset: usize,
        data: &[u8],
    ) -> bool {
        if instance.is_null() || buffer.is_null() {
            return false;
        }
        let size = data.len();
        if !self.map_buffer(instance, buffer, map_mode::Write, offset, size) {
            return false;
        }
        let range = self.procs().buffer_get_mapped_range.required(self.resolver());
        let mapped = unsafe { range(buffer, offset, size) } as *mut u8;
        let copied = !mapped.is_null();
        if copied {
            unsafe { ptr::copy_nonoverlapping(data.as_ptr(), mapped, size) };
        }
        self.unmap(buffer);
        copied
    }
}
