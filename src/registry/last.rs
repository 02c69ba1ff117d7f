//! Per-thread record of the most recent synchronous call of each kind.
//!
//! Each wrapper resets its slot when it starts and fills it when it finishes,
//! so a caller must read the slot before making another call of the same kind
//! on the same thread.

use std::cell::{Cell, RefCell};

use super::MessageBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Adapter,
    Device,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsyncOp {
    Pipeline,
    CompilationInfo,
}

/// Native status plus diagnostic text of an adapter or device request.
#[derive(Clone, Debug, Default)]
pub struct RequestRecord {
    pub status: u32,
    pub message: MessageBuf,
}

/// Native status plus the wrapper's error-kind code of an async operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AsyncRecord {
    pub status: u32,
    pub error_kind: u32,
}

thread_local! {
    static LAST_ADAPTER: RefCell<RequestRecord> = RefCell::new(RequestRecord::default());
    static LAST_DEVICE: RefCell<RequestRecord> = RefCell::new(RequestRecord::default());
    static LAST_PIPELINE: Cell<AsyncRecord> = Cell::new(AsyncRecord::default());
    static LAST_COMPILATION: Cell<AsyncRecord> = Cell::new(AsyncRecord::default());
}

fn with_request<R>(kind: Request, f: impl FnOnce(&RefCell<RequestRecord>) -> R) -> R {
    match kind {
        Request::Adapter => LAST_ADAPTER.with(f),
        Request::Device => LAST_DEVICE.with(f),
    }
}

fn with_async<R>(kind: AsyncOp, f: impl FnOnce(&Cell<AsyncRecord>) -> R) -> R {
    match kind {
        AsyncOp::Pipeline => LAST_PIPELINE.with(f),
        AsyncOp::CompilationInfo => LAST_COMPILATION.with(f),
    }
}

pub fn reset_request(kind: Request) {
    with_request(kind, |slot| *slot.borrow_mut() = RequestRecord::default());
}

pub fn set_request(kind: Request, status: u32, message: &MessageBuf) {
    with_request(kind, |slot| {
        let mut record = slot.borrow_mut();
        record.status = status;
        record.message = message.clone();
    });
}

pub fn request(kind: Request) -> RequestRecord {
    with_request(kind, |slot| slot.borrow().clone())
}

pub fn request_status(kind: Request) -> u32 {
    with_request(kind, |slot| slot.borrow().status)
}

pub fn request_message_len(kind: Request) -> usize {
    with_request(kind, |slot| slot.borrow().message.len())
}

/// Copies the recorded message into `out`; false if `out` is too small.
pub fn copy_request_message(kind: Request, out: &mut [u8]) -> bool {
    with_request(kind, |slot| slot.borrow().message.copy_to(out))
}

pub fn reset_async(kind: AsyncOp) {
    with_async(kind, |slot| slot.set(AsyncRecord::default()));
}

pub fn set_async(kind: AsyncOp, record: AsyncRecord) {
    with_async(kind, |slot| slot.set(record));
}

pub fn async_record(kind: AsyncOp) -> AsyncRecord {
    with_async(kind, |slot| slot.get())
}
