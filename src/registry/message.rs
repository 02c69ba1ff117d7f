use std::fmt;

/// Bytes of native diagnostic text kept per record.
pub const MESSAGE_CAPACITY: usize = 2048;

/// Fixed-capacity copy of a native diagnostic message.
///
/// Filled from inside native callbacks, so it never allocates. Text past
/// [`MESSAGE_CAPACITY`] bytes is cut off at the capacity boundary.
#[derive(Clone)]
pub struct MessageBuf {
    bytes: [u8; MESSAGE_CAPACITY],
    len: usize,
}

impl MessageBuf {
    pub const fn new() -> Self {
        Self {
            bytes: [0; MESSAGE_CAPACITY],
            len: 0,
        }
    }

    pub fn from_bytes(src: &[u8]) -> Self {
        let mut buf = Self::new();
        let len = src.len().min(MESSAGE_CAPACITY);
        buf.bytes[..len].copy_from_slice(&src[..len]);
        buf.len = len;
        buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copies the message into `out`. Fails without writing anything if `out`
    /// is too small; the caller sizes `out` with [`MessageBuf::len`] first.
    pub fn copy_to(&self, out: &mut [u8]) -> bool {
        if out.len() < self.len {
            return false;
        }
        out[..self.len].copy_from_slice(self.as_bytes());
        true
    }
}

impl Default for MessageBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Display for MessageBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}
