use parking_lot::Mutex;

use crate::ffi::WGPUDevice;

/// Entries kept before new devices are dropped.
pub const DEVICE_LOST_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LostEntry {
    device: usize,
    reason: u32,
}

/// Device-lost reasons keyed by device handle, consumed on read.
///
/// A small linear-scan table: at most one entry per device, and once
/// [`DEVICE_LOST_CAPACITY`] distinct devices are pending, further devices are
/// not recorded until an entry is taken.
#[derive(Debug)]
pub struct DeviceLostRegistry {
    entries: Mutex<Vec<LostEntry>>,
}

impl Default for DeviceLostRegistry {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::with_capacity(DEVICE_LOST_CAPACITY)),
        }
    }
}

impl DeviceLostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts `reason` for `device`. Returns false if the table was full.
    pub fn record(&self, device: WGPUDevice, reason: u32) -> bool {
        let key = device as usize;
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.iter_mut().find(|e| e.device == key) {
            entry.reason = reason;
            return true;
        }
        if entries.len() >= DEVICE_LOST_CAPACITY {
            log::warn!("device-lost table full; dropping reason {reason} for device {key:#x}");
            return false;
        }
        entries.push(LostEntry { device: key, reason });
        true
    }

    /// Removes and returns the reason recorded for `device`, or 0.
    pub fn take(&self, device: WGPUDevice) -> u32 {
        let key = device as usize;
        let mut entries = self.entries.lock();
        match entries.iter().position(|e| e.device == key) {
            Some(i) => entries.swap_remove(i).reason,
            None => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
