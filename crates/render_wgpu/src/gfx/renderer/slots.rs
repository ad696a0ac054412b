//! Per-frame uniform slot allocation.
//!
//! The draw uniform buffer holds `capacity` regular slots followed by one slot
//! reserved for the placeholder, so the fallback draw never runs out of room.

#[derive(Debug, Clone)]
pub(crate) struct DrawSlots {
    capacity: u32,
    stride: u32,
    used: u32,
}

impl DrawSlots {
    pub fn new(capacity: u32, stride: u32) -> Self {
        Self { capacity, stride, used: 0 }
    }

    /// Total bytes needed for the backing buffer.
    pub fn buffer_size(&self) -> u64 {
        u64::from(self.stride) * (u64::from(self.capacity) + 1)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Byte offset of the next free slot, or `None` when the frame is full.
    pub fn next(&mut self) -> Option<u32> {
        if self.used >= self.capacity {
            return None;
        }
        let off = self.stride * self.used;
        self.used += 1;
        Some(off)
    }

    pub fn placeholder(&self) -> u32 {
        self.stride * self.capacity
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}
