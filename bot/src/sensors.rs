use core::ptr;

/// Raw codes of the left, center and right distance sensors.
///
/// Layout (all i32):
///   0x00: left
///   0x04: center
///   0x08: right
pub struct DistanceSensors {
    left: *const i32,
    center: *const i32,
    right: *const i32,
}

impl DistanceSensors {
    pub const fn bind(slot: usize) -> Self {
        Self {
            left: (slot + 0x00) as *const i32,
            center: (slot + 0x04) as *const i32,
            right: (slot + 0x08) as *const i32,
        }
    }

    /// Raw codes as `[left, center, right]`.
    pub fn raw(&self) -> [i32; 3] {
        unsafe {
            [
                ptr::read_volatile(self.left),
                ptr::read_volatile(self.center),
                ptr::read_volatile(self.right),
            ]
        }
    }
}

/// Reflectance array sampled by the host; bit i set when sensor i sees the line.
pub struct LineSensor {
    mask: *const u8,
}

impl LineSensor {
    pub const fn bind(slot: usize) -> Self {
        Self {
            mask: slot as *const u8,
        }
    }

    pub fn mask(&self) -> u8 {
        unsafe { ptr::read_volatile(self.mask) }
    }
}

/// Raw bump switch port, negative logic.
pub struct BumpSwitches {
    port: *const u8,
}

impl BumpSwitches {
    pub const fn bind(slot: usize) -> Self {
        Self {
            port: slot as *const u8,
        }
    }

    pub fn raw(&self) -> u8 {
        unsafe { ptr::read_volatile(self.port) }
    }
}
