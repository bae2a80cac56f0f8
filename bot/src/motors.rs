use core::ptr;

/// Left and right drive motors.
///
/// Layout (all f32):
///   0x00: left wheel, -1.0 (full reverse) to 1.0 (full forward)
///   0x04: right wheel
pub struct Motors {
    left: *mut f32,
    right: *mut f32,
}

impl Motors {
    pub const fn bind(slot: usize) -> Self {
        Self {
            left: (slot + 0x00) as *mut f32,
            right: (slot + 0x04) as *mut f32,
        }
    }

    pub fn set(&mut self, left: f32, right: f32) {
        unsafe {
            ptr::write_volatile(self.left, left.clamp(-1.0, 1.0));
            ptr::write_volatile(self.right, right.clamp(-1.0, 1.0));
        }
    }

    pub fn stop(&mut self) {
        self.set(0.0, 0.0);
    }

    pub fn left(&self) -> f32 {
        unsafe { ptr::read_volatile(self.left) }
    }

    pub fn right(&self) -> f32 {
        unsafe { ptr::read_volatile(self.right) }
    }
}
