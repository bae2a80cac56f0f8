use core::{fmt::Write, ptr};

/// Character sink; every char written shows up on the debug console.
pub struct Log {
    mem: *mut char,
}

impl Log {
    pub const fn bind(slot: usize) -> Self {
        Self {
            mem: slot as *mut char,
        }
    }

    fn put(&self, c: char) {
        unsafe { ptr::write_volatile(self.mem, c) };
    }

    /// Write `s` followed by a newline, without going through `fmt`.
    pub fn log_line(&self, s: &str) {
        s.chars().for_each(|c| self.put(c));
        self.put('\n');
    }
}

impl Write for Log {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        s.chars().for_each(|c| self.put(c));
        Ok(())
    }
}
