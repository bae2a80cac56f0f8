//! Line position estimates from the 8-sensor reflectance array.
//!
//! Bit `i` of the mask is set when sensor `i` sees the (dark) line.
//! Sensor 0 is the robot's rightmost sensor, sensor 7 the leftmost.

use crate::{TenthMillimeters, config::LineWeights};

pub const SENSOR_COUNT: usize = 8;

const CENTER_PAIR: u8 = 0x18;
const CENTER_RIGHT: u8 = 0x08;
const CENTER_LEFT: u8 = 0x10;

impl LineWeights {
    /// Weighted centroid of the active sensors.
    ///
    /// Returns 0 when no sensor sees the line. The average truncates toward
    /// zero. The sum is kept in `i64`, so any weight table is safe; the mean
    /// always lies between the smallest and largest weight and fits back.
    pub fn position(&self, mask: u8) -> TenthMillimeters {
        let (sum, active) = self
            .weights
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .fold((0i64, 0i64), |(sum, active), (_, &weight)| {
                (sum + i64::from(weight), active + 1)
            });

        if active == 0 {
            0
        } else {
            (sum / active) as TenthMillimeters
        }
    }
}

/// [`LineWeights::position`] with the robot's sensor layout.
pub fn position(mask: u8) -> TenthMillimeters {
    LineWeights::DEFAULT.position(mask)
}

/// Coarse line status from the two middle sensors (bits 3 and 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LineCenter {
    Lost = 0,
    /// Only the right middle sensor sees the line.
    OffLeft = 1,
    /// Only the left middle sensor sees the line.
    OffRight = 2,
    OnLine = 3,
}

impl LineCenter {
    pub const fn from_mask(mask: u8) -> Self {
        match mask & CENTER_PAIR {
            CENTER_PAIR => LineCenter::OnLine,
            CENTER_RIGHT => LineCenter::OffLeft,
            CENTER_LEFT => LineCenter::OffRight,
            _ => LineCenter::Lost,
        }
    }
}

pub fn center(mask: u8) -> LineCenter {
    LineCenter::from_mask(mask)
}
