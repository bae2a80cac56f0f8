//! Decision layer for a three-sensor maze robot.
//!
//! Everything in here is a pure function of its inputs: the distance
//! converter, the scenario classifier and the line estimators keep no state
//! between calls and can run from an interrupt handler as well as from the
//! main loop. Hardware access lives in the firmware crate; this crate only
//! sees already-sampled values.
//!
//! ```
//! use nav_core::{classify, convert, position, Scenario};
//!
//! assert_eq!(convert(2552), 800);
//! assert_eq!(classify(300, 650, 300), Scenario::Straight);
//! assert_eq!(position(0b0000_0001), 334);
//! ```
#![no_std]

#[cfg(test)]
extern crate std;

pub mod bump;
pub mod config;
pub mod distance;
pub mod line;
pub mod scenario;

pub use bump::{BumpHandler, BumpInterrupt, BumpState};
pub use config::{Calibration, ConfigError, LineWeights, NavConfig, Thresholds};
pub use distance::convert;
pub use line::{LineCenter, center, position};
pub use scenario::{InvalidScenario, Scenario, Tier, classify};

/// Distance from the robot's reference point, in millimetres.
pub type Millimeters = i32;

/// Lateral offset from the followed line, in tenths of a millimetre.
pub type TenthMillimeters = i32;
