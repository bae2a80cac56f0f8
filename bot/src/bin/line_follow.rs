#![no_std]
#![no_main]

use core::{fmt::Write, panic::PanicInfo};

use bot::{SLOT3, SLOT5, log, motors::Motors, sensors::LineSensor};
use nav_core::{LineCenter, config::LINE_WEIGHTS};

const BASE_SPEED: f32 = 0.5;
const GAIN: f32 = 0.4;

#[panic_handler]
fn panic(_panic: &PanicInfo<'_>) -> ! {
    writeln!(log(), "{}", _panic).ok(); // Do not panic in panic
    loop {}
}

#[unsafe(export_name = "main")]
fn main() -> ! {
    log().log_line("Line follower starting up...");

    let line = LineSensor::bind(SLOT3);
    let mut motors = Motors::bind(SLOT5);
    let full_scale = LINE_WEIGHTS[0] as f32;

    loop {
        let mask = line.mask();
        if mask == 0 {
            motors.stop();
            continue;
        }

        // Positive offsets come from the right-hand sensors: steer right.
        let offset = nav_core::position(mask) as f32 / full_scale;
        let boost = if LineCenter::from_mask(mask) == LineCenter::OnLine {
            1.0
        } else {
            0.8
        };
        let speed = BASE_SPEED * boost;
        let desired = (speed + offset * GAIN, speed - offset * GAIN);

        // Smooth changes to reduce oscillation.
        let blend = 0.2;
        motors.set(
            motors.left() * (1.0 - blend) + desired.0 * blend,
            motors.right() * (1.0 - blend) + desired.1 * blend,
        );
    }
}
