#![no_std]
#![no_main]

use core::{cell::Cell, fmt::Write, panic::PanicInfo};

use bot::{
    SLOT2, SLOT4, SLOT5, log,
    motors::Motors,
    sensors::{BumpSwitches, DistanceSensors},
};
use nav_core::{BumpInterrupt, BumpState, Scenario};

const CRUISE: f32 = 0.6;
const TURN: f32 = 0.4;

#[panic_handler]
fn panic(_panic: &PanicInfo<'_>) -> ! {
    writeln!(log(), "{}", _panic).ok(); // Do not panic in panic
    loop {}
}

#[unsafe(export_name = "main")]
fn main() -> ! {
    log().log_line("Maze runner starting up...");

    let distances = DistanceSensors::bind(SLOT2);
    let bump_port = BumpSwitches::bind(SLOT4);
    let mut motors = Motors::bind(SLOT5);

    let halted = Cell::new(false);
    let mut bumps = BumpInterrupt::new(|state: BumpState| {
        if state.any() {
            halted.set(true);
        }
    });
    let mut previous = BumpState::from_port(bump_port.raw());
    let mut last = Scenario::Error;

    loop {
        // Falling edge on any switch pin, same as the hardware interrupt.
        let raw = bump_port.raw();
        let current = BumpState::from_port(raw);
        if current.pressed_since(previous).any() {
            let state = bumps.on_edge(raw);
            writeln!(log(), "bump {:#08b}", state.bits()).ok();
        }
        previous = current;

        if halted.get() {
            motors.stop();
            continue;
        }

        let [left, center, right] = distances.raw().map(nav_core::convert);
        let scenario = nav_core::classify(left, center, right);
        if scenario != last {
            writeln!(log(), "{scenario} ({left}, {center}, {right})").ok();
            last = scenario;
        }

        let (l, r) = match scenario {
            Scenario::Straight
            | Scenario::CrossRoad
            | Scenario::LeftJoint
            | Scenario::RightJoint => (CRUISE, CRUISE),
            Scenario::LeftTurn | Scenario::TeeJoint | Scenario::Blocked => (-TURN, TURN),
            Scenario::RightTurn => (TURN, -TURN),
            // Veer away from the close wall.
            Scenario::LeftTooClose => (CRUISE, CRUISE * 0.5),
            Scenario::RightTooClose => (CRUISE * 0.5, CRUISE),
            s if s.is_danger() => (-TURN, -TURN),
            _ => (0.0, 0.0),
        };
        motors.set(l, r);
    }
}
