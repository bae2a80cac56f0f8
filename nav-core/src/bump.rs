//! Bump switch decoding and handler dispatch.
//!
//! Six switches sit on port pins 7, 6, 5, 3, 2 and 0 with pull-ups, so a
//! pressed switch reads as 0. [`BumpState`] packs them into six
//! positive-logic bits: bit 0 is the rightmost switch, bit 5 the leftmost.

pub const SWITCH_COUNT: u8 = 6;

/// Port pins wired to a switch.
pub const PORT_PINS: u8 = 0xED;

const STATE_MASK: u8 = 0x3F;
const RIGHT_SWITCHES: u8 = 0x07;
const LEFT_SWITCHES: u8 = 0x38;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumpState(u8);

impl BumpState {
    pub const NONE: Self = Self(0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & STATE_MASK)
    }

    /// Decode a raw, negative-logic port byte.
    pub const fn from_port(raw: u8) -> Self {
        let packed = ((raw & 0xE0) >> 2) | ((raw & 0x0C) >> 1) | (raw & 0x01);
        Self(!packed & STATE_MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_pressed(self, switch: u8) -> bool {
        switch < SWITCH_COUNT && self.0 & (1 << switch) != 0
    }

    pub const fn any(self) -> bool {
        self.0 != 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn left_side(self) -> bool {
        self.0 & LEFT_SWITCHES != 0
    }

    pub const fn right_side(self) -> bool {
        self.0 & RIGHT_SWITCHES != 0
    }

    /// Switches pressed now that were released in `previous`.
    pub const fn pressed_since(self, previous: BumpState) -> BumpState {
        Self(self.0 & !previous.0)
    }
}

/// Receiver of decoded bump events.
pub trait BumpHandler {
    fn on_bump(&mut self, state: BumpState);
}

impl<F: FnMut(BumpState)> BumpHandler for F {
    fn on_bump(&mut self, state: BumpState) {
        self(state)
    }
}

/// Event source for the bump switches.
///
/// The handler is handed over once, at construction. Whatever owns the
/// hardware edge (an interrupt vector, a polling loop) calls
/// [`on_edge`](Self::on_edge) with the raw port byte and the handler runs
/// synchronously with the decoded state.
pub struct BumpInterrupt<H> {
    handler: H,
}

impl<H: BumpHandler> BumpInterrupt<H> {
    pub const fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn on_edge(&mut self, raw_port: u8) -> BumpState {
        let state = BumpState::from_port(raw_port);
        self.handler.on_bump(state);
        state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}
