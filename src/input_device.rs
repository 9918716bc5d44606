use crate::config::{Coord, PADDLE_SPEED};

/// Button bank polarity: a cleared bit is a pressed button.
///
/// Bit layout of a sample:
/// - bit 0: left paddle, move toward x = 0
/// - bit 1: left paddle, move toward x = max
/// - bit 2: right paddle, move toward x = 0
/// - bit 3: right paddle, move toward x = max
pub const BUTTONS_RELEASED: u8 = 0x0F;

const LEFT_NEG: u8 = 1 << 0;
const LEFT_POS: u8 = 1 << 1;
const RIGHT_NEG: u8 = 1 << 2;
const RIGHT_POS: u8 = 1 << 3;

/// Horizontal paddle speeds decided by one button sample.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PaddleVelocities {
    pub left: Coord,
    pub right: Coord,
}

impl PaddleVelocities {
    pub const STILL: PaddleVelocities = PaddleVelocities { left: 0, right: 0 };

    pub fn from_buttons(state: u8) -> Self {
        Self {
            left: pair_velocity(state, LEFT_NEG, LEFT_POS),
            right: pair_velocity(state, RIGHT_NEG, RIGHT_POS),
        }
    }
}

/// Speed for one button pair. The first button of the pair wins when both
/// are held.
fn pair_velocity(state: u8, neg: u8, pos: u8) -> Coord {
    if state & neg == 0 {
        -PADDLE_SPEED
    } else if state & pos == 0 {
        PADDLE_SPEED
    } else {
        0
    }
}
