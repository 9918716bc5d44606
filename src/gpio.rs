//! Register-level helpers shared by the board drivers.

pub const MODE_INPUT: u32 = 0b00;
pub const MODE_OUTPUT: u32 = 0b01;
pub const MODE_ALTERNATE: u32 = 0b10;
pub const SPEED_HIGH: u32 = 0b10;
pub const PULL_UP: u32 = 0b01;

/// Replace the `width`-bit field of `pin` in a GPIO config word
/// (MODER/OSPEEDR/PUPDR use 2 bits per pin, AFRL/AFRH 4).
pub fn with_field(bits: u32, pin: u32, width: u32, value: u32) -> u32 {
    let shift = pin * width;
    let mask = ((1 << width) - 1) << shift;
    (bits & !mask) | (value << shift)
}
