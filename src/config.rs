use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

pub type Coord = i32;

pub const SCREEN_WIDTH: u32 = 240; // Physical LCD width (portrait)
pub const SCREEN_HEIGHT: u32 = 320; // Physical LCD height (portrait)

pub const FIELD_CENTER_X: Coord = (SCREEN_WIDTH / 2) as Coord;
pub const FIELD_CENTER_Y: Coord = (SCREEN_HEIGHT / 2) as Coord;
// Outline half extents; the border sits one pixel inside the screen edge
pub const FIELD_HALF_WIDTH: u32 = SCREEN_WIDTH / 2 - 1;
pub const FIELD_HALF_HEIGHT: u32 = SCREEN_HEIGHT / 2 - 1;

pub const PADDLE_HALF_WIDTH: u32 = 20;
pub const PADDLE_HALF_HEIGHT: u32 = 2;
// Distance from the top/bottom screen edge to a paddle's centre row
pub const PADDLE_INSET: Coord = 14;

pub const BALL_RADIUS: u32 = 3;

pub const PADDLE_SPEED: Coord = 4;
pub const SERVE_SPEED: Coord = 3;
pub const INITIAL_BALL_VELOCITY: (Coord, Coord) = (1, -SERVE_SPEED);
pub const MAX_SPEED: Coord = 4;

pub const WIN_SCORE: u8 = 3;

// Frame pacing: SysTick at TIMER_HZ, one frame every FRAME_DIVIDER interrupts
pub const TIMER_HZ: u32 = 250;
pub const FRAME_DIVIDER: i32 = 10;
// Written into the interrupt counter after a goal: about one second of stillness
pub const GOAL_COOLDOWN: i32 = -250;

pub const BG_COLOR: Rgb565 = Rgb565::BLACK;
pub const FG_COLOR: Rgb565 = Rgb565::WHITE;
pub const BALL_COLOR: Rgb565 = Rgb565::YELLOW;

// Score digits sit against the left border, above and below the centre line
pub const LEFT_SCORE_ANCHOR: (Coord, Coord) = (8, FIELD_CENTER_Y - 16);
pub const RIGHT_SCORE_ANCHOR: (Coord, Coord) = (8, FIELD_CENTER_Y + 6);

pub const PADDLE_TONE_HZ: u32 = 1_200;
pub const WALL_TONE_HZ: u32 = 800;
pub const GOAL_TONE_HZ: u32 = 220;

pub const SWEEP_START_HZ: u32 = 440;
pub const SWEEP_END_HZ: u32 = 1_760;
pub const SWEEP_STEP_HZ: u32 = 110;
pub const SWEEP_STEP_MS: u32 = 45;
