//! Frame pacing shared between the timer interrupt and the main loop.
//!
//! The interrupt is the producer: it counts timer ticks, samples the buttons
//! every [`FRAME_DIVIDER`] ticks and arms a frame. The main loop is the
//! consumer: it sleeps until a frame is armed, disarms it and runs one tick.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

use crate::config::{FRAME_DIVIDER, GOAL_COOLDOWN};
use crate::input_device::PaddleVelocities;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Main context asleep, waiting for the timer.
    Idle,
    /// A tick is due.
    Armed,
}

#[derive(Copy, Clone, Debug)]
struct Latch {
    count: i32,
    paddles: PaddleVelocities,
}

pub struct FrameScheduler {
    armed: AtomicBool,
    latch: Mutex<Cell<Latch>>,
}

impl FrameScheduler {
    pub const fn new() -> Self {
        Self {
            armed: AtomicBool::new(false),
            latch: Mutex::new(Cell::new(Latch { count: 0, paddles: PaddleVelocities::STILL })),
        }
    }

    /// Timer interrupt body. `read_buttons` is only called on sampling
    /// ticks. Returns whether this call armed a frame.
    pub fn on_timer<F: FnOnce() -> u8>(&self, read_buttons: F) -> bool {
        critical_section::with(|cs| {
            let cell = self.latch.borrow(cs);
            let mut latch = cell.get();
            latch.count += 1;
            if latch.count < FRAME_DIVIDER {
                cell.set(latch);
                return false;
            }
            latch.paddles = PaddleVelocities::from_buttons(read_buttons());
            latch.count = 0;
            cell.set(latch);
            self.armed.store(true, Ordering::Release);
            true
        })
    }

    /// Block until a frame is armed, calling `sleep` while idle, then disarm
    /// and hand back the latest paddle sample.
    pub fn wait_for_frame<W: FnMut()>(&self, mut sleep: W) -> PaddleVelocities {
        while !self.armed.swap(false, Ordering::AcqRel) {
            sleep();
        }
        critical_section::with(|cs| self.latch.borrow(cs).get().paddles)
    }

    /// Hold off the next input samples after a goal.
    pub fn impose_cooldown(&self) {
        critical_section::with(|cs| {
            let cell = self.latch.borrow(cs);
            let mut latch = cell.get();
            latch.count = GOAL_COOLDOWN;
            cell.set(latch);
        });
    }

    pub fn state(&self) -> SchedulerState {
        if self.armed.load(Ordering::Acquire) {
            SchedulerState::Armed
        } else {
            SchedulerState::Idle
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PADDLE_SPEED;
    use crate::input_device::BUTTONS_RELEASED;

    #[test]
    fn arms_every_nth_tick() {
        let scheduler = FrameScheduler::new();
        let mut reads = 0;
        for _ in 0..FRAME_DIVIDER - 1 {
            assert!(!scheduler.on_timer(|| {
                reads += 1;
                BUTTONS_RELEASED
            }));
        }
        assert_eq!(reads, 0);
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        assert!(scheduler.on_timer(|| 0b1110));
        assert_eq!(scheduler.state(), SchedulerState::Armed);
        let paddles = scheduler.wait_for_frame(|| panic!("frame was already due"));
        assert_eq!(paddles, PaddleVelocities { left: -PADDLE_SPEED, right: 0 });
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn wait_sleeps_until_armed() {
        let scheduler = FrameScheduler::new();
        let mut naps = 0;
        let paddles = scheduler.wait_for_frame(|| {
            naps += 1;
            // each nap lasts one timer interrupt
            scheduler.on_timer(|| 0b0111);
        });
        assert_eq!(naps, FRAME_DIVIDER);
        assert_eq!(paddles, PaddleVelocities { left: 0, right: PADDLE_SPEED });
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn cooldown_suppresses_samples() {
        let scheduler = FrameScheduler::new();
        scheduler.impose_cooldown();
        let quiet = FRAME_DIVIDER - GOAL_COOLDOWN - 1;
        for _ in 0..quiet {
            assert!(!scheduler.on_timer(|| panic!("sampled during cooldown")));
        }
        assert!(scheduler.on_timer(|| BUTTONS_RELEASED));
    }
}
