use crate::config::WIN_SCORE;
use crate::layer::PaddleSide;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Terminal; only a reset leaves it.
    GameOver,
}

pub struct Scoreboard {
    left: u8,
    right: u8,
    phase: Phase,
}

impl Scoreboard {
    pub const fn new() -> Self {
        Self { left: 0, right: 0, phase: Phase::Playing }
    }

    pub fn left(&self) -> u8 {
        self.left
    }

    pub fn right(&self) -> u8 {
        self.right
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Count a goal for `scorer` and re-evaluate the win condition. Frozen
    /// once the game is over.
    pub fn award(&mut self, scorer: PaddleSide) -> Phase {
        if self.phase == Phase::GameOver {
            return self.phase;
        }
        match scorer {
            PaddleSide::Left => self.left = self.left.saturating_add(1),
            PaddleSide::Right => self.right = self.right.saturating_add(1),
        }
        if self.left >= WIN_SCORE || self.right >= WIN_SCORE {
            self.phase = Phase::GameOver;
        }
        self.phase
    }

    pub fn winner(&self) -> Option<PaddleSide> {
        match self.phase {
            Phase::Playing => None,
            Phase::GameOver if self.left >= WIN_SCORE => Some(PaddleSide::Left),
            Phase::GameOver => Some(PaddleSide::Right),
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}
