use crate::config::*;

/// Tone generator seam. Fire and forget: nothing is acknowledged.
pub trait Speaker {
    fn set_tone(&mut self, hz: u32);
    fn stop_tone(&mut self);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    Paddle,
    Wall,
    Goal,
}

impl Cue {
    pub fn frequency(self) -> u32 {
        match self {
            Cue::Paddle => PADDLE_TONE_HZ,
            Cue::Wall => WALL_TONE_HZ,
            Cue::Goal => GOAL_TONE_HZ,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Ringing {
    Silent,
    /// Started during the current tick.
    Fresh,
    /// Left over from an earlier tick.
    Stale,
}

/// A speaker plus the bookkeeping needed to let each cue ring for exactly
/// one frame.
pub struct Voice<S: Speaker> {
    speaker: S,
    ringing: Ringing,
}

impl<S: Speaker> Voice<S> {
    pub fn new(speaker: S) -> Self {
        Self { speaker, ringing: Ringing::Silent }
    }

    pub fn play(&mut self, cue: Cue) {
        self.speaker.set_tone(cue.frequency());
        self.ringing = Ringing::Fresh;
    }

    /// End-of-tick step: silence whatever is still ringing from a previous
    /// tick, age what started in this one.
    pub fn settle(&mut self) {
        self.ringing = match self.ringing {
            Ringing::Silent => Ringing::Silent,
            Ringing::Fresh => Ringing::Stale,
            Ringing::Stale => {
                self.speaker.stop_tone();
                Ringing::Silent
            }
        };
    }

    #[cfg(test)]
    fn is_ringing(&self) -> bool {
        self.ringing != Ringing::Silent
    }

    /// Ascending game-over sweep; blocks for its whole length.
    pub fn sweep<D: FnMut(u32)>(&mut self, mut delay_ms: D) {
        let mut hz = SWEEP_START_HZ;
        while hz <= SWEEP_END_HZ {
            self.speaker.set_tone(hz);
            delay_ms(SWEEP_STEP_MS);
            hz += SWEEP_STEP_HZ;
        }
        self.speaker.stop_tone();
        self.ringing = Ringing::Silent;
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }
}
