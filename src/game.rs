use log::info;

use crate::audio::{Speaker, Voice};
use crate::collision;
use crate::geometry::Region;
use crate::input_device::PaddleVelocities;
use crate::layer::Scene;
use crate::physics;
use crate::render::{self, PixelSink};
use crate::scheduler::FrameScheduler;
use crate::score::{Phase, Scoreboard};

/// Button bank driver.
///
/// `read_buttons` returns one bit per button, a cleared bit meaning pressed
/// (see [`crate::input_device`] for the layout).
pub trait InputDevice {
    type Error;
    fn init(&mut self) -> Result<(), Self::Error>;
    fn read_buttons(&mut self) -> Result<u8, Self::Error>;
}

/// The whole game: scene, scores and the output devices it draws and sounds
/// on. Owned by the main loop; the timer interrupt only reaches the
/// [`FrameScheduler`].
pub struct Game<D: PixelSink, S: Speaker> {
    scene: Scene,
    fence: Region,
    scoreboard: Scoreboard,
    display: D,
    voice: Voice<S>,
    announced: bool,
}

impl<D: PixelSink, S: Speaker> Game<D, S> {
    /// Build the scene and paint the first frame.
    pub fn init(display: D, speaker: S) -> Self {
        Self::from_scene(Scene::new(), display, speaker)
    }

    /// Start from a prepared scene, e.g. a ball already in flight.
    pub fn from_scene(scene: Scene, mut display: D, speaker: S) -> Self {
        let scoreboard = Scoreboard::new();
        render::paint_all(&scene, &mut display);
        render::draw_scores(&scoreboard, &mut display);
        info!("pong: first to {} wins", crate::config::WIN_SCORE);

        Game {
            fence: scene.fence(),
            scene,
            scoreboard,
            display,
            voice: Voice::new(speaker),
            announced: false,
        }
    }

    /// One frame: steer, predict, collide, integrate, commit and repaint,
    /// then settle the speaker. Does nothing once the game is over.
    pub fn tick(&mut self, paddles: PaddleVelocities, scheduler: &FrameScheduler) -> Phase {
        if self.scoreboard.phase() == Phase::GameOver {
            return Phase::GameOver;
        }

        self.scene.steer(paddles);
        let mut candidates = physics::predict(&self.scene);
        let contacts = collision::resolve(&mut self.scene, &mut candidates, &self.fence);
        physics::integrate(&mut self.scene, &candidates);

        if let Some(cue) = contacts.cue() {
            self.voice.play(cue);
        }
        if let Some(scorer) = contacts.goal {
            scheduler.impose_cooldown();
            self.scoreboard.award(scorer);
            info!(
                "goal for {:?}: {} - {}",
                scorer,
                self.scoreboard.left(),
                self.scoreboard.right()
            );
        }

        render::redraw(&mut self.scene, &mut self.display);
        render::draw_scores(&self.scoreboard, &mut self.display);
        self.voice.settle();

        self.scoreboard.phase()
    }

    /// Terminal sequence: message, then the tone sweep. Runs once; later
    /// calls and calls before game over are ignored.
    pub fn finish<F: FnMut(u32)>(&mut self, delay_ms: F) {
        if self.announced || self.scoreboard.phase() != Phase::GameOver {
            return;
        }
        self.announced = true;
        if let Some(winner) = self.scoreboard.winner() {
            info!("game over, {:?} wins", winner);
        }
        render::draw_game_over(&mut self.display);
        self.voice.sweep(delay_ms);
    }

    pub fn phase(&self) -> Phase {
        self.scoreboard.phase()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn speaker(&self) -> &S {
        self.voice.speaker()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Cue;
    use crate::config::*;
    use crate::layer::{LayerId, TransformId};
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::Point;

    #[derive(Default)]
    struct Counter {
        areas: usize,
        pixels: usize,
    }

    impl PixelSink for Counter {
        fn set_area(&mut self, _area: Region) {
            self.areas += 1;
        }

        fn write_pixel(&mut self, _color: Rgb565) {
            self.pixels += 1;
        }
    }

    #[derive(Default)]
    struct Tones(Vec<Option<u32>>);

    impl Speaker for Tones {
        fn set_tone(&mut self, hz: u32) {
            self.0.push(Some(hz));
        }

        fn stop_tone(&mut self) {
            self.0.push(None);
        }
    }

    fn serve_into_top_goal(game: &mut Game<Counter, Tones>) {
        let fence = game.scene().fence();
        let ball = game.scene_mut().layer_mut(LayerId::BALL);
        // well clear of the top paddle's columns
        let at = Point::new(fence.top_left.x + 10, fence.top_left.y + 4);
        ball.pos = at;
        ball.last = at;
        ball.next = at;
        game.scene_mut().transform_mut(TransformId::BALL).velocity = Point::new(0, -3);
    }

    #[test]
    fn init_paints_everything() {
        let game = Game::init(Counter::default(), Tones::default());
        assert!(game.display().pixels >= (SCREEN_WIDTH * SCREEN_HEIGHT) as usize);
        assert_eq!(game.phase(), Phase::Playing);
        assert!(game.speaker().0.is_empty());
    }

    #[test]
    fn goal_scores_sounds_and_cools_down() {
        let scheduler = FrameScheduler::new();
        let mut game = Game::init(Counter::default(), Tones::default());
        serve_into_top_goal(&mut game);

        assert_eq!(game.tick(PaddleVelocities::STILL, &scheduler), Phase::Playing);
        assert_eq!((game.scoreboard().left(), game.scoreboard().right()), (0, 1));
        assert_eq!(game.speaker().0, vec![Some(Cue::Goal.frequency())]);
        assert_eq!(
            game.scene().layer(LayerId::BALL).pos,
            Point::new(FIELD_CENTER_X, FIELD_CENTER_Y)
        );
        // cooldown: the next sample is far away
        for _ in 0..FRAME_DIVIDER {
            assert!(!scheduler.on_timer(|| 0));
        }

        // the cue is silenced at the end of the following tick
        game.tick(PaddleVelocities::STILL, &scheduler);
        assert_eq!(game.speaker().0.last(), Some(&None));
    }

    #[test]
    fn finished_game_stops_ticking() {
        let scheduler = FrameScheduler::new();
        let mut game = Game::init(Counter::default(), Tones::default());
        for _ in 0..WIN_SCORE {
            serve_into_top_goal(&mut game);
            game.tick(PaddleVelocities::STILL, &scheduler);
        }
        assert_eq!(game.phase(), Phase::GameOver);

        let ball = game.scene().layer(LayerId::BALL).pos;
        let pixels = game.display().pixels;
        assert_eq!(game.tick(PaddleVelocities { left: 4, right: 4 }, &scheduler), Phase::GameOver);
        assert_eq!(game.scene().layer(LayerId::BALL).pos, ball);
        assert_eq!(game.display().pixels, pixels);

        let mut sweeps = 0;
        game.finish(|_| sweeps += 1);
        game.finish(|_| sweeps += 1);
        let steps = (SWEEP_END_HZ - SWEEP_START_HZ) / SWEEP_STEP_HZ + 1;
        assert_eq!(sweeps, steps);
        assert!(game.display().pixels > pixels);
    }

    #[test]
    fn finish_is_a_no_op_while_playing() {
        let mut game = Game::init(Counter::default(), Tones::default());
        let pixels = game.display().pixels;
        game.finish(|_| panic!("swept too early"));
        assert_eq!(game.display().pixels, pixels);
    }
}
