//! Cooperative frame loop
//!
//! The host owns scheduling (an animation-frame callback in the browser, a
//! plain loop natively). Each call to [`GameLoop::frame`] runs one update and
//! one present, then tells the host whether to schedule the next frame.

use crate::engine::Engine;
use crate::persistence::ScoreStore;
use crate::platform::NamePrompt;
use crate::sim::{GameEvent, Snapshot};

/// Draws a frame. Rendering itself lives with the host.
pub trait Presenter {
    fn present(&mut self, snapshot: &Snapshot<'_>, events: &[GameEvent]);
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule another frame
    Continue,
    /// The chain is over; a new run needs a new start
    Stop,
}

/// One game session driven frame by frame
pub struct GameLoop<S: ScoreStore, P: NamePrompt, R: Presenter> {
    engine: Engine<S, P>,
    presenter: R,
    frames: u64,
}

impl<S: ScoreStore, P: NamePrompt, R: Presenter> GameLoop<S, P, R> {
    pub fn new(engine: Engine<S, P>, presenter: R) -> Self {
        Self {
            engine,
            presenter,
            frames: 0,
        }
    }

    /// Run a single frame
    ///
    /// Stops without doing anything once the engine is idle. A frame that
    /// fails ends the run as a loss and is not presented.
    pub fn frame(&mut self) -> LoopControl {
        if !self.engine.is_running() {
            return LoopControl::Stop;
        }

        let events = match self.engine.update() {
            Ok(events) => events,
            Err(err) => {
                self.engine.fail(&err);
                return LoopControl::Stop;
            }
        };
        self.frames += 1;
        self.presenter.present(&self.engine.snapshot(), &events);

        // A loss inside this frame is seen at the next entry
        LoopControl::Continue
    }

    /// Drive frames back to back until the chain stops or `max_frames` run
    ///
    /// Returns the number of frames presented by this call.
    pub fn run(&mut self, max_frames: Option<u64>) -> u64 {
        let start = self.frames;
        while max_frames.is_none_or(|max| self.frames - start < max) {
            if self.frame() == LoopControl::Stop {
                break;
            }
        }
        self.frames - start
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn engine(&self) -> &Engine<S, P> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<S, P> {
        &mut self.engine
    }

    pub fn presenter(&self) -> &R {
        &self.presenter
    }

    pub fn into_parts(self) -> (Engine<S, P>, R) {
        (self.engine, self.presenter)
    }
}

/// Presenter that logs a HUD line every `every` frames
#[derive(Debug, Clone)]
pub struct LogPresenter {
    every: u64,
    seen: u64,
}

impl LogPresenter {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            seen: 0,
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, snapshot: &Snapshot<'_>, events: &[GameEvent]) {
        self.seen += 1;
        for event in events {
            log::debug!("{:?}", event);
        }
        if self.seen % self.every != 0 {
            return;
        }

        let powerups: Vec<String> = snapshot
            .indicators
            .iter()
            .map(|p| format!("{} {}", p.kind.label(), p.remaining))
            .collect();
        log::info!(
            "Level {} | Energy {} | Score {} | {}",
            snapshot.level,
            snapshot.energy_display(),
            snapshot.score,
            if powerups.is_empty() {
                "-".to_string()
            } else {
                powerups.join(", ")
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::FixedName;
    use crate::sim::{Competitor, LossReason};
    use crate::tuning::Tuning;

    /// Counts frames and keeps every event it was shown
    #[derive(Default)]
    struct Recorder {
        frames: u64,
        events: Vec<GameEvent>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, _snapshot: &Snapshot<'_>, events: &[GameEvent]) {
            self.frames += 1;
            self.events.extend_from_slice(events);
        }
    }

    fn game_loop() -> GameLoop<MemoryStore, FixedName, Recorder> {
        let mut engine = Engine::new(
            Tuning::default(),
            7,
            MemoryStore::new(),
            FixedName(Some("Ova".into())),
        )
        .expect("engine");
        let state = engine.state_mut();
        state.obstacles.clear();
        state.competitors.clear();
        state.energy_boosts.clear();
        state.powerups.clear();
        GameLoop::new(engine, Recorder::default())
    }

    #[test]
    fn test_idle_engine_stops_immediately() {
        let mut game = game_loop();
        assert_eq!(game.frame(), LoopControl::Stop);
        assert_eq!(game.presenter().frames, 0);
    }

    #[test]
    fn test_frame_cap() {
        let mut game = game_loop();
        game.engine_mut().start();
        assert_eq!(game.run(Some(25)), 25);
        assert_eq!(game.presenter().frames, 25);
        assert!(game.engine().is_running());
    }

    #[test]
    fn test_loss_frame_is_presented_then_chain_stops() {
        let mut game = game_loop();
        game.engine_mut().start();
        game.engine_mut().state_mut().energy = 0.15;

        let ran = game.run(None);

        // Two draining frames, the second one ends the run
        assert_eq!(ran, 2);
        assert!(matches!(
            game.presenter().events.as_slice(),
            [GameEvent::GameOver {
                reason: LossReason::OutOfEnergy,
                ..
            }]
        ));
        assert_eq!(game.frame(), LoopControl::Stop);
        assert_eq!(game.engine().high_scores().entries.len(), 1);
    }

    #[test]
    fn test_failed_frame_stops_without_presenting() {
        let mut game = game_loop();
        game.engine_mut().start();
        game.engine_mut().state_mut().competitors.push(Competitor {
            pos: Vec2::new(300.0, 300.0),
            radius: 6.0,
            speed: 1.0,
            angle: f32::NAN,
            trail: Vec::new(),
            distance_to_goal: 450.0,
        });

        assert_eq!(game.frame(), LoopControl::Stop);
        assert_eq!(game.presenter().frames, 0);
        assert!(!game.engine().is_running());

        let (engine, _) = game.into_parts();
        assert_eq!(engine.high_scores().entries.len(), 1);
        assert_eq!(engine.energy(), 100.0);
    }

    #[test]
    fn test_restart_after_loss() {
        let mut game = game_loop();
        game.engine_mut().start();
        game.engine_mut().state_mut().energy = 0.05;
        game.run(None);
        assert!(!game.engine().is_running());

        game.engine_mut().start();
        assert_eq!(game.run(Some(3)), 3);
        assert_eq!(game.frames(), 4);
    }

    #[test]
    fn test_log_presenter_accepts_frames() {
        let mut engine = Engine::new(
            Tuning::default(),
            3,
            MemoryStore::new(),
            FixedName::default(),
        )
        .expect("engine");
        engine.start();
        let mut game = GameLoop::new(engine, LogPresenter::new(2));
        assert_eq!(game.run(Some(4)), 4);
    }
}
