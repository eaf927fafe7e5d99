//! The game engine: one owned aggregate per session
//!
//! Wraps the simulation with everything around a run: lifecycle, input,
//! and recording the final score when a run ends.

use thiserror::Error;

use crate::highscores::HighScores;
use crate::persistence::{ScoreStore, StoreError};
use crate::platform::{Controls, NamePrompt, resolve_name};
use crate::sim::{GameEvent, GamePhase, GameState, LossReason, SimError, Snapshot, lose, tick};
use crate::tuning::{Tuning, TuningError};

/// The engine could not be created; it never becomes runnable
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error("could not load high scores")]
    Store(#[from] StoreError),
}

/// Game engine: simulation state, input, leaderboard and its collaborators
pub struct Engine<S: ScoreStore, P: NamePrompt> {
    state: GameState,
    controls: Controls,
    high_scores: HighScores,
    store: S,
    prompt: P,
}

impl<S: ScoreStore, P: NamePrompt> Engine<S, P> {
    /// Validate tuning, load the leaderboard and lay out level 1 (idle)
    pub fn new(tuning: Tuning, seed: u64, mut store: S, prompt: P) -> Result<Self, InitError> {
        let state = GameState::new(tuning, seed)?;
        let high_scores = HighScores::from_entries(store.load()?);
        log::info!(
            "Engine ready (seed {}, high score {})",
            seed,
            high_scores.top_score()
        );
        Ok(Self {
            state,
            controls: Controls::new(),
            high_scores,
            store,
            prompt,
        })
    }

    /// Begin (or re-arm) a run
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Running {
            log::info!("Run started at level {}", self.state.level);
        }
        self.state.phase = GamePhase::Running;
    }

    /// Advance one frame. Returns the events the frame produced.
    ///
    /// A failed frame leaves the run as it was; the caller decides what to do
    /// with it (the frame loop hands it to [`Engine::fail`]).
    pub fn update(&mut self) -> Result<Vec<GameEvent>, SimError> {
        let input = self.controls.to_tick_input();
        let events = tick(&mut self.state, &input)?;
        self.record_game_over(&events);
        Ok(events)
    }

    /// End the current run after a frame failure, as a normal loss
    pub fn fail(&mut self, err: &SimError) -> Vec<GameEvent> {
        log::error!("Frame failed: {err}");
        let mut events = Vec::new();
        if self.state.is_running() {
            lose(&mut self.state, LossReason::Fault, &mut events);
            self.record_game_over(&events);
        }
        events
    }

    fn record_game_over(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::GameOver { score, .. } = event {
                self.record_score(*score);
            }
        }
    }

    /// Stop and return to a fresh idle level 1 without recording a score
    pub fn reset(&mut self) {
        self.state.phase = GamePhase::Idle;
        self.controls.clear();
        self.state.reset();
    }

    /// Ask for a name and store the run; storage failures are logged, not fatal
    fn record_score(&mut self, score: u64) {
        self.controls.clear();
        let name = resolve_name(self.prompt.request_name(score));
        let rank = self.high_scores.add_score(name.clone(), score);
        match rank {
            Some(rank) => log::info!("{} placed #{} with {}", name, rank, score),
            None => log::info!("{} scored {} (not ranked)", name, score),
        }
        if let Err(err) = self.store.save(&self.high_scores.entries) {
            log::warn!("Could not save high scores: {err}");
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn energy(&self) -> f32 {
        self.state.energy
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts that script scenarios (demos, tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.state)
    }
}
