//! Cell Race - native headless host
//!
//! Plays one autopilot run through the frame loop, logging the HUD as it
//! goes, and records the score in `highscores.json`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::process::ExitCode;
    use std::time::{SystemTime, UNIX_EPOCH};

    use thiserror::Error;

    use cell_race::highscores::DISPLAYED_SCORES;
    use cell_race::persistence::JsonFileStore;
    use cell_race::platform::FixedName;
    use cell_race::runner::{GameLoop, LogPresenter};
    use cell_race::{Engine, InitError, Tuning, TuningError};

    /// Frames per second of the browser animation-frame loop
    const FPS: u64 = 60;
    /// Give up on the run after five minutes of simulated play
    const MAX_FRAMES: u64 = FPS * 60 * 5;

    const SCORES_PATH: &str = "highscores.json";
    const TUNING_ENV: &str = "CELL_RACE_TUNING";

    /// The host could not get a session going
    #[derive(Debug, Error)]
    pub enum HostError {
        #[error("could not read tuning file {path}")]
        ReadTuning {
            path: String,
            #[source]
            source: io::Error,
        },
        #[error("bad tuning file {path}")]
        Tuning {
            path: String,
            #[source]
            source: TuningError,
        },
        #[error("engine failed to start")]
        Init(#[from] InitError),
    }

    /// Load tuning from a JSON file
    pub fn load_tuning(path: &Path) -> Result<Tuning, HostError> {
        let display = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|source| HostError::ReadTuning {
            path: display.clone(),
            source,
        })?;
        let tuning = Tuning::from_json(&json).map_err(|source| HostError::Tuning {
            path: display.clone(),
            source,
        })?;
        log::info!("Loaded tuning from {}", display);
        Ok(tuning)
    }

    /// Tuning from the file named by `CELL_RACE_TUNING`, or the defaults
    fn tuning_from_env() -> Result<Tuning, HostError> {
        match std::env::var_os(TUNING_ENV) {
            Some(path) => load_tuning(Path::new(&path)),
            None => Ok(Tuning::default()),
        }
    }

    fn play() -> Result<(), HostError> {
        let tuning = tuning_from_env()?;
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let engine = Engine::new(
            tuning,
            seed,
            JsonFileStore::new(SCORES_PATH),
            FixedName(Some("Autopilot".into())),
        )?;

        let mut game = GameLoop::new(engine, LogPresenter::new(FPS));
        game.engine_mut().controls_mut().set_autopilot(true);
        game.engine_mut().start();

        let frames = game.run(Some(MAX_FRAMES));
        if game.engine().is_running() {
            log::info!("Frame cap reached at level {}, stopping", game.engine().level());
            game.engine_mut().reset();
        }
        log::info!(
            "Session ended after {} frames, scores in {}",
            frames,
            game.engine().store().path().display()
        );

        println!("High scores:");
        for (i, entry) in game
            .engine()
            .high_scores()
            .top(DISPLAYED_SCORES)
            .iter()
            .enumerate()
        {
            println!("{:>2}. {:<16} {}", i + 1, entry.name, entry.score);
        }
        Ok(())
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        log::info!("Cell Race (native) starting...");

        match play() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                match std::error::Error::source(&err) {
                    Some(cause) => log::error!("{err}: {cause}"),
                    None => log::error!("{err}"),
                }
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use std::path::PathBuf;

        use super::*;

        fn scratch_path(name: &str) -> PathBuf {
            std::env::temp_dir().join(format!("cell-race-host-{}-{}.json", name, std::process::id()))
        }

        #[test]
        fn test_missing_tuning_file() {
            let err = load_tuning(&scratch_path("missing")).unwrap_err();
            assert!(matches!(err, HostError::ReadTuning { .. }));
        }

        #[test]
        fn test_invalid_tuning_file() {
            let path = scratch_path("invalid");
            fs::write(&path, r#"{ "obstacle_penalty": -10.0 }"#).expect("write");
            let err = load_tuning(&path).unwrap_err();
            assert!(matches!(
                err,
                HostError::Tuning {
                    source: TuningError::Invalid(_),
                    ..
                }
            ));
            let _ = fs::remove_file(path);
        }

        #[test]
        fn test_partial_tuning_file() {
            let path = scratch_path("partial");
            fs::write(&path, r#"{ "energy_drain": 0.2 }"#).expect("write");
            let tuning = load_tuning(&path).expect("tuning");
            assert_eq!(tuning.energy_drain, 0.2);
            assert_eq!(tuning.canvas_width, Tuning::default().canvas_width);
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host embeds the library; there is no binary entry point
}
