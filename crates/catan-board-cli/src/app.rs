//! Command execution against the stored session.

use crate::command::Command;
use crate::render::{render_board, render_session};
use crate::store::StateStore;
use anyhow::Context;
use catan_board::{generate_board, generate_board_with_rng, Board, GameSession, GenerationConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const DEFAULT_STATE_PATH: &str = "gamestate.json";
const DEFAULT_GEN_TIMEOUT_MS: u64 = 2000;

/// Settings read from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub state_path: PathBuf,
    pub generation_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let state_path = std::env::var("CATAN_STATE_PATH")
            .unwrap_or_else(|_| DEFAULT_STATE_PATH.into())
            .into();
        let timeout_ms = match std::env::var("CATAN_GEN_TIMEOUT_MS") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("CATAN_GEN_TIMEOUT_MS={}", value))?,
            Err(_) => DEFAULT_GEN_TIMEOUT_MS,
        };
        Ok(Self {
            state_path,
            generation_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

/// Run `command` and return what should be printed.
pub async fn run(command: Command, settings: &Settings) -> anyhow::Result<String> {
    let store = StateStore::new(settings.state_path.clone());

    // A stored file that no longer parses can still be reset
    let mut session = match command {
        Command::Reset => GameSession::new(),
        _ => store.load().await?.unwrap_or_default(),
    };

    let output = match command {
        Command::Generate { config, seed } => {
            session.set_config(config)?;
            let board = generate_with_deadline(config, seed, settings.generation_timeout).await?;
            session.install_board(board)?;
            store.save(&session).await?;
            render_session(&session)
        }
        Command::Show => render_session(&session),
        Command::StartGame => {
            session.start_game()?;
            store.save(&session).await?;
            render_session(&session)
        }
        Command::EndGame => {
            session.end_game();
            store.save(&session).await?;
            render_session(&session)
        }
        Command::RollDice { seed } => {
            let roll = match seed {
                Some(seed) => session.roll_dice(&mut StdRng::seed_from_u64(seed))?,
                None => session.roll_dice(&mut rand::thread_rng())?,
            };
            info!(first = roll.first, second = roll.second, "Dice rolled");
            store.save(&session).await?;
            format!(
                "Rolled {} + {} = {}\n{}",
                roll.first,
                roll.second,
                roll.total,
                highlight_view(&session)
            )
        }
        Command::SelectNumber(number) => {
            session.select_number(number)?;
            store.save(&session).await?;
            highlight_view(&session)
        }
        Command::ManualDice(enabled) => {
            session.set_manual_dice(enabled);
            store.save(&session).await?;
            format!("Manual dice {}", if enabled { "on" } else { "off" })
        }
        Command::Reset => {
            store.delete().await?;
            format!("Removed {}", store.path().display())
        }
    };

    Ok(output)
}

/// Board with the selected number's hexes marked, or the robber waves
fn highlight_view(session: &GameSession) -> String {
    let waves = session.robber_waves();
    if !waves.is_empty() {
        return format!("Robber! spreading from desert: {:?}", waves);
    }
    match session.board() {
        Some(board) => render_board(
            board,
            session.config().board_size.topology(),
            &session.highlighted_hexes(),
        ),
        None => String::new(),
    }
}

/// Generate on a blocking worker and give up after `deadline`.
pub async fn generate_with_deadline(
    config: GenerationConfig,
    seed: Option<u64>,
    deadline: Duration,
) -> anyhow::Result<Board> {
    let started = Instant::now();
    let board = run_blocking_with_deadline(deadline, move || match seed {
        Some(seed) => generate_board_with_rng(&config, &mut StdRng::seed_from_u64(seed)),
        None => generate_board(&config),
    })
    .await??;

    info!(
        board_size = ?config.board_size,
        elapsed_us = started.elapsed().as_micros() as u64,
        "Board generated"
    );
    Ok(board)
}

/// Run `job` on the blocking pool and return its result if it finishes
/// within `deadline`.
///
/// A job that overruns is not cancelled. It keeps its worker until it
/// returns, and its result is dropped. `main` shuts the runtime down
/// without waiting for such workers.
async fn run_blocking_with_deadline<T, F>(deadline: Duration, job: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let task = tokio::task::spawn_blocking(job);
    match tokio::time::timeout(deadline, task).await {
        Ok(joined) => joined.context("board generation task failed"),
        Err(_) => {
            warn!(?deadline, "Board generation timed out");
            anyhow::bail!("board generation timed out after {:?}", deadline);
        }
    }
}
