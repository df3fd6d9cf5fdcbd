//! Game session: the board in play plus the dice state around it.
//!
//! A session owns everything a front end needs between requests: the rule
//! config, the current board, whether a game is running, and which number
//! was last rolled or picked. It serializes to the flat JSON document the
//! web UI reads and that is stored across restarts.

use crate::board::{Board, NumberToken, ResourceType};
use crate::generator::{generate_board_with_rng, GenerationConfig, GenerationError};
use crate::topology::BoardSize;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Selected number that triggers the robber
pub const ROBBER_NUMBER: u8 = 7;

/// Errors returned by session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A game is in progress")]
    GameInProgress,

    #[error("No game in progress")]
    GameNotStarted,

    #[error("No board has been generated")]
    NoBoard,

    #[error("Manual dice selection is disabled")]
    ManualDiceDisabled,

    #[error("Invalid dice number {0}")]
    InvalidNumber(u8),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Corrupt game state: {0}")]
    CorruptState(String),
}

/// Result of rolling two dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub first: u8,
    pub second: u8,
    pub total: u8,
}

/// Stored/wire form of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateJson {
    pub resources: Vec<ResourceType>,
    pub numbers: Vec<NumberToken>,
    pub extension: bool,
    pub game_started: bool,
    pub eight_six_can_touch: bool,
    pub two_twelve_can_touch: bool,
    pub same_numbers_can_touch: bool,
    pub same_resource_can_touch: bool,
    pub manual_dice: bool,
    pub selected_number: u8,
}

/// One game table's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    config: GenerationConfig,
    board: Option<Board>,
    manual_dice: bool,
    game_started: bool,
    selected_number: u8,
}

impl GameSession {
    /// Fresh session with every placement rule relaxed and no board yet
    pub fn new() -> Self {
        Self::with_config(GenerationConfig::classic())
    }

    pub fn with_config(config: GenerationConfig) -> Self {
        Self {
            config,
            board: None,
            manual_dice: false,
            game_started: false,
            selected_number: 0,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn manual_dice(&self) -> bool {
        self.manual_dice
    }

    pub fn game_started(&self) -> bool {
        self.game_started
    }

    /// Last rolled or picked number, 0 if none
    pub fn selected_number(&self) -> u8 {
        self.selected_number
    }

    // ==================== Setup ====================

    /// Replace the generation rules. The board is not regenerated, but it is
    /// dropped when the board size changes.
    pub fn set_config(&mut self, config: GenerationConfig) -> Result<(), SessionError> {
        if self.game_started {
            return Err(SessionError::GameInProgress);
        }
        if config.board_size != self.config.board_size {
            self.board = None;
            self.selected_number = 0;
        }
        self.config = config;
        Ok(())
    }

    pub fn set_manual_dice(&mut self, enabled: bool) {
        self.manual_dice = enabled;
    }

    /// Generate a new board with the current rules.
    ///
    /// On failure the previous board stays in place.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Board, SessionError> {
        if self.game_started {
            return Err(SessionError::GameInProgress);
        }
        let board = generate_board_with_rng(&self.config, rng)?;
        self.install_board(board)
    }

    /// Generate with `config` and adopt both the rules and the board only if
    /// generation succeeds. On failure the session is unchanged.
    pub fn regenerate_with<R: Rng + ?Sized>(
        &mut self,
        config: GenerationConfig,
        rng: &mut R,
    ) -> Result<&Board, SessionError> {
        if self.game_started {
            return Err(SessionError::GameInProgress);
        }
        let board = generate_board_with_rng(&config, rng)?;
        board
            .check(&config)
            .map_err(|e| SessionError::CorruptState(e.to_string()))?;
        self.config = config;
        self.selected_number = 0;
        Ok(self.board.insert(board))
    }

    /// Install a board generated elsewhere (e.g. on a worker thread).
    /// The board must satisfy the session's current rules.
    pub fn install_board(&mut self, board: Board) -> Result<&Board, SessionError> {
        if self.game_started {
            return Err(SessionError::GameInProgress);
        }
        board
            .check(&self.config)
            .map_err(|e| SessionError::CorruptState(e.to_string()))?;
        self.selected_number = 0;
        Ok(self.board.insert(board))
    }

    // ==================== Play ====================

    pub fn start_game(&mut self) -> Result<(), SessionError> {
        if self.board.is_none() {
            return Err(SessionError::NoBoard);
        }
        self.game_started = true;
        info!("Game started");
        Ok(())
    }

    /// Stop the game and clear the selected number
    pub fn end_game(&mut self) {
        self.game_started = false;
        self.selected_number = 0;
        info!("Game ended");
    }

    /// Roll two dice and select their total
    pub fn roll_dice<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<DiceRoll, SessionError> {
        if !self.game_started {
            return Err(SessionError::GameNotStarted);
        }
        let first = rng.gen_range(1..=6);
        let second = rng.gen_range(1..=6);
        let roll = DiceRoll {
            first,
            second,
            total: first + second,
        };
        self.selected_number = roll.total;
        Ok(roll)
    }

    /// Pick a number by hand (2-12, 7 for the robber)
    pub fn select_number(&mut self, number: u8) -> Result<(), SessionError> {
        if !self.game_started {
            return Err(SessionError::GameNotStarted);
        }
        if !self.manual_dice {
            return Err(SessionError::ManualDiceDisabled);
        }
        if !(2..=12).contains(&number) {
            return Err(SessionError::InvalidNumber(number));
        }
        self.selected_number = number;
        Ok(())
    }

    /// Hexes producing on the selected number
    pub fn highlighted_hexes(&self) -> Vec<usize> {
        match &self.board {
            Some(board) if self.selected_number != ROBBER_NUMBER => {
                board.hexes_with_number(self.selected_number)
            }
            _ => Vec::new(),
        }
    }

    /// Breadth-first layers out from the desert(s) when the robber is up
    pub fn robber_waves(&self) -> Vec<Vec<usize>> {
        match &self.board {
            Some(board) if self.selected_number == ROBBER_NUMBER => self
                .config
                .board_size
                .topology()
                .waves_from(&board.desert_hexes()),
            _ => Vec::new(),
        }
    }

    // ==================== Serialization ====================

    pub fn to_json(&self) -> GameStateJson {
        let (resources, numbers) = match &self.board {
            Some(board) => (board.resources().to_vec(), board.numbers().to_vec()),
            None => (Vec::new(), Vec::new()),
        };
        GameStateJson {
            resources,
            numbers,
            extension: self.config.board_size == BoardSize::Extension,
            game_started: self.game_started,
            eight_six_can_touch: self.config.eight_six_can_touch,
            two_twelve_can_touch: self.config.two_twelve_can_touch,
            same_numbers_can_touch: self.config.same_number_can_touch,
            same_resource_can_touch: self.config.same_resource_can_touch,
            manual_dice: self.manual_dice,
            selected_number: self.selected_number,
        }
    }

    /// Rebuild a session from its stored form.
    ///
    /// The board must have the right size, counts and desert alignment. The
    /// adjacency flags are not re-checked since they may have been changed
    /// after the board was generated.
    pub fn from_json(state: GameStateJson) -> Result<Self, SessionError> {
        let board_size = if state.extension {
            BoardSize::Extension
        } else {
            BoardSize::Classic
        };
        let config = GenerationConfig::new(board_size)
            .with_same_resource_can_touch(state.same_resource_can_touch)
            .with_eight_six_can_touch(state.eight_six_can_touch)
            .with_two_twelve_can_touch(state.two_twelve_can_touch)
            .with_same_number_can_touch(state.same_numbers_can_touch);

        let board = if state.resources.is_empty() && state.numbers.is_empty() {
            None
        } else {
            let board = Board::new(state.resources, state.numbers);
            board
                .check(&GenerationConfig::new(board_size))
                .map_err(|e| SessionError::CorruptState(e.to_string()))?;
            Some(board)
        };

        if state.game_started && board.is_none() {
            return Err(SessionError::CorruptState(
                "game started without a board".to_string(),
            ));
        }
        if state.selected_number != 0 && !(2..=12).contains(&state.selected_number) {
            return Err(SessionError::InvalidNumber(state.selected_number));
        }
        if state.selected_number != 0 && !state.game_started {
            return Err(SessionError::CorruptState(
                "number selected outside a game".to_string(),
            ));
        }

        Ok(Self {
            config,
            board,
            manual_dice: state.manual_dice,
            game_started: state.game_started,
            selected_number: state.selected_number,
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
