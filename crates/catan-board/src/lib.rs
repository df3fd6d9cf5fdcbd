//! Catan Board - randomized hex board generation with placement rules
//!
//! This crate generates Catan-style board layouts and tracks the dice state
//! of a game played on them:
//! - Fixed adjacency graphs for the 19-hex and 30-hex boards
//! - Resource placement, optionally forbidding equal neighbors
//! - Number-token placement with the 6/8, 2/12 and equal-number rules
//! - A game session with dice rolls, manual selection and robber waves
//!
//! # Architecture
//!
//! Generation is a pure function of a [`GenerationConfig`] and a random
//! source. It keeps no state between calls, so it can be run on any thread
//! and reproduced exactly with a seeded RNG. It can be compiled to:
//! - Native Rust for the command-line tool
//! - WebAssembly for the browser UI
//!
//! # Modules
//!
//! - [`topology`]: Neighbor tables and breadth-first traversal
//! - [`board`]: Resource types, tokens, count tables and `Board`
//! - [`generator`]: The two placement algorithms
//! - [`session`]: Game progression and the stored JSON shape

pub mod board;
pub mod generator;
pub mod session;
pub mod topology;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{Board, BoardError, NumberToken, ResourceType, NO_TOKEN, TOKEN_VALUES};
pub use generator::{
    generate_board, generate_board_with_rng, GenerationConfig, GenerationError,
    DEFAULT_MAX_NUMBER_ATTEMPTS,
};
pub use session::{DiceRoll, GameSession, GameStateJson, SessionError, ROBBER_NUMBER};
pub use topology::{BoardSize, HexTopology, TopologyError};
