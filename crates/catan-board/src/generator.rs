//! Constrained random board generation.
//!
//! Generation runs in two phases over a fixed [`HexTopology`]:
//!
//! 1. **Resources.** Without the no-same-neighbor rule this is a plain
//!    shuffle of the resource multiset. With it, a depth-first search walks
//!    the hexes in index order, trying the still-available types that no
//!    already-placed neighbor uses, in random order, and undoing on failure.
//! 2. **Number tokens.** Hexes are visited in index order and each gets a
//!    uniformly random token among those that break no enabled rule against
//!    its already-numbered neighbors. A dead end throws the whole attempt
//!    away and starts again from hex 0; attempts are capped by
//!    [`GenerationConfig::max_number_attempts`].
//!
//! Both phases are pure functions of the config and the random source, so
//! a seeded generator reproduces a board exactly.

use crate::board::{
    is_six_or_eight, is_two_or_twelve, token_count, Board, NumberToken, ResourceType, NO_TOKEN,
    TOKEN_VALUES,
};
use crate::topology::{BoardSize, HexTopology};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default cap on number-placement restarts.
///
/// Every supported configuration converges far inside this; a rule set that
/// cannot be satisfied fails with `NumberConstraintAttemptsExhausted`.
pub const DEFAULT_MAX_NUMBER_ATTEMPTS: u32 = 10_000;

fn default_max_number_attempts() -> u32 {
    DEFAULT_MAX_NUMBER_ATTEMPTS
}

/// Rules for one generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Which topology to fill
    pub board_size: BoardSize,
    /// If false, adjacent hexes never share a resource type
    pub same_resource_can_touch: bool,
    /// If false, a 6 or 8 never touches another 6 or 8
    pub eight_six_can_touch: bool,
    /// If false, a 2 or 12 never touches another 2 or 12
    pub two_twelve_can_touch: bool,
    /// If false, equal tokens never touch
    pub same_number_can_touch: bool,
    /// Restart budget for number placement (0 behaves as 1)
    #[serde(default = "default_max_number_attempts")]
    pub max_number_attempts: u32,
}

impl GenerationConfig {
    /// Unconstrained config for `board_size`
    pub fn new(board_size: BoardSize) -> Self {
        Self {
            board_size,
            same_resource_can_touch: true,
            eight_six_can_touch: true,
            two_twelve_can_touch: true,
            same_number_can_touch: true,
            max_number_attempts: DEFAULT_MAX_NUMBER_ATTEMPTS,
        }
    }

    /// Unconstrained 19-hex config
    pub fn classic() -> Self {
        Self::new(BoardSize::Classic)
    }

    /// Unconstrained 30-hex config
    pub fn extension() -> Self {
        Self::new(BoardSize::Extension)
    }

    pub fn with_same_resource_can_touch(mut self, allowed: bool) -> Self {
        self.same_resource_can_touch = allowed;
        self
    }

    pub fn with_eight_six_can_touch(mut self, allowed: bool) -> Self {
        self.eight_six_can_touch = allowed;
        self
    }

    pub fn with_two_twelve_can_touch(mut self, allowed: bool) -> Self {
        self.two_twelve_can_touch = allowed;
        self
    }

    pub fn with_same_number_can_touch(mut self, allowed: bool) -> Self {
        self.same_number_can_touch = allowed;
        self
    }

    pub fn with_max_number_attempts(mut self, attempts: u32) -> Self {
        self.max_number_attempts = attempts;
        self
    }

    /// Whether tokens `a` and `b` may sit on adjacent hexes under this config
    pub fn tokens_may_touch(&self, a: NumberToken, b: NumberToken) -> bool {
        if !self.eight_six_can_touch && is_six_or_eight(a) && is_six_or_eight(b) {
            return false;
        }
        if !self.two_twelve_can_touch && is_two_or_twelve(a) && is_two_or_twelve(b) {
            return false;
        }
        if !self.same_number_can_touch && a == b {
            return false;
        }
        true
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Why generation produced no board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GenerationError {
    #[error("no resource layout satisfies the adjacency rule")]
    ResourceConstraintUnsatisfiable,

    #[error("number placement failed after {attempts} attempts")]
    NumberConstraintAttemptsExhausted { attempts: u32 },

    #[error("resource layout has {found} hexes, topology has {expected}")]
    ResourceLayoutMismatch { expected: usize, found: usize },
}

/// Generate a board using the thread-local random source.
pub fn generate_board(config: &GenerationConfig) -> Result<Board, GenerationError> {
    let mut rng = rand::thread_rng();
    generate_board_with_rng(config, &mut rng)
}

/// Generate a board with a provided RNG.
/// This allows for deterministic board generation when needed
pub fn generate_board_with_rng<R: Rng + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Board, GenerationError> {
    generate_on(config.board_size.topology(), config, rng)
}

/// Both placement phases over an explicit topology.
pub(crate) fn generate_on<R: Rng + ?Sized>(
    topology: &HexTopology,
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Board, GenerationError> {
    let result = place_resources(topology, config.same_resource_can_touch, rng)
        .and_then(|resources| {
            let numbers = place_numbers(topology, &resources, config, rng)?;
            Ok(Board::new(resources, numbers))
        });

    if let Err(e) = &result {
        warn!(board_size = ?config.board_size, error = %e, "Board generation failed");
    }
    result
}

// ==================== Resource Placement ====================

/// Assign a resource to every hex of `topology`, matching the fixed counts.
pub fn place_resources<R: Rng + ?Sized>(
    topology: &HexTopology,
    same_resource_can_touch: bool,
    rng: &mut R,
) -> Result<Vec<ResourceType>, GenerationError> {
    let size = topology.size();

    if same_resource_can_touch {
        let mut resources: Vec<ResourceType> = ResourceType::ALL
            .iter()
            .flat_map(|&r| std::iter::repeat(r).take(r.count(size)))
            .collect();
        resources.shuffle(rng);
        return Ok(resources);
    }

    let mut remaining = ResourceType::ALL.map(|r| r.count(size));
    let mut placed = Vec::with_capacity(topology.len());

    if place_resource_at(0, topology, &mut placed, &mut remaining, rng) {
        Ok(placed)
    } else {
        debug!(board_size = ?size, "Resource search exhausted every branch");
        Err(GenerationError::ResourceConstraintUnsatisfiable)
    }
}

/// Fill hex `hex` and everything after it; `placed` holds hexes `0..hex`.
/// On failure `placed` and `remaining` are left exactly as they were found.
fn place_resource_at<R: Rng + ?Sized>(
    hex: usize,
    topology: &HexTopology,
    placed: &mut Vec<ResourceType>,
    remaining: &mut [usize; 6],
    rng: &mut R,
) -> bool {
    if hex == topology.len() {
        return true;
    }

    let mut candidates: Vec<ResourceType> = ResourceType::ALL
        .iter()
        .copied()
        .filter(|r| remaining[r.code() as usize] > 0)
        .filter(|r| {
            !topology
                .neighbors(hex)
                .iter()
                .any(|&n| n < hex && placed[n] == *r)
        })
        .collect();
    candidates.shuffle(rng);

    for resource in candidates {
        let slot = resource.code() as usize;
        placed.push(resource);
        remaining[slot] -= 1;

        if place_resource_at(hex + 1, topology, placed, remaining, rng) {
            return true;
        }

        placed.pop();
        remaining[slot] += 1;
    }

    false
}

// ==================== Number Placement ====================

/// Assign a token to every hex, `NO_TOKEN` on deserts.
///
/// `resources` must be index-aligned with `topology` and hold the fixed
/// resource counts for its board size.
pub fn place_numbers<R: Rng + ?Sized>(
    topology: &HexTopology,
    resources: &[ResourceType],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<NumberToken>, GenerationError> {
    if resources.len() != topology.len() {
        return Err(GenerationError::ResourceLayoutMismatch {
            expected: topology.len(),
            found: resources.len(),
        });
    }

    let attempts = config.max_number_attempts.max(1);
    for attempt in 1..=attempts {
        if let Some(numbers) = try_place_numbers(topology, resources, config, rng) {
            if attempt > 1 {
                debug!(attempt, "Number placement succeeded after restarts");
            }
            return Ok(numbers);
        }
    }

    Err(GenerationError::NumberConstraintAttemptsExhausted { attempts })
}

/// One greedy pass. Returns `None` at the first hex with no legal token.
fn try_place_numbers<R: Rng + ?Sized>(
    topology: &HexTopology,
    resources: &[ResourceType],
    config: &GenerationConfig,
    rng: &mut R,
) -> Option<Vec<NumberToken>> {
    let size = topology.size();
    let mut remaining = TOKEN_VALUES.map(|t| token_count(t, size));
    let mut numbers = vec![NO_TOKEN; topology.len()];
    let mut candidates: Vec<usize> = Vec::with_capacity(TOKEN_VALUES.len());

    for hex in 0..topology.len() {
        if resources[hex] == ResourceType::Desert {
            continue;
        }

        candidates.clear();
        candidates.extend((0..TOKEN_VALUES.len()).filter(|&slot| {
            let token = TOKEN_VALUES[slot];
            remaining[slot] > 0
                && topology.neighbors(hex).iter().all(|&n| {
                    n > hex || numbers[n] == NO_TOKEN || config.tokens_may_touch(token, numbers[n])
                })
        }));

        let &slot = candidates.choose(rng)?;
        numbers[hex] = TOKEN_VALUES[slot];
        remaining[slot] -= 1;
    }

    // Leftover tokens mean the desert count did not match the board size
    if remaining.iter().any(|&left| left > 0) {
        return None;
    }
    Some(numbers)
}
