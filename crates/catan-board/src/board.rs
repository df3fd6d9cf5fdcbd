//! Board data model: resource types, number tokens and the generated layout.
//!
//! This module contains:
//! - Resource types and their fixed per-board counts
//! - Number tokens and their fixed per-board counts
//! - The `Board` value produced by generation
//! - `Board::check`, which verifies a board against every placement rule

use crate::generator::GenerationConfig;
use crate::topology::BoardSize;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A number token value. Valid tokens are 2-6 and 8-12.
pub type NumberToken = u8;

/// Token value carried by desert hexes
pub const NO_TOKEN: NumberToken = 0;

/// Every valid token value in ascending order
pub const TOKEN_VALUES: [NumberToken; 10] = [2, 3, 4, 5, 6, 8, 9, 10, 11, 12];

/// Resource type of a hex.
///
/// Serialized as its numeric code (Sheep = 0 ... Desert = 5), which is the
/// format the web UI and stored game states use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ResourceType {
    /// Pasture
    Sheep,
    /// Forest
    Wood,
    /// Fields
    Wheat,
    /// Hills
    Brick,
    /// Mountains
    Ore,
    /// Produces nothing and never carries a token
    Desert,
}

impl ResourceType {
    /// All resource types, in code order
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Sheep,
        ResourceType::Wood,
        ResourceType::Wheat,
        ResourceType::Brick,
        ResourceType::Ore,
        ResourceType::Desert,
    ];

    /// Numeric code used on the wire
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Sheep => "Sheep",
            ResourceType::Wood => "Wood",
            ResourceType::Wheat => "Wheat",
            ResourceType::Brick => "Brick",
            ResourceType::Ore => "Ore",
            ResourceType::Desert => "Desert",
        }
    }

    /// How many hexes of this type a board of `size` has
    pub const fn count(self, size: BoardSize) -> usize {
        match (size, self) {
            (BoardSize::Classic, ResourceType::Sheep | ResourceType::Wood | ResourceType::Wheat) => 4,
            (BoardSize::Classic, ResourceType::Brick | ResourceType::Ore) => 3,
            (BoardSize::Classic, ResourceType::Desert) => 1,
            (BoardSize::Extension, ResourceType::Sheep | ResourceType::Wood | ResourceType::Wheat) => 6,
            (BoardSize::Extension, ResourceType::Brick | ResourceType::Ore) => 5,
            (BoardSize::Extension, ResourceType::Desert) => 2,
        }
    }
}

impl From<ResourceType> for u8 {
    fn from(resource: ResourceType) -> u8 {
        resource.code()
    }
}

/// Raised when decoding a resource code outside 0-5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown resource code {0}")]
pub struct UnknownResourceCode(pub u8);

impl TryFrom<u8> for ResourceType {
    type Error = UnknownResourceCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ResourceType::ALL
            .get(code as usize)
            .copied()
            .ok_or(UnknownResourceCode(code))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How many copies of `token` a board of `size` has (0 for invalid values)
pub const fn token_count(token: NumberToken, size: BoardSize) -> usize {
    match (size, token) {
        (BoardSize::Classic, 2 | 12) => 1,
        (BoardSize::Classic, 3..=6 | 8..=11) => 2,
        (BoardSize::Extension, 2 | 12) => 2,
        (BoardSize::Extension, 3..=6 | 8..=11) => 3,
        _ => 0,
    }
}

/// Whether `token` is a real number token (not the desert sentinel, not 7)
pub fn is_valid_token(token: NumberToken) -> bool {
    TOKEN_VALUES.contains(&token)
}

/// Ways a board can fail to satisfy its configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected {expected} hexes, got {resources} resources and {numbers} numbers")]
    WrongLength {
        expected: usize,
        resources: usize,
        numbers: usize,
    },

    #[error("expected {expected} {resource} hexes, found {found}")]
    ResourceCount {
        resource: ResourceType,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} tokens of {token}, found {found}")]
    TokenCount {
        token: NumberToken,
        expected: usize,
        found: usize,
    },

    #[error("hex {hex} has invalid token {token}")]
    InvalidToken { hex: usize, token: NumberToken },

    #[error("hex {0}: desert and empty token do not line up")]
    DesertMismatch(usize),

    #[error("hexes {0} and {1} share a resource")]
    SameResourceAdjacent(usize, usize),

    #[error("hexes {0} and {1} are both 6 or 8")]
    SixEightAdjacent(usize, usize),

    #[error("hexes {0} and {1} are both 2 or 12")]
    TwoTwelveAdjacent(usize, usize),

    #[error("hexes {0} and {1} carry the same number")]
    SameNumberAdjacent(usize, usize),
}

/// A generated board: one resource and one token per hex, index-aligned.
///
/// `numbers[i] == NO_TOKEN` exactly when `resources[i]` is a desert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    resources: Vec<ResourceType>,
    numbers: Vec<NumberToken>,
}

impl Board {
    pub(crate) fn new(resources: Vec<ResourceType>, numbers: Vec<NumberToken>) -> Self {
        Self { resources, numbers }
    }

    /// Resource per hex
    pub fn resources(&self) -> &[ResourceType] {
        &self.resources
    }

    /// Token per hex (`NO_TOKEN` on deserts)
    pub fn numbers(&self) -> &[NumberToken] {
        &self.numbers
    }

    /// Number of hexes
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True for a board with no hexes
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Indices of desert hexes, ascending
    pub fn desert_hexes(&self) -> Vec<usize> {
        self.resources
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == ResourceType::Desert)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of hexes carrying `token`
    pub fn hexes_with_number(&self, token: NumberToken) -> Vec<usize> {
        if !is_valid_token(token) {
            return Vec::new();
        }
        self.numbers
            .iter()
            .enumerate()
            .filter(|(_, n)| **n == token)
            .map(|(i, _)| i)
            .collect()
    }

    // ==================== Validation ====================

    /// Verify counts, desert alignment and every adjacency rule `config`
    /// enables, reporting the first violation found.
    pub fn check(&self, config: &GenerationConfig) -> Result<(), BoardError> {
        let size = config.board_size;
        let topology = size.topology();

        if self.resources.len() != topology.len() || self.numbers.len() != topology.len() {
            return Err(BoardError::WrongLength {
                expected: topology.len(),
                resources: self.resources.len(),
                numbers: self.numbers.len(),
            });
        }

        for resource in ResourceType::ALL {
            let found = self.resources.iter().filter(|r| **r == resource).count();
            let expected = resource.count(size);
            if found != expected {
                return Err(BoardError::ResourceCount {
                    resource,
                    expected,
                    found,
                });
            }
        }

        for (hex, (&resource, &token)) in self.resources.iter().zip(&self.numbers).enumerate() {
            let is_desert = resource == ResourceType::Desert;
            if is_desert != (token == NO_TOKEN) {
                return Err(BoardError::DesertMismatch(hex));
            }
            if !is_desert && !is_valid_token(token) {
                return Err(BoardError::InvalidToken { hex, token });
            }
        }

        for token in TOKEN_VALUES {
            let found = self.numbers.iter().filter(|n| **n == token).count();
            let expected = token_count(token, size);
            if found != expected {
                return Err(BoardError::TokenCount {
                    token,
                    expected,
                    found,
                });
            }
        }

        for (a, b) in topology.edges() {
            if !config.same_resource_can_touch && self.resources[a] == self.resources[b] {
                return Err(BoardError::SameResourceAdjacent(a, b));
            }
            let (x, y) = (self.numbers[a], self.numbers[b]);
            if x == NO_TOKEN || y == NO_TOKEN {
                continue;
            }
            if !config.eight_six_can_touch && is_six_or_eight(x) && is_six_or_eight(y) {
                return Err(BoardError::SixEightAdjacent(a, b));
            }
            if !config.two_twelve_can_touch && is_two_or_twelve(x) && is_two_or_twelve(y) {
                return Err(BoardError::TwoTwelveAdjacent(a, b));
            }
            if !config.same_number_can_touch && x == y {
                return Err(BoardError::SameNumberAdjacent(a, b));
            }
        }

        Ok(())
    }
}

pub(crate) fn is_six_or_eight(token: NumberToken) -> bool {
    token == 6 || token == 8
}

pub(crate) fn is_two_or_twelve(token: NumberToken) -> bool {
    token == 2 || token == 12
}
