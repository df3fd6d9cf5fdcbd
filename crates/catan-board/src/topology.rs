//! Fixed hex-adjacency graphs for the supported board sizes.
//!
//! Hexes are numbered row by row, left to right, starting from the top row.
//! The classic board has rows of 3-4-5-4-3 hexes; the extension board has
//! rows of 4-5-6-6-5-4. Each hex lists its neighbors in ascending order.
//! Two hexes touch when they sit side by side in a row, or in adjacent rows
//! with their indents one half-hex apart.
//!
//! The tables are plain constants rather than being derived at runtime so
//! that a generation call never allocates to discover adjacency.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Maximum number of neighbors a hex can have
pub const MAX_NEIGHBORS: usize = 6;

/// Which physical board layout is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BoardSize {
    /// Base game, 19 hexes
    #[default]
    Classic,
    /// 5-6 player extension, 30 hexes
    Extension,
}

impl BoardSize {
    /// Both supported sizes
    pub const ALL: [BoardSize; 2] = [BoardSize::Classic, BoardSize::Extension];

    /// Number of hexes on this board
    pub const fn hex_count(self) -> usize {
        match self {
            BoardSize::Classic => 19,
            BoardSize::Extension => 30,
        }
    }

    /// The adjacency graph for this board
    pub fn topology(self) -> &'static HexTopology {
        match self {
            BoardSize::Classic => &CLASSIC,
            BoardSize::Extension => &EXTENSION,
        }
    }
}

/// Problems found when checking a neighbor table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("hex {0} lists itself as a neighbor")]
    SelfLoop(usize),

    #[error("hex {from} lists {to} as a neighbor but not the reverse")]
    Asymmetric { from: usize, to: usize },

    #[error("hex {0} has more than six neighbors")]
    TooManyNeighbors(usize),

    #[error("hex {hex} lists out-of-range neighbor {neighbor}")]
    OutOfRange { hex: usize, neighbor: usize },

    #[error("hex {hex} lists neighbor {neighbor} twice")]
    Duplicate { hex: usize, neighbor: usize },
}

/// Immutable adjacency graph over hex indices `0..len()`.
#[derive(Debug)]
pub struct HexTopology {
    size: BoardSize,
    neighbors: &'static [&'static [usize]],
    rows: &'static [(usize, usize)],
}

impl HexTopology {
    /// Board size this topology describes
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Number of hexes
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Always false for the built-in layouts
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbors of `hex`, or an empty slice if `hex` is out of range
    pub fn neighbors(&self, hex: usize) -> &'static [usize] {
        self.neighbors.get(hex).copied().unwrap_or(&[])
    }

    /// Rows top to bottom as `(indent, hex count)`, the indent measured in
    /// half-hex widths from the leftmost hex edge of the board
    pub fn rows(&self) -> &'static [(usize, usize)] {
        self.rows
    }

    /// Every undirected edge once, as `(lower, higher)`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors.iter().enumerate().flat_map(|(hex, adj)| {
            adj.iter()
                .copied()
                .filter(move |&n| n > hex)
                .map(move |n| (hex, n))
        })
    }

    /// Check that the table is a simple undirected graph with degree at most six.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for (hex, adj) in self.neighbors.iter().enumerate() {
            if adj.len() > MAX_NEIGHBORS {
                return Err(TopologyError::TooManyNeighbors(hex));
            }
            for (pos, &neighbor) in adj.iter().enumerate() {
                if neighbor == hex {
                    return Err(TopologyError::SelfLoop(hex));
                }
                if neighbor >= self.len() {
                    return Err(TopologyError::OutOfRange { hex, neighbor });
                }
                if adj[..pos].contains(&neighbor) {
                    return Err(TopologyError::Duplicate { hex, neighbor });
                }
                if !self.neighbors[neighbor].contains(&hex) {
                    return Err(TopologyError::Asymmetric {
                        from: hex,
                        to: neighbor,
                    });
                }
            }
        }
        Ok(())
    }

    /// Breadth-first layers spreading out from `sources`.
    ///
    /// The first layer is the (deduplicated, in-range) sources themselves;
    /// every later layer holds the hexes first reached at that distance.
    /// Consumers use this to animate the robber leaving the desert.
    pub fn waves_from(&self, sources: &[usize]) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.len()];
        let mut queue = VecDeque::new();

        for &hex in sources {
            if hex < self.len() && !visited[hex] {
                visited[hex] = true;
                queue.push_back((hex, 0usize));
            }
        }

        let mut waves: Vec<Vec<usize>> = Vec::new();
        while let Some((hex, depth)) = queue.pop_front() {
            if waves.len() <= depth {
                waves.push(Vec::new());
            }
            waves[depth].push(hex);

            for &n in self.neighbors(hex) {
                if !visited[n] {
                    visited[n] = true;
                    queue.push_back((n, depth + 1));
                }
            }
        }
        waves
    }
}

/// 3-4-5-4-3 layout
pub static CLASSIC: HexTopology = HexTopology {
    size: BoardSize::Classic,
    rows: &[(2, 3), (1, 4), (0, 5), (1, 4), (2, 3)],
    neighbors: &[
        &[1, 3, 4],
        &[0, 2, 4, 5],
        &[1, 5, 6],
        &[0, 4, 7, 8],
        &[0, 1, 3, 5, 8, 9],
        &[1, 2, 4, 6, 9, 10],
        &[2, 5, 10, 11],
        &[3, 8, 12],
        &[3, 4, 7, 9, 12, 13],
        &[4, 5, 8, 10, 13, 14],
        &[5, 6, 9, 11, 14, 15],
        &[6, 10, 15],
        &[7, 8, 13, 16],
        &[8, 9, 12, 14, 16, 17],
        &[9, 10, 13, 15, 17, 18],
        &[10, 11, 14, 18],
        &[12, 13, 17],
        &[13, 14, 16, 18],
        &[14, 15, 17],
    ],
};

/// 4-5-6-6-5-4 layout; the fourth row sits half a hex right of the third.
pub static EXTENSION: HexTopology = HexTopology {
    size: BoardSize::Extension,
    rows: &[(2, 4), (1, 5), (0, 6), (1, 6), (2, 5), (3, 4)],
    neighbors: &[
        &[1, 4, 5],
        &[0, 2, 5, 6],
        &[1, 3, 6, 7],
        &[2, 7, 8],
        &[0, 5, 9, 10],
        &[0, 1, 4, 6, 10, 11],
        &[1, 2, 5, 7, 11, 12],
        &[2, 3, 6, 8, 12, 13],
        &[3, 7, 13, 14],
        &[4, 10, 15],
        &[4, 5, 9, 11, 15, 16],
        &[5, 6, 10, 12, 16, 17],
        &[6, 7, 11, 13, 17, 18],
        &[7, 8, 12, 14, 18, 19],
        &[8, 13, 19, 20],
        &[9, 10, 16, 21],
        &[10, 11, 15, 17, 21, 22],
        &[11, 12, 16, 18, 22, 23],
        &[12, 13, 17, 19, 23, 24],
        &[13, 14, 18, 20, 24, 25],
        &[14, 19, 25],
        &[15, 16, 22, 26],
        &[16, 17, 21, 23, 26, 27],
        &[17, 18, 22, 24, 27, 28],
        &[18, 19, 23, 25, 28, 29],
        &[19, 20, 24, 29],
        &[21, 22, 27],
        &[22, 23, 26, 28],
        &[23, 24, 27, 29],
        &[24, 25, 28],
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_topologies_are_valid() {
        for size in BoardSize::ALL {
            assert_eq!(size.topology().validate(), Ok(()), "{:?}", size);
        }
    }

    #[test]
    fn test_hex_counts_match_rows() {
        for size in BoardSize::ALL {
            let topo = size.topology();
            assert_eq!(topo.len(), size.hex_count());
            assert_eq!(topo.rows().iter().map(|r| r.1).sum::<usize>(), size.hex_count());
            assert_eq!(topo.size(), size);
        }
    }

    #[test]
    fn test_symmetry_holds_for_every_neighbor() {
        for size in BoardSize::ALL {
            let topo = size.topology();
            for hex in 0..topo.len() {
                for &n in topo.neighbors(hex) {
                    assert!(topo.neighbors(n).contains(&hex), "{} -> {} not mirrored", hex, n);
                }
            }
        }
    }

    #[test]
    fn test_neighbors_match_row_geometry() {
        for size in BoardSize::ALL {
            let topo = size.topology();
            let mut positions: Vec<(i64, i64)> = Vec::new();
            for (row, &(indent, count)) in topo.rows().iter().enumerate() {
                for col in 0..count {
                    positions.push((row as i64, (indent + 2 * col) as i64));
                }
            }

            for (hex, &(row, x)) in positions.iter().enumerate() {
                let expected: Vec<usize> = positions
                    .iter()
                    .enumerate()
                    .filter(|&(other, &(r, ox))| {
                        other != hex
                            && ((r == row && (ox - x).abs() == 2)
                                || ((r - row).abs() == 1 && (ox - x).abs() == 1))
                    })
                    .map(|(other, _)| other)
                    .collect();
                assert_eq!(topo.neighbors(hex), expected.as_slice(), "hex {} on {:?}", hex, size);
            }
        }
    }

    #[test]
    fn test_edge_counts() {
        // A hexagon of radius 2 has 42 internal edges
        assert_eq!(CLASSIC.edges().count(), 42);
        let degree_sum: usize = (0..EXTENSION.len()).map(|h| EXTENSION.neighbors(h).len()).sum();
        assert_eq!(EXTENSION.edges().count() * 2, degree_sum);
    }

    #[test]
    fn test_center_hex_has_six_neighbors() {
        assert_eq!(CLASSIC.neighbors(9), &[4, 5, 8, 10, 13, 14]);
    }

    #[test]
    fn test_out_of_range_neighbors_are_empty() {
        assert!(CLASSIC.neighbors(19).is_empty());
    }

    #[test]
    fn test_validate_catches_asymmetry() {
        static BROKEN: HexTopology = HexTopology {
            size: BoardSize::Classic,
            rows: &[(0, 2)],
            neighbors: &[&[1], &[]],
        };
        assert_eq!(
            BROKEN.validate(),
            Err(TopologyError::Asymmetric { from: 0, to: 1 })
        );
    }

    #[test]
    fn test_validate_catches_self_loop() {
        static BROKEN: HexTopology = HexTopology {
            size: BoardSize::Classic,
            rows: &[(0, 1)],
            neighbors: &[&[0]],
        };
        assert_eq!(BROKEN.validate(), Err(TopologyError::SelfLoop(0)));
    }

    /// Classic-sized board whose first seven hexes all touch each other.
    /// Seven mutually adjacent hexes need seven resource types; there are six.
    static CLIQUE: HexTopology = HexTopology {
        size: BoardSize::Classic,
        rows: &[(2, 3), (1, 4), (0, 5), (1, 4), (2, 3)],
        neighbors: &[
            &[1, 2, 3, 4, 5, 6],
            &[0, 2, 3, 4, 5, 6],
            &[0, 1, 3, 4, 5, 6],
            &[0, 1, 2, 4, 5, 6],
            &[0, 1, 2, 3, 5, 6],
            &[0, 1, 2, 3, 4, 6],
            &[0, 1, 2, 3, 4, 5],
            &[],
            &[],
            &[],
            &[],
            &[],
            &[],
            &[],
            &[],
            &[],
            &[],
            &[],
            &[],
        ],
    };

    #[test]
    fn test_unfillable_topology_fails_resource_placement() {
        use crate::generator::{place_resources, GenerationError};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        assert_eq!(CLIQUE.validate(), Ok(()));
        assert_eq!(CLIQUE.len(), BoardSize::Classic.hex_count());

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            place_resources(&CLIQUE, false, &mut rng),
            Err(GenerationError::ResourceConstraintUnsatisfiable)
        );
        // Without the rule the same graph is just a shuffle
        assert!(place_resources(&CLIQUE, true, &mut rng).is_ok());
    }

    #[test]
    fn test_unfillable_topology_yields_no_board() {
        use crate::generator::{generate_on, GenerationConfig, GenerationError};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let config = GenerationConfig::classic().with_same_resource_can_touch(false);
        for seed in 0..5 {
            let result = generate_on(&CLIQUE, &config, &mut StdRng::seed_from_u64(seed));
            assert_eq!(result, Err(GenerationError::ResourceConstraintUnsatisfiable));
        }
    }

    #[test]
    fn test_waves_from_center() {
        let waves = CLASSIC.waves_from(&[9]);
        assert_eq!(waves.len(), 3);
        assert_eq!(waves[0], vec![9]);
        assert_eq!(waves[1], vec![4, 5, 8, 10, 13, 14]);
        assert_eq!(waves[2].len(), 12);
    }

    #[test]
    fn test_waves_cover_board_once() {
        let waves = EXTENSION.waves_from(&[0, 29, 0]);
        let mut seen: Vec<usize> = waves.into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_waves_ignore_bad_sources() {
        assert!(CLASSIC.waves_from(&[42]).is_empty());
    }
}
