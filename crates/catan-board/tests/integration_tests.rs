//! Integration tests for the board generator.
//!
//! These tests generate many boards under every rule combination and check
//! the placement invariants directly against the topology.

use catan_board::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

/// Every combination of the four "can touch" flags for one board size
fn all_configs(size: BoardSize) -> Vec<GenerationConfig> {
    (0..16u8)
        .map(|bits| {
            GenerationConfig::new(size)
                .with_same_resource_can_touch(bits & 1 != 0)
                .with_eight_six_can_touch(bits & 2 != 0)
                .with_two_twelve_can_touch(bits & 4 != 0)
                .with_same_number_can_touch(bits & 8 != 0)
        })
        .collect()
}

fn count<T: Copy + Eq + std::hash::Hash>(items: &[T]) -> HashMap<T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(*item).or_insert(0) += 1;
    }
    counts
}

/// Assert counts and desert alignment, independent of `Board::check`
fn assert_counts_and_alignment(board: &Board, size: BoardSize) {
    assert_eq!(board.len(), size.hex_count());
    assert_eq!(board.numbers().len(), size.hex_count());

    let resources = count(board.resources());
    for resource in ResourceType::ALL {
        assert_eq!(
            resources.get(&resource).copied().unwrap_or(0),
            resource.count(size),
            "{:?} count on {:?}",
            resource,
            size
        );
    }

    let tokens: Vec<u8> = board.numbers().iter().copied().filter(|n| *n != NO_TOKEN).collect();
    let tokens = count(&tokens);
    for token in TOKEN_VALUES {
        assert_eq!(
            tokens.get(&token).copied().unwrap_or(0),
            board::token_count(token, size),
            "token {} count on {:?}",
            token,
            size
        );
    }
    assert_eq!(tokens.get(&7), None);

    for (hex, (resource, number)) in board.resources().iter().zip(board.numbers()).enumerate() {
        assert_eq!(
            *resource == ResourceType::Desert,
            *number == NO_TOKEN,
            "hex {} misaligned",
            hex
        );
    }
}

#[test]
fn test_every_configuration_terminates_with_a_valid_board() {
    let mut rng = StdRng::seed_from_u64(2024);
    for size in BoardSize::ALL {
        for config in all_configs(size) {
            let config = config.with_max_number_attempts(DEFAULT_MAX_NUMBER_ATTEMPTS);
            for _ in 0..5 {
                match generate_board_with_rng(&config, &mut rng) {
                    Ok(board) => {
                        assert_counts_and_alignment(&board, size);
                        assert_eq!(board.check(&config), Ok(()), "{:?}", config);
                    }
                    Err(e) => panic!("{:?} failed: {}", config, e),
                }
            }
        }
    }
}

#[test]
fn test_unconstrained_classic_only_checks_counts() {
    for _ in 0..50 {
        let board = generate_board(&GenerationConfig::classic()).unwrap();
        assert_counts_and_alignment(&board, BoardSize::Classic);
        assert_eq!(board.desert_hexes().len(), 1);
    }
}

#[test]
fn test_no_same_resource_neighbors_over_1000_boards() {
    let config = GenerationConfig::classic().with_same_resource_can_touch(false);
    let topology = BoardSize::Classic.topology();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..1000 {
        let board = generate_board_with_rng(&config, &mut rng).unwrap();
        let resources = board.resources();
        let touching = topology
            .edges()
            .filter(|&(a, b)| resources[a] == resources[b])
            .count();
        assert_eq!(touching, 0);
    }
}

#[test]
fn test_no_adjacent_six_and_eight() {
    let config = GenerationConfig::classic().with_eight_six_can_touch(false);
    let topology = BoardSize::Classic.topology();
    let mut rng = StdRng::seed_from_u64(68);

    for _ in 0..200 {
        let board = generate_board_with_rng(&config, &mut rng).unwrap();
        let numbers = board.numbers();
        for (a, b) in topology.edges() {
            let red = |n: u8| n == 6 || n == 8;
            assert!(
                !(red(numbers[a]) && red(numbers[b])),
                "Found adjacent {} and {} at hexes {} and {}",
                numbers[a],
                numbers[b],
                a,
                b
            );
        }
    }
}

#[test]
fn test_no_adjacent_two_and_twelve_on_extension() {
    let config = GenerationConfig::extension().with_two_twelve_can_touch(false);
    let topology = BoardSize::Extension.topology();
    let mut rng = StdRng::seed_from_u64(212);

    for _ in 0..200 {
        let board = generate_board_with_rng(&config, &mut rng).unwrap();
        let numbers = board.numbers();
        for (a, b) in topology.edges() {
            let rare = |n: u8| n == 2 || n == 12;
            assert!(!(rare(numbers[a]) && rare(numbers[b])));
        }
    }
}

#[test]
fn test_no_equal_neighbors_on_extension() {
    let config = GenerationConfig::extension().with_same_number_can_touch(false);
    let topology = BoardSize::Extension.topology();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
        let board = generate_board_with_rng(&config, &mut rng).unwrap();
        let numbers = board.numbers();
        for (a, b) in topology.edges() {
            if numbers[a] != NO_TOKEN {
                assert_ne!(numbers[a], numbers[b], "hexes {} and {}", a, b);
            }
        }
    }
}

#[test]
fn test_seeded_generation_is_reproducible() {
    for size in BoardSize::ALL {
        for config in all_configs(size) {
            let first = generate_board_with_rng(&config, &mut StdRng::seed_from_u64(42));
            let second = generate_board_with_rng(&config, &mut StdRng::seed_from_u64(42));
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_generation_produces_different_boards() {
    let mut rng = StdRng::seed_from_u64(1);
    let config = GenerationConfig::classic();
    let first = generate_board_with_rng(&config, &mut rng).unwrap();

    let found_different =
        (0..10).any(|_| generate_board_with_rng(&config, &mut rng).unwrap() != first);
    assert!(found_different, "Board generation should produce different boards");
}

#[test]
fn test_topologies_are_symmetric() {
    for size in BoardSize::ALL {
        let topology = size.topology();
        assert_eq!(topology.validate(), Ok(()));
        for hex in 0..topology.len() {
            assert!(topology.neighbors(hex).len() <= 6);
            for &n in topology.neighbors(hex) {
                assert_ne!(n, hex);
                assert!(topology.neighbors(n).contains(&hex));
            }
        }
    }
}

#[test]
fn test_full_session_flow() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut session = GameSession::with_config(
        GenerationConfig::extension()
            .with_same_resource_can_touch(false)
            .with_eight_six_can_touch(false),
    );

    session.regenerate(&mut rng).unwrap();
    session.start_game().unwrap();

    let mut saw_robber = false;
    for _ in 0..500 {
        let roll = session.roll_dice(&mut rng).unwrap();
        if roll.total == ROBBER_NUMBER {
            saw_robber = true;
            let waves = session.robber_waves();
            assert_eq!(waves[0].len(), 2, "extension boards have two deserts");
            assert_eq!(waves.iter().map(Vec::len).sum::<usize>(), 30);
        } else {
            let expected = board::token_count(roll.total, BoardSize::Extension);
            assert_eq!(session.highlighted_hexes().len(), expected);
        }
    }
    assert!(saw_robber);

    let stored = serde_json::to_string(&session.to_json()).unwrap();
    let restored = GameSession::from_json(serde_json::from_str(&stored).unwrap()).unwrap();
    assert_eq!(restored.board(), session.board());
    assert!(restored.game_started());

    session.end_game();
    assert_eq!(session.selected_number(), 0);
}
