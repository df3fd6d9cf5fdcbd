//! Text rendering of a board and session.

use catan_board::{Board, GameSession, HexTopology, ResourceType, NO_TOKEN};
use std::fmt::Write;

/// Characters per half-hex of indent; a cell is two of these wide.
const HALF_CELL: usize = 4;

fn abbreviation(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Sheep => "Sh",
        ResourceType::Wood => "Wd",
        ResourceType::Wheat => "Wh",
        ResourceType::Brick => "Br",
        ResourceType::Ore => "Or",
        ResourceType::Desert => "De",
    }
}

/// Draw the board row by row. Hexes in `highlighted` are wrapped in `*`
/// instead of brackets.
pub fn render_board(board: &Board, topology: &HexTopology, highlighted: &[usize]) -> String {
    let mut out = String::new();
    let mut hex = 0;

    for &(indent, count) in topology.rows() {
        out.push_str(&" ".repeat(indent * HALF_CELL));
        for _ in 0..count {
            let (open, close) = if highlighted.contains(&hex) {
                ('*', '*')
            } else {
                ('[', ']')
            };
            let number = match board.numbers().get(hex).copied() {
                Some(NO_TOKEN) | None => "--".to_string(),
                Some(n) => n.to_string(),
            };
            let resource = board
                .resources()
                .get(hex)
                .map(|r| abbreviation(*r))
                .unwrap_or("??");
            // Seven characters plus a separating space fills two half-cells
            let _ = write!(out, "{}{} {:>2}{} ", open, resource, number, close);
            hex += 1;
        }
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
    }
    out
}

/// One-screen summary of a session
pub fn render_session(session: &GameSession) -> String {
    let config = session.config();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:?} board | same resource: {} | 6&8: {} | 2&12: {} | same number: {}",
        config.board_size,
        touch(config.same_resource_can_touch),
        touch(config.eight_six_can_touch),
        touch(config.two_twelve_can_touch),
        touch(config.same_number_can_touch),
    );
    let _ = writeln!(
        out,
        "game {} | manual dice {} | selected: {}",
        if session.game_started() { "running" } else { "stopped" },
        if session.manual_dice() { "on" } else { "off" },
        match session.selected_number() {
            0 => "none".to_string(),
            n => n.to_string(),
        },
    );

    match session.board() {
        Some(board) => {
            out.push('\n');
            let topology = config.board_size.topology();
            out.push_str(&render_board(board, topology, &session.highlighted_hexes()));
            let waves = session.robber_waves();
            if !waves.is_empty() {
                let _ = writeln!(out, "\nRobber! spreading from desert: {:?}", waves);
            }
        }
        None => out.push_str("\nNo board generated yet\n"),
    }
    out
}

fn touch(allowed: bool) -> &'static str {
    if allowed {
        "may touch"
    } else {
        "apart"
    }
}
