use std::cmp::Ordering;

use crate::model::Round;

/// Tee order for a 1-based hole number.
///
/// Hole 1 plays in the order players were added. Every later hole plays
/// best-score-first: players are compared on the previous hole, and ties
/// walk back one hole at a time until a hole separates them. Players still
/// tied after hole 1 keep their original relative order (the sort is
/// stable).
///
/// A hole with no recorded score compares as 0 strokes, so a player who
/// skipped a hole sorts ahead of everyone who played it. Tests pin this.
#[must_use]
pub fn hitting_order(round: &Round, hole_number: u32) -> Vec<String> {
    let mut order = round.player_names.clone();
    if hole_number <= 1 {
        return order;
    }

    let last_hole = hole_number - 1;
    order.sort_by(|a, b| compare_players_through_hole(round, a, b, last_hole));
    order
}

/// Compare two players on `last_hole`, walking backward on ties.
fn compare_players_through_hole(round: &Round, a: &str, b: &str, last_hole: u32) -> Ordering {
    let mut hole = last_hole;
    while hole >= 1 {
        let score_a = score_or_zero(round, a, hole);
        let score_b = score_or_zero(round, b, hole);
        if score_a != score_b {
            return score_a.cmp(&score_b);
        }
        hole -= 1;
    }
    Ordering::Equal
}

/// Strokes recorded for a player on a hole, 0 when nothing was recorded.
#[must_use]
pub fn score_or_zero(round: &Round, player: &str, hole: u32) -> u32 {
    round
        .scores
        .get(player)
        .and_then(|holes| holes.get(&hole))
        .copied()
        .unwrap_or(0)
}
