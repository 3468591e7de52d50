use ahash::RandomState;
use std::collections::HashMap;

use crate::model::{CareerStats, Round};

/// Highest hole number with at least one recorded score, ignoring entries
/// beyond the round's current hole count.
#[must_use]
pub fn holes_played(round: &Round) -> u32 {
    round
        .scores
        .values()
        .flat_map(|holes| holes.keys())
        .copied()
        .filter(|hole| (1..=round.holes).contains(hole))
        .max()
        .unwrap_or(0)
}

/// Sum of a player's strokes over the round's current holes. Players not on
/// the score sheet total 0.
#[must_use]
pub fn total_score(round: &Round, player: &str) -> u32 {
    round
        .scores
        .get(player)
        .map(|holes| {
            holes
                .iter()
                .filter(|(hole, _)| (1..=round.holes).contains(*hole))
                .map(|(_, strokes)| strokes)
                .sum()
        })
        .unwrap_or(0)
}

/// Players tied for the lowest total, in roster order. A round with no
/// recorded scores has no leader.
#[must_use]
pub fn leaders(round: &Round) -> Vec<String> {
    let any_scores = round
        .scores
        .values()
        .any(|holes| holes.keys().any(|hole| (1..=round.holes).contains(hole)));
    if !any_scores {
        return Vec::new();
    }

    let totals: HashMap<&str, u32, RandomState> = round
        .player_names
        .iter()
        .map(|player| (player.as_str(), total_score(round, player)))
        .collect();

    let Some(best) = totals.values().min().copied() else {
        return Vec::new();
    };

    round
        .player_names
        .iter()
        .filter(|player| totals.get(player.as_str()) == Some(&best))
        .cloned()
        .collect()
}

/// Fraction of the round played, in `[0, 1]`.
#[must_use]
pub fn progress(round: &Round) -> f32 {
    if round.holes == 0 {
        return 0.0;
    }
    holes_played(round) as f32 / round.holes as f32
}

/// Strokes relative to par; negative is under.
#[must_use]
pub fn score_to_par(strokes: u32, par: u32) -> i64 {
    i64::from(strokes) - i64::from(par)
}

/// Conventional leader-board wording for a to-par figure.
#[must_use]
pub fn format_to_par(diff: i64) -> String {
    match diff.cmp(&0) {
        std::cmp::Ordering::Equal => "E".to_string(),
        std::cmp::Ordering::Greater => format!("+{diff}"),
        std::cmp::Ordering::Less => diff.to_string(),
    }
}

/// A player's total measured against par over the holes they have scored.
/// None when the round has no pars or the player has no scores.
#[must_use]
pub fn total_to_par(round: &Round, player: &str) -> Option<i64> {
    round.pars.as_deref()?;
    let holes = round.scores.get(player)?;

    let mut diff: i64 = 0;
    let mut counted = false;
    for (hole, strokes) in holes {
        if !(1..=round.holes).contains(hole) {
            continue;
        }
        if let Some(par) = round.par_for_hole(*hole) {
            diff += score_to_par(*strokes, par);
            counted = true;
        }
    }
    counted.then_some(diff)
}

fn count_round_entries(round: &Round, stats: &mut CareerStats, player: Option<&str>) {
    for (name, holes) in &round.scores {
        if let Some(player) = player {
            if name != player {
                continue;
            }
        }
        for (hole, strokes) in holes {
            if !(1..=round.holes).contains(hole) {
                continue;
            }
            stats.holes_scored += 1;
            if round.game_mode.is_mini_golf() && *strokes == 1 {
                stats.holes_in_one += 1;
            }
        }
    }
}

/// Totals across every round. Holes-in-one are only counted in mini golf
/// rounds.
#[must_use]
pub fn career_stats(rounds: &[Round]) -> CareerStats {
    let mut stats = CareerStats {
        rounds: rounds.len() as u32,
        ..CareerStats::default()
    };
    for round in rounds {
        count_round_entries(round, &mut stats, None);
    }
    stats
}

/// Same totals restricted to rounds the named player was part of, counting
/// only that player's scores.
#[must_use]
pub fn player_career_stats(rounds: &[Round], player: &str) -> CareerStats {
    let mut stats = CareerStats::default();
    for round in rounds {
        if !round.player_names.iter().any(|name| name == player) {
            continue;
        }
        stats.rounds += 1;
        count_round_entries(round, &mut stats, Some(player));
    }
    stats
}
