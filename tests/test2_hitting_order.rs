use partrack::model::{GameMode, Round};
use partrack::scoring::order::hitting_order;
use std::collections::HashMap;

/// Build a round with the given roster and `(player, hole, strokes)` entries.
fn round_with_scores(players: &[&str], holes: u32, scores: &[(&str, u32, u32)]) -> Round {
    let mut round = Round {
        round_id: 1,
        name: "Test round".to_string(),
        date: 0,
        holes,
        player_names: players.iter().map(|s| (*s).to_string()).collect(),
        is_finished: false,
        scores: HashMap::new(),
        pars: None,
        game_mode: GameMode::Golf,
    };
    for (player, hole, strokes) in scores {
        round
            .scores
            .entry((*player).to_string())
            .or_default()
            .insert(*hole, *strokes);
    }
    round
}

#[test]
fn hole_one_always_returns_the_roster_order() {
    let round = round_with_scores(
        &["Alice", "Bob", "Carol"],
        9,
        &[
            ("Alice", 1, 7),
            ("Bob", 1, 2),
            ("Carol", 1, 5),
            ("Bob", 2, 1),
        ],
    );

    assert_eq!(
        hitting_order(&round, 1),
        vec!["Alice", "Bob", "Carol"],
        "Hole 1 must keep the order players were added in, whatever the scores say"
    );
}

#[test]
fn prior_hole_score_decides_the_next_hole() {
    let round = round_with_scores(
        &["Alice", "Bob", "Carol"],
        9,
        &[("Alice", 1, 4), ("Bob", 1, 5), ("Carol", 1, 3)],
    );

    assert_eq!(
        hitting_order(&round, 2),
        vec!["Carol", "Alice", "Bob"],
        "Hole 2 order should be ascending by hole 1 score"
    );
}

#[test]
fn ties_walk_back_to_the_first_differing_hole() {
    // Identical on holes 3 and 2; only hole 1 separates them.
    let round = round_with_scores(
        &["Alice", "Bob"],
        9,
        &[
            ("Alice", 1, 5),
            ("Bob", 1, 3),
            ("Alice", 2, 4),
            ("Bob", 2, 4),
            ("Alice", 3, 4),
            ("Bob", 3, 4),
        ],
    );

    assert_eq!(
        hitting_order(&round, 4),
        vec!["Bob", "Alice"],
        "Tied holes should fall back to the hole 1 scores"
    );
}

#[test]
fn the_most_recent_hole_outranks_earlier_ones() {
    // Alice won hole 1, Bob won hole 2. Hole 2 decides hole 3.
    let round = round_with_scores(
        &["Alice", "Bob"],
        3,
        &[
            ("Alice", 1, 4),
            ("Bob", 1, 5),
            ("Alice", 2, 6),
            ("Bob", 2, 3),
        ],
    );

    assert_eq!(hitting_order(&round, 2), vec!["Alice", "Bob"]);
    assert_eq!(
        hitting_order(&round, 3),
        vec!["Bob", "Alice"],
        "The immediately preceding hole is the primary key"
    );
}

#[test]
fn a_full_tie_keeps_the_roster_order() {
    let round = round_with_scores(
        &["Carol", "Alice", "Bob"],
        9,
        &[
            ("Carol", 1, 4),
            ("Alice", 1, 4),
            ("Bob", 1, 4),
            ("Carol", 2, 3),
            ("Alice", 2, 3),
            ("Bob", 2, 3),
        ],
    );

    assert_eq!(
        hitting_order(&round, 3),
        vec!["Carol", "Alice", "Bob"],
        "Players tied on every hole should stay in roster order"
    );
}

#[test]
fn an_unplayed_hole_counts_as_zero_and_sorts_first() {
    // Bob scored hole 1; Alice never did. Alice's missing score reads as 0,
    // which beats any real score.
    let round = round_with_scores(&["Bob", "Alice"], 9, &[("Bob", 1, 3)]);

    assert_eq!(
        hitting_order(&round, 2),
        vec!["Alice", "Bob"],
        "A missing score reads as 0 and sorts ahead of a played hole"
    );
}

#[test]
fn hole_unplayed_by_everyone_ties_back_to_roster_order() {
    let round = round_with_scores(&["Bob", "Alice"], 9, &[]);

    assert_eq!(
        hitting_order(&round, 2),
        vec!["Bob", "Alice"],
        "With no scores at all the roster order should come back unchanged"
    );
}

#[test]
fn order_is_pure_and_deterministic() {
    let round = round_with_scores(
        &["Alice", "Bob", "Carol"],
        9,
        &[
            ("Alice", 1, 4),
            ("Bob", 1, 4),
            ("Carol", 1, 2),
            ("Alice", 2, 3),
            ("Bob", 2, 5),
        ],
    );

    let before = serde_json::to_value(&round).expect("round should serialize");
    let first = hitting_order(&round, 3);
    let second = hitting_order(&round, 3);
    let after = serde_json::to_value(&round).expect("round should serialize");

    assert_eq!(first, second, "Two calls over the same round must agree");
    assert_eq!(before, after, "Computing the order must not change the round");
}

#[test]
fn scored_out_of_order_holes_still_compare() {
    // Hole 3 was scored before hole 2; asking for hole 4's order walks
    // back over the gap.
    let round = round_with_scores(
        &["Alice", "Bob"],
        9,
        &[("Alice", 3, 2), ("Bob", 3, 6), ("Bob", 1, 1)],
    );

    assert_eq!(
        hitting_order(&round, 4),
        vec!["Alice", "Bob"],
        "Hole 3 decides hole 4 even though hole 2 was skipped"
    );
}
