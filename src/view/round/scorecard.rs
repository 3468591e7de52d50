use maud::{Markup, html};

use crate::model::Round;
use crate::scoring::stats::{format_to_par, total_score, total_to_par};
use crate::view::layout::render_page;

/// The classic paper grid: one row per hole, one column per player.
#[must_use]
pub fn render_scorecard_page(round: &Round) -> Markup {
    let par_total: Option<u32> = round
        .pars
        .as_deref()
        .map(|pars| pars.iter().take(round.holes as usize).sum());

    render_page(
        &format!("{} - Scorecard", round.name),
        html! {
            div class="round-links" {
                a href=(format!("/round/{}", round.round_id)) { "Back to scoring" }
            }
            table class="styled-table scorecard" {
                thead {
                    tr {
                        th { "HOLE" }
                        th { "PAR" }
                        @for player in &round.player_names {
                            th { (player) }
                        }
                    }
                }
                tbody {
                    @for hole in 1..=round.holes {
                        tr {
                            td { (hole) }
                            td {
                                @match round.par_for_hole(hole) {
                                    Some(par) => { (par) }
                                    None => { "-" }
                                }
                            }
                            @for player in &round.player_names {
                                @let strokes = round
                                    .scores
                                    .get(player)
                                    .and_then(|holes| holes.get(&hole))
                                    .copied()
                                    .unwrap_or(0);
                                td class="score-cell" {
                                    @if strokes == 0 { "-" } @else { (strokes) }
                                }
                            }
                        }
                    }
                    tr class="totals" {
                        td { "Total" }
                        td {
                            @match par_total {
                                Some(total) => { (total) }
                                None => { "-" }
                            }
                        }
                        @for player in &round.player_names {
                            td { (total_score(round, player)) }
                        }
                    }
                    @if round.pars.is_some() {
                        tr {
                            td { "To par" }
                            td { "" }
                            @for player in &round.player_names {
                                td {
                                    @match total_to_par(round, player) {
                                        Some(diff) => { (format_to_par(diff)) }
                                        None => { "-" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
