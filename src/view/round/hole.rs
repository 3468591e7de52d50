use chrono::NaiveDateTime;
use maud::{Markup, html};
use serde_json::json;

use crate::model::{Round, format_time_ago_for_round_view};
use crate::scoring::order::{hitting_order, score_or_zero};
use crate::scoring::stats::{format_to_par, score_to_par, total_score, total_to_par};
use crate::view::layout::render_page;

fn stepper_button(round: &Round, player: &str, hole: u32, action: &str, label: &str) -> Markup {
    let vals = json!({
        "player": player,
        "hole": hole,
        "action": action,
    })
    .to_string();
    html! {
        button class="stepper"
            hx-post=(format!("/round/{}/score", round.round_id))
            hx-vals=(vals)
            hx-target="#hole-panel"
            hx-swap="innerHTML" { (label) }
    }
}

fn par_chip(round: &Round, hole: u32) -> Markup {
    match round.pars {
        Some(_) => {
            let value = round
                .par_for_hole(hole)
                .unwrap_or_else(|| round.game_mode.default_par());
            html! {
                form class="par-edit"
                    hx-post=(format!("/round/{}/par", round.round_id))
                    hx-target="#hole-panel"
                    hx-swap="innerHTML" {
                    label for="par-input" { "Par" }
                    input id="par-input" type="number" name="par" min="1" max="12" value=(value);
                    input type="hidden" name="hole" value=(hole);
                    button type="submit" { "Save" }
                }
            }
        }
        None => html! { span class="par-chip" { "Par -" } },
    }
}

/// The scoring panel for one hole: tee order, steppers, running totals.
/// Swapped in place by the score and par forms.
#[must_use]
pub fn render_hole_fragment(round: &Round, hole: u32, last_saved: NaiveDateTime) -> Markup {
    let order = hitting_order(round, hole);
    let saved_ago = format_time_ago_for_round_view(
        chrono::Utc::now().naive_utc().signed_duration_since(last_saved),
    );

    html! {
        div class="hole-header" {
            h2 { "Hole " (hole) " of " (round.holes) }
            (par_chip(round, hole))
        }

        table class="styled-table" {
            thead {
                tr {
                    th { "ORDER" }
                    th { "PLAYER" }
                    th { "SCORE" }
                    th { "" }
                    th { "TOTAL" }
                    th { "TO PAR" }
                }
            }
            tbody {
                @for (position, player) in order.iter().enumerate() {
                    @let strokes = score_or_zero(round, player, hole);
                    @let row_class = (position == 0).then_some("first-up");
                    tr class=[row_class] {
                        td { (position + 1) }
                        td {
                            (player)
                            @if round.game_mode.is_mini_golf() && strokes == 1 {
                                " " span class="chip chip-ace" { "Hole-in-one!" }
                            }
                        }
                        td class="score-cell" {
                            @if strokes == 0 { "-" } @else { (strokes) }
                        }
                        td class="stepper-cell" {
                            (stepper_button(round, player, hole, "dec", "-"))
                            (stepper_button(round, player, hole, "inc", "+"))
                        }
                        td { (total_score(round, player)) }
                        td {
                            @match round.par_for_hole(hole) {
                                Some(par) if strokes > 0 => {
                                    (format_to_par(score_to_par(strokes, par)))
                                    @if let Some(diff) = total_to_par(round, player) {
                                        " (" (format_to_par(diff)) " overall)"
                                    }
                                }
                                _ => { "-" }
                            }
                        }
                    }
                }
            }
        }

        div class="hole-nav" {
            @if hole > 1 {
                a class="button" href=(format!("/round/{}?hole={}", round.round_id, hole - 1)) { "Previous" }
            }
            @if hole < round.holes {
                a class="button" href=(format!("/round/{}?hole={}", round.round_id, hole + 1)) { "Next" }
            } @else if !round.is_finished {
                form method="post" action=(format!("/round/{}/finish", round.round_id)) {
                    button type="submit" class="button" { "Finish round" }
                }
            }
        }

        @if round.is_finished {
            p class="notice" { "This round is finished." }
        }

        p class="saved-line" { "Saved " (saved_ago) }
    }
}

#[must_use]
pub fn render_round_page(round: &Round, hole: u32, last_saved: NaiveDateTime) -> Markup {
    render_page(
        &round.name,
        html! {
            div class="round-links" {
                a href=(format!("/round/{}/scorecard", round.round_id)) { "Scorecard" }
                a href=(format!("/round/{}/settings", round.round_id)) { "Round settings" }
            }
            div id="hole-panel" {
                (render_hole_fragment(round, hole, last_saved))
            }
        },
    )
}
