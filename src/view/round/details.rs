use chrono::DateTime;
use maud::{Markup, html};

use crate::model::Round;
use crate::view::layout::render_page;

fn date_input_value(epoch_millis: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_millis) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Round settings: rename, redate, resize, reorder the tee order, delete.
#[must_use]
pub fn render_round_details_page(round: &Round) -> Markup {
    render_page(
        &format!("{} - Settings", round.name),
        html! {
            div class="round-links" {
                a href=(format!("/round/{}", round.round_id)) { "Back to scoring" }
            }

            form class="details-form" method="post" action=(format!("/round/{}/details", round.round_id)) {
                label for="name-input" { "Name" }
                input id="name-input" type="text" name="name" value=(round.name) required;
                label for="date-input" { "Date" }
                input id="date-input" type="date" name="date" value=(date_input_value(round.date)) required;
                label for="holes-input" { "Holes" }
                input id="holes-input" type="number" name="holes" min="1" max="72" value=(round.holes) required;
                button type="submit" class="button" { "Save" }
            }
            p class="notice" {
                "Reducing the hole count hides scores past the new last hole; "
                "they come back if you raise it again."
            }

            h2 { "Tee order (hole 1)" }
            table class="styled-table" {
                tbody {
                    @for (position, player) in round.player_names.iter().enumerate() {
                        tr {
                            td { (position + 1) }
                            td { (player) }
                            td class="stepper-cell" {
                                form method="post" action=(format!("/round/{}/order", round.round_id)) {
                                    input type="hidden" name="player" value=(player);
                                    input type="hidden" name="direction" value="up";
                                    button type="submit" class="stepper" disabled[position == 0] { "Up" }
                                }
                                form method="post" action=(format!("/round/{}/order", round.round_id)) {
                                    input type="hidden" name="player" value=(player);
                                    input type="hidden" name="direction" value="down";
                                    button type="submit" class="stepper" disabled[position + 1 == round.player_names.len()] { "Down" }
                                }
                            }
                        }
                    }
                }
            }

            h2 { "Danger zone" }
            form method="post" action=(format!("/round/{}/delete", round.round_id)) {
                button type="submit" class="button danger" { "Delete this round" }
            }
        },
    )
}
