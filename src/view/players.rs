use maud::{Markup, html};

use crate::model::{CareerStats, Player, Round, format_round_date};
use crate::view::layout::render_page;

fn stats_cells(stats: CareerStats) -> Markup {
    html! {
        td { (stats.rounds) }
        td { (stats.holes_scored) }
        td { (stats.holes_in_one) }
    }
}

#[must_use]
pub fn render_players_page(
    players: &[(Player, CareerStats)],
    notice: Option<&str>,
) -> Markup {
    render_page(
        "Players",
        html! {
            @if let Some(notice) = notice {
                p class="notice" { (notice) }
            }
            @if players.is_empty() {
                p class="notice" { "No player profiles yet. Names typed into a round work too; profiles just save retyping them." }
            } @else {
                table class="styled-table" {
                    thead {
                        tr {
                            th { "PLAYER" }
                            th { "ROUNDS" }
                            th { "HOLES" }
                            th { "ACES" }
                            th { "" }
                        }
                    }
                    tbody {
                        @for (player, stats) in players {
                            tr {
                                td {
                                    a href=(format!("/players/{}", player.player_id)) { (player.name) }
                                }
                                (stats_cells(*stats))
                                td {
                                    form method="post" action=(format!("/players/{}/delete", player.player_id)) {
                                        button type="submit" class="linklike danger" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            h2 { "Add a player" }
            form class="details-form" method="post" action="/players" {
                label for="player-name" { "Name" }
                input id="player-name" type="text" name="name" required;
                button type="submit" class="button" { "Save player" }
            }
        },
    )
}

/// One profile: career numbers plus the rounds this player appeared in.
#[must_use]
pub fn render_player_page(player: &Player, stats: CareerStats, rounds: &[&Round]) -> Markup {
    render_page(
        &player.name,
        html! {
            table class="styled-table" {
                thead {
                    tr {
                        th { "ROUNDS" }
                        th { "HOLES SCORED" }
                        th { "HOLES-IN-ONE" }
                    }
                }
                tbody {
                    tr { (stats_cells(stats)) }
                }
            }

            h2 { "Rounds played" }
            @if rounds.is_empty() {
                p class="notice" { "Not part of any round yet." }
            } @else {
                table class="styled-table" {
                    thead {
                        tr {
                            th { "ROUND" }
                            th { "DATE" }
                            th { "MODE" }
                        }
                    }
                    tbody {
                        @for round in rounds {
                            tr {
                                td {
                                    a href=(format!("/round/{}", round.round_id)) { (round.name) }
                                }
                                td { (format_round_date(round.date)) }
                                td { (round.game_mode.label()) }
                            }
                        }
                    }
                }
            }
        },
    )
}
