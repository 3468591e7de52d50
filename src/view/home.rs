use maud::{Markup, html};

use crate::model::{AppSettings, GameMode, Round, format_round_date};
use crate::scoring::stats::{format_to_par, holes_played, leaders, progress, total_score, total_to_par};
use crate::view::layout::render_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeFilter {
    #[default]
    All,
    Golf,
    MiniGolf,
}

impl ModeFilter {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input {
            "golf" => Self::Golf,
            "minigolf" => Self::MiniGolf,
            _ => Self::All,
        }
    }

    #[must_use]
    pub fn includes(self, round: &Round) -> bool {
        match self {
            Self::All => true,
            Self::Golf => round.game_mode == GameMode::Golf,
            Self::MiniGolf => round.game_mode == GameMode::MiniGolf,
        }
    }
}

fn leader_line(round: &Round) -> String {
    let leading = leaders(round);
    if leading.is_empty() {
        return "No scores yet".to_string();
    }

    let first = &leading[0];
    let detail = match total_to_par(round, first) {
        Some(diff) => format_to_par(diff),
        None => format!("{} strokes", total_score(round, first)),
    };
    format!("Leading: {} ({})", leading.join(", "), detail)
}

fn render_round_card(round: &Round, show_mode_chip: bool) -> Markup {
    let played = holes_played(round);
    let pct = progress(round) * 100.0;
    html! {
        div class="round-card" {
            div class="round-card-head" {
                a class="round-title" href=(format!("/round/{}", round.round_id)) { (round.name) }
                @if round.is_finished {
                    span class="chip chip-finished" { "Finished" }
                } @else {
                    span class="chip chip-active" { "In progress" }
                }
                @if show_mode_chip {
                    span class="chip" { (round.game_mode.label()) }
                }
            }
            p class="round-meta" {
                (format_round_date(round.date))
                " · " (round.holes) " holes"
                " · " (round.player_names.len()) " players"
            }
            div class="progress-track" {
                div class="progress-fill" style=(format!("width: {pct:.0}%")) {}
            }
            p class="round-meta" {
                (played) "/" (round.holes) " holes played · " (leader_line(round))
            }
            div class="round-card-actions" {
                a href=(format!("/round/{}/scorecard", round.round_id)) { "Scorecard" }
                form method="post" action=(format!("/round/{}/delete", round.round_id)) {
                    button type="submit" class="linklike danger" { "Delete" }
                }
            }
        }
    }
}

fn render_tabs(active: ModeFilter) -> Markup {
    let tab_class = |tab: ModeFilter| {
        if tab == active {
            "tab tab-active"
        } else {
            "tab"
        }
    };
    html! {
        div class="tabs" {
            a class=(tab_class(ModeFilter::All)) href="/" { "All" }
            a class=(tab_class(ModeFilter::Golf)) href="/?mode=golf" { "Golf" }
            a class=(tab_class(ModeFilter::MiniGolf)) href="/?mode=minigolf" { "Mini golf" }
        }
    }
}

#[must_use]
pub fn render_home_page(rounds: &[Round], settings: AppSettings, filter: ModeFilter) -> Markup {
    let visible: Vec<&Round> = rounds.iter().filter(|r| filter.includes(r)).collect();

    render_page(
        "Rounds",
        html! {
            div class="actions" {
                a class="button" href="/new" { "New round" }
            }
            @if settings.show_tabs_on_home {
                (render_tabs(filter))
            }
            @if visible.is_empty() {
                p class="notice" { "No rounds yet. Start one with the button above." }
            } @else {
                div class="round-list" {
                    @for round in &visible {
                        (render_round_card(round, !settings.show_tabs_on_home))
                    }
                }
            }
        },
    )
}
