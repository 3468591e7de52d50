use maud::{Markup, html};

use crate::model::{AppSettings, Course, GameMode, Player};
use crate::view::layout::render_page;

/// The new-round form. Profiles show as checkboxes; extra names can be
/// typed in comma-separated. Picking a course overrides the hole count and
/// brings its pars along.
#[must_use]
pub fn render_new_round_page(
    players: &[Player],
    courses: &[Course],
    settings: AppSettings,
    notice: Option<&str>,
) -> Markup {
    render_page(
        "New round",
        html! {
            @if let Some(notice) = notice {
                p class="notice" { (notice) }
            }
            form class="details-form" method="post" action="/new" {
                label for="round-name" { "Name" }
                input id="round-name" type="text" name="name" placeholder="Saturday round" required;

                fieldset {
                    legend { "Game mode" }
                    label {
                        input type="radio" name="mode" value="golf"
                            checked[settings.default_game_mode == GameMode::Golf];
                        " Golf"
                    }
                    label {
                        input type="radio" name="mode" value="minigolf"
                            checked[settings.default_game_mode == GameMode::MiniGolf];
                        " Mini golf"
                    }
                }

                label for="round-holes" { "Holes" }
                input id="round-holes" type="number" name="holes" min="1" max="72" value="18";

                @if !courses.is_empty() {
                    label for="round-course" { "Course (optional, sets holes and pars)" }
                    select id="round-course" name="course_id" {
                        option value="0" selected { "No course" }
                        @for course in courses {
                            option value=(course.course_id) {
                                (course.name) " (" (course.holes) " holes)"
                            }
                        }
                    }
                }

                fieldset {
                    legend { "Players (tee order = order added)" }
                    @if players.is_empty() {
                        p class="notice" { "No saved profiles. Type names below." }
                    }
                    @for player in players {
                        label {
                            input type="checkbox"
                                name=(format!("player_{}", player.player_id))
                                value=(player.name);
                            " " (player.name)
                        }
                    }
                    label for="extra-players" { "More players (comma-separated)" }
                    input id="extra-players" type="text" name="extra_players" placeholder="Alice, Bob";
                }

                button type="submit" class="button" { "Start round" }
            }
        },
    )
}
