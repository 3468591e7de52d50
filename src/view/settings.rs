use maud::{Markup, html};

use crate::model::{AppSettings, GameMode};
use crate::view::layout::render_page;

#[must_use]
pub fn render_settings_page(settings: AppSettings, notice: Option<&str>) -> Markup {
    render_page(
        "Settings",
        html! {
            @if let Some(notice) = notice {
                p class="notice" { (notice) }
            }
            form class="details-form" method="post" action="/settings" {
                fieldset {
                    legend { "Default game mode for new rounds" }
                    label {
                        input type="radio" name="default_mode" value="golf"
                            checked[settings.default_game_mode == GameMode::Golf];
                        " Golf"
                    }
                    label {
                        input type="radio" name="default_mode" value="minigolf"
                            checked[settings.default_game_mode == GameMode::MiniGolf];
                        " Mini golf"
                    }
                }
                label {
                    input type="checkbox" name="show_tabs" value="1"
                        checked[settings.show_tabs_on_home];
                    " Show golf / mini golf tabs on the rounds list"
                }
                button type="submit" class="button" { "Save settings" }
            }
        },
    )
}
