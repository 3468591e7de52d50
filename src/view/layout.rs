use maud::{Markup, html};

use crate::HTMX_PATH;

/// Page shell shared by every screen: stylesheet, htmx, top navigation.
#[must_use]
pub fn render_page(title: &str, content: Markup) -> Markup {
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            link rel="stylesheet" type="text/css" href="/static/styles.css";
            title { (title) }
            script src=(HTMX_PATH) defer {}
        }
        body {
            nav class="topnav" {
                a href="/" { "Rounds" }
                a href="/courses" { "Courses" }
                a href="/players" { "Players" }
                a href="/settings" { "Settings" }
            }
            h1 { (title) }
            (content)
        }
    }
}

/// Error page for missing rounds and rejected input.
#[must_use]
pub fn render_message_page(title: &str, message: &str) -> Markup {
    render_page(
        title,
        html! {
            p class="notice" { (message) }
            p { a href="/" { "Back to rounds" } }
        },
    )
}
