use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::model::{AppSettings, GameMode};
use crate::storage::{SqlStorage, Storage};
use crate::view::settings::render_settings_page;

pub async fn settings(storage: Data<SqlStorage>) -> impl Responder {
    match storage.get_settings().await {
        Ok(settings) => HttpResponse::Ok()
            .content_type("text/html")
            .body(render_settings_page(settings, None).into_string()),
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

/// An unchecked checkbox is simply absent from the form body, so the
/// handler reads the whole map instead of a typed struct.
pub async fn save_settings(
    form: web::Form<HashMap<String, String>>,
    storage: Data<SqlStorage>,
) -> impl Responder {
    let default_game_mode = match form.get("default_mode").map(String::as_str) {
        Some("minigolf") => GameMode::MiniGolf,
        _ => GameMode::Golf,
    };
    let show_tabs_on_home = form.contains_key("show_tabs");

    let settings = AppSettings {
        default_game_mode,
        show_tabs_on_home,
    };
    match storage.save_settings(settings).await {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/html")
            .body(render_settings_page(settings, Some("Saved.")).into_string()),
        Err(e) => {
            eprintln!("Error saving settings: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}
