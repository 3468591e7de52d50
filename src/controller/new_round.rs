use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::model::{Course, DisplayName, GameMode};
use crate::scoring::engine::RoundScoringEngine;
use crate::storage::{RoundLocks, SqlStorage, Storage};
use crate::view::round::render_new_round_page;

async fn form_page(storage: &SqlStorage, notice: Option<&str>) -> Result<HttpResponse, String> {
    let (players, courses, settings) = futures::try_join!(
        storage.list_players(),
        storage.list_courses(),
        storage.get_settings(),
    )
    .map_err(|e| e.to_string())?;

    Ok(HttpResponse::Ok()
        .content_type("text/html")
        .body(render_new_round_page(&players, &courses, settings, notice).into_string()))
}

pub async fn new_round_page(storage: Data<SqlStorage>) -> impl Responder {
    match form_page(storage.get_ref(), None).await {
        Ok(resp) => resp,
        Err(e) => {
            eprintln!("Error loading new round form: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e}))
        }
    }
}

/// Pull the round roster out of the posted form: every checked profile, in
/// the order the profiles are listed, then any names typed into the
/// extra-players box. Duplicates collapse to the first occurrence.
fn roster_from_form(
    form: &HashMap<String, String>,
    profiles: &[crate::model::Player],
) -> Result<Vec<String>, String> {
    let mut roster: Vec<String> = Vec::new();

    for player in profiles {
        let key = format!("player_{}", player.player_id);
        if form.contains_key(&key) && !roster.contains(&player.name) {
            roster.push(player.name.clone());
        }
    }

    if let Some(extra) = form.get("extra_players") {
        for raw in extra.split(',') {
            if raw.trim().is_empty() {
                continue;
            }
            let name = DisplayName::parse(raw)?.into_string();
            if !roster.contains(&name) {
                roster.push(name);
            }
        }
    }

    Ok(roster)
}

fn template_from_course(course: &Course) -> (u32, Option<Vec<u32>>) {
    let pars = if course.pars.is_empty() {
        None
    } else {
        Some(course.pars.clone())
    };
    (course.holes, pars)
}

pub async fn create_round(
    form: web::Form<HashMap<String, String>>,
    storage: Data<SqlStorage>,
    locks: Data<RoundLocks>,
) -> impl Responder {
    let storage = storage.get_ref();
    let form = form.into_inner();

    let settings = match storage.get_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            return HttpResponse::InternalServerError().json(json!({"error": e.to_string()}));
        }
    };

    let game_mode = match form.get("mode").map(String::as_str) {
        Some("minigolf") => GameMode::MiniGolf,
        Some("golf") => GameMode::Golf,
        _ => settings.default_game_mode,
    };

    let name = form.get("name").map(String::as_str).unwrap_or("").trim().to_string();

    let profiles = match storage.list_players().await {
        Ok(profiles) => profiles,
        Err(e) => {
            eprintln!("Error listing players: {e}");
            return HttpResponse::InternalServerError().json(json!({"error": e.to_string()}));
        }
    };

    let roster = match roster_from_form(&form, &profiles) {
        Ok(roster) => roster,
        Err(notice) => return rerender(storage, &notice).await,
    };
    if roster.is_empty() {
        return rerender(storage, "Pick at least one player or type a name.").await;
    }

    let course_id = form
        .get("course_id")
        .and_then(|id| id.trim().parse::<i64>().ok())
        .unwrap_or(0);

    let (holes, pars) = if course_id > 0 {
        match storage.get_course(course_id).await {
            Ok(Some(course)) => template_from_course(&course),
            Ok(None) => return rerender(storage, "That course no longer exists.").await,
            Err(e) => {
                eprintln!("Error loading course {course_id}: {e}");
                return HttpResponse::InternalServerError().json(json!({"error": e.to_string()}));
            }
        }
    } else {
        let holes = form
            .get("holes")
            .and_then(|holes| holes.trim().parse::<u32>().ok())
            .unwrap_or(18);
        (holes, None)
    };

    let engine = RoundScoringEngine::new(storage, locks.get_ref());
    match engine
        .create_round(&name, holes, roster, pars, game_mode)
        .await
    {
        Ok(round) => HttpResponse::SeeOther()
            .insert_header(("Location", format!("/round/{}", round.round_id)))
            .finish(),
        Err(crate::error::PartrackError::Invalid(msg)) => rerender(storage, &msg).await,
        Err(e) => {
            eprintln!("Error creating round: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

async fn rerender(storage: &SqlStorage, notice: &str) -> HttpResponse {
    match form_page(storage, Some(notice)).await {
        Ok(resp) => resp,
        Err(e) => {
            eprintln!("Error re-rendering new round form: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e}))
        }
    }
}
