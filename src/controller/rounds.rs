use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::PartrackError;
use crate::scoring::engine::{ReorderDirection, RoundScoringEngine};
use crate::storage::{RoundLocks, SqlStorage, Storage};
use crate::view::home::{ModeFilter, render_home_page};
use crate::view::layout::render_message_page;
use crate::view::round::{render_hole_fragment, render_round_details_page, render_round_page, render_scorecard_page};

fn html_response(markup: maud::Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.to_string()))
        .finish()
}

fn error_response(e: &PartrackError) -> HttpResponse {
    match e {
        PartrackError::NotFound(what) => HttpResponse::NotFound()
            .content_type("text/html")
            .body(render_message_page("Not found", &format!("No such {what}.")).into_string()),
        PartrackError::Invalid(msg) | PartrackError::Parse(msg) => {
            HttpResponse::BadRequest().json(json!({"error": msg}))
        }
        other => HttpResponse::InternalServerError().json(json!({"error": other.to_string()})),
    }
}

fn wants_json(query: &HashMap<String, String>) -> bool {
    matches!(query.get("json").map(String::as_str), Some("1" | "true"))
}

pub async fn home(
    query: web::Query<HashMap<String, String>>,
    storage: Data<SqlStorage>,
) -> impl Responder {
    let storage = storage.get_ref();

    let rounds = match storage.list_rounds().await {
        Ok(rounds) => rounds,
        Err(e) => {
            eprintln!("Error listing rounds: {e}");
            return HttpResponse::InternalServerError().json(json!({"error": e.to_string()}));
        }
    };

    if wants_json(&query) {
        return HttpResponse::Ok().json(rounds);
    }

    let settings = match storage.get_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            return HttpResponse::InternalServerError().json(json!({"error": e.to_string()}));
        }
    };

    let filter = query
        .get("mode")
        .map(|mode| ModeFilter::parse(mode))
        .unwrap_or_default();
    html_response(render_home_page(&rounds, settings, filter))
}

/// Clamp the ?hole= query parameter into the round, defaulting to hole 1.
fn requested_hole(query: &HashMap<String, String>, holes: u32) -> u32 {
    query
        .get("hole")
        .and_then(|hole| hole.trim().parse::<u32>().ok())
        .unwrap_or(1)
        .clamp(1, holes.max(1))
}

pub async fn round_page(
    path: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
    storage: Data<SqlStorage>,
) -> impl Responder {
    let round_id = path.into_inner();

    match storage.get_round(round_id).await {
        Ok(Some(stored)) => {
            if wants_json(&query) {
                return HttpResponse::Ok().json(&stored.round);
            }
            let hole = requested_hole(&query, stored.round.holes);
            html_response(render_round_page(&stored.round, hole, stored.last_saved))
        }
        Ok(None) => error_response(&PartrackError::NotFound(format!("round {round_id}"))),
        Err(e) => error_response(&PartrackError::from(e)),
    }
}

/// The hole panel alone, for htmx swaps.
pub async fn round_hole_fragment(
    path: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
    storage: Data<SqlStorage>,
) -> impl Responder {
    let round_id = path.into_inner();

    match storage.get_round(round_id).await {
        Ok(Some(stored)) => {
            let hole = requested_hole(&query, stored.round.holes);
            html_response(render_hole_fragment(&stored.round, hole, stored.last_saved))
        }
        Ok(None) => error_response(&PartrackError::NotFound(format!("round {round_id}"))),
        Err(e) => error_response(&PartrackError::from(e)),
    }
}

#[derive(Deserialize)]
pub struct ScoreForm {
    pub player: String,
    pub hole: u32,
    pub action: String,
    pub strokes: Option<u32>,
}

pub async fn set_score(
    path: web::Path<i64>,
    form: web::Form<ScoreForm>,
    storage: Data<SqlStorage>,
    locks: Data<RoundLocks>,
) -> impl Responder {
    let round_id = path.into_inner();
    let engine = RoundScoringEngine::new(storage.get_ref(), locks.get_ref());

    let result = match form.action.as_str() {
        "inc" => engine.adjust_score(round_id, &form.player, form.hole, 1).await,
        "dec" => engine.adjust_score(round_id, &form.player, form.hole, -1).await,
        "set" => match form.strokes {
            Some(strokes) => engine.set_score(round_id, &form.player, form.hole, strokes).await,
            None => Err(PartrackError::Invalid(
                "strokes is required for action=set".to_string(),
            )),
        },
        other => Err(PartrackError::Invalid(format!("unknown action '{other}'"))),
    };

    match result {
        Ok(round) => html_response(render_hole_fragment(
            &round,
            form.hole.clamp(1, round.holes.max(1)),
            chrono::Utc::now().naive_utc(),
        )),
        Err(e) => {
            eprintln!("Error recording score: {e}");
            error_response(&e)
        }
    }
}

#[derive(Deserialize)]
pub struct ParForm {
    pub hole: u32,
    pub par: u32,
}

pub async fn set_par(
    path: web::Path<i64>,
    form: web::Form<ParForm>,
    storage: Data<SqlStorage>,
    locks: Data<RoundLocks>,
) -> impl Responder {
    let round_id = path.into_inner();
    if form.hole < 1 || form.par < 1 {
        return error_response(&PartrackError::Invalid(
            "hole and par must be at least 1".to_string(),
        ));
    }

    let engine = RoundScoringEngine::new(storage.get_ref(), locks.get_ref());
    match engine
        .set_par(round_id, (form.hole - 1) as usize, form.par)
        .await
    {
        Ok(round) => html_response(render_hole_fragment(
            &round,
            form.hole.clamp(1, round.holes.max(1)),
            chrono::Utc::now().naive_utc(),
        )),
        Err(e) => {
            eprintln!("Error setting par: {e}");
            error_response(&e)
        }
    }
}

#[derive(Deserialize)]
pub struct DetailsForm {
    pub name: String,
    pub date: String,
    pub holes: u32,
}

fn parse_form_date(input: &str) -> Result<i64, PartrackError> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PartrackError::Parse(format!("bad date '{input}': {e}")))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| PartrackError::Parse(format!("bad date '{input}'")))?;
    Ok(midnight.and_utc().timestamp_millis())
}

pub async fn update_round_details(
    path: web::Path<i64>,
    form: web::Form<DetailsForm>,
    storage: Data<SqlStorage>,
    locks: Data<RoundLocks>,
) -> impl Responder {
    let round_id = path.into_inner();

    let date = match parse_form_date(&form.date) {
        Ok(date) => date,
        Err(e) => return error_response(&e),
    };

    let engine = RoundScoringEngine::new(storage.get_ref(), locks.get_ref());
    match engine
        .update_details(round_id, &form.name, date, form.holes)
        .await
    {
        Ok(_) => see_other(&format!("/round/{round_id}/settings")),
        Err(e) => {
            eprintln!("Error updating round details: {e}");
            error_response(&e)
        }
    }
}

#[derive(Deserialize)]
pub struct OrderForm {
    pub player: String,
    pub direction: String,
}

pub async fn move_player(
    path: web::Path<i64>,
    form: web::Form<OrderForm>,
    storage: Data<SqlStorage>,
    locks: Data<RoundLocks>,
) -> impl Responder {
    let round_id = path.into_inner();

    let direction = match ReorderDirection::parse(&form.direction) {
        Ok(direction) => direction,
        Err(e) => return error_response(&e),
    };

    let engine = RoundScoringEngine::new(storage.get_ref(), locks.get_ref());
    match engine.move_player(round_id, &form.player, direction).await {
        Ok(_) => see_other(&format!("/round/{round_id}/settings")),
        Err(e) => {
            eprintln!("Error reordering players: {e}");
            error_response(&e)
        }
    }
}

pub async fn finish_round(
    path: web::Path<i64>,
    storage: Data<SqlStorage>,
    locks: Data<RoundLocks>,
) -> impl Responder {
    let round_id = path.into_inner();
    let engine = RoundScoringEngine::new(storage.get_ref(), locks.get_ref());
    match engine.finish(round_id).await {
        Ok(_) => see_other("/"),
        Err(e) => {
            eprintln!("Error finishing round: {e}");
            error_response(&e)
        }
    }
}

pub async fn delete_round(
    path: web::Path<i64>,
    storage: Data<SqlStorage>,
    locks: Data<RoundLocks>,
) -> impl Responder {
    let round_id = path.into_inner();
    let engine = RoundScoringEngine::new(storage.get_ref(), locks.get_ref());
    match engine.delete(round_id).await {
        Ok(()) => see_other("/"),
        Err(e) => {
            eprintln!("Error deleting round: {e}");
            error_response(&e)
        }
    }
}

pub async fn scorecard_page(path: web::Path<i64>, storage: Data<SqlStorage>) -> impl Responder {
    let round_id = path.into_inner();
    match storage.get_round(round_id).await {
        Ok(Some(stored)) => html_response(render_scorecard_page(&stored.round)),
        Ok(None) => error_response(&PartrackError::NotFound(format!("round {round_id}"))),
        Err(e) => error_response(&PartrackError::from(e)),
    }
}

pub async fn round_settings_page(
    path: web::Path<i64>,
    storage: Data<SqlStorage>,
) -> impl Responder {
    let round_id = path.into_inner();
    match storage.get_round(round_id).await {
        Ok(Some(stored)) => html_response(render_round_details_page(&stored.round)),
        Ok(None) => error_response(&PartrackError::NotFound(format!("round {round_id}"))),
        Err(e) => error_response(&PartrackError::from(e)),
    }
}
