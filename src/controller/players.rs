use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::model::{CareerStats, DisplayName, Player, Round};
use crate::scoring::stats::player_career_stats;
use crate::storage::{SqlStorage, Storage};
use crate::view::layout::render_message_page;
use crate::view::players::{render_player_page, render_players_page};

async fn players_page(storage: &SqlStorage, notice: Option<&str>) -> HttpResponse {
    let listing = async {
        let (players, rounds) =
            futures::try_join!(storage.list_players(), storage.list_rounds())?;
        let with_stats: Vec<(Player, CareerStats)> = players
            .into_iter()
            .map(|player| {
                let stats = player_career_stats(&rounds, &player.name);
                (player, stats)
            })
            .collect();
        Ok::<_, crate::storage::StorageError>(with_stats)
    };

    match listing.await {
        Ok(with_stats) => HttpResponse::Ok()
            .content_type("text/html")
            .body(render_players_page(&with_stats, notice).into_string()),
        Err(e) => {
            eprintln!("Error listing players: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

pub async fn players(storage: Data<SqlStorage>) -> impl Responder {
    players_page(storage.get_ref(), None).await
}

#[derive(Deserialize)]
pub struct PlayerForm {
    pub name: String,
}

pub async fn create_player(
    form: web::Form<PlayerForm>,
    storage: Data<SqlStorage>,
) -> impl Responder {
    let storage = storage.get_ref();

    let name = match DisplayName::parse(&form.name) {
        Ok(name) => name.into_string(),
        Err(notice) => return players_page(storage, Some(&notice)).await,
    };

    match storage.insert_player(&name).await {
        Ok(()) => HttpResponse::SeeOther()
            .insert_header(("Location", "/players"))
            .finish(),
        Err(e) => {
            eprintln!("Error saving player: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

pub async fn delete_player(path: web::Path<i64>, storage: Data<SqlStorage>) -> impl Responder {
    let player_id = path.into_inner();
    match storage.delete_player(player_id).await {
        Ok(()) => HttpResponse::SeeOther()
            .insert_header(("Location", "/players"))
            .finish(),
        Err(e) => {
            eprintln!("Error deleting player {player_id}: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

pub async fn player_page(path: web::Path<i64>, storage: Data<SqlStorage>) -> impl Responder {
    let player_id = path.into_inner();
    let storage = storage.get_ref();

    let player = match storage.get_player(player_id).await {
        Ok(Some(player)) => player,
        Ok(None) => {
            return HttpResponse::NotFound()
                .content_type("text/html")
                .body(render_message_page("Not found", "No such player.").into_string());
        }
        Err(e) => {
            eprintln!("Error loading player {player_id}: {e}");
            return HttpResponse::InternalServerError().json(json!({"error": e.to_string()}));
        }
    };

    let rounds = match storage.list_rounds().await {
        Ok(rounds) => rounds,
        Err(e) => {
            eprintln!("Error listing rounds: {e}");
            return HttpResponse::InternalServerError().json(json!({"error": e.to_string()}));
        }
    };

    let stats = player_career_stats(&rounds, &player.name);
    let played: Vec<&Round> = rounds
        .iter()
        .filter(|round| round.player_names.iter().any(|name| name == &player.name))
        .collect();

    HttpResponse::Ok()
        .content_type("text/html")
        .body(render_player_page(&player, stats, &played).into_string())
}
