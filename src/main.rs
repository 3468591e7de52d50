use partrack::args;
use partrack::controller::{courses, db_prefill, new_round, players, rounds, settings};
use partrack::storage::{RoundLocks, SqlStorage};
use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{
    ConfigAndPool, MiddlewarePool, MiddlewarePoolConnection, QueryAndParams,
};

use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, web};

/// The built-in schema, applied on every start. All statements are
/// `CREATE TABLE IF NOT EXISTS` / `INSERT OR IGNORE`, so reruns are no-ops.
const SCHEMA_DDL: [&str; 4] = [
    include_str!("sql/schema/sqlite/00_round.sql"),
    include_str!("sql/schema/sqlite/01_course.sql"),
    include_str!("sql/schema/sqlite/02_player.sql"),
    include_str!("sql/schema/sqlite/03_app_settings.sql"),
];

async fn run_batch(
    config_and_pool: &ConfigAndPool,
    script: String,
) -> Result<(), SqlMiddlewareDbError> {
    let query_and_params = QueryAndParams {
        query: script,
        params: vec![],
    };

    let pool = config_and_pool.pool.get().await?;
    let sconn = MiddlewarePool::get_connection(pool).await?;
    match sconn {
        MiddlewarePoolConnection::Sqlite(xx) => {
            xx.interact(move |xxx| {
                let tx = xxx.transaction()?;
                tx.execute_batch(&query_and_params.query)?;

                tx.commit()?;
                Ok::<_, SqlMiddlewareDbError>(())
            })
            .await?
        }
        _ => Err(SqlMiddlewareDbError::Other(
            "Database type not supported for this operation".to_string(),
        )),
    }
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks();

    let config_and_pool = match ConfigAndPool::new_sqlite(args.db_name.clone()).await {
        Ok(config_and_pool) => config_and_pool,
        Err(e) => {
            eprintln!(
                "Error: {}\nBacktrace: {:?}",
                e,
                std::backtrace::Backtrace::capture()
            );
            std::process::exit(1);
        }
    };

    run_batch(&config_and_pool, SCHEMA_DDL.join("\n")).await?;

    if args.db_startup_script.is_some() {
        run_batch(&config_and_pool, args.combined_sql_script.clone()).await?;
    }

    if let Some(json) = &args.db_populate_json {
        db_prefill::db_prefill(json, &config_and_pool).await?;
    }

    let storage = SqlStorage::new(config_and_pool);
    let locks = RoundLocks::new();

    let bind_addr = args.bind_addr.clone();
    let port = args.port;
    println!("Scorecard db: {}", args.db_name);
    println!("Listening on http://{bind_addr}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(storage.clone()))
            .app_data(Data::new(locks.clone()))
            .route("/", web::get().to(rounds::home))
            .route("/new", web::get().to(new_round::new_round_page))
            .route("/new", web::post().to(new_round::create_round))
            .route("/round/{id}", web::get().to(rounds::round_page))
            .route("/round/{id}/hole", web::get().to(rounds::round_hole_fragment))
            .route("/round/{id}/score", web::post().to(rounds::set_score))
            .route("/round/{id}/par", web::post().to(rounds::set_par))
            .route("/round/{id}/details", web::post().to(rounds::update_round_details))
            .route("/round/{id}/order", web::post().to(rounds::move_player))
            .route("/round/{id}/finish", web::post().to(rounds::finish_round))
            .route("/round/{id}/delete", web::post().to(rounds::delete_round))
            .route("/round/{id}/scorecard", web::get().to(rounds::scorecard_page))
            .route("/round/{id}/settings", web::get().to(rounds::round_settings_page))
            .route("/courses", web::get().to(courses::courses))
            .route("/courses", web::post().to(courses::create_course))
            .route("/courses/{id}/delete", web::post().to(courses::delete_course))
            .route("/players", web::get().to(players::players))
            .route("/players", web::post().to(players::create_player))
            .route("/players/{id}", web::get().to(players::player_page))
            .route("/players/{id}/delete", web::post().to(players::delete_player))
            .route("/settings", web::get().to(settings::settings))
            .route("/settings", web::post().to(settings::save_settings))
            .route("/health", web::get().to(HttpResponse::Ok))
            .service(Files::new("/static", "./static"))
    })
    .bind((bind_addr, port))?
    .run()
    .await?;
    Ok(())
}
