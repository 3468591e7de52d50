use actix_web::{App, test, web};
use partrack::controller::{new_round, rounds};
use partrack::storage::{RoundLocks, SqlStorage, Storage};
use serde_json::Value;

use sql_middleware::middleware::{
    AsyncDatabaseExecutor, ConfigAndPool, MiddlewarePool, QueryAndParams,
};

async fn setup(conn_str: &str) -> Result<(SqlStorage, RoundLocks), Box<dyn std::error::Error>> {
    let config_and_pool = ConfigAndPool::new_sqlite(conn_str.to_string()).await?;

    let ddl = [
        include_str!("../src/sql/schema/sqlite/00_table_drop.sql"),
        include_str!("../src/sql/schema/sqlite/00_round.sql"),
        include_str!("../src/sql/schema/sqlite/01_course.sql"),
        include_str!("../src/sql/schema/sqlite/02_player.sql"),
        include_str!("../src/sql/schema/sqlite/03_app_settings.sql"),
    ];
    let query_and_params = QueryAndParams {
        query: ddl.join("\n"),
        params: vec![],
    };

    let pool = config_and_pool.pool.get().await?;
    let mut conn = MiddlewarePool::get_connection(pool).await?;
    conn.execute_batch(&query_and_params.query).await?;

    Ok((SqlStorage::new(config_and_pool), RoundLocks::new()))
}

fn app_routes(
    storage: &SqlStorage,
    locks: &RoundLocks,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(storage.clone()))
        .app_data(web::Data::new(locks.clone()))
        .route("/", web::get().to(rounds::home))
        .route("/new", web::post().to(new_round::create_round))
        .route("/round/{id}", web::get().to(rounds::round_page))
        .route("/round/{id}/score", web::post().to(rounds::set_score))
        .route("/round/{id}/finish", web::post().to(rounds::finish_round))
}

#[test]
async fn score_a_round_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let (storage, locks) = setup("file:test1_flow?mode=memory&cache=shared").await?;
    let app = test::init_service(app_routes(&storage, &locks)).await;

    // Create a 3 hole round with two typed-in players.
    let req = test::TestRequest::post()
        .uri("/new")
        .set_form([
            ("name", "Saturday loop"),
            ("mode", "golf"),
            ("holes", "3"),
            ("course_id", "0"),
            ("extra_players", "Alice, Bob"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::SEE_OTHER,
        "Creating a round should redirect to it"
    );
    let location = resp
        .headers()
        .get("Location")
        .expect("redirect carries a Location header")
        .to_str()?;
    let round_id: i64 = location.trim_start_matches("/round/").parse()?;
    assert!(round_id > 0);

    // Hole 1: Alice 4, Bob 5.
    for (player, strokes) in [("Alice", "4"), ("Bob", "5")] {
        let req = test::TestRequest::post()
            .uri(&format!("/round/{round_id}/score"))
            .set_form([
                ("player", player),
                ("hole", "1"),
                ("action", "set"),
                ("strokes", strokes),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(
            resp.status().is_success(),
            "Scoring {player} failed: {:?}",
            resp.status()
        );
    }

    // Alice won hole 1, so she leads off hole 2.
    let req = test::TestRequest::get()
        .uri(&format!("/round/{round_id}?hole=2"))
        .to_request();
    let body = String::from_utf8_lossy(&test::call_and_read_body(&app, req).await).to_string();
    let alice_at = body.find("Alice").expect("Alice is on the page");
    let bob_at = body.find("Bob").expect("Bob is on the page");
    assert!(
        alice_at < bob_at,
        "Alice should be listed before Bob on hole 2"
    );

    // Hole 2: Bob strikes back.
    for (player, strokes) in [("Alice", "6"), ("Bob", "3")] {
        let req = test::TestRequest::post()
            .uri(&format!("/round/{round_id}/score"))
            .set_form([
                ("player", player),
                ("hole", "2"),
                ("action", "set"),
                ("strokes", strokes),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri(&format!("/round/{round_id}?hole=3"))
        .to_request();
    let body = String::from_utf8_lossy(&test::call_and_read_body(&app, req).await).to_string();
    let alice_at = body.find("Alice").expect("Alice is on the page");
    let bob_at = body.find("Bob").expect("Bob is on the page");
    assert!(
        bob_at < alice_at,
        "Bob's lower hole 2 score should put him first on hole 3"
    );

    // The JSON view carries the raw scores.
    let req = test::TestRequest::get()
        .uri(&format!("/round/{round_id}?json=1"))
        .to_request();
    let round: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(round["name"], "Saturday loop");
    assert_eq!(round["scores"]["Alice"]["1"], 4);
    assert_eq!(round["scores"]["Alice"]["2"], 6);
    assert_eq!(round["scores"]["Bob"]["2"], 3);

    // A stepper bump lands on top of the existing score.
    let req = test::TestRequest::post()
        .uri(&format!("/round/{round_id}/score"))
        .set_form([("player", "Bob"), ("hole", "2"), ("action", "inc")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let stored = storage.get_round(round_id).await?.expect("round is stored");
    assert_eq!(stored.round.scores["Bob"][&2], 4);

    // Scoring someone who is not in the round is rejected.
    let req = test::TestRequest::post()
        .uri(&format!("/round/{round_id}/score"))
        .set_form([
            ("player", "Mallory"),
            ("hole", "1"),
            ("action", "set"),
            ("strokes", "1"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

    // Finish and confirm it sticks.
    let req = test::TestRequest::post()
        .uri(&format!("/round/{round_id}/finish"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);

    let req = test::TestRequest::get()
        .uri(&format!("/round/{round_id}?json=1"))
        .to_request();
    let round: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(round["is_finished"], true);

    // The home page shows the round, its leader, and the finished chip.
    let req = test::TestRequest::get().uri("/").to_request();
    let body = String::from_utf8_lossy(&test::call_and_read_body(&app, req).await).to_string();
    assert!(body.contains("Saturday loop"), "Home lists the round");
    assert!(
        body.contains("Leading: Bob (9 strokes)"),
        "Bob leads at 9 strokes: {body}"
    );
    assert!(body.contains("Finished"));

    println!("✓ Test passed: end to end round flow over HTTP");
    Ok(())
}

#[test]
async fn profiles_and_mode_tabs() -> Result<(), Box<dyn std::error::Error>> {
    let (storage, locks) = setup("file:test1_tabs?mode=memory&cache=shared").await?;

    storage.insert_player("Pat").await?;
    let players = storage.list_players().await?;
    let pat_id = players
        .iter()
        .find(|p| p.name == "Pat")
        .expect("Pat was just added")
        .player_id;

    let app = test::init_service(app_routes(&storage, &locks)).await;

    // Checked profile plus typed extras; Pat typed twice collapses to once.
    let pat_key = format!("player_{pat_id}");
    let req = test::TestRequest::post()
        .uri("/new")
        .set_form([
            ("name", "Putt palace"),
            ("mode", "minigolf"),
            ("holes", "9"),
            ("course_id", "0"),
            (pat_key.as_str(), "Pat"),
            ("extra_players", "Quinn, Pat"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
    let mini_id: i64 = resp
        .headers()
        .get("Location")
        .expect("redirect carries a Location header")
        .to_str()?
        .trim_start_matches("/round/")
        .parse()?;

    let req = test::TestRequest::get()
        .uri(&format!("/round/{mini_id}?json=1"))
        .to_request();
    let round: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        round["player_names"],
        serde_json::json!(["Pat", "Quinn"]),
        "Profiles come first, typed names after, duplicates dropped"
    );
    assert_eq!(round["game_mode"], "MiniGolf");

    let req = test::TestRequest::post()
        .uri("/new")
        .set_form([
            ("name", "Par three outing"),
            ("mode", "golf"),
            ("holes", "3"),
            ("course_id", "0"),
            ("extra_players", "Quinn"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);

    // The mode tabs filter the list.
    let req = test::TestRequest::get().uri("/?mode=minigolf").to_request();
    let body = String::from_utf8_lossy(&test::call_and_read_body(&app, req).await).to_string();
    assert!(body.contains("Putt palace"));
    assert!(
        !body.contains("Par three outing"),
        "The golf round should be filtered out"
    );

    let req = test::TestRequest::get().uri("/?mode=golf").to_request();
    let body = String::from_utf8_lossy(&test::call_and_read_body(&app, req).await).to_string();
    assert!(!body.contains("Putt palace"));
    assert!(body.contains("Par three outing"));

    // And the JSON view returns everything regardless.
    let req = test::TestRequest::get().uri("/?json=1").to_request();
    let rounds: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rounds.as_array().map(Vec::len), Some(2));

    println!("✓ Test passed: profile roster picks and mode tabs");
    Ok(())
}
