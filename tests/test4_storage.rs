use partrack::model::{Course, GameMode, Round};
use partrack::scoring::engine::{ReorderDirection, RoundScoringEngine};
use partrack::storage::{RoundLocks, SqlStorage, Storage};
use partrack::PartrackError;
use std::collections::HashMap;

use sql_middleware::middleware::{
    AsyncDatabaseExecutor, ConfigAndPool, MiddlewarePool, QueryAndParams,
};

/// Each test gets its own shared-cache URI so the in-memory databases stay
/// separate while the pool keeps them alive.
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

fn sample_round(name: &str, date: i64) -> Round {
    Round {
        round_id: 0,
        name: name.to_string(),
        date,
        holes: 9,
        player_names: vec!["Alice".to_string(), "Bob".to_string()],
        is_finished: false,
        scores: HashMap::new(),
        pars: None,
        game_mode: GameMode::Golf,
    }
}

#[tokio::test]
async fn round_upsert_roundtrip_and_list_order() -> Result<(), Box<dyn std::error::Error>> {
    let (storage, _locks) = setup("file:test4_rounds?mode=memory&cache=shared").await?;

    let mut round = sample_round("Morning nine", 2_000);
    round.pars = Some(vec![4, 3, 4, 4, 5, 3, 4, 4, 4]);
    round.scores.entry("Alice".to_string()).or_default().insert(1, 4);

    let id = storage.save_round(&round).await?;
    assert!(id > 0, "Insert should hand back a fresh id");
    round.round_id = id;

    let stored = storage
        .get_round(id)
        .await?
        .expect("the round just saved should load");
    assert_eq!(stored.round.name, "Morning nine");
    assert_eq!(stored.round.date, 2_000);
    assert_eq!(stored.round.holes, 9);
    assert_eq!(stored.round.player_names, vec!["Alice", "Bob"]);
    assert_eq!(stored.round.pars, Some(vec![4, 3, 4, 4, 5, 3, 4, 4, 4]));
    assert_eq!(stored.round.scores["Alice"][&1], 4);
    assert_eq!(stored.round.game_mode, GameMode::Golf);
    assert!(!stored.round.is_finished);

    // Saving again with the id set updates in place.
    round.is_finished = true;
    round.scores.entry("Bob".to_string()).or_default().insert(2, 5);
    let same_id = storage.save_round(&round).await?;
    assert_eq!(same_id, id, "An update keeps the id");

    let stored = storage.get_round(id).await?.expect("still there");
    assert!(stored.round.is_finished);
    assert_eq!(stored.round.scores["Bob"][&2], 5);

    // Updating a nonexistent id is an error, not a silent insert.
    let mut ghost = sample_round("Ghost", 1);
    ghost.round_id = id + 999;
    assert!(
        storage.save_round(&ghost).await.is_err(),
        "An update against a missing id should fail"
    );

    // Newest round first; ties broken by id.
    let older = sample_round("Older", 1_000);
    storage.save_round(&older).await?;
    let rounds = storage.list_rounds().await?;
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0].name, "Morning nine");
    assert_eq!(rounds[1].name, "Older");

    storage.delete_round(id).await?;
    assert!(storage.get_round(id).await?.is_none());

    println!("✓ Test passed: round upsert, list order, delete");
    Ok(())
}

#[tokio::test]
async fn missing_rounds_surface_as_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (storage, locks) = setup("file:test4_missing?mode=memory&cache=shared").await?;
    let engine = RoundScoringEngine::new(&storage, &locks);

    assert!(storage.get_round(12_345).await?.is_none());

    let err = engine
        .set_score(12_345, "Alice", 1, 4)
        .await
        .expect_err("scoring a missing round should fail");
    assert!(
        matches!(err, PartrackError::NotFound(_)),
        "Expected NotFound, got {err:?}"
    );

    // Deleting a round that is already gone stays quiet.
    engine.delete(12_345).await?;

    println!("✓ Test passed: missing rounds are NotFound, deletes stay quiet");
    Ok(())
}

#[tokio::test]
async fn course_and_player_crud() -> Result<(), Box<dyn std::error::Error>> {
    let (storage, _locks) = setup("file:test4_crud?mode=memory&cache=shared").await?;

    let zeta = Course {
        course_id: 0,
        name: "zeta putt".to_string(),
        holes: 9,
        pars: vec![2; 9],
    };
    let alpha = Course {
        course_id: 0,
        name: "Alpha Links".to_string(),
        holes: 18,
        pars: vec![4; 18],
    };
    let zeta_id = storage.insert_course(&zeta).await?;
    storage.insert_course(&alpha).await?;

    let courses = storage.list_courses().await?;
    assert_eq!(courses.len(), 2);
    assert_eq!(
        courses[0].name, "Alpha Links",
        "Course list should sort by name, case-insensitively"
    );

    let fetched = storage.get_course(zeta_id).await?.expect("zeta is stored");
    assert_eq!(fetched.holes, 9);
    assert_eq!(fetched.pars, vec![2; 9]);

    storage.delete_course(zeta_id).await?;
    assert!(storage.get_course(zeta_id).await?.is_none());

    // Player inserts are idempotent on the name.
    storage.insert_player("Sam").await?;
    storage.insert_player("Sam").await?;
    storage.insert_player("Riley").await?;

    let players = storage.list_players().await?;
    assert_eq!(players.len(), 2, "Duplicate name should not add a row");

    let sam = players
        .iter()
        .find(|p| p.name == "Sam")
        .expect("Sam is in the list");
    storage.delete_player(sam.player_id).await?;
    assert!(storage.get_player(sam.player_id).await?.is_none());

    println!("✓ Test passed: course and player CRUD");
    Ok(())
}

#[tokio::test]
async fn settings_default_and_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let (storage, _locks) = setup("file:test4_settings?mode=memory&cache=shared").await?;

    let settings = storage.get_settings().await?;
    assert_eq!(settings.default_game_mode, GameMode::Golf);
    assert!(settings.show_tabs_on_home);

    let mut settings = settings;
    settings.default_game_mode = GameMode::MiniGolf;
    settings.show_tabs_on_home = false;
    storage.save_settings(settings).await?;

    let reloaded = storage.get_settings().await?;
    assert_eq!(reloaded.default_game_mode, GameMode::MiniGolf);
    assert!(!reloaded.show_tabs_on_home);

    // With the row gone entirely the defaults come back.
    let pool = storage.config_and_pool().pool.get().await?;
    let mut conn = MiddlewarePool::get_connection(pool).await?;
    conn.execute_dml("DELETE FROM app_settings;", &[]).await?;

    let fallback = storage.get_settings().await?;
    assert_eq!(fallback.default_game_mode, GameMode::Golf);
    assert!(fallback.show_tabs_on_home);

    println!("✓ Test passed: settings defaults and round trip");
    Ok(())
}

#[tokio::test]
async fn par_edits_degrade_quietly() -> Result<(), Box<dyn std::error::Error>> {
    let (storage, locks) = setup("file:test4_pars?mode=memory&cache=shared").await?;
    let engine = RoundScoringEngine::new(&storage, &locks);

    // A round without pars accepts the edit and changes nothing.
    let bare = engine
        .create_round("Bare", 9, vec!["Alice".to_string()], None, GameMode::Golf)
        .await?;
    let after = engine.set_par(bare.round_id, 0, 5).await?;
    assert_eq!(after.pars, None, "No pars sequence means nothing to edit");

    let with_pars = engine
        .create_round(
            "With pars",
            3,
            vec!["Alice".to_string()],
            Some(vec![3, 3, 3]),
            GameMode::Golf,
        )
        .await?;

    // Out of range: also a quiet no-op.
    let after = engine.set_par(with_pars.round_id, 7, 4).await?;
    assert_eq!(after.pars, Some(vec![3, 3, 3]));

    // In range: replaced and persisted.
    let after = engine.set_par(with_pars.round_id, 1, 5).await?;
    assert_eq!(after.pars, Some(vec![3, 5, 3]));
    let stored = storage
        .get_round(with_pars.round_id)
        .await?
        .expect("round is stored");
    assert_eq!(stored.round.pars, Some(vec![3, 5, 3]));

    println!("✓ Test passed: par edits degrade quietly");
    Ok(())
}

#[tokio::test]
async fn details_edits_and_reorder() -> Result<(), Box<dyn std::error::Error>> {
    let (storage, locks) = setup("file:test4_details?mode=memory&cache=shared").await?;
    let engine = RoundScoringEngine::new(&storage, &locks);

    let round = engine
        .create_round(
            "Editable",
            9,
            vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()],
            None,
            GameMode::Golf,
        )
        .await?;
    let id = round.round_id;

    engine.set_score(id, "Alice", 5, 4).await?;

    // Shrinking keeps the stale entry; it just stops counting.
    let shrunk = engine.update_details(id, "Editable", 42, 3).await?;
    assert_eq!(shrunk.holes, 3);
    assert_eq!(shrunk.date, 42);
    assert_eq!(
        shrunk.scores["Alice"][&5], 4,
        "A score beyond the new hole count should survive the shrink"
    );

    let err = engine
        .update_details(id, "   ", 42, 3)
        .await
        .expect_err("blank names are rejected");
    assert!(matches!(err, PartrackError::Invalid(_)));
    let err = engine
        .update_details(id, "Editable", 42, 0)
        .await
        .expect_err("zero holes are rejected");
    assert!(matches!(err, PartrackError::Invalid(_)));

    // Reorder swaps neighbors and leaves scores keyed by name alone.
    let moved = engine.move_player(id, "Carol", ReorderDirection::Up).await?;
    assert_eq!(moved.player_names, vec!["Alice", "Carol", "Bob"]);
    let moved = engine.move_player(id, "Alice", ReorderDirection::Up).await?;
    assert_eq!(
        moved.player_names,
        vec!["Alice", "Carol", "Bob"],
        "Moving the first player up is a no-op"
    );
    assert_eq!(moved.scores["Alice"][&5], 4);

    // Finishing twice is fine.
    let finished = engine.finish(id).await?;
    assert!(finished.is_finished);
    let finished = engine.finish(id).await?;
    assert!(finished.is_finished);

    println!("✓ Test passed: details edits, reorder, finish");
    Ok(())
}

#[tokio::test]
async fn concurrent_steppers_do_not_lose_writes() -> Result<(), Box<dyn std::error::Error>> {
    let (storage, locks) = setup("file:test4_concurrent?mode=memory&cache=shared").await?;

    let engine = RoundScoringEngine::new(&storage, &locks);
    let round = engine
        .create_round("Busy", 9, vec!["Alice".to_string()], None, GameMode::Golf)
        .await?;
    let id = round.round_id;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let storage = storage.clone();
        let locks = locks.clone();
        handles.push(tokio::spawn(async move {
            let engine = RoundScoringEngine::new(&storage, &locks);
            engine.adjust_score(id, "Alice", 1, 1).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let stored = storage.get_round(id).await?.expect("round is stored");
    assert_eq!(
        stored.round.scores["Alice"][&1], 10,
        "Ten concurrent +1 steps must all land"
    );

    println!("✓ Test passed: per-round lock serializes stepper writes");
    Ok(())
}
