use serde_json::Value;
use sql_middleware::middleware::{
    ConfigAndPool, ConversionMode, MiddlewarePool, MiddlewarePoolConnection, RowValues,
};
use sql_middleware::{
    SqlMiddlewareDbError, SqliteParamsExecute, convert_sql_params,
};

/// Seed courses and players from a startup JSON file:
///
/// ```json
/// { "courses": [ { "name": "Pinehurst Mini", "holes": 18, "pars": [2, 2, 3] } ],
///   "players": [ "Alice", "Bob" ] }
/// ```
///
/// Both keys are optional. Inserts go through `WHERE NOT EXISTS` on the name,
/// so running the same file against the same database twice adds nothing.
///
/// # Errors
///
/// Will return `Err` when the file does not match the shape above or a write
/// fails.
pub async fn db_prefill(
    json: &Value,
    config_and_pool: &ConfigAndPool,
) -> Result<(), SqlMiddlewareDbError> {
    let json = json.clone();

    let pool = config_and_pool
        .pool
        .get()
        .await
        .map_err(SqlMiddlewareDbError::from)?;
    let conn = MiddlewarePool::get_connection(pool)
        .await
        .map_err(SqlMiddlewareDbError::from)?;

    match conn {
        MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
            let (courses_added, players_added) = sqlite_conn
                .interact(move |db_conn| {
                    let tx = db_conn.transaction()?;
                    let mut courses_added = 0;
                    let mut players_added = 0;

                    if let Some(courses) = json.get("courses").and_then(Value::as_array) {
                        for course in courses {
                            let name = course
                                .get("name")
                                .and_then(Value::as_str)
                                .ok_or_else(|| {
                                    SqlMiddlewareDbError::Other(
                                        "course entry is missing a name".to_string(),
                                    )
                                })?;
                            let holes = course
                                .get("holes")
                                .and_then(Value::as_u64)
                                .ok_or_else(|| {
                                    SqlMiddlewareDbError::Other(format!(
                                        "course '{name}' is missing a hole count"
                                    ))
                                })?;
                            let pars = course
                                .get("pars")
                                .filter(|pars| pars.is_array())
                                .ok_or_else(|| {
                                    SqlMiddlewareDbError::Other(format!(
                                        "course '{name}' is missing its pars array"
                                    ))
                                })?;
                            let pars_json = serde_json::to_string(pars).map_err(|e| {
                                SqlMiddlewareDbError::Other(format!(
                                    "course '{name}' has unusable pars: {e}"
                                ))
                            })?;

                            let params = vec![
                                RowValues::Text(name.to_string()),
                                RowValues::Int(holes as i64),
                                RowValues::Text(pars_json),
                            ];
                            let converted_params = convert_sql_params::<SqliteParamsExecute>(
                                &params,
                                ConversionMode::Execute,
                            )?;
                            let mut stmt = tx.prepare(
                                "INSERT INTO course (name, holes, pars) SELECT ?1, ?2, ?3 WHERE NOT EXISTS (SELECT 1 FROM course WHERE name = ?1);",
                            )?;
                            courses_added += stmt.execute(converted_params.0)?;
                        }
                    }

                    if let Some(players) = json.get("players").and_then(Value::as_array) {
                        for player in players {
                            let name = player.as_str().ok_or_else(|| {
                                SqlMiddlewareDbError::Other(
                                    "player entries have to be strings".to_string(),
                                )
                            })?;

                            let params = vec![RowValues::Text(name.to_string())];
                            let converted_params = convert_sql_params::<SqliteParamsExecute>(
                                &params,
                                ConversionMode::Execute,
                            )?;
                            let mut stmt = tx.prepare(
                                "INSERT INTO player (name) SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM player WHERE name = ?1);",
                            )?;
                            players_added += stmt.execute(converted_params.0)?;
                        }
                    }

                    tx.commit()?;
                    Ok::<_, SqlMiddlewareDbError>((courses_added, players_added))
                })
                .await??;

            println!(
                "Db prefill: added {courses_added} course(s) and {players_added} player(s)."
            );
            Ok(())
        }
        _ => Err(SqlMiddlewareDbError::Other(
            "Database type not supported for this operation".to_string(),
        )),
    }
}
