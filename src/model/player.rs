use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{ConfigAndPool, CustomDbRow, MiddlewarePool, RowValues};

use crate::model::database::{execute_query, execute_write};
use crate::model::types::Player;

fn player_from_row(row: &CustomDbRow) -> Player {
    Player {
        player_id: row
            .get("player_id")
            .and_then(|v| v.as_int())
            .copied()
            .unwrap_or_default(),
        name: row
            .get("name")
            .and_then(|v| v.as_text())
            .unwrap_or_default()
            .to_string(),
    }
}

pub async fn get_players_from_db(
    config_and_pool: &ConfigAndPool,
) -> Result<Vec<Player>, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let query = "SELECT player_id, name FROM player ORDER BY name COLLATE NOCASE;";
    let res = execute_query(&conn, query, vec![]).await?;

    Ok(res.results.iter().map(player_from_row).collect())
}

pub async fn get_player_from_db(
    config_and_pool: &ConfigAndPool,
    player_id: i64,
) -> Result<Option<Player>, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let query = "SELECT player_id, name FROM player WHERE player_id = ?1;";
    let res = execute_query(&conn, query, vec![RowValues::Int(player_id)]).await?;

    Ok(res.results.first().map(player_from_row))
}

/// Insert is a no-op when the name already exists, so seeding and the add
/// form can both call it blindly.
pub async fn insert_player_in_db(
    config_and_pool: &ConfigAndPool,
    name: &str,
) -> Result<(), SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let insert_stmt = "INSERT INTO player (name) SELECT ?1 \
                       WHERE NOT EXISTS (SELECT 1 FROM player WHERE name = ?1);";
    execute_write(&conn, insert_stmt, vec![RowValues::Text(name.to_string())]).await?;
    Ok(())
}

pub async fn delete_player_from_db(
    config_and_pool: &ConfigAndPool,
    player_id: i64,
) -> Result<(), SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    execute_write(
        &conn,
        "DELETE FROM player WHERE player_id = ?1;",
        vec![RowValues::Int(player_id)],
    )
    .await?;
    Ok(())
}
