use chrono::NaiveDateTime;
use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{
    ConfigAndPool, CustomDbRow, MiddlewarePool, RowValues,
};

use crate::model::database::{
    execute_insert_returning_id, execute_query, execute_write, get_last_timestamp, parse_json_field,
};
use crate::model::types::{GameMode, Round};

/// A round together with the time its row was last written, for the
/// "Saved N ago" line on the scoring screen.
#[derive(Debug, Clone)]
pub struct RoundAndLastSaved {
    pub round: Round,
    pub last_saved: NaiveDateTime,
}

fn round_from_row(row: &CustomDbRow) -> Result<Round, SqlMiddlewareDbError> {
    Ok(Round {
        round_id: row
            .get("round_id")
            .and_then(|v| v.as_int())
            .copied()
            .unwrap_or_default(),
        name: row
            .get("name")
            .and_then(|v| v.as_text())
            .unwrap_or_default()
            .to_string(),
        date: row
            .get("round_date")
            .and_then(|v| v.as_int())
            .copied()
            .unwrap_or_default(),
        holes: row
            .get("holes")
            .and_then(|v| v.as_int())
            .map(|v| *v as u32)
            .unwrap_or_default(),
        player_names: parse_json_field(row, "player_names")?,
        is_finished: row
            .get("is_finished")
            .and_then(|v| v.as_int())
            .copied()
            .unwrap_or_default()
            == 1,
        scores: parse_json_field(row, "scores")?,
        pars: parse_json_field(row, "pars")?,
        game_mode: GameMode::from_mini_golf_flag(
            row.get("is_mini_golf")
                .and_then(|v| v.as_int())
                .copied()
                .unwrap_or_default(),
        ),
    })
}

fn round_write_params(round: &Round) -> Result<Vec<RowValues>, SqlMiddlewareDbError> {
    let player_names_json = serde_json::to_string(&round.player_names).map_err(|e| {
        SqlMiddlewareDbError::Other(format!("Failed to serialize player names: {}", e))
    })?;
    let scores_json = serde_json::to_string(&round.scores)
        .map_err(|e| SqlMiddlewareDbError::Other(format!("Failed to serialize scores: {}", e)))?;
    let pars_json = serde_json::to_string(&round.pars)
        .map_err(|e| SqlMiddlewareDbError::Other(format!("Failed to serialize pars: {}", e)))?;

    Ok(vec![
        RowValues::Text(round.name.clone()),
        RowValues::Int(round.date),
        RowValues::Int(i64::from(round.holes)),
        RowValues::Text(player_names_json),
        RowValues::Text(scores_json),
        RowValues::Text(pars_json),
        RowValues::Int(i64::from(round.game_mode.is_mini_golf())),
        RowValues::Int(i64::from(round.is_finished)),
    ])
}

pub async fn get_rounds_from_db(
    config_and_pool: &ConfigAndPool,
) -> Result<Vec<Round>, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let query = "SELECT round_id, name, round_date, holes, player_names, scores, pars, \
                 is_mini_golf, is_finished, ins_ts \
                 FROM round ORDER BY round_date DESC, round_id DESC;";
    let res = execute_query(&conn, query, vec![]).await?;

    res.results
        .iter()
        .map(round_from_row)
        .collect::<Result<Vec<Round>, SqlMiddlewareDbError>>()
}

pub async fn get_round_from_db(
    config_and_pool: &ConfigAndPool,
    round_id: i64,
) -> Result<Option<RoundAndLastSaved>, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let query = "SELECT round_id, name, round_date, holes, player_names, scores, pars, \
                 is_mini_golf, is_finished, ins_ts \
                 FROM round WHERE round_id = ?1;";
    let res = execute_query(&conn, query, vec![RowValues::Int(round_id)]).await?;

    let Some(row) = res.results.first() else {
        return Ok(None);
    };

    let round = round_from_row(row)?;
    let last_saved = get_last_timestamp(&res.results);
    Ok(Some(RoundAndLastSaved { round, last_saved }))
}

/// Insert the round when its id is 0, update it otherwise. Returns the id
/// the row ended up with. Updates refresh `ins_ts` so the saved-ago display
/// tracks the latest write.
pub async fn upsert_round_in_db(
    config_and_pool: &ConfigAndPool,
    round: &Round,
) -> Result<i64, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let mut params = round_write_params(round)?;

    if round.round_id == 0 {
        let insert_stmt = "INSERT INTO round \
            (name, round_date, holes, player_names, scores, pars, is_mini_golf, is_finished) \
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);";
        execute_insert_returning_id(&conn, insert_stmt, params).await
    } else {
        let update_stmt = "UPDATE round SET \
            name = ?1, round_date = ?2, holes = ?3, player_names = ?4, scores = ?5, \
            pars = ?6, is_mini_golf = ?7, is_finished = ?8, ins_ts = CURRENT_TIMESTAMP \
            WHERE round_id = ?9;";
        params.push(RowValues::Int(round.round_id));
        let rows = execute_write(&conn, update_stmt, params).await?;
        if rows == 0 {
            return Err(SqlMiddlewareDbError::Other(format!(
                "No round with id {} to update",
                round.round_id
            )));
        }
        Ok(round.round_id)
    }
}

pub async fn delete_round_from_db(
    config_and_pool: &ConfigAndPool,
    round_id: i64,
) -> Result<(), SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    execute_write(
        &conn,
        "DELETE FROM round WHERE round_id = ?1;",
        vec![RowValues::Int(round_id)],
    )
    .await?;
    Ok(())
}
