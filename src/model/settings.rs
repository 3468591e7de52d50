use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{ConfigAndPool, MiddlewarePool, RowValues};

use crate::model::database::{execute_query, execute_write};
use crate::model::types::{AppSettings, GameMode};

/// The settings table holds one row with id 1. A missing row reads as the
/// defaults rather than an error.
pub async fn get_settings_from_db(
    config_and_pool: &ConfigAndPool,
) -> Result<AppSettings, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let query = "SELECT default_is_mini_golf, show_tabs_on_home \
                 FROM app_settings WHERE settings_id = 1;";
    let res = execute_query(&conn, query, vec![]).await?;

    let Some(row) = res.results.first() else {
        return Ok(AppSettings::default());
    };

    Ok(AppSettings {
        default_game_mode: GameMode::from_mini_golf_flag(
            row.get("default_is_mini_golf")
                .and_then(|v| v.as_int())
                .copied()
                .unwrap_or_default(),
        ),
        show_tabs_on_home: row
            .get("show_tabs_on_home")
            .and_then(|v| v.as_int())
            .copied()
            .unwrap_or(1)
            == 1,
    })
}

pub async fn save_settings_in_db(
    config_and_pool: &ConfigAndPool,
    settings: AppSettings,
) -> Result<(), SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let update_stmt = "INSERT INTO app_settings (settings_id, default_is_mini_golf, show_tabs_on_home) \
         VALUES (1, ?1, ?2) \
         ON CONFLICT (settings_id) DO UPDATE SET \
         default_is_mini_golf = excluded.default_is_mini_golf, \
         show_tabs_on_home = excluded.show_tabs_on_home, \
         ins_ts = CURRENT_TIMESTAMP;";
    execute_write(
        &conn,
        update_stmt,
        vec![
            RowValues::Int(i64::from(settings.default_game_mode.is_mini_golf())),
            RowValues::Int(i64::from(settings.show_tabs_on_home)),
        ],
    )
    .await?;
    Ok(())
}
