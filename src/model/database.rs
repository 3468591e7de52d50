use sql_middleware::middleware::{
    ConversionMode, MiddlewarePoolConnection, ResultSet,
};
use sql_middleware::{
    SqlMiddlewareDbError, SqliteParamsExecute, SqliteParamsQuery, convert_sql_params,
};
use sql_middleware::middleware::{QueryAndParams, RowValues};

/// Decode a JSON TEXT column into `T`. Missing or NULL columns read as the
/// empty string and fail the parse, so callers should write well-formed JSON
/// (including `null`) rather than leaving columns unset.
pub fn parse_json_field<T>(
    row: &sql_middleware::middleware::CustomDbRow,
    field_name: &str,
) -> Result<T, SqlMiddlewareDbError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let json_text = row
        .get(field_name)
        .and_then(|v| v.as_text())
        .unwrap_or_default();

    serde_json::from_str(json_text).map_err(|e| {
        SqlMiddlewareDbError::Other(format!("Failed to parse {} field: {}", field_name, e))
    })
}

pub fn get_last_timestamp(
    results: &[sql_middleware::middleware::CustomDbRow],
) -> chrono::NaiveDateTime {
    results
        .iter()
        .filter_map(|row| row.get("ins_ts").and_then(|v| v.as_timestamp()))
        .next_back()
        .unwrap_or_else(|| chrono::Utc::now().naive_utc())
}

pub async fn execute_query(
    conn: &MiddlewarePoolConnection,
    query: &str,
    params: Vec<RowValues>,
) -> Result<ResultSet, SqlMiddlewareDbError> {
    let query_and_params = QueryAndParams {
        query: query.to_string(),
        params,
    };

    match conn {
        MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
            let result = sqlite_conn
                .interact(move |db_conn| {
                    let converted_params = convert_sql_params::<SqliteParamsQuery>(
                        &query_and_params.params,
                        ConversionMode::Query,
                    )?;
                    let tx = db_conn.transaction()?;

                    let result_set = {
                        let mut stmt = tx.prepare(&query_and_params.query)?;

                        sql_middleware::sqlite_build_result_set(&mut stmt, &converted_params.0)?
                    };
                    tx.commit()?;
                    Ok::<_, SqlMiddlewareDbError>(result_set)
                })
                .await??;

            Ok(result)
        }
        _ => Err(SqlMiddlewareDbError::Other(
            "Database type not supported for this operation".to_string(),
        )),
    }
}

/// Run a single DML statement and return the number of rows it touched.
pub async fn execute_write(
    conn: &MiddlewarePoolConnection,
    query: &str,
    params: Vec<RowValues>,
) -> Result<usize, SqlMiddlewareDbError> {
    let query_and_params = QueryAndParams {
        query: query.to_string(),
        params,
    };

    match conn {
        MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
            let rows = sqlite_conn
                .interact(move |db_conn| {
                    let tx = db_conn.transaction()?;
                    let rows = {
                        let converted_params = convert_sql_params::<SqliteParamsExecute>(
                            &query_and_params.params,
                            ConversionMode::Execute,
                        )?;
                        let mut stmt = tx.prepare(&query_and_params.query)?;
                        stmt.execute(converted_params.0)?
                    };
                    tx.commit()?;
                    Ok::<_, SqlMiddlewareDbError>(rows)
                })
                .await??;

            Ok(rows)
        }
        _ => Err(SqlMiddlewareDbError::Other(
            "Database type not supported for this operation".to_string(),
        )),
    }
}

/// Run a single INSERT and return the rowid it produced.
pub async fn execute_insert_returning_id(
    conn: &MiddlewarePoolConnection,
    query: &str,
    params: Vec<RowValues>,
) -> Result<i64, SqlMiddlewareDbError> {
    let query_and_params = QueryAndParams {
        query: query.to_string(),
        params,
    };

    match conn {
        MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
            let id = sqlite_conn
                .interact(move |db_conn| {
                    let tx = db_conn.transaction()?;
                    {
                        let converted_params = convert_sql_params::<SqliteParamsExecute>(
                            &query_and_params.params,
                            ConversionMode::Execute,
                        )?;
                        let mut stmt = tx.prepare(&query_and_params.query)?;
                        stmt.execute(converted_params.0)?;
                    }
                    let id = tx.last_insert_rowid();
                    tx.commit()?;
                    Ok::<_, SqlMiddlewareDbError>(id)
                })
                .await??;

            Ok(id)
        }
        _ => Err(SqlMiddlewareDbError::Other(
            "Database type not supported for this operation".to_string(),
        )),
    }
}
