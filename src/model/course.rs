use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{ConfigAndPool, CustomDbRow, MiddlewarePool, RowValues};

use crate::model::database::{
    execute_insert_returning_id, execute_query, execute_write, parse_json_field,
};
use crate::model::types::Course;

fn course_from_row(row: &CustomDbRow) -> Result<Course, SqlMiddlewareDbError> {
    Ok(Course {
        course_id: row
            .get("course_id")
            .and_then(|v| v.as_int())
            .copied()
            .unwrap_or_default(),
        name: row
            .get("name")
            .and_then(|v| v.as_text())
            .unwrap_or_default()
            .to_string(),
        holes: row
            .get("holes")
            .and_then(|v| v.as_int())
            .map(|v| *v as u32)
            .unwrap_or_default(),
        pars: parse_json_field(row, "pars")?,
    })
}

pub async fn get_courses_from_db(
    config_and_pool: &ConfigAndPool,
) -> Result<Vec<Course>, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let query =
        "SELECT course_id, name, holes, pars FROM course ORDER BY name COLLATE NOCASE;";
    let res = execute_query(&conn, query, vec![]).await?;

    res.results
        .iter()
        .map(course_from_row)
        .collect::<Result<Vec<Course>, SqlMiddlewareDbError>>()
}

pub async fn get_course_from_db(
    config_and_pool: &ConfigAndPool,
    course_id: i64,
) -> Result<Option<Course>, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let query = "SELECT course_id, name, holes, pars FROM course WHERE course_id = ?1;";
    let res = execute_query(&conn, query, vec![RowValues::Int(course_id)]).await?;

    res.results.first().map(course_from_row).transpose()
}

pub async fn insert_course_in_db(
    config_and_pool: &ConfigAndPool,
    course: &Course,
) -> Result<i64, SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    let pars_json = serde_json::to_string(&course.pars)
        .map_err(|e| SqlMiddlewareDbError::Other(format!("Failed to serialize pars: {}", e)))?;

    let insert_stmt = "INSERT INTO course (name, holes, pars) VALUES (?1, ?2, ?3);";
    execute_insert_returning_id(
        &conn,
        insert_stmt,
        vec![
            RowValues::Text(course.name.clone()),
            RowValues::Int(i64::from(course.holes)),
            RowValues::Text(pars_json),
        ],
    )
    .await
}

pub async fn delete_course_from_db(
    config_and_pool: &ConfigAndPool,
    course_id: i64,
) -> Result<(), SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;

    execute_write(
        &conn,
        "DELETE FROM course WHERE course_id = ?1;",
        vec![RowValues::Int(course_id)],
    )
    .await?;
    Ok(())
}
