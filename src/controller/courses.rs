use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::model::{Course, DisplayName};
use crate::storage::{SqlStorage, Storage};
use crate::view::courses::render_courses_page;

async fn courses_page(storage: &SqlStorage, notice: Option<&str>) -> HttpResponse {
    match storage.list_courses().await {
        Ok(courses) => HttpResponse::Ok()
            .content_type("text/html")
            .body(render_courses_page(&courses, notice).into_string()),
        Err(e) => {
            eprintln!("Error listing courses: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

pub async fn courses(storage: Data<SqlStorage>) -> impl Responder {
    courses_page(storage.get_ref(), None).await
}

#[derive(Deserialize)]
pub struct CourseForm {
    pub name: String,
    pub holes: u32,
    pub pars: String,
}

/// Pars come in as a comma list. A single value repeats for every hole;
/// otherwise the list length has to match the hole count exactly.
fn parse_pars(input: &str, holes: u32) -> Result<Vec<u32>, String> {
    let values: Result<Vec<u32>, _> = input
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::parse::<u32>)
        .collect();

    let values = values.map_err(|_| format!("'{input}' is not a list of pars"))?;
    if values.iter().any(|&par| par < 1) {
        return Err("Pars have to be at least 1.".to_string());
    }

    match values.len() {
        0 => Err("Enter at least one par.".to_string()),
        1 => Ok(vec![values[0]; holes as usize]),
        n if n == holes as usize => Ok(values),
        n => Err(format!(
            "Got {n} pars for {holes} holes; enter one par per hole or a single value."
        )),
    }
}

pub async fn create_course(
    form: web::Form<CourseForm>,
    storage: Data<SqlStorage>,
) -> impl Responder {
    let storage = storage.get_ref();

    let name = match DisplayName::parse(&form.name) {
        Ok(name) => name.into_string(),
        Err(notice) => return courses_page(storage, Some(&notice)).await,
    };
    if form.holes < 1 {
        return courses_page(storage, Some("A course needs at least one hole.")).await;
    }
    let pars = match parse_pars(&form.pars, form.holes) {
        Ok(pars) => pars,
        Err(notice) => return courses_page(storage, Some(&notice)).await,
    };

    let course = Course {
        course_id: 0,
        name,
        holes: form.holes,
        pars,
    };
    match storage.insert_course(&course).await {
        Ok(_) => HttpResponse::SeeOther()
            .insert_header(("Location", "/courses"))
            .finish(),
        Err(e) => {
            eprintln!("Error saving course: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

pub async fn delete_course(path: web::Path<i64>, storage: Data<SqlStorage>) -> impl Responder {
    let course_id = path.into_inner();
    match storage.delete_course(course_id).await {
        Ok(()) => HttpResponse::SeeOther()
            .insert_header(("Location", "/courses"))
            .finish(),
        Err(e) => {
            eprintln!("Error deleting course {course_id}: {e}");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}
