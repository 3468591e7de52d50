use maud::{Markup, html};

use crate::model::Course;
use crate::view::layout::render_page;

fn pars_summary(course: &Course) -> String {
    let total: u32 = course.pars.iter().sum();
    format!("par {total}")
}

#[must_use]
pub fn render_courses_page(courses: &[Course], notice: Option<&str>) -> Markup {
    render_page(
        "Courses",
        html! {
            @if let Some(notice) = notice {
                p class="notice" { (notice) }
            }
            @if courses.is_empty() {
                p class="notice" { "No courses saved. Add one below to pre-fill new rounds." }
            } @else {
                table class="styled-table" {
                    thead {
                        tr {
                            th { "COURSE" }
                            th { "HOLES" }
                            th { "PAR" }
                            th { "" }
                        }
                    }
                    tbody {
                        @for course in courses {
                            tr {
                                td { (course.name) }
                                td { (course.holes) }
                                td { (pars_summary(course)) }
                                td {
                                    form method="post" action=(format!("/courses/{}/delete", course.course_id)) {
                                        button type="submit" class="linklike danger" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            h2 { "Add a course" }
            form class="details-form" method="post" action="/courses" {
                label for="course-name" { "Name" }
                input id="course-name" type="text" name="name" required;
                label for="course-holes" { "Holes" }
                input id="course-holes" type="number" name="holes" min="1" max="72" value="18" required;
                label for="course-pars" { "Pars" }
                input id="course-pars" type="text" name="pars" placeholder="4,3,5,... or one value for every hole" required;
                button type="submit" class="button" { "Save course" }
            }
        },
    )
}
