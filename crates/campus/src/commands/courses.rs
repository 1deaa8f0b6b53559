//! Course command handlers.

use tabled::Tabled;

use campus_core::Campus;
use campus_core::model::{Course, CourseDraft, Enrollment};

use crate::cli::{CourseFields, CoursesArgs, CoursesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Enrolled")]
    enrolled: String,
}

impl From<&Course> for CourseRow {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id.clone(),
            title: util::opt(c.title.as_deref()),
            category: util::opt(c.category.as_deref()),
            price: util::money(c.price, None),
            published: util::yes_no(c.is_published),
            enrolled: c.enrolled_count.map_or_else(|| "-".into(), |n| n.to_string()),
        }
    }
}

#[derive(Tabled)]
struct EnrollmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Learner")]
    user: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Enrolled")]
    enrolled_at: String,
}

impl From<&Enrollment> for EnrollmentRow {
    fn from(e: &Enrollment) -> Self {
        Self {
            id: e.id.clone(),
            user: util::reference(e.user.as_ref()),
            progress: e.progress.map_or_else(|| "-".into(), |p| format!("{p:.0}%")),
            status: util::opt(e.status.as_deref()),
            enrolled_at: util::date(e.enrolled_at.as_ref()),
        }
    }
}

fn detail(c: &Course) -> String {
    output::detail_lines(&[
        ("ID", c.id.clone()),
        ("Title", c.title.clone().unwrap_or_default()),
        ("Category", c.category.clone().unwrap_or_default()),
        ("Instructor", util::reference(c.instructor.as_ref())),
        ("Price", util::money(c.price, None)),
        ("Published", util::yes_no(c.is_published)),
        ("Created", util::date(c.created_at.as_ref())),
        ("Description", c.description.clone().unwrap_or_default()),
    ])
}

fn draft(fields: CourseFields) -> CourseDraft {
    CourseDraft {
        title: fields.title,
        description: fields.description,
        category: fields.category,
        price: fields.price,
        is_published: None,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    campus: &Campus,
    args: CoursesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CoursesCommand::List(list) => {
            let page = campus.list_courses(&util::list_query(&list)?).await?;
            let out = output::render_page(
                &global.output,
                &page,
                |c| CourseRow::from(c),
                |c| c.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CoursesCommand::Get { id } => {
            let course = campus.get_course(&id).await?;
            print_course(&course, global)
        }

        CoursesCommand::Create(fields) => {
            if fields.title.is_none() {
                return Err(CliError::Validation {
                    field: "title".into(),
                    reason: "a new course needs --title".into(),
                });
            }
            let course = campus.create_course(&draft(fields)).await?;
            print_course(&course, global)
        }

        CoursesCommand::Update { id, fields } => {
            let course = campus.update_course(&id, &draft(fields)).await?;
            print_course(&course, global)
        }

        CoursesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete course {id}?"), global.yes)? {
                return Ok(());
            }
            let message = campus.delete_course(&id).await?;
            output::print_status(message.as_deref(), "Course deleted", global.quiet);
            Ok(())
        }

        CoursesCommand::Publish { id } => {
            let course = campus.set_course_published(&id, true).await?;
            print_course(&course, global)
        }

        CoursesCommand::Unpublish { id } => {
            let course = campus.set_course_published(&id, false).await?;
            print_course(&course, global)
        }

        CoursesCommand::Enrollments { id, list } => {
            let page = campus
                .course_enrollments(&id, &util::list_query(&list)?)
                .await?;
            let out = output::render_page(
                &global.output,
                &page,
                |e| EnrollmentRow::from(e),
                |e| e.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn print_course(course: &Course, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, course, detail, |c| c.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
