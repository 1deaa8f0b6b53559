//! Admin command handlers.

use tabled::Tabled;

use campus_core::Campus;
use campus_core::model::{DashboardStats, User};

use crate::cli::{AdminArgs, AdminCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::auth::user_detail;
use super::util;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            name: util::opt(u.name.as_deref()),
            email: util::opt(u.email.as_deref()),
            role: util::opt(u.role.as_deref()),
            status: u.status.map_or_else(|| "-".into(), |s| s.to_string()),
        }
    }
}

fn dashboard_detail(s: &DashboardStats) -> String {
    let count = |n: Option<u64>| n.map(|n| n.to_string()).unwrap_or_default();
    output::detail_lines(&[
        ("Users", count(s.total_users)),
        ("Active users", count(s.active_users)),
        ("Courses", count(s.total_courses)),
        ("Enrollments", count(s.total_enrollments)),
        ("Revenue", s.total_revenue.map_or_else(String::new, |r| format!("{r:.2}"))),
    ])
}

pub async fn handle(
    campus: &Campus,
    args: AdminArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AdminCommand::Dashboard => {
            let stats = campus.dashboard_stats().await?;
            let out = output::render_single(&global.output, &stats, dashboard_detail, |s| {
                s.total_users.unwrap_or_default().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminCommand::Users(list) => {
            let page = campus.list_users(&util::list_query(&list)?).await?;
            let out = output::render_page(
                &global.output,
                &page,
                |u| UserRow::from(u),
                |u| u.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminCommand::SetStatus { id, status } => {
            let user = campus.update_user_status(&id, status).await?;
            let out = output::render_single(&global.output, &user, user_detail, |u| u.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
