//! Announcement command handlers.

use tabled::Tabled;

use campus_core::Campus;
use campus_core::model::{Announcement, AnnouncementDraft};

use crate::cli::{AnnouncementFields, AnnouncementsArgs, AnnouncementsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AnnouncementRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Audience")]
    audience: String,
    #[tabled(rename = "Posted")]
    posted: String,
}

impl From<&Announcement> for AnnouncementRow {
    fn from(a: &Announcement) -> Self {
        Self {
            id: a.id.clone(),
            title: util::opt(a.title.as_deref()),
            audience: util::opt(a.audience.as_deref()),
            posted: util::date(a.created_at.as_ref()),
        }
    }
}

fn detail(a: &Announcement) -> String {
    output::detail_lines(&[
        ("ID", a.id.clone()),
        ("Title", a.title.clone().unwrap_or_default()),
        ("Audience", a.audience.clone().unwrap_or_default()),
        ("Posted", util::date(a.created_at.as_ref())),
        ("Body", a.body.clone().unwrap_or_default()),
    ])
}

fn draft(fields: AnnouncementFields) -> AnnouncementDraft {
    AnnouncementDraft {
        title: fields.title,
        body: fields.body,
        audience: fields.audience,
    }
}

pub async fn handle(
    campus: &Campus,
    args: AnnouncementsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let single = match args.command {
        AnnouncementsCommand::List(list) => {
            let page = campus.list_announcements(&util::list_query(&list)?).await?;
            let out = output::render_page(
                &global.output,
                &page,
                |a| AnnouncementRow::from(a),
                |a| a.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }
        AnnouncementsCommand::Get { id } => campus.get_announcement(&id).await?,
        AnnouncementsCommand::Create(fields) => {
            if fields.title.is_none() || fields.body.is_none() {
                return Err(CliError::Validation {
                    field: "announcement".into(),
                    reason: "a new announcement needs --title and --body".into(),
                });
            }
            campus.create_announcement(&draft(fields)).await?
        }
        AnnouncementsCommand::Update { id, fields } => {
            campus.update_announcement(&id, &draft(fields)).await?
        }
        AnnouncementsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete announcement {id}?"), global.yes)? {
                return Ok(());
            }
            let message = campus.delete_announcement(&id).await?;
            output::print_status(message.as_deref(), "Announcement deleted", global.quiet);
            return Ok(());
        }
    };

    let out = output::render_single(&global.output, &single, detail, |a| a.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
