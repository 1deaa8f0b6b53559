//! Notification command handlers.

use tabled::Tabled;

use campus_core::Campus;
use campus_core::model::{BroadcastRequest, Notification};

use crate::cli::{GlobalOpts, NotificationsArgs, NotificationsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct NotificationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Read")]
    read: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.clone(),
            kind: util::opt(n.kind.as_deref()),
            title: util::opt(n.title.as_deref().or(n.message.as_deref())),
            read: util::yes_no(Some(n.is_read)),
            date: util::date(n.created_at.as_ref()),
        }
    }
}

pub async fn handle(
    campus: &Campus,
    args: NotificationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NotificationsCommand::List(list) => {
            let page = campus.list_notifications(&util::list_query(&list)?).await?;
            let out = output::render_page(
                &global.output,
                &page,
                |n| NotificationRow::from(n),
                |n| n.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NotificationsCommand::Read { id } => {
            let message = campus.mark_notification_read(&id).await?;
            output::print_status(message.as_deref(), "Marked as read", global.quiet);
            Ok(())
        }

        NotificationsCommand::ReadAll => {
            let message = campus.mark_all_notifications_read().await?;
            output::print_status(message.as_deref(), "All notifications marked as read", global.quiet);
            Ok(())
        }

        NotificationsCommand::Delete { id } => {
            let message = campus.delete_notification(&id).await?;
            output::print_status(message.as_deref(), "Notification deleted", global.quiet);
            Ok(())
        }

        NotificationsCommand::Broadcast {
            title,
            message,
            kind,
            audience,
        } => {
            let target = audience.as_deref().unwrap_or("all users").to_owned();
            if !util::confirm(&format!("Send '{title}' to {target}?"), global.yes)? {
                return Ok(());
            }
            let reply = campus
                .broadcast_notification(&BroadcastRequest {
                    title,
                    message,
                    kind,
                    audience,
                })
                .await?;
            output::print_status(reply.as_deref(), "Notification sent", global.quiet);
            Ok(())
        }
    }
}
