//! `campus account`: the signed-in user's own profile.

use std::path::Path;

use campus_core::{Campus, ProfileUpdate};

use crate::cli::{AccountArgs, AccountCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::auth::user_detail;
use super::util;

pub async fn handle(
    campus: &Campus,
    args: AccountArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AccountCommand::Show => {
            let user = campus.me().await?;
            let out = output::render_single(&global.output, &user, user_detail, |u| u.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AccountCommand::Update {
            name,
            email,
            bio,
            phone,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                bio,
                phone,
            };
            if update == ProfileUpdate::default() {
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: "nothing to update; pass at least one of --name, --email, --bio, --phone"
                        .into(),
                });
            }
            let user = campus.update_profile(&update).await?;
            let out = output::render_single(&global.output, &user, user_detail, |u| u.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AccountCommand::Password => {
            let current =
                rpassword::prompt_password("Current password: ").map_err(util::prompt_err)?;
            let new = rpassword::prompt_password("New password: ").map_err(util::prompt_err)?;
            let again =
                rpassword::prompt_password("Repeat new password: ").map_err(util::prompt_err)?;
            if new != again {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "the new passwords do not match".into(),
                });
            }
            let message = campus.change_password(&current, &new).await?;
            output::print_status(message.as_deref(), "Password changed", global.quiet);
            Ok(())
        }

        AccountCommand::RefreshToken => {
            campus.refresh_token().await?;
            output::print_status(None, "Session token refreshed", global.quiet);
            Ok(())
        }

        AccountCommand::Avatar { file } => {
            let bytes = std::fs::read(&file)?;
            let name = file
                .file_name()
                .map_or_else(|| "avatar".into(), |n| n.to_string_lossy().into_owned());
            let result = campus
                .upload_avatar(&name, bytes, image_mime(&file))
                .await?;
            let out = output::render_single(
                &global.output,
                &result,
                |v| v.to_string(),
                |v| v.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
