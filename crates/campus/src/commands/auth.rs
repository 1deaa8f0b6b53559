//! Sign-in, sign-out, and identity commands.

use dialoguer::Input;

use campus_core::model::User;
use campus_core::{Campus, CredentialScope};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::error::CliError;
use crate::output;
use crate::redirect::login_command;

use super::util;

pub async fn login(
    campus: &Campus,
    args: LoginArgs,
    admin: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (email, password) = credentials(args)?;

    let signed_in = if admin {
        campus.admin_login(&email, &password).await?
    } else {
        campus.login(&email, &password).await?
    };

    if !global.quiet {
        let who = signed_in
            .user
            .as_ref()
            .map_or(email.as_str(), User::display_name);
        eprintln!("Signed in as {who} ({} session)", signed_in.scope);
    }
    Ok(())
}

fn credentials(args: LoginArgs) -> Result<(String, String), CliError> {
    let email = match args.email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(util::prompt_err)?,
    };
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").map_err(util::prompt_err)?,
    };

    if email.trim().is_empty() || password.is_empty() {
        return Err(CliError::Validation {
            field: "credentials".into(),
            reason: "email and password cannot be empty".into(),
        });
    }
    Ok((email.trim().to_owned(), password))
}

pub async fn logout(campus: &Campus, admin: bool, global: &GlobalOpts) -> Result<(), CliError> {
    if admin {
        campus.admin_logout().await?;
    } else {
        campus.logout().await?;
    }
    output::print_status(None, "Signed out", global.quiet);
    Ok(())
}

pub fn whoami(campus: &Campus, admin: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let scope = if admin {
        CredentialScope::Admin
    } else {
        CredentialScope::User
    };
    let user = if admin {
        campus.current_admin()?
    } else {
        campus.current_user()?
    };

    let Some(user) = user else {
        return Err(CliError::NotSignedIn {
            login_command: login_command(scope).into(),
        });
    };

    let out = output::render_single(&global.output, &user, user_detail, |u| u.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn user_detail(u: &User) -> String {
    output::detail_lines(&[
        ("ID", u.id.clone()),
        ("Name", u.name.clone().unwrap_or_default()),
        ("Email", u.email.clone().unwrap_or_default()),
        ("Role", u.role.clone().unwrap_or_default()),
        ("Status", u.status.map(|s| s.to_string()).unwrap_or_default()),
        ("Joined", u.created_at.map(|d| d.to_rfc3339()).unwrap_or_default()),
    ])
}
