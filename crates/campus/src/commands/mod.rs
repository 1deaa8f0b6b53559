//! Command dispatch: bridges CLI args -> facade calls -> output formatting.

pub mod account;
pub mod admin;
pub mod announcements;
pub mod auth;
pub mod certificates;
pub mod courses;
pub mod endpoint;
pub mod forums;
pub mod notifications;
pub mod payments;
pub mod settings;
pub mod util;

use campus_core::Campus;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, campus: &Campus, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Endpoint(args) => endpoint::handle(campus, &args, global).await,
        Command::Login(args) => auth::login(campus, args, false, global).await,
        Command::AdminLogin(args) => auth::login(campus, args, true, global).await,
        Command::Logout { admin } => auth::logout(campus, admin, global).await,
        Command::Whoami { admin } => auth::whoami(campus, admin, global),
        Command::Account(args) => account::handle(campus, args, global).await,
        Command::Courses(args) => courses::handle(campus, args, global).await,
        Command::Certificates(args) => certificates::handle(campus, args, global).await,
        Command::Announcements(args) => announcements::handle(campus, args, global).await,
        Command::Forums(args) => forums::handle(campus, args, global).await,
        Command::Notifications(args) => notifications::handle(campus, args, global).await,
        Command::Payments(args) => payments::handle(campus, args, global).await,
        Command::Admin(args) => admin::handle(campus, args, global).await,
        Command::Settings(args) => settings::handle(campus, args, global).await,
        // Handled before a Campus is built
        Command::Completions(_) => Ok(()),
    }
}
