//! Login boundary for the terminal.
//!
//! A 401 has already cleared the stored session by the time this runs;
//! all that is left is telling the user how to sign back in.

use campus_api::{CredentialScope, LoginRedirect};

pub struct TerminalRedirect {
    quiet: bool,
}

impl TerminalRedirect {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

pub fn login_command(scope: CredentialScope) -> &'static str {
    match scope {
        CredentialScope::Admin => "admin-login",
        CredentialScope::User => "login",
    }
}

impl LoginRedirect for TerminalRedirect {
    fn redirect_to_login(&self, scope: CredentialScope) {
        if self.quiet {
            return;
        }
        eprintln!(
            "Your {scope} session has expired. Sign in again with: campus {}",
            login_command(scope)
        );
    }
}
