//! CLI configuration: the shared config file plus flag overrides.

use std::sync::Arc;

use campus_api::{LoginRedirect, SessionStore};
use campus_config::{Config, FileStore};
use campus_core::Campus;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::redirect::TerminalRedirect;

/// Load the config file and environment, then apply command-line flags.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = global.config.clone().unwrap_or_else(campus_config::config_path);
    let mut cfg = campus_config::load_config_from(&path)?;
    apply_overrides(&mut cfg, global);
    cfg.validate()?;
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.api_url {
        cfg.api_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.request_timeout_secs = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }
    if let Some(ref path) = global.session_file {
        cfg.session_file = Some(path.clone());
    }
}

/// Compose the facade: file-backed session, terminal login boundary.
pub fn build_campus(cfg: &Config, global: &GlobalOpts) -> Result<Campus, CliError> {
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::new(cfg.session_path()));
    let redirect: Arc<dyn LoginRedirect> = Arc::new(TerminalRedirect::new(global.quiet));
    tracing::debug!(session = %cfg.session_path().display(), "session store");
    Ok(Campus::build(
        &cfg.deployment(),
        &cfg.transport(),
        store,
        redirect,
    )?)
}
