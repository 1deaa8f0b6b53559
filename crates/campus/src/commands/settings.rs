//! Platform settings command handlers.

use serde_json::Value;

use campus_core::Campus;
use campus_core::model::Settings;

use crate::cli::{GlobalOpts, SettingsArgs, SettingsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(s: &Settings) -> String {
    let pairs: Vec<(&str, String)> = s
        .iter()
        .map(|(k, v)| {
            let shown = match v {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (k.as_str(), shown)
        })
        .collect();
    output::detail_lines(&pairs)
}

/// `KEY=VALUE` pairs into a partial settings object. Values that parse as
/// JSON keep their type (`true`, `25`, `["a"]`); anything else is a string.
fn parse_pairs(pairs: &[String]) -> Result<Settings, CliError> {
    let mut settings = Settings::default();
    for raw in pairs {
        let (key, value) = util::split_pair(raw, "setting")?;
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
        settings.set(key, value);
    }
    Ok(settings)
}

pub async fn handle(
    campus: &Campus,
    args: SettingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let settings = match args.command {
        SettingsCommand::Get => campus.get_settings().await?,
        SettingsCommand::Set { pairs } => {
            let changes = parse_pairs(&pairs)?;
            campus.update_settings(&changes).await?
        }
    };

    let out = output::render_single(&global.output, &settings, detail, |s| {
        s.iter().map(|(k, _)| k.clone()).collect::<Vec<_>>().join("\n")
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn values_keep_json_types() {
        let settings = parse_pairs(&[
            "maintenanceMode=true".into(),
            "maxUpload=25".into(),
            "siteName=Campus Online".into(),
        ])
        .unwrap();

        assert_eq!(settings.get("maintenanceMode"), Some(&json!(true)));
        assert_eq!(settings.get("maxUpload"), Some(&json!(25)));
        assert_eq!(settings.get("siteName"), Some(&json!("Campus Online")));
    }
}
