//! `campus endpoint`: show where requests would go.

use campus_core::{Campus, Resolution};

use crate::cli::{EndpointArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    campus: &Campus,
    args: &EndpointArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let session = campus.session();
    let candidates = session.resolver().candidates().as_slice().to_vec();

    let resolution = if args.no_probe {
        None
    } else {
        Some(session.resolve_endpoint().await)
    };

    let out = match global.output {
        OutputFormat::Table => {
            let color = output::should_color(&global.color);
            let mut lines: Vec<String> = candidates
                .iter()
                .enumerate()
                .map(|(i, url)| {
                    let selected = resolution.as_ref().is_some_and(|r| r.url() == url.as_str());
                    let marker = if selected { "*" } else { " " };
                    format!("{marker} {}. {url}", i + 1)
                })
                .collect();
            if let Some(ref r) = resolution {
                let status = match r {
                    Resolution::Reachable(_) => output::status_marker("reachable", true, color),
                    Resolution::Unverified(_) => output::status_marker(
                        "unverified (no candidate answered; using the first)",
                        false,
                        color,
                    ),
                };
                lines.push(String::new());
                lines.push(format!("Selected: {} [{status}]", r.url()));
            }
            lines.join("\n")
        }
        OutputFormat::Plain => resolution
            .as_ref()
            .map_or_else(|| candidates.join("\n"), |r| r.url().to_owned()),
        _ => {
            let report = serde_json::json!({
                "candidates": candidates,
                "selected": resolution.as_ref().map(Resolution::url),
                "reachable": resolution.as_ref().map(Resolution::is_reachable),
            });
            output::render_single(&global.output, &report, |_| String::new(), |_| String::new())?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
