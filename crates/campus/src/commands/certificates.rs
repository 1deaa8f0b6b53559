//! Certificate command handlers.

use tabled::Tabled;

use campus_core::Campus;
use campus_core::model::{Certificate, IssueCertificateRequest};

use crate::cli::{CertificatesArgs, CertificatesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CertificateRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Learner")]
    user: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Issued")]
    issued: String,
}

impl From<&Certificate> for CertificateRow {
    fn from(c: &Certificate) -> Self {
        Self {
            id: c.id.clone(),
            code: util::opt(c.code.as_deref()),
            user: util::reference(c.user.as_ref()),
            course: util::reference(c.course.as_ref()),
            status: util::opt(c.status.as_deref()),
            issued: util::date(c.issued_at.as_ref()),
        }
    }
}

fn detail(c: &Certificate) -> String {
    output::detail_lines(&[
        ("ID", c.id.clone()),
        ("Code", c.code.clone().unwrap_or_default()),
        ("Learner", util::reference(c.user.as_ref())),
        ("Course", util::reference(c.course.as_ref())),
        ("Status", c.status.clone().unwrap_or_default()),
        ("Issued", util::date(c.issued_at.as_ref())),
    ])
}

pub async fn handle(
    campus: &Campus,
    args: CertificatesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CertificatesCommand::List(list) => {
            let page = campus.list_certificates(&util::list_query(&list)?).await?;
            let out = output::render_page(
                &global.output,
                &page,
                |c| CertificateRow::from(c),
                |c| c.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CertificatesCommand::Get { id } => {
            let cert = campus.get_certificate(&id).await?;
            let out = output::render_single(&global.output, &cert, detail, |c| c.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CertificatesCommand::Issue { user, course } => {
            let cert = campus
                .issue_certificate(&IssueCertificateRequest {
                    user_id: user,
                    course_id: course,
                })
                .await?;
            let out = output::render_single(&global.output, &cert, detail, |c| c.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CertificatesCommand::Revoke { id, reason } => {
            if !util::confirm(&format!("Revoke certificate {id}?"), global.yes)? {
                return Ok(());
            }
            let message = campus.revoke_certificate(&id, reason.as_deref()).await?;
            output::print_status(message.as_deref(), "Certificate revoked", global.quiet);
            Ok(())
        }

        CertificatesCommand::Verify { code } => {
            let verification = campus.verify_certificate(&code).await?;
            let out = output::render_single(
                &global.output,
                &verification,
                |v| {
                    let mut text = format!(
                        "Certificate {code} is {}",
                        if v.valid { "valid" } else { "NOT valid" }
                    );
                    if let Some(ref cert) = v.certificate {
                        text.push_str("\n\n");
                        text.push_str(&detail(cert));
                    }
                    text
                },
                |v| v.valid.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
