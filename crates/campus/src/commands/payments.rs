//! Payment command handlers.

use tabled::Tabled;

use campus_core::Campus;
use campus_core::model::{Payment, PaymentStats};

use crate::cli::{GlobalOpts, PaymentsArgs, PaymentsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Learner")]
    user: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id.clone(),
            user: util::reference(p.user.as_ref()),
            course: util::reference(p.course.as_ref()),
            amount: util::money(p.amount, p.currency.as_deref()),
            status: p.status.map_or_else(|| "-".into(), |s| s.to_string()),
            date: util::date(p.created_at.as_ref()),
        }
    }
}

fn detail(p: &Payment) -> String {
    output::detail_lines(&[
        ("ID", p.id.clone()),
        ("Learner", util::reference(p.user.as_ref())),
        ("Course", util::reference(p.course.as_ref())),
        ("Amount", util::money(p.amount, p.currency.as_deref())),
        ("Status", p.status.map(|s| s.to_string()).unwrap_or_default()),
        ("Method", p.method.clone().unwrap_or_default()),
        ("Date", util::date(p.created_at.as_ref())),
    ])
}

fn stats_detail(s: &PaymentStats) -> String {
    let count = |n: Option<u64>| n.map(|n| n.to_string()).unwrap_or_default();
    output::detail_lines(&[
        ("Total revenue", util::money(s.total_revenue, None)),
        ("This month", s.monthly_revenue.map_or_else(String::new, |m| format!("{m:.2}"))),
        ("Payments", count(s.total_payments)),
        ("Refunded", count(s.refunded)),
    ])
}

pub async fn handle(
    campus: &Campus,
    args: PaymentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PaymentsCommand::List(list) => {
            let page = campus.list_payments(&util::list_query(&list)?).await?;
            let out = output::render_page(
                &global.output,
                &page,
                |p| PaymentRow::from(p),
                |p| p.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PaymentsCommand::Get { id } => {
            let payment = campus.get_payment(&id).await?;
            let out = output::render_single(&global.output, &payment, detail, |p| p.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PaymentsCommand::Stats { period } => {
            let stats = campus.payment_stats(period.as_deref()).await?;
            let out = output::render_single(&global.output, &stats, stats_detail, |s| {
                s.total_revenue.unwrap_or_default().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PaymentsCommand::Recent { limit } => {
            let payments = campus.recent_payments(limit).await?;
            let out = output::render_list(
                &global.output,
                &payments,
                |p| PaymentRow::from(p),
                |p| p.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PaymentsCommand::Refund { id, reason } => {
            if !util::confirm(&format!("Refund payment {id}?"), global.yes)? {
                return Ok(());
            }
            let payment = campus.refund_payment(&id, reason.as_deref()).await?;
            let out = output::render_single(&global.output, &payment, detail, |p| p.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
