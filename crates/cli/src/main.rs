use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use money_tracker_core::config::ClientConfig;
use money_tracker_core::format::{
    format_indian_currency, format_progress, format_rupees, format_signed_percent,
    format_signed_rupees,
};
use money_tracker_core::models::financials::FinancialField;
use money_tracker_core::models::id::RecordId;
use money_tracker_core::pages::dashboard::DashboardView;
use money_tracker_core::pages::list::ListView;
use money_tracker_core::pages::prompt::UserPrompt;
use money_tracker_core::routes::RouteDecision;
use money_tracker_core::transport::traits::Navigator;
use money_tracker_core::MoneyTracker;

#[derive(Parser, Debug)]
#[command(name = "money-tracker", version, about = "Terminal front-end for the Money Tracker API.")]
struct Args {
    /// Base URL of the API, e.g. http://localhost:8080/api/v1
    #[arg(long, env = "MONEY_TRACKER_API_URL")]
    api_url: Option<String>,

    /// Value of the backend session cookie (`name=value`)
    #[arg(long, env = "MONEY_TRACKER_SESSION")]
    session_cookie: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Backend liveness check
    Health,
    /// Summary, monthly figures and savings goal
    Dashboard,
    /// Investment table with totals
    Investments,
    /// Goals with progress and linked investments
    Goals,
    /// Change one monthly figure
    SetFinancial {
        #[arg(value_enum)]
        field: FieldArg,
        value: String,
    },
    /// Link an investment to a goal, or unlink it when no goal is given
    Link {
        investment_id: String,
        goal_id: Option<String>,
    },
    /// Delete an investment
    DeleteInvestment { id: String },
    /// End the session
    Logout,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldArg {
    Income,
    Expenses,
    Savings,
}

impl From<FieldArg> for FinancialField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Income => FinancialField::Income,
            FieldArg::Expenses => FinancialField::Expenses,
            FieldArg::Savings => FinancialField::Savings,
        }
    }
}

/// There is no router in a terminal; a redirect just tells the user.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        warn!("Session ended, sign in again ({path})");
    }
}

struct TerminalPrompt {
    assume_yes: bool,
}

impl UserPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => matches!(line.trim(), "y" | "Y" | "yes"),
            Err(_) => false,
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Numeric ids go over the wire as numbers, anything else as text.
fn record_id(raw: &str) -> RecordId {
    raw.parse::<i64>()
        .map(RecordId::from)
        .unwrap_or_else(|_| RecordId::from(raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }

    let navigator = Arc::new(TerminalNavigator);
    let app = match &args.session_cookie {
        Some(cookie) => MoneyTracker::connect_with_cookie(config, navigator, cookie),
        None => MoneyTracker::connect(config, navigator),
    }
    .context("building API client")?;

    let prompt = TerminalPrompt {
        assume_yes: args.yes,
    };

    if let Command::Health = args.command {
        let health = app.health().await.context("health check")?;
        println!("{health}");
        return Ok(());
    }

    app.start().await;
    if let Command::Logout = args.command {
        app.logout().await;
        println!("Logged out.");
        return Ok(());
    }

    let page_path = match args.command {
        Command::Investments | Command::Link { .. } | Command::DeleteInvestment { .. } => {
            "/investments"
        }
        Command::Goals => "/goal",
        _ => "/dashboard",
    };
    match app.route(page_path) {
        RouteDecision::Render(_) => {}
        RouteDecision::Redirect(to) => bail!("Not signed in (redirected to {to})"),
        RouteDecision::Loading => bail!("Session check did not finish"),
    }

    match args.command {
        Command::Dashboard => show_dashboard(&app).await,
        Command::Investments => show_investments(&app).await,
        Command::Goals => show_goals(&app).await,
        Command::SetFinancial { field, value } => {
            let field = FinancialField::from(field);
            let mut page = app.dashboard_page();
            page.mount().await?;
            page.begin_edit(field);
            page.set_pending(field, value);
            page.save(field, &prompt).await?;
            println!("{}: {}", field.label(), format_rupees(page.displayed(field)));
            Ok(())
        }
        Command::Link {
            investment_id,
            goal_id,
        } => {
            let mut page = app.investments_page();
            page.mount().await?;
            let id = record_id(&investment_id);
            let Some(investment) = page.investments().iter().find(|i| i.id == id).cloned() else {
                bail!("No investment with id {investment_id}");
            };
            page.open_link(&investment);
            page.select_goal(goal_id.as_deref().map(record_id));
            page.submit_link(&prompt).await?;
            Ok(())
        }
        Command::DeleteInvestment { id } => {
            let mut page = app.investments_page();
            page.mount().await?;
            if page.delete(&record_id(&id), &prompt).await? {
                println!("Deleted investment {id}.");
            }
            Ok(())
        }
        Command::Health | Command::Logout => Ok(()),
    }
}

async fn show_dashboard(app: &MoneyTracker) -> Result<()> {
    let mut page = app.dashboard_page();
    // the error view carries the message; the error itself is already logged
    let _ = page.mount().await;

    let summary = match page.view() {
        DashboardView::Ready(summary) => summary,
        DashboardView::Failed(message) => bail!("{message}"),
        DashboardView::Loading => bail!("Dashboard did not load"),
    };

    println!("Total investments: {}", format_indian_currency(summary.total_investments));
    println!("Total gains:       {}", format_indian_currency(summary.total_gains));
    for field in FinancialField::ALL {
        println!("{:<18} {}", format!("{}:", field.label()), format_rupees(page.displayed(field)));
    }
    println!("Savings goal:      {}", format_progress(page.savings_goal_pct()));

    if !summary.investments.is_empty() {
        println!();
        for inv in &summary.investments {
            println!(
                "  {:<28} {:<14} {:>14} {:?}",
                inv.name,
                inv.kind,
                format_indian_currency(inv.current_value),
                inv.trend()
            );
        }
    }
    if !summary.recent_expenses.is_empty() {
        println!("\nRecent expenses:");
        for expense in &summary.recent_expenses {
            println!("  {:<28} {:>12}", expense.description, format_rupees(expense.amount));
        }
    }
    Ok(())
}

async fn show_investments(app: &MoneyTracker) -> Result<()> {
    let mut page = app.investments_page();
    let _ = page.mount().await;

    let investments = match page.view() {
        ListView::Ready(items) => items,
        ListView::Failed(message) => bail!("{message}"),
        ListView::Loading => bail!("Investments did not load"),
    };

    if investments.is_empty() {
        println!("No investments yet.");
        return Ok(());
    }
    for inv in investments {
        let goal = inv
            .goal_id
            .as_ref()
            .map(|id| page.goal_name(id).to_string())
            .unwrap_or_default();
        println!(
            "{:>6}  {:<28} {:<14} {:>14} {:>14} {:>10}  {}",
            inv.id.to_string(),
            inv.name,
            inv.kind,
            format_rupees(inv.invested),
            format_signed_rupees(inv.gain()),
            format_signed_percent(inv.returns_pct()),
            goal
        );
    }

    let totals = page.totals();
    println!();
    println!("Invested: {}", format_rupees(totals.total_invested));
    println!("Current:  {}", format_rupees(totals.total_current));
    println!(
        "Gain:     {} ({})",
        format_signed_rupees(totals.total_gain),
        format_signed_percent(totals.overall_returns_pct)
    );
    Ok(())
}

async fn show_goals(app: &MoneyTracker) -> Result<()> {
    let mut page = app.goals_page();
    let _ = page.mount().await;

    let goals = match page.view() {
        ListView::Ready(items) => items,
        ListView::Failed(message) => bail!("{message}"),
        ListView::Loading => bail!("Goals did not load"),
    };

    if goals.is_empty() {
        println!("No goals yet.");
        return Ok(());
    }
    for goal in goals {
        let linked = page
            .linked_investments(&goal.id)
            .map_or(0, |summary| summary.count);
        println!(
            "{:>6}  {:<24} {:<12} {:>14} / {:<14} {:>6}  {} linked",
            goal.id.to_string(),
            goal.name,
            goal.status.label(),
            format_rupees(goal.current_amount),
            format_rupees(goal.target_amount),
            format_progress(goal.progress_pct()),
            linked
        );
    }

    let totals = page.totals();
    println!();
    println!(
        "Saved {} of {} ({})",
        format_rupees(totals.total_current),
        format_rupees(totals.total_target),
        format_progress(totals.savings_pct)
    );
    Ok(())
}
