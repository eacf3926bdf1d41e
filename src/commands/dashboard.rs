use crate::{
    db::{db::Db, stats::Stats},
    libs::{config::Config, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

/// Longest recent-activity window the dashboard renders.
const MAX_ACTIVITY_DAYS: i64 = 3650;

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Recent activity window in days (defaults to the configured value)
    #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=MAX_ACTIVITY_DAYS))]
    days: Option<i64>,

    /// Number of categories in the breakdown (defaults to the configured value)
    #[arg(short, long)]
    limit: Option<usize>,
}

/// Prints every dashboard section in order.
pub fn cmd(args: DashboardArgs) -> Result<()> {
    let config = Config::read()?;
    let days = args.days.unwrap_or(config.dashboard.activity_days).clamp(1, MAX_ACTIVITY_DAYS);
    let limit = args.limit.unwrap_or(config.dashboard.category_limit);

    let db = Db::new()?;
    let stats = Stats::new(&db);

    let summary = stats.summary()?;
    msg_print!(Message::DashboardHeader, true);
    View::summary(&summary);

    msg_print!(Message::SidebarHeader, true);
    View::sidebar(&summary);

    msg_print!(Message::StatusDistributionHeader, true);
    let statuses = stats.status_distribution()?;
    if statuses.is_empty() {
        msg_info!(Message::NoTasksYet);
    } else {
        View::status_distribution(&statuses);
    }

    msg_print!(Message::CategoryBreakdownHeader, true);
    let categories = stats.category_breakdown(limit)?;
    if categories.is_empty() {
        msg_info!(Message::NoCategorizedTasks);
    } else {
        View::category_breakdown(&categories);
    }

    msg_print!(Message::MatrixHeader, true);
    View::matrix(&stats.quadrant_breakdown()?);

    msg_print!(Message::RecentActivityHeader(days), true);
    let activity = stats.recent_activity(days)?;
    if activity.is_empty() {
        msg_info!(Message::NoRecentActivity);
    } else {
        View::activity(&activity);
    }

    Ok(())
}
