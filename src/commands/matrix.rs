use crate::{
    db::{db::Db, stats::Stats},
    libs::{messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;

/// Prints the Eisenhower matrix of active tasks.
pub fn cmd() -> Result<()> {
    let db = Db::new()?;
    let quadrants = Stats::new(&db).quadrant_breakdown()?;

    msg_print!(Message::MatrixHeader, true);
    if quadrants.is_empty() {
        msg_info!(Message::NoActiveTasks);
        return Ok(());
    }
    View::matrix(&quadrants);
    Ok(())
}
