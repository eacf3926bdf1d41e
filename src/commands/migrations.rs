use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::{config::Config, messages::Message},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show current database version
    Status,
    /// Show migration history
    History,
}

/// Prints schema version or migration history without migrating.
pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let config = Config::read()?;
    // Inspection only: pending migrations stay pending
    let db = Db::open_without_migrations(&config.database_path()?, config.database.pool_size)?;
    let conn = db.conn("inspect_migrations")?;
    let manager = MigrationManager::new();

    match args.command {
        MigrationsCommand::Status => {
            let version = get_db_version(&conn)?;
            msg_print!(Message::DatabaseVersion(version, manager.latest_version()));
            if needs_migration(&conn)? {
                msg_info!(Message::MigrationsFound((manager.latest_version() - version) as usize));
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            if get_db_version(&conn)? == 0 {
                msg_info!(Message::NoMigrationsApplied);
                return Ok(());
            }
            msg_print!(Message::MigrationHistory, true);
            for (version, name, applied_at) in manager.get_migration_history(&conn)? {
                println!("  v{}: {} (applied: {})", version, name, applied_at);
            }
        }
    }

    Ok(())
}
