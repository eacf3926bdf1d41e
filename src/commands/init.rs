//! Interactive configuration setup.
//!
//! Walks through the database and dashboard settings, saves them to the
//! data directory and opens the store once so the schema exists before
//! the first real command runs.

use crate::{
    db::db::Db,
    libs::{
        config::{Config, CONFIG_FILE_NAME},
        data_storage::DataStorage,
        messages::Message,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration file instead of creating a new one
    ///
    /// The database file is left untouched.
    #[arg(short, long)]
    delete: bool,
}

/// Runs the setup wizard, or removes the config with `--delete`.
pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        msg_info!(Message::ConfigDeleted);
        return Ok(());
    }

    let config = Config::init()?;
    config.save()?;
    msg_success!(Message::ConfigSaved);

    // Creates the database file and applies the schema
    Db::open(&config.database_path()?, config.database.pool_size)?;
    Ok(())
}
