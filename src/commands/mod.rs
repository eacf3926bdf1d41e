//! Command-line interface for taskdash.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `cmd` entry point. Commands open the store through [`Db::new`], which
//! resolves the database path from configuration and applies pending
//! migrations.
//!
//! [`Db::new`]: crate::db::db::Db::new

pub mod add;
pub mod category;
pub mod complete;
pub mod dashboard;
pub mod init;
pub mod matrix;
pub mod migrations;
pub mod tasks;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Show dashboard metrics and charts")]
    Dashboard(dashboard::DashboardArgs),
    #[command(about = "List tasks with optional filters")]
    Tasks(tasks::TasksArgs),
    #[command(about = "Add a task")]
    Add(add::AddArgs),
    #[command(about = "Close a task", arg_required_else_help = true)]
    Complete(complete::CompleteArgs),
    #[command(about = "Manage categories")]
    Category(category::CategoryArgs),
    #[command(about = "Show the Eisenhower matrix")]
    Matrix,
    #[command(about = "Inspect database schema migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parses the command line and dispatches to the subcommand.
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Dashboard(args) => dashboard::cmd(args),
            Commands::Tasks(args) => tasks::cmd(args),
            Commands::Add(args) => add::cmd(args),
            Commands::Complete(args) => complete::cmd(args),
            Commands::Category(args) => category::cmd(args),
            Commands::Matrix => matrix::cmd(),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
