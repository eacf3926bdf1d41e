use crate::{
    db::{
        categories::{Categories, NewCategory},
        db::Db,
    },
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: Option<CategoryCommand>,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Short code, e.g. "OPS"
        #[arg(short, long)]
        code: Option<String>,
        /// Hierarchical path, e.g. "Work/Operations"
        #[arg(short, long)]
        path: Option<String>,
    },
    /// List all categories
    List,
}

/// Adds or lists categories; lists when no subcommand is given.
pub fn cmd(args: CategoryArgs) -> Result<()> {
    match args.command {
        Some(CategoryCommand::Add { name, code, path }) => handle_add(name, code, path),
        Some(CategoryCommand::List) | None => handle_list(),
    }
}

fn handle_add(name: String, code: Option<String>, path: Option<String>) -> Result<()> {
    let mut category = NewCategory::new(&name);
    if let Some(code) = &code {
        category = category.code(code);
    }
    if let Some(path) = &path {
        category = category.path(path);
    }

    let db = Db::new()?;
    Categories::new(&db).create(&category)?;

    msg_success!(Message::CategoryCreated(name.trim().to_string()));
    Ok(())
}

fn handle_list() -> Result<()> {
    let db = Db::new()?;
    let categories = Categories::new(&db).list()?;

    if categories.is_empty() {
        msg_info!(Message::NoCategoriesFound);
        return Ok(());
    }

    msg_print!(Message::CategoryListHeader, true);
    View::categories(&categories);
    Ok(())
}
