use crate::{
    db::{db::Db, tasks::Tasks},
    libs::{config::Config, messages::Message},
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CompleteArgs {
    /// ID of the task to close
    task_id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    force: bool,
}

/// Closes a task after confirmation.
pub fn cmd(args: CompleteArgs) -> Result<()> {
    let config = Config::read()?;
    let db = Db::new()?;
    let tasks = Tasks::new(&db);

    let task = match tasks.get_by_id(args.task_id)? {
        Some(task) => task,
        None => msg_bail_anyhow!(Message::TaskNotFoundWithId(args.task_id)),
    };

    if !args.force {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmCompleteTask(task.subject.clone()).to_string())
            .default(true)
            .interact()?;

        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    tasks.complete(task.task_id, config.user())?;
    msg_success!(Message::TaskCompleted(task.task_id));
    Ok(())
}
