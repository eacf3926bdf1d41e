//! Add-Task command.
//!
//! With a subject on the command line the task is built from flags.
//! Without one, an interactive form asks for every field.

use crate::{
    db::{
        categories::Categories,
        db::Db,
        tasks::Tasks,
    },
    libs::{
        config::Config,
        messages::Message,
        priority::{DEFAULT_SCORE, MAX_SCORE, MIN_SCORE},
        task::{NewTask, Status},
    },
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Select};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task subject; omit to fill in an interactive form
    subject: Option<String>,

    /// Longer description
    #[arg(short, long)]
    description: Option<String>,

    /// Category name
    #[arg(short, long)]
    category: Option<String>,

    /// Initial status
    #[arg(short, long, default_value = "Open")]
    status: Status,

    /// Importance score (1-5)
    #[arg(short, long, default_value_t = DEFAULT_SCORE)]
    importance: i64,

    /// Urgency score (1-5)
    #[arg(short, long, default_value_t = DEFAULT_SCORE)]
    urgency: i64,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due: Option<NaiveDate>,
}

/// Adds one task as the configured user.
pub fn cmd(args: AddArgs) -> Result<()> {
    let config = Config::read()?;

    let (db, task) = match args.subject.as_deref() {
        Some(subject) => {
            // Bad input is rejected before the store is opened
            let task = from_flags(subject, &args)?;
            let db = Db::new()?;
            let task = match &args.category {
                Some(name) => task.category(resolve_category(&db, name)?),
                None => task,
            };
            (db, task)
        }
        None => {
            let db = Db::new()?;
            let task = prompt(&db)?;
            (db, task)
        }
    };

    let task_id = Tasks::new(&db).insert(&task, config.user())?;
    msg_success!(Message::TaskCreated(task_id, task.subject.trim().to_string()));
    Ok(())
}

/// Builds and validates the task from flags. The category is resolved
/// separately since that needs the store.
fn from_flags(subject: &str, args: &AddArgs) -> Result<NewTask> {
    let mut task = NewTask::new(subject)
        .status(args.status)
        .scores(args.importance, args.urgency);
    if let Some(description) = &args.description {
        task = task.description(description);
    }
    if let Some(due) = args.due {
        task = task.due(due);
    }
    task.validate()?;
    Ok(task)
}

fn resolve_category(db: &Db, name: &str) -> Result<i64> {
    match Categories::new(db).get_by_name(name)? {
        Some(category) => Ok(category.category_id),
        None => msg_bail_anyhow!(Message::CategoryNotFound(name.to_string())),
    }
}

fn prompt(db: &Db) -> Result<NewTask> {
    let theme = ColorfulTheme::default();

    let subject: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskSubject.to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            NewTask::new(input).validate().map_err(|e| e.to_string())
        })
        .interact_text()?;
    let mut task = NewTask::new(&subject);

    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .allow_empty(true)
        .interact_text()?;
    if !description.trim().is_empty() {
        task = task.description(&description);
    }

    let categories = Categories::new(db).list()?;
    if !categories.is_empty() {
        let mut options = vec![Message::NoCategoryOption.to_string()];
        options.extend(categories.iter().map(|c| c.category_name.clone()));
        let selection = Select::with_theme(&theme)
            .with_prompt(Message::PromptTaskCategory.to_string())
            .items(&options)
            .default(0)
            .interact()?;
        if selection > 0 {
            task = task.category(categories[selection - 1].category_id);
        }
    }

    let statuses: Vec<&str> = Status::ALL.iter().map(|s| s.as_str()).collect();
    let default_status = Status::ALL.iter().position(|s| *s == Status::Open).unwrap_or(0);
    let selection = Select::with_theme(&theme)
        .with_prompt(Message::PromptTaskStatus.to_string())
        .items(&statuses)
        .default(default_status)
        .interact()?;
    task = task.status(Status::ALL[selection]);

    let importance = prompt_score(&theme, Message::PromptImportance)?;
    let urgency = prompt_score(&theme, Message::PromptUrgency)?;
    task = task.scores(importance, urgency);

    let due: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptDueDate.to_string())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() || parse_date(input).is_some() {
                Ok(())
            } else {
                Err(Message::InvalidDueDate(input.clone()).to_string())
            }
        })
        .interact_text()?;
    if let Some(date) = parse_date(&due) {
        task = task.due(date);
    }

    Ok(task)
}

fn prompt_score(theme: &ColorfulTheme, prompt: Message) -> Result<i64> {
    let score = Input::with_theme(theme)
        .with_prompt(prompt.to_string())
        .default(DEFAULT_SCORE)
        .validate_with(|input: &i64| -> Result<(), String> {
            if (MIN_SCORE..=MAX_SCORE).contains(input) {
                Ok(())
            } else {
                Err(Message::ScoreRange.to_string())
            }
        })
        .interact_text()?;
    Ok(score)
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::error::TaskError;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct AddCli {
        #[command(flatten)]
        args: AddArgs,
    }

    fn parse(argv: &[&str]) -> AddArgs {
        AddCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn blank_subject_fails_without_a_store() {
        let args = parse(&["add", "   ", "--category", "Work"]);
        let err = from_flags(args.subject.as_deref().unwrap(), &args).unwrap_err();
        let task_error = err.downcast_ref::<TaskError>().unwrap();
        assert!(task_error.is_validation());
    }

    #[test]
    fn out_of_range_score_fails_without_a_store() {
        let args = parse(&["add", "Plan sprint", "--importance", "9"]);
        let err = from_flags("Plan sprint", &args).unwrap_err();
        assert!(err.downcast_ref::<TaskError>().unwrap().is_validation());
    }

    #[test]
    fn flags_fill_the_form() {
        let args = parse(&["add", "Ship it", "-s", "in-progress", "-i", "5", "-u", "4", "--due", "2024-06-01"]);
        let task = from_flags("Ship it", &args).unwrap();
        assert_eq!(task.status, Status::InProgress);
        assert_eq!((task.importance, task.urgency), (5, 4));
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(task.category_id, None);
    }
}
