#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use taskdash::db::categories::{Categories, NewCategory};
    use taskdash::db::db::Db;
    use taskdash::db::tasks::Tasks;
    use taskdash::libs::priority::{PriorityBand, PriorityRule};
    use taskdash::libs::query::{BandSelection, ListView, TaskFilter};
    use taskdash::libs::task::{NewTask, Status, UserId};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
        db: Db,
        user: UserId,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("taskdash.db"), 2).unwrap();
            TaskTestContext {
                _temp_dir: temp_dir,
                db,
                user: UserId(7),
            }
        }
    }

    fn at(date: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_insert_and_read_back(ctx: &mut TaskTestContext) {
        let categories = Categories::new(&ctx.db);
        let ops = categories.create(&NewCategory::new("Ops").code("OPS")).unwrap();
        let tasks = Tasks::new(&ctx.db);

        let new_task = NewTask::new("  Rotate certificates  ")
            .description("Before they expire")
            .category(ops)
            .status(Status::InProgress)
            .scores(5, 4)
            .due(day(2024, 6, 1));
        let id = tasks.insert_at(&new_task, ctx.user, at("2024-05-20 09:30:00")).unwrap();

        let task = tasks.get_by_id(id).unwrap().unwrap();
        assert_eq!(task.subject, "Rotate certificates");
        assert_eq!(task.description.as_deref(), Some("Before they expire"));
        assert_eq!(task.category_name.as_deref(), Some("Ops"));
        assert_eq!(task.status, Status::InProgress);
        assert_eq!((task.importance, task.urgency), (5, 4));
        assert_eq!(task.due_date, Some(day(2024, 6, 1)));
        assert_eq!(task.created_at, at("2024-05-20 09:30:00"));
        assert_eq!(task.created_by, 7);
        assert_eq!(task.assigned_to, 7);
        assert_eq!(task.priority(), PriorityBand::High);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_invalid_task_is_rejected_before_write(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let blank = tasks.insert(&NewTask::new("   "), ctx.user).unwrap_err();
        assert!(blank.is_validation());

        let out_of_range = tasks.insert(&NewTask::new("Score too high").scores(6, 3), ctx.user).unwrap_err();
        assert!(out_of_range.is_validation());

        let too_long = tasks.insert(&NewTask::new(&"x".repeat(501)), ctx.user).unwrap_err();
        assert!(too_long.is_validation());

        assert!(tasks.fetch(&TaskFilter::new(), ListView::Recent).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_unknown_category_is_not_found(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let err = tasks.insert(&NewTask::new("Orphan").category(99), ctx.user).unwrap_err();
        assert!(err.is_not_found());
        assert!(tasks.fetch(&TaskFilter::new(), ListView::Recent).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_recent_list_is_newest_first(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        tasks.insert_at(&NewTask::new("First"), ctx.user, at("2024-05-01 08:00:00")).unwrap();
        tasks.insert_at(&NewTask::new("Third"), ctx.user, at("2024-05-03 08:00:00")).unwrap();
        tasks.insert_at(&NewTask::new("Second"), ctx.user, at("2024-05-02 08:00:00")).unwrap();

        let subjects: Vec<String> = tasks
            .fetch(&TaskFilter::new(), ListView::Recent)
            .unwrap()
            .into_iter()
            .map(|t| t.subject)
            .collect();
        assert_eq!(subjects, vec!["Third", "Second", "First"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_filters_combine_with_and(ctx: &mut TaskTestContext) {
        let categories = Categories::new(&ctx.db);
        let work = categories.create(&NewCategory::new("Work")).unwrap();
        let home = categories.create(&NewCategory::new("Home")).unwrap();
        let tasks = Tasks::new(&ctx.db);

        tasks.insert(&NewTask::new("Deploy release").category(work).scores(5, 5), ctx.user).unwrap();
        tasks.insert(&NewTask::new("Plan roadmap").category(work).scores(4, 2), ctx.user).unwrap();
        tasks
            .insert(&NewTask::new("Fix sink").category(home).scores(4, 4).status(Status::Blocked), ctx.user)
            .unwrap();
        tasks.insert(&NewTask::new("Water plants").scores(1, 1), ctx.user).unwrap();

        let filter = TaskFilter::new()
            .statuses(vec![Status::Open])
            .category("Work")
            .priority(BandSelection::Only(PriorityBand::High), PriorityRule::BothAtLeastThree);
        let found = tasks.fetch(&filter, ListView::Filtered).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject, "Deploy release");

        let all_categories = TaskFilter::new().category("All");
        assert_eq!(tasks.fetch(&all_categories, ListView::Filtered).unwrap().len(), 4);

        let no_match = TaskFilter::new().category("Home").statuses(vec![Status::Open]);
        assert!(tasks.fetch(&no_match, ListView::Filtered).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_priority_rules_disagree(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        tasks.insert(&NewTask::new("Strategic").scores(5, 1), ctx.user).unwrap();
        tasks.insert(&NewTask::new("Balanced").scores(3, 3), ctx.user).unwrap();

        let high_v1 = TaskFilter::new().priority(BandSelection::Only(PriorityBand::High), PriorityRule::BothAtLeastThree);
        let found: Vec<String> = tasks
            .fetch(&high_v1, ListView::Filtered)
            .unwrap()
            .into_iter()
            .map(|t| t.subject)
            .collect();
        assert_eq!(found, vec!["Balanced"]);

        let high_v2 = TaskFilter::new().priority(BandSelection::Only(PriorityBand::High), PriorityRule::EitherAtLeastFour);
        let found: Vec<String> = tasks
            .fetch(&high_v2, ListView::Filtered)
            .unwrap()
            .into_iter()
            .map(|t| t.subject)
            .collect();
        assert_eq!(found, vec!["Strategic"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_search_is_case_insensitive_and_literal(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        tasks.insert(&NewTask::new("Review Budget"), ctx.user).unwrap();
        tasks.insert(&NewTask::new("Team lunch").description("discuss budget"), ctx.user).unwrap();
        tasks.insert(&NewTask::new("Reach 100% coverage"), ctx.user).unwrap();
        tasks.insert(&NewTask::new("Reach 1000 users"), ctx.user).unwrap();

        let budget = TaskFilter::new().search("BUDGET");
        assert_eq!(tasks.fetch(&budget, ListView::Filtered).unwrap().len(), 2);
        // Recent view searches subjects only
        assert_eq!(tasks.fetch(&budget, ListView::Recent).unwrap().len(), 1);

        let percent = TaskFilter::new().search("100%");
        let found = tasks.fetch(&percent, ListView::Filtered).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject, "Reach 100% coverage");

        let quote = TaskFilter::new().search("'; DROP TABLE tasks; --");
        assert!(tasks.fetch(&quote, ListView::Filtered).unwrap().is_empty());
        assert_eq!(tasks.fetch(&TaskFilter::new(), ListView::Recent).unwrap().len(), 4);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_search_folds_non_ascii_letters(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        tasks.insert(&NewTask::new("Über review"), ctx.user).unwrap();
        tasks.insert(&NewTask::new("Ärger mit Kunde"), ctx.user).unwrap();
        tasks.insert(&NewTask::new("Plain task").description("ÉTÉ planning"), ctx.user).unwrap();

        let exact = tasks.fetch(&TaskFilter::new().search("Über"), ListView::Filtered).unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].subject, "Über review");

        let lowered = tasks.fetch(&TaskFilter::new().search("ärger"), ListView::Filtered).unwrap();
        assert_eq!(lowered.len(), 1);
        assert_eq!(lowered[0].subject, "Ärger mit Kunde");

        let in_description = tasks.fetch(&TaskFilter::new().search("été"), ListView::Filtered).unwrap();
        assert_eq!(in_description.len(), 1);
        assert!(tasks.fetch(&TaskFilter::new().search("été"), ListView::Recent).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_filtered_list_orders_by_due_date_then_priority(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        tasks.insert(&NewTask::new("Later").due(day(2024, 7, 1)).scores(5, 5), ctx.user).unwrap();
        tasks.insert(&NewTask::new("Soon, minor").due(day(2024, 6, 1)).scores(2, 2), ctx.user).unwrap();
        tasks.insert(&NewTask::new("Soon, major").due(day(2024, 6, 1)).scores(5, 2), ctx.user).unwrap();

        let filter = TaskFilter::new().statuses(vec![Status::Open]);
        let subjects: Vec<String> = tasks
            .fetch(&filter, ListView::Filtered)
            .unwrap()
            .into_iter()
            .map(|t| t.subject)
            .collect();
        assert_eq!(subjects, vec!["Soon, major", "Soon, minor", "Later"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_complete_task(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let id = tasks.insert(&NewTask::new("Ship it"), ctx.user).unwrap();

        tasks.complete(id, ctx.user).unwrap();
        assert_eq!(tasks.get_by_id(id).unwrap().unwrap().status, Status::Closed);

        let err = tasks.complete(id + 100, ctx.user).unwrap_err();
        assert!(err.is_not_found());
    }
}
