#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use taskdash::db::categories::{Categories, NewCategory};
    use taskdash::db::db::Db;
    use taskdash::db::stats::{CategoryCount, DailyActivity, Stats};
    use taskdash::db::tasks::Tasks;
    use taskdash::libs::priority::Quadrant;
    use taskdash::libs::task::{NewTask, Status, UserId};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StatsTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for StatsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("taskdash.db"), 2).unwrap();
            StatsTestContext { _temp_dir: temp_dir, db }
        }
    }

    impl StatsTestContext {
        fn add(&self, task: NewTask, created_at: &str) -> i64 {
            Tasks::new(&self.db).insert_at(&task, UserId::default(), at(created_at)).unwrap()
        }
    }

    fn at(date: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Reference day is Wednesday 2024-05-15; its week runs 05-12..05-18.
    fn seed_week(ctx: &StatsTestContext) {
        let created = "2024-05-10 10:00:00";
        ctx.add(NewTask::new("Sunday deadline").scores(5, 5).due(day(2024, 5, 12)), created);
        ctx.add(
            NewTask::new("Saturday deadline").status(Status::InProgress).scores(4, 4).due(day(2024, 5, 18)),
            created,
        );
        ctx.add(NewTask::new("Next week").scores(2, 2).due(day(2024, 5, 19)), created);
        ctx.add(NewTask::new("Done today").status(Status::Closed).scores(5, 5).due(day(2024, 5, 15)), created);
        ctx.add(NewTask::new("Due today").scores(3, 3).due(day(2024, 5, 15)), created);
        ctx.add(NewTask::new("Parked").status(Status::Deferred).scores(4, 4).due(day(2024, 5, 10)), created);
        ctx.add(NewTask::new("Stuck").status(Status::Blocked).scores(4, 5), created);
        ctx.add(NewTask::new("Long closed").status(Status::Closed), "2024-03-01 10:00:00");
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_empty_store(ctx: &mut StatsTestContext) {
        let stats = Stats::new(&ctx.db);
        let summary = stats.summary_at(at("2024-05-15 12:00:00")).unwrap();

        assert_eq!(summary.active_tasks, 0);
        assert_eq!(summary.due_this_week, 0);
        assert_eq!(summary.high_priority, 0);
        assert_eq!(summary.completion_rate, 0.0);
        assert!(stats.status_distribution().unwrap().is_empty());
        assert!(stats.category_breakdown(10).unwrap().is_empty());
        assert!(stats.quadrant_breakdown().unwrap().is_empty());
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_metric_cards(ctx: &mut StatsTestContext) {
        seed_week(ctx);
        let stats = Stats::new(&ctx.db);
        let reference = day(2024, 5, 15);

        assert_eq!(stats.count_active_tasks().unwrap(), 6);
        assert_eq!(stats.count_due_this_week_on(reference).unwrap(), 3);
        assert_eq!(stats.count_high_priority().unwrap(), 3);
        assert_eq!(stats.count_due_on(reference).unwrap(), 1);
        assert_eq!(stats.count_overdue_on(reference).unwrap(), 1);

        let rate = stats.completion_rate_last_30_days_at(at("2024-05-15 12:00:00")).unwrap();
        assert!((rate - 100.0 / 7.0).abs() < 1e-9);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_summary_matches_individual_counts(ctx: &mut StatsTestContext) {
        seed_week(ctx);
        let stats = Stats::new(&ctx.db);
        let summary = stats.summary_at(at("2024-05-15 12:00:00")).unwrap();

        assert_eq!(summary.active_tasks, 6);
        assert_eq!(summary.due_this_week, 3);
        assert_eq!(summary.high_priority, 3);
        assert_eq!(summary.due_today, 1);
        assert_eq!(summary.overdue, 1);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_status_distribution_is_largest_first(ctx: &mut StatsTestContext) {
        seed_week(ctx);
        let distribution = Stats::new(&ctx.db).status_distribution().unwrap();

        assert_eq!(distribution.len(), 5);
        assert_eq!((distribution[0].status, distribution[0].count), (Status::Open, 3));
        assert_eq!((distribution[1].status, distribution[1].count), (Status::Closed, 2));
        assert_eq!(distribution.iter().map(|s| s.count).sum::<i64>(), 8);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_category_breakdown_skips_empty_categories(ctx: &mut StatsTestContext) {
        let categories = Categories::new(&ctx.db);
        let work = categories.create(&NewCategory::new("Work")).unwrap();
        let home = categories.create(&NewCategory::new("Home")).unwrap();
        categories.create(&NewCategory::new("Empty")).unwrap();

        for subject in ["Report", "Review", "Retro"] {
            ctx.add(NewTask::new(subject).category(work), "2024-05-10 10:00:00");
        }
        ctx.add(NewTask::new("Laundry").category(home), "2024-05-10 10:00:00");
        ctx.add(NewTask::new("Uncategorized"), "2024-05-10 10:00:00");

        let stats = Stats::new(&ctx.db);
        assert_eq!(
            stats.category_breakdown(10).unwrap(),
            vec![
                CategoryCount { category_name: "Work".to_string(), count: 3 },
                CategoryCount { category_name: "Home".to_string(), count: 1 },
            ]
        );
        assert_eq!(stats.category_breakdown(1).unwrap().len(), 1);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_quadrant_samples_are_capped(ctx: &mut StatsTestContext) {
        for n in 1..=5 {
            ctx.add(NewTask::new(&format!("Urgent {}", n)).scores(4, 4), "2024-05-10 10:00:00");
        }
        ctx.add(NewTask::new("Strategy").scores(4, 1), "2024-05-10 10:00:00");
        ctx.add(NewTask::new("Finished").status(Status::Closed).scores(5, 5), "2024-05-10 10:00:00");
        ctx.add(NewTask::new("Someday").status(Status::Deferred).scores(1, 1), "2024-05-10 10:00:00");

        let quadrants = Stats::new(&ctx.db).quadrant_breakdown().unwrap();

        assert_eq!(quadrants.len(), 2);
        assert_eq!(quadrants[0].quadrant, Quadrant::DoFirst);
        assert_eq!(quadrants[0].count, 5);
        assert_eq!(quadrants[0].sample_subjects, vec!["Urgent 1", "Urgent 2", "Urgent 3"]);
        assert_eq!(quadrants[1].quadrant, Quadrant::Schedule);
        assert_eq!(quadrants[1].count, 1);
        assert_eq!(quadrants[1].sample_subjects, vec!["Strategy"]);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_recent_activity_groups_by_creation_day(ctx: &mut StatsTestContext) {
        ctx.add(NewTask::new("Old"), "2024-05-01 10:00:00");
        ctx.add(NewTask::new("Morning"), "2024-05-14 10:00:00");
        ctx.add(NewTask::new("Quick win").status(Status::Closed), "2024-05-14 11:00:00");
        ctx.add(NewTask::new("Today"), "2024-05-15 09:00:00");

        let activity = Stats::new(&ctx.db).recent_activity_at(7, at("2024-05-15 12:00:00")).unwrap();

        assert_eq!(
            activity,
            vec![
                DailyActivity { date: day(2024, 5, 15), created: 1, completed: 0 },
                DailyActivity { date: day(2024, 5, 14), created: 2, completed: 1 },
            ]
        );
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_oversized_activity_window_is_rejected(ctx: &mut StatsTestContext) {
        ctx.add(NewTask::new("Today"), "2024-05-15 09:00:00");
        let stats = Stats::new(&ctx.db);
        let now = at("2024-05-15 12:00:00");

        let err = stats.recent_activity_at(1_000_000_000, now).unwrap_err();
        assert!(err.is_validation());
        assert!(stats.recent_activity_at(i64::MAX, now).unwrap_err().is_validation());

        // Negative windows collapse to "since now"
        assert!(stats.recent_activity_at(-5, now).unwrap().is_empty());
        assert_eq!(stats.recent_activity_at(3650, now).unwrap().len(), 1);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_completing_a_task_moves_the_rate(ctx: &mut StatsTestContext) {
        let first = ctx.add(NewTask::new("One"), "2024-05-14 10:00:00");
        ctx.add(NewTask::new("Two"), "2024-05-14 10:00:00");
        let stats = Stats::new(&ctx.db);
        let now = at("2024-05-15 12:00:00");

        assert_eq!(stats.completion_rate_last_30_days_at(now).unwrap(), 0.0);
        Tasks::new(&ctx.db).complete(first, UserId::default()).unwrap();
        assert_eq!(stats.completion_rate_last_30_days_at(now).unwrap(), 50.0);
    }
}
