#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64, String), // id, subject
    TaskCompleted(i64),
    TaskNotFoundWithId(i64),
    TasksFound(usize),
    NoTasksMatchingFilters,
    PromptTaskSubject,
    PromptTaskDescription,
    PromptTaskCategory,
    PromptTaskStatus,
    PromptImportance,
    PromptUrgency,
    PromptDueDate,
    InvalidDueDate(String),
    ScoreRange,
    NoCategoryOption,
    ConfirmCompleteTask(String),

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryNotFound(String),
    CategoryListHeader,
    NoCategoriesFound,

    // === DASHBOARD MESSAGES ===
    DashboardHeader,
    SidebarHeader,
    StatusDistributionHeader,
    CategoryBreakdownHeader,
    MatrixHeader,
    RecentActivityHeader(i64), // days
    NoActiveTasks,
    NoTasksYet,
    NoRecentActivity,
    NoCategorizedTasks,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleDatabase,
    ConfigModuleDashboard,
    PromptDatabasePath,
    PromptPoolSize,
    PoolSizeRange,
    PromptUserId,
    PromptCategoryLimit,
    PromptActivityDays,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String), // version, name
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,
    DatabaseVersion(u32, u32), // current, latest
    MigrationHistory,
    NoMigrationsApplied,

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // path
    OutputNeedsFormat,

    // === GENERIC ===
    OperationCancelled,
}
