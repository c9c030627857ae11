#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};
    use taskd::db::db::Db;
    use taskd::db::tasks::Tasks;
    use taskd::libs::commands::{CreateTaskCommand, UpdateTaskCommand};
    use taskd::libs::errors::TaskError;
    use taskd::libs::ident;
    use taskd::libs::usecase::TaskUseCase;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct UseCaseTestContext {
        usecase: TaskUseCase,
        store: Tasks,
        _temp_dir: TempDir,
    }

    impl TestContext for UseCaseTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("taskd.db")).unwrap();
            let store = Tasks::new(db);
            UseCaseTestContext {
                usecase: TaskUseCase::new(store.clone()),
                store,
                _temp_dir: temp_dir,
            }
        }
    }

    fn create_cmd(title: &str, due_date: Option<String>) -> CreateTaskCommand {
        CreateTaskCommand {
            title: Some(title.into()),
            description: Some("This is a test task".into()),
            due_date,
        }
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn create_assigns_id_and_defaults(ctx: &mut UseCaseTestContext) {
        let task = ctx.usecase.create_task(&create_cmd("Test Task", None)).unwrap();

        assert!(ident::is_valid(&task.id));
        assert_eq!(task.title, "Test Task");
        assert_eq!(task.description, "This is a test task");
        // Omitted due date defaults to tomorrow.
        assert_eq!(task.due_date, (Local::now() + Duration::hours(24)).date_naive());
        assert!(!task.overdue);
        assert!(!task.completed);
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn create_then_fetch_yields_identical_fields(ctx: &mut UseCaseTestContext) {
        let due = (Local::now().date_naive() + Duration::days(4)).format("%Y-%m-%d").to_string();
        let created = ctx.usecase.create_task(&create_cmd("Test Task", Some(due))).unwrap();

        let fetched = ctx.store.get_by_id(&created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn created_ids_are_never_reused(ctx: &mut UseCaseTestContext) {
        let a = ctx.usecase.create_task(&create_cmd("Test Task", None)).unwrap();
        let b = ctx.usecase.create_task(&create_cmd("Test Task", None)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn get_tasks_is_empty_sequence_not_error(ctx: &mut UseCaseTestContext) {
        assert!(ctx.usecase.get_tasks().unwrap().is_empty());
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn update_merges_unset_fields_from_previous_state(ctx: &mut UseCaseTestContext) {
        let created = ctx.usecase.create_task(&create_cmd("Test Task", None)).unwrap();

        let cmd = UpdateTaskCommand {
            title: Some("Renamed".into()),
            ..Default::default()
        };
        let merged = ctx.usecase.update_task(&created.id, &cmd).unwrap();

        assert_eq!(merged.title, "Renamed");
        assert_eq!(merged.description, created.description);
        assert_eq!(merged.due_date, created.due_date);

        // The merged view matches post-update storage state.
        assert_eq!(ctx.store.get_by_id(&created.id).unwrap(), merged);
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn update_with_due_date_resets_overdue_in_merged_view(ctx: &mut UseCaseTestContext) {
        let created = ctx.usecase.create_task(&create_cmd("Test Task", None)).unwrap();

        // Force the stored row overdue, as the sweeper would.
        ctx.store.sweep_overdue(created.due_date).unwrap();
        assert!(ctx.store.get_by_id(&created.id).unwrap().overdue);

        let new_due = (Local::now().date_naive() + Duration::days(10)).format("%Y-%m-%d").to_string();
        let cmd = UpdateTaskCommand {
            due_date: Some(new_due),
            ..Default::default()
        };
        let merged = ctx.usecase.update_task(&created.id, &cmd).unwrap();

        assert!(!merged.overdue);
        assert!(!ctx.store.get_by_id(&created.id).unwrap().overdue);
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn due_date_boundary_binds_at_validation_time_only(ctx: &mut UseCaseTestContext) {
        let created = ctx.usecase.create_task(&create_cmd("Test Task", None)).unwrap();

        // A command that passed validation yesterday may reach the
        // orchestrator after midnight with a now-past date. The write and
        // the merged view must still go through; only validate() rejects.
        let past = (Local::now().date_naive() - Duration::days(1)).format("%Y-%m-%d").to_string();
        let cmd = UpdateTaskCommand {
            due_date: Some(past),
            ..Default::default()
        };
        assert!(matches!(cmd.validate(), Err(TaskError::InvalidDueDate)));

        let merged = ctx.usecase.update_task(&created.id, &cmd).unwrap();
        assert_eq!(merged.due_date, Local::now().date_naive() - Duration::days(1));
        assert!(!merged.overdue);
        assert_eq!(ctx.store.get_by_id(&created.id).unwrap(), merged);
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn operations_on_missing_id_propagate_not_found(ctx: &mut UseCaseTestContext) {
        let missing = ident::generate();

        let cmd = UpdateTaskCommand {
            title: Some("Renamed".into()),
            ..Default::default()
        };
        assert!(matches!(ctx.usecase.update_task(&missing, &cmd), Err(TaskError::NotFound)));
        assert!(matches!(ctx.usecase.delete_task(&missing), Err(TaskError::NotFound)));
        assert!(matches!(
            ctx.usecase.change_completion(&missing, true),
            Err(TaskError::NotFound)
        ));
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn change_completion_returns_task_with_new_flag(ctx: &mut UseCaseTestContext) {
        let created = ctx.usecase.create_task(&create_cmd("Test Task", None)).unwrap();

        let completed = ctx.usecase.change_completion(&created.id, true).unwrap();
        assert!(completed.completed);
        assert!(ctx.store.get_by_id(&created.id).unwrap().completed);

        let reopened = ctx.usecase.change_completion(&created.id, false).unwrap();
        assert!(!reopened.completed);
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn delete_removes_the_task(ctx: &mut UseCaseTestContext) {
        let created = ctx.usecase.create_task(&create_cmd("Test Task", None)).unwrap();
        ctx.usecase.delete_task(&created.id).unwrap();
        assert!(matches!(ctx.store.get_by_id(&created.id), Err(TaskError::NotFound)));
    }

    #[test_context(UseCaseTestContext)]
    #[test]
    fn update_overdue_tasks_counts_swept_rows(ctx: &mut UseCaseTestContext) {
        // Due today: swept. Due far out: untouched.
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let far = (Local::now().date_naive() + Duration::days(30)).format("%Y-%m-%d").to_string();
        ctx.usecase.create_task(&create_cmd("Due today", Some(today))).unwrap();
        ctx.usecase.create_task(&create_cmd("Due later", Some(far))).unwrap();

        assert_eq!(ctx.usecase.update_overdue_tasks().unwrap(), 1);
        assert_eq!(ctx.usecase.update_overdue_tasks().unwrap(), 0);
    }
}
