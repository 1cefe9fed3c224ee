//! Integration tests for the task, modification, user and stats repositories.

use chrono::{Duration, Utc};
use crewboard_core::project::ProjectStatus;
use crewboard_core::task::{SubmissionStatus, TaskPriority, TaskStatus};
use crewboard_core::task_modification::{ModificationStatus, ProposedChanges};
use crewboard_db::models::task::{CreateTask, Task, TaskSubmission, UNKNOWN_PROJECT_NAME};
use crewboard_db::models::task_modification::CreateTaskModification;
use crewboard_db::models::user::UpsertUser;
use crewboard_db::repositories::{ProjectRepo, StatsRepo, TaskModificationRepo, TaskRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_task(pool: &PgPool, project_id: i64, assignee: &str) -> Task {
    let input = CreateTask {
        project_id,
        user_email: assignee.to_string(),
        created_by: "lead@x.com".to_string(),
        title: "Write docs".to_string(),
        description: "Document the API".to_string(),
        deliverables: None,
        platform: None,
        deadline: Utc::now() + Duration::days(7),
        priority: TaskPriority::default(),
    };
    TaskRepo::create(pool, &input)
        .await
        .expect("task creation should succeed")
}

fn submission(status: SubmissionStatus) -> TaskSubmission {
    let now = Utc::now();
    TaskSubmission {
        link: "https://example.com/pr/1".to_string(),
        description: "Done".to_string(),
        status,
        submitted_at: now,
        feedback: None,
        last_updated: now,
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_task_has_defaults(pool: PgPool) {
    let project = ProjectRepo::create(&pool, "Atlas", None, ProjectStatus::InProgress)
        .await
        .unwrap();
    let task = create_task(&pool, project.id, "user@x.com").await;

    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert!(task.submission.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignee_lookup_hides_foreign_tasks(pool: PgPool) {
    let project = ProjectRepo::create(&pool, "Atlas", None, ProjectStatus::InProgress)
        .await
        .unwrap();
    let task = create_task(&pool, project.id, "user@x.com").await;

    let mine = TaskRepo::find_for_assignee(&pool, task.id, project.id, "user@x.com")
        .await
        .unwrap();
    assert!(mine.is_some());

    let foreign = TaskRepo::find_for_assignee(&pool, task.id, project.id, "other@x.com")
        .await
        .unwrap();
    let missing = TaskRepo::find_for_assignee(&pool, task.id + 1000, project.id, "user@x.com")
        .await
        .unwrap();
    assert!(foreign.is_none());
    assert!(missing.is_none());

    let wrong_project = TaskRepo::find_in_project(&pool, task.id, project.id + 1000)
        .await
        .unwrap();
    assert!(wrong_project.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assigned_list_uses_placeholder_for_missing_project(pool: PgPool) {
    let project = ProjectRepo::create(&pool, "Atlas", None, ProjectStatus::InProgress)
        .await
        .unwrap();
    create_task(&pool, project.id, "user@x.com").await;
    create_task(&pool, 424_242, "user@x.com").await;
    create_task(&pool, project.id, "other@x.com").await;

    let all = TaskRepo::list_for_assignee(&pool, "user@x.com", None).await.unwrap();
    assert_eq!(all.len(), 2);
    let names: Vec<&str> = all.iter().map(|t| t.project_name.as_str()).collect();
    assert!(names.contains(&"Atlas"));
    assert!(names.contains(&UNKNOWN_PROJECT_NAME));

    let filtered = TaskRepo::list_for_assignee(&pool, "user@x.com", Some(project.id))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].project_name, "Atlas");
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_pending_submission_is_refused(pool: PgPool) {
    let task = create_task(&pool, 1, "user@x.com").await;

    let submitted = TaskRepo::submit(
        &pool,
        task.id,
        TaskStatus::Pending,
        TaskStatus::InProgress,
        &submission(SubmissionStatus::Pending),
    )
    .await
    .unwrap()
    .expect("first submission should land");
    assert_eq!(submitted.status, TaskStatus::InProgress);
    assert_eq!(submitted.submission_status(), Some(SubmissionStatus::Pending));

    let again = TaskRepo::submit(
        &pool,
        task.id,
        TaskStatus::InProgress,
        TaskStatus::InProgress,
        &submission(SubmissionStatus::Pending),
    )
    .await
    .unwrap();
    assert!(again.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approving_submission_completes_task(pool: PgPool) {
    let task = create_task(&pool, 1, "user@x.com").await;
    TaskRepo::submit(
        &pool,
        task.id,
        TaskStatus::Pending,
        TaskStatus::InProgress,
        &submission(SubmissionStatus::Pending),
    )
    .await
    .unwrap()
    .unwrap();

    let reviewed = TaskRepo::review_submission(
        &pool,
        task.id,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        &submission(SubmissionStatus::Approved),
    )
    .await
    .unwrap()
    .expect("pending submission should be reviewed");
    assert_eq!(reviewed.status, TaskStatus::Completed);
    assert_eq!(reviewed.submission_status(), Some(SubmissionStatus::Approved));

    let completed = StatsRepo::count_completed_tasks_for(&pool, "user@x.com").await.unwrap();
    assert_eq!(completed, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_submission_holds_back_completion(pool: PgPool) {
    let task = create_task(&pool, 1, "user@x.com").await;
    TaskRepo::submit(
        &pool,
        task.id,
        TaskStatus::Pending,
        TaskStatus::InProgress,
        &submission(SubmissionStatus::Pending),
    )
    .await
    .unwrap()
    .unwrap();

    let completed = TaskRepo::update_status(&pool, task.id, TaskStatus::InProgress, TaskStatus::Completed)
        .await
        .unwrap();
    assert!(completed.is_none());

    let rejected = TaskRepo::review_submission(
        &pool,
        task.id,
        TaskStatus::InProgress,
        TaskStatus::InProgress,
        &submission(SubmissionStatus::Rejected),
    )
    .await
    .unwrap()
    .expect("pending submission should be reviewed");
    assert_eq!(rejected.status, TaskStatus::InProgress);

    let completed = TaskRepo::update_status(&pool, task.id, TaskStatus::InProgress, TaskStatus::Completed)
        .await
        .unwrap()
        .expect("rejected submission no longer blocks completion");
    assert_eq!(completed.status, TaskStatus::Completed);
}

// ---------------------------------------------------------------------------
// Modifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn approved_modification_applies_changes(pool: PgPool) {
    let task = create_task(&pool, 1, "user@x.com").await;
    let changes = ProposedChanges {
        title: Some("Write better docs".to_string()),
        platform: Some("Web".to_string()),
        ..Default::default()
    };
    let modification = TaskModificationRepo::create(
        &pool,
        &CreateTaskModification {
            task_id: task.id,
            proposed_changes: changes,
            comments: Some("scope grew".to_string()),
            requested_by: "user@x.com".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(modification.status, ModificationStatus::Pending);

    let reviewed = TaskModificationRepo::review(&pool, modification.id, ModificationStatus::Approved, "admin")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reviewed.status, ModificationStatus::Approved);
    assert_eq!(reviewed.reviewed_by.as_deref(), Some("admin"));

    let updated = TaskRepo::find_by_id(&pool, task.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Write better docs");
    assert_eq!(updated.platform.as_deref(), Some("Web"));
    assert_eq!(updated.description, task.description);
    assert_eq!(updated.deadline, task.deadline);

    let again = TaskModificationRepo::review(&pool, modification.id, ModificationStatus::Rejected, "admin")
        .await
        .unwrap();
    assert!(again.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_modification_leaves_task_alone(pool: PgPool) {
    let task = create_task(&pool, 1, "user@x.com").await;
    let modification = TaskModificationRepo::create(
        &pool,
        &CreateTaskModification {
            task_id: task.id,
            proposed_changes: ProposedChanges {
                title: Some("Other".to_string()),
                ..Default::default()
            },
            comments: None,
            requested_by: "user@x.com".to_string(),
        },
    )
    .await
    .unwrap();

    TaskModificationRepo::review(&pool, modification.id, ModificationStatus::Rejected, "lead@x.com")
        .await
        .unwrap()
        .unwrap();

    let unchanged = TaskRepo::find_by_id(&pool, task.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, task.title);

    let listed = TaskModificationRepo::list_for_task(&pool, task.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, ModificationStatus::Rejected);
}

// ---------------------------------------------------------------------------
// Users and stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_keeps_one_row_per_email(pool: PgPool) {
    let first = UserRepo::upsert(
        &pool,
        "user@x.com",
        &UpsertUser {
            name: Some("Ada".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let second = UserRepo::upsert(
        &pool,
        "user@x.com",
        &UpsertUser {
            image: Some("https://img.example.com/a.png".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name.as_deref(), Some("Ada"));
    assert_eq!(second.image.as_deref(), Some("https://img.example.com/a.png"));
    assert_eq!(UserRepo::list(&pool).await.unwrap().len(), 1);
    assert_eq!(StatsRepo::count_active_users(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn platform_counts(pool: PgPool) {
    ProjectRepo::create(&pool, "A", None, ProjectStatus::Open).await.unwrap();
    ProjectRepo::create(&pool, "B", None, ProjectStatus::ComingSoon).await.unwrap();

    assert_eq!(StatsRepo::count_projects(&pool).await.unwrap(), 2);
    assert_eq!(StatsRepo::count_open_projects(&pool).await.unwrap(), 1);
    assert_eq!(StatsRepo::count_tasks(&pool).await.unwrap(), 0);
    assert_eq!(StatsRepo::count_pending_applications(&pool).await.unwrap(), 0);
    assert_eq!(
        StatsRepo::count_active_applications_for(&pool, "user@x.com").await.unwrap(),
        0
    );
}
