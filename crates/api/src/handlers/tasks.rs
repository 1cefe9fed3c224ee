//! Handlers for tasks and their work submissions.
//!
//! A task is only visible to its assignee and to admins. For anyone else a
//! task that exists is reported exactly like a task that does not.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use crewboard_core::authz::{require, RequiredRole};
use crewboard_core::error::CoreError;
use crewboard_core::identity::{normalize_email, same_email, Identity};
use crewboard_core::lifecycle::Transition;
use crewboard_core::task::{
    ensure_can_submit, parse_review, plan_status_change, plan_submission_review,
    status_after_review, status_after_submission, validate_new_task, validate_submission,
    SubmissionStatus, TaskPriority, TaskStatus,
};
use crewboard_core::types::DbId;
use crewboard_db::models::task::{
    CreateTask, CreateTaskRequest, ReviewSubmission, SubmitWork, Task, TaskListParams,
    TaskSubmission, TaskWithProject, UpdateTaskStatus,
};
use crewboard_db::repositories::TaskRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::handlers::projects::find_project;
use crate::middleware::auth::Caller;
use crate::middleware::rbac::{RequireAdmin, RequireUser};
use crate::response::DataResponse;
use crate::state::AppState;

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

/// Load a task the caller is allowed to see: any task for an admin, only
/// their own for a user.
async fn find_visible_task(state: &AppState, identity: &Identity, id: DbId) -> AppResult<Task> {
    require(&RequiredRole::AnyUser, identity)?;
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    if identity.is_admin() {
        return Ok(task);
    }
    match identity.email() {
        Some(email) if same_email(email, &task.user_email) => Ok(task),
        _ => Err(task_not_found(id)),
    }
}

fn conflict(message: &str) -> AppError {
    AppError::Core(CoreError::Conflict(message.to_string()))
}

/// POST /api/v1/projects/{id}/tasks
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(project_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Task>>)> {
    input.validate()?;
    validate_new_task(&input.title, &input.description)?;
    let assignee = normalize_email(&input.user_email).ok_or_else(|| {
        AppError::Core(CoreError::Validation("user_email must be a valid email".into()))
    })?;
    let priority = match input.priority.as_deref() {
        Some(raw) => raw.parse()?,
        None => TaskPriority::default(),
    };
    find_project(&state, project_id).await?;

    let new = CreateTask {
        project_id,
        user_email: assignee,
        created_by: admin.actor().to_string(),
        title: input.title.trim().to_string(),
        description: input.description,
        deliverables: input.deliverables,
        platform: input.platform,
        deadline: input.deadline,
        priority,
    };
    let task = TaskRepo::create(&state.pool, &new).await?;

    tracing::info!(task_id = task.id, project_id, assignee = %task.user_email, "Task created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(task))))
}

/// GET /api/v1/tasks?project_id=
pub async fn list_assigned(
    State(state): State<AppState>,
    user: RequireUser,
    ApiQuery(params): ApiQuery<TaskListParams>,
) -> AppResult<Json<DataResponse<Vec<TaskWithProject>>>> {
    let tasks = TaskRepo::list_for_assignee(&state.pool, &user.email, params.project_id).await?;
    Ok(Json(DataResponse::new(tasks)))
}

/// GET /api/v1/projects/{id}/tasks/{task_id}
pub async fn get_one(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath((project_id, task_id)): ApiPath<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Task>>> {
    require(&RequiredRole::AnyUser, &identity)?;

    let found = match identity.email() {
        _ if identity.is_admin() => {
            TaskRepo::find_in_project(&state.pool, task_id, project_id).await?
        }
        Some(email) => {
            TaskRepo::find_for_assignee(&state.pool, task_id, project_id, email).await?
        }
        None => None,
    };

    let task = found.ok_or_else(|| task_not_found(task_id))?;
    Ok(Json(DataResponse::new(task)))
}

/// PATCH /api/v1/tasks/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateTaskStatus>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = find_visible_task(&state, &identity, id).await?;
    let requested: TaskStatus = input.status.parse()?;

    if plan_status_change(task.status, requested, task.submission_status())? == Transition::Unchanged {
        return Ok(Json(DataResponse::new(task).with_message("Task status unchanged")));
    }

    let updated = TaskRepo::update_status(&state.pool, id, task.status, requested)
        .await?
        .ok_or_else(|| conflict("Task status was changed concurrently; reload and retry"))?;

    tracing::info!(
        task_id = id,
        from = %task.status,
        to = %updated.status,
        actor = identity.actor(),
        "Task status changed"
    );
    Ok(Json(DataResponse::new(updated)))
}

/// PUT /api/v1/tasks/{id}/submission
pub async fn submit_work(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<SubmitWork>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = find_visible_task(&state, &identity, id).await?;
    validate_submission(&input.link, &input.description)?;
    ensure_can_submit(task.status, task.submission_status())?;

    let now = Utc::now();
    let submission = TaskSubmission {
        link: input.link.trim().to_string(),
        description: input.description,
        status: SubmissionStatus::Pending,
        submitted_at: now,
        feedback: None,
        last_updated: now,
    };
    let next = status_after_submission(task.status);

    let updated = TaskRepo::submit(&state.pool, id, task.status, next, &submission)
        .await?
        .ok_or_else(|| conflict("Task changed while submitting; reload and retry"))?;

    tracing::info!(task_id = id, actor = identity.actor(), "Work submitted");
    Ok(Json(
        DataResponse::new(updated).with_message("Submission received"),
    ))
}

/// PATCH /api/v1/admin/tasks/{id}/submission
///
/// Approving completes the task. Rejecting keeps the task open and records
/// feedback so the assignee can submit again.
pub async fn review_submission(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<ReviewSubmission>,
) -> AppResult<Json<DataResponse<Task>>> {
    let verdict = parse_review(&input.status)?;
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    if plan_submission_review(task.status, task.submission_status(), verdict)? == Transition::Unchanged {
        return Ok(Json(DataResponse::new(task)));
    }

    let Some(current) = task.submission.as_ref() else {
        return Err(AppError::Core(CoreError::InvalidState(
            "Task has no submission to review".into(),
        )));
    };
    let reviewed = TaskSubmission {
        status: verdict,
        feedback: input.feedback.filter(|f| !f.trim().is_empty()),
        last_updated: Utc::now(),
        ..current.0.clone()
    };
    let next = status_after_review(task.status, verdict);

    let updated = TaskRepo::review_submission(&state.pool, id, task.status, next, &reviewed)
        .await?
        .ok_or_else(|| conflict("Submission was reviewed concurrently; reload and retry"))?;

    tracing::info!(
        task_id = id,
        verdict = %verdict,
        status = %updated.status,
        actor = admin.actor(),
        "Submission reviewed"
    );
    Ok(Json(DataResponse::new(updated)))
}
