//! Handlers for task modification requests.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use crewboard_core::authz::{require, RequiredRole};
use crewboard_core::error::CoreError;
use crewboard_core::lifecycle::Transition;
use crewboard_core::task_modification::{can_request, can_review, parse_review, plan_review};
use crewboard_core::types::DbId;
use crewboard_db::models::task::Task;
use crewboard_db::models::task_modification::{
    CreateTaskModification, RequestModification, ReviewModification, TaskModification,
};
use crewboard_db::repositories::{TaskModificationRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::Caller;
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_task(state: &AppState, id: DbId) -> AppResult<Task> {
    TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))
}

async fn find_modification(state: &AppState, id: DbId) -> AppResult<TaskModification> {
    TaskModificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Modification request",
            id,
        }))
}

/// POST /api/v1/tasks/{id}/modifications
pub async fn request(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(task_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<RequestModification>,
) -> AppResult<(StatusCode, Json<DataResponse<TaskModification>>)> {
    require(&RequiredRole::AnyUser, &identity)?;
    let task = find_task(&state, task_id).await?;
    can_request(&identity, &task.created_by, &task.user_email).into_result()?;
    input.proposed_changes.validate()?;

    let new = CreateTaskModification {
        task_id,
        proposed_changes: input.proposed_changes,
        comments: input.comments.filter(|c| !c.trim().is_empty()),
        requested_by: identity.actor().to_string(),
    };
    let modification = TaskModificationRepo::create(&state.pool, &new).await?;

    tracing::info!(
        modification_id = modification.id,
        task_id,
        actor = identity.actor(),
        "Modification requested"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(modification).with_message("Modification requested")),
    ))
}

/// GET /api/v1/tasks/{id}/modifications
pub async fn list(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(task_id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<TaskModification>>>> {
    require(&RequiredRole::AnyUser, &identity)?;
    let task = find_task(&state, task_id).await?;
    can_request(&identity, &task.created_by, &task.user_email).into_result()?;

    let modifications = TaskModificationRepo::list_for_task(&state.pool, task_id).await?;
    Ok(Json(DataResponse::new(modifications)))
}

/// PATCH /api/v1/modifications/{id}
///
/// Approval writes the proposed fields to the task in the same transaction.
pub async fn review(
    State(state): State<AppState>,
    Caller(identity): Caller,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<ReviewModification>,
) -> AppResult<Json<DataResponse<TaskModification>>> {
    require(&RequiredRole::AnyUser, &identity)?;
    let verdict = parse_review(&input.status)?;
    let modification = find_modification(&state, id).await?;
    let task = find_task(&state, modification.task_id).await?;
    can_review(&identity, &task.created_by, &modification.requested_by).into_result()?;

    if plan_review(modification.status, verdict)? == Transition::Unchanged {
        return Ok(Json(DataResponse::new(modification)));
    }

    let reviewed = match TaskModificationRepo::review(&state.pool, id, verdict, identity.actor()).await? {
        Some(reviewed) => reviewed,
        None => {
            let latest = find_modification(&state, id).await?;
            plan_review(latest.status, verdict)?;
            latest
        }
    };

    tracing::info!(
        modification_id = id,
        task_id = reviewed.task_id,
        verdict = %verdict,
        actor = identity.actor(),
        "Modification reviewed"
    );
    Ok(Json(DataResponse::new(reviewed)))
}
