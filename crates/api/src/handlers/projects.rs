//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use crewboard_core::error::CoreError;
use crewboard_core::lifecycle::Transition;
use crewboard_core::project::{plan_transition, validate_name, ProjectStatus};
use crewboard_core::types::DbId;
use crewboard_db::models::project::{CreateProject, Project, ProjectListParams, SetProjectStatus};
use crewboard_db::repositories::ProjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(input): ApiJson<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    input.validate()?;
    validate_name(&input.name)?;
    let status = match input.status.as_deref() {
        Some(raw) => raw.parse()?,
        None => ProjectStatus::default(),
    };

    let project = ProjectRepo::create(
        &state.pool,
        input.name.trim(),
        input.description.as_deref(),
        status,
    )
    .await?;

    tracing::info!(project_id = project.id, status = %project.status, actor = admin.actor(), "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(project))))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    _caller: RequireAuth,
    ApiQuery(params): ApiQuery<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<ProjectStatus>)
        .transpose()?;
    let projects = ProjectRepo::list(&state.pool, status).await?;
    Ok(Json(DataResponse::new(projects)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _caller: RequireAuth,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = find_project(&state, id).await?;
    Ok(Json(DataResponse::new(project)))
}

/// PATCH /api/v1/projects/{id}/status
///
/// Forward-only. Re-sending the current status is a no-op; a concurrent
/// change between the read and the write is reported as a conflict.
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<SetProjectStatus>,
) -> AppResult<Json<DataResponse<Project>>> {
    let requested: ProjectStatus = input.status.parse()?;
    let project = find_project(&state, id).await?;

    if plan_transition(project.status, requested)? == Transition::Unchanged {
        return Ok(Json(
            DataResponse::new(project).with_message("Project status unchanged"),
        ));
    }

    let updated = ProjectRepo::update_status(&state.pool, id, project.status, requested)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Project status was changed concurrently; reload and retry".into(),
            ))
        })?;

    tracing::info!(
        project_id = id,
        from = %project.status,
        to = %updated.status,
        actor = admin.actor(),
        "Project status changed"
    );
    Ok(Json(DataResponse::new(updated)))
}

pub(crate) async fn find_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}
