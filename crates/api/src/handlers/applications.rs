//! Handlers for project applications.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use crewboard_core::application::{parse_decision, plan_decision, validate_answers, ApplicationStatus};
use crewboard_core::error::CoreError;
use crewboard_core::lifecycle::Transition;
use crewboard_core::project::ensure_accepting_applications;
use crewboard_core::types::DbId;
use crewboard_db::models::application::{
    Application, ApplicationListParams, ApplicationWithProject, CreateApplication,
    DecideApplication, SubmitApplication,
};
use crewboard_db::repositories::application_repo::PENDING_UNIQUE_INDEX;
use crewboard_db::repositories::ApplicationRepo;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::handlers::projects::find_project;
use crate::middleware::rbac::{RequireAdmin, RequireUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/applications
///
/// Duplicate pending applications are caught by the storage uniqueness
/// constraint, so concurrent submits cannot both succeed. The insert also
/// re-checks that the project is OPEN.
pub async fn submit(
    State(state): State<AppState>,
    user: RequireUser,
    ApiPath(project_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<SubmitApplication>,
) -> AppResult<(StatusCode, Json<DataResponse<Application>>)> {
    let project = find_project(&state, project_id).await?;
    ensure_accepting_applications(project.status)?;
    validate_answers(&input.answers)?;

    let new = CreateApplication {
        project_id,
        user_email: user.email.clone(),
        answers: input.answers,
    };
    let application = ApplicationRepo::create(&state.pool, &new)
        .await
        .map_err(|err| {
            if is_unique_violation(&err, PENDING_UNIQUE_INDEX) {
                AppError::Core(CoreError::Conflict(
                    "You already have a pending application for this project".into(),
                ))
            } else {
                AppError::Database(err)
            }
        })?;

    // The project was closed (or removed) between the read and the insert.
    let Some(application) = application else {
        let project = find_project(&state, project_id).await?;
        ensure_accepting_applications(project.status)?;
        return Err(AppError::Core(CoreError::InvalidState(
            "Project stopped accepting applications; reload and retry".into(),
        )));
    };

    tracing::info!(
        application_id = application.id,
        project_id,
        email = %user.email,
        "Application submitted"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(application).with_message("Application submitted")),
    ))
}

/// GET /api/v1/applications/mine
pub async fn list_mine(
    State(state): State<AppState>,
    user: RequireUser,
) -> AppResult<Json<DataResponse<Vec<ApplicationWithProject>>>> {
    let applications = ApplicationRepo::list_for_user(&state.pool, &user.email).await?;
    Ok(Json(DataResponse::new(applications)))
}

/// GET /api/v1/admin/applications
pub async fn list_for_review(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiQuery(params): ApiQuery<ApplicationListParams>,
) -> AppResult<Json<DataResponse<Vec<ApplicationWithProject>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<ApplicationStatus>)
        .transpose()?;
    let applications = ApplicationRepo::list(&state.pool, status, params.project_id).await?;
    Ok(Json(DataResponse::new(applications)))
}

/// PATCH /api/v1/admin/applications/{id}
///
/// Re-sending the decision an application already has succeeds without a
/// write; asking to flip a decided application is a conflict.
pub async fn decide(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<DecideApplication>,
) -> AppResult<Json<DataResponse<ApplicationWithProject>>> {
    let requested = parse_decision(&input.status)?;
    let current = find_application(&state, id).await?;

    if plan_decision(current.status, requested)? == Transition::Apply {
        match ApplicationRepo::decide(&state.pool, id, requested).await? {
            Some(decided) => {
                tracing::info!(
                    application_id = id,
                    project_id = decided.project_id,
                    status = %decided.status,
                    actor = admin.actor(),
                    "Application decided"
                );
            }
            // Someone decided it between our read and write: judge the
            // request against what they wrote.
            None => {
                let latest = find_application(&state, id).await?;
                plan_decision(latest.status, requested)?;
            }
        }
    }

    let joined = ApplicationRepo::find_with_project(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;
    Ok(Json(DataResponse::new(joined)))
}

async fn find_application(state: &AppState, id: DbId) -> AppResult<Application> {
    ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))
}
