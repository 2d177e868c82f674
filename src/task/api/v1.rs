use crate::task::{Task, TaskService, TaskServiceError, TaskState};
use crate::web::api::v1::ServerErrorResponse;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskJson {
    /// Unique identifier for the task
    id: u32,
    /// Human-readable title of the task
    title: String,
    /// Whether the task has been completed
    completed: bool,
    /// Creation timestamp in RFC 3339 format
    created_at: String,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_string(),
            completed: task.completed(),
            created_at: task.created_at().to_rfc3339(),
        }
    }
}

/// Request payload for creating a task.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    /// Title of the new task
    title: String,
}

/// Request payload for fully updating a task.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    /// New title for the task
    title: String,
    /// New completion flag; left unchanged when omitted
    #[serde(default)]
    completed: Option<bool>,
}

/// Request payload for partially updating a task.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchTaskRequest {
    /// New title for the task; left unchanged when omitted
    #[serde(default)]
    title: Option<String>,
    /// New completion flag; left unchanged when omitted
    #[serde(default)]
    completed: Option<bool>,
}

/// Maps a service error to an HTTP status and JSON error body.
/// Database errors are logged and reported generically.
fn service_error_response(err: TaskServiceError) -> (StatusCode, Json<ServerErrorResponse>) {
    match err {
        TaskServiceError::TaskNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ServerErrorResponse::new(format!(
                "Task with ID {} not found",
                id
            ))),
        ),
        TaskServiceError::Database(err) => {
            tracing::error!("Database error while handling task request: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to process task request".to_string(),
                )),
            )
        }
    }
}

fn empty_title_response() -> (StatusCode, Json<ServerErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ServerErrorResponse::new(
            "Task title must not be empty".to_string(),
        )),
    )
}

/// Handler for GET /api/v1/tasks - Returns all tasks, newest first.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = Vec<TaskJson>),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<Json<Vec<TaskJson>>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.get_all_tasks().await {
        Ok(tasks) => {
            let json_tasks: Vec<TaskJson> = tasks.into_iter().map(TaskJson::from).collect();
            Ok(Json(json_tasks))
        }
        Err(err) => Err(service_error_response(err)),
    }
}

/// Handler for POST /api/v1/tasks - Creates a new task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskJson),
        (status = 422, description = "Title missing or empty", body = ServerErrorResponse),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskJson>), (StatusCode, Json<ServerErrorResponse>)> {
    if payload.title.is_empty() {
        return Err(empty_title_response());
    }

    let service = TaskService::new(&state.db);
    match service.create_task(payload.title).await {
        Ok(task) => Ok((StatusCode::CREATED, Json(TaskJson::from(task)))),
        Err(err) => Err(service_error_response(err)),
    }
}

/// Handler for GET /api/v1/tasks/{id} - Returns a single task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(
        ("id" = u32, Path, description = "ID of the task to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved task", body = TaskJson),
        (status = 404, description = "Task not found", body = ServerErrorResponse),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
) -> Result<Json<TaskJson>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.get_task_by_id(id).await {
        Ok(task) => Ok(Json(TaskJson::from(task))),
        Err(err) => Err(service_error_response(err)),
    }
}

/// Handler for PUT /api/v1/tasks/{id} - Updates a task.
/// The title is required; the completion flag is unchanged when omitted.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    params(
        ("id" = u32, Path, description = "ID of the task to update")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskJson),
        (status = 404, description = "Task not found", body = ServerErrorResponse),
        (status = 422, description = "Title missing or empty", body = ServerErrorResponse),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskJson>, (StatusCode, Json<ServerErrorResponse>)> {
    if payload.title.is_empty() {
        return Err(empty_title_response());
    }

    let service = TaskService::new(&state.db);
    match service
        .update_task(id, Some(payload.title), payload.completed)
        .await
    {
        Ok(task) => Ok(Json(TaskJson::from(task))),
        Err(err) => Err(service_error_response(err)),
    }
}

/// Handler for PATCH /api/v1/tasks/{id} - Partially updates a task.
/// Any subset of title and completion flag may be supplied.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    patch,
    path = "/api/v1/tasks/{id}",
    params(
        ("id" = u32, Path, description = "ID of the task to update")
    ),
    request_body = PatchTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskJson),
        (status = 404, description = "Task not found", body = ServerErrorResponse),
        (status = 422, description = "Title empty", body = ServerErrorResponse),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn patch_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
    Json(payload): Json<PatchTaskRequest>,
) -> Result<Json<TaskJson>, (StatusCode, Json<ServerErrorResponse>)> {
    if let Some(title) = &payload.title {
        if title.is_empty() {
            return Err(empty_title_response());
        }
    }

    let service = TaskService::new(&state.db);
    match service
        .update_task(id, payload.title, payload.completed)
        .await
    {
        Ok(task) => Ok(Json(TaskJson::from(task))),
        Err(err) => Err(service_error_response(err)),
    }
}

/// Handler for DELETE /api/v1/tasks/{id} - Deletes a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(
        ("id" = u32, Path, description = "ID of the task to delete")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found", body = ServerErrorResponse),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
) -> Result<StatusCode, (StatusCode, Json<ServerErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.delete_task_by_id(id).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(err) => Err(service_error_response(err)),
    }
}

/// Creates and returns the tasks API router.
pub fn create_api_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(get_tasks_handler).post(create_task_handler),
        )
        .route(
            "/tasks/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .patch(patch_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}
