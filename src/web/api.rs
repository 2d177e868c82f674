use std::sync::Arc;

use crate::task::TaskState;

use axum::Router;
use utoipa::OpenApi;

pub mod v1 {
    use serde::Serialize;
    use utoipa::ToSchema;

    /// JSON error body returned by API endpoints.
    #[derive(Debug, Serialize, ToSchema)]
    pub struct ServerErrorResponse {
        /// Human-readable description of the failure
        message: String,
    }

    impl ServerErrorResponse {
        pub fn new(message: String) -> Self {
            Self { message }
        }
    }
}

/// OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::task::api::v1::get_tasks_handler,
        crate::task::api::v1::create_task_handler,
        crate::task::api::v1::get_task_handler,
        crate::task::api::v1::update_task_handler,
        crate::task::api::v1::patch_task_handler,
        crate::task::api::v1::delete_task_handler,
    ),
    tags(
        (name = "Tasks", description = "CRUD endpoints for the task resource")
    )
)]
pub struct ApiDoc;

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(task_state: Arc<TaskState>) -> axum::Router {
    let tasks_router = crate::task::api::v1::create_api_router(task_state);
    Router::new().nest("/api/v1", tasks_router)
}
