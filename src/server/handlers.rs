//! Boundary handlers: decode, validate, orchestrate, encode.
//!
//! All business logic lives in [`TaskUseCase`]; the handlers only translate
//! between HTTP and the orchestrator. Status policy: validation and decode
//! failures answer 400 with `{"error": ...}`, a missing task answers 404,
//! anything else answers an empty 500.

use crate::libs::commands::{ChangeCompletionCommand, CreateTaskCommand, UpdateTaskCommand};
use crate::libs::errors::TaskError;
use crate::libs::ident;
use crate::libs::usecase::TaskUseCase;
use crate::server::helpers::{decode_body, error_response, json_response, ok_empty};
use crate::server::router::{PathParams, Router};
use axum::http::Method;
use axum::response::Response;
use bytes::Bytes;
use std::future::Future;
use std::sync::Arc;

/// Builds the service router with the five task endpoints registered.
pub fn build_router(usecase: Arc<TaskUseCase>) -> Router {
    let mut router = Router::new();
    router.route(Method::POST, "/tasks", handler(&usecase, create_task));
    router.route(Method::GET, "/tasks", handler(&usecase, get_tasks));
    router.route(Method::PUT, "/tasks/{id}", handler(&usecase, update_task));
    router.route(Method::DELETE, "/tasks/{id}", handler(&usecase, delete_task));
    router.route(
        Method::PATCH,
        "/tasks/{id}/complete",
        handler(&usecase, change_completion),
    );
    router
}

fn handler<F, Fut>(usecase: &Arc<TaskUseCase>, f: F) -> crate::server::router::Handler
where
    F: Fn(Arc<TaskUseCase>, Bytes, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let usecase = usecase.clone();
    Box::new(move |body, params| Box::pin(f(usecase.clone(), body, params)))
}

/// Extracts and format-checks the id path parameter.
fn task_id(params: &PathParams) -> Result<String, TaskError> {
    let id = params.get("id").ok_or(TaskError::TaskIdRequired)?;
    if !ident::is_valid(id) {
        return Err(TaskError::InvalidIdFormat);
    }
    Ok(id.to_string())
}

async fn create_task(usecase: Arc<TaskUseCase>, body: Bytes, _params: PathParams) -> Response {
    let cmd: CreateTaskCommand = match decode_body(&body, TaskError::NoParamsToCreate) {
        Ok(cmd) => cmd,
        Err(e) => return error_response(&e),
    };
    if let Err(e) = cmd.validate() {
        return error_response(&e);
    }
    match usecase.create_task(&cmd) {
        Ok(task) => json_response(&task),
        Err(e) => error_response(&e),
    }
}

async fn get_tasks(usecase: Arc<TaskUseCase>, _body: Bytes, _params: PathParams) -> Response {
    match usecase.get_tasks() {
        // An empty list encodes as [], never null.
        Ok(tasks) => json_response(&tasks),
        Err(e) => error_response(&e),
    }
}

async fn update_task(usecase: Arc<TaskUseCase>, body: Bytes, params: PathParams) -> Response {
    let id = match task_id(&params) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let cmd: UpdateTaskCommand = match decode_body(&body, TaskError::NoParamsToUpdate) {
        Ok(cmd) => cmd,
        Err(e) => return error_response(&e),
    };
    if let Err(e) = cmd.validate() {
        return error_response(&e);
    }
    match usecase.update_task(&id, &cmd) {
        Ok(task) => json_response(&task),
        Err(e) => error_response(&e),
    }
}

async fn delete_task(usecase: Arc<TaskUseCase>, _body: Bytes, params: PathParams) -> Response {
    let id = match task_id(&params) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    match usecase.delete_task(&id) {
        Ok(()) => ok_empty(),
        Err(e) => error_response(&e),
    }
}

async fn change_completion(usecase: Arc<TaskUseCase>, body: Bytes, params: PathParams) -> Response {
    let id = match task_id(&params) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let cmd: ChangeCompletionCommand = match decode_body(&body, TaskError::NoParamsToChangeCompletionStatus) {
        Ok(cmd) => cmd,
        Err(e) => return error_response(&e),
    };
    let completed = match cmd.validate() {
        Ok(completed) => completed,
        Err(e) => return error_response(&e),
    };
    match usecase.change_completion(&id, completed) {
        Ok(task) => json_response(&task),
        Err(e) => error_response(&e),
    }
}
