use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskListQuery, TaskPatch},
    routes::projects::MessageBody,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Response body carrying a single task.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskBody {
    #[serde(rename = "Task")]
    pub task: Task,
}

/// Response body for a project's task list.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListBody {
    #[serde(rename = "Tasks")]
    pub tasks: Vec<Task>,
}

/// Response body for a task update.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatedTaskBody {
    #[serde(rename = "updatedTask")]
    pub updated_task: Task,
}

/// Loads the task's parent project filtered by owner; `None` means the
/// requester does not own it (or it no longer exists).
async fn project_owned_by(
    pool: &PgPool,
    project_id: Uuid,
    owner_id: Uuid,
) -> Result<Option<Uuid>, AppError> {
    let row =
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(project_id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(id,)| id))
}

async fn load_task(pool: &PgPool, task_id: Uuid) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, due_date, project_id, created_at, updated_at
         FROM tasks WHERE id = $1",
    )
    .bind(task_id)
    .fetch_optional(pool)
    .await?;
    Ok(task)
}

/// Creates a new task under a project the authenticated user owns.
///
/// Validation runs before the ownership check: an empty title or a due date
/// that is not strictly in the future fails with 400 even when the project
/// does not exist. A missing or foreign project then fails with 404.
///
/// ## Responses:
/// - `201 Created`: Returns the new task as `{Task}`.
/// - `400 Bad Request`: Empty title, or `dueDate` not a future date.
/// - `404 Not Found`: Project absent or owned by another user.
/// - `500 Internal Server Error`: For database errors.
#[post("/{project_id}/tasks")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    project_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let project_uuid = project_id.into_inner();
    if project_owned_by(&pool, project_uuid, user.0).await?.is_none() {
        return Err(AppError::NotFound("Project not found".into()));
    }

    let task = Task::new(task_data.into_inner(), project_uuid);

    let created = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, description, status, due_date, project_id, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id, title, description, status, due_date, project_id, created_at, updated_at",
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.status)
    .bind(task.due_date)
    .bind(task.project_id)
    .bind(task.created_at)
    .bind(task.updated_at)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(TaskBody { task: created }))
}

/// Lists the tasks of a project the authenticated user owns.
///
/// Supports an exact `status` filter; tasks are ordered by ascending due
/// date, with undated tasks last.
///
/// ## Responses:
/// - `200 OK`: `{Tasks}`.
/// - `404 Not Found`: Project absent or owned by another user.
/// - `500 Internal Server Error`: For database errors.
#[get("/{project_id}/tasks")]
pub async fn list_project_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    project_id: web::Path<Uuid>,
    query: web::Query<TaskListQuery>,
) -> Result<impl Responder, AppError> {
    let project_uuid = project_id.into_inner();
    if project_owned_by(&pool, project_uuid, user.0).await?.is_none() {
        return Err(AppError::NotFound("Project not found".into()));
    }

    let tasks = if let Some(status) = query.status {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, due_date, project_id, created_at, updated_at
             FROM tasks WHERE project_id = $1 AND status = $2
             ORDER BY due_date ASC",
        )
        .bind(project_uuid)
        .bind(status)
        .fetch_all(&**pool)
        .await?
    } else {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, due_date, project_id, created_at, updated_at
             FROM tasks WHERE project_id = $1
             ORDER BY due_date ASC",
        )
        .bind(project_uuid)
        .fetch_all(&**pool)
        .await?
    };

    Ok(HttpResponse::Ok().json(TaskListBody { tasks }))
}

/// Retrieves a task by id.
///
/// The task is loaded first (404 if absent), then its parent project is
/// checked against the requester: a foreign task yields 403, never the data.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = load_task(&pool, task_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    if project_owned_by(&pool, task.project_id, user.0).await?.is_none() {
        return Err(AppError::Forbidden("Not allowed".into()));
    }

    Ok(HttpResponse::Ok().json(TaskBody { task }))
}

/// Applies a partial update to a task.
///
/// Same lookup discipline as `get_task`: 404 for a missing task, 403 when
/// the parent project belongs to another user. Absent fields keep their
/// current values; due dates are not re-validated on update.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    patch: web::Json<TaskPatch>,
) -> Result<impl Responder, AppError> {
    let task_uuid = task_id.into_inner();

    let task = load_task(&pool, task_uuid)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    if project_owned_by(&pool, task.project_id, user.0).await?.is_none() {
        return Err(AppError::Forbidden("Not allowed".into()));
    }

    let updated = sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = COALESCE($2, title),
             description = COALESCE($3, description),
             status = COALESCE($4, status),
             due_date = COALESCE($5, due_date),
             updated_at = NOW()
         WHERE id = $1
         RETURNING id, title, description, status, due_date, project_id, created_at, updated_at",
    )
    .bind(task_uuid)
    .bind(&patch.title)
    .bind(&patch.description)
    .bind(patch.status)
    .bind(patch.due_date)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(UpdatedTaskBody { updated_task: updated }))
}

/// Deletes a task.
///
/// Same lookup discipline as `get_task`: 404 for a missing task, 403 when
/// the parent project belongs to another user.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task_uuid = task_id.into_inner();

    let task = load_task(&pool, task_uuid)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    if project_owned_by(&pool, task.project_id, user.0).await?.is_none() {
        return Err(AppError::Forbidden("Not allowed".into()));
    }

    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_uuid)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(MessageBody {
        message: "Task deleted successfully.".to_string(),
    }))
}
