use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Project, ProjectInput, ProjectListQuery, ProjectPatch, Task},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Response body carrying a single project.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectBody {
    #[serde(rename = "Project")]
    pub project: Project,
}

/// Response body for the paginated project list.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectListBody {
    #[serde(rename = "Projects")]
    pub projects: Vec<Project>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Response body for a project fetched together with its tasks.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectDetailBody {
    #[serde(rename = "Project")]
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// Generic acknowledgement body for deletions.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Creates a new project owned by the authenticated user.
///
/// ## Responses:
/// - `201 Created`: Returns the new project as `{Project}`.
/// - `400 Bad Request`: If the title is missing or empty.
/// - `401 Unauthorized` / `403 Forbidden`: On authentication failure.
/// - `500 Internal Server Error`: For database errors.
#[post("/create")]
pub async fn create_project(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    project_data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    project_data.validate()?;

    let project = Project::new(project_data.into_inner(), user.0);

    let created = sqlx::query_as::<_, Project>(
        "INSERT INTO projects (id, title, description, status, owner_id, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, title, description, status, owner_id, created_at, updated_at",
    )
    .bind(project.id)
    .bind(&project.title)
    .bind(&project.description)
    .bind(project.status)
    .bind(project.owner_id)
    .bind(project.created_at)
    .bind(project.updated_at)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(ProjectBody { project: created }))
}

/// Retrieves a page of the authenticated user's projects, newest first.
///
/// ## Query Parameters:
/// - `page` (optional): 1-based page number, default 1.
/// - `limit` (optional): page size, default 10.
/// - `q` (optional): case-insensitive substring match on the title.
///
/// ## Responses:
/// - `200 OK`: `{Projects, total, page, limit}`.
/// - `401 Unauthorized` / `403 Forbidden`: On authentication failure.
/// - `500 Internal Server Error`: For database errors.
#[get("/list")]
pub async fn list_projects(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let (page, limit) = query.pagination();
    let offset = (page - 1) * limit;

    let pattern = query
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", q));

    let (projects, total) = if let Some(pattern) = pattern {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, title, description, status, owner_id, created_at, updated_at
             FROM projects WHERE owner_id = $1 AND title ILIKE $2
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(user.0)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&**pool)
        .await?;

        let (total,) = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM projects WHERE owner_id = $1 AND title ILIKE $2",
        )
        .bind(user.0)
        .bind(&pattern)
        .fetch_one(&**pool)
        .await?;

        (projects, total)
    } else {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, title, description, status, owner_id, created_at, updated_at
             FROM projects WHERE owner_id = $1
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user.0)
        .bind(limit)
        .bind(offset)
        .fetch_all(&**pool)
        .await?;

        let (total,) =
            sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM projects WHERE owner_id = $1")
                .bind(user.0)
                .fetch_one(&**pool)
                .await?;

        (projects, total)
    };

    Ok(HttpResponse::Ok().json(ProjectListBody {
        projects,
        total,
        page,
        limit,
    }))
}

/// Retrieves a project by id, together with its tasks.
///
/// Ownership is part of the lookup: a project owned by someone else is
/// indistinguishable from a missing one (404).
#[get("/{id}")]
pub async fn get_project(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    project_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let project = sqlx::query_as::<_, Project>(
        "SELECT id, title, description, status, owner_id, created_at, updated_at
         FROM projects WHERE id = $1 AND owner_id = $2",
    )
    .bind(project_id.into_inner())
    .bind(user.0)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, due_date, project_id, created_at, updated_at
         FROM tasks WHERE project_id = $1",
    )
    .bind(project.id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(ProjectDetailBody { project, tasks }))
}

/// Applies a partial update to an owned project.
///
/// Absent fields keep their current values. Returns 404 if the project does
/// not exist or belongs to another user.
#[put("/{id}")]
pub async fn update_project(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    project_id: web::Path<Uuid>,
    patch: web::Json<ProjectPatch>,
) -> Result<impl Responder, AppError> {
    let updated = sqlx::query_as::<_, Project>(
        "UPDATE projects
         SET title = COALESCE($3, title),
             description = COALESCE($4, description),
             status = COALESCE($5, status),
             updated_at = NOW()
         WHERE id = $1 AND owner_id = $2
         RETURNING id, title, description, status, owner_id, created_at, updated_at",
    )
    .bind(project_id.into_inner())
    .bind(user.0)
    .bind(&patch.title)
    .bind(&patch.description)
    .bind(patch.status)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Project not found or not allowed".into()))?;

    Ok(HttpResponse::Ok().json(ProjectBody { project: updated }))
}

/// Deletes an owned project and all of its tasks.
///
/// The cascade runs inside a single transaction (tasks first, then the
/// project) so an interrupted delete can never leave orphaned tasks.
#[delete("/{id}")]
pub async fn delete_project(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    project_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let project_uuid = project_id.into_inner();

    let mut tx = pool.begin().await?;

    let owned =
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(project_uuid)
            .bind(user.0)
            .fetch_optional(&mut *tx)
            .await?;

    if owned.is_none() {
        return Err(AppError::NotFound("Project not found or not allowed".into()));
    }

    sqlx::query("DELETE FROM tasks WHERE project_id = $1")
        .bind(project_uuid)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(project_uuid)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(MessageBody {
        message: "Project deleted successfully.".to_string(),
    }))
}
