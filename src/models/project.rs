use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a project.
/// Corresponds to the `project_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Project is being worked on.
    Active,
    /// Project is finished.
    Completed,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Active
    }
}

/// Input structure for creating a project.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProjectInput {
    /// The title of the project. Required, non-empty.
    #[validate(length(min = 1, message = "Title required"))]
    pub title: String,

    /// An optional description for the project.
    pub description: Option<String>,

    /// The status of the project. Defaults to `active` when omitted.
    pub status: Option<ProjectStatus>,
}

/// Partial update payload for a project. Absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
}

/// Represents a project entity as stored in the database and returned by the API.
///
/// Serialized field names match the wire contract: the owning user reference
/// appears as `owner`, timestamps as `createdAt`/`updatedAt`.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier for the project (UUID v4).
    pub id: Uuid,
    /// The title of the project.
    pub title: String,
    /// An optional description for the project.
    pub description: Option<String>,
    /// The current status of the project.
    pub status: ProjectStatus,
    /// Identifier of the user who owns the project.
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    /// Timestamp of when the project was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the project.
    pub updated_at: DateTime<Utc>,
}

/// Query parameters accepted by the project list endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectListQuery {
    /// 1-based page number, coerced to a positive integer. Defaults to 1.
    pub page: Option<i64>,
    /// Page size, coerced to a positive integer. Defaults to 10.
    pub limit: Option<i64>,
    /// Case-insensitive substring filter on the project title.
    pub q: Option<String>,
}

impl ProjectListQuery {
    /// Resolves the raw query parameters into effective pagination values.
    pub fn pagination(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).max(1);
        (page, limit)
    }
}

impl Project {
    /// Creates a new `Project` instance from `ProjectInput` and the owner's id.
    /// Sets `created_at`/`updated_at` to the current time and `id` to a new UUID.
    pub fn new(input: ProjectInput, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}
