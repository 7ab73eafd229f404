use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum; the in-progress variant spells
/// as `in-progress` on the wire and in the database.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Todo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Input structure for creating a task under a project.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// The title of the task. Required, non-empty.
    #[validate(length(min = 1, message = "Title required"))]
    pub title: String,

    /// An optional description for the task.
    pub description: Option<String>,

    /// The status of the task. Defaults to `todo` when omitted.
    pub status: Option<TaskStatus>,

    /// Optional due date; must be strictly in the future at submission time.
    #[validate(custom(
        function = "validate_due_date",
        message = "Due date must be a valid date in the future."
    ))]
    pub due_date: Option<DateTime<Utc>>,
}

/// Due dates in the past (or "now") are rejected at creation time. Updates
/// are not re-validated; a task may legitimately become overdue.
fn validate_due_date(due_date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *due_date <= Utc::now() {
        return Err(ValidationError::new("due_date_not_in_future"));
    }
    Ok(())
}

/// Partial update payload for a task. Absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Represents a task entity as stored in the database and returned by the API.
///
/// Serialized field names match the wire contract: the parent project
/// reference appears as `project`, the due date as `dueDate`.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// The current status of the task.
    pub status: TaskStatus,
    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,
    /// Identifier of the project the task belongs to.
    #[serde(rename = "project")]
    pub project_id: Uuid,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Query parameters accepted by the per-project task list endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListQuery {
    /// Exact status filter.
    pub status: Option<TaskStatus>,
}

impl Task {
    /// Creates a new `Task` instance from `TaskInput` and the parent project id.
    /// Sets `created_at`/`updated_at` to the current time and `id` to a new UUID.
    pub fn new(input: TaskInput, project_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            due_date: input.due_date,
            project_id,
            created_at: now,
            updated_at: now,
        }
    }
}
