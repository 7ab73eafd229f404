pub mod project;
pub mod task;
pub mod user;

pub use project::{Project, ProjectInput, ProjectListQuery, ProjectPatch, ProjectStatus};
pub use task::{Task, TaskInput, TaskListQuery, TaskPatch, TaskStatus};
pub use user::{PublicUser, User};
