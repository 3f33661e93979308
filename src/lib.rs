// Taskboard - kanban task collection with persisted state and a query engine

pub mod backend;
pub mod codec;
pub mod collection;
pub mod config;
pub mod draft;
pub mod filter;
pub mod models;
pub mod query;
pub mod seed;
pub mod store;

// Re-export main types for convenience
pub use backend::{Backend, FileBackend, MemoryBackend, NullBackend, SqliteBackend};
pub use collection::{MoveTask, TaskCollection};
pub use config::{BackendKind, Config};
pub use draft::TaskDraft;
pub use filter::{TaskFilters, filter};
pub use models::{Priority, Task, TaskStatus, now};
pub use query::{Board, SortKey, distinct_assignees, distinct_tags, group_by_status, sort};
pub use seed::default_tasks;
pub use store::{DEFAULT_STORAGE_KEY, TaskStore};
