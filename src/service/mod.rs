//! Process form service: the business collaborator of the form router.
//!
//! # Responsibilities
//! - Resolve process definitions, instances and tasks for a session
//! - Answer authorization questions
//! - Resolve the form mapping of a process or task
//!
//! # Design Decisions
//! - The router only sees the `ProcessFormService` trait
//! - "Not found" conditions are explicit `ServiceError` kinds, never panics
//! - `InMemoryFormService` is the bundled host, seeded from configuration

pub mod memory;

use thiserror::Error;

use crate::form::FormReference;
use crate::security::Session;

pub use memory::InMemoryFormService;

/// Errors reported by a `ProcessFormService`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("process definition not found: {0}")]
    ProcessDefinitionNotFound(String),

    /// Covers both live and archived process instances.
    #[error("process instance not found: {0}")]
    ProcessInstanceNotFound(i64),

    #[error("activity instance not found: {0}")]
    ActivityInstanceNotFound(i64),

    /// No form mapping exists. Recoverable: the router falls back to the legacy form.
    #[error("no form mapping found for process {process_definition_id}")]
    FormMappingNotFound { process_definition_id: i64 },

    /// The engine could not answer.
    #[error("{0}")]
    Engine(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business operations the form router delegates to.
pub trait ProcessFormService: Send + Sync {
    /// Look up a process definition by name and version.
    fn get_process_definition_id(
        &self,
        session: &Session,
        name: &str,
        version: &str,
    ) -> ServiceResult<i64>;

    /// Derive the process definition id from whichever identifier is known.
    ///
    /// When `process_definition_id` is set it is returned as is. Otherwise it
    /// is derived from the task instance, then from the process instance
    /// (archived instances included).
    fn ensure_process_definition_id(
        &self,
        session: &Session,
        process_definition_id: Option<i64>,
        process_instance_id: Option<i64>,
        task_instance_id: Option<i64>,
    ) -> ServiceResult<i64>;

    fn is_allowed_to_start_process(
        &self,
        session: &Session,
        process_definition_id: i64,
        user_id: i64,
    ) -> ServiceResult<bool>;

    fn is_allowed_to_see_process_instance(
        &self,
        session: &Session,
        process_definition_id: i64,
        process_instance_id: i64,
        user_id: i64,
    ) -> ServiceResult<bool>;

    fn is_allowed_to_see_task(
        &self,
        session: &Session,
        process_definition_id: i64,
        task_instance_id: i64,
        user_id: i64,
        is_recap: bool,
    ) -> ServiceResult<bool>;

    /// Resolve the form mapped to a process start (`task_name` = None, not recap),
    /// a process overview (recap) or a task.
    fn get_form(
        &self,
        session: &Session,
        process_definition_id: i64,
        task_name: Option<&str>,
        is_recap: bool,
    ) -> ServiceResult<FormReference>;

    /// Legacy identifier of a process definition (`{name}--{version}`).
    fn get_process_definition_uuid(
        &self,
        session: &Session,
        process_definition_id: i64,
    ) -> ServiceResult<String>;

    /// Find the task instance named `task_name` in a process instance,
    /// restricted to tasks `user_id` can act on when given.
    /// `Ok(None)` when no such task exists.
    fn get_task_instance_id(
        &self,
        session: &Session,
        process_instance_id: i64,
        task_name: &str,
        user_id: Option<i64>,
    ) -> ServiceResult<Option<i64>>;

    fn get_task_name(&self, session: &Session, task_instance_id: i64)
        -> ServiceResult<Option<String>>;
}
