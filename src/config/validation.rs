//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check mount paths are well formed
//! - Check referential integrity of the catalog (instances → processes, tasks → instances)
//! - Detect duplicate identifiers and session tokens
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("{field} '{value}' must start with '/' and must not end with '/'")]
    MountPath { field: &'static str, value: String },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: i64 },

    #[error("duplicate session token for user {0}")]
    DuplicateToken(i64),

    #[error("duplicate process {name} version {version}")]
    DuplicateProcess { name: String, version: String },

    #[error("instance {instance} references unknown process {process}")]
    UnknownProcess { instance: i64, process: i64 },

    #[error("task {task} references unknown instance {instance}")]
    UnknownInstance { task: i64, instance: i64 },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    // An empty context path mounts the portal at the root
    if !config.portal.context_path.is_empty() {
        check_mount_path("context_path", &config.portal.context_path, &mut errors);
    }
    check_mount_path("servlet_path", &config.portal.servlet_path, &mut errors);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut tokens = HashSet::new();
    for session in &config.session.sessions {
        if !tokens.insert(session.token.as_str()) {
            errors.push(ValidationError::DuplicateToken(session.user_id));
        }
    }

    let catalog = &config.catalog;

    let mut process_ids = HashSet::new();
    let mut process_keys = HashSet::new();
    for process in &catalog.processes {
        if !process_ids.insert(process.id) {
            errors.push(ValidationError::DuplicateId {
                kind: "process",
                id: process.id,
            });
        }
        if !process_keys.insert((process.name.as_str(), process.version.as_str())) {
            errors.push(ValidationError::DuplicateProcess {
                name: process.name.clone(),
                version: process.version.clone(),
            });
        }
    }

    let mut instance_ids = HashSet::new();
    for instance in &catalog.instances {
        if !instance_ids.insert(instance.id) {
            errors.push(ValidationError::DuplicateId {
                kind: "instance",
                id: instance.id,
            });
        }
        if !process_ids.contains(&instance.process_id) {
            errors.push(ValidationError::UnknownProcess {
                instance: instance.id,
                process: instance.process_id,
            });
        }
    }

    let mut task_ids = HashSet::new();
    for task in &catalog.tasks {
        if !task_ids.insert(task.id) {
            errors.push(ValidationError::DuplicateId {
                kind: "task",
                id: task.id,
            });
        }
        if !instance_ids.contains(&task.instance_id) {
            errors.push(ValidationError::UnknownInstance {
                task: task.id,
                instance: task.instance_id,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_mount_path(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if !value.starts_with('/') || value.ends_with('/') {
        errors.push(ValidationError::MountPath {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{InstanceEntry, ProcessEntry, TaskEntry};

    fn process(id: i64, name: &str) -> ProcessEntry {
        ProcessEntry {
            id,
            name: name.into(),
            version: "1.0".into(),
            starters: vec![],
            instantiation_form: None,
            overview_form: None,
            task_forms: vec![],
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_root_context_path() {
        let mut config = RouterConfig::default();
        config.portal.context_path = String::new();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.portal.servlet_path = "/portal/form/".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn test_catalog_references() {
        let mut config = RouterConfig::default();
        config.catalog.processes.push(process(1, "a"));
        config.catalog.processes.push(process(1, "a"));
        config.catalog.instances.push(InstanceEntry {
            id: 42,
            process_id: 9,
            involved_users: vec![],
        });
        config.catalog.tasks.push(TaskEntry {
            id: 7,
            instance_id: 43,
            name: "Review".into(),
            actors: vec![],
        });

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateId { kind: "process", id: 1 }));
        assert!(errors.contains(&ValidationError::DuplicateProcess {
            name: "a".into(),
            version: "1.0".into()
        }));
        assert!(errors.contains(&ValidationError::UnknownProcess { instance: 42, process: 9 }));
        assert!(errors.contains(&ValidationError::UnknownInstance { task: 7, instance: 43 }));
    }
}
