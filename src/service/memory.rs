//! In-memory process form service seeded from the configuration catalog.

use std::collections::HashMap;

use crate::config::schema::{CatalogConfig, FormEntry, InstanceEntry, ProcessEntry, TaskEntry};
use crate::form::FormReference;
use crate::security::Session;
use crate::service::{ProcessFormService, ServiceError, ServiceResult};

/// Catalog-backed implementation of `ProcessFormService`.
#[derive(Debug, Default)]
pub struct InMemoryFormService {
    processes: HashMap<i64, ProcessEntry>,
    instances: HashMap<i64, InstanceEntry>,
    tasks: HashMap<i64, TaskEntry>,
}

impl InMemoryFormService {
    pub fn from_catalog(catalog: &CatalogConfig) -> Self {
        Self {
            processes: catalog.processes.iter().map(|p| (p.id, p.clone())).collect(),
            instances: catalog.instances.iter().map(|i| (i.id, i.clone())).collect(),
            tasks: catalog.tasks.iter().map(|t| (t.id, t.clone())).collect(),
        }
    }

    fn process(&self, id: i64) -> ServiceResult<&ProcessEntry> {
        self.processes
            .get(&id)
            .ok_or_else(|| ServiceError::ProcessDefinitionNotFound(id.to_string()))
    }

    fn instance(&self, id: i64) -> ServiceResult<&InstanceEntry> {
        self.instances
            .get(&id)
            .ok_or(ServiceError::ProcessInstanceNotFound(id))
    }

    fn task(&self, id: i64) -> ServiceResult<&TaskEntry> {
        self.tasks
            .get(&id)
            .ok_or(ServiceError::ActivityInstanceNotFound(id))
    }
}

fn reference(entry: &FormEntry) -> FormReference {
    FormReference::new(entry.target.clone(), entry.external)
}

impl ProcessFormService for InMemoryFormService {
    fn get_process_definition_id(
        &self,
        _session: &Session,
        name: &str,
        version: &str,
    ) -> ServiceResult<i64> {
        self.processes
            .values()
            .find(|p| p.name == name && p.version == version)
            .map(|p| p.id)
            .ok_or_else(|| ServiceError::ProcessDefinitionNotFound(format!("{} ({})", name, version)))
    }

    fn ensure_process_definition_id(
        &self,
        _session: &Session,
        process_definition_id: Option<i64>,
        process_instance_id: Option<i64>,
        task_instance_id: Option<i64>,
    ) -> ServiceResult<i64> {
        if let Some(id) = process_definition_id {
            return Ok(id);
        }
        if let Some(task_id) = task_instance_id {
            let task = self.task(task_id)?;
            return Ok(self.instance(task.instance_id)?.process_id);
        }
        if let Some(instance_id) = process_instance_id {
            return Ok(self.instance(instance_id)?.process_id);
        }
        Err(ServiceError::ProcessDefinitionNotFound(
            "no process, instance or task identifier".to_string(),
        ))
    }

    fn is_allowed_to_start_process(
        &self,
        _session: &Session,
        process_definition_id: i64,
        user_id: i64,
    ) -> ServiceResult<bool> {
        Ok(self.process(process_definition_id)?.starters.contains(&user_id))
    }

    fn is_allowed_to_see_process_instance(
        &self,
        _session: &Session,
        _process_definition_id: i64,
        process_instance_id: i64,
        user_id: i64,
    ) -> ServiceResult<bool> {
        let instance = self.instance(process_instance_id)?;
        if instance.involved_users.contains(&user_id) {
            return Ok(true);
        }
        // Actors of any task of the instance can see it too
        Ok(self
            .tasks
            .values()
            .any(|t| t.instance_id == process_instance_id && t.actors.contains(&user_id)))
    }

    fn is_allowed_to_see_task(
        &self,
        _session: &Session,
        _process_definition_id: i64,
        task_instance_id: i64,
        user_id: i64,
        is_recap: bool,
    ) -> ServiceResult<bool> {
        let task = self.task(task_instance_id)?;
        if task.actors.contains(&user_id) {
            return Ok(true);
        }
        if is_recap {
            return Ok(self.instance(task.instance_id)?.involved_users.contains(&user_id));
        }
        Ok(false)
    }

    fn get_form(
        &self,
        _session: &Session,
        process_definition_id: i64,
        task_name: Option<&str>,
        is_recap: bool,
    ) -> ServiceResult<FormReference> {
        let process = self.process(process_definition_id)?;
        let entry = match (task_name, is_recap) {
            (Some(task), _) => process
                .task_forms
                .iter()
                .find(|f| f.task_name == task)
                .map(|f| &f.form),
            (None, true) => process.overview_form.as_ref(),
            (None, false) => process.instantiation_form.as_ref(),
        };
        entry.map(reference).ok_or(ServiceError::FormMappingNotFound {
            process_definition_id,
        })
    }

    fn get_process_definition_uuid(
        &self,
        _session: &Session,
        process_definition_id: i64,
    ) -> ServiceResult<String> {
        let process = self.process(process_definition_id)?;
        Ok(format!("{}--{}", process.name, process.version))
    }

    fn get_task_instance_id(
        &self,
        _session: &Session,
        process_instance_id: i64,
        task_name: &str,
        user_id: Option<i64>,
    ) -> ServiceResult<Option<i64>> {
        let mut candidates: Vec<&TaskEntry> = self
            .tasks
            .values()
            .filter(|t| t.instance_id == process_instance_id && t.name == task_name)
            .filter(|t| user_id.map_or(true, |user| t.actors.contains(&user)))
            .collect();
        // Lowest id first so repeated lookups agree
        candidates.sort_by_key(|t| t.id);
        Ok(candidates.first().map(|t| t.id))
    }

    fn get_task_name(
        &self,
        _session: &Session,
        task_instance_id: i64,
    ) -> ServiceResult<Option<String>> {
        Ok(self.tasks.get(&task_instance_id).map(|t| t.name.clone()))
    }
}
