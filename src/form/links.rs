//! URL construction for redirects.
//!
//! Legacy forms live in the portal homepage and are addressed through the
//! URL fragment. External pages get the driving identifier appended as a
//! query parameter.

use url::form_urlencoded;

use crate::form::router::FormTarget;

const LEGACY_ENTRY_MODE: &str = "entry";
const LEGACY_RECAP_MODE: &str = "recap";

/// Legacy form identifier: `{processUUID}[--{taskName}]${mode}`.
pub fn legacy_form_id(process_uuid: &str, task_name: Option<&str>, recap: bool) -> String {
    let mode = if recap {
        LEGACY_RECAP_MODE
    } else {
        LEGACY_ENTRY_MODE
    };
    match task_name {
        Some(task) => format!("{}--{}${}", process_uuid, task, mode),
        None => format!("{}${}", process_uuid, mode),
    }
}

/// URL of the legacy form UI in the portal.
pub fn legacy_form_url(
    context_path: &str,
    locale: &str,
    process_definition_id: i64,
    form_id: &str,
    target: FormTarget,
) -> String {
    let mut url = format!(
        "{}/portal/homepage?ui=form&locale={}&theme={}#mode=form&form={}",
        context_path,
        encode(locale),
        process_definition_id,
        encode(form_id)
    );
    match target {
        FormTarget::Process => {
            url.push_str(&format!(
                "&process={}&autoInstantiate=false",
                process_definition_id
            ));
        }
        FormTarget::ProcessInstance(instance_id) => {
            url.push_str(&format!("&instance={}&recap=true", instance_id));
        }
        FormTarget::TaskInstance(task_id) => {
            url.push_str(&format!("&task={}", task_id));
        }
    }
    url
}

/// External page URL decorated with the driving identifier.
pub fn external_page_url(identifier: &str, process_definition_id: i64, target: FormTarget) -> String {
    let separator = if identifier.contains('?') { '&' } else { '?' };
    let (key, id) = match target {
        FormTarget::Process => ("process", process_definition_id),
        FormTarget::ProcessInstance(instance_id) => ("instance", instance_id),
        FormTarget::TaskInstance(task_id) => ("task", task_id),
    };
    format!("{}{}{}={}", identifier, separator, key, id)
}

/// Location of the task instance form, under the same mount point.
pub fn task_instance_url(context_path: &str, servlet_path: &str, task_id: i64) -> String {
    format!("{}{}/taskInstance/{}", context_path, servlet_path, task_id)
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
