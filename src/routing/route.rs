//! Path parsing into route shapes.
//!
//! # Recognised shapes
//! - `/process/{name}/{version}[/resource...]`
//! - `/processInstance/{id}/task/{taskName}[/...]`
//! - `/processInstance/{id}[/resource...]`
//! - `/taskInstance/{id}[/resource...]`

use percent_encoding::percent_decode_str;

const PROCESS_PREFIX: &str = "process";
const PROCESS_INSTANCE_PREFIX: &str = "processInstance";
const TASK_INSTANCE_PREFIX: &str = "taskInstance";
const TASK_SEGMENT: &str = "task";

/// Target designated by a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Start form of a process definition.
    Process { name: String, version: String },
    /// Recap (overview) of a process instance.
    ProcessInstance { instance_id: i64 },
    /// A task of a process instance, addressed by name.
    ProcessInstanceTask { instance_id: i64, task_name: String },
    /// A task instance, addressed by id.
    TaskInstance { task_id: i64 },
    /// Anything else.
    Malformed,
}

/// A parsed path: the route plus the trailing resource sub-path, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub route: Route,
    pub resource_path: Option<String>,
}

impl ParsedPath {
    fn malformed() -> Self {
        Self {
            route: Route::Malformed,
            resource_path: None,
        }
    }

    fn new(route: Route, rest: &[String]) -> Self {
        let resource_path = if rest.is_empty() {
            None
        } else {
            Some(rest.join("/"))
        };
        Self {
            route,
            resource_path,
        }
    }
}

impl Route {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Route::Process { .. } => "process",
            Route::ProcessInstance { .. } => "process_instance",
            Route::ProcessInstanceTask { .. } => "process_instance_task",
            Route::TaskInstance { .. } => "task_instance",
            Route::Malformed => "malformed",
        }
    }
}

/// Parse a path info string into a route.
pub fn parse_route(path: &str) -> ParsedPath {
    let segments = match decode_segments(path) {
        Some(segments) => segments,
        None => return ParsedPath::malformed(),
    };

    match segments.as_slice() {
        [prefix, name, version, rest @ ..] if prefix == PROCESS_PREFIX => ParsedPath::new(
            Route::Process {
                name: name.clone(),
                version: version.clone(),
            },
            rest,
        ),
        [prefix, id, task, task_name, ..]
            if prefix == PROCESS_INSTANCE_PREFIX && task == TASK_SEGMENT =>
        {
            match parse_id(id) {
                Some(instance_id) => ParsedPath::new(
                    Route::ProcessInstanceTask {
                        instance_id,
                        task_name: task_name.clone(),
                    },
                    &[],
                ),
                None => ParsedPath::malformed(),
            }
        }
        // "task" without a name is a missing identifier, not a resource
        [prefix, _, task] if prefix == PROCESS_INSTANCE_PREFIX && task == TASK_SEGMENT => {
            ParsedPath::malformed()
        }
        [prefix, id, rest @ ..] if prefix == PROCESS_INSTANCE_PREFIX => match parse_id(id) {
            Some(instance_id) => ParsedPath::new(Route::ProcessInstance { instance_id }, rest),
            None => ParsedPath::malformed(),
        },
        [prefix, id, rest @ ..] if prefix == TASK_INSTANCE_PREFIX => match parse_id(id) {
            Some(task_id) => ParsedPath::new(Route::TaskInstance { task_id }, rest),
            None => ParsedPath::malformed(),
        },
        _ => ParsedPath::malformed(),
    }
}

/// Split on `/`, drop empty segments and decode each one.
/// Returns `None` when a segment is not valid UTF-8 once decoded.
fn decode_segments(path: &str) -> Option<Vec<String>> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .collect()
}

/// Decode a single segment with form-URL semantics.
fn decode_segment(segment: &str) -> Option<String> {
    let spaced = segment.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id >= 0)
}
