//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the form router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the form router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the router is mounted in the portal.
    pub portal: PortalConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Session resolution.
    pub session: SessionConfig,

    /// Custom page storage.
    pub pages: PagesConfig,

    /// Seed data for the in-memory process form service.
    pub catalog: CatalogConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Portal mount points.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Web application context path (e.g., "/bonita").
    pub context_path: String,

    /// Servlet path of the form router inside the context (e.g., "/portal/form").
    pub servlet_path: String,

    /// Locale used when the request carries none.
    pub default_locale: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            context_path: "/bonita".to_string(),
            servlet_path: "/portal/form".to_string(),
            default_locale: "en".to_string(),
        }
    }
}

impl PortalConfig {
    /// Full mount prefix: context path followed by servlet path.
    pub fn mount_path(&self) -> String {
        format!("{}{}", self.context_path, self.servlet_path)
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Session resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie carrying the session token.
    pub cookie_name: String,

    /// Known sessions, keyed by token.
    pub sessions: Vec<SessionEntry>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "JSESSIONID".to_string(),
            sessions: Vec::new(),
        }
    }
}

/// A session declared in configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionEntry {
    pub token: String,
    pub user_id: i64,
    pub user_name: String,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Custom page storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Directory holding one sub-directory per custom page.
    pub directory: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            directory: "pages".to_string(),
        }
    }
}

/// Processes, instances and tasks known to the in-memory service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    pub processes: Vec<ProcessEntry>,
    pub instances: Vec<InstanceEntry>,
    pub tasks: Vec<TaskEntry>,
}

/// A deployed process definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessEntry {
    pub id: i64,
    pub name: String,
    pub version: String,

    /// Users allowed to start the process.
    #[serde(default)]
    pub starters: Vec<i64>,

    /// Form shown to start the process. None = no mapping.
    #[serde(default)]
    pub instantiation_form: Option<FormEntry>,

    /// Form shown for the process instance recap. None = no mapping.
    #[serde(default)]
    pub overview_form: Option<FormEntry>,

    /// Task forms, by task name.
    #[serde(default)]
    pub task_forms: Vec<TaskFormEntry>,
}

/// A form mapping target.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormEntry {
    /// Custom page name, external URL, or `LEGACY`.
    pub target: String,

    /// Target is an external URL.
    #[serde(default)]
    pub external: bool,
}

/// A form mapped to a task of a process.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskFormEntry {
    pub task_name: String,
    #[serde(flatten)]
    pub form: FormEntry,
}

/// A process instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstanceEntry {
    pub id: i64,
    pub process_id: i64,

    /// Users involved in the instance (initiator, actors, supervisors).
    #[serde(default)]
    pub involved_users: Vec<i64>,
}

/// A human task instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskEntry {
    pub id: i64,
    pub instance_id: i64,
    pub name: String,

    /// Users who can perform the task.
    #[serde(default)]
    pub actors: Vec<i64>,
}
