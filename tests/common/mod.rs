//! Shared utilities for integration tests.

use std::net::SocketAddr;
use tokio::net::TcpListener;

use process_form_router::config::{
    FormEntry, InstanceEntry, ProcessEntry, RouterConfig, SessionEntry, TaskEntry, TaskFormEntry,
};
use process_form_router::{HttpServer, Shutdown};

pub const TOKEN: &str = "walter-token";
pub const OTHER_TOKEN: &str = "helen-token";

/// A running server plus what keeps it alive.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    _pages: tempfile::TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

fn form(target: &str, external: bool) -> Option<FormEntry> {
    Some(FormEntry {
        target: target.into(),
        external,
    })
}

/// Config with a small catalog: a process with a custom start page, a process
/// without mappings, a process whose page is missing, one instance and one task.
pub fn test_config(pages_dir: &str) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.pages.directory = pages_dir.into();
    config.session.sessions = vec![
        SessionEntry {
            token: TOKEN.into(),
            user_id: 1,
            user_name: "walter.bates".into(),
            locale: None,
        },
        SessionEntry {
            token: OTHER_TOKEN.into(),
            user_id: 2,
            user_name: "helen.kelly".into(),
            locale: Some("fr".into()),
        },
    ];
    config.catalog.processes = vec![
        ProcessEntry {
            id: 1,
            name: "processName".into(),
            version: "processVersion".into(),
            starters: vec![1],
            instantiation_form: form("custompage_form", false),
            overview_form: None,
            task_forms: vec![TaskFormEntry {
                task_name: "taskName".into(),
                form: FormEntry {
                    target: "https://forms.example.com/review".into(),
                    external: true,
                },
            }],
        },
        ProcessEntry {
            id: 2,
            name: "processus é+ø".into(),
            version: "1.0".into(),
            starters: vec![1, 2],
            instantiation_form: None,
            overview_form: None,
            task_forms: vec![],
        },
        ProcessEntry {
            id: 3,
            name: "broken".into(),
            version: "1".into(),
            starters: vec![1],
            instantiation_form: form("custompage_missing", false),
            overview_form: None,
            task_forms: vec![],
        },
    ];
    config.catalog.instances = vec![InstanceEntry {
        id: 42,
        process_id: 1,
        involved_users: vec![1],
    }];
    config.catalog.tasks = vec![TaskEntry {
        id: 7,
        instance_id: 42,
        name: "taskName".into(),
        actors: vec![1],
    }];
    config
}

/// Write the custom pages and start a server on an ephemeral port.
pub async fn start_server() -> TestServer {
    let pages = tempfile::tempdir().unwrap();
    let page = pages.path().join("custompage_form");
    std::fs::create_dir_all(page.join("css")).unwrap();
    std::fs::write(page.join("index.html"), "<html>custompage_form</html>").unwrap();
    std::fs::write(page.join("css/style.css"), "body { margin: 0 }").unwrap();

    let config = test_config(pages.path().to_str().unwrap());
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        shutdown,
        _pages: pages,
    }
}

/// Client that does not follow redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
