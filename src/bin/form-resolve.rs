//! Resolve a form path offline against a configuration file.
//!
//! Prints the status and the redirect location (if any) the server would answer with.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use process_form_router::config::load_config;
use process_form_router::render::FilesystemPageRenderer;
use process_form_router::security::{InMemorySessionStore, Session, SessionStore};
use process_form_router::service::InMemoryFormService;
use process_form_router::{FormRequest, FormRouter};

#[derive(Parser)]
#[command(name = "form-resolve")]
#[command(about = "Resolve a portal form path without starting the server", long_about = None)]
struct Cli {
    #[arg(short, long)]
    config: PathBuf,

    /// Session token to resolve the caller with.
    #[arg(short, long)]
    token: String,

    /// Path info, e.g. /process/Leave+request/1.0
    path: String,

    /// Raw query string, e.g. "user=3&locale=fr"
    #[arg(short, long, default_value = "")]
    query: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let sessions = InMemorySessionStore::from_config(&config.session);
    let session: Session = sessions
        .lookup(&cli.token)
        .ok_or_else(|| format!("unknown session token '{}'", cli.token))?;

    let router = FormRouter::new(
        Arc::new(InMemoryFormService::from_catalog(&config.catalog)),
        Arc::new(FilesystemPageRenderer::new(
            &config.pages.directory,
            &config.portal.default_locale,
        )),
    );
    let request = FormRequest::new(&config.portal.context_path, &config.portal.servlet_path, cli.path)
        .with_query(&cli.query);

    let response = router.handle(&request, &session);
    println!("{} {}", response.status().as_u16(), response.outcome());
    if let Some(location) = response.location() {
        println!("Location: {}", location);
    }
    if let Some(err) = response.error() {
        println!("{}", err);
    }
    Ok(())
}
