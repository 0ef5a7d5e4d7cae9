//! Custom pages served from a directory.
//!
//! Layout: `{root}/{page_name}/index.html` is the page entry point; every
//! other file below `{root}/{page_name}/` is a resource of the page.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::form::FormRequest;
use crate::render::{resolve_locale, PageRenderer, RenderError};
use crate::security::Session;

const INDEX_FILE: &str = "index.html";

/// Serves custom pages from the filesystem.
#[derive(Debug, Clone)]
pub struct FilesystemPageRenderer {
    root: PathBuf,
    default_locale: String,
}

impl FilesystemPageRenderer {
    pub fn new(root: impl Into<PathBuf>, default_locale: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_locale: default_locale.into(),
        }
    }

    fn page_dir(&self, page_name: &str) -> Result<PathBuf, RenderError> {
        if !is_plain_relative(Path::new(page_name)) || page_name.contains('/') {
            return Err(RenderError::PageNotFound(page_name.to_string()));
        }
        let dir = self.root.join(page_name);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(RenderError::PageNotFound(page_name.to_string()))
        }
    }

    fn serve(&self, path: &Path, page_name: &str, resource: &str) -> Result<Response, RenderError> {
        match std::fs::read(path) {
            Ok(bytes) => {
                tracing::debug!(page = %page_name, resource = %resource, size = bytes.len(), "Serving page file");
                Ok(([(header::CONTENT_TYPE, content_type(path))], bytes).into_response())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RenderError::ResourceNotFound {
                page: page_name.to_string(),
                path: resource.to_string(),
            }),
            Err(e) => Err(RenderError::Failure(e.to_string())),
        }
    }
}

impl PageRenderer for FilesystemPageRenderer {
    fn display_custom_page(
        &self,
        _request: &FormRequest,
        _session: &Session,
        page_name: &str,
    ) -> Result<Response, RenderError> {
        let dir = self.page_dir(page_name)?;
        let index = dir.join(INDEX_FILE);
        if !index.is_file() {
            return Err(RenderError::Failure(format!(
                "page {} has no {}",
                page_name, INDEX_FILE
            )));
        }
        self.serve(&index, page_name, INDEX_FILE)
    }

    fn display_custom_page_resource(
        &self,
        _request: &FormRequest,
        _session: &Session,
        page_name: &str,
        resource_path: &str,
    ) -> Result<Response, RenderError> {
        let dir = self.page_dir(page_name)?;
        let relative = Path::new(resource_path);
        if !is_plain_relative(relative) {
            return Err(RenderError::ResourceNotFound {
                page: page_name.to_string(),
                path: resource_path.to_string(),
            });
        }
        self.serve(&dir.join(relative), page_name, resource_path)
    }

    fn current_locale(&self, request: &FormRequest, session: &Session) -> String {
        resolve_locale(request, session, &self.default_locale)
    }
}

/// Only normal components: no root, no `..`, no `.`.
fn is_plain_relative(path: &Path) -> bool {
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Content type guessed from the file extension; text types are served as UTF-8.
fn content_type(path: &Path) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() == "text" && mime.get_param("charset").is_none() {
        format!("{}; charset=utf-8", mime)
    } else {
        mime.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn setup() -> (tempfile::TempDir, FilesystemPageRenderer) {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("custompage_form");
        std::fs::create_dir_all(page.join("css")).unwrap();
        std::fs::write(page.join("index.html"), "<html>form</html>").unwrap();
        std::fs::write(page.join("css/style.css"), "body {}").unwrap();
        std::fs::create_dir_all(dir.path().join("custompage_empty")).unwrap();
        let renderer = FilesystemPageRenderer::new(dir.path(), "en");
        (dir, renderer)
    }

    fn request() -> FormRequest {
        FormRequest::new("/bonita", "/portal/form", "/process/a/1")
    }

    #[test]
    fn test_render_index() {
        let (_dir, renderer) = setup();
        let response = renderer
            .display_custom_page(&request(), &Session::new(1, "u"), "custompage_form")
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_render_resource() {
        let (_dir, renderer) = setup();
        let response = renderer
            .display_custom_page_resource(&request(), &Session::new(1, "u"), "custompage_form", "css/style.css")
            .unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css; charset=utf-8"
        );
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("img/logo.png")), "image/png");
        assert!(content_type(Path::new("fonts/form.woff")).contains("woff"));
        assert!(content_type(Path::new("app.mjs")).contains("javascript"));
        assert_eq!(content_type(Path::new("data.unknownext")), "application/octet-stream");
    }

    #[test]
    fn test_render_module_script_resource() {
        let (dir, renderer) = setup();
        std::fs::write(dir.path().join("custompage_form/app.mjs"), "export {}").unwrap();
        let response = renderer
            .display_custom_page_resource(&request(), &Session::new(1, "u"), "custompage_form", "app.mjs")
            .unwrap();
        let value = response.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(value.contains("javascript"), "got {}", value);
    }

    #[test]
    fn test_missing_page() {
        let (_dir, renderer) = setup();
        let err = renderer
            .display_custom_page(&request(), &Session::new(1, "u"), "custompage_missing")
            .unwrap_err();
        assert_eq!(err, RenderError::PageNotFound("custompage_missing".into()));
    }

    #[test]
    fn test_page_without_index_is_a_failure() {
        let (_dir, renderer) = setup();
        let err = renderer
            .display_custom_page(&request(), &Session::new(1, "u"), "custompage_empty")
            .unwrap_err();
        assert!(matches!(err, RenderError::Failure(_)));
    }

    #[test]
    fn test_traversal_is_rejected() {
        let (_dir, renderer) = setup();
        let session = Session::new(1, "u");
        assert!(matches!(
            renderer.display_custom_page_resource(&request(), &session, "custompage_form", "../custompage_form/index.html"),
            Err(RenderError::ResourceNotFound { .. })
        ));
        assert!(matches!(
            renderer.display_custom_page(&request(), &session, ".."),
            Err(RenderError::PageNotFound(_))
        ));
    }
}
