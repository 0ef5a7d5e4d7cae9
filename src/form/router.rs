//! Form request dispatch.
//!
//! # Responsibilities
//! - Parse the path into a route shape
//! - Resolve process definition, instance and task identifiers
//! - Check the caller may start, see or perform the target
//! - Resolve the form mapping and dispatch to legacy form, external page or custom page
//!
//! # Design Decisions
//! - Stateless: built once at start-up, shared between requests
//! - `handle` returns one `FormResponse`, so a request can never be answered twice
//! - Instance-plus-task-name paths are a convenience redirect, checked only when followed

use std::sync::Arc;

use crate::form::error::FormError;
use crate::form::links;
use crate::form::reference::FormReference;
use crate::form::request::FormRequest;
use crate::form::response::FormResponse;
use crate::render::PageRenderer;
use crate::routing::{parse_route, ParsedPath, Route};
use crate::security::Session;
use crate::service::{ProcessFormService, ServiceError};

/// Query parameter naming the user the caller acts on behalf of.
const USER_PARAMETER: &str = "user";

/// Identifiers known for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedContext {
    pub process_definition_id: Option<i64>,
    pub process_instance_id: Option<i64>,
    pub task_instance_id: Option<i64>,
    pub task_name: Option<String>,
}

/// The identifier driving a request, once the route is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    /// Start form of the process definition.
    Process,
    /// Recap of a process instance.
    ProcessInstance(i64),
    TaskInstance(i64),
}

impl ResolvedContext {
    pub fn target(&self) -> FormTarget {
        match (self.task_instance_id, self.process_instance_id) {
            (Some(task_id), _) => FormTarget::TaskInstance(task_id),
            (None, Some(instance_id)) => FormTarget::ProcessInstance(instance_id),
            (None, None) => FormTarget::Process,
        }
    }
}

/// Routes form requests to the right form.
pub struct FormRouter {
    service: Arc<dyn ProcessFormService>,
    renderer: Arc<dyn PageRenderer>,
}

impl FormRouter {
    pub fn new(service: Arc<dyn ProcessFormService>, renderer: Arc<dyn PageRenderer>) -> Self {
        Self { service, renderer }
    }

    /// Handle a form request and produce its single response.
    pub fn handle(&self, request: &FormRequest, session: &Session) -> FormResponse {
        let parsed = parse_route(&request.path_info);
        let route_kind = parsed.route.kind();

        match self.dispatch(request, session, &parsed) {
            Ok(response) => {
                tracing::debug!(
                    route = route_kind,
                    outcome = response.outcome(),
                    status = response.status().as_u16(),
                    "Form request handled"
                );
                response
            }
            Err(err) => {
                let status = err.status();
                if status.is_server_error() {
                    tracing::error!(route = route_kind, path = %request.path_info, status = status.as_u16(), error = %err, "Form request failed");
                } else {
                    tracing::warn!(route = route_kind, path = %request.path_info, status = status.as_u16(), error = %err, "Form request rejected");
                }
                FormResponse::Error(err)
            }
        }
    }

    fn dispatch(
        &self,
        request: &FormRequest,
        session: &Session,
        parsed: &ParsedPath,
    ) -> Result<FormResponse, FormError> {
        // 1. Route shape and acting user, before any lookup
        if parsed.route == Route::Malformed {
            return Err(FormError::MalformedRoute);
        }
        let acting_user = acting_user(request)?;

        let mut context = match &parsed.route {
            Route::Malformed => return Err(FormError::MalformedRoute),
            Route::ProcessInstanceTask {
                instance_id,
                task_name,
            } => {
                return self.redirect_to_task(request, session, *instance_id, task_name, acting_user);
            }
            Route::Process { name, version } => ResolvedContext {
                process_definition_id: Some(self.service.get_process_definition_id(
                    session, name, version,
                )?),
                ..Default::default()
            },
            Route::ProcessInstance { instance_id } => ResolvedContext {
                process_instance_id: Some(*instance_id),
                ..Default::default()
            },
            Route::TaskInstance { task_id } => ResolvedContext {
                task_instance_id: Some(*task_id),
                ..Default::default()
            },
        };
        let user_id = acting_user.unwrap_or(session.user_id);

        // 2. Identifiers
        let process_definition_id = self.service.ensure_process_definition_id(
            session,
            context.process_definition_id,
            context.process_instance_id,
            context.task_instance_id,
        )?;
        context.process_definition_id = Some(process_definition_id);
        if let Some(task_id) = context.task_instance_id {
            context.task_name = self.service.get_task_name(session, task_id)?;
        }
        let target = context.target();

        // 3. Authorization
        if !self.is_authorized(session, process_definition_id, target, user_id)? {
            return Err(FormError::Unauthorized);
        }

        // 4. Form mapping
        let is_recap = matches!(target, FormTarget::ProcessInstance(_));
        match self.service.get_form(
            session,
            process_definition_id,
            context.task_name.as_deref(),
            is_recap,
        ) {
            Ok(form) => self.display_form(
                request,
                session,
                &context,
                process_definition_id,
                &form,
                parsed.resource_path.as_deref(),
            ),
            Err(ServiceError::FormMappingNotFound { .. }) => {
                tracing::debug!(process_definition_id, "No form mapping, using legacy form");
                self.display_legacy_form(request, session, &context, process_definition_id)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn redirect_to_task(
        &self,
        request: &FormRequest,
        session: &Session,
        instance_id: i64,
        task_name: &str,
        acting_user: Option<i64>,
    ) -> Result<FormResponse, FormError> {
        match self
            .service
            .get_task_instance_id(session, instance_id, task_name, acting_user)?
        {
            Some(task_id) => Ok(FormResponse::Redirect(links::task_instance_url(
                &request.context_path,
                &request.servlet_path,
                task_id,
            ))),
            None => Err(FormError::TaskNotFound),
        }
    }

    fn is_authorized(
        &self,
        session: &Session,
        process_definition_id: i64,
        target: FormTarget,
        user_id: i64,
    ) -> Result<bool, FormError> {
        let allowed = match target {
            FormTarget::Process => {
                self.service
                    .is_allowed_to_start_process(session, process_definition_id, user_id)?
            }
            FormTarget::ProcessInstance(instance_id) => self.service.is_allowed_to_see_process_instance(
                session,
                process_definition_id,
                instance_id,
                user_id,
            )?,
            FormTarget::TaskInstance(task_id) => self.service.is_allowed_to_see_task(
                session,
                process_definition_id,
                task_id,
                user_id,
                false,
            )?,
        };
        Ok(allowed)
    }

    fn display_form(
        &self,
        request: &FormRequest,
        session: &Session,
        context: &ResolvedContext,
        process_definition_id: i64,
        form: &FormReference,
        resource_path: Option<&str>,
    ) -> Result<FormResponse, FormError> {
        if form.is_external {
            return Ok(FormResponse::Redirect(links::external_page_url(
                &form.identifier,
                process_definition_id,
                context.target(),
            )));
        }
        if form.is_legacy() {
            return self.display_legacy_form(request, session, context, process_definition_id);
        }

        let rendered = match resource_path {
            Some(path) => self.renderer.display_custom_page_resource(
                request,
                session,
                &form.identifier,
                path,
            ),
            None => self
                .renderer
                .display_custom_page(request, session, &form.identifier),
        };
        Ok(FormResponse::Rendered(rendered?))
    }

    fn display_legacy_form(
        &self,
        request: &FormRequest,
        session: &Session,
        context: &ResolvedContext,
        process_definition_id: i64,
    ) -> Result<FormResponse, FormError> {
        let target = context.target();
        let process_uuid = self
            .service
            .get_process_definition_uuid(session, process_definition_id)?;
        let form_id = links::legacy_form_id(
            &process_uuid,
            context.task_name.as_deref(),
            matches!(target, FormTarget::ProcessInstance(_)),
        );
        let locale = self.renderer.current_locale(request, session);

        Ok(FormResponse::Redirect(links::legacy_form_url(
            &request.context_path,
            &locale,
            process_definition_id,
            &form_id,
            target,
        )))
    }
}

/// User named by the `user` query parameter, if any.
fn acting_user(request: &FormRequest) -> Result<Option<i64>, FormError> {
    match request.parameter(USER_PARAMETER) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| FormError::InvalidUser),
    }
}
