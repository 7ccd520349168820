use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use once_cell::sync::OnceCell;
use sha2::{Digest, Sha256};

use crate::config::DocsOptions;
use crate::error::ApiError;
use crate::services::{HubDiscovery, HubInspector, TemplateService};

const TESTING_TEMPLATE: &str = "testing";

/// Documentation JSON rendered once per process.
#[derive(Debug)]
struct RenderedDocs {
    body: String,
    etag: String,
}

/// Shared state behind the documentation routes.
#[derive(Clone)]
pub struct DocsState {
    inspector: Arc<HubInspector>,
    discovery: Arc<dyn HubDiscovery>,
    options: Arc<DocsOptions>,
    templates: Arc<TemplateService>,
    rendered: Arc<OnceCell<RenderedDocs>>,
}

impl DocsState {
    pub fn new(inspector: Arc<HubInspector>, discovery: Arc<dyn HubDiscovery>, options: DocsOptions) -> Self {
        Self {
            inspector,
            discovery,
            options: Arc::new(options),
            templates: Arc::new(TemplateService::new()),
            rendered: Arc::new(OnceCell::new()),
        }
    }

    pub fn inspector(&self) -> &HubInspector {
        &self.inspector
    }

    pub fn options(&self) -> &DocsOptions {
        &self.options
    }

    fn rendered(&self) -> Result<&RenderedDocs, ApiError> {
        self.rendered.get_or_try_init(|| {
            let documentation = self
                .inspector
                .generate_documentation(self.discovery.as_ref(), &self.options);
            let body = documentation.to_pretty_json()?;
            let etag = format!("\"{:x}\"", Sha256::digest(body.as_bytes()));
            tracing::info!(
                "Rendered documentation for {} hubs ({} bytes)",
                documentation.hubs.len(),
                body.len()
            );
            Ok(RenderedDocs { body, etag })
        })
    }
}

/// Routes serving `api.json`, `swagger.json` and the test console under the configured prefix.
pub fn docs_router(state: DocsState) -> Router {
    let prefix = state.options.normalized_prefix();

    let mut router = Router::new()
        .route(&format!("{}/api.json", prefix), get(api_json))
        .route(&format!("{}/swagger.json", prefix), get(api_json))
        .route(&format!("{}/", prefix), get(testing_page))
        .route(&format!("{}/*rest", prefix), get(testing_page));
    if !prefix.is_empty() {
        router = router.route(&prefix, get(testing_page));
    }

    router.with_state(state)
}

/// GET {prefix}/api.json - Documentation for every discovered hub
async fn api_json(State(state): State<DocsState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let rendered = state.rendered()?;
    let etag = HeaderValue::from_str(&rendered.etag)
        .map_err(|_| ApiError::internal_server_error("Invalid documentation ETag"))?;

    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .is_some_and(|value| value.as_bytes() == rendered.etag.as_bytes());
    if not_modified {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8")),
            (header::ETAG, etag),
        ],
        rendered.body.clone(),
    )
        .into_response())
}

/// GET {prefix}/* - Interactive test console
async fn testing_page(State(state): State<DocsState>) -> Result<Html<String>, ApiError> {
    let template = state.templates.load_template(TESTING_TEMPLATE)?;
    let options = state.options.as_ref();

    let page = state.templates.process_template(
        &template,
        [
            ("Title", format!("{} - Testing Interface", options.title)),
            ("ApiJsonUrl", options.api_json_url()),
            ("Description", options.description.clone()),
            ("SignalRClientUrl", options.signalr_client_url()),
            ("MessagePackClientUrl", options.messagepack_client_url()),
        ],
    );

    Ok(Html(page))
}
