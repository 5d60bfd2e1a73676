// src/services/crud.rs

//! Form/modal CRUD controller.
//!
//! One generic pattern instantiated per entity type: populate a draft,
//! validate required fields client-side, submit with a bearer token,
//! reconcile the local list in place, and surface a notification for
//! every mutating operation. Deletion needs an explicit confirmation and
//! removes the local copy only after the server confirms.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, ApiEnvelope, Artwork, BannerDraft};
use crate::utils::http::{authorize, send_json};
use crate::utils::join_endpoint;

/// A form draft that can be validated and submitted.
pub trait EntityForm: Serialize {
    /// Human label used in notifications, e.g. `"sponsor banner"`.
    const ENTITY: &'static str;

    /// Server id, present in edit mode and absent in create mode.
    fn id(&self) -> Option<&str>;

    /// Required fields that are still empty, in form order.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Submit payload, applying server-required coercions.
    fn to_payload(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl EntityForm for BannerDraft {
    const ENTITY: &'static str = "sponsor banner";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        BannerDraft::missing_fields(self)
    }

    fn to_payload(&self) -> Result<serde_json::Value> {
        BannerDraft::to_payload(self)
    }
}

impl EntityForm for Artwork {
    const ENTITY: &'static str = "artwork";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.artist.trim().is_empty() {
            missing.push("artist");
        }
        missing
    }
}

/// Result of client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub missing_fields: Vec<&'static str>,
}

/// Validate a draft without touching the network.
pub fn validate<F: EntityForm>(draft: &F) -> ValidationOutcome {
    let missing_fields = draft.missing_fields();
    ValidationOutcome {
        valid: missing_fields.is_empty(),
        missing_fields,
    }
}

/// Populate a draft for the modal: a copy in edit mode, defaults in
/// create mode.
pub fn open_draft<F: EntityForm + Clone + Default>(existing: Option<&F>) -> F {
    existing.cloned().unwrap_or_default()
}

/// Sink for user-visible success/failure notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier writing to the log, used by the CLI.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        log::info!("{message}");
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}

/// Blocking yes/no prompt shown before destructive operations.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Fixed confirmation answer, for non-interactive callers and tests.
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Anything with a server id, for local list reconciliation.
pub trait HasId {
    fn entity_id(&self) -> Option<&str>;
}

impl HasId for BannerDraft {
    fn entity_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl HasId for Artwork {
    fn entity_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Replace the matching entry by id, or append when there is none.
pub fn patch_in_place<T: HasId>(list: &mut Vec<T>, updated: T) {
    let id = updated.entity_id().map(str::to_string);
    match id.and_then(|id| {
        list.iter()
            .position(|entry| entry.entity_id() == Some(id.as_str()))
    }) {
        Some(index) => list[index] = updated,
        None => list.push(updated),
    }
}

/// Drop the entry with the given id, keeping relative order.
pub fn remove_by_id<T: HasId>(list: &mut Vec<T>, id: &str) -> bool {
    let before = list.len();
    list.retain(|entry| entry.entity_id() != Some(id));
    list.len() != before
}

/// One mutating request to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: reqwest::Method,
    pub url: String,
    pub body: serde_json::Value,
}

/// Transport behind the CRUD client.
///
/// The HTTP implementation is the production path; tests inject fakes
/// that record requests and script responses.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiEnvelope<serde_json::Value>>;
}

/// Transport sending authorized JSON requests over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    api: ApiConfig,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, api: ApiConfig) -> Self {
        Self { client, api }
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiEnvelope<serde_json::Value>> {
        let builder = self.client.request(request.method, request.url);
        send_json(authorize(builder, &self.api).json(&request.body)).await
    }
}

/// Generic CRUD client for one backend entity endpoint family.
pub struct CrudClient<N: Notifier> {
    transport: Arc<dyn ApiTransport>,
    base_url: String,
    notifier: N,
}

impl<N: Notifier> CrudClient<N> {
    pub fn new(client: reqwest::Client, api: ApiConfig, notifier: N) -> Self {
        let base_url = api.base_url.clone();
        Self {
            transport: Arc::new(HttpTransport::new(client, api)),
            base_url,
            notifier,
        }
    }

    /// Build a client over a custom transport.
    pub fn with_transport(
        transport: Arc<dyn ApiTransport>,
        base_url: impl Into<String>,
        notifier: N,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            notifier,
        }
    }

    /// Create or update an entity.
    ///
    /// Validation runs first and blocks the network call entirely when
    /// required fields are missing. Create drafts POST to the endpoint,
    /// edit drafts PUT to `{endpoint}/{id}`.
    pub async fn submit<F: EntityForm>(
        &self,
        endpoint: &str,
        draft: &F,
    ) -> Result<ApiEnvelope<serde_json::Value>> {
        let outcome = validate(draft);
        if !outcome.valid {
            self.notifier.error(&format!(
                "Cannot save {}: missing {}",
                F::ENTITY,
                outcome.missing_fields.join(", ")
            ));
            return Err(AppError::MissingFields {
                missing: outcome.missing_fields,
            });
        }

        let payload = draft.to_payload()?;
        let url = join_endpoint(&self.base_url, endpoint);
        let request = match draft.id() {
            Some(id) => ApiRequest {
                method: reqwest::Method::PUT,
                url: format!("{url}/{id}"),
                body: payload,
            },
            None => ApiRequest {
                method: reqwest::Method::POST,
                url,
                body: payload,
            },
        };

        let fallback = format!("Failed to save {}", F::ENTITY);
        match self.transport.execute(request).await {
            Ok(envelope) if envelope.is_ok() => {
                self.notifier
                    .success(envelope.message_or(&format!("Saved {}", F::ENTITY)));
                Ok(envelope)
            }
            Ok(envelope) => {
                let message = envelope.message_or(&fallback).to_string();
                self.notifier.error(&message);
                Err(AppError::api(200, message))
            }
            Err(error) => {
                self.notifier.error(&format!("{fallback}: {error}"));
                Err(error)
            }
        }
    }

    /// Delete an entity after user confirmation.
    ///
    /// Returns `Ok(false)` when the user declined; the caller removes the
    /// local copy only on `Ok(true)`.
    pub async fn delete(
        &self,
        endpoint: &str,
        entity: &str,
        body: serde_json::Value,
        confirm: &dyn Confirm,
    ) -> Result<bool> {
        if !confirm.confirm(&format!("Delete this {entity}? This cannot be undone.")) {
            return Ok(false);
        }

        let request = ApiRequest {
            method: reqwest::Method::DELETE,
            url: join_endpoint(&self.base_url, endpoint),
            body,
        };

        let fallback = format!("Failed to delete {entity}");
        match self.transport.execute(request).await {
            Ok(envelope) if envelope.is_ok() => {
                self.notifier
                    .success(envelope.message_or(&format!("Deleted {entity}")));
                Ok(true)
            }
            Ok(envelope) => {
                let message = envelope.message_or(&fallback).to_string();
                self.notifier.error(&message);
                Err(AppError::api(200, message))
            }
            Err(error) => {
                self.notifier.error(&format!("{fallback}: {error}"));
                Err(error)
            }
        }
    }
}
