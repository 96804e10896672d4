//! The remote client and its CRUD operations.

use crate::config::{ClientConfig, UpdateMethod};
use crate::error::{RemoteError, RemoteResult};
use crate::route::Route;
use railsync_model::{apply, envelope, RemoteId, RemoteModel, ValidationErrors};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Asynchronous client for a Rails-style REST backend.
///
/// Cheap to clone (the underlying connection pool is shared). See the crate
/// docs for the completion and concurrency contract.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl RemoteClient {
    /// Creates a client from an explicit configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");
        Self { config, http }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches every remote object of a type: `GET /posts`.
    pub async fn fetch_all<T: RemoteModel>(&self) -> RemoteResult<Vec<T>> {
        let body = self
            .send::<T>(Method::GET, &Route::collection::<T>(), None)
            .await?;
        collect(&body)
    }

    /// Fetches a collection with query parameters: `GET /posts?q=search`.
    pub async fn fetch_all_where<T: RemoteModel>(
        &self,
        params: &[(&str, &str)],
    ) -> RemoteResult<Vec<T>> {
        let route = Route::collection::<T>().with_query(params.iter().copied());
        let body = self.send::<T>(Method::GET, &route, None).await?;
        collect(&body)
    }

    /// Fetches a collection scoped under a parent resource:
    /// `GET /posts/7/responses`. The parent must be persisted.
    pub async fn fetch_all_via<T: RemoteModel, P: RemoteModel>(
        &self,
        parent: &P,
    ) -> RemoteResult<Vec<T>> {
        let parent_id = parent.remote_id().ok_or(RemoteError::MissingRemoteId)?;
        let route = Route::collection_via::<T, P>(parent_id);
        let body = self.send::<T>(Method::GET, &route, None).await?;
        collect(&body)
    }

    /// Fetches one remote object by id: `GET /posts/7`.
    pub async fn fetch_one<T: RemoteModel>(&self, id: RemoteId) -> RemoteResult<T> {
        let body = self
            .send::<T>(Method::GET, &Route::member::<T>(id), None)
            .await?;
        let mut obj = T::default();
        apply(&mut obj, &body)?;
        Ok(obj)
    }

    /// Refreshes a persisted object in place: `GET /posts/7`.
    pub async fn fetch<T: RemoteModel>(&self, obj: &mut T) -> RemoteResult<()> {
        let id = obj.remote_id().ok_or(RemoteError::MissingRemoteId)?;
        let body = self
            .send::<T>(Method::GET, &Route::member::<T>(id), None)
            .await?;
        apply(obj, &body)?;
        Ok(())
    }

    /// Creates the object remotely: `POST /posts` with the wrapped envelope.
    /// On success the response is applied back — the object gains its
    /// [`RemoteId`] and every mapped property refreshes, recursively.
    pub async fn create<T: RemoteModel>(&self, obj: &mut T) -> RemoteResult<()> {
        let payload = envelope(obj)?.wrapped(T::model_name());
        let body = self
            .send::<T>(Method::POST, &Route::collection::<T>(), Some(payload))
            .await?;
        if !body.is_null() {
            apply(obj, &body)?;
        }
        info!(model = T::model_name(), id = ?obj.remote_id(), "created remote object");
        Ok(())
    }

    /// Updates the object's remote row using the configured update method.
    /// Responses with a body (some servers echo the record) are applied;
    /// a bare `head :ok` applies nothing.
    pub async fn update<T: RemoteModel>(&self, obj: &mut T) -> RemoteResult<()> {
        let method = match self.config.update_method {
            UpdateMethod::Put => Method::PUT,
            UpdateMethod::Patch => Method::PATCH,
        };
        self.write_member(method, obj).await
    }

    /// Replaces the object's remote row, always via `PUT` regardless of the
    /// configured update method.
    pub async fn replace<T: RemoteModel>(&self, obj: &mut T) -> RemoteResult<()> {
        self.write_member(Method::PUT, obj).await
    }

    /// Destroys the object's remote row: `DELETE /posts/7`. On success the
    /// local object is detached — its [`RemoteId`] is cleared, everything
    /// else is left alone.
    pub async fn destroy<T: RemoteModel>(&self, obj: &mut T) -> RemoteResult<()> {
        let id = obj.remote_id().ok_or(RemoteError::MissingRemoteId)?;
        self.send::<T>(Method::DELETE, &Route::member::<T>(id), None)
            .await?;
        obj.set_remote_id(None);
        info!(model = T::model_name(), %id, "destroyed remote object");
        Ok(())
    }

    async fn write_member<T: RemoteModel>(&self, method: Method, obj: &mut T) -> RemoteResult<()> {
        let id = obj.remote_id().ok_or(RemoteError::MissingRemoteId)?;
        let payload = envelope(obj)?.wrapped(T::model_name());
        let body = self
            .send::<T>(method, &Route::member::<T>(id), Some(payload))
            .await?;
        if body.is_object() {
            apply(obj, &body)?;
        }
        Ok(())
    }

    /// Sends one request and classifies the response: 2xx parses as JSON
    /// (`Null` for empty bodies), 422 translates into validation errors
    /// against `T`'s mapping, anything else is an HTTP or connectivity
    /// error.
    async fn send<T: RemoteModel>(
        &self,
        method: Method,
        route: &Route,
        body: Option<Value>,
    ) -> RemoteResult<Value> {
        let url = route.url(&self.config.base_url);
        debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, &url).header(ACCEPT, "application/json");
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_ref());
        }
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }
        for (name, value) in &self.config.extra_headers {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Connectivity(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Connectivity(format!("reading response failed: {e}")))?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&text)?)
        } else if status.as_u16() == 422 {
            let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
            let errors = ValidationErrors::from_response(&T::mapping(), &body);
            warn!(model = T::model_name(), %url, "validation failed: {errors}");
            Err(RemoteError::Validation(errors))
        } else {
            Err(RemoteError::Http {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

fn collect<T: RemoteModel>(body: &Value) -> RemoteResult<Vec<T>> {
    let entries = body
        .as_array()
        .ok_or(railsync_model::MappingError::MalformedResponse("a JSON array"))?;
    let mut objects = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut obj = T::default();
        apply(&mut obj, entry)?;
        objects.push(obj);
    }
    Ok(objects)
}
