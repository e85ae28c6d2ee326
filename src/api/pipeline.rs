//! Request Pipeline
//!
//! Every stock endpoint runs the same ordered steps: rate check, validation,
//! cache lookup, upstream call with shaping, cache store. Endpoints only
//! declare what differs between them through the [`Endpoint`] trait.

use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::AppState;
use crate::error::{ApiError, Result};
use crate::models::QueryParams;
use crate::upstream::UpstreamResult;

/// Outcome of validating a request's query parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<P, R> {
    /// Parameters are usable; continue to the cache and upstream.
    Proceed(P),
    /// Answer immediately with this body, skipping cache and upstream.
    Respond(R),
}

// == Endpoint ==
/// Declarative description of one cached, rate-limited stock endpoint.
#[async_trait]
pub trait Endpoint: Send + Sync + 'static {
    type Params: Send + Sync + 'static;
    type Response: Serialize + Send;

    /// Short name used in logs
    const NAME: &'static str;
    /// Route path, also the rate-limit route key
    const ROUTE: &'static str;
    const CACHE_PREFIX: &'static str;
    const TTL: Duration;
    /// Client-facing message when the upstream call fails
    const FAILURE_MESSAGE: &'static str;

    fn validate(&self, query: &QueryParams) -> Result<Validated<Self::Params, Self::Response>>;

    /// Key suffix after `CACHE_PREFIX:`.
    fn cache_key(&self, params: &Self::Params) -> String;

    /// Calls the provider and shapes its answer.
    async fn fetch(&self, state: &AppState, params: &Self::Params)
        -> UpstreamResult<Self::Response>;
}

/// Full cache key for validated parameters.
pub fn cache_key_for<E: Endpoint>(endpoint: &E, params: &E::Params) -> String {
    format!("{}:{}", E::CACHE_PREFIX, endpoint.cache_key(params))
}

/// Runs `endpoint` for one request from `client_id`.
///
/// Locks are taken per step and never held across the upstream call. The
/// upstream call runs in its own task so the cache is filled even when the
/// client goes away mid-request.
pub async fn run<E: Endpoint>(
    state: AppState,
    endpoint: E,
    client_id: &str,
    query: &QueryParams,
) -> Result<Json<Value>> {
    let allowed = state
        .limiter
        .write()
        .await
        .check_and_consume(client_id, E::ROUTE);
    if !allowed {
        warn!(endpoint = E::NAME, client = %client_id, "rate limit exceeded");
        return Err(ApiError::RateLimited);
    }

    let params = match endpoint.validate(query)? {
        Validated::Proceed(params) => params,
        Validated::Respond(body) => return Ok(Json(serde_json::to_value(body)?)),
    };

    let key = cache_key_for(&endpoint, &params);
    let cached = state.cache.write().await.get(&key);
    if let Some(body) = cached {
        debug!(endpoint = E::NAME, key = %key, "cache hit");
        return Ok(Json(body));
    }
    debug!(endpoint = E::NAME, key = %key, "cache miss");

    let task = tokio::spawn(async move {
        let response = match endpoint.fetch(&state, &params).await {
            Ok(response) => response,
            Err(err) => {
                error!(
                    endpoint = E::NAME,
                    upstream_status = ?err.status(),
                    error = %err,
                    "upstream request failed"
                );
                return Err(ApiError::Upstream(E::FAILURE_MESSAGE));
            }
        };

        let body = serde_json::to_value(response)?;
        state.cache.write().await.set(key, body.clone(), E::TTL);
        Ok::<Value, ApiError>(body)
    });

    let body = task
        .await
        .map_err(|err| ApiError::Internal(format!("{} task failed: {err}", E::NAME)))??;

    Ok(Json(body))
}
