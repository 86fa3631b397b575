//! Scoped fetch client: every outgoing request carries the active
//! division scope and the bearer token, so call sites never repeat that
//! logic. Errors propagate typed; retries are a caller policy.

use contracts::division::{scope_params, DivisionSelection};
use contracts::domain::MutationResponse;
use contracts::error::ApiError;
use contracts::list::unwrap_collection;
use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde_json::Value;
use std::pin::pin;

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;

#[derive(Clone, Copy, Debug)]
pub struct ScopedClient {
    timeout_ms: u32,
}

impl Default for ScopedClient {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ScopedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout_ms(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    /// GET returning the raw JSON body. Scope parameters are appended per
    /// the active selection; no selection appends neither (callers gate on
    /// the division context before loading scoped data).
    pub async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        selection: Option<&DivisionSelection>,
    ) -> Result<Value, ApiError> {
        let mut params = query.to_vec();
        params.extend(scope_params(selection));
        let url = build_url(path, &params)?;

        let response = self
            .send(with_auth(Request::get(&url)).build().map_err(request_error)?)
            .await?;
        read_json(response).await
    }

    /// GET a collection endpoint and unwrap the payload array.
    pub async fn get_collection(
        &self,
        path: &str,
        query: &[(String, String)],
        selection: Option<&DivisionSelection>,
        resource_key: &str,
    ) -> Result<Vec<Value>, ApiError> {
        let body = self.get(path, query, selection).await?;
        unwrap_collection(&body, resource_key).ok_or_else(|| {
            ApiError::NetworkFailure(format!(
                "unexpected response shape for {} (no {} / data / array)",
                path, resource_key
            ))
        })
    }

    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<MutationResponse, ApiError> {
        let url = build_url(path, &[])?;
        let request = with_auth(Request::post(&url))
            .json(body)
            .map_err(request_error)?;
        let response = self.send(request).await?;
        read_message(response).await
    }

    pub async fn put<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<MutationResponse, ApiError> {
        let url = build_url(path, &[])?;
        let request = with_auth(Request::put(&url))
            .json(body)
            .map_err(request_error)?;
        let response = self.send(request).await?;
        read_message(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<MutationResponse, ApiError> {
        let url = build_url(path, &[])?;
        let request = with_auth(Request::delete(&url))
            .build()
            .map_err(request_error)?;
        let response = self.send(request).await?;
        read_message(response).await
    }

    /// Send with the configured deadline. The transport request is not
    /// aborted on timeout; the response is simply ignored on arrival.
    async fn send(&self, request: gloo_net::http::Request) -> Result<Response, ApiError> {
        let timeout_ms = self.timeout_ms;
        let sent = pin!(request.send());
        let deadline = pin!(TimeoutFuture::new(timeout_ms));
        let response = match select(sent, deadline).await {
            Either::Left((result, _)) => result.map_err(request_error)?,
            Either::Right(_) => return Err(ApiError::Timeout(timeout_ms)),
        };
        if !response.ok() {
            return Err(http_error(response).await);
        }
        Ok(response)
    }
}

/// Bearer credentials are read at call time, not at client construction,
/// so a token refreshed mid-session is picked up on the next request.
fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn build_url(path: &str, params: &[(String, String)]) -> Result<String, ApiError> {
    let mut url = api_url(path)?;
    let query = query_string(params);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    Ok(url)
}

fn query_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn request_error(err: gloo_net::Error) -> ApiError {
    ApiError::NetworkFailure(err.to_string())
}

/// 4xx/5xx responses carry a JSON `message` where the server has one;
/// fall back to the status text.
async fn http_error(response: Response) -> ApiError {
    let status = response.status();
    let status_text = response.status_text();
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(status_text);
    ApiError::HttpError { status, message }
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    response
        .json::<Value>()
        .await
        .map_err(|err| ApiError::NetworkFailure(format!("malformed response body: {}", err)))
}

async fn read_message(response: Response) -> Result<MutationResponse, ApiError> {
    let body = read_json(response).await?;
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("OK")
        .to_string();
    Ok(MutationResponse { message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_encodes_values() {
        let params = vec![
            ("divisionId".to_string(), "7".to_string()),
            ("search".to_string(), "bolt m4 / 20".to_string()),
        ];
        assert_eq!(
            query_string(&params),
            "divisionId=7&search=bolt%20m4%20%2F%2020"
        );
        assert_eq!(query_string(&[]), "");
    }
}
