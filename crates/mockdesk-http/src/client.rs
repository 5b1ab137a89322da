//! JSON-over-HTTP client.

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use mockdesk_core::error::TransportError;
use mockdesk_core::{BaseUrl, Result};

/// Message used when the server could not be reached at all.
pub const NETWORK_ERROR: &str = "Network Error";

/// HTTP client bound to one API root.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base: BaseUrl,
}

impl RestClient {
    /// Create a client for the given API root.
    pub fn new(base: BaseUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mockdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, base })
    }

    /// Returns the API root this client is configured for.
    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// GET `path` with query parameters.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get<Q, R>(&self, path: &str, params: &Q) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(%url, "GET");
        trace!(?params, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;

        handle_response(response).await
    }

    /// POST a JSON body to `path`.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// PUT a JSON body to `path`.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// DELETE `path`, ignoring any response body.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.base.endpoint(path);
        debug!(%url, "DELETE");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(transport_error)?;

        check_status(&response)?;
        Ok(())
    }

    async fn send_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(%method, %url, "sending JSON");

        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        handle_response(response).await
    }
}

/// Check the status, then decode the body.
async fn handle_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    check_status(&response)?;
    let body = response.json::<R>().await.map_err(transport_error)?;
    Ok(body)
}

fn check_status(response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    trace!(status = %status, "response");

    if status.is_success() {
        Ok(())
    } else {
        Err(TransportError::status(status.as_u16()).into())
    }
}

/// Classify a reqwest failure.
pub(crate) fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else if let Some(status) = err.status() {
        TransportError::status(status.as_u16())
    } else if err.is_connect() || err.is_request() {
        TransportError::Connection {
            message: NETWORK_ERROR.to_string(),
        }
    } else {
        TransportError::Connection {
            message: err.to_string(),
        }
    }
}
