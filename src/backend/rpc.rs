use crate::{
    config::BackendConfig,
    error::{DesignError, Result},
    logger,
    models::ActionResult,
};
use reqwest::{multipart::Form, Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Multipart,
}

/// Single-shot POST client for the design backend. Every outcome comes back as an
/// [`ActionResult`]; errors never escape as `Err` or panics.
#[derive(Clone)]
pub struct RpcClient {
    client: Client,
    base_url: String,
}

impl RpcClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| DesignError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn post_json<P, R>(&self, endpoint: &str, payload: &P) -> ActionResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(endpoint, payload, BodyEncoding::Json).await
    }

    pub async fn post_form<P, R>(&self, endpoint: &str, payload: &P) -> ActionResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(endpoint, payload, BodyEncoding::Multipart).await
    }

    pub async fn send<P, R>(&self, endpoint: &str, payload: &P, encoding: BodyEncoding) -> ActionResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let result = self.handle_request(endpoint, payload, encoding).await;
        Self::finish(endpoint, result)
    }

    /// GET `<base_url><endpoint>/<segments...>`; each segment is percent-encoded.
    pub async fn get_json<R>(&self, endpoint: &str, segments: &[&str]) -> ActionResult<R>
    where
        R: DeserializeOwned,
    {
        let result = self.handle_get(endpoint, segments).await;
        Self::finish(endpoint, result)
    }

    pub fn resource_url(&self, endpoint: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint_url(endpoint))
            .map_err(|e| DesignError::Config(format!("invalid backend URL: {}", e)))?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| DesignError::Config("backend URL cannot carry a path".into()))?
                .pop_if_empty()
                .extend(segments);
        }
        Ok(url)
    }

    fn finish<R>(endpoint: &str, result: Result<R>) -> ActionResult<R> {
        if let Err(e) = &result {
            log::error!("Backend call to {} failed: {}", endpoint, e);
        }
        result.into()
    }

    async fn handle_request<P, R>(&self, endpoint: &str, payload: &P, encoding: BodyEncoding) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint);
        let _timer = logger::timer(endpoint);
        log::debug!("POST {} ({:?})", url, encoding);

        let request = self.client.post(&url);
        let request = match encoding {
            BodyEncoding::Json => request.json(payload),
            BodyEncoding::Multipart => request.multipart(build_form(payload)?),
        };
        Self::execute(endpoint, &url, request).await
    }

    async fn handle_get<R>(&self, endpoint: &str, segments: &[&str]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.resource_url(endpoint, segments)?;
        let _timer = logger::timer(endpoint);
        log::debug!("GET {}", url);

        let request = self.client.get(url.clone());
        Self::execute(endpoint, url.as_str(), request).await
    }

    async fn execute<R>(endpoint: &str, url: &str, request: RequestBuilder) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|e| DesignError::Request(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<error body unreadable: {}>", e),
            };
            return Err(DesignError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DesignError::Response(format!("failed reading body from {}: {}", endpoint, e)))?;
        log::debug!("{} responded with {} bytes", endpoint, body.len());

        serde_json::from_str(&body)
            .map_err(|e| DesignError::Response(format!("invalid JSON from {}: {}", endpoint, e)))
    }
}

/// Flattens a payload into multipart text fields, one per key. `null` values are dropped,
/// strings go verbatim and anything else is sent as its JSON text.
pub fn form_fields<P: Serialize + ?Sized>(payload: &P) -> Result<Vec<(String, String)>> {
    let Value::Object(map) = serde_json::to_value(payload)? else {
        return Err(DesignError::Serialization(
            "multipart payload must serialize to an object".into(),
        ));
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((key, text)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

fn build_form<P: Serialize + ?Sized>(payload: &P) -> Result<Form> {
    Ok(form_fields(payload)?
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value)))
}
