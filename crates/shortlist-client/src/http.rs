use crate::config::ClientConfig;
use crate::schema::{parse_create_response, CreateRequest};
use async_trait::async_trait;
use shortlist_core::{ClientError, ConfigError, LinkId, LinkService, MintedLink};
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, ClientError>;

/// Error bodies longer than this are cut before they land in a [`ClientError`].
const MAX_ERROR_BODY_CHARS: usize = 256;

/// A [`LinkService`] backed by the shortening service's HTTP API.
///
/// - `POST {base}/create` with `{"url": ...}`, expecting `{"id": "..."}`
/// - `DELETE {base}/delete/{id}`, only the status is looked at
///
/// The client holds no state besides its connection pool; it never touches
/// the local link store.
#[derive(Debug, Clone)]
pub struct HttpLinkService {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpLinkService {
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl LinkService for HttpLinkService {
    async fn create(&self, original_url: &str) -> Result<MintedLink> {
        if original_url.trim().is_empty() {
            return Err(ClientError::EmptyUrl);
        }

        let endpoint = self.config.create_url();
        trace!(endpoint = %endpoint, url = original_url, "requesting short link");

        let response = self
            .client
            .post(endpoint)
            .json(&CreateRequest { url: original_url })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = success_body(response).await?;

        let id = parse_create_response(&body)?;
        let short_url = self.config.short_url(&id);
        debug!(id = %id, short_url = %short_url, "link service minted short link");

        Ok(MintedLink {
            id,
            original_url: original_url.to_string(),
            short_url,
        })
    }

    async fn remove(&self, id: &LinkId) -> Result<()> {
        let endpoint = self.config.delete_url(id);
        trace!(endpoint = %endpoint, id = %id, "requesting link deletion");

        let response = self
            .client
            .delete(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        success_body(response).await?;

        debug!(id = %id, "link service deleted short link");
        Ok(())
    }
}

/// Reads the body of a response, turning a non-2xx status into
/// [`ClientError::Service`].
async fn success_body(response: reqwest::Response) -> Result<Vec<u8>> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        let body: String = String::from_utf8_lossy(&body)
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();
        return Err(ClientError::Service {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body.to_vec())
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    let message = err.to_string();

    if let Some(status) = err.status() {
        return ClientError::Service {
            status: status.as_u16(),
            body: message,
        };
    }

    if err.is_decode() {
        ClientError::Validation(message)
    } else {
        ClientError::Network(message)
    }
}
