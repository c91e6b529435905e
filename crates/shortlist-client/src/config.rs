use reqwest::Url;
use shortlist_core::{ConfigError, LinkId};
use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CREATE_PATH: &str = "create";
pub const DEFAULT_DELETE_PATH: &str = "delete";

/// Settings for talking to the remote shortening service.
///
/// `base_host` is both where requests are sent and the prefix of every
/// short URL handed back to the user.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ClientConfig {
    base_host: Url,
    #[builder(default = DEFAULT_TIMEOUT)]
    timeout: Duration,
    #[builder(default = DEFAULT_CREATE_PATH.to_string(), setter(into))]
    create_path: String,
    #[builder(default = DEFAULT_DELETE_PATH.to_string(), setter(into))]
    delete_path: String,
}

impl ClientConfig {
    /// Builds a config with default paths and timeout from an optional,
    /// externally supplied base host.
    ///
    /// A missing or blank value is reported as
    /// [`ConfigError::MissingBaseHost`] rather than producing requests to an
    /// undefined host.
    pub fn from_base_host(raw: Option<&str>) -> Result<Self, ConfigError> {
        let raw = raw.ok_or(ConfigError::MissingBaseHost)?;
        Ok(Self::builder().base_host(parse_base_host(raw)?).build())
    }

    pub fn base_host(&self) -> &Url {
        &self.base_host
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks that the base host can have paths appended to it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_host(&self.base_host)
    }

    /// The endpoint create requests are posted to.
    pub fn create_url(&self) -> Url {
        self.join(segments(&self.create_path))
    }

    /// The endpoint a delete request for `id` is sent to.
    pub fn delete_url(&self, id: &LinkId) -> Url {
        self.join(segments(&self.delete_path).chain(std::iter::once(id.as_str())))
    }

    /// The public short URL for `id`: the base host joined with the id.
    pub fn short_url(&self, id: &LinkId) -> String {
        self.join(std::iter::once(id.as_str())).to_string()
    }

    fn join<'a>(&self, parts: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_host.clone();
        // `validate` guarantees the base host is not cannot-be-a-base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(parts);
        }
        url
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Parses and validates a base host such as `https://s.example`.
pub fn parse_base_host(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::MissingBaseHost);
    }

    let url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidBaseHost(format!("'{raw}': {e}")))?;
    validate_base_host(&url)?;
    Ok(url)
}

fn validate_base_host(url: &Url) -> Result<(), ConfigError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidBaseHost(format!(
            "scheme must be http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::InvalidBaseHost(format!(
            "'{url}' cannot be used as a base url"
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidBaseHost(format!(
            "'{url}' must not carry a query or fragment"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> LinkId {
        LinkId::new(s).unwrap()
    }

    fn config(base: &str) -> ClientConfig {
        ClientConfig::from_base_host(Some(base)).unwrap()
    }

    #[test]
    fn missing_base_host() {
        assert_eq!(
            ClientConfig::from_base_host(None).unwrap_err(),
            ConfigError::MissingBaseHost
        );
        assert_eq!(
            ClientConfig::from_base_host(Some("  ")).unwrap_err(),
            ConfigError::MissingBaseHost
        );
    }

    #[test]
    fn invalid_base_hosts() {
        for raw in [
            "not a url",
            "ftp://s.example",
            "mailto:me@s.example",
            "https://s.example?x=1",
        ] {
            assert!(
                matches!(
                    ClientConfig::from_base_host(Some(raw)),
                    Err(ConfigError::InvalidBaseHost(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn short_url_joins_base_and_id() {
        assert_eq!(
            config("https://s.example").short_url(&id("abc123")),
            "https://s.example/abc123"
        );
        assert_eq!(
            config("https://s.example/").short_url(&id("abc123")),
            "https://s.example/abc123"
        );
        assert_eq!(
            config("http://localhost:8080/api").short_url(&id("abc123")),
            "http://localhost:8080/api/abc123"
        );
    }

    #[test]
    fn endpoints() {
        let config = config("http://localhost:8080");

        assert_eq!(config.create_url().as_str(), "http://localhost:8080/create");
        assert_eq!(
            config.delete_url(&id("abc123")).as_str(),
            "http://localhost:8080/delete/abc123"
        );
    }

    #[test]
    fn ids_are_escaped_as_one_segment() {
        let config = config("https://s.example");

        assert_eq!(
            config.delete_url(&id("a/b")).as_str(),
            "https://s.example/delete/a%2Fb"
        );
    }

    #[test]
    fn custom_paths() {
        let config = ClientConfig::builder()
            .base_host(parse_base_host("https://s.example").unwrap())
            .create_path("/v1/links/")
            .delete_path("v1/links")
            .timeout(Duration::from_secs(3))
            .build();

        assert_eq!(config.create_url().as_str(), "https://s.example/v1/links");
        assert_eq!(
            config.delete_url(&id("x")).as_str(),
            "https://s.example/v1/links/x"
        );
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }
}
