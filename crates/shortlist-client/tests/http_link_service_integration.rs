use shortlist_client::{ClientConfig, HttpLinkService};
use shortlist_core::{ClientError, LinkId, LinkService};
use shortlist_test_infra::{MockConfig, MockShortener, RecordedRequest};
use std::time::Duration;

struct Fixture {
    mock: MockShortener,
    service: HttpLinkService,
}

impl Fixture {
    async fn start() -> Self {
        let mock = MockShortener::start(MockConfig::builder().id_prefix("abc").build())
            .await
            .expect("start mock shortener");
        let config =
            ClientConfig::from_base_host(Some(mock.base_url().as_str())).expect("config");
        let service = HttpLinkService::new(config).expect("http client");

        Self { mock, service }
    }
}

fn id(value: &str) -> LinkId {
    LinkId::new(value).unwrap()
}

#[tokio::test]
async fn create_maps_minted_id_to_short_link() {
    let fixture = Fixture::start().await;

    let minted = fixture
        .service
        .create("https://very-long-example.com/path")
        .await
        .unwrap();

    assert_eq!(minted.id.as_str(), "abc0");
    assert_eq!(minted.original_url, "https://very-long-example.com/path");
    assert_eq!(
        minted.short_url,
        format!("{}/abc0", fixture.mock.base_url())
    );
    assert_eq!(
        fixture.mock.requests(),
        vec![RecordedRequest::Create {
            url: "https://very-long-example.com/path".to_string()
        }]
    );
}

#[tokio::test]
async fn create_rejects_empty_url_without_calling_service() {
    let fixture = Fixture::start().await;

    let err = fixture.service.create("   ").await.unwrap_err();

    assert_eq!(err, ClientError::EmptyUrl);
    assert!(fixture.mock.requests().is_empty());
}

#[tokio::test]
async fn create_rejects_missing_id() {
    let fixture = Fixture::start().await;
    fixture
        .mock
        .respond_to_create_with(200, r#"{"shortCode":"abc"}"#);

    let err = fixture.service.create("https://a.com").await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)), "{err:?}");
}

#[tokio::test]
async fn create_rejects_numeric_id() {
    let fixture = Fixture::start().await;
    fixture.mock.respond_to_create_with(200, r#"{"id":123}"#);

    let err = fixture.service.create("https://a.com").await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)), "{err:?}");
}

#[tokio::test]
async fn create_rejects_non_json_body() {
    let fixture = Fixture::start().await;
    fixture.mock.respond_to_create_with(200, "<html>ok</html>");

    let err = fixture.service.create("https://a.com").await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)), "{err:?}");
}

#[tokio::test]
async fn create_surfaces_service_status() {
    let fixture = Fixture::start().await;
    fixture
        .mock
        .respond_to_create_with(503, r#"{"error":"maintenance"}"#);

    let err = fixture.service.create("https://a.com").await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Service {
            status: 503,
            body: r#"{"error":"maintenance"}"#.to_string()
        }
    );
}

#[tokio::test]
async fn remove_deletes_on_the_service() {
    let fixture = Fixture::start().await;
    let minted = fixture.service.create("https://a.com").await.unwrap();
    assert!(fixture.mock.contains(minted.id.as_str()));

    fixture.service.remove(&minted.id).await.unwrap();

    assert!(!fixture.mock.contains(minted.id.as_str()));
}

#[tokio::test]
async fn remove_unknown_id_is_a_service_error() {
    let fixture = Fixture::start().await;

    let err = fixture.service.remove(&id("missing")).await.unwrap_err();

    assert!(matches!(err, ClientError::Service { status: 404, .. }));
    assert_eq!(
        fixture.mock.requests(),
        vec![RecordedRequest::Delete {
            id: "missing".to_string()
        }]
    );
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Bind then drop a listener to find a port nothing is listening on.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let config = ClientConfig::builder()
        .base_host(format!("http://{addr}").parse().unwrap())
        .timeout(Duration::from_secs(2))
        .build();
    let service = HttpLinkService::new(config).unwrap();

    let create = service.create("https://a.com").await.unwrap_err();
    let remove = service.remove(&id("x")).await.unwrap_err();

    assert!(create.is_network(), "{create:?}");
    assert!(remove.is_network(), "{remove:?}");
}
