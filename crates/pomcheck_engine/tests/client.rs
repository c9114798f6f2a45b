use std::time::Duration;

use pomcheck_engine::{
    endpoint_url, ApiCall, ClientSettings, FailureKind, LicenseClient, ReqwestLicenseClient,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_endpoint: format!("{}/purplecat/api/", server.uri()),
        ..ClientSettings::default()
    }
}

#[test]
fn lookup_url_encodes_target() {
    let settings = ClientSettings {
        base_endpoint: "https://licenses.example.com/purplecat/api/".to_string(),
        ..ClientSettings::default()
    };
    let url = endpoint_url(
        &settings,
        &ApiCall::LookupByUrl {
            target: "http://x/y.pom".to_string(),
        },
    )
    .unwrap();

    assert_eq!(
        url.as_str(),
        "https://licenses.example.com/purplecat/api/licenses?target=http%3A%2F%2Fx%2Fy.pom"
    );
}

#[test]
fn base_without_trailing_slash_is_accepted() {
    let settings = ClientSettings {
        base_endpoint: "https://licenses.example.com/api".to_string(),
        depth: Some(3),
        ..ClientSettings::default()
    };

    let post = endpoint_url(
        &settings,
        &ApiCall::SubmitPom {
            content: String::new(),
        },
    )
    .unwrap();
    assert_eq!(post.as_str(), "https://licenses.example.com/api/licenses?depth=3");

    let caches = endpoint_url(&settings, &ApiCall::ClearCaches).unwrap();
    assert_eq!(caches.as_str(), "https://licenses.example.com/api/caches");
}

#[test]
fn invalid_base_is_reported() {
    let settings = ClientSettings {
        base_endpoint: "not an endpoint".to_string(),
        ..ClientSettings::default()
    };

    let err = endpoint_url(&settings, &ApiCall::DumpCaches).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[tokio::test]
async fn get_by_url_returns_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/purplecat/api/licenses"))
        .and(query_param("target", "http://x/y.pom"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"license":"MIT"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestLicenseClient::new(settings_for(&server));
    let response = client
        .call(&ApiCall::LookupByUrl {
            target: "http://x/y.pom".to_string(),
        })
        .await
        .expect("lookup ok");

    assert_eq!(response.status, 200);
    assert_eq!(response.json, json!({"license": "MIT"}));
}

#[tokio::test]
async fn post_sends_xml_body() {
    let server = MockServer::start().await;
    let pom = "<project><artifactId>demo</artifactId></project>";
    Mock::given(method("POST"))
        .and(path("/purplecat/api/licenses"))
        .and(header("content-type", "application/xml"))
        .and(body_string(pom))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"name":"demo","licenses":[]}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestLicenseClient::new(settings_for(&server));
    let response = client
        .call(&ApiCall::SubmitPom {
            content: pom.to_string(),
        })
        .await
        .expect("post ok");

    assert_eq!(response.json, json!({"name": "demo", "licenses": []}));
}

#[tokio::test]
async fn non_200_carries_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/purplecat/api/licenses"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = ReqwestLicenseClient::new(settings_for(&server));
    let err = client
        .call(&ApiCall::LookupByUrl {
            target: "http://x/missing.pom".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, "not found");
    assert_eq!(err.user_message(), "not found");
}

#[tokio::test]
async fn malformed_json_on_200_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/purplecat/api/caches"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{oops"))
        .mount(&server)
        .await;

    let client = ReqwestLicenseClient::new(settings_for(&server));
    let err = client.call(&ApiCall::DumpCaches).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedJson);
    assert!(err.user_message().starts_with("malformed json response"));
}

#[tokio::test]
async fn clear_caches_uses_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/purplecat/api/caches"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"message":"ok"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestLicenseClient::new(settings_for(&server));
    let response = client.call(&ApiCall::ClearCaches).await.expect("delete ok");

    assert_eq!(response.json, json!({"message": "ok"}));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/purplecat/api/licenses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1,2,3,4,5,6]"))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_bytes: 4,
        ..settings_for(&server)
    };
    let client = ReqwestLicenseClient::new(settings);
    let err = client
        .call(&ApiCall::LookupByUrl {
            target: "http://x/y.pom".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 4,
            actual: Some(13)
        }
    );
}

#[tokio::test]
async fn request_timeout_is_honoured_when_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/purplecat/api/caches"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..settings_for(&server)
    };
    let client = ReqwestLicenseClient::new(settings);
    let err = client.call(&ApiCall::DumpCaches).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}
