// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client integration tests with wiremock.

use davcheck_webdav::{
    Actor, DavClient, DavConfig, DavPathVersion, Depth, PropName, PropPatchRequest, PropertyQuery,
};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ETAG_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<d:multistatus xmlns:d="DAV:">
  <d:response>
    <d:href>/remote.php/dav/files/alice/file.txt</d:href>
    <d:propstat>
      <d:prop>
        <d:getetag>"8e0bc2"</d:getetag>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

fn client(server: &MockServer) -> DavClient {
    DavClient::new(DavConfig {
        base_url: server.uri(),
        dav_path_version: DavPathVersion::New,
        ..Default::default()
    })
    .expect("Failed to create client")
}

#[tokio::test]
async fn client_propfind_sends_depth_auth_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/remote.php/dav/files/alice/file.txt"))
        .and(header("Content-Type", "application/xml; charset=utf-8"))
        .and(header("Depth", "0"))
        .and(header_exists("Authorization"))
        .and(body_string_contains("<d:getetag/>"))
        .respond_with(ResponseTemplate::new(207).set_body_raw(ETAG_RESPONSE, "application/xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = PropertyQuery::new(Actor::user("alice", "secret"), "/file.txt")
        .properties(vec![PropName::parse("d:getetag").unwrap()]);
    let response = client(&mock_server)
        .propfind(&query)
        .await
        .expect("Failed to propfind");

    assert_eq!(response.status.as_u16(), 207);
    let multistatus = response.multistatus().unwrap();
    assert_eq!(multistatus.responses.len(), 1);
    assert_eq!(multistatus.first_etag().unwrap().as_str(), "\"8e0bc2\"");
}

#[tokio::test]
async fn client_propfind_depth_one_without_properties_asks_allprop() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/remote.php/dav/files/alice/folder"))
        .and(header("Depth", "1"))
        .and(body_string_contains("<d:allprop/>"))
        .respond_with(ResponseTemplate::new(207).set_body_raw(ETAG_RESPONSE, "application/xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = PropertyQuery::new(Actor::user("alice", "secret"), "folder").depth(Depth::One);
    let response = client(&mock_server).propfind(&query).await.unwrap();
    assert_eq!(response.status.as_u16(), 207);
}

#[tokio::test]
async fn client_propfind_does_not_interpret_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            r#"<d:error xmlns:d="DAV:"/>"#,
            "application/xml",
        ))
        .mount(&mock_server)
        .await;

    let query = PropertyQuery::new(Actor::user("alice", "secret"), "missing.txt");
    let response = client(&mock_server).propfind(&query).await.unwrap();

    assert_eq!(response.status.as_u16(), 404);
    assert!(response.multistatus().is_err());
}

#[tokio::test]
async fn client_propfind_public_link_has_no_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/remote.php/dav/public-files/AbCdEf/sub/file.txt"))
        .respond_with(ResponseTemplate::new(207).set_body_raw(ETAG_RESPONSE, "application/xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = PropertyQuery::new(Actor::public("AbCdEf"), "/sub/file.txt");
    let response = client(&mock_server).propfind(&query).await.unwrap();
    assert_eq!(response.status.as_u16(), 207);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("Authorization").is_none());
}

#[tokio::test]
async fn client_proppatch_sends_propertyupdate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPPATCH"))
        .and(path("/remote.php/dav/files/alice/file.txt"))
        .and(body_string_contains("<oc:favorite>1</oc:favorite>"))
        .respond_with(ResponseTemplate::new(207).set_body_raw(
            r#"<d:multistatus xmlns:d="DAV:"/>"#,
            "application/xml",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut request = PropPatchRequest::new();
    request.set(PropName::parse("oc:favorite").unwrap(), "1");
    let response = client(&mock_server)
        .proppatch(&Actor::user("alice", "secret"), "file.txt", None, &request)
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 207);
}
