// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Etag snapshots against a mock server.

mod common;

use davcheck_core::{Error, EtagExpectation, Failure};
use wiremock::MockServer;

use common::{etag_entry, mock_propfind, mock_propfind_once, multistatus, scenario, table};

const FOLDER: &str = "/remote.php/dav/files/alice/folder";
const FOLDER2: &str = "/remote.php/dav/files/alice/folder2";

#[tokio::test]
async fn etag_store_then_requery_is_unchanged() {
    let server = MockServer::start().await;
    mock_propfind(
        &server,
        FOLDER,
        multistatus(&[etag_entry(&format!("{FOLDER}/"), "\"aaa\"")]),
    )
    .await;

    let mut scenario = scenario(&server);
    let stored = scenario
        .store_etag("alice", "/folder", None, None)
        .await
        .unwrap();
    assert_eq!(stored.as_str(), "\"aaa\"");

    scenario
        .etag_should_have_changed("/folder", "alice", EtagExpectation::Unchanged)
        .await
        .unwrap();

    let err = scenario
        .etag_should_have_changed("/folder", "alice", EtagExpectation::Changed)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Failure(Failure::EtagUnchanged { .. })));
}

#[tokio::test]
async fn etag_changes_after_mutation() {
    let server = MockServer::start().await;
    mock_propfind_once(
        &server,
        FOLDER,
        "1",
        multistatus(&[etag_entry(&format!("{FOLDER}/"), "\"before\"")]),
    )
    .await;
    mock_propfind(
        &server,
        FOLDER,
        multistatus(&[etag_entry(&format!("{FOLDER}/"), "\"after\"")]),
    )
    .await;

    let mut scenario = scenario(&server);
    scenario.has_stored_etag("alice", "/folder", None).await.unwrap();

    scenario
        .etag_should_have_changed("/folder", "alice", EtagExpectation::Changed)
        .await
        .unwrap();

    let err = scenario
        .etag_should_have_changed("/folder", "alice", EtagExpectation::Unchanged)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The etag of element '/folder' of user 'alice' was not expected to change. \
         The stored etag was '\"before\"' but got '\"after\"' from the response"
    );
}

#[tokio::test]
async fn etag_of_renamed_folder_is_compared_with_stored_path() {
    let server = MockServer::start().await;
    mock_propfind(
        &server,
        FOLDER,
        multistatus(&[etag_entry(&format!("{FOLDER}/"), "\"old\"")]),
    )
    .await;
    mock_propfind(
        &server,
        FOLDER2,
        multistatus(&[etag_entry(&format!("{FOLDER2}/"), "\"new\"")]),
    )
    .await;

    let mut scenario = scenario(&server);
    scenario
        .has_stored_etag("alice", "/folder", Some("/folder2"))
        .await
        .unwrap();
    assert_eq!(
        scenario.etags().get("alice", "/folder2").unwrap().as_str(),
        "\"old\""
    );

    scenario
        .etag_should_have_changed("/folder2", "alice", EtagExpectation::Changed)
        .await
        .unwrap();
}

#[tokio::test]
async fn etag_missing_snapshot_is_a_distinct_failure() {
    let server = MockServer::start().await;
    mock_propfind(
        &server,
        FOLDER,
        multistatus(&[etag_entry(&format!("{FOLDER}/"), "\"aaa\"")]),
    )
    .await;

    let mut scenario = scenario(&server);
    let err = scenario
        .etag_should_have_changed("/folder", "alice", EtagExpectation::Unchanged)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Failure(Failure::NoStoredEtags { .. })));

    scenario
        .store_etag("alice", "/folder", Some("/elsewhere"), None)
        .await
        .unwrap();
    let err = scenario
        .etag_should_have_changed("/folder", "alice", EtagExpectation::Unchanged)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Failure(Failure::NoStoredEtag { .. })));
}

#[tokio::test]
async fn etag_batch_check_reports_all_violations() {
    let server = MockServer::start().await;
    let file = "/remote.php/dav/files/brian/file.txt";
    for (url, before, after) in [(FOLDER, "\"a1\"", "\"a2\""), (file, "\"b1\"", "\"b2\"")] {
        mock_propfind_once(&server, url, "1", multistatus(&[etag_entry(url, before)])).await;
        mock_propfind(&server, url, multistatus(&[etag_entry(url, after)])).await;
    }

    let mut scenario = scenario(&server);
    scenario.has_stored_etag("alice", "/folder", None).await.unwrap();
    scenario.has_stored_etag("Brian", "/file.txt", None).await.unwrap();

    let rows = table(
        "
        | user  | path      |
        | alice | /folder   |
        | brian | /file.txt |
        ",
    );
    scenario
        .etags_should_have_changed(&rows, EtagExpectation::Changed)
        .await
        .unwrap();

    let err = scenario
        .etags_should_have_changed(&rows, EtagExpectation::Unchanged)
        .await
        .unwrap_err();
    let Error::Failure(Failure::EtagViolations(violations)) = err else {
        panic!("expected aggregated violations");
    };
    assert_eq!(violations, vec![
        "The etag '\"a1\"' of element '/folder' of user 'alice' changed to '\"a2\"'.".to_string(),
        "The etag '\"b1\"' of element '/file.txt' of user 'brian' changed to '\"b2\"'.".to_string(),
    ]);
}

#[tokio::test]
async fn etag_batch_check_rejects_bad_tables() {
    let server = MockServer::start().await;
    let scenario = scenario(&server);
    let rows = table("| user | path | extra |\n| alice | /a | x |");
    let err = scenario
        .etags_should_have_changed(&rows, EtagExpectation::Changed)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Failure(Failure::InvalidTable(_))));
}
