// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Wire-level tests for the remote client against a mock HTTP server.

use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use scholsync::{
    config::{ServiceSettings, Settings, StorageSettings},
    record::ProjectKind,
    remote::{RemoteClient, RemoteError, UploadField},
};
use simple_test_case::test_case;

fn client_for(url: String, max_upload_mb: u64) -> RemoteClient {
    let settings = Settings {
        service: ServiceSettings { url, max_upload_mb },
        storage: StorageSettings::default(),
    };

    RemoteClient::new(&settings).unwrap()
}

#[test_case(400; "bad request")]
#[test_case(401; "unauthorized")]
#[test_case(403; "forbidden")]
#[test_case(404; "not found")]
#[test]
fn client_errors_classify_as_api_failures(status: usize) {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/api/ListARP").with_status(status).create();
    let client = client_for(server.url(), 30);

    let result = client.list_projects("tok");
    assert!(matches!(result, Err(RemoteError::Api { .. })));
}

#[test_case(500; "internal server error")]
#[test_case(502; "bad gateway")]
#[test_case(503; "service unavailable")]
#[test_case(504; "gateway timeout")]
#[test]
fn server_errors_classify_as_server_faults(status: usize) {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/api/ListARP").with_status(status).create();
    let client = client_for(server.url(), 30);

    let result = client.list_projects("tok");
    assert!(matches!(result, Err(RemoteError::ServerFault { .. })));
    assert!(result.unwrap_err().is_server_fault());
}

#[test]
fn transport_failures_classify_as_offline() {
    // Port 9 is the discard service; nothing answers there.
    let client = client_for("http://127.0.0.1:9".to_string(), 30);

    let result = client.list_projects("tok");
    assert!(matches!(result, Err(RemoteError::Offline { .. })));
}

#[test]
fn validate_token_accepts_on_success() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/ListARP")
        .match_header("authorization", "Token tok-123")
        .with_status(200)
        .with_body("[]")
        .create();
    let client = client_for(server.url(), 30);

    assert_eq!(client.validate_token("tok-123").unwrap(), true);
    mock.assert();
}

#[test]
fn validate_token_treats_unauthorized_as_invalid_not_an_error() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/api/ListARP").with_status(401).create();
    let client = client_for(server.url(), 30);

    assert_eq!(client.validate_token("expired").unwrap(), false);
}

#[test]
fn validate_token_still_reports_other_failures() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/api/ListARP").with_status(404).create();
    let client = client_for(server.url(), 30);
    assert!(matches!(client.validate_token("tok"), Err(RemoteError::Api { .. })));

    let mut server = Server::new();
    let _mock = server.mock("GET", "/api/ListARP").with_status(500).create();
    let client = client_for(server.url(), 30);
    assert!(matches!(
        client.validate_token("tok"),
        Err(RemoteError::ServerFault { .. })
    ));
}

#[test]
fn list_projects_parses_records() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/ListARP")
        .match_header("authorization", "Token tok-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{
                "project_title": "My Poster",
                "project_type": "poster",
                "disc_url": "",
                "QRString": "xyz123"
            }]"#,
        )
        .create();
    let client = client_for(server.url(), 30);

    let projects = client.list_projects("tok-123").unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, "My Poster");
    assert_eq!(projects[0].qr_string, "xyz123");
    mock.assert();
}

#[test]
fn malformed_listing_classifies_as_decode_failure() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/api/ListARP")
        .with_status(200)
        .with_body("this is not json")
        .create();
    let client = client_for(server.url(), 30);

    let result = client.list_projects("tok");
    assert!(matches!(result, Err(RemoteError::Decode { .. })));
}

#[test]
fn create_project_spells_out_the_json_content_type() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/CreateARP")
        .match_header("authorization", "Token tok-123")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "project_title": "My Poster",
            "project_type": "poster",
            "disc_url": "https://doi.org/10.0/xyz",
        })))
        .with_status(201)
        .with_body(
            r#"{
                "project_title": "My Poster",
                "project_type": "poster",
                "disc_url": "https://doi.org/10.0/xyz",
                "QRString": "xyz123"
            }"#,
        )
        .create();
    let client = client_for(server.url(), 30);

    let record = client
        .create_project("tok-123", "My Poster", ProjectKind::Poster, "https://doi.org/10.0/xyz")
        .unwrap();
    assert_eq!(record.qr_string, "xyz123");
    mock.assert();
}

#[test]
fn create_augmentation_posts_title_and_type() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/CreateAug/xyz123")
        .match_body(Matcher::Json(serde_json::json!({
            "augmentation_title": "Figure1",
            "augmentation_type": "model",
        })))
        .with_status(201)
        .with_body(
            r#"{
                "augmentation_title": "Figure1",
                "augmentation_type": "model",
                "internal_augid": "a1"
            }"#,
        )
        .create();
    let client = client_for(server.url(), 30);

    let record = client
        .create_augmentation("tok-123", "xyz123", "Figure1", "model")
        .unwrap();
    assert_eq!(record.internal_id, "a1");
    mock.assert();
}

#[test]
fn edit_augmentation_uploads_under_the_selected_field_name() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let model = dir.path().join("figure1.glb");
    std::fs::write(&model, b"model-bytes")?;

    let mut server = Server::new();
    let mock = server
        .mock("PATCH", "/api/EditAug/xyz123/a1")
        .match_header("authorization", "Token tok-123")
        .match_body(Matcher::Regex("name=\"augmented_file\"".to_string()))
        .with_status(200)
        .with_body(
            r#"{
                "augmentation_title": "Figure1",
                "augmentation_type": "model",
                "internal_augid": "a1",
                "augmented_file": "https://cloud.example.com/figure1.glb"
            }"#,
        )
        .create();
    let client = client_for(server.url(), 30);

    let record = client
        .edit_augmentation("tok-123", "xyz123", "a1", &model, UploadField::ModelFile)
        .unwrap();
    assert_eq!(
        record.model_url(),
        Some("https://cloud.example.com/figure1.glb")
    );
    mock.assert();

    Ok(())
}

#[test]
fn edit_augmentation_refuses_oversized_files_before_any_network_call() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let model = dir.path().join("huge.glb");
    std::fs::write(&model, vec![0u8; 1024 * 1024])?;

    let mut server = Server::new();
    let mock = server.mock("PATCH", Matcher::Any).expect(0).create();
    let client = client_for(server.url(), 1);

    let result = client.edit_augmentation("tok", "xyz123", "a1", &model, UploadField::ModelFile);
    assert!(matches!(result, Err(RemoteError::OversizeUpload { .. })));
    mock.assert();

    Ok(())
}

#[test]
fn fetch_qr_parses_both_image_urls() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/api/GetQR/xyz123")
        .with_status(200)
        .with_body(
            r#"{
                "QR_Image1": "https://cloud.example.com/pub.png",
                "AdminQRImage": "https://cloud.example.com/admin.png"
            }"#,
        )
        .create();
    let client = client_for(server.url(), 30);

    let record = client.fetch_qr("tok-123", "xyz123").unwrap();
    assert_eq!(record.public_url, "https://cloud.example.com/pub.png");
    assert_eq!(record.admin_url, "https://cloud.example.com/admin.png");
}

#[test]
fn download_returns_body_and_sanitized_filename() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/media/xyz123/figure1.png")
        .with_status(200)
        .with_body(b"image-bytes".to_vec())
        .create();
    let client = client_for(server.url(), 30);

    let url = format!("{}/media/xyz123/figure1.png", server.url());
    let download = client.download(&url).unwrap();
    assert_eq!(download.filename, "figure1.png");
    assert_eq!(download.body, b"image-bytes".to_vec());
}

#[test]
fn download_reports_rejections_without_inventing_bytes() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/media/gone.png").with_status(404).create();
    let client = client_for(server.url(), 30);

    let url = format!("{}/media/gone.png", server.url());
    assert!(matches!(client.download(&url), Err(RemoteError::Api { .. })));
}
