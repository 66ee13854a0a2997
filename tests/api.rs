mod common;

use axum::http::{Method, StatusCode};
use pki_depot::storage::BlobStore;

use common::{EC_CA_KEY, ROOT_CA_KEY, fixture, send, send_json, test_app};

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", Vec::new()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"healthy");
}

#[tokio::test]
async fn test_inspect_certificate() {
    let (app, store) = test_app();
    let (status, json) = send_json(
        &app,
        Method::POST,
        "/api/certificates/inspect",
        fixture("rsa_ca.pem"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["subject"]["rendered"], "C=DE, O=Example PKI, CN=Example Root CA");
    assert_eq!(json["isCa"], true);
    assert_eq!(json["publicKey"]["sizeBits"], 2048);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_inspect_crl() {
    let (app, _) = test_app();
    let (status, json) =
        send_json(&app, Method::POST, "/api/crls/inspect", fixture("rsa_crl_5.der")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["crlNumber"]["decimal"], "5");
    assert_eq!(json["isDelta"], false);
    assert_eq!(json["revokedCount"], 7);
    assert_eq!(json["revokedSample"].as_array().unwrap().len(), 5);
    assert_eq!(json["revokedSample"][0]["reason"], "keyCompromise");
    assert_eq!(json["thisUpdate"], "2024-01-11T00:00:00Z");
}

#[tokio::test]
async fn test_input_errors() {
    let (app, _) = test_app();

    let (status, json) = send_json(
        &app,
        Method::POST,
        "/api/certificates/inspect",
        fixture("rsa_crl_5.der"),
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["error"], "unsupported_object_type");

    let (status, json) = send_json(
        &app,
        Method::POST,
        "/api/crls/inspect",
        vec![0x30, 0x05, 0x02],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "malformed_der");

    let broken_pem = b"-----BEGIN X509 CRL-----\n!!!!\n-----END X509 CRL-----\n".to_vec();
    let (status, json) = send_json(&app, Method::POST, "/api/crls/inspect", broken_pem).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "malformed_pem");
    assert!(!json["message"].as_str().unwrap().is_empty());

    // a certificate PEM has no CRL block
    let (status, json) =
        send_json(&app, Method::POST, "/api/crls/inspect", fixture("rsa_ca.pem")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "malformed_pem");
}

#[tokio::test]
async fn test_register_and_list_certificates() {
    let (app, store) = test_app();

    let (status, json) =
        send_json(&app, Method::POST, "/api/certificates", fixture("rsa_ca.pem")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["key"], ROOT_CA_KEY);
    assert_eq!(json["certificate"]["subject"]["commonName"], "Example Root CA");
    let stored = store.get(ROOT_CA_KEY).await.unwrap().unwrap();
    assert_eq!(stored.bytes, fixture("rsa_ca.der"));

    let (status, _) =
        send_json(&app, Method::POST, "/api/certificates", fixture("ec_ca.der")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send_json(&app, Method::GET, "/api/certificates", Vec::new()).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|summary| summary["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec![EC_CA_KEY, ROOT_CA_KEY]);
    assert_eq!(json[1]["isCa"], true);
    assert_eq!(json[1]["notAfter"], "2033-12-29T00:00:00Z");

    let uri = format!("/api/certificates/{EC_CA_KEY}");
    let (status, json) = send_json(&app, Method::GET, &uri, Vec::new()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["subject"]["commonName"], "Example EC CA");
}

#[tokio::test]
async fn test_publish_workflow() {
    let (app, _) = test_app();

    let (status, json) =
        send_json(&app, Method::POST, "/api/crls", fixture("rsa_crl_3.der")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "issuer_not_found");

    send_json(&app, Method::POST, "/api/certificates", fixture("rsa_ca.der")).await;

    let (status, json) =
        send_json(&app, Method::POST, "/api/crls", fixture("rsa_crl_3.der")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["classification"]["canonicalDerKey"], "full/example-root-ca.crl");
    assert_eq!(json["issuerKey"], ROOT_CA_KEY);
    assert!(json.get("archivedAs").is_none());

    let (status, json) =
        send_json(&app, Method::POST, "/api/crls", fixture("rsa_crl_5.pem")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["archivedAs"], "full/archive/example-root-ca-3.crl");

    let (status, json) =
        send_json(&app, Method::POST, "/api/crls", fixture("rsa_crl_3.der")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "stale_version");

    let (status, json) =
        send_json(&app, Method::POST, "/api/crls", fixture("rogue_crl.der")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "signature_invalid");

    let (status, json) = send_json(
        &app,
        Method::GET,
        "/api/crls/full/example-root-ca.crl",
        Vec::new(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["crlNumber"]["decimal"], "5");

    let (status, json) = send_json(
        &app,
        Method::GET,
        "/api/crls/full/archive/example-root-ca-3.crl",
        Vec::new(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["crlNumber"]["decimal"], "3");
}

#[tokio::test]
async fn test_raw_objects() {
    let (app, _) = test_app();
    send_json(&app, Method::POST, "/api/certificates", fixture("rsa_ca.der")).await;
    send_json(&app, Method::POST, "/api/crls", fixture("rsa_crl_5.der")).await;

    let cases = [
        ("/objects/full/example-root-ca.crl".to_string(), "application/pkix-crl"),
        ("/objects/full/example-root-ca.crl.pem".to_string(), "application/x-pem-file"),
        (format!("/objects/{ROOT_CA_KEY}"), "application/pkix-cert"),
    ];
    for (uri, content_type) in cases {
        let request = axum::http::Request::builder()
            .uri(uri.as_str())
            .body(axum::body::Body::empty())
            .unwrap();
        let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            content_type,
            "{uri}"
        );
    }

    let (status, body) =
        send(&app, Method::GET, "/objects/full/example-root-ca.crl", Vec::new()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, fixture("rsa_crl_5.der"));
}

#[tokio::test]
async fn test_missing_objects() {
    let (app, _) = test_app();

    for uri in [
        "/objects/full/nothing.crl",
        "/api/crls/full/nothing.crl",
        "/api/certificates/ca/nothing.der",
    ] {
        let (status, json) = send_json(&app, Method::GET, uri, Vec::new()).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json["error"], "not_found");
    }
}
