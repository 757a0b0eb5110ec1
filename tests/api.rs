//! End-to-end request handling against an in-memory store

use bson::{doc, DateTime};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

use quantum_learning_api::db::schemas::{ProgressDoc, USER_PROGRESS_COLLECTION};
use quantum_learning_api::db::MemoryStore;
use quantum_learning_api::progress::DEFAULT_USER_ID;
use quantum_learning_api::server::{handle_request, AppState};

fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());

    store.insert("qml_introduction", doc! { "title": "Quantum Machine Learning", "summary": "Learning with qubits" });
    store.insert("qml_workflow", doc! { "steps": ["encode", "train", "measure"] });
    store.insert("qkd_introduction", doc! { "title": "Quantum Key Distribution" });

    store.insert("qml_algorithms", doc! { "slug": "vqc", "domain_slug": "variational-circuits", "name": "Variational Quantum Classifier" });
    store.insert("qml_algorithms", doc! { "slug": "qaoa", "domain_slug": "variational-circuits", "name": "QAOA" });
    store.insert("qml_algorithms", doc! { "slug": "qsvm", "domain_slug": "quantum-kernels", "name": "Quantum SVM" });

    store.insert("qkd_protocols", doc! { "slug": "bb84", "domain_slug": "prepare-and-measure", "year": 1984 });
    store.insert("qkd_protocols", doc! { "slug": "e91", "domain_slug": "entanglement-based", "year": 1991 });
    store.insert("qkd_protocols", doc! { "slug": "b92", "domain_slug": "prepare-and-measure", "year": 1992 });

    store
}

fn app(store: Arc<MemoryStore>) -> Arc<AppState> {
    Arc::new(AppState::new("quantum_learning", store))
}

async fn send(state: &Arc<AppState>, method: Method, path: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap();

    let response = handle_request(Arc::clone(state), None, req).await;
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(state: &Arc<AppState>, path: &str) -> (StatusCode, Value) {
    send(state, Method::GET, path, "").await
}

async fn post_progress(state: &Arc<AppState>, body: Value) -> (StatusCode, Value) {
    send(state, Method::POST, "/api/me/progress", &body.to_string()).await
}

fn progress_records(store: &MemoryStore) -> Vec<ProgressDoc> {
    store
        .documents(USER_PROGRESS_COLLECTION)
        .into_iter()
        .map(|d| bson::from_document(d).unwrap())
        .collect()
}

#[tokio::test]
async fn root_reports_status() {
    let state = app(seeded_store());
    let (status, body) = get(&state, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "running", "database": "quantum_learning", "modules": ["QML", "QKD"] })
    );
}

#[tokio::test]
async fn root_does_not_need_storage() {
    let store = seeded_store();
    store.set_offline(true);
    let state = app(store);

    let (status, _) = get(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], true);
}

#[tokio::test]
async fn introductions_and_workflows() {
    let state = app(seeded_store());

    let (status, body) = get(&state, "/api/qml/introduction").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "title": "Quantum Machine Learning", "summary": "Learning with qubits" }));

    let (status, body) = get(&state, "/api/qml/workflow").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["steps"], json!(["encode", "train", "measure"]));

    let (status, body) = get(&state, "/api/qkd/introduction").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Quantum Key Distribution");

    let (status, body) = get(&state, "/api/qkd/workflow").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "QKD workflow not found");
}

#[tokio::test]
async fn domain_listing_is_unique_sorted_and_titled() {
    let state = app(seeded_store());

    let (status, body) = get(&state, "/api/qml/domains").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "slug": "quantum-kernels", "title": "Quantum Kernels" },
            { "slug": "variational-circuits", "title": "Variational Circuits" },
        ])
    );

    let (_, body) = get(&state, "/api/qkd/domains").await;
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["entanglement-based", "prepare-and-measure"]);
}

#[tokio::test]
async fn domain_listing_empty_collection() {
    let state = app(Arc::new(MemoryStore::new()));
    let (status, body) = get(&state, "/api/qkd/domains").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn domain_detail_contains_only_matching_records() {
    let state = app(seeded_store());

    let (status, body) = get(&state, "/api/qkd/domains/prepare-and-measure").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["domain"],
        json!({ "slug": "prepare-and-measure", "title": "Prepare And Measure" })
    );
    let protocols = body["protocols"].as_array().unwrap();
    assert_eq!(protocols.len(), 2);
    assert!(protocols
        .iter()
        .all(|p| p["domain_slug"] == "prepare-and-measure" && p.get("_id").is_none()));

    let (status, body) = get(&state, "/api/qml/domains/variational-circuits").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithms"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn domain_detail_absent_slug_is_not_found() {
    let state = app(seeded_store());

    let (status, body) = get(&state, "/api/qml/domains/prepare-and-measure").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No algorithms found");

    let (status, body) = get(&state, "/api/qkd/domains/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No protocols found");
}

#[tokio::test]
async fn record_lookup() {
    let state = app(seeded_store());

    let (status, body) = get(&state, "/api/qml/algorithms/qsvm").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "slug": "qsvm", "domain_slug": "quantum-kernels", "name": "Quantum SVM" })
    );

    let (status, body) = get(&state, "/api/qkd/protocols/e91").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 1991);
    assert!(body.get("_id").is_none());

    let (status, body) = get(&state, "/api/qml/algorithms/shor").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Algorithm not found");

    let (status, body) = get(&state, "/api/qkd/protocols/vqc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Protocol not found");
}

#[tokio::test]
async fn progress_upsert_keeps_latest_state() {
    let store = seeded_store();
    let state = app(Arc::clone(&store));

    let (status, body) = post_progress(
        &state,
        json!({ "domain": "QKD", "slug": "bb84", "readCompleted": true, "quizCompleted": false, "quizScore": 40 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));

    let second_issued = DateTime::now();
    let (status, _) = post_progress(
        &state,
        json!({ "domain": "QKD", "slug": "bb84", "readCompleted": true, "quizCompleted": true, "quizScore": 92.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let records = progress_records(&store);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.user_id, DEFAULT_USER_ID);
    assert_eq!(record.slug, "bb84");
    assert_eq!(record.domain, "QKD");
    assert!(record.quiz_completed);
    assert_eq!(record.quiz_score, 92.5);
    assert!(record.updated_at >= second_issued);
}

#[tokio::test]
async fn progress_separate_slugs_are_separate_records() {
    let store = seeded_store();
    let state = app(Arc::clone(&store));

    for slug in ["vqc", "qsvm"] {
        let (status, _) = post_progress(
            &state,
            json!({ "domain": "QML", "slug": slug, "readCompleted": true, "quizCompleted": false }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(progress_records(&store).len(), 2);
}

#[tokio::test]
async fn progress_score_defaults_to_zero() {
    let store = seeded_store();
    let state = app(Arc::clone(&store));

    let (status, _) = post_progress(
        &state,
        json!({ "domain": "QML", "slug": "vqc", "readCompleted": false, "quizCompleted": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress_records(&store)[0].quiz_score, 0.0);
}

#[tokio::test]
async fn progress_rejects_string_boolean_without_writing() {
    let store = seeded_store();
    let state = app(Arc::clone(&store));

    let (status, body) = post_progress(
        &state,
        json!({ "domain": "QML", "slug": "vqc", "readCompleted": "true", "quizCompleted": false }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "invalid_input");
    assert!(store.documents(USER_PROGRESS_COLLECTION).is_empty());
}

#[tokio::test]
async fn progress_rejects_malformed_bodies() {
    let state = app(seeded_store());

    let (status, _) = send(&state, Method::POST, "/api/me/progress", "{").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post_progress(
        &state,
        json!({ "domain": "", "slug": "vqc", "readCompleted": true, "quizCompleted": true }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn storage_failure_is_generic_server_error() {
    let store = seeded_store();
    store.set_offline(true);
    let state = app(store);

    let (status, body) = get(&state, "/api/qml/algorithms/vqc").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");

    let (status, _) = post_progress(
        &state,
        json!({ "domain": "QML", "slug": "vqc", "readCompleted": true, "quizCompleted": true }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_paths_and_methods() {
    let state = app(seeded_store());

    let (status, _) = get(&state, "/api/qml/protocols/bb84").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&state, "/api/me/progress").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["code"], "method_not_allowed");

    let (status, body) = send(&state, Method::OPTIONS, "/api/me/progress", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}
