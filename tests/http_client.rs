mod common;

use axum::http::StatusCode;
use common::{spawn_backend, write_file};
use quizgen::error::{ApiError, AppError};
use quizgen::models::{Difficulty, GenerationSettings, UploadedFile};
use quizgen::{Config, HttpQuizClient, QuizBackend};
use serde_json::json;

fn client_for(api_base_url: String) -> HttpQuizClient {
    let config = Config {
        api_base_url,
        ..Config::default()
    };
    HttpQuizClient::new(&config).expect("client")
}

#[tokio::test]
async fn upload_sends_single_file_field() {
    let backend = spawn_backend(StatusCode::OK, StatusCode::OK, "[]").await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "lesson.pdf", 4096);
    let file = UploadedFile::from_path(&path).await.unwrap();

    client_for(backend.api_base_url()).upload(&file).await.unwrap();

    let uploads = backend.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].len(), 1);
    let part = &uploads[0][0];
    assert_eq!(part.name, "file");
    assert_eq!(part.file_name.as_deref(), Some("lesson.pdf"));
    assert_eq!(part.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(part.len, 4096);
}

#[tokio::test]
async fn upload_non_success_status_is_an_error() {
    let backend = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR, StatusCode::OK, "[]").await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "notes.txt", 10);
    let file = UploadedFile::from_path(&path).await.unwrap();

    let err = client_for(backend.api_base_url()).upload(&file).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Api(ApiError::BadStatus { status, .. }) if status.as_u16() == 500
    ));
    assert_eq!(backend.uploads().len(), 1);
}

#[tokio::test]
async fn generate_posts_settings_as_json() {
    let body = json!({"questions": [{"question": "Q", "type": "TRUE_FALSE"}]}).to_string();
    let backend = spawn_backend(StatusCode::OK, StatusCode::OK, body).await;

    let settings = GenerationSettings {
        single_choice: 3,
        multiple_choice: 1,
        true_false: 0,
        difficulty: Difficulty::Easy,
    };
    let value = client_for(backend.api_base_url())
        .generate(&settings.to_request())
        .await
        .unwrap();

    assert_eq!(value["questions"][0]["question"], "Q");
    assert_eq!(
        backend.generates(),
        vec![json!({
            "totalQuestions": 4,
            "singleChoice": 3,
            "multipleChoice": 1,
            "trueFalse": 0,
            "level": "EASY"
        })]
    );
}

#[tokio::test]
async fn generate_rejects_non_json_body() {
    let backend = spawn_backend(StatusCode::OK, StatusCode::OK, "PDF uploaded & replaced").await;
    let err = client_for(backend.api_base_url())
        .generate(&GenerationSettings::default().to_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::InvalidJson { .. })));
}

#[tokio::test]
async fn generate_server_error_is_reported() {
    let backend = spawn_backend(StatusCode::OK, StatusCode::BAD_GATEWAY, "{}").await;
    let err = client_for(backend.api_base_url())
        .generate(&GenerationSettings::default().to_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::BadStatus { .. })));
    assert_eq!(err.user_message(), "请求失败，请稍后重试");
}

#[tokio::test]
async fn unreachable_backend_is_a_request_failure() {
    let err = client_for("http://127.0.0.1:1/api".to_string())
        .generate(&GenerationSettings::default().to_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::RequestFailed { .. })));
}
