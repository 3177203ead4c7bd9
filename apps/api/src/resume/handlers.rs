//! Axum route handler for the resume upload endpoint.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::Document;
use crate::resume::pipeline::{process_document, ProcessedResume};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /process_resume
///
/// Multipart upload with the PDF in field `file`.
/// Returns the extracted text and the structured record.
pub async fn handle_process_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessedResume>, AppError> {
    let request_id = Uuid::new_v4();

    async move {
        let document = read_upload(&mut multipart).await?;
        info!(
            "Received {} ({} bytes)",
            document.file_name.as_deref().unwrap_or("<unnamed>"),
            document.byte_len()
        );

        let processed =
            process_document(&document, state.llm.as_ref(), state.config.max_input_chars)
                .await?;

        info!("Resume processed");
        Ok::<_, AppError>(Json(processed))
    }
    .instrument(info_span!("process_resume", %request_id))
    .await
}

/// Reads the `file` field fully into memory. Other fields are skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<Document, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read uploaded file", e))?;
        return Ok(Document::new(file_name, bytes));
    }

    Err(AppError::UnprocessableEntity(format!(
        "Missing '{FILE_FIELD}' field in multipart upload"
    )))
}

/// Keeps the status axum attaches to multipart failures: a body over the
/// configured limit is a 413, anything else is a malformed request.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::UploadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("{context}: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::test_pdf;
    use crate::llm_client::testing::StubModel;
    use crate::resume::schema::fixtures::full_record;
    use crate::resume::schema::REQUIRED_FIELDS;
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "resume-api-test-boundary";
    const CV_TEXT: &str = "John Doe, Software Engineer, 5 years Python";

    fn app(model: &Arc<StubModel>) -> Router {
        app_with_config(model, Config::for_tests())
    }

    fn app_with_config(model: &Arc<StubModel>, config: Config) -> Router {
        build_router(AppState {
            llm: model.clone(),
            config,
        })
    }

    fn fenced_record() -> String {
        format!("```json\n{}\n```", serde_json::to_string_pretty(&full_record()).unwrap())
    }

    fn upload(field: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{field}\"; filename=\"cv.pdf\"\r\n\
                 Content-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/process_resume")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_returns_instructions() {
        let model = Arc::new(StubModel::replying("{}"));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = send(app(&model), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to the Resume Processing API!");
        assert!(body["instructions"].as_str().unwrap().contains("/process_resume"));
    }

    #[tokio::test]
    async fn test_health() {
        let model = Arc::new(StubModel::replying("{}"));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(&model), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_returns_text_and_structured_data() {
        let model = Arc::new(StubModel::replying(&fenced_record()));
        let pdf = test_pdf::build(&[Some(CV_TEXT)]);
        let (status, body) = send(app(&model), upload("file", &pdf)).await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert!(body["text"].as_str().unwrap().contains("Software Engineer"));

        let data = &body["structured_data"];
        for (field, _) in REQUIRED_FIELDS {
            assert!(data.get(*field).is_some(), "missing {field}");
        }
        assert_eq!(data["Title"], "Software Engineer");
        assert!(data["Skills"].is_object());
        assert!(data["Work experience"].is_array());
        assert_eq!(model.calls(), 1);

        // The model was given exactly the extracted text.
        let seen = model.seen();
        assert_eq!(seen[0].messages()[1].content, body["text"].as_str().unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let model = Arc::new(StubModel::replying(&fenced_record()));
        let pdf = test_pdf::build(&[Some(CV_TEXT)]);
        let (status, body) = send(app(&model), upload("resume", &pdf)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "UNPROCESSABLE_ENTITY");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        let model = Arc::new(StubModel::replying(&fenced_record()));
        let config = Config {
            max_upload_bytes: 1024,
            ..Config::for_tests()
        };
        let (status, body) = send(
            app_with_config(&model, config),
            upload("file", &[b'%'; 4096]),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "UPLOAD_TOO_LARGE");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_under_limit_is_accepted() {
        let model = Arc::new(StubModel::replying(&fenced_record()));
        let pdf = test_pdf::build(&[Some(CV_TEXT)]);
        let config = Config {
            max_upload_bytes: pdf.len() + 1024,
            ..Config::for_tests()
        };
        let (status, body) = send(app_with_config(&model, config), upload("file", &pdf)).await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
    }

    #[tokio::test]
    async fn test_unreadable_document_is_extraction_error() {
        let model = Arc::new(StubModel::replying(&fenced_record()));
        let (status, body) = send(app(&model), upload("file", b"not a pdf at all")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "EXTRACTION_ERROR");
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Error extracting text from PDF"));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_textless_document_is_bad_request() {
        let model = Arc::new(StubModel::replying(&fenced_record()));
        let pdf = test_pdf::build(&[None]);
        let (status, body) = send(app(&model), upload("file", &pdf)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_TEXT");
        assert_eq!(body["detail"], "Failed to extract text from PDF.");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_reported() {
        let model = Arc::new(StubModel::replying("I could not read this CV, sorry."));
        let pdf = test_pdf::build(&[Some(CV_TEXT)]);
        let (status, body) = send(app(&model), upload("file", &pdf)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "RESPONSE_FORMAT_ERROR");
        assert!(body.get("structured_data").is_none());
    }

    #[tokio::test]
    async fn test_model_outage_is_reported() {
        let model = Arc::new(StubModel::failing("service unavailable"));
        let pdf = test_pdf::build(&[Some(CV_TEXT)]);
        let (status, body) = send(app(&model), upload("file", &pdf)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "MODEL_INVOCATION_ERROR");
        assert!(body["detail"].as_str().unwrap().contains("service unavailable"));
    }
}
