//! Resume pipeline — extracted text → model conversation → validated record.

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::{extract_text, Document};
use crate::llm_client::{ask, ChatModel, Conversation};
use crate::resume::normalizer::parse_reply;
use crate::resume::prompts::RESUME_STRUCTURE_SYSTEM;
use crate::resume::schema::StructuredRecord;

/// Successful result of processing one upload.
#[derive(Debug, Serialize)]
pub struct ProcessedResume {
    pub text: String,
    pub structured_data: StructuredRecord,
}

/// Runs extraction and structuring for one document.
pub async fn process_document(
    document: &Document,
    model: &dyn ChatModel,
    max_input_chars: usize,
) -> Result<ProcessedResume, AppError> {
    let text = extract_text(document).await?;
    process_text(text, model, max_input_chars).await
}

/// Structures already-extracted text. Empty or oversized text is rejected
/// before the model is called.
pub async fn process_text(
    text: String,
    model: &dyn ChatModel,
    max_input_chars: usize,
) -> Result<ProcessedResume, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::EmptyText);
    }

    let chars = text.chars().count();
    if chars > max_input_chars {
        return Err(AppError::InputTooLarge {
            chars,
            limit: max_input_chars,
        });
    }

    info!("Structuring {chars} characters of resume text");
    let structured_data = structure_text(&text, model).await?;

    Ok(ProcessedResume {
        text,
        structured_data,
    })
}

/// One fresh conversation per call: fixed system instruction, CV text as the
/// user turn, reply parsed and checked against the schema.
pub async fn structure_text(
    text: &str,
    model: &dyn ChatModel,
) -> Result<StructuredRecord, AppError> {
    let mut conversation = Conversation::new(RESUME_STRUCTURE_SYSTEM);
    let reply = ask(model, &mut conversation, text).await?;
    debug!(
        "Model reply: {} bytes, conversation length {}",
        reply.len(),
        conversation.messages().len()
    );

    let value = parse_reply(&reply)?;
    let record = StructuredRecord::try_from(value)?;
    debug!("Structured record title: {:?}", record.get("Title"));
    Ok(record)
}
