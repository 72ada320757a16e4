// Ingestion: uploaded resumes → parse service → candidate repository.
// Decoding PDF/DOCX happens behind the ResumeParser trait, never here.

pub mod fixtures;
pub mod handlers;
pub mod parser;

use crate::errors::AppError;
use crate::ingest::parser::{ParserError, UploadedFile};
use crate::models::candidate::{Candidate, ParsedResume};
use crate::session::Role;

const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// Per-file upload limit.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

fn has_accepted_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|a| a.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Checks an upload batch against the role's file limit and the accepted types.
pub fn validate_uploads(files: &[UploadedFile], role: Role) -> Result<(), AppError> {
    check_batch_size(files.len(), role)?;
    if let Some(bad) = files.iter().find(|f| !has_accepted_extension(&f.file_name)) {
        return Err(AppError::Validation(format!(
            "'{}' is not a PDF or DOCX file",
            bad.file_name
        )));
    }
    if let Some(big) = files.iter().find(|f| f.bytes.len() > MAX_FILE_BYTES) {
        return Err(AppError::Validation(format!(
            "'{}' is larger than {} MB",
            big.file_name,
            MAX_FILE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

pub fn check_batch_size(count: usize, role: Role) -> Result<(), AppError> {
    if count == 0 {
        return Err(AppError::Validation("No resumes provided".to_string()));
    }
    let max = role.max_files();
    if count > max {
        return Err(AppError::Validation(format!(
            "A {role} upload may contain at most {max} resume(s), got {count}"
        )));
    }
    Ok(())
}

/// A blank job description counts as none, so no match scores are expected.
pub fn normalize_job_description(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Assigns ids to parsed records. Any record the service flagged as failed
/// rejects the whole batch.
pub fn into_candidates(records: Vec<ParsedResume>) -> Result<Vec<Candidate>, AppError> {
    if let Some(err) = records.iter().find_map(|r| r.error.clone()) {
        return Err(ParserError::Rejected(err).into());
    }
    Ok(records.into_iter().map(Candidate::from_parsed).collect())
}
