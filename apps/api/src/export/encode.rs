use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::candidate::{EducationItem, ExperienceItem};
use crate::ranking::{ExportField, ExportRecord, ExportValue, FieldFlags, RankingError};

const LIST_SEPARATOR: &str = "; ";

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn file_name(self, at: DateTime<Utc>) -> String {
        format!("candidates-{}.{}", at.format("%Y%m%dT%H%M%SZ"), self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(RankingError::invalid("export format", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encodes projected records. `fields` decides the CSV header, which is
/// written even when there are no records.
pub fn encode(
    records: &[ExportRecord],
    fields: &FieldFlags,
    format: ExportFormat,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        ExportFormat::Csv => encode_csv(records, &fields.enabled()),
        ExportFormat::Json => encode_json(records),
    }
}

fn encode_csv(records: &[ExportRecord], columns: &[ExportField]) -> Result<Vec<u8>, EncodeError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(columns.iter().map(|f| f.key()))?;
    for record in records {
        wtr.write_record(
            columns
                .iter()
                .map(|f| record.get(*f).map(flatten).unwrap_or_default()),
        )?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

fn encode_json(records: &[ExportRecord]) -> Result<Vec<u8>, EncodeError> {
    let rows = records
        .iter()
        .map(|record| {
            record
                .fields
                .iter()
                .map(|(field, value)| Ok((field.key().to_string(), serde_json::to_value(value)?)))
                .collect::<Result<Map<String, Value>, serde_json::Error>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_vec_pretty(&rows)?)
}

/// Single-cell rendering of a value for CSV.
fn flatten(value: &ExportValue) -> String {
    match value {
        ExportValue::Text(s) => s.clone(),
        ExportValue::List(items) => items.join(LIST_SEPARATOR),
        ExportValue::Education(items) => items
            .iter()
            .map(education_cell)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        ExportValue::Experience(items) => items
            .iter()
            .map(experience_cell)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        ExportValue::Score(score) => score.map(|s| s.to_string()).unwrap_or_default(),
    }
}

fn education_cell(e: &EducationItem) -> String {
    format!("{} - {} ({})", e.degree, e.institution, e.year)
}

fn experience_cell(e: &ExperienceItem) -> String {
    format!("{} at {} ({})", e.title, e.company, e.duration)
}
