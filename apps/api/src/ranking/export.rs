use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::candidate::{Candidate, EducationItem, ExperienceItem};
use crate::ranking::selection::SelectionSet;
use crate::ranking::RankingError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    #[default]
    All,
    Selected,
}

impl FromStr for ExportScope {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ExportScope::All),
            "selected" => Ok(ExportScope::Selected),
            other => Err(RankingError::invalid("export scope", other)),
        }
    }
}

/// A column that can be exported. Declaration order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportField {
    Name,
    Email,
    Phone,
    Skills,
    Education,
    Experience,
    MatchScore,
}

impl ExportField {
    pub const ALL: [ExportField; 7] = [
        ExportField::Name,
        ExportField::Email,
        ExportField::Phone,
        ExportField::Skills,
        ExportField::Education,
        ExportField::Experience,
        ExportField::MatchScore,
    ];

    /// Key used in encoded output.
    pub fn key(self) -> &'static str {
        match self {
            ExportField::Name => "name",
            ExportField::Email => "email",
            ExportField::Phone => "phone",
            ExportField::Skills => "skills",
            ExportField::Education => "education",
            ExportField::Experience => "experience",
            ExportField::MatchScore => "matchScore",
        }
    }
}

impl fmt::Display for ExportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which fields go into an export. Everything is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldFlags {
    pub name: bool,
    pub email: bool,
    pub phone: bool,
    pub skills: bool,
    pub education: bool,
    pub experience: bool,
    pub match_score: bool,
}

impl Default for FieldFlags {
    fn default() -> Self {
        Self {
            name: true,
            email: true,
            phone: true,
            skills: true,
            education: true,
            experience: true,
            match_score: true,
        }
    }
}

impl FieldFlags {
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            name: false,
            email: false,
            phone: false,
            skills: false,
            education: false,
            experience: false,
            match_score: false,
        }
    }

    pub fn is_enabled(&self, field: ExportField) -> bool {
        match field {
            ExportField::Name => self.name,
            ExportField::Email => self.email,
            ExportField::Phone => self.phone,
            ExportField::Skills => self.skills,
            ExportField::Education => self.education,
            ExportField::Experience => self.experience,
            ExportField::MatchScore => self.match_score,
        }
    }

    /// Enabled fields in canonical order.
    pub fn enabled(&self) -> Vec<ExportField> {
        ExportField::ALL
            .into_iter()
            .filter(|f| self.is_enabled(*f))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportValue {
    Text(String),
    List(Vec<String>),
    Education(Vec<EducationItem>),
    Experience(Vec<ExperienceItem>),
    Score(Option<u8>),
}

/// One exported candidate: the enabled fields, in canonical order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRecord {
    pub fields: Vec<(ExportField, ExportValue)>,
}

impl ExportRecord {
    pub fn get(&self, field: ExportField) -> Option<&ExportValue> {
        self.fields.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Flattens the candidates in `scope` into records holding only the enabled fields.
///
/// `Selected` with an empty selection yields no records.
pub fn project(
    candidates: &[Candidate],
    selected: &SelectionSet,
    scope: ExportScope,
    fields: &FieldFlags,
) -> Vec<ExportRecord> {
    let enabled = fields.enabled();
    candidates
        .iter()
        .filter(|c| match scope {
            ExportScope::All => true,
            ExportScope::Selected => selected.contains(&c.id()),
        })
        .map(|c| ExportRecord {
            fields: enabled.iter().map(|f| (*f, value_of(c, *f))).collect(),
        })
        .collect()
}

fn value_of(c: &Candidate, field: ExportField) -> ExportValue {
    match field {
        ExportField::Name => ExportValue::Text(c.name().to_string()),
        ExportField::Email => ExportValue::Text(c.email().to_string()),
        ExportField::Phone => ExportValue::Text(c.phone().to_string()),
        ExportField::Skills => ExportValue::List(c.skills().to_vec()),
        ExportField::Education => ExportValue::Education(c.education().to_vec()),
        ExportField::Experience => ExportValue::Experience(c.experience().to_vec()),
        ExportField::MatchScore => ExportValue::Score(c.match_score()),
    }
}
