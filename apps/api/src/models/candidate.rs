use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound for a match score. Anything the parse service reports above it is clamped.
pub const MAX_MATCH_SCORE: u8 = 100;

/// Badge shown next to a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Strong,
            60..=79 => ScoreBand::Moderate,
            _ => ScoreBand::Weak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub duration: String,
    #[serde(default)]
    pub description: Vec<String>,
}

/// A parsed resume held in a session repository.
///
/// Fields are private so a candidate cannot be edited after ingestion; the id is
/// assigned once in [`Candidate::from_parsed`] and never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    skills: Vec<String>,
    education: Vec<EducationItem>,
    experience: Vec<ExperienceItem>,
    match_score: Option<u8>,
    file_name: String,
}

impl Candidate {
    /// Assigns a fresh id to a record returned by the parse service.
    pub fn from_parsed(parsed: ParsedResume) -> Self {
        Self::with_id(Uuid::new_v4(), parsed)
    }

    pub fn with_id(id: Uuid, parsed: ParsedResume) -> Self {
        Self {
            id,
            name: parsed.name,
            email: parsed.email,
            phone: parsed.phone,
            skills: parsed.skills,
            education: parsed.education,
            experience: parsed.experience,
            match_score: parsed.match_score.map(|s| s.min(MAX_MATCH_SCORE as u32) as u8),
            file_name: parsed.file_name,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn education(&self) -> &[EducationItem] {
        &self.education
    }

    pub fn experience(&self) -> &[ExperienceItem] {
        &self.experience
    }

    pub fn match_score(&self) -> Option<u8> {
        self.match_score
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// Degree earned at `institution`, if the candidate lists one there.
    pub fn degree_at(&self, institution: &str) -> Option<&str> {
        self.education
            .iter()
            .find(|e| e.institution == institution)
            .map(|e| e.degree.as_str())
    }
}

/// One record as returned by the external parse service, before an id is assigned.
///
/// The service omits keys it could not extract, so every field defaults.
/// When the service fails to analyze a file it returns `{"error": "..."}` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub education: Vec<EducationItem>,
    pub experience: Vec<ExperienceItem>,
    pub match_score: Option<u32>,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
