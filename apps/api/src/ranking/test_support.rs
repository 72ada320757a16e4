use uuid::Uuid;

use crate::models::candidate::{Candidate, EducationItem, ParsedResume};

pub fn candidate(name: &str, skills: &[&str], score: Option<u32>) -> Candidate {
    Candidate::from_parsed(ParsedResume {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "(555) 123-4567".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        match_score: score,
        file_name: format!("{}.pdf", name.to_lowercase()),
        ..Default::default()
    })
}

pub fn educated(name: &str, schools: &[(&str, &str)]) -> Candidate {
    Candidate::from_parsed(ParsedResume {
        name: name.to_string(),
        education: schools
            .iter()
            .map(|(degree, institution)| EducationItem {
                degree: degree.to_string(),
                institution: institution.to_string(),
                year: "2020".to_string(),
            })
            .collect(),
        ..Default::default()
    })
}

pub fn names(cs: &[&Candidate]) -> Vec<String> {
    cs.iter().map(|c| c.name().to_string()).collect()
}

pub fn ids(cs: &[Candidate]) -> Vec<Uuid> {
    cs.iter().map(Candidate::id).collect()
}
