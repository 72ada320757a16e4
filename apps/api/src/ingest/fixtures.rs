//! Fixture parser: stands in for the parse service in local runs and tests.
//!
//! Output is drawn from fixed pools with a seeded `StdRng`, so the same seed
//! and the same uploads always produce the same records.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::ingest::parser::{ParserError, ResumeParser, UploadedFile};
use crate::models::candidate::{EducationItem, ExperienceItem, ParsedResume};

const NAMES: &[&str] = &[
    "Emily Johnson",
    "Michael Chen",
    "Sarah Williams",
    "David Rodriguez",
    "Jessica Lee",
    "Robert Smith",
    "Olivia Davis",
    "James Wilson",
    "Sophia Martinez",
    "Benjamin Taylor",
];

const SKILLS: &[&str] = &[
    "JavaScript",
    "React",
    "TypeScript",
    "Node.js",
    "Python",
    "SQL",
    "AWS",
    "Docker",
    "Git",
    "HTML/CSS",
    "UI/UX Design",
    "Agile",
    "Data Analysis",
    "MongoDB",
    "Redux",
    "GraphQL",
    "Figma",
    "Express.js",
    "Next.js",
    "CI/CD",
    "Jest",
    "REST APIs",
];

// (degree, institution, year)
const EDUCATION: &[(&str, &str, &str)] = &[
    ("B.S. Computer Science", "Stanford University", "2020"),
    ("M.S. Software Engineering", "MIT", "2022"),
    ("B.A. Information Systems", "UC Berkeley", "2019"),
    ("Ph.D. Computer Science", "Harvard University", "2021"),
    ("B.S. Web Development", "Georgia Tech", "2018"),
];

// (title, company, duration, description)
const EXPERIENCE: &[(&str, &str, &str, [&str; 3])] = &[
    (
        "Senior Frontend Developer",
        "Google",
        "2020-Present",
        [
            "Developed React applications",
            "Led team of 5 developers",
            "Implemented CI/CD pipeline",
        ],
    ),
    (
        "Software Engineer",
        "Microsoft",
        "2018-2020",
        [
            "Built microservices",
            "Improved performance by 40%",
            "Implemented unit tests",
        ],
    ),
    (
        "Full Stack Developer",
        "Amazon",
        "2017-2019",
        [
            "Created REST APIs",
            "Developed UI components",
            "Optimized database queries",
        ],
    ),
    (
        "Frontend Engineer",
        "Facebook",
        "2016-2018",
        [
            "Implemented responsive designs",
            "Reduced bundle size",
            "Built reusable components",
        ],
    ),
];

pub struct FixtureResumeParser {
    seed: u64,
}

impl FixtureResumeParser {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn generate(
        &self,
        files: &[UploadedFile],
        job_description: Option<&str>,
    ) -> Vec<ParsedResume> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                fixture_record(&mut rng, index, &file.file_name, job_description.is_some())
            })
            .collect()
    }
}

#[async_trait]
impl ResumeParser for FixtureResumeParser {
    async fn parse(
        &self,
        files: &[UploadedFile],
        job_description: Option<&str>,
    ) -> Result<Vec<ParsedResume>, ParserError> {
        Ok(self.generate(files, job_description))
    }

    fn backend(&self) -> &'static str {
        "fixture"
    }
}

fn fixture_record(rng: &mut StdRng, index: usize, file_name: &str, scored: bool) -> ParsedResume {
    let name = NAMES[index % NAMES.len()];
    let first = name.split(' ').next().unwrap_or(name).to_lowercase();

    let skill_count = rng.gen_range(5..=10);
    let skills = SKILLS
        .choose_multiple(rng, skill_count)
        .map(|s| s.to_string())
        .collect();

    let edu_count = rng.gen_range(1..=2);
    let education = EDUCATION
        .choose_multiple(rng, edu_count)
        .map(|(degree, institution, year)| EducationItem {
            degree: degree.to_string(),
            institution: institution.to_string(),
            year: year.to_string(),
        })
        .collect();

    let exp_count = rng.gen_range(1..=3);
    let experience = EXPERIENCE
        .choose_multiple(rng, exp_count)
        .map(|(title, company, duration, description)| ExperienceItem {
            title: title.to_string(),
            company: company.to_string(),
            duration: duration.to_string(),
            description: description.iter().map(|d| d.to_string()).collect(),
        })
        .collect();

    let match_score = scored.then(|| rng.gen_range(60..=100));
    let phone = format!(
        "({}) {}-{}",
        rng.gen_range(100..=999),
        rng.gen_range(100..=999),
        rng.gen_range(1000..=9999)
    );

    ParsedResume {
        name: name.to_string(),
        email: format!("{first}@example.com"),
        phone,
        skills,
        education,
        experience,
        match_score,
        file_name: file_name.to_string(),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use bytes::Bytes;

    use super::*;

    fn uploads(n: usize) -> Vec<UploadedFile> {
        (0..n)
            .map(|i| UploadedFile {
                file_name: format!("resume-{i}.pdf"),
                content_type: None,
                bytes: Bytes::new(),
            })
            .collect()
    }

    #[test]
    fn test_same_seed_same_output() {
        let files = uploads(4);
        let a = FixtureResumeParser::new(7).generate(&files, Some("jd"));
        let b = FixtureResumeParser::new(7).generate(&files, Some("jd"));
        let shape = |rs: &[ParsedResume]| {
            rs.iter()
                .map(|r| (r.skills.clone(), r.match_score, r.phone.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(&a[..]), shape(&b[..]));
    }

    #[test]
    fn test_one_record_per_file_in_order() {
        let files = uploads(3);
        let out = FixtureResumeParser::new(1).generate(&files, None);
        let file_names: Vec<_> = out.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(file_names, vec!["resume-0.pdf", "resume-1.pdf", "resume-2.pdf"]);
        assert_eq!(out[1].name, "Michael Chen");
        assert_eq!(out[1].email, "michael@example.com");
    }

    #[test]
    fn test_names_cycle_past_pool() {
        let out = FixtureResumeParser::new(1).generate(&uploads(11), None);
        assert_eq!(out[10].name, out[0].name);
    }

    #[test]
    fn test_generated_shapes_stay_in_range() {
        let out = FixtureResumeParser::new(99).generate(&uploads(10), Some("Frontend role"));
        for r in &out {
            assert!((5..=10).contains(&r.skills.len()));
            assert_eq!(r.skills.iter().collect::<HashSet<_>>().len(), r.skills.len());
            assert!((1..=2).contains(&r.education.len()));
            assert!((1..=3).contains(&r.experience.len()));
            let score = r.match_score.unwrap();
            assert!((60..=100).contains(&score));
            assert_eq!(r.phone.len(), "(555) 555-5555".len());
        }
    }

    #[test]
    fn test_no_job_description_means_no_score() {
        let out = FixtureResumeParser::new(3).generate(&uploads(5), None);
        assert!(out.iter().all(|r| r.match_score.is_none()));
    }

    #[tokio::test]
    async fn test_trait_backend() {
        let parser = FixtureResumeParser::new(3);
        let out = parser.parse(&uploads(2), None).await.unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(parser.backend(), "fixture");
    }
}
