//! Side-by-side comparison of the selected candidates.
//!
//! Builds two presence matrices over the selection: one keyed by skill and one
//! keyed by education institution. Row keys are the deduplicated union across
//! the selected candidates, in the order they are first seen, so the rendered
//! tables are stable between requests.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::models::candidate::Candidate;
use crate::ranking::selection::SelectionSet;

/// Column header for one compared candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparedCandidate {
    pub id: Uuid,
    pub name: String,
    pub match_score: Option<u8>,
    pub headline: Option<String>,
}

/// One row of the skills table. `present[i]` refers to `candidates[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRow {
    pub skill: String,
    pub present: Vec<bool>,
}

/// One row of the education table. `degrees[i]` is the degree `candidates[i]`
/// earned at the institution, or `None` when they have no entry there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionRow {
    pub institution: String,
    pub degrees: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    pub candidates: Vec<ComparedCandidate>,
    pub all_skills: Vec<String>,
    pub all_institutions: Vec<String>,
    pub skill_rows: Vec<SkillRow>,
    pub institution_rows: Vec<InstitutionRow>,
}

impl ComparisonView {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Compares the candidates whose ids are in `selected`, in repository order.
///
/// An empty selection (or one whose ids are not in `candidates`) produces an
/// empty view rather than an error; deciding what to show instead is up to
/// the caller.
pub fn compare(candidates: &[Candidate], selected: &SelectionSet) -> ComparisonView {
    let chosen: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| selected.contains(&c.id()))
        .collect();

    let all_skills = ordered_union(chosen.iter().flat_map(|c| c.skills().iter()));
    let all_institutions = ordered_union(
        chosen
            .iter()
            .flat_map(|c| c.education().iter().map(|e| &e.institution)),
    );

    let skill_rows = all_skills
        .iter()
        .map(|skill| SkillRow {
            skill: skill.clone(),
            present: chosen.iter().map(|c| c.has_skill(skill)).collect(),
        })
        .collect();

    let institution_rows = all_institutions
        .iter()
        .map(|institution| InstitutionRow {
            institution: institution.clone(),
            degrees: chosen
                .iter()
                .map(|c| c.degree_at(institution).map(str::to_string))
                .collect(),
        })
        .collect();

    ComparisonView {
        candidates: chosen.iter().map(|c| compared(c)).collect(),
        all_skills,
        all_institutions,
        skill_rows,
        institution_rows,
    }
}

fn compared(c: &Candidate) -> ComparedCandidate {
    ComparedCandidate {
        id: c.id(),
        name: c.name().to_string(),
        match_score: c.match_score(),
        headline: c
            .experience()
            .first()
            .map(|e| format!("{} at {}", e.title, e.company)),
    }
}

/// Deduplicates while keeping first-seen order.
fn ordered_union<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen: HashSet<&String> = HashSet::new();
    items
        .into_iter()
        .filter(|s| seen.insert(*s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::test_support::{candidate, educated};

    fn select(cs: &[&Candidate]) -> SelectionSet {
        let mut set = SelectionSet::new();
        for c in cs {
            set.toggle(c.id());
        }
        set
    }

    #[test]
    fn test_skill_union_and_presence() {
        let a = candidate("A", &["X", "Y"], Some(80));
        let b = candidate("B", &["Y", "Z"], Some(70));
        let cs = vec![a.clone(), b.clone()];
        let view = compare(&cs, &select(&[&a, &b]));

        assert_eq!(view.all_skills, vec!["X", "Y", "Z"]);
        let matrix: Vec<_> = view.skill_rows.iter().map(|r| r.present.clone()).collect();
        // rows X, Y, Z; columns A, B
        assert_eq!(
            matrix,
            vec![vec![true, false], vec![true, true], vec![false, true]]
        );
    }

    #[test]
    fn test_columns_follow_repository_order_not_selection_order() {
        let a = candidate("A", &["X"], None);
        let b = candidate("B", &["Y"], None);
        let cs = vec![a.clone(), b.clone()];
        let view = compare(&cs, &select(&[&b, &a]));
        let names: Vec<_> = view.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(view.all_skills, vec!["X", "Y"]);
    }

    #[test]
    fn test_institution_union_exposes_degree_or_absence() {
        let a = educated("A", &[("B.S. Computer Science", "Stanford University")]);
        let b = educated(
            "B",
            &[
                ("M.S. Software Engineering", "MIT"),
                ("B.A. Information Systems", "Stanford University"),
            ],
        );
        let cs = vec![a.clone(), b.clone()];
        let view = compare(&cs, &select(&[&a, &b]));

        assert_eq!(view.all_institutions, vec!["Stanford University", "MIT"]);
        assert_eq!(
            view.institution_rows[0].degrees,
            vec![
                Some("B.S. Computer Science".to_string()),
                Some("B.A. Information Systems".to_string())
            ]
        );
        assert_eq!(
            view.institution_rows[1].degrees,
            vec![None, Some("M.S. Software Engineering".to_string())]
        );
    }

    #[test]
    fn test_unselected_candidates_are_excluded() {
        let a = candidate("A", &["X"], None);
        let b = candidate("B", &["Only B"], None);
        let cs = vec![a.clone(), b];
        let view = compare(&cs, &select(&[&a]));
        assert_eq!(view.candidates.len(), 1);
        assert_eq!(view.all_skills, vec!["X"]);
    }

    #[test]
    fn test_empty_selection_yields_empty_view() {
        let cs = vec![candidate("A", &["X"], None)];
        let view = compare(&cs, &SelectionSet::new());
        assert!(view.is_empty());
        assert!(view.all_skills.is_empty());
        assert!(view.all_institutions.is_empty());
        assert!(view.skill_rows.is_empty());
        assert_eq!(view, ComparisonView::default());
    }

    #[test]
    fn test_stale_selection_ids_are_ignored() {
        let a = candidate("A", &["X"], None);
        let mut set = SelectionSet::new();
        set.toggle(Uuid::new_v4());
        assert!(compare(&[a], &set).is_empty());
    }

    #[test]
    fn test_duplicate_skill_within_one_candidate_listed_once() {
        let a = candidate("A", &["Rust", "Rust", "Go"], None);
        let cs = vec![a.clone()];
        let view = compare(&cs, &select(&[&a]));
        assert_eq!(view.all_skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_headline_absent_without_experience() {
        let a = candidate("A", &[], None);
        let cs = vec![a.clone()];
        let view = compare(&cs, &select(&[&a]));
        assert_eq!(view.candidates[0].headline, None);
    }
}
