//! Per-session recruiter state: the candidate repository plus the selection
//! and dashboard view that go with it.
//!
//! A `Session` is a plain owned value. Everything the ranking engine needs is
//! passed in explicitly from here; nothing reads ambient state.

pub mod handlers;
pub mod store;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::{Candidate, ScoreBand};
use crate::ranking::{
    compare, filter, project, sort, ComparisonView, ExportRecord, ExportScope, FieldFlags,
    RankingError, SelectionSet, SortDirection, SortField, ToggleOutcome,
};

pub use store::SessionStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Recruiter,
    Student,
}

impl Role {
    /// How many resumes one upload may carry.
    pub fn max_files(self) -> usize {
        match self {
            Role::Recruiter => 10,
            Role::Student => 1,
        }
    }
}

impl FromStr for Role {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recruiter" => Ok(Role::Recruiter),
            "student" => Ok(Role::Student),
            other => Err(RankingError::invalid("role", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Recruiter => "recruiter",
            Role::Student => "student",
        })
    }
}

/// Dashboard search and ordering. Starts at best match first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    pub query: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl ViewConfig {
    /// Sort-button behavior: pressing the active field flips the direction,
    /// pressing another field switches to it, descending.
    pub fn press_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.reversed();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Desc;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub selected: bool,
    pub score_band: Option<ScoreBand>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub candidates: Vec<DashboardEntry>,
    pub found: usize,
    pub total: usize,
    pub selected: SelectionSet,
    pub matched_to_job_description: bool,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub candidate_count: usize,
    pub selected: SelectionSet,
    pub job_description: Option<String>,
    pub view: ViewConfig,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    role: Role,
    created_at: DateTime<Utc>,
    candidates: Vec<Candidate>,
    selection: SelectionSet,
    view: ViewConfig,
    job_description: Option<String>,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            created_at: Utc::now(),
            candidates: Vec::new(),
            selection: SelectionSet::new(),
            view: ViewConfig::default(),
            job_description: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    #[cfg(test)]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewConfig {
        &mut self.view
    }

    #[cfg(test)]
    pub fn job_description(&self) -> Option<&str> {
        self.job_description.as_deref()
    }

    /// Replaces the repository with a freshly analyzed batch.
    /// Selection and view state belong to the old batch and are reset.
    pub fn load(&mut self, candidates: Vec<Candidate>, job_description: Option<String>) {
        self.candidates = candidates;
        self.job_description = job_description;
        self.selection.clear();
        self.view = ViewConfig::default();
    }

    /// Role switch: drops everything the session holds.
    pub fn reset(&mut self, role: Role) {
        self.role = role;
        self.load(Vec::new(), None);
    }

    /// Toggles `id` in the selection. Returns `None` if no candidate has that id.
    pub fn toggle_selection(&mut self, id: Uuid) -> Option<ToggleOutcome> {
        if !self.candidates.iter().any(|c| c.id() == id) {
            return None;
        }
        Some(self.selection.toggle(id))
    }

    pub fn dashboard(&self) -> DashboardView {
        let found = filter(&self.candidates, &self.view.query);
        let found_count = found.len();
        let ordered = sort(found, self.view.sort_field, self.view.sort_direction);
        DashboardView {
            candidates: ordered
                .into_iter()
                .map(|c| DashboardEntry {
                    candidate: c.clone(),
                    selected: self.selection.contains(&c.id()),
                    score_band: c.match_score().map(ScoreBand::of),
                })
                .collect(),
            found: found_count,
            total: self.candidates.len(),
            selected: self.selection.clone(),
            matched_to_job_description: self.job_description.is_some(),
            view: self.view.clone(),
        }
    }

    pub fn comparison(&self) -> ComparisonView {
        compare(&self.candidates, &self.selection)
    }

    pub fn export(&self, scope: ExportScope, fields: &FieldFlags) -> Vec<ExportRecord> {
        project(&self.candidates, &self.selection, scope, fields)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            role: self.role,
            created_at: self.created_at,
            candidate_count: self.candidates.len(),
            selected: self.selection.clone(),
            job_description: self.job_description.clone(),
            view: self.view.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::test_support::candidate;

    fn loaded() -> Session {
        let mut s = Session::new(Role::Recruiter);
        s.load(
            vec![
                candidate("Emily Johnson", &["React", "TypeScript"], Some(90)),
                candidate("Michael Chen", &["Python", "SQL"], Some(60)),
                candidate("Sarah Williams", &["React", "AWS"], Some(75)),
            ],
            Some("Frontend engineer".to_string()),
        );
        s
    }

    fn dashboard_names(s: &Session) -> Vec<String> {
        s.dashboard()
            .candidates
            .iter()
            .map(|e| e.candidate.name().to_string())
            .collect()
    }

    #[test]
    fn test_default_dashboard_is_best_match_first() {
        let s = loaded();
        assert_eq!(
            dashboard_names(&s),
            vec!["Emily Johnson", "Sarah Williams", "Michael Chen"]
        );
        let d = s.dashboard();
        assert_eq!(d.found, 3);
        assert!(d.matched_to_job_description);
    }

    #[test]
    fn test_dashboard_applies_query_and_name_sort() {
        let mut s = loaded();
        s.view_mut().query = "react".to_string();
        s.view_mut().press_sort(SortField::Name);
        assert_eq!(s.view().sort_direction, SortDirection::Desc);
        assert_eq!(dashboard_names(&s), vec!["Sarah Williams", "Emily Johnson"]);
        let d = s.dashboard();
        assert_eq!(d.found, 2);
        assert_eq!(d.total, 3);
    }

    #[test]
    fn test_press_sort_same_field_flips_direction() {
        let mut view = ViewConfig::default();
        view.press_sort(SortField::MatchScore);
        assert_eq!(view.sort_direction, SortDirection::Asc);
        view.press_sort(SortField::MatchScore);
        assert_eq!(view.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_press_sort_new_field_resets_to_desc() {
        let mut view = ViewConfig {
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        view.press_sort(SortField::Name);
        assert_eq!(view.sort_field, SortField::Name);
        assert_eq!(view.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_toggle_unknown_candidate_is_rejected() {
        let mut s = loaded();
        assert_eq!(s.toggle_selection(Uuid::new_v4()), None);
        assert!(s.selection().is_empty());
    }

    #[test]
    fn test_dashboard_marks_selected_and_bands() {
        let mut s = loaded();
        let michael = s.candidates()[1].id();
        assert_eq!(s.toggle_selection(michael), Some(ToggleOutcome::Added));
        let d = s.dashboard();
        let entry = d.candidates.iter().find(|e| e.candidate.id() == michael).unwrap();
        assert!(entry.selected);
        assert_eq!(entry.score_band, Some(ScoreBand::Moderate));
    }

    #[test]
    fn test_load_resets_selection_and_view() {
        let mut s = loaded();
        let first = s.candidates()[0].id();
        s.toggle_selection(first);
        s.view_mut().query = "x".to_string();
        s.load(vec![candidate("New", &[], None)], None);
        assert!(s.selection().is_empty());
        assert_eq!(s.view(), &ViewConfig::default());
        assert!(!s.dashboard().matched_to_job_description);
    }

    #[test]
    fn test_reset_clears_everything_and_switches_role() {
        let mut s = loaded();
        let first = s.candidates()[0].id();
        s.toggle_selection(first);
        s.reset(Role::Student);
        assert_eq!(s.role(), Role::Student);
        assert!(s.candidates().is_empty());
        assert!(s.selection().is_empty());
        assert!(s.job_description().is_none());
        assert!(s.comparison().is_empty());
    }

    #[test]
    fn test_role_limits_and_parse() {
        assert_eq!(Role::Recruiter.max_files(), 10);
        assert_eq!(Role::Student.max_files(), 1);
        assert_eq!("student".parse::<Role>(), Ok(Role::Student));
        assert!("admin".parse::<Role>().is_err());
    }
}
