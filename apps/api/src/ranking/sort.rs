use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::candidate::Candidate;
use crate::ranking::RankingError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    MatchScore,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortField {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matchScore" => Ok(SortField::MatchScore),
            "name" => Ok(SortField::Name),
            other => Err(RankingError::invalid("sort field", other)),
        }
    }
}

impl FromStr for SortDirection {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(RankingError::invalid("sort direction", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortField::MatchScore => "matchScore",
            SortField::Name => "name",
        })
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

/// Returns the candidates ordered by `field` in `direction`.
///
/// The sort is stable in both directions: candidates with equal keys keep
/// their input order. A missing match score sorts as 0.
pub fn sort<'a, I>(candidates: I, field: SortField, direction: SortDirection) -> Vec<&'a Candidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut out: Vec<&Candidate> = candidates.into_iter().collect();
    out.sort_by(|a, b| {
        let ord = match field {
            SortField::MatchScore => score_key(a).cmp(&score_key(b)),
            SortField::Name => compare_names(a.name(), b.name()),
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}

fn score_key(c: &Candidate) -> u8 {
    c.match_score().unwrap_or(0)
}

/// Locale-style name order. Accents and case are ignored first ("Émile" sorts
/// between "Ella" and "Fiona"); ties fall back to unaccented before accented,
/// then lowercase before uppercase ("apple" before "Apple").
fn compare_names(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| b.cmp(a))
}

/// Lowercased NFD form with combining marks removed.
fn base_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accent_key(name: &str) -> String {
    name.nfd().flat_map(char::to_lowercase).collect()
}
