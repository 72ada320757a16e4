use crate::models::candidate::Candidate;

/// Keeps candidates whose name or any skill contains `query`, ignoring case.
///
/// An empty query keeps everything. The query is matched literally, so a
/// whitespace-only query only keeps candidates whose name or a skill contains
/// that whitespace. Input order is preserved.
pub fn filter<'a, I>(candidates: I, query: &str) -> Vec<&'a Candidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    if query.is_empty() {
        return candidates.into_iter().collect();
    }
    let needle = query.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| matches_query(c, &needle))
        .collect()
}

/// `needle` must already be lowercased.
fn matches_query(candidate: &Candidate, needle: &str) -> bool {
    candidate.name().to_lowercase().contains(needle)
        || candidate
            .skills()
            .iter()
            .any(|s| s.to_lowercase().contains(needle))
}
