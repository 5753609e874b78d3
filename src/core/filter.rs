//! Catalog filtering.
//!
//! A profile passes when the free-text term, the selected skill tags and the
//! availability toggle all accept it. The output is always a subsequence of
//! the input in its original order.

use crate::domain::model::{FilterCriteria, Profile};

/// Filters `profiles` by `criteria`, borrowing the matches in catalog order.
pub fn filter<'a>(profiles: &'a [Profile], criteria: &FilterCriteria) -> Vec<&'a Profile> {
    let term = criteria.search_term.to_lowercase();
    profiles
        .iter()
        .filter(|profile| {
            matches_term(profile, &term)
                && matches_skills(profile, criteria)
                && matches_availability(profile, criteria)
        })
        .collect()
}

/// Like [`filter`], but accepts absent criteria as "no constraint".
pub fn filter_opt<'a>(profiles: &'a [Profile], criteria: Option<&FilterCriteria>) -> Vec<&'a Profile> {
    match criteria {
        Some(criteria) => filter(profiles, criteria),
        None => profiles.iter().collect(),
    }
}

pub fn filter_owned(profiles: &[Profile], criteria: &FilterCriteria) -> Vec<Profile> {
    filter(profiles, criteria).into_iter().cloned().collect()
}

/// `term` must already be lowercased. Only an empty term is unconstrained.
fn matches_term(profile: &Profile, term: &str) -> bool {
    term.is_empty()
        || profile.name.to_lowercase().contains(term)
        || profile
            .skill_names()
            .any(|name| name.to_lowercase().contains(term))
}

// 標籤比對維持大小寫敏感
fn matches_skills(profile: &Profile, criteria: &FilterCriteria) -> bool {
    criteria.selected_skills.is_empty()
        || profile
            .skill_names()
            .any(|name| criteria.selected_skills.contains(name))
}

fn matches_availability(profile: &Profile, criteria: &FilterCriteria) -> bool {
    !criteria.availability_only || profile.is_available
}
