use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub type ProfileId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub level: SkillLevel,
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub text: String,
}

/// A service provider listed in the catalog.
///
/// `reviews` is the advertised review count and is deliberately independent of
/// `review_details`, which only holds the reviews shown on the detail card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub avatar: Option<String>,
    pub skills: Vec<Skill>,
    pub rating: f64,
    pub reviews: u32,
    pub is_available: bool,
    pub location: String,
    pub about: String,
    #[serde(default)]
    pub review_details: Vec<Review>,
}

impl Profile {
    /// Avatar fallback text: the first two characters of the name.
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect()
    }

    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.name.as_str())
    }

    pub fn starting_rate(&self) -> Option<f64> {
        self.skills
            .iter()
            .map(|s| s.hourly_rate)
            .min_by(|a, b| a.total_cmp(b))
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Combined text / skill / availability constraint applied to the catalog.
///
/// Every field defaults to its "no constraint" value, so `null` or missing
/// fields in a serialized form never raise an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    #[serde(deserialize_with = "null_as_default")]
    pub search_term: String,
    #[serde(deserialize_with = "null_as_default")]
    pub selected_skills: BTreeSet<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub availability_only: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.selected_skills.insert(skill.into());
        self
    }

    pub fn available_only(mut self, only: bool) -> Self {
        self.availability_only = only;
        self
    }

    /// Adds the tag if absent, removes it otherwise. Returns whether the tag is now selected.
    pub fn toggle_skill(&mut self, skill: &str) -> bool {
        if self.selected_skills.remove(skill) {
            false
        } else {
            self.selected_skills.insert(skill.to_string());
            true
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty()
            && self.selected_skills.is_empty()
            && !self.availability_only
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.longitude, self.latitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub profile_id: ProfileId,
    pub position: Coordinates,
}

/// Editable scratch record produced by the onboarding flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftProfile {
    pub name: String,
    pub skills: Vec<String>,
    pub about: String,
    pub location: String,
    /// Kept as form text; parsed when the draft is submitted.
    pub hourly_rate: String,
    pub avatar: String,
}

impl Default for DraftProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            skills: vec![String::new()],
            about: String::new(),
            location: String::new(),
            hourly_rate: String::new(),
            avatar: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    About,
    Location,
    HourlyRate,
    Avatar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub is_error: bool,
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            is_error: false,
            issued_at: Utc::now(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::info(title, description)
        }
    }
}
