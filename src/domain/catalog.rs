//! The read-only provider catalog.
//!
//! A [`Catalog`] is built once at start-up, either from the bundled sample
//! providers or from a JSON array file, and is never mutated afterwards.

use crate::domain::model::{Profile, ProfileId, Review, Skill, SkillLevel};
use crate::utils::error::{Result, SkillScapeError};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    profiles: Vec<Profile>,
}

impl Catalog {
    pub fn new(profiles: Vec<Profile>) -> Result<Self> {
        validate_profiles(&profiles)?;
        Ok(Self { profiles })
    }

    /// The six bundled New York providers.
    pub fn sample() -> Self {
        Self {
            profiles: sample_profiles(),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let profiles: Vec<Profile> = serde_json::from_str(content)?;
        Self::new(profiles)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded {} profiles from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn require(&self, id: ProfileId) -> Result<&Profile> {
        self.get(id).ok_or(SkillScapeError::UnknownProfile { id })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Distinct skill names in first-seen order, as offered in the filter sheet.
    pub fn skill_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.profiles
            .iter()
            .flat_map(|p| p.skill_names())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

fn validate_profiles(profiles: &[Profile]) -> Result<()> {
    let mut ids = HashSet::new();
    for profile in profiles {
        let invalid = |message: String| SkillScapeError::CatalogError {
            message: format!("profile {}: {}", profile.id, message),
        };

        if !ids.insert(profile.id) {
            return Err(invalid("duplicate id".to_string()));
        }
        if profile.skills.is_empty() {
            return Err(invalid("must list at least one skill".to_string()));
        }
        if !(0.0..=5.0).contains(&profile.rating) {
            return Err(invalid(format!("rating {} outside 0..=5", profile.rating)));
        }
        if let Some(skill) = profile
            .skills
            .iter()
            .find(|s| !(s.hourly_rate.is_finite() && s.hourly_rate > 0.0))
        {
            return Err(invalid(format!(
                "skill '{}' has non-positive hourly rate",
                skill.name
            )));
        }
        if let Some(review) = profile
            .review_details
            .iter()
            .find(|r| !(1..=5).contains(&r.rating))
        {
            return Err(invalid(format!(
                "review by {} has rating {} outside 1..=5",
                review.author, review.rating
            )));
        }
    }
    Ok(())
}

fn skill(name: &str, level: SkillLevel, hourly_rate: f64) -> Skill {
    Skill {
        name: name.to_string(),
        level,
        hourly_rate,
    }
}

fn review(author: &str, rating: u8, text: &str) -> Review {
    Review {
        author: author.to_string(),
        rating,
        text: text.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn profile(
    id: ProfileId,
    name: &str,
    skills: Vec<Skill>,
    rating: f64,
    reviews: u32,
    is_available: bool,
    location: &str,
    about: &str,
    review_details: Vec<Review>,
) -> Profile {
    Profile {
        id,
        name: name.to_string(),
        avatar: None,
        skills,
        rating,
        reviews,
        is_available,
        location: location.to_string(),
        about: about.to_string(),
        review_details,
    }
}

fn sample_profiles() -> Vec<Profile> {
    use SkillLevel::{Advanced, Expert};

    vec![
        profile(
            1,
            "Alex Johnson",
            vec![skill("Plumbing", Expert, 45.0), skill("Electrical", Advanced, 40.0)],
            4.8,
            24,
            true,
            "Brooklyn, NY",
            "I have 5 years of experience as a home maintenance professional, specializing in plumbing and electrical work.",
            vec![
                review("Maria Garcia", 5, "Alex did an excellent job fixing our sink. Very professional and knowledgeable."),
                review("James Wilson", 5, "Quick response and great workmanship. Will definitely hire again for electrical work."),
            ],
        ),
        profile(
            2,
            "Maya Rodriguez",
            vec![skill("Gardening", Expert, 35.0), skill("Landscaping", Expert, 50.0)],
            4.9,
            31,
            true,
            "Queens, NY",
            "Professional gardener with over 8 years of experience. I specialize in organic gardening, landscaping design, and plant care.",
            vec![
                review("Thomas Lee", 5, "Maya transformed our backyard into a beautiful garden. She has amazing vision and knowledge about plants."),
                review("Sarah Johnson", 5, "Very reliable and thorough. Maya took care of our garden while we were away and everything looked perfect when we returned."),
            ],
        ),
        profile(
            3,
            "David Kim",
            vec![skill("Carpentry", Expert, 55.0), skill("Furniture Assembly", Advanced, 40.0)],
            4.7,
            18,
            false,
            "Manhattan, NY",
            "Master carpenter with a keen eye for detail. Specializing in custom furniture, cabinets, and woodworking projects of all sizes.",
            vec![
                review("Emily Chen", 5, "David built custom bookshelves for my apartment and they are absolutely perfect. Great craftsmanship!"),
                review("Michael Brown", 4, "Very skilled carpenter. The work took a bit longer than expected but the quality was worth the wait."),
            ],
        ),
        profile(
            4,
            "Sophia Martinez",
            vec![skill("Cleaning", Advanced, 30.0), skill("Organization", Expert, 35.0)],
            4.9,
            42,
            true,
            "Bronx, NY",
            "Professional cleaner and organizer. I help transform cluttered spaces into clean, organized environments.",
            vec![
                review("Robert Johnson", 5, "Sophia is a cleaning wizard! My apartment has never looked so spotless."),
                review("Jennifer Wilson", 5, "Incredible organizer. Sophia helped me declutter my entire home and set up systems to keep everything in order."),
            ],
        ),
        profile(
            5,
            "James Wilson",
            vec![skill("Painting", Expert, 40.0), skill("Drywall Repair", Advanced, 45.0)],
            4.6,
            15,
            false,
            "Staten Island, NY",
            "Professional painter with expertise in interior and exterior painting, color consultation, and drywall repair.",
            vec![
                review("Lisa Thompson", 5, "James painted our entire house and did an amazing job. Clean lines, no mess, and finished on schedule."),
                review("Daniel Garcia", 4, "Great painter and very knowledgeable about different paint types and finishes."),
            ],
        ),
        profile(
            6,
            "Emma Davis",
            vec![skill("Cooking", Expert, 40.0), skill("Baking", Expert, 45.0)],
            5.0,
            27,
            true,
            "Brooklyn, NY",
            "Personal chef with culinary school training. I specialize in healthy meal prep, special occasions, and dietary-specific cooking.",
            vec![
                review("William Chen", 5, "Emma prepared a dinner party for 8 people at our home and the food was exceptional. Everyone was impressed!"),
                review("Jessica Miller", 5, "We hired Emma for weekly meal prep and it has been life-changing. Delicious, healthy meals and great variety."),
            ],
        ),
    ]
}
