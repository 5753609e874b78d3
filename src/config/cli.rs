use crate::config::toml_config::AppConfig;
use crate::domain::catalog::Catalog;
use crate::domain::model::{DraftField, FilterCriteria, ProfileId};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "skillscape")]
#[command(about = "Browse, search and onboard local service providers")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON catalog to use instead of the bundled providers
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Geocoding access token (overrides the config file)
    #[arg(long, env = "MAPBOX_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List providers matching the filters
    Search(FilterArgs),
    /// List every skill tag in the catalog
    Skills,
    /// Show one provider's detail card
    Show { id: ProfileId },
    /// Print map marker positions for the matching providers
    Markers(FilterArgs),
    /// Resolve a place name and move the map there
    Locate { place: String },
    /// Run the simulated voice onboarding flow
    Onboard(OnboardArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Free-text search over names and skills
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Skill tag to filter by (repeatable, matches any)
    #[arg(short, long = "skill")]
    pub skills: Vec<String>,

    /// Only show providers available now
    #[arg(short, long)]
    pub available: bool,
}

impl FilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new()
            .with_search_term(self.query.clone())
            .available_only(self.available);
        for skill in &self.skills {
            criteria = criteria.with_skill(skill.clone());
        }
        criteria
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct OnboardArgs {
    /// Replace the recognized name before submitting
    #[arg(long)]
    pub name: Option<String>,

    /// Replace the recognized skills (repeatable)
    #[arg(long = "skill")]
    pub skills: Vec<String>,

    #[arg(long)]
    pub about: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub rate: Option<String>,

    /// Simulate a recognition failure
    #[arg(long)]
    pub fail: bool,
}

impl OnboardArgs {
    /// Field edits to apply to the recognized draft.
    pub fn field_edits(&self) -> Vec<(DraftField, String)> {
        [
            (DraftField::Name, &self.name),
            (DraftField::About, &self.about),
            (DraftField::Location, &self.location),
            (DraftField::HourlyRate, &self.rate),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}

impl CliConfig {
    /// File configuration with command-line overrides applied.
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(path) = &self.catalog {
            config.catalog.path = Some(path.clone());
        }
        if let Some(token) = &self.access_token {
            config.geocoding.access_token = Some(token.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn load_catalog(config: &AppConfig) -> Result<Catalog> {
    match &config.catalog.path {
        Some(path) => Catalog::from_json_file(path),
        None => Ok(Catalog::sample()),
    }
}
