pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::AppConfig;
pub use self::core::{
    explorer::{Explorer, LocationLookup},
    filter::filter,
    markers::CoordinateTable,
    onboarding::{OnboardingFlow, OnboardingSession, OnboardingState},
    selection::Selection,
};
pub use domain::catalog::Catalog;
pub use utils::error::{Result, SkillScapeError};
