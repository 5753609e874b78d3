use crate::config::toml_config::OnboardingConfig;
use crate::domain::model::DraftProfile;
use crate::domain::ports::{ProfileRecognizer, ProgressReporter};
use crate::utils::error::{Result, SkillScapeError};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedOutcome {
    Draft(DraftProfile),
    RecognitionError(String),
    PermissionDenied,
}

/// Timer-driven stand-in for speech recognition.
///
/// Advances progress by `step` every `tick` until it reaches 100, waits
/// `settle`, then yields the configured outcome. No audio is analysed.
#[derive(Debug, Clone)]
pub struct SimulatedRecognizer {
    tick: Duration,
    step: u8,
    settle: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedRecognizer {
    pub fn new(tick: Duration, step: u8, settle: Duration) -> Self {
        Self {
            tick,
            step: step.max(1),
            settle,
            outcome: SimulatedOutcome::Draft(canned_draft()),
        }
    }

    pub fn from_config(config: &OnboardingConfig) -> Self {
        Self::new(
            Duration::from_millis(config.tick_millis),
            config.progress_step,
            Duration::from_millis(config.settle_millis),
        )
    }

    pub fn with_outcome(mut self, outcome: SimulatedOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_draft(self, draft: DraftProfile) -> Self {
        self.with_outcome(SimulatedOutcome::Draft(draft))
    }
}

impl Default for SimulatedRecognizer {
    fn default() -> Self {
        Self::from_config(&OnboardingConfig::default())
    }
}

#[async_trait]
impl ProfileRecognizer for SimulatedRecognizer {
    async fn recognize(&self, progress: &ProgressReporter) -> Result<DraftProfile> {
        if self.outcome == SimulatedOutcome::PermissionDenied {
            return Err(SkillScapeError::PermissionDenied);
        }

        let mut percent = progress.current();
        while percent < 100 {
            tokio::time::sleep(self.tick).await;
            percent = percent.saturating_add(self.step).min(100);
            progress.report(percent);
            tracing::debug!("Processing voice input: {}%", percent);
        }
        tokio::time::sleep(self.settle).await;

        match &self.outcome {
            SimulatedOutcome::Draft(draft) => Ok(draft.clone()),
            SimulatedOutcome::RecognitionError(message) => Err(SkillScapeError::RecognitionFailed {
                message: message.clone(),
            }),
            SimulatedOutcome::PermissionDenied => Err(SkillScapeError::PermissionDenied),
        }
    }
}

/// The fixed profile every simulated recording produces.
pub fn canned_draft() -> DraftProfile {
    DraftProfile {
        name: "Alex Johnson".to_string(),
        skills: vec!["Plumbing".to_string(), "Electrical".to_string()],
        about: "I have 5 years of experience as a home maintenance professional, specializing in plumbing and electrical work.".to_string(),
        location: "Brooklyn, NY".to_string(),
        hourly_rate: "35".to_string(),
        avatar: String::new(),
    }
}
