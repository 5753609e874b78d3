//! Voice onboarding state machine.
//!
//! ```text
//! Idle -> Recording -> Processing -> Draft -> Submitted
//!            ^                         |
//!            +------ re-record --------+
//! ```
//!
//! Recognition failures from `Recording` or `Processing` fall back to `Idle`.
//! [`OnboardingFlow`] is the pure machine; [`OnboardingSession`] drives it
//! with a [`ProfileRecognizer`] and reports outcomes through a [`Notifier`].

use crate::domain::model::{DraftField, DraftProfile, Notification};
use crate::domain::ports::{Notifier, ProfileRecognizer, ProgressReporter};
use crate::utils::error::{Result, SkillScapeError};
use std::fmt;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OnboardingState {
    #[default]
    Idle,
    Recording,
    Processing,
    Draft(DraftProfile),
    Submitted(DraftProfile),
}

impl OnboardingState {
    pub fn name(&self) -> &'static str {
        match self {
            OnboardingState::Idle => "idle",
            OnboardingState::Recording => "recording",
            OnboardingState::Processing => "processing",
            OnboardingState::Draft(_) => "draft",
            OnboardingState::Submitted(_) => "submitted",
        }
    }
}

impl fmt::Display for OnboardingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default)]
pub struct OnboardingFlow {
    state: OnboardingState,
    progress: u8,
    last_error: Option<String>,
}

impl OnboardingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OnboardingState {
        &self.state
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn draft(&self) -> Option<&DraftProfile> {
        match &self.state {
            OnboardingState::Draft(draft) | OnboardingState::Submitted(draft) => Some(draft),
            _ => None,
        }
    }

    /// The record control is disabled while a recording is being processed.
    pub fn can_toggle_record(&self) -> bool {
        matches!(
            self.state,
            OnboardingState::Idle | OnboardingState::Recording
        )
    }

    fn invalid(&self, action: &str) -> SkillScapeError {
        SkillScapeError::InvalidTransition {
            from: self.state.name().to_string(),
            action: action.to_string(),
        }
    }

    fn transition(&mut self, next: OnboardingState) {
        tracing::debug!("Onboarding {} -> {}", self.state, next);
        self.state = next;
    }

    pub fn start_recording(&mut self) -> Result<()> {
        if self.state != OnboardingState::Idle {
            return Err(self.invalid("start recording"));
        }
        self.last_error = None;
        self.progress = 0;
        self.transition(OnboardingState::Recording);
        Ok(())
    }

    pub fn stop_recording(&mut self) -> Result<()> {
        if self.state != OnboardingState::Recording {
            return Err(self.invalid("stop recording"));
        }
        self.progress = 0;
        self.transition(OnboardingState::Processing);
        Ok(())
    }

    /// Single record button: starts when idle, stops when recording.
    pub fn toggle_record(&mut self) -> Result<()> {
        match self.state {
            OnboardingState::Idle => self.start_recording(),
            OnboardingState::Recording => self.stop_recording(),
            _ => Err(self.invalid("toggle recording")),
        }
    }

    pub fn report_progress(&mut self, percent: u8) -> Result<()> {
        if self.state != OnboardingState::Processing {
            return Err(self.invalid("report progress"));
        }
        self.progress = self.progress.max(percent.min(100));
        Ok(())
    }

    pub fn complete(&mut self, draft: DraftProfile) -> Result<()> {
        if self.state != OnboardingState::Processing {
            return Err(self.invalid("complete processing"));
        }
        self.progress = 100;
        self.transition(OnboardingState::Draft(draft));
        Ok(())
    }

    pub fn fail(&mut self, error: &SkillScapeError) -> Result<()> {
        if !matches!(
            self.state,
            OnboardingState::Recording | OnboardingState::Processing
        ) {
            return Err(self.invalid("fail recognition"));
        }
        tracing::warn!("Onboarding recognition failed: {}", error);
        self.last_error = Some(error.to_string());
        self.progress = 0;
        self.transition(OnboardingState::Idle);
        Ok(())
    }

    /// Discards the draft and goes straight back to recording.
    pub fn rerecord(&mut self) -> Result<()> {
        if !matches!(self.state, OnboardingState::Draft(_)) {
            return Err(self.invalid("re-record"));
        }
        self.progress = 0;
        self.transition(OnboardingState::Recording);
        Ok(())
    }

    /// Leaves the flow while recording or processing. Returns whether anything was dropped.
    pub fn abandon(&mut self) -> bool {
        match self.state {
            OnboardingState::Recording | OnboardingState::Processing => {
                self.progress = 0;
                self.transition(OnboardingState::Idle);
                true
            }
            _ => false,
        }
    }

    fn draft_mut(&mut self, action: &str) -> Result<&mut DraftProfile> {
        let from = self.state.name();
        match &mut self.state {
            OnboardingState::Draft(draft) => Ok(draft),
            _ => Err(SkillScapeError::InvalidTransition {
                from: from.to_string(),
                action: action.to_string(),
            }),
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        let draft = self.draft_mut("edit the draft")?;
        let value = value.into();
        match field {
            DraftField::Name => draft.name = value,
            DraftField::About => draft.about = value,
            DraftField::Location => draft.location = value,
            DraftField::HourlyRate => draft.hourly_rate = value,
            DraftField::Avatar => draft.avatar = value,
        }
        Ok(())
    }

    pub fn set_skill(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let draft = self.draft_mut("edit a skill")?;
        let slot = draft
            .skills
            .get_mut(index)
            .ok_or_else(|| SkillScapeError::InvalidTransition {
                from: "draft".to_string(),
                action: format!("edit missing skill slot {}", index),
            })?;
        *slot = value.into();
        Ok(())
    }

    /// Appends an empty skill slot and returns its index.
    pub fn add_skill_slot(&mut self) -> Result<usize> {
        let draft = self.draft_mut("add a skill")?;
        draft.skills.push(String::new());
        Ok(draft.skills.len() - 1)
    }

    /// Removes a slot; the last remaining slot is never removed.
    pub fn remove_skill_slot(&mut self, index: usize) -> Result<bool> {
        let draft = self.draft_mut("remove a skill")?;
        if draft.skills.len() <= 1 || index >= draft.skills.len() {
            return Ok(false);
        }
        draft.skills.remove(index);
        Ok(true)
    }

    /// Validates the draft and ends the flow. Nothing is written to the catalog.
    pub fn submit(&mut self) -> Result<&DraftProfile> {
        let cleaned = match &self.state {
            OnboardingState::Draft(draft) => validate_draft(draft)?,
            _ => return Err(self.invalid("submit")),
        };
        self.transition(OnboardingState::Submitted(cleaned));
        self.draft().ok_or_else(|| self.invalid("read the submitted draft"))
    }
}

/// Checks required fields and returns a trimmed copy without blank skill slots.
pub fn validate_draft(draft: &DraftProfile) -> Result<DraftProfile> {
    let mut missing = Vec::new();

    let name = draft.name.trim();
    if name.is_empty() {
        missing.push("name");
    }
    let skills: Vec<String> = draft
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if skills.is_empty() {
        missing.push("skills");
    }
    let about = draft.about.trim();
    if about.is_empty() {
        missing.push("about");
    }
    let location = draft.location.trim();
    if location.is_empty() {
        missing.push("location");
    }
    let rate = draft.hourly_rate.trim();
    match rate.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => {}
        _ => missing.push("hourlyRate"),
    }

    if !missing.is_empty() {
        return Err(SkillScapeError::ValidationGap {
            fields: missing.into_iter().map(str::to_string).collect(),
        });
    }

    Ok(DraftProfile {
        name: name.to_string(),
        skills,
        about: about.to_string(),
        location: location.to_string(),
        hourly_rate: rate.to_string(),
        avatar: draft.avatar.trim().to_string(),
    })
}

pub struct OnboardingSession<R: ProfileRecognizer, N: Notifier> {
    flow: OnboardingFlow,
    recognizer: R,
    notifier: N,
    reporter: ProgressReporter,
}

impl<R: ProfileRecognizer, N: Notifier> OnboardingSession<R, N> {
    pub fn new(recognizer: R, notifier: N) -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            flow: OnboardingFlow::new(),
            recognizer,
            notifier,
            reporter: ProgressReporter::new(tx),
        }
    }

    pub fn flow(&self) -> &OnboardingFlow {
        &self.flow
    }

    /// Draft editing goes straight to the machine.
    pub fn flow_mut(&mut self) -> &mut OnboardingFlow {
        &mut self.flow
    }

    pub fn state(&self) -> &OnboardingState {
        self.flow.state()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn progress(&self) -> u8 {
        match self.flow.state() {
            OnboardingState::Processing => self.reporter.current(),
            _ => self.flow.progress(),
        }
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.reporter.subscribe()
    }

    pub fn start_recording(&mut self) -> Result<()> {
        self.flow.start_recording()
    }

    /// Stops recording and runs recognition to completion.
    ///
    /// Dropping the returned future abandons the pending result; call
    /// [`abandon`](Self::abandon) afterwards to return to idle.
    pub async fn finish_recording(&mut self) -> Result<&DraftProfile> {
        self.flow.stop_recording()?;
        self.reporter.reset();

        match self.recognizer.recognize(&self.reporter).await {
            Ok(draft) => {
                self.flow.report_progress(self.reporter.current())?;
                self.flow.complete(draft)?;
                tracing::info!("Voice profile draft ready");
                self.notifier.notify(Notification::info(
                    "Voice profile created!",
                    "We've generated your profile based on your voice input.",
                ));
                self.flow
                    .draft()
                    .ok_or_else(|| self.flow.invalid("read the draft"))
            }
            Err(e) => {
                self.flow.fail(&e)?;
                self.notifier.notify(Notification::error(
                    "Voice onboarding failed",
                    e.user_friendly_message(),
                ));
                Err(e)
            }
        }
    }

    pub fn rerecord(&mut self) -> Result<()> {
        self.flow.rerecord()?;
        self.reporter.reset();
        Ok(())
    }

    pub fn abandon(&mut self) -> bool {
        self.reporter.reset();
        self.flow.abandon()
    }

    pub fn submit(&mut self) -> Result<DraftProfile> {
        match self.flow.submit() {
            Ok(draft) => {
                let draft = draft.clone();
                tracing::info!("Profile submitted for {}", draft.name);
                self.notifier.notify(Notification::info(
                    "Profile submitted!",
                    "Your profile has been created successfully.",
                ));
                Ok(draft)
            }
            Err(e) => {
                if matches!(e, SkillScapeError::ValidationGap { .. }) {
                    self.notifier.notify(Notification::error(
                        e.user_friendly_message(),
                        e.recovery_suggestion(),
                    ));
                }
                Err(e)
            }
        }
    }
}
