use skillscape::adapters::voice::canned_draft;
use skillscape::adapters::{RecordingNotifier, SimulatedOutcome, SimulatedRecognizer};
use skillscape::domain::model::DraftField;
use skillscape::{OnboardingSession, OnboardingState, SkillScapeError};
use std::time::Duration;

fn fast_recognizer() -> SimulatedRecognizer {
    SimulatedRecognizer::new(Duration::from_millis(1), 5, Duration::from_millis(1))
}

fn new_session(
    recognizer: SimulatedRecognizer,
) -> (OnboardingSession<SimulatedRecognizer, RecordingNotifier>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    (OnboardingSession::new(recognizer, notifier.clone()), notifier)
}

#[tokio::test]
async fn test_start_stop_produces_populated_draft() {
    let (mut session, notifier) = new_session(fast_recognizer());
    assert_eq!(session.state(), &OnboardingState::Idle);

    session.start_recording().unwrap();
    assert_eq!(session.state(), &OnboardingState::Recording);

    let draft = session.finish_recording().await.unwrap().clone();
    assert!(!draft.name.is_empty());
    assert!(!draft.skills.is_empty());
    assert_eq!(draft, canned_draft());

    assert!(matches!(session.state(), OnboardingState::Draft(_)));
    assert_eq!(session.progress(), 100);
    assert_eq!(notifier.last().unwrap().title, "Voice profile created!");
}

#[tokio::test]
async fn test_edit_and_submit() {
    let (mut session, notifier) = new_session(fast_recognizer());
    session.start_recording().unwrap();
    session.finish_recording().await.unwrap();

    let flow = session.flow_mut();
    flow.set_field(DraftField::Name, "Rita Moreno").unwrap();
    let slot = flow.add_skill_slot().unwrap();
    flow.set_skill(slot, "Tiling").unwrap();
    flow.set_field(DraftField::HourlyRate, "42.5").unwrap();

    let submitted = session.submit().unwrap();
    assert_eq!(submitted.name, "Rita Moreno");
    assert_eq!(submitted.skills, vec!["Plumbing", "Electrical", "Tiling"]);
    assert!(matches!(session.state(), OnboardingState::Submitted(_)));
    assert_eq!(notifier.last().unwrap().title, "Profile submitted!");

    // 已送出後不能再送
    assert!(matches!(
        session.submit(),
        Err(SkillScapeError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn test_incomplete_draft_blocks_submission() {
    let (mut session, notifier) = new_session(fast_recognizer());
    session.start_recording().unwrap();
    session.finish_recording().await.unwrap();

    session.flow_mut().set_field(DraftField::About, "").unwrap();
    let err = session.submit().unwrap_err();

    assert!(matches!(err, SkillScapeError::ValidationGap { ref fields } if fields == &["about"]));
    assert!(matches!(session.state(), OnboardingState::Draft(_)));
    assert!(notifier.last().unwrap().is_error);
}

#[tokio::test]
async fn test_rerecord_returns_to_recording() {
    let (mut session, _notifier) = new_session(fast_recognizer());
    session.start_recording().unwrap();
    session.finish_recording().await.unwrap();

    session.rerecord().unwrap();
    assert_eq!(session.state(), &OnboardingState::Recording);
    assert_eq!(session.progress(), 0);

    session.finish_recording().await.unwrap();
    assert!(matches!(session.state(), OnboardingState::Draft(_)));
}

#[tokio::test]
async fn test_recognition_error_falls_back_to_idle() {
    let recognizer =
        fast_recognizer().with_outcome(SimulatedOutcome::RecognitionError("no speech".to_string()));
    let (mut session, notifier) = new_session(recognizer);

    session.start_recording().unwrap();
    let err = session.finish_recording().await.unwrap_err();

    assert!(matches!(err, SkillScapeError::RecognitionFailed { .. }));
    assert_eq!(session.state(), &OnboardingState::Idle);
    assert!(session.flow().last_error().unwrap().contains("no speech"));
    assert!(notifier.last().unwrap().is_error);

    // 失敗後可以重新開始錄音
    assert!(session.start_recording().is_ok());
}

#[tokio::test]
async fn test_permission_denied_falls_back_to_idle() {
    let recognizer = fast_recognizer().with_outcome(SimulatedOutcome::PermissionDenied);
    let (mut session, _notifier) = new_session(recognizer);

    session.start_recording().unwrap();
    let err = session.finish_recording().await.unwrap_err();
    assert!(matches!(err, SkillScapeError::PermissionDenied));
    assert_eq!(session.state(), &OnboardingState::Idle);
}

#[tokio::test]
async fn test_leaving_during_processing_abandons_result() {
    let slow = SimulatedRecognizer::new(Duration::from_secs(60), 5, Duration::ZERO);
    let (mut session, notifier) = new_session(slow);

    session.start_recording().unwrap();
    let pending = tokio::time::timeout(Duration::from_millis(20), session.finish_recording()).await;
    assert!(pending.is_err());

    assert_eq!(session.state(), &OnboardingState::Processing);
    assert!(!session.flow().can_toggle_record());

    assert!(session.abandon());
    assert_eq!(session.state(), &OnboardingState::Idle);
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn test_progress_can_be_observed() {
    let (mut session, _notifier) = new_session(fast_recognizer());
    let mut progress = session.subscribe_progress();

    session.start_recording().unwrap();
    let watcher = async {
        let mut last = 0;
        while progress.changed().await.is_ok() {
            last = *progress.borrow_and_update();
            if last >= 100 {
                break;
            }
        }
        last
    };

    let (result, last) = tokio::join!(session.finish_recording(), watcher);
    assert!(result.is_ok());
    assert_eq!(last, 100);
}
