// Adapters layer: concrete implementations of the domain ports (geocoding, map surface, notifications, voice).

pub mod geocoding;
pub mod map;
pub mod notify;
pub mod voice;

pub use geocoding::MapboxGeocoder;
pub use map::HeadlessMap;
pub use notify::{RecordingNotifier, TracingNotifier};
pub use voice::{SimulatedOutcome, SimulatedRecognizer};
