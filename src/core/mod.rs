pub mod explorer;
pub mod filter;
pub mod markers;
pub mod onboarding;
pub mod selection;

pub use crate::domain::catalog::Catalog;
pub use crate::domain::model::{
    Coordinates, DraftField, DraftProfile, FilterCriteria, Marker, Notification, Profile,
    ProfileId, ResolvedLocation,
};
pub use crate::domain::ports::{LocationResolver, MapHandle, Notifier, ProfileRecognizer};
pub use crate::utils::error::Result;
