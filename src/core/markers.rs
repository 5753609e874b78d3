use crate::domain::model::{Coordinates, Marker, Profile, ProfileId};
use std::collections::HashMap;

const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;
const FALLBACK_SPACING_DEGREES: f64 = 0.004;

/// Fixed per-profile marker positions.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    positions: HashMap<ProfileId, Coordinates>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions for the bundled sample providers, one per borough.
    pub fn sample() -> Self {
        [
            (1u32, Coordinates::new(-73.9442, 40.6782)),
            (2, Coordinates::new(-73.7949, 40.7282)),
            (3, Coordinates::new(-73.9712, 40.7831)),
            (4, Coordinates::new(-73.8648, 40.8448)),
            (5, Coordinates::new(-74.1502, 40.5795)),
            (6, Coordinates::new(-73.9571, 40.7081)),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, id: ProfileId, position: Coordinates) -> Option<Coordinates> {
        self.positions.insert(id, position)
    }

    pub fn get(&self, id: ProfileId) -> Option<Coordinates> {
        self.positions.get(&id).copied()
    }

    /// Table position, or a deterministic spot on a spiral around `center`.
    pub fn position_for(&self, id: ProfileId, center: Coordinates) -> Coordinates {
        self.get(id).unwrap_or_else(|| {
            tracing::debug!("No fixed position for profile {}, using spiral fallback", id);
            spiral_offset(id, center)
        })
    }
}

impl FromIterator<(ProfileId, Coordinates)> for CoordinateTable {
    fn from_iter<I: IntoIterator<Item = (ProfileId, Coordinates)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

fn spiral_offset(id: ProfileId, center: Coordinates) -> Coordinates {
    let n = f64::from(id) + 1.0;
    let radius = FALLBACK_SPACING_DEGREES * n.sqrt();
    let angle = n * GOLDEN_ANGLE;
    Coordinates::new(
        center.longitude + radius * angle.cos(),
        center.latitude + radius * angle.sin(),
    )
}

/// One marker per profile, in the order given.
pub fn place_markers(
    profiles: &[&Profile],
    table: &CoordinateTable,
    center: Coordinates,
) -> Vec<Marker> {
    profiles
        .iter()
        .map(|profile| Marker {
            profile_id: profile.id,
            position: table.position_for(profile.id, center),
        })
        .collect()
}
