use crate::config::toml_config::MapConfig;
use crate::domain::model::{Coordinates, Marker};
use crate::domain::ports::MapHandle;

/// In-memory map surface: keeps camera and markers so callers can render or inspect them.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    center: Coordinates,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    device_position: Option<Coordinates>,
    markers: Vec<Marker>,
}

impl HeadlessMap {
    /// Builds the map from a possibly unvalidated config; inverted zoom bounds are swapped.
    pub fn new(config: &MapConfig) -> Self {
        let min_zoom = config.min_zoom.min(config.max_zoom);
        let max_zoom = config.min_zoom.max(config.max_zoom);
        Self {
            center: config.center_coordinates(),
            zoom: config.zoom.max(min_zoom).min(max_zoom),
            min_zoom,
            max_zoom,
            device_position: None,
            markers: Vec::new(),
        }
    }

    pub fn with_device_position(mut self, position: Coordinates) -> Self {
        self.device_position = Some(position);
        self
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(&MapConfig::default())
    }
}

impl MapHandle for HeadlessMap {
    fn fly_to(&mut self, center: Coordinates, zoom: f64) {
        self.center = center;
        self.zoom = zoom.max(self.min_zoom).min(self.max_zoom);
    }

    fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1.0).min(self.max_zoom);
    }

    fn zoom_out(&mut self) {
        self.zoom = (self.zoom - 1.0).max(self.min_zoom);
    }

    fn locate(&mut self) -> Option<Coordinates> {
        self.device_position
    }

    fn show_markers(&mut self, markers: &[Marker]) {
        self.markers = markers.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let config = MapConfig {
            zoom: 19.5,
            ..MapConfig::default()
        };
        let mut map = HeadlessMap::new(&config);
        map.zoom_in();
        map.zoom_in();
        assert_eq!(map.zoom(), 20.0);

        map.fly_to(Coordinates::new(0.0, 0.0), -3.0);
        assert_eq!(map.zoom(), 1.0);
        map.zoom_out();
        assert_eq!(map.zoom(), 1.0);
    }

    #[test]
    fn test_inverted_zoom_bounds_do_not_panic() {
        let config = MapConfig {
            min_zoom: 10.0,
            max_zoom: 5.0,
            ..MapConfig::default()
        };
        let mut map = HeadlessMap::new(&config);
        assert_eq!(map.zoom(), 10.0);

        map.fly_to(Coordinates::new(0.0, 0.0), 7.0);
        assert_eq!(map.zoom(), 7.0);
        map.fly_to(Coordinates::new(0.0, 0.0), 12.0);
        assert_eq!(map.zoom(), 10.0);
    }

    #[test]
    fn test_locate_without_device_position() {
        let mut map = HeadlessMap::default();
        assert_eq!(map.locate(), None);
        let mut map = map.with_device_position(Coordinates::new(-73.9, 40.7));
        assert_eq!(map.locate(), Some(Coordinates::new(-73.9, 40.7)));
    }
}
