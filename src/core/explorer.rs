//! Map-page session state.
//!
//! [`Explorer`] owns the one copy of the filter criteria and the selection.
//! The marker layer, the services list and the search dropdown all read the
//! same filtered view from it. Location searches only move the map; they
//! never touch criteria or selection.
//!
//! A search is split in two: [`Explorer::begin_location_search`] hands out a
//! [`LocationLookup`] that owns its own handle on the resolver, so the
//! explorer stays free for filtering and selection while the request is in
//! flight. [`Explorer::apply_location`] then moves the map with the outcome.

use crate::config::toml_config::MapConfig;
use crate::core::filter::filter;
use crate::core::markers::{place_markers, CoordinateTable};
use crate::core::selection::Selection;
use crate::domain::catalog::Catalog;
use crate::domain::model::{
    Coordinates, FilterCriteria, Marker, Notification, Profile, ProfileId, ResolvedLocation,
};
use crate::domain::ports::{LocationResolver, MapHandle, Notifier};
use crate::utils::error::Result;
use std::sync::Arc;

/// A pending geocoding request, detached from the explorer that started it.
pub struct LocationLookup<R: LocationResolver> {
    resolver: Arc<R>,
    query: String,
}

impl<R: LocationResolver> LocationLookup<R> {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn resolve(self) -> Result<ResolvedLocation> {
        self.resolver.resolve(&self.query).await
    }
}

pub struct Explorer<R: LocationResolver, M: MapHandle, N: Notifier> {
    catalog: Catalog,
    coordinates: CoordinateTable,
    criteria: FilterCriteria,
    selection: Selection,
    resolver: Arc<R>,
    map: M,
    notifier: N,
    center: Coordinates,
    zoom: f64,
}

impl<R: LocationResolver, M: MapHandle, N: Notifier> Explorer<R, M, N> {
    pub fn new(
        catalog: Catalog,
        coordinates: CoordinateTable,
        resolver: R,
        map: M,
        notifier: N,
        config: &MapConfig,
    ) -> Self {
        let mut explorer = Self {
            catalog,
            coordinates,
            criteria: FilterCriteria::default(),
            selection: Selection::new(),
            resolver: Arc::new(resolver),
            map,
            notifier,
            center: config.center_coordinates(),
            zoom: config.zoom,
        };
        explorer.refresh_markers();
        explorer
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Profiles passing the current criteria, in catalog order.
    pub fn filtered(&self) -> Vec<&Profile> {
        filter(self.catalog.profiles(), &self.criteria)
    }

    pub fn markers(&self) -> Vec<Marker> {
        place_markers(&self.filtered(), &self.coordinates, self.center)
    }

    fn refresh_markers(&mut self) {
        let markers = self.markers();
        tracing::debug!("Showing {} markers", markers.len());
        self.map.show_markers(&markers);
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh_markers();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.refresh_markers();
    }

    pub fn toggle_skill(&mut self, skill: &str) -> bool {
        let selected = self.criteria.toggle_skill(skill);
        self.refresh_markers();
        selected
    }

    pub fn set_availability_only(&mut self, only: bool) {
        self.criteria.availability_only = only;
        self.refresh_markers();
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.refresh_markers();
    }

    pub fn selected(&self) -> Option<&Profile> {
        self.selection.resolve(&self.catalog)
    }

    /// Selects from the services list or search dropdown.
    pub fn select(&mut self, id: ProfileId) -> Result<&Profile> {
        let profile = self.catalog.require(id)?;
        if let Some(previous) = self.selection.select(id) {
            tracing::debug!("Selection {} replaced by {}", previous, id);
        }
        Ok(profile)
    }

    /// Marker clicks only count for markers currently on the map.
    pub fn click_marker(&mut self, id: ProfileId) -> Option<&Profile> {
        if !self.filtered().iter().any(|p| p.id == id) {
            tracing::debug!("Ignoring click on hidden marker {}", id);
            return None;
        }
        self.selection.select(id);
        self.selection.resolve(&self.catalog)
    }

    pub fn click_empty_map(&mut self) {
        self.selection.clear();
    }

    pub fn close_detail(&mut self) {
        self.selection.clear();
    }

    /// Starts a location search without holding on to the explorer.
    ///
    /// Blank queries are ignored and yield `None`.
    pub fn begin_location_search(&self, query: &str) -> Option<LocationLookup<R>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(LocationLookup {
            resolver: Arc::clone(&self.resolver),
            query: query.to_string(),
        })
    }

    /// Moves the map to a resolved location, or reports why it could not.
    ///
    /// Failures keep the previous view. Criteria and selection are untouched
    /// either way.
    pub fn apply_location(
        &mut self,
        query: &str,
        result: Result<ResolvedLocation>,
    ) -> Result<ResolvedLocation> {
        match result {
            Ok(location) => {
                self.map.fly_to(location.coordinates, self.zoom);
                tracing::info!(
                    "📍 Moved map to {} ({})",
                    location.display_name,
                    location.coordinates
                );
                self.notifier.notify(Notification::info(
                    "Location updated",
                    format!("Moved to {}", location.display_name),
                ));
                Ok(location)
            }
            Err(e) => {
                tracing::warn!("Location search for '{}' failed: {}", query, e);
                self.notifier.notify(Notification::error(
                    "Location search failed",
                    e.user_friendly_message(),
                ));
                Err(e)
            }
        }
    }

    /// Resolves `query` and flies the map there in one step.
    pub async fn search_location(&mut self, query: &str) -> Result<Option<ResolvedLocation>> {
        let Some(lookup) = self.begin_location_search(query) else {
            return Ok(None);
        };
        let query = lookup.query().to_string();
        let result = lookup.resolve().await;
        self.apply_location(&query, result).map(Some)
    }

    /// Flies to the device position when the map can provide one.
    pub fn locate(&mut self) -> Option<Coordinates> {
        match self.map.locate() {
            Some(position) => {
                self.map.fly_to(position, self.zoom);
                Some(position)
            }
            None => {
                self.notifier.notify(Notification::error(
                    "Location unavailable",
                    "Couldn't determine your current position",
                ));
                None
            }
        }
    }

    pub fn zoom_in(&mut self) {
        self.map.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.map.zoom_out();
    }
}
