use crate::config::toml_config::GeocodingConfig;
use crate::domain::model::{Coordinates, ResolvedLocation};
use crate::domain::ports::LocationResolver;
use crate::utils::error::{Result, SkillScapeError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    center: [f64; 2],
    #[serde(default)]
    place_name: Option<String>,
}

/// Forward geocoding against a Mapbox-compatible `places` endpoint.
pub struct MapboxGeocoder {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl MapboxGeocoder {
    pub fn new(endpoint: impl Into<String>, access_token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        })
    }

    pub fn from_config(config: &GeocodingConfig) -> Result<Self> {
        let token = crate::utils::validation::validate_required_field(
            "geocoding.access_token",
            &config.access_token,
        )?;
        Self::new(
            config.endpoint.clone(),
            token.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// `{endpoint}/{query}.json?access_token=..&limit=1`, with the query as one path segment.
    pub fn request_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| SkillScapeError::InvalidConfigValueError {
            field: "geocoding.endpoint".to_string(),
            value: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|_| SkillScapeError::InvalidConfigValueError {
                field: "geocoding.endpoint".to_string(),
                value: self.endpoint.clone(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push(&format!("{}.json", query));
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", "1");
        Ok(url)
    }
}

#[async_trait]
impl LocationResolver for MapboxGeocoder {
    async fn resolve(&self, query: &str) -> Result<ResolvedLocation> {
        let url = self.request_url(query)?;
        tracing::debug!("Geocoding request for '{}'", query);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SkillScapeError::TransportFailure {
                message: format!("geocoding service answered {}", status),
            });
        }

        let body: GeocodingResponse =
            response
                .json()
                .await
                .map_err(|e| SkillScapeError::TransportFailure {
                    message: format!("unreadable geocoding response: {}", e),
                })?;

        let feature = body
            .features
            .into_iter()
            .next()
            .ok_or_else(|| SkillScapeError::LocationNotFound {
                query: query.to_string(),
            })?;

        let [longitude, latitude] = feature.center;
        Ok(ResolvedLocation {
            coordinates: Coordinates::new(longitude, latitude),
            display_name: feature.place_name.unwrap_or_else(|| query.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_query_as_segment() {
        let geocoder = MapboxGeocoder::new(
            "https://api.mapbox.com/geocoding/v5/mapbox.places",
            "pk.test",
            Duration::from_secs(5),
        )
        .unwrap();

        let url = geocoder.request_url("Queens, NY/5th").unwrap();
        assert_eq!(url.path(), "/geocoding/v5/mapbox.places/Queens,%20NY%2F5th.json");
        assert_eq!(url.query(), Some("access_token=pk.test&limit=1"));
    }

    #[test]
    fn test_trailing_slash_endpoint() {
        let geocoder =
            MapboxGeocoder::new("http://localhost:9000/places/", "t", Duration::from_secs(1)).unwrap();
        let url = geocoder.request_url("Bronx").unwrap();
        assert_eq!(url.path(), "/places/Bronx.json");
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let config = GeocodingConfig {
            access_token: None,
            ..GeocodingConfig::default()
        };
        let err = MapboxGeocoder::from_config(&config).err().unwrap();
        assert!(matches!(err, SkillScapeError::MissingConfigError { .. }));
    }
}
