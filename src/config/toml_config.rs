use crate::domain::model::Coordinates;
use crate::utils::error::{Result, SkillScapeError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub map: MapConfig,
    pub geocoding: GeocodingConfig,
    pub onboarding: OnboardingConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [-73.9857, 40.7484],
            zoom: 13.0,
            min_zoom: 1.0,
            max_zoom: 20.0,
        }
    }
}

impl MapConfig {
    pub fn center_coordinates(&self) -> Coordinates {
        Coordinates::new(self.center[0], self.center[1])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODING_ENDPOINT.to_string(),
            access_token: None,
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    pub tick_millis: u64,
    pub progress_step: u8,
    pub settle_millis: u64,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            tick_millis: 200,
            progress_step: 5,
            settle_millis: 500,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SkillScapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SkillScapeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAPBOX_TOKEN})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SkillScapeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        let [longitude, latitude] = self.map.center;
        validate_range("map.center.longitude", longitude, -180.0, 180.0)?;
        validate_range("map.center.latitude", latitude, -90.0, 90.0)?;
        validate_range("map.min_zoom", self.map.min_zoom, 0.0, 24.0)?;
        validate_range("map.max_zoom", self.map.max_zoom, self.map.min_zoom, 24.0)?;
        validate_range("map.zoom", self.map.zoom, self.map.min_zoom, self.map.max_zoom)?;

        validate_url("geocoding.endpoint", &self.geocoding.endpoint)?;
        validate_positive_number("geocoding.timeout_seconds", self.geocoding.timeout_seconds, 1)?;
        if let Some(token) = &self.geocoding.access_token {
            if token.starts_with("${") {
                return Err(SkillScapeError::InvalidConfigValueError {
                    field: "geocoding.access_token".to_string(),
                    value: token.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
            validate_non_empty_string("geocoding.access_token", token)?;
        }

        validate_range("onboarding.progress_step", self.onboarding.progress_step, 1, 100)?;
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
