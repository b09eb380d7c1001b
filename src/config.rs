//! Shadow tunables
//!
//! Fixed for a simulation's lifetime. Persisted as JSON in LocalStorage so the
//! look can be tweaked without a rebuild.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("preferred size must be a positive finite number, got {0}")]
    InvalidSize(f32),
    #[error("speed must be a non-negative finite number, got {0}")]
    InvalidSpeed(f32),
    #[error("trail needs a non-zero capacity and a positive ttl (capacity {capacity}, ttl {ttl})")]
    InvalidTrail { capacity: usize, ttl: f32 },
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Afterimage trail settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub enabled: bool,
    /// Maximum live afterimages
    pub capacity: usize,
    /// Seconds until an afterimage disappears
    pub ttl_secs: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_TRAIL_CAPACITY,
            ttl_secs: DEFAULT_TRAIL_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Preferred shadow edge length (pixels), capped to 60% of the container
    pub preferred_size: f32,
    /// Drift speed (pixels per second)
    pub speed: f32,
    pub trail: TrailConfig,

    // === DOM hooks ===
    /// Element the shadow bounces inside; `<body>` if nothing matches
    pub container_selector: String,
    pub shadow_class: String,
    pub trail_class: String,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            preferred_size: DEFAULT_PREFERRED_SIZE,
            speed: DEFAULT_SPEED,
            trail: TrailConfig::default(),

            container_selector: ".recall-app".to_string(),
            shadow_class: "dvd-shadow".to_string(),
            trail_class: "dvd-trail".to_string(),
        }
    }
}

impl ShadowConfig {
    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "dvd_shadow_settings";

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.preferred_size.is_finite() && self.preferred_size > 0.0) {
            return Err(ConfigError::InvalidSize(self.preferred_size));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        let ttl = self.trail.ttl_secs;
        if self.trail.capacity == 0 || !(ttl.is_finite() && ttl > 0.0) {
            return Err(ConfigError::InvalidTrail {
                capacity: self.trail.capacity,
                ttl,
            });
        }
        Ok(())
    }

    /// Parse and validate; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse stored settings, falling back to defaults when unusable
    pub fn from_stored(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(config)) => {
                log::info!("Loaded shadow settings from storage");
                config
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored shadow settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default shadow settings");
                Self::default()
            }
        }
    }

    /// Resolve stored settings; on first run the defaults are handed to `persist`
    /// so they show up in storage for editing. Unusable stored settings are
    /// left in place.
    pub fn load_or_seed(stored: Option<&str>, persist: impl FnOnce(&Self)) -> Self {
        let config = Self::from_stored(stored);
        if stored.is_none() {
            persist(&config);
        }
        config
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok())
            .flatten();
        Self::load_or_seed(stored.as_deref(), Self::save)
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                        log::info!("Shadow settings saved");
                    } else {
                        log::warn!("LocalStorage rejected shadow settings");
                    }
                }
                Err(e) => log::warn!("Could not serialize shadow settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_or_seed(None, Self::save)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ShadowConfig::default();
        assert_eq!(config.preferred_size, 380.0);
        assert_eq!(config.speed, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_size() {
        for size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = ShadowConfig {
                preferred_size: size,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidSize(_))));
        }
    }

    #[test]
    fn test_speed_zero_allowed_negative_rejected() {
        let still = ShadowConfig {
            speed: 0.0,
            ..Default::default()
        };
        assert!(still.validate().is_ok());

        let backwards = ShadowConfig {
            speed: -5.0,
            ..Default::default()
        };
        assert!(matches!(backwards.validate(), Err(ConfigError::InvalidSpeed(_))));
    }

    #[test]
    fn test_rejects_empty_trail() {
        let config = ShadowConfig {
            trail: TrailConfig {
                capacity: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTrail { .. })));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"speed": 80, "trail": {"enabled": false}}"#;
        let config = ShadowConfig::from_json(json).unwrap();
        assert_eq!(config.speed, 80.0);
        assert_eq!(config.preferred_size, 380.0);
        assert!(!config.trail.enabled);
        assert_eq!(config.trail.capacity, DEFAULT_TRAIL_CAPACITY);
        assert_eq!(config.container_selector, ".recall-app");
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ShadowConfig {
            preferred_size: 200.0,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(ShadowConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_stored_falls_back() {
        assert_eq!(ShadowConfig::from_stored(Some("not json")), ShadowConfig::default());
        assert_eq!(
            ShadowConfig::from_stored(Some(r#"{"preferred_size": -3}"#)),
            ShadowConfig::default()
        );
        assert_eq!(ShadowConfig::from_stored(None), ShadowConfig::default());
    }

    #[test]
    fn test_first_load_seeds_defaults() {
        let mut persisted = None;
        let config = ShadowConfig::load_or_seed(None, |c| persisted = Some(c.clone()));
        assert_eq!(config, ShadowConfig::default());
        assert_eq!(persisted, Some(ShadowConfig::default()));
    }

    #[test]
    fn test_existing_settings_not_rewritten() {
        let mut writes = 0;
        let config = ShadowConfig::load_or_seed(Some(r#"{"speed": 12}"#), |_| writes += 1);
        assert_eq!(config.speed, 12.0);

        // Broken settings fall back without clobbering what the user stored
        ShadowConfig::load_or_seed(Some("{"), |_| writes += 1);
        assert_eq!(writes, 0);
    }

    #[test]
    fn test_parse_error_variant() {
        assert!(matches!(ShadowConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
