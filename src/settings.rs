//! Session settings
//!
//! Plain JSON, persisted in LocalStorage on the web. Every field has a default,
//! so a partial document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::layer::FrameOrder;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Number of swarm objects chasing the pointer
    pub fn swarm_count(&self) -> usize {
        match self {
            QualityPreset::Low => 25,
            QualityPreset::Medium => 100,
            QualityPreset::High => 250,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 10,
            QualityPreset::Medium => 25,
            QualityPreset::High => 100,
        }
    }
}

/// Rendering surface size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: f32,
    pub height: f32,
    /// Resize the canvas to the window on startup (web only)
    pub fit_window: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            fit_window: true,
        }
    }
}

/// Image shared by the player and every swarm object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSettings {
    pub url: String,
    pub width: f32,
    pub height: f32,
}

impl Default for SpriteSettings {
    fn default() -> Self {
        Self {
            url: "images/icon_menu.png".to_string(),
            width: SPRITE_WIDTH,
            height: SPRITE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Particles spawned per tick while under the cap
    pub generation_rate: usize,
    /// Lifetime in seconds
    pub max_age: f32,
    pub radius: (i32, i32),
    pub velocity_x: (i32, i32),
    pub velocity_y: (i32, i32),
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            generation_rate: PARTICLES_PER_TICK,
            max_age: PARTICLE_MAX_AGE,
            radius: (1, 4),
            velocity_x: (-50, 50),
            velocity_y: (-50, 0),
        }
    }
}

/// One parallax layer, frames given as image urls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSettings {
    pub frames: Vec<String>,
    pub depth: f32,
    pub order: FrameOrder,
    pub foreground: bool,
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            depth: 1.0,
            order: FrameOrder::Random,
            foreground: false,
        }
    }
}

impl LayerSettings {
    fn new(frame: &str, depth: f32, foreground: bool) -> Self {
        Self {
            frames: vec![frame.to_string()],
            depth,
            foreground,
            ..Default::default()
        }
    }
}

/// Session settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Controls swarm size and particle cap
    pub quality: QualityPreset,
    /// Particle effects on/off
    pub particles_enabled: bool,

    pub viewport: ViewportSettings,
    pub sprite: SpriteSettings,
    /// Impulse pulling each swarm object toward the pointer every tick
    pub steering_impulse: f32,
    pub particles: ParticleSettings,

    /// Back to front; foreground layers are drawn over the swarm
    pub layers: Vec<LayerSettings>,
    pub layer_width: f32,
    pub layer_launch_scale: f32,

    /// Fixed seed for reproducible runs (clock-seeded when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles_enabled: true,

            viewport: ViewportSettings::default(),
            sprite: SpriteSettings::default(),
            steering_impulse: STEERING_IMPULSE,
            particles: ParticleSettings::default(),

            layers: vec![
                LayerSettings::new("images/5.png", 1.0, false),
                LayerSettings::new("images/2.png", 8.0, false),
                LayerSettings::new("images/1.png", 10.0, true),
            ],
            layer_width: LAYER_WIDTH,
            layer_launch_scale: LAYER_LAUNCH_SCALE,

            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn swarm_count(&self) -> usize {
        self.quality.swarm_count()
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles_enabled {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "parallax_swarm_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
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
    fn test_defaults_match_stock_scene() {
        let s = Settings::default();
        assert_eq!(s.swarm_count(), 100);
        assert_eq!(s.max_particles(), 25);
        assert_eq!(s.layers.len(), 3);
        assert!(s.layers[2].foreground);
        assert_eq!(s.layers[1].depth, 8.0);
    }

    #[test]
    fn test_partial_json_overrides() {
        let s = Settings::from_json(r#"{"quality":"High","viewport":{"width":640}}"#)
            .expect("valid settings");
        assert_eq!(s.quality, QualityPreset::High);
        assert_eq!(s.viewport.width, 640.0);
        assert_eq!(s.viewport.height, VIEWPORT_HEIGHT);
        assert_eq!(s.layers.len(), 3);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{\"quality\": 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_particles_disabled_caps_at_zero() {
        let mut s = Settings::from_preset(QualityPreset::High);
        assert_eq!(s.max_particles(), 100);
        s.particles_enabled = false;
        assert_eq!(s.max_particles(), 0);
    }

    #[test]
    fn test_frame_order_round_trips_lowercase() {
        let json = r#"{"layers":[{"frames":["a.png","b.png"],"order":"sequential"}]}"#;
        let s = Settings::from_json(json).expect("valid settings");
        assert_eq!(s.layers[0].order, FrameOrder::Sequential);
        assert!(s.to_json().expect("serializes").contains("\"sequential\""));
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }
}
