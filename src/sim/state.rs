//! Simulation state and its construction
//!
//! Everything a tick reads or mutates lives in [`SimulationState`]. It is built
//! once, after assets are loaded, and only ever touched by the tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::background::Background;
use super::entity::{Entity, EntityConfig};
use super::layer::{Layer, LayerConfig};
use super::particles::{ParticleConfig, ParticleSystem};
use super::region::Region;
use crate::assets::{AssetTable, ImageHandle};
use crate::error::ConfigError;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub viewport: Region,
    /// Image drawn for the player and every swarm object
    pub sprite: ImageHandle,
    pub steering_impulse: f32,
    /// Follows the pointer
    pub player: Entity,
    /// Steered toward the pointer by impulses
    pub swarm: Vec<Entity>,
    pub particles: ParticleSystem,
    pub background: Background,
    /// Simulated seconds since creation
    pub time: f64,
}

impl SimulationState {
    pub fn new(settings: &Settings, assets: &AssetTable, seed: u64) -> Result<Self, ConfigError> {
        let vp = &settings.viewport;
        let viewport = Region::viewport(vp.width, vp.height);
        if viewport.is_empty() {
            return Err(ConfigError::EmptyViewport {
                width: vp.width,
                height: vp.height,
            });
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let sprite = assets.resolve(&settings.sprite.url)?;
        let (w, h) = (settings.sprite.width, settings.sprite.height);

        let player = Entity::new(EntityConfig {
            position: viewport.center(),
            width: w,
            height: h,
            bounds: viewport,
            ..Default::default()
        });

        let swarm = (0..settings.swarm_count())
            .map(|_| create_swarm_object(&mut rng, viewport, w, h))
            .collect();

        let particles = ParticleSystem::new(
            ParticleConfig {
                max_particles: settings.max_particles(),
                generation_rate: settings.particles.generation_rate,
                max_age: settings.particles.max_age,
                radius: settings.particles.radius,
                velocity_x: settings.particles.velocity_x,
                velocity_y: settings.particles.velocity_y,
                origin: None,
            },
            viewport,
        );

        let mut background = Background::default();
        for (index, layer) in settings.layers.iter().enumerate() {
            let frames = layer
                .frames
                .iter()
                .map(|url| assets.resolve(url))
                .collect::<Result<Vec<_>, _>>()?;
            let config = LayerConfig {
                frames,
                depth: layer.depth,
                order: layer.order,
                is_foreground: layer.foreground,
                width: settings.layer_width,
                ..Default::default()
            };
            let mut layer =
                Layer::new(config, viewport, &mut rng).ok_or(ConfigError::EmptyLayer { index })?;
            layer.launch(settings.layer_launch_scale);
            background.push_layer(layer);
        }

        log::info!(
            "Simulation created: seed {}, {} swarm objects, {} layers, viewport {}x{}",
            seed,
            settings.swarm_count(),
            background.layers().len(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            seed,
            rng,
            viewport,
            sprite,
            steering_impulse: settings.steering_impulse,
            player,
            swarm,
            particles,
            background,
            time: 0.0,
        })
    }
}

/// Swarm object at a random whole-pixel position fully inside `viewport`
fn create_swarm_object(rng: &mut Pcg32, viewport: Region, width: f32, height: f32) -> Entity {
    let max_x = (viewport.width - width).max(0.0) as i32;
    let max_y = (viewport.height - height).max(0.0) as i32;
    let position = Vec2::new(
        viewport.left + rng.random_range(0..=max_x) as f32,
        viewport.top + rng.random_range(0..=max_y) as f32,
    );
    Entity::new(EntityConfig {
        position,
        width,
        height,
        bounds: viewport,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetManifest;
    use crate::settings::{LayerSettings, QualityPreset};

    fn assets(settings: &Settings) -> AssetTable {
        AssetTable::from_urls(AssetManifest::from_settings(settings).urls())
    }

    #[test]
    fn test_new_state_from_defaults() {
        let settings = Settings::default();
        let state = SimulationState::new(&settings, &assets(&settings), 42).expect("valid setup");

        assert_eq!(state.swarm.len(), 100);
        assert_eq!(state.sprite, ImageHandle(0));
        assert_eq!(state.player.position, Vec2::new(480.0, 270.0));
        assert_eq!(state.background.layers().len(), 3);
        assert!(state.particles.is_empty());
        assert_eq!(state.particles.config.max_particles, 25);

        for obj in &state.swarm {
            assert!(obj.position.x >= 0.0 && obj.position.x <= 960.0 - 37.0);
            assert!(obj.position.y >= 0.0 && obj.position.y <= 540.0 - 41.0);
            assert_eq!(obj.position, obj.position.round());
        }

        let speeds: Vec<f32> = state
            .background
            .layers()
            .iter()
            .map(|l| l.body.velocity.x)
            .collect();
        assert_eq!(speeds, vec![-20.0, -160.0, -200.0]);
    }

    #[test]
    fn test_same_seed_same_swarm() {
        let settings = Settings::from_preset(QualityPreset::Low);
        let table = assets(&settings);
        let a = SimulationState::new(&settings, &table, 9).expect("valid setup");
        let b = SimulationState::new(&settings, &table, 9).expect("valid setup");
        let pa: Vec<Vec2> = a.swarm.iter().map(|e| e.position).collect();
        let pb: Vec<Vec2> = b.swarm.iter().map(|e| e.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_empty_viewport_rejected() {
        let mut settings = Settings::default();
        settings.viewport.width = 0.0;
        let err = SimulationState::new(&settings, &assets(&settings), 1).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyViewport { .. }));
    }

    #[test]
    fn test_layer_without_frames_rejected() {
        let mut settings = Settings::default();
        settings.layers.push(LayerSettings::default());
        let err = SimulationState::new(&settings, &assets(&settings), 1).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyLayer { index: 3 }));
    }

    #[test]
    fn test_missing_asset_rejected() {
        let settings = Settings::default();
        let err = SimulationState::new(&settings, &AssetTable::default(), 1).unwrap_err();
        assert!(matches!(err, ConfigError::MissingAsset(_)));
    }
}
