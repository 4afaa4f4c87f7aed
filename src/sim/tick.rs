//! Per-frame update and render
//!
//! One tick is: clear, update everything, then draw everything. Update always
//! finishes before the first draw call so a frame never shows partial state.

use glam::Vec2;

use super::state::SimulationState;
use crate::renderer::RenderSink;
use crate::vector;

/// Inputs sampled for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Last known pointer position in surface coordinates
    pub pointer: Option<Vec2>,
}

/// Clear the surface, advance by `elapsed` seconds and draw the result
pub fn tick(state: &mut SimulationState, input: &TickInput, elapsed: f32, sink: &mut dyn RenderSink) {
    sink.clear();
    update(state, input, elapsed);
    render(state, sink);
}

/// Advance the simulation by `elapsed` seconds
pub fn update(state: &mut SimulationState, input: &TickInput, elapsed: f32) {
    if let Some(pointer) = input.pointer {
        steer(state, pointer);
    }

    state.background.update(elapsed, &mut state.rng);
    state.player.integrate(elapsed);
    for obj in &mut state.swarm {
        obj.integrate(elapsed);
    }

    state.particles.spawn(&mut state.rng);
    let expired = state.particles.update(elapsed);
    if expired > 0 {
        log::trace!("{} particles expired", expired);
    }

    state.time += elapsed as f64;
}

/// Center the player on the pointer and pull every swarm object toward it
fn steer(state: &mut SimulationState, pointer: Vec2) {
    let player = &mut state.player;
    player.position = pointer - Vec2::new(player.width, player.height) / 2.0;

    for obj in &mut state.swarm {
        let dir = vector::direction(obj.position, pointer);
        obj.apply_impulse(dir, state.steering_impulse);
    }
}

/// Draw back layers, swarm, particles, player, then front layers
pub fn render(state: &SimulationState, sink: &mut dyn RenderSink) {
    state.background.render_back(sink);

    for obj in &state.swarm {
        sink.draw_image(state.sprite, obj.position.x, obj.position.y);
    }

    state.particles.render(sink);

    sink.draw_image(state.sprite, state.player.position.x, state.player.position.y);

    state.background.render_front(sink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetManifest, AssetTable, ImageHandle};
    use crate::renderer::{DrawCommand, DrawList};
    use crate::settings::{QualityPreset, Settings};

    fn state(seed: u64) -> SimulationState {
        let settings = Settings::from_preset(QualityPreset::Low);
        let assets = AssetTable::from_urls(AssetManifest::from_settings(&settings).urls());
        SimulationState::new(&settings, &assets, seed).expect("valid setup")
    }

    #[test]
    fn test_player_centers_on_pointer() {
        let mut s = state(1);
        let input = TickInput {
            pointer: Some(Vec2::new(300.0, 200.0)),
        };
        update(&mut s, &input, 0.016);
        assert_eq!(s.player.position, Vec2::new(281.5, 179.5));
    }

    #[test]
    fn test_player_is_clamped_near_edges() {
        let mut s = state(1);
        let input = TickInput {
            pointer: Some(Vec2::new(2.0, 539.0)),
        };
        update(&mut s, &input, 0.016);
        assert_eq!(s.player.position, Vec2::new(0.0, 540.0 - 41.0));
    }

    #[test]
    fn test_swarm_steers_toward_pointer() {
        let mut s = state(1);
        for obj in &mut s.swarm {
            obj.position = Vec2::new(100.0, 100.0);
        }
        let input = TickInput {
            pointer: Some(Vec2::new(400.0, 500.0)),
        };
        update(&mut s, &input, 0.1);

        // 10 along (0.6, 0.8)
        for obj in &s.swarm {
            assert!((obj.velocity - Vec2::new(6.0, 8.0)).length() < 1e-4);
            assert!((obj.position - Vec2::new(100.6, 100.8)).length() < 1e-4);
        }
    }

    #[test]
    fn test_no_pointer_no_steering() {
        let mut s = state(1);
        let before: Vec<Vec2> = s.swarm.iter().map(|e| e.position).collect();
        let player_before = s.player.position;

        update(&mut s, &TickInput::default(), 0.1);

        let after: Vec<Vec2> = s.swarm.iter().map(|e| e.position).collect();
        assert_eq!(before, after);
        assert_eq!(s.player.position, player_before);
        assert!(s.swarm.iter().all(|e| e.velocity == Vec2::ZERO));
    }

    #[test]
    fn test_particles_spawn_each_tick_until_cap() {
        let mut s = state(1);
        let cap = s.particles.config.max_particles;
        for i in 1..=cap + 5 {
            update(&mut s, &TickInput::default(), 0.01);
            assert_eq!(s.particles.len(), i.min(cap));
        }
    }

    #[test]
    fn test_render_order() {
        let mut s = state(1);
        s.particles.config.max_particles = 1;
        let mut list = DrawList::default();
        tick(&mut s, &TickInput::default(), 0.016, &mut list);

        let cmds = list.commands();
        assert_eq!(cmds[0], DrawCommand::Clear);

        let swarm = s.swarm.len();
        // frames 0 and 1 (two back layers, two images each)
        let back = &cmds[1..5];
        assert!(back.iter().all(|c| matches!(c, DrawCommand::Image { handle, .. } if *handle != s.sprite)));
        let sprites = &cmds[5..5 + swarm];
        assert!(sprites.iter().all(|c| matches!(c, DrawCommand::Image { handle, .. } if *handle == s.sprite)));
        assert!(matches!(cmds[5 + swarm], DrawCommand::Circle { .. }));
        assert!(matches!(cmds[6 + swarm], DrawCommand::Image { handle, .. } if handle == s.sprite));
        let front = &cmds[7 + swarm..];
        assert_eq!(front.len(), 2);
        assert!(front.iter().all(|c| matches!(c, DrawCommand::Image { handle: ImageHandle(3), .. })));
    }

    #[test]
    fn test_determinism() {
        let mut a = state(99999);
        let mut b = state(99999);

        let inputs = [
            TickInput {
                pointer: Some(Vec2::new(10.0, 10.0)),
            },
            TickInput::default(),
            TickInput {
                pointer: Some(Vec2::new(700.0, 300.0)),
            },
        ];
        for input in &inputs {
            update(&mut a, input, 0.016);
            update(&mut b, input, 0.016);
        }

        let pa: Vec<Vec2> = a.particles.particles().iter().map(|p| p.body.velocity).collect();
        let pb: Vec<Vec2> = b.particles.particles().iter().map(|p| p.body.velocity).collect();
        assert_eq!(pa, pb);
        let sa: Vec<Vec2> = a.swarm.iter().map(|e| e.position).collect();
        let sb: Vec<Vec2> = b.swarm.iter().map(|e| e.position).collect();
        assert_eq!(sa, sb);
    }
}
