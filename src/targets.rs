//! Instantaneous target resolution.
//!
//! Given the gesture state, the elapsed time and a particle's static layout,
//! these functions compute where the particle wants to be right now. They
//! never move anything - the interpolator owns motion - and they are pure, so
//! the same inputs always produce the same target.
//!
//! The three-state table:
//!
//! | state          | cone kinds               | ribbon kinds                  |
//! |----------------|--------------------------|-------------------------------|
//! | Closed         | home cone point          | spinning helix slot           |
//! | Open / Unknown | drifting scatter ring    | same, slot spread widely      |
//! | Pinch          | freeze + tiny jitter     | freeze + tiny jitter          |

use crate::gesture::GestureState;
use crate::kind::{KindParams, Tumble};
use crate::layout::ParticleLayout;
use crate::time::Tick;
use glam::Vec3;

/// Target in the formed (`Closed`) state.
///
/// Cone particles sit on their sampled home point; ribbon particles ride
/// their helix slot, rotated as a whole by the kind's spin speed.
#[inline]
pub fn formed_target(params: &KindParams, layout: &ParticleLayout, elapsed: f32) -> Vec3 {
    match layout.spiral {
        Some(desc) => desc.position(elapsed * params.spin),
        None => layout.home,
    }
}

/// Target in the scattered (`Open` / `Unknown`) state.
///
/// A slowly drifting ring: the particle's static slot angle plus a time term,
/// at the kind's scatter radius, with a per-particle vertical bob around the
/// home height.
#[inline]
pub fn scatter_target(params: &KindParams, layout: &ParticleLayout, elapsed: f32) -> Vec3 {
    let angle = layout.slot_angle + layout.angle_offset + elapsed * params.scatter_drift;
    let bob = (elapsed + layout.bob_phase).sin() * params.bob_amplitude;

    Vec3::new(
        angle.cos() * params.scatter_radius,
        layout.home.y + bob,
        angle.sin() * params.scatter_radius,
    )
}

/// Target in the settling (`Pinch`) state: the current position plus a
/// vertical jitter small enough to read as frozen.
#[inline]
pub fn settle_target(params: &KindParams, layout: &ParticleLayout, current: Vec3, elapsed: f32) -> Vec3 {
    let jitter = (params.jitter_speed * elapsed + layout.bob_phase).sin() * params.jitter_amplitude;
    current + Vec3::new(0.0, jitter, 0.0)
}

/// Dispatch into the state table. `Unknown` resolves exactly like `Open`.
#[inline]
pub fn resolve_target(
    params: &KindParams,
    layout: &ParticleLayout,
    current: Vec3,
    state: GestureState,
    elapsed: f32,
) -> Vec3 {
    match state {
        GestureState::Closed => formed_target(params, layout, elapsed),
        GestureState::Open | GestureState::Unknown => scatter_target(params, layout, elapsed),
        GestureState::Pinch => settle_target(params, layout, current, elapsed),
    }
}

/// Effective interpolation rate for this particle and state.
///
/// Pinch drops to the settle rate so the freeze reads as settling rather
/// than tracking.
#[inline]
pub fn resolve_rate(params: &KindParams, layout: &ParticleLayout, state: GestureState) -> f32 {
    let base = match state {
        GestureState::Pinch => params.settle_rate,
        _ => params.rate,
    };
    base * layout.speed_scale
}

/// Uniform scale for this tick. Pulsing kinds sweep around their base scale;
/// the pulse runs in every state.
#[inline]
pub fn resolve_scale(params: &KindParams, layout: &ParticleLayout, elapsed: f32) -> f32 {
    params.base_scale + (params.pulse_speed * elapsed + layout.bob_phase).sin() * params.pulse_amplitude
}

/// Emissive intensity for this tick. Blinking kinds sweep 0.5..=2.5; steady
/// kinds hold their constant glow.
#[inline]
pub fn resolve_glow(params: &KindParams, layout: &ParticleLayout, elapsed: f32) -> f32 {
    if layout.blink_speed > 0.0 {
        0.5 + (layout.blink_speed * elapsed + layout.blink_phase).sin().abs() * 2.0
    } else {
        params.glow
    }
}

/// Advance a particle's rotation by one tick according to the kind's policy.
#[inline]
pub fn advance_rotation(params: &KindParams, layout: &ParticleLayout, rotation: Vec3, tick: Tick) -> Vec3 {
    match params.tumble {
        Tumble::None => rotation,
        Tumble::Spin => rotation + Vec3::new(tick.delta, 0.0, tick.delta),
        Tumble::Swing => Vec3::new(
            rotation.x,
            rotation.y + tick.delta,
            (2.0 * tick.elapsed + layout.bob_phase).sin() * 0.2,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{EnsembleKind, Symbol};
    use crate::layout::{LayoutContext, ParticleLayout};

    fn sample(kind: EnsembleKind, slot: u32, total: u32) -> (KindParams, ParticleLayout) {
        let mut ctx = LayoutContext::new(11, slot, total);
        let (layout, _) = ParticleLayout::generate(kind, &mut ctx);
        (kind.params(), layout)
    }

    #[test]
    fn test_unknown_scatters_like_open() {
        let (params, layout) = sample(EnsembleKind::Body, 12, 100);
        let open = resolve_target(&params, &layout, Vec3::ZERO, GestureState::Open, 3.2);
        let unknown = resolve_target(&params, &layout, Vec3::ZERO, GestureState::Unknown, 3.2);
        assert_eq!(open, unknown);
    }

    #[test]
    fn test_formed_cone_target_is_home() {
        let (params, layout) = sample(EnsembleKind::Body, 5, 100);
        let target = formed_target(&params, &layout, 10.0);
        assert_eq!(target, layout.home);
    }

    #[test]
    fn test_formed_ribbon_target_spins() {
        let (params, layout) = sample(EnsembleKind::Lantern, 3, 10);
        let a = formed_target(&params, &layout, 0.0);
        let b = formed_target(&params, &layout, 1.0);
        assert_ne!(a, b);
        // Spin preserves height and radius.
        assert!((a.y - b.y).abs() < 1e-6);
        let ra = (a.x * a.x + a.z * a.z).sqrt();
        let rb = (b.x * b.x + b.z * b.z).sqrt();
        assert!((ra - rb).abs() < 1e-4);
    }

    #[test]
    fn test_scatter_target_on_ring() {
        let (params, layout) = sample(EnsembleKind::VolumeSparkle, 40, 400);
        let target = scatter_target(&params, &layout, 2.0);
        let planar = (target.x * target.x + target.z * target.z).sqrt();
        assert!((planar - params.scatter_radius).abs() < 1e-4);
        assert!((target.y - layout.home.y).abs() <= params.bob_amplitude + 1e-4);
    }

    #[test]
    fn test_settle_target_stays_close() {
        let (params, layout) = sample(EnsembleKind::Emblem(Symbol::Star), 7, 150);
        let current = Vec3::new(1.0, 2.0, 3.0);
        let target = settle_target(&params, &layout, current, 4.0);
        assert!(target.distance(current) <= params.jitter_amplitude + 1e-6);
        assert_eq!(target.x, current.x);
        assert_eq!(target.z, current.z);
    }

    #[test]
    fn test_settle_rate_is_reduced() {
        let (params, layout) = sample(EnsembleKind::Body, 0, 10);
        let settle = resolve_rate(&params, &layout, GestureState::Pinch);
        let track = resolve_rate(&params, &layout, GestureState::Closed);
        assert!(settle < track);
        assert!((settle - params.settle_rate * layout.speed_scale).abs() < 1e-6);
    }

    #[test]
    fn test_glow_bounds() {
        let (params, layout) = sample(EnsembleKind::RibbonSparkle, 9, 100);
        assert!(layout.blink_speed > 0.0);
        for i in 0..200 {
            let glow = resolve_glow(&params, &layout, i as f32 * 0.05);
            assert!((0.5..=2.5).contains(&glow));
        }

        let (params, layout) = sample(EnsembleKind::Lantern, 2, 10);
        assert_eq!(resolve_glow(&params, &layout, 1.0), params.glow);
    }

    #[test]
    fn test_emblem_scale_pulses_around_base() {
        let (params, layout) = sample(EnsembleKind::Emblem(Symbol::Gift), 31, 150);
        for i in 0..100 {
            let scale = resolve_scale(&params, &layout, i as f32 * 0.1);
            assert!(scale >= params.base_scale - params.pulse_amplitude - 1e-6);
            assert!(scale <= params.base_scale + params.pulse_amplitude + 1e-6);
        }
    }

    #[test]
    fn test_rotation_policies() {
        let tick = Tick::new(1.0, 0.1);

        let (params, layout) = sample(EnsembleKind::Body, 1, 10);
        let rot = advance_rotation(&params, &layout, Vec3::ZERO, tick);
        assert!((rot.x - 0.1).abs() < 1e-6 && (rot.z - 0.1).abs() < 1e-6);

        let (params, layout) = sample(EnsembleKind::VolumeSparkle, 1, 10);
        assert_eq!(advance_rotation(&params, &layout, Vec3::ZERO, tick), Vec3::ZERO);

        let (params, layout) = sample(EnsembleKind::Lantern, 1, 10);
        let rot = advance_rotation(&params, &layout, Vec3::ZERO, tick);
        assert!((rot.y - 0.1).abs() < 1e-6);
        assert!(rot.z.abs() <= 0.2);
    }
}
