//! Shadow geometry and irradiance
//!
//! Planar approximations used by the celestial report and the animation
//! frames. Positions are in render units around a [`Star`].

use std::f64::consts::PI;

use serde::Serialize;

use super::alignment::{classify_system, sort_by_distance};
use super::models::{Body, LightIntensity, Star, StarSystem};

/// Base orbit radius of the innermost body, in render units.
pub const BASE_ORBIT_RADIUS: f64 = 80.0;
/// Radial gap between consecutive orbits, in render units.
pub const ORBIT_SPACING: f64 = 60.0;
/// Render units per unit of orbital distance, used by the celestial report.
pub const DISTANCE_SCALE: f64 = 100.0;

/// Orbit radius for the body at `index`.
pub fn orbit_radius(index: usize) -> f64 {
    BASE_ORBIT_RADIUS + index as f64 * ORBIT_SPACING
}

/// Position of the body at `index` out of `count`, at `phase` of a full turn.
pub fn orbital_position(star: &Star, index: usize, count: usize, phase: f64) -> (f64, f64) {
    let slot = if count == 0 {
        0.0
    } else {
        index as f64 / count as f64
    };
    let angle = phase * 2.0 * PI + slot * 2.0 * PI;
    let radius = orbit_radius(index);
    (star.x + angle.cos() * radius, star.y + angle.sin() * radius)
}

fn distance_from(star: &Star, px: f64, py: f64) -> f64 {
    (px - star.x).hypot(py - star.y)
}

/// Shadow length cast by `body` at `(px, py)`.
///
/// Uses the angular size of the star seen from the body:
/// `r^2 / (d * tan(atan(R / d)))`. Infinite at the star's centre.
pub fn shadow_length(body: &Body, star: &Star, px: f64, py: f64) -> f64 {
    let distance = distance_from(star, px, py);
    if distance <= 0.0 {
        return f64::INFINITY;
    }
    let angle = (star.radius / distance).atan();
    let r = body.radius();
    (r * r / (distance * angle.tan())).abs()
}

/// Inverse-square irradiance from `star` at `(px, py)`.
///
/// Infinite at the star's centre.
pub fn irradiance(star: &Star, px: f64, py: f64) -> f64 {
    let distance = distance_from(star, px, py);
    if distance <= 0.0 {
        return f64::INFINITY;
    }
    star.luminosity / (4.0 * PI * distance * distance)
}

// =============================================================================
// Survey
// =============================================================================

/// Per-body figures for the celestial report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySurvey {
    pub name: String,
    pub distance: f64,
    pub size: f64,
    pub light: LightIntensity,
    /// `None` when the system has no star to cast from
    pub shadow_length: Option<f64>,
    /// Irradiance from the primary star, `None` without one
    pub irradiance: Option<f64>,
}

/// Classify a system and measure each body's shadow from the primary star.
///
/// Bodies are placed on the star's x axis at `distance * DISTANCE_SCALE`.
pub fn survey(system: &StarSystem) -> Vec<BodySurvey> {
    let (sorted, results) = classify_system(&system.bodies);
    let primary = system.primary();
    sorted
        .iter()
        .zip(results)
        .map(|(body, result)| {
            let placed = primary.map(|star| (star, star.x + body.distance * DISTANCE_SCALE, star.y));
            BodySurvey {
                name: body.name.clone(),
                distance: body.distance,
                size: body.size,
                light: result.light,
                shadow_length: placed.map(|(star, px, py)| shadow_length(body, star, px, py)),
                irradiance: placed.map(|(star, px, py)| irradiance(star, px, py)),
            }
        })
        .collect()
}

// =============================================================================
// Animation
// =============================================================================

/// One body's state in an animation frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramePoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub shadow: f64,
}

/// Snapshot of every body at one phase of the orbit.
pub type Frame = Vec<FramePoint>;

/// Advance every body through one full orbit in `steps` frames.
///
/// Orbits are assigned innermost first by distance, so each frame lists
/// bodies in the same order as [`survey`].
pub fn animate_shadows(bodies: &[Body], star: &Star, steps: usize) -> Vec<Frame> {
    let bodies = sort_by_distance(bodies);
    (0..steps)
        .map(|t| {
            let phase = t as f64 / steps as f64;
            bodies
                .iter()
                .enumerate()
                .map(|(i, body)| {
                    let (x, y) = orbital_position(star, i, bodies.len(), phase);
                    FramePoint {
                        name: body.name.clone(),
                        x,
                        y,
                        shadow: shadow_length(body, star, x, y),
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_star() -> Star {
        Star::new("Test", 0.0, 0.0, 30.0, 1000.0)
    }

    #[test]
    fn test_irradiance_inverse_square() {
        let star = origin_star();
        let far = irradiance(&star, 100.0, 0.0);
        assert!((far - 1000.0 / (4.0 * PI * 10_000.0)).abs() < 1e-6);
        let near = irradiance(&star, 1.0, 0.0);
        assert!(near > far);
    }

    #[test]
    fn test_irradiance_at_centre_is_infinite() {
        assert!(irradiance(&origin_star(), 0.0, 0.0).is_infinite());
    }

    #[test]
    fn test_shadow_length_geometry() {
        let star = origin_star();
        let body = Body::new("b", 1.0, 60.0);
        // tan(atan(R / d)) * d == R, so the length reduces to r^2 / R
        let length = shadow_length(&body, &star, 250.0, 0.0);
        assert!((length - 30.0).abs() < 1e-9);
        assert!(shadow_length(&body, &star, 0.0, 0.0).is_infinite());
    }

    #[test]
    fn test_orbital_position_starts_on_x_axis() {
        let star = Star::new("s", 100.0, 150.0, 30.0, 1.0);
        let (x, y) = orbital_position(&star, 0, 4, 0.0);
        assert!((x - 180.0).abs() < 1e-9);
        assert!((y - 150.0).abs() < 1e-9);

        let (x, y) = orbital_position(&star, 1, 4, 0.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 290.0).abs() < 1e-9);
    }

    #[test]
    fn test_animate_shadows_shape() {
        let bodies = vec![Body::new("a", 0.4, 4879.0), Body::new("b", 0.7, 12104.0)];
        let frames = animate_shadows(&bodies, &origin_star(), 5);
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().all(|f| f.len() == 2));
        assert_eq!(frames[3][1].name, "b");
        assert!(frames[0][0].shadow > 0.0);
    }

    #[test]
    fn test_animate_orbits_follow_distance() {
        let system = StarSystem::lumoria();
        let star = system.primary().unwrap();
        let frames = animate_shadows(&system.bodies, star, 1);

        let names: Vec<_> = frames[0].iter().map(|p| p.name.as_str()).collect();
        let surveyed: Vec<_> = survey(&system).into_iter().map(|r| r.name).collect();
        assert_eq!(names, surveyed);

        for (i, point) in frames[0].iter().enumerate() {
            let radius = distance_from(star, point.x, point.y);
            assert!((radius - orbit_radius(i)).abs() < 1e-9, "{} at {}", point.name, radius);
        }
    }

    #[test]
    fn test_survey_lumoria() {
        let rows = survey(&StarSystem::lumoria());
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Mercuria", "Venusia", "Earthia", "Marsia"]);
        assert_eq!(rows[3].light, LightIntensity::NoneMultipleShadows);
        // r^2 / R with R = 30 for the primary
        let expected = (4879.0_f64 / 2.0).powi(2) / 30.0;
        let got = rows[0].shadow_length.unwrap();
        assert!((got - expected).abs() / expected < 1e-9);
        // 1200 / (4 pi 40^2) for Mercuria at 0.4 * 100 units
        let flux = rows[0].irradiance.unwrap();
        assert!((flux - 1200.0 / (4.0 * PI * 1600.0)).abs() < 1e-9);
        assert!(rows[0].irradiance > rows[3].irradiance);
    }

    #[test]
    fn test_survey_without_stars() {
        let system = StarSystem::new("Rogue", vec![], vec![Body::new("a", 1.0, 1.0)]);
        let rows = survey(&system);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].shadow_length.is_none());
        assert!(rows[0].irradiance.is_none());
    }

    #[test]
    fn test_animate_zero_steps() {
        assert!(animate_shadows(&[Body::new("a", 1.0, 1.0)], &origin_star(), 0).is_empty());
    }
}
