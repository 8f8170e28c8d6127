//! Alignment Classifier
//!
//! Decides how much light each body receives from its star given the bodies
//! orbiting closer in. A closer body casts a shadow only when it is strictly
//! larger than the body being classified.
//!
//! # Light Rules
//!
//! 1. **Full**: the closest body, nothing stands between it and the star
//! 2. **None**: exactly one closer body is larger
//! 3. **None (Multiple Shadows)**: two or more closer bodies are larger
//! 4. **Partial**: every other body

use tracing::debug;

use super::models::{Body, ClassificationResult, LightIntensity};

/// Number of bodies before `index` that are strictly larger than `bodies[index]`.
///
/// Returns 0 when `index` is out of range.
pub fn shadow_count(bodies: &[Body], index: usize) -> usize {
    let Some(current) = bodies.get(index) else {
        return 0;
    };
    bodies[..index]
        .iter()
        .filter(|closer| closer.size > current.size)
        .count()
}

/// Map a position and shadow count to a light label.
pub fn light_intensity(index: usize, shadow_count: usize) -> LightIntensity {
    match (index, shadow_count) {
        (0, _) => LightIntensity::Full,
        (_, 0) => LightIntensity::Partial,
        (_, 1) => LightIntensity::None,
        _ => LightIntensity::NoneMultipleShadows,
    }
}

/// Classify bodies that are already ordered by distance.
///
/// One result per body, in input order.
pub fn classify(bodies: &[Body]) -> Vec<ClassificationResult> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let shadows = shadow_count(bodies, i);
            let light = light_intensity(i, shadows);
            debug!(body = %body.name, index = i, shadows, %light, "classified body");
            ClassificationResult {
                name: body.name.clone(),
                light,
                shadow_count: shadows,
            }
        })
        .collect()
}

/// Sort bodies by ascending distance.
///
/// The sort is stable, so bodies at the same distance keep their input order.
pub fn sort_by_distance(bodies: &[Body]) -> Vec<Body> {
    let mut sorted = bodies.to_vec();
    sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    sorted
}

/// Sort an unordered collection by distance, then classify it.
///
/// Returns the sorted bodies alongside their classifications so renderers
/// can pair them up by index.
pub fn classify_system(bodies: &[Body]) -> (Vec<Body>, Vec<ClassificationResult>) {
    let sorted = sort_by_distance(bodies);
    let results = classify(&sorted);
    (sorted, results)
}
