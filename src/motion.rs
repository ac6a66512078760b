//! Per-body position update and trail recording.

use crate::body::Body;

/// Damp, move, and record one body.
///
/// Velocity is scaled by `damping` first, then `position += velocity·dt`,
/// then the new position is appended to the trail.
pub fn advance(body: &mut Body, dt: f64, damping: f64) {
    body.velocity *= damping;
    body.position += body.velocity * dt;
    body.trail.push(body.position);
}

pub fn advance_all(bodies: &mut [Body], dt: f64, damping: f64) {
    for body in bodies.iter_mut() {
        advance(body, dt, damping);
    }
}
