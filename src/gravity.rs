//! Pairwise Newtonian attraction (direct O(N²) sum).

use crate::body::Body;

/// Applies one tick of mutual gravity to every unordered pair of bodies.
///
/// For a pair at distance `d > 0` the force magnitude is `g·m_i·m_j/d²`,
/// applied equal-and-opposite along the line between centres. Only velocities
/// change; positions are left for the motion pass. Coincident pairs are skipped.
pub fn apply_gravity(bodies: &mut [Body], g: f64, dt: f64) {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = bodies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let delta = b.position - a.position;
            let dist = delta.length();
            if dist <= 0.0 {
                continue;
            }

            let force_mag = g * a.mass * b.mass / (dist * dist);
            let force = delta * (force_mag / dist);

            a.velocity += force / a.mass * dt;
            b.velocity -= force / b.mass * dt;
        }
    }
}
