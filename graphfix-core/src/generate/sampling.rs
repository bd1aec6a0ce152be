//! Random sampling helpers shared by the generators.

use std::f64::consts::PI;

use rand::Rng;

use crate::graph::{NodeId, Position};

/// Draws a value uniformly from `[0, 1)`.
pub(super) fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0_f64..1.0_f64)
}

/// Draws a position with both coordinates uniform in `[0, 1)`.
pub(super) fn unit_position<R: Rng + ?Sized>(rng: &mut R) -> Position {
    let x = unit(rng);
    let y = unit(rng);
    Position::new(x, y)
}

/// Draws from `Normal(mean, std_dev)` using the Box-Muller transform.
#[expect(
    clippy::float_arithmetic,
    reason = "Box-Muller transform requires floating-point arithmetic"
)]
pub(super) fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let mut u1 = unit(rng);
    if u1 <= f64::EPSILON {
        u1 = f64::EPSILON;
    }
    let u2 = unit(rng);
    let radius = (-2.0_f64 * u1.ln()).sqrt();
    let theta = 2.0_f64 * PI * u2;
    mean + std_dev * radius * theta.cos()
}

/// Converts a host index into a node id.
pub(super) const fn node_id(index: usize) -> NodeId {
    NodeId::new(index as u64)
}
