//! Keep generated samples inside the deployment box by mirroring them off
//! its faces.

use uw_core::{Axis, BoundaryBox, Vec3};

use crate::{LocationSample, MobilityError, MobilityResult};

/// Mirror one coordinate across one face.
///
/// For a lower face the coordinate is outside when strictly below `bound`;
/// for an upper face when strictly above.  On a crossing the coordinate
/// becomes `2 * bound - coord` and the velocity component flips sign.
/// Returns whether anything changed.  A coordinate exactly on the face is
/// inside.
#[inline]
pub fn reflect(coord: &mut f64, velocity: &mut f64, bound: f64, is_lower: bool) -> bool {
    let outside = if is_lower { *coord < bound } else { *coord > bound };
    if outside {
        *coord = 2.0 * bound - *coord;
        *velocity = -*velocity;
    }
    outside
}

/// Drop whole out-and-back periods (`2 * width`) from a coordinate outside
/// `[lo, hi]`.
///
/// Mirroring is `2 * width`-periodic and each full period crosses the faces
/// an even number of times, so the position and velocity sign that `reflect`
/// would settle on are unchanged.  The result lies within two widths of the
/// box and needs at most two reflections.
fn fold_periods(coord: f64, lo: f64, hi: f64) -> f64 {
    let width = hi - lo;
    let period = 2.0 * width;
    let offset = coord - lo;
    if !period.is_finite() {
        return coord;
    }
    if offset > width {
        coord - ((offset - width) / period).floor() * period
    } else if offset < 0.0 {
        coord + (-offset / period).floor() * period
    } else {
        coord
    }
}

/// Reflect `sample` against all six faces of `bounds` until a full pass
/// changes nothing.  Returns whether any reflection happened.
///
/// Any finite candidate settles, however many box widths it overshoots by.
///
/// # Errors
///
/// [`MobilityError::InvariantViolation`] if the position is not finite, or
/// becomes non-finite while mirroring off a face near `f64::MAX`.
pub fn restrict_to_bounds(sample: &mut LocationSample, bounds: &BoundaryBox) -> MobilityResult<bool> {
    if !sample.position.is_finite() {
        return Err(MobilityError::InvariantViolation(format!(
            "cannot reflect non-finite position {}",
            sample.position
        )));
    }

    let (min, max) = (bounds.min(), bounds.max());
    let candidate = sample.position;
    for axis in Axis::ALL {
        let coord = sample.position.get_mut(axis);
        *coord = fold_periods(*coord, min.get(axis), max.get(axis));
    }

    let mut reflected = sample.position != candidate;
    loop {
        let mut changed = false;
        for axis in Axis::ALL {
            let (coord, vel) = Vec3::pair_mut(&mut sample.position, &mut sample.velocity, axis);
            changed |= reflect(coord, vel, min.get(axis), true);
            changed |= reflect(coord, vel, max.get(axis), false);
        }
        if !changed {
            return Ok(reflected);
        }
        if !sample.position.is_finite() {
            return Err(MobilityError::InvariantViolation(format!(
                "reflection inside {bounds} overflowed to {}",
                sample.position
            )));
        }
        reflected = true;
    }
}
