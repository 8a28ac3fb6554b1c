use crate::RPE;

/// Estimated calories burned for a session.
///
/// `floor(total_minutes * (5 + rpe))`, i.e. 6 to 15 calories per minute
/// depending on intensity. Pure and total over its domain: minutes are
/// non-negative by construction and `RPE` is bounded by its constructor.
#[must_use]
pub fn estimate(total_minutes: u32, rpe: RPE) -> u32 {
    let calories_per_minute = 5.0 + f64::from(rpe);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (f64::from(total_minutes) * calories_per_minute).floor() as u32
    }
}
