//! Easing curves for slide and fade animations. Inputs are clamped to `0..=1`.

#[must_use]
pub(crate) fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let f = 2.0 * t - 2.0;
        0.5 * f * f * f + 1.0
    }
}

#[must_use]
pub(crate) fn ease_out_cubic(t: f32) -> f32 {
    let f = t.clamp(0.0, 1.0) - 1.0;
    f * f * f + 1.0
}

#[must_use]
pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
