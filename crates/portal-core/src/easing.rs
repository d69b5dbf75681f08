/// Cubic ease-in-out over `[0, 1]`; input is clamped so the curve is total.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Warp field-of-view curve: `start -> peak` over the first half of the
/// transition, `peak -> rest` over the second, each half eased independently.
pub fn warp_fov(progress: f32, start: f32, peak: f32, rest: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    if p < 0.5 {
        lerp(start, peak, ease_in_out_cubic(p * 2.0))
    } else {
        lerp(peak, rest, ease_in_out_cubic((p - 0.5) * 2.0))
    }
}
