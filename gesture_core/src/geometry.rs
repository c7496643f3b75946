//! Small geometry helpers shared by the pipeline and the game engines.

/// Euclidean distance between two 2-D points.
#[inline]
pub fn distance2(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean distance between two 3-D points.
#[inline]
pub fn distance3(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Integer pixel distance, computed in `f64` to avoid overflow on large frames.
#[inline]
pub fn pixel_distance(a: (i32, i32), b: (i32, i32)) -> f64 {
    let dx = (a.0 - b.0) as f64;
    let dy = (a.1 - b.1) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Move `from` toward `to` by at most `max_step`.
pub fn step_toward(from: (f32, f32), to: (f32, f32), max_step: f32) -> (f32, f32) {
    let d = distance2(from, to);
    if d <= max_step || d == 0.0 {
        return to;
    }
    let scale = max_step / d;
    (from.0 + (to.0 - from.0) * scale, from.1 + (to.1 - from.1) * scale)
}
