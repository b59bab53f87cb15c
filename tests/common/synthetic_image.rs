use ndarray::Array2;

/// Horizontal illumination ramp from `dark` to `bright` with a fine
/// checkerboard patch (1 px cells, +/- `amplitude`) on top.
///
/// The patch covers rows and columns `patch_start..patch_start + patch_size`.
pub fn illuminated_checkerboard(
    size: usize,
    dark: f64,
    bright: f64,
    patch_start: usize,
    patch_size: usize,
    amplitude: f64,
) -> Array2<u8> {
    assert!(size > 1, "image size must be at least 2");
    assert!(patch_start + patch_size <= size, "patch must fit in the image");

    let patch = patch_start..patch_start + patch_size;
    Array2::from_shape_fn((size, size), |(y, x)| {
        let mut v = dark + (bright - dark) * x as f64 / (size - 1) as f64;
        if patch.contains(&y) && patch.contains(&x) {
            v += if (x + y) % 2 == 0 { amplitude } else { -amplitude };
        }
        v.clamp(0.0, 255.0) as u8
    })
}

/// Deterministic pseudo-random texture (LCG), values 0-255.
pub fn noise_u8(rows: usize, cols: usize, seed: u64) -> Array2<u8> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    Array2::from_shape_fn((rows, cols), |_| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 56) as u8
    })
}
