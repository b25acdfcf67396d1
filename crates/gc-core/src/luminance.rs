/// Luminance perceptuelle BT.709 (Rec. ITU-R BT.709 coefficients).
///
/// Integer weighting: `(2126·R + 7152·G + 722·B) / 10000`, exact enough for
/// 8-bit channels and division-free of floating point in the hot loop.
///
/// # Example
/// ```
/// use gc_core::luminance::luminance;
/// assert_eq!(luminance(0, 0, 0), 0);
/// assert_eq!(luminance(255, 255, 255), 255);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722) / 10000) as u8
}

/// Map a pixel color to a glyph index within a ramp of length `ramp_len`.
///
/// `index = luminance · (ramp_len − 1) / 255` in integer math. Guarantees:
/// monotonic in brightness, always in `[0, ramp_len − 1]` for any
/// `ramp_len ≥ 1`, pure and side-effect-free.
///
/// # Panics
/// Debug builds assert `ramp_len ≥ 1`; a zero-length ramp is a broken
/// caller contract, not a recoverable error.
///
/// # Example
/// ```
/// use gc_core::luminance::quantize;
/// assert_eq!(quantize(0, 0, 0, 2), 0);
/// assert_eq!(quantize(255, 255, 255, 2), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn quantize(r: u8, g: u8, b: u8, ramp_len: usize) -> usize {
    debug_assert!(ramp_len >= 1, "quantize against an empty ramp");
    let luma = usize::from(luminance(r, g, b));
    luma * (ramp_len.saturating_sub(1)) / 255
}
