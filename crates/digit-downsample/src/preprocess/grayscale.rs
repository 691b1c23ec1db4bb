//! RGBA to grayscale conversion.

/// Convert an RGBA buffer to one grayscale value per pixel.
///
/// Each output value is the mean of the pixel's R, G and B channels rounded
/// to the nearest integer; alpha is ignored. A trailing partial pixel
/// (buffer length not a multiple of 4) is dropped.
///
/// The sum of three channels divided by 3 never lands on a `.5`, so
/// `(sum + 1) / 3` in integer arithmetic is exact round-to-nearest.
///
/// # Example
///
/// ```
/// use digit_downsample::to_grayscale;
///
/// let rgba = [255, 0, 0, 255, 10, 20, 30, 0];
/// assert_eq!(to_grayscale(&rgba), vec![85, 20]);
/// ```
pub fn to_grayscale(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .map(|pixel| {
            let sum = pixel[0] as u16 + pixel[1] as u16 + pixel[2] as u16;
            ((sum + 1) / 3) as u8
        })
        .collect()
}
