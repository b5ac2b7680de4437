use crate::foundation::math::luma_bt601;

/// Replace each pixel's RGB with its BT.601 luma, leaving alpha untouched.
///
/// Idempotent: a second pass leaves the image unchanged.
pub fn grayscale_in_place(image: &mut image::RgbaImage) {
    for px in image.pixels_mut() {
        let y = luma_bt601(px[0], px[1], px[2]);
        px[0] = y;
        px[1] = y;
        px[2] = y;
    }
}
