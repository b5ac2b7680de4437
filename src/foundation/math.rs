/// ITU-R BT.601 luma weights for red, green, blue.
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// BT.601 luma of a straight RGB triple, rounded to the nearest integer.
pub fn luma_bt601(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_WEIGHTS[0] * f64::from(r)
        + LUMA_WEIGHTS[1] * f64::from(g)
        + LUMA_WEIGHTS[2] * f64::from(b);
    y.round().clamp(0.0, 255.0) as u8
}
