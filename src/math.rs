//! Color math: direct sRGB ↔ CIELAB conversions without external dependencies.
//!
//! All conversions use the sRGB primaries with a D65 reference white, the
//! IEC 61966-2-1 companding curve, and the CIE L*a*b* transfer functions with
//! the exact ε = 216/24389 and κ = 24389/27 constants. Nothing here clamps:
//! out-of-range inputs and out-of-gamut outputs propagate to the caller.

use crate::color::Lab;
use crate::error::RampError;

/// D65 reference white (2° observer), Y normalized to 1.
const WHITE_D65: [f64; 3] = [0.95047, 1.0, 1.08883];

/// CIE ε: the cube of 6/29.
const EPSILON: f64 = 216.0 / 24389.0;

/// CIE κ: (29/3)³.
const KAPPA: f64 = 24389.0 / 27.0;

/// Linear sRGB → XYZ (D65).
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// XYZ (D65) → linear sRGB. Exact inverse of `RGB_TO_XYZ`.
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404548360214083, -1.5371388501025751, -0.4985315468684809],
    [-0.9692663898756537, 1.8760109288424913, 0.041556082346673524],
    [0.05564341960421366, -0.20402585426769815, 1.0572251624579287],
];

/// Rejects a range triple containing a zero or non-finite channel.
pub(crate) fn check_range(range: [f64; 3]) -> Result<(), RampError> {
    match range.iter().position(|v| *v == 0.0 || !v.is_finite()) {
        Some(channel) => Err(RampError::ZeroRange { channel }),
        None => Ok(()),
    }
}

/// Encoded value where the linear and power segments of the sRGB curve meet.
///
/// The rounded 0.04045 / 0.0031308 pair leaves a gap of about 3e-8 between
/// the two segments, which breaks round trips for values near the knee.
const SRGB_KNEE: f64 = 0.040_448_236_277_108_2;

/// `SRGB_KNEE` on the linear side.
const LINEAR_KNEE: f64 = SRGB_KNEE / 12.92;

/// sRGB-encoded → linear. Negative values stay on the linear segment.
pub(crate) fn srgb_to_linear(v: f64) -> f64 {
    if v <= SRGB_KNEE {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear → sRGB-encoded.
pub(crate) fn linear_to_srgb(v: f64) -> f64 {
    if v <= LINEAR_KNEE {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

fn lab_f_inv(f: f64) -> f64 {
    let cubed = f * f * f;
    if cubed > EPSILON {
        cubed
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

/// RGB → CIELAB.
///
/// Each channel is divided by its own entry of `normalize` (usually the input
/// range maximum, e.g. 255) before companding. Fails only when a
/// normalization factor is zero or not finite.
pub fn rgb_to_lab(rgb: [f64; 3], normalize: [f64; 3]) -> Result<Lab, RampError> {
    check_range(normalize)?;
    let linear = [
        srgb_to_linear(rgb[0] / normalize[0]),
        srgb_to_linear(rgb[1] / normalize[1]),
        srgb_to_linear(rgb[2] / normalize[2]),
    ];
    let xyz = mul(&RGB_TO_XYZ, linear);
    let fx = lab_f(xyz[0] / WHITE_D65[0]);
    let fy = lab_f(xyz[1] / WHITE_D65[1]);
    let fz = lab_f(xyz[2] / WHITE_D65[2]);
    Ok(Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)))
}

/// CIELAB → RGB, each channel scaled by its entry of `output_ranges`.
///
/// Does not clamp. Values below zero or above the range are out of gamut and
/// must be detected by the caller before clipping.
pub fn lab_to_rgb(lab: Lab, output_ranges: [f64; 3]) -> [f64; 3] {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;
    let yr = if lab.l > KAPPA * EPSILON {
        fy * fy * fy
    } else {
        lab.l / KAPPA
    };
    let xyz = [
        lab_f_inv(fx) * WHITE_D65[0],
        yr * WHITE_D65[1],
        lab_f_inv(fz) * WHITE_D65[2],
    ];
    let linear = mul(&XYZ_TO_RGB, xyz);
    [
        linear_to_srgb(linear[0]) * output_ranges[0],
        linear_to_srgb(linear[1]) * output_ranges[1],
        linear_to_srgb(linear[2]) * output_ranges[2],
    ]
}
