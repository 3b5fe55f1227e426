//! Sizing, color, and default-value constants for the ramp editor.

/// Default input RGB per row, top to bottom.
pub const DEFAULT_INPUT_RGB: [[f64; 3]; 4] = [
    [0.0, 120.0, 240.0],
    [80.0, 120.0, 160.0],
    [160.0, 120.0, 80.0],
    [240.0, 120.0, 0.0],
];

/// Target L* of the dark and light endpoints.
pub const DEFAULT_ENDPOINT_LIGHTNESS: [f64; 2] = [10.0, 95.0];

/// Interpolation fractions of the two middle rows.
pub const DEFAULT_FRACTIONS: [f64; 2] = [0.33, 0.67];

/// 8-bit input.
pub const DEFAULT_INPUT_RANGE: [f64; 3] = [255.0, 255.0, 255.0];

/// RGB565-style output.
pub const DEFAULT_OUTPUT_RANGE: [f64; 3] = [31.0, 63.0, 31.0];

/// Numeric field width
pub const FIELD_WIDTH: f32 = 60.0;

/// Row height
pub const ROW_HEIGHT: f32 = 32.0;

/// Header label height
pub const HEADER_HEIGHT: f32 = 20.0;

/// Color swatch edge length
pub const SWATCH_SIZE: f32 = 32.0;

/// Out-of-gamut triangle edge length
pub const WARNING_SIZE: f64 = 12.0;

/// Border radius for fields and swatches
pub const RADIUS: f32 = 3.0;

/// Gap between grid cells
pub const GAP: f32 = 8.0;

/// Padding around the whole editor
pub const PADDING: f32 = 10.0;

/// Field font size
pub const INPUT_FONT: f32 = 12.0;

/// Label font size
pub const LABEL_FONT: f32 = 11.0;

/// Initial window size
pub const WINDOW_SIZE: (f64, f64) = (980.0, 300.0);
