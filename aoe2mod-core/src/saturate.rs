//! Saturating arithmetic for 16-bit dat fields.
//!
//! Hit points, train times and research times are stored as `i16`. Scaled
//! values clamp to the field range instead of wrapping.

/// Largest value an `i16` stat field can hold.
pub const I16_MAX: i16 = i16::MAX;

/// Clamp a wide value into `i16` range.
#[inline]
pub const fn saturate_i16(value: i64) -> i16 {
    if value > i16::MAX as i64 {
        i16::MAX
    } else if value < i16::MIN as i64 {
        i16::MIN
    } else {
        value as i16
    }
}

/// Result of a saturating edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saturated {
    pub value: i16,
    /// The exact result did not fit and was clamped.
    pub capped: bool,
}

/// Multiply and truncate toward zero, clamping to `i16` range.
pub fn scale_i16(value: i16, factor: f64) -> Saturated {
    let exact = (value as f64 * factor).trunc();
    // `as` saturates for floats, and NaN maps to 0.
    let wide = exact as i64;
    let value = saturate_i16(wide);
    Saturated {
        value,
        capped: wide != value as i64,
    }
}

/// Add a delta, clamping to `i16` range.
pub fn add_i16(value: i16, delta: i32) -> Saturated {
    let wide = value as i64 + delta as i64;
    let value = saturate_i16(wide);
    Saturated {
        value,
        capped: wide != value as i64,
    }
}
