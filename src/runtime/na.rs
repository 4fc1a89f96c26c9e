//! NA sentinels.
//!
//! Integer and logical NA share `INT_MIN`. The real NA is a quiet NaN whose
//! low word is 1954; any other NaN is an ordinary `NaN`, not NA.

pub const NA_INTEGER: i32 = i32::MIN;
pub const NA_LOGICAL: i32 = i32::MIN;

const NA_REAL_BITS: u64 = 0x7FF0_0000_0000_07A2;
const NA_REAL_PAYLOAD: u32 = 1954;

pub const NA_REAL: f64 = f64::from_bits(NA_REAL_BITS);

pub fn is_na_real(x: f64) -> bool {
    x.is_nan() && (x.to_bits() & 0xFFFF_FFFF) as u32 == NA_REAL_PAYLOAD
}

/// Compares two reals the way `identical()` does: NA matches NA, NaN
/// matches NaN, everything else by value.
pub fn same_real(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        a.is_nan() && b.is_nan() && is_na_real(a) == is_na_real(b)
    } else {
        a == b
    }
}
