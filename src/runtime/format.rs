//! Number formatting matching GNU R's `as.character`.
//!
//! Doubles print with up to 15 significant digits. Fixed notation is used
//! unless scientific notation is strictly narrower.
use crate::runtime::{na::is_na_real, vector::Complex};

const SIGNIFICANT_DIGITS: usize = 15;

/// Formats a finite or special double; NA renders as `"NA"`.
pub fn format_real(x: f64) -> String {
    if is_na_real(x) {
        return "NA".to_string();
    }
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, x);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let mantissa = trim_fraction(mantissa);
    let digits = mantissa.chars().filter(char::is_ascii_digit).count();
    let negative = x < 0.0;

    let exp_width = if exponent.abs() >= 100 { 5 } else { 4 };
    let sci_width = negative as usize + if digits > 1 { digits + 1 } else { 1 } + exp_width;

    let decimals = if exponent >= 0 {
        (digits as i32 - 1 - exponent).max(0) as usize
    } else {
        (digits as i32 - 1 - exponent) as usize
    };
    let fixed_width = if exponent >= 0 {
        negative as usize + exponent as usize + 1 + if decimals > 0 { decimals + 1 } else { 0 }
    } else {
        negative as usize + 2 + decimals
    };

    if fixed_width <= sci_width {
        format!("{:.*}", decimals, x)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

pub fn format_complex(z: Complex) -> String {
    if is_na_real(z.re) || is_na_real(z.im) {
        return "NA".to_string();
    }
    let im = format_real(z.im.abs());
    let sign = if z.im < 0.0 || (z.im == 0.0 && z.im.is_sign_negative()) {
        '-'
    } else {
        '+'
    };
    format!("{}{}{}i", format_real(z.re), sign, im)
}

fn trim_fraction(mantissa: &str) -> &str {
    if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    }
}
