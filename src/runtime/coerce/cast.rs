//! Element casts between atomic kinds, following GNU R's coercion rules.
use tracing::warn;

use crate::runtime::{
    char_cell::CharCell,
    format::{format_complex, format_real},
    na::{NA_INTEGER, NA_REAL, is_na_real},
    value::Value,
    vector::{Complex, Element, Logical},
};

/// One element of any atomic kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Logical(Logical),
    Integer(i32),
    Real(f64),
    Complex(Complex),
    String(CharCell),
    Raw(u8),
}

impl Scalar {
    pub fn is_na(&self) -> bool {
        match self {
            Scalar::Logical(x) => x.is_na(),
            Scalar::Integer(x) => x.is_na(),
            Scalar::Real(x) => is_na_real(*x),
            Scalar::Complex(x) => x.is_na(),
            Scalar::String(x) => x.is_na(),
            Scalar::Raw(_) => false,
        }
    }

    /// A length-one vector holding this element.
    pub fn into_value(self) -> Value {
        match self {
            Scalar::Logical(x) => Value::scalar_logical(x),
            Scalar::Integer(x) => Value::scalar_int(x),
            Scalar::Real(x) => Value::scalar_real(x),
            Scalar::Complex(z) => Value::complex_vec(vec![z]),
            Scalar::String(s) => Value::scalar_string(s),
            Scalar::Raw(b) => Value::raw_vec(vec![b]),
        }
    }
}

/// Conditions GNU R reports once per coercion rather than per element.
#[derive(Debug, Default)]
pub struct CoercionWarnings {
    na_introduced: bool,
    int_range: bool,
    imaginary_discarded: bool,
    raw_out_of_range: bool,
}

impl CoercionWarnings {
    pub fn any(&self) -> bool {
        self.na_introduced || self.int_range || self.imaginary_discarded || self.raw_out_of_range
    }

    pub fn emit(self) {
        if self.na_introduced {
            warn!("NAs introduced by coercion");
        }
        if self.int_range {
            warn!("NAs introduced by coercion to integer range");
        }
        if self.imaginary_discarded {
            warn!("imaginary parts discarded in coercion");
        }
        if self.raw_out_of_range {
            warn!("out-of-range values treated as 0 in coercion to raw");
        }
    }
}

/// Parses a number the way `R_strtod` does. `None` means not a number.
pub fn parse_real(text: &str) -> Option<f64> {
    let text = text.trim();
    if text == "NA" {
        return Some(NA_REAL);
    }
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()? as f64
    } else {
        match body {
            "Inf" | "inf" | "infinity" => f64::INFINITY,
            "NaN" => f64::NAN,
            _ if body.starts_with(|c: char| c.is_ascii_digit() || c == '.') => body.parse().ok()?,
            _ => return None,
        }
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn real_from_string(text: &CharCell, warnings: &mut CoercionWarnings) -> f64 {
    let Some(text) = text.as_str() else {
        return NA_REAL;
    };
    if text.trim().is_empty() {
        return NA_REAL;
    }
    parse_real(text).unwrap_or_else(|| {
        warnings.na_introduced = true;
        NA_REAL
    })
}

fn int_from_real(x: f64, warnings: &mut CoercionWarnings) -> i32 {
    if x.is_nan() {
        return NA_INTEGER;
    }
    if x >= i32::MAX as f64 + 1.0 || x <= i32::MIN as f64 {
        warnings.int_range = true;
        return NA_INTEGER;
    }
    x as i32
}

fn real_from_complex(z: Complex, warnings: &mut CoercionWarnings) -> f64 {
    if z.is_na() {
        return NA_REAL;
    }
    if z.im != 0.0 {
        warnings.imaginary_discarded = true;
    }
    z.re
}

fn raw_from_int(x: i32, warnings: &mut CoercionWarnings) -> u8 {
    match u8::try_from(x) {
        Ok(byte) if x != NA_INTEGER => byte,
        _ => {
            warnings.raw_out_of_range = true;
            0
        }
    }
}

/// Element kinds a [`Scalar`] can be cast to.
pub trait FromScalar: Element {
    fn from_scalar(value: &Scalar, warnings: &mut CoercionWarnings) -> Self;
}

impl FromScalar for i32 {
    fn from_scalar(value: &Scalar, warnings: &mut CoercionWarnings) -> Self {
        match value {
            Scalar::Logical(x) => x.to_r_int(),
            Scalar::Integer(x) => *x,
            Scalar::Real(x) => int_from_real(*x, warnings),
            Scalar::Complex(z) => int_from_real(real_from_complex(*z, warnings), warnings),
            Scalar::String(s) => int_from_real(real_from_string(s, warnings), warnings),
            Scalar::Raw(b) => i32::from(*b),
        }
    }
}

impl FromScalar for f64 {
    fn from_scalar(value: &Scalar, warnings: &mut CoercionWarnings) -> Self {
        match value {
            Scalar::Logical(Logical::Na) => NA_REAL,
            Scalar::Logical(x) => f64::from(x.to_r_int()),
            Scalar::Integer(x) if x.is_na() => NA_REAL,
            Scalar::Integer(x) => f64::from(*x),
            Scalar::Real(x) => *x,
            Scalar::Complex(z) => real_from_complex(*z, warnings),
            Scalar::String(s) => real_from_string(s, warnings),
            Scalar::Raw(b) => f64::from(*b),
        }
    }
}

impl FromScalar for Logical {
    fn from_scalar(value: &Scalar, _warnings: &mut CoercionWarnings) -> Self {
        match value {
            Scalar::Logical(x) => *x,
            Scalar::Integer(x) if x.is_na() => Logical::Na,
            Scalar::Integer(x) => Logical::from_bool(*x != 0),
            Scalar::Real(x) if x.is_nan() => Logical::Na,
            Scalar::Real(x) => Logical::from_bool(*x != 0.0),
            Scalar::Complex(z) if z.re.is_nan() || z.im.is_nan() => Logical::Na,
            Scalar::Complex(z) => Logical::from_bool(z.re != 0.0 || z.im != 0.0),
            Scalar::String(s) => match s.as_str() {
                Some("T" | "True" | "TRUE" | "true") => Logical::True,
                Some("F" | "False" | "FALSE" | "false") => Logical::False,
                _ => Logical::Na,
            },
            Scalar::Raw(b) => Logical::from_bool(*b != 0),
        }
    }
}

impl FromScalar for Complex {
    fn from_scalar(value: &Scalar, warnings: &mut CoercionWarnings) -> Self {
        match value {
            Scalar::Complex(z) => *z,
            Scalar::Real(x) => Complex::new(*x, 0.0),
            other if other.is_na() => Complex::na(),
            other => Complex::new(f64::from_scalar(other, warnings), 0.0),
        }
    }
}

impl FromScalar for CharCell {
    fn from_scalar(value: &Scalar, _warnings: &mut CoercionWarnings) -> Self {
        if value.is_na() {
            return CharCell::na();
        }
        match value {
            Scalar::Logical(x) => CharCell::new(if *x == Logical::True { "TRUE" } else { "FALSE" }),
            Scalar::Integer(x) => CharCell::new(&x.to_string()),
            Scalar::Real(x) => CharCell::new(&format_real(*x)),
            Scalar::Complex(z) => CharCell::new(&format_complex(*z)),
            Scalar::String(s) => s.clone(),
            Scalar::Raw(b) => CharCell::new(&format!("{:02x}", b)),
        }
    }
}

impl FromScalar for u8 {
    fn from_scalar(value: &Scalar, warnings: &mut CoercionWarnings) -> Self {
        match value {
            Scalar::Raw(b) => *b,
            other => {
                let x = i32::from_scalar(other, warnings);
                raw_from_int(x, warnings)
            }
        }
    }
}
