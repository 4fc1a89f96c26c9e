use std::cmp::Ordering;

use crate::runtime::{sexp_type::SexpType, vector::Element};

/// Sortedness codes as GNU R reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sortedness {
    Unknown,
    KnownUnsorted,
    Incr,
    IncrNaFirst,
    Decr,
    DecrNaFirst,
}

impl Sortedness {
    pub fn code(self) -> i32 {
        match self {
            Sortedness::Unknown => i32::MIN,
            Sortedness::KnownUnsorted => 0,
            Sortedness::Incr => 1,
            Sortedness::IncrNaFirst => 2,
            Sortedness::Decr => -1,
            Sortedness::DecrNaFirst => -2,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Sortedness::KnownUnsorted,
            1 => Sortedness::Incr,
            2 => Sortedness::IncrNaFirst,
            -1 => Sortedness::Decr,
            -2 => Sortedness::DecrNaFirst,
            _ => Sortedness::Unknown,
        }
    }

    pub fn is_known_sorted(self) -> bool {
        !matches!(self, Sortedness::Unknown | Sortedness::KnownUnsorted)
    }
}

/// Classifies `items` by probing, in this order: increasing with NAs last,
/// increasing with NAs first, decreasing with NAs last, decreasing with NAs
/// first. The first probe that holds wins. Ties count as sorted.
pub fn probe<T: Element>(items: &[T]) -> Sortedness {
    if T::TYPE == SexpType::Complex {
        return Sortedness::Unknown;
    }
    let probes = [
        (Ordering::Less, false, Sortedness::Incr),
        (Ordering::Less, true, Sortedness::IncrNaFirst),
        (Ordering::Greater, false, Sortedness::Decr),
        (Ordering::Greater, true, Sortedness::DecrNaFirst),
    ];
    probes
        .into_iter()
        .find(|(direction, na_first, _)| {
            non_na_run(items, *na_first).is_some_and(|run| monotone(run, *direction))
        })
        .map_or(Sortedness::Unknown, |(_, _, result)| result)
}

/// The non-NA elements, provided every NA sits in the leading (or trailing)
/// block.
fn non_na_run<T: Element>(items: &[T], na_first: bool) -> Option<&[T]> {
    let run = if na_first {
        let leading = items.iter().take_while(|x| x.is_na()).count();
        &items[leading..]
    } else {
        let trailing = items.iter().rev().take_while(|x| x.is_na()).count();
        &items[..items.len() - trailing]
    };
    (!run.iter().any(T::is_na)).then_some(run)
}

fn monotone<T: Element>(items: &[T], direction: Ordering) -> bool {
    items.windows(2).all(|pair| {
        matches!(pair[0].compare(&pair[1]), Some(order) if order == direction || order == Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{
        char_cell::CharCell,
        na::{NA_INTEGER, NA_REAL},
        vector::Complex,
    };

    #[test]
    fn test_increasing() {
        assert_eq!(probe(&[1, 2, 2, 3]), Sortedness::Incr);
        assert_eq!(probe(&[1, 2, NA_INTEGER]), Sortedness::Incr);
        assert_eq!(probe::<i32>(&[]), Sortedness::Incr);
    }

    #[test]
    fn test_na_first_is_not_unknown() {
        assert_eq!(probe(&[NA_INTEGER, 1, 2, 3]), Sortedness::IncrNaFirst);
        assert_eq!(probe(&[NA_REAL, 3.0, 1.0]), Sortedness::DecrNaFirst);
    }

    #[test]
    fn test_decreasing() {
        assert_eq!(probe(&[5, 3, 1]), Sortedness::Decr);
        assert_eq!(probe(&[5.0, 1.0, NA_REAL]), Sortedness::Decr);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(probe(&[1, 3, 2]), Sortedness::Unknown);
        assert_eq!(probe(&[1, NA_INTEGER, 2]), Sortedness::Unknown);
        assert_eq!(probe(&[1.0, f64::NAN, 2.0]), Sortedness::Unknown);
        assert_eq!(
            probe(&[Complex::new(1.0, 0.0), Complex::new(2.0, 0.0)]),
            Sortedness::Unknown
        );
    }

    #[test]
    fn test_strings_and_all_na() {
        let items = [CharCell::new("a"), CharCell::new("b"), CharCell::na()];
        assert_eq!(probe(&items), Sortedness::Incr);
        assert_eq!(probe(&[NA_INTEGER, NA_INTEGER]), Sortedness::Incr);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Sortedness::IncrNaFirst.code(), 2);
        assert_eq!(Sortedness::from_code(-1), Sortedness::Decr);
        assert_eq!(Sortedness::from_code(7), Sortedness::Unknown);
        assert!(!Sortedness::Unknown.is_known_sorted());
    }
}
