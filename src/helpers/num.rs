use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, PrimInt};

use crate::SolveError;

/// `a / b`, rounded up. Both operands must be non-negative and `b` non-zero.
#[inline]
pub fn div_ceil<T: PrimInt>(a: T, b: T) -> T {
    debug_assert!(b > T::zero());
    (a + b - T::one()) / b
}

/// Checked arithmetic that reports failures as [`SolveError::Arithmetic`].
pub mod checked {
    use super::*;

    pub fn add<T: CheckedAdd + std::fmt::Display>(a: T, b: T) -> crate::Result<T> {
        a.checked_add(&b)
            .ok_or_else(|| SolveError::arithmetic(format!("{a} + {b} overflows")))
    }

    pub fn sub<T: CheckedSub + std::fmt::Display>(a: T, b: T) -> crate::Result<T> {
        a.checked_sub(&b)
            .ok_or_else(|| SolveError::arithmetic(format!("{a} - {b} overflows")))
    }

    pub fn mul<T: CheckedMul + std::fmt::Display>(a: T, b: T) -> crate::Result<T> {
        a.checked_mul(&b)
            .ok_or_else(|| SolveError::arithmetic(format!("{a} * {b} overflows")))
    }

    /// Truncating division; fails on a zero divisor or overflow.
    pub fn div<T: CheckedDiv + std::fmt::Display>(a: T, b: T) -> crate::Result<T> {
        a.checked_div(&b)
            .ok_or_else(|| SolveError::arithmetic(format!("cannot divide {a} by {b}")))
    }

    /// Division that must leave no remainder.
    pub fn div_exact<T: PrimInt + std::fmt::Display>(a: T, b: T) -> crate::Result<T> {
        let quotient = div(a, b)?;
        if quotient * b != a {
            return Err(SolveError::arithmetic(format!(
                "{a} is not divisible by {b}"
            )));
        }
        Ok(quotient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil() {
        assert_eq!(div_ceil(0u32, 3), 0);
        assert_eq!(div_ceil(6u32, 3), 2);
        assert_eq!(div_ceil(7u32, 3), 3);
    }

    #[test]
    fn checked_ops() {
        assert_eq!(checked::add(2i64, 3), Ok(5));
        assert!(checked::mul(i64::MAX, 2).is_err());
        assert!(checked::div(1i64, 0).is_err());
        assert_eq!(checked::div_exact(12i64, -4), Ok(-3));
        assert!(matches!(
            checked::div_exact(7i64, 2),
            Err(SolveError::Arithmetic(_))
        ));
    }
}
