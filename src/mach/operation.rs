use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Arithmetic, relational and logical operations over tagged values.
/// Mixed int/real operands promote to real. Integer arithmetic is checked.
pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_neg() {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            Real(n) => Ok(Real(-n)),
            Bool(_) | Text(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        Ok(Val::Bool(!val.as_bool()?))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_mul(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 * r)),
            (Real(l), Integer(r)) => Ok(Real(l * r as f64)),
            (Real(l), Real(r)) => Ok(Real(l * r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_div(r) {
                Some(i) => Ok(Integer(i)),
                None => {
                    if r == 0 {
                        Err(error!(DivisionByZero))
                    } else {
                        Err(error!(Overflow))
                    }
                }
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 / r)),
            (Real(l), Integer(r)) => Ok(Real(l / r as f64)),
            (Real(l), Real(r)) => Ok(Real(l / r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn modulo(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_rem(r) {
                Some(i) => Ok(Integer(i)),
                None => {
                    if r == 0 {
                        Err(error!(DivisionByZero))
                    } else {
                        Err(error!(Overflow))
                    }
                }
            },
            (Integer(l), Real(r)) => Ok(Real((l as f64) % r)),
            (Real(l), Integer(r)) => Ok(Real(l % r as f64)),
            (Real(l), Real(r)) => Ok(Real(l % r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    /// Addition, or concatenation when either side is text.
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Text(l), r) => Ok(Text(format!("{}{}", l, r).into())),
            (l, Text(r)) => Ok(Text(format!("{}{}", l, r).into())),
            (Integer(l), Integer(r)) => match l.checked_add(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 + r)),
            (Real(l), Integer(r)) => Ok(Real(l + r as f64)),
            (Real(l), Real(r)) => Ok(Real(l + r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_sub(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 - r)),
            (Real(l), Integer(r)) => Ok(Real(l - r as f64)),
            (Real(l), Real(r)) => Ok(Real(l - r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(Operation::equal_bool(lhs, rhs)?))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(!Operation::equal_bool(lhs, rhs)?))
    }

    fn equal_bool(lhs: Val, rhs: Val) -> Result<bool> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(l == r),
            (Integer(l), Real(r)) => Ok(l as f64 == r),
            (Real(l), Integer(r)) => Ok(l == r as f64),
            (Real(l), Real(r)) => Ok(l == r),
            (Bool(l), Bool(r)) => Ok(l == r),
            (Text(l), Text(r)) => Ok(l == r),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(Operation::less_bool(lhs, rhs)?))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(Operation::less_bool(rhs, lhs)?))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(!Operation::less_bool(rhs, lhs)?))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(!Operation::less_bool(lhs, rhs)?))
    }

    fn less_bool(lhs: Val, rhs: Val) -> Result<bool> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(l < r),
            (Integer(l), Real(r)) => Ok((l as f64) < r),
            (Real(l), Integer(r)) => Ok(l < r as f64),
            (Real(l), Real(r)) => Ok(l < r),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(lhs.as_bool()? && rhs.as_bool()?))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(lhs.as_bool()? || rhs.as_bool()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_promotion() {
        let v = Operation::sum(Val::Integer(1), Val::Real(0.5)).unwrap();
        assert_eq!(v, Val::Real(1.5));
        let v = Operation::divide(Val::Integer(7), Val::Integer(2)).unwrap();
        assert_eq!(v, Val::Integer(3));
    }

    #[test]
    fn test_division_by_zero() {
        let e = Operation::divide(Val::Integer(1), Val::Integer(0)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::DivisionByZero);
    }

    #[test]
    fn test_overflow() {
        let e = Operation::sum(Val::Integer(i64::MAX), Val::Integer(1)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::Overflow);
    }

    #[test]
    fn test_concatenation() {
        let v = Operation::sum(Val::Text("n=".into()), Val::Integer(4)).unwrap();
        assert_eq!(v, Val::Text("n=4".into()));
    }

    #[test]
    fn test_comparisons_yield_bool() {
        let v = Operation::less_equal(Val::Integer(2), Val::Integer(2)).unwrap();
        assert_eq!(v, Val::Bool(true));
        let v = Operation::greater(Val::Real(1.5), Val::Integer(2)).unwrap();
        assert_eq!(v, Val::Bool(false));
    }

    #[test]
    fn test_logic_accepts_numeric() {
        let v = Operation::and(Val::Integer(1), Val::Bool(true)).unwrap();
        assert_eq!(v, Val::Bool(true));
        let e = Operation::or(Val::Text("x".into()), Val::Bool(true)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
    }
}
