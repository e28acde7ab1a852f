use crate::error;
use crate::lang::ast::VarKind;
use crate::lang::Error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// A runtime value. Text exists only for `write`; it never coerces to a
/// numeric or boolean kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Integer(i64),
    Real(f64),
    Bool(bool),
    Text(Rc<str>),
}

impl Val {
    pub fn zero(kind: VarKind) -> Val {
        match kind {
            VarKind::Int => Val::Integer(0),
            VarKind::Real => Val::Real(0.0),
            VarKind::Boolean => Val::Bool(false),
        }
    }

    /// Coerce into the given kind. Real to int truncates toward zero,
    /// numeric to boolean is nonzero, boolean to numeric is 0 or 1.
    pub fn coerce(self, kind: VarKind) -> Result<Val> {
        match kind {
            VarKind::Int => Ok(Val::Integer(i64::try_from(self)?)),
            VarKind::Real => Ok(Val::Real(f64::try_from(self)?)),
            VarKind::Boolean => Ok(Val::Bool(bool::try_from(self)?)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Val::Bool(b) => Ok(*b),
            Val::Integer(n) => Ok(*n != 0),
            Val::Real(n) => Ok(*n != 0.0),
            Val::Text(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<Val> for i64 {
    type Error = Error;
    fn try_from(val: Val) -> Result<i64> {
        match val {
            Val::Integer(n) => Ok(n),
            Val::Real(n) => {
                if n.is_finite() && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
                    Ok(n.trunc() as i64)
                } else {
                    Err(error!(Overflow))
                }
            }
            Val::Bool(b) => Ok(b as i64),
            Val::Text(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<Val> for f64 {
    type Error = Error;
    fn try_from(val: Val) -> Result<f64> {
        match val {
            Val::Integer(n) => Ok(n as f64),
            Val::Real(n) => Ok(n),
            Val::Bool(b) => Ok(b as i64 as f64),
            Val::Text(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<Val> for bool {
    type Error = Error;
    fn try_from(val: Val) -> Result<bool> {
        val.as_bool()
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Integer(n) => write!(f, "{}", n),
            Val::Real(n) => write!(f, "{}", n),
            Val::Bool(b) => write!(f, "{}", b),
            Val::Text(s) => write!(f, "{}", s),
        }
    }
}
