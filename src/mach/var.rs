use super::Val;
use crate::error;
use crate::lang::ast::VarKind;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// A flat table from name to tagged value. A name is bound at most once at
/// any instant; re-binding requires an explicit delete first. Method
/// parameters are ordinary bindings that the runtime deletes by name when
/// the call returns.
#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, Slot>,
}

#[derive(Debug)]
enum Slot {
    Scalar(Val),
    Array(VarKind, Vec<Val>),
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn declare(&mut self, name: &Rc<str>, val: Val) -> Result<()> {
        if self.vars.contains_key(name) {
            return Err(error!(DuplicateVariable));
        }
        self.vars.insert(name.clone(), Slot::Scalar(val));
        Ok(())
    }

    pub fn declare_array(&mut self, name: &Rc<str>, kind: VarKind, size: i64) -> Result<()> {
        if self.vars.contains_key(name) {
            return Err(error!(DuplicateVariable));
        }
        if size <= 0 || size > u16::MAX as i64 {
            return Err(error!(IllegalValue; "BAD ARRAY SIZE"));
        }
        self.vars
            .insert(name.clone(), Slot::Array(kind, vec![Val::zero(kind); size as usize]));
        Ok(())
    }

    pub fn fetch(&self, name: &str) -> Result<Val> {
        match self.vars.get(name) {
            Some(Slot::Scalar(val)) => Ok(val.clone()),
            Some(Slot::Array(..)) => Err(error!(TypeMismatch; "ARRAY USED AS SCALAR")),
            None => Err(error!(UndefinedVariable)),
        }
    }

    /// Assign to an existing scalar, coercing to its declared kind.
    pub fn assign(&mut self, name: &str, val: Val) -> Result<()> {
        match self.vars.get_mut(name) {
            Some(Slot::Scalar(old)) => {
                *old = val.coerce(kind_of(old))?;
                Ok(())
            }
            Some(Slot::Array(..)) => Err(error!(TypeMismatch; "ARRAY USED AS SCALAR")),
            None => Err(error!(UndefinedVariable)),
        }
    }

    pub fn poke(&mut self, name: &str, index: i64, val: Val) -> Result<()> {
        match self.vars.get_mut(name) {
            Some(Slot::Array(kind, vals)) => {
                if index < 0 || index as usize >= vals.len() {
                    return Err(error!(SubscriptOutOfRange));
                }
                let val = val.coerce(*kind)?;
                vals[index as usize] = val;
                Ok(())
            }
            Some(Slot::Scalar(_)) => Err(error!(TypeMismatch; "NOT AN ARRAY")),
            None => Err(error!(UndefinedVariable)),
        }
    }

    pub fn peek(&self, name: &str, index: i64) -> Result<Val> {
        match self.vars.get(name) {
            Some(Slot::Array(_, vals)) => {
                if index < 0 || index as usize >= vals.len() {
                    return Err(error!(SubscriptOutOfRange));
                }
                Ok(vals[index as usize].clone())
            }
            Some(Slot::Scalar(_)) => Err(error!(TypeMismatch; "NOT AN ARRAY")),
            None => Err(error!(UndefinedVariable)),
        }
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.vars.remove(name).is_some()
    }
}

fn kind_of(val: &Val) -> VarKind {
    match val {
        Val::Integer(_) => VarKind::Int,
        Val::Real(_) => VarKind::Real,
        Val::Bool(_) => VarKind::Boolean,
        // Scalar bindings are created from declarations and loop bounds,
        // which never produce text.
        Val::Text(_) => VarKind::Int,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_declare_and_fetch() {
        let mut vars = Var::new();
        vars.declare(&"x".into(), Val::Real(2.5)).unwrap();
        assert_eq!(vars.fetch("x").unwrap(), Val::Real(2.5));
        let e = vars.declare(&"x".into(), Val::Integer(0)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::DuplicateVariable);
    }

    #[test]
    fn test_assign_coerces_to_declared_kind() {
        let mut vars = Var::new();
        vars.declare(&"n".into(), Val::Integer(0)).unwrap();
        vars.assign("n", Val::Real(2.9)).unwrap();
        assert_eq!(vars.fetch("n").unwrap(), Val::Integer(2));
    }

    #[test]
    fn test_array_bounds() {
        let mut vars = Var::new();
        vars.declare_array(&"a".into(), VarKind::Int, 3).unwrap();
        vars.poke("a", 2, Val::Integer(9)).unwrap();
        assert_eq!(vars.peek("a", 2).unwrap(), Val::Integer(9));
        let e = vars.poke("a", 3, Val::Integer(1)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::SubscriptOutOfRange);
        let e = vars.peek("a", -1).unwrap_err();
        assert_eq!(e.code(), ErrorCode::SubscriptOutOfRange);
        // failed poke leaves the array unchanged
        assert_eq!(vars.peek("a", 2).unwrap(), Val::Integer(9));
    }

    #[test]
    fn test_delete_frees_the_name() {
        let mut vars = Var::new();
        vars.declare(&"p".into(), Val::Integer(2)).unwrap();
        assert!(vars.delete("p"));
        assert!(!vars.contains("p"));
        vars.declare(&"p".into(), Val::Integer(3)).unwrap();
        assert_eq!(vars.fetch("p").unwrap(), Val::Integer(3));
    }
}
