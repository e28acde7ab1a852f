use super::Address;
use crate::lang::ast::{Expression, Ident, VarKind};
use std::rc::Rc;

/// One executable command. Jump targets are addresses into the command
/// sequence, resolved when the program is compiled. Commands hold no
/// mutable state; everything that changes during a run lives in the
/// runtime.
#[derive(Debug, Clone)]
pub enum Command {
    Declare(VarKind, Rc<str>, Option<Expression>),
    DeclareArray(VarKind, Rc<str>, Expression),
    Assign(Ident, Expression),
    MoveTo(Expression, Expression),
    DrawTo(Expression, Expression),
    Circle(Expression, bool),
    Rect(Expression, Expression, bool),
    Tri(Expression, Expression),
    Pen(Expression, Expression, Expression),
    PenSize(Expression),
    Write(Expression),
    Clear,
    Reset,
    /// Jump to the address when the condition is false.
    If(Expression, Address),
    /// Reached only by falling out of the true branch; jumps past the
    /// else branch.
    Else(Address),
    EndIf,
    /// Jump to the address when the condition is false.
    While(Expression, Address),
    EndWhile(Address),
    /// Creates the loop variable on first entry, advances it by `step`
    /// afterwards, and jumps to `exit` when the range is exhausted.
    For {
        var: Rc<str>,
        from: Expression,
        to: Expression,
        step: Option<Expression>,
        exit: Address,
    },
    EndFor(Address),
    /// Skipped over in sequential flow; the body runs only via `Call`.
    Method(Rc<str>),
    EndMethod(Rc<str>),
    Call(Ident, Vec<Expression>),
    Poke(Ident, Expression, Expression),
    Peek(Ident, Ident, Expression),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Command::*;
        match self {
            Declare(kind, name, None) => write!(f, "{} {}", kind, name),
            Declare(kind, name, Some(expr)) => write!(f, "{} {} = {}", kind, name, expr),
            DeclareArray(kind, name, size) => write!(f, "array {} {} {}", kind, name, size),
            Assign((_, name), expr) => write!(f, "{} = {}", name, expr),
            MoveTo(x, y) => write!(f, "moveto {} {}", x, y),
            DrawTo(x, y) => write!(f, "drawto {} {}", x, y),
            Circle(r, false) => write!(f, "circle {}", r),
            Circle(r, true) => write!(f, "circle {} filled", r),
            Rect(w, h, false) => write!(f, "rect {} {}", w, h),
            Rect(w, h, true) => write!(f, "rect {} {} filled", w, h),
            Tri(x, y) => write!(f, "tri {} {}", x, y),
            Pen(r, g, b) => write!(f, "pen {} {} {}", r, g, b),
            PenSize(s) => write!(f, "pensize {}", s),
            Write(expr) => write!(f, "write {}", expr),
            Clear => write!(f, "clear"),
            Reset => write!(f, "reset"),
            If(cond, target) => write!(f, "if {} -> {}", cond, target),
            Else(target) => write!(f, "else -> {}", target),
            EndIf => write!(f, "end if"),
            While(cond, target) => write!(f, "while {} -> {}", cond, target),
            EndWhile(target) => write!(f, "end while -> {}", target),
            For {
                var,
                from,
                to,
                step,
                exit,
            } => {
                write!(f, "for {} = {} to {}", var, from, to)?;
                if let Some(step) = step {
                    write!(f, " step {}", step)?;
                }
                write!(f, " -> {}", exit)
            }
            EndFor(target) => write!(f, "end for -> {}", target),
            Method(name) => write!(f, "method {}", name),
            EndMethod(name) => write!(f, "end method {}", name),
            Call((_, name), args) => {
                write!(f, "call {}", name)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
            Poke((_, name), index, value) => write!(f, "poke {} {} = {}", name, index, value),
            Peek((_, target), (_, array), index) => {
                write!(f, "peek {} = {} {}", target, array, index)
            }
        }
    }
}
