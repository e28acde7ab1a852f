use super::Column;
use std::rc::Rc;

/// Declared kind of a scalar variable or array element.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VarKind {
    Int,
    Real,
    Boolean,
}

impl std::fmt::Display for VarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            VarKind::Int => write!(f, "int"),
            VarKind::Real => write!(f, "real"),
            VarKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Block constructs that open at one address and close at another.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlockKind {
    If,
    While,
    For,
    Method,
}

pub type Ident = (Column, Rc<str>);

/// One parsed statement. A source line holds one or more of these,
/// separated by `;`.
#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Declare(Column, VarKind, Ident, Option<Expression>),
    DeclareArray(Column, VarKind, Ident, Expression),
    Assign(Column, Ident, Expression),
    MoveTo(Column, Expression, Expression),
    DrawTo(Column, Expression, Expression),
    Circle(Column, Expression, bool),
    Rect(Column, Expression, Expression, bool),
    Tri(Column, Expression, Expression),
    Pen(Column, Expression, Expression, Expression),
    PenSize(Column, Expression),
    Write(Column, Expression),
    Clear(Column),
    Reset(Column),
    If(Column, Expression),
    Else(Column),
    End(Column, Option<BlockKind>),
    While(Column, Expression),
    For(Column, Ident, Expression, Expression, Option<Expression>),
    Method(Column, Option<VarKind>, Ident, Vec<(VarKind, Ident)>),
    Call(Column, Ident, Vec<Expression>),
    Poke(Column, Ident, Expression, Expression),
    Peek(Column, Ident, Ident, Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(Column, i64),
    Real(Column, f64),
    Boolean(Column, bool),
    Text(Column, Rc<str>),
    Var(Column, Rc<str>),
    Negation(Column, Box<Expression>),
    Not(Column, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    Modulo(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Equal(Column, Box<Expression>, Box<Expression>),
    NotEqual(Column, Box<Expression>, Box<Expression>),
    Less(Column, Box<Expression>, Box<Expression>),
    LessEqual(Column, Box<Expression>, Box<Expression>),
    Greater(Column, Box<Expression>, Box<Expression>),
    GreaterEqual(Column, Box<Expression>, Box<Expression>),
    And(Column, Box<Expression>, Box<Expression>),
    Or(Column, Box<Expression>, Box<Expression>),
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Expression::*;
        match self {
            Integer(_, n) => write!(f, "{}", n),
            Real(_, n) => write!(f, "{}", n),
            Boolean(_, b) => write!(f, "{}", b),
            Text(_, s) => write!(f, "\"{}\"", s),
            Var(_, name) => write!(f, "{}", name),
            Negation(_, expr) => write!(f, "-{}", expr),
            Not(_, expr) => write!(f, "!{}", expr),
            Multiply(_, lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Divide(_, lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Modulo(_, lhs, rhs) => write!(f, "({} % {})", lhs, rhs),
            Add(_, lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Subtract(_, lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Equal(_, lhs, rhs) => write!(f, "({} == {})", lhs, rhs),
            NotEqual(_, lhs, rhs) => write!(f, "({} <> {})", lhs, rhs),
            Less(_, lhs, rhs) => write!(f, "({} < {})", lhs, rhs),
            LessEqual(_, lhs, rhs) => write!(f, "({} <= {})", lhs, rhs),
            Greater(_, lhs, rhs) => write!(f, "({} > {})", lhs, rhs),
            GreaterEqual(_, lhs, rhs) => write!(f, "({} >= {})", lhs, rhs),
            And(_, lhs, rhs) => write!(f, "({} && {})", lhs, rhs),
            Or(_, lhs, rhs) => write!(f, "({} || {})", lhs, rhs),
        }
    }
}

impl Expression {
    /// Walk every variable reference in the tree.
    pub fn each_var<F: FnMut(&Column, &Rc<str>)>(&self, f: &mut F) {
        use Expression::*;
        match self {
            Integer(..) | Real(..) | Boolean(..) | Text(..) => {}
            Var(col, name) => f(col, name),
            Negation(_, expr) | Not(_, expr) => expr.each_var(f),
            Multiply(_, lhs, rhs)
            | Divide(_, lhs, rhs)
            | Modulo(_, lhs, rhs)
            | Add(_, lhs, rhs)
            | Subtract(_, lhs, rhs)
            | Equal(_, lhs, rhs)
            | NotEqual(_, lhs, rhs)
            | Less(_, lhs, rhs)
            | LessEqual(_, lhs, rhs)
            | Greater(_, lhs, rhs)
            | GreaterEqual(_, lhs, rhs)
            | And(_, lhs, rhs)
            | Or(_, lhs, rhs) => {
                lhs.each_var(f);
                rhs.each_var(f);
            }
        }
    }
}
