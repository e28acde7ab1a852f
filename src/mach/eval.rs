use super::{Operation, Val, Var};
use crate::lang::ast::Expression;
use crate::lang::Error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Evaluate an expression tree against the variable table. Errors carry
/// the column span of the subexpression that failed.
pub fn evaluate(expr: &Expression, vars: &Var) -> Result<Val> {
    use Expression::*;
    match expr {
        Integer(_, n) => Ok(Val::Integer(*n)),
        Real(_, n) => Ok(Val::Real(*n)),
        Boolean(_, b) => Ok(Val::Bool(*b)),
        Text(_, s) => Ok(Val::Text(Rc::clone(s))),
        Var(col, name) => vars.fetch(name).map_err(|e| e.in_column(col)),
        Negation(col, expr) => {
            let val = evaluate(expr, vars)?;
            Operation::negate(val).map_err(|e| e.in_column(col))
        }
        Not(col, expr) => {
            let val = evaluate(expr, vars)?;
            Operation::not(val).map_err(|e| e.in_column(col))
        }
        Multiply(col, lhs, rhs) => binary(Operation::multiply, col, lhs, rhs, vars),
        Divide(col, lhs, rhs) => binary(Operation::divide, col, lhs, rhs, vars),
        Modulo(col, lhs, rhs) => binary(Operation::modulo, col, lhs, rhs, vars),
        Add(col, lhs, rhs) => binary(Operation::sum, col, lhs, rhs, vars),
        Subtract(col, lhs, rhs) => binary(Operation::subtract, col, lhs, rhs, vars),
        Equal(col, lhs, rhs) => binary(Operation::equal, col, lhs, rhs, vars),
        NotEqual(col, lhs, rhs) => binary(Operation::not_equal, col, lhs, rhs, vars),
        Less(col, lhs, rhs) => binary(Operation::less, col, lhs, rhs, vars),
        LessEqual(col, lhs, rhs) => binary(Operation::less_equal, col, lhs, rhs, vars),
        Greater(col, lhs, rhs) => binary(Operation::greater, col, lhs, rhs, vars),
        GreaterEqual(col, lhs, rhs) => binary(Operation::greater_equal, col, lhs, rhs, vars),
        And(col, lhs, rhs) => binary(Operation::and, col, lhs, rhs, vars),
        Or(col, lhs, rhs) => binary(Operation::or, col, lhs, rhs, vars),
    }
}

fn binary(
    op: fn(Val, Val) -> Result<Val>,
    col: &crate::lang::Column,
    lhs: &Expression,
    rhs: &Expression,
    vars: &Var,
) -> Result<Val> {
    let lhs = evaluate(lhs, vars)?;
    let rhs = evaluate(rhs, vars)?;
    op(lhs, rhs).map_err(|e| e.in_column(col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{lex, parse};

    fn eval_src(src: &str, vars: &Var) -> Result<Val> {
        let statements = parse(Some(1), &lex(&format!("write {}", src))).unwrap();
        match &statements[0] {
            crate::lang::ast::Statement::Write(_, expr) => evaluate(expr, vars),
            _ => panic!("not an expression"),
        }
    }

    #[test]
    fn test_precedence() {
        let vars = Var::new();
        assert_eq!(eval_src("2 + 3 * 4", &vars).unwrap(), Val::Integer(14));
        assert_eq!(eval_src("(2 + 3) * 4", &vars).unwrap(), Val::Integer(20));
        assert_eq!(eval_src("-2 * 3", &vars).unwrap(), Val::Integer(-6));
        assert_eq!(
            eval_src("1 < 2 && !false", &vars).unwrap(),
            Val::Bool(true)
        );
    }

    #[test]
    fn test_var_lookup() {
        let mut vars = Var::new();
        vars.declare(&"r".into(), Val::Real(2.5)).unwrap();
        assert_eq!(eval_src("r * 2", &vars).unwrap(), Val::Real(5.0));
        let e = eval_src("q * 2", &vars).unwrap_err();
        assert_eq!(e.code(), crate::lang::ErrorCode::UndefinedVariable);
    }
}
