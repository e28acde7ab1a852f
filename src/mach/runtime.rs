use super::canvas::Canvas;
use super::command::Command;
use super::program::Program;
use super::{eval, Address, Val, Var};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Commands executed in one run before the interpreter gives up. A
/// program that legitimately needs more than this is drawing something
/// nobody will wait for.
const STEP_LIMIT: usize = 50_000;

/// ## Execution engine
///
/// Owns the mutable half of a run: the program counter, the variable
/// table and the method return addresses. The compiled program itself is
/// never written to, so one program could back any number of runtimes.
pub struct Runtime {
    program: Program,
    vars: Var,
    returns: HashMap<Rc<str>, Address>,
    pc: Address,
}

impl Runtime {
    pub fn new(program: Program) -> Runtime {
        Runtime {
            program,
            vars: Var::new(),
            returns: HashMap::new(),
            pc: 0,
        }
    }

    /// Execute from the first command until the sequence is exhausted.
    /// Runtime errors are collected and execution continues on the next
    /// command; fatal errors and the step limit abort the run.
    pub fn run(&mut self, canvas: &mut dyn Canvas) -> std::result::Result<(), Vec<Error>> {
        self.vars.clear();
        self.returns.clear();
        self.pc = 0;
        let mut errors: Vec<Error> = vec![];
        let mut steps: usize = 0;
        while self.pc < self.program.len() {
            steps += 1;
            if steps > STEP_LIMIT {
                errors.push(error!(StepLimit, self.program.line_number(self.pc)));
                break;
            }
            match self.step(canvas) {
                Ok(Some(addr)) => self.pc = addr,
                Ok(None) => self.pc += 1,
                Err(error) => {
                    let error = error.in_line_number(self.program.line_number(self.pc));
                    let fatal = error.is_fatal();
                    errors.push(error);
                    if fatal {
                        break;
                    }
                    self.pc += 1;
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Execute the command under the program counter. `Some(addr)` is a
    /// jump, `None` falls through to the next command.
    fn step(&mut self, canvas: &mut dyn Canvas) -> Result<Option<Address>> {
        let command = match self.program.command(self.pc) {
            Some(command) => command,
            None => return Err(error!(InternalError)),
        };
        use Command::*;
        match command {
            Declare(kind, name, init) => {
                let val = match init {
                    Some(expression) => eval::evaluate(expression, &self.vars)?.coerce(*kind)?,
                    None => Val::zero(*kind),
                };
                // re-executing a declaration inside a loop re-initializes
                self.vars.delete(name);
                self.vars.declare(name, val)?;
                Ok(None)
            }
            DeclareArray(kind, name, size) => {
                let size = i64::try_from(eval::evaluate(size, &self.vars)?)?;
                self.vars.delete(name);
                self.vars.declare_array(name, *kind, size)?;
                Ok(None)
            }
            Assign((column, name), expression) => {
                let val = eval::evaluate(expression, &self.vars)?;
                self.vars
                    .assign(name, val)
                    .map_err(|e| e.in_column(column))?;
                Ok(None)
            }
            MoveTo(x, y) => {
                let x = i64::try_from(eval::evaluate(x, &self.vars)?)?;
                let y = i64::try_from(eval::evaluate(y, &self.vars)?)?;
                canvas.move_to(x, y);
                Ok(None)
            }
            DrawTo(x, y) => {
                let x = i64::try_from(eval::evaluate(x, &self.vars)?)?;
                let y = i64::try_from(eval::evaluate(y, &self.vars)?)?;
                canvas.line_to(x, y);
                Ok(None)
            }
            Circle(radius, filled) => {
                let radius = i64::try_from(eval::evaluate(radius, &self.vars)?)?;
                if radius <= 0 {
                    return Err(error!(IllegalValue; "RADIUS MUST BE POSITIVE"));
                }
                canvas.circle(radius, *filled);
                Ok(None)
            }
            Rect(width, height, filled) => {
                let width = i64::try_from(eval::evaluate(width, &self.vars)?)?;
                let height = i64::try_from(eval::evaluate(height, &self.vars)?)?;
                if width <= 0 || height <= 0 {
                    return Err(error!(IllegalValue; "SIZE MUST BE POSITIVE"));
                }
                canvas.rect(width, height, *filled);
                Ok(None)
            }
            Tri(x, y) => {
                let x = i64::try_from(eval::evaluate(x, &self.vars)?)?;
                let y = i64::try_from(eval::evaluate(y, &self.vars)?)?;
                canvas.triangle(x, y);
                Ok(None)
            }
            Pen(r, g, b) => {
                let r = i64::try_from(eval::evaluate(r, &self.vars)?)?;
                let g = i64::try_from(eval::evaluate(g, &self.vars)?)?;
                let b = i64::try_from(eval::evaluate(b, &self.vars)?)?;
                if !(0..=255).contains(&r) || !(0..=255).contains(&g) || !(0..=255).contains(&b) {
                    return Err(error!(IllegalValue; "COLOR OUT OF RANGE"));
                }
                canvas.set_color(r as u8, g as u8, b as u8);
                Ok(None)
            }
            PenSize(size) => {
                let size = i64::try_from(eval::evaluate(size, &self.vars)?)?;
                if size <= 0 {
                    return Err(error!(IllegalValue; "SIZE MUST BE POSITIVE"));
                }
                canvas.set_pen_width(size);
                Ok(None)
            }
            Write(expression) => {
                let val = eval::evaluate(expression, &self.vars)?;
                canvas.write_text(&val.to_string());
                Ok(None)
            }
            Clear => {
                canvas.clear();
                Ok(None)
            }
            Reset => {
                canvas.reset();
                Ok(None)
            }
            If(condition, target) | While(condition, target) => {
                if eval::evaluate(condition, &self.vars)?.as_bool()? {
                    Ok(None)
                } else {
                    Ok(Some(*target))
                }
            }
            Else(target) | EndWhile(target) | EndFor(target) => Ok(Some(*target)),
            EndIf => Ok(None),
            For {
                var,
                from,
                to,
                step,
                exit,
            } => {
                let step = match step {
                    Some(expression) => i64::try_from(eval::evaluate(expression, &self.vars)?)?,
                    None => 1,
                };
                if step == 0 {
                    return Err(error!(ZeroStep));
                }
                // bounds are re-evaluated on every pass
                let to = i64::try_from(eval::evaluate(to, &self.vars)?)?;
                let current = if self.vars.contains(var) {
                    let previous = i64::try_from(self.vars.fetch(var)?)?;
                    match previous.checked_add(step) {
                        Some(next) => next,
                        None => return Err(error!(Overflow)),
                    }
                } else {
                    i64::try_from(eval::evaluate(from, &self.vars)?)?
                };
                let done = if step > 0 { current > to } else { current < to };
                self.vars.delete(var);
                if done {
                    Ok(Some(*exit))
                } else {
                    self.vars.declare(var, Val::Integer(current))?;
                    Ok(None)
                }
            }
            Method(name) => match self.program.method(name) {
                Some(info) => Ok(Some(info.end + 1)),
                None => Err(error!(InternalError)),
            },
            EndMethod(name) => {
                // only this method's parameters leave scope; a caller's
                // bindings stay untouched
                match self.program.method(name) {
                    Some(info) => {
                        for (_, param) in &info.params {
                            self.vars.delete(param);
                        }
                    }
                    None => return Err(error!(InternalError)),
                }
                match self.returns.remove(name) {
                    Some(addr) => Ok(Some(addr)),
                    None => Err(error!(ReturnWithoutCall)),
                }
            }
            Call((column, name), args) => {
                let info = match self.program.method(name) {
                    Some(info) => info,
                    None => return Err(error!(UndefinedMethod, ..column)),
                };
                if args.len() != info.params.len() {
                    return Err(error!(IllegalCall, ..column; "WRONG NUMBER OF ARGUMENTS"));
                }
                // arguments are evaluated in the caller's frame
                let mut vals: Vec<Val> = Vec::with_capacity(args.len());
                for (arg, (kind, _)) in args.iter().zip(&info.params) {
                    vals.push(eval::evaluate(arg, &self.vars)?.coerce(*kind)?);
                }
                for ((_, param), val) in info.params.iter().zip(vals) {
                    self.vars.delete(param);
                    self.vars.declare(param, val)?;
                }
                if let Some(kind) = info.ret {
                    if self.vars.contains(name) {
                        self.vars.assign(name, Val::zero(kind))?;
                    } else {
                        self.vars.declare(name, Val::zero(kind))?;
                    }
                }
                self.returns.insert(name.clone(), self.pc + 1);
                Ok(Some(info.body))
            }
            Poke((column, name), index, value) => {
                let index = i64::try_from(eval::evaluate(index, &self.vars)?)?;
                let val = eval::evaluate(value, &self.vars)?;
                self.vars
                    .poke(name, index, val)
                    .map_err(|e| e.in_column(column))?;
                Ok(None)
            }
            Peek((target_column, target), (array_column, array), index) => {
                let index = i64::try_from(eval::evaluate(index, &self.vars)?)?;
                let val = self
                    .vars
                    .peek(array, index)
                    .map_err(|e| e.in_column(array_column))?;
                self.vars
                    .assign(target, val)
                    .map_err(|e| e.in_column(target_column))?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;
    use crate::mach::Recorder;

    fn run(source: &str) -> (Recorder, std::result::Result<(), Vec<Error>>) {
        let program = Program::compile(source).unwrap();
        let mut canvas = Recorder::new();
        let result = Runtime::new(program).run(&mut canvas);
        (canvas, result)
    }

    #[test]
    fn test_runaway_loop_hits_step_limit() {
        let (_, result) = run("while true\nend while\n");
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), ErrorCode::StepLimit);
    }

    #[test]
    fn test_zero_step_is_fatal() {
        let (canvas, result) = run("for i = 1 to 3 step 0\nwrite i\nend for\nwrite 9\n");
        let errors = result.unwrap_err();
        assert_eq!(errors[0].code(), ErrorCode::ZeroStep);
        // nothing after the abort ran
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn test_runtime_errors_accumulate() {
        let (canvas, result) = run("write 1 / 0\nwrite 2\n");
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), ErrorCode::DivisionByZero);
        assert_eq!(errors[0].line_number(), Some(1));
        // execution continued past the failing command
        assert_eq!(canvas.calls.len(), 1);
    }
}
