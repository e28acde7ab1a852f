use super::command::Command;
use super::Address;
use crate::error;
use crate::lang::ast::{BlockKind, Expression, Ident, Statement, VarKind};
use crate::lang::{self, Column, Error, LineNumber};
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Compiled program
///
/// An ordered command sequence with every jump target already resolved.
/// Compilation is a single pass over the source lines; diagnostics are
/// aggregated so one bad line never hides the next.
#[derive(Debug)]
pub struct Program {
    commands: Vec<Command>,
    lines: Vec<LineNumber>,
    methods: HashMap<Rc<str>, MethodInfo>,
}

/// Everything the runtime needs to call a method.
#[derive(Debug)]
pub struct MethodInfo {
    pub ret: Option<VarKind>,
    pub params: Vec<(VarKind, Rc<str>)>,
    /// Address of the first body command.
    pub body: Address,
    /// Address of the closing command.
    pub end: Address,
}

impl Program {
    pub fn compile(source: &str) -> std::result::Result<Program, Vec<Error>> {
        Compiler::compile(source)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn command(&self, addr: Address) -> Option<&Command> {
        self.commands.get(addr)
    }

    pub fn line_number(&self, addr: Address) -> LineNumber {
        self.lines.get(addr).copied().flatten()
    }

    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.get(name)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (addr, command) in self.commands.iter().enumerate() {
            match self.lines[addr] {
                Some(line) => writeln!(f, "{:04} {:>4} {}", addr, line, command)?,
                None => writeln!(f, "{:04}      {}", addr, command)?,
            }
        }
        Ok(())
    }
}

/// A compile-time name binding. Mirrors what the runtime table will hold
/// so undeclared and misused names surface before anything runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Scalar(VarKind),
    Array(VarKind),
}

struct OpenBlock {
    kind: BlockKind,
    /// Address of the opening command, patched when the block closes.
    addr: Address,
    else_addr: Option<Address>,
    line_number: LineNumber,
    column: Column,
    /// Method name, for patching `MethodInfo::end`.
    name: Option<Rc<str>>,
    /// Symbols that leave scope when the block closes.
    scoped: Vec<Rc<str>>,
}

struct Compiler {
    commands: Vec<Command>,
    lines: Vec<LineNumber>,
    methods: HashMap<Rc<str>, MethodInfo>,
    symbols: HashMap<Rc<str>, Symbol>,
    blocks: Vec<OpenBlock>,
    /// Call sites, checked against the method table once every line has
    /// been seen so a call may precede its method.
    calls: Vec<(LineNumber, Ident, usize)>,
    errors: Vec<Error>,
    line_number: LineNumber,
}

fn expected_closer(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::If => "EXPECTED END IF",
        BlockKind::While => "EXPECTED END WHILE",
        BlockKind::For => "EXPECTED END FOR",
        BlockKind::Method => "EXPECTED END METHOD",
    }
}

impl Compiler {
    fn compile(source: &str) -> std::result::Result<Program, Vec<Error>> {
        let mut this = Compiler {
            commands: vec![],
            lines: vec![],
            methods: HashMap::new(),
            symbols: HashMap::new(),
            blocks: vec![],
            calls: vec![],
            errors: vec![],
            line_number: None,
        };
        for (index, line) in source.lines().enumerate() {
            this.line_number = Some(index + 1);
            let tokens = lang::lex(line);
            if tokens.is_empty() {
                continue;
            }
            match lang::parse(this.line_number, &tokens) {
                Ok(statements) => {
                    for statement in statements {
                        this.statement(statement);
                    }
                }
                Err(error) => this.errors.push(error),
            }
        }
        this.finish()
    }

    fn finish(mut self) -> std::result::Result<Program, Vec<Error>> {
        while let Some(block) = self.blocks.pop() {
            self.errors.push(
                error!(BlockMismatch, block.line_number, ..&block.column)
                    .message(expected_closer(block.kind)),
            );
        }
        for (line_number, (column, name), arity) in &self.calls {
            match self.methods.get(name) {
                Some(info) => {
                    if info.params.len() != *arity {
                        self.errors.push(
                            error!(IllegalCall, *line_number, ..column)
                                .message("WRONG NUMBER OF ARGUMENTS"),
                        );
                    }
                }
                None => self
                    .errors
                    .push(error!(UndefinedMethod, *line_number, ..column)),
            }
        }
        if self.errors.is_empty() {
            Ok(Program {
                commands: self.commands,
                lines: self.lines,
                methods: self.methods,
            })
        } else {
            Err(self.errors)
        }
    }

    fn statement(&mut self, statement: Statement) {
        if let Err(error) = self.emit(statement) {
            self.errors.push(error.in_line_number(self.line_number));
        }
    }

    fn push(&mut self, command: Command) {
        self.commands.push(command);
        self.lines.push(self.line_number);
    }

    /// Report any variable reference that no declaration has introduced.
    fn check_expression(&mut self, expression: &Expression) {
        let mut errors: Vec<Error> = vec![];
        expression.each_var(&mut |column, name| {
            if !self.symbols.contains_key(name) {
                errors.push(error!(UndefinedVariable, self.line_number, ..column));
            }
        });
        self.errors.extend(errors);
    }

    fn define(&mut self, name: &Ident, symbol: Symbol) -> Result<()> {
        if self.symbols.contains_key(&name.1) || self.methods.contains_key(&name.1) {
            return Err(error!(DuplicateVariable, ..&name.0));
        }
        self.symbols.insert(name.1.clone(), symbol);
        Ok(())
    }

    fn expect_scalar(&self, name: &Ident) -> Result<()> {
        match self.symbols.get(&name.1) {
            Some(Symbol::Scalar(_)) => Ok(()),
            Some(Symbol::Array(_)) => {
                Err(error!(TypeMismatch, ..&name.0; "ARRAY USED AS SCALAR"))
            }
            None => Err(error!(UndefinedVariable, ..&name.0)),
        }
    }

    fn expect_array(&self, name: &Ident) -> Result<()> {
        match self.symbols.get(&name.1) {
            Some(Symbol::Array(_)) => Ok(()),
            Some(Symbol::Scalar(_)) => Err(error!(TypeMismatch, ..&name.0; "NOT AN ARRAY")),
            None => Err(error!(UndefinedVariable, ..&name.0)),
        }
    }

    fn emit(&mut self, statement: Statement) -> Result<()> {
        use Statement::*;
        match statement {
            Declare(_, kind, name, init) => {
                if let Some(expression) = &init {
                    self.check_expression(expression);
                }
                self.define(&name, Symbol::Scalar(kind))?;
                self.push(Command::Declare(kind, name.1, init));
                Ok(())
            }
            DeclareArray(_, kind, name, size) => {
                self.check_expression(&size);
                self.define(&name, Symbol::Array(kind))?;
                self.push(Command::DeclareArray(kind, name.1, size));
                Ok(())
            }
            Assign(_, name, expression) => {
                self.check_expression(&expression);
                self.expect_scalar(&name)?;
                self.push(Command::Assign(name, expression));
                Ok(())
            }
            MoveTo(_, x, y) => {
                self.check_expression(&x);
                self.check_expression(&y);
                self.push(Command::MoveTo(x, y));
                Ok(())
            }
            DrawTo(_, x, y) => {
                self.check_expression(&x);
                self.check_expression(&y);
                self.push(Command::DrawTo(x, y));
                Ok(())
            }
            Circle(_, radius, filled) => {
                self.check_expression(&radius);
                self.push(Command::Circle(radius, filled));
                Ok(())
            }
            Rect(_, width, height, filled) => {
                self.check_expression(&width);
                self.check_expression(&height);
                self.push(Command::Rect(width, height, filled));
                Ok(())
            }
            Tri(_, x, y) => {
                self.check_expression(&x);
                self.check_expression(&y);
                self.push(Command::Tri(x, y));
                Ok(())
            }
            Pen(_, r, g, b) => {
                self.check_expression(&r);
                self.check_expression(&g);
                self.check_expression(&b);
                self.push(Command::Pen(r, g, b));
                Ok(())
            }
            PenSize(_, size) => {
                self.check_expression(&size);
                self.push(Command::PenSize(size));
                Ok(())
            }
            Write(_, expression) => {
                self.check_expression(&expression);
                self.push(Command::Write(expression));
                Ok(())
            }
            Clear(_) => {
                self.push(Command::Clear);
                Ok(())
            }
            Reset(_) => {
                self.push(Command::Reset);
                Ok(())
            }
            If(column, condition) => {
                self.check_expression(&condition);
                self.open(BlockKind::If, column, None, vec![]);
                self.push(Command::If(condition, 0));
                Ok(())
            }
            Else(column) => self.r#else(column),
            End(column, qualifier) => self.end(column, qualifier),
            While(column, condition) => {
                self.check_expression(&condition);
                self.open(BlockKind::While, column, None, vec![]);
                self.push(Command::While(condition, 0));
                Ok(())
            }
            For(column, name, from, to, step) => {
                self.check_expression(&from);
                self.check_expression(&to);
                if let Some(expression) = &step {
                    self.check_expression(expression);
                }
                self.define(&name, Symbol::Scalar(VarKind::Int))?;
                self.open(BlockKind::For, column, None, vec![name.1.clone()]);
                self.push(Command::For {
                    var: name.1,
                    from,
                    to,
                    step,
                    exit: 0,
                });
                Ok(())
            }
            Method(column, ret, name, params) => self.method(column, ret, name, params),
            Call(_, name, args) => {
                for arg in &args {
                    self.check_expression(arg);
                }
                self.calls.push((self.line_number, name.clone(), args.len()));
                self.push(Command::Call(name, args));
                Ok(())
            }
            Poke(_, name, index, value) => {
                self.check_expression(&index);
                self.check_expression(&value);
                self.expect_array(&name)?;
                self.push(Command::Poke(name, index, value));
                Ok(())
            }
            Peek(_, target, array, index) => {
                self.check_expression(&index);
                self.expect_scalar(&target)?;
                self.expect_array(&array)?;
                self.push(Command::Peek(target, array, index));
                Ok(())
            }
        }
    }

    fn open(&mut self, kind: BlockKind, column: Column, name: Option<Rc<str>>, scoped: Vec<Rc<str>>) {
        self.blocks.push(OpenBlock {
            kind,
            addr: self.commands.len(),
            else_addr: None,
            line_number: self.line_number,
            column,
            name,
            scoped,
        });
    }

    fn r#else(&mut self, column: Column) -> Result<()> {
        let addr = self.commands.len();
        let if_addr = match self.blocks.last_mut() {
            Some(block) if block.kind == BlockKind::If && block.else_addr.is_none() => {
                block.else_addr = Some(addr);
                block.addr
            }
            _ => return Err(error!(BlockMismatch, ..&column; "ELSE WITHOUT IF")),
        };
        // false branch of the if starts just past this command
        if let Some(Command::If(_, target)) = self.commands.get_mut(if_addr) {
            *target = addr + 1;
        }
        self.push(Command::Else(0));
        Ok(())
    }

    fn end(&mut self, column: Column, qualifier: Option<BlockKind>) -> Result<()> {
        let block = match self.blocks.pop() {
            Some(block) => block,
            None => return Err(error!(BlockMismatch, ..&column; "END WITHOUT BLOCK")),
        };
        if let Some(kind) = qualifier {
            if kind != block.kind {
                return Err(
                    error!(BlockMismatch, ..&column).message(expected_closer(block.kind))
                );
            }
        }
        for name in &block.scoped {
            self.symbols.remove(name);
        }
        let addr = self.commands.len();
        match block.kind {
            BlockKind::If => {
                if let Some(else_addr) = block.else_addr {
                    if let Some(Command::Else(target)) = self.commands.get_mut(else_addr) {
                        *target = addr;
                    }
                } else if let Some(Command::If(_, target)) = self.commands.get_mut(block.addr) {
                    *target = addr;
                }
                self.push(Command::EndIf);
            }
            BlockKind::While => {
                if let Some(Command::While(_, target)) = self.commands.get_mut(block.addr) {
                    *target = addr + 1;
                }
                self.push(Command::EndWhile(block.addr));
            }
            BlockKind::For => {
                if let Some(Command::For { exit, .. }) = self.commands.get_mut(block.addr) {
                    *exit = addr + 1;
                }
                self.push(Command::EndFor(block.addr));
            }
            BlockKind::Method => {
                let name = match block.name {
                    Some(name) => name,
                    None => return Err(error!(InternalError)),
                };
                if let Some(info) = self.methods.get_mut(&name) {
                    info.end = addr;
                }
                self.push(Command::EndMethod(name));
            }
        }
        Ok(())
    }

    fn method(
        &mut self,
        column: Column,
        ret: Option<VarKind>,
        name: Ident,
        params: Vec<(VarKind, Ident)>,
    ) -> Result<()> {
        if !self.blocks.is_empty() {
            return Err(error!(BlockMismatch, ..&column; "METHOD INSIDE BLOCK"));
        }
        if self.methods.contains_key(&name.1) || self.symbols.contains_key(&name.1) {
            return Err(error!(DuplicateVariable, ..&name.0; "DUPLICATE METHOD"));
        }
        // a returning method owns a result slot under its own name
        if let Some(kind) = ret {
            self.symbols.insert(name.1.clone(), Symbol::Scalar(kind));
        }
        let mut scoped: Vec<Rc<str>> = vec![];
        for (kind, param) in &params {
            match self.define(param, Symbol::Scalar(*kind)) {
                Ok(()) => scoped.push(param.1.clone()),
                Err(error) => self.errors.push(error.in_line_number(self.line_number)),
            }
        }
        let addr = self.commands.len();
        self.methods.insert(
            name.1.clone(),
            MethodInfo {
                ret,
                params: params
                    .into_iter()
                    .map(|(kind, (_, param))| (kind, param))
                    .collect(),
                body: addr + 1,
                end: 0,
            },
        );
        self.open(BlockKind::Method, column, Some(name.1.clone()), scoped);
        self.push(Command::Method(name.1));
        Ok(())
    }
}
