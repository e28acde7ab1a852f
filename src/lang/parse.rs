use super::{ast::*, token::*, Column, Error, LineNumber};

type Result<T> = std::result::Result<T, Error>;

/// Parse the tokens of one source line into statements. Errors come back
/// tagged with `line_number`.
pub fn parse(line_number: LineNumber, tokens: &[Token]) -> Result<Vec<Statement>> {
    match Parser::parse(tokens) {
        Err(e) => Err(e.in_line_number(line_number)),
        Ok(r) => Ok(r),
    }
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Vec<Statement>> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        };
        let mut r: Vec<Statement> = vec![];
        loop {
            match parse.peek() {
                None => return Ok(r),
                Some(t) => {
                    if *t == &Token::Semicolon {
                        parse.next();
                        continue;
                    }
                }
            }
            match parse.statement() {
                Ok(s) => r.push(s),
                Err(e) => return Err(e.in_column(&parse.col)),
            }
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            match t {
                Token::Whitespace(_) => continue,
                _ => return Some(t),
            }
        }
    }

    fn peek(&mut self) -> Option<&&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked.as_ref()
    }

    fn at_end(&mut self) -> bool {
        matches!(self.peek(), None | Some(Token::Semicolon))
    }

    /// Arguments of fixed-arity statements may optionally be separated
    /// by commas.
    fn separator(&mut self) {
        if let Some(Token::Comma) = self.peek() {
            self.next();
        }
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Some(Token::Ident(_)) => Statement::assignment(self),
            Some(Token::Word(word)) => {
                let word = *word;
                self.next();
                Statement::for_word(self, word)
            }
            _ => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        const UNARY_PRECEDENCE: usize = 6;
        fn atom(this: &mut Parser) -> Result<Expression> {
            match this.next() {
                Some(Token::LParen) => {
                    let expr = this.expression()?;
                    this.expect(Token::RParen)?;
                    Ok(expr)
                }
                Some(Token::Ident(i)) => Ok(Expression::Var(this.column(), i.clone())),
                Some(Token::Literal(l)) => Expression::for_literal(this.column(), l),
                Some(Token::Word(Word::True)) => Ok(Expression::Boolean(this.column(), true)),
                Some(Token::Word(Word::False)) => Ok(Expression::Boolean(this.column(), false)),
                Some(Token::Operator(Operator::Minus)) => {
                    let column = this.column();
                    let expr = parse(this, UNARY_PRECEDENCE)?;
                    Ok(Expression::Negation(column, Box::new(expr)))
                }
                Some(Token::Operator(Operator::Not)) => {
                    let column = this.column();
                    let expr = parse(this, UNARY_PRECEDENCE)?;
                    Ok(Expression::Not(column, Box::new(expr)))
                }
                _ => Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
            }
        }
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let mut lhs = atom(this)?;
            loop {
                match this.peek() {
                    Some(Token::Operator(op)) => {
                        let op = *op;
                        let op_precedence = match Expression::op_precedence(&op) {
                            Some(p) => p,
                            None => break,
                        };
                        if op_precedence < precedence {
                            break;
                        }
                        this.next();
                        let column = this.column();
                        let rhs = parse(this, op_precedence + 1)?;
                        lhs = Expression::for_binary_op(column, &op, lhs, rhs);
                    }
                    _ => break,
                }
            }
            Ok(lhs)
        }
        parse(self, 0)
    }

    /// Expressions until the end of the statement, commas optional.
    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        let mut v: Vec<Expression> = vec![];
        loop {
            if self.at_end() {
                return Ok(v);
            }
            self.separator();
            if self.at_end() {
                return Ok(v);
            }
            v.push(self.expression()?);
        }
    }

    fn ident(&mut self) -> Result<Ident> {
        let ident = match self.next() {
            Some(Token::Ident(i)) => i.clone(),
            _ => return Err(error!(SyntaxError; "EXPECTED IDENTIFIER")),
        };
        Ok((self.column(), ident))
    }

    fn var_kind(&mut self) -> Result<VarKind> {
        match self.next() {
            Some(Token::Word(word)) => match VarKind::for_word(word) {
                Some(kind) => Ok(kind),
                None => Err(error!(SyntaxError; "EXPECTED TYPE")),
            },
            _ => Err(error!(SyntaxError; "EXPECTED TYPE")),
        }
    }

    fn peek_var_kind(&mut self) -> Option<VarKind> {
        match self.peek() {
            Some(Token::Word(word)) => VarKind::for_word(word),
            _ => None,
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Unknown(_) | Whitespace(_) => "UNEXPECTED TOKEN",
                Literal(_) => "EXPECTED LITERAL",
                Word(_) => "EXPECTED RESERVED WORD",
                Operator(_) => "EXPECTED OPERATOR",
                Ident(_) => "EXPECTED IDENTIFIER",
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "EXPECTED RIGHT PARENTHESIS",
                Comma => "EXPECTED COMMA",
                Semicolon => "EXPECTED SEMICOLON",
            }
        ))
    }
}

impl VarKind {
    fn for_word(word: &Word) -> Option<VarKind> {
        match word {
            Word::Int => Some(VarKind::Int),
            Word::Real => Some(VarKind::Real),
            Word::Boolean => Some(VarKind::Boolean),
            _ => None,
        }
    }
}

impl Expression {
    fn for_binary_op(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let lhs = Box::new(lhs);
        let rhs = Box::new(rhs);
        match op {
            Multiply => Expression::Multiply(col, lhs, rhs),
            Divide => Expression::Divide(col, lhs, rhs),
            Modulo => Expression::Modulo(col, lhs, rhs),
            Plus => Expression::Add(col, lhs, rhs),
            Minus => Expression::Subtract(col, lhs, rhs),
            Equal | EqualEqual => Expression::Equal(col, lhs, rhs),
            NotEqual | BangEqual => Expression::NotEqual(col, lhs, rhs),
            Less => Expression::Less(col, lhs, rhs),
            LessEqual => Expression::LessEqual(col, lhs, rhs),
            Greater => Expression::Greater(col, lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(col, lhs, rhs),
            And => Expression::And(col, lhs, rhs),
            Or => Expression::Or(col, lhs, rhs),
            Not => debug_assert_unreachable(col),
        }
    }

    fn op_precedence(op: &Operator) -> Option<usize> {
        use Operator::*;
        match op {
            Or => Some(1),
            And => Some(2),
            EqualEqual | NotEqual | BangEqual | Less | LessEqual | Greater | GreaterEqual => {
                Some(3)
            }
            Plus | Minus => Some(4),
            Multiply | Divide | Modulo => Some(5),
            // bare `=` is the assignment sentinel, never an operator
            Equal | Not => None,
        }
    }

    fn for_literal(col: Column, lit: &Literal) -> Result<Expression> {
        match lit {
            Literal::Integer(s) => match s.parse::<i64>() {
                Ok(n) => Ok(Expression::Integer(col, n)),
                Err(_) => Err(error!(Overflow; "INVALID INTEGER LITERAL")),
            },
            Literal::Real(s) => match s.parse::<f64>() {
                Ok(n) => Ok(Expression::Real(col, n)),
                Err(_) => Err(error!(Overflow; "INVALID REAL LITERAL")),
            },
            Literal::Text(s) => Ok(Expression::Text(col, s.as_str().into())),
        }
    }
}

fn debug_assert_unreachable(col: Column) -> Expression {
    debug_assert!(false, "unary operator used as binary");
    Expression::Boolean(col, false)
}

impl Statement {
    fn for_word(parse: &mut Parser, word: Word) -> Result<Statement> {
        let column = parse.column();
        use Word::*;
        match word {
            Int => Self::declare(parse, column, VarKind::Int),
            Real => Self::declare(parse, column, VarKind::Real),
            Boolean => Self::declare(parse, column, VarKind::Boolean),
            Array => Self::declare_array(parse, column),
            Set => Self::set(parse, column),
            MoveTo => Self::move_to(parse, column),
            DrawTo => Self::draw_to(parse, column),
            Circle => Self::circle(parse, column),
            Rect => Self::rect(parse, column),
            Tri => Self::tri(parse, column),
            Pen => Self::pen(parse, column),
            PenSize => Self::pen_size(parse, column),
            Write => Self::write(parse, column),
            Clear => Ok(Statement::Clear(column)),
            Reset => Ok(Statement::Reset(column)),
            If => Self::r#if(parse, column),
            Else => Ok(Statement::Else(column)),
            End => Self::end(parse, column),
            While => Self::r#while(parse, column),
            For => Self::r#for(parse, column),
            Method => Self::method(parse, column),
            Call => Self::call(parse, column),
            Poke => Self::poke(parse, column),
            Peek => Self::peek(parse, column),
            To | Step | Filled | True | False => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn declare(parse: &mut Parser, column: Column, kind: VarKind) -> Result<Statement> {
        let ident = parse.ident()?;
        let init = match parse.peek() {
            Some(Token::Operator(Operator::Equal)) => {
                parse.next();
                Some(parse.expression()?)
            }
            _ => None,
        };
        Ok(Statement::Declare(column, kind, ident, init))
    }

    fn declare_array(parse: &mut Parser, column: Column) -> Result<Statement> {
        let kind = parse.var_kind()?;
        let ident = parse.ident()?;
        let size = parse.expression()?;
        Ok(Statement::DeclareArray(column, kind, ident, size))
    }

    fn assignment(parse: &mut Parser) -> Result<Statement> {
        let ident = parse.ident()?;
        let column = ident.0.clone();
        parse.expect(Token::Operator(Operator::Equal))?;
        let expr = parse.expression()?;
        Ok(Statement::Assign(column, ident, expr))
    }

    fn set(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = parse.ident()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let expr = parse.expression()?;
        Ok(Statement::Assign(column, ident, expr))
    }

    fn move_to(parse: &mut Parser, column: Column) -> Result<Statement> {
        let x = parse.expression()?;
        parse.separator();
        let y = parse.expression()?;
        Ok(Statement::MoveTo(column, x, y))
    }

    fn draw_to(parse: &mut Parser, column: Column) -> Result<Statement> {
        let x = parse.expression()?;
        parse.separator();
        let y = parse.expression()?;
        Ok(Statement::DrawTo(column, x, y))
    }

    fn filled(parse: &mut Parser) -> bool {
        if let Some(Token::Word(Word::Filled)) = parse.peek() {
            parse.next();
            return true;
        }
        false
    }

    fn circle(parse: &mut Parser, column: Column) -> Result<Statement> {
        let radius = parse.expression()?;
        let filled = Self::filled(parse);
        Ok(Statement::Circle(column, radius, filled))
    }

    fn rect(parse: &mut Parser, column: Column) -> Result<Statement> {
        let width = parse.expression()?;
        parse.separator();
        let height = parse.expression()?;
        let filled = Self::filled(parse);
        Ok(Statement::Rect(column, width, height, filled))
    }

    fn tri(parse: &mut Parser, column: Column) -> Result<Statement> {
        let width = parse.expression()?;
        parse.separator();
        let height = parse.expression()?;
        Ok(Statement::Tri(column, width, height))
    }

    fn pen(parse: &mut Parser, column: Column) -> Result<Statement> {
        let r = parse.expression()?;
        parse.separator();
        let g = parse.expression()?;
        parse.separator();
        let b = parse.expression()?;
        Ok(Statement::Pen(column, r, g, b))
    }

    fn pen_size(parse: &mut Parser, column: Column) -> Result<Statement> {
        let size = parse.expression()?;
        Ok(Statement::PenSize(column, size))
    }

    fn write(parse: &mut Parser, column: Column) -> Result<Statement> {
        let expr = parse.expression()?;
        Ok(Statement::Write(column, expr))
    }

    fn r#if(parse: &mut Parser, column: Column) -> Result<Statement> {
        let cond = parse.expression()?;
        Ok(Statement::If(column, cond))
    }

    fn end(parse: &mut Parser, column: Column) -> Result<Statement> {
        let kind = match parse.peek() {
            Some(Token::Word(Word::If)) => Some(BlockKind::If),
            Some(Token::Word(Word::While)) => Some(BlockKind::While),
            Some(Token::Word(Word::For)) => Some(BlockKind::For),
            Some(Token::Word(Word::Method)) => Some(BlockKind::Method),
            _ => None,
        };
        if kind.is_some() {
            parse.next();
        }
        Ok(Statement::End(column, kind))
    }

    fn r#while(parse: &mut Parser, column: Column) -> Result<Statement> {
        let cond = parse.expression()?;
        Ok(Statement::While(column, cond))
    }

    fn r#for(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = parse.ident()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let from = parse.expression()?;
        parse.expect(Token::Word(Word::To))?;
        let to = parse.expression()?;
        let step = match parse.peek() {
            Some(Token::Word(Word::Step)) => {
                parse.next();
                Some(parse.expression()?)
            }
            _ => None,
        };
        Ok(Statement::For(column, ident, from, to, step))
    }

    fn method(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ret = match parse.peek_var_kind() {
            Some(_) => Some(parse.var_kind()?),
            None => None,
        };
        let ident = parse.ident()?;
        let mut params: Vec<(VarKind, Ident)> = vec![];
        loop {
            if parse.at_end() {
                break;
            }
            parse.separator();
            if parse.at_end() {
                break;
            }
            let kind = parse.var_kind()?;
            let pname = parse.ident()?;
            params.push((kind, pname));
        }
        Ok(Statement::Method(column, ret, ident, params))
    }

    fn call(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = parse.ident()?;
        let args = parse.expression_list()?;
        Ok(Statement::Call(column, ident, args))
    }

    fn poke(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = parse.ident()?;
        let index = parse.expression()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let value = parse.expression()?;
        Ok(Statement::Poke(column, ident, index, value))
    }

    fn peek(parse: &mut Parser, column: Column) -> Result<Statement> {
        let target = parse.ident()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let array = parse.ident()?;
        let index = parse.expression()?;
        Ok(Statement::Peek(column, target, array, index))
    }
}
