use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(usize),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(Rc<str>),
    LParen,
    RParen,
    Comma,
    Semicolon,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(String),
    Real(String),
    Text(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Integer(s) => write!(f, "{}", s),
            Real(s) => write!(f, "{}", s),
            Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    Int,
    Real,
    Boolean,
    Array,
    Set,
    MoveTo,
    DrawTo,
    Circle,
    Rect,
    Tri,
    Pen,
    PenSize,
    Write,
    Clear,
    Reset,
    If,
    Else,
    End,
    While,
    For,
    To,
    Step,
    Method,
    Call,
    Poke,
    Peek,
    Filled,
    True,
    False,
}

impl Word {
    /// Keywords are matched case-insensitively; the lexer hands in
    /// lower-cased candidates.
    pub fn from_str(s: &str) -> Option<Word> {
        use Word::*;
        match s {
            "int" => Some(Int),
            "real" => Some(Real),
            "boolean" => Some(Boolean),
            "array" => Some(Array),
            "set" => Some(Set),
            "moveto" => Some(MoveTo),
            "drawto" => Some(DrawTo),
            "circle" => Some(Circle),
            "rect" => Some(Rect),
            "tri" => Some(Tri),
            "pen" => Some(Pen),
            "pensize" => Some(PenSize),
            "write" => Some(Write),
            "clear" => Some(Clear),
            "reset" => Some(Reset),
            "if" => Some(If),
            "else" => Some(Else),
            "end" => Some(End),
            "while" => Some(While),
            "for" => Some(For),
            "to" => Some(To),
            "step" => Some(Step),
            "method" => Some(Method),
            "call" => Some(Call),
            "poke" => Some(Poke),
            "peek" => Some(Peek),
            "filled" => Some(Filled),
            "true" => Some(True),
            "false" => Some(False),
            _ => None,
        }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Int => write!(f, "int"),
            Real => write!(f, "real"),
            Boolean => write!(f, "boolean"),
            Array => write!(f, "array"),
            Set => write!(f, "set"),
            MoveTo => write!(f, "moveto"),
            DrawTo => write!(f, "drawto"),
            Circle => write!(f, "circle"),
            Rect => write!(f, "rect"),
            Tri => write!(f, "tri"),
            Pen => write!(f, "pen"),
            PenSize => write!(f, "pensize"),
            Write => write!(f, "write"),
            Clear => write!(f, "clear"),
            Reset => write!(f, "reset"),
            If => write!(f, "if"),
            Else => write!(f, "else"),
            End => write!(f, "end"),
            While => write!(f, "while"),
            For => write!(f, "for"),
            To => write!(f, "to"),
            Step => write!(f, "step"),
            Method => write!(f, "method"),
            Call => write!(f, "call"),
            Poke => write!(f, "poke"),
            Peek => write!(f, "peek"),
            Filled => write!(f, "filled"),
            True => write!(f, "true"),
            False => write!(f, "false"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Multiply,
    Divide,
    Modulo,
    Plus,
    Minus,
    Equal,
    EqualEqual,
    NotEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Modulo => write!(f, "%"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            EqualEqual => write!(f, "=="),
            NotEqual => write!(f, "<>"),
            BangEqual => write!(f, "!="),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "!"),
            And => write!(f, "&&"),
            Or => write!(f, "||"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Word::from_str("moveto"), Some(Word::MoveTo));
        assert_eq!(Word::from_str("pickles"), None);
    }
}
