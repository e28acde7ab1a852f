use super::token::*;

/// Tokenize one source line. Keywords and identifiers are case-insensitive;
/// everything alphabetic is lower-cased here so later stages never compare
/// case again. Lines whose first non-blank character is `*` are comments and
/// lex to an empty token list.
pub fn lex(s: &str) -> Vec<Token> {
    Lexer::lex(s)
}

fn is_sketch_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_sketch_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_sketch_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        if s.trim_start_matches(is_sketch_whitespace).starts_with('*') {
            return vec![];
        }
        let mut tokens: Vec<Token> = Lexer {
            chars: s.chars().peekable(),
        }
        .collect();
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
        tokens
    }

    fn whitespace(&mut self) -> Token {
        let mut len = 0;
        loop {
            self.chars.next();
            len += 1;
            if let Some(pk) = self.chars.peek() {
                if is_sketch_whitespace(*pk) {
                    continue;
                }
            }
            return Token::Whitespace(len);
        }
    }

    fn number(&mut self) -> Token {
        let mut s = String::new();
        let mut decimal = false;
        loop {
            let ch = match self.chars.next() {
                Some(c) => c,
                None => break,
            };
            s.push(ch);
            if ch == '.' {
                decimal = true;
            }
            if let Some(pk) = self.chars.peek() {
                if is_sketch_digit(*pk) {
                    continue;
                }
                if !decimal && *pk == '.' {
                    continue;
                }
            }
            break;
        }
        if decimal {
            Token::Literal(Literal::Real(s))
        } else {
            Token::Literal(Literal::Integer(s))
        }
    }

    fn string(&mut self) -> Token {
        let mut s = String::new();
        self.chars.next();
        loop {
            if let Some(ch) = self.chars.next() {
                if ch != '"' {
                    s.push(ch);
                    continue;
                }
            }
            return Token::Literal(Literal::Text(s));
        }
    }

    fn alphabetic(&mut self) -> Token {
        let mut s = String::new();
        loop {
            let ch = match self.chars.next() {
                Some(ch) => ch.to_ascii_lowercase(),
                None => break,
            };
            s.push(ch);
            if let Some(pk) = self.chars.peek() {
                if is_ident_char(*pk) {
                    continue;
                }
            }
            break;
        }
        match Word::from_str(&s) {
            Some(word) => Token::Word(word),
            None => Token::Ident(s.into()),
        }
    }

    fn minutia(&mut self) -> Token {
        use Operator::*;
        let ch = match self.chars.next() {
            Some(ch) => ch,
            None => return Token::Unknown(String::new()),
        };
        let followed_by = |this: &mut Self, next: char| -> bool {
            if this.chars.peek() == Some(&next) {
                this.chars.next();
                return true;
            }
            false
        };
        match ch {
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '*' => Token::Operator(Multiply),
            '/' => Token::Operator(Divide),
            '%' => Token::Operator(Modulo),
            '+' => Token::Operator(Plus),
            '-' => Token::Operator(Minus),
            '=' => {
                if followed_by(self, '=') {
                    Token::Operator(EqualEqual)
                } else {
                    Token::Operator(Equal)
                }
            }
            '<' => {
                if followed_by(self, '=') {
                    Token::Operator(LessEqual)
                } else if followed_by(self, '>') {
                    Token::Operator(NotEqual)
                } else {
                    Token::Operator(Less)
                }
            }
            '>' => {
                if followed_by(self, '=') {
                    Token::Operator(GreaterEqual)
                } else {
                    Token::Operator(Greater)
                }
            }
            '!' => {
                if followed_by(self, '=') {
                    Token::Operator(BangEqual)
                } else {
                    Token::Operator(Not)
                }
            }
            '&' => {
                if followed_by(self, '&') {
                    Token::Operator(And)
                } else {
                    Token::Unknown("&".to_string())
                }
            }
            '|' => {
                if followed_by(self, '|') {
                    Token::Operator(Or)
                } else {
                    Token::Unknown("|".to_string())
                }
            }
            _ => Token::Unknown(ch.to_string()),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = self.chars.peek()?;
        if is_sketch_whitespace(*pk) {
            return Some(self.whitespace());
        }
        if is_sketch_digit(*pk) || *pk == '.' {
            return Some(self.number());
        }
        if is_sketch_alphabetic(*pk) {
            return Some(self.alphabetic());
        }
        if *pk == '"' {
            return Some(self.string());
        }
        Some(self.minutia())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_and_idents() {
        let tokens = lex("MoveTo width 10");
        assert_eq!(
            tokens,
            vec![
                Token::Word(Word::MoveTo),
                Token::Whitespace(1),
                Token::Ident("width".into()),
                Token::Whitespace(1),
                Token::Literal(Literal::Integer("10".to_string())),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lex("2.5"),
            vec![Token::Literal(Literal::Real("2.5".to_string()))]
        );
        assert_eq!(
            lex("42"),
            vec![Token::Literal(Literal::Integer("42".to_string()))]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = lex("a<=b&&!c");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".into()),
                Token::Operator(Operator::LessEqual),
                Token::Ident("b".into()),
                Token::Operator(Operator::And),
                Token::Operator(Operator::Not),
                Token::Ident("c".into()),
            ]
        );
    }

    #[test]
    fn test_comment_line() {
        assert!(lex("  * a remark about nothing").is_empty());
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(
            lex("\"hi there\""),
            vec![Token::Literal(Literal::Text("hi there".to_string()))]
        );
    }

    #[test]
    fn test_roundtrip_display() {
        let source = "for i = 1 to 10 step 2";
        let s: String = lex(source).iter().map(|t| t.to_string()).collect();
        assert_eq!(s, source);
    }
}
