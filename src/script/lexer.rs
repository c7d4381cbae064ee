//! Lexer (tokenizer) for stack scripts
//!
//! Converts raw script text into a flat [`Token`] stream consumed by the parser.
//! Newlines are significant (they terminate statements) and are emitted as
//! [`Token::Newline`]; runs of blank lines and comment-only lines collapse into
//! a single newline token.

use super::ast::SourceLocation;
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i32, SourceLocation),
    LongLiteral(i64, SourceLocation),
    DoubleLiteral(f64, SourceLocation),
    StringLiteral(String, SourceLocation),

    // Identifiers (type names)
    Ident(String, SourceLocation),

    // Keywords
    Stack(SourceLocation),
    Push(SourceLocation),
    Pull(SourceLocation),
    Drain(SourceLocation),
    Trim(SourceLocation),
    Clear(SourceLocation),
    PushBatch(SourceLocation),
    PullBatch(SourceLocation),
    True(SourceLocation),
    False(SourceLocation),
    Object(SourceLocation),

    // Punctuation
    LBracket(SourceLocation), // [
    RBracket(SourceLocation), // ]
    LBrace(SourceLocation),   // {
    RBrace(SourceLocation),   // }
    Colon(SourceLocation),    // :
    Comma(SourceLocation),    // ,

    // Statement terminator
    Newline(SourceLocation),

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::LongLiteral(_, loc)
            | Token::DoubleLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Stack(loc)
            | Token::Push(loc)
            | Token::Pull(loc)
            | Token::Drain(loc)
            | Token::Trim(loc)
            | Token::Clear(loc)
            | Token::PushBatch(loc)
            | Token::PullBatch(loc)
            | Token::True(loc)
            | Token::False(loc)
            | Token::Object(loc)
            | Token::LBracket(loc)
            | Token::RBracket(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::Colon(loc)
            | Token::Comma(loc)
            | Token::Newline(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "integer literal {}", n),
            Token::LongLiteral(n, _) => write!(f, "long literal {}L", n),
            Token::DoubleLiteral(d, _) => write!(f, "double literal {:?}", d),
            Token::StringLiteral(s, _) => write!(f, "string literal \"{}\"", s),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Stack(_) => write!(f, "'stack'"),
            Token::Push(_) => write!(f, "'push'"),
            Token::Pull(_) => write!(f, "'pull'"),
            Token::Drain(_) => write!(f, "'drain'"),
            Token::Trim(_) => write!(f, "'trim'"),
            Token::Clear(_) => write!(f, "'clear'"),
            Token::PushBatch(_) => write!(f, "'push_batch'"),
            Token::PullBatch(_) => write!(f, "'pull_batch'"),
            Token::True(_) => write!(f, "'true'"),
            Token::False(_) => write!(f, "'false'"),
            Token::Object(_) => write!(f, "'object'"),
            Token::LBracket(_) => write!(f, "'['"),
            Token::RBracket(_) => write!(f, "']'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::Colon(_) => write!(f, "':'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Newline(_) => write!(f, "end of line"),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for stack scripts
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given script.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens: Vec<Token> = Vec::new();

        loop {
            self.skip_blanks_and_comments();

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            if self.peek() == Some('\n') {
                let loc = self.current_location();
                self.advance();
                // Collapse blank lines; never start the stream with a newline
                if !matches!(tokens.last(), None | Some(Token::Newline(_))) {
                    tokens.push(Token::Newline(loc));
                }
                continue;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            '"' => self.string_literal(),

            '0'..='9' => self.number_literal(ch),
            '-' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.number_literal(ch),

            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            '[' => Ok(Token::LBracket(loc)),
            ']' => Ok(Token::RBracket(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            ':' => Ok(Token::Colon(loc)),
            ',' => Ok(Token::Comma(loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse string literal
    fn string_literal(&mut self) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column - 1);
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            if ch == '"' {
                self.advance(); // consume closing quote
                return Ok(Token::StringLiteral(string, loc));
            }

            if ch == '\n' {
                break;
            }

            if ch == '\\' {
                self.advance();
                let escaped = self.advance().ok_or_else(|| LexError {
                    message: "Unexpected end of file in string literal".to_string(),
                    location: self.current_location(),
                })?;

                let unescaped = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '"' => '"',
                    '0' => '\0',
                    _ => {
                        return Err(LexError {
                            message: format!("Unknown escape sequence: \\{}", escaped),
                            location: self.current_location(),
                        });
                    }
                };
                string.push(unescaped);
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse numeric literal: `42`, `-7`, `42L`, `1.123`
    fn number_literal(&mut self, first: char) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column - 1);
        let mut num_str = String::new();
        num_str.push(first);
        let mut is_double = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '_' {
                self.advance();
                if ch != '_' {
                    num_str.push(ch);
                }
            } else if ch == '.'
                && !is_double
                && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_double = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if is_double {
            let value = num_str.parse::<f64>().map_err(|_| LexError {
                message: format!("Invalid double literal: {}", num_str),
                location: loc,
            })?;
            return Ok(Token::DoubleLiteral(value, loc));
        }

        if self.peek() == Some('L') {
            self.advance();
            let value = num_str.parse::<i64>().map_err(|_| LexError {
                message: format!("Invalid long literal: {}L", num_str),
                location: loc,
            })?;
            return Ok(Token::LongLiteral(value, loc));
        }

        let value = num_str.parse::<i32>().map_err(|_| LexError {
            message: format!(
                "Invalid integer literal: {} (use an L suffix for long values)",
                num_str
            ),
            location: loc,
        })?;

        Ok(Token::IntLiteral(value, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column - 1);
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let token = match ident.as_str() {
            "stack" => Token::Stack(loc),
            "push" => Token::Push(loc),
            "pull" => Token::Pull(loc),
            "drain" => Token::Drain(loc),
            "trim" => Token::Trim(loc),
            "clear" => Token::Clear(loc),
            "push_batch" => Token::PushBatch(loc),
            "pull_batch" => Token::PullBatch(loc),
            "true" => Token::True(loc),
            "false" => Token::False(loc),
            "object" => Token::Object(loc),
            _ => Token::Ident(ident, loc),
        };

        Ok(token)
    }

    /// Skip spaces, tabs and comments, stopping at a newline
    fn skip_blanks_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.advance();
                }
                Some('#') => self.skip_line_comment(),
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    /// Skip to (but not past) the end of the line
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_tokens() {
        let mut lexer = Lexer::new("stack String 1000\npush \"Hello world\"\npull");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Stack(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "String"));
        assert!(matches!(tokens[2], Token::IntLiteral(1000, _)));
        assert!(matches!(tokens[3], Token::Newline(_)));
        assert!(matches!(tokens[4], Token::Push(_)));
        assert!(matches!(tokens[5], Token::StringLiteral(ref s, _) if s == "Hello world"));
        assert!(matches!(tokens[6], Token::Newline(_)));
        assert!(matches!(tokens[7], Token::Pull(_)));
        assert!(matches!(tokens[8], Token::Eof(_)));
    }

    #[test]
    fn test_number_literals() {
        let mut lexer = Lexer::new("1_000_000_000 1000000000000000000L 1.123 -4");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::IntLiteral(1_000_000_000, _)));
        assert!(matches!(tokens[1], Token::LongLiteral(1_000_000_000_000_000_000, _)));
        assert!(matches!(tokens[2], Token::DoubleLiteral(d, _) if d == 1.123));
        assert!(matches!(tokens[3], Token::IntLiteral(-4, _)));
    }

    #[test]
    fn test_integer_overflow_needs_suffix() {
        let mut lexer = Lexer::new("push 3000000000");
        let err = lexer.tokenize().unwrap_err();
        assert!(err.message.contains("L suffix"));
        assert_eq!(err.location, SourceLocation::new(1, 6));
    }

    #[test]
    fn test_comments_and_blank_lines_collapse() {
        let mut lexer = Lexer::new("# header\n\npush 1 // trailing\n\n\n# only comment\npull\n");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Push(_)));
        assert!(matches!(tokens[1], Token::IntLiteral(1, _)));
        assert!(matches!(tokens[2], Token::Newline(_)));
        assert!(matches!(tokens[3], Token::Pull(_)));
        assert!(matches!(tokens[4], Token::Newline(_)));
        assert!(matches!(tokens[5], Token::Eof(_)));
    }

    #[test]
    fn test_string_escapes() {
        let mut lexer = Lexer::new(r#""tab\there \"quoted\"""#);
        let tokens = lexer.tokenize().unwrap();

        match &tokens[0] {
            Token::StringLiteral(s, _) => assert_eq!(s, "tab\there \"quoted\""),
            _ => panic!("Expected string literal"),
        }
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let mut lexer = Lexer::new("push \"open\npull");
        let err = lexer.tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.location.line, 1);
    }
}
