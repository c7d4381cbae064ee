//! Stack script parser
//!
//! This module provides the [`Parser`] struct, the [`ParseError`] type and the
//! statement and value grammar.
//!
//! # Grammar
//!
//! ```text
//! script      := declaration? (statement NEWLINE)* EOF
//! declaration := 'stack' TYPE? INT?
//! statement   := 'push' value | 'pull' INT? | 'drain' | 'trim' | 'clear'
//!              | 'push_batch' list | 'pull_batch'
//! value       := STRING | INT | LONG | DOUBLE | 'true' | 'false' | 'object'
//!              | list | map
//! list        := '[' (value (',' value)*)? ']'
//! map         := '{' (STRING ':' value (',' STRING ':' value)*)? '}'
//! ```
//!
//! Newlines are allowed anywhere inside a list or map literal.

use crate::memory::constants::{DEFAULT_INITIAL_CAPACITY, MAX_PULL_COUNT, MAX_SCRIPT_CAPACITY};
use crate::memory::value::{Tagged, Value, ValueType};
use crate::script::ast::*;
use crate::script::lexer::{LexError, Lexer, Token};
use rustc_hash::FxHashMap;
use std::fmt;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for stack scripts
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse the entire script
    pub fn parse_script(&mut self) -> Result<Script, ParseError> {
        let mut script = Script::new();

        if matches!(self.peek(), Token::Stack(_)) {
            script.declaration = Some(self.parse_declaration()?);
            self.expect_end_of_statement("after stack declaration")?;
        }

        while !self.is_at_end() {
            let statement = self.parse_statement()?;
            self.expect_end_of_statement(&format!("after '{}'", statement.op.keyword()))?;
            script.statements.push(statement);
        }

        Ok(script)
    }

    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let location = self.advance().location(); // 'stack'

        let element_type = if let Token::Ident(name, loc) = self.peek().clone() {
            self.advance();
            let element_type = ValueType::from_name(&name).ok_or_else(|| ParseError {
                message: format!("Unknown element type '{}'", name),
                location: loc,
            })?;
            Some(element_type)
        } else {
            None
        };

        let capacity = if matches!(self.peek(), Token::IntLiteral(..)) {
            self.expect_count("as stack capacity", MAX_SCRIPT_CAPACITY)?
        } else {
            DEFAULT_INITIAL_CAPACITY
        };

        Ok(Declaration {
            element_type,
            capacity,
            location,
        })
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let token = self.advance();
        let location = token.location();

        let op = match token {
            Token::Push(_) => Op::Push(self.parse_value()?),
            Token::Pull(_) => {
                if matches!(self.peek(), Token::IntLiteral(..)) {
                    Op::Pull(self.expect_count("as pull count", MAX_PULL_COUNT)?)
                } else {
                    Op::Pull(1)
                }
            }
            Token::Drain(_) => Op::Drain,
            Token::Trim(_) => Op::Trim,
            Token::Clear(_) => Op::Clear,
            Token::PushBatch(_) => {
                let list_location = self.current_location();
                match self.parse_value()? {
                    Value::List(items) => Op::PushBatch(items),
                    other => {
                        return Err(ParseError {
                            message: format!(
                                "Expected a list after 'push_batch', found {}",
                                other.value_type()
                            ),
                            location: list_location,
                        });
                    }
                }
            }
            Token::PullBatch(_) => Op::PullBatch,
            Token::Stack(_) => {
                return Err(ParseError {
                    message: "Stack declaration must be the first statement".to_string(),
                    location,
                });
            }
            other => {
                return Err(ParseError {
                    message: format!("Expected an operation, found {}", other),
                    location,
                });
            }
        };

        Ok(Statement { op, location })
    }

    /// Parse a value literal
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self.advance();

        let value = match token {
            Token::StringLiteral(s, _) => Value::String(s),
            Token::IntLiteral(n, _) => Value::Integer(n),
            Token::LongLiteral(n, _) => Value::Long(n),
            Token::DoubleLiteral(d, _) => Value::Double(d),
            Token::True(_) => Value::Boolean(true),
            Token::False(_) => Value::Boolean(false),
            Token::Object(_) => Value::Object,
            Token::LBracket(_) => Value::List(self.parse_list_items()?),
            Token::LBrace(_) => Value::Map(self.parse_map_entries()?),
            other => {
                return Err(ParseError {
                    message: format!("Expected a value, found {}", other),
                    location: other.location(),
                });
            }
        };

        Ok(value)
    }

    /// Items after an opening '[' up to and including the closing ']'
    fn parse_list_items(&mut self) -> Result<Vec<Value>, ParseError> {
        let mut items = Vec::new();
        self.skip_newlines();

        if self.match_token(|t| matches!(t, Token::RBracket(_))) {
            return Ok(items);
        }

        loop {
            items.push(self.parse_value()?);
            self.skip_newlines();

            if self.match_token(|t| matches!(t, Token::Comma(_))) {
                self.skip_newlines();
                continue;
            }
            if self.match_token(|t| matches!(t, Token::RBracket(_))) {
                return Ok(items);
            }
            return Err(self.error_here("Expected ',' or ']' in list"));
        }
    }

    /// Entries after an opening '{' up to and including the closing '}'
    fn parse_map_entries(&mut self) -> Result<FxHashMap<String, Value>, ParseError> {
        let mut entries = FxHashMap::default();
        self.skip_newlines();

        if self.match_token(|t| matches!(t, Token::RBrace(_))) {
            return Ok(entries);
        }

        loop {
            let key = match self.advance() {
                Token::StringLiteral(s, _) => s,
                other => {
                    return Err(ParseError {
                        message: format!("Expected a string key in map, found {}", other),
                        location: other.location(),
                    });
                }
            };

            if !self.match_token(|t| matches!(t, Token::Colon(_))) {
                return Err(self.error_here("Expected ':' after map key"));
            }
            self.skip_newlines();

            let value = self.parse_value()?;
            entries.insert(key, value);
            self.skip_newlines();

            if self.match_token(|t| matches!(t, Token::Comma(_))) {
                self.skip_newlines();
                continue;
            }
            if self.match_token(|t| matches!(t, Token::RBrace(_))) {
                return Ok(entries);
            }
            return Err(self.error_here("Expected ',' or '}' in map"));
        }
    }

    // ===== Helper methods =====

    fn expect_count(&mut self, ctx: &str, max: usize) -> Result<usize, ParseError> {
        match self.advance() {
            Token::IntLiteral(n, loc) => {
                let count = usize::try_from(n).map_err(|_| ParseError {
                    message: format!("Expected a non-negative integer {}, found {}", ctx, n),
                    location: loc,
                })?;
                if count > max {
                    return Err(ParseError {
                        message: format!("{} is too large {} (at most {})", count, ctx, max),
                        location: loc,
                    });
                }
                Ok(count)
            }
            other => Err(ParseError {
                message: format!("Expected an integer {}, found {}", ctx, other),
                location: other.location(),
            }),
        }
    }

    fn expect_end_of_statement(&mut self, ctx: &str) -> Result<(), ParseError> {
        match self.peek() {
            Token::Newline(_) => {
                self.advance();
                Ok(())
            }
            Token::Eof(_) => Ok(()),
            _ => Err(self.error_here(&format!("Expected end of line {}", ctx))),
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek(), Token::Newline(_)) {
            self.advance();
        }
    }

    fn match_token(&mut self, pred: impl Fn(&Token) -> bool) -> bool {
        if pred(self.peek()) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error_here(&self, message: &str) -> ParseError {
        ParseError {
            message: format!("{}, found {}", message, self.peek()),
            location: self.current_location(),
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Script {
        Parser::new(source).unwrap().parse_script().unwrap()
    }

    #[test]
    fn test_parse_declaration() {
        let script = parse("stack String 1000\npush \"Hello world\"");

        let declaration = script.declaration.unwrap();
        assert_eq!(declaration.element_type, Some(ValueType::String));
        assert_eq!(declaration.capacity, 1000);
        assert_eq!(script.statements.len(), 1);
        assert_eq!(script.statements[0].op, Op::Push(Value::from("Hello world")));
        assert_eq!(script.statements[0].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_parse_untyped_declaration_defaults() {
        let script = parse("stack\npull");
        let declaration = script.declaration.unwrap();
        assert_eq!(declaration.element_type, None);
        assert_eq!(declaration.capacity, DEFAULT_INITIAL_CAPACITY);

        let script = parse("stack 3");
        assert_eq!(script.declaration.unwrap().capacity, 3);
    }

    #[test]
    fn test_parse_operations() {
        let script = parse("pull\npull 3\ndrain\ntrim\nclear\npush_batch [1, 2]\npull_batch\n");
        let ops: Vec<Op> = script.statements.into_iter().map(|s| s.op).collect();

        assert_eq!(
            ops,
            vec![
                Op::Pull(1),
                Op::Pull(3),
                Op::Drain,
                Op::Trim,
                Op::Clear,
                Op::PushBatch(vec![Value::Integer(1), Value::Integer(2)]),
                Op::PullBatch,
            ]
        );
    }

    #[test]
    fn test_parse_nested_values() {
        let script = parse("push {\n  \"1\": \"String value\",\n  \"list\": [2.123, true, object]\n}");

        match &script.statements[0].op {
            Op::Push(Value::Map(entries)) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries["1"], Value::from("String value"));
                assert_eq!(
                    entries["list"],
                    Value::List(vec![Value::Double(2.123), Value::Boolean(true), Value::Object])
                );
            }
            other => panic!("Expected map push, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_reported() {
        let err = Parser::new("stack Widget").unwrap().parse_script().unwrap_err();
        assert_eq!(err.message, "Unknown element type 'Widget'");
        assert_eq!(err.location, SourceLocation::new(1, 7));
    }

    #[test]
    fn test_late_declaration_is_rejected() {
        let err = Parser::new("push 1\nstack String").unwrap().parse_script().unwrap_err();
        assert_eq!(err.message, "Stack declaration must be the first statement");
        assert_eq!(err.location.line, 2);
    }

    #[test]
    fn test_negative_pull_count_is_rejected() {
        let err = Parser::new("pull -2").unwrap().parse_script().unwrap_err();
        assert!(err.message.contains("non-negative"));
    }

    #[test]
    fn test_oversized_counts_are_rejected() {
        let err = Parser::new("stack String 2147483647")
            .unwrap()
            .parse_script()
            .unwrap_err();
        assert_eq!(
            err.message,
            format!(
                "2147483647 is too large as stack capacity (at most {})",
                MAX_SCRIPT_CAPACITY
            )
        );
        assert_eq!(err.location, SourceLocation::new(1, 14));

        let err = Parser::new("pull 2000000000").unwrap().parse_script().unwrap_err();
        assert!(err.message.contains("too large as pull count"));

        let script = parse(&format!("stack {}\npull {}", MAX_SCRIPT_CAPACITY, MAX_PULL_COUNT));
        assert_eq!(script.declaration.unwrap().capacity, MAX_SCRIPT_CAPACITY);
        assert_eq!(script.statements[0].op, Op::Pull(MAX_PULL_COUNT));
    }

    #[test]
    fn test_two_statements_on_one_line() {
        let err = Parser::new("push 1 pull").unwrap().parse_script().unwrap_err();
        assert!(err.message.starts_with("Expected end of line after 'push'"));
    }

    #[test]
    fn test_push_without_value() {
        let err = Parser::new("push").unwrap().parse_script().unwrap_err();
        assert_eq!(err.message, "Expected a value, found end of file");
    }
}
