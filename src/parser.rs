use crate::{
    ast::{BinaryOperator, Expression, Program, Statement},
    tokenizer::{Token, Tokenizer},
};

#[derive(Debug, thiserror::Error)]
#[error("Expected {expected}, instead got {found}")]
pub struct ParseError {
    pub expected: &'static str,
    pub found: String,
}

/// Parses `source` into a program, aborting on the first grammar mismatch.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source).program()
}

pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut tokenizer = Tokenizer::new(source);
        let current = tokenizer.next_token();
        Self { tokenizer, current }
    }

    // BEGIN statement* END
    pub fn program(&mut self) -> Result<Program, ParseError> {
        self.expect(&Token::Begin, "BEGIN")?;

        let mut statements = Vec::new();
        while matches!(
            self.current,
            Token::Identifier(_) | Token::Read | Token::Write
        ) {
            statements.push(self.statement()?);
        }

        self.expect(&Token::End, "END")?;
        Ok(Program(statements))
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        let statement = match &self.current {
            Token::Identifier(name) => {
                // ID := expression
                let target = name.clone();
                self.advance();
                self.expect(&Token::Assign, ":=")?;
                let value = self.expression()?;
                Statement::Assignment { target, value }
            }
            Token::Read => {
                // READ ( ID [, ID]* )
                self.advance();
                self.expect(&Token::LeftParen, "(")?;
                let mut targets = vec![self.identifier()?];
                while self.current == Token::Comma {
                    self.advance();
                    targets.push(self.identifier()?);
                }
                self.expect(&Token::RightParen, ")")?;
                Statement::Read(targets)
            }
            Token::Write => {
                // WRITE ( expression [, expression]* )
                self.advance();
                self.expect(&Token::LeftParen, "(")?;
                let mut values = vec![self.expression()?];
                while self.current == Token::Comma {
                    self.advance();
                    values.push(self.expression()?);
                }
                self.expect(&Token::RightParen, ")")?;
                Statement::Write(values)
            }
            _ => return Err(self.unexpected("a statement")),
        };

        self.expect(&Token::Semicolon, ";")?;
        Ok(statement)
    }

    // Operands joined by `+`/`-` collect into one flat chain; a lone
    // operand stays unwrapped.
    fn expression(&mut self) -> Result<Expression, ParseError> {
        let first = self.factor()?;

        let mut links = Vec::new();
        loop {
            let operator = match self.current {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            links.push((operator, self.factor()?));
        }

        if links.is_empty() {
            Ok(first)
        } else {
            Ok(Expression::Chain {
                first: Box::new(first),
                links,
            })
        }
    }

    fn factor(&mut self) -> Result<Expression, ParseError> {
        match &self.current {
            Token::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(&Token::RightParen, ")")?;
                Ok(Expression::Grouped(Box::new(inner)))
            }
            Token::Int(value) => {
                let value = *value;
                self.advance();
                Ok(Expression::Literal(value))
            }
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expression::Variable(name))
            }
            _ => Err(self.unexpected("a (, an integer, or an identifier")),
        }
    }

    fn identifier(&mut self) -> Result<String, ParseError> {
        match &self.current {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn advance(&mut self) {
        self.current = self.tokenizer.next_token();
    }

    fn expect(&mut self, token: &Token, expected: &'static str) -> Result<(), ParseError> {
        if &self.current == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError {
            expected,
            found: self.current.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_program() {
        let program = parse("BEGIN END").unwrap();
        assert!(program.0.is_empty());
    }

    #[test]
    fn test_statements_render_back() {
        let program = parse("BEGIN a := 1; READ(x, y); WRITE(a + x, y); END").unwrap();
        assert_eq!(
            program.to_string(),
            "BEGIN\na := 1;\nREAD(x, y);\nWRITE(a + x, y);\nEND"
        );
    }

    #[test]
    fn test_chain_is_flat() {
        let program = parse("BEGIN a := 10 - 3 - 2 + b; END").unwrap();
        let Statement::Assignment { value, .. } = &program.0[0] else {
            panic!("expected an assignment");
        };
        let Expression::Chain { first, links } = value else {
            panic!("expected a chain");
        };
        assert!(matches!(**first, Expression::Literal(10)));
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].0, BinaryOperator::Sub);
        assert_eq!(links[1].0, BinaryOperator::Sub);
        assert_eq!(links[2].0, BinaryOperator::Add);
    }

    #[test]
    fn test_lone_operand_is_not_wrapped() {
        let program = parse("BEGIN a := 1; END").unwrap();
        let Statement::Assignment { value, .. } = &program.0[0] else {
            panic!("expected an assignment");
        };
        assert!(matches!(value, Expression::Literal(1)));
    }

    #[test]
    fn test_grouped_expression() {
        let program = parse("BEGIN a := 10 - (3 - 2); END").unwrap();
        let Statement::Assignment { value, .. } = &program.0[0] else {
            panic!("expected an assignment");
        };
        let Expression::Chain { links, .. } = value else {
            panic!("expected a chain");
        };
        assert!(matches!(links[0].1, Expression::Grouped(_)));
    }

    #[test]
    fn test_missing_begin() {
        let error = parse("a := 1; END").unwrap_err();
        assert_eq!(error.to_string(), "Expected BEGIN, instead got a");
    }

    #[test]
    fn test_missing_semicolon() {
        let error = parse("BEGIN a := 1 END").unwrap_err();
        assert_eq!(error.to_string(), "Expected ;, instead got END");
    }

    #[test]
    fn test_missing_operand() {
        let error = parse("BEGIN a := ; END").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Expected a (, an integer, or an identifier, instead got ;"
        );
    }

    #[test]
    fn test_missing_end() {
        let error = parse("BEGIN a := 1;").unwrap_err();
        assert_eq!(error.to_string(), "Expected END, instead got end of file");
    }

    #[test]
    fn test_read_requires_identifier() {
        let error = parse("BEGIN READ(); END").unwrap_err();
        assert_eq!(error.to_string(), "Expected an identifier, instead got )");
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let error = parse("BEGIN a := 1 ?! ; END").unwrap_err();
        assert_eq!(error.to_string(), "Expected ;, instead got ?!");
    }
}
