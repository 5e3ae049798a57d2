use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct Program(pub Vec<Statement>);

#[derive(Debug, Clone)]
pub enum Statement {
    Assignment { target: String, value: Expression },
    Read(Vec<String>),
    Write(Vec<Expression>),
}

#[derive(Debug, Clone)]
pub enum Expression {
    Literal(i64),
    Variable(String),
    Grouped(Box<Expression>),
    /// A run of `+`/`-` operands in source order. Stored flat so that both
    /// consumers fold it left to right; a lone operand is never wrapped.
    Chain {
        first: Box<Expression>,
        links: Vec<(BinaryOperator, Expression)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BEGIN")?;
        for statement in &self.0 {
            writeln!(f, "{}", statement)?;
        }
        write!(f, "END")
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Assignment { target, value } => write!(f, "{} := {};", target, value),
            Statement::Read(targets) => write!(f, "READ({});", targets.join(", ")),
            Statement::Write(values) => {
                write!(f, "WRITE(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, ");")
            }
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Grouped(inner) => write!(f, "({})", inner),
            Expression::Chain { first, links } => {
                write!(f, "{}", first)?;
                for (operator, operand) in links {
                    write!(f, " {} {}", operator, operand)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Sub => write!(f, "-"),
        }
    }
}
