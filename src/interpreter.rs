use std::{
    cell::RefCell,
    io::{BufRead, BufReader, Write},
    rc::Rc,
};

use rustc_hash::FxHashMap;

use crate::ast::{BinaryOperator, Expression, Program, Statement};

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown identifier: {0}")]
    UndefinedVariable(String),
    #[error("Input closed while reading {0}")]
    InputClosed(String),
}

/// Tree-walking evaluator. The variable store lives and dies with one run;
/// `run` consumes the interpreter so a store cannot leak into a second
/// program.
pub struct Interpreter {
    variables: FxHashMap<String, i64>,
    input: Rc<RefCell<dyn BufRead>>,
    output: Rc<RefCell<dyn Write>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(
            Rc::new(RefCell::new(BufReader::new(std::io::stdin()))),
            Rc::new(RefCell::new(std::io::stdout())),
        )
    }
}

impl Interpreter {
    pub fn new(input: Rc<RefCell<dyn BufRead>>, output: Rc<RefCell<dyn Write>>) -> Self {
        Self {
            variables: FxHashMap::default(),
            input,
            output,
        }
    }

    pub fn run(mut self, program: &Program) -> Result<(), ExecutionError> {
        for statement in &program.0 {
            self.execute(statement)?;
        }
        Ok(())
    }

    fn execute(&mut self, statement: &Statement) -> Result<(), ExecutionError> {
        match statement {
            Statement::Assignment { target, value } => {
                let value = self.evaluate(value)?;
                self.variables.insert(target.clone(), value);
            }
            Statement::Read(targets) => {
                for target in targets {
                    let value = self.prompt(target)?;
                    self.variables.insert(target.clone(), value);
                }
            }
            Statement::Write(values) => {
                let values = values
                    .iter()
                    .map(|value| self.evaluate(value))
                    .collect::<Result<Vec<_>, _>>()?;
                let line = values
                    .iter()
                    .map(i64::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(self.output.borrow_mut(), "{}", line)?;
            }
        }
        Ok(())
    }

    fn evaluate(&self, expression: &Expression) -> Result<i64, ExecutionError> {
        match expression {
            Expression::Literal(value) => Ok(*value),
            Expression::Variable(name) => self
                .variables
                .get(name)
                .copied()
                .ok_or_else(|| ExecutionError::UndefinedVariable(name.clone())),
            Expression::Grouped(inner) => self.evaluate(inner),
            Expression::Chain { first, links } => {
                // Left-to-right fold in source order
                let mut total = self.evaluate(first)?;
                for (operator, operand) in links {
                    let value = self.evaluate(operand)?;
                    total = match operator {
                        BinaryOperator::Add => total + value,
                        BinaryOperator::Sub => total - value,
                    };
                }
                Ok(total)
            }
        }
    }

    // Prompts until the response is a plain digit run that fits an i64.
    // There is no retry limit; only a closed input stream ends the loop.
    fn prompt(&mut self, name: &str) -> Result<i64, ExecutionError> {
        let mut message = format!("{} = ? ", name);
        loop {
            {
                let mut output = self.output.borrow_mut();
                write!(output, "{}", message)?;
                output.flush()?;
            }

            let mut line = String::new();
            let read = self.input.borrow_mut().read_line(&mut line)?;
            if read == 0 {
                return Err(ExecutionError::InputClosed(name.to_string()));
            }

            let response = line.trim();
            if !response.is_empty() && response.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(value) = response.parse() {
                    return Ok(value);
                }
            }

            message = format!("Please enter an integer.\n{} = ? ", name);
        }
    }
}
