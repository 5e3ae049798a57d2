use rustc_hash::FxHashSet;

use crate::ast::{Expression, Program, Statement};

/// Lowers a program to equivalent JavaScript. The declared-name set lives
/// for one run; `generate` consumes the generator so declarations cannot
/// leak into a second program.
#[derive(Default)]
pub struct Generator {
    declared: FxHashSet<String>,
    lines: Vec<String>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(mut self, program: &Program) -> String {
        for statement in &program.0 {
            self.lower(statement);
        }
        self.lines.join("\n")
    }

    fn lower(&mut self, statement: &Statement) {
        match statement {
            Statement::Assignment { target, value } => {
                let line = format!("{} = {};", target, expression(value));
                self.declare(target, line);
            }
            Statement::Read(targets) => {
                for target in targets {
                    let line = format!(
                        "{} = parseInt(prompt(\"{} = ? \"), 10);",
                        target, target
                    );
                    self.declare(target, line);
                }
            }
            Statement::Write(values) => {
                let args = values
                    .iter()
                    .map(expression)
                    .collect::<Vec<_>>()
                    .join(", ");
                self.lines.push(format!("console.log({});", args));
            }
        }
    }

    // The first statement to touch a name carries its `var`; later
    // assignments and reads reuse the declaration.
    fn declare(&mut self, name: &str, line: String) {
        if self.declared.insert(name.to_string()) {
            self.lines.push(format!("var {}", line));
        } else {
            self.lines.push(line);
        }
    }
}

fn expression(expression: &Expression) -> String {
    match expression {
        Expression::Literal(value) => value.to_string(),
        Expression::Variable(name) => name.clone(),
        Expression::Grouped(inner) => format!("({})", self::expression(inner)),
        Expression::Chain { first, links } => {
            // No parentheses around the re-linearized chain: JavaScript
            // treats `+` and `-` as equal-precedence and left-associative,
            // which matches the fold the interpreter performs.
            let mut text = self::expression(first);
            for (operator, operand) in links {
                text.push_str(&format!(" {} {}", operator, self::expression(operand)));
            }
            text
        }
    }
}
