use std::{cell::RefCell, io::Cursor, rc::Rc};

use minilang::{generator::Generator, interpreter::Interpreter};

fn run_program(source: &str, input: &str) -> String {
    let program = minilang::parser::parse(source).expect("Parse should work on valid program");
    let input = Rc::new(RefCell::new(Cursor::new(input.as_bytes().to_vec())));
    let output = Rc::new(RefCell::new(Vec::new()));
    let interpreter = Interpreter::new(input, output.clone());
    interpreter
        .run(&program)
        .expect("Run should work on valid program");
    String::from_utf8(output.take()).expect("Output should be valid UTF-8")
}

fn run_program_error(source: &str, input: &str) -> String {
    let program = minilang::parser::parse(source).expect("Parse should work on valid program");
    let input = Rc::new(RefCell::new(Cursor::new(input.as_bytes().to_vec())));
    let output = Rc::new(RefCell::new(Vec::new()));
    let interpreter = Interpreter::new(input, output);
    interpreter
        .run(&program)
        .expect_err("Run should fail")
        .to_string()
}

#[test]
fn test_write_sum() {
    let source = "BEGIN a := 3; b := 4; WRITE(a + b); END";
    assert_eq!(run_program(source, ""), "7\n");
}

#[test]
fn test_chain_folds_left_to_right() {
    // 10 - 3 = 7, 7 - 2 = 5; not 10 - (3 - 2) = 9
    let source = "BEGIN a := 10; a := a - 3 - 2; WRITE(a); END";
    assert_eq!(run_program(source, ""), "5\n");
}

#[test]
fn test_grouping_overrides_the_fold() {
    let source = "BEGIN a := 10 - (3 - 2); WRITE(a); END";
    assert_eq!(run_program(source, ""), "9\n");
}

#[test]
fn test_long_chain() {
    let source = "BEGIN WRITE(1 + 2 - 3 + 4 - 5 + 6); END";
    assert_eq!(run_program(source, ""), "5\n");
}

#[test]
fn test_write_separates_values_with_spaces() {
    let source = "BEGIN a := 1; WRITE(a, a + 1, 3); END";
    assert_eq!(run_program(source, ""), "1 2 3\n");
}

#[test]
fn test_reassignment_overwrites() {
    let source = "BEGIN a := 1; a := a + 1; a := a + 1; WRITE(a); END";
    assert_eq!(run_program(source, ""), "3\n");
}

#[test]
fn test_read_stores_input() {
    let source = "BEGIN READ(x); WRITE(x); END";
    assert_eq!(run_program(source, "7\n"), "x = ? 7\n");
}

#[test]
fn test_read_reprompts_on_bad_input() {
    let source = "BEGIN READ(x); WRITE(x); END";
    let output = run_program(source, "abc\n7\n");
    assert_eq!(output, "x = ? Please enter an integer.\nx = ? 7\n");
}

#[test]
fn test_read_rejects_signed_input() {
    // READ only accepts a plain digit run, unlike source literals
    let source = "BEGIN READ(x); WRITE(x); END";
    let output = run_program(source, "-7\n7\n");
    assert_eq!(output, "x = ? Please enter an integer.\nx = ? 7\n");
}

#[test]
fn test_read_multiple_targets() {
    let source = "BEGIN READ(x, y); WRITE(x - y); END";
    assert_eq!(run_program(source, "10\n4\n"), "x = ? y = ? 6\n");
}

#[test]
fn test_undefined_variable() {
    let source = "BEGIN a := b; END";
    assert_eq!(run_program_error(source, ""), "Unknown identifier: b");
}

#[test]
fn test_read_with_closed_input() {
    let source = "BEGIN READ(x); END";
    assert_eq!(run_program_error(source, ""), "Input closed while reading x");
}

#[test]
fn test_empty_program_produces_no_output() {
    assert_eq!(run_program("BEGIN END", ""), "");
}

#[test]
fn test_generator_matches_interpreter_shape() {
    // The generated text re-linearizes the same flat chain the
    // interpreter folds, so left-associative JavaScript agrees with it.
    let source = "BEGIN a := 10; a := a - 3 - 2; WRITE(a); END";
    assert_eq!(run_program(source, ""), "5\n");

    let program = minilang::parser::parse(source).unwrap();
    let generated = Generator::new().generate(&program);
    assert_eq!(
        generated,
        "var a = 10;\na = a - 3 - 2;\nconsole.log(a);"
    );
}
