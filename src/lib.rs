pub mod ast;
pub mod generator;
pub mod interpreter;
pub mod parser;
pub mod tokenizer;
