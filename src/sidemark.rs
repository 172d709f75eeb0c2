//! Main module for sidemark library functionality

pub mod ast;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod reference;
pub mod testing;
