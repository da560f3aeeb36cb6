pub mod commands;
pub mod output;
pub mod repl;
pub mod validate;
