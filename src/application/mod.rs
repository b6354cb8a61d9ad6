pub mod cli;
pub mod console;
mod view;
