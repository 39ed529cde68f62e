pub mod actuator;
pub mod command;
pub mod config;
pub mod interpreter;
pub mod messages;
pub mod motion;
pub mod runtime;
pub mod state;
