// assorted utilities
pub mod config;
pub mod error;

// building a macro
pub mod action;
pub mod key;
pub mod record;

// output
pub mod run;
pub mod xml;
