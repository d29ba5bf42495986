//! Desktop tool that lists the packages installed for a Python interpreter and
//! removes all of them, except pip's own tooling, one at a time.

pub mod bootstrap;
pub mod config;
pub mod core;
pub mod errors;
pub mod style;
pub mod types;
pub mod ui;
