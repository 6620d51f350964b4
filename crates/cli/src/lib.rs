//! axisdeck CLI library.

pub mod cli;
pub mod report;
pub mod session;
