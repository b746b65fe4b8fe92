//! Terminal output helpers shared by the commands

pub mod report;
