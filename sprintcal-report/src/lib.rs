//! Sprint-level reports over weekly-bucketed JSON data.

pub mod cli;
pub mod error;
pub mod input;
pub mod reports;
