// src/exec/mod.rs

//! Test command resolution and execution.
//!
//! - [`dispatch`] maps a [`TestCommand`] onto the shell command line to run.
//! - [`backend`] provides the `CommandRunner` trait and the production
//!   `ShellRunner`, which tests replace with a fake.

pub mod backend;
pub mod dispatch;

pub use backend::{CommandRunner, RunReport, ShellRunner};
pub use dispatch::{resolve, TestCommand, TestProgram};
