//! Circos inputs and execution.
//!
//! - [`config`]: renders the `.conf` files from the plot style
//! - [`runner`]: locates and runs the Circos and Prokka executables

pub mod config;
pub mod runner;
