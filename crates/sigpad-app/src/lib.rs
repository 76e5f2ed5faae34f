//! SigPad Application
//!
//! Command line replay of captured signatures on native targets, and the
//! JavaScript binding on WASM.

mod cli;

pub use cli::{AppError, CliOptions, RunSummary, USAGE, parse_args, run};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::SignaturePad;
