//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The command-line adapter lives under [`cli`]; it plays the role of the
//! view, validating raw input and rendering results.

pub mod cli;
