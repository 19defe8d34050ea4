//! Input handling module

pub mod path_resolver;

pub use path_resolver::{resolve_input, resolve_inputs, ResolvedInput};
