//! IDE layer tests: engine façade, attribute strategies, completion, diagnostics.

pub mod tests_completion;
pub mod tests_diagnostics;
