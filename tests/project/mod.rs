//! Project layer tests: loading documents from disk.

pub mod tests_workspace_loader;
