//! Grammar constants.
//!
//! The repeat weights below bound how often each production may fire within
//! one visit of its parent. They are fixed at compile time; the builder
//! methods exist so tests and harnesses can narrow the grammar.

/// Pragmas of which any subset may appear in a pragma block.
pub const GENERIC_PRAGMAS: &[&str] = &[
    "pragma solidity >= 0.0.0;",
    "pragma experimental SMTChecker;",
];

/// ABI coder pragmas. Every pragma block carries exactly one of these.
pub const ABI_CODER_PRAGMAS: &[&str] = &["pragma abicoder v1;", "pragma abicoder v2;"];

/// Grammar configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) max_source_units: u32,
    pub(crate) max_imports: u32,
    pub(crate) max_functions: u32,
    pub(crate) max_free_functions: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_source_units: 3,
            max_imports: 2,
            max_functions: 4,
            max_free_functions: 2,
        }
    }
}

impl Config {
    /// Upper bound on source units per test case.
    pub fn with_max_source_units(mut self, n: u32) -> Self {
        self.max_source_units = n;
        self
    }

    /// Upper bound on import directives per source unit.
    pub fn with_max_imports(mut self, n: u32) -> Self {
        self.max_imports = n;
        self
    }

    /// Upper bound on member functions per contract.
    pub fn with_max_functions(mut self, n: u32) -> Self {
        self.max_functions = n;
        self
    }

    /// Upper bound on free functions per source unit.
    pub fn with_max_free_functions(mut self, n: u32) -> Self {
        self.max_free_functions = n;
        self
    }

    pub fn max_source_units(&self) -> u32 {
        self.max_source_units
    }

    pub fn max_imports(&self) -> u32 {
        self.max_imports
    }

    pub fn max_functions(&self) -> u32 {
        self.max_functions
    }

    pub fn max_free_functions(&self) -> u32 {
        self.max_free_functions
    }
}
