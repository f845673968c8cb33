//! The per-lexical-scope report: one function, method, or closure, plus the
//! module-wide aggregate (which is itself a `FunctionReport` with `name =
//! None`).

use serde::{Deserialize, Serialize};

use crate::halstead::HalsteadPair;

/// A source line range, as supplied by the syntax tree's optional `loc`
/// field (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocRange {
    pub start_line: u32,
    pub end_line: u32,
}

/// Logical and physical source-line-of-code counts for one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SlocCounts {
    /// Total line span of the scope, when a location is known.
    pub physical: Option<u32>,
    /// Count of executable statements, as determined by walker descriptors.
    pub logical: u32,
}

/// The metrics collected for one lexical scope: a function, method, or
/// closure, or (when `name` is `None`) the whole-module aggregate.
///
/// Created once by [`new_function_report`] and mutated only while it is the
/// top of the [`crate::module_analyser::ModuleAnalyser`] scope stack; never
/// mutated after it is popped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionReport {
    /// `None` for the module aggregate.
    pub name: Option<String>,
    /// First line of the scope, when a location is known.
    pub line: Option<u32>,
    /// Number of declared parameters.
    pub params: u32,
    /// Cyclomatic complexity, starting at 1 and incremented per decision
    /// point.
    pub cyclomatic: u32,
    pub sloc: SlocCounts,
    pub halstead: HalsteadPair,
    /// `(cyclomatic / sloc.logical) * 100`, filled in during finalisation.
    pub cyclomatic_density: f64,
}

/// Builds a new `FunctionReport` for a scope named `name` (or `None` for the
/// module aggregate) spanning `loc` (when the syntax tree supplied one),
/// declaring `params` parameters.
///
/// Cyclomatic starts at 1 (the single straight-line path through the scope,
/// per spec.md §4.2); logical SLOC and the Halstead bags start empty.
pub fn new_function_report(
    name: Option<String>,
    loc: Option<LocRange>,
    params: u32,
) -> FunctionReport {
    let (line, physical) = match loc {
        Some(range) => (
            Some(range.start_line),
            Some(range.end_line.saturating_sub(range.start_line) + 1),
        ),
        None => (None, None),
    };

    FunctionReport {
        name,
        line,
        params,
        cyclomatic: 1,
        sloc: SlocCounts {
            physical,
            logical: 0,
        },
        halstead: HalsteadPair::new(),
        cyclomatic_density: 0.0,
    }
}
