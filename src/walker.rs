//! The external walker contract: a generic traversal driver that calls back
//! into whatever [`crate::module_analyser::ModuleAnalyser`] is collecting
//! metrics for the tree it's walking.
//!
//! The core never inspects node structure itself (spec.md §6) — it only
//! needs a syntax tree's top-level location, and otherwise treats `Ast` and
//! `Node` as opaque types supplied by the caller's walker implementation.

use crate::function_report::LocRange;
use crate::module_report::Dependency;
use crate::settings::Settings;

/// A minimal contract a syntax tree node must satisfy: producing its own
/// source-line range, if any. Implemented by the walker's `Ast` type so the
/// analyser can build the module aggregate's initial scope (spec.md §4.3
/// step 1).
pub trait SyntaxNode {
    /// The line range this node spans, if the parser recorded one.
    fn loc(&self) -> Option<LocRange>;
}

/// Where a Halstead identifier, or an `lloc`/`cyclomatic` increment, comes
/// from: a literal value, or a function of the current node.
///
/// Corresponds to spec.md §9's "variants for `syntax.lloc` /
/// `syntax.cyclomatic` / identifier functions are sum types `Literal(u32) |
/// Computed(node -> u32)`".
pub enum Metric<Node> {
    Literal(u32),
    Computed(Box<dyn Fn(&Node) -> u32>),
}

impl<Node> Metric<Node> {
    /// Evaluates this metric against `node`.
    pub fn evaluate(&self, node: &Node) -> u32 {
        match self {
            Metric::Literal(n) => *n,
            Metric::Computed(f) => f(node),
        }
    }
}

/// Where a Halstead operator/operand identifier string comes from.
pub enum IdentifierSource<Node> {
    Literal(String),
    Computed(Box<dyn Fn(&Node) -> String>),
}

impl<Node> IdentifierSource<Node> {
    /// Evaluates this identifier source against `node`.
    pub fn evaluate(&self, node: &Node) -> String {
        match self {
            IdentifierSource::Literal(s) => s.clone(),
            IdentifierSource::Computed(f) => f(node),
        }
    }
}

/// One operator/operand rule in a syntax descriptor: an identifier source,
/// gated by an optional filter.
pub struct TokenRule<Node> {
    pub identifier: IdentifierSource<Node>,
    pub filter: Option<Box<dyn Fn(&Node) -> bool>>,
}

impl<Node> TokenRule<Node> {
    /// Creates an unfiltered rule for a literal identifier.
    pub fn literal(identifier: impl Into<String>) -> Self {
        Self {
            identifier: IdentifierSource::Literal(identifier.into()),
            filter: None,
        }
    }

    /// Returns `Some(identifier)` if this rule applies to `node` (no filter,
    /// or the filter returned true), else `None`.
    pub fn apply(&self, node: &Node) -> Option<String> {
        match &self.filter {
            Some(f) if !f(node) => None,
            _ => Some(self.identifier.evaluate(node)),
        }
    }
}

/// What a `dependencies` descriptor function returned for one node
/// (spec.md §4.3: "if an object or array is returned, those records are
/// appended ... otherwise" nothing is appended, but the latch still
/// advances per the call having happened).
pub enum DependencyOutcome {
    /// The walker produced no dependency record for this node.
    None,
    /// A single dependency record.
    One(Dependency),
    /// Multiple dependency records.
    Many(Vec<Dependency>),
}

impl DependencyOutcome {
    fn into_vec(self) -> Vec<Dependency> {
        match self {
            DependencyOutcome::None => Vec::new(),
            DependencyOutcome::One(d) => vec![d],
            DependencyOutcome::Many(ds) => ds,
        }
    }
}

/// The walker's descriptor for one node's syntactic kind (spec.md §4.3).
/// All fields are optional; a descriptor with every field `None` simply
/// contributes nothing.
#[derive(Default)]
pub struct SyntaxDescriptor<Node> {
    pub lloc: Option<Metric<Node>>,
    pub cyclomatic: Option<Metric<Node>>,
    pub operators: Vec<TokenRule<Node>>,
    pub operands: Vec<TokenRule<Node>>,
    pub dependencies: Option<Box<dyn Fn(&Node, bool) -> DependencyOutcome>>,
}

impl<Node> SyntaxDescriptor<Node> {
    /// Creates an empty descriptor.
    pub fn new() -> Self {
        Self {
            lloc: None,
            cyclomatic: None,
            operators: Vec::new(),
            operands: Vec::new(),
            dependencies: None,
        }
    }
}

/// The three callbacks a walker drives in traversal order (spec.md §4.3,
/// §9: "model as three operations on an object with value semantics").
/// Implemented by [`crate::module_analyser::ModuleAnalyser`].
pub trait ScopeHandlers<Node> {
    /// Opens a new function-like scope.
    fn create_scope(&mut self, name: Option<String>, loc: Option<LocRange>, params: u32);
    /// Closes the current scope.
    fn pop_scope(&mut self);
    /// Applies one node's syntax descriptor (spec.md §4.3 steps 5 and
    /// onward): lloc/cyclomatic increments, Halstead token encounters, and
    /// dependency capture.
    fn process_node(&mut self, node: &Node, syntax: &SyntaxDescriptor<Node>);
}

/// A traversal driver for one concrete tree shape. Implementations own no
/// analyser state themselves; they only call back into whatever
/// [`ScopeHandlers`] they're given (spec.md §6: "The walker drives
/// traversal; the analyser is a pure callback recipient").
pub trait Walker {
    type Ast: SyntaxNode;
    type Node;

    /// Drives one full traversal of `ast`, invoking `handlers` in
    /// traversal order.
    fn walk(
        &self,
        ast: &Self::Ast,
        settings: &Settings,
        handlers: &mut dyn ScopeHandlers<Self::Node>,
    );
}

pub(crate) fn apply_dependency_outcome(outcome: DependencyOutcome) -> Vec<Dependency> {
    outcome.into_vec()
}
