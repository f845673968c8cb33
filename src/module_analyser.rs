//! The walker-driven metric aggregator: one pass over a syntax tree,
//! maintaining a scope stack and accumulating Halstead operand/operator
//! multisets, logical SLOC, and cyclomatic counts, attributed to both the
//! current function report and the module aggregate (spec.md §4.3).

use crate::error::{CoreError, Result};
use crate::function_report::{new_function_report, FunctionReport, LocRange};
use crate::halstead::Metric as HalsteadMetric;
use crate::module_report::{Dependency, ModuleReport};
use crate::settings::Settings;
use crate::walker::{apply_dependency_outcome, ScopeHandlers, SyntaxDescriptor, SyntaxNode, Walker};

/// Runs one walk of `ast` with `walker`, producing a fully finalised
/// [`ModuleReport`] (its `path` is left empty — the caller, typically
/// [`crate::project_analyser::ProjectAnalyser`], fills it in).
///
/// The precondition in spec.md §4.3 ("ast is a non-null record; walker
/// exposes a `walk` operation, else `InvalidInput`") is enforced statically
/// here: `ast: &W::Ast` cannot be null and `walker: &W` cannot lack `walk`,
/// since `W: Walker`. The only remaining failure mode is
/// [`CoreError::ZeroCyclomatic`], raised from `calculate_metrics`.
pub fn analyse<W: Walker>(ast: &W::Ast, walker: &W, settings: &Settings) -> Result<ModuleReport> {
    let mut state = AnalyserState::new(ast.loc());
    walker.walk(ast, settings, &mut state);
    state.calculate_metrics(settings)
}

/// Owns the scope stack, the current-function pointer (as an index into
/// `functions`), and the dependency-capture latch for one walk.
struct AnalyserState {
    aggregate: FunctionReport,
    functions: Vec<FunctionReport>,
    scope_stack: Vec<usize>,
    dependencies: Vec<Dependency>,
    dependency_seen: bool,
}

impl AnalyserState {
    fn new(module_loc: Option<LocRange>) -> Self {
        Self {
            aggregate: new_function_report(None, module_loc, 0),
            functions: Vec::new(),
            scope_stack: Vec::new(),
            dependencies: Vec::new(),
            dependency_seen: false,
        }
    }

    fn current_mut(&mut self) -> Option<&mut FunctionReport> {
        let idx = *self.scope_stack.last()?;
        self.functions.get_mut(idx)
    }

    fn calculate_metrics(mut self, settings: &Settings) -> Result<ModuleReport> {
        self.aggregate.halstead.finalize();
        finalize_density(&mut self.aggregate);
        for function in &mut self.functions {
            function.halstead.finalize();
            finalize_density(function);
        }

        let (loc, cyclomatic, effort, params) = if self.functions.is_empty() {
            (
                f64::from(self.aggregate.sloc.logical),
                f64::from(self.aggregate.cyclomatic),
                self.aggregate.halstead.effort,
                f64::from(self.aggregate.params),
            )
        } else {
            let count = self.functions.len() as f64;
            let mut sums = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
            for function in &self.functions {
                sums.0 += f64::from(function.sloc.logical);
                sums.1 += f64::from(function.cyclomatic);
                sums.2 += function.halstead.effort;
                sums.3 += f64::from(function.params);
            }
            (sums.0 / count, sums.1 / count, sums.2 / count, sums.3 / count)
        };

        if cyclomatic == 0.0 {
            return Err(CoreError::ZeroCyclomatic);
        }

        let maintainability = maintainability_index(effort, cyclomatic, loc, settings.newmi);

        Ok(ModuleReport {
            aggregate: self.aggregate,
            functions: self.functions,
            dependencies: self.dependencies,
            path: String::new(),
            maintainability,
            loc,
            cyclomatic,
            effort,
            params,
        })
    }
}

fn finalize_density(report: &mut FunctionReport) {
    report.cyclomatic_density = (f64::from(report.cyclomatic) / f64::from(report.sloc.logical)) * 100.0;
}

/// `MI = 171 - 3.42*ln(effort) - 0.23*ln(cyclomatic) - 16.2*ln(loc)`, clamped
/// to at most 171, and remapped to `max(0, MI*100/171)` when `newmi` is set
/// (spec.md §4.4).
pub(crate) fn maintainability_index(effort: f64, cyclomatic: f64, loc: f64, newmi: bool) -> f64 {
    let raw = 171.0 - 3.42 * effort.ln() - 0.23 * cyclomatic.ln() - 16.2 * loc.ln();
    let clamped = raw.min(171.0);
    if newmi {
        (clamped * 100.0 / 171.0).max(0.0)
    } else {
        clamped
    }
}

impl<Node> ScopeHandlers<Node> for AnalyserState {
    fn create_scope(&mut self, name: Option<String>, loc: Option<LocRange>, params: u32) {
        let report = new_function_report(name, loc, params);
        self.functions.push(report);
        self.scope_stack.push(self.functions.len() - 1);
        self.aggregate.params += params;
    }

    fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    fn process_node(&mut self, node: &Node, syntax: &SyntaxDescriptor<Node>) {
        if let Some(lloc) = &syntax.lloc {
            let amount = lloc.evaluate(node);
            if let Some(current) = self.current_mut() {
                current.sloc.logical += amount;
            }
            self.aggregate.sloc.logical += amount;
        }

        if let Some(cyclomatic) = &syntax.cyclomatic {
            let amount = cyclomatic.evaluate(node);
            if let Some(current) = self.current_mut() {
                current.cyclomatic += amount;
            }
            self.aggregate.cyclomatic += amount;
        }

        for rule in &syntax.operators {
            if let Some(identifier) = rule.apply(node) {
                if let Some(current) = self.current_mut() {
                    current.halstead.encounter(HalsteadMetric::Operators, &identifier);
                }
                self.aggregate
                    .halstead
                    .encounter(HalsteadMetric::Operators, &identifier);
            }
        }

        for rule in &syntax.operands {
            if let Some(identifier) = rule.apply(node) {
                if let Some(current) = self.current_mut() {
                    current.halstead.encounter(HalsteadMetric::Operands, &identifier);
                }
                self.aggregate
                    .halstead
                    .encounter(HalsteadMetric::Operands, &identifier);
            }
        }

        if let Some(dependencies_fn) = &syntax.dependencies {
            let clear = !self.dependency_seen;
            let outcome = dependencies_fn(node, clear);
            self.dependency_seen = true;
            self.dependencies.extend(apply_dependency_outcome(outcome));
        }
    }
}
