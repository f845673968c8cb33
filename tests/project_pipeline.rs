//! End-to-end exercise of the public `codescope_core` API: a small walker
//! drives three modules through `project_analyser::analyse` and the result
//! is checked against the dependency-graph scenarios in spec.md §8.

use codescope_core::walker::{ScopeHandlers, SyntaxDescriptor, SyntaxNode, Walker};
use codescope_core::{
    function_report::LocRange, module_report::Dependency, project_analyser, settings::Settings,
    ModuleInput, ProjectOptions,
};

/// An AST that is just a fixed list of dependency records, to be emitted as
/// one descriptor call per entry. Exercises the public walker contract
/// without depending on any concrete language front-end.
struct FixtureAst {
    dependencies: Vec<Dependency>,
}

impl SyntaxNode for FixtureAst {
    fn loc(&self) -> Option<LocRange> {
        None
    }
}

struct FixtureWalker;

impl Walker for FixtureWalker {
    type Ast = FixtureAst;
    type Node = ();

    fn walk(&self, ast: &FixtureAst, _settings: &Settings, handlers: &mut dyn ScopeHandlers<()>) {
        for dep in &ast.dependencies {
            let dep = dep.clone();
            let mut syntax: SyntaxDescriptor<()> = SyntaxDescriptor::new();
            syntax.dependencies = Some(Box::new(move |_node, clear| {
                if clear {
                    codescope_core::walker::DependencyOutcome::One(dep.clone())
                } else {
                    codescope_core::walker::DependencyOutcome::None
                }
            }));
            handlers.process_node(&(), &syntax);
        }
    }
}

fn dep(kind: &str, path: &str) -> Dependency {
    Dependency {
        kind: kind.to_string(),
        path: path.to_string(),
        line: Some(1),
    }
}

fn module(path: &str, dependencies: Vec<Dependency>) -> ModuleInput<FixtureAst> {
    ModuleInput {
        ast: FixtureAst { dependencies },
        path: path.to_string(),
    }
}

#[test]
fn three_module_chain_end_to_end_matches_core_size_scenario() {
    let modules = vec![
        module("a.js", vec![dep("CommonJS", "./b")]),
        module("b.js", vec![dep("CommonJS", "./c")]),
        module("c.js", vec![]),
    ];

    let result = project_analyser::analyse(
        &modules,
        &FixtureWalker,
        &Settings::default(),
        &ProjectOptions::default(),
    )
    .unwrap();

    assert!(result.processed);
    assert_eq!(
        result.reports.iter().map(|r| r.path.as_str()).collect::<Vec<_>>(),
        vec!["a.js", "b.js", "c.js"]
    );
    assert_eq!(result.adjacency_matrix.get(0, 1), 1);
    assert_eq!(result.adjacency_matrix.get(1, 2), 1);
    assert_eq!(result.visibility_matrix.get(0, 2), 1, "a transitively sees c");
    assert!((result.core_size - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn unresolvable_dependency_leaves_graph_empty() {
    let modules = vec![
        module("a.js", vec![dep("External", "serde::Serialize")]),
        module("b.js", vec![]),
    ];

    let result = project_analyser::analyse(
        &modules,
        &FixtureWalker,
        &Settings::default(),
        &ProjectOptions::default(),
    )
    .unwrap();

    assert_eq!(result.first_order_density, 0.0);
    assert_eq!(result.core_size, 0.0);
}

#[test]
fn no_core_size_option_still_reports_density() {
    let modules = vec![
        module("a.js", vec![dep("CommonJS", "./b")]),
        module("b.js", vec![]),
    ];
    let options = ProjectOptions {
        skip_calculation: false,
        no_core_size: true,
    };

    let result = project_analyser::analyse(&modules, &FixtureWalker, &Settings::default(), &options)
        .unwrap();

    assert_eq!(result.first_order_density, 25.0);
    assert_eq!(result.change_cost, 0.0);
    assert_eq!(result.core_size, 0.0);
}
