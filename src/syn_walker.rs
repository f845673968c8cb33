//! A concrete [`Walker`] implementation over `syn::File` ASTs.
//!
//! This is the "external collaborator" the core purposely knows nothing
//! about: the core only deals in opaque `Ast`/`Node` types and caller-built
//! [`SyntaxDescriptor`]s. Everything Rust-specific — what counts as a
//! decision point, what counts as an operator or operand, how a `use` item
//! becomes a [`Dependency`] record — lives here instead.

use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{BinOp, Expr, ItemFn, ItemUse, UnOp, UseTree};

use codescope_core::walker::{
    DependencyOutcome, Metric, ScopeHandlers, SyntaxDescriptor, SyntaxNode, TokenRule, Walker,
};
use codescope_core::{Dependency, LocRange, Settings};

/// Syn-based walks never need a node payload: every descriptor is built
/// with literal values at the point of traversal, since the visitor already
/// knows exactly what it found. The unit type stands in for spec.md's
/// opaque `Node`.
pub type Node = ();

/// Wraps a parsed `syn::File` with the source path it came from, so
/// [`SynAst::loc`] can report the file's full line span.
pub struct SynAst {
    pub file: syn::File,
    pub line_count: u32,
}

impl SynAst {
    pub fn new(file: syn::File, line_count: u32) -> Self {
        Self { file, line_count }
    }
}

impl SyntaxNode for SynAst {
    fn loc(&self) -> Option<LocRange> {
        if self.line_count == 0 {
            None
        } else {
            Some(LocRange {
                start_line: 1,
                end_line: self.line_count,
            })
        }
    }
}

/// A [`Walker`] over [`SynAst`] trees.
pub struct SynWalker;

impl Walker for SynWalker {
    type Ast = SynAst;
    type Node = Node;

    fn walk(&self, ast: &SynAst, settings: &Settings, handlers: &mut dyn ScopeHandlers<Node>) {
        let mut collector = Collector { handlers, settings };
        collector.visit_file(&ast.file);
    }
}

struct Collector<'a> {
    handlers: &'a mut dyn ScopeHandlers<Node>,
    settings: &'a Settings,
}

impl Collector<'_> {
    fn emit_lloc(&mut self, amount: u32) {
        let mut syntax: SyntaxDescriptor<Node> = SyntaxDescriptor::new();
        syntax.lloc = Some(Metric::Literal(amount));
        self.handlers.process_node(&(), &syntax);
    }

    fn emit_decision(&mut self, amount: u32) {
        let mut syntax: SyntaxDescriptor<Node> = SyntaxDescriptor::new();
        syntax.cyclomatic = Some(Metric::Literal(amount));
        self.handlers.process_node(&(), &syntax);
    }

    fn emit_operator(&mut self, symbol: &str) {
        let mut syntax: SyntaxDescriptor<Node> = SyntaxDescriptor::new();
        syntax.operators.push(TokenRule::literal(symbol));
        self.handlers.process_node(&(), &syntax);
    }

    fn emit_operand(&mut self, identifier: String) {
        let mut syntax: SyntaxDescriptor<Node> = SyntaxDescriptor::new();
        syntax.operands.push(TokenRule::literal(identifier));
        self.handlers.process_node(&(), &syntax);
    }

    fn emit_dependencies(&mut self, paths: Vec<(String, String)>) {
        if paths.is_empty() {
            return;
        }
        let mut syntax: SyntaxDescriptor<Node> = SyntaxDescriptor::new();
        syntax.dependencies = Some(Box::new(move |_node, clear| {
            if !clear {
                return DependencyOutcome::None;
            }
            let records: Vec<Dependency> = paths
                .iter()
                .map(|(kind, path)| Dependency {
                    kind: kind.clone(),
                    path: path.clone(),
                    line: None,
                })
                .collect();
            match records.len() {
                0 => DependencyOutcome::None,
                1 => DependencyOutcome::One(records.into_iter().next().unwrap()),
                _ => DependencyOutcome::Many(records),
            }
        }));
        self.handlers.process_node(&(), &syntax);
    }
}

fn loc_of<T: Spanned>(node: &T) -> Option<LocRange> {
    let span = node.span();
    let start = span.start().line as u32;
    let end = span.end().line as u32;
    if start == 0 {
        None
    } else {
        Some(LocRange {
            start_line: start,
            end_line: end.max(start),
        })
    }
}

fn binop_symbol(op: &BinOp) -> &'static str {
    match op {
        BinOp::Add(_) | BinOp::AddAssign(_) => "+",
        BinOp::Sub(_) | BinOp::SubAssign(_) => "-",
        BinOp::Mul(_) | BinOp::MulAssign(_) => "*",
        BinOp::Div(_) | BinOp::DivAssign(_) => "/",
        BinOp::Rem(_) | BinOp::RemAssign(_) => "%",
        BinOp::And(_) => "&&",
        BinOp::Or(_) => "||",
        BinOp::BitXor(_) | BinOp::BitXorAssign(_) => "^",
        BinOp::BitAnd(_) | BinOp::BitAndAssign(_) => "&",
        BinOp::BitOr(_) | BinOp::BitOrAssign(_) => "|",
        BinOp::Shl(_) | BinOp::ShlAssign(_) => "<<",
        BinOp::Shr(_) | BinOp::ShrAssign(_) => ">>",
        BinOp::Eq(_) => "==",
        BinOp::Lt(_) => "<",
        BinOp::Le(_) => "<=",
        BinOp::Ne(_) => "!=",
        BinOp::Ge(_) => ">=",
        BinOp::Gt(_) => ">",
        _ => "?binop",
    }
}

fn unop_symbol(op: &UnOp) -> &'static str {
    match op {
        UnOp::Deref(_) => "*",
        UnOp::Not(_) => "!",
        UnOp::Neg(_) => "-",
        _ => "?unop",
    }
}

fn lit_operand(lit: &syn::Lit) -> String {
    match lit {
        syn::Lit::Str(s) => s.value(),
        syn::Lit::Int(i) => i.base10_digits().to_string(),
        syn::Lit::Float(f) => f.base10_digits().to_string(),
        syn::Lit::Bool(b) => b.value.to_string(),
        syn::Lit::Char(c) => c.value().to_string(),
        syn::Lit::Byte(b) => b.value().to_string(),
        _ => "literal".to_string(),
    }
}

/// Recursively flattens a `use` tree into fully-qualified path strings.
fn flatten_use_tree(tree: &UseTree) -> Vec<String> {
    fn walk(tree: &UseTree, prefix: &str, out: &mut Vec<String>) {
        match tree {
            UseTree::Path(p) => {
                let next = join(prefix, &p.ident.to_string());
                walk(&p.tree, &next, out);
            }
            UseTree::Name(n) => out.push(join(prefix, &n.ident.to_string())),
            UseTree::Rename(r) => out.push(join(prefix, &r.ident.to_string())),
            UseTree::Glob(_) => out.push(join(prefix, "*")),
            UseTree::Group(g) => {
                for item in &g.items {
                    walk(item, prefix, out);
                }
            }
        }
    }
    fn join(prefix: &str, segment: &str) -> String {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{prefix}::{segment}")
        }
    }
    let mut out = Vec::new();
    walk(tree, "", &mut out);
    out
}

/// Translates a Rust path into the CommonJS-shaped path the resolver
/// expects, when it plausibly names a module within the same crate
/// (`crate::`, `self::`, `super::`); `None` for anything else (external
/// crates, `std`, and friends, which the resolver should never match).
fn as_relative_module_path(rust_path: &str) -> Option<String> {
    let mut segments: Vec<&str> = rust_path.split("::").collect();
    let root = *segments.first()?;
    match root {
        "crate" | "self" => {
            segments[0] = ".";
            Some(segments.join("/"))
        }
        "super" => {
            segments[0] = "..";
            Some(segments.join("/"))
        }
        _ => None,
    }
}

impl<'ast> Visit<'ast> for Collector<'_> {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        let params = node.sig.inputs.len() as u32;
        self.handlers
            .create_scope(Some(node.sig.ident.to_string()), loc_of(node), params);
        visit::visit_block(self, &node.block);
        self.handlers.pop_scope();
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        let has_receiver = matches!(node.sig.inputs.first(), Some(syn::FnArg::Receiver(_)));
        let params = node.sig.inputs.len() as u32 - u32::from(has_receiver);
        self.handlers
            .create_scope(Some(node.sig.ident.to_string()), loc_of(node), params);
        visit::visit_block(self, &node.block);
        self.handlers.pop_scope();
    }

    fn visit_expr_closure(&mut self, node: &'ast syn::ExprClosure) {
        let params = node.inputs.len() as u32;
        self.handlers.create_scope(None, loc_of(node), params);
        visit::visit_expr_closure(self, node);
        self.handlers.pop_scope();
    }

    fn visit_stmt(&mut self, stmt: &'ast syn::Stmt) {
        self.emit_lloc(1);
        visit::visit_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::If(_) => self.emit_decision(1),
            Expr::Match(m) => {
                if self.settings.switchcase && !m.arms.is_empty() {
                    self.emit_decision(m.arms.len() as u32);
                }
            }
            Expr::While(_) | Expr::Loop(_) => self.emit_decision(1),
            Expr::ForLoop(_) => {
                if self.settings.forin {
                    self.emit_decision(1);
                }
            }
            Expr::Try(_) => {
                self.emit_operator("?");
                if self.settings.trycatch {
                    self.emit_decision(1);
                }
            }
            Expr::Binary(b) => {
                let symbol = binop_symbol(&b.op);
                self.emit_operator(symbol);
                let is_short_circuit = matches!(b.op, BinOp::And(_) | BinOp::Or(_));
                if is_short_circuit && self.settings.logicalor {
                    self.emit_decision(1);
                }
            }
            Expr::Unary(u) => self.emit_operator(unop_symbol(&u.op)),
            Expr::Assign(_) => self.emit_operator("="),
            Expr::Lit(lit) => self.emit_operand(lit_operand(&lit.lit)),
            Expr::Path(p) => {
                if let Some(ident) = p.path.get_ident() {
                    self.emit_operand(ident.to_string());
                }
            }
            _ => {}
        }
        visit::visit_expr(self, expr);
    }

    fn visit_item_use(&mut self, node: &'ast ItemUse) {
        let records: Vec<(String, String)> = flatten_use_tree(&node.tree)
            .into_iter()
            .map(|full_path| match as_relative_module_path(&full_path) {
                Some(relative) => ("CommonJS".to_string(), relative),
                None => ("External".to_string(), full_path),
            })
            .collect();
        self.emit_dependencies(records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codescope_core::module_analyser;

    fn parse(src: &str) -> SynAst {
        let file = syn::parse_str(src).expect("test source must parse");
        SynAst::new(file, src.lines().count() as u32)
    }

    #[test]
    fn single_function_with_if_has_cyclomatic_two() {
        let ast = parse(
            r#"
            fn f(x: i32) -> i32 {
                if x > 0 {
                    return x;
                }
                0
            }
            "#,
        );
        let report = module_analyser::analyse(&ast, &SynWalker, &Settings::default()).unwrap();
        assert_eq!(report.functions.len(), 1);
        assert_eq!(report.functions[0].cyclomatic, 2);
        assert_eq!(report.functions[0].params, 1);
    }

    #[test]
    fn use_statement_for_crate_path_becomes_commonjs_dependency() {
        let ast = parse("use crate::foo::Bar;\n");
        let report = module_analyser::analyse(&ast, &SynWalker, &Settings::default()).unwrap();
        assert_eq!(report.dependencies.len(), 1);
        assert_eq!(report.dependencies[0].kind, "CommonJS");
        assert_eq!(report.dependencies[0].path, "./foo/Bar");
    }

    #[test]
    fn use_statement_for_external_crate_is_not_commonjs() {
        let ast = parse("use serde::Serialize;\n");
        let report = module_analyser::analyse(&ast, &SynWalker, &Settings::default()).unwrap();
        assert_eq!(report.dependencies.len(), 1);
        assert_eq!(report.dependencies[0].kind, "External");
        assert_eq!(report.dependencies[0].path, "serde::Serialize");
    }

    #[test]
    fn match_arms_count_as_decision_points_when_switchcase_enabled() {
        let ast = parse(
            r#"
            fn f(x: i32) -> i32 {
                match x {
                    0 => 1,
                    1 => 2,
                    _ => 3,
                }
            }
            "#,
        );
        let report = module_analyser::analyse(&ast, &SynWalker, &Settings::default()).unwrap();
        assert_eq!(report.functions[0].cyclomatic, 1 + 3);
    }

    #[test]
    fn for_loop_is_excluded_by_default_forin_setting() {
        let ast = parse(
            r#"
            fn f() {
                for i in 0..10 {
                    let _ = i;
                }
            }
            "#,
        );
        let report = module_analyser::analyse(&ast, &SynWalker, &Settings::default()).unwrap();
        assert_eq!(report.functions[0].cyclomatic, 1);
    }
}
