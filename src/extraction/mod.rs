/// Type snapshot extraction from Rust source.
///
/// This module turns a parsed file into the immutable `TypeSnapshot`s the
/// scorer consumes: each struct's named fields plus, for every candidate
/// method, the set of those fields its body references directly.
///
/// A candidate method is a function in an *inherent* impl block with a
/// `self` receiver. Associated functions without `self` (the constructor
/// idiom), trait-impl methods, and foreign-ABI functions are not
/// candidates. Trait impls are excluded the same way struct ownership
/// analysis excludes them: their methods are shaped by the trait, not by
/// how the type partitions its own state.
use crate::core::errors::{Error, Result};
use crate::core::{MethodFieldAccess, TypeSnapshot};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use syn::visit::Visit;
use syn::{Expr, ExprField, Fields, File, ImplItem, ItemImpl, ItemMod, ItemStruct, Member};

/// Parse source text, attributing failures to their file.
pub fn parse_source(content: &str, path: &Path) -> Result<File> {
    syn::parse_file(content).map_err(|e| Error::parse(path, e.to_string()))
}

/// Build snapshots for every struct in a parsed file.
///
/// Runs two passes: one to register structs and their fields, one to
/// attach methods from impl blocks. Impl blocks may precede the struct
/// they target, so field sets must be complete before any body is walked.
pub fn extract_file(parsed: &File, path: &Path) -> Vec<TypeSnapshot> {
    let mut structs = StructCollector::new(path);
    structs.visit_file(parsed);

    let mut methods = MethodCollector::new(structs.registry);
    methods.visit_file(parsed);

    let mut snapshots: Vec<TypeSnapshot> = methods.registry.into_snapshots();
    snapshots.sort_by_key(|s| s.line);
    snapshots
}

/// Snapshots under construction, keyed by module-qualified name.
struct SnapshotRegistry {
    snapshots: HashMap<String, TypeSnapshot>,
    /// Base struct name -> qualified names, for impls whose module scope
    /// differs from the struct definition's.
    by_base: HashMap<String, Vec<String>>,
}

impl SnapshotRegistry {
    fn new() -> Self {
        Self {
            snapshots: HashMap::new(),
            by_base: HashMap::new(),
        }
    }

    fn register(&mut self, qualified: String, snapshot: TypeSnapshot) {
        let base = qualified.rsplit("::").next().unwrap_or(&qualified).to_string();
        let entries = self.by_base.entry(base).or_default();
        // cfg-gated redefinitions of the same struct collapse to one entry.
        if !entries.contains(&qualified) {
            entries.push(qualified.clone());
        }
        self.snapshots.insert(qualified, snapshot);
    }

    /// Resolve an impl's target: prefer the current module scope, fall
    /// back to a unique base-name match anywhere in the file.
    fn resolve(&mut self, module_path: &[String], base: &str) -> Option<&mut TypeSnapshot> {
        let scoped = qualify(module_path, base);
        if self.snapshots.contains_key(&scoped) {
            return self.snapshots.get_mut(&scoped);
        }
        match self.by_base.get(base) {
            Some(names) if names.len() == 1 => self.snapshots.get_mut(&names[0]),
            _ => None,
        }
    }

    fn into_snapshots(self) -> Vec<TypeSnapshot> {
        self.snapshots.into_values().collect()
    }
}

fn qualify(module_path: &[String], name: &str) -> String {
    if module_path.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", module_path.join("::"), name)
    }
}

/// Extract the base type name from a syn::Type, handling generics.
///
/// For example: `Container<T>` becomes `Container`.
fn extract_type_name(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

/// First pass: register structs with their named fields.
struct StructCollector<'p> {
    path: &'p Path,
    module_path: Vec<String>,
    registry: SnapshotRegistry,
}

impl<'p> StructCollector<'p> {
    fn new(path: &'p Path) -> Self {
        Self {
            path,
            module_path: Vec::new(),
            registry: SnapshotRegistry::new(),
        }
    }
}

impl<'ast> Visit<'ast> for StructCollector<'_> {
    fn visit_item_struct(&mut self, item: &'ast ItemStruct) {
        let name = item.ident.to_string();
        let line = item.ident.span().start().line;
        let qualified = qualify(&self.module_path, &name);

        let mut snapshot = TypeSnapshot::new(qualified.clone(), self.path.to_path_buf(), line);
        if let Fields::Named(named) = &item.fields {
            snapshot.fields = named
                .named
                .iter()
                .filter_map(|f| f.ident.as_ref().map(|i| i.to_string()))
                .collect();
        }
        // Tuple and unit structs have no named fields; they stay
        // registered but fall under the size guard when scored.
        self.registry.register(qualified, snapshot);
    }

    fn visit_item_mod(&mut self, item: &'ast ItemMod) {
        self.module_path.push(item.ident.to_string());
        syn::visit::visit_item_mod(self, item);
        self.module_path.pop();
    }
}

/// Second pass: collect candidate methods and their field accesses.
struct MethodCollector {
    module_path: Vec<String>,
    registry: SnapshotRegistry,
}

impl MethodCollector {
    fn new(registry: SnapshotRegistry) -> Self {
        Self {
            module_path: Vec::new(),
            registry,
        }
    }

    fn collect_impl(&mut self, item_impl: &ItemImpl) {
        // Trait implementations are not candidates.
        if item_impl.trait_.is_some() {
            return;
        }
        let base = match extract_type_name(&item_impl.self_ty) {
            Some(name) => name,
            None => return,
        };

        // Clone the declared-field set up front so body traversal can
        // filter against it while the snapshot is borrowed mutably later.
        let declared = match self.registry.resolve(&self.module_path, &base) {
            Some(snapshot) => snapshot.fields.clone(),
            None => return,
        };

        let mut collected = Vec::new();
        for item in &item_impl.items {
            if let ImplItem::Fn(method) = item {
                if method.sig.receiver().is_none() {
                    continue;
                }
                if method.sig.abi.is_some() {
                    continue;
                }
                let mut visitor = FieldAccessVisitor::new(&declared);
                visitor.visit_block(&method.block);
                collected.push(MethodFieldAccess {
                    method: method.sig.ident.to_string(),
                    fields: visitor.accessed,
                });
            }
        }

        if let Some(snapshot) = self.registry.resolve(&self.module_path, &base) {
            snapshot.methods.extend(collected);
        }
    }
}

impl<'ast> Visit<'ast> for MethodCollector {
    fn visit_item_impl(&mut self, item: &'ast ItemImpl) {
        self.collect_impl(item);
        syn::visit::visit_item_impl(self, item);
    }

    fn visit_item_mod(&mut self, item: &'ast ItemMod) {
        self.module_path.push(item.ident.to_string());
        syn::visit::visit_item_mod(self, item);
        self.module_path.pop();
    }
}

/// Collects `self.<field>` references anywhere in one method body.
///
/// Reads, assignment targets, compound updates, borrows, and method-call
/// receivers all surface as the same `ExprField` node, so a single hook
/// covers every reference kind. Only fields declared on the type count.
struct FieldAccessVisitor<'a> {
    declared: &'a HashSet<String>,
    accessed: HashSet<String>,
}

impl<'a> FieldAccessVisitor<'a> {
    fn new(declared: &'a HashSet<String>) -> Self {
        Self {
            declared,
            accessed: HashSet::new(),
        }
    }
}

impl FieldAccessVisitor<'_> {
    /// Macro bodies are opaque to the AST visitor, so scan their token
    /// streams for `self . <field>` sequences instead. Covers the common
    /// `format!`/`write!`/`assert!` uses of fields.
    fn scan_macro_tokens(&mut self, tokens: proc_macro2::TokenStream) {
        let mut saw_self = false;
        let mut saw_dot = false;
        for tree in tokens {
            match tree {
                proc_macro2::TokenTree::Ident(ident) => {
                    if saw_self && saw_dot {
                        let name = ident.to_string();
                        if self.declared.contains(&name) {
                            self.accessed.insert(name);
                        }
                    }
                    saw_self = ident == "self";
                    saw_dot = false;
                }
                proc_macro2::TokenTree::Punct(punct) => {
                    saw_dot = saw_self && punct.as_char() == '.';
                }
                proc_macro2::TokenTree::Group(group) => {
                    self.scan_macro_tokens(group.stream());
                    saw_self = false;
                    saw_dot = false;
                }
                proc_macro2::TokenTree::Literal(_) => {
                    saw_self = false;
                    saw_dot = false;
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for FieldAccessVisitor<'_> {
    fn visit_expr_field(&mut self, node: &'ast ExprField) {
        if let Member::Named(ident) = &node.member {
            if is_self_path(&node.base) {
                let name = ident.to_string();
                if self.declared.contains(&name) {
                    self.accessed.insert(name);
                }
            }
        }
        syn::visit::visit_expr_field(self, node);
    }

    fn visit_macro(&mut self, node: &'ast syn::Macro) {
        self.scan_macro_tokens(node.tokens.clone());
        syn::visit::visit_macro(self, node);
    }
}

fn is_self_path(expr: &Expr) -> bool {
    matches!(expr, Expr::Path(path) if path.path.is_ident("self"))
}
