//! TypeScript parsing collaborator
//!
//! The only module that looks at source text. Typings payloads become
//! [`Module`]s, service payloads become [`ServiceSource`]s and index
//! payloads become [`IndexEntry`] lists; everything downstream works on
//! those values and never sees a syntax tree.

pub mod kinds;

use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use crate::error::{TypesyncError, TypesyncResult};
use crate::model::{
    Declaration, IndexEntry, Module, ServiceFunction, ServiceSource, TypeBody, TypeExpr,
};

fn make_parser() -> TypesyncResult<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::language_typescript())
        .map_err(|e| TypesyncError::ParserSetup {
            message: e.to_string(),
        })?;
    Ok(parser)
}

fn parse_tree(source: &str, origin: &str) -> TypesyncResult<Tree> {
    let mut parser = make_parser()?;
    parser.parse(source, None).ok_or_else(|| TypesyncError::Parse {
        file: origin.to_string(),
    })
}

fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

fn find_child_by_kind<'a>(node: &Node<'a>, kind: &str) -> Option<Node<'a>> {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                return Some(child);
            }
        }
    }
    None
}

fn named_children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut result = Vec::new();
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            result.push(child);
        }
    }
    result
}

/// First named child that is not a comment.
fn first_expression<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    named_children(node)
        .into_iter()
        .find(|c| c.kind() != "comment")
}

/// Converts a type node into the shapes the scanner recognizes.
///
/// Parenthesized types are unwrapped; everything without a dedicated arm
/// is carried as opaque text.
fn type_expr(node: &Node, source: &str) -> TypeExpr {
    match node.kind() {
        kinds::TYPE_IDENTIFIER => TypeExpr::Named(node_text(node, source).to_string()),
        kinds::NESTED_TYPE_IDENTIFIER => {
            let qualifier = node.child_by_field_name("module");
            let name = node.child_by_field_name("name");
            match (qualifier, name) {
                (Some(q), Some(n)) => TypeExpr::Qualified {
                    qualifier: node_text(&q, source).to_string(),
                    name: node_text(&n, source).to_string(),
                },
                _ => TypeExpr::Other(node_text(node, source).to_string()),
            }
        }
        kinds::ARRAY_TYPE => match first_expression(node) {
            Some(element) => TypeExpr::Array(Box::new(type_expr(&element, source))),
            None => TypeExpr::Other(node_text(node, source).to_string()),
        },
        kinds::PARENTHESIZED_TYPE => match first_expression(node) {
            Some(inner) => type_expr(&inner, source),
            None => TypeExpr::Other(node_text(node, source).to_string()),
        },
        _ => TypeExpr::Other(node_text(node, source).to_string()),
    }
}

/// First namespace block in the file, depth-first.
fn find_namespace<'a>(root: &'a Node) -> Option<Node<'a>> {
    let mut stack = vec![*root];
    while let Some(current) = stack.pop() {
        if current.kind() == kinds::INTERNAL_MODULE || current.kind() == kinds::MODULE {
            return Some(current);
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    None
}

fn parse_alias(node: &Node, source: &str) -> Option<Declaration> {
    let name = node.child_by_field_name("name")?;
    let value = node.child_by_field_name("value")?;

    let mut property_types = Vec::new();
    if value.kind() == kinds::OBJECT_TYPE {
        for member in named_children(&value) {
            if member.kind() != kinds::PROPERTY_SIGNATURE {
                continue;
            }
            let Some(annotation) = member.child_by_field_name("type") else {
                continue;
            };
            if let Some(ty) = first_expression(&annotation) {
                property_types.push(type_expr(&ty, source));
            }
        }
    }

    Some(Declaration::new(
        node_text(&name, source),
        TypeBody {
            text: node_text(&value, source).to_string(),
            property_types,
        },
    ))
}

/// Parses a typings payload into a [`Module`].
///
/// The first `declare namespace` (or `declare module`) block is the module;
/// text before it is the preamble and is preserved verbatim. Duplicate
/// declaration names are rejected.
pub fn parse_module(source: &str, origin: &str) -> TypesyncResult<Module> {
    let tree = parse_tree(source, origin)?;
    let root = tree.root_node();

    let namespace = find_namespace(&root).ok_or_else(|| TypesyncError::MissingNamespace {
        file: origin.to_string(),
    })?;

    // `declare namespace X` wraps the namespace in an ambient declaration;
    // the preamble ends where that statement starts.
    let statement_start = match namespace.parent() {
        Some(parent) if parent.kind() == kinds::AMBIENT_DECLARATION => parent.start_byte(),
        _ => namespace.start_byte(),
    };
    let preamble = &source[..statement_start];

    let label = namespace
        .child_by_field_name("name")
        .map(|n| node_text(&n, source).to_string())
        .unwrap_or_default();

    let mut module = Module::new(label, preamble);
    if let Some(body) = namespace.child_by_field_name("body") {
        for statement in named_children(&body) {
            let alias = match statement.kind() {
                kinds::TYPE_ALIAS_DECLARATION => Some(statement),
                kinds::EXPORT_STATEMENT => {
                    find_child_by_kind(&statement, kinds::TYPE_ALIAS_DECLARATION)
                }
                _ => None,
            };
            if let Some(alias) = alias {
                if let Some(decl) = parse_alias(&alias, source) {
                    module.push(decl, origin)?;
                }
            }
        }
    }

    debug!(
        origin,
        namespace = %module.namespace,
        declarations = module.len(),
        "parsed typings module"
    );
    Ok(module)
}

fn parse_function(node: &Node, source: &str) -> ServiceFunction {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(&n, source).to_string())
        .unwrap_or_default();

    let mut param_types = Vec::new();
    if let Some(params) = node.child_by_field_name("parameters") {
        for param in named_children(&params) {
            if param.kind() != kinds::REQUIRED_PARAMETER
                && param.kind() != kinds::OPTIONAL_PARAMETER
            {
                continue;
            }
            let Some(annotation) = param.child_by_field_name("type") else {
                continue;
            };
            if let Some(ty) = first_expression(&annotation) {
                param_types.push(type_expr(&ty, source));
            }
        }
    }

    // Only a direct call under the first top-level return carries a payload
    // type; anything else yields nothing.
    let return_call_type = node
        .child_by_field_name("body")
        .and_then(|body| {
            named_children(&body)
                .into_iter()
                .find(|s| s.kind() == kinds::RETURN_STATEMENT)
        })
        .and_then(|ret| first_expression(&ret))
        .filter(|expr| expr.kind() == kinds::CALL_EXPRESSION)
        .and_then(|call| call.child_by_field_name("type_arguments"))
        .and_then(|args| first_expression(&args))
        .map(|ty| type_expr(&ty, source));

    ServiceFunction {
        name,
        param_types,
        return_call_type,
    }
}

/// Parses a service payload into its top-level function declarations.
pub fn parse_service(source: &str, origin: &str) -> TypesyncResult<ServiceSource> {
    let tree = parse_tree(source, origin)?;
    let root = tree.root_node();

    let mut functions = Vec::new();
    for statement in named_children(&root) {
        let func = match statement.kind() {
            kinds::FUNCTION_DECLARATION => Some(statement),
            kinds::EXPORT_STATEMENT => statement
                .child_by_field_name("declaration")
                .filter(|d| d.kind() == kinds::FUNCTION_DECLARATION),
            _ => None,
        };
        if let Some(func) = func {
            functions.push(parse_function(&func, source));
        }
    }

    debug!(origin, functions = functions.len(), "parsed service source");
    Ok(ServiceSource {
        origin: origin.to_string(),
        functions,
    })
}

/// Parses the namespace import lines of a service index payload.
pub fn parse_index(source: &str, origin: &str) -> TypesyncResult<Vec<IndexEntry>> {
    let tree = parse_tree(source, origin)?;
    let root = tree.root_node();

    let mut entries = Vec::new();
    for statement in named_children(&root) {
        if statement.kind() != kinds::IMPORT_STATEMENT {
            continue;
        }
        let Some(alias) = find_child_by_kind(&statement, kinds::IMPORT_CLAUSE)
            .and_then(|clause| find_child_by_kind(&clause, kinds::NAMESPACE_IMPORT))
            .and_then(|ns| find_child_by_kind(&ns, kinds::IDENTIFIER))
        else {
            continue;
        };
        let path = statement
            .child_by_field_name("source")
            .and_then(|s| find_child_by_kind(&s, kinds::STRING_FRAGMENT))
            .map(|f| node_text(&f, source).to_string())
            .unwrap_or_default();

        entries.push(IndexEntry {
            alias: node_text(&alias, source).to_string(),
            path,
            text: node_text(&statement, source).to_string(),
        });
    }
    Ok(entries)
}
