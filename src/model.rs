//! Core data model
//!
//! Plain values produced by the parsing layer and transformed by the
//! scanner, closure builder, differ and rebuilder. Nothing here touches
//! source text or the filesystem.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{TypesyncError, TypesyncResult};

/// A type expression as it appears in a signature or a declaration body.
///
/// Only the shapes the scanner recognizes are given structure; everything
/// else is carried as opaque text in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A bare type name, e.g. `AdjustOrderDTO`
    Named(String),
    /// A qualified reference, e.g. `API.AdjustOrderDTO`
    Qualified { qualifier: String, name: String },
    /// One level of array shorthand, e.g. `API.AdjustOrderDTO[]`
    Array(Box<TypeExpr>),
    /// Anything else (generics, unions, literals, predefined types)
    Other(String),
}

/// The right-hand side of a type alias declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeBody {
    /// Verbatim source text of the aliased type expression
    pub text: String,
    /// Type expressions of the properties when the body is an object
    /// literal; empty otherwise
    pub property_types: Vec<TypeExpr>,
}

impl TypeBody {
    /// Body with no structured properties, carrying only verbatim text.
    pub fn opaque(text: impl Into<String>) -> Self {
        TypeBody {
            text: text.into(),
            property_types: Vec::new(),
        }
    }
}

/// One named type alias inside the typings namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub body: TypeBody,
}

impl Declaration {
    pub fn new(name: impl Into<String>, body: TypeBody) -> Self {
        Declaration {
            name: name.into(),
            body,
        }
    }
}

/// A parsed typings module: one `declare namespace` block.
///
/// Declarations are ordered and unique by name. `preamble` is the verbatim
/// text preceding the namespace declaration (directive comments and the
/// like) and is carried through rebuilds unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    pub namespace: String,
    pub preamble: String,
    declarations: Vec<Declaration>,
}

impl Module {
    pub fn new(namespace: impl Into<String>, preamble: impl Into<String>) -> Self {
        Module {
            namespace: namespace.into(),
            preamble: preamble.into(),
            declarations: Vec::new(),
        }
    }

    /// Appends a declaration, rejecting duplicate names.
    ///
    /// `origin` labels the payload for the error message.
    pub fn push(&mut self, decl: Declaration, origin: &str) -> TypesyncResult<()> {
        if self.contains(&decl.name) {
            return Err(TypesyncError::DuplicateDeclaration {
                name: decl.name,
                file: origin.to_string(),
            });
        }
        self.declarations.push(decl);
        Ok(())
    }

    /// Replaces the declaration list wholesale. The caller guarantees
    /// uniqueness (used by the rebuilder, which constructs from unique
    /// inputs).
    pub fn with_declarations(mut self, declarations: Vec<Declaration>) -> Self {
        self.declarations = declarations;
        self
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Declaration> {
        self.declarations.iter_mut().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.iter().any(|d| d.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.declarations.iter().map(|d| d.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// A top-level function of a service source, as parsed: the raw type
/// expressions, before any recognition rule is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFunction {
    pub name: String,
    /// Type annotation of each parameter, in order
    pub param_types: Vec<TypeExpr>,
    /// First type argument of the returned call expression, when the first
    /// top-level return statement returns a direct call carrying one
    pub return_call_type: Option<TypeExpr>,
}

/// A parsed service source: its diagnostic label and its functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSource {
    /// Where the text came from (a path, or a virtual label)
    pub origin: String,
    pub functions: Vec<ServiceFunction>,
}

/// Declaration names referenced by one service function's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySignature {
    pub name: String,
    pub parameter_refs: Vec<String>,
    pub return_ref: Option<String>,
}

/// One namespace import line of a service index source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// The bound namespace alias (`import * as <alias>`)
    pub alias: String,
    /// The module specifier, without quotes
    pub path: String,
    /// Verbatim text of the import statement
    pub text: String,
}

impl IndexEntry {
    /// Canonical entry for a controller name: alias and path both derive
    /// from the name.
    pub fn for_controller(name: &str) -> Self {
        IndexEntry {
            alias: name.to_string(),
            path: format!("./{name}"),
            text: format!("import * as {name} from './{name}';"),
        }
    }
}

/// Insertion-ordered set of declaration names.
///
/// `insert` reports whether the name was new; that check is both the dedup
/// and the cycle guard during closure expansion.
#[derive(Debug, Clone, Default)]
pub struct LiveSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl LiveSet {
    pub fn new() -> Self {
        LiveSet::default()
    }

    /// Inserts a name, returning `true` if it was not present before.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for LiveSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LiveSet::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}
