//! Tree-sitter node kinds for the TypeScript grammar
//!
//! Names match the tree-sitter-typescript grammar exactly.

pub const AMBIENT_DECLARATION: &str = "ambient_declaration";
pub const INTERNAL_MODULE: &str = "internal_module";
pub const MODULE: &str = "module";
pub const STATEMENT_BLOCK: &str = "statement_block";
pub const EXPORT_STATEMENT: &str = "export_statement";

pub const TYPE_ALIAS_DECLARATION: &str = "type_alias_declaration";
pub const OBJECT_TYPE: &str = "object_type";
pub const PROPERTY_SIGNATURE: &str = "property_signature";
pub const TYPE_ANNOTATION: &str = "type_annotation";
pub const TYPE_IDENTIFIER: &str = "type_identifier";
pub const NESTED_TYPE_IDENTIFIER: &str = "nested_type_identifier";
pub const ARRAY_TYPE: &str = "array_type";
pub const PARENTHESIZED_TYPE: &str = "parenthesized_type";

pub const FUNCTION_DECLARATION: &str = "function_declaration";
pub const FORMAL_PARAMETERS: &str = "formal_parameters";
pub const REQUIRED_PARAMETER: &str = "required_parameter";
pub const OPTIONAL_PARAMETER: &str = "optional_parameter";
pub const RETURN_STATEMENT: &str = "return_statement";
pub const CALL_EXPRESSION: &str = "call_expression";
pub const TYPE_ARGUMENTS: &str = "type_arguments";

pub const IMPORT_STATEMENT: &str = "import_statement";
pub const IMPORT_CLAUSE: &str = "import_clause";
pub const NAMESPACE_IMPORT: &str = "namespace_import";
pub const IDENTIFIER: &str = "identifier";
pub const STRING: &str = "string";
pub const STRING_FRAGMENT: &str = "string_fragment";
