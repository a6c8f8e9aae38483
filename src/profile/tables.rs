// Static node-kind tables, one per language
//
// Kinds follow the tree-sitter grammars bundled in parser::treesitter. Where a
// grammar renamed a node between releases both spellings are listed. C# and
// Ruby have tables but no bundled plugin.

use super::{Construct as C, ImportStyle, LanguageId, LanguageProfile, TypePosition, VisibilityStyle};
use crate::extract::Visibility;

pub(super) static REGISTRY: &[&LanguageProfile] = &[
    &TYPESCRIPT,
    &JAVASCRIPT,
    &PYTHON,
    &JAVA,
    &GO,
    &RUST,
    &CPP,
    &C_LANG,
    &CSHARP,
    &RUBY,
];

const JS_FUNCTIONS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "function",
    "arrow_function",
    "generator_function_declaration",
    "generator_function",
];

const JS_IDENTIFIERS: &[&str] = &[
    "identifier",
    "property_identifier",
    "private_property_identifier",
    "shorthand_property_identifier",
    "type_identifier",
];

pub(super) static JAVASCRIPT: LanguageProfile = LanguageProfile {
    id: LanguageId::JavaScript,
    extensions: &["js", "jsx", "mjs", "cjs"],
    visibility: VisibilityStyle::Underscore,
    type_position: TypePosition::AfterName,
    return_type_fields: &[],
    import_style: ImportStyle::StringLiteral,
    node_kinds: &[
        (C::ClassDeclaration, &["class_declaration", "class"]),
        (C::ClassBody, &["class_body"]),
        (C::Method, &["method_definition"]),
        (C::Field, &["field_definition", "public_field_definition"]),
        (C::Function, JS_FUNCTIONS),
        (C::Import, &["import_statement"]),
        (C::Decorator, &["decorator"]),
        (C::Superclass, &["class_heritage"]),
        (C::Parameters, &["formal_parameters"]),
        (C::Modifier, &["static", "async", "get", "set"]),
        (C::ExportWrapper, &["export_statement"]),
        (C::Assignment, &["variable_declarator", "assignment_expression", "pair"]),
        (C::Identifier, JS_IDENTIFIERS),
        (C::Comment, &["comment"]),
        (C::StringLiteral, &["string", "template_string"]),
        (C::ObjectLiteral, &["object"]),
        (C::Pair, &["pair"]),
        (C::Call, &["call_expression"]),
    ],
};

pub(super) static TYPESCRIPT: LanguageProfile = LanguageProfile {
    id: LanguageId::TypeScript,
    extensions: &["ts", "tsx", "mts", "cts"],
    visibility: VisibilityStyle::Modifiers {
        default: Visibility::Public,
    },
    type_position: TypePosition::AfterName,
    return_type_fields: &["return_type"],
    import_style: ImportStyle::StringLiteral,
    node_kinds: &[
        (
            C::ClassDeclaration,
            &["class_declaration", "abstract_class_declaration", "class"],
        ),
        (C::ClassBody, &["class_body"]),
        (C::Method, &["method_definition", "abstract_method_signature"]),
        (C::Field, &["public_field_definition", "field_definition"]),
        (C::Interface, &["interface_declaration"]),
        (C::InterfaceBody, &["interface_body", "object_type"]),
        (C::PropertySignature, &["property_signature"]),
        (C::MethodSignature, &["method_signature"]),
        (C::InterfaceExtends, &["extends_type_clause", "extends_clause"]),
        (C::TypeParameters, &["type_parameters"]),
        (C::Function, JS_FUNCTIONS),
        (C::Import, &["import_statement"]),
        (C::Decorator, &["decorator"]),
        (C::Superclass, &["extends_clause"]),
        (C::Implements, &["implements_clause"]),
        (C::Parameters, &["formal_parameters"]),
        (C::TypeAnnotation, &["type_annotation"]),
        (
            C::Modifier,
            &["accessibility_modifier", "static", "async", "readonly", "abstract", "override"],
        ),
        (C::ExportWrapper, &["export_statement"]),
        (C::Assignment, &["variable_declarator", "assignment_expression", "pair"]),
        (C::Identifier, JS_IDENTIFIERS),
        (C::Comment, &["comment"]),
        (C::StringLiteral, &["string", "template_string"]),
        (C::ObjectLiteral, &["object"]),
        (C::Pair, &["pair"]),
        (C::Call, &["call_expression"]),
    ],
};

pub(super) static PYTHON: LanguageProfile = LanguageProfile {
    id: LanguageId::Python,
    extensions: &["py", "pyi"],
    visibility: VisibilityStyle::Underscore,
    type_position: TypePosition::AfterName,
    return_type_fields: &["return_type"],
    import_style: ImportStyle::PythonModule,
    node_kinds: &[
        (C::ClassDeclaration, &["class_definition"]),
        (C::ClassBody, &["block"]),
        (C::Method, &["function_definition"]),
        (C::Field, &["assignment"]),
        (C::Function, &["function_definition", "lambda"]),
        (C::Import, &["import_statement", "import_from_statement"]),
        (C::Decorator, &["decorator"]),
        (C::Superclass, &["argument_list"]),
        (C::Parameters, &["parameters", "lambda_parameters"]),
        (C::TypeAnnotation, &["type"]),
        (C::Modifier, &["async"]),
        (C::Assignment, &["assignment"]),
        (C::Wrapper, &["decorated_definition", "expression_statement"]),
        (C::Identifier, &["identifier"]),
        (C::Comment, &["comment"]),
        (C::StringLiteral, &["string"]),
        (C::ObjectLiteral, &["dictionary"]),
        (C::Pair, &["pair"]),
        (C::Call, &["call"]),
    ],
};

const JAVA_TYPES: &[&str] = &[
    "type_identifier",
    "scoped_type_identifier",
    "generic_type",
    "array_type",
    "integral_type",
    "floating_point_type",
    "boolean_type",
    "void_type",
];

pub(super) static JAVA: LanguageProfile = LanguageProfile {
    id: LanguageId::Java,
    extensions: &["java"],
    visibility: VisibilityStyle::Modifiers {
        default: Visibility::Public,
    },
    type_position: TypePosition::BeforeName,
    return_type_fields: &["type"],
    import_style: ImportStyle::QualifiedPath,
    node_kinds: &[
        (C::ClassDeclaration, &["class_declaration", "record_declaration"]),
        (C::ClassBody, &["class_body"]),
        (C::Method, &["method_declaration"]),
        (C::Field, &["field_declaration"]),
        (
            C::Constructor,
            &["constructor_declaration", "compact_constructor_declaration"],
        ),
        (C::Interface, &["interface_declaration"]),
        (C::InterfaceBody, &["interface_body"]),
        (C::PropertySignature, &["constant_declaration"]),
        (C::MethodSignature, &["method_declaration"]),
        (C::InterfaceExtends, &["extends_interfaces"]),
        (C::TypeParameters, &["type_parameters"]),
        (C::Import, &["import_declaration"]),
        (C::Decorator, &["annotation", "marker_annotation"]),
        (C::Superclass, &["superclass"]),
        (C::Implements, &["super_interfaces"]),
        (C::Parameters, &["formal_parameters"]),
        (C::TypeAnnotation, JAVA_TYPES),
        (C::Modifier, &["modifiers"]),
        (C::Assignment, &["variable_declarator"]),
        (C::Identifier, &["identifier", "type_identifier"]),
        (C::Comment, &["line_comment", "block_comment", "comment"]),
        (C::StringLiteral, &["string_literal"]),
        (C::ObjectLiteral, &["annotation_argument_list"]),
        (C::Pair, &["element_value_pair"]),
        (C::Call, &["method_invocation"]),
    ],
};

const GO_TYPES: &[&str] = &[
    "type_identifier",
    "qualified_type",
    "pointer_type",
    "slice_type",
    "array_type",
    "map_type",
    "channel_type",
    "function_type",
    "interface_type",
    "struct_type",
    "generic_type",
];

pub(super) static GO: LanguageProfile = LanguageProfile {
    id: LanguageId::Go,
    extensions: &["go"],
    visibility: VisibilityStyle::Capitalization,
    type_position: TypePosition::AfterName,
    return_type_fields: &["result"],
    import_style: ImportStyle::StringLiteral,
    node_kinds: &[
        (C::ClassDeclaration, &["struct_type"]),
        (C::ClassBody, &["field_declaration_list"]),
        (C::Field, &["field_declaration"]),
        (C::Interface, &["interface_type"]),
        (C::MethodSignature, &["method_spec", "method_elem"]),
        (
            C::Function,
            &["function_declaration", "method_declaration", "func_literal"],
        ),
        (C::Import, &["import_spec"]),
        (C::Parameters, &["parameter_list"]),
        (C::TypeAnnotation, GO_TYPES),
        (
            C::Assignment,
            &["type_spec", "short_var_declaration", "var_spec", "assignment_statement"],
        ),
        (C::Wrapper, &["expression_list"]),
        (C::Identifier, &["identifier", "field_identifier", "type_identifier"]),
        (C::Comment, &["comment"]),
        (
            C::StringLiteral,
            &["interpreted_string_literal", "raw_string_literal"],
        ),
        (C::Call, &["call_expression"]),
    ],
};

const RUST_TYPES: &[&str] = &[
    "type_identifier",
    "primitive_type",
    "reference_type",
    "generic_type",
    "scoped_type_identifier",
    "tuple_type",
    "array_type",
    "pointer_type",
    "function_type",
    "dynamic_type",
    "abstract_type",
    "unit_type",
];

pub(super) static RUST: LanguageProfile = LanguageProfile {
    id: LanguageId::Rust,
    extensions: &["rs"],
    visibility: VisibilityStyle::Modifiers {
        default: Visibility::Private,
    },
    type_position: TypePosition::AfterName,
    return_type_fields: &["return_type"],
    import_style: ImportStyle::QualifiedPath,
    node_kinds: &[
        (C::ClassDeclaration, &["struct_item", "union_item"]),
        (C::ClassBody, &["field_declaration_list"]),
        (C::Field, &["field_declaration"]),
        (C::Interface, &["trait_item"]),
        (C::InterfaceBody, &["declaration_list"]),
        (C::MethodSignature, &["function_signature_item", "function_item"]),
        (C::InterfaceExtends, &["trait_bounds"]),
        (C::TypeParameters, &["type_parameters"]),
        (C::Function, &["function_item", "closure_expression"]),
        (C::Import, &["use_declaration"]),
        (C::Decorator, &["attribute_item"]),
        (C::Parameters, &["parameters", "closure_parameters"]),
        (C::TypeAnnotation, RUST_TYPES),
        (C::Modifier, &["visibility_modifier", "function_modifiers"]),
        (C::Assignment, &["let_declaration"]),
        (C::Identifier, &["identifier", "type_identifier", "field_identifier"]),
        (C::Comment, &["line_comment", "block_comment"]),
        (C::StringLiteral, &["string_literal", "raw_string_literal"]),
        (C::Call, &["call_expression", "macro_invocation"]),
    ],
};

const C_TYPES: &[&str] = &[
    "primitive_type",
    "type_identifier",
    "sized_type_specifier",
    "struct_specifier",
    "enum_specifier",
    "union_specifier",
    "qualified_identifier",
    "template_type",
];

pub(super) static C_LANG: LanguageProfile = LanguageProfile {
    id: LanguageId::C,
    extensions: &["c", "h"],
    visibility: VisibilityStyle::Modifiers {
        default: Visibility::Public,
    },
    type_position: TypePosition::BeforeName,
    return_type_fields: &["type"],
    import_style: ImportStyle::Include,
    node_kinds: &[
        (C::ClassDeclaration, &["struct_specifier", "union_specifier"]),
        (C::ClassBody, &["field_declaration_list"]),
        (C::Field, &["field_declaration"]),
        (C::Function, &["function_definition"]),
        (C::Import, &["preproc_include"]),
        (C::Parameters, &["parameter_list"]),
        (C::TypeAnnotation, C_TYPES),
        (C::Modifier, &["storage_class_specifier"]),
        (C::Identifier, &["identifier", "field_identifier", "type_identifier"]),
        (C::Comment, &["comment"]),
        (C::StringLiteral, &["string_literal", "system_lib_string"]),
        (C::Call, &["call_expression"]),
    ],
};

pub(super) static CPP: LanguageProfile = LanguageProfile {
    id: LanguageId::Cpp,
    extensions: &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
    visibility: VisibilityStyle::Modifiers {
        default: Visibility::Public,
    },
    type_position: TypePosition::BeforeName,
    return_type_fields: &["type"],
    import_style: ImportStyle::Include,
    node_kinds: &[
        (C::ClassDeclaration, &["class_specifier", "struct_specifier"]),
        (C::ClassBody, &["field_declaration_list"]),
        (C::Method, &["function_definition"]),
        (C::Field, &["field_declaration"]),
        (C::Function, &["function_definition", "lambda_expression"]),
        (C::Import, &["preproc_include"]),
        (C::Superclass, &["base_class_clause"]),
        (C::Parameters, &["parameter_list"]),
        (C::TypeAnnotation, C_TYPES),
        (C::Modifier, &["storage_class_specifier", "virtual"]),
        (C::AccessSection, &["access_specifier"]),
        (C::Assignment, &["init_declarator"]),
        (
            C::Identifier,
            &[
                "identifier",
                "field_identifier",
                "type_identifier",
                "qualified_identifier",
                "destructor_name",
            ],
        ),
        (C::Comment, &["comment"]),
        (C::StringLiteral, &["string_literal", "system_lib_string"]),
        (C::Call, &["call_expression"]),
    ],
};

pub(super) static CSHARP: LanguageProfile = LanguageProfile {
    id: LanguageId::CSharp,
    extensions: &["cs"],
    visibility: VisibilityStyle::Modifiers {
        default: Visibility::Public,
    },
    type_position: TypePosition::BeforeName,
    return_type_fields: &["returns", "type"],
    import_style: ImportStyle::QualifiedPath,
    node_kinds: &[
        (
            C::ClassDeclaration,
            &["class_declaration", "struct_declaration", "record_declaration"],
        ),
        (C::ClassBody, &["declaration_list"]),
        (C::Method, &["method_declaration"]),
        (C::Field, &["field_declaration", "property_declaration"]),
        (C::Constructor, &["constructor_declaration"]),
        (C::Interface, &["interface_declaration"]),
        (C::InterfaceBody, &["declaration_list"]),
        (C::PropertySignature, &["property_declaration"]),
        (C::MethodSignature, &["method_declaration"]),
        (C::InterfaceExtends, &["base_list"]),
        (C::TypeParameters, &["type_parameter_list"]),
        (C::Function, &["local_function_statement", "lambda_expression"]),
        (C::Import, &["using_directive"]),
        (C::Decorator, &["attribute"]),
        (C::Superclass, &["base_list"]),
        (C::Parameters, &["parameter_list"]),
        (
            C::TypeAnnotation,
            &[
                "predefined_type",
                "identifier",
                "generic_name",
                "qualified_name",
                "array_type",
                "nullable_type",
            ],
        ),
        (C::Modifier, &["modifier"]),
        (C::Assignment, &["variable_declarator"]),
        (C::Identifier, &["identifier"]),
        (C::Comment, &["comment"]),
        (C::StringLiteral, &["string_literal"]),
        (C::ObjectLiteral, &["attribute_argument_list"]),
        (C::Pair, &["attribute_argument"]),
        (C::Call, &["invocation_expression"]),
    ],
};

pub(super) static RUBY: LanguageProfile = LanguageProfile {
    id: LanguageId::Ruby,
    extensions: &["rb"],
    visibility: VisibilityStyle::Modifiers {
        default: Visibility::Public,
    },
    type_position: TypePosition::AfterName,
    return_type_fields: &[],
    import_style: ImportStyle::None,
    node_kinds: &[
        (C::ClassDeclaration, &["class"]),
        (C::ClassBody, &["body_statement"]),
        (C::Method, &["method", "singleton_method"]),
        (C::Function, &["method", "lambda"]),
        (C::Superclass, &["superclass"]),
        (C::Parameters, &["method_parameters", "lambda_parameters"]),
        (C::AccessSection, &["identifier"]),
        (C::Assignment, &["assignment"]),
        (C::Identifier, &["identifier", "constant"]),
        (C::Comment, &["comment"]),
        (C::StringLiteral, &["string"]),
        (C::Pair, &["pair"]),
        (C::ObjectLiteral, &["hash"]),
        (C::Call, &["call"]),
    ],
};

/// Best-effort guesses for grammars without a table
pub(super) static DEFAULT: LanguageProfile = LanguageProfile {
    id: LanguageId::Unknown,
    extensions: &[],
    visibility: VisibilityStyle::Modifiers {
        default: Visibility::Public,
    },
    type_position: TypePosition::AfterName,
    return_type_fields: &["return_type"],
    import_style: ImportStyle::StringLiteral,
    node_kinds: &[
        (
            C::ClassDeclaration,
            &["class_declaration", "class_definition", "class"],
        ),
        (C::ClassBody, &["class_body", "block", "body"]),
        (
            C::Method,
            &["method_definition", "method_declaration", "method"],
        ),
        (C::Field, &["field_declaration", "field_definition"]),
        (C::Interface, &["interface_declaration"]),
        (
            C::Function,
            &["function_declaration", "function_definition", "function"],
        ),
        (C::Import, &["import_statement", "import_declaration"]),
        (C::Decorator, &["decorator", "annotation"]),
        (
            C::Parameters,
            &["parameters", "formal_parameters", "parameter_list"],
        ),
        (C::Identifier, &["identifier", "type_identifier", "property_identifier"]),
        (C::Comment, &["comment"]),
        (C::StringLiteral, &["string", "string_literal"]),
    ],
};
