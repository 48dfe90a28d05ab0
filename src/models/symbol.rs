//! Symbol model definitions
//!
//! Core types for representing document symbols reported by the host's
//! symbol provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a document within the host editor (typically its URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(uri: &str) -> Self {
        Self(uri.to_string())
    }
}

/// Position within a document (0-indexed, LSP standard)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Range within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether the position lies within this range (inclusive at both ends,
    /// matching the host tree widget's containment semantics).
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

/// A resolvable jump target for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub document: DocumentId,
    pub range: Range,
}

impl Location {
    pub fn new(document: DocumentId, range: Range) -> Self {
        Self { document, range }
    }
}

/// One named code element reported by the symbol provider.
///
/// Children are owned by their parent; the forest of root symbols is owned
/// by the cache entry for its document. Parent links are reconstructed by
/// search, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub kind: SymbolKind,
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: Range) -> Self {
        Self {
            name: name.into(),
            detail: None,
            kind,
            range,
            location: None,
            children: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_children(mut self, children: Vec<Symbol>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Stable identity across refreshes, used by the host widget to match
    /// tree items between renders.
    pub fn identity(&self) -> String {
        format!(
            "{}-{}-{}",
            self.name, self.range.start.line, self.range.start.character
        )
    }
}

/// Symbol classification (aligned with LSP SymbolKind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Key,
    Null,
    EnumMember,
    Struct,
    Event,
    Operator,
    TypeParameter,
}

impl SymbolKind {
    /// Convert from LSP SymbolKind number
    pub fn from_lsp(kind: u32) -> Self {
        match kind {
            1 => Self::File,
            2 => Self::Module,
            3 => Self::Namespace,
            4 => Self::Package,
            5 => Self::Class,
            6 => Self::Method,
            7 => Self::Property,
            8 => Self::Field,
            9 => Self::Constructor,
            10 => Self::Enum,
            11 => Self::Interface,
            12 => Self::Function,
            13 => Self::Variable,
            14 => Self::Constant,
            15 => Self::String,
            16 => Self::Number,
            17 => Self::Boolean,
            18 => Self::Array,
            19 => Self::Object,
            20 => Self::Key,
            21 => Self::Null,
            22 => Self::EnumMember,
            23 => Self::Struct,
            24 => Self::Event,
            25 => Self::Operator,
            26 => Self::TypeParameter,
            _ => Self::Variable, // Default fallback
        }
    }

    /// Convert to LSP SymbolKind number
    pub fn to_lsp(&self) -> u32 {
        match self {
            Self::File => 1,
            Self::Module => 2,
            Self::Namespace => 3,
            Self::Package => 4,
            Self::Class => 5,
            Self::Method => 6,
            Self::Property => 7,
            Self::Field => 8,
            Self::Constructor => 9,
            Self::Enum => 10,
            Self::Interface => 11,
            Self::Function => 12,
            Self::Variable => 13,
            Self::Constant => 14,
            Self::String => 15,
            Self::Number => 16,
            Self::Boolean => 17,
            Self::Array => 18,
            Self::Object => 19,
            Self::Key => 20,
            Self::Null => 21,
            Self::EnumMember => 22,
            Self::Struct => 23,
            Self::Event => 24,
            Self::Operator => 25,
            Self::TypeParameter => 26,
        }
    }

    /// Host theme-icon identifier for this kind.
    ///
    /// Total mapping: every kind resolves to an icon; kinds without a
    /// dedicated glyph fall back to the namespace icon.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::File => "symbol-file",
            Self::Module => "symbol-module",
            Self::Namespace => "symbol-namespace",
            Self::Package => "symbol-package",
            Self::Class => "symbol-class",
            Self::Method => "symbol-method",
            Self::Property => "symbol-property",
            Self::Field => "symbol-field",
            Self::Constructor => "symbol-constructor",
            Self::Enum => "symbol-enum",
            Self::Interface => "symbol-interface",
            Self::Function => "symbol-function",
            Self::Variable => "symbol-variable",
            Self::Constant => "symbol-constant",
            Self::String => "symbol-string",
            Self::Number => "symbol-number",
            Self::Boolean => "symbol-boolean",
            Self::Array => "symbol-array",
            Self::Object => "symbol-object",
            Self::Key => "symbol-key",
            Self::Null => "symbol-null",
            Self::EnumMember => "symbol-enum-member",
            Self::Event => "symbol-event",
            // No dedicated glyphs; generic namespace icon.
            Self::Struct | Self::Operator | Self::TypeParameter => "symbol-namespace",
        }
    }

    /// Kinds expanded by default at the top level of the tree.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Namespace | Self::Module | Self::Class)
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Module => "module",
            Self::Namespace => "namespace",
            Self::Package => "package",
            Self::Class => "class",
            Self::Method => "method",
            Self::Property => "property",
            Self::Field => "field",
            Self::Constructor => "constructor",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Constant => "constant",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Key => "key",
            Self::Null => "null",
            Self::EnumMember => "enum_member",
            Self::Struct => "struct",
            Self::Event => "event",
            Self::Operator => "operator",
            Self::TypeParameter => "type_parameter",
        };
        write!(f, "{}", s)
    }
}
