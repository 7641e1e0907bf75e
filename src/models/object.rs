// file: src/models/object.rs
// description: documented object entries and their kind tags
// reference: internal data structures

use super::document::DocId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Module,
    Class,
    Method,
    Property,
    Attribute,
    Function,
    Exception,
    Data,
    Other(String),
}

impl ObjectKind {
    /// Maps a domain role such as `class` or `classmethod` to a kind.
    pub fn from_role(role: &str) -> Self {
        match role {
            "module" => ObjectKind::Module,
            "class" => ObjectKind::Class,
            "method" | "classmethod" | "staticmethod" => ObjectKind::Method,
            "property" => ObjectKind::Property,
            "attribute" => ObjectKind::Attribute,
            "function" => ObjectKind::Function,
            "exception" => ObjectKind::Exception,
            "data" => ObjectKind::Data,
            other => ObjectKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::Module => "module",
            ObjectKind::Class => "class",
            ObjectKind::Method => "method",
            ObjectKind::Property => "property",
            ObjectKind::Attribute => "attribute",
            ObjectKind::Function => "function",
            ObjectKind::Exception => "exception",
            ObjectKind::Data => "data",
            ObjectKind::Other(role) => role,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search priority recorded by the builder for each object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectPriority {
    Important,
    Default,
    Unimportant,
    Hidden(i64),
}

impl ObjectPriority {
    pub fn from_raw(value: i64) -> Self {
        match value {
            0 => ObjectPriority::Important,
            1 => ObjectPriority::Default,
            2 => ObjectPriority::Unimportant,
            other => ObjectPriority::Hidden(other),
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            ObjectPriority::Important => 0,
            ObjectPriority::Default => 1,
            ObjectPriority::Unimportant => 2,
            ObjectPriority::Hidden(value) => value,
        }
    }
}

/// One row of the `objtypes`/`objnames` tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Domain, e.g. `py`.
    pub domain: String,
    /// Role within the domain, e.g. `method`.
    pub role: String,
    /// Human readable label, e.g. `Python method`.
    pub label: String,
}

impl ObjectType {
    /// Builds a type from an `objtypes` value like `py:method`.
    pub fn from_qualified(qualified: &str) -> Self {
        let (domain, role) = qualified.split_once(':').unwrap_or(("", qualified));
        Self {
            domain: domain.to_string(),
            role: role.to_string(),
            label: qualified.to_string(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        ObjectKind::from_role(&self.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Dotted parent path; empty for top-level modules.
    pub prefix: String,
    pub name: String,
    pub doc: DocId,
    pub kind: ObjectKind,
    pub type_index: usize,
    pub priority: ObjectPriority,
    /// Raw anchor as stored; see [`ObjectEntry::resolved_anchor`].
    pub anchor: String,
}

impl ObjectEntry {
    pub fn full_name(&self) -> String {
        if self.prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.prefix, self.name)
        }
    }

    /// Expands the builder's anchor shorthand: `""` stands for the full
    /// name and `"-"` for `<role>-<full name>`.
    pub fn resolved_anchor(&self, role: &str) -> String {
        match self.anchor.as_str() {
            "" => self.full_name(),
            "-" => format!("{}-{}", role, self.full_name()),
            anchor => anchor.to_string(),
        }
    }
}
