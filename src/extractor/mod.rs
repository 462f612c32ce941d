//! Fact extraction from annotated Java sources.
//!
//! Extraction is pattern based and deliberately tolerant: no grammar is
//! applied, only the subset of structure needed to recover HTTP routes and
//! model shapes. The individual matchers live in [`matchers`] so each can fail
//! (and be tested) on its own.
//!
//! - **Models**: see [`model::extract_model`]
//! - **Services**: see [`service::extract_service`]

pub mod matchers;
pub mod model;
pub mod service;

use crate::error::ExtractError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Outcome of extracting facts from one candidate file.
///
/// Extraction never aborts a run. A file either yields its fact, yields a
/// placeholder fact together with the reason it is degraded, or yields nothing
/// at all.
#[derive(Debug)]
pub enum Extraction<T> {
    /// All expected facts were recovered (missing optional parts are defaulted)
    Parsed(T),
    /// The file could not be parsed; `fact` is the empty placeholder
    Degraded { fact: T, reason: ExtractError },
    /// The file carries no recoverable fact
    Skipped { reason: ExtractError },
}

impl<T> Extraction<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Extraction::Parsed(_))
    }

    /// The fact, including the placeholder of a degraded extraction.
    pub fn fact(&self) -> Option<&T> {
        match self {
            Extraction::Parsed(fact) | Extraction::Degraded { fact, .. } => Some(fact),
            Extraction::Skipped { .. } => None,
        }
    }

    /// The fact only when it was fully parsed.
    pub fn parsed(self) -> Option<T> {
        match self {
            Extraction::Parsed(fact) => Some(fact),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&ExtractError> {
        match self {
            Extraction::Parsed(_) => None,
            Extraction::Degraded { reason, .. } | Extraction::Skipped { reason } => Some(reason),
        }
    }
}

/// HTTP methods recognised on service interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn from_annotation(name: &str) -> Option<Self> {
        match name {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared field of a model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFact {
    pub name: String,
    /// Type text as written, e.g. `List<String>` or `byte[]`
    pub declared_type: String,
}

/// Shape of one model type, fields in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFact {
    pub name: String,
    pub fields: Vec<FieldFact>,
}

/// One annotated operation of a service interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodFact {
    pub name: String,
    pub http_method: HttpMethod,
    /// Route path as written in the method's `@Path`
    pub sub_path: String,
    /// First sentence of the preceding doc comment, possibly empty
    pub description: String,
    pub return_type: String,
    /// Placeholders from the route plus `@PathParam` names, sorted and unique
    pub path_params: Vec<String>,
    /// `@QueryParam` names in declaration order
    pub query_params: Vec<String>,
    /// Known model used as request body (POST/PUT only)
    pub body_model: Option<String>,
}

/// Everything recovered from one service interface file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFact {
    pub interface_name: String,
    pub base_path: String,
    pub methods: Vec<MethodFact>,
    pub source_path: PathBuf,
}

impl ServiceFact {
    /// Placeholder for a file that could not be parsed.
    pub fn empty(interface_name: String, source_path: PathBuf) -> Self {
        Self {
            interface_name,
            base_path: String::new(),
            methods: Vec::new(),
            source_path,
        }
    }

    /// Collection name: the interface name without a conventional `I` prefix.
    ///
    /// `IOrderService` becomes `OrderService` while `ItemService` is kept.
    pub fn collection_name(&self) -> String {
        let mut chars = self.interface_name.chars();
        match (chars.next(), chars.next()) {
            (Some('I'), Some(second)) if second.is_ascii_uppercase() => {
                self.interface_name[1..].to_string()
            }
            _ => self.interface_name.clone(),
        }
    }
}
