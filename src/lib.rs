//! Postman collection generator - request collections from annotated Java sources.
//!
//! This library turns JAX-RS style service interfaces (`*Service.java` inside
//! `*-client` project folders) and the model classes next to them into
//! importable Postman collections. Extraction is pattern based: annotations
//! give HTTP method, route and parameter bindings, and private field
//! declarations give the shape of request bodies.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Walks root directories and classifies service and model files
//! 2. [`parser`] - Loads candidate files
//! 3. [`extractor`] - Recovers model facts and service facts from source text
//! 4. [`context`] - Holds the run-wide model table
//! 5. [`template`] - Synthesizes placeholder request bodies from model facts
//! 6. [`collection`] - Assembles Postman collection documents
//! 7. [`orchestrator`] - Groups services by project and writes all documents
//! 8. [`serializer`] - Writes documents as JSON
//!
//! # Example Usage
//!
//! ```no_run
//! use postman_from_source::{config::GeneratorConfig, orchestrator};
//! use std::path::{Path, PathBuf};
//!
//! let roots = vec![PathBuf::from("./workspace")];
//! let output = Path::new("postman_collections");
//! let summary = orchestrator::run(&roots, output, GeneratorConfig::default()).unwrap();
//! println!("Wrote {} documents", summary.documents_written.len());
//! ```
//!
//! # Command-Line Interface
//!
//! See the [`cli`] module for the binary's arguments.

pub mod cli;
pub mod collection;
pub mod config;
pub mod context;
pub mod error;
pub mod extractor;
pub mod orchestrator;
pub mod parser;
pub mod scanner;
pub mod serializer;
pub mod template;
