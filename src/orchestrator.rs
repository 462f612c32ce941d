//! Drives a full generator run: discovery, extraction, assembly and output.
//!
//! Per-service documents are written as each file is processed, project
//! documents once a project is complete, and the aggregate document last.
//! Within a project, files are handled in the order the scanner yielded them,
//! which follows filesystem traversal and is not guaranteed stable across
//! platforms.

use crate::collection::{CollectionAssembler, CollectionDocument, Folder, Item};
use crate::config::GeneratorConfig;
use crate::context::{ModelRegistry, RunContext};
use crate::extractor::service::extract_service_file;
use crate::extractor::Extraction;
use crate::scanner::{project_dir_of, FileScanner};
use crate::serializer::write_document;
use anyhow::Result;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Files and models discovered across all roots of a run.
#[derive(Debug, Default)]
pub struct Discovery {
    pub service_files: Vec<PathBuf>,
    pub models: ModelRegistry,
    pub model_files: usize,
    pub models_skipped: usize,
    pub warnings: Vec<String>,
}

/// Service files of one project folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGroup {
    /// Folder name, e.g. `billing-client`
    pub dir_name: String,
    /// Name used in URLs and documents, e.g. `billings`
    pub display_name: String,
    pub files: Vec<PathBuf>,
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub model_files: usize,
    pub models_registered: usize,
    pub service_files: usize,
    pub services_assembled: usize,
    pub projects: usize,
    /// Service files that yielded no usable fact
    pub skipped_files: Vec<PathBuf>,
    pub documents_written: Vec<PathBuf>,
    pub write_failures: Vec<PathBuf>,
    /// Service documents written under a project-qualified name because their
    /// plain name was already taken in this run
    pub renamed_documents: Vec<PathBuf>,
}

impl RunSummary {
    pub fn has_write_failures(&self) -> bool {
        !self.write_failures.is_empty()
    }

    /// Whether a document has already been written, or attempted, at `path`.
    pub fn is_claimed(&self, path: &Path) -> bool {
        self.documents_written.iter().any(|p| p == path)
            || self.write_failures.iter().any(|p| p == path)
    }
}

/// Scans every root, registering models and collecting service files.
///
/// The model table is complete before any service is looked at, so body
/// models resolve regardless of which root declares them.
///
/// # Errors
///
/// Returns an error if a root directory cannot be accessed.
pub fn discover(roots: &[PathBuf], config: &GeneratorConfig) -> Result<Discovery> {
    let mut discovery = Discovery::default();

    for root in roots {
        let scan = FileScanner::new(root.clone(), config).scan()?;
        info!("Found {} model files in {}", scan.model_files.len(), root.display());
        info!("Found {} service files in {}", scan.service_files.len(), root.display());

        discovery.model_files += scan.model_files.len();
        discovery.models_skipped += discovery.models.register_files(&scan.model_files);
        discovery.service_files.extend(scan.service_files);
        discovery.warnings.extend(scan.warnings);
    }

    info!(
        "Parsed {} models successfully across all directories",
        discovery.models.len()
    );
    info!(
        "Found {} service files across all directories",
        discovery.service_files.len()
    );
    Ok(discovery)
}

/// Groups service files by their project folder, keeping first-seen order.
pub fn group_by_project(
    service_files: &[PathBuf],
    config: &GeneratorConfig,
) -> Vec<ProjectGroup> {
    let mut groups: Vec<ProjectGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for path in service_files {
        let Some(dir_name) = project_dir_of(path, config) else {
            debug!("No project folder for {}", path.display());
            continue;
        };
        let idx = *positions.entry(dir_name.clone()).or_insert_with(|| {
            groups.push(ProjectGroup {
                display_name: config.project_display_name(&dir_name),
                dir_name: dir_name.clone(),
                files: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].files.push(path.clone());
    }

    groups
}

/// Processes project groups and persists every document.
pub struct Orchestrator<'a> {
    ctx: &'a RunContext,
    output_dir: PathBuf,
}

impl<'a> Orchestrator<'a> {
    pub fn new(ctx: &'a RunContext, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            ctx,
            output_dir: output_dir.into(),
        }
    }

    /// Writes per-service, per-project and aggregate documents.
    ///
    /// Failures on one file or document are logged and recorded in the summary;
    /// they never stop the remaining work.
    pub fn run(&self, groups: &[ProjectGroup]) -> RunSummary {
        let config = &self.ctx.config;
        let mut summary = RunSummary {
            projects: groups.len(),
            service_files: groups.iter().map(|g| g.files.len()).sum(),
            models_registered: self.ctx.models.len(),
            ..RunSummary::default()
        };

        let mut aggregate = CollectionDocument::new(
            config.aggregate_name.clone(),
            config.aggregate_description.clone(),
            config,
        )
        .with_token_variable(config);

        for group in groups {
            let folder = self.process_project(group, &mut summary);
            aggregate.item.push(Item::Folder(folder));
        }

        let path = self.output_dir.join(&config.aggregate_file_name);
        self.persist(&aggregate, &path, &mut summary);
        info!("Created main collection: {}", path.display());

        summary
    }

    /// Builds the folder of one project, writing its service and project documents.
    pub fn process_project(&self, group: &ProjectGroup, summary: &mut RunSummary) -> Folder {
        let config = &self.ctx.config;
        let assembler = CollectionAssembler::new(self.ctx);
        let mut folder = Folder::new(
            group.display_name.clone(),
            Some(format!("Services from {}", group.dir_name)),
        );

        for path in &group.files {
            let service = match extract_service_file(path, &self.ctx.models) {
                Extraction::Parsed(service) => service,
                other => {
                    let reason = other
                        .reason()
                        .map(|r| r.to_string())
                        .unwrap_or_default();
                    warn!("Error processing {}: {}", path.display(), reason);
                    summary.skipped_files.push(path.clone());
                    continue;
                }
            };

            let doc = assembler.assemble(&service, &group.display_name);
            let doc_path = self.service_doc_path(&doc.info.name, &group.display_name, summary);
            if self.persist(&doc, &doc_path, summary) {
                info!("Created collection: {}", doc_path.display());
            }
            summary.services_assembled += 1;

            folder.item.push(Item::Folder(Folder {
                name: doc.info.name,
                item: doc.item,
                description: None,
            }));
        }

        if !folder.item.is_empty() {
            let project_doc = CollectionDocument::new(
                group.display_name.clone(),
                format!("Collection for {}", group.dir_name),
                config,
            )
            .with_token_variable(config)
            .with_items(folder.item.clone());

            let doc_path = self
                .output_dir
                .join(format!("{}.json", group.display_name));
            if self.persist(&project_doc, &doc_path, summary) {
                info!("Created project collection: {}", doc_path.display());
            }
        }

        folder
    }

    /// Output path of a service document.
    ///
    /// Services sharing a collection name across projects would overwrite each
    /// other, so a taken `<name>.json` becomes `<project>_<name>.json`, with a
    /// numeric suffix if even that is taken.
    fn service_doc_path(&self, name: &str, project: &str, summary: &mut RunSummary) -> PathBuf {
        let plain = self.output_dir.join(format!("{}.json", name));
        if !summary.is_claimed(&plain) {
            return plain;
        }

        let stem = format!("{}_{}", project, name);
        let mut candidate = self.output_dir.join(format!("{}.json", stem));
        let mut n = 2;
        while summary.is_claimed(&candidate) {
            candidate = self.output_dir.join(format!("{}_{}.json", stem, n));
            n += 1;
        }
        warn!(
            "{} already written in this run, using {}",
            plain.display(),
            candidate.display()
        );
        summary.renamed_documents.push(candidate.clone());
        candidate
    }

    fn persist(&self, doc: &CollectionDocument, path: &Path, summary: &mut RunSummary) -> bool {
        match write_document(doc, path) {
            Ok(()) => {
                summary.documents_written.push(path.to_path_buf());
                true
            }
            Err(e) => {
                error!("Failed to write {}: {:#}", path.display(), e);
                summary.write_failures.push(path.to_path_buf());
                false
            }
        }
    }
}

/// Runs the whole pipeline over `roots`, writing into `output_dir`.
///
/// # Errors
///
/// Returns an error only if discovery fails; per-file problems end up in the
/// returned summary.
pub fn run(roots: &[PathBuf], output_dir: &Path, config: GeneratorConfig) -> Result<RunSummary> {
    let discovery = discover(roots, &config)?;
    let groups = group_by_project(&discovery.service_files, &config);
    let ctx = RunContext::new(config, discovery.models);

    let mut summary = Orchestrator::new(&ctx, output_dir).run(&groups);
    summary.model_files = discovery.model_files;
    Ok(summary)
}
