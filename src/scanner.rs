use crate::config::GeneratorConfig;
use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File scanner for locating service interfaces and model sources.
///
/// The `FileScanner` recursively walks one root directory and classifies every
/// source file it meets. Tooling and build directories listed in
/// [`GeneratorConfig::ignored_dirs`] are pruned before they are descended into,
/// and symbolic links are not followed, so no directory is visited twice.
///
/// # Example
///
/// ```no_run
/// use postman_from_source::config::GeneratorConfig;
/// use postman_from_source::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let config = GeneratorConfig::default();
/// let scanner = FileScanner::new(PathBuf::from("./workspace"), &config);
/// let result = scanner.scan().unwrap();
/// println!("Found {} service files", result.service_files.len());
/// ```
pub struct FileScanner<'a> {
    root_path: PathBuf,
    config: &'a GeneratorConfig,
}

/// Result of directory scanning operation.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Service interfaces living under a project folder, in traversal order
    pub service_files: Vec<PathBuf>,
    /// Every other source file
    pub model_files: Vec<PathBuf>,
    /// Warning messages for entries that could not be accessed
    pub warnings: Vec<String>,
}

impl<'a> FileScanner<'a> {
    pub fn new(root_path: PathBuf, config: &'a GeneratorConfig) -> Self {
        Self { root_path, config }
    }

    /// Scans the directory tree and classifies source files.
    ///
    /// A file is a service candidate when its name ends with the service suffix
    /// and one of the components of its directory path (the root's own
    /// components included) ends with the project marker. Any other file with
    /// the source extension is a model candidate.
    ///
    /// Entries are visited sorted by file name within each directory. Name
    /// ordering is byte-wise on Unix and may differ on other platforms.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory itself cannot be accessed.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut result = ScanResult::default();

        let walker = WalkDir::new(&self.root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // Don't filter the root directory itself
                if e.depth() == 0 {
                    return true;
                }
                !(e.file_type().is_dir()
                    && self.config.is_ignored_dir(&e.file_name().to_string_lossy()))
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let path = entry.path();
                    if self.is_service_candidate(path) {
                        debug!("Service candidate: {}", path.display());
                        result.service_files.push(path.to_path_buf());
                    } else if self.is_source_file(path) {
                        result.model_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    if e.depth() == 0 {
                        anyhow::bail!(
                            "Failed to access root directory {}: {}",
                            self.root_path.display(),
                            e
                        );
                    }
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    result.warnings.push(warning);
                }
            }
        }

        Ok(result)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(self.config.source_extension.as_str())
    }

    fn is_service_candidate(&self, path: &Path) -> bool {
        let named_as_service = path
            .file_name()
            .map(|n| n.to_string_lossy().ends_with(&self.config.service_suffix))
            .unwrap_or(false);
        named_as_service && project_dir_of(path, self.config).is_some()
    }
}

/// First directory component of `path` whose name ends with the project marker.
pub fn project_dir_of(path: &Path, config: &GeneratorConfig) -> Option<String> {
    path.parent()?
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .find(|name| config.is_project_dir(name))
        .map(|name| name.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_scan_classifies_services_and_models() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "billing-client/src/BillingService.java", "interface");
        write(root, "billing-client/src/Invoice.java", "class");
        write(root, "billing-client/README.md", "# README");

        let config = GeneratorConfig::default();
        let result = FileScanner::new(root.to_path_buf(), &config).scan().unwrap();

        assert_eq!(names(&result.service_files), vec!["BillingService.java"]);
        assert_eq!(names(&result.model_files), vec!["Invoice.java"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_service_outside_project_is_model_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "core/src/AuditService.java", "interface");

        let config = GeneratorConfig::default();
        let result = FileScanner::new(root.to_path_buf(), &config).scan().unwrap();

        assert!(result.service_files.is_empty());
        assert_eq!(names(&result.model_files), vec!["AuditService.java"]);
    }

    #[test]
    fn test_scan_skips_ignored_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "orders-client/target/OrderService.java", "interface");
        write(root, "orders-client/node_modules/Junk.java", "class");
        write(root, "orders-client/.git/Hook.java", "class");
        write(root, "orders-client/src/OrderService.java", "interface");

        let config = GeneratorConfig::default();
        let result = FileScanner::new(root.to_path_buf(), &config).scan().unwrap();

        assert_eq!(result.service_files.len(), 1);
        assert!(result.service_files[0].to_string_lossy().contains("src"));
        assert!(result.model_files.is_empty());
    }

    #[test]
    fn test_root_inside_project_counts_as_project() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("items-client");
        write(&project, "api/ItemService.java", "interface");

        let config = GeneratorConfig::default();
        let result = FileScanner::new(project.clone(), &config).scan().unwrap();

        assert_eq!(result.service_files.len(), 1);
        assert_eq!(
            project_dir_of(&result.service_files[0], &config).as_deref(),
            Some("items-client")
        );
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::default();
        let result = FileScanner::new(temp_dir.path().to_path_buf(), &config)
            .scan()
            .unwrap();

        assert!(result.service_files.is_empty());
        assert!(result.model_files.is_empty());
    }

    #[test]
    fn test_scan_missing_root_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::default();
        let scanner = FileScanner::new(temp_dir.path().join("nope"), &config);
        assert!(scanner.scan().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_back_to_ancestor_is_not_followed() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "orders-client/src/OrderService.java", "interface");
        write(root, "orders-client/src/Order.java", "class");
        std::os::unix::fs::symlink(
            root.join("orders-client"),
            root.join("orders-client/src/loop"),
        )
        .unwrap();

        let config = GeneratorConfig::default();
        let result = FileScanner::new(root.to_path_buf(), &config).scan().unwrap();

        assert_eq!(
            result.service_files,
            vec![root.join("orders-client/src/OrderService.java")]
        );
        assert_eq!(
            result.model_files,
            vec![root.join("orders-client/src/Order.java")]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_project_dir_of_picks_first_marker() {
        let config = GeneratorConfig::default();
        let path = Path::new("/ws/outer-client/inner-client/src/AService.java");
        assert_eq!(project_dir_of(path, &config).as_deref(), Some("outer-client"));
        assert_eq!(project_dir_of(Path::new("/ws/src/AService.java"), &config), None);
    }
}
