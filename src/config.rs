//! Generator conventions: which files count as services, how projects are
//! named, and the fixed values stamped into every collection document.

/// Postman collection schema every generated document declares.
pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Conventions and document defaults for one generator run.
///
/// `Default` reproduces the conventions of the MDPA client projects the
/// generator was written for; the CLI overrides the outward-facing values.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// File-name suffix identifying a service interface
    pub service_suffix: String,
    /// Directory-name suffix identifying a project folder
    pub project_marker: String,
    /// Extension of source files considered at all
    pub source_extension: String,
    /// Directory names never descended into
    pub ignored_dirs: Vec<String>,
    /// Default value of the `baseUrl` collection variable
    pub base_url: String,
    /// Name of the collection variable holding the bearer token
    pub token_variable: String,
    /// `info.name` of the aggregate document
    pub aggregate_name: String,
    /// `info.description` of the aggregate document
    pub aggregate_description: String,
    /// File name the aggregate document is written to
    pub aggregate_file_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            service_suffix: "Service.java".to_string(),
            project_marker: "-client".to_string(),
            source_extension: "java".to_string(),
            ignored_dirs: [
                "node_modules",
                ".git",
                "target",
                "build",
                "dist",
                "bin",
                ".idea",
                ".vscode",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            base_url: "https://mdpa-11837.domad.local".to_string(),
            token_variable: "intranetAccessToken".to_string(),
            aggregate_name: "MDPA API Services".to_string(),
            aggregate_description: "Complete collection of all MDPA API services".to_string(),
            aggregate_file_name: "All_Services.json".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_aggregate_name(mut self, name: impl Into<String>) -> Self {
        self.aggregate_name = name.into();
        self
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }

    pub fn is_project_dir(&self, name: &str) -> bool {
        name.ends_with(&self.project_marker)
    }

    /// Display name for a project folder: the marker is stripped and an `s`
    /// appended unless the remainder already ends in one.
    ///
    /// `billing-client` becomes `billings`, `items-client` stays `items`.
    pub fn project_display_name(&self, project_dir: &str) -> String {
        let mut name = project_dir
            .strip_suffix(self.project_marker.as_str())
            .unwrap_or(project_dir)
            .to_string();
        if !name.ends_with('s') {
            name.push('s');
        }
        name
    }

    /// `{{token}}` reference used by every bearer auth block.
    pub fn token_reference(&self) -> String {
        format!("{{{{{}}}}}", self.token_variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_display_name_appends_plural() {
        let config = GeneratorConfig::default();
        assert_eq!(config.project_display_name("billing-client"), "billings");
    }

    #[test]
    fn test_project_display_name_keeps_existing_plural() {
        let config = GeneratorConfig::default();
        assert_eq!(config.project_display_name("items-client"), "items");
    }

    #[test]
    fn test_project_display_name_without_marker() {
        let config = GeneratorConfig::default();
        assert_eq!(config.project_display_name("order"), "orders");
    }

    #[test]
    fn test_token_reference() {
        let config = GeneratorConfig::default();
        assert_eq!(config.token_reference(), "{{intranetAccessToken}}");
    }

    #[test]
    fn test_ignored_dirs() {
        let config = GeneratorConfig::default();
        assert!(config.is_ignored_dir("node_modules"));
        assert!(config.is_ignored_dir(".idea"));
        assert!(!config.is_ignored_dir("src"));
    }
}
