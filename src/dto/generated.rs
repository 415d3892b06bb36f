//! Generated artifacts returned by the code generation endpoints.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::spec::Framework;

/// Text of every file produced for a specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedCode {
    /// Application entry point (`main.py` or `app.js`).
    pub main_code: String,
    /// Data models.
    pub models: String,
    /// Database connection setup.
    pub database: String,
    /// Dependency manifest (`requirements.txt` or `package.json`).
    pub requirements: String,
    /// Markdown documentation (`README.md`).
    pub documentation: String,
}

impl GeneratedCode {
    /// Lay the artifacts out as named files for the given framework.
    pub fn into_files(self, framework: Framework) -> IndexMap<String, String> {
        let names = FileNames::for_framework(framework);
        IndexMap::from([
            (names.main.to_string(), self.main_code),
            (names.models.to_string(), self.models),
            (names.database.to_string(), self.database),
            (names.requirements.to_string(), self.requirements),
            (names.documentation.to_string(), self.documentation),
        ])
    }
}

/// File names of the generated artifacts for one framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileNames {
    pub main: &'static str,
    pub models: &'static str,
    pub database: &'static str,
    pub requirements: &'static str,
    pub documentation: &'static str,
}

impl FileNames {
    /// File names used by `framework` projects.
    pub fn for_framework(framework: Framework) -> Self {
        if framework.is_python() {
            Self {
                main: "main.py",
                models: "models.py",
                database: "database.py",
                requirements: "requirements.txt",
                documentation: "README.md",
            }
        } else {
            Self {
                main: "app.js",
                models: "models.js",
                database: "database.js",
                requirements: "package.json",
                documentation: "README.md",
            }
        }
    }
}

/// Response of the download endpoint: every file keyed by its name.
#[derive(Debug, Serialize, ToSchema)]
pub struct DownloadResponse {
    pub success: bool,
    pub message: String,
    /// Ordered map of file name to file content.
    #[schema(value_type = Object)]
    pub files: IndexMap<String, String>,
    /// Directory-friendly project name derived from the API name.
    pub project_name: String,
}
