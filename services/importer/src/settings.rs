use std::{env, fs, path::PathBuf};

use thiserror::Error;

/// Titles shipped with the importer
const BUILTIN_TITLES: &str = include_str!("../top_movies.txt");

const DEFAULT_USER_NAME: &str = "Best 100 Movies";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read titles file '{path}': {source}")]
    TitlesFile {
        path: String,
        source: std::io::Error,
    },
}

/// Importer settings
#[derive(Debug, Clone)]
pub struct ImportSettings {
    /// Name of the user that receives the imported movies
    pub user_name: String,
    /// File with one title per line; the built-in list when unset
    pub titles_file: Option<PathBuf>,
}

impl ImportSettings {
    /// Create a new ImportSettings from environment variables
    ///
    /// # Environment Variables
    /// - `IMPORT_USER_NAME`: Owning user (default: "Best 100 Movies")
    /// - `IMPORT_TITLES_FILE`: Path to a title list (default: built-in list)
    pub fn from_env() -> Self {
        let user_name = env::var("IMPORT_USER_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());

        let titles_file = env::var("IMPORT_TITLES_FILE").ok().map(PathBuf::from);

        Self {
            user_name,
            titles_file,
        }
    }

    /// Load the titles to import
    pub fn titles(&self) -> Result<Vec<String>, SettingsError> {
        match &self.titles_file {
            Some(path) => {
                let content =
                    fs::read_to_string(path).map_err(|source| SettingsError::TitlesFile {
                        path: path.display().to_string(),
                        source,
                    })?;
                Ok(parse_titles(&content))
            }
            None => Ok(parse_titles(BUILTIN_TITLES)),
        }
    }
}

/// One title per line; blank lines and `#` comments are ignored
pub fn parse_titles(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
