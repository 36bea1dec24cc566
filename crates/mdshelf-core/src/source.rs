//! File sources: where the markdown listing comes from.
//!
//! A [`FileSource`] knows the URL of its directory listing and how to turn the
//! listing payload into [`FileEntry`] values. Fetching is left to the caller,
//! so the search engine and loader never need to know which variant is active.

use serde::{Deserialize, Serialize};

use crate::entry::{FileEntry, is_markdown};
use crate::error::ListingError;

/// Default GitHub REST API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Default manifest file name for a local bundle.
pub const BUNDLE_MANIFEST: &str = "manifest.json";

/// Storage backend for the markdown listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileSource {
    /// Files bundled with the app, indexed by a manifest written by
    /// `mdshelf-bundle`.
    Local {
        /// Base URL the manifest and files are served from (e.g. `files`)
        base_url: String,
        /// Manifest file name, relative to `base_url`
        #[serde(default = "default_manifest")]
        manifest: String,
    },

    /// A directory of a GitHub repository, listed through the contents API.
    #[serde(rename = "github")]
    GitHub {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Directory inside the repository (empty for the root)
        #[serde(default)]
        dir: String,
        /// API base URL
        #[serde(default = "default_api_base")]
        api_base: String,
    },
}

fn default_manifest() -> String {
    BUNDLE_MANIFEST.to_string()
}

fn default_api_base() -> String {
    GITHUB_API_BASE.to_string()
}

impl FileSource {
    /// Create a local bundle source with the default manifest name.
    pub fn local(base_url: impl Into<String>) -> Self {
        Self::Local {
            base_url: base_url.into(),
            manifest: default_manifest(),
        }
    }

    /// Create a GitHub source against the public API.
    pub fn github(
        owner: impl Into<String>,
        repo: impl Into<String>,
        dir: impl Into<String>,
    ) -> Self {
        Self::GitHub {
            owner: owner.into(),
            repo: repo.into(),
            dir: dir.into(),
            api_base: default_api_base(),
        }
    }

    /// Short human-readable label for the header.
    pub fn label(&self) -> String {
        match self {
            Self::Local { base_url, .. } => base_url.trim_end_matches('/').to_string(),
            Self::GitHub {
                owner, repo, dir, ..
            } => {
                let dir = dir.trim_matches('/');
                if dir.is_empty() {
                    format!("{}/{}", owner, repo)
                } else {
                    format!("{}/{}/{}", owner, repo, dir)
                }
            }
        }
    }

    /// URL of the directory listing.
    pub fn listing_url(&self) -> String {
        match self {
            Self::Local { base_url, manifest } => join_url(base_url, manifest),
            Self::GitHub {
                owner,
                repo,
                dir,
                api_base,
            } => {
                let base = format!(
                    "{}/repos/{}/{}/contents",
                    api_base.trim_end_matches('/'),
                    owner,
                    repo
                );
                join_url(&base, dir)
            }
        }
    }

    /// Parse a listing payload into entries.
    ///
    /// Only `.md` entries are kept. Order is the payload's order; callers sort
    /// through [`crate::search::apply`].
    pub fn parse_listing(&self, body: &str) -> Result<Vec<FileEntry>, ListingError> {
        match self {
            Self::Local { base_url, .. } => parse_manifest(base_url, body),
            Self::GitHub { .. } => parse_github_contents(body),
        }
    }
}

// =============================================================================
// Local bundle manifest
// =============================================================================

/// One file in a local bundle manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleFile {
    /// Original file identifier (e.g. `./2024-notes.md`)
    pub name: String,
    /// Path of the served copy, relative to the bundle base URL
    pub path: String,
}

fn parse_manifest(base_url: &str, body: &str) -> Result<Vec<FileEntry>, ListingError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ListingError::Json(e.to_string()))?;
    if !value.is_array() {
        return Err(ListingError::NotAList);
    }
    let files: Vec<BundleFile> =
        serde_json::from_value(value).map_err(|e| ListingError::Json(e.to_string()))?;

    Ok(files
        .into_iter()
        .filter(|f| is_markdown(&f.name))
        .map(|f| {
            let locator = join_url(base_url, &f.path);
            FileEntry::new(f.name, locator)
        })
        .collect())
}

// =============================================================================
// GitHub contents API
// =============================================================================

/// One item of a GitHub contents listing (fields we use).
#[derive(Clone, Debug, Deserialize)]
struct ContentItem {
    name: String,
    /// `null` for directories and submodules
    download_url: Option<String>,
}

/// GitHub error object (`{"message": "Not Found", ...}`).
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsPayload {
    Items(Vec<ContentItem>),
    Error(ApiMessage),
}

fn parse_github_contents(body: &str) -> Result<Vec<FileEntry>, ListingError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ListingError::Json(e.to_string()))?;

    match serde_json::from_value::<ContentsPayload>(value) {
        Ok(ContentsPayload::Items(items)) => Ok(items
            .into_iter()
            .filter(|item| is_markdown(&item.name))
            .filter_map(|item| {
                let url = item.download_url?;
                Some(FileEntry::new(item.name, url))
            })
            .collect()),
        Ok(ContentsPayload::Error(err)) => Err(ListingError::Api(err.message)),
        Err(_) => Err(ListingError::NotAList),
    }
}

/// Join a base URL and a relative path with exactly one slash.
fn join_url(base: &str, path: &str) -> String {
    let path = path.trim_start_matches("./").trim_matches('/');
    let base = base.trim_end_matches('/');
    match (base.is_empty(), path.is_empty()) {
        (_, true) => base.to_string(),
        (true, false) => path.to_string(),
        (false, false) => format!("{}/{}", base, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_listing_url() {
        let source = FileSource::github("octo", "notes", "posts");
        assert_eq!(
            source.listing_url(),
            "https://api.github.com/repos/octo/notes/contents/posts"
        );
    }

    #[test]
    fn test_github_listing_url_root_dir() {
        let source = FileSource::github("octo", "notes", "");
        assert_eq!(
            source.listing_url(),
            "https://api.github.com/repos/octo/notes/contents"
        );
    }

    #[test]
    fn test_github_listing_url_custom_api_base() {
        let source = FileSource::GitHub {
            owner: "octo".to_string(),
            repo: "notes".to_string(),
            dir: "/posts/".to_string(),
            api_base: "http://localhost:8080/".to_string(),
        };
        assert_eq!(
            source.listing_url(),
            "http://localhost:8080/repos/octo/notes/contents/posts"
        );
    }

    #[test]
    fn test_local_listing_url() {
        assert_eq!(FileSource::local("files").listing_url(), "files/manifest.json");
        assert_eq!(
            FileSource::local("https://cdn.example.com/files/").listing_url(),
            "https://cdn.example.com/files/manifest.json"
        );
    }

    #[test]
    fn test_label() {
        assert_eq!(FileSource::github("octo", "notes", "posts").label(), "octo/notes/posts");
        assert_eq!(FileSource::github("octo", "notes", "").label(), "octo/notes");
        assert_eq!(FileSource::local("files/").label(), "files");
    }

    #[test]
    fn test_parse_github_contents() {
        let body = r#"[
            {"name": "2023-alpha.md", "type": "file", "download_url": "https://raw.example.com/2023-alpha.md"},
            {"name": "image.png", "type": "file", "download_url": "https://raw.example.com/image.png"},
            {"name": "drafts.md", "type": "dir", "download_url": null},
            {"name": "2024-beta.md", "type": "file", "download_url": "https://raw.example.com/2024-beta.md"}
        ]"#;
        let entries = FileSource::github("o", "r", "d").parse_listing(body).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "2023-alpha");
        assert_eq!(entries[0].full_name, "2023-alpha.md");
        assert_eq!(entries[0].locator, "https://raw.example.com/2023-alpha.md");
        assert_eq!(entries[1].name, "2024-beta");
    }

    #[test]
    fn test_parse_github_error_object() {
        let body = r#"{"message": "Not Found", "documentation_url": "https://docs.github.com"}"#;
        let err = FileSource::github("o", "r", "d").parse_listing(body).unwrap_err();
        assert_eq!(err, ListingError::Api("Not Found".to_string()));
    }

    #[test]
    fn test_parse_github_non_list() {
        let err = FileSource::github("o", "r", "d").parse_listing("42").unwrap_err();
        assert_eq!(err, ListingError::NotAList);
    }

    #[test]
    fn test_parse_github_invalid_json() {
        let err = FileSource::github("o", "r", "d")
            .parse_listing("<html>rate limited</html>")
            .unwrap_err();
        assert!(matches!(err, ListingError::Json(_)));
    }

    #[test]
    fn test_parse_manifest() {
        let body = r#"[
            {"name": "./2023-alpha.md", "path": "2023-alpha.0123456789abcdef0123.md"},
            {"name": "./notes.txt", "path": "notes.txt"}
        ]"#;
        let entries = FileSource::local("files").parse_listing(body).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "2023-alpha");
        assert_eq!(entries[0].full_name, "./2023-alpha.md");
        assert_eq!(
            entries[0].locator,
            "files/2023-alpha.0123456789abcdef0123.md"
        );
    }

    #[test]
    fn test_parse_manifest_non_list() {
        let err = FileSource::local("files")
            .parse_listing(r#"{"files": []}"#)
            .unwrap_err();
        assert_eq!(err, ListingError::NotAList);
    }

    #[test]
    fn test_source_from_toml() {
        let source: FileSource = toml::from_str(
            r#"
            kind = "github"
            owner = "octo"
            repo = "notes"
            "#,
        )
        .unwrap();
        assert_eq!(source, FileSource::github("octo", "notes", ""));

        let local: FileSource = toml::from_str(
            r#"
            kind = "local"
            base_url = "files"
            "#,
        )
        .unwrap();
        assert_eq!(local, FileSource::local("files"));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("a/", "/b"), "a/b");
        assert_eq!(join_url("a", "./b.md"), "a/b.md");
        assert_eq!(join_url("", "b.md"), "b.md");
        assert_eq!(join_url("a", ""), "a");
    }
}
