//! Local bundle builder.
//!
//! Copies every markdown file of a directory into an output directory under a
//! content-hashed name and writes the `manifest.json` the web app lists from
//! when configured with a local source.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mdshelf_core::source::{BUNDLE_MANIFEST, BundleFile};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Number of hex digits of the content hash kept in file names.
pub const HASH_LEN: usize = 20;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("input directory {0} does not exist")]
    MissingInput(PathBuf),
    #[error("{0}: file name is not valid UTF-8")]
    InvalidName(PathBuf),
    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> BundleError + '_ {
    move |source| BundleError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Bundle build options.
#[derive(Clone, Debug)]
pub struct BundleOptions {
    /// Directory scanned (non-recursively) for `*.md`
    pub input: PathBuf,
    /// Directory receiving the hashed copies and the manifest
    pub output: PathBuf,
    /// Path prefix written into manifest entries (relative to the served base)
    pub prefix: String,
    /// Compute the manifest without touching the output directory
    pub dry_run: bool,
}

/// First [`HASH_LEN`] hex digits of the SHA-256 of `content`.
pub fn content_hash(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let mut hash = hex::encode(digest);
    hash.truncate(HASH_LEN);
    hash
}

/// `notes.md` + hash -> `notes.<hash>.md`.
pub fn hashed_file_name(file_name: &str, hash: &str) -> String {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    format!("{}.{}.md", stem, hash)
}

/// Markdown files directly inside `dir`, sorted by file name.
pub fn scan_markdown(dir: &Path) -> Result<Vec<PathBuf>, BundleError> {
    if !dir.is_dir() {
        return Err(BundleError::MissingInput(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let entry = entry.map_err(io_err(dir))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Build the bundle and return its manifest entries.
pub fn build_bundle(options: &BundleOptions) -> Result<Vec<BundleFile>, BundleError> {
    let sources = scan_markdown(&options.input)?;
    if !options.dry_run {
        fs::create_dir_all(&options.output).map_err(io_err(&options.output))?;
    }

    let prefix = options.prefix.trim_matches('/');
    let mut manifest = Vec::with_capacity(sources.len());

    for source in sources {
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| BundleError::InvalidName(source.clone()))?
            .to_string();
        let content = fs::read(&source).map_err(io_err(&source))?;
        let hashed = hashed_file_name(&file_name, &content_hash(&content));

        if !options.dry_run {
            let target = options.output.join(&hashed);
            fs::write(&target, &content).map_err(io_err(&target))?;
        }
        log::info!("{} -> {}", file_name, hashed);

        let path = if prefix.is_empty() {
            hashed
        } else {
            format!("{}/{}", prefix, hashed)
        };
        manifest.push(BundleFile {
            name: format!("./{}", file_name),
            path,
        });
    }

    Ok(manifest)
}

/// Serialize the manifest as pretty JSON.
pub fn manifest_json(manifest: &[BundleFile]) -> Result<String, BundleError> {
    Ok(serde_json::to_string_pretty(manifest)?)
}

/// Write `manifest.json` into the output directory and return its path.
pub fn write_manifest(output: &Path, manifest: &[BundleFile]) -> Result<PathBuf, BundleError> {
    let path = output.join(BUNDLE_MANIFEST);
    let json = manifest_json(manifest)?;
    fs::write(&path, json).map_err(io_err(&path))?;
    Ok(path)
}
