//! Directory-backed remote
//!
//! Uploads are copied into a root directory under a generated id of the
//! form `<name>__<timestamp>.<ext>`, so the display name can be recovered
//! from the id. Subdirectories of the root act as folders.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};

use super::gateway::{RemoteFile, RemoteGateway, RemoteUpload};

const NAME_SEPARATOR: &str = "__";

/// A [`RemoteGateway`] that stores files in a local directory
#[derive(Debug, Clone)]
pub struct FolderGateway {
    root: PathBuf,
}

impl FolderGateway {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a remote id to a path under the root
    fn resolve(&self, remote_id: &str) -> LedgerResult<PathBuf> {
        let valid = !remote_id.is_empty()
            && remote_id != "."
            && remote_id != ".."
            && !remote_id.contains(['/', '\\']);
        if !valid {
            return Err(LedgerError::RemoteUnavailable(format!(
                "invalid remote id '{}'",
                remote_id
            )));
        }

        let path = self.root.join(remote_id);
        if !path.is_file() {
            return Err(LedgerError::RemoteUnavailable(format!(
                "no remote file '{}'",
                remote_id
            )));
        }
        Ok(path)
    }

    /// A fresh id for `name`, not yet used in the root
    fn generate_id(&self, name: &str, extension: &str) -> String {
        let stem = format!(
            "{}{}{}",
            sanitize(name),
            NAME_SEPARATOR,
            Utc::now().format("%Y%m%d-%H%M%S-%3f")
        );

        let mut id = with_extension(&stem, extension);
        let mut attempt = 2;
        while self.root.join(&id).exists() {
            id = with_extension(&format!("{}-{}", stem, attempt), extension);
            attempt += 1;
        }
        id
    }
}

impl RemoteGateway for FolderGateway {
    fn upload(&mut self, local_path: &Path, name: &str) -> LedgerResult<RemoteUpload> {
        if !local_path.is_file() {
            return Err(LedgerError::file_not_found(local_path));
        }

        fs::create_dir_all(&self.root).map_err(|e| {
            LedgerError::RemoteUnavailable(format!(
                "cannot create {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let extension = local_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let id = self.generate_id(name, extension);
        let target = self.root.join(&id);

        fs::copy(local_path, &target)
            .map_err(|e| LedgerError::RemoteUnavailable(format!("upload failed: {}", e)))?;

        info!(id = %id, source = %local_path.display(), "Uploaded ledger file");
        Ok(RemoteUpload {
            name: name.to_string(),
            link: file_link(&target),
            id,
        })
    }

    fn download(&mut self, remote_id: &str) -> LedgerResult<Vec<u8>> {
        let path = self.resolve(remote_id)?;
        let bytes = fs::read(&path)
            .map_err(|e| LedgerError::RemoteUnavailable(format!("download failed: {}", e)))?;

        info!(id = remote_id, bytes = bytes.len(), "Downloaded ledger file");
        Ok(bytes)
    }

    fn list(&mut self, folder: Option<&str>) -> LedgerResult<Vec<RemoteFile>> {
        let dir = match folder {
            Some(folder) => self.root.join(folder),
            None => self.root.clone(),
        };
        if !dir.exists() {
            debug!(dir = %dir.display(), "Remote folder does not exist yet");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir)
            .map_err(|e| LedgerError::RemoteUnavailable(format!("list failed: {}", e)))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| LedgerError::RemoteUnavailable(format!("list failed: {}", e)))?;
            let path = entry.path();
            if path.is_file() {
                if let Some(file) = describe(&path) {
                    files.push(file);
                }
            }
        }

        // Newest first
        files.sort_by(|a, b| {
            b.modified_time
                .cmp(&a.modified_time)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(files)
    }

    fn delete(&mut self, remote_id: &str) -> LedgerResult<()> {
        let path = self.resolve(remote_id)?;
        fs::remove_file(&path)
            .map_err(|e| LedgerError::RemoteUnavailable(format!("delete failed: {}", e)))?;

        info!(id = remote_id, "Deleted remote file");
        Ok(())
    }
}

fn describe(path: &Path) -> Option<RemoteFile> {
    let id = path.file_name()?.to_str()?.to_string();
    let metadata = fs::metadata(path).ok()?;

    Some(RemoteFile {
        name: display_name(&id),
        mime_type: mime_type(path).to_string(),
        created_time: metadata.created().ok().map(DateTime::<Utc>::from),
        modified_time: metadata.modified().ok().map(DateTime::<Utc>::from),
        link: file_link(path),
        id,
    })
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn with_extension(stem: &str, extension: &str) -> String {
    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, extension)
    }
}

/// Display name encoded in an id; ids from elsewhere are their own name
fn display_name(id: &str) -> String {
    match id.rsplit_once(NAME_SEPARATOR) {
        Some((name, _)) if !name.is_empty() => name.to_string(),
        _ => id.to_string(),
    }
}

fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => "text/csv",
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        }
        _ => "application/octet-stream",
    }
}

fn file_link(path: &Path) -> String {
    let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}
