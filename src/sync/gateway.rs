//! Remote storage capability
//!
//! The ledger never talks to a remote service directly. Anything that can
//! upload a local file, hand back a file's bytes, list a folder and delete
//! by id can serve as the remote side. Authentication and session state
//! belong to the implementor.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUpload {
    pub id: String,
    pub name: String,
    pub link: String,
}

/// One entry of a remote folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub link: String,
}

/// Upload, download, list and delete of tabular ledger files
///
/// Implementations report authentication and transport failures as
/// `LedgerError::RemoteUnavailable`. Nothing here retries.
pub trait RemoteGateway {
    /// Upload a local file under the given display name
    fn upload(&mut self, local_path: &Path, name: &str) -> LedgerResult<RemoteUpload>;

    /// Fetch a remote file's content as CSV bytes
    fn download(&mut self, remote_id: &str) -> LedgerResult<Vec<u8>>;

    /// List the files in a folder (`None` for the top level)
    fn list(&mut self, folder: Option<&str>) -> LedgerResult<Vec<RemoteFile>>;

    /// Remove a remote file
    fn delete(&mut self, remote_id: &str) -> LedgerResult<()>;
}
