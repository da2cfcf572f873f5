//! Remote sync for ledger files
//!
//! The local CSV file is the exchange format: a push saves the year's CSV
//! and uploads that file, a pull downloads CSV bytes and replaces the
//! ledger's contents with them.

pub mod folder;
pub mod gateway;

pub use folder::FolderGateway;
pub use gateway::{RemoteFile, RemoteGateway, RemoteUpload};

use tracing::info;

use crate::error::LedgerResult;
use crate::models::Ledger;
use crate::storage::{current_year, decode_csv, FileFormat, LedgerStore};

/// Display name used for a year's upload
pub fn upload_name(year: i32) -> String {
    format!("MyTransactions_{}", year)
}

/// Save the year's CSV file and upload it
pub fn push_year<G: RemoteGateway + ?Sized>(
    store: &LedgerStore,
    ledger: &Ledger,
    year: Option<i32>,
    gateway: &mut G,
) -> LedgerResult<RemoteUpload> {
    let year = year.unwrap_or_else(current_year);
    let path = store.save(ledger, Some(year), FileFormat::Csv)?;
    let upload = gateway.upload(&path, &upload_name(year))?;

    info!(year, id = %upload.id, "Pushed ledger");
    Ok(upload)
}

/// Download a remote CSV file into the ledger
///
/// The ledger's contents are replaced only when the download decodes.
/// Returns the number of transactions now held.
pub fn pull<G: RemoteGateway + ?Sized>(
    gateway: &mut G,
    remote_id: &str,
    ledger: &mut Ledger,
) -> LedgerResult<usize> {
    let bytes = gateway.download(remote_id)?;
    let transactions = decode_csv(&bytes, remote_id)?;

    ledger.replace_all(transactions);
    info!(id = remote_id, count = ledger.len(), "Pulled ledger");
    Ok(ledger.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::models::{Money, TransactionId};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::TempDir;

    /// In-memory gateway that can be switched offline
    #[derive(Default)]
    struct MockGateway {
        files: HashMap<String, (String, Vec<u8>)>,
        offline: bool,
    }

    impl MockGateway {
        fn check_online(&self) -> LedgerResult<()> {
            if self.offline {
                Err(LedgerError::RemoteUnavailable("offline".into()))
            } else {
                Ok(())
            }
        }
    }

    impl RemoteGateway for MockGateway {
        fn upload(&mut self, local_path: &Path, name: &str) -> LedgerResult<RemoteUpload> {
            self.check_online()?;
            let id = format!("id-{}", self.files.len() + 1);
            let bytes = std::fs::read(local_path)?;
            self.files.insert(id.clone(), (name.to_string(), bytes));
            Ok(RemoteUpload {
                link: format!("mock://{}", id),
                id,
                name: name.to_string(),
            })
        }

        fn download(&mut self, remote_id: &str) -> LedgerResult<Vec<u8>> {
            self.check_online()?;
            self.files
                .get(remote_id)
                .map(|(_, bytes)| bytes.clone())
                .ok_or_else(|| LedgerError::RemoteUnavailable(format!("no file {}", remote_id)))
        }

        fn list(&mut self, _folder: Option<&str>) -> LedgerResult<Vec<RemoteFile>> {
            self.check_online()?;
            Ok(self
                .files
                .iter()
                .map(|(id, (name, _))| RemoteFile {
                    id: id.clone(),
                    name: name.clone(),
                    mime_type: "text/csv".into(),
                    created_time: None,
                    modified_time: None,
                    link: format!("mock://{}", id),
                })
                .collect())
        }

        fn delete(&mut self, remote_id: &str) -> LedgerResult<()> {
            self.check_online()?;
            self.files.remove(remote_id);
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.record(date(2024, 1, 5), Money::from_units(1000), "Salary", "Jan pay").unwrap();
        ledger.record(date(2024, 1, 10), Money::from_units(-200), "Food", "groceries").unwrap();
        ledger
    }

    #[test]
    fn test_push_then_pull() {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path());
        let mut gateway = MockGateway::default();

        let upload = push_year(&store, &sample_ledger(), Some(2024), &mut gateway).unwrap();
        assert_eq!(upload.name, "MyTransactions_2024");
        assert!(temp_dir.path().join("2024_transactions.csv").exists());

        let mut ledger = Ledger::new();
        let count = pull(&mut gateway, &upload.id, &mut ledger).unwrap();
        assert_eq!(count, 2);
        assert_eq!(ledger.snapshot(), sample_ledger().snapshot());
        assert_eq!(ledger.next_id(), TransactionId::new(3));
        assert_eq!(ledger.current_balance(), Money::from_units(800));
    }

    #[test]
    fn test_offline_gateway_reports_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path());
        let mut gateway = MockGateway {
            offline: true,
            ..Default::default()
        };

        let err = push_year(&store, &sample_ledger(), Some(2024), &mut gateway).unwrap_err();
        assert!(matches!(err, LedgerError::RemoteUnavailable(_)));
    }

    #[test]
    fn test_failed_pull_leaves_ledger_alone() {
        let mut gateway = MockGateway::default();
        gateway
            .files
            .insert("bad".into(), ("bad".into(), b"not,a,ledger\n1,2,3\n".to_vec()));
        let mut ledger = sample_ledger();

        let err = pull(&mut gateway, "bad", &mut ledger).unwrap_err();
        assert!(matches!(err, LedgerError::CorruptFile { .. }));
        assert_eq!(ledger.len(), 2);

        let err = pull(&mut gateway, "missing", &mut ledger).unwrap_err();
        assert!(matches!(err, LedgerError::RemoteUnavailable(_)));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_pull_through_folder_gateway() {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path());
        let mut gateway = FolderGateway::new(temp_dir.path().join("remote"));

        let upload = push_year(&store, &sample_ledger(), Some(2024), &mut gateway).unwrap();
        let listed = gateway.list(None).unwrap();
        assert_eq!(listed[0].name, upload_name(2024));

        let mut ledger = Ledger::new();
        pull(&mut gateway, &upload.id, &mut ledger).unwrap();
        assert_eq!(ledger.current_balance(), Money::from_units(800));
    }
}
