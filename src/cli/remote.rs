//! Remote CLI commands
//!
//! Push and pull year files through the folder-backed remote.

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::models::Ledger;
use crate::sync::{pull, push_year, FolderGateway, RemoteGateway};

use super::CliContext;

/// Remote subcommands
#[derive(Subcommand, Debug)]
pub enum RemoteCommands {
    /// Save the year's CSV file and upload it
    Push,

    /// Download a remote CSV file and make it the year's ledger
    Pull {
        /// Remote file id (see `remote list`)
        id: String,
    },

    /// List remote files, newest first
    List {
        /// Folder under the remote root
        #[arg(long)]
        folder: Option<String>,
    },

    /// Delete a remote file
    Delete {
        /// Remote file id
        id: String,
    },
}

/// Handle a remote command
pub fn handle_remote_command(ctx: &CliContext, cmd: RemoteCommands) -> LedgerResult<()> {
    let mut gateway = FolderGateway::new(ctx.settings.remote_root(&ctx.paths));

    match cmd {
        RemoteCommands::Push => {
            let year = ctx.year();
            let ledger = ctx.store.load_or_default(Some(year), ctx.format())?;
            let upload = push_year(&ctx.store, &ledger, Some(year), &mut gateway)?;

            println!("Uploaded {} as {}", upload.name, upload.id);
            println!("Link: {}", upload.link);
        }

        RemoteCommands::Pull { id } => {
            let year = ctx.year();
            let mut ledger = Ledger::new();
            let count = pull(&mut gateway, &id, &mut ledger)?;
            let path = ctx.store.save(&ledger, Some(year), ctx.format())?;

            println!("Pulled {} transaction(s) from {}", count, id);
            println!("Saved to {}", path.display());
        }

        RemoteCommands::List { folder } => {
            let files = gateway.list(folder.as_deref())?;

            if files.is_empty() {
                println!("No remote files found.");
                return Ok(());
            }

            println!("Remote Files");
            println!("============");
            for file in &files {
                let modified = file
                    .modified_time
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("  {}  {}  {}  {}", file.id, file.name, file.mime_type, modified);
            }
            println!();
            println!("Total: {} file(s)", files.len());
        }

        RemoteCommands::Delete { id } => {
            gateway.delete(&id)?;
            println!("Deleted {}", id);
        }
    }

    Ok(())
}
