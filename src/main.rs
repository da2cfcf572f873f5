use anyhow::Result;
use clap::{Parser, Subcommand};

use ledgerbook::cli::{
    handle_add_command, handle_convert_command, handle_files_command, handle_list_command,
    handle_remote_command, handle_report_command, CliContext, RemoteCommands, ReportCommands,
};
use ledgerbook::config::{LedgerPaths, Settings};
use ledgerbook::logging::init_tracing;
use ledgerbook::storage::FileFormat;

#[derive(Parser)]
#[command(
    name = "ledgerbook",
    version,
    about = "Personal income and expense ledger",
    long_about = "ledgerbook records income and expenses with a running balance, \
                  keeps one CSV or XLSX file per year and prints monthly and \
                  yearly reports."
)]
struct Cli {
    /// Year file to work on (defaults to the current year)
    #[arg(short, long, global = true)]
    year: Option<i32>,

    /// File format (defaults to the configured format)
    #[arg(short, long, global = true, value_enum)]
    format: Option<FileFormat>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a transaction (negative amounts are expenses)
    Add {
        /// Amount (e.g., "1000" or "-200.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category label
        category: String,
        /// Free-form description
        description: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Save both the CSV and the XLSX year file
        #[arg(long)]
        both: bool,
    },

    /// List the year's transactions
    List {
        /// Show only the last N transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Monthly and yearly reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// List the years that have a ledger file
    Files,

    /// Write the year's ledger in the other format
    Convert,

    /// Push and pull through the remote folder
    #[command(subcommand)]
    Remote(RemoteCommands),

    /// Show or change configuration
    Config {
        /// Set the default file format
        #[arg(long, value_enum)]
        default_format: Option<FileFormat>,
        /// Set the currency symbol
        #[arg(long)]
        currency: Option<String>,
        /// Set the remote folder root
        #[arg(long)]
        remote_folder: Option<std::path::PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Config {
            default_format,
            currency,
            remote_folder,
        }) => {
            let changed =
                default_format.is_some() || currency.is_some() || remote_folder.is_some();
            if let Some(format) = default_format {
                settings.default_format = format;
            }
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
            }
            if let Some(folder) = remote_folder {
                settings.remote_folder = Some(folder);
            }
            if changed {
                settings.save(&paths)?;
                println!("Settings saved to {}", paths.settings_file().display());
                println!();
            }

            println!("ledgerbook Configuration");
            println!("========================");
            println!("Ledger directory: {}", paths.ledger_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Remote folder:    {}", settings.remote_root(&paths).display());
            println!();
            println!("Settings:");
            println!("  Default format:  {}", settings.default_format);
            println!("  Currency symbol: {}", settings.currency_symbol);
        }
        Some(command) => {
            let ctx = CliContext::new(paths, settings, cli.year, cli.format);
            run(&ctx, command)?;
        }
        None => {
            println!("ledgerbook - Personal income and expense ledger");
            println!();
            println!("Run 'ledgerbook --help' for usage information.");
        }
    }

    Ok(())
}

fn run(ctx: &CliContext, command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            amount,
            category,
            description,
            date,
            both,
        } => handle_add_command(
            ctx,
            &amount,
            &category,
            description.as_deref(),
            date.as_deref(),
            both,
        )?,
        Commands::List { limit } => handle_list_command(ctx, limit)?,
        Commands::Report(cmd) => handle_report_command(ctx, cmd)?,
        Commands::Files => handle_files_command(ctx)?,
        Commands::Convert => handle_convert_command(ctx)?,
        Commands::Remote(cmd) => handle_remote_command(ctx, cmd)?,
        Commands::Config { .. } => {}
    }
    Ok(())
}
