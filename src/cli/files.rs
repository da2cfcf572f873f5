//! Year file CLI commands

use crate::display::format_year_files;
use crate::error::LedgerResult;

use super::CliContext;

/// List the years that have a ledger file in the current format
pub fn handle_files_command(ctx: &CliContext) -> LedgerResult<()> {
    let format = ctx.format();
    let files = ctx.store.list_year_files(format)?;

    if files.is_empty() {
        println!(
            "No {} ledger files in {}",
            format.extension().to_uppercase(),
            ctx.store.dir().display()
        );
        return Ok(());
    }

    println!("Ledger files ({}):", format);
    print!("{}", format_year_files(&files));
    Ok(())
}

/// Write a year's ledger in the other encoding
pub fn handle_convert_command(ctx: &CliContext) -> LedgerResult<()> {
    let year = ctx.year();
    let from = ctx.format();
    let to = from.other();

    let ledger = ctx.store.load(Some(year), from)?;
    let path = ctx.store.save(&ledger, Some(year), to)?;

    println!(
        "Converted {} transaction(s) from {} to {}: {}",
        ledger.len(),
        from,
        to,
        path.display()
    );
    Ok(())
}
