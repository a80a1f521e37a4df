//! Import CLI command

use std::io::Write;

use crate::codec::{EntityKind, ImportMode, ImportOptions, ImportService};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::ledger::Ledger;

use super::export::resolve_target;

/// Import one entity list from a file
pub fn handle_import_command<W: Write>(
    ledger: &Ledger,
    settings: &Settings,
    kind: EntityKind,
    target: &[String],
    replay: bool,
    out: &mut W,
) -> LedgerResult<()> {
    let (format, path) = resolve_target(settings, target)?;
    let options = ImportOptions {
        mode: if replay {
            ImportMode::Replay
        } else {
            ImportMode::Settled
        },
        operation_layout: settings.csv_operation_layout,
    };

    let path = settings.resolve_path(path);
    let report = ImportService::new(ledger).import_file(kind, format, &path, options)?;

    writeln!(
        out,
        "Imported {} {} from {} ({} already present, {} skipped)",
        report.imported,
        kind,
        path.display(),
        report.conflicts,
        report.skipped.len()
    )?;
    for skipped in &report.skipped {
        writeln!(out, "  skipped {}", skipped)?;
    }
    Ok(())
}
