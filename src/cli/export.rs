//! Export CLI command

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use crate::codec::{export_entities, write_export, EntityKind, Format};
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

/// Split `[format] <path>` into a format and a path
///
/// Without an explicit format it is taken from the file extension, then from
/// the configured default.
pub(crate) fn resolve_target<'t>(
    settings: &Settings,
    target: &'t [String],
) -> LedgerResult<(Format, &'t str)> {
    match target {
        [format, path] => {
            let format = Format::from_str(format, true).map_err(|_| {
                LedgerError::Validation(format!("Unknown format '{}'. Use json or csv", format))
            })?;
            Ok((format, path.as_str()))
        }
        [path] => {
            let format = Path::new(path)
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| Format::from_str(ext, true).ok())
                .unwrap_or(settings.default_format);
            Ok((format, path.as_str()))
        }
        _ => Err(LedgerError::Validation(
            "Expected [format] <path>".into(),
        )),
    }
}

/// Export one entity list to a file
pub fn handle_export_command<W: Write>(
    ledger: &Ledger,
    settings: &Settings,
    kind: EntityKind,
    target: &[String],
    out: &mut W,
) -> LedgerResult<()> {
    let (format, path) = resolve_target(settings, target)?;
    let (text, count) = export_entities(ledger, kind, format)?;

    if count == 0 {
        writeln!(out, "Nothing to export: no {} recorded", kind)?;
        return Ok(());
    }

    let path = settings.resolve_path(path);
    write_export(&path, &text)?;
    writeln!(out, "Exported {} {} to {} ({})", count, kind, path.display(), format)?;
    Ok(())
}
