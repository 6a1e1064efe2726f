//! Translate command handler

use std::path::{Path, PathBuf};

use er_modeler::config::Config;
use er_modeler::core::persist::{DiagramStorage, LoadError};
use er_modeler::core::report::{reporter_for, ReportContext, ReportFormat};
use er_modeler::core::schema::translate;
use er_modeler::core::store::DiagramStore;
use er_modeler::error;

/// Run the translate command
///
/// Renders the schema projection of the slot in the requested format. With
/// `--output` the report is written to that file; otherwise text prints to
/// stdout and Markdown is written to the configured export directory.
pub fn run(format: &str, output: Option<&Path>, storage: &DiagramStorage, slot: &str, config: &Config) {
    if let Err(message) = run_translate(format, output, storage, slot, config) {
        error!("{message}");
        eprintln!("{message}");
    }
}

fn run_translate(
    format: &str,
    output: Option<&Path>,
    storage: &DiagramStorage,
    slot: &str,
    config: &Config,
) -> Result<(), String> {
    let format: ReportFormat = format
        .parse()
        .map_err(|err| format!("✗ {err}"))?;

    let store = match storage.load(slot) {
        Ok(store) => store,
        Err(LoadError::NotFound(_)) => DiagramStore::new(),
        Err(err) => return Err(format!("✗ Failed to load diagram \"{slot}\": {err}")),
    };

    let report = translate(&store);
    let ctx = ReportContext::new(slot, &store, &report);
    let reporter = reporter_for(format);

    match (output, format) {
        (Some(path), _) => {
            reporter
                .generate(&ctx, path)
                .map_err(|err| format!("✗ Failed to write report: {err}"))?;
            println!("✓ Report written: {}", path.display());
        }
        (None, ReportFormat::Text) => {
            let rendered = reporter
                .render(&ctx)
                .map_err(|err| format!("✗ Failed to render report: {err}"))?;
            print!("{rendered}");
        }
        (None, ReportFormat::Markdown) => {
            // Mirror of the saved-report flow: default the file into the
            // configured export directory, named after the slot.
            let export_dir = if config.paths.export_dir.is_empty() {
                PathBuf::from(".")
            } else {
                PathBuf::from(&config.paths.export_dir)
            };
            std::fs::create_dir_all(&export_dir)
                .map_err(|err| format!("✗ Failed to create export directory: {err}"))?;
            let path = export_dir.join(format!("{slot}.{}", format.extension()));
            reporter
                .generate(&ctx, &path)
                .map_err(|err| format!("✗ Failed to write report: {err}"))?;
            println!("✓ Report written: {}", path.display());
        }
    }

    Ok(())
}
