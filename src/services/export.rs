//! PDF export: project the scene on a blocking thread and write the file.
//!
//! DESIGN
//! ======
//! The engine hands out a scene snapshot via `begin_export`, which also
//! arms its export guard; a second export while one is running is refused.
//! Projection (image decode and PDF assembly) is CPU-bound and runs under
//! `spawn_blocking`. The guard is released through `finish_export` whether
//! the export succeeded or not.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::path::{Path, PathBuf};

use editor::align::HeuristicMeasure;
use editor::pdf::project;
use time::Date;
use tracing::info;

use crate::error::CliError;
use crate::services::assets::AssetResolver;
use crate::state::Session;

/// `<type>_cover_page_<YYYY-MM-DD>.pdf`, with the document type lowercased
/// and whitespace runs replaced by underscores.
#[must_use]
pub fn export_filename(doc_type: &str, date: Date) -> String {
    let slug = doc_type.split_whitespace().collect::<Vec<_>>().join("_").to_lowercase();
    format!(
        "{slug}_cover_page_{:04}-{:02}-{:02}.pdf",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Project the session's scene to PDF and write it.
///
/// The file lands at `output` when given, otherwise in the configured
/// output directory under [`export_filename`]. Returns the written path.
///
/// # Errors
///
/// Returns [`CliError::ExportPending`] if an export is already running, or
/// the projection or write failure.
pub async fn export_pdf(session: &mut Session, output: Option<PathBuf>, today: Date) -> Result<PathBuf, CliError> {
    let Some(scene) = session.engine.begin_export() else {
        return Err(CliError::ExportPending);
    };
    let path =
        output.unwrap_or_else(|| session.config.output_dir.join(export_filename(session.engine.form.document_type(), today)));
    let assets = session.config.assets_dir.clone();

    let result = write_pdf(scene, assets, &path).await;
    // The engine logs the failure and re-arms export either way.
    session.engine.finish_export(result.as_ref().map(|_| ()));
    let bytes = result?;
    info!(path = %path.display(), bytes, theme = %session.engine.theme, "cover page exported");
    Ok(path)
}

async fn write_pdf(scene: editor::doc::Scene, assets: PathBuf, path: &Path) -> Result<usize, CliError> {
    let bytes = tokio::task::spawn_blocking(move || project(&scene, &HeuristicMeasure, &AssetResolver::new(assets))).await??;
    tokio::fs::write(path, &bytes).await?;
    Ok(bytes.len())
}
