//! Chart rendering to temporary PNG files.
//!
//! Each chart gets its own bitmap backend, created and dropped inside a single
//! draw call. The resulting images live in scratch files owned by
//! `ChartArtifact`; dropping an artifact deletes its file, so every exit path
//! (embedded, failed to embed, failed later) cleans up.

use std::error::Error;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempPath;
use tracing::{debug, info};

use crate::domain::CategoryTotals;
use crate::error::AppError;

pub mod fonts;
pub mod line;
pub mod pie;

pub use line::{LINE_SIZE, LINE_TITLE};
pub use pie::{PIE_SIZE, PIE_TITLE};

/// A rendered chart image on disk.
#[derive(Debug)]
pub struct ChartArtifact {
    title: String,
    size: (u32, u32),
    path: TempPath,
}

impl ChartArtifact {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pixel dimensions of the image.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Delete the image now, reporting any failure.
    pub fn close(self) -> io::Result<()> {
        self.path.close()
    }
}

/// Render the pie and line charts, in that order, into `scratch_dir`.
///
/// If the second chart fails, the first is deleted before the error is
/// returned.
pub fn render_charts(
    category_totals: &CategoryTotals,
    daily_totals: &[(NaiveDate, f64)],
    scratch_dir: &Path,
) -> Result<Vec<ChartArtifact>, AppError> {
    let with_text = fonts::text_available();
    let mut artifacts = Vec::with_capacity(2);

    artifacts.push(render_into(scratch_dir, PIE_TITLE, PIE_SIZE, |path| {
        pie::draw_pie(path, category_totals, with_text)
    })?);
    artifacts.push(render_into(scratch_dir, LINE_TITLE, LINE_SIZE, |path| {
        line::draw_line(path, daily_totals, with_text)
    })?);

    info!(count = artifacts.len(), with_text, "rendered charts");
    Ok(artifacts)
}

fn render_into<F>(scratch_dir: &Path, title: &str, size: (u32, u32), draw: F) -> Result<ChartArtifact, AppError>
where
    F: FnOnce(&Path) -> Result<(), Box<dyn Error>>,
{
    let path = tempfile::Builder::new()
        .prefix("sales-chart-")
        .suffix(".png")
        .tempfile_in(scratch_dir)
        .map_err(|e| {
            AppError::chart(format!(
                "failed to create temporary image in '{}': {e}",
                scratch_dir.display()
            ))
        })?
        .into_temp_path();

    // On error `path` is dropped here, which removes the scratch file.
    draw(&path).map_err(|e| AppError::chart(format!("{title}: {e}")))?;
    debug!(chart = title, path = %path.display(), "chart written");

    Ok(ChartArtifact {
        title: title.to_string(),
        size,
        path,
    })
}
