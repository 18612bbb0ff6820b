use std::path::Path;

use tokio::fs;

use crate::{error::Result, html::render_document, presenter::ResultPresenter};

/// Write the rendered page for the presenter's current state
pub async fn save_document(presenter: &ResultPresenter, path: &Path) -> Result<()> {
    fs::write(path, render_document(presenter)).await?;
    Ok(())
}
