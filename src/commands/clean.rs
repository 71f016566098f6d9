//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Spook;

/// Remove the output directory and everything in it
pub fn run(spook: &Spook) -> Result<()> {
    if spook.output_dir.exists() {
        fs::remove_dir_all(&spook.output_dir)?;
        tracing::info!("Deleted: {:?}", spook.output_dir);
    }

    Ok(())
}
