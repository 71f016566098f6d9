//! Build the static site

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::{BuildStats, Generator};
use crate::Spook;

/// Load content and generate every document
pub fn run(spook: &Spook) -> Result<BuildStats> {
    let start = std::time::Instant::now();

    spook.config.validate()?;

    let loader = ContentLoader::new(&spook.base_dir);
    let pages = loader.load_pages()?;
    let posts = loader.load_posts()?;

    tracing::info!("Loaded {} posts and {} pages", posts.len(), pages.len());

    let stats = Generator::new(spook, pages, posts).generate()?;

    tracing::info!(
        "Generated {} list pages, {} pages, {} posts and {} assets in {:.2}s",
        stats.lists,
        stats.pages,
        stats.posts,
        stats.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(stats)
}
