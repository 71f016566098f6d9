//! Theme module - template resolution and static assets

mod assets;
mod resolver;

pub use assets::ThemeAssets;
pub use resolver::{
    TemplateKind, TemplateSet, ThemeResolver, PARTIAL_PREFIX, TEMPLATE_EXT, THEME_DIR,
};
