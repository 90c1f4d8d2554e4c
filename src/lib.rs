//! Validated sidebar navigation configuration for documentation sites.
//!
//! The library loads an author-written YAML site document, checks the
//! sidebar tree for empty labels, empty groups, excessive nesting, unusable
//! and duplicate slugs, and assembles the result into an immutable
//! [`SiteConfig`] ready to hand to a static site generator.

mod assemble;
mod assets;
mod config;
mod error;
mod loader;
mod navigation;

pub use assemble::{Logo, PluginRef, SiteConfig, assemble};
pub use assets::{AssetResolver, FsAssetResolver};
pub use config::{SidebarEntry, SiteDocument};
pub use error::{ConfigError, io_error, output_error};
pub use loader::{
    LoadOptions, build_site, diagnose_site, document_root, load_site, parse_document, parse_site,
    read_document,
};
pub use navigation::{
    DEFAULT_MAX_DEPTH, NavNode, NavPath, NavTree, Occurrences, ValidationOptions, diagnose,
    normalize_slug, validate,
};
