// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Loading pipeline from a YAML site document to a [`SiteConfig`].
//!
//! The pipeline parses the document, converts the raw sidebar into
//! [`NavNode`](crate::NavNode) values, validates the tree and finally
//! assembles the site. Every step fails fast; [`diagnose_site`] is the
//! exception and collects every problem it can find for reporting.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    assemble::{SiteConfig, assemble},
    assets::{AssetResolver, FsAssetResolver},
    config::SiteDocument,
    error::{self, ConfigError},
    navigation::{self, DEFAULT_MAX_DEPTH, NavTree, ValidationOptions},
};

/// Settings supplied by the caller that take precedence over the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct LoadOptions
{
    /// Overrides the document's `maxDepth`.
    pub max_depth: Option<usize,>,
}

impl SiteDocument
{
    /// Resolves validation options: caller override, then document value,
    /// then [`DEFAULT_MAX_DEPTH`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the resolved depth is zero.
    pub fn validation_options(
        &self,
        overrides: &LoadOptions,
    ) -> Result<ValidationOptions, ConfigError,>
    {
        let max_depth = overrides.max_depth.or(self.max_depth,).unwrap_or(DEFAULT_MAX_DEPTH,);
        if max_depth == 0 {
            return Err(ConfigError::validation("max depth must be at least 1",),);
        }
        Ok(ValidationOptions::with_max_depth(max_depth,),)
    }
}

/// Reads and parses a site document without validating it.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Parse`] when it is not a valid document.
pub fn read_document(path: &Path,) -> Result<SiteDocument, ConfigError,>
{
    debug!("Reading site document from {}", path.display());
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_document(&contents,)
}

/// Parses a site document from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the text is not a valid document.
pub fn parse_document(contents: &str,) -> Result<SiteDocument, ConfigError,>
{
    let document: SiteDocument = serde_yaml::from_str(contents,)?;
    Ok(document,)
}

/// Loads, validates and assembles the site document at `path`.
///
/// Asset paths are resolved relative to the document's directory.
///
/// # Errors
///
/// Propagates the first error from reading, parsing, conversion, validation
/// or assembly.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use sitenav::{LoadOptions, load_site};
///
/// let site = load_site(Path::new("docs/site.yaml",), &LoadOptions::default(),)?;
/// println!("{} pages", site.sidebar().leaf_count());
/// # Ok::<(), sitenav::ConfigError>(())
/// ```
pub fn load_site(path: &Path, options: &LoadOptions,) -> Result<SiteConfig, ConfigError,>
{
    let document = read_document(path,)?;
    let resolver = FsAssetResolver::new(document_root(path,),);
    build_site(document, &resolver, options,)
}

/// Parses, validates and assembles a site document from YAML text.
///
/// # Errors
///
/// Propagates the first error from parsing, conversion, validation or
/// assembly.
pub fn parse_site<R,>(
    contents: &str,
    resolver: &R,
    options: &LoadOptions,
) -> Result<SiteConfig, ConfigError,>
where
    R: AssetResolver + ?Sized,
{
    let document = parse_document(contents,)?;
    build_site(document, resolver, options,)
}

/// Runs every check on a parsed document and returns all problems found.
///
/// Sidebar problems come first in document order, followed by the first
/// assembly problem. An empty list means [`build_site`] would succeed.
///
/// # Errors
///
/// Returns an error when the document cannot be turned into a sidebar at
/// all: an invalid depth setting or a malformed entry.
pub fn diagnose_site<R,>(
    document: &SiteDocument,
    resolver: &R,
    options: &LoadOptions,
) -> Result<Vec<ConfigError,>, ConfigError,>
where
    R: AssetResolver + ?Sized,
{
    let validation = document.validation_options(options,)?;
    let nodes = document.navigation()?;

    let mut problems = navigation::diagnose(&nodes, &validation,)?;
    if let Err(problem,) = assemble(
        &document.title,
        document.logo.clone(),
        document.custom_css.clone(),
        document.plugins.clone(),
        NavTree::default(),
        resolver,
    ) {
        problems.push(problem,);
    }

    Ok(problems,)
}

/// Validates and assembles an already parsed document.
///
/// # Errors
///
/// Propagates the first conversion, validation or assembly error.
pub fn build_site<R,>(
    document: SiteDocument,
    resolver: &R,
    options: &LoadOptions,
) -> Result<SiteConfig, ConfigError,>
where
    R: AssetResolver + ?Sized,
{
    let validation = document.validation_options(options,)?;
    let nodes = document.navigation()?;
    let sidebar = navigation::validate(nodes, &validation,)?;

    let site = assemble(
        &document.title,
        document.logo,
        document.custom_css,
        document.plugins,
        sidebar,
        resolver,
    )?;
    info!("Loaded site '{}' ({} pages)", site.title(), site.sidebar().leaf_count());
    Ok(site,)
}

/// Directory assets of the document at `path` are resolved against.
pub fn document_root(path: &Path,) -> PathBuf
{
    match path.parent() {
        Some(parent,) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from(".",),
    }
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    const SENOR_SCRIPTS: &str = include_str!("../demos/site.yaml");

    fn all_assets(_: &Path,) -> bool
    {
        true
    }

    #[test]
    fn loads_reference_sidebar()
    {
        let site = parse_site(SENOR_SCRIPTS, &all_assets, &LoadOptions::default(),)
            .expect("expected reference document to load",);

        assert_eq!(site.title(), "Senor Scripts");
        assert_eq!(site.sidebar().leaf_count(), 10);
        assert_eq!(site.sidebar().depth(), 4);
        assert_eq!(site.plugins()[0].name, "starlight-theme-rapide");
        assert_eq!(site.sidebar().slugs()[..2], ["", "scripts/airdrops"]);
    }

    #[test]
    fn override_takes_precedence_over_document_depth()
    {
        let options = LoadOptions {
            max_depth: Some(3,),
        };
        let error =
            parse_site(SENOR_SCRIPTS, &all_assets, &options,).expect_err("expected depth error",);
        match error {
            ConfigError::ExcessiveDepth {
                depth,
                max,
                ..
            } => {
                assert_eq!(depth, 4);
                assert_eq!(max, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn document_depth_applies_without_override()
    {
        let yaml = r#"
title: Docs
maxDepth: 1
sidebar:
  - label: Guides
    items:
      - label: Intro
        slug: guides/intro
"#;
        let error = parse_site(yaml, &all_assets, &LoadOptions::default(),)
            .expect_err("expected depth error",);
        assert_eq!(error.kind(), "ExcessiveDepth");
    }

    #[test]
    fn zero_depth_is_rejected()
    {
        let document = SiteDocument {
            max_depth: Some(0,),
            ..SiteDocument::default()
        };
        let error = document
            .validation_options(&LoadOptions::default(),)
            .expect_err("expected validation error",);
        assert_eq!(error.kind(), "Validation");
    }

    #[test]
    fn malformed_yaml_is_parse_error()
    {
        let error = parse_site("sidebar: [", &all_assets, &LoadOptions::default(),)
            .expect_err("expected parse error",);
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_site_resolves_assets_next_to_document()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        fs::create_dir_all(dir.path().join("src/assets",),).expect("failed to create assets dir",);
        fs::create_dir_all(dir.path().join("src/styles",),).expect("failed to create styles dir",);
        fs::write(dir.path().join("src/assets/logo.png",), [0u8; 8],)
            .expect("failed to write logo",);
        fs::write(dir.path().join("src/styles/custom.css",), "",).expect("failed to write css",);
        let config_path = dir.path().join("site.yaml",);
        fs::write(&config_path, SENOR_SCRIPTS,).expect("failed to write document",);

        let site =
            load_site(&config_path, &LoadOptions::default(),).expect("expected load success",);
        assert_eq!(site.logo().map(|logo| logo.alt.as_str()), Some("Senor Scripts"));
    }

    #[test]
    fn load_site_reports_missing_stylesheet()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        fs::create_dir_all(dir.path().join("src/assets",),).expect("failed to create assets dir",);
        fs::write(dir.path().join("src/assets/logo.png",), [0u8; 8],)
            .expect("failed to write logo",);
        let config_path = dir.path().join("site.yaml",);
        fs::write(&config_path, SENOR_SCRIPTS,).expect("failed to write document",);

        let error =
            load_site(&config_path, &LoadOptions::default(),).expect_err("expected missing css",);
        match error {
            ConfigError::UnresolvedAsset {
                path,
            } => assert_eq!(path, PathBuf::from("./src/styles/custom.css")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_site_reports_missing_file()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let error = load_site(&dir.path().join("absent.yaml",), &LoadOptions::default(),)
            .expect_err("expected io error",);
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn diagnose_site_collects_sidebar_and_assembly_problems()
    {
        let yaml = r#"
title: ''
sidebar:
  - label: Squads
    items: []
  - label: Chat
    slug: scripts/chat
  - label: Chat
    slug: scripts/chat
"#;
        let document = parse_document(yaml,).expect("valid document",);
        let problems = diagnose_site(&document, &all_assets, &LoadOptions::default(),)
            .expect("expected diagnosis",);
        let kinds: Vec<_,> = problems.iter().map(ConfigError::kind,).collect();
        assert_eq!(kinds, ["EmptyGroup", "DuplicateSlug", "MissingTitle"]);
    }

    #[test]
    fn diagnose_site_is_empty_for_reference_document()
    {
        let document = parse_document(SENOR_SCRIPTS,).expect("valid document",);
        let problems = diagnose_site(&document, &all_assets, &LoadOptions::default(),)
            .expect("expected diagnosis",);
        assert!(problems.is_empty());
    }

    #[test]
    fn document_root_defaults_to_current_directory()
    {
        assert_eq!(document_root(Path::new("site.yaml")), PathBuf::from("."));
        assert_eq!(document_root(Path::new("docs/site.yaml")), PathBuf::from("docs"));
    }
}
