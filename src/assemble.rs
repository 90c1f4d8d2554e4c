// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Composition of the final site configuration.
//!
//! [`assemble`] combines an already validated [`NavTree`] with the remaining
//! top-level settings. The result is the immutable [`SiteConfig`] handed to
//! the site generator once at build start.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{assets::AssetResolver, error::ConfigError, navigation::NavTree};

/// Site logo shown in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Logo
{
    /// Image path relative to the site document.
    pub src: PathBuf,
    /// Alternative text. Blank values fall back to the site title.
    #[serde(default)]
    pub alt: String,
}

/// Extension registered with the site generator, such as a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct PluginRef
{
    /// Package name of the plugin.
    pub name:    String,
    /// Options passed to the plugin factory.
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value,>,
}

impl PluginRef
{
    /// Plugin reference without options.
    pub fn named(name: impl Into<String,>,) -> Self
    {
        Self {
            name:    name.into(),
            options: serde_json::Map::new(),
        }
    }
}

/// Validated site configuration.
///
/// Built once through [`assemble`] and read-only afterwards. Serializes with
/// the generator's field names (`customCss`, `sidebar`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig
{
    title:      String,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo:       Option<Logo,>,
    custom_css: Vec<PathBuf,>,
    plugins:    Vec<PluginRef,>,
    sidebar:    NavTree,
}

impl SiteConfig
{
    /// Site title.
    pub fn title(&self,) -> &str
    {
        &self.title
    }

    /// Header logo, if configured.
    pub fn logo(&self,) -> Option<&Logo,>
    {
        self.logo.as_ref()
    }

    /// Custom stylesheets in load order.
    pub fn custom_css(&self,) -> &[PathBuf]
    {
        &self.custom_css
    }

    /// Registered plugins in declaration order, unique by name.
    pub fn plugins(&self,) -> &[PluginRef]
    {
        &self.plugins
    }

    /// Validated sidebar.
    pub fn sidebar(&self,) -> &NavTree
    {
        &self.sidebar
    }
}

/// Builds a [`SiteConfig`] from its parts.
///
/// Checks run in a fixed order: title, logo, stylesheets, plugins. The first
/// failure is returned.
///
/// # Errors
///
/// * [`ConfigError::MissingTitle`] when `title` is blank.
/// * [`ConfigError::UnresolvedAsset`] when the logo or a stylesheet is not
///   found by `resolver`.
/// * [`ConfigError::Validation`] when a plugin name is blank.
/// * [`ConfigError::DuplicatePlugin`] when a plugin name repeats.
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// use sitenav::{NavNode, PluginRef, ValidationOptions, assemble, validate};
///
/// let sidebar = validate(vec![NavNode::leaf("Home", "",)], &ValidationOptions::default(),)
///     .expect("valid sidebar",);
/// let site = assemble(
///     "Senor Scripts",
///     None,
///     Vec::new(),
///     vec![PluginRef::named("starlight-theme-rapide",)],
///     sidebar,
///     &|_: &Path| true,
/// )
/// .expect("valid site",);
/// assert_eq!(site.title(), "Senor Scripts");
/// ```
pub fn assemble<R,>(
    title: &str,
    logo: Option<Logo,>,
    stylesheets: Vec<PathBuf,>,
    plugins: Vec<PluginRef,>,
    navigation: NavTree,
    resolver: &R,
) -> Result<SiteConfig, ConfigError,>
where
    R: AssetResolver + ?Sized,
{
    let title = title.trim();
    if title.is_empty() {
        return Err(ConfigError::MissingTitle,);
    }

    let logo = match logo {
        Some(logo,) => {
            require_asset(&logo.src, resolver,)?;
            let alt = match logo.alt.trim() {
                "" => title.to_owned(),
                alt => alt.to_owned(),
            };
            Some(Logo {
                src: logo.src,
                alt,
            },)
        }
        None => None,
    };

    for stylesheet in &stylesheets {
        require_asset(stylesheet, resolver,)?;
    }

    let plugins = normalize_plugins(plugins,)?;

    info!(
        "assembled site '{title}' with {} pages, {} stylesheets, {} plugins",
        navigation.leaf_count(),
        stylesheets.len(),
        plugins.len()
    );

    Ok(SiteConfig {
        title: title.to_owned(),
        logo,
        custom_css: stylesheets,
        plugins,
        sidebar: navigation,
    },)
}

fn require_asset<R,>(path: &Path, resolver: &R,) -> Result<(), ConfigError,>
where
    R: AssetResolver + ?Sized,
{
    if resolver.file_exists(path,) {
        debug!("resolved asset {}", path.display());
        Ok((),)
    } else {
        Err(ConfigError::UnresolvedAsset {
            path: path.to_path_buf(),
        },)
    }
}

fn normalize_plugins(plugins: Vec<PluginRef,>,) -> Result<Vec<PluginRef,>, ConfigError,>
{
    let mut seen = HashSet::with_capacity(plugins.len(),);
    let mut normalized = Vec::with_capacity(plugins.len(),);

    for plugin in plugins {
        let name = plugin.name.trim();
        if name.is_empty() {
            return Err(ConfigError::validation("plugin name cannot be empty",),);
        }
        if !seen.insert(name.to_owned(),) {
            return Err(ConfigError::DuplicatePlugin {
                name: name.to_owned(),
            },);
        }
        normalized.push(PluginRef {
            name:    name.to_owned(),
            options: plugin.options,
        },);
    }

    Ok(normalized,)
}
