// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Site document types as written by authors.
//!
//! The types in this module mirror the YAML document consumed by the CLI.
//! They keep every field optional or defaulted so that authoring mistakes
//! surface as precise [`ConfigError`] values during conversion and
//! validation rather than as opaque parse failures.

use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    assemble::{Logo, PluginRef},
    error::ConfigError,
    navigation::{NavNode, NavPath},
};

/// Root site document.
///
/// Field names follow the site generator (`customCss`, `maxDepth`), with
/// snake_case aliases accepted.
///
/// # Examples
///
/// ```
/// use sitenav::SiteDocument;
///
/// let yaml = r#"
/// title: Senor Scripts
/// customCss: [./src/styles/custom.css]
/// plugins:
///   - name: starlight-theme-rapide
/// sidebar:
///   - label: Home
///     slug: ''
/// "#;
/// let document: SiteDocument = serde_yaml::from_str(yaml,).expect("valid document",);
/// assert_eq!(document.sidebar.len(), 1);
/// assert_eq!(document.plugins[0].name, "starlight-theme-rapide");
/// ```
#[derive(Debug, Clone, Default, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument
{
    /// Site title shown in the header and browser tab.
    #[serde(default)]
    pub title:      String,
    /// Optional header logo.
    #[serde(default)]
    pub logo:       Option<Logo,>,
    /// Stylesheets loaded after the theme, in order.
    #[serde(default, alias = "custom_css")]
    pub custom_css: Vec<PathBuf,>,
    /// Generator plugins, such as a theme.
    #[serde(default)]
    pub plugins:    Vec<PluginRef,>,
    /// Optional sidebar depth limit.
    #[serde(default, alias = "max_depth")]
    pub max_depth:  Option<usize,>,
    /// Sidebar entries in display order.
    #[serde(default)]
    pub sidebar:    Vec<SidebarEntry,>,
}

/// Sidebar entry before it is classified as a link or a group.
///
/// An entry with `slug` is a link, an entry with `items` is a group.
#[derive(Debug, Clone, Default, Deserialize,)]
pub struct SidebarEntry
{
    /// Text shown in the sidebar.
    #[serde(default)]
    pub label:     Option<String,>,
    /// Page path for link entries.
    #[serde(default)]
    pub slug:      Option<String,>,
    /// Children for group entries.
    #[serde(default)]
    pub items:     Option<Vec<SidebarEntry,>,>,
    /// Initial collapse state for group entries.
    #[serde(default)]
    pub collapsed: Option<bool,>,
}

impl SiteDocument
{
    /// Converts the raw sidebar into typed [`NavNode`] values.
    ///
    /// Labels and slugs are passed through untouched; trimming and the
    /// structural checks belong to [`validate`](crate::validate).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedEntry`] for the first entry that has
    /// both `slug` and `items`, neither of them, or `collapsed` on a link.
    pub fn navigation(&self,) -> Result<Vec<NavNode,>, ConfigError,>
    {
        let mut path = Vec::new();
        convert_entries(&self.sidebar, &mut path,)
    }
}

fn convert_entries(
    entries: &[SidebarEntry],
    path: &mut Vec<String,>,
) -> Result<Vec<NavNode,>, ConfigError,>
{
    let mut nodes = Vec::with_capacity(entries.len(),);
    for (index, entry,) in entries.iter().enumerate() {
        let label = entry.label.clone().unwrap_or_default();
        let segment = match label.trim() {
            "" => format!("#{}", index + 1),
            trimmed => trimmed.to_owned(),
        };
        path.push(segment,);
        let node = convert_entry(entry, label, path,)?;
        path.pop();
        nodes.push(node,);
    }
    Ok(nodes,)
}

fn convert_entry(
    entry: &SidebarEntry,
    label: String,
    path: &mut Vec<String,>,
) -> Result<NavNode, ConfigError,>
{
    match (&entry.slug, &entry.items,) {
        (Some(slug,), None,) => {
            if entry.collapsed.is_some() {
                return Err(malformed(path, "`collapsed` only applies to groups",),);
            }
            Ok(NavNode::Leaf {
                label,
                slug: slug.clone(),
            },)
        }
        (None, Some(items,),) => Ok(NavNode::Group {
            label,
            collapsed: entry.collapsed.unwrap_or(false,),
            items: convert_entries(items, path,)?,
        },),
        (Some(_,), Some(_,),) => Err(malformed(path, "entry declares both `slug` and `items`",),),
        (None, None,) => Err(malformed(path, "entry needs either `slug` or `items`",),),
    }
}

fn malformed(path: &[String], message: &str,) -> ConfigError
{
    ConfigError::MalformedEntry {
        path:    NavPath::from_labels(path.iter().cloned(),),
        message: message.to_owned(),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn parse(yaml: &str,) -> SiteDocument
    {
        serde_yaml::from_str(yaml,).expect("valid document",)
    }

    #[test]
    fn accepts_snake_case_aliases()
    {
        let document = parse(
            r#"
title: Docs
custom_css: [a.css, b.css]
max_depth: 2
"#,
        );
        assert_eq!(document.custom_css, vec![PathBuf::from("a.css"), PathBuf::from("b.css")]);
        assert_eq!(document.max_depth, Some(2));
    }

    #[test]
    fn missing_sections_default_to_empty()
    {
        let document = parse("title: Docs\n",);
        assert!(document.sidebar.is_empty());
        assert!(document.plugins.is_empty());
        assert!(document.logo.is_none());
        assert!(document.max_depth.is_none());
    }

    #[test]
    fn plugin_options_are_kept()
    {
        let document = parse(
            r#"
plugins:
  - name: starlight-theme-rapide
    options:
      accent: teal
"#,
        );
        assert_eq!(document.plugins[0].options["accent"], "teal");
    }

    #[test]
    fn classifies_links_and_groups()
    {
        let document = parse(
            r#"
sidebar:
  - label: Scripts
    collapsed: true
    items:
      - label: Home
        slug: ''
"#,
        );
        let nodes = document.navigation().expect("expected conversion success",);
        assert_eq!(
            nodes,
            vec![NavNode::collapsed_group("Scripts", vec![NavNode::leaf("Home", "")])]
        );
    }

    #[test]
    fn missing_label_becomes_empty_label()
    {
        let document = parse("sidebar:\n  - slug: scripts/chat\n",);
        let nodes = document.navigation().expect("expected conversion success",);
        assert_eq!(nodes, vec![NavNode::leaf("", "scripts/chat")]);
    }

    #[test]
    fn rejects_entry_with_slug_and_items()
    {
        let document = parse(
            r#"
sidebar:
  - label: Scripts
    items:
      - label: Squads
        slug: scripts/squads
        items: []
"#,
        );
        let error = document.navigation().expect_err("expected malformed entry",);
        match error {
            ConfigError::MalformedEntry {
                path, ..
            } => assert_eq!(path.to_string(), "Scripts > Squads"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_entry_without_slug_or_items()
    {
        let document = parse("sidebar:\n  - label: Chat\n",);
        let error = document.navigation().expect_err("expected malformed entry",);
        assert_eq!(error.kind(), "MalformedEntry");
    }

    #[test]
    fn rejects_collapsed_link()
    {
        let document = parse("sidebar:\n  - label: Chat\n    slug: chat\n    collapsed: true\n",);
        let error = document.navigation().expect_err("expected malformed entry",);
        assert!(error.to_string().contains("only applies to groups",));
    }
}
