// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Sidebar navigation tree and its validation pass.
//!
//! Authors describe the sidebar as nested [`NavNode`] values. [`validate`]
//! walks the tree depth-first in declaration order, normalizes labels and
//! slugs, and checks the structural invariants. Only a successful pass
//! produces a [`NavTree`], so downstream code never sees an unchecked tree.
//!
//! # Examples
//!
//! ```
//! use sitenav::{NavNode, ValidationOptions, validate};
//!
//! let tree = validate(
//!     vec![NavNode::leaf("Home", "",), NavNode::leaf("Airdrops", "scripts/airdrops",)],
//!     &ValidationOptions::default(),
//! )
//! .expect("valid sidebar",);
//! assert_eq!(tree.leaf_count(), 2);
//! ```

use std::{collections::HashMap, fmt};

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::ConfigError;

/// Deepest level a node may sit at when no override is supplied.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// `/`-separated segments without whitespace, query or fragment markers.
const SLUG_PATTERN: &str = r"^[^\s/?#]+(?:/[^\s/?#]+)*$";

/// Single sidebar entry.
///
/// Serializes in the shape the site generator expects: links as
/// `{label, slug}` and groups as `{label, collapsed?, items}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(untagged)]
pub enum NavNode
{
    /// Direct link to a content page. An empty slug is the index page.
    Leaf
    {
        /// Text shown in the sidebar.
        label: String,
        /// Page path fragment.
        slug:  String,
    },
    /// Named, collapsible grouping of further entries.
    Group
    {
        /// Text shown in the sidebar.
        label:     String,
        /// Whether the group starts collapsed.
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        collapsed: bool,
        /// Child entries in display order.
        items:     Vec<NavNode,>,
    },
}

impl NavNode
{
    /// Creates a link entry.
    pub fn leaf(label: impl Into<String,>, slug: impl Into<String,>,) -> Self
    {
        Self::Leaf {
            label: label.into(),
            slug:  slug.into(),
        }
    }

    /// Creates an expanded group.
    pub fn group(label: impl Into<String,>, items: Vec<NavNode,>,) -> Self
    {
        Self::Group {
            label: label.into(),
            collapsed: false,
            items,
        }
    }

    /// Creates a group that starts collapsed.
    pub fn collapsed_group(label: impl Into<String,>, items: Vec<NavNode,>,) -> Self
    {
        Self::Group {
            label: label.into(),
            collapsed: true,
            items,
        }
    }

    /// Label of the entry as written.
    pub fn label(&self,) -> &str
    {
        match self {
            Self::Leaf {
                label, ..
            }
            | Self::Group {
                label, ..
            } => label,
        }
    }
}

/// Labels leading from the sidebar root to a node.
///
/// Displayed as `Scripts > Squads > Overview`. An unlabeled node is shown as
/// `#N`, its 1-based position among its siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
#[serde(transparent)]
pub struct NavPath(Vec<String,>,);

impl NavPath
{
    /// Builds a path from the given labels.
    pub fn from_labels<I, S,>(labels: I,) -> Self
    where
        I: IntoIterator<Item = S,>,
        S: Into<String,>,
    {
        Self(labels.into_iter().map(Into::into,).collect(),)
    }

    /// Path segments from the root.
    pub fn segments(&self,) -> &[String]
    {
        &self.0
    }

    /// Number of segments, equal to the node's depth.
    pub fn len(&self,) -> usize
    {
        self.0.len()
    }

    /// Whether the path addresses the root itself.
    pub fn is_empty(&self,) -> bool
    {
        self.0.is_empty()
    }
}

impl fmt::Display for NavPath
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        if self.0.is_empty() {
            return f.write_str("(root)",);
        }
        f.write_str(&self.0.join(" > ",),)
    }
}

/// Every location at which a duplicated slug appears, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
#[serde(transparent)]
pub struct Occurrences(Vec<NavPath,>,);

impl Occurrences
{
    /// Wraps the given locations.
    pub fn new(paths: Vec<NavPath,>,) -> Self
    {
        Self(paths,)
    }

    /// Locations in document order.
    pub fn as_slice(&self,) -> &[NavPath]
    {
        &self.0
    }

    /// Number of locations.
    pub fn len(&self,) -> usize
    {
        self.0.len()
    }

    /// Whether no location was recorded.
    pub fn is_empty(&self,) -> bool
    {
        self.0.is_empty()
    }
}

impl fmt::Display for Occurrences
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        for (index, path,) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ",)?;
            }
            write!(f, "{path}")?;
        }
        Ok((),)
    }
}

/// Tunables for [`validate`] and [`diagnose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct ValidationOptions
{
    /// Deepest level any node may sit at. Top-level nodes are level 1.
    pub max_depth: usize,
}

impl ValidationOptions
{
    /// Options with the given depth limit.
    pub fn with_max_depth(max_depth: usize,) -> Self
    {
        Self {
            max_depth,
        }
    }
}

impl Default for ValidationOptions
{
    fn default() -> Self
    {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Sidebar that passed [`validate`].
///
/// Labels are trimmed, slugs normalized, and every invariant holds. The
/// value is immutable; [`into_nodes`](Self::into_nodes) hands the nodes back
/// for re-validation or embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
#[serde(transparent)]
pub struct NavTree
{
    nodes: Vec<NavNode,>,
}

impl NavTree
{
    /// Top-level entries in display order.
    pub fn nodes(&self,) -> &[NavNode]
    {
        &self.nodes
    }

    /// Consumes the tree and returns its top-level entries.
    pub fn into_nodes(self,) -> Vec<NavNode,>
    {
        self.nodes
    }

    /// Whether the sidebar has no entries.
    pub fn is_empty(&self,) -> bool
    {
        self.nodes.is_empty()
    }

    /// Number of links in the whole tree.
    pub fn leaf_count(&self,) -> usize
    {
        fn count(nodes: &[NavNode],) -> usize
        {
            nodes
                .iter()
                .map(|node| match node {
                    NavNode::Leaf { .. } => 1,
                    NavNode::Group {
                        items, ..
                    } => count(items,),
                },)
                .sum()
        }
        count(&self.nodes,)
    }

    /// Level of the deepest node, or 0 for an empty sidebar.
    pub fn depth(&self,) -> usize
    {
        fn deepest(nodes: &[NavNode], level: usize,) -> usize
        {
            nodes
                .iter()
                .map(|node| match node {
                    NavNode::Leaf { .. } => level,
                    NavNode::Group {
                        items, ..
                    } => deepest(items, level + 1,).max(level,),
                },)
                .max()
                .unwrap_or(0,)
        }
        deepest(&self.nodes, 1,)
    }

    /// Slugs of every link in document order.
    pub fn slugs(&self,) -> Vec<&str,>
    {
        fn collect<'tree,>(nodes: &'tree [NavNode], out: &mut Vec<&'tree str,>,)
        {
            for node in nodes {
                match node {
                    NavNode::Leaf {
                        slug, ..
                    } => out.push(slug,),
                    NavNode::Group {
                        items, ..
                    } => collect(items, out,),
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.nodes, &mut out,);
        out
    }

    /// Indented plain-text outline, two spaces per level.
    ///
    /// Links render as `label -> /slug`, groups as `label/`, and collapsed
    /// groups carry a trailing `(collapsed)` marker.
    pub fn outline(&self,) -> String
    {
        fn render(nodes: &[NavNode], level: usize, out: &mut String,)
        {
            for node in nodes {
                let indent = "  ".repeat(level,);
                match node {
                    NavNode::Leaf {
                        label,
                        slug,
                    } => {
                        out.push_str(&format!("{indent}{label} -> /{slug}\n"),);
                    }
                    NavNode::Group {
                        label,
                        collapsed,
                        items,
                    } => {
                        let marker = if *collapsed { " (collapsed)" } else { "" };
                        out.push_str(&format!("{indent}{label}/{marker}\n"),);
                        render(items, level + 1, out,);
                    }
                }
            }
        }
        let mut out = String::new();
        render(&self.nodes, 0, &mut out,);
        out
    }
}

/// Validates and normalizes a sidebar.
///
/// # Errors
///
/// Returns the first problem in document order: [`ConfigError::EmptyLabel`],
/// [`ConfigError::EmptyGroup`], [`ConfigError::ExcessiveDepth`],
/// [`ConfigError::InvalidSlug`] or [`ConfigError::DuplicateSlug`]. A
/// duplicate is reported at its second occurrence and lists every location.
pub fn validate(raw: Vec<NavNode,>, options: &ValidationOptions,) -> Result<NavTree, ConfigError,>
{
    let (nodes, problems,) = Walker::new(options,)?.run(raw,);
    match problems.into_iter().next() {
        Some(problem,) => Err(problem,),
        None => {
            let tree = NavTree {
                nodes,
            };
            debug!("validated sidebar with {} pages at depth {}", tree.leaf_count(), tree.depth());
            Ok(tree,)
        }
    }
}

/// Collects every problem in the sidebar, in document order.
///
/// [`validate`] fails exactly when this list is non-empty, and its error is
/// the first entry.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] when the slug pattern cannot be
/// compiled.
pub fn diagnose(
    raw: &[NavNode],
    options: &ValidationOptions,
) -> Result<Vec<ConfigError,>, ConfigError,>
{
    let (_, problems,) = Walker::new(options,)?.run(raw.to_vec(),);
    Ok(problems,)
}

/// Where a slug was seen during the walk.
#[derive(Default,)]
struct SlugUse
{
    paths:             Vec<NavPath,>,
    second_occurrence: usize,
}

struct Walker<'opts,>
{
    options:      &'opts ValidationOptions,
    slug_pattern: Regex,
    path:         Vec<String,>,
    ordinal:      usize,
    slugs:        HashMap<String, SlugUse,>,
    problems:     Vec<(usize, ConfigError,),>,
}

impl<'opts,> Walker<'opts,>
{
    fn new(options: &'opts ValidationOptions,) -> Result<Self, ConfigError,>
    {
        let slug_pattern = Regex::new(SLUG_PATTERN,)
            .map_err(|e| ConfigError::validation(format!("invalid slug pattern: {e}"),),)?;

        Ok(Self {
            options,
            slug_pattern,
            path: Vec::new(),
            ordinal: 0,
            slugs: HashMap::new(),
            problems: Vec::new(),
        },)
    }

    fn run(mut self, raw: Vec<NavNode,>,) -> (Vec<NavNode,>, Vec<ConfigError,>,)
    {
        let nodes = self.walk(raw, 1,);

        for (slug, seen,) in self.slugs {
            if seen.paths.len() > 1 {
                self.problems.push((
                    seen.second_occurrence,
                    ConfigError::DuplicateSlug {
                        slug,
                        paths: Occurrences::new(seen.paths,),
                    },
                ),);
            }
        }
        self.problems.sort_by_key(|(ordinal, _,)| *ordinal,);

        (nodes, self.problems.into_iter().map(|(_, problem,)| problem,).collect(),)
    }

    fn walk(&mut self, nodes: Vec<NavNode,>, depth: usize,) -> Vec<NavNode,>
    {
        let mut normalized = Vec::with_capacity(nodes.len(),);
        for (index, node,) in nodes.into_iter().enumerate() {
            normalized.push(self.visit(node, index, depth,),);
        }
        normalized
    }

    fn visit(&mut self, node: NavNode, index: usize, depth: usize,) -> NavNode
    {
        self.ordinal += 1;
        let ordinal = self.ordinal;

        let label = node.label().trim().to_owned();
        self.path.push(if label.is_empty() { format!("#{}", index + 1) } else { label.clone() },);

        if label.is_empty() {
            self.report(ordinal, |path| ConfigError::EmptyLabel {
                path,
            },);
        }

        let too_deep = depth > self.options.max_depth;
        if too_deep {
            let max = self.options.max_depth;
            self.report(ordinal, |path| ConfigError::ExcessiveDepth {
                path,
                depth,
                max,
            },);
        }

        let normalized = match node {
            NavNode::Leaf {
                slug, ..
            } => {
                let slug = normalize_slug(&slug,);
                if !too_deep {
                    self.check_slug(&slug, ordinal,);
                }
                NavNode::Leaf {
                    label,
                    slug,
                }
            }
            NavNode::Group {
                collapsed,
                items,
                ..
            } => {
                if items.is_empty() {
                    self.report(ordinal, |path| ConfigError::EmptyGroup {
                        path,
                    },);
                }
                let items = if too_deep { items } else { self.walk(items, depth + 1,) };
                NavNode::Group {
                    label,
                    collapsed,
                    items,
                }
            }
        };

        self.path.pop();
        normalized
    }

    fn check_slug(&mut self, slug: &str, ordinal: usize,)
    {
        if !slug.is_empty() && !self.is_valid_slug(slug,) {
            let slug_owned = slug.to_owned();
            self.report(ordinal, |path| ConfigError::InvalidSlug {
                path,
                slug: slug_owned,
            },);
        }

        let path = self.current_path();
        let seen = self.slugs.entry(slug.to_owned(),).or_default();
        seen.paths.push(path,);
        if seen.paths.len() == 2 {
            seen.second_occurrence = ordinal;
        }
    }

    fn is_valid_slug(&self, slug: &str,) -> bool
    {
        self.slug_pattern.is_match(slug,)
            && !slug.split('/',).any(|segment| matches!(segment, "." | ".."),)
    }

    fn report<F,>(&mut self, ordinal: usize, build: F,)
    where
        F: FnOnce(NavPath,) -> ConfigError,
    {
        let problem = build(self.current_path(),);
        debug!("sidebar problem: {problem}");
        self.problems.push((ordinal, problem,),);
    }

    fn current_path(&self,) -> NavPath
    {
        NavPath(self.path.clone(),)
    }
}

/// Strips surrounding whitespace and slashes from a slug.
///
/// # Examples
///
/// ```
/// assert_eq!(sitenav::normalize_slug(" /scripts/chat/ ",), "scripts/chat");
/// assert_eq!(sitenav::normalize_slug("/",), "");
/// ```
pub fn normalize_slug(slug: &str,) -> String
{
    slug.trim_matches(|ch: char| ch == '/' || ch.is_whitespace(),).to_owned()
}
