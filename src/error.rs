#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the sitenav crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

use crate::navigation::{NavPath, Occurrences};

/// Unified error type returned by the validator, assembler, loader and CLI.
///
/// Every variant describes a build-time authoring mistake or an I/O failure
/// while reading the site document. Tree problems carry the [`NavPath`] of
/// the offending node so the message points at a concrete sidebar entry.
#[derive(Debug, masterror::Error)]
pub enum ConfigError {
    /// Wraps I/O errors that occur while reading the site document.
    #[error("failed to read configuration from {path:?}: {source}")]
    Io {
        /// Location of the site document.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps serialization errors when writing the assembled configuration.
    #[error("failed to serialize site configuration: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    },
    /// Wraps I/O errors that occur while writing CLI output.
    #[error("failed to write output: {source}")]
    Output {
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Returned for invalid settings that are not tied to a sidebar node.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// A raw sidebar entry is neither a link nor a group.
    #[error("malformed sidebar entry at {path}: {message}")]
    MalformedEntry {
        /// Location of the entry.
        path:    NavPath,
        /// What is wrong with the entry.
        message: String
    },
    /// A link slug is not a usable page path.
    #[error("invalid slug '{slug}' at {path}")]
    InvalidSlug {
        /// Location of the link.
        path: NavPath,
        /// Offending slug after normalization.
        slug: String
    },
    /// Two or more links point at the same page.
    #[error("duplicate slug '{slug}' at {paths}")]
    DuplicateSlug {
        /// Slug shared by the links.
        slug:  String,
        /// Every location of the slug in document order.
        paths: Occurrences
    },
    /// A node has an empty or missing label.
    #[error("empty label at {path}")]
    EmptyLabel {
        /// Location of the node.
        path: NavPath
    },
    /// A group declares no items.
    #[error("group {path} has no items")]
    EmptyGroup {
        /// Location of the group.
        path: NavPath
    },
    /// The sidebar nests deeper than allowed.
    #[error("{path} sits at depth {depth}, deeper than the maximum of {max}")]
    ExcessiveDepth {
        /// Location of the first node past the limit.
        path:  NavPath,
        /// Depth of that node, top-level nodes being depth 1.
        depth: usize,
        /// Configured maximum depth.
        max:   usize
    },
    /// The site title is empty.
    #[error("site title is missing")]
    MissingTitle,
    /// A logo or stylesheet path does not point at an existing file.
    #[error("asset {path:?} does not exist")]
    UnresolvedAsset {
        /// Path as written in the site document.
        path: PathBuf
    },
    /// A plugin is registered more than once.
    #[error("plugin '{name}' is registered more than once")]
    DuplicatePlugin {
        /// Name of the plugin.
        name: String
    }
}

impl ConfigError {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Stable name of the error kind, used as the prefix of CLI diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "Io",
            Self::Parse { .. } => "Parse",
            Self::Serialize { .. } => "Serialize",
            Self::Output { .. } => "Output",
            Self::Validation { .. } => "Validation",
            Self::MalformedEntry { .. } => "MalformedEntry",
            Self::InvalidSlug { .. } => "InvalidSlug",
            Self::DuplicateSlug { .. } => "DuplicateSlug",
            Self::EmptyLabel { .. } => "EmptyLabel",
            Self::EmptyGroup { .. } => "EmptyGroup",
            Self::ExcessiveDepth { .. } => "ExcessiveDepth",
            Self::MissingTitle => "MissingTitle",
            Self::UnresolvedAsset { .. } => "UnresolvedAsset",
            Self::DuplicatePlugin { .. } => "DuplicatePlugin"
        }
    }

    /// Formats the error for diagnostics as `error[Kind]: message`.
    ///
    /// The returned string is what the CLI prints to stderr before exiting.
    pub fn to_display_string(&self) -> String {
        format!("error[{}]: {self}", self.kind())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates a [`ConfigError::Output`] variant from a failed write.
///
/// # Parameters
///
/// * `source` - I/O error reported while writing to the output stream.
pub fn output_error(source: std::io::Error) -> ConfigError {
    ConfigError::Output {
        source
    }
}

/// Creates a [`ConfigError::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the site document that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigError;
    use crate::navigation::{NavPath, Occurrences};

    #[test]
    fn validation_constructor_populates_message() {
        let error = ConfigError::validation("something went wrong");
        match error {
            ConfigError::Validation {
                ref message
            } => {
                assert_eq!(message, "something went wrong");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[test]
    fn display_string_carries_kind_prefix() {
        let error = ConfigError::EmptyGroup {
            path: NavPath::from_labels(["Scripts", "Squads"])
        };
        assert_eq!(
            error.to_display_string(),
            "error[EmptyGroup]: group Scripts > Squads has no items"
        );
    }

    #[test]
    fn duplicate_slug_lists_every_location() {
        let error = ConfigError::DuplicateSlug {
            slug:  "scripts/chat".to_owned(),
            paths: Occurrences::new(vec![
                NavPath::from_labels(["Scripts", "Chat"]),
                NavPath::from_labels(["Extras", "Chat"]),
            ])
        };
        assert_eq!(
            error.to_string(),
            "duplicate slug 'scripts/chat' at Scripts > Chat; Extras > Chat"
        );
    }

    #[test]
    fn excessive_depth_names_limit() {
        let error = ConfigError::ExcessiveDepth {
            path:  NavPath::from_labels(["A", "B", "C"]),
            depth: 3,
            max:   2
        };
        assert_eq!(error.kind(), "ExcessiveDepth");
        assert!(error.to_string().contains("maximum of 2"));
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/site.yaml");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::io_error(path, io_error);

        match error {
            ConfigError::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_parse_variant() {
        let error = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: ConfigError = error.into();
        assert!(matches!(mapped, ConfigError::Parse { .. }));
        assert_eq!(mapped.kind(), "Parse");
    }

    #[test]
    fn serde_json_conversion_maps_to_serialize_variant() {
        let invalid = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let mapped: ConfigError = invalid.into();
        assert!(matches!(mapped, ConfigError::Serialize { .. }));
    }
}
