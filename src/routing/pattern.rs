//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Parse pattern strings such as `/target/:target/:scanId`
//! - Match request paths segment by segment
//! - Extract and percent-decode named segments
//!
//! # Design Decisions
//! - Static segments compare ASCII case-insensitively
//! - A single trailing slash is ignored on both patterns and paths
//! - No regex: matching is a linear walk over the segments

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use percent_encoding::percent_decode_str;

use crate::routing::Params;

/// Error returned when a pattern string cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern '{0}' must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("pattern '{pattern}' has an invalid parameter name '{name}'")]
    InvalidParamName { pattern: String, name: String },

    #[error("pattern '{pattern}' declares parameter '{name}' more than once")]
    DuplicateParam { pattern: String, name: String },
}

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        if !pattern.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        }

        let body = trim_trailing_slash(pattern);
        let mut segments = Vec::new();
        if !body.is_empty() {
            for raw in body[1..].split('/') {
                if raw.is_empty() {
                    return Err(PatternError::EmptySegment(pattern.to_string()));
                }
                match raw.strip_prefix(':') {
                    Some(name) => {
                        if !is_valid_param_name(name) {
                            return Err(PatternError::InvalidParamName {
                                pattern: pattern.to_string(),
                                name: name.to_string(),
                            });
                        }
                        let seen = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(n) if n == name));
                        if seen {
                            return Err(PatternError::DuplicateParam {
                                pattern: pattern.to_string(),
                                name: name.to_string(),
                            });
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Static(raw.to_string())),
                }
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameters in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match a path (no query or hash) and extract its parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        if !path.starts_with('/') {
            return None;
        }
        let body = trim_trailing_slash(path);
        let parts: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else {
            body[1..].split('/').collect()
        };
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(text) => {
                    if !text.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }
        Some(params)
    }

    /// True when both patterns accept exactly the same set of paths.
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a.eq_ignore_ascii_case(b),
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// True when at least one path is accepted by both patterns.
    pub fn overlaps(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a.eq_ignore_ascii_case(b),
                    _ => true,
                })
    }

    /// Specificity order: the first differing segment decides, static beats param.
    pub fn specificity(&self, other: &PathPattern) -> Ordering {
        for pair in self.segments.iter().zip(&other.segments) {
            match pair {
                (Segment::Static(_), Segment::Param(_)) => return Ordering::Greater,
                (Segment::Param(_), Segment::Static(_)) => return Ordering::Less,
                _ => {}
            }
        }
        Ordering::Equal
    }
}

impl FromStr for PathPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.source)
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else if path == "/" {
        ""
    } else {
        path
    }
}

fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
