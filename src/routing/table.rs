//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Store route descriptors in declaration order
//! - Resolve a location to at most one descriptor
//! - Build hrefs for named routes (reverse routing)
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Builder rejects duplicate names and identically shaped patterns
//! - Overlapping patterns resolve to the most specific one; ties go to the
//!   earlier declaration, which cannot happen once shapes are unique
//! - Explicit no-match (`None`) rather than a silent default

use std::cmp::Ordering;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::routing::descriptor::{RouteDescriptor, RouteSummary, View};
use crate::routing::location::{Location, Params, RouteMatch};
use crate::routing::pattern::{PathPattern, PatternError, Segment};
use crate::routing::revision::Revision;

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Errors raised while building a table or reverse-routing through it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("invalid pattern for route '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("route name '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("route '{name}' path '{path}' duplicates route '{existing}'")]
    DuplicatePath {
        name: String,
        path: String,
        existing: String,
    },

    #[error("no route named '{0}'")]
    UnknownRoute(String),

    #[error("route '{name}' requires parameter '{param}'")]
    MissingParam { name: String, param: String },
}

/// Immutable, ordered set of route descriptors.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Build one of the built-in tables.
    ///
    /// The declarations go through the same checks as any other table, so a
    /// bad built-in entry panics here instead of silently disappearing.
    pub fn for_revision(revision: Revision) -> Self {
        revision
            .declarations()
            .iter()
            .fold(Self::builder(), |b, (path, name, view)| b.route(*path, *name, *view))
            .build()
            .expect("built-in route declarations are valid")
    }

    /// Resolve a location (`path?query#hash`) to its route.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch> {
        let loc = Location::parse(location);

        let mut best: Option<(&RouteDescriptor, Params)> = None;
        for route in &self.routes {
            let Some(params) = route.path.matches(loc.path) else {
                continue;
            };
            let replace = match &best {
                None => true,
                Some((current, _)) => {
                    route.path.specificity(&current.path) == Ordering::Greater
                }
            };
            if replace {
                best = Some((route, params));
            }
        }

        let (route, params) = best?;
        tracing::trace!(location, route = %route.name, "Resolved location");
        Some(RouteMatch {
            name: route.name.clone(),
            view: route.view,
            pattern: route.path.as_str().to_string(),
            path: loc.path.to_string(),
            params,
            query: loc.query_pairs(),
            hash: loc.hash.map(str::to_string),
        })
    }

    /// Build the path of a named route from its parameters.
    ///
    /// Parameters the pattern does not declare are ignored.
    pub fn href_for(&self, name: &str, params: &Params) -> Result<String, RouteTableError> {
        let route = self
            .get(name)
            .ok_or_else(|| RouteTableError::UnknownRoute(name.to_string()))?;

        if route.path.segments().is_empty() {
            return Ok("/".to_string());
        }

        let mut href = String::new();
        for segment in route.path.segments() {
            href.push('/');
            match segment {
                Segment::Static(text) => href.push_str(text),
                Segment::Param(param) => {
                    let value = params
                        .get(param)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| RouteTableError::MissingParam {
                            name: name.to_string(),
                            param: param.clone(),
                        })?;
                    href.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }

        let declared: Vec<&str> = route.path.param_names().collect();
        for (extra, _) in params.iter().filter(|(k, _)| !declared.contains(k)) {
            tracing::debug!(route = %name, param = extra, "Ignoring undeclared parameter");
        }

        Ok(href)
    }

    pub fn get(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.routes.iter().map(RouteSummary::from).collect()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::for_revision(Revision::default())
    }
}

/// Collects route declarations and validates them as a whole.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    declarations: Vec<(String, String, View)>,
}

impl RouteTableBuilder {
    pub fn route(mut self, path: impl Into<String>, name: impl Into<String>, view: View) -> Self {
        self.declarations.push((path.into(), name.into(), view));
        self
    }

    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        let mut routes: Vec<RouteDescriptor> = Vec::with_capacity(self.declarations.len());

        for (path, name, view) in self.declarations {
            let pattern = PathPattern::parse(&path).map_err(|source| {
                RouteTableError::InvalidPattern {
                    name: name.clone(),
                    source,
                }
            })?;

            if routes.iter().any(|r| r.name == name) {
                return Err(RouteTableError::DuplicateName(name));
            }
            if let Some(existing) = routes.iter().find(|r| r.path.same_shape(&pattern)) {
                return Err(RouteTableError::DuplicatePath {
                    name,
                    path,
                    existing: existing.name.clone(),
                });
            }
            if let Some(other) = routes.iter().find(|r| r.path.overlaps(&pattern)) {
                tracing::debug!(
                    route = %name,
                    other = %other.name,
                    "Overlapping patterns, the more specific one wins"
                );
            }

            routes.push(RouteDescriptor::new(pattern, name, view));
        }

        Ok(RouteTable { routes })
    }
}
