//! Route descriptors and view references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::routing::pattern::PathPattern;

/// Externally defined view a route is bound to.
///
/// Views are rendered by the client; here they are only referenced by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Home,
    Target,
    Results,
    Settings,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Target, View::Results, View::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Target => "Target",
            View::Results => "Results",
            View::Settings => "Settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view '{0}'")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// A declarative binding from a path pattern to a named view.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub path: PathPattern,
    pub name: String,
    pub view: View,
}

impl RouteDescriptor {
    pub fn new(path: PathPattern, name: impl Into<String>, view: View) -> Self {
        Self {
            path,
            name: name.into(),
            view,
        }
    }
}

/// Serializable summary of a descriptor, as exposed over HTTP and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub path: String,
    pub name: String,
    pub view: View,
    pub params: Vec<String>,
}

impl From<&RouteDescriptor> for RouteSummary {
    fn from(d: &RouteDescriptor) -> Self {
        Self {
            path: d.path.as_str().to_string(),
            name: d.name.clone(),
            view: d.view,
            params: d.path.param_names().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_str() {
        assert_eq!("Target".parse::<View>(), Ok(View::Target));
        assert_eq!("settings".parse::<View>(), Ok(View::Settings));
        assert_eq!("Admin".parse::<View>(), Err(UnknownView("Admin".into())));
    }

    #[test]
    fn test_summary_lists_params() {
        let d = RouteDescriptor::new(
            PathPattern::parse("/target/:target/:scanId").unwrap(),
            "Target",
            View::Target,
        );
        let summary = RouteSummary::from(&d);
        assert_eq!(summary.path, "/target/:target/:scanId");
        assert_eq!(summary.params, vec!["target", "scanId"]);
    }
}
