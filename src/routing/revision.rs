//! Built-in route declarations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::routing::descriptor::View;

/// `(path, name, view)` as declared.
pub type Declaration = (&'static str, &'static str, View);

const INITIAL: &[Declaration] = &[
    ("/", "Home", View::Home),
    ("/target/:target/:scanId", "Target", View::Target),
    ("/results/:scanId", "Results", View::Results),
];

const CURRENT: &[Declaration] = &[
    ("/", "Home", View::Home),
    ("/target/:target/:scanId", "Target", View::Target),
    ("/results/:scanId", "Results", View::Results),
    ("/settings", "Settings", View::Settings),
];

/// Which version of the application's route table to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    /// Home, Target and Results only.
    Initial,
    /// Adds the Settings page.
    #[default]
    Current,
}

impl Revision {
    pub fn declarations(&self) -> &'static [Declaration] {
        match self {
            Revision::Initial => INITIAL,
            Revision::Current => CURRENT,
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Initial => f.pad("initial"),
            Revision::Current => f.pad("current"),
        }
    }
}

impl FromStr for Revision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "initial" => Ok(Revision::Initial),
            "current" => Ok(Revision::Current),
            other => Err(format!("unknown revision '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteTable;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique() {
        for revision in [Revision::Initial, Revision::Current] {
            let names: HashSet<_> = revision.declarations().iter().map(|d| d.1).collect();
            assert_eq!(names.len(), revision.declarations().len());
        }
    }

    #[test]
    fn test_builtin_tables_pass_builder_checks() {
        for revision in [Revision::Initial, Revision::Current] {
            let mut builder = RouteTable::builder();
            for (path, name, view) in revision.declarations() {
                builder = builder.route(*path, *name, *view);
            }
            let table = builder.build().unwrap();
            let builtin = RouteTable::for_revision(revision);
            assert_eq!(table.len(), revision.declarations().len());
            assert_eq!(builtin.len(), revision.declarations().len());
            for ((path, name, _), route) in revision.declarations().iter().zip(builtin.iter()) {
                assert_eq!(route.name, *name);
                assert_eq!(route.path.as_str(), *path);
            }
        }
    }

    #[test]
    fn test_settings_only_in_current() {
        assert!(RouteTable::for_revision(Revision::Initial).resolve("/settings").is_none());
        let m = RouteTable::for_revision(Revision::Current).resolve("/settings").unwrap();
        assert_eq!(m.name, "Settings");
        assert!(m.params.is_empty());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Initial".parse::<Revision>(), Ok(Revision::Initial));
        assert!("v3".parse::<Revision>().is_err());
    }
}
