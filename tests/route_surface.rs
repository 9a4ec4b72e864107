//! The client's externally observable route surface.

use std::collections::HashSet;

use domscout_router::history::{NavigationTarget, Navigator, WebHistory};
use domscout_router::routing::{Params, Revision, RouteTable, View};

#[test]
fn test_declared_paths_resolve() {
    let table = RouteTable::for_revision(Revision::Current);

    let home = table.resolve("/").unwrap();
    assert_eq!(home.name, "Home");
    assert_eq!(home.view, View::Home);
    assert!(home.params.is_empty());

    let target = table.resolve("/target/example.com/42").unwrap();
    assert_eq!(target.name, "Target");
    assert_eq!(
        target.params,
        Params::new().with("target", "example.com").with("scanId", "42")
    );

    let results = table.resolve("/results/5f0c6a2e-1b7d-4c55-9a57-0d1f2c3b4a59").unwrap();
    assert_eq!(results.name, "Results");
    assert_eq!(
        results.params.get("scanId"),
        Some("5f0c6a2e-1b7d-4c55-9a57-0d1f2c3b4a59")
    );

    let settings = table.resolve("/settings").unwrap();
    assert_eq!(settings.name, "Settings");
    assert!(settings.params.is_empty());
}

#[test]
fn test_route_names_unique() {
    for revision in [Revision::Initial, Revision::Current] {
        let table = RouteTable::for_revision(revision);
        let names: HashSet<&str> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), table.len());
    }
}

#[test]
fn test_settings_depends_on_revision() {
    let initial = RouteTable::for_revision(Revision::Initial);
    assert_eq!(initial.len(), 3);
    assert!(initial.resolve("/settings").is_none());

    let current = RouteTable::for_revision(Revision::Current);
    assert_eq!(current.len(), 4);
    assert!(current.resolve("/settings").is_some());
}

#[test]
fn test_scan_flow_navigation() {
    // Home → new target scan → results, then back.
    let mut nav = Navigator::new(RouteTable::default(), WebHistory::new("/", "/"));

    let scan = Params::new().with("target", "inheritans.com").with("scanId", "42");
    nav.push(NavigationTarget::named("Target", scan)).unwrap();
    nav.push(NavigationTarget::named("Results", Params::new().with("scanId", "42")))
        .unwrap();
    assert_eq!(nav.location(), "/results/42");

    assert!(nav.back());
    let current = nav.current().unwrap();
    assert_eq!(current.name, "Target");
    assert_eq!(current.params.get("target"), Some("inheritans.com"));
}
