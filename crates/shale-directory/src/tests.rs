//! Unit tests for shale-directory

use shale_types::{Iri, Statement, StatementScope, vocab};
use test_case::test_case;

use crate::{
    AgentDirectory, MemoryAgentDirectory, MemoryDirectory, Resource, ResourceDirectory,
};

// ============================================================================
// Resource Snapshot Tests
// ============================================================================

#[test]
fn empty_resource_has_no_acl() {
    let resource = Resource::new("shale:repository/thing");
    assert!(!resource.has_acl());
    assert_eq!(resource.acl(), None);
    assert_eq!(resource.container(), None);
    assert!(resource.types().is_empty());
}

#[test]
fn builder_sets_acl_container_and_types() {
    let resource = Resource::new("shale:repository/parent/child")
        .with_acl("shale:repository/parent/child?ext=acl")
        .with_container("shale:repository/parent")
        .with_type(vocab::vcard::GROUP);

    assert!(resource.has_acl());
    assert_eq!(
        resource.acl(),
        Some(&Iri::new("shale:repository/parent/child?ext=acl"))
    );
    assert_eq!(
        resource.container(),
        Some(&Iri::new("shale:repository/parent"))
    );
    assert!(resource.types().contains(&Iri::new(vocab::vcard::GROUP)));
}

#[test]
fn statements_are_kept_per_scope() {
    let acl_statement = Statement::new("a", vocab::rdf::TYPE, vocab::acl::AUTHORIZATION);
    let member_statement = Statement::new("g", vocab::vcard::HAS_MEMBER, "info:user/acoburn");

    let resource = Resource::new("shale:repository/thing")
        .with_statement(StatementScope::AccessControl, acl_statement.clone())
        .with_statement(StatementScope::UserManaged, member_statement.clone());

    assert_eq!(
        resource.statements(StatementScope::AccessControl),
        &[acl_statement]
    );
    assert_eq!(
        resource.statements(StatementScope::UserManaged),
        &[member_statement]
    );
}

// ============================================================================
// MemoryDirectory Tests
// ============================================================================

#[test]
fn get_returns_stored_snapshot() {
    let directory = MemoryDirectory::new()
        .with_resource(Resource::new("shale:repository/parent").with_container("shale:repository"));

    let found = directory.get(&Iri::new("shale:repository/parent")).unwrap();
    assert_eq!(
        found.as_ref().map(Resource::identifier),
        Some(&Iri::new("shale:repository/parent"))
    );
}

#[test]
fn get_returns_none_for_unknown_identifier() {
    let directory = MemoryDirectory::new();
    let found = directory.get(&Iri::new("shale:repository/missing")).unwrap();
    assert!(found.is_none());
}

#[test]
fn insert_replaces_existing_snapshot() {
    let mut directory = MemoryDirectory::new();
    directory.insert(Resource::new("shale:repository/thing"));
    directory.insert(Resource::new("shale:repository/thing").with_acl("shale:acl/thing"));

    let found = directory
        .get(&Iri::new("shale:repository/thing"))
        .unwrap()
        .unwrap();
    assert!(found.has_acl());
}

#[test]
fn stored_container_is_authoritative() {
    // Explicit container wins over what the path would suggest.
    let directory = MemoryDirectory::new().with_resource(
        Resource::new("shale:repository/alias/thing").with_container("shale:repository/actual"),
    );

    let container = directory
        .container_of(&Iri::new("shale:repository/alias/thing"))
        .unwrap();
    assert_eq!(container, Some(Iri::new("shale:repository/actual")));
}

#[test]
fn stored_root_has_no_container() {
    let directory = MemoryDirectory::new().with_resource(Resource::new("shale:repository"));
    let container = directory.container_of(&Iri::new("shale:repository")).unwrap();
    assert_eq!(container, None);
}

#[test_case("shale:repository/parent/child", Some("shale:repository/parent"); "nested path")]
#[test_case("shale:repository/parent", Some("shale:repository"); "single level")]
#[test_case("shale:repository", None; "no separator")]
fn unknown_identifier_container_derives_from_path(identifier: &str, expected: Option<&str>) {
    let directory = MemoryDirectory::new();
    let container = directory.container_of(&Iri::new(identifier)).unwrap();
    assert_eq!(container, expected.map(Iri::new));
}

// ============================================================================
// MemoryAgentDirectory Tests
// ============================================================================

#[test]
fn agent_directory_admin_flag() {
    let agents = MemoryAgentDirectory::new().with_admin("info:user/root");
    assert!(agents.is_admin(&Iri::new("info:user/root")));
    assert!(!agents.is_admin(&Iri::new("info:user/bseeger")));
}

#[test]
fn agent_directory_group_listing() {
    let agents = MemoryAgentDirectory::new()
        .with_group("info:user/acoburn", "info:group/test")
        .with_group("info:user/acoburn", "info:group/other");

    let groups = agents.groups(&Iri::new("info:user/acoburn"));
    assert_eq!(groups.len(), 2);
    assert!(groups.contains(&Iri::new("info:group/test")));

    assert!(agents.groups(&Iri::new("info:user/bseeger")).is_empty());
}

// ============================================================================
// Property-Based Tests
// ============================================================================

use proptest::prelude::*;

proptest! {
    /// Property: a stored snapshot always comes back intact.
    #[test]
    fn prop_stored_snapshot_round_trips(
        segments in prop::collection::vec("[a-z]{1,8}", 1..5),
    ) {
        let identifier = format!("shale:repository/{}", segments.join("/"));
        let resource = Resource::new(identifier.as_str());
        let directory = MemoryDirectory::new().with_resource(resource.clone());

        let found = directory.get(&Iri::new(identifier.as_str())).unwrap();
        prop_assert_eq!(found, Some(resource));
    }

    /// Property: path-derived containment chains always terminate.
    #[test]
    fn prop_path_containment_terminates(
        segments in prop::collection::vec("[a-z]{1,8}", 0..8),
    ) {
        let directory = MemoryDirectory::new();
        let mut current = Iri::new(format!("shale:repository/{}", segments.join("/")));
        let mut hops = 0usize;

        while let Some(parent) = directory.container_of(&current).unwrap() {
            current = parent;
            hops += 1;
            prop_assert!(hops <= segments.len() + 2, "containment chain did not shrink");
        }
    }
}
