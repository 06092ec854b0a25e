//! Ancestor-chain resolution.
//!
//! Policy lookups walk a resource's containment chain: self, then container,
//! then the container's container, up to the root. The repository is
//! expected to be cycle-free, but the walk does not assume it — malformed
//! containment (a cycle, or a chain deeper than [`MAX_WALK_DEPTH`]) is
//! reported as a [`HierarchyError`] rather than looping or silently denying.
//!
//! Absence is not an error: a chain that runs out without a match resolves
//! to `Ok(None)`, and the evaluator folds that into "no policy applies".

use std::collections::HashSet;

use shale_directory::{DirectoryError, Resource, ResourceDirectory};
use shale_types::Iri;
use tracing::debug;

/// Upper bound on containment-chain traversal.
pub const MAX_WALK_DEPTH: usize = 64;

/// Errors from walking a containment chain.
#[derive(thiserror::Error, Debug)]
pub enum HierarchyError {
    /// The directory backend failed mid-walk.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The same identifier appeared twice along one chain.
    #[error("containment cycle detected at {0}")]
    CycleDetected(Iri),

    /// The chain exceeded [`MAX_WALK_DEPTH`] levels.
    #[error("ancestor chain from {start} exceeded {limit} levels")]
    DepthExceeded { start: Iri, limit: usize },
}

/// Finds the nearest existing resource for a possibly-nonexistent identifier.
///
/// Returns the resource at `identifier` when present; otherwise follows
/// containment upward and returns the first existing ancestor. `Ok(None)`
/// means the chain was exhausted without finding anything.
pub fn nearest_resource(
    directory: &dyn ResourceDirectory,
    identifier: &Iri,
) -> Result<Option<Resource>, HierarchyError> {
    walk(directory, identifier, |_| true)
}

/// Finds the nearest resource (inclusive) that carries its own ACL.
pub fn nearest_acl_bearer(
    directory: &dyn ResourceDirectory,
    identifier: &Iri,
) -> Result<Option<Resource>, HierarchyError> {
    walk(directory, identifier, Resource::has_acl)
}

fn walk(
    directory: &dyn ResourceDirectory,
    identifier: &Iri,
    accept: fn(&Resource) -> bool,
) -> Result<Option<Resource>, HierarchyError> {
    let mut visited: HashSet<Iri> = HashSet::new();
    let mut current = identifier.clone();

    for _ in 0..MAX_WALK_DEPTH {
        if !visited.insert(current.clone()) {
            return Err(HierarchyError::CycleDetected(current));
        }

        if let Some(resource) = directory.get(&current)? {
            if accept(&resource) {
                return Ok(Some(resource));
            }
        }

        match directory.container_of(&current)? {
            Some(container) => current = container,
            None => {
                debug!(start = %identifier, "containment chain exhausted");
                return Ok(None);
            }
        }
    }

    Err(HierarchyError::DepthExceeded {
        start: identifier.clone(),
        limit: MAX_WALK_DEPTH,
    })
}

#[cfg(test)]
mod tests {
    use shale_directory::MemoryDirectory;

    use super::*;

    #[test]
    fn existing_resource_is_its_own_nearest() {
        let directory =
            MemoryDirectory::new().with_resource(Resource::new("shale:repository/parent"));

        let found = nearest_resource(&directory, &Iri::new("shale:repository/parent"))
            .unwrap()
            .unwrap();
        assert_eq!(found.identifier(), &Iri::new("shale:repository/parent"));
    }

    #[test]
    fn missing_resource_resolves_to_nearest_ancestor() {
        let directory =
            MemoryDirectory::new().with_resource(Resource::new("shale:repository/parent"));

        let found = nearest_resource(
            &directory,
            &Iri::new("shale:repository/parent/child/resource"),
        )
        .unwrap()
        .unwrap();
        assert_eq!(found.identifier(), &Iri::new("shale:repository/parent"));
    }

    #[test]
    fn exhausted_chain_resolves_to_none() {
        let directory = MemoryDirectory::new();
        let found = nearest_resource(&directory, &Iri::new("shale:repository/missing")).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn acl_bearer_walks_past_acl_less_resources() {
        let directory = MemoryDirectory::new()
            .with_resource(Resource::new("shale:repository").with_acl("shale:repository?ext=acl"))
            .with_resource(
                Resource::new("shale:repository/parent").with_container("shale:repository"),
            );

        let bearer = nearest_acl_bearer(&directory, &Iri::new("shale:repository/parent/child"))
            .unwrap()
            .unwrap();
        assert_eq!(bearer.identifier(), &Iri::new("shale:repository"));
    }

    #[test]
    fn acl_bearer_is_inclusive() {
        let directory = MemoryDirectory::new().with_resource(
            Resource::new("shale:repository/parent").with_acl("shale:repository/parent?ext=acl"),
        );

        let bearer = nearest_acl_bearer(&directory, &Iri::new("shale:repository/parent"))
            .unwrap()
            .unwrap();
        assert_eq!(bearer.identifier(), &Iri::new("shale:repository/parent"));
    }

    #[test]
    fn containment_cycle_is_an_error() {
        let directory = MemoryDirectory::new()
            .with_resource(Resource::new("shale:a").with_container("shale:b"))
            .with_resource(Resource::new("shale:b").with_container("shale:a"));

        let result = nearest_acl_bearer(&directory, &Iri::new("shale:a"));
        assert!(matches!(result, Err(HierarchyError::CycleDetected(_))));
    }

    #[test]
    fn over_deep_chain_is_an_error() {
        // A path with more segments than the walk bound, none of them stored.
        let deep = format!("shale:repository/{}", vec!["x"; MAX_WALK_DEPTH + 4].join("/"));
        let directory = MemoryDirectory::new();

        let result = nearest_resource(&directory, &Iri::new(deep));
        assert!(matches!(result, Err(HierarchyError::DepthExceeded { .. })));
    }
}
