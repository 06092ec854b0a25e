//! Group membership resolution.
//!
//! An `agentGroup` grant points at a group resource whose user-managed
//! statements assert membership. The group identifier as written in the
//! authorization may carry a fragment, query, or trailing slash; the lookup
//! happens at the canonical identifier while membership statements are
//! matched against the identifier as written.

use shale_directory::{DirectoryError, ResourceDirectory};
use shale_types::{Iri, StatementScope, vocab};
use tracing::debug;

/// Returns whether `agent` is a member of the group resource named by
/// `group`.
///
/// An absent group resource means no membership — absence is not an error.
/// Each distinct group referenced by a candidate authorization costs one
/// directory fetch.
pub fn is_group_member(
    directory: &dyn ResourceDirectory,
    group: &Iri,
    agent: &Iri,
) -> Result<bool, DirectoryError> {
    let canonical = canonical_group_id(group);
    let Some(resource) = directory.get(&canonical)? else {
        debug!(group = %group, "group resource not found");
        return Ok(false);
    };

    if !resource.types().contains(&Iri::new(vocab::vcard::GROUP)) {
        debug!(group = %group, "group resource is not typed as a group");
    }

    Ok(resource
        .statements(StatementScope::UserManaged)
        .iter()
        .any(|statement| {
            statement.subject == *group
                && statement.predicate == vocab::vcard::HAS_MEMBER
                && statement.object == *agent
        }))
}

/// Canonicalizes a group identifier for resource lookup: strips the
/// fragment, the query, and a single trailing path separator.
fn canonical_group_id(group: &Iri) -> Iri {
    let mut id = group.as_str();
    if let Some((base, _)) = id.split_once('#') {
        id = base;
    }
    if let Some((base, _)) = id.split_once('?') {
        id = base;
    }
    let id = id.strip_suffix('/').unwrap_or(id);
    Iri::new(id)
}
