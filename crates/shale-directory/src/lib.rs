//! shale-directory: Resource lookup boundary for Shale
//!
//! The decision engine never talks to storage directly. It sees resources
//! through the [`ResourceDirectory`] trait, which hands back immutable
//! [`Resource`] snapshots, and (optionally) identities through the
//! [`AgentDirectory`] trait. Lookups distinguish *absence* (`Ok(None)`,
//! which the engine folds into denial) from *backend failure*
//! (`Err(DirectoryError)`, which propagates to the caller).
//!
//! [`MemoryDirectory`] is the in-process implementation used by tests and
//! embedders that already hold their repository in memory.
//!
//! # Example
//!
//! ```
//! use shale_directory::{MemoryDirectory, Resource, ResourceDirectory};
//! use shale_types::Iri;
//!
//! let directory = MemoryDirectory::new()
//!     .with_resource(Resource::new("shale:repository"))
//!     .with_resource(
//!         Resource::new("shale:repository/parent")
//!             .with_container("shale:repository"),
//!     );
//!
//! let parent = directory.get(&Iri::new("shale:repository/parent")).unwrap();
//! assert!(parent.is_some());
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use shale_types::{Iri, Statement, StatementScope};

/// Errors raised by a directory backend.
///
/// A `DirectoryError` signals a broken dependency, not an absence of data;
/// the decision engine propagates it instead of treating it as denial.
#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    /// The backend failed while fetching a resource or its statements.
    #[error("directory backend failure: {0}")]
    Backend(String),
}

// ============================================================================
// Resource Snapshot
// ============================================================================

/// Read-only view of a repository resource.
///
/// Snapshots are immutable: the engine never mutates a resource, and a
/// directory hands out a fresh snapshot per lookup. A resource has at most
/// one container; the repository root has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    identifier: Iri,
    acl: Option<Iri>,
    container: Option<Iri>,
    types: HashSet<Iri>,
    access_control: Vec<Statement>,
    user_managed: Vec<Statement>,
}

impl Resource {
    /// Creates an empty resource snapshot with the given identifier.
    pub fn new(identifier: impl Into<Iri>) -> Self {
        Self {
            identifier: identifier.into(),
            acl: None,
            container: None,
            types: HashSet::new(),
            access_control: Vec::new(),
            user_managed: Vec::new(),
        }
    }

    /// Attaches an ACL reference to this resource.
    ///
    /// This is a builder method that takes ownership and returns `self`
    /// for chaining.
    pub fn with_acl(mut self, acl: impl Into<Iri>) -> Self {
        self.acl = Some(acl.into());
        self
    }

    /// Sets this resource's container.
    pub fn with_container(mut self, container: impl Into<Iri>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Adds a semantic type to this resource.
    pub fn with_type(mut self, ty: impl Into<Iri>) -> Self {
        self.types.insert(ty.into());
        self
    }

    /// Adds a statement under the given scope.
    pub fn with_statement(mut self, scope: StatementScope, statement: Statement) -> Self {
        match scope {
            StatementScope::AccessControl => self.access_control.push(statement),
            StatementScope::UserManaged => self.user_managed.push(statement),
        }
        self
    }

    /// Returns this resource's identifier.
    pub fn identifier(&self) -> &Iri {
        &self.identifier
    }

    /// Returns the identifier of this resource's ACL, if one is attached.
    pub fn acl(&self) -> Option<&Iri> {
        self.acl.as_ref()
    }

    /// Returns whether this resource carries its own ACL.
    pub fn has_acl(&self) -> bool {
        self.acl.is_some()
    }

    /// Returns this resource's container, or `None` for the root.
    pub fn container(&self) -> Option<&Iri> {
        self.container.as_ref()
    }

    /// Returns this resource's semantic types.
    pub fn types(&self) -> &HashSet<Iri> {
        &self.types
    }

    /// Returns the statements attached under the given scope.
    pub fn statements(&self, scope: StatementScope) -> &[Statement] {
        match scope {
            StatementScope::AccessControl => &self.access_control,
            StatementScope::UserManaged => &self.user_managed,
        }
    }
}

// ============================================================================
// Lookup Traits
// ============================================================================

/// Read-only lookup of resources and their containment.
///
/// Implementations must be safe to share across threads; the engine holds
/// one instance for its lifetime and issues concurrent lookups against it.
pub trait ResourceDirectory: Send + Sync {
    /// Returns the resource at `identifier`, or `None` if absent.
    fn get(&self, identifier: &Iri) -> Result<Option<Resource>, DirectoryError>;

    /// Returns the container of `identifier`, or `None` at the root.
    ///
    /// Containment must be answerable for identifiers that do not (yet)
    /// exist as resources, so that policy for a to-be-created resource can
    /// be resolved from its ancestors.
    fn container_of(&self, identifier: &Iri) -> Result<Option<Iri>, DirectoryError>;
}

/// Optional identity collaborator.
///
/// Provides an administrative flag and an agent-to-groups mapping as an
/// alternative to resolving group membership through group resources.
pub trait AgentDirectory: Send + Sync {
    /// Returns whether the agent is administrative.
    fn is_admin(&self, agent: &Iri) -> bool;

    /// Returns the groups the agent belongs to.
    fn groups(&self, agent: &Iri) -> Vec<Iri>;
}

// ============================================================================
// In-Memory Directory
// ============================================================================

/// In-memory [`ResourceDirectory`] over path-shaped identifiers.
///
/// Containment for stored resources comes from their snapshots; for unknown
/// identifiers it is derived from the identifier path (everything before the
/// final `/`), so a lookup on a never-created child still resolves to its
/// ancestor chain.
///
/// # Thread Safety
///
/// `MemoryDirectory` is `Clone` and can be shared across threads. It's
/// typically built once at startup and handed to the evaluator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDirectory {
    resources: HashMap<Iri, Resource>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource snapshot.
    ///
    /// This is a builder method that takes ownership and returns `self`
    /// for chaining.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.insert(resource);
        self
    }

    /// Adds or replaces a resource snapshot.
    pub fn insert(&mut self, resource: Resource) {
        self.resources.insert(resource.identifier().clone(), resource);
    }

    /// Derives the path container of an identifier.
    fn path_container(identifier: &Iri) -> Option<Iri> {
        identifier
            .as_str()
            .rsplit_once('/')
            .map(|(parent, _)| Iri::new(parent))
    }
}

impl ResourceDirectory for MemoryDirectory {
    fn get(&self, identifier: &Iri) -> Result<Option<Resource>, DirectoryError> {
        Ok(self.resources.get(identifier).cloned())
    }

    fn container_of(&self, identifier: &Iri) -> Result<Option<Iri>, DirectoryError> {
        // A stored snapshot is authoritative, including "no container" for
        // the root. Unknown identifiers fall back to path derivation.
        match self.resources.get(identifier) {
            Some(resource) => Ok(resource.container().cloned()),
            None => Ok(Self::path_container(identifier)),
        }
    }
}

/// In-memory [`AgentDirectory`] backed by explicit admin and group tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryAgentDirectory {
    admins: HashSet<Iri>,
    groups: HashMap<Iri, Vec<Iri>>,
}

impl MemoryAgentDirectory {
    /// Creates an empty agent directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an agent as administrative.
    pub fn with_admin(mut self, agent: impl Into<Iri>) -> Self {
        self.admins.insert(agent.into());
        self
    }

    /// Records that an agent belongs to a group.
    pub fn with_group(mut self, agent: impl Into<Iri>, group: impl Into<Iri>) -> Self {
        self.groups.entry(agent.into()).or_default().push(group.into());
        self
    }
}

impl AgentDirectory for MemoryAgentDirectory {
    fn is_admin(&self, agent: &Iri) -> bool {
        self.admins.contains(agent)
    }

    fn groups(&self, agent: &Iri) -> Vec<Iri> {
        self.groups.get(agent).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
