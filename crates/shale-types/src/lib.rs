//! # shale-types: Core types for Shale
//!
//! This crate contains shared types used across the Shale system:
//! - Identifiers ([`Iri`])
//! - Access modes ([`AccessMode`])
//! - Statements and statement scopes ([`Statement`], [`StatementScope`])
//! - Request context ([`Session`])
//! - Well-known vocabulary constants ([`vocab`])
//!
//! Everything here is plain, immutable data. Values are constructed fresh
//! per request from externally supplied snapshots; nothing in this crate
//! holds state between requests.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

pub mod vocab;

// ============================================================================
// Iri - opaque resource/agent identifier
// ============================================================================

/// Opaque identifier for a resource, agent, group, class, or predicate.
///
/// Identifiers are compared byte-for-byte; no normalization happens here.
/// Where a component needs a canonical form (e.g. group lookup), it derives
/// one explicitly.
///
/// # Examples
///
/// ```
/// use shale_types::Iri;
///
/// let id = Iri::new("shale:repository/parent/child");
/// assert_eq!(id.as_str(), "shale:repository/parent/child");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Creates an identifier from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.0
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Iri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Iri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// AccessMode
// ============================================================================

/// Access mode requested against a resource.
///
/// The four modes mirror the Web Access Control vocabulary. `Control` is the
/// mode required to read or modify a resource's ACL itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    /// Read the resource.
    Read,
    /// Modify or delete the resource.
    Write,
    /// Add to the resource without modifying existing content.
    Append,
    /// Read or modify the resource's access-control statements.
    Control,
}

impl AccessMode {
    /// All modes, in declaration order. Useful for exhaustive test matrices.
    pub const ALL: [AccessMode; 4] = [
        AccessMode::Read,
        AccessMode::Write,
        AccessMode::Append,
        AccessMode::Control,
    ];

    /// Returns the vocabulary identifier for this mode.
    pub fn as_iri(self) -> Iri {
        Iri::new(match self {
            AccessMode::Read => vocab::acl::READ,
            AccessMode::Write => vocab::acl::WRITE,
            AccessMode::Append => vocab::acl::APPEND,
            AccessMode::Control => vocab::acl::CONTROL,
        })
    }

    /// Maps a vocabulary identifier back to a mode.
    ///
    /// Returns `None` for identifiers outside the mode vocabulary; callers
    /// treat those as unrecognized and skip them.
    pub fn from_iri(iri: &Iri) -> Option<Self> {
        match iri.as_str() {
            vocab::acl::READ => Some(AccessMode::Read),
            vocab::acl::WRITE => Some(AccessMode::Write),
            vocab::acl::APPEND => Some(AccessMode::Append),
            vocab::acl::CONTROL => Some(AccessMode::Control),
            _ => None,
        }
    }
}

impl Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessMode::Read => "Read",
            AccessMode::Write => "Write",
            AccessMode::Append => "Append",
            AccessMode::Control => "Control",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Statement
// ============================================================================

/// Scope a statement is attached under.
///
/// Access-control statements describe the resource's ACL; user-managed
/// statements are ordinary content (including group membership assertions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementScope {
    /// Statements describing the resource's access-control list.
    AccessControl,
    /// Ordinary, user-managed statements.
    UserManaged,
}

/// A single subject–predicate–object statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    /// The entity the statement is about.
    pub subject: Iri,
    /// The relation being asserted.
    pub predicate: Iri,
    /// The value of the relation.
    pub object: Iri,
}

impl Statement {
    /// Creates a statement from any identifier-like values.
    ///
    /// # Examples
    ///
    /// ```
    /// use shale_types::{Statement, vocab};
    ///
    /// let statement = Statement::new(
    ///     "shale:repository/acl/auth1",
    ///     vocab::rdf::TYPE,
    ///     vocab::acl::AUTHORIZATION,
    /// );
    /// assert_eq!(statement.predicate.as_str(), vocab::rdf::TYPE);
    /// ```
    pub fn new(subject: impl Into<Iri>, predicate: impl Into<Iri>, object: impl Into<Iri>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Per-request identity context.
///
/// A session carries the acting agent and, when the agent acts on behalf of
/// another principal, the identity that delegated the action. Delegated
/// sessions are only as powerful as the authorizations that explicitly name
/// the delegating principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    agent: Iri,
    delegated_by: Option<Iri>,
}

impl Session {
    /// Creates a session for the given agent, with no delegation.
    pub fn new(agent: impl Into<Iri>) -> Self {
        Self {
            agent: agent.into(),
            delegated_by: None,
        }
    }

    /// Marks this session as acting on behalf of another principal.
    ///
    /// This is a builder method that takes ownership and returns `self`
    /// for chaining.
    pub fn with_delegated_by(mut self, principal: impl Into<Iri>) -> Self {
        self.delegated_by = Some(principal.into());
        self
    }

    /// Returns the acting agent.
    pub fn agent(&self) -> &Iri {
        &self.agent
    }

    /// Returns the delegating principal, if any.
    pub fn delegated_by(&self) -> Option<&Iri> {
        self.delegated_by.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iri_compares_against_str() {
        let id = Iri::new("info:user/bseeger");
        assert_eq!(id, "info:user/bseeger");
        assert_ne!(id, "info:user/acoburn");
    }

    #[test]
    fn access_mode_iri_round_trip() {
        for mode in AccessMode::ALL {
            assert_eq!(AccessMode::from_iri(&mode.as_iri()), Some(mode));
        }
    }

    #[test]
    fn access_mode_rejects_unknown_iri() {
        let unknown = Iri::new("http://example.com/ns#Teleport");
        assert_eq!(AccessMode::from_iri(&unknown), None);
    }

    #[test]
    fn session_delegation_builder() {
        let session = Session::new("info:user/agent").with_delegated_by("info:user/acoburn");
        assert_eq!(session.agent(), &Iri::new("info:user/agent"));
        assert_eq!(session.delegated_by(), Some(&Iri::new("info:user/acoburn")));

        let plain = Session::new("info:user/agent");
        assert_eq!(plain.delegated_by(), None);
    }

    #[test]
    fn iri_serde_is_transparent() {
        let id = Iri::new("shale:repository/parent");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"shale:repository/parent\"");
        let back: Iri = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
