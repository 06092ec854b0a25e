//! Well-known vocabulary identifiers.
//!
//! Collaborators and the decision engine agree on these constants; nothing
//! else in the system interprets identifier strings. The namespaces follow
//! the public Web Access Control, RDF, FOAF, and vCard vocabularies.

/// The well-known administrator identity.
///
/// Sessions presenting this agent bypass policy evaluation entirely.
pub const ADMINISTRATOR: &str = "shale:administrator";

/// Web Access Control vocabulary.
pub mod acl {
    /// Namespace prefix shared by every access-control predicate and value.
    pub const NS: &str = "http://www.w3.org/ns/auth/acl#";

    /// Type marker identifying a statement subject as an authorization.
    pub const AUTHORIZATION: &str = "http://www.w3.org/ns/auth/acl#Authorization";

    /// Predicate granting an access mode.
    pub const MODE: &str = "http://www.w3.org/ns/auth/acl#mode";
    /// Predicate naming an agent granted access.
    pub const AGENT: &str = "http://www.w3.org/ns/auth/acl#agent";
    /// Predicate naming a group whose members are granted access.
    pub const AGENT_GROUP: &str = "http://www.w3.org/ns/auth/acl#agentGroup";
    /// Predicate naming a class of agents granted access.
    pub const AGENT_CLASS: &str = "http://www.w3.org/ns/auth/acl#agentClass";
    /// Predicate naming a resource the authorization applies to directly.
    pub const ACCESS_TO: &str = "http://www.w3.org/ns/auth/acl#accessTo";
    /// Predicate naming a resource whose descendants inherit the authorization.
    pub const DEFAULT: &str = "http://www.w3.org/ns/auth/acl#default";

    /// The Read mode.
    pub const READ: &str = "http://www.w3.org/ns/auth/acl#Read";
    /// The Write mode.
    pub const WRITE: &str = "http://www.w3.org/ns/auth/acl#Write";
    /// The Append mode.
    pub const APPEND: &str = "http://www.w3.org/ns/auth/acl#Append";
    /// The Control mode.
    pub const CONTROL: &str = "http://www.w3.org/ns/auth/acl#Control";
}

/// RDF core vocabulary.
pub mod rdf {
    /// The `rdf:type` predicate.
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// FOAF vocabulary.
pub mod foaf {
    /// The class of all agents; an `agentClass` grant to this class is public.
    pub const AGENT: &str = "http://xmlns.com/foaf/0.1/Agent";
}

/// vCard vocabulary.
pub mod vcard {
    /// Type marker for group resources.
    pub const GROUP: &str = "http://www.w3.org/2006/vcard/ns#Group";
    /// Predicate asserting group membership.
    pub const HAS_MEMBER: &str = "http://www.w3.org/2006/vcard/ns#hasMember";
}
