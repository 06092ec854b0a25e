//! Authorization records and statement parsing.
//!
//! An ACL's access-control statements are grouped by subject; every subject
//! carrying an explicit `rdf:type acl:Authorization` statement becomes an
//! [`Authorization`] record. Subjects without the type statement are silently
//! dropped (they are not errors; an ACL may hold unrelated records).
//!
//! Parsing is a pure function over a statement slice: there is no shared
//! parser instance and no state between calls.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use shale_types::{AccessMode, Iri, Statement, vocab};

/// A policy record granting access modes to identities over target resources.
///
/// All sets are unordered with unique membership; duplicate statements never
/// produce duplicate entries. A partially-formed authorization (say, an
/// agent but no mode) is still constructed — it simply never satisfies a
/// mode filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    identifier: Iri,
    modes: HashSet<AccessMode>,
    agents: HashSet<Iri>,
    agent_groups: HashSet<Iri>,
    agent_classes: HashSet<Iri>,
    access_to: HashSet<Iri>,
    defaults: HashSet<Iri>,
}

impl Authorization {
    /// Aggregates one subject's statements into an authorization record.
    fn from_statements(identifier: Iri, statements: &[&Statement]) -> Self {
        let mut authorization = Self {
            identifier,
            modes: HashSet::new(),
            agents: HashSet::new(),
            agent_groups: HashSet::new(),
            agent_classes: HashSet::new(),
            access_to: HashSet::new(),
            defaults: HashSet::new(),
        };

        for statement in statements {
            let object = &statement.object;
            match statement.predicate.as_str() {
                vocab::acl::MODE => {
                    // Objects outside the mode vocabulary are unrecognized
                    // and skipped rather than rejected.
                    if let Some(mode) = AccessMode::from_iri(object) {
                        authorization.modes.insert(mode);
                    }
                }
                vocab::acl::AGENT => {
                    authorization.agents.insert(object.clone());
                }
                vocab::acl::AGENT_GROUP => {
                    authorization.agent_groups.insert(object.clone());
                }
                vocab::acl::AGENT_CLASS => {
                    authorization.agent_classes.insert(object.clone());
                }
                vocab::acl::ACCESS_TO => {
                    authorization.access_to.insert(object.clone());
                }
                vocab::acl::DEFAULT => {
                    authorization.defaults.insert(object.clone());
                }
                _ => {}
            }
        }

        authorization
    }

    /// Returns this authorization's identifier.
    pub fn identifier(&self) -> &Iri {
        &self.identifier
    }

    /// Returns the granted access modes.
    pub fn modes(&self) -> &HashSet<AccessMode> {
        &self.modes
    }

    /// Returns the explicitly named agents.
    pub fn agents(&self) -> &HashSet<Iri> {
        &self.agents
    }

    /// Returns the granted groups.
    pub fn agent_groups(&self) -> &HashSet<Iri> {
        &self.agent_groups
    }

    /// Returns the granted agent classes.
    pub fn agent_classes(&self) -> &HashSet<Iri> {
        &self.agent_classes
    }

    /// Returns the resources this authorization applies to directly.
    pub fn access_to(&self) -> &HashSet<Iri> {
        &self.access_to
    }

    /// Returns the resources whose descendants inherit this authorization.
    pub fn defaults(&self) -> &HashSet<Iri> {
        &self.defaults
    }

    /// Returns whether the given mode is granted.
    pub fn grants_mode(&self, mode: AccessMode) -> bool {
        self.modes.contains(&mode)
    }

    /// Returns whether this authorization directly targets `resource`.
    pub fn applies_directly_to(&self, resource: &Iri) -> bool {
        self.access_to.contains(resource)
    }

    /// Returns whether this authorization propagates to descendants of
    /// `ancestor`.
    ///
    /// Propagation requires an explicit `default` entry; an `accessTo`
    /// match on the ancestor is deliberately not enough.
    pub fn propagates_from(&self, ancestor: &Iri) -> bool {
        self.defaults.contains(ancestor)
    }
}

/// Parses an access-control statement set into authorization records.
///
/// Statements are grouped by subject; only subjects typed as
/// `acl:Authorization` are retained. The result is sorted by identifier for
/// stable diagnostics, but callers must treat it as an unordered set.
pub fn parse_authorizations(statements: &[Statement]) -> Vec<Authorization> {
    let mut by_subject: HashMap<&Iri, Vec<&Statement>> = HashMap::new();
    for statement in statements {
        by_subject.entry(&statement.subject).or_default().push(statement);
    }

    let mut authorizations: Vec<Authorization> = by_subject
        .into_iter()
        .filter(|(_, group)| {
            group.iter().any(|statement| {
                statement.predicate == vocab::rdf::TYPE
                    && statement.object == vocab::acl::AUTHORIZATION
            })
        })
        .map(|(subject, group)| Authorization::from_statements(subject.clone(), &group))
        .collect();

    authorizations.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    authorizations
}
