//! Access decision evaluation.
//!
//! [`AccessEvaluator`] answers "may this session perform this mode on this
//! resource". One ACL governs each decision: the nearest one found by
//! walking the resource's containment chain. Authorizations from a directly
//! attached ACL apply through their `accessTo` targets; authorizations
//! reached from a descendant apply only through their `default` targets —
//! there is no fallback from one to the other.
//!
//! Decisions fail closed: a missing resource, a chain without any ACL, or an
//! authorization set that nothing matches all yield `Ok(false)`. Directory
//! faults and malformed containment propagate as [`AccessError`] instead of
//! being folded into denial.

use std::collections::HashSet;
use std::sync::Arc;

use shale_directory::{AgentDirectory, DirectoryError, Resource, ResourceDirectory};
use shale_types::{AccessMode, Iri, Session, StatementScope, vocab};
use tracing::{debug, info, warn};

use crate::authorization::{Authorization, parse_authorizations};
use crate::groups;
use crate::hierarchy::{self, HierarchyError, MAX_WALK_DEPTH};

/// Errors surfaced by the decision API.
///
/// Every variant signals a broken collaborator or malformed repository, not
/// a negative decision; negative decisions are `Ok(false)`.
#[derive(thiserror::Error, Debug)]
pub enum AccessError {
    /// The containment walk failed (backend fault, cycle, or depth).
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// A direct directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// The access-control decision engine.
///
/// The evaluator owns no state beyond its collaborators and performs no
/// caching: every decision re-reads the directory, so concurrent decisions
/// are independent and safe.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use shale_acl::AccessEvaluator;
/// use shale_directory::{MemoryDirectory, Resource};
/// use shale_types::{Iri, Session, Statement, StatementScope, vocab};
///
/// let directory = MemoryDirectory::new().with_resource(
///     Resource::new("shale:repository")
///         .with_acl("shale:repository?ext=acl")
///         .with_statement(
///             StatementScope::AccessControl,
///             Statement::new("auth", vocab::rdf::TYPE, vocab::acl::AUTHORIZATION),
///         )
///         .with_statement(
///             StatementScope::AccessControl,
///             Statement::new("auth", vocab::acl::AGENT, "info:user/bseeger"),
///         )
///         .with_statement(
///             StatementScope::AccessControl,
///             Statement::new("auth", vocab::acl::MODE, vocab::acl::READ),
///         )
///         .with_statement(
///             StatementScope::AccessControl,
///             Statement::new("auth", vocab::acl::ACCESS_TO, "shale:repository"),
///         ),
/// );
///
/// let evaluator = AccessEvaluator::new(Arc::new(directory)).without_audit();
/// let session = Session::new("info:user/bseeger");
///
/// assert!(evaluator.can_read(&session, &Iri::new("shale:repository"))?);
/// assert!(!evaluator.can_write(&session, &Iri::new("shale:repository"))?);
/// # Ok::<(), shale_acl::AccessError>(())
/// ```
pub struct AccessEvaluator {
    directory: Arc<dyn ResourceDirectory>,
    agents: Option<Arc<dyn AgentDirectory>>,

    /// Whether to log decisions.
    audit_enabled: bool,
}

impl AccessEvaluator {
    /// Creates an evaluator over the given resource directory.
    pub fn new(directory: Arc<dyn ResourceDirectory>) -> Self {
        Self {
            directory,
            agents: None,
            audit_enabled: true,
        }
    }

    /// Attaches an identity collaborator.
    ///
    /// The agent directory contributes an administrative flag and an
    /// agent-to-groups mapping, both OR-combined with the built-in paths.
    pub fn with_agent_directory(mut self, agents: Arc<dyn AgentDirectory>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Disables decision logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Returns whether the session may read the resource.
    pub fn can_read(&self, session: &Session, resource: &Iri) -> Result<bool, AccessError> {
        self.check(session, resource, AccessMode::Read)
    }

    /// Returns whether the session may write the resource.
    pub fn can_write(&self, session: &Session, resource: &Iri) -> Result<bool, AccessError> {
        self.check(session, resource, AccessMode::Write)
    }

    /// Returns whether the session may append to the resource.
    pub fn can_append(&self, session: &Session, resource: &Iri) -> Result<bool, AccessError> {
        self.check(session, resource, AccessMode::Append)
    }

    /// Returns whether the session may control the resource's ACL.
    pub fn can_control(&self, session: &Session, resource: &Iri) -> Result<bool, AccessError> {
        self.check(session, resource, AccessMode::Control)
    }

    /// Decides whether the session may perform `mode` on `resource`.
    ///
    /// Administrators bypass evaluation entirely. Otherwise the governing
    /// authorization set is resolved and filtered: authorizations that do
    /// not name the delegating principal are discarded first, then the
    /// session must match by agent class, direct agent, or group
    /// membership, and the requested mode must be granted. A single match
    /// suffices.
    pub fn check(
        &self,
        session: &Session,
        resource: &Iri,
        mode: AccessMode,
    ) -> Result<bool, AccessError> {
        if self.is_administrator(session.agent()) {
            if self.audit_enabled {
                info!(agent = %session.agent(), resource = %resource, %mode, "administrator bypass");
            }
            return Ok(true);
        }

        let authorizations = self.applicable_authorizations(resource)?;
        let service_groups = self
            .agents
            .as_deref()
            .map(|agents| agents.groups(session.agent()))
            .unwrap_or_default();

        let mut granted = false;
        for authorization in &authorizations {
            if !delegate_admitted(authorization, session) {
                continue;
            }
            if !authorization.grants_mode(mode) {
                continue;
            }
            if self.identity_matches(authorization, session, &service_groups)? {
                debug!(authorization = %authorization.identifier(), "matching authorization");
                granted = true;
                break;
            }
        }

        if self.audit_enabled {
            if granted {
                info!(agent = %session.agent(), resource = %resource, %mode, "access granted");
            } else {
                warn!(agent = %session.agent(), resource = %resource, %mode, "access denied");
            }
        }

        Ok(granted)
    }

    /// Returns the identifier of the nearest ACL governing `identifier`.
    pub fn find_acl_for(&self, identifier: &Iri) -> Result<Option<Iri>, AccessError> {
        Ok(hierarchy::nearest_acl_bearer(self.directory.as_ref(), identifier)?
            .and_then(|resource| resource.acl().cloned()))
    }

    /// Returns the nearest resource (inclusive) that carries its own ACL.
    pub fn find_ancestor_with_access_control(
        &self,
        identifier: &Iri,
    ) -> Result<Option<Resource>, AccessError> {
        Ok(hierarchy::nearest_acl_bearer(self.directory.as_ref(), identifier)?)
    }

    /// Parses the authorization records attached to the resource at
    /// `identifier`.
    ///
    /// An absent resource yields an empty set. No target filtering happens
    /// here; this is the raw parsed content of one ACL.
    pub fn authorizations(&self, identifier: &Iri) -> Result<Vec<Authorization>, AccessError> {
        let Some(resource) = self.directory.get(identifier)? else {
            return Ok(Vec::new());
        };
        Ok(parse_authorizations(
            resource.statements(StatementScope::AccessControl),
        ))
    }

    /// Resolves the authorization set governing `identifier`.
    ///
    /// The walk starts at the nearest existing resource (a nonexistent
    /// identifier degrades to its nearest ancestor, still treated as the
    /// direct case) and climbs until it finds an ACL. A directly attached
    /// ACL contributes authorizations whose `accessTo` names the resource;
    /// an inherited ACL contributes authorizations whose `default` names
    /// the ACL-bearing ancestor. Whatever that nearest ACL yields — even an
    /// empty set — is the final answer for this decision.
    fn applicable_authorizations(&self, identifier: &Iri) -> Result<Vec<Authorization>, AccessError> {
        let Some(mut current) = hierarchy::nearest_resource(self.directory.as_ref(), identifier)?
        else {
            debug!(resource = %identifier, "no resource along the containment chain");
            return Ok(Vec::new());
        };

        let mut top = true;
        let mut visited: HashSet<Iri> = HashSet::new();

        for _ in 0..MAX_WALK_DEPTH {
            if !visited.insert(current.identifier().clone()) {
                return Err(
                    HierarchyError::CycleDetected(current.identifier().clone()).into(),
                );
            }

            if current.has_acl() {
                debug!(resource = %current.identifier(), top, "found governing ACL");
                let authorizations =
                    parse_authorizations(current.statements(StatementScope::AccessControl));
                let scope = current.identifier();
                return Ok(authorizations
                    .into_iter()
                    .filter(|authorization| {
                        if top {
                            authorization.applies_directly_to(scope)
                        } else {
                            authorization.propagates_from(scope)
                        }
                    })
                    .collect());
            }

            let Some(container) = self.directory.container_of(current.identifier())? else {
                debug!(resource = %current.identifier(), "no ACL anywhere up the chain");
                return Ok(Vec::new());
            };
            match hierarchy::nearest_resource(self.directory.as_ref(), &container)? {
                Some(resource) => {
                    current = resource;
                    top = false;
                }
                None => return Ok(Vec::new()),
            }
        }

        Err(HierarchyError::DepthExceeded {
            start: identifier.clone(),
            limit: MAX_WALK_DEPTH,
        }
        .into())
    }

    /// Returns whether the session identity matches the authorization.
    ///
    /// Matches in order of cost: public agent class, direct agent,
    /// identity-collaborator groups, then group-resource membership (one
    /// directory fetch per distinct group).
    fn identity_matches(
        &self,
        authorization: &Authorization,
        session: &Session,
        service_groups: &[Iri],
    ) -> Result<bool, AccessError> {
        if authorization
            .agent_classes()
            .iter()
            .any(|class| class == vocab::foaf::AGENT)
        {
            return Ok(true);
        }
        if authorization.agents().contains(session.agent()) {
            return Ok(true);
        }
        if service_groups
            .iter()
            .any(|group| authorization.agent_groups().contains(group))
        {
            return Ok(true);
        }
        for group in authorization.agent_groups() {
            if groups::is_group_member(self.directory.as_ref(), group, session.agent())? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns whether the agent is administrative, by well-known identity
    /// or by the identity collaborator.
    fn is_administrator(&self, agent: &Iri) -> bool {
        agent == vocab::ADMINISTRATOR
            || self
                .agents
                .as_deref()
                .is_some_and(|agents| agents.is_admin(agent))
    }
}

/// Returns whether a delegated session may use this authorization.
///
/// A session acting on behalf of another principal is admitted only by
/// authorizations that explicitly name the delegating principal; naming the
/// acting agent is not enough. Non-delegated sessions are always admitted.
fn delegate_admitted(authorization: &Authorization, session: &Session) -> bool {
    match session.delegated_by() {
        Some(principal) => authorization.agents().contains(principal),
        None => true,
    }
}
