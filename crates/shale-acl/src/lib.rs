//! # shale-acl: Access-control decisions for hierarchical repositories
//!
//! Given a session (agent + optional delegation) and a resource identifier,
//! the engine resolves the nearest governing ACL up the containment chain,
//! parses its statements into [`Authorization`] records, and answers
//! read/write/append/control questions with a boolean.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Decision Request (session, resource, mode)  │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  AccessEvaluator                             │
//! │  ├─ Administrator bypass                     │
//! │  ├─ Containment walk → nearest ACL           │
//! │  │    (hierarchy, accessTo vs. default)      │
//! │  ├─ Statement parsing → Authorizations       │
//! │  └─ Delegate / identity / mode filtering     │
//! │       (groups resolved via the directory)    │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  true / false  (or a collaborator error)     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Inheritance
//!
//! Exactly one ACL governs a decision: the nearest one found by walking
//! self → container → … → root. Inheritance is asymmetric by design:
//!
//! - An ACL attached **directly** to the queried resource applies through
//!   its authorizations' `accessTo` targets.
//! - An ACL found on a **proper ancestor** applies only through `default`
//!   targets naming that ancestor. Authorizations without a matching
//!   `default` never reach descendants, even when their `accessTo` names
//!   the ancestor — granting a resource does not silently grant its
//!   subtree.
//!
//! ## Failure model
//!
//! Absence fails closed: no resource, no ACL anywhere, or no matching
//! authorization all evaluate to `false`. Collaborator faults (directory
//! errors, containment cycles, over-deep chains) propagate as
//! [`AccessError`] — they signal a broken dependency, not a denial.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use shale_acl::AccessEvaluator;
//! use shale_directory::{MemoryDirectory, Resource};
//! use shale_types::{Iri, Session, Statement, StatementScope, vocab};
//!
//! // A root resource whose ACL grants bseeger read access to the root and,
//! // via `default`, to everything beneath it.
//! let mut root = Resource::new("shale:repository").with_acl("shale:repository?ext=acl");
//! for (predicate, object) in [
//!     (vocab::rdf::TYPE, vocab::acl::AUTHORIZATION),
//!     (vocab::acl::AGENT, "info:user/bseeger"),
//!     (vocab::acl::MODE, vocab::acl::READ),
//!     (vocab::acl::ACCESS_TO, "shale:repository"),
//!     (vocab::acl::DEFAULT, "shale:repository"),
//! ] {
//!     root = root.with_statement(
//!         StatementScope::AccessControl,
//!         Statement::new("shale:repository/acl/auth", predicate, object),
//!     );
//! }
//!
//! let directory = MemoryDirectory::new().with_resource(root);
//! let evaluator = AccessEvaluator::new(Arc::new(directory)).without_audit();
//!
//! let bseeger = Session::new("info:user/bseeger");
//! assert!(evaluator.can_read(&bseeger, &Iri::new("shale:repository/report"))?);
//!
//! let stranger = Session::new("info:user/stranger");
//! assert!(!evaluator.can_read(&stranger, &Iri::new("shale:repository/report"))?);
//! # Ok::<(), shale_acl::AccessError>(())
//! ```

pub mod authorization;
pub mod engine;
pub mod groups;
pub mod hierarchy;

// Re-export commonly used types
pub use authorization::{Authorization, parse_authorizations};
pub use engine::{AccessError, AccessEvaluator};
pub use groups::is_group_member;
pub use hierarchy::{HierarchyError, MAX_WALK_DEPTH, nearest_acl_bearer, nearest_resource};
