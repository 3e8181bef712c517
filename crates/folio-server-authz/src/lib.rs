// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request authorization for Folio handlers.
//!
//! Each handler operation is guarded by an ordered chain of policies. Policies
//! that validate a request parameter also publish the object they loaded into a
//! per-request [`AuthorizationContext`], so handlers never re-fetch it and later
//! policies can build on it.
//!
//! This crate provides:
//! - The [`AuthorizationPolicy`] contract and [`Decision`]/[`Advice`] values
//! - [`DataObjectRequiredPolicy`], generic over a [`DataObjectResolver`], with
//!   [`SubmissionRequiredPolicy`] and [`PublicationRequiredPolicy`]
//! - Role and workflow stage policies
//! - [`PolicySet`] and [`AuthorizationDecisionManager`] for composing chains
//! - [`PolicyFactory`] for building policies from `folio-server-config`
//!
//! # Usage
//!
//! ```ignore
//! use folio_server_authz::{DefaultAdviceExecutor, PolicyFactory, RequestArgs};
//!
//! let factory = PolicyFactory::from_config(&config.authz, submissions, publications);
//! let manager = factory.author_dashboard_policy()?;
//!
//! let outcome = manager.decide(&request).await;
//! match outcome.into_result(&DefaultAdviceExecutor) {
//!     Ok(context) => render(context.submission()),
//!     Err(response) => respond(response.status),
//! }
//! ```

pub mod chain;
pub mod context;
pub mod decision;
pub mod entity;
pub mod error;
pub mod factory;
pub mod lookup;
pub mod policies;
pub mod policy;
pub mod request;
pub mod response;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use chain::{AuthorizationDecisionManager, AuthorizationOutcome, CombiningAlgorithm, PolicySet};
pub use context::{AuthorizationContext, AuthorizedObject};
pub use decision::{Advice, AdviceAction, AdviceKind, Decision};
pub use entity::{Publication, Submission};
pub use error::{AuthzError, LookupError};
pub use factory::{PolicyFactory, AUTHOR_DASHBOARD_OPERATIONS, PUBLICATION_OPERATIONS};
pub use lookup::{PublicationLookup, SubmissionLookup};
pub use policies::{
	accessible_stages, DataObjectRequiredPolicy, DataObjectResolver, PublicationRequiredPolicy,
	PublicationResolver, RoleAssignments, RoleBasedHandlerOperationPolicy,
	SubmissionRequiredPolicy, SubmissionResolver, SubmissionStageAccessPolicy,
};
pub use policy::{AuthorizationPolicy, PolicyVerdict};
pub use request::{PolicyRequest, RequestArgs};
pub use response::{AdviceExecutor, DefaultAdviceExecutor, DenyResponse};
pub use types::{
	parse_positive_id, AssocType, ContextId, ObjectId, PublicationId, Role, SubmissionId, UserId,
	WorkflowStage,
};
