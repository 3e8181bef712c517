// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Requires a valid publication, scoped to the authorized submission.
//!
//! Publications carry no context of their own; tenancy comes from the
//! submission they belong to. When a submission is already in the
//! authorization context the publication must belong to it. With
//! [`PublicationRequiredPolicy::require_submission`] the submission is
//! mandatory, which makes the ordering dependency on a preceding
//! [`crate::SubmissionRequiredPolicy`] explicit.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::context::AuthorizationContext;
use crate::decision::{AdviceAction, AdviceKind};
use crate::entity::Publication;
use crate::error::{AuthzError, LookupError};
use crate::lookup::PublicationLookup;
use crate::policies::data_object::{DataObjectRequiredPolicy, DataObjectResolver};
use crate::request::PolicyRequest;
use crate::types::PublicationId;

pub const PUBLICATION_PARAM: &str = "publicationId";
pub const INVALID_PUBLICATION_KEY: &str = "user.authorization.invalidPublication";

/// Looks publications up and checks them against the authorized submission.
pub struct PublicationResolver {
	lookup: Arc<dyn PublicationLookup>,
	require_submission: bool,
}

impl PublicationResolver {
	pub fn new(lookup: Arc<dyn PublicationLookup>) -> Self {
		Self {
			lookup,
			require_submission: false,
		}
	}

	pub fn requires_submission(&self) -> bool {
		self.require_submission
	}
}

#[async_trait]
impl DataObjectResolver for PublicationResolver {
	type Id = PublicationId;
	type Object = Publication;

	fn name(&self) -> &'static str {
		"publication_required"
	}

	async fn resolve(&self, id: PublicationId) -> Result<Option<Publication>, LookupError> {
		self.lookup.get_publication(id).await
	}

	fn validate(
		&self,
		publication: &Publication,
		_request: &dyn PolicyRequest,
		context: &AuthorizationContext,
	) -> bool {
		match context.submission() {
			Some(submission) if submission.id != publication.submission_id => {
				debug!(
					publication_id = %publication.id,
					publication_submission = %publication.submission_id,
					authorized_submission = %submission.id,
					"publication belongs to another submission"
				);
				false
			}
			Some(_) => true,
			None if self.require_submission => {
				debug!(
					publication_id = %publication.id,
					"no authorized submission to scope publication"
				);
				false
			}
			None => true,
		}
	}
}

/// Policy that ensures the request names an existing publication.
pub type PublicationRequiredPolicy = DataObjectRequiredPolicy<PublicationResolver>;

impl PublicationRequiredPolicy {
	/// Reads `publicationId` and applies to every operation.
	pub fn new(lookup: Arc<dyn PublicationLookup>) -> Self {
		Self::from_parts(
			PublicationResolver::new(lookup),
			PUBLICATION_PARAM.to_string(),
			INVALID_PUBLICATION_KEY.to_string(),
			None,
		)
		.with_advice(AdviceKind::CallOnDeny, AdviceAction::NotFound)
	}

	/// Reads the id from `parameter_name`, optionally only for `operations`.
	pub fn with_parameter(
		lookup: Arc<dyn PublicationLookup>,
		parameter_name: impl Into<String>,
		operations: Option<Vec<String>>,
	) -> Result<Self, AuthzError> {
		Ok(Self::with_resolver(
			PublicationResolver::new(lookup),
			parameter_name,
			INVALID_PUBLICATION_KEY,
			operations,
		)?
		.with_advice(AdviceKind::CallOnDeny, AdviceAction::NotFound))
	}

	/// Builder: deny unless a submission was authorized earlier in the chain.
	pub fn require_submission(mut self) -> Self {
		self.resolver_mut().require_submission = true;
		self
	}
}
