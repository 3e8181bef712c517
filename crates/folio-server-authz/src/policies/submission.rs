// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Requires a valid submission belonging to the request's active context.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::context::AuthorizationContext;
use crate::decision::{AdviceAction, AdviceKind};
use crate::entity::Submission;
use crate::error::{AuthzError, LookupError};
use crate::lookup::SubmissionLookup;
use crate::policies::data_object::{DataObjectRequiredPolicy, DataObjectResolver};
use crate::request::PolicyRequest;
use crate::types::SubmissionId;

pub const SUBMISSION_PARAM: &str = "submissionId";
pub const INVALID_SUBMISSION_KEY: &str = "user.authorization.invalidSubmission";

/// Looks submissions up and enforces tenancy.
pub struct SubmissionResolver {
	lookup: Arc<dyn SubmissionLookup>,
}

impl SubmissionResolver {
	pub fn new(lookup: Arc<dyn SubmissionLookup>) -> Self {
		Self { lookup }
	}
}

#[async_trait]
impl DataObjectResolver for SubmissionResolver {
	type Id = SubmissionId;
	type Object = Submission;

	fn name(&self) -> &'static str {
		"submission_required"
	}

	async fn resolve(&self, id: SubmissionId) -> Result<Option<Submission>, LookupError> {
		self.lookup.get_submission(id).await
	}

	fn validate(
		&self,
		submission: &Submission,
		request: &dyn PolicyRequest,
		_context: &AuthorizationContext,
	) -> bool {
		// A request without an active context can never match.
		let active = request.active_context_id();
		if active != Some(submission.context_id) {
			debug!(
				submission_id = %submission.id,
				submission_context = %submission.context_id,
				active_context = ?active.map(|c| c.get()),
				"submission belongs to another context"
			);
			return false;
		}
		true
	}
}

/// Policy that ensures the request names a submission of the active context.
///
/// Any denial (missing id, unknown id, foreign context) answers "not found" so
/// the existence of other contexts' submissions is never revealed.
pub type SubmissionRequiredPolicy = DataObjectRequiredPolicy<SubmissionResolver>;

impl SubmissionRequiredPolicy {
	/// Reads `submissionId` and applies to every operation.
	pub fn new(lookup: Arc<dyn SubmissionLookup>) -> Self {
		Self::from_parts(
			SubmissionResolver::new(lookup),
			SUBMISSION_PARAM.to_string(),
			INVALID_SUBMISSION_KEY.to_string(),
			None,
		)
		.with_advice(AdviceKind::CallOnDeny, AdviceAction::NotFound)
	}

	/// Reads the id from `parameter_name`, optionally only for `operations`.
	pub fn with_parameter(
		lookup: Arc<dyn SubmissionLookup>,
		parameter_name: impl Into<String>,
		operations: Option<Vec<String>>,
	) -> Result<Self, AuthzError> {
		Ok(Self::with_resolver(
			SubmissionResolver::new(lookup),
			parameter_name,
			INVALID_SUBMISSION_KEY,
			operations,
		)?
		.with_advice(AdviceKind::CallOnDeny, AdviceAction::NotFound))
	}
}
