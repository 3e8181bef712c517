// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Builds configured policies and chains from [`AuthzConfig`].

use std::sync::Arc;

use folio_server_config::{AuthzConfig, DenyStatus};
use tracing::debug;

use crate::chain::AuthorizationDecisionManager;
use crate::decision::{AdviceAction, AdviceKind};
use crate::error::AuthzError;
use crate::lookup::{PublicationLookup, SubmissionLookup};
use crate::policies::{
	PublicationRequiredPolicy, RoleAssignments, RoleBasedHandlerOperationPolicy,
	SubmissionRequiredPolicy, SubmissionStageAccessPolicy,
};
use crate::types::Role;

/// Handler operations exposed by the author dashboard.
pub const AUTHOR_DASHBOARD_OPERATIONS: [&str; 3] =
	["submission", "readSubmissionEmail", "publication"];

/// Operations of the author dashboard that take a publication id.
pub const PUBLICATION_OPERATIONS: [&str; 1] = ["publication"];

fn deny_action(status: DenyStatus) -> AdviceAction {
	match status {
		DenyStatus::NotFound => AdviceAction::NotFound,
		DenyStatus::Forbidden => AdviceAction::Forbidden,
	}
}

/// Creates policies from configuration and shared lookups.
pub struct PolicyFactory {
	config: AuthzConfig,
	submissions: Arc<dyn SubmissionLookup>,
	publications: Arc<dyn PublicationLookup>,
}

impl PolicyFactory {
	pub fn from_config(
		config: &AuthzConfig,
		submissions: Arc<dyn SubmissionLookup>,
		publications: Arc<dyn PublicationLookup>,
	) -> Self {
		Self {
			config: config.clone(),
			submissions,
			publications,
		}
	}

	pub fn config(&self) -> &AuthzConfig {
		&self.config
	}

	/// Submission policy reading the configured parameter.
	pub fn submission_required(
		&self,
		operations: Option<Vec<String>>,
	) -> Result<SubmissionRequiredPolicy, AuthzError> {
		Ok(SubmissionRequiredPolicy::with_parameter(
			self.submissions.clone(),
			self.config.submission_param.as_str(),
			operations,
		)?
		.with_advice(AdviceKind::CallOnDeny, deny_action(self.config.deny_status)))
	}

	/// Publication policy reading the configured parameter.
	///
	/// Requires a preceding submission when
	/// `require_submission_for_publication` is set.
	pub fn publication_required(
		&self,
		operations: Option<Vec<String>>,
	) -> Result<PublicationRequiredPolicy, AuthzError> {
		let policy = PublicationRequiredPolicy::with_parameter(
			self.publications.clone(),
			self.config.publication_param.as_str(),
			operations,
		)?
		.with_advice(AdviceKind::CallOnDeny, deny_action(self.config.deny_status));

		if self.config.require_submission_for_publication {
			Ok(policy.require_submission())
		} else {
			Ok(policy)
		}
	}

	/// The chain guarding the author dashboard.
	///
	/// Order: role assignment, submission, workflow stage access, then
	/// publication for [`PUBLICATION_OPERATIONS`] only.
	pub fn author_dashboard_policy(&self) -> Result<AuthorizationDecisionManager, AuthzError> {
		let assignments = RoleAssignments::new().with(&[Role::Author], AUTHOR_DASHBOARD_OPERATIONS);
		let publication_ops: Vec<String> = PUBLICATION_OPERATIONS.iter().map(|op| op.to_string()).collect();

		let manager = AuthorizationDecisionManager::new()
			.with_policy(RoleBasedHandlerOperationPolicy::new(assignments))
			.with_policy(self.submission_required(None)?)
			.with_policy(SubmissionStageAccessPolicy::new())
			.with_policy(self.publication_required(Some(publication_ops))?);

		debug!(policies = ?manager.policy_names(), "built author dashboard chain");
		Ok(manager)
	}
}
