// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Workflow stages the user may see for the authorized submission.

use async_trait::async_trait;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

use crate::context::{AuthorizationContext, AuthorizedObject};
use crate::decision::{Advice, AdviceAction, AdviceKind, Decision};
use crate::policy::AuthorizationPolicy;
use crate::request::PolicyRequest;
use crate::types::{Role, WorkflowStage};

pub const NO_STAGE_ACCESS_KEY: &str = "user.authorization.accessibleWorkflowStage";

/// Stages visible to `roles` for a submission currently in `current`.
///
/// Editorial roles see every stage. Assistants and authors see the stages the
/// submission has reached. Reviewers see the review stages the submission has
/// reached. Readers see none.
pub fn accessible_stages(roles: &[Role], current: WorkflowStage) -> Vec<WorkflowStage> {
	let mut stages = BTreeSet::new();
	for role in roles {
		let reached = WorkflowStage::all().iter().copied().filter(|s| *s <= current);
		match role {
			Role::SiteAdmin | Role::Manager | Role::SubEditor => {
				stages.extend(WorkflowStage::all().iter().copied());
			}
			Role::Assistant | Role::Author => stages.extend(reached),
			Role::Reviewer => stages.extend(reached.filter(WorkflowStage::is_review)),
			Role::Reader => {}
		}
	}
	stages.into_iter().collect()
}

/// Requires an authorized submission and at least one visible stage of it.
///
/// Must follow [`crate::SubmissionRequiredPolicy`] in the chain. Roles come
/// from the context if a role policy stored them, otherwise from the request.
pub struct SubmissionStageAccessPolicy {
	advice: Advice,
}

impl SubmissionStageAccessPolicy {
	pub fn new() -> Self {
		let advice = Advice::new()
			.with(AdviceKind::CallOnDeny, AdviceAction::Forbidden)
			.with(
				AdviceKind::DenyMessage,
				AdviceAction::Message {
					key: NO_STAGE_ACCESS_KEY.to_string(),
				},
			);
		Self { advice }
	}
}

impl Default for SubmissionStageAccessPolicy {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl AuthorizationPolicy for SubmissionStageAccessPolicy {
	fn name(&self) -> &'static str {
		"submission_stage_access"
	}

	#[instrument(
		level = "debug",
		skip(self, request, context),
		fields(operation = request.operation())
	)]
	async fn evaluate(
		&self,
		request: &dyn PolicyRequest,
		context: &mut AuthorizationContext,
	) -> Decision {
		let Some(submission) = context.submission() else {
			debug!("no authorized submission in context");
			return Decision::Deny;
		};

		let roles = context.user_roles().unwrap_or_else(|| request.user_roles());
		let stages = accessible_stages(roles, submission.stage);
		if stages.is_empty() {
			debug!(submission_id = %submission.id, "no accessible workflow stage");
			return Decision::Deny;
		}

		context.put(AuthorizedObject::AccessibleWorkflowStages(stages));
		Decision::Permit
	}

	fn advice(&self) -> &Advice {
		&self.advice
	}

	fn set_advice(&mut self, kind: AdviceKind, action: AdviceAction) {
		self.advice.set(kind, action);
	}
}
