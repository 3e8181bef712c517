// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Domain objects resolved by the data object policies.
//!
//! These are owned by the data-access layer. Policies only check them and
//! republish them through the authorization context.

use serde::{Deserialize, Serialize};

use crate::types::{ContextId, PublicationId, SubmissionId, WorkflowStage};

/// A manuscript moving through the editorial workflow of one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
	pub id: SubmissionId,
	/// Owning context; the tenancy boundary.
	pub context_id: ContextId,
	pub stage: WorkflowStage,
	pub current_publication_id: Option<PublicationId>,
}

impl Submission {
	/// Creates a submission in the first workflow stage.
	pub fn new(id: SubmissionId, context_id: ContextId) -> Self {
		Self {
			id,
			context_id,
			stage: WorkflowStage::Submission,
			current_publication_id: None,
		}
	}

	/// Builder: set the workflow stage.
	pub fn with_stage(mut self, stage: WorkflowStage) -> Self {
		self.stage = stage;
		self
	}

	/// Builder: set the current publication.
	pub fn with_current_publication(mut self, id: PublicationId) -> Self {
		self.current_publication_id = Some(id);
		self
	}
}

/// One version of a submission's published metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
	pub id: PublicationId,
	pub submission_id: SubmissionId,
}

impl Publication {
	/// Creates a publication belonging to `submission_id`.
	pub fn new(id: PublicationId, submission_id: SubmissionId) -> Self {
		Self {
			id,
			submission_id,
		}
	}
}
