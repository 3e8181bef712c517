// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-request registry of authorized objects.
//!
//! An [`AuthorizationContext`] is created when the chain starts, filled in by
//! permitting policies, and handed to the request handler once the chain
//! permits. It is never shared between requests.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::entity::{Publication, Submission};
use crate::types::{AssocType, ContextId, Role, WorkflowStage};

/// An object a policy has resolved and checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AuthorizedObject {
	Submission(Submission),
	Publication(Publication),
	UserRoles(Vec<Role>),
	AccessibleWorkflowStages(Vec<WorkflowStage>),
	Context(ContextId),
}

impl AuthorizedObject {
	/// The tag this object is stored under.
	pub fn assoc_type(&self) -> AssocType {
		match self {
			AuthorizedObject::Submission(_) => AssocType::Submission,
			AuthorizedObject::Publication(_) => AssocType::Publication,
			AuthorizedObject::UserRoles(_) => AssocType::UserRoles,
			AuthorizedObject::AccessibleWorkflowStages(_) => AssocType::AccessibleWorkflowStages,
			AuthorizedObject::Context(_) => AssocType::Context,
		}
	}
}

impl From<Submission> for AuthorizedObject {
	fn from(submission: Submission) -> Self {
		AuthorizedObject::Submission(submission)
	}
}

impl From<Publication> for AuthorizedObject {
	fn from(publication: Publication) -> Self {
		AuthorizedObject::Publication(publication)
	}
}

/// Objects resolved during authorization, at most one per [`AssocType`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorizationContext {
	objects: BTreeMap<AssocType, AuthorizedObject>,
}

impl AuthorizationContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `object` under its association type.
	///
	/// Last writer wins: an object already stored under the same tag is replaced
	/// and returned.
	pub fn put(&mut self, object: impl Into<AuthorizedObject>) -> Option<AuthorizedObject> {
		let object = object.into();
		self.objects.insert(object.assoc_type(), object)
	}

	pub fn get(&self, tag: AssocType) -> Option<&AuthorizedObject> {
		self.objects.get(&tag)
	}

	pub fn contains(&self, tag: AssocType) -> bool {
		self.objects.contains_key(&tag)
	}

	pub fn submission(&self) -> Option<&Submission> {
		match self.get(AssocType::Submission) {
			Some(AuthorizedObject::Submission(submission)) => Some(submission),
			_ => None,
		}
	}

	pub fn publication(&self) -> Option<&Publication> {
		match self.get(AssocType::Publication) {
			Some(AuthorizedObject::Publication(publication)) => Some(publication),
			_ => None,
		}
	}

	pub fn user_roles(&self) -> Option<&[Role]> {
		match self.get(AssocType::UserRoles) {
			Some(AuthorizedObject::UserRoles(roles)) => Some(roles),
			_ => None,
		}
	}

	pub fn accessible_stages(&self) -> Option<&[WorkflowStage]> {
		match self.get(AssocType::AccessibleWorkflowStages) {
			Some(AuthorizedObject::AccessibleWorkflowStages(stages)) => Some(stages),
			_ => None,
		}
	}

	pub fn context_id(&self) -> Option<ContextId> {
		match self.get(AssocType::Context) {
			Some(AuthorizedObject::Context(id)) => Some(*id),
			_ => None,
		}
	}

	/// Iterates stored objects in tag order.
	pub fn iter(&self) -> impl Iterator<Item = (AssocType, &AuthorizedObject)> {
		self.objects.iter().map(|(tag, object)| (*tag, object))
	}

	pub fn len(&self) -> usize {
		self.objects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}
}
