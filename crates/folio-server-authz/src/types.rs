// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for request authorization.
//!
//! This module defines the foundational types used throughout the policy chain:
//!
//! - **ID newtypes**: Type-safe wrappers around strictly positive integers for the
//!   different entity types ([`SubmissionId`], [`PublicationId`], [`ContextId`],
//!   [`UserId`]) preventing accidental mixing
//! - **Roles** ([`Role`]): roles a user holds within the active context
//! - **Workflow stages** ([`WorkflowStage`]): editorial stages, ordered
//! - **Association types** ([`AssocType`]): tags for objects stored in the
//!   authorization context
//!
//! Identifiers arrive as untrusted request parameters. [`ObjectId::parse_param`]
//! is the single place where they are turned into typed ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

// =============================================================================
// ID Newtypes
// =============================================================================

/// A typed identifier that can be read from a request parameter.
pub trait ObjectId: Copy + fmt::Display + fmt::Debug + Send + Sync + 'static {
	/// Parses a raw request parameter.
	///
	/// Returns `None` unless the whole value is a run of ASCII digits denoting
	/// a non-zero `u64`.
	fn parse_param(raw: &str) -> Option<Self>;
}

/// Parses a strictly positive decimal identifier.
///
/// Whitespace, signs, decimal points, exponents, zero and values that overflow
/// `u64` are all rejected.
pub fn parse_positive_id(raw: &str) -> Option<NonZeroU64> {
	if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	raw.parse::<u64>().ok().and_then(NonZeroU64::new)
}

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(NonZeroU64);

		impl $name {
			/// Create an ID, returning `None` for zero.
			pub fn new(id: u64) -> Option<Self> {
				NonZeroU64::new(id).map(Self)
			}

			/// Get the inner integer value.
			pub fn get(self) -> u64 {
				self.0.get()
			}
		}

		impl ObjectId for $name {
			fn parse_param(raw: &str) -> Option<Self> {
				parse_positive_id(raw).map(Self)
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<NonZeroU64> for $name {
			fn from(id: NonZeroU64) -> Self {
				Self(id)
			}
		}

		impl From<$name> for u64 {
			fn from(id: $name) -> Self {
				id.0.get()
			}
		}
	};
}

define_id_type!(SubmissionId, "Unique identifier for a submission.");
define_id_type!(PublicationId, "Unique identifier for a publication version.");
define_id_type!(
	ContextId,
	"Unique identifier for a context (journal or press), the unit of tenancy."
);
define_id_type!(UserId, "Unique identifier for a user.");

// =============================================================================
// Roles
// =============================================================================

/// Roles a user can hold within a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Administers the whole installation.
	SiteAdmin,
	/// Manages a single context.
	Manager,
	/// Section or series editor.
	SubEditor,
	/// Editorial assistant.
	Assistant,
	Author,
	Reviewer,
	Reader,
}

impl Role {
	/// Returns all available roles.
	pub fn all() -> &'static [Role] {
		&[
			Role::SiteAdmin,
			Role::Manager,
			Role::SubEditor,
			Role::Assistant,
			Role::Author,
			Role::Reviewer,
			Role::Reader,
		]
	}

	/// Returns true for roles that manage the editorial workflow.
	pub fn is_editorial(&self) -> bool {
		matches!(self, Role::SiteAdmin | Role::Manager | Role::SubEditor)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::SiteAdmin => write!(f, "site_admin"),
			Role::Manager => write!(f, "manager"),
			Role::SubEditor => write!(f, "sub_editor"),
			Role::Assistant => write!(f, "assistant"),
			Role::Author => write!(f, "author"),
			Role::Reviewer => write!(f, "reviewer"),
			Role::Reader => write!(f, "reader"),
		}
	}
}

// =============================================================================
// Workflow Stages
// =============================================================================

/// Editorial workflow stages, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
	Submission,
	InternalReview,
	ExternalReview,
	Editing,
	Production,
}

impl WorkflowStage {
	/// Returns all stages in workflow order.
	pub fn all() -> &'static [WorkflowStage] {
		&[
			WorkflowStage::Submission,
			WorkflowStage::InternalReview,
			WorkflowStage::ExternalReview,
			WorkflowStage::Editing,
			WorkflowStage::Production,
		]
	}

	/// Returns true for the two review stages.
	pub fn is_review(&self) -> bool {
		matches!(
			self,
			WorkflowStage::InternalReview | WorkflowStage::ExternalReview
		)
	}
}

// =============================================================================
// Association Types
// =============================================================================

/// Tags under which resolved objects are stored in the authorization context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssocType {
	Submission,
	Publication,
	UserRoles,
	AccessibleWorkflowStages,
	Context,
}

impl fmt::Display for AssocType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AssocType::Submission => write!(f, "submission"),
			AssocType::Publication => write!(f, "publication"),
			AssocType::UserRoles => write!(f, "user_roles"),
			AssocType::AccessibleWorkflowStages => write!(f, "accessible_workflow_stages"),
			AssocType::Context => write!(f, "context"),
		}
	}
}
