// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The contract every authorization policy implements.

use async_trait::async_trait;

use crate::context::AuthorizationContext;
use crate::decision::{Advice, AdviceAction, AdviceKind, Decision};
use crate::request::PolicyRequest;

/// A decision together with the advice to act on if it is a denial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyVerdict {
	pub decision: Decision,
	/// Present only for [`Decision::Deny`].
	pub advice: Option<Advice>,
}

impl PolicyVerdict {
	pub fn permit() -> Self {
		Self {
			decision: Decision::Permit,
			advice: None,
		}
	}

	pub fn deny(advice: Advice) -> Self {
		Self {
			decision: Decision::Deny,
			advice: Some(advice),
		}
	}

	pub fn refer() -> Self {
		Self {
			decision: Decision::Refer,
			advice: None,
		}
	}
}

/// A single authorization rule evaluated against a request.
///
/// Evaluation must not touch `context` except to store objects on the path that
/// returns [`Decision::Permit`].
#[async_trait]
pub trait AuthorizationPolicy: Send + Sync {
	/// Short stable name used in logs.
	fn name(&self) -> &'static str;

	async fn evaluate(
		&self,
		request: &dyn PolicyRequest,
		context: &mut AuthorizationContext,
	) -> Decision;

	fn advice(&self) -> &Advice;

	fn set_advice(&mut self, kind: AdviceKind, action: AdviceAction);

	/// Evaluates and attaches this policy's advice to a denial.
	///
	/// Composite policies override this to report the advice of the member
	/// that actually denied.
	async fn verdict(
		&self,
		request: &dyn PolicyRequest,
		context: &mut AuthorizationContext,
	) -> PolicyVerdict {
		match self.evaluate(request, context).await {
			Decision::Permit => PolicyVerdict::permit(),
			Decision::Deny => PolicyVerdict::deny(self.advice().clone()),
			Decision::Refer => PolicyVerdict::refer(),
		}
	}
}
