// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turning denial advice into a user-visible response.

use http::StatusCode;
use serde::Serialize;

use crate::decision::{Advice, AdviceAction};

/// The response a handler should send for a denied request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenyResponse {
	#[serde(serialize_with = "serialize_status")]
	pub status: StatusCode,
	/// Message key for the error page, if the policy supplied one.
	pub message_key: Option<String>,
	/// Redirect target for [`AdviceAction::Redirect`].
	pub location: Option<String>,
}

fn serialize_status<S: serde::Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
	s.serialize_u16(status.as_u16())
}

/// Executes advice on behalf of the chain when it denies.
pub trait AdviceExecutor: Send + Sync {
	/// `advice` is `None` when the denial came from an empty chain or a set
	/// default rather than from a specific policy.
	fn execute(&self, advice: Option<&Advice>) -> DenyResponse;
}

/// Maps advice to HTTP status codes.
///
/// | advice                  | status |
/// |-------------------------|--------|
/// | `NotFound`              | 404    |
/// | `Forbidden` / none      | 403    |
/// | `Redirect { location }` | 302    |
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAdviceExecutor;

impl AdviceExecutor for DefaultAdviceExecutor {
	fn execute(&self, advice: Option<&Advice>) -> DenyResponse {
		let message_key = advice.and_then(Advice::deny_message).map(str::to_string);
		let (status, location) = match advice.and_then(Advice::call_on_deny) {
			Some(AdviceAction::NotFound) => (StatusCode::NOT_FOUND, None),
			Some(AdviceAction::Redirect { location }) => (StatusCode::FOUND, Some(location.clone())),
			Some(AdviceAction::Forbidden) | Some(AdviceAction::Message { .. }) | None => {
				(StatusCode::FORBIDDEN, None)
			}
		};
		DenyResponse {
			status,
			message_key,
			location,
		}
	}
}
