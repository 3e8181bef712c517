// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy decisions and denial advice.
//!
//! A policy answers with a [`Decision`]. Alongside it, each policy carries
//! [`Advice`]: a declarative description of what should happen if the chain
//! ends up denying because of that policy. Advice never runs inside the policy;
//! the chain hands it to an [`crate::AdviceExecutor`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The outcome of evaluating a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
	Permit,
	Deny,
	/// The policy does not apply; the enclosing set decides.
	Refer,
}

impl Decision {
	pub fn is_permit(&self) -> bool {
		matches!(self, Decision::Permit)
	}

	pub fn is_deny(&self) -> bool {
		matches!(self, Decision::Deny)
	}
}

impl fmt::Display for Decision {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Decision::Permit => write!(f, "permit"),
			Decision::Deny => write!(f, "deny"),
			Decision::Refer => write!(f, "refer"),
		}
	}
}

/// Kinds of advice a policy can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceKind {
	/// Response to produce when the chain denies.
	CallOnDeny,
	/// Message key describing the denial.
	DenyMessage,
}

/// A declarative action bound to a policy's denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AdviceAction {
	/// Respond as if the resource does not exist.
	NotFound,
	Forbidden,
	Redirect { location: String },
	/// Localizable message key shown with the denial.
	Message { key: String },
}

/// Advice registered on a policy, keyed by [`AdviceKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
	entries: BTreeMap<AdviceKind, AdviceAction>,
}

impl Advice {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `action` for `kind`, replacing any earlier entry.
	pub fn set(&mut self, kind: AdviceKind, action: AdviceAction) {
		self.entries.insert(kind, action);
	}

	/// Builder: register `action` for `kind`.
	pub fn with(mut self, kind: AdviceKind, action: AdviceAction) -> Self {
		self.set(kind, action);
		self
	}

	pub fn get(&self, kind: AdviceKind) -> Option<&AdviceAction> {
		self.entries.get(&kind)
	}

	/// The response action registered under [`AdviceKind::CallOnDeny`].
	pub fn call_on_deny(&self) -> Option<&AdviceAction> {
		self.get(AdviceKind::CallOnDeny)
	}

	/// The message key registered under [`AdviceKind::DenyMessage`].
	pub fn deny_message(&self) -> Option<&str> {
		match self.get(AdviceKind::DenyMessage) {
			Some(AdviceAction::Message { key }) => Some(key.as_str()),
			_ => None,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
