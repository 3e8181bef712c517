// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The view of an incoming request that policies evaluate against.

use std::collections::HashMap;

use crate::types::{ContextId, Role, UserId};

/// Request data consumed by policies.
///
/// Implemented by the web layer. Parameter values are untrusted strings; the
/// policies parse them.
pub trait PolicyRequest: Send + Sync {
	/// Named parameter from the merged argument set (path, query and body).
	fn param(&self, name: &str) -> Option<&str>;

	/// The context (tenant) the request is addressed to, if any.
	fn active_context_id(&self) -> Option<ContextId>;

	/// Name of the handler operation being invoked.
	fn operation(&self) -> &str;

	/// The authenticated user, if any.
	fn user_id(&self) -> Option<UserId>;

	/// Roles the user holds in the active context.
	fn user_roles(&self) -> &[Role];
}

/// Owned request arguments, built by the web layer or by tests.
///
/// Parameters are merged in the order they are added: path arguments, then
/// query string, then body. A later source does not replace a value an earlier
/// source already provided.
#[derive(Debug, Clone, Default)]
pub struct RequestArgs {
	operation: String,
	params: HashMap<String, String>,
	context_id: Option<ContextId>,
	user_id: Option<UserId>,
	roles: Vec<Role>,
}

impl RequestArgs {
	pub fn new(operation: impl Into<String>) -> Self {
		Self {
			operation: operation.into(),
			..Default::default()
		}
	}

	/// Builder: add a parameter. Earlier values for the same name are kept.
	pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.entry(name.into()).or_insert_with(|| value.into());
		self
	}

	/// Builder: merge a whole argument source.
	pub fn with_params<I, K, V>(mut self, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		for (name, value) in params {
			self = self.with_param(name, value);
		}
		self
	}

	/// Builder: set the active context.
	pub fn with_context(mut self, context_id: ContextId) -> Self {
		self.context_id = Some(context_id);
		self
	}

	/// Builder: set the authenticated user and their roles in the active context.
	pub fn with_user(mut self, user_id: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
		self.user_id = Some(user_id);
		self.roles = roles.into_iter().collect();
		self
	}
}

impl PolicyRequest for RequestArgs {
	fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	fn active_context_id(&self) -> Option<ContextId> {
		self.context_id
	}

	fn operation(&self) -> &str {
		&self.operation
	}

	fn user_id(&self) -> Option<UserId> {
		self.user_id
	}

	fn user_roles(&self) -> &[Role] {
		&self.roles
	}
}
