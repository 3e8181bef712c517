// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-based access to handler operations.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

use crate::context::{AuthorizationContext, AuthorizedObject};
use crate::decision::{Advice, AdviceAction, AdviceKind, Decision};
use crate::policy::AuthorizationPolicy;
use crate::request::PolicyRequest;
use crate::types::Role;

pub const ROLE_DENIED_KEY: &str = "user.authorization.roleBasedAccessDenied";

/// Which handler operations each role may call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleAssignments {
	by_role: BTreeMap<Role, BTreeSet<String>>,
}

impl RoleAssignments {
	pub fn new() -> Self {
		Self::default()
	}

	/// Grants every role in `roles` access to every operation in `operations`.
	pub fn add<I, S>(&mut self, roles: &[Role], operations: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let operations: Vec<String> = operations.into_iter().map(Into::into).collect();
		for role in roles {
			self
				.by_role
				.entry(*role)
				.or_default()
				.extend(operations.iter().cloned());
		}
	}

	/// Builder form of [`RoleAssignments::add`].
	pub fn with<I, S>(mut self, roles: &[Role], operations: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.add(roles, operations);
		self
	}

	pub fn is_assigned(&self, role: Role, operation: &str) -> bool {
		self
			.by_role
			.get(&role)
			.is_some_and(|ops| ops.contains(operation))
	}

	/// Roles allowed to call `operation`, in role order.
	pub fn roles_for(&self, operation: &str) -> Vec<Role> {
		self
			.by_role
			.iter()
			.filter(|(_, ops)| ops.contains(operation))
			.map(|(role, _)| *role)
			.collect()
	}

	pub fn is_empty(&self) -> bool {
		self.by_role.is_empty()
	}
}

/// Permits when one of the user's roles is assigned the current operation.
///
/// On permit the user's roles in the active context are stored under
/// [`crate::AssocType::UserRoles`].
pub struct RoleBasedHandlerOperationPolicy {
	assignments: RoleAssignments,
	advice: Advice,
}

impl RoleBasedHandlerOperationPolicy {
	pub fn new(assignments: RoleAssignments) -> Self {
		let advice = Advice::new()
			.with(AdviceKind::CallOnDeny, AdviceAction::Forbidden)
			.with(
				AdviceKind::DenyMessage,
				AdviceAction::Message {
					key: ROLE_DENIED_KEY.to_string(),
				},
			);
		Self {
			assignments,
			advice,
		}
	}

	pub fn assignments(&self) -> &RoleAssignments {
		&self.assignments
	}
}

#[async_trait]
impl AuthorizationPolicy for RoleBasedHandlerOperationPolicy {
	fn name(&self) -> &'static str {
		"role_based_handler_operation"
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
		if request.user_id().is_none() {
			debug!("no authenticated user");
			return Decision::Deny;
		}

		let operation = request.operation();
		let granted = request
			.user_roles()
			.iter()
			.any(|role| self.assignments.is_assigned(*role, operation));

		if !granted {
			debug!(roles = ?request.user_roles(), "no role assigned to operation");
			return Decision::Deny;
		}

		context.put(AuthorizedObject::UserRoles(request.user_roles().to_vec()));
		Decision::Permit
	}

	fn advice(&self) -> &Advice {
		&self.advice
	}

	fn set_advice(&mut self, kind: AdviceKind, action: AdviceAction) {
		self.advice.set(kind, action);
	}
}
