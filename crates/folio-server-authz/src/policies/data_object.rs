// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Generic "load object by id from the request" policy.
//!
//! Evaluation walks a fixed sequence and stops at the first failure:
//!
//! ```text
//! operation not listed ──────────────────────────────► Permit (not applicable)
//! parameter missing / malformed ─────────────────────► Deny
//! resolver finds nothing (or the lookup fails) ──────► Deny
//! resolver rejects the object ───────────────────────► Deny
//! otherwise: store object in the context ────────────► Permit
//! ```
//!
//! Everything object-specific lives behind [`DataObjectResolver`].

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::context::{AuthorizationContext, AuthorizedObject};
use crate::decision::{Advice, AdviceAction, AdviceKind, Decision};
use crate::error::{AuthzError, LookupError};
use crate::policy::AuthorizationPolicy;
use crate::request::PolicyRequest;
use crate::types::ObjectId;

/// Resolves and checks one kind of object for [`DataObjectRequiredPolicy`].
#[async_trait]
pub trait DataObjectResolver: Send + Sync {
	type Id: ObjectId;
	type Object: Into<AuthorizedObject> + Send;

	/// Policy name used in logs, e.g. `submission_required`.
	fn name(&self) -> &'static str;

	async fn resolve(&self, id: Self::Id) -> Result<Option<Self::Object>, LookupError>;

	/// Object-specific invariants, checked after a successful lookup.
	fn validate(
		&self,
		object: &Self::Object,
		request: &dyn PolicyRequest,
		context: &AuthorizationContext,
	) -> bool;
}

/// Requires the request to name an existing, valid object and publishes it.
pub struct DataObjectRequiredPolicy<R> {
	resolver: R,
	parameter_name: String,
	operations: Option<Vec<String>>,
	advice: Advice,
}

impl<R: DataObjectResolver> DataObjectRequiredPolicy<R> {
	/// Creates a policy reading the id from `parameter_name`.
	///
	/// `operations` restricts the policy to the listed handler operations; other
	/// operations are permitted without a lookup. `message_key` is registered as
	/// [`AdviceKind::DenyMessage`] advice.
	pub fn with_resolver(
		resolver: R,
		parameter_name: impl Into<String>,
		message_key: impl Into<String>,
		operations: Option<Vec<String>>,
	) -> Result<Self, AuthzError> {
		let parameter_name = parameter_name.into();
		if parameter_name.trim().is_empty() {
			return Err(AuthzError::EmptyParameterName);
		}
		if operations.as_ref().is_some_and(|ops| ops.is_empty()) {
			return Err(AuthzError::EmptyOperationList {
				policy: resolver.name(),
			});
		}
		Ok(Self::from_parts(
			resolver,
			parameter_name,
			message_key.into(),
			operations,
		))
	}

	pub(crate) fn from_parts(
		resolver: R,
		parameter_name: String,
		message_key: String,
		operations: Option<Vec<String>>,
	) -> Self {
		let advice = Advice::new().with(
			AdviceKind::DenyMessage,
			AdviceAction::Message { key: message_key },
		);
		Self {
			resolver,
			parameter_name,
			operations,
			advice,
		}
	}

	pub fn parameter_name(&self) -> &str {
		&self.parameter_name
	}

	pub fn operations(&self) -> Option<&[String]> {
		self.operations.as_deref()
	}

	pub fn resolver(&self) -> &R {
		&self.resolver
	}

	pub(crate) fn resolver_mut(&mut self) -> &mut R {
		&mut self.resolver
	}

	/// Returns false when an operation restriction exists and excludes `operation`.
	pub fn applies_to(&self, operation: &str) -> bool {
		match &self.operations {
			Some(ops) => ops.iter().any(|op| op == operation),
			None => true,
		}
	}

	/// Reads the object id from the request; `None` for missing or malformed values.
	pub fn data_object_id(&self, request: &dyn PolicyRequest) -> Option<R::Id> {
		request
			.param(&self.parameter_name)
			.and_then(<R::Id as ObjectId>::parse_param)
	}

	/// Builder: register advice.
	pub fn with_advice(mut self, kind: AdviceKind, action: AdviceAction) -> Self {
		self.advice.set(kind, action);
		self
	}
}

#[async_trait]
impl<R: DataObjectResolver> AuthorizationPolicy for DataObjectRequiredPolicy<R> {
	fn name(&self) -> &'static str {
		self.resolver.name()
	}

	#[instrument(
		level = "debug",
		skip(self, request, context),
		fields(
			policy = self.resolver.name(),
			operation = request.operation(),
		)
	)]
	async fn evaluate(
		&self,
		request: &dyn PolicyRequest,
		context: &mut AuthorizationContext,
	) -> Decision {
		if !self.applies_to(request.operation()) {
			debug!("operation not covered by policy, permitting");
			return Decision::Permit;
		}

		let Some(id) = self.data_object_id(request) else {
			debug!(parameter = %self.parameter_name, "missing or malformed object id");
			return Decision::Deny;
		};

		let object = match self.resolver.resolve(id).await {
			Ok(Some(object)) => object,
			Ok(None) => {
				debug!(%id, "object not found");
				return Decision::Deny;
			}
			Err(e) => {
				warn!(%id, error = %e, "object lookup failed, denying");
				return Decision::Deny;
			}
		};

		if !self.resolver.validate(&object, request, context) {
			debug!(%id, "object failed validation");
			return Decision::Deny;
		}

		context.put(object);
		debug!(%id, "object authorized");
		Decision::Permit
	}

	fn advice(&self) -> &Advice {
		&self.advice
	}

	fn set_advice(&mut self, kind: AdviceKind, action: AdviceAction) {
		self.advice.set(kind, action);
	}
}
