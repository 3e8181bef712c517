// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordered composition of policies.
//!
//! Policies run one at a time in registration order: later policies read what
//! earlier ones stored in the [`AuthorizationContext`].
//!
//! - [`PolicySet`] combines member decisions with a [`CombiningAlgorithm`] and
//!   is itself a policy, so sets nest.
//! - [`AuthorizationDecisionManager`] owns the root set, creates a fresh
//!   context per request and reports an [`AuthorizationOutcome`].

use async_trait::async_trait;
use tracing::{debug, info, instrument, trace};

use crate::context::AuthorizationContext;
use crate::decision::{Advice, AdviceAction, AdviceKind, Decision};
use crate::policy::{AuthorizationPolicy, PolicyVerdict};
use crate::request::PolicyRequest;
use crate::response::{AdviceExecutor, DenyResponse};

/// How a [`PolicySet`] combines its members' decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombiningAlgorithm {
	/// The first denial ends evaluation and denies the set.
	#[default]
	DenyOverrides,
	/// The first permit ends evaluation and permits the set.
	PermitOverrides,
}

/// An ordered list of policies evaluated as one.
pub struct PolicySet {
	policies: Vec<Box<dyn AuthorizationPolicy>>,
	algorithm: CombiningAlgorithm,
	effect_if_no_policy_applies: Decision,
	advice: Advice,
}

impl PolicySet {
	/// Creates an empty set that denies when no member applies.
	pub fn new(algorithm: CombiningAlgorithm) -> Self {
		Self {
			policies: Vec::new(),
			algorithm,
			effect_if_no_policy_applies: Decision::Deny,
			advice: Advice::new(),
		}
	}

	/// Appends `policy`; it runs after every policy already in the set.
	pub fn add_policy(&mut self, policy: impl AuthorizationPolicy + 'static) {
		self.policies.push(Box::new(policy));
	}

	/// Prepends `policy`; it runs before every policy already in the set.
	pub fn add_policy_first(&mut self, policy: impl AuthorizationPolicy + 'static) {
		self.policies.insert(0, Box::new(policy));
	}

	/// Builder form of [`PolicySet::add_policy`].
	pub fn with_policy(mut self, policy: impl AuthorizationPolicy + 'static) -> Self {
		self.add_policy(policy);
		self
	}

	pub fn set_effect_if_no_policy_applies(&mut self, effect: Decision) {
		self.effect_if_no_policy_applies = effect;
	}

	/// Builder form of [`PolicySet::set_effect_if_no_policy_applies`].
	pub fn with_effect_if_no_policy_applies(mut self, effect: Decision) -> Self {
		self.set_effect_if_no_policy_applies(effect);
		self
	}

	pub fn algorithm(&self) -> CombiningAlgorithm {
		self.algorithm
	}

	/// Member names in evaluation order.
	pub fn policy_names(&self) -> Vec<&'static str> {
		self.policies.iter().map(|p| p.name()).collect()
	}

	pub fn len(&self) -> usize {
		self.policies.len()
	}

	pub fn is_empty(&self) -> bool {
		self.policies.is_empty()
	}

	/// The member's advice when it has any, otherwise the set's own.
	fn denial(&self, member_advice: Option<Advice>) -> PolicyVerdict {
		match member_advice {
			Some(advice) if !advice.is_empty() => PolicyVerdict::deny(advice),
			_ => PolicyVerdict::deny(self.advice.clone()),
		}
	}

	fn fallback(&self) -> PolicyVerdict {
		match self.effect_if_no_policy_applies {
			Decision::Permit => PolicyVerdict::permit(),
			Decision::Deny => self.denial(None),
			Decision::Refer => PolicyVerdict::refer(),
		}
	}
}

impl Default for PolicySet {
	fn default() -> Self {
		Self::new(CombiningAlgorithm::default())
	}
}

#[async_trait]
impl AuthorizationPolicy for PolicySet {
	fn name(&self) -> &'static str {
		"policy_set"
	}

	async fn evaluate(
		&self,
		request: &dyn PolicyRequest,
		context: &mut AuthorizationContext,
	) -> Decision {
		self.verdict(request, context).await.decision
	}

	fn advice(&self) -> &Advice {
		&self.advice
	}

	fn set_advice(&mut self, kind: AdviceKind, action: AdviceAction) {
		self.advice.set(kind, action);
	}

	async fn verdict(
		&self,
		request: &dyn PolicyRequest,
		context: &mut AuthorizationContext,
	) -> PolicyVerdict {
		let mut permitted = false;
		let mut first_denial: Option<Option<Advice>> = None;

		for policy in &self.policies {
			let verdict = policy.verdict(request, context).await;
			trace!(policy = policy.name(), decision = %verdict.decision, "policy evaluated");

			match (self.algorithm, verdict.decision) {
				(_, Decision::Refer) => {}
				(CombiningAlgorithm::DenyOverrides, Decision::Deny) => {
					debug!(policy = policy.name(), "policy denied, stopping chain");
					return self.denial(verdict.advice);
				}
				(CombiningAlgorithm::PermitOverrides, Decision::Permit) => {
					return PolicyVerdict::permit();
				}
				(_, Decision::Permit) => permitted = true,
				(_, Decision::Deny) => {
					if first_denial.is_none() {
						first_denial = Some(verdict.advice);
					}
				}
			}
		}

		if permitted {
			return PolicyVerdict::permit();
		}
		if let Some(advice) = first_denial {
			return self.denial(advice);
		}
		self.fallback()
	}
}

/// The result of authorizing one request.
#[derive(Debug)]
pub struct AuthorizationOutcome {
	decision: Decision,
	advice: Option<Advice>,
	context: AuthorizationContext,
}

impl AuthorizationOutcome {
	/// [`Decision::Permit`] or [`Decision::Deny`]; never `Refer`.
	pub fn decision(&self) -> Decision {
		self.decision
	}

	pub fn is_permitted(&self) -> bool {
		self.decision.is_permit()
	}

	/// Advice of the policy responsible for a denial.
	pub fn advice(&self) -> Option<&Advice> {
		self.advice.as_ref()
	}

	/// Objects stored during evaluation.
	///
	/// After a denial this may hold objects from policies that permitted before
	/// the denying one; handlers must only read it when permitted.
	pub fn context(&self) -> &AuthorizationContext {
		&self.context
	}

	/// Hands the context to the handler, or runs the advice through `executor`.
	pub fn into_result(
		self,
		executor: &dyn AdviceExecutor,
	) -> Result<AuthorizationContext, DenyResponse> {
		if self.is_permitted() {
			Ok(self.context)
		} else {
			Err(executor.execute(self.advice.as_ref()))
		}
	}
}

/// Runs a request through the root policy set.
///
/// The root set uses [`CombiningAlgorithm::DenyOverrides`] and denies when empty.
#[derive(Default)]
pub struct AuthorizationDecisionManager {
	root: PolicySet,
}

impl AuthorizationDecisionManager {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_policy(&mut self, policy: impl AuthorizationPolicy + 'static) {
		self.root.add_policy(policy);
	}

	/// Adds `policy` ahead of everything registered so far.
	pub fn add_policy_first(&mut self, policy: impl AuthorizationPolicy + 'static) {
		self.root.add_policy_first(policy);
	}

	/// Builder form of [`AuthorizationDecisionManager::add_policy`].
	pub fn with_policy(mut self, policy: impl AuthorizationPolicy + 'static) -> Self {
		self.add_policy(policy);
		self
	}

	pub fn policy_names(&self) -> Vec<&'static str> {
		self.root.policy_names()
	}

	#[instrument(
		level = "debug",
		skip(self, request),
		fields(operation = request.operation())
	)]
	pub async fn decide(&self, request: &dyn PolicyRequest) -> AuthorizationOutcome {
		let mut context = AuthorizationContext::new();
		let verdict = self.root.verdict(request, &mut context).await;

		if verdict.decision.is_permit() {
			debug!(objects = context.len(), "authorization permitted");
			return AuthorizationOutcome {
				decision: Decision::Permit,
				advice: None,
				context,
			};
		}

		info!(
			operation = request.operation(),
			user_id = ?request.user_id().map(|u| u.get()),
			response = ?verdict.advice.as_ref().and_then(Advice::call_on_deny),
			"authorization denied"
		);
		AuthorizationOutcome {
			decision: Decision::Deny,
			advice: verdict.advice,
			context,
		}
	}
}
