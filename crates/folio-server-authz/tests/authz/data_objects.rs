// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Data object policies evaluated on their own, outside a full chain.

use folio_server_authz::{
	AssocType, AuthorizationContext, AuthorizationPolicy, Decision, PublicationRequiredPolicy,
	RequestArgs, Submission, SubmissionRequiredPolicy,
};
use proptest::prelude::*;

use super::support::{
	context_id, init_tracing, publication_id, submission_id, TestApp, HOME_CONTEXT,
	OTHER_CONTEXT,
};

fn submission_request(raw: &str, context: u64) -> RequestArgs {
	RequestArgs::new("submission")
		.with_param("submissionId", raw)
		.with_context(context_id(context))
}

#[tokio::test]
async fn submission_scenarios() {
	let app = TestApp::new();
	let policy = SubmissionRequiredPolicy::new(app.lookup.clone());

	let mut context = AuthorizationContext::new();
	let decision = policy
		.evaluate(&submission_request("42", HOME_CONTEXT), &mut context)
		.await;
	assert_eq!(decision, Decision::Permit);
	assert_eq!(context.submission().map(|s| s.id), Some(submission_id(42)));

	let mut context = AuthorizationContext::new();
	let verdict = policy
		.verdict(&submission_request("42", OTHER_CONTEXT), &mut context)
		.await;
	assert_eq!(verdict.decision, Decision::Deny);
	assert!(verdict.advice.is_some());
	assert!(context.is_empty());
}

#[tokio::test]
async fn publication_scenario() {
	let app = TestApp::new();
	let policy = PublicationRequiredPolicy::new(app.lookup.clone());
	let request = RequestArgs::new("publication").with_param("publicationId", "5");
	let mut context = AuthorizationContext::new();

	assert_eq!(policy.evaluate(&request, &mut context).await, Decision::Permit);
	assert_eq!(context.publication().map(|p| p.id), Some(publication_id(5)));
}

#[tokio::test]
async fn re_evaluation_overwrites_single_entry() {
	let app = TestApp::new();
	let policy = SubmissionRequiredPolicy::new(app.lookup.clone());
	let request = submission_request("42", HOME_CONTEXT);
	let mut context = AuthorizationContext::new();
	context.put(Submission::new(submission_id(1), context_id(HOME_CONTEXT)));

	assert_eq!(policy.evaluate(&request, &mut context).await, Decision::Permit);
	assert_eq!(policy.evaluate(&request, &mut context).await, Decision::Permit);

	let submissions = context
		.iter()
		.filter(|(tag, _)| *tag == AssocType::Submission)
		.count();
	assert_eq!(submissions, 1);
	assert_eq!(context.submission().map(|s| s.id), Some(submission_id(42)));
}

#[tokio::test]
async fn unlisted_operation_permits_without_lookup() {
	let app = TestApp::new();
	let policy = SubmissionRequiredPolicy::with_parameter(
		app.lookup.clone(),
		"submissionId",
		Some(vec!["submission".to_string()]),
	)
	.unwrap();
	let request = RequestArgs::new("index").with_param("submissionId", "43");
	let mut context = AuthorizationContext::new();

	assert_eq!(policy.evaluate(&request, &mut context).await, Decision::Permit);
	assert!(context.is_empty());
	assert_eq!(app.lookup.calls(), 0);
}

proptest! {
	#[test]
	fn malformed_ids_deny_without_lookup(raw in "[a-zA-Z.+\\-][a-zA-Z0-9.+\\-]{0,12}") {
		init_tracing();
		let app = TestApp::new();
		let policy = SubmissionRequiredPolicy::new(app.lookup.clone());
		let mut context = AuthorizationContext::new();

		let decision = tokio_test::block_on(
			policy.evaluate(&submission_request(&raw, HOME_CONTEXT), &mut context),
		);

		prop_assert_eq!(decision, Decision::Deny);
		prop_assert!(context.is_empty());
		prop_assert_eq!(app.lookup.calls(), 0);
	}

	#[test]
	fn unknown_ids_deny_after_one_lookup(id in 1000u64..u64::MAX) {
		let app = TestApp::new();
		let policy = SubmissionRequiredPolicy::new(app.lookup.clone());
		let mut context = AuthorizationContext::new();

		let decision = tokio_test::block_on(
			policy.evaluate(&submission_request(&id.to_string(), HOME_CONTEXT), &mut context),
		);

		prop_assert_eq!(decision, Decision::Deny);
		prop_assert!(context.is_empty());
		prop_assert_eq!(app.lookup.calls(), 1);
	}
}
