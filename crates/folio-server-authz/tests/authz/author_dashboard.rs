// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for the author dashboard chain.
//!
//! Tests verify:
//! - Authors reach submissions and publications of their own context
//! - Foreign, unknown and malformed ids are indistinguishable (404)
//! - Role failures are reported as 403 before any lookup happens
//! - The handler receives the objects the chain loaded

use folio_server_authz::{
	DefaultAdviceExecutor, Role, WorkflowStage, AUTHOR_DASHBOARD_OPERATIONS,
};
use folio_server_config::{AuthzConfig, DenyStatus};
use http::StatusCode;

use super::support::{
	publication_id, run_authz_cases, submission_id, AuthzCase, TestApp, HOME_CONTEXT,
	OTHER_CONTEXT,
};

const AUTHOR: &[Role] = &[Role::Author];
const READER: &[Role] = &[Role::Reader];

// ============================================================================
// submission operation
// ============================================================================

#[tokio::test]
async fn author_can_open_own_submission() {
	let app = TestApp::new();
	let cases = [AuthzCase {
		name: "author_can_open_own_submission",
		operation: "submission",
		params: &[("submissionId", "42")],
		context: Some(HOME_CONTEXT),
		roles: Some(AUTHOR),
		expected_status: None,
	}];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn submission_ids_that_do_not_resolve_in_context_are_not_found() {
	let app = TestApp::new();
	let cases = [
		AuthzCase {
			name: "submission_from_other_context",
			operation: "submission",
			params: &[("submissionId", "42")],
			context: Some(OTHER_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
		AuthzCase {
			name: "foreign_submission_in_home_context",
			operation: "submission",
			params: &[("submissionId", "43")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
		AuthzCase {
			name: "unknown_submission",
			operation: "submission",
			params: &[("submissionId", "999")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
		AuthzCase {
			name: "malformed_submission_id",
			operation: "submission",
			params: &[("submissionId", "abc")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
		AuthzCase {
			name: "padded_submission_id",
			operation: "submission",
			params: &[("submissionId", " 42")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
		AuthzCase {
			name: "missing_submission_id",
			operation: "submission",
			params: &[],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
		AuthzCase {
			name: "no_active_context",
			operation: "submission",
			params: &[("submissionId", "42")],
			context: None,
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn role_failures_are_forbidden() {
	let app = TestApp::new();
	let cases = [
		AuthzCase {
			name: "anonymous",
			operation: "submission",
			params: &[("submissionId", "42")],
			context: Some(HOME_CONTEXT),
			roles: None,
			expected_status: Some(StatusCode::FORBIDDEN),
		},
		AuthzCase {
			name: "reader",
			operation: "submission",
			params: &[("submissionId", "42")],
			context: Some(HOME_CONTEXT),
			roles: Some(READER),
			expected_status: Some(StatusCode::FORBIDDEN),
		},
		AuthzCase {
			name: "unassigned_operation",
			operation: "workflow",
			params: &[("submissionId", "42")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::FORBIDDEN),
		},
	];
	run_authz_cases(&app, &cases).await;

	assert_eq!(app.lookup.calls(), 0);
}

#[tokio::test]
async fn malformed_id_never_reaches_lookup() {
	let app = TestApp::new();

	let outcome = app
		.decide(&author_request("submission", &[("submissionId", "abc")]))
		.await;

	assert!(!outcome.is_permitted());
	assert_eq!(app.lookup.calls(), 0);
	let response = outcome.into_result(&DefaultAdviceExecutor).unwrap_err();
	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert_eq!(
		response.message_key.as_deref(),
		Some("user.authorization.invalidSubmission")
	);
}

#[tokio::test]
async fn lookup_failure_denies() {
	let app = TestApp::new();
	app.lookup.set_failing(true);

	let outcome = app
		.decide(&author_request("submission", &[("submissionId", "42")]))
		.await;

	assert!(!outcome.is_permitted());
	assert_eq!(app.lookup.calls(), 1);
}

#[tokio::test]
async fn permitted_chain_publishes_loaded_objects() {
	let app = TestApp::new();

	let context = app
		.decide(&author_request("submission", &[("submissionId", "42")]))
		.await
		.into_result(&DefaultAdviceExecutor)
		.unwrap();

	assert_eq!(context.submission().map(|s| s.id), Some(submission_id(42)));
	assert_eq!(context.user_roles(), Some(AUTHOR));
	assert_eq!(
		context.accessible_stages(),
		Some(&[WorkflowStage::Submission, WorkflowStage::InternalReview][..])
	);
	assert!(context.publication().is_none());
	assert_eq!(app.lookup.calls(), 1);
}

// ============================================================================
// publication operation
// ============================================================================

#[tokio::test]
async fn publication_cases() {
	let app = TestApp::new();
	let cases = [
		AuthzCase {
			name: "own_publication",
			operation: "publication",
			params: &[("submissionId", "42"), ("publicationId", "5")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: None,
		},
		AuthzCase {
			name: "publication_of_other_submission",
			operation: "publication",
			params: &[("submissionId", "42"), ("publicationId", "6")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
		AuthzCase {
			name: "missing_publication_id",
			operation: "publication",
			params: &[("submissionId", "42")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
		AuthzCase {
			name: "publication_without_submission",
			operation: "publication",
			params: &[("publicationId", "5")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn publication_policy_skips_other_operations() {
	let app = TestApp::new();

	let context = app
		.decide(&author_request(
			"readSubmissionEmail",
			&[("submissionId", "42"), ("publicationId", "6")],
		))
		.await
		.into_result(&DefaultAdviceExecutor)
		.unwrap();

	assert!(context.publication().is_none());
	assert_eq!(app.lookup.calls(), 1);
}

#[tokio::test]
async fn own_publication_is_published_to_handler() {
	let app = TestApp::new();

	let context = app
		.decide(&author_request(
			"publication",
			&[("submissionId", "42"), ("publicationId", "5")],
		))
		.await
		.into_result(&DefaultAdviceExecutor)
		.unwrap();

	assert_eq!(context.publication().map(|p| p.id), Some(publication_id(5)));
	assert_eq!(context.len(), 4);
}

// ============================================================================
// configuration
// ============================================================================

#[tokio::test]
async fn forbidden_deny_status_is_honoured() {
	let app = TestApp::with_config(AuthzConfig {
		deny_status: DenyStatus::Forbidden,
		..AuthzConfig::default()
	});
	let cases = [AuthzCase {
		name: "foreign_submission_forbidden",
		operation: "submission",
		params: &[("submissionId", "43")],
		context: Some(HOME_CONTEXT),
		roles: Some(AUTHOR),
		expected_status: Some(StatusCode::FORBIDDEN),
	}];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn custom_parameter_names() {
	let app = TestApp::with_config(AuthzConfig {
		submission_param: "sid".to_string(),
		..AuthzConfig::default()
	});
	let cases = [
		AuthzCase {
			name: "custom_parameter",
			operation: "submission",
			params: &[("sid", "42")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: None,
		},
		AuthzCase {
			name: "default_parameter_ignored",
			operation: "submission",
			params: &[("submissionId", "42")],
			context: Some(HOME_CONTEXT),
			roles: Some(AUTHOR),
			expected_status: Some(StatusCode::NOT_FOUND),
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn every_dashboard_operation_is_reachable() {
	let app = TestApp::new();

	for operation in AUTHOR_DASHBOARD_OPERATIONS {
		let outcome = app
			.decide(&author_request(
				operation,
				&[("submissionId", "42"), ("publicationId", "5")],
			))
			.await;
		assert!(outcome.is_permitted(), "operation '{operation}' was denied");
	}
}

fn author_request(
	operation: &'static str,
	params: &'static [(&'static str, &'static str)],
) -> folio_server_authz::RequestArgs {
	AuthzCase {
		name: operation,
		operation,
		params,
		context: Some(HOME_CONTEXT),
		roles: Some(AUTHOR),
		expected_status: None,
	}
	.request()
}
