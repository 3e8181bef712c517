// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use folio_server_authz::{
	testing::MemoryLookup, AuthorizationDecisionManager, AuthorizationOutcome, ContextId,
	DefaultAdviceExecutor, PolicyFactory, Publication, PublicationId, RequestArgs, Role,
	Submission, SubmissionId, UserId, WorkflowStage,
};
use folio_server_config::AuthzConfig;
use http::StatusCode;
use std::sync::{Arc, Once};

pub const HOME_CONTEXT: u64 = 7;
pub const OTHER_CONTEXT: u64 = 9;

/// Submission 42 lives in the home context, 43 in the other one.
pub const OWN_SUBMISSION: u64 = 42;
pub const FOREIGN_SUBMISSION: u64 = 43;

/// Publication 5 belongs to submission 42, 6 to submission 43.
pub const OWN_PUBLICATION: u64 = 5;
pub const FOREIGN_PUBLICATION: u64 = 6;

static TRACING: Once = Once::new();

/// Routes library logs through the test harness so failures show the chain.
pub fn init_tracing() {
	TRACING.call_once(|| {
		let _ = tracing_subscriber::fmt()
			.with_test_writer()
			.with_env_filter("folio_server_authz=debug")
			.try_init();
	});
}

pub fn context_id(id: u64) -> ContextId {
	ContextId::new(id).unwrap()
}

pub fn submission_id(id: u64) -> SubmissionId {
	SubmissionId::new(id).unwrap()
}

pub fn publication_id(id: u64) -> PublicationId {
	PublicationId::new(id).unwrap()
}

pub struct TestApp {
	pub lookup: Arc<MemoryLookup>,
	pub manager: AuthorizationDecisionManager,
}

impl TestApp {
	pub fn new() -> Self {
		Self::with_config(AuthzConfig::default())
	}

	pub fn with_config(config: AuthzConfig) -> Self {
		init_tracing();

		let lookup = Arc::new(MemoryLookup::new());
		lookup.insert_submission(
			Submission::new(submission_id(OWN_SUBMISSION), context_id(HOME_CONTEXT))
				.with_stage(WorkflowStage::InternalReview)
				.with_current_publication(publication_id(OWN_PUBLICATION)),
		);
		lookup.insert_submission(Submission::new(
			submission_id(FOREIGN_SUBMISSION),
			context_id(OTHER_CONTEXT),
		));
		lookup.insert_publication(Publication::new(
			publication_id(OWN_PUBLICATION),
			submission_id(OWN_SUBMISSION),
		));
		lookup.insert_publication(Publication::new(
			publication_id(FOREIGN_PUBLICATION),
			submission_id(FOREIGN_SUBMISSION),
		));

		let manager = PolicyFactory::from_config(&config, lookup.clone(), lookup.clone())
			.author_dashboard_policy()
			.unwrap();

		Self { lookup, manager }
	}

	pub async fn decide(&self, request: &RequestArgs) -> AuthorizationOutcome {
		self.manager.decide(request).await
	}
}

/// One request through the author dashboard chain.
pub struct AuthzCase {
	pub name: &'static str,
	pub operation: &'static str,
	pub params: &'static [(&'static str, &'static str)],
	pub context: Option<u64>,
	/// `None` sends the request anonymously.
	pub roles: Option<&'static [Role]>,
	/// `None` expects a permit.
	pub expected_status: Option<StatusCode>,
}

impl AuthzCase {
	pub fn request(&self) -> RequestArgs {
		let mut request = RequestArgs::new(self.operation).with_params(self.params.iter().copied());
		if let Some(context) = self.context {
			request = request.with_context(context_id(context));
		}
		if let Some(roles) = self.roles {
			request = request.with_user(UserId::new(1).unwrap(), roles.iter().copied());
		}
		request
	}
}

pub async fn run_authz_cases(app: &TestApp, cases: &[AuthzCase]) {
	for case in cases {
		let outcome = app.decide(&case.request()).await;
		let actual = outcome.into_result(&DefaultAdviceExecutor).err().map(|r| r.status);
		assert_eq!(
			actual, case.expected_status,
			"case '{}' returned {:?}, expected {:?}",
			case.name, actual, case.expected_status
		);
	}
}
