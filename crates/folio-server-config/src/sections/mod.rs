// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod authz;

pub use authz::{
	AuthzConfig, AuthzConfigLayer, DenyStatus, DEFAULT_PUBLICATION_PARAM, DEFAULT_SUBMISSION_PARAM,
};
