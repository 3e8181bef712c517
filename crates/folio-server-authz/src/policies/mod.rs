// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Concrete authorization policies.

pub mod data_object;
pub mod publication;
pub mod role;
pub mod stage;
pub mod submission;

pub use data_object::{DataObjectRequiredPolicy, DataObjectResolver};
pub use publication::{PublicationRequiredPolicy, PublicationResolver};
pub use role::{RoleAssignments, RoleBasedHandlerOperationPolicy};
pub use stage::{accessible_stages, SubmissionStageAccessPolicy};
pub use submission::{SubmissionRequiredPolicy, SubmissionResolver};
