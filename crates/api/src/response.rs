//! Response envelope types for mutating procedures.
//!
//! Reads return the resource directly. Writes wrap their result in a
//! `{ "success": true, ... }` envelope so clients can branch on one field.

use serde::Serialize;

/// `{ "success": true, "project": T }` returned by create and update.
#[derive(Debug, Serialize)]
pub struct ProjectMutation<T: Serialize> {
    pub success: bool,
    pub project: T,
}

impl<T: Serialize> ProjectMutation<T> {
    pub fn ok(project: T) -> Self {
        Self {
            success: true,
            project,
        }
    }
}

/// `{ "success": true, "message": "..." }` returned by delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}
