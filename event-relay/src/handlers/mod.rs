/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Concrete queue handlers for the user-event pipeline and the record type
//! they exchange.

pub mod audit_log;
pub mod registration_intake;

pub use audit_log::{AuditLog, AuditSink, TracingAuditSink};
pub use registration_intake::RegistrationIntake;

use crate::error::HandlerError;
use serde::{Deserialize, Serialize};

/// Wire shape of the user record relayed between the two queues. Immutable
/// once built; exists only as a message payload.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl UserRecord {
    /// Builds a record from two name tokens, deriving the username as
    /// `lowercase(first) + "-" + lowercase(last)`.
    pub fn from_name_tokens(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            username: format!(
                "{}-{}",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            ),
        }
    }

    /// Parses a `"First Last"` display name. The body must be exactly two
    /// non-empty space-separated tokens.
    pub fn parse_display_name(body: &str) -> Result<Self, HandlerError> {
        let mut tokens = body.split(' ');
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(first_name), Some(last_name), None)
                if !first_name.is_empty() && !last_name.is_empty() =>
            {
                Ok(Self::from_name_tokens(first_name, last_name))
            }
            _ => Err(HandlerError::malformed(
                "body must be exactly two space-separated name tokens",
            )),
        }
    }
}
