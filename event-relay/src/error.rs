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

//! Error taxonomy shared across the broker seam, provisioning, and the relay.

use thiserror::Error;

/// Failures reported by the external broker through the client seams.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The broker endpoint could not be reached at all.
    #[error("broker unreachable: {0}")]
    Unreachable(String),
    /// The broker answered but refused the request.
    #[error("broker rejected request: {0}")]
    Rejected(String),
    #[error("unknown topic: {0}")]
    UnknownTopic(String),
    #[error("unknown queue: {0}")]
    UnknownQueue(String),
}

/// Failures during startup topology provisioning.
///
/// Any broker failure maps here: the relay cannot function without its
/// topology, so callers must treat this as fatal to process startup.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("messaging topology unavailable: {source}")]
    Unavailable {
        #[from]
        source: BrokerError,
    },
}

/// Failures raised by a queue handler while processing one notification.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The delivered payload does not match the expected shape. Not retried
    /// in-process; the message stays with the broker's redelivery policy.
    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },
    /// An outbound record could not be encoded.
    #[error("unable to encode outbound payload: {0}")]
    Encode(#[from] serde_json::Error),
    /// The broker failed while the handler performed its side effect.
    #[error(transparent)]
    Broker(#[from] BrokerError),
}

impl HandlerError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }
}

/// Failures in relay handler registration and startup.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("handler already registered for queue `{queue}`")]
    HandlerAlreadyRegistered { queue: String },
    #[error("no handler registered for queue `{queue}`")]
    HandlerNotFound { queue: String },
    /// A registered queue could not be resolved when the relay started.
    /// Provisioning must complete before the relay begins listening.
    #[error("queue `{queue}` is not available: {source}")]
    QueueUnavailable {
        queue: String,
        source: BrokerError,
    },
    #[error("relay is already running")]
    AlreadyRunning,
}
