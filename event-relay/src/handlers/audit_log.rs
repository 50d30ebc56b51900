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

//! Audit-log handler: records relayed user-updated events to a sink.

use crate::broker::types::Notification;
use crate::error::HandlerError;
use crate::handlers::UserRecord;
use crate::observability::events;
use crate::relay::QueueHandler;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const COMPONENT: &str = "audit_log";

/// Destination for audit entries. Implementations must be cheap and
/// non-blocking; the handler performs no further side effects.
pub trait AuditSink: Send + Sync {
    fn record(&self, subject: &str, record: &UserRecord);
}

/// Emits audit entries as structured tracing events.
#[derive(Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, subject: &str, record: &UserRecord) {
        info!(
            event = events::AUDIT_RECORD,
            component = COMPONENT,
            subject = subject,
            username = record.username.as_str(),
            first_name = record.first_name.as_str(),
            last_name = record.last_name.as_str(),
            "audit log entry"
        );
    }
}

/// Handler for the audit queue. Expects a subject and a JSON [`UserRecord`]
/// body; anything else is a malformed delivery.
pub struct AuditLog {
    sink: Arc<dyn AuditSink>,
}

impl AuditLog {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Convenience constructor wiring the tracing sink.
    pub fn with_tracing_sink() -> Self {
        Self::new(Arc::new(TracingAuditSink))
    }
}

#[async_trait]
impl QueueHandler for AuditLog {
    async fn on_notification(&self, notification: Notification) -> Result<(), HandlerError> {
        let subject = notification
            .subject
            .as_deref()
            .ok_or_else(|| HandlerError::malformed("audit notification is missing a subject"))?;

        let record: UserRecord = serde_json::from_str(&notification.body)
            .map_err(|err| HandlerError::malformed(format!("body is not a user record: {err}")))?;

        self.sink.record(subject, &record);
        Ok(())
    }
}
