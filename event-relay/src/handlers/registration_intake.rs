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

//! Registration-intake handler: consumes raw sign-up messages and
//! republishes derived user-updated events.

use crate::broker::client::TopicClient;
use crate::broker::types::Notification;
use crate::error::HandlerError;
use crate::handlers::UserRecord;
use crate::observability::{events, fields};
use crate::relay::QueueHandler;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const COMPONENT: &str = "registration_intake";

/// Subject tag carried by every republished user-updated event.
pub const USER_NEW_SUBJECT: &str = "user.new";

/// Handler for the registration queue. Each inbound `"First Last"` body
/// produces exactly one outbound publish of the derived [`UserRecord`];
/// malformed bodies produce none.
pub struct RegistrationIntake {
    topics: Arc<dyn TopicClient>,
    updated_topic: String,
}

impl RegistrationIntake {
    pub fn new(topics: Arc<dyn TopicClient>, updated_topic: &str) -> Self {
        Self {
            topics,
            updated_topic: updated_topic.to_string(),
        }
    }
}

#[async_trait]
impl QueueHandler for RegistrationIntake {
    async fn on_notification(&self, notification: Notification) -> Result<(), HandlerError> {
        let user = UserRecord::parse_display_name(&notification.body)?;
        let body = serde_json::to_string(&user)?;

        let message_id = self
            .topics
            .publish(&self.updated_topic, Some(USER_NEW_SUBJECT), &body)
            .await?;

        info!(
            event = events::USER_RECORD_CREATED,
            component = COMPONENT,
            username = user.username.as_str(),
            subject = fields::format_subject(notification.subject.as_deref()),
            msg_id = message_id.as_str(),
            "created user record"
        );
        Ok(())
    }
}
