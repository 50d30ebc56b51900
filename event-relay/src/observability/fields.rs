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

//! Canonical structured field keys and value-format helpers.

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const RELAY: &str = "relay";
pub const WORKER_THREAD: &str = "worker_thread";

pub const TOPIC: &str = "topic";
pub const QUEUE: &str = "queue";
pub const SUBJECT: &str = "subject";
pub const MSG_ID: &str = "msg_id";
pub const ERR: &str = "err";
pub const REASON: &str = "reason";

pub const NONE: &str = "none";
pub const DEFAULT_WORKER_THREAD: &str = "unknown-thread";

/// Renders an optional notification subject for log fields.
pub fn format_subject(subject: Option<&str>) -> &str {
    subject.unwrap_or(NONE)
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_WORKER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

#[cfg(test)]
mod tests {
    use super::{format_subject, thread_name_or_default, DEFAULT_WORKER_THREAD, NONE};

    #[test]
    fn format_subject_returns_value_when_present() {
        assert_eq!(format_subject(Some("user.new")), "user.new");
    }

    #[test]
    fn format_subject_falls_back_when_absent() {
        assert_eq!(format_subject(None), NONE);
    }

    #[test]
    fn thread_name_or_default_falls_back_when_absent() {
        assert_eq!(thread_name_or_default(None), DEFAULT_WORKER_THREAD);
        assert_eq!(thread_name_or_default(Some("named-thread")), "named-thread");
    }
}
