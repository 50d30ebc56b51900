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

use event_relay::handlers::{AuditSink, UserRecord};
use event_relay::{RelaySettings, TopologyProvisioner};
use in_memory_broker::InMemoryBroker;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) const REGISTRATION_TOPIC: &str = "event-user-registration";
pub(crate) const REGISTRATION_QUEUE: &str = "user-create";
#[allow(dead_code)]
pub(crate) const UPDATED_TOPIC: &str = "event-user-updated";
#[allow(dead_code)]
pub(crate) const AUDIT_QUEUE: &str = "user-audit-log";

pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt::try_init();
}

pub(crate) fn make_provisioner(broker: &Arc<InMemoryBroker>) -> TopologyProvisioner {
    TopologyProvisioner::new(broker.clone(), broker.clone())
}

#[allow(dead_code)]
pub(crate) async fn provision_default_topology(broker: &Arc<InMemoryBroker>) {
    make_provisioner(broker)
        .ensure_all([
            (REGISTRATION_TOPIC, REGISTRATION_QUEUE),
            (UPDATED_TOPIC, AUDIT_QUEUE),
        ])
        .await
        .expect("provisioning should succeed");
}

/// Settings tight enough to keep the end-to-end tests fast.
#[allow(dead_code)]
pub(crate) fn fast_settings() -> RelaySettings {
    RelaySettings {
        max_messages: 10,
        receive_wait: Duration::from_millis(50),
        error_backoff: Duration::from_millis(50),
    }
}

/// Audit sink capturing entries for assertions.
#[allow(dead_code)]
#[derive(Default)]
pub(crate) struct RecordingSink {
    entries: Mutex<Vec<(String, UserRecord)>>,
}

impl RecordingSink {
    #[allow(dead_code)]
    pub(crate) fn entries(&self) -> Vec<(String, UserRecord)> {
        self.entries.lock().expect("sink lock").clone()
    }
}

impl AuditSink for RecordingSink {
    fn record(&self, subject: &str, record: &UserRecord) {
        self.entries
            .lock()
            .expect("sink lock")
            .push((subject.to_string(), record.clone()));
    }
}

/// Polls `condition` until it holds or the deadline passes.
#[allow(dead_code)]
pub(crate) async fn wait_until<F>(deadline: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let started = std::time::Instant::now();
    while started.elapsed() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
