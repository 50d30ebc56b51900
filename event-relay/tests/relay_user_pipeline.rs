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

mod support;

use event_relay::broker::client::TopicClient;
use event_relay::handlers::UserRecord;
use event_relay::{AuditLog, MessageRelay, RegistrationIntake, RelayError};
use in_memory_broker::InMemoryBroker;
use std::sync::Arc;
use std::time::Duration;
use support::{
    fast_settings, provision_default_topology, RecordingSink, AUDIT_QUEUE, REGISTRATION_QUEUE,
    REGISTRATION_TOPIC, UPDATED_TOPIC,
};

const PIPELINE_DEADLINE: Duration = Duration::from_secs(5);

async fn start_pipeline(
    broker: &Arc<InMemoryBroker>,
    sink: Arc<RecordingSink>,
) -> MessageRelay {
    let mut relay = MessageRelay::with_settings("user-events", broker.clone(), fast_settings());
    relay
        .register_handler(
            REGISTRATION_QUEUE,
            Arc::new(RegistrationIntake::new(broker.clone(), UPDATED_TOPIC)),
        )
        .await
        .expect("intake handler registered");
    relay
        .register_handler(AUDIT_QUEUE, Arc::new(AuditLog::new(sink)))
        .await
        .expect("audit handler registered");
    relay.run().await.expect("relay starts");
    relay
}

#[tokio::test(flavor = "multi_thread")]
async fn registration_message_flows_through_to_the_audit_sink() {
    support::init_logging();
    let broker = Arc::new(InMemoryBroker::new());
    provision_default_topology(&broker).await;

    let sink = Arc::new(RecordingSink::default());
    let mut relay = start_pipeline(&broker, sink.clone()).await;

    broker
        .publish(REGISTRATION_TOPIC, None, "Ford Prefect")
        .await
        .expect("registration published");

    let delivered =
        support::wait_until(PIPELINE_DEADLINE, || !sink.entries().is_empty()).await;
    relay.shutdown();

    assert!(delivered, "audit sink never received the relayed record");
    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "user.new");
    assert_eq!(
        entries[0].1,
        UserRecord {
            first_name: "Ford".to_string(),
            last_name: "Prefect".to_string(),
            username: "ford-prefect".to_string(),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_registration_is_never_forwarded_nor_acknowledged() {
    support::init_logging();
    // Short visibility so the unacknowledged message becomes visible again
    // within the test window.
    let broker = Arc::new(InMemoryBroker::with_visibility_timeout(
        Duration::from_millis(100),
    ));
    provision_default_topology(&broker).await;

    let sink = Arc::new(RecordingSink::default());
    let mut relay = start_pipeline(&broker, sink.clone()).await;

    broker
        .publish(REGISTRATION_TOPIC, None, "Ford")
        .await
        .expect("malformed registration published");

    // The message keeps cycling pending -> in-flight -> pending: the relay
    // rejects it every time and leaves redelivery to the broker. Give it a
    // few visibility cycles to prove no acknowledgement ever happens.
    tokio::time::sleep(Duration::from_millis(400)).await;
    relay.shutdown();

    assert!(sink.entries().is_empty(), "malformed body must not reach audit");
    let (pending, in_flight) = broker
        .queue_depths(REGISTRATION_QUEUE)
        .await
        .expect("queue exists");
    assert_eq!(
        pending + in_flight,
        1,
        "rejected message must stay with the broker"
    );
    assert_eq!(broker.queue_depths(AUDIT_QUEUE).await, Some((0, 0)));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_handler_registration_is_rejected() {
    support::init_logging();
    let broker = Arc::new(InMemoryBroker::new());
    provision_default_topology(&broker).await;

    let relay = MessageRelay::with_settings("user-events", broker.clone(), fast_settings());
    relay
        .register_handler(AUDIT_QUEUE, Arc::new(AuditLog::with_tracing_sink()))
        .await
        .expect("first registration succeeds");

    let err = relay
        .register_handler(AUDIT_QUEUE, Arc::new(AuditLog::with_tracing_sink()))
        .await
        .expect_err("second registration fails");

    assert!(matches!(err, RelayError::HandlerAlreadyRegistered { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn relay_refuses_to_start_before_provisioning() {
    support::init_logging();
    let broker = Arc::new(InMemoryBroker::new());

    let mut relay = MessageRelay::with_settings("user-events", broker.clone(), fast_settings());
    relay
        .register_handler(AUDIT_QUEUE, Arc::new(AuditLog::with_tracing_sink()))
        .await
        .expect("registration succeeds");

    let err = relay.run().await.expect_err("run must fail on missing queue");

    assert!(matches!(err, RelayError::QueueUnavailable { .. }));
}
