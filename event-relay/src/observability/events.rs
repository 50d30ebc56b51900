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

//! Canonical structured event names used across `event-relay`.

// Topology provisioning events.
pub const TOPOLOGY_ENSURE_START: &str = "topology_ensure_start";
pub const TOPOLOGY_TOPIC_OK: &str = "topology_topic_ok";
pub const TOPOLOGY_QUEUE_OK: &str = "topology_queue_ok";
pub const TOPOLOGY_SUBSCRIPTION_CREATED: &str = "topology_subscription_created";
pub const TOPOLOGY_SUBSCRIPTION_REUSED: &str = "topology_subscription_reused";

// Relay lifecycle events.
pub const RELAY_HANDLER_REGISTERED: &str = "relay_handler_registered";
pub const RELAY_HANDLER_UNREGISTERED: &str = "relay_handler_unregistered";
pub const RELAY_RUN_START: &str = "relay_run_start";
pub const RELAY_SHUTDOWN: &str = "relay_shutdown";
pub const RELAY_WORKER_PANICKED: &str = "relay_worker_panicked";

// Queue dispatch worker events.
pub const DISPATCH_WORKER_START: &str = "dispatch_worker_start";
pub const DISPATCH_WORKER_STOP: &str = "dispatch_worker_stop";
pub const DISPATCH_HANDLER_OK: &str = "dispatch_handler_ok";
pub const DISPATCH_HANDLER_REJECTED: &str = "dispatch_handler_rejected";
pub const DISPATCH_HANDLER_FAILED: &str = "dispatch_handler_failed";
pub const DISPATCH_ACK_FAILED: &str = "dispatch_ack_failed";
pub const DISPATCH_POLL_FAILED: &str = "dispatch_poll_failed";

// Handler-level events.
pub const USER_RECORD_CREATED: &str = "user_record_created";
pub const AUDIT_RECORD: &str = "audit_record";
