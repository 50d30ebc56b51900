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

//! # event-relay
//!
//! `event-relay` provisions a topic/queue/subscription topology against an
//! external managed broker and relays messages between queues through
//! registered handlers.
//!
//! Typical usage is API-first and centered on [`TopologyProvisioner`] and
//! [`MessageRelay`]. The broker itself stays behind the
//! [`TopicClient`] and [`QueueClient`] trait seams; binaries decide which
//! implementation to wire in. Internal modules are organized by domain layer
//! to keep behavior ownership explicit: [`broker`] owns the seam,
//! [`topology`] owns startup convergence, [`relay`] owns the registration
//! table and dispatch workers, and [`handlers`] owns the user-event
//! pipeline.
//!
//! ## Provision, then listen
//!
//! Provisioning must complete before the relay starts: a dispatch loop
//! resolves its queue by name and fails loudly when it does not exist yet.
//!
//! ```
//! use std::sync::Arc;
//! use event_relay::{AuditLog, MessageRelay, RegistrationIntake, TopologyProvisioner};
//! use in_memory_broker::InMemoryBroker;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let broker = Arc::new(InMemoryBroker::new());
//!
//! let provisioner = TopologyProvisioner::new(broker.clone(), broker.clone());
//! provisioner
//!     .ensure_all([
//!         ("event-user-registration", "user-create"),
//!         ("event-user-updated", "user-audit-log"),
//!     ])
//!     .await
//!     .unwrap();
//!
//! // Provisioning converges: running it again creates nothing new.
//! provisioner
//!     .ensure_linked("event-user-registration", "user-create")
//!     .await
//!     .unwrap();
//!
//! let mut relay = MessageRelay::new("user-events", broker.clone());
//! relay
//!     .register_handler(
//!         "user-create",
//!         Arc::new(RegistrationIntake::new(broker.clone(), "event-user-updated")),
//!     )
//!     .await
//!     .unwrap();
//! relay
//!     .register_handler("user-audit-log", Arc::new(AuditLog::with_tracing_sink()))
//!     .await
//!     .unwrap();
//!
//! relay.run().await.unwrap();
//! relay.shutdown();
//! # });
//! ```
//!
//! ## Failure policy
//!
//! Provisioning failures are fatal: [`error::ProvisioningError`] means the
//! topology does not exist and the process must not start listening. Handler
//! failures are local: a message whose handler fails is left unacknowledged
//! for the broker's redelivery policy, never retried in-process.

pub mod broker;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod relay;
pub mod topology;

pub use broker::client::{QueueClient, TopicClient};
pub use broker::types::{
    DeliveryProtocol, Notification, QueueLocator, QueueRef, ReceiptHandle, ReceiveAddress,
    ReceivedMessage, SubscriptionRef, TopicAddress, TopicRef,
};
pub use error::{BrokerError, HandlerError, ProvisioningError, RelayError};
pub use handlers::{AuditLog, AuditSink, RegistrationIntake, TracingAuditSink, UserRecord};
pub use relay::{MessageRelay, QueueHandler, RelaySettings};
pub use topology::TopologyProvisioner;
