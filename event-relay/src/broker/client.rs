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

//! Client trait seams for the external managed broker.
//!
//! The broker itself — its delivery guarantees, retry behavior, and wire
//! protocol — stays external. Components in this crate only depend on these
//! traits, and binaries decide which implementation to wire in.

use crate::broker::types::{
    DeliveryProtocol, Notification, QueueLocator, QueueRef, ReceiptHandle, ReceiveAddress,
    ReceivedMessage, SubscriptionRef, TopicAddress, TopicRef,
};
use crate::error::BrokerError;
use async_trait::async_trait;
use std::time::Duration;

/// Topic-side broker operations: creation, subscription management, publish.
#[async_trait]
pub trait TopicClient: Send + Sync {
    /// Ensures a topic with this name exists. Creating an already-existing
    /// topic returns the existing topic's reference; this idempotent-create
    /// contract is guaranteed by the broker, not reimplemented here.
    async fn create_topic(&self, name: &str) -> Result<TopicRef, BrokerError>;

    /// Lists every subscription in the namespace, regardless of topic.
    async fn list_subscriptions(&self) -> Result<Vec<SubscriptionRef>, BrokerError>;

    /// Links a topic to a queue endpoint under the given delivery protocol.
    async fn subscribe(
        &self,
        topic: &TopicAddress,
        protocol: DeliveryProtocol,
        endpoint: &ReceiveAddress,
    ) -> Result<SubscriptionRef, BrokerError>;

    /// Publishes one message to a topic by symbolic name. Returns the
    /// broker-assigned message id.
    async fn publish(
        &self,
        topic_name: &str,
        subject: Option<&str>,
        body: &str,
    ) -> Result<String, BrokerError>;
}

/// Queue-side broker operations: creation, address resolution, consumption.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Ensures a queue with this name exists; same idempotent-create
    /// contract as [`TopicClient::create_topic`].
    async fn create_queue(&self, name: &str) -> Result<QueueRef, BrokerError>;

    /// Looks a queue up by name without creating it. Fails with
    /// [`BrokerError::UnknownQueue`] when absent, so consumers started
    /// before provisioning fail loudly instead of listening on nothing.
    async fn resolve_queue(&self, name: &str) -> Result<QueueRef, BrokerError>;

    /// Resolves the attribute needed to address this queue as a
    /// subscription endpoint.
    async fn receive_address(&self, locator: &QueueLocator) -> Result<ReceiveAddress, BrokerError>;

    /// Long-polls the queue for up to `wait`, returning at most
    /// `max_messages` deliveries. An empty result is a normal poll outcome.
    async fn receive(
        &self,
        locator: &QueueLocator,
        max_messages: usize,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, BrokerError>;

    /// Acknowledges one delivery. A message left unacknowledged becomes
    /// visible again under the broker's redelivery policy.
    async fn acknowledge(
        &self,
        locator: &QueueLocator,
        receipt: &ReceiptHandle,
    ) -> Result<(), BrokerError>;
}
