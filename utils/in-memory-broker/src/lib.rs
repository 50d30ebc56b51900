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

//! In-process broker standing in for the external managed services.
//!
//! Implements the `event-relay` [`TopicClient`] and [`QueueClient`] seams
//! with broker-like semantics: idempotent create for topics and queues,
//! endpoint-addressed subscriptions with fan-out publish, and per-queue
//! pending/in-flight tracking where an unacknowledged delivery becomes
//! visible again after its visibility deadline. Used by the non-production
//! service profile and by the test suites.
//!
//! Test-support affordances: a reachability toggle for fault injection and
//! a subscribe-call counter for provisioning assertions.

use async_trait::async_trait;
use event_relay::broker::client::{QueueClient, TopicClient};
use event_relay::broker::types::{
    DeliveryProtocol, Notification, QueueLocator, QueueRef, ReceiptHandle, ReceiveAddress,
    ReceivedMessage, SubscriptionRef, TopicAddress, TopicRef,
};
use event_relay::error::BrokerError;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, Notify};
use tracing::debug;

const TOPIC_ADDRESS_PREFIX: &str = "urn:local-broker:topic:";
const QUEUE_ADDRESS_PREFIX: &str = "urn:local-broker:queue:";
const QUEUE_LOCATOR_PREFIX: &str = "local://queues/";

/// Default visibility deadline for an unacknowledged delivery.
pub const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::from_secs(30);

struct InFlight {
    notification: Notification,
    visible_again: Instant,
}

struct QueueState {
    queue: QueueRef,
    receive_address: ReceiveAddress,
    pending: VecDeque<Notification>,
    in_flight: HashMap<String, InFlight>,
    arrival: Arc<Notify>,
}

impl QueueState {
    fn new(name: &str) -> Self {
        Self {
            queue: QueueRef {
                name: name.to_string(),
                locator: QueueLocator::new(format!("{QUEUE_LOCATOR_PREFIX}{name}")),
            },
            receive_address: ReceiveAddress::new(format!("{QUEUE_ADDRESS_PREFIX}{name}")),
            pending: VecDeque::new(),
            in_flight: HashMap::new(),
            arrival: Arc::new(Notify::new()),
        }
    }

    /// Returns expired in-flight deliveries to the pending queue.
    fn requeue_expired(&mut self, now: Instant) {
        let expired: Vec<String> = self
            .in_flight
            .iter()
            .filter(|(_, entry)| entry.visible_again <= now)
            .map(|(receipt, _)| receipt.clone())
            .collect();
        for receipt in expired {
            if let Some(entry) = self.in_flight.remove(&receipt) {
                self.pending.push_back(entry.notification);
            }
        }
    }
}

struct BrokerState {
    topics: HashMap<String, TopicRef>,
    queues: HashMap<String, QueueState>,
    subscriptions: Vec<SubscriptionRef>,
}

impl BrokerState {
    fn queue_by_locator_mut(
        &mut self,
        locator: &QueueLocator,
    ) -> Result<&mut QueueState, BrokerError> {
        self.queues
            .values_mut()
            .find(|state| &state.queue.locator == locator)
            .ok_or_else(|| BrokerError::UnknownQueue(locator.to_string()))
    }
}

/// The in-process broker. Thread-safe; share it via [`Arc`] and pass the
/// same instance as both [`TopicClient`] and [`QueueClient`].
pub struct InMemoryBroker {
    state: Mutex<BrokerState>,
    reachable: AtomicBool,
    subscribe_calls: AtomicUsize,
    visibility_timeout: Duration,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::with_visibility_timeout(DEFAULT_VISIBILITY_TIMEOUT)
    }

    /// Builds a broker whose unacknowledged deliveries become visible again
    /// after `visibility_timeout`.
    pub fn with_visibility_timeout(visibility_timeout: Duration) -> Self {
        Self {
            state: Mutex::new(BrokerState {
                topics: HashMap::new(),
                queues: HashMap::new(),
                subscriptions: Vec::new(),
            }),
            reachable: AtomicBool::new(true),
            subscribe_calls: AtomicUsize::new(0),
            visibility_timeout,
        }
    }

    /// Fault injection: while `false`, every operation fails with
    /// [`BrokerError::Unreachable`].
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Number of subscription-create calls accepted so far.
    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    pub async fn topic_count(&self) -> usize {
        self.state.lock().await.topics.len()
    }

    pub async fn queue_count(&self) -> usize {
        self.state.lock().await.queues.len()
    }

    pub async fn subscription_count(&self) -> usize {
        self.state.lock().await.subscriptions.len()
    }

    /// (pending, in-flight) depths of a queue, or `None` if it does not exist.
    pub async fn queue_depths(&self, name: &str) -> Option<(usize, usize)> {
        let state = self.state.lock().await;
        state
            .queues
            .get(name)
            .map(|queue| (queue.pending.len(), queue.in_flight.len()))
    }

    fn check_reachable(&self) -> Result<(), BrokerError> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BrokerError::Unreachable(
                "in-memory broker marked unreachable".to_string(),
            ))
        }
    }
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TopicClient for InMemoryBroker {
    async fn create_topic(&self, name: &str) -> Result<TopicRef, BrokerError> {
        self.check_reachable()?;
        let mut state = self.state.lock().await;
        let topic = state.topics.entry(name.to_string()).or_insert_with(|| TopicRef {
            name: name.to_string(),
            address: TopicAddress::new(format!("{TOPIC_ADDRESS_PREFIX}{name}")),
        });
        Ok(topic.clone())
    }

    async fn list_subscriptions(&self) -> Result<Vec<SubscriptionRef>, BrokerError> {
        self.check_reachable()?;
        Ok(self.state.lock().await.subscriptions.clone())
    }

    async fn subscribe(
        &self,
        topic: &TopicAddress,
        protocol: DeliveryProtocol,
        endpoint: &ReceiveAddress,
    ) -> Result<SubscriptionRef, BrokerError> {
        self.check_reachable()?;
        let mut state = self.state.lock().await;
        if !state.topics.values().any(|known| &known.address == topic) {
            return Err(BrokerError::UnknownTopic(topic.to_string()));
        }

        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        let subscription = SubscriptionRef {
            topic: topic.clone(),
            endpoint: endpoint.clone(),
            protocol,
        };
        state.subscriptions.push(subscription.clone());
        debug!(topic = %topic, endpoint = %endpoint, "subscription stored");
        Ok(subscription)
    }

    async fn publish(
        &self,
        topic_name: &str,
        subject: Option<&str>,
        body: &str,
    ) -> Result<String, BrokerError> {
        self.check_reachable()?;
        let mut state = self.state.lock().await;
        let topic_address = state
            .topics
            .get(topic_name)
            .map(|topic| topic.address.clone())
            .ok_or_else(|| BrokerError::UnknownTopic(topic_name.to_string()))?;

        let message_id = uuid::Uuid::new_v4().to_string();
        let endpoints: Vec<ReceiveAddress> = state
            .subscriptions
            .iter()
            .filter(|subscription| {
                subscription.topic == topic_address
                    && subscription.protocol == DeliveryProtocol::QueueDelivery
            })
            .map(|subscription| subscription.endpoint.clone())
            .collect();

        for endpoint in endpoints {
            if let Some(queue) = state
                .queues
                .values_mut()
                .find(|queue| queue.receive_address == endpoint)
            {
                queue.pending.push_back(Notification {
                    message_id: message_id.clone(),
                    subject: subject.map(str::to_string),
                    body: body.to_string(),
                });
                queue.arrival.notify_one();
            }
        }

        debug!(topic = topic_name, msg_id = message_id.as_str(), "published");
        Ok(message_id)
    }
}

#[async_trait]
impl QueueClient for InMemoryBroker {
    async fn create_queue(&self, name: &str) -> Result<QueueRef, BrokerError> {
        self.check_reachable()?;
        let mut state = self.state.lock().await;
        let queue = state
            .queues
            .entry(name.to_string())
            .or_insert_with(|| QueueState::new(name));
        Ok(queue.queue.clone())
    }

    async fn resolve_queue(&self, name: &str) -> Result<QueueRef, BrokerError> {
        self.check_reachable()?;
        let state = self.state.lock().await;
        state
            .queues
            .get(name)
            .map(|queue| queue.queue.clone())
            .ok_or_else(|| BrokerError::UnknownQueue(name.to_string()))
    }

    async fn receive_address(&self, locator: &QueueLocator) -> Result<ReceiveAddress, BrokerError> {
        self.check_reachable()?;
        let mut state = self.state.lock().await;
        let queue = state.queue_by_locator_mut(locator)?;
        Ok(queue.receive_address.clone())
    }

    async fn receive(
        &self,
        locator: &QueueLocator,
        max_messages: usize,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, BrokerError> {
        self.check_reachable()?;
        let deadline = Instant::now() + wait;

        loop {
            let arrival = {
                let mut state = self.state.lock().await;
                let queue = state.queue_by_locator_mut(locator)?;
                queue.requeue_expired(Instant::now());

                if !queue.pending.is_empty() {
                    let mut batch = Vec::new();
                    while batch.len() < max_messages {
                        let Some(notification) = queue.pending.pop_front() else {
                            break;
                        };
                        let receipt = ReceiptHandle::new(uuid::Uuid::new_v4().to_string());
                        queue.in_flight.insert(
                            receipt.as_str().to_string(),
                            InFlight {
                                notification: notification.clone(),
                                visible_again: Instant::now() + self.visibility_timeout,
                            },
                        );
                        batch.push(ReceivedMessage {
                            receipt,
                            notification,
                        });
                    }
                    return Ok(batch);
                }

                queue.arrival.clone()
            };

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(Vec::new());
            }
            let _ = tokio::time::timeout(remaining, arrival.notified()).await;
        }
    }

    async fn acknowledge(
        &self,
        locator: &QueueLocator,
        receipt: &ReceiptHandle,
    ) -> Result<(), BrokerError> {
        self.check_reachable()?;
        let mut state = self.state.lock().await;
        let queue = state.queue_by_locator_mut(locator)?;
        if queue.in_flight.remove(receipt.as_str()).is_none() {
            return Err(BrokerError::Rejected(format!(
                "unknown or expired receipt: {receipt}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryBroker;
    use event_relay::broker::client::{QueueClient, TopicClient};
    use event_relay::broker::types::DeliveryProtocol;
    use event_relay::error::BrokerError;
    use std::time::Duration;

    const RECEIVE_WAIT: Duration = Duration::from_millis(20);

    async fn linked_broker(topic: &str, queue: &str) -> InMemoryBroker {
        let broker = InMemoryBroker::new();
        let topic_ref = broker.create_topic(topic).await.expect("topic created");
        let queue_ref = broker.create_queue(queue).await.expect("queue created");
        let endpoint = broker
            .receive_address(&queue_ref.locator)
            .await
            .expect("receive address resolved");
        broker
            .subscribe(&topic_ref.address, DeliveryProtocol::QueueDelivery, &endpoint)
            .await
            .expect("subscription created");
        broker
    }

    #[tokio::test]
    async fn create_topic_is_idempotent() {
        let broker = InMemoryBroker::new();

        let first = broker.create_topic("event-user-updated").await.expect("created");
        let second = broker.create_topic("event-user-updated").await.expect("re-created");

        assert_eq!(first, second);
        assert_eq!(broker.topic_count().await, 1);
    }

    #[tokio::test]
    async fn publish_fans_out_only_to_subscribed_queues() {
        let broker = linked_broker("event-user-updated", "user-audit-log").await;
        broker.create_queue("unrelated").await.expect("queue created");

        broker
            .publish("event-user-updated", Some("user.new"), "payload")
            .await
            .expect("published");

        assert_eq!(broker.queue_depths("user-audit-log").await, Some((1, 0)));
        assert_eq!(broker.queue_depths("unrelated").await, Some((0, 0)));
    }

    #[tokio::test]
    async fn publish_to_missing_topic_fails() {
        let broker = InMemoryBroker::new();

        let err = broker
            .publish("nope", None, "payload")
            .await
            .expect_err("missing topic rejected");

        assert!(matches!(err, BrokerError::UnknownTopic(_)));
    }

    #[tokio::test]
    async fn receive_moves_messages_in_flight_until_acknowledged() {
        let broker = linked_broker("event-user-updated", "user-audit-log").await;
        broker
            .publish("event-user-updated", Some("user.new"), "payload")
            .await
            .expect("published");

        let queue = broker.resolve_queue("user-audit-log").await.expect("resolved");
        let batch = broker
            .receive(&queue.locator, 10, RECEIVE_WAIT)
            .await
            .expect("received");
        assert_eq!(batch.len(), 1);
        assert_eq!(broker.queue_depths("user-audit-log").await, Some((0, 1)));

        broker
            .acknowledge(&queue.locator, &batch[0].receipt)
            .await
            .expect("acknowledged");
        assert_eq!(broker.queue_depths("user-audit-log").await, Some((0, 0)));
    }

    #[tokio::test]
    async fn unacknowledged_message_is_redelivered_after_visibility_deadline() {
        let broker = InMemoryBroker::with_visibility_timeout(Duration::from_millis(30));
        let topic = broker.create_topic("event-user-updated").await.expect("topic");
        let queue = broker.create_queue("user-audit-log").await.expect("queue");
        let endpoint = broker.receive_address(&queue.locator).await.expect("endpoint");
        broker
            .subscribe(&topic.address, DeliveryProtocol::QueueDelivery, &endpoint)
            .await
            .expect("subscribed");
        broker
            .publish("event-user-updated", None, "payload")
            .await
            .expect("published");

        let first = broker
            .receive(&queue.locator, 10, RECEIVE_WAIT)
            .await
            .expect("first receive");
        assert_eq!(first.len(), 1);

        tokio::time::sleep(Duration::from_millis(40)).await;

        let second = broker
            .receive(&queue.locator, 10, RECEIVE_WAIT)
            .await
            .expect("second receive");
        assert_eq!(second.len(), 1);
        assert_eq!(
            second[0].notification.message_id,
            first[0].notification.message_id
        );

        // The original receipt died with the first delivery.
        let err = broker
            .acknowledge(&queue.locator, &first[0].receipt)
            .await
            .expect_err("stale receipt rejected");
        assert!(matches!(err, BrokerError::Rejected(_)));
    }

    #[tokio::test]
    async fn receive_returns_empty_when_nothing_arrives() {
        let broker = InMemoryBroker::new();
        let queue = broker.create_queue("user-create").await.expect("queue");

        let batch = broker
            .receive(&queue.locator, 10, RECEIVE_WAIT)
            .await
            .expect("received");

        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn unreachable_broker_fails_every_operation() {
        let broker = InMemoryBroker::new();
        broker.create_queue("user-create").await.expect("queue");
        broker.set_reachable(false);

        assert!(matches!(
            broker.create_topic("t").await,
            Err(BrokerError::Unreachable(_))
        ));
        assert!(matches!(
            broker.resolve_queue("user-create").await,
            Err(BrokerError::Unreachable(_))
        ));

        broker.set_reachable(true);
        assert!(broker.create_topic("t").await.is_ok());
    }
}
