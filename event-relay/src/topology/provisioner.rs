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

//! Idempotent provisioning of the topic/queue/subscription topology.

use crate::broker::client::{QueueClient, TopicClient};
use crate::broker::types::DeliveryProtocol;
use crate::error::ProvisioningError;
use crate::observability::events;
use crate::topology::subscription_index::SubscriptionIndex;
use std::sync::Arc;
use tracing::{debug, info};

const COMPONENT: &str = "topology_provisioner";

/// Ensures topics, queues, and the subscriptions linking them exist.
///
/// Safe to run on every process startup: the broker's idempotent-create
/// contract covers topics and queues, and subscription creation is skipped
/// whenever the (topic, endpoint) link already exists. Runs one-shot and
/// sequential; a race between two processes both checking-then-creating the
/// same link can still produce a duplicate subscription and is accepted.
pub struct TopologyProvisioner {
    topics: Arc<dyn TopicClient>,
    queues: Arc<dyn QueueClient>,
}

impl TopologyProvisioner {
    pub fn new(topics: Arc<dyn TopicClient>, queues: Arc<dyn QueueClient>) -> Self {
        Self { topics, queues }
    }

    /// Ensures `topic_name` and `queue_name` exist and that exactly one
    /// subscription feeds the queue from the topic.
    ///
    /// Any broker failure maps to [`ProvisioningError::Unavailable`]; the
    /// caller must abort startup rather than continue degraded.
    pub async fn ensure_linked(
        &self,
        topic_name: &str,
        queue_name: &str,
    ) -> Result<(), ProvisioningError> {
        debug!(
            event = events::TOPOLOGY_ENSURE_START,
            component = COMPONENT,
            topic = topic_name,
            queue = queue_name,
            "ensuring topic/queue link"
        );

        let topic = self.topics.create_topic(topic_name).await?;
        debug!(
            event = events::TOPOLOGY_TOPIC_OK,
            component = COMPONENT,
            topic = topic_name,
            topic_address = %topic.address,
            "topic present"
        );

        let queue = self.queues.create_queue(queue_name).await?;
        let endpoint = self.queues.receive_address(&queue.locator).await?;
        debug!(
            event = events::TOPOLOGY_QUEUE_OK,
            component = COMPONENT,
            queue = queue_name,
            endpoint = %endpoint,
            "queue present"
        );

        let subscriptions = self.topics.list_subscriptions().await?;
        let index = SubscriptionIndex::new(&subscriptions);

        if index.contains_link(&topic.address, &endpoint) {
            debug!(
                event = events::TOPOLOGY_SUBSCRIPTION_REUSED,
                component = COMPONENT,
                topic = topic_name,
                queue = queue_name,
                "link already present, skipping subscribe"
            );
            return Ok(());
        }

        self.topics
            .subscribe(&topic.address, DeliveryProtocol::QueueDelivery, &endpoint)
            .await?;
        info!(
            event = events::TOPOLOGY_SUBSCRIPTION_CREATED,
            component = COMPONENT,
            topic = topic_name,
            queue = queue_name,
            endpoint = %endpoint,
            "subscription created"
        );

        Ok(())
    }

    /// Applies [`ensure_linked`](Self::ensure_linked) over a list of
    /// (topic, queue) pairs, stopping at the first failure.
    pub async fn ensure_all<'a, I>(&self, links: I) -> Result<(), ProvisioningError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (topic_name, queue_name) in links {
            self.ensure_linked(topic_name, queue_name).await?;
        }
        Ok(())
    }
}
