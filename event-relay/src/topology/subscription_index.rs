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

//! Keyed lookup over a namespace-wide subscription listing.

use crate::broker::types::{ReceiveAddress, SubscriptionRef, TopicAddress};
use std::collections::HashSet;

/// Stable identity for one topic-to-endpoint link.
///
/// Identity intentionally includes the topic: two links that share a queue
/// endpoint but feed from different topics are distinct, so provisioning one
/// never masks the other.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct SubscriptionIdentityKey {
    topic: TopicAddress,
    endpoint: ReceiveAddress,
}

impl From<&SubscriptionRef> for SubscriptionIdentityKey {
    fn from(subscription: &SubscriptionRef) -> Self {
        Self {
            topic: subscription.topic.clone(),
            endpoint: subscription.endpoint.clone(),
        }
    }
}

/// Snapshot of existing links, built once per provisioning pass from the
/// broker's full subscription listing.
pub(crate) struct SubscriptionIndex {
    links: HashSet<SubscriptionIdentityKey>,
}

impl SubscriptionIndex {
    pub(crate) fn new(subscriptions: &[SubscriptionRef]) -> Self {
        Self {
            links: subscriptions.iter().map(SubscriptionIdentityKey::from).collect(),
        }
    }

    /// Returns `true` when a subscription already links this topic to this
    /// queue endpoint.
    pub(crate) fn contains_link(&self, topic: &TopicAddress, endpoint: &ReceiveAddress) -> bool {
        self.links.contains(&SubscriptionIdentityKey {
            topic: topic.clone(),
            endpoint: endpoint.clone(),
        })
    }
}
