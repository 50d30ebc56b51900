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

//! Value types crossing the broker client seams.

use std::fmt::{Display, Formatter};

/// Provider-assigned address of a topic (ARN-equivalent). Opaque to this
/// crate; only the broker interprets its contents.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TopicAddress(String);

/// Provider-assigned address used to target a queue as a subscription
/// endpoint (ARN-equivalent).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ReceiveAddress(String);

/// Provider-assigned locator used to receive from and acknowledge against a
/// queue (URL-equivalent).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct QueueLocator(String);

/// Opaque per-delivery handle required to acknowledge a received message.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ReceiptHandle(String);

macro_rules! opaque_address {
    ($name:ident) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

opaque_address!(TopicAddress);
opaque_address!(ReceiveAddress);
opaque_address!(QueueLocator);
opaque_address!(ReceiptHandle);

/// A topic known to exist on the broker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TopicRef {
    pub name: String,
    pub address: TopicAddress,
}

/// A queue known to exist on the broker. The receive address for
/// subscription linking is resolved separately via
/// [`QueueClient::receive_address`](crate::broker::client::QueueClient::receive_address).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueueRef {
    pub name: String,
    pub locator: QueueLocator,
}

/// Delivery protocol tag carried by a subscription.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DeliveryProtocol {
    /// Topic messages are forwarded into a durable queue.
    QueueDelivery,
}

impl DeliveryProtocol {
    pub fn wire_tag(&self) -> &'static str {
        match self {
            DeliveryProtocol::QueueDelivery => "queue-delivery",
        }
    }
}

impl Display for DeliveryProtocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_tag())
    }
}

/// A broker-side link directing one topic's messages into one queue endpoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionRef {
    pub topic: TopicAddress,
    pub endpoint: ReceiveAddress,
    pub protocol: DeliveryProtocol,
}

/// The notification envelope delivered into a queue.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub message_id: String,
    pub subject: Option<String>,
    pub body: String,
}

/// One delivery pulled from a queue, acknowledgeable via its receipt.
#[derive(Clone, Debug)]
pub struct ReceivedMessage {
    pub receipt: ReceiptHandle,
    pub notification: Notification,
}

#[cfg(test)]
mod tests {
    use super::DeliveryProtocol;

    #[test]
    fn queue_delivery_wire_tag_is_stable() {
        assert_eq!(DeliveryProtocol::QueueDelivery.wire_tag(), "queue-delivery");
        assert_eq!(DeliveryProtocol::QueueDelivery.to_string(), "queue-delivery");
    }
}
