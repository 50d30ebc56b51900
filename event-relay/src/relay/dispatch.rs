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

//! Per-queue poll/dispatch loop feeding one registered handler.

use crate::broker::client::QueueClient;
use crate::broker::types::{QueueLocator, ReceivedMessage};
use crate::error::HandlerError;
use crate::observability::{events, fields};
use crate::relay::{QueueHandler, RelaySettings};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, warn};

const COMPONENT: &str = "queue_dispatch";

/// One queue's dispatch loop state. Messages are handled one at a time, in
/// delivery order within this loop; concurrency across queues comes from
/// running one loop per queue.
pub(crate) struct QueueDispatchLoop {
    relay_name: String,
    queue_name: String,
    locator: QueueLocator,
    queues: Arc<dyn QueueClient>,
    handler: Arc<dyn QueueHandler>,
    settings: RelaySettings,
}

impl QueueDispatchLoop {
    pub(crate) fn new(
        relay_name: &str,
        queue_name: &str,
        locator: QueueLocator,
        queues: Arc<dyn QueueClient>,
        handler: Arc<dyn QueueHandler>,
        settings: RelaySettings,
    ) -> Self {
        Self {
            relay_name: relay_name.to_string(),
            queue_name: queue_name.to_string(),
            locator,
            queues,
            handler,
            settings,
        }
    }

    /// Polls until the shutdown signal fires. Poll failures are logged and
    /// retried after a backoff; they never terminate the loop.
    pub(crate) async fn run(self, mut shutdown: watch::Receiver<bool>) {
        debug!(
            event = events::DISPATCH_WORKER_START,
            component = COMPONENT,
            relay = self.relay_name.as_str(),
            queue = self.queue_name.as_str(),
            worker_thread = fields::current_thread_name_or_default().as_str(),
            "dispatch worker started"
        );

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                received = self.queues.receive(
                    &self.locator,
                    self.settings.max_messages,
                    self.settings.receive_wait,
                ) => match received {
                    Ok(messages) => {
                        for message in messages {
                            self.dispatch_one(message).await;
                        }
                    }
                    Err(err) => {
                        warn!(
                            event = events::DISPATCH_POLL_FAILED,
                            component = COMPONENT,
                            queue = self.queue_name.as_str(),
                            err = %err,
                            "queue poll failed, backing off"
                        );
                        tokio::time::sleep(self.settings.error_backoff).await;
                    }
                },
            }
        }

        debug!(
            event = events::DISPATCH_WORKER_STOP,
            component = COMPONENT,
            relay = self.relay_name.as_str(),
            queue = self.queue_name.as_str(),
            "dispatch worker stopped"
        );
    }

    /// Feeds one delivery to the handler. Success acknowledges the message;
    /// any handler failure leaves it unacknowledged so the broker's
    /// redelivery/dead-letter policy takes over — no in-process retry.
    async fn dispatch_one(&self, message: ReceivedMessage) {
        let ReceivedMessage {
            receipt,
            notification,
        } = message;
        let msg_id = notification.message_id.clone();

        match self.handler.on_notification(notification).await {
            Ok(()) => {
                if let Err(err) = self.queues.acknowledge(&self.locator, &receipt).await {
                    warn!(
                        event = events::DISPATCH_ACK_FAILED,
                        component = COMPONENT,
                        queue = self.queue_name.as_str(),
                        msg_id = msg_id.as_str(),
                        err = %err,
                        "unable to acknowledge handled message"
                    );
                } else {
                    debug!(
                        event = events::DISPATCH_HANDLER_OK,
                        component = COMPONENT,
                        queue = self.queue_name.as_str(),
                        msg_id = msg_id.as_str(),
                        "message handled and acknowledged"
                    );
                }
            }
            Err(HandlerError::MalformedPayload { reason }) => {
                warn!(
                    event = events::DISPATCH_HANDLER_REJECTED,
                    component = COMPONENT,
                    queue = self.queue_name.as_str(),
                    msg_id = msg_id.as_str(),
                    reason = reason.as_str(),
                    "handler rejected payload, left to broker redelivery"
                );
            }
            Err(err) => {
                error!(
                    event = events::DISPATCH_HANDLER_FAILED,
                    component = COMPONENT,
                    queue = self.queue_name.as_str(),
                    msg_id = msg_id.as_str(),
                    err = %err,
                    "handler failed, left to broker redelivery"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QueueDispatchLoop;
    use crate::broker::client::QueueClient;
    use crate::broker::types::{
        Notification, QueueLocator, QueueRef, ReceiptHandle, ReceiveAddress, ReceivedMessage,
    };
    use crate::error::{BrokerError, HandlerError};
    use crate::relay::{QueueHandler, RelaySettings};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct AckRecordingQueues {
        acknowledged: Mutex<Vec<ReceiptHandle>>,
    }

    #[async_trait]
    impl QueueClient for AckRecordingQueues {
        async fn create_queue(&self, name: &str) -> Result<QueueRef, BrokerError> {
            Ok(QueueRef {
                name: name.to_string(),
                locator: QueueLocator::new("local://queues/test"),
            })
        }

        async fn resolve_queue(&self, name: &str) -> Result<QueueRef, BrokerError> {
            self.create_queue(name).await
        }

        async fn receive_address(
            &self,
            _locator: &QueueLocator,
        ) -> Result<ReceiveAddress, BrokerError> {
            Ok(ReceiveAddress::new("urn:test:queue:test"))
        }

        async fn receive(
            &self,
            _locator: &QueueLocator,
            _max_messages: usize,
            _wait: Duration,
        ) -> Result<Vec<ReceivedMessage>, BrokerError> {
            Ok(Vec::new())
        }

        async fn acknowledge(
            &self,
            _locator: &QueueLocator,
            receipt: &ReceiptHandle,
        ) -> Result<(), BrokerError> {
            self.acknowledged.lock().await.push(receipt.clone());
            Ok(())
        }
    }

    struct OkHandler;

    #[async_trait]
    impl QueueHandler for OkHandler {
        async fn on_notification(&self, _notification: Notification) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    struct RejectingHandler;

    #[async_trait]
    impl QueueHandler for RejectingHandler {
        async fn on_notification(&self, _notification: Notification) -> Result<(), HandlerError> {
            Err(HandlerError::malformed("not the expected shape"))
        }
    }

    fn delivery(receipt: &str) -> ReceivedMessage {
        ReceivedMessage {
            receipt: ReceiptHandle::new(receipt),
            notification: Notification {
                message_id: "m-1".to_string(),
                subject: None,
                body: "Ford Prefect".to_string(),
            },
        }
    }

    fn make_loop(
        queues: Arc<AckRecordingQueues>,
        handler: Arc<dyn QueueHandler>,
    ) -> QueueDispatchLoop {
        QueueDispatchLoop::new(
            "test-relay",
            "user-create",
            QueueLocator::new("local://queues/test"),
            queues,
            handler,
            RelaySettings::default(),
        )
    }

    #[tokio::test]
    async fn successful_handling_acknowledges_the_message() {
        let queues = Arc::new(AckRecordingQueues::default());
        let dispatch = make_loop(queues.clone(), Arc::new(OkHandler));

        dispatch.dispatch_one(delivery("r-1")).await;

        let acknowledged = queues.acknowledged.lock().await;
        assert_eq!(acknowledged.as_slice(), &[ReceiptHandle::new("r-1")]);
    }

    #[tokio::test]
    async fn rejected_payload_is_left_unacknowledged() {
        let queues = Arc::new(AckRecordingQueues::default());
        let dispatch = make_loop(queues.clone(), Arc::new(RejectingHandler));

        dispatch.dispatch_one(delivery("r-1")).await;

        assert!(queues.acknowledged.lock().await.is_empty());
    }
}
