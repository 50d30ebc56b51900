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

//! Message relay layer.
//!
//! Owns the explicit registration table binding queue names to handler
//! instances and the per-queue dispatch workers consuming it. Registration
//! is separate from startup: bind every handler first, then
//! [`MessageRelay::run`] resolves each queue against the broker and spawns
//! one dispatch loop per binding.
//!
//! ```
//! use std::sync::Arc;
//! use event_relay::{MessageRelay, Notification, QueueHandler, TopologyProvisioner};
//! use event_relay::error::HandlerError;
//! use in_memory_broker::InMemoryBroker;
//!
//! struct NoopHandler;
//!
//! #[async_trait::async_trait]
//! impl QueueHandler for NoopHandler {
//!     async fn on_notification(&self, _notification: Notification) -> Result<(), HandlerError> {
//!         Ok(())
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let broker = Arc::new(InMemoryBroker::new());
//!
//! // The queue must exist before the relay starts listening on it.
//! let provisioner = TopologyProvisioner::new(broker.clone(), broker.clone());
//! provisioner.ensure_linked("event-user-registration", "user-create").await.unwrap();
//!
//! let mut relay = MessageRelay::new("doc-relay", broker.clone());
//! relay.register_handler("user-create", Arc::new(NoopHandler)).await.unwrap();
//! // Duplicate bindings for the same queue are rejected.
//! assert!(relay.register_handler("user-create", Arc::new(NoopHandler)).await.is_err());
//!
//! relay.run().await.unwrap();
//! relay.shutdown();
//! # });
//! ```

pub(crate) mod dispatch;
pub(crate) mod handler_table;
pub(crate) mod runtime;

use crate::broker::client::QueueClient;
use crate::broker::types::Notification;
use crate::error::{HandlerError, RelayError};
use crate::observability::events;
use crate::relay::dispatch::QueueDispatchLoop;
use crate::relay::handler_table::HandlerTable;
use async_trait::async_trait;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

const COMPONENT: &str = "message_relay";

/// A queue message handler. Each dispatch loop feeds its handler one
/// notification at a time; implementations must not assume cross-queue
/// ordering.
#[async_trait]
pub trait QueueHandler: Send + Sync {
    async fn on_notification(&self, notification: Notification) -> Result<(), HandlerError>;
}

/// Tuning knobs for the per-queue dispatch loops.
#[derive(Clone, Copy, Debug)]
pub struct RelaySettings {
    /// Upper bound per poll.
    pub max_messages: usize,
    /// Long-poll wait per receive call.
    pub receive_wait: Duration,
    /// Pause after a failed poll before the next attempt.
    pub error_backoff: Duration,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            max_messages: 10,
            receive_wait: Duration::from_secs(1),
            error_backoff: Duration::from_secs(2),
        }
    }
}

struct DispatchWorker {
    queue_name: String,
    thread: thread::JoinHandle<()>,
}

/// The relay facade: handler registration plus dispatch worker lifecycle.
pub struct MessageRelay {
    name: String,
    queues: Arc<dyn QueueClient>,
    settings: RelaySettings,
    handler_table: HandlerTable,
    workers: Vec<DispatchWorker>,
    shutdown: Option<watch::Sender<bool>>,
}

impl MessageRelay {
    pub fn new(name: &str, queues: Arc<dyn QueueClient>) -> Self {
        Self::with_settings(name, queues, RelaySettings::default())
    }

    pub fn with_settings(name: &str, queues: Arc<dyn QueueClient>, settings: RelaySettings) -> Self {
        Self {
            name: name.to_string(),
            queues,
            settings,
            handler_table: HandlerTable::new(),
            workers: Vec::new(),
            shutdown: None,
        }
    }

    /// Binds a handler to a queue name. Rejects duplicate bindings.
    pub async fn register_handler(
        &self,
        queue_name: &str,
        handler: Arc<dyn QueueHandler>,
    ) -> Result<(), RelayError> {
        let inserted = self.handler_table.insert_handler(queue_name, handler).await;
        if !inserted {
            return Err(RelayError::HandlerAlreadyRegistered {
                queue: queue_name.to_string(),
            });
        }

        info!(
            event = events::RELAY_HANDLER_REGISTERED,
            component = COMPONENT,
            relay = self.name.as_str(),
            queue = queue_name,
            "handler registered"
        );
        Ok(())
    }

    /// Removes a handler binding. Does not stop an already-running worker.
    pub async fn unregister_handler(&self, queue_name: &str) -> Result<(), RelayError> {
        let removed = self.handler_table.remove_handler(queue_name).await;
        if !removed {
            return Err(RelayError::HandlerNotFound {
                queue: queue_name.to_string(),
            });
        }

        info!(
            event = events::RELAY_HANDLER_UNREGISTERED,
            component = COMPONENT,
            relay = self.name.as_str(),
            queue = queue_name,
            "handler unregistered"
        );
        Ok(())
    }

    /// Resolves every registered queue and spawns one dispatch worker per
    /// binding. Fails without spawning anything if any queue is missing —
    /// provisioning must have completed first.
    pub async fn run(&mut self) -> Result<(), RelayError> {
        if self.shutdown.is_some() {
            return Err(RelayError::AlreadyRunning);
        }

        let bindings = self.handler_table.snapshot().await;
        let mut resolved = Vec::with_capacity(bindings.len());
        for (queue_name, handler) in bindings {
            let queue = self.queues.resolve_queue(&queue_name).await.map_err(|source| {
                RelayError::QueueUnavailable {
                    queue: queue_name.clone(),
                    source,
                }
            })?;
            resolved.push((queue_name, queue, handler));
        }

        let (shutdown_tx, _) = watch::channel(false);
        for (queue_name, queue, handler) in resolved {
            let dispatch = QueueDispatchLoop::new(
                &self.name,
                &queue_name,
                queue.locator,
                self.queues.clone(),
                handler,
                self.settings,
            );
            let shutdown_rx = shutdown_tx.subscribe();
            let thread =
                runtime::spawn_dispatch_loop(&queue_name, move || dispatch.run(shutdown_rx));
            self.workers.push(DispatchWorker { queue_name, thread });
        }
        self.shutdown = Some(shutdown_tx);

        info!(
            event = events::RELAY_RUN_START,
            component = COMPONENT,
            relay = self.name.as_str(),
            workers = self.workers.len(),
            "relay listening"
        );
        Ok(())
    }

    /// Signals every dispatch worker to stop and joins their threads.
    /// Idempotent; a relay that never ran is a no-op.
    pub fn shutdown(&mut self) {
        if let Some(shutdown_tx) = self.shutdown.take() {
            let _ = shutdown_tx.send(true);
        }

        for worker in self.workers.drain(..) {
            if worker.thread.join().is_err() {
                warn!(
                    event = events::RELAY_WORKER_PANICKED,
                    component = COMPONENT,
                    relay = self.name.as_str(),
                    queue = worker.queue_name.as_str(),
                    "dispatch worker panicked before shutdown"
                );
            }
        }

        info!(
            event = events::RELAY_SHUTDOWN,
            component = COMPONENT,
            relay = self.name.as_str(),
            "relay stopped"
        );
    }
}
