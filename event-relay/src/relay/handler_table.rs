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

//! Handler registration table mapping queue names to handler instances.

use crate::relay::QueueHandler;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Registration storage owner for dedupe and idempotent presence checks.
/// One handler per queue; the dispatch loop for a queue feeds exactly the
/// handler registered here.
pub(crate) struct HandlerTable {
    handlers: Mutex<HashMap<String, Arc<dyn QueueHandler>>>,
}

impl HandlerTable {
    pub(crate) fn new() -> Self {
        Self {
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Inserts a handler binding. Returns `true` only when first inserted.
    pub(crate) async fn insert_handler(
        &self,
        queue_name: &str,
        handler: Arc<dyn QueueHandler>,
    ) -> bool {
        let mut handlers = self.handlers.lock().await;
        if handlers.contains_key(queue_name) {
            return false;
        }
        handlers.insert(queue_name.to_string(), handler);
        true
    }

    /// Removes a handler binding. Returns `true` only when the binding existed.
    pub(crate) async fn remove_handler(&self, queue_name: &str) -> bool {
        let mut handlers = self.handlers.lock().await;
        handlers.remove(queue_name).is_some()
    }

    /// Snapshot of all bindings, for dispatch-loop startup.
    pub(crate) async fn snapshot(&self) -> Vec<(String, Arc<dyn QueueHandler>)> {
        let handlers = self.handlers.lock().await;
        handlers
            .iter()
            .map(|(queue_name, handler)| (queue_name.clone(), handler.clone()))
            .collect()
    }
}
