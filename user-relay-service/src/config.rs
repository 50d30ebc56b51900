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

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) relay: RelayConfig,
    pub(crate) broker: BrokerConfig,
    pub(crate) topology: Vec<LinkConfig>,
    pub(crate) pipeline: PipelineConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    pub(crate) name: String,
    pub(crate) max_messages_per_poll: u16,
    pub(crate) receive_wait_ms: u64,
    pub(crate) error_backoff_ms: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BrokerConfig {
    #[serde(default)]
    pub(crate) provider: BrokerProviderMode,
    pub(crate) local_endpoints: Option<LocalEndpointsConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrokerProviderMode {
    #[default]
    InMemory,
    LocalEndpoints,
}

/// Non-production wiring for networked local broker services. Kept in the
/// schema so deployments can carry the endpoints; the networked client
/// itself is a deferred integration.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LocalEndpointsConfig {
    pub(crate) notification_endpoint: String,
    pub(crate) queue_endpoint: String,
    pub(crate) region: String,
    pub(crate) anonymous_credentials: bool,
}

/// One topic-to-queue link the provisioner must ensure at startup.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    pub(crate) topic: String,
    pub(crate) queue: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub(crate) registration_queue: String,
    pub(crate) audit_queue: String,
    pub(crate) updated_topic: String,
}
