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

mod config;

use crate::config::{BrokerProviderMode, Config};
use clap::Parser;
use event_relay::{
    AuditLog, MessageRelay, QueueClient, RegistrationIntake, RelaySettings, TopicClient,
    TopologyProvisioner,
};
use in_memory_broker::InMemoryBroker;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command()]
struct RelayServiceArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    info!("Started user-relay-service");

    let args = RelayServiceArgs::parse();
    let contents = std::fs::read_to_string(&args.config)
        .map_err(|e| format!("unable to read config file: {e}"))?;
    let config: Config =
        json5::from_str(&contents).map_err(|e| format!("unable to parse config file: {e}"))?;

    let broker = match config.broker.provider {
        BrokerProviderMode::InMemory => Arc::new(InMemoryBroker::new()),
        BrokerProviderMode::LocalEndpoints => {
            // Reserved mode: the networked broker client is a deferred
            // integration. Fail fast instead of listening on nothing.
            let endpoints = config
                .broker
                .local_endpoints
                .as_ref()
                .ok_or("broker provider `local_endpoints` requires a `local_endpoints` block")?;
            return Err(format!(
                "broker provider `local_endpoints` is reserved; networked broker \
                 clients are not integrated yet (configured: notifications {}, queues {})",
                endpoints.notification_endpoint, endpoints.queue_endpoint,
            )
            .into());
        }
    };
    let topics: Arc<dyn TopicClient> = broker.clone();
    let queues: Arc<dyn QueueClient> = broker.clone();

    // Provisioning must complete before the relay starts, otherwise the
    // dispatch loops would not find their queues. A provisioning failure
    // aborts startup.
    let provisioner = TopologyProvisioner::new(topics.clone(), queues.clone());
    provisioner
        .ensure_all(
            config
                .topology
                .iter()
                .map(|link| (link.topic.as_str(), link.queue.as_str())),
        )
        .await?;
    info!(links = config.topology.len(), "messaging topology ensured");

    let settings = RelaySettings {
        max_messages: usize::from(config.relay.max_messages_per_poll),
        receive_wait: Duration::from_millis(config.relay.receive_wait_ms),
        error_backoff: Duration::from_millis(config.relay.error_backoff_ms),
    };
    let mut relay = MessageRelay::with_settings(&config.relay.name, queues, settings);
    relay
        .register_handler(
            &config.pipeline.registration_queue,
            Arc::new(RegistrationIntake::new(
                topics,
                &config.pipeline.updated_topic,
            )),
        )
        .await?;
    relay
        .register_handler(
            &config.pipeline.audit_queue,
            Arc::new(AuditLog::with_tracing_sink()),
        )
        .await?;
    relay.run().await?;

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    relay.shutdown();

    Ok(())
}
