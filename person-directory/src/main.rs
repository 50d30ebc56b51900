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

mod api;
mod config;
mod seed;
mod store;

use crate::config::{Config, StoreProviderMode};
use crate::store::{DocumentStore, InMemoryDocumentStore};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command()]
struct DirectoryArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    info!("Started person-directory");

    let args = DirectoryArgs::parse();
    let contents = std::fs::read_to_string(&args.config)
        .map_err(|e| format!("unable to read config file: {e}"))?;
    let config: Config =
        json5::from_str(&contents).map_err(|e| format!("unable to parse config file: {e}"))?;

    let store: Arc<dyn DocumentStore> = match config.store.provider {
        StoreProviderMode::InMemory => Arc::new(InMemoryDocumentStore::new()),
        StoreProviderMode::DocumentDb => {
            // Reserved mode: the networked document-database client is a
            // deferred integration.
            return Err(
                "store provider `document_db` is reserved; \
                 networked document stores are not integrated yet"
                    .into(),
            );
        }
    };

    if config.seed_demo_people {
        // Seeding failure aborts startup; serving an unseeded demo
        // collection is not useful.
        seed::seed_directory(store.as_ref()).await?;
        info!("demo people seeded");
    }

    let app = api::router(store);
    let listener = tokio::net::TcpListener::bind(&config.http.listen).await?;
    info!(listen = config.http.listen.as_str(), "person-directory serving");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
