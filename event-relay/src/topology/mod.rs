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

//! Topology provisioning layer.
//!
//! Owns the startup-time convergence of broker state: topics and queues are
//! created through the broker's idempotent-create contract, and subscription
//! creation is skipped when the (topic, endpoint) link already exists in the
//! namespace-wide listing. Runs before the relay starts listening.

pub mod provisioner;
pub(crate) mod subscription_index;

pub use provisioner::TopologyProvisioner;
