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

//! Runtime helper for spawning queue dispatch loops.

use std::future::Future;
use std::thread;
use tokio::runtime::Builder;

const DISPATCH_THREAD_NAME_PREFIX: &str = "relay-";
// Linux caps thread names at 15 visible characters.
const DISPATCH_THREAD_NAME_MAX_LEN: usize = 15;
const DEFAULT_DISPATCH_THREAD_NAME: &str = "relay-dispatch";

/// Spawns a dedicated thread carrying a current-thread runtime that drives
/// one queue dispatch loop to completion.
pub(crate) fn spawn_dispatch_loop<F, Fut>(queue_name: &str, run_loop: F) -> thread::JoinHandle<()>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    thread::Builder::new()
        .name(build_dispatch_thread_name(queue_name))
        .spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create queue dispatch Tokio runtime");

            runtime.block_on(run_loop());
        })
        .expect("Failed to spawn queue dispatch runtime thread")
}

fn build_dispatch_thread_name(queue_name: &str) -> String {
    let suffix_len = DISPATCH_THREAD_NAME_MAX_LEN - DISPATCH_THREAD_NAME_PREFIX.len();
    let suffix: String = queue_name
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
        .take(suffix_len)
        .collect();

    if suffix.is_empty() {
        DEFAULT_DISPATCH_THREAD_NAME.to_string()
    } else {
        format!("{DISPATCH_THREAD_NAME_PREFIX}{suffix}")
    }
}
