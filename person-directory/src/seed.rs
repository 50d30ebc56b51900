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

//! Startup seeding of the demo collection.

use crate::store::{DocumentStore, PersonDocument, StoreError};

/// Resets the collection, then inserts the demo people sequentially. Any
/// step's failure aborts the remaining steps.
pub(crate) async fn seed_directory(store: &dyn DocumentStore) -> Result<(), StoreError> {
    store.delete_all().await?;
    store.insert(PersonDocument::new("Arthur", "Dent")).await?;
    store.insert(PersonDocument::new("Ford", "Prefect")).await?;
    Ok(())
}
