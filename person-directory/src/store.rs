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

//! Document-store seam and the in-process implementation.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// A person document as held by the external collection. The id is assigned
/// by the store on insert.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDocument {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl PersonDocument {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            id: None,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Client seam for the external document collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Streams every document in the collection. Each call issues a fresh
    /// read; ordering is whatever the store naturally returns.
    async fn find_all(&self) -> Result<BoxStream<'static, PersonDocument>, StoreError>;

    /// Inserts one document, returning it with its assigned id.
    async fn insert(&self, document: PersonDocument) -> Result<PersonDocument, StoreError>;

    async fn delete_all(&self) -> Result<(), StoreError>;
}

/// Collection held in process memory. Documents keep insertion order, which
/// is the order `find_all` streams them back in.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<Vec<PersonDocument>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_all(&self) -> Result<BoxStream<'static, PersonDocument>, StoreError> {
        let snapshot = self.documents.lock().await.clone();
        Ok(stream::iter(snapshot).boxed())
    }

    async fn insert(&self, mut document: PersonDocument) -> Result<PersonDocument, StoreError> {
        if document.id.is_none() {
            document.id = Some(Uuid::new_v4().to_string());
        }
        self.documents.lock().await.push(document.clone());
        Ok(document)
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.documents.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentStore, InMemoryDocumentStore, PersonDocument};
    use futures::StreamExt;

    #[tokio::test]
    async fn insert_assigns_an_id() {
        let store = InMemoryDocumentStore::new();

        let inserted = store
            .insert(PersonDocument::new("Arthur", "Dent"))
            .await
            .expect("insert succeeds");

        assert!(inserted.id.is_some());
    }

    #[tokio::test]
    async fn find_all_streams_in_insertion_order() {
        let store = InMemoryDocumentStore::new();
        store
            .insert(PersonDocument::new("Arthur", "Dent"))
            .await
            .expect("first insert");
        store
            .insert(PersonDocument::new("Ford", "Prefect"))
            .await
            .expect("second insert");

        let names: Vec<String> = store
            .find_all()
            .await
            .expect("find_all succeeds")
            .map(|document| document.display_name())
            .collect()
            .await;

        assert_eq!(names, vec!["Arthur Dent", "Ford Prefect"]);
    }

    #[tokio::test]
    async fn delete_all_empties_the_collection() {
        let store = InMemoryDocumentStore::new();
        store
            .insert(PersonDocument::new("Arthur", "Dent"))
            .await
            .expect("insert");

        store.delete_all().await.expect("delete_all succeeds");

        let remaining = store
            .find_all()
            .await
            .expect("find_all succeeds")
            .collect::<Vec<_>>()
            .await;
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn find_all_is_a_snapshot_not_a_live_view() {
        let store = InMemoryDocumentStore::new();
        store
            .insert(PersonDocument::new("Arthur", "Dent"))
            .await
            .expect("insert");

        let stream = store.find_all().await.expect("find_all succeeds");
        store
            .insert(PersonDocument::new("Ford", "Prefect"))
            .await
            .expect("late insert");

        let names: Vec<String> = stream.map(|document| document.display_name()).collect().await;
        assert_eq!(names, vec!["Arthur Dent"]);
    }
}
