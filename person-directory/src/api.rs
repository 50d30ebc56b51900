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

//! HTTP surface of the person directory.

use crate::store::{DocumentStore, StoreError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type AppState = Arc<dyn DocumentStore>;

/// Projected person row returned by the directory listing.
#[derive(Debug, Deserialize, Serialize)]
pub struct PersonResponse {
    pub name: String,
}

pub fn router(store: Arc<dyn DocumentStore>) -> Router {
    Router::new()
        .route("/persons", get(find_all))
        .with_state(store)
}

/// GET /persons — every document, projected to a display name, in
/// store-returned order.
async fn find_all(State(store): State<AppState>) -> Result<Json<Vec<PersonResponse>>, AppError> {
    let documents = store.find_all().await?;
    let persons = documents
        .map(|document| PersonResponse {
            name: document.display_name(),
        })
        .collect::<Vec<_>>()
        .await;
    Ok(Json(persons))
}

/// Store failures surface as a JSON error body; everything else is left to
/// axum's defaults.
struct AppError {
    status: StatusCode,
    message: String,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: err.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
