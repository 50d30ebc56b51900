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
    pub(crate) http: HttpConfig,
    pub(crate) store: StoreConfig,
    pub(crate) seed_demo_people: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    pub(crate) listen: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub(crate) provider: StoreProviderMode,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreProviderMode {
    #[default]
    InMemory,
    DocumentDb,
}

#[cfg(test)]
mod tests {
    use super::{Config, StoreProviderMode};

    const DEFAULT_CONFIG: &str = include_str!("../config/DEFAULT_CONFIG.json5");

    #[test]
    fn default_config_parses() {
        let config: Config = json5::from_str(DEFAULT_CONFIG).expect("default config parses");

        assert!(matches!(config.store.provider, StoreProviderMode::InMemory));
        assert!(config.seed_demo_people);
        assert!(config.http.listen.contains(':'));
    }
}
