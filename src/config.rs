// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use derive_builder::Builder;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::endpoint::MonitoringMode;
use crate::Result;

/// Environment variable prefix for all monitor settings.
const ENV_PREFIX: &str = "MONITOR_";

/// Settings shared by the library front ends.
///
/// `MONITOR_DEFAULT_PROJECT` names the project assumed for function URIs
/// without a `<project>/` prefix; `MONITOR_DEFAULT_MODE` selects the
/// monitoring mode recorded for new endpoints. The defaults apply only at the
/// edges; uid derivation itself never consults the environment.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Builder)]
#[builder(pattern = "owned")]
pub struct MonitorConfig {
    /// Project assumed when a function URI carries none.
    #[builder(setter(into), default)]
    pub default_project: String,

    /// Monitoring mode recorded for new endpoints.
    #[builder(default)]
    pub default_mode: MonitoringMode,
}

impl MonitorConfig {
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    /// Load settings from `MONITOR_`-prefixed environment variables, merged
    /// over the built-in defaults.
    pub fn from_settings() -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        Ok(config)
    }
}
