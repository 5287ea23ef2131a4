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

//! # Model Monitor
//!
//! The `model-monitor` crate derives the stable identity of a model-serving
//! endpoint. An endpoint pairs a deployed function with the model it serves;
//! its uid is a SHA-1 digest of the two references and never changes for the
//! same pair, so every process that observes the endpoint derives the same
//! key.

pub use anyhow::{anyhow as error, bail as raise, Context as ErrorContext, Error, Result};

mod config;
pub use config::{MonitorConfig, MonitorConfigBuilder};

pub mod endpoint;
pub mod logging;
pub mod uri;

pub use endpoint::{
    derive_model_endpoint_uid, EndpointType, EndpointUid, FunctionUri, IdentityError,
    MonitoringMode, VersionedModel,
};
