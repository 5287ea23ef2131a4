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

//! Model endpoint domain types.
//!
//! [EndpointUid] and its parsers derive the stable uid of a model endpoint
//! from its function and model references. This module adds the closed enums
//! recorded alongside the uid in endpoint records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{raise, Error};

mod identity;

pub use identity::{
    derive_model_endpoint_uid, EndpointUid, FunctionUri, IdentityError, VersionedModel,
};

/// Whether monitoring is switched on for an endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringMode {
    Enabled,
    Disabled,
}

impl Default for MonitoringMode {
    fn default() -> Self {
        // endpoints start out unmonitored until monitoring is switched on
        Self::Disabled
    }
}

impl MonitoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for MonitoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an endpoint sits in the serving graph.
///
/// External systems persist the discriminants as plain integers, so the
/// numeric values are part of the stored format and must not change.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum EndpointType {
    /// An endpoint that is not part of a routed graph.
    Node = 1,

    /// A router endpoint fanning requests out to its children.
    Router = 2,

    /// A child endpoint behind a router.
    Leaf = 3,
}

impl From<EndpointType> for u8 {
    fn from(endpoint_type: EndpointType) -> Self {
        endpoint_type as u8
    }
}

impl TryFrom<u8> for EndpointType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Node),
            2 => Ok(Self::Router),
            3 => Ok(Self::Leaf),
            _ => raise!("invalid endpoint type: {}", value),
        }
    }
}

impl Serialize for EndpointType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for EndpointType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
