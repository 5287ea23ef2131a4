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

use std::fmt;
use std::str::FromStr;

use derive_getters::{Dissolve, Getters};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::uri::split_versioned_uri;

/// Placeholder written into the canonical string for an absent tag, hash key,
/// or version. Part of the persisted key format; must not change.
const ABSENT: &str = "N/A";

/// Errors raised while deriving a model endpoint identity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The versioned model string contained more than one `:` separator.
    #[error("versioned model `{input}` must be `<model>` or `<model>:<version>`")]
    MalformedVersionedModel { input: String },

    /// Project, function, or model was empty after parsing.
    #[error("both the function uri and the versioned model have to be fully specified")]
    MissingRequiredField,
}

/// A parsed reference to a deployed function.
///
/// Built from the compound form `[<project>/]<name>[@<hash-key>][:<tag>]`.
/// Empty tag and hash-key components normalize to `None`. Nothing else is
/// validated at parse time; required-field checks happen when an
/// [EndpointUid] is composed.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Getters, Dissolve)]
pub struct FunctionUri {
    /// Project owning the function.
    project: String,

    /// Function name.
    function: String,

    /// Tag the reference pins, if any.
    tag: Option<String>,

    /// Content hash key the reference pins, if any.
    hash_key: Option<String>,
}

impl FunctionUri {
    /// Decompose a compound function URI.
    pub fn from_uri(uri: &str) -> Self {
        Self::from_uri_with_project(uri, "")
    }

    /// Decompose a compound function URI, assuming `default_project` when the
    /// URI carries no `<project>/` prefix.
    pub fn from_uri_with_project(uri: &str, default_project: &str) -> Self {
        let parts = split_versioned_uri(uri, default_project);
        Self {
            project: parts.project.to_string(),
            function: parts.name.to_string(),
            tag: non_empty(parts.tag),
            hash_key: non_empty(parts.hash_key),
        }
    }
}

impl From<&str> for FunctionUri {
    fn from(uri: &str) -> Self {
        Self::from_uri(uri)
    }
}

impl fmt::Display for FunctionUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.project.is_empty() {
            write!(f, "{}/", self.project)?;
        }
        write!(f, "{}", self.function)?;
        // tag wins over hash key in the generated form
        if let Some(tag) = &self.tag {
            write!(f, ":{}", tag)
        } else if let Some(hash_key) = &self.hash_key {
            write!(f, "@{}", hash_key)
        } else {
            Ok(())
        }
    }
}

/// A model name with an optional version.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Getters, Dissolve)]
pub struct VersionedModel {
    /// Model name.
    model: String,

    /// Model version, when the reference carries one.
    version: Option<String>,
}

impl FromStr for VersionedModel {
    type Err = IdentityError;

    /// Parse `<model>` or `<model>:<version>`.
    ///
    /// A missing version is not an error; more than one `:` is rejected
    /// rather than silently truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None => Ok(Self {
                model: s.to_string(),
                version: None,
            }),
            Some((_, version)) if version.contains(':') => {
                Err(IdentityError::MalformedVersionedModel {
                    input: s.to_string(),
                })
            }
            Some((model, version)) => Ok(Self {
                model: model.to_string(),
                version: Some(version.to_string()),
            }),
        }
    }
}

impl fmt::Display for VersionedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}", self.model, version),
            None => write!(f, "{}", self.model),
        }
    }
}

/// The stable identity of a model-serving endpoint.
///
/// `uid` is computed once at construction from the six identity fields and is
/// frozen afterwards: the lowercase hex SHA-1 digest of
/// `<project>_<function>_<tag|hash-key|N/A>_<model>_<version|N/A>`, where the
/// tag wins over the hash key when both are present. The rendered form is used
/// as a storage key by the rest of the system, so the digest algorithm and
/// the 40-character lowercase hex encoding must not change.
///
/// Every construction path recomputes `uid` from the identity fields;
/// deserialization rejects a record whose stored `uid` disagrees.
#[derive(Debug, Clone, Serialize, Eq, PartialEq, Getters)]
pub struct EndpointUid {
    /// Project owning the endpoint.
    project: String,

    /// Serving function name.
    function: String,

    /// Function tag, if any.
    function_tag: Option<String>,

    /// Function content hash key, if any.
    function_hash_key: Option<String>,

    /// Served model name.
    model: String,

    /// Served model version, if any.
    model_version: Option<String>,

    /// Derived identifier; 40 lowercase hex characters.
    uid: String,
}

impl EndpointUid {
    /// Build the identifier from raw fields, computing `uid`.
    ///
    /// No fields are validated here; [EndpointUid::from_parts] is the checked
    /// construction path.
    pub fn new(
        project: impl Into<String>,
        function: impl Into<String>,
        function_tag: Option<String>,
        function_hash_key: Option<String>,
        model: impl Into<String>,
        model_version: Option<String>,
    ) -> Self {
        let project = project.into();
        let function = function.into();
        let model = model.into();
        let uid = derive_uid(
            &project,
            &function,
            function_tag.as_deref(),
            function_hash_key.as_deref(),
            &model,
            model_version.as_deref(),
        );
        Self {
            project,
            function,
            function_tag,
            function_hash_key,
            model,
            model_version,
            uid,
        }
    }

    /// Compose the identifier from parsed parts.
    ///
    /// Errors with [IdentityError::MissingRequiredField] unless the project,
    /// the function, and the model are all non-empty. This is the only
    /// validation performed on the way to a uid.
    pub fn from_parts(
        function_uri: FunctionUri,
        versioned_model: VersionedModel,
    ) -> Result<Self, IdentityError> {
        let (project, function, tag, hash_key) = function_uri.dissolve();
        let (model, version) = versioned_model.dissolve();

        if project.is_empty() || function.is_empty() || model.is_empty() {
            return Err(IdentityError::MissingRequiredField);
        }

        Ok(Self::new(project, function, tag, hash_key, model, version))
    }

    /// The derived identifier.
    pub fn as_str(&self) -> &str {
        &self.uid
    }
}

impl fmt::Display for EndpointUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uid)
    }
}

impl<'de> Deserialize<'de> for EndpointUid {
    /// Rebuild the record from its identity fields, recomputing `uid`.
    ///
    /// A stored `uid` that disagrees with the recomputed digest is rejected;
    /// a record without one gets it computed. No deserialized record can
    /// carry a uid that is not the digest of its own fields.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Record {
            project: String,
            function: String,
            function_tag: Option<String>,
            function_hash_key: Option<String>,
            model: String,
            model_version: Option<String>,
            uid: Option<String>,
        }

        let record = Record::deserialize(deserializer)?;
        let endpoint = Self::new(
            record.project,
            record.function,
            record.function_tag,
            record.function_hash_key,
            record.model,
            record.model_version,
        );

        if let Some(uid) = record.uid {
            if uid != endpoint.uid {
                return Err(serde::de::Error::custom(format!(
                    "uid `{}` does not match the digest of the identity fields",
                    uid
                )));
            }
        }

        Ok(endpoint)
    }
}

/// Derive the stable identifier for a model endpoint.
///
/// `function_uri` is the compound `[<project>/]<function>[@<hash-key>][:<tag>]`
/// form; `versioned_model` is `<model>` or `<model>:<version>`. Both are
/// parsed independently and the composed identity must carry a non-empty
/// project, function, and model.
///
/// Pure and deterministic: the same inputs always derive the same uid.
pub fn derive_model_endpoint_uid(
    function_uri: &str,
    versioned_model: &str,
) -> Result<EndpointUid, IdentityError> {
    let function_uri = FunctionUri::from_uri(function_uri);
    let versioned_model: VersionedModel = versioned_model.parse()?;
    EndpointUid::from_parts(function_uri, versioned_model)
}

fn derive_uid(
    project: &str,
    function: &str,
    function_tag: Option<&str>,
    function_hash_key: Option<&str>,
    model: &str,
    model_version: Option<&str>,
) -> String {
    let function_ref = format!(
        "{}_{}",
        function,
        filled(function_tag)
            .or_else(|| filled(function_hash_key))
            .unwrap_or(ABSENT)
    );
    let versioned_model = format!("{}_{}", model, filled(model_version).unwrap_or(ABSENT));
    let unique = format!("{}_{}_{}", project, function_ref, versioned_model);

    let mut hasher = Sha1::new();
    hasher.update(unique.as_bytes());
    format!("{:x}", hasher.finalize())
}

// an empty component behaves like an absent one
fn filled(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_function_uri_parsing() {
        let uri = FunctionUri::from_uri("proj1/fn1:latest");
        assert_eq!(uri.project(), "proj1");
        assert_eq!(uri.function(), "fn1");
        assert_eq!(uri.tag().as_deref(), Some("latest"));
        assert_eq!(uri.hash_key(), &None);

        let uri = FunctionUri::from_uri("proj1/fn1@4f57f7b6");
        assert_eq!(uri.tag(), &None);
        assert_eq!(uri.hash_key().as_deref(), Some("4f57f7b6"));

        let uri = FunctionUri::from_uri("fn1");
        assert_eq!(uri.project(), "");
        assert_eq!(uri.function(), "fn1");
    }

    #[test]
    fn test_function_uri_normalizes_empty_components() {
        // a trailing separator leaves an empty component, which is absent
        let uri = FunctionUri::from_uri("proj1/fn1:");
        assert_eq!(uri.tag(), &None);
        assert_eq!(uri.hash_key(), &None);
    }

    #[test]
    fn test_function_uri_default_project() {
        let uri = FunctionUri::from_uri_with_project("fn1", "proj9");
        assert_eq!(uri.project(), "proj9");

        let uri = FunctionUri::from_uri_with_project("proj1/fn1", "proj9");
        assert_eq!(uri.project(), "proj1");
    }

    #[test]
    fn test_function_uri_display() {
        assert_eq!(
            FunctionUri::from_uri("proj1/fn1:latest").to_string(),
            "proj1/fn1:latest"
        );
        assert_eq!(
            FunctionUri::from_uri("proj1/fn1@4f57f7b6").to_string(),
            "proj1/fn1@4f57f7b6"
        );
        assert_eq!(FunctionUri::from_uri("fn1").to_string(), "fn1");

        // the tag wins over the hash key in the rendered form
        let uri = FunctionUri::from_uri("proj1/fn1@4f57f7b6:latest");
        assert_eq!(uri.to_string(), "proj1/fn1:latest");
    }

    #[test]
    fn test_versioned_model_parsing() {
        let model: VersionedModel = "resnet:v2".parse().unwrap();
        assert_eq!(model.model(), "resnet");
        assert_eq!(model.version().as_deref(), Some("v2"));

        let model: VersionedModel = "resnet".parse().unwrap();
        assert_eq!(model.model(), "resnet");
        assert_eq!(model.version(), &None);

        // a trailing separator keeps an empty version; it falls back to the
        // absent placeholder at canonicalization
        let model: VersionedModel = "m1:".parse().unwrap();
        assert_eq!(model.model(), "m1");
        assert_eq!(model.version().as_deref(), Some(""));
    }

    #[test]
    fn test_versioned_model_rejects_multiple_separators() {
        let result = "m1:v1:v2".parse::<VersionedModel>();
        assert_matches!(
            result,
            Err(IdentityError::MalformedVersionedModel { input }) if input == "m1:v1:v2"
        );
    }

    #[test]
    fn test_versioned_model_display() {
        assert_eq!(
            "resnet:v2".parse::<VersionedModel>().unwrap().to_string(),
            "resnet:v2"
        );
        assert_eq!(
            "resnet".parse::<VersionedModel>().unwrap().to_string(),
            "resnet"
        );
    }

    #[test]
    fn test_uid_shape() {
        let uid = EndpointUid::new("proj1", "fn1", None, None, "m1", None);
        assert_eq!(uid.uid().len(), 40);
        assert!(uid
            .uid()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(uid.to_string(), *uid.uid());
        assert_eq!(uid.as_str(), uid.uid());
    }

    #[test]
    fn test_tag_wins_over_hash_key() {
        let with_hash = EndpointUid::new(
            "proj1",
            "fn1",
            Some("latest".to_string()),
            Some("4f57f7b6".to_string()),
            "m1",
            Some("1".to_string()),
        );
        let without_hash = EndpointUid::new(
            "proj1",
            "fn1",
            Some("latest".to_string()),
            None,
            "m1",
            Some("1".to_string()),
        );
        assert_eq!(with_hash.uid(), without_hash.uid());
    }

    #[test]
    fn test_empty_fields_behave_like_absent() {
        // callers pass empty strings for absent fields; they must hash like
        // missing components
        let empty = EndpointUid::new(
            "proj1",
            "fn1",
            Some(String::new()),
            Some(String::new()),
            "m1",
            Some(String::new()),
        );
        let absent = EndpointUid::new("proj1", "fn1", None, None, "m1", None);
        assert_eq!(empty.uid(), absent.uid());
    }

    #[test]
    fn test_from_parts_requires_project_function_and_model() {
        let missing_project = EndpointUid::from_parts(
            FunctionUri::from_uri("fn1"),
            "m1".parse().unwrap(),
        );
        assert_matches!(missing_project, Err(IdentityError::MissingRequiredField));

        let missing_function = EndpointUid::from_parts(
            FunctionUri::from_uri("proj1/"),
            "m1".parse().unwrap(),
        );
        assert_matches!(missing_function, Err(IdentityError::MissingRequiredField));

        let missing_model = EndpointUid::from_parts(
            FunctionUri::from_uri("proj1/fn1"),
            "".parse().unwrap(),
        );
        assert_matches!(missing_model, Err(IdentityError::MissingRequiredField));
    }

    #[test]
    fn test_derive_is_deterministic() {
        let first = derive_model_endpoint_uid("proj1/fn1:latest", "m1:1").unwrap();
        let second = derive_model_endpoint_uid("proj1/fn1:latest", "m1:1").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.uid(), second.uid());
    }

    #[test]
    fn test_serde_round_trip() {
        let uid = derive_model_endpoint_uid("proj1/fn1:latest", "m1:1").unwrap();
        let json = serde_json::to_string(&uid).unwrap();
        let restored: EndpointUid = serde_json::from_str(&json).unwrap();
        assert_eq!(uid, restored);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_uid() {
        let endpoint = derive_model_endpoint_uid("proj1/fn1:latest", "m1:1").unwrap();
        let mut value = serde_json::to_value(&endpoint).unwrap();
        value["uid"] = serde_json::Value::String("deadbeef".to_string());

        let result = serde_json::from_value::<EndpointUid>(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_computes_a_missing_uid() {
        let endpoint = derive_model_endpoint_uid("proj1/fn1:latest", "m1:1").unwrap();
        let mut value = serde_json::to_value(&endpoint).unwrap();
        value.as_object_mut().unwrap().remove("uid");

        let restored: EndpointUid = serde_json::from_value(value).unwrap();
        assert_eq!(restored, endpoint);
    }
}
