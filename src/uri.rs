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

//! Decomposition of compound versioned-object URIs.
//!
//! A versioned object URI addresses an object inside a project, optionally
//! pinned to a tag or a content hash key:
//!
//! ```text
//! [<project>/]<name>[@<hash-key>][:<tag>]
//! ```
//!
//! The decomposition splits on the first `/`, then the first `:`, then the
//! first `@` in what remains, in that order. Every input decomposes; absent
//! components come back as empty strings. Callers that need strict presence
//! checks apply them downstream.

/// Components of a versioned object URI.
///
/// Components borrow from the input; an absent component is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionedUri<'a> {
    /// Project owning the object, or the supplied default.
    pub project: &'a str,
    /// Object name.
    pub name: &'a str,
    /// Tag, when the URI pins one.
    pub tag: &'a str,
    /// Content hash key, when the URI pins one.
    pub hash_key: &'a str,
}

/// Split a compound URI into its components.
///
/// `default_project` is used when the URI carries no `<project>/` prefix.
///
/// The split order means a `@` after the first `:` lands inside the tag:
/// `p/f@abc:stable` yields both a hash key and a tag, while `p/f:stable@abc`
/// yields the tag `stable@abc` and no hash key. Keys derived from these
/// components are persisted downstream, so the order must not change.
pub fn split_versioned_uri<'a>(uri: &'a str, default_project: &'a str) -> VersionedUri<'a> {
    let (project, rest) = match uri.split_once('/') {
        Some((project, rest)) => (project, rest),
        None => (default_project, uri),
    };

    let (rest, tag) = match rest.split_once(':') {
        Some((rest, tag)) => (rest, tag),
        None => (rest, ""),
    };

    let (name, hash_key) = match rest.split_once('@') {
        Some((name, hash_key)) => (name, hash_key),
        None => (rest, ""),
    };

    VersionedUri {
        project,
        name,
        tag,
        hash_key,
    }
}
