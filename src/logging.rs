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

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Once instance to ensure the logger is only initialized once
static INIT: Once = Once::new();

/// ENV used to set the log level
const FILTER_ENV: &str = "RUST_LOG";

/// ENV that switches event output to JSON lines
const JSON_ENV: &str = "MONITOR_LOG_JSON";

/// Default log filter, anything RUST_LOG can take
const DEFAULT_DIRECTIVE: &str = "info";

/// Setup logging. You won't see any output unless you run this.
pub fn init() {
    INIT.call_once(|| {
        let filter_layer = EnvFilter::builder()
            .with_default_directive(DEFAULT_DIRECTIVE.parse().unwrap())
            .with_env_var(FILTER_ENV)
            .from_env_lossy();

        if env_is_truthy(JSON_ENV) {
            let l = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::io::stderr)
                .json()
                .with_filter(filter_layer);
            tracing_subscriber::registry().with(l).init();
        } else {
            let l = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .event_format(tracing_subscriber::fmt::format().compact())
                .with_writer(std::io::stderr)
                .with_filter(filter_layer);
            tracing_subscriber::registry().with(l).init();
        }
    });
}

/// Check if an environment variable is truthy
fn env_is_truthy(env: &str) -> bool {
    match std::env::var(env) {
        Ok(val) => is_truthy(val.as_str()),
        Err(_) => false,
    }
}

/// Check if a string is truthy
fn is_truthy(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "1" | "true" | "on" | "yes")
}
