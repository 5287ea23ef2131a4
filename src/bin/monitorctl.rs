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

use clap::{Parser, Subcommand};
use tracing as log;

use model_monitor::{logging, EndpointUid, FunctionUri, MonitorConfig, Result, VersionedModel};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project assumed when the function URI does not carry one
    #[arg(short = 'p', long)]
    project: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the uid of a model endpoint
    Uid {
        /// Function reference ([<project>/]<function>[@<hash-key>][:<tag>])
        function_uri: String,

        /// Model reference (<model> or <model>:<version>)
        versioned_model: String,

        /// Print the full endpoint record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decompose a function URI into its components
    Inspect {
        /// Function reference ([<project>/]<function>[@<hash-key>][:<tag>])
        function_uri: String,
    },
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let settings = MonitorConfig::from_settings()?;

    // the -p flag wins over the configured default
    let default_project = cli.project.unwrap_or(settings.default_project);

    handle_command(default_project, cli.command)
}

fn handle_command(default_project: String, command: Commands) -> Result<()> {
    match command {
        Commands::Uid {
            function_uri,
            versioned_model,
            json,
        } => {
            log::debug!(
                "deriving uid for {} serving {}",
                function_uri,
                versioned_model
            );

            let function_uri = FunctionUri::from_uri_with_project(&function_uri, &default_project);
            let versioned_model: VersionedModel = versioned_model.parse()?;
            let endpoint = EndpointUid::from_parts(function_uri, versioned_model)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&endpoint)?);
            } else {
                println!("{}", endpoint);
            }
        }
        Commands::Inspect { function_uri } => {
            let uri = FunctionUri::from_uri_with_project(&function_uri, &default_project);

            println!("project:  {}", uri.project());
            println!("function: {}", uri.function());
            println!("tag:      {}", uri.tag().as_deref().unwrap_or("-"));
            println!("hash key: {}", uri.hash_key().as_deref().unwrap_or("-"));
        }
    }

    Ok(())
}
