// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the accessor-probe command-line interface.
//!
//! Three subcommands: `check` verifies every class of a JSON catalog,
//! `pairs` shows how one class's accessors are paired and resolved, and
//! `descriptors` prints the rule tables a set of descriptor directories
//! produces.

pub mod display;
pub mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "accessor-probe",
    about = "Round-trip verification of setter/getter pairs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand that reads descriptor documents.
#[derive(Args, Debug, Clone, Default)]
pub struct DescriptorArgs {
    /// JSON configuration file (conventions, descriptor name and directories)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory searched for descriptor documents; repeatable
    #[arg(short, long = "descriptors", value_name = "DIR")]
    pub descriptor_dirs: Vec<PathBuf>,

    /// Descriptor document stem: documents are `<DIR>/<NAME>.json`
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify every class a JSON catalog declares
    Check {
        /// Catalog of classes, interfaces and enums
        #[arg(short, long)]
        catalog: PathBuf,

        /// Only verify types in this namespace (`::`-separated)
        #[arg(short, long, default_value = "")]
        namespace: String,

        #[command(flatten)]
        descriptors: DescriptorArgs,

        /// Number of warnings the run is expected to produce
        #[arg(long, default_value = "0")]
        expect_warnings: usize,

        /// Number of glitches the run is expected to produce
        #[arg(long, default_value = "0")]
        expect_glitches: usize,

        /// Number of cautions the run is expected to produce
        #[arg(long, default_value = "0")]
        expect_cautions: usize,

        /// Seed for synthesized values
        #[arg(long)]
        seed: Option<u64>,

        /// Examine candidates one at a time
        #[arg(long)]
        sequential: bool,

        /// Log every warning and glitch as it happens
        #[arg(short, long)]
        verbose: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show discovered accessor pairs of one class and how each resolves
    Pairs {
        /// Catalog of classes, interfaces and enums
        #[arg(short, long)]
        catalog: PathBuf,

        /// Registered type name
        type_name: String,

        #[command(flatten)]
        descriptors: DescriptorArgs,
    },

    /// Print the rule tables loaded from descriptor documents
    Descriptors {
        #[command(flatten)]
        descriptors: DescriptorArgs,
    },
}

impl Commands {
    pub fn verbose(&self) -> bool {
        matches!(self, Commands::Check { verbose: true, .. })
    }
}
