// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use accessor_probe::engine::{discover_pairs, PairChecker, Synthesizer};
use accessor_probe::{
    Anticipated, Catalog, PopulationReport, PopulationVerifier, ProbeConfig, TypeIntrospector,
    TypeRegistry, Verifier,
};

mod cli;
use cli::render::{self, PairView};
use cli::{Cli, Commands, DescriptorArgs};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());

    let result = match cli.command {
        Commands::Check {
            catalog,
            namespace,
            descriptors,
            expect_warnings,
            expect_glitches,
            expect_cautions,
            seed,
            sequential,
            verbose,
            json,
        } => {
            let anticipated =
                Anticipated::new(expect_warnings, expect_glitches).with_cautions(expect_cautions);
            let options = CheckOptions {
                namespace,
                anticipated,
                seed,
                sequential,
                verbose,
                json,
            };
            run_check(&catalog, &descriptors, &options)
        }
        Commands::Pairs {
            catalog,
            type_name,
            descriptors,
        } => run_pairs(&catalog, &type_name, &descriptors),
        Commands::Descriptors { descriptors } => run_descriptors(&descriptors),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct CheckOptions {
    namespace: String,
    anticipated: Anticipated,
    seed: Option<u64>,
    sequential: bool,
    verbose: bool,
    json: bool,
}

/// Defaults, `--config`, the environment, then flags.
fn load_config(args: &DescriptorArgs) -> Result<ProbeConfig> {
    let mut config = ProbeConfig::load(args.config.as_deref()).context("loading configuration")?;
    config.descriptor_dirs.extend(args.descriptor_dirs.iter().cloned());
    if let Some(name) = &args.name {
        config.descriptor_name = name.clone();
    }
    Ok(config)
}

fn load_registry(path: &Path, config: &ProbeConfig) -> Result<TypeRegistry> {
    let catalog = Catalog::load(path)?;
    let registry = catalog
        .into_registry(&config.conventions)
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    if registry.is_empty() {
        bail!("catalog {} declares no types", path.display());
    }
    Ok(registry)
}

fn run_check(catalog: &Path, args: &DescriptorArgs, options: &CheckOptions) -> Result<()> {
    let mut config = load_config(args)?;
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if options.sequential {
        config.parallel = false;
    }

    let registry = load_registry(catalog, &config)?;
    let cache = config.descriptor_cache();
    cache.ensure_loaded().context("loading descriptor documents")?;

    let verifier = Verifier::new(&registry, &cache)
        .with_conventions(config.conventions.clone())
        .with_seed(config.seed);
    let population = PopulationVerifier::new(verifier)
        .verbose(options.verbose)
        .parallel(config.parallel);

    let names = population.candidates(&options.namespace);
    if names.is_empty() {
        bail!("no types in namespace '{}'", options.namespace);
    }
    let mut report = verify_with_progress(&population, &names, options.json)?;
    report.namespace = options.namespace.clone();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render::population(&report, &options.anticipated);
    }
    report.ensure(&options.anticipated)?;
    Ok(())
}

#[cfg(feature = "parallel")]
fn verify_with_progress(
    population: &PopulationVerifier<'_, TypeRegistry>,
    names: &[String],
    quiet: bool,
) -> Result<PopulationReport> {
    use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

    let progress = ProgressBar::new(names.len() as u64);
    if quiet {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    ) {
        progress.set_style(style.progress_chars("━━╸"));
    }
    progress.set_prefix("Verifying");
    progress.set_message("candidates...");

    let report = population.verify_with_progress(names, || progress.inc(1))?;
    progress.finish_and_clear();
    Ok(report)
}

#[cfg(not(feature = "parallel"))]
fn verify_with_progress(
    population: &PopulationVerifier<'_, TypeRegistry>,
    names: &[String],
    _quiet: bool,
) -> Result<PopulationReport> {
    Ok(population.verify_candidates(names)?)
}

fn run_pairs(catalog: &Path, type_name: &str, args: &DescriptorArgs) -> Result<()> {
    let config = load_config(args)?;
    let registry = load_registry(catalog, &config)?;
    if registry.type_info(type_name).is_none() {
        bail!("'{}' is not declared in {}", type_name, catalog.display());
    }

    let cache = config.descriptor_cache();
    cache.ensure_loaded().context("loading descriptor documents")?;
    let tables = cache.snapshot()?;

    let members = registry.public_members(type_name);
    let mut synthesizer = Synthesizer::new(&registry, &tables, config.seed);
    let mut checker = PairChecker::new(&registry, &tables, &mut synthesizer);

    let mut views = Vec::new();
    let mut rejected = Vec::new();
    for discovered in discover_pairs(type_name, &members, &config.conventions) {
        match discovered {
            Ok(pair) => {
                let prepared = checker.prepare(type_name, &pair);
                views.push(PairView { pair, prepared });
            }
            Err(warning) => rejected.push(warning),
        }
    }

    render::pairs(type_name, &views, &rejected);
    Ok(())
}

fn run_descriptors(args: &DescriptorArgs) -> Result<()> {
    let config = load_config(args)?;
    let cache = config.descriptor_cache();
    cache.ensure_loaded().context("loading descriptor documents")?;
    let tables = cache.snapshot()?;
    render::tables(cache.name(), &tables);
    Ok(())
}
