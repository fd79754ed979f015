// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Formtree CLI entrypoint.
//!
//! Inspects a form graph file (or the built-in demo form): prints a summary by default, and
//! optionally its drag chains, a descendant count, the render walk, or the JSON schema.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `formtree=info`).

use std::error::Error;

use formtree::model::{FormGraph, StepId};
use formtree::query::{chains, count_descendants, descendants, render_walk, unreachable_steps, RenderEntry};
use formtree::store::GraphFile;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <graph.json> [--chains] [--count <step-id>] [--walk] [--save <path>]\n  {program} --demo [--chains] [--count <step-id>] [--walk] [--save <path>]\n  {program} --schema\n\nWithout a view flag a short summary is printed.\n--save writes the (validated) graph to <path> atomically; with --demo it exports the demo form.\nSet RUST_LOG to adjust logging (default `formtree=info`)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    graph_path: Option<String>,
    chains: bool,
    count: Option<String>,
    walk: bool,
    schema: bool,
    save: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--chains" => {
                if options.chains {
                    return Err(());
                }
                options.chains = true;
            }
            "--walk" => {
                if options.walk {
                    return Err(());
                }
                options.walk = true;
            }
            "--schema" => {
                if options.schema {
                    return Err(());
                }
                options.schema = true;
            }
            "--count" => {
                if options.count.is_some() {
                    return Err(());
                }
                let step_id = args.next().ok_or(())?;
                options.count = Some(step_id);
            }
            "--save" => {
                if options.save.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.save = Some(path);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.graph_path.is_some() {
                    return Err(());
                }
                options.graph_path = Some(arg);
            }
        }
    }

    if options.schema {
        let has_other = options.demo
            || options.graph_path.is_some()
            || options.chains
            || options.walk
            || options.count.is_some()
            || options.save.is_some();
        return if has_other { Err(()) } else { Ok(options) };
    }

    if options.demo == options.graph_path.is_some() {
        return Err(());
    }

    Ok(options)
}

fn print_summary(graph: &FormGraph) {
    let root = graph.root_step_id().map_or("(none)", StepId::as_str);
    println!("steps: {}", graph.len());
    println!("root: {root}");
    println!("chains: {}", chains(graph).len());

    let orphans = unreachable_steps(graph);
    if !orphans.is_empty() {
        let list = orphans.iter().map(StepId::as_str).collect::<Vec<_>>().join(", ");
        println!("unreachable: {list}");
    }
}

fn print_chains(graph: &FormGraph) {
    for (index, chain) in chains(graph).iter().enumerate() {
        let members = chain
            .iter()
            .map(|step_id| match graph.step(step_id) {
                Some(step) => format!("{step_id} ({})", step.kind()),
                None => step_id.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" -> ");
        println!("{}: {members}", index + 1);
    }
}

fn print_walk(graph: &FormGraph) {
    for entry in render_walk(graph) {
        let indent = "  ".repeat(entry.depth());
        match &entry {
            RenderEntry::Step { step_id, via, .. } => {
                let label = graph.step(step_id).map_or("", |step| step.question());
                let kind = graph
                    .step(step_id)
                    .map(|step| step.kind().to_string())
                    .unwrap_or_default();
                match via {
                    Some(choice_id) => println!("{indent}[{choice_id}] {step_id} <{kind}> {label}"),
                    None => println!("{indent}{step_id} <{kind}> {label}"),
                }
            }
            RenderEntry::Revisit { step_id, via, .. } => match via {
                Some(choice_id) => println!("{indent}[{choice_id}] ↺ {step_id}"),
                None => println!("{indent}↺ {step_id}"),
            },
        }
    }
}

fn print_count(graph: &FormGraph, raw_step_id: &str) -> Result<(), Box<dyn Error>> {
    let step_id: StepId = raw_step_id.parse()?;
    if !graph.contains(&step_id) {
        return Err(format!("step not found: {step_id}").into());
    }

    let count = count_descendants(graph, &step_id);
    println!("{step_id}: {count} descendant step(s)");
    for descendant in descendants(graph, &step_id) {
        println!("  {descendant}");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formtree=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "formtree".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.schema {
            let schema = formtree::model::graph_json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
            return Ok(());
        }

        let graph = match &options.graph_path {
            Some(path) => GraphFile::new(path).load()?,
            None => formtree::demo::demo_form()?,
        };
        tracing::info!(steps = graph.len(), demo = options.demo, "form graph ready");

        let mut printed = false;
        if options.chains {
            print_chains(&graph);
            printed = true;
        }
        if let Some(step_id) = &options.count {
            print_count(&graph, step_id)?;
            printed = true;
        }
        if options.walk {
            print_walk(&graph);
            printed = true;
        }
        if !printed {
            print_summary(&graph);
        }

        if let Some(path) = &options.save {
            GraphFile::new(path).save(&graph)?;
            tracing::info!(path = %path, "form graph written");
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("formtree: {err}");
        std::process::exit(1);
    }
}
