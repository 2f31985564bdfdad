//! Atelier style inspector
//!
//! Loads a project document and prints the resolved styles of an instance
//! at a breakpoint, with provenance — the terminal twin of the style panel.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use atelier_css::to_kebab_case;
use atelier_style::{ProjectDoc, StyleEngine, StyleOrigin, StyleValueInfo};
use atelier_tree::InstanceId;
use clap::Parser;
use owo_colors::OwoColorize;

/// Atelier — inspect resolved styles of a project document
#[derive(Parser, Debug)]
#[command(name = "atelier")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Resolve every property of the root instance at the first breakpoint
    atelier page.json

    # Resolve a specific instance at a specific breakpoint
    atelier page.json --instance hero --breakpoint tablet

    # One property, with its full provenance
    atelier page.json --instance hero --property width

    # Styles of the :hover state, editing a specific source
    atelier page.json --instance hero --state :hover --source accent

    # Emit the resolved values as CSS declarations
    atelier page.json --instance hero --css

    # Print the instance tree
    atelier page.json --tree
"#)]
struct Cli {
    /// Path to the project document (JSON)
    #[arg(value_name = "FILE")]
    project: PathBuf,

    /// Instance to resolve, by document id (default: the root)
    #[arg(long, value_name = "ID")]
    instance: Option<String>,

    /// Breakpoint to resolve at (default: the first in the document)
    #[arg(long, value_name = "ID")]
    breakpoint: Option<String>,

    /// Pseudo-state to resolve (e.g. ":hover"; default: stateless base)
    #[arg(long, value_name = "STATE")]
    state: Option<String>,

    /// Style source to edit (default: the strongest attached source)
    #[arg(long, value_name = "ID")]
    source: Option<String>,

    /// Resolve a single property instead of all of them
    #[arg(long, value_name = "NAME")]
    property: Option<String>,

    /// Emit plain CSS declarations instead of the provenance view
    #[arg(long)]
    css: bool,

    /// Print the instance tree and exit
    #[arg(long)]
    tree: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.project)
        .with_context(|| format!("cannot read '{}'", cli.project.display()))?;
    let doc: ProjectDoc = serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not a valid project document", cli.project.display()))?;
    let (mut engine, ids) = doc.into_engine()?;

    if cli.tree {
        print_tree(&engine, &ids, InstanceId::ROOT, 0);
        return Ok(());
    }

    let instance = match &cli.instance {
        Some(id) => match ids.get(id) {
            Some(instance) => *instance,
            None => bail!("unknown instance '{id}'"),
        },
        None => InstanceId::ROOT,
    };
    let breakpoint_id = match cli.breakpoint {
        Some(id) => {
            if engine.breakpoint_label(&id).is_none() {
                bail!("unknown breakpoint '{id}'");
            }
            id
        }
        None => match engine.breakpoints().first() {
            Some(breakpoint) => breakpoint.id.clone(),
            None => bail!("project has no breakpoints"),
        },
    };

    engine.select_instance(Some(instance));
    engine.select_breakpoint(breakpoint_id);
    engine.select_state(cli.state);
    engine.select_source(cli.source);

    if let Some(property) = &cli.property {
        match engine.resolve(property) {
            Some(info) => print_property(&engine, property, &info, cli.css),
            None => println!("{property}: {}", "unset".dimmed()),
        }
        return Ok(());
    }

    let mut resolved: Vec<(String, StyleValueInfo)> = engine.resolve_all().into_iter().collect();
    resolved.sort_by(|a, b| a.0.cmp(&b.0));
    for (property, info) in &resolved {
        print_property(&engine, property, info, cli.css);
    }
    Ok(())
}

/// Print one resolved property, either as a CSS declaration or as the
/// provenance view the style panel would show.
fn print_property(engine: &StyleEngine, property: &str, info: &StyleValueInfo, css: bool) {
    if css {
        println!("{}: {};", to_kebab_case(property), info.value);
        return;
    }

    let origin = info.origin();
    let tag = match origin {
        StyleOrigin::Local => "local".green().to_string(),
        StyleOrigin::Remote => "remote".cyan().to_string(),
        StyleOrigin::Preset => "preset".magenta().to_string(),
        StyleOrigin::Default => "default".dimmed().to_string(),
    };
    match provenance(engine, info) {
        Some(detail) => println!(
            "{property:<24} {}  [{tag}: {detail}]",
            info.value.to_string().bold()
        ),
        None => println!("{property:<24} {}  [{tag}]", info.value.to_string().bold()),
    }
}

/// Where a non-local value actually comes from, in user terms.
fn provenance(engine: &StyleEngine, info: &StyleValueInfo) -> Option<String> {
    if info.origin() != StyleOrigin::Remote {
        return None;
    }
    if let Some(previous) = &info.previous_source {
        let label = engine
            .source_label(&previous.style_source_id)
            .unwrap_or(&previous.style_source_id);
        return Some(format!("source '{label}'"));
    }
    if let Some(cascaded) = &info.cascaded {
        let label = engine
            .breakpoint_label(&cascaded.breakpoint_id)
            .unwrap_or(&cascaded.breakpoint_id);
        return Some(format!("breakpoint '{label}'"));
    }
    info.inherited.as_ref().map(|inherited| {
        let component = engine
            .tree()
            .component(inherited.instance_id)
            .unwrap_or("?");
        format!("inherited from {component}")
    })
}

/// Print the instance tree with components, labels, and document ids.
fn print_tree(
    engine: &StyleEngine,
    ids: &HashMap<String, InstanceId>,
    id: InstanceId,
    depth: usize,
) {
    let indent = "  ".repeat(depth);
    let doc_id = ids
        .iter()
        .find(|(_, instance)| **instance == id)
        .map_or("?", |(doc_id, _)| doc_id.as_str());
    let component = engine.tree().component(id).unwrap_or("?");
    let label = engine.tree().get(id).and_then(|node| node.label.as_deref());
    match label {
        Some(label) => println!(
            "{indent}{} \"{label}\" ({})",
            component.bold(),
            doc_id.dimmed()
        ),
        None => println!("{indent}{} ({})", component.bold(), doc_id.dimmed()),
    }
    for &child in engine.tree().children(id) {
        print_tree(engine, ids, child, depth + 1);
    }
}
