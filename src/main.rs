// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


//! Logichart CLI entrypoint.
//!
//! Inspects and moves projects kept in a project folder (one `<key>.lcp` file per project).

use std::error::Error;
use std::path::Path;

use logichart::format::{self, LoadReport, LoadWarning};
use logichart::model::{NodeShape, Project};
use logichart::store::{ProjectFolder, StorageService, WriteDurability};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--store <dir>] [--durable-writes] list\n  {program} [--store <dir>] show <key>\n  {program} [--store <dir>] [--durable-writes] import <file> [<key>]\n  {program} [--store <dir>] export <key> <file>\n  {program} [--store <dir>] delete <key>\n  {program} [--store <dir>] routes <key>\n\nIf --store is omitted, the current working directory is used.\nimport accepts .lcp and .json files; the key defaults to the file stem.\nexport always writes a .lcp file.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Show { key: String },
    Import { file: String, key: Option<String> },
    Export { key: String, file: String },
    Delete { key: String },
    Routes { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    store_dir: Option<String>,
    durable_writes: bool,
    command: Command,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut store_dir = None;
    let mut durable_writes = false;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--store" => {
                if store_dir.is_some() {
                    return Err(());
                }
                store_dir = Some(args.next().ok_or(())?);
            }
            "--durable-writes" => {
                if durable_writes {
                    return Err(());
                }
                durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let name = positional.next().ok_or(())?;
    let rest = positional.collect::<Vec<_>>();
    let command = match (name.as_str(), rest.as_slice()) {
        ("list", []) => Command::List,
        ("show", [key]) => Command::Show { key: key.clone() },
        ("import", [file]) => Command::Import { file: file.clone(), key: None },
        ("import", [file, key]) => Command::Import {
            file: file.clone(),
            key: Some(key.clone()),
        },
        ("export", [key, file]) => Command::Export {
            key: key.clone(),
            file: file.clone(),
        },
        ("delete", [key]) => Command::Delete { key: key.clone() },
        ("routes", [key]) => Command::Routes { key: key.clone() },
        _ => return Err(()),
    };

    Ok(CliOptions {
        store_dir,
        durable_writes,
        command,
    })
}

fn load_project(folder: &ProjectFolder, key: &str) -> Result<(Project, LoadReport), Box<dyn Error>> {
    let document = folder
        .load(key)?
        .ok_or_else(|| format!("no project stored under {key:?}"))?;
    Ok(format::from_document(document))
}

fn print_warnings(report: &LoadReport) {
    for warning in &report.warnings {
        match warning {
            LoadWarning::DanglingReference(dangling) => eprintln!(
                "logichart: dropped edge {} ({:?} endpoint {} is missing)",
                dangling.edge_id, dangling.end, dangling.node_id
            ),
            LoadWarning::DuplicateId { kind, id } => {
                eprintln!("logichart: skipped duplicate {kind} id {id}")
            }
            LoadWarning::DuplicateEdge { edge_id, from, to } => {
                eprintln!("logichart: dropped edge {edge_id} (duplicate of {from} -> {to})")
            }
            LoadWarning::MalformedDecision { node_id } => {
                eprintln!("logichart: decision node {node_id} is missing its branches")
            }
        }
    }
}

fn describe_shape(shape: &NodeShape) -> String {
    match shape {
        NodeShape::Decision { rotation } => format!("decision@{}", rotation.degrees()),
        NodeShape::DataModel { fields } => format!("dataModel[{}]", fields.len()),
        other => other.kind().as_str().to_owned(),
    }
}

fn show(project: &Project) {
    println!("{} (private: {})", project.name(), project.is_private());
    for node in project.nodes() {
        println!(
            "  node:{} {} {:?} at ({}, {})",
            node.id(),
            describe_shape(node.shape()),
            node.label(),
            node.x(),
            node.y()
        );
    }
    for edge in project.edges() {
        let corner = edge
            .from_corner()
            .map(|corner| format!(" from {corner:?}"))
            .unwrap_or_default();
        println!(
            "  edge:{} {} -> {} {}{corner} {:?}",
            edge.id(),
            edge.from(),
            edge.to(),
            edge.style().as_str(),
            edge.label()
        );
    }
    for text in project.texts() {
        println!(
            "  text:{} at ({}, {}) {:?}",
            text.id(),
            text.position().x,
            text.position().y,
            text.content()
        );
    }
    for violation in project.integrity_violations() {
        println!("  ! {violation:?}");
    }
}

fn routes(project: &Project) {
    for path in logichart::routing::compute_all_paths(project) {
        let points = path
            .points
            .iter()
            .map(|point| format!("({:.1}, {:.1})", point.x, point.y))
            .collect::<Vec<_>>()
            .join(" -> ");
        println!(
            "edge:{} {:?} arrows={} {points}",
            path.edge_id,
            path.kind,
            path.arrows.heads().len()
        );
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "logichart".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let dir = options.store_dir.unwrap_or_else(|| ".".to_owned());
        let mut folder = if options.durable_writes {
            ProjectFolder::new(dir).with_durability(WriteDurability::Durable)
        } else {
            ProjectFolder::new(dir)
        };

        match options.command {
            Command::List => {
                for key in folder.list()? {
                    println!("{key}");
                }
            }
            Command::Show { key } => {
                let (project, report) = load_project(&folder, &key)?;
                print_warnings(&report);
                show(&project);
            }
            Command::Import { file, key } => {
                let path = Path::new(&file);
                let key = match key {
                    Some(key) => key,
                    None => path
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .ok_or_else(|| format!("cannot derive a key from {file:?}"))?,
                };
                let (project, report) = format::import_file(path)?;
                print_warnings(&report);
                folder.save(&key, &format::to_document(&project))?;
                println!("{key}");
            }
            Command::Export { key, file } => {
                let (project, report) = load_project(&folder, &key)?;
                print_warnings(&report);
                let written = format::export_file(&project, Path::new(&file))?;
                println!("{}", written.display());
            }
            Command::Delete { key } => {
                if !folder.delete(&key)? {
                    return Err(format!("no project stored under {key:?}").into());
                }
            }
            Command::Routes { key } => {
                let (project, report) = load_project(&folder, &key)?;
                print_warnings(&report);
                routes(&project);
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("logichart: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions, Command};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_list_with_defaults() {
        let options = parse(&["list"]).expect("parse options");
        assert_eq!(
            options,
            CliOptions {
                store_dir: None,
                durable_writes: false,
                command: Command::List,
            }
        );
    }

    #[test]
    fn parses_store_and_durable_flags_anywhere() {
        let options = parse(&["import", "--store", "some/dir", "flow.lcp", "--durable-writes"])
            .expect("parse options");
        assert_eq!(options.store_dir.as_deref(), Some("some/dir"));
        assert!(options.durable_writes);
        assert_eq!(
            options.command,
            Command::Import {
                file: "flow.lcp".to_owned(),
                key: None
            }
        );
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse(&["export", "k", "out.lcp"]).expect("parse").command,
            Command::Export {
                key: "k".to_owned(),
                file: "out.lcp".to_owned()
            }
        );
        assert_eq!(
            parse(&["routes", "k"]).expect("parse").command,
            Command::Routes { key: "k".to_owned() }
        );
        assert_eq!(
            parse(&["import", "a.json", "b"]).expect("parse").command,
            Command::Import {
                file: "a.json".to_owned(),
                key: Some("b".to_owned())
            }
        );
    }

    #[test]
    fn rejects_missing_or_extra_arguments() {
        parse(&[]).unwrap_err();
        parse(&["show"]).unwrap_err();
        parse(&["delete", "a", "b"]).unwrap_err();
        parse(&["list", "extra"]).unwrap_err();
        parse(&["frobnicate"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_and_duplicate_flags() {
        parse(&["--nope", "list"]).unwrap_err();
        parse(&["--durable-writes", "--durable-writes", "list"]).unwrap_err();
        parse(&["--store", "a", "--store", "b", "list"]).unwrap_err();
        parse(&["list", "--store"]).unwrap_err();
    }
}
