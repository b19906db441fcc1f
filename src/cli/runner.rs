use crate::errors::DiaError;
use crate::import::{ImportOptions, import_csv_file};
use crate::palette;
use crate::project::Project;
use crate::store::ProjectStore;

use super::command::Command;
use super::util::{check_color, check_scheme, parse_chart_type};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
}

pub fn run(store: &ProjectStore, cmd: Command) -> Result<(), DiaError> {
    run_with_format(store, cmd, OutputMode::Human)
}

/// Load, edit and save a project in one step.
fn edit(
    store: &ProjectStore,
    name: &str,
    f: impl FnOnce(&mut Project) -> Result<(), DiaError>,
) -> Result<Project, DiaError> {
    let mut p = store.load(name)?;
    f(&mut p)?;
    store.save(&mut p)?;
    Ok(p)
}

fn print_project(p: &Project, mode: OutputMode) {
    match mode {
        OutputMode::Json => {
            let json = serde_json::to_string(p).unwrap_or_else(|_| "{}".into());
            println!("{json}");
        }
        OutputMode::Human => {
            println!("{} [{}] {:?} points={} modified={}", p.name, p.chart_type, p.title, p.len(), p.modified);
        }
    }
}

pub fn run_with_format(store: &ProjectStore, cmd: Command, mode: OutputMode) -> Result<(), DiaError> {
    match cmd {
        Command::List => {
            let projects = store.list_projects()?;
            match mode {
                OutputMode::Json => {
                    let json = serde_json::to_string(&projects).unwrap_or_else(|_| "[]".into());
                    println!("{json}");
                }
                OutputMode::Human => {
                    for p in &projects {
                        print_project(p, mode);
                    }
                }
            }
            Ok(())
        }
        Command::New { name, csv, scheme, chart_type, title } => {
            let mut p = Project::new(&name)?;
            if store.exists(&p.name) {
                return Err(DiaError::ProjectAlreadyExists(p.name));
            }
            if let Some(s) = scheme {
                p.set_color_scheme(check_scheme(&s)?);
            }
            if let Some(t) = chart_type {
                p.set_chart_type(parse_chart_type(&t)?);
            }
            if let Some(t) = title {
                p.set_title(&t);
            }
            if let Some(path) = csv {
                let (pairs, report) = import_csv_file(&path, &ImportOptions::default())?;
                log::info!("{}: {} rows imported, {} skipped", p.name, report.imported, report.skipped);
                p.append_pairs(pairs);
            }
            store.save(&mut p)?;
            print_project(&p, mode);
            Ok(())
        }
        Command::Rename { name, new_name } => {
            let mut p = store.load(&name)?;
            store.rename(&mut p, &new_name)?;
            print_project(&p, mode);
            Ok(())
        }
        Command::Delete { name } => {
            let removed = store.delete_by_name(&name)?;
            match mode {
                OutputMode::Json => println!("{}", serde_json::json!({"deleted": removed, "name": name})),
                OutputMode::Human if removed => println!("deleted {name}"),
                OutputMode::Human => println!("no project named {name}"),
            }
            Ok(())
        }
        Command::Import { file } => {
            let p = store.import_file(&file)?;
            print_project(&p, mode);
            Ok(())
        }
        Command::Export { name, output } => {
            let p = store.load(&name)?;
            store.export_file(&p, &output)?;
            match mode {
                OutputMode::Json => {
                    println!("{}", serde_json::json!({"exported": name, "path": output}));
                }
                OutputMode::Human => println!("exported {name} to {}", output.display()),
            }
            Ok(())
        }
        Command::Show { name } => {
            let text = store.read_text(&name)?;
            match mode {
                OutputMode::Json => println!("{}", serde_json::json!({"name": name, "dia": text})),
                OutputMode::Human => println!("{text}"),
            }
            Ok(())
        }
        Command::Apply { name, file } => {
            let text = std::fs::read_to_string(&file)?;
            let mut p = store.load(&name)?;
            p.apply_text(&text)?;
            if p.name == name {
                store.save(&mut p)?;
            } else {
                // Edited text renamed the project: drop the file under the old name.
                let target = std::mem::replace(&mut p.name, name);
                store.rename(&mut p, &target)?;
            }
            print_project(&p, mode);
            Ok(())
        }
        Command::Add { name, label, value, color } => {
            let color = color.as_deref().map(check_color).transpose()?;
            let p = edit(store, &name, |p| {
                match color {
                    Some(c) => p.push_point(crate::project::DataPoint::new(label, value, c)),
                    None => p.add_point(label, value),
                }
                Ok(())
            })?;
            print_project(&p, mode);
            Ok(())
        }
        Command::Remove { name, index } => {
            let p = edit(store, &name, |p| p.remove_point(index).map(|_| ()))?;
            print_project(&p, mode);
            Ok(())
        }
        Command::Recolor { name, index, color } => {
            let color = check_color(&color)?;
            let p = edit(store, &name, |p| p.recolor_point(index, color))?;
            print_project(&p, mode);
            Ok(())
        }
        Command::Scheme { name, scheme } => {
            check_scheme(&scheme)?;
            let p = edit(store, &name, |p| {
                p.set_color_scheme(&scheme);
                Ok(())
            })?;
            print_project(&p, mode);
            Ok(())
        }
        Command::Set { name, chart_type, title } => {
            let chart_type = chart_type.as_deref().map(parse_chart_type).transpose()?;
            let p = edit(store, &name, |p| {
                if let Some(t) = chart_type {
                    p.set_chart_type(t);
                }
                if let Some(t) = title {
                    p.set_title(&t);
                }
                Ok(())
            })?;
            print_project(&p, mode);
            Ok(())
        }
        Command::Clear { name } => {
            let p = edit(store, &name, |p| {
                p.clear_series();
                Ok(())
            })?;
            print_project(&p, mode);
            Ok(())
        }
        Command::Palettes => {
            match mode {
                OutputMode::Json => {
                    let all: Vec<_> = palette::palette_names()
                        .map(|n| serde_json::json!({"name": n, "colors": palette::palette(n)}))
                        .collect();
                    println!("{}", serde_json::Value::Array(all));
                }
                OutputMode::Human => {
                    for n in palette::palette_names() {
                        println!("{n}: {}", palette::palette(n).join(" "));
                    }
                }
            }
            Ok(())
        }
    }
}
