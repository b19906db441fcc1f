//! Line-oriented `.dia` text format.
//!
//! ```text
//! [<TYPE dia>]
//!
//! [__Settings__]
//! [Project Settings: created="..." modified="..."]
//!
//! [__Data__]
//! [Jan | 100.0 | #0066FF]
//!
//! [__DiaInfo__]
//! [Name: "Sales"]
//! [Type: "Bar"]
//! [ColorScheme: "Modern Blue"]
//! [Title: "Sales"]
//!
//! [__CustomColors__]
//! [accent: #FF0000]
//!
//! # .dia File - DiaDrop Chart Format
//! ```
//!
//! Parsing is forgiving: comments, blank lines, unknown sections and unrecognized
//! attributes are skipped. The only fatal error is a data value that is not a number,
//! in which case nothing is returned.

use crate::errors::DiaError;
use crate::project::{ChartType, DataPoint, Project, validate_name};
use regex::Regex;
use std::sync::LazyLock;

pub const HEADER_TOKEN: &str = "<TYPE dia>";
pub const FOOTER: &str = "# .dia File - DiaDrop Chart Format";

static SETTINGS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"created="([^"]+)" modified="([^"]+)""#).expect("static settings regex")
});

static INFO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(Name|Type|ColorScheme|Title):\s*"(.+)"$"#).expect("static info regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Settings,
    Data,
    DiaInfo,
    CustomColors,
    Unknown,
}

impl Section {
    fn from_marker(marker: &str) -> Self {
        match marker {
            "__Settings__" => Self::Settings,
            "__Data__" => Self::Data,
            "__DiaInfo__" => Self::DiaInfo,
            "__CustomColors__" => Self::CustomColors,
            _ => Self::Unknown,
        }
    }
}

/// Render a project as `.dia` text. Output is deterministic for a given project.
#[must_use]
pub fn serialize(project: &Project) -> String {
    let mut out: Vec<String> = vec![format!("[{HEADER_TOKEN}]"), String::new()];

    out.push("[__Settings__]".into());
    out.push(format!(
        "[Project Settings: created=\"{}\" modified=\"{}\"]",
        project.created, project.modified
    ));
    out.push(String::new());

    out.push("[__Data__]".into());
    for point in &project.series {
        out.push(format!("[{} | {} | {}]", point.label, format_value(point.value), point.color));
    }
    out.push(String::new());

    out.push("[__DiaInfo__]".into());
    out.push(format!("[Name: \"{}\"]", project.name));
    out.push(format!("[Type: \"{}\"]", project.chart_type));
    out.push(format!("[ColorScheme: \"{}\"]", project.color_scheme));
    out.push(format!("[Title: \"{}\"]", project.title));
    out.push(String::new());

    if !project.custom_colors.is_empty() {
        out.push("[__CustomColors__]".into());
        for (key, color) in &project.custom_colors {
            out.push(format!("[{key}: {color}]"));
        }
        out.push(String::new());
    }

    out.push(FOOTER.into());
    out.join("\n")
}

/// Shortest text that parses back to the same value; integral values keep a `.0`.
fn format_value(value: f64) -> String {
    format!("{value:?}")
}

/// Parse `.dia` text into a fresh project.
///
/// Fields the text does not mention keep the defaults of [`Project::default`].
pub fn deserialize(text: &str) -> Result<Project, DiaError> {
    deserialize_onto(&Project::default(), text)
}

/// Parse `.dia` text on top of `base`: the series is replaced, custom colors are merged,
/// and every other field the text does not mention keeps its value from `base`.
fn deserialize_onto(base: &Project, text: &str) -> Result<Project, DiaError> {
    let mut project = base.clone();
    project.series.clear();
    let mut section: Option<Section> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let inner = bracketed(line);
        if let Some(content) = inner {
            if content == HEADER_TOKEN {
                continue;
            }
            if content.len() >= 2 && content.starts_with("__") && content.ends_with("__") {
                section = Some(Section::from_marker(content));
                continue;
            }
        }

        match section {
            Some(Section::Settings) => parse_settings(line, &mut project),
            Some(Section::Data) => {
                if let Some(content) = inner {
                    parse_data(content, idx + 1, &mut project)?;
                }
            }
            Some(Section::DiaInfo) => {
                if let Some(content) = inner {
                    parse_info(content.trim(), &mut project);
                }
            }
            Some(Section::CustomColors) => {
                if let Some((key, color)) = inner.and_then(|c| c.split_once(':')) {
                    project.custom_colors.insert(key.trim().to_string(), color.trim().to_string());
                }
            }
            Some(Section::Unknown) | None => {
                log::trace!("ignoring line {} outside a known section", idx + 1);
            }
        }
    }

    Ok(project)
}

fn bracketed(line: &str) -> Option<&str> {
    line.strip_prefix('[').and_then(|l| l.strip_suffix(']'))
}

fn parse_settings(line: &str, project: &mut Project) {
    if !line.contains("Project Settings:") {
        return;
    }
    if let Some(caps) = SETTINGS_RE.captures(line) {
        project.created = caps[1].to_string();
        project.modified = caps[2].to_string();
    }
}

fn parse_data(content: &str, line_no: usize, project: &mut Project) -> Result<(), DiaError> {
    let parts: Vec<&str> = content.split('|').map(str::trim).collect();
    let [label, value, color] = parts.as_slice() else {
        log::debug!("line {line_no}: expected 3 fields, found {}", parts.len());
        return Ok(());
    };
    let value: f64 = value.parse().map_err(|e| DiaError::Parse {
        line: line_no,
        message: format!("invalid value {value:?}: {e}"),
    })?;
    if color.is_empty() {
        log::debug!("line {line_no}: missing color, record skipped");
        return Ok(());
    }
    project.series.push(DataPoint::new(*label, value, *color));
    Ok(())
}

fn parse_info(content: &str, project: &mut Project) {
    let Some(caps) = INFO_RE.captures(content) else {
        return;
    };
    let value = caps[2].to_string();
    match &caps[1] {
        "Name" => match validate_name(&value) {
            Ok(name) => project.name = name,
            Err(_) => log::debug!("blank project name ignored; keeping {:?}", project.name),
        },
        "Type" => match value.parse::<ChartType>() {
            Ok(t) => project.chart_type = t,
            Err(e) => log::debug!("{e}; keeping {}", project.chart_type),
        },
        "ColorScheme" => project.color_scheme = value,
        "Title" => project.title = value,
        _ => {}
    }
}

impl Project {
    /// Render as `.dia` text.
    #[must_use]
    pub fn to_dia(&self) -> String {
        serialize(self)
    }

    /// Update this project from edited `.dia` text. The series is replaced by the text's
    /// data records; attributes the text leaves out keep their current values.
    ///
    /// On error `self` is left exactly as it was.
    pub fn apply_text(&mut self, text: &str) -> Result<(), DiaError> {
        *self = deserialize_onto(self, text)?;
        Ok(())
    }
}
