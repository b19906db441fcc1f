use std::path::PathBuf;

pub enum Command {
    // Collection
    List,
    New {
        name: String,
        csv: Option<PathBuf>,
        scheme: Option<String>,
        chart_type: Option<String>,
        title: Option<String>,
    },
    Rename {
        name: String,
        new_name: String,
    },
    Delete {
        name: String,
    },
    Import {
        file: PathBuf,
    },
    Export {
        name: String,
        output: PathBuf,
    },
    // Editing
    Show {
        name: String,
    },
    /// Replace a project with edited `.dia` text read from a file.
    Apply {
        name: String,
        file: PathBuf,
    },
    Add {
        name: String,
        label: String,
        value: f64,
        color: Option<String>,
    },
    Remove {
        name: String,
        index: usize,
    },
    Recolor {
        name: String,
        index: usize,
        color: String,
    },
    Scheme {
        name: String,
        scheme: String,
    },
    Set {
        name: String,
        chart_type: Option<String>,
        title: Option<String>,
    },
    Clear {
        name: String,
    },
    Palettes,
}
