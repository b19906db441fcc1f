use diadrop::codec::{deserialize, serialize};
use diadrop::errors::DiaError;
use diadrop::project::{ChartType, DataPoint, Project};

const HAND_EDITED: &str = r#"# exported by an older release
[<TYPE dia>]

[__Settings__]
[Project Settings: created="2024-03-01T09:15:00.123456" modified="2024-03-02T18:00:00.000001"]

[__Data__]
[Jan | 100 | #0066FF]
[Feb | 150.5 | #00B4D8]
[Mar | -2.25e1 | #90E0EF]

[__Legend__]
[position: "top"]

[__DiaInfo__]
[Name: "Quarterly"]
[Type: "Line"]
[ColorScheme: "Ocean"]
[Title: "Revenue "Q1""]
[Width: "12"]

[__CustomColors__]
[axis: #FFFFFF]

# .dia File - DiaDrop Chart Format"#;

#[test]
fn hand_edited_document_loads() {
    let p = deserialize(HAND_EDITED).unwrap();
    assert_eq!(p.name, "Quarterly");
    assert_eq!(p.chart_type, ChartType::Line);
    assert_eq!(p.color_scheme, "Ocean");
    assert_eq!(p.title, "Revenue \"Q1\"");
    assert_eq!(p.created, "2024-03-01T09:15:00.123456");
    assert_eq!(p.modified, "2024-03-02T18:00:00.000001");
    assert_eq!(
        p.series,
        vec![
            DataPoint::new("Jan", 100.0, "#0066FF"),
            DataPoint::new("Feb", 150.5, "#00B4D8"),
            DataPoint::new("Mar", -22.5, "#90E0EF"),
        ]
    );
    assert_eq!(p.custom_colors.get("axis").map(String::as_str), Some("#FFFFFF"));
}

#[test]
fn reserialized_hand_edit_is_stable() {
    let p = deserialize(HAND_EDITED).unwrap();
    let once = serialize(&p);
    let twice = serialize(&deserialize(&once).unwrap());
    assert_eq!(once, twice);
    assert!(once.contains("[Jan | 100.0 | #0066FF]"));
    assert!(!once.contains("__Legend__"));
}

#[test]
fn two_month_sales_data_section() {
    let mut p = Project::new("Sales").unwrap();
    p.push_point(DataPoint::new("Jan", 100.0, "#0066FF"));
    p.push_point(DataPoint::new("Feb", 150.5, "#00B4D8"));
    p.set_title("Sales");
    let text = serialize(&p);
    assert!(text.contains("[__Data__]\n[Jan | 100.0 | #0066FF]\n[Feb | 150.5 | #00B4D8]\n"));
    let back = deserialize(&text).unwrap();
    assert_eq!(back.series, p.series);
    assert_eq!(back.color_scheme, "Modern Blue");
    assert_eq!(back.title, "Sales");
}

#[test]
fn failed_apply_keeps_loaded_project() {
    let mut loaded = deserialize(HAND_EDITED).unwrap();
    let before = loaded.clone();
    let edited = HAND_EDITED.replace("[Feb | 150.5 | #00B4D8]", "[Feb | 150,5 | #00B4D8]");
    match loaded.apply_text(&edited) {
        Err(DiaError::Parse { line, message }) => {
            assert_eq!(line, 9);
            assert!(message.contains("150,5"));
        }
        other => panic!("expected parse failure, got {other:?}"),
    }
    assert_eq!(loaded, before);
}

#[test]
fn empty_document_yields_defaults() {
    let p = deserialize("").unwrap();
    assert_eq!(p.name, "New Project");
    assert!(p.is_empty());
    assert!(p.custom_colors.is_empty());
}
