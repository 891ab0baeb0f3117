mod common;

use serde_json::json;

use faa_forms_pdf::{Form8010, Record, render_8010};

#[test]
fn complete_record_renders() {
    common::init();
    let record: Form8010 = common::record("complete_8010.json");
    let bytes = render_8010(&record, None).unwrap();
    common::assert_pdf(&bytes);
    assert_eq!(common::page_count(&bytes), 1);

    let text = common::text(&bytes);
    for value in [
        "Fuel Control Unit",
        "Engine #1 accessory gearbox",
        "HPC Module",
        "12,450 hrs",
        "3,200 hrs",
        "Unserviceable",
        "2026-02-20",
        "214-555-0199",
        "Bearing spalling detected on inner race.",
    ] {
        assert!(text.contains(value), "missing {value:?}");
    }
}

#[test]
fn empty_record_renders() {
    let bytes = render_8010(&Form8010::default(), None).unwrap();
    common::assert_pdf(&bytes);
    assert_eq!(common::page_count(&bytes), 1);
}

#[test]
fn missing_sub_records_render() {
    let record = Form8010::from_value(&json!({ "dateSubmitted": "2026-01-15" })).unwrap();
    let bytes = render_8010(&record, None).unwrap();
    common::assert_pdf(&bytes);
    assert!(common::text(&bytes).contains("2026-01-15"));
}

#[test]
fn all_caps_comment_lines_are_headings() {
    let mut record: Form8010 = common::record("complete_8010.json");
    record.comments = Some("CRITICAL FINDING\nBearing spalling detected.\nACTION TAKEN\nBearing replaced.".into());
    let bytes = render_8010(&record, None).unwrap();
    assert_eq!(common::fonts_showing(&bytes, "CRITICAL FINDING"), vec!["F2"]);
    assert_eq!(common::fonts_showing(&bytes, "ACTION TAKEN"), vec!["F2"]);
    assert_eq!(common::fonts_showing(&bytes, "Bearing replaced."), vec!["F1"]);
}

#[test]
fn long_comments_continue() {
    let mut record: Form8010 = common::record("complete_8010.json");
    record.comments = Some(
        vec!["Finding: wear pattern observed consistent with normal operational stress. No action required per CMM limits."; 120]
            .join("\n"),
    );
    let bytes = render_8010(&record, Some("sha256-defect-hash")).unwrap();
    let pages = common::page_texts(&bytes);
    assert!(pages.len() > 1);
    assert!(pages[1].contains("Continuation of Comments"));

    // the submitter section follows the comments
    let last = pages.last().unwrap();
    assert!(last.contains("7. Submitted By"));
    assert!(last.contains("PRSR-2847291"));
}

#[test]
fn metrics_accept_numbers() {
    let record = Form8010::from_value(&json!({
        "metrics": { "partTotalTime": 12450, "partTso": 3200.5, "partCondition": false }
    }))
    .unwrap();
    let text = common::text(&render_8010(&record, None).unwrap());
    assert!(text.contains("12450"));
    assert!(text.contains("3200.5"));
    assert!(text.contains("false"));
}

#[test]
fn hash_grows_the_output() {
    let record: Form8010 = common::record("complete_8010.json");
    let with = render_8010(&record, Some("sha256-defect-hash")).unwrap();
    let without = render_8010(&record, None).unwrap();
    assert!(with.len() > without.len());
}
