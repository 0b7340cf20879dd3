//! Integration tests for config loading and the document pipeline.

use std::fs;
use std::path::Path;

use linkform_cli::config::load_config;
use linkform_cli::pipeline::{TransformInput, default_output_path, plan_layouts, transform_file};
use linkform_ingest::Document;

const PAGE: &str = r#"<div id="page">
<table id="LinkTable04">
  <thead><tr><th>ID</th><th>基本_件名</th><th>契約_プラン</th></tr></thead>
  <tbody><tr><td><a href="/items/12/edit">12</a></td><td>点検</td><td>A</td></tr></tbody>
</table>
<div id="sectionFields4"></div>
<div id="sectionFields8container"></div>
</div>"#;

const TOML_CONFIG: &str = r#"
[[jobs]]
source_table_id = "LinkTable04"
destination_container_id = "sectionFields4"
status = "04"
layout = ["", "section_Main", "title", "next_is_select", { plan = ["A", "B"] }]

[[jobs]]
source_table_id = "Missing"
destination_container_id = "sectionFields4"
status = 9
layout = ["", "title"]

[[default_hidden]]
section_id = "sectionFields8container"
"#;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn default_output_sits_next_to_input() {
    assert_eq!(
        default_output_path(Path::new("/tmp/pages/record.html")),
        Path::new("/tmp/pages/record.form.html")
    );
}

#[test]
fn transforms_page_and_writes_default_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write(dir.path(), "record.html", PAGE);
    let config_path = write(dir.path(), "jobs.toml", TOML_CONFIG);
    let config = load_config(&config_path).expect("config");

    let result = transform_file(TransformInput {
        input: &input,
        config: &config,
        output: None,
        dry_run: false,
    })
    .expect("transform");

    assert!(result.has_failures());
    assert_eq!(result.report.succeeded(), 1);
    assert_eq!(result.report.hidden_applied, vec!["sectionFields8container"]);
    let output = result.output.expect("output path");
    assert_eq!(output, dir.path().join("record.form.html"));

    let written = Document::read_html(&output).expect("read output");
    let form = written.element_by_id("addedForm04").expect("form");
    assert_eq!(written.node(form).attribute("data-record-id"), Some("12"));
    let table = written.element_by_id("LinkTable04").expect("table");
    assert_eq!(
        written.style_property(table, "display").as_deref(),
        Some("none")
    );
    let section = written
        .element_by_id("sectionFields8container")
        .expect("section");
    assert!(written.node(section).has_class("hidden"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write(dir.path(), "record.html", PAGE);
    let config_path = write(dir.path(), "jobs.toml", TOML_CONFIG);
    let config = load_config(&config_path).expect("config");

    let result = transform_file(TransformInput {
        input: &input,
        config: &config,
        output: None,
        dry_run: true,
    })
    .expect("transform");

    assert!(result.output.is_none());
    assert!(!dir.path().join("record.form.html").exists());
    assert_eq!(fs::read_to_string(&input).expect("input"), PAGE);
}

#[test]
fn explicit_output_path_is_used() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write(dir.path(), "record.html", PAGE);
    let config_path = write(dir.path(), "jobs.toml", TOML_CONFIG);
    let config = load_config(&config_path).expect("config");
    let target = dir.path().join("custom.html");

    let result = transform_file(TransformInput {
        input: &input,
        config: &config,
        output: Some(&target),
        dry_run: false,
    })
    .expect("transform");

    assert_eq!(result.output.as_deref(), Some(target.as_path()));
    assert!(target.exists());
}

#[test]
fn loads_json_config() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(
        dir.path(),
        "jobs.json",
        r#"{"jobs": [{"source_table_id": "t", "destination_container_id": "d",
            "status": 3, "layout": ["", "next_is_select", {"plan": ["A"]}]}]}"#,
    );
    let config = load_config(&path).expect("config");
    assert_eq!(config.batch.jobs.len(), 1);
    assert!(config.batch.default_hidden.is_empty());
}

#[test]
fn missing_config_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let error = load_config(&path).expect_err("missing file");
    assert!(format!("{error:#}").contains("absent.toml"));
}

#[test]
fn invalid_config_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(dir.path(), "jobs.toml", "jobs = 3");
    assert!(load_config(&path).is_err());
}

#[test]
fn layout_plan_reports_steps_and_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(
        dir.path(),
        "jobs.toml",
        r#"
[[jobs]]
source_table_id = "good"
destination_container_id = "d"
status = 1
layout = ["", "section_Main", "title", "next_is_select", { plan = ["A", "B"] }]

[[jobs]]
source_table_id = "bad"
destination_container_id = "d"
status = 2
layout = ["", { plan = ["A"] }]
"#,
    );
    let config = load_config(&path).expect("config");
    let plans = plan_layouts(&config);

    let steps = plans[0].steps.as_ref().expect("valid plan");
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].section.as_deref(), Some("Main"));
    assert_eq!(steps[0].width, 2);
    assert_eq!(steps[1].field, "plan");
    assert_eq!(steps[1].options, Some(2));
    assert_eq!(steps[1].column, 2);

    let error = plans[1].steps.as_ref().expect_err("invalid plan");
    assert!(error.contains("position 1"), "{error}");
}
