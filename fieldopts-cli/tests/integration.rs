use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

const SCHEMA: &str = r#"
name: create-task
fields:
  - id: workspace
    displayName: Workspace
    required: true
  - id: project
    displayName: Project
    kind: dynamic
    type: select
    dependsOn: [workspace]
    supportsSearch: true
    pageSize: 2
    provider: projects
  - id: task
    displayName: Task
    kind: dynamic
    type: select
    dependsOn: [project]
    provider: tasks
  - id: owner
    displayName: Owner
    kind: dynamic
    type: select
    dependsOn: [workspace]
    provider: people
"#;

const PROVIDERS: &str = r#"
providers:
  projects:
    kind: static
    options:
      - {id: p1, label: Roadmap}
      - {id: p2, label: Backlog}
      - {id: p3, label: Research}
  tasks:
    kind: static
    options:
      - {id: t1, label: Write docs}
  people:
    kind: static
    options: []
"#;

fn fieldopts() -> Command {
    Command::cargo_bin("fieldopts").unwrap()
}

fn setup() -> (TempDir, String, String) {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("form.yaml");
    let providers = dir.path().join("providers.yaml");
    fs::write(&schema, SCHEMA).unwrap();
    fs::write(&providers, PROVIDERS).unwrap();
    (
        dir,
        schema.to_string_lossy().into_owned(),
        providers.to_string_lossy().into_owned(),
    )
}

fn stdout_of(cmd: &mut Command) -> (i32, String) {
    let out = cmd.output().unwrap();
    (
        out.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&out.stdout).into_owned(),
    )
}

#[test]
fn describe_prints_normalized_descriptor() {
    let (_dir, schema, _) = setup();
    let (code, out) = stdout_of(fieldopts().args(["describe", &schema, "--format", "json"]));
    assert_eq!(code, 0);

    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["name"], "create-task");
    assert_eq!(v["fields"][0]["displayName"], "Workspace");
    assert!(v["fields"][0].get("dependsOn").is_none());
    assert_eq!(v["fields"][1]["dependsOn"], serde_json::json!(["workspace"]));
    assert_eq!(v["fields"][2]["pageSize"], serde_json::Value::Null);
}

#[test]
fn graph_renders_dot() {
    let (_dir, schema, _) = setup();
    let (code, out) = stdout_of(fieldopts().args(["graph", &schema, "--format", "dot"]));
    assert_eq!(code, 0);
    assert!(out.starts_with("digraph fieldopts {"), "{out}");
    assert!(out.contains("\"workspace\" -> \"project\";"), "{out}");
    assert!(out.contains("\"project\" -> \"task\";"), "{out}");
}

#[test]
fn graph_json_has_levels() {
    let (_dir, schema, _) = setup();
    let (code, out) = stdout_of(fieldopts().args(["graph", &schema, "--format", "json"]));
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["levels"][0], serde_json::json!(["workspace"]));
    assert_eq!(v["levels"][2], serde_json::json!(["task"]));
}

#[test]
fn cascade_lists_fields_in_resolution_order() {
    let (_dir, schema, _) = setup();
    let (code, out) = stdout_of(fieldopts().args(["cascade", &schema, "--changed", "workspace"]));
    assert_eq!(code, 0);
    assert_eq!(out, "1. owner, project\n2. task\n");
}

#[test]
fn cascade_rejects_unknown_field() {
    let (_dir, schema, _) = setup();
    fieldopts()
        .args(["cascade", &schema, "--changed", "nope"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn migrate_converts_legacy_form() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("legacy.json");
    fs::write(
        &legacy,
        r#"{
          "title": "Old form",
          "properties": [
            {"key": "workspace", "label": "Workspace", "type": "string", "required": true},
            {"key": "project", "type": "dropdown", "getOptions": "projects",
             "dependsOn": ["workspace"], "searchable": true, "perPage": 25}
          ]
        }"#,
    )
    .unwrap();

    let (code, out) = stdout_of(fieldopts().args([
        "migrate",
        legacy.to_str().unwrap(),
        "--format",
        "json",
    ]));
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["name"], "Old form");
    assert_eq!(v["fields"][1]["kind"], "dynamic");
    assert_eq!(v["fields"][1]["provider"], "projects");
    assert_eq!(v["fields"][1]["pageSize"], 25);
    assert_eq!(v["fields"][1]["displayName"], "project");
}

#[test]
fn resolve_field_pages_and_searches() {
    let (_dir, schema, providers) = setup();
    let (code, out) = stdout_of(fieldopts().args([
        "resolve",
        &schema,
        "--providers",
        &providers,
        "--field",
        "project",
        "--set",
        "workspace=W1",
        "--format",
        "json",
    ]));
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v[0]["field_id"], "project");
    assert_eq!(v[0]["state"], "resolved");
    assert_eq!(v[0]["response"]["total"], 3);
    assert_eq!(v[0]["response"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(v[0]["response"]["hasMore"], true);

    let (code, out) = stdout_of(fieldopts().args([
        "resolve", &schema, "--providers", &providers, "--field", "project", "--search", "back",
    ]));
    assert_eq!(code, 0);
    assert!(out.starts_with("project: 1 of 1 options"), "{out}");
    assert!(out.contains("p2 = Backlog"), "{out}");
}

#[test]
fn resolve_cascade_reports_each_field() {
    let (_dir, schema, providers) = setup();
    let (code, out) = stdout_of(fieldopts().args([
        "resolve",
        &schema,
        "--providers",
        &providers,
        "--changed",
        "workspace",
        "--set",
        "workspace=W2",
        "--set",
        "project=p1",
    ]));
    assert_eq!(code, 0);
    assert!(out.contains("owner: 0 of 0 options"), "{out}");
    assert!(out.contains("project: 2 of 3 options (more available)"), "{out}");
    assert!(out.contains("task: 1 of 1 options"), "{out}");
}

#[test]
fn resolve_requires_every_provider_to_be_defined() {
    let (dir, schema, _) = setup();
    let partial = dir.path().join("partial.yaml");
    fs::write(&partial, "providers:\n  projects:\n    kind: static\n    options: []\n").unwrap();

    let out = fieldopts()
        .args([
            "resolve",
            &schema,
            "--providers",
            partial.to_str().unwrap(),
            "--field",
            "project",
        ])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("provider `tasks` is not registered"));
}

#[test]
fn resolve_failure_exits_3() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("form.yaml");
    let providers = dir.path().join("providers.yaml");
    fs::write(
        &schema,
        "name: f\nfields:\n  - id: tag\n    displayName: Tag\n    kind: dynamic\n    provider: tags\n",
    )
    .unwrap();
    // Nothing to substitute for {workspace}: fails before any request is sent.
    fs::write(
        &providers,
        "providers:\n  tags:\n    kind: rest\n    url: \"https://api.example.com/{workspace}/tags\"\n",
    )
    .unwrap();

    let (code, out) = stdout_of(fieldopts().args([
        "resolve",
        schema.to_str().unwrap(),
        "--providers",
        providers.to_str().unwrap(),
        "--field",
        "tag",
    ]));
    assert_eq!(code, 3);
    assert!(out.contains("tag: failed: url template needs a value for `workspace`"), "{out}");
}

#[test]
fn resolve_rejects_static_field() {
    let (_dir, schema, providers) = setup();
    fieldopts()
        .args(["resolve", &schema, "--providers", &providers, "--field", "workspace"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn resolve_rejects_malformed_provider_limits() {
    let (_dir, schema, providers) = setup();
    for bad in ["projects", "projects=many", "=2"] {
        let out = fieldopts()
            .args([
                "resolve",
                &schema,
                "--providers",
                &providers,
                "--field",
                "project",
                "--max-concurrency-provider",
                bad,
            ])
            .output()
            .unwrap();
        assert_eq!(out.status.code(), Some(2), "{bad}");
        assert!(
            String::from_utf8_lossy(&out.stderr).contains("--max-concurrency-provider expects NAME=N"),
            "{bad}"
        );
    }

    fieldopts()
        .args([
            "resolve",
            &schema,
            "--providers",
            &providers,
            "--field",
            "project",
            "--max-concurrency-provider",
            "projects=2",
        ])
        .assert()
        .success();
}
