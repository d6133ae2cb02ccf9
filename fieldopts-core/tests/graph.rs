use fieldopts_core::{DynamicOptions, FieldBuilder, FormSchema, StaticOptionsProvider};

fn dynamic(id: &str, deps: &[&str]) -> FieldBuilder {
    FieldBuilder::select(id, id).with_dynamic_options(
        DynamicOptions::new(StaticOptionsProvider::default()).depends_on(deps.iter().copied()),
    )
}

fn crm_schema() -> FormSchema {
    // workspace -> project -> {task_list, milestone}; assignee refreshes on workspace only
    FormSchema::builder("crm")
        .field(FieldBuilder::select("workspace", "Workspace"))
        .field(dynamic("project", &["workspace"]))
        .field(dynamic("task_list", &["project"]))
        .field(dynamic("milestone", &["project", "workspace"]))
        .field(
            FieldBuilder::select("assignee", "Assignee").with_dynamic_options(
                DynamicOptions::new(StaticOptionsProvider::default()).refresh_on(["workspace"]),
            ),
        )
        .field(FieldBuilder::text("title", "Title"))
        .build()
        .unwrap()
}

#[test]
fn graph_levels_follow_dependency_depth() {
    let schema = crm_schema();
    let graph = schema.graph();

    assert_eq!(
        graph.levels[0],
        vec!["title".to_string(), "workspace".to_string()]
    );
    assert_eq!(
        graph.levels[1],
        vec!["assignee".to_string(), "project".to_string()]
    );
    assert_eq!(
        graph.levels[2],
        vec!["milestone".to_string(), "task_list".to_string()]
    );
    assert_eq!(graph.depth("project"), Some(1));
    assert_eq!(graph.depth("nope"), None);
}

#[test]
fn affected_by_walks_reverse_edges_transitively() {
    let schema = crm_schema();
    let affected = schema.graph().affected_by("workspace");

    assert_eq!(affected.len(), 4);
    assert!(!affected.contains(&"workspace".to_string()));
    assert!(!affected.contains(&"title".to_string()));
    let pos = |id: &str| affected.iter().position(|f| f == id).unwrap();
    assert!(pos("project") < pos("task_list"));
    assert!(pos("project") < pos("milestone"));
}

#[test]
fn affected_by_unrelated_field_is_empty() {
    let schema = crm_schema();
    assert!(schema.graph().affected_by("title").is_empty());
    assert!(schema.graph().cascade_levels("title").is_empty());
}

#[test]
fn cascade_levels_group_independent_fields() {
    let schema = crm_schema();

    let levels = schema.graph().cascade_levels("workspace");
    assert_eq!(
        levels,
        vec![
            vec!["assignee".to_string(), "project".to_string()],
            vec!["milestone".to_string(), "task_list".to_string()],
        ]
    );

    // a cascade starting mid-graph starts its own depth at zero
    let levels = schema.graph().cascade_levels("project");
    assert_eq!(
        levels,
        vec![vec!["milestone".to_string(), "task_list".to_string()]]
    );
}

#[test]
fn dot_output_lists_edges() {
    let schema = crm_schema();
    let dot = schema.graph().to_dot(schema.name());
    assert!(dot.starts_with("digraph fieldopts {"));
    assert!(dot.contains("\"workspace\" -> \"project\";"));
    assert!(dot.contains("\"title\";"));
}
