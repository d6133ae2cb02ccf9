use fieldopts_core::{
    DynamicOptions, FieldBuilder, FieldKind, FieldType, FormSchema, OptionItem, StaticOptionsProvider,
};

fn provider() -> StaticOptionsProvider {
    StaticOptionsProvider::new(vec![OptionItem::new("1", "One")])
}

#[test]
fn build_accepts_static_and_dynamic_fields() {
    let schema = FormSchema::builder("create-task")
        .field(FieldBuilder::text("title", "Title").required().placeholder("Fix the bug"))
        .field(FieldBuilder::select("workspace", "Workspace"))
        .field(
            FieldBuilder::select("project", "Project").with_dynamic_options(
                DynamicOptions::new(provider())
                    .depends_on(["workspace"])
                    .supports_search(true)
                    .page_size(50),
            ),
        )
        .build()
        .unwrap();

    assert_eq!(schema.name(), "create-task");
    assert_eq!(schema.fields().len(), 3);
    assert_eq!(schema.field("title").unwrap().kind(), FieldKind::Static);
    assert!(schema.field("title").unwrap().required);
    let project = schema.field("project").unwrap();
    assert_eq!(project.kind(), FieldKind::Dynamic);
    let binding = project.binding.as_ref().unwrap();
    assert!(binding.depends_on.contains("workspace"));
    assert_eq!(binding.page_size, Some(50));
    assert_eq!(schema.dynamic_fields().count(), 1);
}

#[test]
fn build_rejects_duplicate_ids() {
    let err = FormSchema::builder("f")
        .field(FieldBuilder::text("name", "Name"))
        .field(FieldBuilder::text("name", "Name again"))
        .build()
        .unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].path, "$.fields[1].id");
    assert!(err.violations[0].message.contains("duplicate"));
}

#[test]
fn build_rejects_dangling_depends_on_and_refresh_on() {
    let err = FormSchema::builder("f")
        .field(FieldBuilder::text("a", "A"))
        .field(
            FieldBuilder::select("b", "B").with_dynamic_options(
                DynamicOptions::new(provider())
                    .depends_on(["missing"])
                    .refresh_on(["also_missing"]),
            ),
        )
        .build()
        .unwrap_err();

    let messages = err.messages();
    assert!(messages
        .iter()
        .any(|m| m.contains("dependsOn") && m.contains("`missing`")));
    assert!(messages
        .iter()
        .any(|m| m.contains("refreshOn") && m.contains("`also_missing`")));
}

#[test]
fn build_rejects_direct_cycle() {
    let err = FormSchema::builder("f")
        .field(
            FieldBuilder::select("a", "A")
                .with_dynamic_options(DynamicOptions::new(provider()).depends_on(["b"])),
        )
        .field(
            FieldBuilder::select("b", "B")
                .with_dynamic_options(DynamicOptions::new(provider()).depends_on(["a"])),
        )
        .build()
        .unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert!(err.violations[0].message.contains("cycle"));
    assert!(err.violations[0].message.contains("a -> b -> a"));
}

#[test]
fn build_rejects_indirect_cycle_through_refresh_on() {
    let err = FormSchema::builder("f")
        .field(
            FieldBuilder::select("a", "A")
                .with_dynamic_options(DynamicOptions::new(provider()).depends_on(["b"])),
        )
        .field(
            FieldBuilder::select("b", "B")
                .with_dynamic_options(DynamicOptions::new(provider()).depends_on(["c"])),
        )
        .field(
            FieldBuilder::select("c", "C")
                .with_dynamic_options(DynamicOptions::new(provider()).refresh_on(["a"])),
        )
        .build()
        .unwrap_err();

    let msg = &err.violations[0].message;
    assert!(msg.contains("cycle"), "{msg}");
    for id in ["a", "b", "c"] {
        assert!(msg.contains(id));
    }
}

#[test]
fn build_rejects_self_reference() {
    let err = FormSchema::builder("f")
        .field(
            FieldBuilder::select("a", "A")
                .with_dynamic_options(DynamicOptions::new(provider()).depends_on(["a"])),
        )
        .build()
        .unwrap_err();

    assert!(err.messages().iter().any(|m| m.contains("itself")));
}

#[test]
fn build_collects_every_violation() {
    let err = FormSchema::builder("")
        .field(FieldBuilder::text("bad id!", "Bad"))
        .field(FieldBuilder::boolean("flag", "Flag").default_value("yes"))
        .field(
            FieldBuilder::select("p", "P")
                .with_dynamic_options(DynamicOptions::new(provider()).page_size(0)),
        )
        .build()
        .unwrap_err();

    let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
    assert!(paths.contains(&"$.name"));
    assert!(paths.contains(&"$.fields[0].id"));
    assert!(paths.contains(&"$.fields[1].defaultValue"));
    assert!(paths.contains(&"$.fields[2].pageSize"));
}

#[test]
fn build_requires_a_provider_unless_unbound_is_allowed() {
    let builder = FormSchema::builder("f").field(
        FieldBuilder::select("owner", "Owner")
            .with_dynamic_options(DynamicOptions::unbound().provider_name("crm.owners")),
    );

    let err = builder.clone().build().unwrap_err();
    assert!(err.violations[0].message.contains("crm.owners"));

    let schema = builder.allow_unbound_providers(true).build().unwrap();
    assert!(!schema.field("owner").unwrap().binding.as_ref().unwrap().is_bound());
}

#[test]
fn dynamic_constructor_makes_a_select_awaiting_its_provider() {
    let unbound = FormSchema::builder("f")
        .field(FieldBuilder::text("workspace", "Workspace"))
        .field(FieldBuilder::dynamic("project", "Project"))
        .build();
    assert!(unbound.is_err());

    let schema = FormSchema::builder("f")
        .field(FieldBuilder::text("workspace", "Workspace"))
        .field(
            FieldBuilder::dynamic("project", "Project")
                .required()
                .with_dynamic_options(DynamicOptions::new(provider()).depends_on(["workspace"])),
        )
        .build()
        .unwrap();

    let project = schema.field("project").unwrap();
    assert_eq!(project.kind(), FieldKind::Dynamic);
    assert_eq!(project.field_type, FieldType::Select);
    assert!(project.required);
    assert!(project.binding.as_ref().unwrap().is_bound());
    assert_eq!(schema.graph().dependencies_of("project").to_vec(), vec!["workspace"]);
}
