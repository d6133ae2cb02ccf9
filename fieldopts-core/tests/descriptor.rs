use fieldopts_core::{
    load_schema_str, parse_descriptor_str, DescriptorFormat, DynamicOptions, FieldBuilder,
    FieldKind, FormSchema, LoadOptions, ProviderRegistry, SchemaError, StaticOptionsProvider,
    Validate,
};
use serde_json::json;

fn schema() -> FormSchema {
    FormSchema::builder("create-deal")
        .field(FieldBuilder::text("name", "Deal name").required())
        .field(FieldBuilder::select("pipeline", "Pipeline").default_value("default"))
        .field(
            FieldBuilder::select("stage", "Stage").required().with_dynamic_options(
                DynamicOptions::new(StaticOptionsProvider::default())
                    .provider_name("crm.stages")
                    .depends_on(["pipeline"]),
            ),
        )
        .field(
            FieldBuilder::select("owner", "Owner").with_dynamic_options(
                DynamicOptions::new(StaticOptionsProvider::default())
                    .provider_name("crm.owners")
                    .supports_search(true)
                    .page_size(100),
            ),
        )
        .build()
        .unwrap()
}

#[test]
fn descriptor_has_stable_shape() {
    let value = serde_json::to_value(schema().descriptor()).unwrap();

    assert_eq!(value["name"], json!("create-deal"));
    let fields = value["fields"].as_array().unwrap();

    let name = &fields[0];
    assert_eq!(name["id"], json!("name"));
    assert_eq!(name["displayName"], json!("Deal name"));
    assert_eq!(name["required"], json!(true));
    assert_eq!(name["kind"], json!("static"));
    assert!(name.get("dependsOn").is_none());
    assert!(name.get("pageSize").is_none());

    let stage = &fields[2];
    assert_eq!(stage["kind"], json!("dynamic"));
    assert_eq!(stage["dependsOn"], json!(["pipeline"]));
    assert_eq!(stage["supportsSearch"], json!(false));
    assert_eq!(stage["pageSize"], json!(null));
    assert_eq!(stage["provider"], json!("crm.stages"));

    let owner = &fields[3];
    assert_eq!(owner["dependsOn"], json!([]));
    assert_eq!(owner["supportsSearch"], json!(true));
    assert_eq!(owner["pageSize"], json!(100));
}

#[test]
fn descriptor_round_trips_through_registry() {
    let original = schema().descriptor();
    let yaml = serde_yaml::to_string(&original).unwrap();
    let parsed = parse_descriptor_str(&yaml, DescriptorFormat::Auto).unwrap();
    assert_eq!(parsed.format, DescriptorFormat::Yaml);
    assert_eq!(parsed.value, original);

    let mut registry = ProviderRegistry::new();
    registry.register("crm.stages", StaticOptionsProvider::default());
    registry.register("crm.owners", StaticOptionsProvider::default());
    let rebuilt = parsed
        .value
        .into_schema(&registry, LoadOptions::default())
        .unwrap();

    assert_eq!(rebuilt.descriptor(), original);
    assert!(rebuilt.field("stage").unwrap().binding.as_ref().unwrap().is_bound());
}

#[test]
fn descriptor_requires_registered_providers_by_default() {
    let descriptor = schema().descriptor();
    let err = descriptor
        .into_schema(&ProviderRegistry::new(), LoadOptions::default())
        .unwrap_err();
    assert_eq!(err.violations.len(), 2);

    // inspection-only loading keeps the fields unbound instead
    assert!(descriptor.validate().is_ok());
}

#[test]
fn static_fields_may_not_carry_dynamic_keys() {
    let input = r#"{
        "name": "f",
        "fields": [
            {"id": "a", "displayName": "A", "dependsOn": ["b"]},
            {"id": "b", "displayName": "B"}
        ]
    }"#;
    let parsed = parse_descriptor_str(input, DescriptorFormat::Auto).unwrap();
    assert_eq!(parsed.format, DescriptorFormat::Json);
    let err = parsed.value.validate().unwrap_err();
    assert_eq!(err.violations[0].path, "$.fields[0]");
}

#[test]
fn load_schema_str_reports_parse_and_configuration_errors() {
    let registry = ProviderRegistry::new();
    let opts = LoadOptions {
        require_providers: false,
    };

    let err = load_schema_str("{ not json", DescriptorFormat::Json, false, &registry, opts)
        .unwrap_err();
    assert!(matches!(err, SchemaError::Parse(_)));

    let cyclic = r#"
name: loop
fields:
  - id: a
    displayName: A
    kind: dynamic
    dependsOn: [b]
  - id: b
    displayName: B
    kind: dynamic
    dependsOn: [a]
"#;
    let err = load_schema_str(cyclic, DescriptorFormat::Auto, false, &registry, opts).unwrap_err();
    match err {
        SchemaError::Configuration(e) => assert!(e.violations[0].message.contains("cycle")),
        other => panic!("unexpected: {other:?}"),
    }

    let ok = load_schema_str(
        "name: ok\nfields:\n  - id: a\n    displayName: A\n",
        DescriptorFormat::Auto,
        false,
        &registry,
        opts,
    )
    .unwrap();
    assert_eq!(ok.field("a").unwrap().kind(), FieldKind::Static);
}
