use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fieldopts_core::{
    AuthContext, DynamicFieldContext, DynamicOptionsResponse, FieldValues, FnProvider, OptionItem,
    OptionsProvider, Pagination, ProviderError, ProviderRegistry, RecordMapping,
    StaticOptionsProvider,
};
use serde_json::json;

fn colors() -> StaticOptionsProvider {
    StaticOptionsProvider::from_pairs([
        ("r", "Red"),
        ("g", "Green"),
        ("b", "Blue"),
        ("gr", "Grey"),
    ])
}

#[tokio::test]
async fn static_provider_filters_by_search_term() {
    let ctx = DynamicFieldContext::new("color", AuthContext::none(), FieldValues::new())
        .with_search_term("GR");
    let resp = colors().fetch(&ctx).await.unwrap();

    let ids: Vec<&str> = resp.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["g", "gr"]);
    assert_eq!(resp.total, 2);
}

#[tokio::test]
async fn static_provider_pages_are_complementary() {
    let provider = colors();
    let page1 = provider
        .fetch(
            &DynamicFieldContext::new("color", AuthContext::none(), FieldValues::new())
                .with_pagination(Pagination::new(1, 2)),
        )
        .await
        .unwrap();
    let page2 = provider
        .fetch(
            &DynamicFieldContext::new("color", AuthContext::none(), FieldValues::new())
                .with_pagination(Pagination::new(2, 2)),
        )
        .await
        .unwrap();

    assert_eq!(page1.has_more, Some(true));
    assert_eq!(page2.has_more, Some(false));
    assert_eq!(page1.total, 4);
    let mut all: Vec<String> = page1
        .items
        .iter()
        .chain(page2.items.iter())
        .map(|i| i.id.clone())
        .collect();
    all.sort();
    assert_eq!(all, vec!["b", "g", "gr", "r"]);
}

#[tokio::test]
async fn fn_provider_receives_a_fresh_context() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let provider = FnProvider::new(move |ctx: DynamicFieldContext| {
        let seen = seen.clone();
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
            let ws = ctx
                .str_value("workspace")
                .ok_or_else(|| ProviderError::other("workspace is required"))?
                .to_string();
            Ok::<_, ProviderError>(DynamicOptionsResponse::new(
                vec![OptionItem::new(format!("{ws}-p1"), "P1")],
                1,
            ))
        }
    });

    let mut values = FieldValues::new();
    values.insert("workspace".into(), json!("W1"));
    let resp = provider
        .fetch(&DynamicFieldContext::new("project", AuthContext::none(), values))
        .await
        .unwrap();
    assert_eq!(resp.items[0].id, "W1-p1");

    let err = provider
        .fetch(&DynamicFieldContext::new("project", AuthContext::none(), FieldValues::new()))
        .await
        .unwrap_err();
    assert_eq!(err, ProviderError::Other("workspace is required".into()));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn registry_looks_up_by_name() {
    let mut registry = ProviderRegistry::new();
    registry.register("colors", colors());
    assert!(registry.contains("colors"));
    assert!(registry.get("missing").is_none());
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["colors"]);
}

#[test]
fn option_item_from_record_accepts_numeric_ids() {
    let mapping = RecordMapping::new("gid", "title").keep("color");
    let item = OptionItem::from_record(
        &json!({"gid": 1203, "title": "Launch", "color": "red", "ignored": 1}),
        &mapping,
    )
    .unwrap();

    assert_eq!(item.id, "1203");
    assert_eq!(item.label, "Launch");
    assert_eq!(item.extra.len(), 1);

    let fallback = OptionItem::from_record(&json!({"gid": "x"}), &mapping).unwrap();
    assert_eq!(fallback.label, "x");

    assert!(OptionItem::from_record(&json!({"title": "no id"}), &mapping).is_err());
    assert!(OptionItem::from_record(&json!("scalar"), &mapping).is_err());
}

#[test]
fn response_contract_check_flags_provider_bugs() {
    let items = vec![OptionItem::new("1", "a"), OptionItem::new("2", "b")];
    assert!(DynamicOptionsResponse::new(items.clone(), 10)
        .check_contract(Some(2))
        .is_ok());
    assert!(DynamicOptionsResponse::new(items.clone(), 1)
        .check_contract(None)
        .is_err());
    assert!(DynamicOptionsResponse::new(items, 10)
        .check_contract(Some(1))
        .is_err());
    assert!(DynamicOptionsResponse::empty().check_contract(Some(5)).is_ok());
}
