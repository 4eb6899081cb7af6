use jsonbudget_lib::limiter::{find_large_array_field, summarize_structure, ResponseLimiter};
use jsonbudget_lib::types::{BudgetConfig, ROOT_PATH};
use serde_json::{json, Value};

fn limiter() -> ResponseLimiter {
    ResponseLimiter::new(BudgetConfig::default())
}

fn items(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| json!({ "id": format!("post-{}", i), "votesCount": i }))
            .collect(),
    )
}

/// Shape of a typical upstream GraphQL response.
fn posts_response(count: usize) -> Value {
    json!({
        "data": {
            "posts": {
                "totalCount": count,
                "pageInfo": { "hasNextPage": true, "endCursor": "abc" },
                "edges": items(count)
            }
        }
    })
}

#[test]
fn test_array_within_budget_unchanged() {
    for len in [0, 1, 9, 10] {
        let value = items(len);
        let result = limiter().limit(&value);
        assert!(!result.was_limited, "len {}", len);
        assert_eq!(*result.limited_value, value);
    }
}

#[test]
fn test_array_over_budget_truncated() {
    for len in [11, 15, 100] {
        let value = items(len);
        let result = limiter().limit(&value);
        assert!(result.was_limited);
        assert_eq!(result.original_count, len);
        assert_eq!(result.limited_field_path.as_deref(), Some(ROOT_PATH));
        let limited = result.limited_value.as_array().unwrap();
        assert_eq!(limited.len(), 10);
        assert_eq!(&limited[..], &value.as_array().unwrap()[..10]);
    }
}

#[test]
fn test_deep_field_path() {
    let value = posts_response(40);
    let location = find_large_array_field(&value, 10).unwrap();
    assert_eq!(location.path, "data.posts.edges");
    assert_eq!(location.len(), 40);
}

#[test]
fn test_depth_one_field_outranks_nested() {
    let value = json!({
        "smallArray": items(5),
        "nested": { "largeArray2": items(20) },
        "largeArray1": items(15)
    });
    let location = find_large_array_field(&value, 10).unwrap();
    assert_eq!(location.path, "largeArray1");

    let result = limiter().limit(&value);
    assert_eq!(result.limited_field_path.as_deref(), Some("largeArray1"));
    assert_eq!(result.original_count, 15);
    assert_eq!(result.limited_value["nested"]["largeArray2"], items(20));
    assert_eq!(result.limited_value["smallArray"], items(5));
}

#[test]
fn test_limiting_does_not_mutate_input() {
    let value = posts_response(25);
    let snapshot = value.clone();

    let result = limiter().limit(&value);
    assert!(result.was_limited);
    assert_eq!(value, snapshot);
    assert_eq!(value["data"]["posts"]["edges"].as_array().unwrap().len(), 25);
}

#[test]
fn test_limited_copy_keeps_everything_else() {
    let value = posts_response(25);
    let result = limiter().limit(&value);

    let posts = &result.limited_value["data"]["posts"];
    assert_eq!(posts["totalCount"], json!(25));
    assert_eq!(posts["pageInfo"], value["data"]["posts"]["pageInfo"]);
    assert_eq!(posts["edges"].as_array().unwrap().len(), 10);
}

#[test]
fn test_summarize_literals() {
    assert_eq!(summarize_structure(&Value::Null), "null");
    assert_eq!(summarize_structure(&json!([])), "[]");
    assert_eq!(summarize_structure(&json!({})), "{}");

    let outline = summarize_structure(&json!([1, 2, 3]));
    assert!(outline.contains("Array[3]"));
    assert!(outline.contains("[0]: number"));
}

#[test]
fn test_summary_of_limited_value_reports_limited_length() {
    let value = posts_response(25);
    let result = limiter().limit(&value);
    let outline = summarize_structure(&result.limited_value);

    assert!(outline.contains("edges: Array[10]"));
    assert!(outline.contains("votesCount: number"));
    assert!(!outline.contains("post-0"));
}

#[test]
fn test_custom_threshold() {
    let limiter = ResponseLimiter::new(BudgetConfig::new(3).unwrap());
    let value = json!({ "tags": ["a", "b", "c", "d"] });
    let result = limiter.limit(&value);
    assert_eq!(*result.limited_value, json!({ "tags": ["a", "b", "c"] }));
    assert_eq!(result.original_count, 4);
}

#[test]
fn test_deeply_nested_parsed_response_is_limited() {
    let items: Vec<String> = (0..12).map(|i| i.to_string()).collect();
    let text = format!(
        "{}{{\"items\":[{}]}}{}",
        "{\"n\":".repeat(70),
        items.join(","),
        "}".repeat(70)
    );
    let value: Value = serde_json::from_str(&text).unwrap();

    let result = limiter().limit(&value);
    assert!(result.was_limited);
    assert_eq!(result.original_count, 12);
    let path = result.limited_field_path.as_deref().unwrap();
    assert!(path.ends_with(".n.items"));
    assert_eq!(path.split('.').count(), 71);

    assert!(summarize_structure(&value).contains("items: Array[12]"));
    assert!(summarize_structure(&result.limited_value).contains("items: Array[10]"));
}
