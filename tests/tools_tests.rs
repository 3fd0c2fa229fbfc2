mod common;

use std::sync::Arc;

use common::{ScriptedBackend, row, shop_backend};
use serde_json::{Value, json};
use sql_tool_server::{
    builder::Literal,
    db::SqlValue,
    server::protocol::{CallToolResponse, ToolContent},
    synth::PLACEHOLDER,
    tools::{Tool, Toolbox}
};

fn toolbox(backend: ScriptedBackend) -> (Toolbox, Arc<ScriptedBackend>) {
    let backend = Arc::new(backend);
    (Toolbox::new(backend.clone()), backend)
}

fn payload(response: &CallToolResponse) -> &Value {
    match &response.content[0] {
        ToolContent::Json {
            json
        } => json,
        other => panic!("expected json content, got {:?}", other)
    }
}

#[test]
fn test_tool_names_round_trip() {
    for tool in Tool::ALL {
        assert_eq!(Tool::from_name(tool.name()), Some(tool));
    }
    assert_eq!(Tool::from_name("drop_everything"), None);
}

#[test]
fn test_definitions_are_read_only_objects() {
    let (tools, _) = toolbox(ScriptedBackend::new());
    let defs = tools.definitions();

    assert_eq!(defs.len(), 8);
    for def in &defs {
        assert!(def.annotations.read_only);
        assert_eq!(def.input_schema["type"], json!("object"));
    }
    let build = defs.iter().find(|d| d.name == "build_query").unwrap();
    assert_eq!(build.input_schema["required"], json!(["table"]));
}

#[tokio::test]
async fn test_list_tables() {
    let (tools, _) = toolbox(shop_backend());
    let response = tools.call(Tool::ListTables, &Value::Null).await;

    assert!(!response.is_error);
    assert_eq!(payload(&response), &json!(["customers", "orders"]));
}

#[tokio::test]
async fn test_describe_table() {
    let (tools, _) = toolbox(shop_backend());
    let response = tools
        .call(Tool::DescribeTable, &json!({"table": "customers"}))
        .await;

    assert!(!response.is_error);
    let body = payload(&response);
    assert_eq!(body["table_name"], json!("customers"));
    assert_eq!(body["columns"][2]["name"], json!("email"));
    assert_eq!(body["columns"][2]["key_role"], json!("UNIQUE"));
    assert_eq!(body["columns"][2]["nullable"], json!(true));
}

#[tokio::test]
async fn test_describe_missing_table_is_not_found() {
    let (tools, _) = toolbox(shop_backend());
    let response = tools
        .call(Tool::DescribeTable, &json!({"table": "nonexistent"}))
        .await;

    assert!(response.is_error);
    let body = payload(&response);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["kind"], json!("not_found"));
}

#[tokio::test]
async fn test_describe_all_has_json_and_summary() {
    let (tools, _) = toolbox(shop_backend());
    let response = tools.call(Tool::DescribeAll, &json!({})).await;

    assert_eq!(response.content.len(), 2);
    assert_eq!(payload(&response)["orders"]["columns"][0]["name"], json!("id"));
    match &response.content[1] {
        ToolContent::Text {
            text
        } => assert!(text.contains("Table: customers")),
        other => panic!("expected text content, got {:?}", other)
    }
}

#[tokio::test]
async fn test_missing_required_argument() {
    let (tools, backend) = toolbox(shop_backend());
    let response = tools.call(Tool::DescribeTable, &json!({})).await;

    assert!(response.is_error);
    assert_eq!(payload(&response)["kind"], json!("input_format"));
    assert!(
        payload(&response)["error"]
            .as_str()
            .unwrap()
            .contains("missing required argument 'table'")
    );
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_arguments_must_be_object() {
    let (tools, backend) = toolbox(shop_backend());
    let response = tools.call(Tool::LintQuery, &json!(["SELECT 1"])).await;

    assert!(response.is_error);
    assert_eq!(payload(&response)["kind"], json!("input_format"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_execute_query() {
    let backend = ScriptedBackend::new().on(
        "FROM orders",
        vec![row(&[("id", SqlValue::Int(1)), ("status", SqlValue::from("paid"))])]
    );
    let (tools, backend) = toolbox(backend);
    let response = tools
        .call(
            Tool::ExecuteQuery,
            &json!({"query": "SELECT id, status FROM orders WHERE id = ?", "params": [1]})
        )
        .await;

    assert!(!response.is_error);
    assert_eq!(
        payload(&response),
        &json!({"success": true, "rows": [{"id": 1, "status": "paid"}], "row_count": 1})
    );
    assert_eq!(backend.calls()[0].1, vec![Literal::from(1)]);
}

#[tokio::test]
async fn test_execute_query_params_as_text() {
    let (tools, backend) = toolbox(ScriptedBackend::new());
    tools
        .call(
            Tool::ExecuteQuery,
            &json!({"query": "SELECT * FROM t WHERE a = ? AND b = ?", "params": "[\"x\", null]"})
        )
        .await;

    assert_eq!(backend.calls()[0].1, vec![Literal::from("x"), Literal::Null]);
}

#[tokio::test]
async fn test_execute_query_rejects_nested_params() {
    let (tools, backend) = toolbox(ScriptedBackend::new());
    let response = tools
        .call(Tool::ExecuteQuery, &json!({"query": "SELECT 1", "params": [[1]]}))
        .await;

    assert_eq!(payload(&response)["kind"], json!("input_format"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_execute_query_policy_violation() {
    let (tools, backend) = toolbox(ScriptedBackend::new());
    let response = tools
        .call(Tool::ExecuteQuery, &json!({"query": "DELETE FROM orders"}))
        .await;

    assert!(response.is_error);
    let body = payload(&response);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("DELETE is not permitted"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_build_query_without_execution() {
    let (tools, backend) = toolbox(ScriptedBackend::new());
    let response = tools
        .call(
            Tool::BuildQuery,
            &json!({
                "table": "orders",
                "columns": "id, status",
                "where_conditions": "{\"status\": \"paid\", \"total\": {\"operator\": \">\", \"value\": 100}}",
                "order_by": "id",
                "limit": 20
            })
        )
        .await;

    assert!(!response.is_error);
    assert_eq!(
        payload(&response),
        &json!({
            "sql": "SELECT id, status FROM orders WHERE status = 'paid' AND total > 100 ORDER BY id LIMIT 20"
        })
    );
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_build_query_with_inline_conditions_and_execution() {
    let backend = ScriptedBackend::new().on(
        "FROM orders",
        vec![row(&[("status", SqlValue::from("paid")), ("count", SqlValue::Int(3))])]
    );
    let (tools, backend) = toolbox(backend);
    let response = tools
        .call(
            Tool::BuildQuery,
            &json!({
                "table": "orders",
                "columns": "status, COUNT(*) as count",
                "where_conditions": {"archived": false},
                "group_by": "status",
                "execute": true
            })
        )
        .await;

    let body = payload(&response);
    assert_eq!(
        body["sql"],
        json!("SELECT status, COUNT(*) as count FROM orders WHERE archived = FALSE GROUP BY status")
    );
    assert_eq!(body["result"]["row_count"], json!(1));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_build_query_malformed_conditions_never_touch_database() {
    let (tools, backend) = toolbox(ScriptedBackend::new());
    let response = tools
        .call(
            Tool::BuildQuery,
            &json!({"table": "orders", "where_conditions": "{not json", "execute": true})
        )
        .await;

    assert!(response.is_error);
    assert_eq!(payload(&response)["kind"], json!("input_format"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_build_query_rejects_negative_limit() {
    let (tools, _) = toolbox(ScriptedBackend::new());
    let response = tools
        .call(Tool::BuildQuery, &json!({"table": "orders", "limit": -1}))
        .await;

    assert_eq!(payload(&response)["kind"], json!("input_format"));
}

#[tokio::test]
async fn test_natural_language_query() {
    let (tools, backend) = toolbox(shop_backend());
    let response = tools
        .call(
            Tool::NaturalLanguageQuery,
            &json!({"request": "how many rows in orders"})
        )
        .await;

    assert!(!response.is_error);
    assert_eq!(
        payload(&response),
        &json!({"sql": "SELECT COUNT(*) as total_count FROM orders"})
    );
    // listing plus one describe per table, no execution
    assert_eq!(backend.call_count(), 3);
}

#[tokio::test]
async fn test_natural_language_query_executes() {
    let backend = shop_backend().on(
        "COUNT(*)",
        vec![row(&[("total_count", SqlValue::Int(42))])]
    );
    let (tools, _) = toolbox(backend);
    let response = tools
        .call(
            Tool::NaturalLanguageQuery,
            &json!({"request": "count orders", "execute": true})
        )
        .await;

    let body = payload(&response);
    assert_eq!(body["result"]["rows"], json!([{"total_count": 42}]));
}

#[tokio::test]
async fn test_natural_language_placeholder_is_not_executed() {
    let (tools, backend) = toolbox(shop_backend());
    let response = tools
        .call(
            Tool::NaturalLanguageQuery,
            &json!({"request": "tell me a joke", "execute": true})
        )
        .await;

    assert_eq!(payload(&response), &json!({"sql": PLACEHOLDER}));
    assert_eq!(backend.call_count(), 3);
}

#[tokio::test]
async fn test_analyze_relationships_empty() {
    let (tools, _) = toolbox(ScriptedBackend::new());
    let response = tools.call(Tool::AnalyzeRelationships, &json!({})).await;

    assert!(!response.is_error);
    assert_eq!(payload(&response), &json!([]));
}

#[tokio::test]
async fn test_lint_query() {
    let (tools, backend) = toolbox(ScriptedBackend::new());
    let response = tools
        .call(
            Tool::LintQuery,
            &json!({"query": "SELECT id FROM t WHERE id=1 ORDER BY id LIMIT 5"})
        )
        .await;

    assert_eq!(
        payload(&response),
        &json!(["Query looks good! No obvious improvements suggested."])
    );
    assert_eq!(backend.call_count(), 0);
}
