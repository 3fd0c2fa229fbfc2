use sql_tool_server::{
    db::{SqlValue, settle_cell},
    error::ToolError
};

fn text_fallback() -> Result<Option<SqlValue>, String> {
    Ok(Some(SqlValue::from("12:30")))
}

#[test]
fn test_typed_value_kept() {
    let value = settle_cell("id", Some(Ok(Some(SqlValue::Int(4)))), text_fallback).unwrap();

    assert_eq!(value, SqlValue::Int(4));
}

#[test]
fn test_sql_null_stays_null() {
    let value = settle_cell("note", Some(Ok(None)), text_fallback).unwrap();

    assert!(value.is_null());
}

#[test]
fn test_untyped_column_reads_text() {
    let value = settle_cell("at", None, text_fallback).unwrap();

    assert_eq!(value, SqlValue::from("12:30"));
}

#[test]
fn test_failed_typed_decode_falls_back_to_text() {
    let value = settle_cell(
        "at",
        Some(Err(String::from("mismatched types"))),
        text_fallback
    )
    .unwrap();

    assert_eq!(value, SqlValue::from("12:30"));
}

#[test]
fn test_undecodable_cell_is_error_not_null() {
    let err = settle_cell(
        "shape",
        Some(Err(String::from("mismatched types"))),
        || Err(String::from("invalid utf-8"))
    )
    .unwrap_err();

    match err {
        ToolError::Execution(msg) => {
            assert!(msg.contains("shape"));
            assert!(msg.contains("invalid utf-8"));
        }
        other => panic!("unexpected error {:?}", other)
    }
}
