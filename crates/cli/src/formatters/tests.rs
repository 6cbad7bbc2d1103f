//! Tests for formatters module.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::json;

use super::{
    BreakdownOutput, CategoryOutput, FindingStatsOutput, LinksOutput, ListOutput, MutationOutput,
    OutputFormat, SummaryOutput, TableView, get_formatter,
};

fn asset_page() -> ListOutput {
    ListOutput {
        resource: "assets".to_string(),
        search: "payroll".to_string(),
        filters: BTreeMap::from([("classification".to_string(), "Confidential".to_string())]),
        page: 2,
        page_size: 1,
        total_pages: 3,
        total_items: 3,
        range: "Showing 2 to 2 of 3 assets".to_string(),
        links: vec!["1".to_string(), "2".to_string(), "3".to_string()],
        records: vec![json!({"asset_id": "AST-0002", "asset_name": "Payroll, Archive", "owner": null})],
        skipped: 0,
        title: "Asset Inventory".to_string(),
        page_bar: "1 [2] 3".to_string(),
        table: TableView {
            headers: vec!["Asset ID".to_string(), "Name".to_string(), "Owner".to_string()],
            fields: vec![
                "asset_id".to_string(),
                "asset_name".to_string(),
                "owner".to_string(),
            ],
            rows: vec![vec![
                "AST-0002".to_string(),
                "Payroll, Archive".to_string(),
                "N/A".to_string(),
            ]],
        },
    }
}

fn empty_page() -> ListOutput {
    ListOutput {
        resource: "gaps".to_string(),
        search: String::new(),
        filters: BTreeMap::new(),
        page: 1,
        page_size: 10,
        total_pages: 1,
        total_items: 0,
        range: "No gaps found".to_string(),
        links: vec!["1".to_string()],
        records: Vec::new(),
        skipped: 0,
        title: "Compliance Gap Analysis".to_string(),
        page_bar: "[1]".to_string(),
        table: TableView {
            headers: vec!["ID".to_string(), "Status".to_string()],
            fields: vec!["id".to_string(), "status".to_string()],
            rows: Vec::new(),
        },
    }
}

fn findings_summary() -> SummaryOutput {
    SummaryOutput {
        resource: "findings".to_string(),
        total: 3,
        breakdowns: vec![BreakdownOutput {
            field: "severity".to_string(),
            categories: vec![
                CategoryOutput {
                    category: "Critical".to_string(),
                    count: 1,
                    percentage: "33%".to_string(),
                },
                CategoryOutput {
                    category: "High".to_string(),
                    count: 2,
                    percentage: "67%".to_string(),
                },
            ],
        }],
        findings: Some(FindingStatsOutput {
            as_of: chrono::NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            open: 1,
            in_progress: 1,
            resolved: 1,
            critical: 1,
            high: 2,
            overdue: 1,
            average_aging_days: None,
            resolution_rate: "33%".to_string(),
        }),
        title: "Assessment Findings summary".to_string(),
    }
}

#[test]
fn test_output_format_from_str() {
    assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
    assert_eq!(OutputFormat::from_str("yml").unwrap(), OutputFormat::Yaml);
    assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
    assert!(OutputFormat::from_str("xml").is_err());
}

#[test]
fn test_table_list_shows_rows_range_and_page_bar() {
    let output = get_formatter(OutputFormat::Table)
        .format_list(&asset_page())
        .unwrap();

    assert!(output.starts_with("Asset Inventory\n"));
    assert!(output.contains("Asset ID\tName\tOwner\n"));
    assert!(output.contains("AST-0002\tPayroll, Archive\tN/A\n"));
    assert!(output.contains("Showing 2 to 2 of 3 assets\n"));
    assert!(output.contains("Page 2 of 3: 1 [2] 3\n"));
}

#[test]
fn test_table_empty_list() {
    let output = get_formatter(OutputFormat::Table)
        .format_list(&empty_page())
        .unwrap();

    assert!(output.contains("No gaps found"));
    assert!(!output.contains("ID\tStatus"));
    assert!(!output.contains("Page 1 of 1"));
}

#[test]
fn test_table_reports_skipped_rows() {
    let mut page = empty_page();
    page.skipped = 2;
    let output = get_formatter(OutputFormat::Table).format_list(&page).unwrap();
    assert!(output.contains("2 malformed record(s) skipped"));
}

#[test]
fn test_json_list_keeps_nulls_and_hides_display_fields() {
    let output = get_formatter(OutputFormat::Json)
        .format_list(&asset_page())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["resource"], "assets");
    assert_eq!(value["filters"]["classification"], "Confidential");
    assert_eq!(value["records"][0]["owner"], serde_json::Value::Null);
    assert!(value.get("title").is_none());
    assert!(value.get("table").is_none());
    assert!(value.get("skipped").is_none());
}

#[test]
fn test_json_empty_list_is_parseable() {
    let output = get_formatter(OutputFormat::Json)
        .format_list(&empty_page())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["records"], json!([]));
    assert!(value.get("search").is_none());
    assert!(value.get("filters").is_none());
}

#[test]
fn test_csv_list_quotes_and_headers() {
    let output = get_formatter(OutputFormat::Csv)
        .format_list(&asset_page())
        .unwrap();

    assert_eq!(
        output,
        "asset_id,asset_name,owner\nAST-0002,\"Payroll, Archive\",N/A\n"
    );
}

#[test]
fn test_csv_empty_list_emits_header() {
    let output = get_formatter(OutputFormat::Csv)
        .format_list(&empty_page())
        .unwrap();
    assert_eq!(output, "id,status\n");
}

#[test]
fn test_yaml_empty_list() {
    let output = get_formatter(OutputFormat::Yaml)
        .format_list(&empty_page())
        .unwrap();
    assert!(output.contains("records: []"));
}

#[test]
fn test_table_summary() {
    let output = get_formatter(OutputFormat::Table)
        .format_summary(&findings_summary())
        .unwrap();

    assert!(output.contains("Total: 3"));
    assert!(output.contains("  High\t2\t67%"));
    assert!(output.contains("Findings as of 2024-03-20"));
    assert!(output.contains("  Average age\tN/A"));
    assert!(output.contains("  Resolution rate\t33%"));
}

#[test]
fn test_csv_summary_sections() {
    let output = get_formatter(OutputFormat::Csv)
        .format_summary(&findings_summary())
        .unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "section,category,count,percentage");
    assert_eq!(lines[1], "total,findings,3,");
    assert_eq!(lines[2], "severity,Critical,1,33%");
    assert!(lines.contains(&"findings,overdue,1,"));
    assert!(lines.contains(&"findings,resolution_rate,,33%"));
}

#[test]
fn test_json_summary_omits_stats_for_other_registers() {
    let mut summary = findings_summary();
    summary.findings = None;
    let output = get_formatter(OutputFormat::Json)
        .format_summary(&summary)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert!(value.get("findings").is_none());
    assert_eq!(value["breakdowns"][0]["categories"][1]["percentage"], "67%");
}

#[test]
fn test_links_formats() {
    let links = LinksOutput {
        current: 10,
        total: 20,
        max_visible: 5,
        links: ["1", "…", "8", "9", "10", "11", "12", "…", "20"]
            .map(String::from)
            .to_vec(),
        bar: "1 … 8 9 [10] 11 12 … 20".to_string(),
    };

    let table = get_formatter(OutputFormat::Table).format_links(&links).unwrap();
    assert_eq!(table, "1 … 8 9 [10] 11 12 … 20\n");

    let csv = get_formatter(OutputFormat::Csv).format_links(&links).unwrap();
    assert!(csv.starts_with("position,token\n1,1\n2,…\n"));

    let json: serde_json::Value =
        serde_json::from_str(&get_formatter(OutputFormat::Json).format_links(&links).unwrap())
            .unwrap();
    assert_eq!(json["links"][1], "…");
}

#[test]
fn test_mutation_without_refetch_count() {
    let outcome = MutationOutput {
        resource: "assets".to_string(),
        action: "delete".to_string(),
        key: Some("3".to_string()),
        message: "Asset deleted successfully".to_string(),
        data: None,
        record_count: None,
    };

    let table = get_formatter(OutputFormat::Table)
        .format_mutation(&outcome)
        .unwrap();
    assert_eq!(table, "Asset deleted successfully\n");

    let json: serde_json::Value = serde_json::from_str(
        &get_formatter(OutputFormat::Json)
            .format_mutation(&outcome)
            .unwrap(),
    )
    .unwrap();
    assert!(json.get("record_count").is_none());
    assert_eq!(json["key"], "3");
}

#[test]
fn test_mutation_with_refetch_count() {
    let outcome = MutationOutput {
        resource: "assets".to_string(),
        action: "create".to_string(),
        key: None,
        message: "Record created in assets".to_string(),
        data: Some(json!({"id": 4})),
        record_count: Some(4),
    };

    let table = get_formatter(OutputFormat::Table)
        .format_mutation(&outcome)
        .unwrap();
    assert!(table.contains("assets now holds 4 record(s)"));

    let csv = get_formatter(OutputFormat::Csv)
        .format_mutation(&outcome)
        .unwrap();
    assert_eq!(
        csv,
        "resource,action,key,message,record_count\nassets,create,,Record created in assets,4\n"
    );
}
