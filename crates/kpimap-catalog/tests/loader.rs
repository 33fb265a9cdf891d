use std::io::Write;

use tempfile::NamedTempFile;

use kpimap_catalog::{CatalogError, REQUIRED_COLUMNS, load_catalog};

fn temp_catalog(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn loads_a_full_catalog_in_row_order() {
    let file = temp_catalog(
        "KPI Name,KPI Description,KPI Formula,Required Fields\n\
         Revenue,Total revenue,SUM(Sales Amount),Sales Amount; Date\n\
         Churn,Customer churn,lost / total,Customer ID\n",
    );
    let catalog = load_catalog(file.path()).unwrap();

    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(names, vec!["Revenue", "Churn"]);

    let revenue = catalog.get("Revenue").unwrap();
    assert_eq!(revenue.description, "Total revenue");
    assert_eq!(revenue.formula, "SUM(Sales Amount)");
    assert_eq!(revenue.required_fields, vec!["Sales Amount", "Date"]);
}

#[test]
fn reports_every_missing_column_at_once() {
    let file = temp_catalog("KPI Name,Notes\nRevenue,whatever\n");
    let err = load_catalog(file.path()).unwrap_err();

    match err {
        CatalogError::MissingColumns { columns, .. } => {
            assert_eq!(
                columns,
                vec!["KPI Description", "KPI Formula", "Required Fields"]
            );
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn missing_column_report_is_exact() {
    // All four absent: the error lists all four, none extra, none omitted.
    let file = temp_catalog("Name,Description\nRevenue,x\n");
    let err = load_catalog(file.path()).unwrap_err();

    match err {
        CatalogError::MissingColumns { columns, .. } => {
            assert_eq!(columns, REQUIRED_COLUMNS.map(String::from).to_vec());
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn extra_columns_are_ignored() {
    let file = temp_catalog(
        "Owner,KPI Name,KPI Description,KPI Formula,Required Fields,Notes\n\
         finance,Revenue,Total revenue,SUM(x),Sales Amount,n/a\n",
    );
    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(
        catalog.get("Revenue").unwrap().required_fields,
        vec!["Sales Amount"]
    );
}

#[test]
fn duplicate_names_keep_the_first_definition() {
    let file = temp_catalog(
        "KPI Name,KPI Description,KPI Formula,Required Fields\n\
         Revenue,first,F1,A\n\
         Revenue,second,F2,B\n",
    );
    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("Revenue").unwrap().description, "first");
}

#[test]
fn rows_without_a_name_are_skipped() {
    let file = temp_catalog(
        "KPI Name,KPI Description,KPI Formula,Required Fields\n\
         ,orphan,F,A\n\
         Churn,Customer churn,lost / total,Customer ID\n",
    );
    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains("Churn"));
}

#[test]
fn whitespace_around_required_fields_is_normalized() {
    let file = temp_catalog(
        "KPI Name,KPI Description,KPI Formula,Required Fields\n\
         Revenue,desc,F,\"  A; B ;C  \"\n",
    );
    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(
        catalog.get("Revenue").unwrap().required_fields,
        vec!["A", "B", "C"]
    );
}

#[test]
fn missing_catalog_file_is_an_io_error() {
    let err = load_catalog(std::path::Path::new("/nonexistent/kpis.csv")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}
