use vm_intel_merge::schema::{
    DISCOVERY_REQUIRED, DISCOVERY_SOURCE, INVENTORY_REQUIRED, INVENTORY_SOURCE, SchemaError,
    normalize_column_name, validate_headers,
};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn normalize_column_name_ignores_case_spaces_and_underscores() {
    assert_eq!(normalize_column_name(" OS_Version "), "osversion");
    assert_eq!(normalize_column_name("DNS Name"), "dnsname");
    assert_eq!(normalize_column_name("Feature_Ports"), "featureports");
}

#[test]
fn variant_column_names_pass_validation() {
    let actual = headers(&["name", "NOTES", "os_version", " DNS Name "]);
    assert!(validate_headers(&actual, INVENTORY_REQUIRED, INVENTORY_SOURCE).is_ok());
}

#[test]
fn similar_column_is_suggested() {
    let actual = headers(&["Name", "Notes_Old", "OS Version", "DNS Name"]);
    let err = validate_headers(&actual, INVENTORY_REQUIRED, INVENTORY_SOURCE).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingWithSuggestions {
            table: "Inventory".to_string(),
            column: "Notes".to_string(),
            similar: vec!["Notes_Old".to_string()],
        }
    );
    assert_eq!(
        err.to_string(),
        "Inventory missing 'Notes' column. Similar columns found: Notes_Old\n\
         Please rename to 'Notes' or update the code."
    );
}

#[test]
fn missing_columns_without_suggestions_are_reported_together() {
    let actual = headers(&["Name", "OS Version", "Comment"]);
    let err = validate_headers(&actual, INVENTORY_REQUIRED, INVENTORY_SOURCE).unwrap_err();
    match &err {
        SchemaError::MissingColumns { missing, .. } => {
            assert_eq!(missing, &vec!["Notes".to_string(), "DNS Name".to_string()]);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Inventory missing required columns: Notes, DNS Name\n\
         Required columns for Inventory:\n- Name\n- Notes\n- OS Version\n- DNS Name"
    );
}

#[test]
fn first_suggestion_stops_validation() {
    let actual = headers(&["Name", "OS Version", "Notes Archive"]);
    let err = validate_headers(&actual, INVENTORY_REQUIRED, INVENTORY_SOURCE).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::MissingWithSuggestions { ref column, .. } if column == "Notes"
    ));
    assert!(!err.to_string().contains("DNS Name"));
}

#[test]
fn suggestion_discards_previously_collected_missing_columns() {
    let actual = headers(&["Discovered App", "Feature Ports List"]);
    let err = validate_headers(&actual, DISCOVERY_REQUIRED, DISCOVERY_SOURCE).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingWithSuggestions {
            table: "Discovery".to_string(),
            column: "Feature Ports".to_string(),
            similar: vec!["Feature Ports List".to_string()],
        }
    );
    assert_eq!(err.source_label(), "Discovery");
}

#[test]
fn every_similar_column_is_listed() {
    let actual = headers(&["Host", "Discovered App", "feature_ports_old", "FeaturePortsNew"]);
    let err = validate_headers(&actual, DISCOVERY_REQUIRED, DISCOVERY_SOURCE).unwrap_err();
    assert!(
        err.to_string()
            .contains("Similar columns found: feature_ports_old, FeaturePortsNew")
    );
}
