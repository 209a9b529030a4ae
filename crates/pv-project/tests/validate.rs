use pv_cabling::CablingRun;
use pv_project::*;

fn project_with_runs(runs_json: &str) -> Project {
    Project {
        version: LATEST_VERSION,
        name: "Validate".to_string(),
        inverter_config: InverterConfig {
            brand: InverterBrand::Custom,
            dc_cabling_runs: serde_json::from_str(runs_json).unwrap(),
            ..InverterConfig::default()
        },
        report: ReportSettings::default(),
    }
}

#[test]
fn accepts_sparse_runs() {
    let project = project_with_runs(r#"[{ "mpptIndex": 3, "lengthM": 15 }]"#);
    validate_project(&project).unwrap();
    assert_eq!(
        project.inverter_config.dc_cabling_runs.find(3),
        Some(&CablingRun::new(3, 15.0, 4.0))
    );
}

#[test]
fn accepts_non_standard_section() {
    let project = project_with_runs(r#"[{ "mpptIndex": 1, "lengthM": 15, "sectionMm2": 16 }]"#);
    validate_project(&project).unwrap();
}

#[test]
fn rejects_duplicate_run_keys() {
    let project = project_with_runs(r#"[{ "mpptIndex": 1 }, { "mpptIndex": 1, "lengthM": 4 }]"#);
    let err = validate_project(&project).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateId { ref id, .. } if id == "1"));
}

#[test]
fn rejects_zero_mppt_index() {
    let project = project_with_runs(r#"[{ "mpptIndex": 0, "lengthM": 4 }]"#);
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::InvalidValue { .. })
    ));
}

#[test]
fn rejects_negative_length() {
    let project = project_with_runs(r#"[{ "mpptIndex": 1, "lengthM": -2 }]"#);
    let err = validate_project(&project).unwrap_err();
    assert!(err.to_string().contains("lengthM"));
}

#[test]
fn rejects_zero_section() {
    let project = project_with_runs(r#"[{ "mpptIndex": 1, "lengthM": 2, "sectionMm2": 0 }]"#);
    let err = validate_project(&project).unwrap_err();
    assert!(err.to_string().contains("sectionMm2"));
}

#[test]
fn rejects_duplicate_string_ids() {
    let mut project = project_with_runs("[]");
    let s = ConfiguredString {
        id: "s1".to_string(),
        field_id: String::new(),
        panel_count: 10,
        mppt_index: 1,
    };
    project.inverter_config.configured_strings = vec![s.clone(), s];
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::DuplicateId { .. })
    ));
}

#[test]
fn rejects_future_version() {
    let mut project = project_with_runs("[]");
    project.version = LATEST_VERSION + 1;
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::UnsupportedVersion { .. })
    ));
}

#[test]
fn micro_systems_have_no_dc_cabling() {
    let mut config = InverterConfig::default();
    assert!(!config.uses_dc_cabling());
    config.brand = InverterBrand::Enphase;
    assert!(!config.uses_dc_cabling());
    config.brand = InverterBrand::FoxEss;
    assert!(config.uses_dc_cabling());
}

#[test]
fn rejects_non_finite_run_values() {
    let mut project = project_with_runs("[]");
    project.inverter_config.dc_cabling_runs =
        serde_yaml::from_str("- { mpptIndex: 1, lengthM: .nan }").unwrap();
    let err = validate_project(&project).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field.ends_with("lengthM")));
    assert!(err.to_string().contains("Non-finite"));

    project.inverter_config.dc_cabling_runs =
        serde_yaml::from_str("- { mpptIndex: 1, lengthM: 10, sectionMm2: .inf }").unwrap();
    let err = validate_project(&project).unwrap_err();
    assert!(err.to_string().contains("sectionMm2"));
    assert!(err.to_string().contains("Non-finite"));
}
