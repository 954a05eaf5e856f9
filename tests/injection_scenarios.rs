//! Injection Scenario Tests
//!
//! End-to-end runs of load, merge and inject against on-disk resources:
//! - Defaults plus overrides produce a fully populated value
//! - A missing required value aborts before construction
//! - Composites and arrays are built recursively
//! - Undeclared fields are fatal

use std::fs;

use tempfile::TempDir;
use treefill::tree::DirectoryResolver;
use treefill::{
    injectable, InjectConfig, InjectErrorCode, Injected, InjectionEngine, InjectionPoint, Stage,
    TestInstance,
};

// =============================================================================
// Destination Types
// =============================================================================

injectable! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Settings {
        pub host: String,
        pub port: i32,
    }
}

injectable! {
    #[derive(Debug, Default)]
    pub struct DeployMojo {
        pub retries: i32,
        pub token: String,
        pub settings: Settings,
        pub mirrors: Vec<Settings>,
        pub weights: Vec<Vec<f64>>,
        pub verbose: bool,
        pub separator: char,
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

const DEFAULTS: &str = r#"<values>
    <defaultValues>
        <retries>3</retries>
        <separator>,</separator>
    </defaultValues>
    <requiredValues>
        <token></token>
    </requiredValues>
</values>
"#;

fn setup(overrides: &[(&str, &str)]) -> (TempDir, InjectionEngine<DirectoryResolver>) {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("DeployMojo-default-values.xml"), DEFAULTS).unwrap();
    for (name, content) in overrides {
        fs::write(tmp.path().join(name), content).unwrap();
    }

    let config = InjectConfig {
        resource_roots: vec![tmp.path().to_path_buf()],
        ..InjectConfig::default()
    };
    let engine = InjectionEngine::new(config.resolver(), config);
    (tmp, engine)
}

// =============================================================================
// Scenario Tests
// =============================================================================

/// Defaults fill what the override leaves out.
#[test]
fn test_defaults_and_override_combined() {
    let (_tmp, engine) = setup(&[("case.xml", "<overrides><token>abc</token></overrides>")]);

    let mojo: DeployMojo = engine.inject("case.xml").unwrap();
    assert_eq!(mojo.retries, 3);
    assert_eq!(mojo.token, "abc");
    assert_eq!(mojo.separator, ',');
    assert!(!mojo.verbose);
}

/// An empty override leaves the required token absent.
#[test]
fn test_empty_override_missing_required() {
    let (_tmp, engine) = setup(&[("empty.xml", "<overrides/>")]);

    let err = engine.inject::<DeployMojo>("empty.xml").unwrap_err();
    assert_eq!(err.code(), InjectErrorCode::RequiredValueMissing);
    assert_eq!(err.stage(), Stage::Merge);
    assert_eq!(err.field_name(), Some("token"));
}

/// A composite field is built from the node's children.
#[test]
fn test_composite_settings() {
    let (_tmp, engine) = setup(&[(
        "case.xml",
        r#"<overrides>
            <token>abc</token>
            <settings>
                <host>x</host>
                <port>80</port>
            </settings>
        </overrides>"#,
    )]);

    let mojo: DeployMojo = engine.inject("case.xml").unwrap();
    assert_eq!(
        mojo.settings,
        Settings {
            host: "x".into(),
            port: 80
        }
    );
}

/// Arrays of composites and nested arrays keep document order.
#[test]
fn test_arrays_keep_document_order() {
    let (_tmp, engine) = setup(&[(
        "case.xml",
        r#"<overrides>
            <token>abc</token>
            <mirrors>
                <mirror><host>a</host><port>1</port></mirror>
                <mirror><host>b</host><port>2</port></mirror>
                <mirror><host>c</host><port>3</port></mirror>
            </mirrors>
            <weights>
                <row><w>0.5</w><w>1.5</w></row>
                <row></row>
            </weights>
        </overrides>"#,
    )]);

    let mojo: DeployMojo = engine.inject("case.xml").unwrap();
    let hosts: Vec<_> = mojo.mirrors.iter().map(|m| m.host.as_str()).collect();
    assert_eq!(hosts, vec!["a", "b", "c"]);
    assert_eq!(mojo.mirrors[2].port, 3);
    assert_eq!(mojo.weights, vec![vec![0.5, 1.5], vec![]]);
}

/// An override naming no declared field is rejected.
#[test]
fn test_unknown_field_is_fatal() {
    let (_tmp, engine) = setup(&[(
        "case.xml",
        "<overrides><token>abc</token><doesNotExist>1</doesNotExist></overrides>",
    )]);

    let err = engine.inject::<DeployMojo>("case.xml").unwrap_err();
    assert_eq!(err.code(), InjectErrorCode::FieldNotDeclared);
    assert_eq!(err.type_name(), Some("DeployMojo"));
    assert_eq!(err.field_name(), Some("doesNotExist"));
}

/// Conversion failures report where in the graph they happened.
#[test]
fn test_conversion_failure_path() {
    let (_tmp, engine) = setup(&[(
        "case.xml",
        r#"<overrides>
            <token>abc</token>
            <mirrors>
                <mirror><port>1</port></mirror>
                <mirror><port>two</port></mirror>
            </mirrors>
        </overrides>"#,
    )]);

    let err = engine.inject::<DeployMojo>("case.xml").unwrap_err();
    assert_eq!(err.code(), InjectErrorCode::ScalarConversionFailed);
    assert_eq!(err.field_path(), "mirrors[1].port");
    assert!(std::error::Error::source(&err).is_some());
}

/// Scalars are not trimmed before conversion.
#[test]
fn test_padded_scalar_rejected() {
    let (_tmp, engine) = setup(&[(
        "case.xml",
        "<overrides><token>abc</token><retries> 4 </retries></overrides>",
    )]);

    let err = engine.inject::<DeployMojo>("case.xml").unwrap_err();
    assert_eq!(err.code(), InjectErrorCode::ScalarConversionFailed);
    assert_eq!(err.field_path(), "retries");
}

/// A default and an override for the same name: the later write wins.
#[test]
fn test_override_written_after_default() {
    let (_tmp, engine) = setup(&[(
        "case.xml",
        "<overrides><token>abc</token><retries>9</retries></overrides>",
    )]);

    let tree = engine.effective_tree("DeployMojo", "case.xml").unwrap();
    assert_eq!(tree.first("retries").unwrap().text_content(), "3");

    let mojo: DeployMojo = engine.inject("case.xml").unwrap();
    assert_eq!(mojo.retries, 9);
}

/// Malformed override documents fail at load.
#[test]
fn test_malformed_override_is_load_error() {
    let (_tmp, engine) = setup(&[("bad.xml", "<overrides><token>abc</overrides>")]);

    let err = engine.inject::<DeployMojo>("bad.xml").unwrap_err();
    assert_eq!(err.code(), InjectErrorCode::LoadFailed);
    assert_eq!(err.stage(), Stage::Load);
    assert_eq!(err.source_name(), Some("bad.xml"));
}

// =============================================================================
// Test Host Tests
// =============================================================================

struct DeployTest {
    primary: Injected<DeployMojo>,
    fallback: Injected<Settings>,
}

impl TestInstance for DeployTest {
    fn injection_points(&mut self) -> Vec<&mut dyn InjectionPoint> {
        vec![&mut self.primary as &mut dyn InjectionPoint, &mut self.fallback]
    }
}

/// Every injection point is filled from its own type's defaults.
#[test]
fn test_inject_into_test_instance() {
    let (tmp, engine) = setup(&[
        ("case.xml", "<overrides><token>abc</token></overrides>"),
        ("fallback.xml", "<overrides><host>backup</host></overrides>"),
    ]);
    fs::write(
        tmp.path().join("Settings-default-values.xml"),
        "<values><defaultValues><port>8080</port></defaultValues><requiredValues/></values>",
    )
    .unwrap();

    let mut test = DeployTest {
        primary: Injected::from_source("case.xml"),
        fallback: Injected::from_source("fallback.xml"),
    };
    engine.inject_into(&mut test).unwrap();

    assert_eq!(test.primary.get().unwrap().token, "abc");
    let fallback = test.fallback.into_inner().unwrap();
    assert_eq!(fallback.host, "backup");
    assert_eq!(fallback.port, 8080);
}

/// A type without a default-values document cannot be injected.
#[test]
fn test_inject_into_missing_defaults_document() {
    let (_tmp, engine) = setup(&[
        ("case.xml", "<overrides><token>abc</token></overrides>"),
        ("fallback.xml", "<overrides/>"),
    ]);

    let mut test = DeployTest {
        primary: Injected::from_source("case.xml"),
        fallback: Injected::from_source("fallback.xml"),
    };
    let err = engine.inject_into(&mut test).unwrap_err();

    assert_eq!(err.code(), InjectErrorCode::LoadFailed);
    assert_eq!(err.source_name(), Some("Settings-default-values.xml"));
    assert!(test.primary.is_filled());
    assert!(!test.fallback.is_filled());
}
