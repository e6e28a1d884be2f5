//! Integration tests for the flutter-i18n-gen workspace
//!
//! These tests drive whole workspace operations against a temporary directory
//! and check the generated `i18n.dart`, plus machine translation against a
//! mocked Google Translate endpoint.

use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use flutter_i18n_gen::{
    error::{I18nError, TranslateError},
    i18n::{Direction, ResourceStore},
    retry::RetryConfig,
    storage::FileSystem,
    translation::GoogleTranslator,
    workspace::Workspace,
};

// ==================== Test Helpers ====================

fn create_workspace(temp_dir: &TempDir) -> Workspace<FileSystem> {
    Workspace::new(ResourceStore::new(FileSystem, temp_dir.path()))
}

fn write_json(path: &Path, value: &Value) {
    std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create directory");
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap())
        .expect("Failed to write json");
}

fn write_config(temp_dir: &TempDir, value: Value) {
    write_json(&temp_dir.path().join("i18nconfig.json"), &value);
}

fn write_resource(temp_dir: &TempDir, locale: &str, value: Value) {
    write_json(
        &temp_dir.path().join("i18n").join(format!("{}.json", locale)),
        &value,
    );
}

fn read_resource(temp_dir: &TempDir, locale: &str) -> Value {
    let text =
        std::fs::read_to_string(temp_dir.path().join("i18n").join(format!("{}.json", locale)))
            .expect("Failed to read resource");
    serde_json::from_str(&text).expect("Resource is valid json")
}

fn read_output(temp_dir: &TempDir) -> String {
    std::fs::read_to_string(temp_dir.path().join("lib/generated/i18n.dart"))
        .expect("Failed to read generated output")
}

/// Text of the `class <name> ...` block, up to its closing brace.
fn class_block<'a>(output: &'a str, class_name: &str) -> &'a str {
    let start = output
        .find(&format!("class {} ", class_name))
        .unwrap_or_else(|| panic!("class {} not found", class_name));
    let end = output[start..].find("\n}\n").expect("class is closed") + start;
    &output[start..end]
}

fn google_response(text: &str) -> Value {
    json!({ "data": { "translations": [ { "translatedText": text } ] } })
}

fn translator(server: &MockServer) -> GoogleTranslator {
    GoogleTranslator::new(
        reqwest::Client::new(),
        format!("{}/language/translate/v2", server.uri()),
        "test-key",
        "en",
    )
    .with_retry(RetryConfig::no_retry())
}

// ==================== Generation Tests ====================

#[test]
fn test_inheritance_overrides_and_registry() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        &temp_dir,
        json!({"defaultLocale": "en-US", "locales": ["en-US", "en-GB", "fr-FR"]}),
    );
    write_resource(&temp_dir, "en-US", json!({"title": "Hello {name}", "color": "Color"}));
    write_resource(&temp_dir, "en-GB", json!({"color": "Colour"}));
    write_resource(&temp_dir, "fr-FR", json!({"title": "Bonjour {name}", "color": "Couleur"}));

    let report = create_workspace(&temp_dir).update().expect("Generation should succeed");
    assert!(report.is_complete());
    assert_eq!(report.accessor_count, 2);
    assert_eq!(report.locale_count, 3);

    let output = read_output(&temp_dir);

    let canonical = class_block(&output, "I18n");
    assert!(canonical.contains("String title(String name) => \"Hello ${name}\";"));
    assert!(canonical.contains("String get color => \"Color\";"));
    assert!(canonical.find("title(").unwrap() < canonical.find("get color").unwrap());

    let en_us = class_block(&output, "_I18n_en_US");
    assert!(en_us.contains("extends I18n {"));
    assert!(!en_us.contains("@override\n  String"));

    let en_gb = class_block(&output, "_I18n_en_GB");
    assert!(en_gb.contains("extends _I18n_en_US {"));
    assert!(en_gb.contains("@override\n  String get color => \"Colour\";"));
    assert!(!en_gb.contains("title"));

    let fr_fr = class_block(&output, "_I18n_fr_FR");
    assert!(fr_fr.contains("extends I18n {"));
    assert!(fr_fr.contains("String title(String name) => \"Bonjour ${name}\";"));
    assert!(fr_fr.contains("TextDirection.ltr"));

    assert!(output.contains("Locale(\"en\", \"US\")"));
    assert!(output.contains("Locale(\"fr\", \"FR\")"));
    let full_match = output.find("if (\"en_GB\" == lang)").unwrap();
    let language_match = output.find("if (\"en\" == languageCode)").unwrap();
    assert!(full_match < language_match);
    assert!(output.ends_with("}\n"));
}

#[test]
fn test_nested_keys_and_literal_escaping() {
    let temp_dir = TempDir::new().unwrap();
    write_config(&temp_dir, json!({"defaultLocale": "en-US", "locales": ["en-US"]}));
    write_resource(
        &temp_dir,
        "en-US",
        json!({
            "parent": {"childValue": "Nested"},
            "price": "Costs $5 \"today\"",
            "days": ["Mon", "Tue"],
            "count": 3
        }),
    );

    create_workspace(&temp_dir).update().unwrap();
    let output = read_output(&temp_dir);

    assert!(output.contains("String get parentChildValue => \"Nested\";"));
    assert!(output.contains(r#"String get price => "Costs \$5 \"today\"";"#));
    assert!(output.contains("List<String> get days => [\"Mon\", \"Tue\"];"));
    assert!(output.contains("String get count => \"3\";"));
}

#[test]
fn test_broken_locale_is_skipped_and_reported() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        &temp_dir,
        json!({"defaultLocale": "en-US", "locales": ["en-US", "de-DE"]}),
    );
    write_resource(&temp_dir, "en-US", json!({"title": "Hello"}));
    std::fs::write(temp_dir.path().join("i18n/de-DE.json"), "{ not json").unwrap();

    let report = create_workspace(&temp_dir).update().unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.skipped[0].locale, "de-DE");
    let output = read_output(&temp_dir);
    assert!(class_block(&output, "_I18n_de_DE").contains("extends I18n {"));
}

#[test]
fn test_missing_default_resource_aborts_without_output() {
    let temp_dir = TempDir::new().unwrap();
    write_config(&temp_dir, json!({"defaultLocale": "en-US", "locales": ["en-US"]}));

    let err = create_workspace(&temp_dir).update().unwrap_err();

    assert!(matches!(err, I18nError::Configuration { .. }));
    assert!(!temp_dir.path().join("lib/generated/i18n.dart").exists());
}

#[test]
fn test_rtl_and_ltr_overrides() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        &temp_dir,
        json!({
            "defaultLocale": "en-US",
            "locales": ["en-US", "ar-EG", "he-IL", "fr-FR"],
            "ltr": ["ar-EG"],
            "rtl": ["fr-FR"]
        }),
    );
    write_resource(&temp_dir, "en-US", json!({"title": "Hello"}));
    for locale in ["ar-EG", "he-IL", "fr-FR"] {
        write_resource(&temp_dir, locale, json!({}));
    }

    create_workspace(&temp_dir).update().unwrap();
    let output = read_output(&temp_dir);

    assert!(class_block(&output, "_I18n_ar_EG").contains("TextDirection.ltr"));
    assert!(class_block(&output, "_I18n_he_IL").contains("TextDirection.rtl"));
    assert!(class_block(&output, "_I18n_fr_FR").contains("TextDirection.rtl"));
}

// ==================== Workspace Lifecycle Tests ====================

#[test]
fn test_full_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = create_workspace(&temp_dir);

    workspace.init("en-US").unwrap();
    workspace.add_locale("fa-IR", Some(Direction::Ltr)).unwrap();
    workspace.add_locale("de-DE", None).unwrap();
    workspace.insert_key("title", "Hello {name}").unwrap();
    write_resource(&temp_dir, "de-DE", json!({"title": "Hallo {name}"}));
    workspace.update().unwrap();

    let output = read_output(&temp_dir);
    assert!(class_block(&output, "_I18n_fa_IR").contains("TextDirection.ltr"));
    assert!(class_block(&output, "_I18n_de_DE").contains("\"Hallo ${name}\""));

    workspace.remove_locale("fa-IR").unwrap();

    let config = workspace.load_config().unwrap();
    assert_eq!(config.locales, vec!["en-US", "de-DE"]);
    assert_eq!(config.ltr, None);
    assert!(!temp_dir.path().join("i18n/fa-IR.json").exists());
    let output = read_output(&temp_dir);
    assert!(!output.contains("_I18n_fa_IR"));
    assert!(!output.contains("Locale(\"fa\", \"IR\")"));

    let saved = std::fs::read_to_string(temp_dir.path().join("i18nconfig.json")).unwrap();
    assert!(saved.contains("    \"defaultLocale\": \"en-US\""));
}

// ==================== Auto Translation Tests ====================

#[tokio::test]
async fn test_auto_translate_with_google() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    write_config(
        &temp_dir,
        json!({"defaultLocale": "en-US", "locales": ["en-US", "es-ES"]}),
    );
    write_resource(&temp_dir, "en-US", json!({"greeting": "Hello {name}", "bye": "Bye"}));
    write_resource(&temp_dir, "es-ES", json!({"bye": "Adiós"}));

    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .and(query_param("target", "es"))
        .and(query_param("q", "Hello {name}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_response("Hola {nombre}")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = create_workspace(&temp_dir)
        .auto_translate(&translator(&mock_server))
        .await
        .expect("Translation should succeed");

    assert_eq!(report.key_count(), 1);
    assert_eq!(
        read_resource(&temp_dir, "es-ES"),
        json!({"bye": "Adiós", "greeting": "Hola {name}"})
    );
    let output = read_output(&temp_dir);
    assert!(class_block(&output, "_I18n_es_ES")
        .contains("String greeting(String name) => \"Hola ${name}\";"));
}

#[tokio::test]
async fn test_auto_translate_failure_keeps_earlier_locales() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    write_config(
        &temp_dir,
        json!({"defaultLocale": "en-US", "locales": ["en-US", "fr-FR", "de-DE"]}),
    );
    write_resource(&temp_dir, "en-US", json!({"ok": "OK"}));
    write_resource(&temp_dir, "fr-FR", json!({}));
    write_resource(&temp_dir, "de-DE", json!({}));

    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .and(query_param("target", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_response("D'accord")))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .and(query_param("target", "de"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "Bad language pair" }
        })))
        .mount(&mock_server)
        .await;

    let err = create_workspace(&temp_dir)
        .auto_translate(&translator(&mock_server))
        .await
        .unwrap_err();

    match err {
        I18nError::TranslationService(TranslateError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Bad language pair");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(read_resource(&temp_dir, "fr-FR"), json!({"ok": "D'accord"}));
    assert_eq!(read_resource(&temp_dir, "de-DE"), json!({}));
}
