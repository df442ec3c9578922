use std::{fs, path::PathBuf};

use butent_config::configuration::{Configuration, ConfigurationError, Dialect, OperationZone};
use serde::Deserialize;

const CONFIGURATION: &str = r#"
[app]
service_name = "butent-orders"
console = true
host = "127.0.0.1"
port = 9000
recover = true
schedule = "0 */10 * * * *"

[app.secure]
cache = "{CONFIGURATION_DIRECTORY}/acme"
cert = "{CONFIGURATION_DIRECTORY}/tls/cert.pem"
key = "{CONFIGURATION_DIRECTORY}/tls/key.pem"

[butent]
letter = "P"
home_country = "LT"
warehouse = "SAND1"
isaf = 0
client = "E-SHOP"
user_id = 7
vat = "PVM1"

[butent.operations]
home = "PARD"

[butent.goods]
item = 500
tax = 501

[database]
dialect = "mysql"
host = "mysql.internal"
port = 3306
user = "orders"
pass = "hunter2"
name = "orders"
location = "UTC"

[database.params]
readTimeout = "30s"

[logging]
console_output_level_filter = "warn"
log_file_output_directory = "{CONFIGURATION_DIRECTORY}/logs"

[prestashop]
endpoint = "https://shop.example/api"
key = "abc"
"#;

#[derive(Deserialize)]
struct Prestashop {
    endpoint: String,
    key: String,
}

fn write_configuration(directory: &tempfile::TempDir) -> PathBuf {
    let path = directory.path().join("config.toml");
    fs::write(&path, CONFIGURATION).expect("configuration file should be writable");
    path
}

#[test]
fn loads_configuration_file() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_configuration(&directory);
    let canonical_directory = dunce::canonicalize(directory.path()).unwrap();

    let configuration = Configuration::load_from_path(&path).unwrap();

    assert_eq!(
        configuration.file_path,
        Some(canonical_directory.join("config.toml"))
    );
    assert!(!configuration.debug());

    let secure = configuration.app.secure.as_ref().unwrap();
    assert_eq!(secure.cert, canonical_directory.join("tls/cert.pem"));
    assert_eq!(
        configuration.logging.log_file_output_directory,
        Some(canonical_directory.join("logs"))
    );
    assert_eq!(configuration.logging.console_output_level_filter, "warn");
    assert_eq!(configuration.logging.log_file_output_level_filter, "info");

    assert_eq!(configuration.butent.isaf(), None);
    assert_eq!(configuration.butent.client.as_deref(), Some("E-SHOP"));
    assert_eq!(configuration.butent.tax_item(), Some(501));
    assert_eq!(configuration.butent.shipping_item(), None);
    assert_eq!(
        configuration.butent.operation(OperationZone::Home),
        Some("PARD")
    );
}

#[test]
fn formats_mysql_dsn_from_file() {
    let directory = tempfile::tempdir().unwrap();
    let configuration = Configuration::load_from_path(write_configuration(&directory)).unwrap();

    let database = configuration.database();
    assert_eq!(database.dialect, Dialect::MySql { port: Some(3306) });
    assert_eq!(
        database.format_dsn(),
        "orders:hunter2@tcp(mysql.internal:3306)/orders?collation=cp1257_lithuanian_ci\
         &interpolateParams=true&multiStatements=true&parseTime=true&readTimeout=30s"
    );
}

#[test]
fn loads_custom_section_from_file() {
    let directory = tempfile::tempdir().unwrap();
    let configuration = Configuration::load_from_path(write_configuration(&directory)).unwrap();

    let prestashop = configuration.load_section::<Prestashop>("prestashop").unwrap();
    assert_eq!(prestashop.endpoint, "https://shop.example/api");
    assert_eq!(prestashop.key, "abc");

    assert!(matches!(
        configuration.load_section::<Prestashop>("woocommerce"),
        Err(ConfigurationError::SectionNotFound { .. })
    ));
}

#[test]
fn missing_file_is_an_error() {
    let directory = tempfile::tempdir().unwrap();

    let result = Configuration::load_from_path(directory.path().join("missing.toml"));

    assert!(result.is_err());
}
