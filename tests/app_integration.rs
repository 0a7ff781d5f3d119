use std::fs;
use tracing::{error, info};

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_rate_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/currency"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(base_url: &str, currency: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
            api:
              base_url: {base_url}
            currency: "{currency}"
            format:
              locale: "en-US"
              currency: "USD"
        "#
        );
        std::fs::write(config_file.path(), &config_content).expect("Failed to write config file");
        config_file
    }
}

const FULL_RATE_TABLE: &str = r#"{
    "usd-eur": 0.92,
    "usd-rub": 89.5,
    "eur-usd": 1.0865,
    "eur-rub": 97.3,
    "rub-usd": 0.0112,
    "rub-eur": 0.0103,
    "usd-gbp": 0.79
}"#;

#[test_log::test(tokio::test)]
async fn test_full_rates_flow_with_mock() {
    let mock_server = test_utils::create_rate_mock_server(FULL_RATE_TABLE).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "EUR");

    let result = fxw::run_command(
        fxw::AppCommand::Rates { currency: None },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Rates command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_rates_flow_survives_endpoint_failure() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/currency"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config_file = test_utils::write_config(&mock_server.uri(), "USD");

    // The board renders its last known state on fetch failure, so the
    // command itself must still succeed.
    let result = fxw::run_command(
        fxw::AppCommand::Rates { currency: None },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Rates command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_rates_currency_override() {
    let mock_server = test_utils::create_rate_mock_server(FULL_RATE_TABLE).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "USD");
    let config_path = config_file.path().to_str().unwrap().to_string();

    let result = fxw::run_command(
        fxw::AppCommand::Rates {
            currency: Some("rub".to_string()),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_ok());

    let result = fxw::run_command(
        fxw::AppCommand::Rates {
            currency: Some("GBP".to_string()),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().to_string(),
        "Unsupported currency: GBP"
    );
}

#[test_log::test(tokio::test)]
async fn test_full_convert_flow_with_mock() {
    let mock_server = test_utils::create_rate_mock_server(FULL_RATE_TABLE).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "USD");

    let result = fxw::run_command(
        fxw::AppCommand::Convert {
            amount: 100.0,
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_fails_without_rate() {
    let mock_server = test_utils::create_rate_mock_server("{}").await;
    let config_file = test_utils::write_config(&mock_server.uri(), "USD");

    let result = fxw::run_command(
        fxw::AppCommand::Convert {
            amount: 100.0,
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().to_string(),
        "No rate available for USD to EUR"
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let result = fxw::run_command(
        fxw::AppCommand::Rates { currency: None },
        Some("/nonexistent/fxw-config.yaml"),
    )
    .await;
    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to read config file"));
}

#[test_log::test(tokio::test)]
#[ignore = "hits the live rate endpoint"]
async fn test_real_status_api() {
    use fxw::providers::status_api::StatusApiProvider;
    use fxw::rate_provider::RateProvider;

    let provider = StatusApiProvider::new("https://status.neuralgeneration.com");
    info!("Fetching rate table from the live endpoint");

    match provider.fetch_rates().await {
        Ok(table) => {
            info!(pairs = table.len(), "Received rate table");
            assert!(!table.is_empty(), "Rate table should not be empty");
            assert!(
                table.values().all(|rate| *rate > 0.0),
                "All rates should be positive"
            );
        }
        Err(e) => {
            error!("Rate API request failed: {e}\n{e:?}");
            panic!("Rate API request failed: {e}");
        }
    }
}

#[test_log::test(tokio::test)]
async fn test_config_file_round_trip() {
    // A config produced by setup must load back and drive a command.
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.yaml");
    fxw::config::setup_at_path(&config_path).expect("setup failed");

    let config = fxw::config::AppConfig::load_from_path(&config_path).expect("load failed");
    assert!(config.selected_currency().is_ok());

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("status.neuralgeneration.com"));
}
