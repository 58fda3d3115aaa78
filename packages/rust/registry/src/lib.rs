//! Taxpayer-registry enrichment for procurement records.
//!
//! This crate provides:
//! - [`RegistryClient`] — УНП lookups against portal.nalog.gov.by
//! - [`clean_tax_id`] — normalization of raw УНП strings
//!
//! Lookups are best-effort by contract: any failure yields `None` and the
//! caller keeps its DOM-extracted values.

pub mod client;

pub use client::{RegistryClient, clean_tax_id};

#[cfg(test)]
mod tests {
    use super::*;
    use offergen_shared::RegistryConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, timeout_secs: u64) -> RegistryConfig {
        RegistryConfig {
            endpoint: format!("{}/grp/getData", server.uri()),
            timeout_secs,
        }
    }

    fn grp_body() -> serde_json::Value {
        serde_json::json!({
            "row": {
                "vunp": 100099572,
                "vnaimp": "Открытое акционерное общество \"Белгоспищепром\"",
                "vnaimk": "ОАО \"Белгоспищепром\"",
                "vpadres": "220030, г. Минск, пр-т Победителей, 23",
                "dreg": "14.02.1994",
                "nsostk": 1,
                "vksostk": "Действующий",
                "dlikv": null
            }
        })
    }

    #[tokio::test]
    async fn lookup_returns_registry_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/grp/getData"))
            .and(query_param("unp", "100099572"))
            .and(query_param("type", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(grp_body()))
            .mount(&server)
            .await;

        let client = RegistryClient::new(&config_for(&server, 5)).unwrap();
        let record = client.lookup("100099572").await.expect("registry record");

        assert_eq!(record.tax_id, "100099572");
        assert_eq!(record.short_name, "ОАО \"Белгоспищепром\"");
        assert_eq!(
            record.full_name,
            "Открытое акционерное общество \"Белгоспищепром\""
        );
        assert_eq!(record.address, "220030, г. Минск, пр-т Победителей, 23");
        assert_eq!(record.registration_date, "14.02.1994");
        assert_eq!(record.status_code, "1");
        assert_eq!(record.status_name, "Действующий");
        assert!(record.removal_date.is_empty());
    }

    #[tokio::test]
    async fn lookup_cleans_punctuated_tax_id_before_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/grp/getData"))
            .and(query_param("unp", "100099572"))
            .respond_with(ResponseTemplate::new(200).set_body_json(grp_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = RegistryClient::new(&config_for(&server, 5)).unwrap();
        let record = client.lookup("100-099-572").await.expect("registry record");
        assert_eq!(record.tax_id, "100099572");
    }

    #[tokio::test]
    async fn invalid_tax_id_sends_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(grp_body()))
            .expect(0)
            .mount(&server)
            .await;

        let client = RegistryClient::new(&config_for(&server, 5)).unwrap();
        assert!(client.lookup("12345").await.is_none());
        assert!(client.lookup("").await.is_none());
    }

    #[tokio::test]
    async fn unknown_tax_id_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/grp/getData"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "row": null })),
            )
            .mount(&server)
            .await;

        let client = RegistryClient::new(&config_for(&server, 5)).unwrap();
        assert!(client.lookup("999999999").await.is_none());
    }

    #[tokio::test]
    async fn row_without_vunp_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/grp/getData"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "row": {} })),
            )
            .mount(&server)
            .await;

        let client = RegistryClient::new(&config_for(&server, 5)).unwrap();
        assert!(client.lookup("999999999").await.is_none());
    }

    #[tokio::test]
    async fn server_error_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = RegistryClient::new(&config_for(&server, 5)).unwrap();
        assert!(client.lookup("100099572").await.is_none());
    }

    #[tokio::test]
    async fn malformed_body_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("не json"))
            .mount(&server)
            .await;

        let client = RegistryClient::new(&config_for(&server, 5)).unwrap();
        assert!(client.lookup("100099572").await.is_none());
    }

    #[tokio::test]
    async fn slow_registry_times_out_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(grp_body())
                    .set_delay(std::time::Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let client = RegistryClient::new(&config_for(&server, 1)).unwrap();
        assert!(client.lookup("100099572").await.is_none());
    }

    #[test]
    fn bad_endpoint_is_a_config_error() {
        let config = RegistryConfig {
            endpoint: "not a url".into(),
            timeout_secs: 5,
        };
        assert!(RegistryClient::new(&config).is_err());
    }
}
