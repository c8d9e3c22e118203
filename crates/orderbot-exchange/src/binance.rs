//! Binance USD-M futures order entry.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use orderbot_core::{ApiError, GatewayError, OrderAck, OrderGateway, OrderRequest, OrderType};
use reqwest::{header, Client};
use rust_decimal::Decimal;
use serde::Deserialize;
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::credentials::Credentials;

type HmacSha256 = Hmac<Sha256>;

pub const TESTNET_URL: &str = "https://testnet.binancefuture.com";
pub const MAINNET_URL: &str = "https://fapi.binance.com";
const ORDER_PATH: &str = "/fapi/v1/order";

/// Binance futures API configuration.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub credentials: Credentials,
    pub testnet: bool,
    /// Overrides the testnet/mainnet URL when set
    pub base_url: Option<String>,
    pub recv_window_ms: u64,
    /// Per-request timeout; none by default
    pub timeout: Option<Duration>,
}

impl BinanceConfig {
    /// Create config with the default receive window and no timeout.
    pub fn new(credentials: Credentials, testnet: bool) -> Self {
        Self {
            credentials,
            testnet,
            base_url: None,
            recv_window_ms: 5000,
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window_ms = recv_window_ms;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/'),
            None if self.testnet => TESTNET_URL,
            None => MAINNET_URL,
        }
    }
}

/// Error body returned by Binance on rejected requests.
#[derive(Debug, Deserialize)]
struct BinanceErrorBody {
    code: i64,
    msg: String,
}

/// HMAC-SHA256 signature of a query string, hex encoded.
pub fn sign_query(secret: &str, query: &str) -> Result<String, GatewayError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| GatewayError::Configuration(e.to_string()))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

fn time_in_force(request: &OrderRequest) -> String {
    request.time_in_force.unwrap_or_default().as_str().to_string()
}

/// Transport failure without the signed request URL.
fn transport_error(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(err.without_url().to_string())
}

/// Binance futures client.
pub struct BinanceFuturesClient {
    config: BinanceConfig,
    client: Client,
    name: String,
}

impl BinanceFuturesClient {
    /// Create a new client. The API key is attached to every request.
    pub fn new(config: BinanceConfig) -> Result<Self, GatewayError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "X-MBX-APIKEY",
            header::HeaderValue::from_str(config.credentials.api_key())
                .map_err(|e| GatewayError::Configuration(e.to_string()))?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        let name = match &config.base_url {
            Some(_) => format!("Binance Futures ({})", config.base_url()),
            None if config.testnet => "Binance Futures Testnet".to_string(),
            None => "Binance Futures".to_string(),
        };

        Ok(Self {
            config,
            client,
            name,
        })
    }

    /// Request parameters in wire order, without signature.
    fn order_params(
        &self,
        request: &OrderRequest,
        timestamp: i64,
    ) -> Result<Vec<(&'static str, String)>, GatewayError> {
        let mut params = vec![
            ("symbol", request.symbol.clone()),
            ("side", request.side.as_str().to_string()),
            ("type", request.order_type.as_str().to_string()),
            ("quantity", format_decimal(request.quantity)),
        ];

        match request.order_type {
            OrderType::Market => {}
            OrderType::Limit => {
                let price = request.price.ok_or_else(|| {
                    GatewayError::InvalidRequest("LIMIT order requires a price".into())
                })?;
                params.push(("price", format_decimal(price)));
                params.push(("timeInForce", time_in_force(request)));
            }
            OrderType::TakeProfitMarket | OrderType::StopMarket => {
                let stop_price = request.stop_price.ok_or_else(|| {
                    GatewayError::InvalidRequest(format!(
                        "{} order requires a stop price",
                        request.order_type
                    ))
                })?;
                params.push(("stopPrice", format_decimal(stop_price)));
                params.push(("timeInForce", time_in_force(request)));
            }
        }

        let client_order_id = request
            .client_order_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        params.push(("newClientOrderId", client_order_id));
        params.push(("recvWindow", self.config.recv_window_ms.to_string()));
        params.push(("timestamp", timestamp.to_string()));

        Ok(params)
    }

    /// Encoded query string with the trailing signature parameter.
    fn signed_query(&self, params: &[(&'static str, String)]) -> Result<String, GatewayError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter())
            .finish();
        let signature = sign_query(self.config.credentials.api_secret(), &query)?;
        Ok(format!("{}&signature={}", query, signature))
    }

    fn parse_api_error(status: reqwest::StatusCode, body: &str) -> ApiError {
        match serde_json::from_str::<BinanceErrorBody>(body) {
            Ok(err) => ApiError {
                status: status.as_u16(),
                code: err.code,
                message: err.msg,
            },
            Err(_) => ApiError {
                status: status.as_u16(),
                code: 0,
                message: if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body.trim().to_string()
                },
            },
        }
    }
}

#[async_trait]
impl OrderGateway for BinanceFuturesClient {
    async fn submit_order(&self, request: OrderRequest) -> Result<OrderAck, GatewayError> {
        let params = self.order_params(&request, Utc::now().timestamp_millis())?;
        let url = format!(
            "{}{}?{}",
            self.config.base_url(),
            ORDER_PATH,
            self.signed_query(&params)?
        );

        debug!("Submitting order: {:?}", request);

        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(transport_error)?;

        if !status.is_success() {
            return Err(Self::parse_api_error(status, &body).into());
        }

        let raw: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;
        let ack = OrderAck::new(raw);

        info!(
            "Order accepted: {} {} {} {} (id {:?})",
            request.order_type,
            request.side,
            request.quantity,
            request.symbol,
            ack.order_id()
        );
        Ok(ack)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbot_core::Side;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::collections::HashMap;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> BinanceFuturesClient {
        let config = BinanceConfig::new(Credentials::new("test-key", "test-secret"), true)
            .with_base_url(base_url);
        BinanceFuturesClient::new(config).unwrap()
    }

    fn query_map(request: &wiremock::Request) -> HashMap<String, String> {
        request.url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_sign_query_reference_vector() {
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = concat!(
            "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1",
            "&recvWindow=5000&timestamp=1499827319559"
        );
        assert_eq!(
            sign_query(secret, query).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_base_url_selection() {
        let creds = Credentials::new("k", "s");
        assert_eq!(BinanceConfig::new(creds.clone(), true).base_url(), TESTNET_URL);
        assert_eq!(BinanceConfig::new(creds.clone(), false).base_url(), MAINNET_URL);
        assert_eq!(
            BinanceConfig::new(creds, true)
                .with_base_url("http://localhost:9000/")
                .base_url(),
            "http://localhost:9000"
        );
    }

    #[test]
    fn test_market_params_have_no_time_in_force() {
        let client = test_client("http://localhost");
        let request = OrderRequest::market("BTCUSDT", Side::Buy, dec!(2.50000));
        let params: HashMap<_, _> = client
            .order_params(&request, 1_700_000_000_000)
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(params["type"], "MARKET");
        assert_eq!(params["quantity"], "2.5");
        assert_eq!(params["timestamp"], "1700000000000");
        assert_eq!(params["recvWindow"], "5000");
        assert!(!params.contains_key("timeInForce"));
        assert!(!params.contains_key("price"));
    }

    #[test]
    fn test_trigger_params() {
        let client = test_client("http://localhost");
        let request =
            OrderRequest::take_profit_market("BTCUSDT", Side::Sell, dec!(1), dec!(70000.0));
        let params: HashMap<_, _> = client
            .order_params(&request, 1)
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(params["type"], "TAKE_PROFIT_MARKET");
        assert_eq!(params["stopPrice"], "70000");
        assert_eq!(params["timeInForce"], "GTC");
        assert_eq!(params["side"], "SELL");
    }

    #[test]
    fn test_limit_without_price_rejected() {
        let client = test_client("http://localhost");
        let mut request = OrderRequest::limit("BTCUSDT", Side::Buy, dec!(1), dec!(100));
        request.price = None;
        assert!(matches!(
            client.order_params(&request, 1),
            Err(GatewayError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_limit_order_signed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/fapi/v1/order"))
            .and(header("X-MBX-APIKEY", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "orderId": 4051,
                "symbol": "BTCUSDT",
                "status": "NEW",
                "type": "LIMIT"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let request = OrderRequest::limit("btcusdt", Side::Buy, dec!(0.01), dec!(65000.5))
            .with_client_order_id("limit-1");
        let ack = client.submit_order(request).await.unwrap();
        assert_eq!(ack.order_id(), Some(4051));
        assert_eq!(ack.status(), Some("NEW"));

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        let params = query_map(&received[0]);
        assert_eq!(params["symbol"], "BTCUSDT");
        assert_eq!(params["side"], "BUY");
        assert_eq!(params["type"], "LIMIT");
        assert_eq!(params["quantity"], "0.01");
        assert_eq!(params["price"], "65000.5");
        assert_eq!(params["timeInForce"], "GTC");
        assert_eq!(params["newClientOrderId"], "limit-1");

        let query = received[0].url.query().unwrap();
        let (payload, signature) = query.rsplit_once("&signature=").unwrap();
        assert_eq!(signature, sign_query("test-secret", payload).unwrap());
    }

    #[tokio::test]
    async fn test_submit_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/fapi/v1/order"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": -2019,
                "msg": "Margin is insufficient."
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .submit_order(OrderRequest::market("BTCUSDT", Side::Buy, dec!(100)))
            .await
            .unwrap_err();

        let api = err.api_error().unwrap();
        assert_eq!(api.status, 400);
        assert_eq!(api.code, -2019);
        assert_eq!(api.message, "Margin is insufficient.");
    }

    #[tokio::test]
    async fn test_submit_error_without_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .submit_order(OrderRequest::market("BTCUSDT", Side::Sell, dec!(1)))
            .await
            .unwrap_err();

        let api = err.api_error().unwrap();
        assert_eq!(api.status, 502);
        assert_eq!(api.code, 0);
        assert_eq!(api.message, "Bad Gateway");
    }

    #[tokio::test]
    async fn test_submit_malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .submit_order(OrderRequest::market("BTCUSDT", Side::Sell, dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_submit_transport_error() {
        // Nothing listens on the discard port.
        let config = BinanceConfig::new(Credentials::new("test-key", "test-secret"), true)
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(5));
        let client = BinanceFuturesClient::new(config).unwrap();
        let err = client
            .submit_order(OrderRequest::market("BTCUSDT", Side::Buy, dec!(1)))
            .await
            .unwrap_err();
        match err {
            GatewayError::Transport(message) => {
                assert!(!message.contains("signature"), "{}", message);
                assert!(!message.contains("fapi/v1/order"), "{}", message);
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_name_follows_endpoint() {
        let creds = Credentials::new("k", "s");
        let testnet = BinanceFuturesClient::new(BinanceConfig::new(creds.clone(), true)).unwrap();
        assert_eq!(testnet.name(), "Binance Futures Testnet");

        let mainnet = BinanceFuturesClient::new(BinanceConfig::new(creds.clone(), false)).unwrap();
        assert_eq!(mainnet.name(), "Binance Futures");

        let custom = BinanceFuturesClient::new(
            BinanceConfig::new(creds, true).with_base_url("http://localhost:9000/"),
        )
        .unwrap();
        assert_eq!(custom.name(), "Binance Futures (http://localhost:9000)");
    }
}
