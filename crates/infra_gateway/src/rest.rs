//! REST adapter implementing the invoice port
//!
//! [`RestInvoiceGateway`] talks to the remote invoicing API over HTTP with
//! a pooled reqwest client. Transient failures are retried with exponential
//! backoff; repeated failures open a circuit breaker that sheds calls until
//! the reset timeout elapses. All failures are mapped into the
//! [`PortError`] taxonomy.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    PortError, ShortCode,
};
use domain_invoice::{Counterparty, CreateInvoiceRequest, Invoice, InvoicePort, ResolvedInvoice};

use crate::config::GatewayConfig;
use crate::dto::{
    AddressBookEntry, AddressBookResponse, CreateInvoiceResponse, InvoiceRecord,
    ShortenUrlResponse,
};

const ADAPTER_ID: &str = "rest-invoice-gateway";

/// Circuit breaker state for fault tolerance
#[derive(Debug)]
struct CircuitBreaker {
    config: CircuitBreakerConfig,
    failures: AtomicU32,
    successes: AtomicU32,
    open: AtomicBool,
    opened_at: Mutex<Option<Instant>>,
}

impl CircuitBreaker {
    fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            failures: AtomicU32::new(0),
            successes: AtomicU32::new(0),
            open: AtomicBool::new(false),
            opened_at: Mutex::new(None),
        }
    }

    fn is_available(&self) -> bool {
        if !self.open.load(Ordering::Relaxed) {
            return true;
        }

        // Half-open once the reset timeout has elapsed: let one request
        // through to probe the remote system.
        match *self.opened_at.lock().unwrap() {
            Some(opened_at) => {
                opened_at.elapsed() >= Duration::from_secs(self.config.reset_timeout_secs)
            }
            None => true,
        }
    }

    fn record_success(&self) {
        self.failures.store(0, Ordering::Relaxed);
        let successes = self.successes.fetch_add(1, Ordering::Relaxed) + 1;
        if successes >= self.config.success_threshold {
            self.open.store(false, Ordering::Relaxed);
            self.successes.store(0, Ordering::Relaxed);
        }
    }

    fn record_failure(&self) {
        self.successes.store(0, Ordering::Relaxed);
        let failures = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= self.config.failure_threshold {
            self.open.store(true, Ordering::Relaxed);
            *self.opened_at.lock().unwrap() = Some(Instant::now());
        }
    }
}

/// Maps a non-success HTTP status into the port error taxonomy
fn status_error(operation: &str, status: StatusCode, retry_after_secs: Option<u64>) -> PortError {
    match status.as_u16() {
        404 => PortError::NotFound {
            entity_type: "Resource".to_string(),
            id: operation.to_string(),
        },
        400 | 422 => PortError::Validation {
            message: format!("{operation} rejected by the remote API ({status})"),
            field: None,
        },
        401 | 403 => PortError::Unauthorized {
            message: format!("{operation} not authorized ({status})"),
        },
        409 => PortError::Conflict {
            message: format!("{operation} conflicts with existing data"),
        },
        429 => PortError::RateLimited {
            retry_after_secs: retry_after_secs.unwrap_or(60),
        },
        code if code >= 500 => PortError::ServiceUnavailable {
            service: format!("invoice api ({status})"),
        },
        _ => PortError::internal(format!("{operation} failed with unexpected status {status}")),
    }
}

/// REST adapter to the remote invoicing API
///
/// Implements [`InvoicePort`] over the three endpoints the API exposes,
/// and [`HealthCheckable`] by probing the address-book endpoint.
#[derive(Debug)]
pub struct RestInvoiceGateway {
    client: reqwest::Client,
    config: GatewayConfig,
    circuit_breaker: Option<CircuitBreaker>,
}

impl RestInvoiceGateway {
    /// Creates a gateway from the given configuration
    pub fn new(config: GatewayConfig) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| PortError::Internal {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(err)),
            })?;

        let circuit_breaker = config.circuit_breaker.clone().map(CircuitBreaker::new);

        Ok(Self {
            client,
            config,
            circuit_breaker,
        })
    }

    /// Creates a gateway configured from the environment
    pub fn from_env() -> Result<Self, PortError> {
        let config = GatewayConfig::from_env().map_err(|err| PortError::Internal {
            message: "failed to load gateway configuration".to_string(),
            source: Some(Box::new(err)),
        })?;
        Self::new(config)
    }

    /// Returns the configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns true if the circuit breaker is currently shedding calls
    pub fn is_circuit_open(&self) -> bool {
        self.circuit_breaker
            .as_ref()
            .map(|cb| !cb.is_available())
            .unwrap_or(false)
    }

    /// Runs one operation through the circuit breaker and retry policy
    async fn execute<T, F>(&self, operation: &'static str, build: F) -> Result<T, PortError>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        if let Some(cb) = &self.circuit_breaker {
            if !cb.is_available() {
                return Err(PortError::ServiceUnavailable {
                    service: format!("{operation}: circuit breaker is open"),
                });
            }
        }

        let mut attempt: u32 = 0;
        loop {
            match self.send(operation, build()).await {
                Ok(value) => {
                    if let Some(cb) = &self.circuit_breaker {
                        cb.record_success();
                    }
                    return Ok(value);
                }
                Err(err) if err.is_transient() => {
                    if let Some(cb) = &self.circuit_breaker {
                        cb.record_failure();
                    }
                    if attempt >= self.config.retry_attempts {
                        return Err(err);
                    }
                    let backoff = Duration::from_millis(
                        self.config.retry_delay_ms.saturating_mul(1 << attempt.min(8)),
                    );
                    warn!(operation, attempt, ?backoff, %err, "transient gateway failure, retrying");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Sends one request and decodes the response
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, PortError> {
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                PortError::Timeout {
                    operation: operation.to_string(),
                    duration_ms: self.config.timeout_secs * 1000,
                }
            } else {
                PortError::Connection {
                    message: format!("{operation} request failed"),
                    source: Some(Box::new(err)),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            return Err(status_error(operation, status, retry_after));
        }

        response.json::<T>().await.map_err(|err| {
            PortError::transformation(format!("{operation}: malformed response: {err}"))
        })
    }
}

impl DomainPort for RestInvoiceGateway {}

#[async_trait]
impl InvoicePort for RestInvoiceGateway {
    #[instrument(skip(self))]
    async fn address_book(&self) -> Result<Vec<Counterparty>, PortError> {
        let url = self.config.endpoint("api/address-book");
        let response: AddressBookResponse =
            self.execute("address_book", || self.client.get(&url)).await?;

        debug!(count = response.addresses.len(), "address book fetched");
        response
            .addresses
            .into_iter()
            .map(AddressBookEntry::try_into_domain)
            .collect()
    }

    #[instrument(skip(self), fields(code = %code))]
    async fn resolve_short_code(&self, code: &ShortCode) -> Result<ResolvedInvoice, PortError> {
        let url = self.config.endpoint("api/create-shorten-url");
        let response: ShortenUrlResponse = self
            .execute("resolve_short_code", || {
                self.client.get(&url).query(&[("code", code.as_str())])
            })
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    PortError::not_found("Invoice", code)
                } else {
                    err
                }
            })?;

        debug!("short code resolved");
        response.try_into_domain()
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, PortError> {
        let url = self.config.endpoint("api/invoice");
        let record = InvoiceRecord::from_request(&request);
        let response: CreateInvoiceResponse = self
            .execute("create_invoice", || self.client.post(&url).json(&record))
            .await?;

        debug!("invoice persisted");
        response.invoice.try_into_domain()
    }
}

#[async_trait]
impl HealthCheckable for RestInvoiceGateway {
    /// Probes the address-book endpoint to verify connectivity
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        if self.is_circuit_open() {
            return HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Degraded,
                latency_ms: 0,
                message: Some("Circuit breaker is open".to_string()),
                checked_at: Utc::now(),
            };
        }

        let url = self.config.endpoint("api/address-book");
        let (status, message) = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => (AdapterHealth::Healthy, None),
            Ok(response) => (
                AdapterHealth::Unhealthy,
                Some(format!("probe returned {}", response.status())),
            ),
            Err(err) => (AdapterHealth::Unhealthy, Some(err.to_string())),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms: start.elapsed().as_millis() as u64,
            message,
            checked_at: Utc::now(),
        }
    }
}
