//! AWS Lambda handler for indexer calculations
//!
//! Accepts API Gateway proxy requests; the route is the request path and the
//! arguments come from the query string. Responses are JSON, errors are
//! `{"detail": ..., "code": ...}` with the error's HTTP status.

use std::collections::HashMap;
use std::sync::Arc;

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use econ_indexer::service::parse_date;
use econ_indexer::{Indicator, IndexerConfig, IndexerError, IndexerService, RateSeriesStore};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde_json::{json, Value};

type Params = HashMap<String, String>;

/// Failure of one request, before or during the calculation
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
    Indexer(IndexerError),
}

impl From<IndexerError> for ApiError {
    fn from(err: IndexerError) -> Self {
        ApiError::Indexer(err)
    }
}

impl ApiError {
    fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Indexer(e) => e.status_code(),
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::BadRequest(detail) => json!({ "detail": detail, "code": "bad_request" }),
            ApiError::NotFound(path) => json!({ "detail": format!("no route for {}", path), "code": "not_found" }),
            ApiError::Indexer(e) => json!({ "detail": e.to_string(), "code": e.code() }),
        }
    }
}

fn required<'a>(params: &'a Params, name: &str) -> Result<&'a str, ApiError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| ApiError::BadRequest(format!("missing query parameter '{}'", name)))
}

fn number(params: &Params, name: &str) -> Result<f64, ApiError> {
    let raw = required(params, name)?;
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a number: {}", name, raw)))
}

fn integer(params: &Params, name: &str) -> Result<i64, ApiError> {
    let raw = required(params, name)?;
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not an integer: {}", name, raw)))
}

fn date(params: &Params, name: &str) -> Result<chrono::NaiveDate, ApiError> {
    Ok(parse_date(required(params, name)?)?)
}

/// Run the calculation named by `path`
fn route<S: RateSeriesStore>(
    service: &IndexerService<S>,
    path: &str,
    params: &Params,
) -> Result<Value, ApiError> {
    match path.trim_end_matches('/') {
        "" => Ok(json!({
            "app": "ECONIndexer",
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "version": env!("CARGO_PKG_VERSION"),
            "indicators": Indicator::ALL.iter().map(|i| i.title()).collect::<Vec<_>>(),
        })),

        "/interest_value" => {
            let value = service.get_interest_value(number(params, "initial_value")?, number(params, "final_value")?);
            Ok(json!({ "interest_value": value }))
        }

        "/interest_rate" => {
            let rate = service.get_interest_rate(number(params, "initial_value")?, number(params, "final_value")?)?;
            Ok(json!({ "interest_rate": rate }))
        }

        "/final_value_by_indexer" | "/interest_value_by_indexer" | "/interest_rate_by_indexer" => {
            let initial_value = number(params, "initial_value")?;
            let initial_date = date(params, "initial_date")?;
            let final_date = date(params, "final_date")?;
            let indicator = required(params, "indexer_reference")?;
            let rate_type = integer(params, "indexer_type")?;
            let add_rate = number(params, "indexer_add_rate")?;

            let (key, value) = match path.trim_end_matches('/') {
                "/final_value_by_indexer" => (
                    "final_value",
                    service.get_final_value(initial_value, initial_date, final_date, indicator, rate_type, add_rate)?,
                ),
                "/interest_value_by_indexer" => (
                    "interest_value",
                    service.get_interest_value_by_indexer(
                        initial_value, initial_date, final_date, indicator, rate_type, add_rate,
                    )?,
                ),
                _ => (
                    "interest_rate",
                    service.get_interest_rate_by_indexer(
                        initial_value, initial_date, final_date, indicator, rate_type, add_rate,
                    )?,
                ),
            };
            Ok(json!({ key: value }))
        }

        "/benchmarking_by_indexer" => {
            let indicator = params.get("indexer_reference").map(String::as_str).unwrap_or("CDI");
            let ratio = service.get_benchmarking(
                number(params, "initial_value")?,
                number(params, "final_value")?,
                date(params, "initial_date")?,
                date(params, "final_date")?,
                indicator,
            )?;
            Ok(json!({ "benchmarking": ratio }))
        }

        _ => Err(ApiError::NotFound(path.to_string())),
    }
}

fn json_response(status: u16, body: &Value) -> Result<ApiGatewayProxyResponse, Error> {
    let mut response = ApiGatewayProxyResponse {
        status_code: status as i64,
        body: Some(Body::Text(serde_json::to_string(body)?)),
        ..Default::default()
    };
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    Ok(response)
}

/// Lambda handler function
async fn handler<S: RateSeriesStore>(
    service: &IndexerService<S>,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let request = event.payload;
    let path = request.path.unwrap_or_else(|| "/".to_string());

    // First value wins for repeated parameters
    let mut params = Params::new();
    for (key, value) in request.query_string_parameters.iter() {
        params.entry(key.to_string()).or_insert_with(|| value.to_string());
    }

    match route(service, &path, &params) {
        Ok(body) => {
            info!("{} ok", path);
            json_response(200, &body)
        }
        Err(err) => {
            warn!("{} failed: {:?}", path, err);
            json_response(err.status_code(), &err.body())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = IndexerConfig::from_env();
    let service = Arc::new(IndexerService::from_config(&config)?);
    info!("Loaded rate series from {}", config.data_path.display());

    run(service_fn(move |event| {
        let service = Arc::clone(&service);
        async move { handler(service.as_ref(), event).await }
    }))
    .await
}
