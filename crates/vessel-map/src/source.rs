//! # Vessel Source
//!
//! Loads the vessel snapshot list from the vessel API.

use anyhow::Context as _;
use bytes::Bytes;
use fleet_core::{Config, Error, HttpRequest, Result, bad_gateway};
use http::Method;
use http::header::ACCEPT;
use http_body_util::Empty;

use crate::model::Vessel;

/// Fetch every vessel from `{VESSEL_API_URL}{path}`.
///
/// # Errors
///
/// Returns [`Error::BadGateway`] when the API cannot be reached or answers
/// with a non-success status, [`Error::InvalidFormat`] when the payload is not
/// a vessel list, and [`Error::Internal`] when the request cannot be built.
pub async fn fetch_vessels<P>(provider: &P, path: &str) -> Result<Vec<Vessel>>
where
    P: HttpRequest + Config,
{
    let url = Config::get(provider, "VESSEL_API_URL").await.context("getting `VESSEL_API_URL`")?;
    let url = url.trim_end_matches('/');

    let request = http::Request::builder()
        .method(Method::GET)
        .uri(format!("{url}{path}"))
        .header(ACCEPT, "application/json")
        .body(Empty::<Bytes>::new())
        .context("building vessel request")?;

    let response = HttpRequest::fetch(provider, request)
        .await
        .map_err(|err| bad_gateway!("calling vessel API: {:#}", err))?;
    if !response.status().is_success() {
        return Err(bad_gateway!("vessel API returned {}", response.status()));
    }

    let body = response.into_body();
    let vessels: Vec<Vessel> = serde_json::from_slice(&body).map_err(Error::from)?;

    tracing::debug!(vessels = vessels.len(), "fetched vessels");
    Ok(vessels)
}
