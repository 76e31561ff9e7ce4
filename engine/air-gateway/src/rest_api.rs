//! REST API endpoints for the AirWatch gateway.
//!
//! The route surface mirrors a UTMC-style open data service: on-demand
//! pollution data lookups, site metadata, simulated-time control and push
//! subscriptions, all under `/pollutiondata`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use warp::http::StatusCode;
use warp::Filter;

use reading_store::ReadingStore;
use simulation_clock::LivePusher;
use site_catalogue::{timefmt, Coordinates, Reading};
use subscription_service::SubscriptionRegistry;

/// Successful pollution data response: the site's static coordinates plus
/// the selected reading.
#[derive(Serialize)]
pub struct PollutionDataResponse {
    pub coordinates: Coordinates,
    pub pollution_data: Vec<Reading>,
}

/// One row of the site metadata listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCoordinatesRow {
    pub system_code_number: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize)]
pub struct SimulationTimeResponse {
    pub current_simulation_time: String,
}

#[derive(Debug, Deserialize)]
pub struct SetSimulationTimeRequest {
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub notification_url: Option<String>,
    #[serde(default)]
    pub subscriptions: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub subscription_id: usize,
}

type JsonReply = warp::reply::WithStatus<warp::reply::Json>;

fn reply_message(status: StatusCode, message: &str) -> JsonReply {
    warp::reply::with_status(warp::reply::json(&message), status)
}

/// GET /pollutiondata?timestamp=..&site=..
pub async fn get_pollution_data(
    params: HashMap<String, String>,
    store: Arc<ReadingStore>,
) -> Result<JsonReply, warp::Rejection> {
    let (Some(timestamp), Some(site)) = (params.get("timestamp"), params.get("site")) else {
        return Ok(reply_message(
            StatusCode::BAD_REQUEST,
            "Missing parameters required: timestamp and site",
        ));
    };

    // A '+' in the offset arrives as a space when the client forgets to
    // percent-encode it; restore it before parsing.
    let timestamp = timestamp.replace(' ', "+");
    let Ok(timestamp) = timefmt::parse_timestamp(&timestamp) else {
        return Ok(reply_message(
            StatusCode::BAD_REQUEST,
            "Invalid timestamp format. Use 'YYYY-MM-DDTHH:MM:SS.sss+0000'.",
        ));
    };

    let Some(coordinates) = store.get_coordinates(site) else {
        return Ok(reply_message(
            StatusCode::NOT_FOUND,
            "No coordinates found for the given site.",
        ));
    };

    match store.get_readings(timestamp, site) {
        Ok(data) if !data.is_empty() => Ok(warp::reply::with_status(
            warp::reply::json(&PollutionDataResponse { coordinates, pollution_data: data }),
            StatusCode::OK,
        )),
        Ok(_) => Ok(reply_message(
            StatusCode::BAD_REQUEST,
            "No pollution data available for the given timestamp and site.",
        )),
        Err(e) => {
            tracing::error!("Pollution data lookup failed: {e}");
            Ok(reply_message(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Pollution data is currently unavailable.",
            ))
        }
    }
}

/// GET /pollutiondata/sitemetadata
pub async fn get_all_coordinates(store: Arc<ReadingStore>) -> Result<JsonReply, warp::Rejection> {
    let rows: Vec<SiteCoordinatesRow> = store
        .get_all_coordinates()
        .into_iter()
        .map(|(code, Coordinates { lat, lon })| SiteCoordinatesRow {
            system_code_number: code,
            lat,
            lon,
        })
        .collect();

    if rows.is_empty() {
        return Ok(reply_message(StatusCode::NOT_FOUND, "No site metadata available."));
    }
    Ok(warp::reply::with_status(warp::reply::json(&rows), StatusCode::OK))
}

/// GET /pollutiondata/simtime
pub async fn get_simulation_time(pusher: Arc<LivePusher>) -> Result<JsonReply, warp::Rejection> {
    let response =
        SimulationTimeResponse { current_simulation_time: pusher.clock().now().to_rfc3339() };
    Ok(warp::reply::with_status(warp::reply::json(&response), StatusCode::OK))
}

/// POST /pollutiondata/simtime with `{"timestamp": "2025-05-19T18:30:00+00:00"}`
pub async fn set_simulation_time(
    request: SetSimulationTimeRequest,
    pusher: Arc<LivePusher>,
) -> Result<JsonReply, warp::Rejection> {
    let Some(timestamp) = request.timestamp else {
        return Ok(warp::reply::with_status(
            warp::reply::json(&json!({"error": "Invalid timestamp: missing 'timestamp' field"})),
            StatusCode::BAD_REQUEST,
        ));
    };

    match timefmt::parse_timestamp(&timestamp) {
        Ok(ts) => {
            pusher.clock().set(ts);
            Ok(warp::reply::with_status(
                warp::reply::json(&json!({"message": "Simulation time updated."})),
                StatusCode::OK,
            ))
        }
        Err(e) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({"error": format!("Invalid timestamp: {e}")})),
            StatusCode::BAD_REQUEST,
        )),
    }
}

/// POST /pollutiondata/subscribe
pub async fn subscribe(
    request: SubscribeRequest,
    registry: Arc<SubscriptionRegistry>,
    pusher: Arc<LivePusher>,
) -> Result<JsonReply, warp::Rejection> {
    let Some(notification_url) = request.notification_url.filter(|url| !url.is_empty()) else {
        return Ok(reply_message(
            StatusCode::BAD_REQUEST,
            "Missing 'notificationUrl' or 'subscriptions'.",
        ));
    };
    if request.subscriptions.is_empty() {
        return Ok(reply_message(
            StatusCode::BAD_REQUEST,
            "Missing 'notificationUrl' or 'subscriptions'.",
        ));
    }

    let subscription_id = registry.subscribe(notification_url, request.subscriptions);

    // Push the latest data right away so the new subscriber starts with
    // the current snapshot rather than waiting a full cadence.
    pusher.tick().await;

    Ok(warp::reply::with_status(
        warp::reply::json(&SubscribeResponse { subscription_id }),
        StatusCode::CREATED,
    ))
}

/// Assemble the full `/pollutiondata` route tree.
pub fn create_routes(
    store: Arc<ReadingStore>,
    registry: Arc<SubscriptionRegistry>,
    pusher: Arc<LivePusher>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());
    let registry_filter = warp::any().map(move || registry.clone());
    let pusher_filter = warp::any().map(move || pusher.clone());

    let pollution_data = warp::path("pollutiondata")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(store_filter.clone())
        .and_then(get_pollution_data);

    let site_metadata = warp::path("pollutiondata")
        .and(warp::path("sitemetadata"))
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter)
        .and_then(get_all_coordinates);

    let simtime_get = warp::path("pollutiondata")
        .and(warp::path("simtime"))
        .and(warp::path::end())
        .and(warp::get())
        .and(pusher_filter.clone())
        .and_then(get_simulation_time);

    let simtime_set = warp::path("pollutiondata")
        .and(warp::path("simtime"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(pusher_filter.clone())
        .and_then(set_simulation_time);

    let subscribe_route = warp::path("pollutiondata")
        .and(warp::path("subscribe"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(registry_filter)
        .and(pusher_filter)
        .and_then(subscribe);

    site_metadata.or(simtime_get).or(simtime_set).or(subscribe_route).or(pollution_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use simulation_clock::{PusherConfig, SimulationClock};
    use subscription_service::{CapturingSink, NotificationSink};

    fn fixture() -> (
        impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone,
        Arc<CapturingSink>,
    ) {
        let ts0 = Utc.with_ymd_and_hms(2025, 5, 19, 0, 0, 0).unwrap();
        let ts1 = Utc.with_ymd_and_hms(2025, 5, 19, 0, 10, 0).unwrap();
        let dense = reading_store::densify(vec![
            Reading { co: Some(0.10), ..Reading::empty(ts0) },
            Reading { co: Some(0.50), ..Reading::empty(ts1) },
        ]);

        let store = Arc::new(ReadingStore::with_data(
            HashMap::from([("SITE001".to_string(), dense)]),
            HashMap::from([
                ("SITE001".to_string(), Coordinates { lat: 54.9733, lon: -1.6178 }),
                ("SITE002".to_string(), Coordinates { lat: 54.9000, lon: -1.5500 }),
            ]),
        ));
        let clock = Arc::new(SimulationClock::new(ts0));
        let sink = Arc::new(CapturingSink::new());
        let registry = Arc::new(SubscriptionRegistry::new());
        let pusher = Arc::new(LivePusher::new(
            store.clone(),
            clock,
            sink.clone() as Arc<dyn NotificationSink>,
            PusherConfig::default(),
        ));

        (create_routes(store, registry, pusher), sink)
    }

    fn body_json(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn pollution_data_query_returns_interpolated_reading() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("GET")
            .path("/pollutiondata?timestamp=2025-05-19T00:05:00.000%2B0000&site=SITE001")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res.body());
        assert_eq!(body["coordinates"]["lat"], 54.9733);
        let co = body["pollution_data"][0]["co"].as_f64().unwrap();
        assert!((co - 0.30).abs() < 1e-12);
    }

    #[tokio::test]
    async fn unencoded_plus_in_timestamp_is_tolerated() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("GET")
            .path("/pollutiondata?timestamp=2025-05-19T00:00:00.000+0000&site=SITE001")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_parameters_are_a_bad_request() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("GET")
            .path("/pollutiondata?site=SITE001")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_timestamp_is_a_bad_request() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("GET")
            .path("/pollutiondata?timestamp=yesterday&site=SITE001")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_site_is_not_found() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("GET")
            .path("/pollutiondata?timestamp=2025-05-19T00:00:00.000%2B0000&site=SITE999")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn site_with_coordinates_but_no_readings_has_no_data() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("GET")
            .path("/pollutiondata?timestamp=2025-05-19T00:00:00.000%2B0000&site=SITE002")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn site_metadata_lists_every_site() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("GET")
            .path("/pollutiondata/sitemetadata")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res.body());
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["systemCodeNumber"], "SITE001");
    }

    #[tokio::test]
    async fn simtime_round_trips_through_the_api() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("POST")
            .path("/pollutiondata/simtime")
            .json(&json!({"timestamp": "2025-05-19T18:30:00+00:00"}))
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = warp::test::request()
            .method("GET")
            .path("/pollutiondata/simtime")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res.body());
        assert_eq!(body["current_simulation_time"], "2025-05-19T18:30:00+00:00");
    }

    #[tokio::test]
    async fn invalid_simtime_is_a_bad_request() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("POST")
            .path("/pollutiondata/simtime")
            .json(&json!({"timestamp": "soon"}))
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn subscribe_registers_and_pushes_immediately() {
        let (routes, sink) = fixture();

        let res = warp::test::request()
            .method("POST")
            .path("/pollutiondata/subscribe")
            .json(&json!({
                "notificationUrl": "http://listener.example/cb",
                "subscriptions": ["AIR QUALITY DYNAMIC"]
            }))
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(body_json(res.body())["subscriptionId"], 1);

        // The immediate tick pushed the reading at the simulated epoch.
        let deliveries = sink.deliveries();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].1[0].system_code_number, "SITE001");
    }

    #[tokio::test]
    async fn subscribe_without_datasets_is_a_bad_request() {
        let (routes, _sink) = fixture();

        let res = warp::test::request()
            .method("POST")
            .path("/pollutiondata/subscribe")
            .json(&json!({"notificationUrl": "http://listener.example/cb"}))
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
