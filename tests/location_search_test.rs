use httpmock::prelude::*;
use skillscape::adapters::{HeadlessMap, MapboxGeocoder, RecordingNotifier};
use skillscape::config::MapConfig;
use skillscape::domain::model::Coordinates;
use skillscape::domain::ports::LocationResolver;
use skillscape::{Catalog, CoordinateTable, Explorer, SkillScapeError};
use std::time::Duration;

fn geocoder(server: &MockServer) -> MapboxGeocoder {
    MapboxGeocoder::new(server.url("/places"), "pk.test", Duration::from_secs(5)).unwrap()
}

fn explorer(
    server: &MockServer,
) -> Explorer<MapboxGeocoder, HeadlessMap, RecordingNotifier> {
    Explorer::new(
        Catalog::sample(),
        CoordinateTable::sample(),
        geocoder(server),
        HeadlessMap::default(),
        RecordingNotifier::new(),
        &MapConfig::default(),
    )
}

#[tokio::test]
async fn test_resolve_first_feature() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/places/Queens.json")
                .query_param("access_token", "pk.test")
                .query_param("limit", "1");
            then.status(200).json_body(serde_json::json!({
                "type": "FeatureCollection",
                "features": [
                    {"center": [-73.7949, 40.7282], "place_name": "Queens, New York, United States"},
                    {"center": [-71.0, 42.0], "place_name": "Queens Street"}
                ]
            }));
        })
        .await;

    let location = geocoder(&server).resolve("Queens").await.unwrap();
    api_mock.assert_async().await;
    assert_eq!(location.coordinates, Coordinates::new(-73.7949, 40.7282));
    assert_eq!(location.display_name, "Queens, New York, United States");
}

#[tokio::test]
async fn test_empty_features_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/places/Atlantis.json");
            then.status(200).json_body(serde_json::json!({"features": []}));
        })
        .await;

    let err = geocoder(&server).resolve("Atlantis").await.unwrap_err();
    assert!(matches!(err, SkillScapeError::LocationNotFound { ref query } if query == "Atlantis"));
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/places/Bronx.json");
            then.status(500);
        })
        .await;

    let err = geocoder(&server).resolve("Bronx").await.unwrap_err();
    assert!(matches!(err, SkillScapeError::TransportFailure { .. }));
}

#[tokio::test]
async fn test_malformed_body_is_transport_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/places/Harlem.json");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let err = geocoder(&server).resolve("Harlem").await.unwrap_err();
    assert!(matches!(err, SkillScapeError::TransportFailure { .. }));
}

#[tokio::test]
async fn test_explorer_flies_to_result_and_notifies() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/places/Brooklyn.json");
            then.status(200).json_body(serde_json::json!({
                "features": [{"center": [-73.9442, 40.6782], "place_name": "Brooklyn, New York"}]
            }));
        })
        .await;

    let mut explorer = explorer(&server);
    explorer.toggle_skill("Painting");
    let markers_before = explorer.map().markers().to_vec();

    let location = explorer.search_location("  Brooklyn ").await.unwrap();
    api_mock.assert_async().await;
    assert!(location.is_some());
    assert_eq!(explorer.map().center(), Coordinates::new(-73.9442, 40.6782));
    assert_eq!(explorer.map().zoom(), 13.0);

    // 移動地圖不影響篩選結果
    assert_eq!(explorer.map().markers(), markers_before.as_slice());
    assert!(explorer.criteria().selected_skills.contains("Painting"));

    let note = explorer.notifier().last().unwrap();
    assert_eq!(note.title, "Location updated");
    assert_eq!(note.description, "Moved to Brooklyn, New York");
    assert!(!note.is_error);
}

#[tokio::test]
async fn test_explorer_failure_keeps_map_and_does_not_retry() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/places/Nowhere.json");
            then.status(503);
        })
        .await;

    let mut explorer = explorer(&server);
    let before = explorer.map().center();

    let result = explorer.search_location("Nowhere").await;
    assert!(result.is_err());
    api_mock.assert_hits_async(1).await;
    assert_eq!(explorer.map().center(), before);
    assert!(explorer.notifier().last().unwrap().is_error);
}

#[tokio::test]
async fn test_filtering_and_selection_while_geocoding_is_slow() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/places/Queens.json");
            then.status(200)
                .delay(Duration::from_millis(300))
                .json_body(serde_json::json!({
                    "features": [{"center": [-73.7949, 40.7282], "place_name": "Queens, New York"}]
                }));
        })
        .await;

    let mut explorer = explorer(&server);
    let start = explorer.map().center();
    let lookup = explorer.begin_location_search("Queens").unwrap();

    let (result, visible) = tokio::join!(lookup.resolve(), async {
        explorer.set_search_term("kim");
        explorer.click_marker(3);
        explorer.toggle_skill("Carpentry");
        let visible: Vec<_> = explorer.map().markers().iter().map(|m| m.profile_id).collect();
        // 請求尚未回來，地圖仍在原處
        assert_eq!(explorer.map().center(), start);
        visible
    });
    assert_eq!(visible, vec![3]);

    let location = explorer.apply_location("Queens", result).unwrap();
    api_mock.assert_async().await;
    assert_eq!(explorer.map().center(), location.coordinates);
    assert_eq!(explorer.criteria().search_term, "kim");
    assert_eq!(explorer.selected().unwrap().id, 3);
    assert_eq!(explorer.notifier().last().unwrap().title, "Location updated");
}
