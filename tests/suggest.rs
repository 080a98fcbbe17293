mod common;

use common::{sample_destination, sample_package, TestEnv, TEST_BASE_URL};
use voyagecms::db::destinations::DestinationRepository;
use voyagecms::db::packages::PackageRepository;

#[tokio::test]
async fn empty_and_short_queries_return_empty_list() {
    let env = TestEnv::new();
    env.packages
        .insert(&sample_package("Goa Tour", "goa-tour"))
        .await
        .unwrap();
    let server = env.server();

    for q in ["", "a", "  a  "] {
        let response = server.get("/api/packages/suggest").add_query_param("q", q).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 0, "query {q:?}");
    }

    // No q param at all behaves the same.
    let body: serde_json::Value = server.get("/api/packages/suggest").await.json();
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn exact_title_match_ranks_first() {
    let env = TestEnv::new();
    // Substring-only match is inserted first so a tie would keep it on top.
    env.packages
        .insert(&sample_package("Goa Tour", "goa-tour"))
        .await
        .unwrap();
    env.packages.insert(&sample_package("Go", "go")).await.unwrap();
    let server = env.server();

    let body: serde_json::Value =
        server.get("/api/packages/suggest").add_query_param("q", "go").await.json();
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions[0]["title"], "Go");
    assert_eq!(suggestions[1]["title"], "Goa Tour");
}

#[tokio::test]
async fn result_cap_is_five() {
    let env = TestEnv::new();
    for i in 0..9 {
        env.packages
            .insert(&sample_package(&format!("Goa Tour {i}"), &format!("goa-tour-{i}")))
            .await
            .unwrap();
    }
    let server = env.server();

    let body: serde_json::Value =
        server.get("/api/packages/suggest").add_query_param("q", "goa").await.json();
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn inactive_packages_are_excluded() {
    let env = TestEnv::new();
    let mut inactive = sample_package("Goa Hidden", "goa-hidden");
    inactive.is_active = false;
    env.packages.insert(&inactive).await.unwrap();
    env.packages
        .insert(&sample_package("Goa Tour", "goa-tour"))
        .await
        .unwrap();
    let server = env.server();

    let body: serde_json::Value =
        server.get("/api/packages/suggest").add_query_param("q", "goa").await.json();
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["title"], "Goa Tour");
}

#[tokio::test]
async fn suggestion_projection_shape_and_image_url() {
    let env = TestEnv::new();
    let mut pkg = sample_package("Goa Tour", "goa-tour");
    pkg.images = vec!["beach.jpg".to_string()];
    env.packages.insert(&pkg).await.unwrap();
    let server = env.server();

    let body: serde_json::Value =
        server.get("/api/packages/suggest").add_query_param("q", "goa").await.json();
    let suggestion = &body["suggestions"][0];

    assert_eq!(suggestion["title"], "Goa Tour");
    assert_eq!(suggestion["destination"], "Goa");
    assert_eq!(suggestion["price"], 15000.0);
    assert_eq!(suggestion["duration"], "5D/4N");
    assert_eq!(suggestion["category"], "Beach Holidays");
    assert_eq!(suggestion["slug"], "goa-tour");
    assert_eq!(
        suggestion["image"],
        format!("{TEST_BASE_URL}/uploads/beach.jpg")
    );
    assert!(suggestion["id"].is_string());
    // Full documents never leak through the projection.
    assert!(suggestion.get("itinerary").is_none());
}

#[tokio::test]
async fn packages_without_first_image_suggest_null_image() {
    let env = TestEnv::new();
    env.packages
        .insert(&sample_package("Goa Tour", "goa-tour"))
        .await
        .unwrap();
    let server = env.server();

    let body: serde_json::Value =
        server.get("/api/packages/suggest").add_query_param("q", "goa").await.json();
    assert!(body["suggestions"][0]["image"].is_null());
}

#[tokio::test]
async fn holiday_type_search_uses_its_own_shape() {
    let env = TestEnv::new();
    let server = env.server();

    let body: serde_json::Value = server
        .get("/api/holiday-types/search")
        .add_query_param("q", "trek")
        .await
        .json();
    assert!(body["holidayTypes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn travel_suggest_prepends_destinations_and_caps_at_twelve() {
    let env = TestEnv::new();
    for i in 0..8 {
        env.destinations
            .insert(&sample_destination(&format!("Goa Beach {i}"), &format!("goa-beach-{i}")))
            .await
            .unwrap();
        env.packages
            .insert(&sample_package(&format!("Goa Tour {i}"), &format!("goa-tour-{i}")))
            .await
            .unwrap();
    }
    let server = env.server();

    let body: serde_json::Value =
        server.get("/api/search/suggest").add_query_param("q", "goa").await.json();
    let suggestions = body["suggestions"].as_array().unwrap();

    assert_eq!(suggestions.len(), 12);
    // Geographic matches come first.
    assert!(suggestions[0]["title"].as_str().unwrap().starts_with("Goa Beach"));
    assert!(suggestions[11]["title"].as_str().unwrap().starts_with("Goa Tour"));
}

#[tokio::test]
async fn travel_suggest_short_query_is_empty_without_store_access() {
    let env = TestEnv::new();
    let server = env.server();

    let body: serde_json::Value =
        server.get("/api/search/suggest").add_query_param("q", "g").await.json();
    assert!(body["suggestions"].as_array().unwrap().is_empty());
    assert!(body.get("error").is_none());
}
