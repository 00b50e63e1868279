use plansync::config::Config;
use plansync::plan::format_plan;
use plansync::{PayloadShape, PlanData, Session};
use serde_json::json;
use std::sync::Arc;

/// Smoke test to verify that a config overlay builds a session
#[test]
fn test_config_to_session() {
    let config = Config::from_toml_str(
        r#"
        timezone = "Europe/Helsinki"
        log_filter = "plansync=debug"
        session_user_id = "100004"
        "#,
    )
    .unwrap();

    let session = Session::from_config(&config);
    assert_eq!(session.user_id(), Some("100004"));
    assert_eq!(config.log_filter, "plansync=debug");
}

/// Logging can be installed once; a second attempt reports an error
#[test]
fn test_init_logging_once() {
    let config = Config::default();
    assert!(plansync::startup::init_logging(&config).is_ok());
    assert!(plansync::startup::init_logging(&config).is_err());
}

/// Normalize a payload and render it in the configured timezone
#[test]
fn test_normalize_and_format() {
    let config = Config::from_toml_str("timezone = \"Europe/Helsinki\"").unwrap();
    let session = Arc::new(Session::from_config(&config));

    let data = json!({
        "event_id": "77",
        "event_time": "1700000000",
        "event_title": "Sauna",
        "event_location_name": "Löyly",
        "guest_state_list": "[{\"node\":{\"id\":\"9\"},\"guest_list_state\":\"GOING\"}]"
    });
    let plan = PlanData::from_payload(session, PayloadShape::PullFeed, &data).unwrap();

    let tz = config.tz().unwrap();
    assert_eq!(plan.local_time(tz).format("%H:%M").to_string(), "00:13");
    assert_eq!(
        format_plan(&plan, tz),
        "📅 **Sauna**\n• 15.11.2023 00:13\n• 📍 Löyly\n• Going: 1, Invited: 0, Declined: 0\n"
    );
}

/// Plans serialize without their session
#[test]
fn test_plan_serializes() {
    let data = json!({"oid": 5, "event_time": 1700000000, "event_members": {"9": "DECLINED"}});
    let plan = PlanData::from_fetch_response(Arc::new(Session::anonymous()), &data).unwrap();

    let value = serde_json::to_value(&plan).unwrap();
    assert_eq!(value["id"], "5");
    assert_eq!(value["location"], "");
    assert_eq!(value["location_id"], serde_json::Value::Null);
    assert_eq!(value["guests"]["9"], "DECLINED");
}

/// An overlay file layered on environment values only replaces the keys it sets
#[test]
fn test_overlay_on_environment_values() {
    let from_env = Config {
        timezone: "Europe/Helsinki".to_string(),
        log_filter: "warn".to_string(),
        session_user_id: Some("100004".to_string()),
    };

    let config = from_env.merge_toml_str("log_filter = \"plansync=debug\"").unwrap();
    assert_eq!(config.timezone, "Europe/Helsinki");
    assert_eq!(config.log_filter, "plansync=debug");
    assert_eq!(config.session_user_id.as_deref(), Some("100004"));

    let config = config.merge_toml_str("timezone = \"Foo/Bar\"").unwrap();
    assert!(config.tz().is_err());
}
