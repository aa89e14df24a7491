//! Mapped execution, response modes, and mapping administration.

use std::time::Duration;

use mockable::DefaultClock;
use rstest::rstest;

use maillart::mapping::domain::{PluginConfig, ResponseMode};
use maillart::mapping::services::AddMappingRequest;

use crate::in_memory::helpers::{
    Harness, build_harness, origin, spawn_responding_pipeline, spawn_silent_pipeline,
};

fn config_with_mode(mode: ResponseMode) -> PluginConfig {
    let mut config = PluginConfig::default();
    config.execution.response_mode = mode;
    config.execution.capture_timeout_secs = 2;
    config.execution.forward_interval_millis = 100;
    config
}

fn add_status_mapping(harness: &Harness) {
    harness
        .mappings
        .add(
            &AddMappingRequest::new("status", "show_status", "Show system status"),
            &DefaultClock,
        )
        .expect("add should succeed");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn forward_only_mode_forwards_with_command_header() {
    let (harness, rx) = build_harness(config_with_mode(ResponseMode::ForwardOnly));
    add_status_mapping(&harness);
    spawn_responding_pipeline(rx, Duration::from_millis(120), vec!["all good".to_owned()]);

    let status = harness.processor.execute(&origin(), "status", "").await;

    assert!(
        status.contains("forwarded"),
        "forward-only returns a confirmation, got: {status}"
    );
    let deliveries = harness.gateway.deliveries();
    assert_eq!(deliveries.len(), 1);
    let (conversation, message) = deliveries.first().expect("one delivery should exist");
    assert_eq!(conversation.as_str(), "room1");
    assert_eq!(message.plain_text(), "[command] status\nall good");
    assert!(
        harness.platform.sent().is_empty(),
        "capture kept the pipeline answer away from the real platform capability"
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn text_only_mode_returns_text_without_forwarding() {
    let (harness, rx) = build_harness(config_with_mode(ResponseMode::TextOnly));
    add_status_mapping(&harness);
    spawn_responding_pipeline(rx, Duration::from_millis(120), vec!["all good".to_owned()]);

    let status = harness.processor.execute(&origin(), "status", "").await;

    assert!(status.contains("all good"), "got: {status}");
    assert!(harness.gateway.deliveries().is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn forward_and_text_mode_does_both() {
    let (harness, rx) = build_harness(config_with_mode(ResponseMode::ForwardAndText));
    add_status_mapping(&harness);
    spawn_responding_pipeline(rx, Duration::from_millis(120), vec!["all good".to_owned()]);

    let status = harness.processor.execute(&origin(), "status", "").await;

    assert!(status.contains("all good"));
    assert_eq!(harness.gateway.deliveries().len(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn unmapped_command_is_refused_without_dispatch() {
    let (harness, _rx) = build_harness(PluginConfig::default());

    let status = harness.processor.execute(&origin(), "unknown", "").await;

    assert!(status.contains("No mapping found"), "got: {status}");
    assert!(harness.gateway.deliveries().is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn disabled_plugin_refuses_execution() {
    let mut config = PluginConfig::default();
    config.basic.enable_plugin = false;
    let (harness, _rx) = build_harness(config);

    let status = harness.processor.execute(&origin(), "status", "").await;

    assert!(status.contains("disabled"), "got: {status}");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn silent_pipeline_reports_failure_status() {
    let (harness, rx) = build_harness(config_with_mode(ResponseMode::ForwardOnly));
    add_status_mapping(&harness);
    spawn_silent_pipeline(rx);

    let status = harness.processor.execute(&origin(), "status", "").await;

    assert!(
        status.contains("failed or timed out") && status.contains("'status'"),
        "got: {status}"
    );
    assert!(harness.gateway.deliveries().is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn function_call_routes_through_the_registered_binding() {
    let (harness, rx) = build_harness(config_with_mode(ResponseMode::TextOnly));
    add_status_mapping(&harness);
    harness.functions.sync().expect("sync should succeed");
    spawn_responding_pipeline(rx, Duration::from_millis(120), vec!["all good".to_owned()]);

    let status = harness
        .processor
        .handle_function_call("show_status", &origin(), "verbose=true")
        .await;

    assert!(status.contains("all good"), "got: {status}");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn unregistered_function_is_reported_by_name() {
    let (harness, _rx) = build_harness(PluginConfig::default());

    let status = harness
        .processor
        .handle_function_call("missing_function", &origin(), "")
        .await;

    assert_eq!(status, "Function 'missing_function' is not registered");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn admin_round_trip_reports_each_step() {
    let (harness, _rx) = build_harness(PluginConfig::default());

    let added = harness
        .processor
        .add_mapping("remind ls", "list_reminders", "List reminders");
    assert!(added.contains("'remind ls' -> 'list_reminders'"), "got: {added}");
    assert_eq!(
        harness.functions.registered(),
        vec!["list_reminders".to_owned()],
        "auto-refresh registers the new function"
    );

    let duplicate = harness
        .processor
        .add_mapping("remind ls", "other_function", "");
    assert!(duplicate.contains("already has a mapping"), "got: {duplicate}");

    let listing = harness.processor.list_mappings("--all");
    assert!(listing.contains("1. remind ls -> list_reminders"), "got: {listing}");
    assert!(listing.contains("(List reminders)"));

    let disabled = harness.processor.set_mapping_enabled("remind ls", false);
    assert!(disabled.contains("Disabled"), "got: {disabled}");
    assert!(
        harness.functions.registered().is_empty(),
        "auto-refresh drops functions of disabled mappings"
    );

    let listing_disabled = harness.processor.list_mappings("disabled");
    assert!(listing_disabled.contains("[disabled]"), "got: {listing_disabled}");

    let removed = harness.processor.remove_mapping("remind ls");
    assert!(removed.contains("Removed mapping"), "got: {removed}");

    let empty = harness.processor.list_mappings("all");
    assert!(empty.contains("No command mappings"), "got: {empty}");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn invalid_list_filter_is_rejected() {
    let (harness, _rx) = build_harness(PluginConfig::default());

    let status = harness.processor.list_mappings("--bogus");

    assert!(status.contains("Invalid filter"), "got: {status}");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn refresh_functions_reports_the_registered_count() {
    let (harness, _rx) = build_harness(PluginConfig::default());
    let added = harness.processor.add_mapping("status", "show_status", "");
    assert!(added.contains("Added mapping"), "got: {added}");

    let status = harness.processor.refresh_functions();

    assert!(status.contains("1 functions registered"), "got: {status}");
}
