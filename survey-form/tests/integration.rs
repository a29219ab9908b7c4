//! Integration tests for survey-form

use std::time::Duration;

use httpmock::prelude::*;
use survey_form::{
    FormConfig, FormView, HttpTransport, ScriptedTransport, Step, SubmissionClient,
    SubmissionOutcome, SubmitError, SurveyForm, TestView, TransportPolicy, ViewEvent,
};

fn fill_basic<T: survey_form::Transport>(form: &mut SurveyForm<T>) {
    let basic = form.basic_mut();
    basic.set("name", "A");
    basic.set("email", "a@x.com");
    basic.set("age", "30");
    basic.set("transportation", "car");
    basic.set("interest", "hiking");
    basic.choice_mut().select("f");
}

fn fill_lifestyle<T: survey_form::Transport>(form: &mut SurveyForm<T>) {
    let lifestyle = form.lifestyle_mut();
    lifestyle.check("food", "sushi");
    lifestyle.check("drink", "tea");
    lifestyle.check("stay", "hotel");
    lifestyle.check("travel", "plane");
}

/// Mount, fill step 1 and move to step 2.
fn on_lifestyle_step<T: survey_form::Transport>(form: &mut SurveyForm<T>, view: &mut TestView) {
    form.mount(view);
    fill_basic(form);
    form.on_next(view).unwrap();
    assert_eq!(form.step(), Step::Lifestyle);
}

#[test]
fn mount_shows_first_step() {
    let transport = ScriptedTransport::dispatched();
    let mut form = SurveyForm::new(SubmissionClient::new(&transport, FormConfig::default()));
    let mut view = TestView::new();

    form.mount(&mut view);

    assert_eq!(view.visible_steps(), vec![Step::Basic]);
    assert_eq!(view.progress(), 0.5);
    assert!(view.submit_enabled());
}

#[test]
fn exactly_one_step_visible_throughout_navigation() {
    let transport = ScriptedTransport::dispatched();
    let mut form = SurveyForm::new(SubmissionClient::new(&transport, FormConfig::default()));
    let mut view = TestView::new();
    form.mount(&mut view);

    assert!(form.on_next(&mut view).is_err());
    assert_eq!(view.visible_steps().len(), 1);

    fill_basic(&mut form);
    form.on_next(&mut view).unwrap();
    assert_eq!(view.visible_steps(), vec![Step::Lifestyle]);

    form.on_back(&mut view);
    assert_eq!(view.visible_steps(), vec![Step::Basic]);

    form.on_back(&mut view);
    assert_eq!(view.visible_steps(), vec![Step::Basic]);
}

#[tokio::test]
async fn opaque_submission_reaches_success_step() {
    let transport = ScriptedTransport::dispatched();
    let mut form = SurveyForm::new(SubmissionClient::new(&transport, FormConfig::default()));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);

    let result = form.on_submit(&mut view).await.unwrap();

    assert!(result.is_ok());
    assert_eq!(form.step(), Step::Success);
    assert_eq!(view.visible_steps(), vec![Step::Success]);
    assert_eq!(form.outcome(), Some(&SubmissionOutcome::Succeeded));
    assert!(!view.submit_enabled());
    assert_eq!(transport.send_count(), 1);

    // No duplicate submission once accepted
    assert!(form.on_submit(&mut view).await.is_none());
    assert_eq!(transport.send_count(), 1);
}

#[tokio::test]
async fn readable_rejection_keeps_form_resubmittable() {
    let transport =
        ScriptedTransport::replying(200, r#"{"success":false,"message":"duplicate"}"#);
    let config = FormConfig::default().with_transport(TransportPolicy::Readable);
    let mut form = SurveyForm::new(SubmissionClient::new(&transport, config));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);

    let err = form.on_submit(&mut view).await.unwrap().unwrap_err();

    assert!(matches!(err, SubmitError::Rejected(ref message) if message == "duplicate"));
    assert_eq!(form.step(), Step::Lifestyle);
    assert!(view.submit_enabled());
    assert_eq!(view.submit_label(), "Submit");

    let notices = view.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "duplicate");
    assert_eq!(notices[0].dismiss_after, Duration::from_secs(3));

    // The control is live again
    assert!(form.on_submit(&mut view).await.is_some());
    assert_eq!(transport.send_count(), 2);
}

#[tokio::test]
async fn submit_button_shows_progress_label_while_pending() {
    let transport = ScriptedTransport::dispatched();
    let mut form = SurveyForm::new(SubmissionClient::new(&transport, FormConfig::default()));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);
    view.clear_events();

    form.on_submit(&mut view).await.unwrap().unwrap();

    assert_eq!(
        &view.events()[..3],
        &[
            ViewEvent::SubmitEnabled(false),
            ViewEvent::SubmitLabel("Submitting...".to_string()),
            ViewEvent::Outcome(SubmissionOutcome::Pending),
        ]
    );
}

#[tokio::test]
async fn view_sees_pending_before_each_result() {
    let transport = ScriptedTransport::replying(200, r#"{"success":false,"message":"duplicate"}"#);
    let config = FormConfig::default().with_transport(TransportPolicy::Readable);
    let mut form = SurveyForm::new(SubmissionClient::new(&transport, config));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);

    form.on_submit(&mut view).await.unwrap().unwrap_err();

    assert_eq!(
        view.outcomes(),
        vec![
            &SubmissionOutcome::Pending,
            &SubmissionOutcome::Failed("Submission rejected: duplicate".to_string()),
        ]
    );
    assert_eq!(
        form.outcome(),
        Some(&SubmissionOutcome::Failed("Submission rejected: duplicate".to_string()))
    );
}

#[tokio::test]
async fn empty_group_blocks_submission_without_sending() {
    let transport = ScriptedTransport::dispatched();
    let mut form = SurveyForm::new(SubmissionClient::new(&transport, FormConfig::default()));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);
    form.lifestyle_mut().select_only("drink", &[]);

    let err = form.on_submit(&mut view).await.unwrap().unwrap_err();

    assert!(err.is_validation());
    assert_eq!(transport.send_count(), 0);
    assert_eq!(form.step(), Step::Lifestyle);
    assert!(view.submit_enabled());
    assert_eq!(
        view.notices()[0].message,
        "Please select at least one option in each lifestyle group"
    );
}

#[tokio::test]
async fn submit_is_ignored_outside_lifestyle_step() {
    let transport = ScriptedTransport::dispatched();
    let mut form = SurveyForm::new(SubmissionClient::new(&transport, FormConfig::default()));
    let mut view = TestView::new();
    form.mount(&mut view);

    assert!(form.on_submit(&mut view).await.is_none());
    assert_eq!(transport.send_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn timeout_restores_submit_control() {
    let transport = ScriptedTransport::never_settling();
    let config = FormConfig::default().with_timeout(Duration::from_secs(12));
    let mut form = SurveyForm::new(SubmissionClient::new(&transport, config));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);

    let started = tokio::time::Instant::now();
    let err = form.on_submit(&mut view).await.unwrap().unwrap_err();

    assert!(err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(13));
    assert!(view.submit_enabled());
    assert_eq!(form.step(), Step::Lifestyle);
    assert!(view.notices()[0].message.starts_with("Request timed out"));
}

#[tokio::test]
async fn http_opaque_posts_json_once() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/collect")
                .header("content-type", "application/json")
                .json_body_partial(r#"{"name":"A","food":"sushi","travel":"plane"}"#);
            then.status(500).body("unreadable in opaque mode");
        })
        .await;

    let config = FormConfig::default().with_endpoint(server.url("/collect"));
    let mut form = SurveyForm::new(SubmissionClient::new(HttpTransport::new(), config));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);

    let result = form.on_submit(&mut view).await.unwrap();

    assert!(result.is_ok());
    assert_eq!(form.step(), Step::Success);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn http_readable_success_and_rejection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ok");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success":true,"message":"saved"}"#);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/dup");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success":false,"message":"duplicate"}"#);
        })
        .await;

    let readable = FormConfig::default().with_transport(TransportPolicy::Readable);

    let client = SubmissionClient::new(
        HttpTransport::new(),
        readable.clone().with_endpoint(server.url("/ok")),
    );
    let mut form = SurveyForm::new(client);
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);
    assert!(form.on_submit(&mut view).await.unwrap().is_ok());

    let client = SubmissionClient::new(
        HttpTransport::new(),
        readable.with_endpoint(server.url("/dup")),
    );
    let mut form = SurveyForm::new(client);
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);
    let err = form.on_submit(&mut view).await.unwrap().unwrap_err();
    assert!(matches!(err, SubmitError::Rejected(ref message) if message == "duplicate"));
}

#[tokio::test]
async fn http_readable_error_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/collect");
            then.status(503);
        })
        .await;

    let config = FormConfig::default()
        .with_transport(TransportPolicy::Readable)
        .with_endpoint(server.url("/collect"));
    let mut form = SurveyForm::new(SubmissionClient::new(HttpTransport::new(), config));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);

    let err = form.on_submit(&mut view).await.unwrap().unwrap_err();
    assert!(matches!(err, SubmitError::Status(503)));
}

#[tokio::test]
async fn http_readable_unparseable_reply_is_not_a_network_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/collect");
            then.status(200).body("<html>ok</html>");
        })
        .await;

    let config = FormConfig::default()
        .with_transport(TransportPolicy::Readable)
        .with_endpoint(server.url("/collect"));
    let mut form = SurveyForm::new(SubmissionClient::new(HttpTransport::new(), config));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);

    let err = form.on_submit(&mut view).await.unwrap().unwrap_err();
    assert!(matches!(err, SubmitError::InvalidReply(_)));
    assert_eq!(
        view.notices()[0].message,
        "Submission failed, please try again later"
    );
    assert!(view.submit_enabled());
}

#[tokio::test]
async fn http_slow_endpoint_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/slow");
            then.status(200).delay(Duration::from_secs(5));
        })
        .await;

    let config = FormConfig::default()
        .with_endpoint(server.url("/slow"))
        .with_timeout(Duration::from_millis(200));
    let mut form = SurveyForm::new(SubmissionClient::new(HttpTransport::new(), config));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);

    let started = std::time::Instant::now();
    let err = form.on_submit(&mut view).await.unwrap().unwrap_err();

    assert!(err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(view.submit_enabled());
}

#[tokio::test]
async fn http_connection_refused_is_transport_error() {
    // Nothing listens on port 1
    let config = FormConfig::default().with_endpoint("http://127.0.0.1:1/collect");
    let mut form = SurveyForm::new(SubmissionClient::new(HttpTransport::new(), config));
    let mut view = TestView::new();
    on_lifestyle_step(&mut form, &mut view);
    fill_lifestyle(&mut form);

    let err = form.on_submit(&mut view).await.unwrap().unwrap_err();
    assert!(matches!(err, SubmitError::Transport(_)));
    assert_eq!(
        view.notices()[0].message,
        "Network error, please check your connection"
    );
}
