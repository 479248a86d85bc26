// FormSubmitter against a scripted site.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use fi_client::{
    BUSY_LABEL, FALLBACK_ERROR, FormRegistry, FormSubmitter, NETWORK_ERROR, RecordingUi,
    SUCCESS_MESSAGE, SubmitOutcome, UiEvent,
};
use fi_core::{FOLLOWUP_ENDPOINT, FormFields, INTAKE_ENDPOINT};
use serde_json::{Value, json};

type Seen = Arc<Mutex<Vec<(String, Value)>>>;

/// Serve one canned response on both endpoints, recording what was posted.
async fn scripted_site(status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen: Seen = Arc::default();
    let recorder = seen.clone();
    let handler = move |headers: HeaderMap, raw: String| {
        let recorder = recorder.clone();
        async move {
            let content_type = headers
                .get("content-type")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let parsed = serde_json::from_str(&raw).unwrap_or(Value::Null);
            recorder.lock().unwrap().push((content_type, parsed));
            (status, body)
        }
    };
    let app = Router::new()
        .route(INTAKE_ENDPOINT, post(handler.clone()))
        .route(FOLLOWUP_ENDPOINT, post(handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

fn busy() -> UiEvent {
    UiEvent::Control {
        label: BUSY_LABEL.into(),
        enabled: false,
    }
}

fn restored(label: &str) -> UiEvent {
    UiEvent::Control {
        label: label.into(),
        enabled: true,
    }
}

#[tokio::test]
async fn success_without_redirect_alerts_and_resets() {
    let (base, seen) = scripted_site(StatusCode::OK, r#"{"success":true}"#).await;
    let form = FormRegistry::standard().get("followup-24h-form").cloned().unwrap();
    let fields = FormFields::from_pairs([("email", "a@b.com"), ("q1", "Calm")]);
    let mut ui = RecordingUi::new("Send");

    let outcome = FormSubmitter::new(&base)
        .unwrap()
        .submit(&form, &fields, &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert_eq!(
        ui.events,
        vec![busy(), UiEvent::Alert(SUCCESS_MESSAGE.into()), UiEvent::Reset]
    );
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].0, "application/json");
    assert_eq!(
        seen[0].1,
        json!({ "email": "a@b.com", "q1": "Calm", "formType": "24h" })
    );
}

#[tokio::test]
async fn success_with_redirect_navigates() {
    let (base, _) = scripted_site(StatusCode::OK, "{}").await;
    let form = FormRegistry::standard()
        .get("field-questionnaire")
        .cloned()
        .unwrap()
        .with_redirect("/thank-you");
    let mut ui = RecordingUi::new("Send");

    let outcome = FormSubmitter::new(format!("{base}/"))
        .unwrap()
        .submit(&form, &FormFields::new(), &mut ui)
        .await;

    assert_eq!(outcome, SubmitOutcome::Redirected("/thank-you".into()));
    assert_eq!(ui.events, vec![busy(), UiEvent::Navigate("/thank-you".into())]);
}

#[tokio::test]
async fn server_error_is_shown_and_control_restored() {
    let (base, _) = scripted_site(StatusCode::BAD_REQUEST, r#"{"error":"Email is required"}"#).await;
    let form = FormRegistry::standard().get("field-questionnaire").cloned().unwrap();
    let mut ui = RecordingUi::new("Send answers");

    let outcome = FormSubmitter::new(&base)
        .unwrap()
        .submit(&form, &FormFields::new(), &mut ui)
        .await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            status: 400,
            message: "Error: Email is required".into()
        }
    );
    assert_eq!(
        ui.events,
        vec![
            busy(),
            UiEvent::Alert("Error: Email is required".into()),
            restored("Send answers"),
        ]
    );
}

#[tokio::test]
async fn error_without_message_uses_fallback() {
    let (base, _) = scripted_site(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;
    let form = FormRegistry::standard().get("followup-7d-form").cloned().unwrap();
    let mut ui = RecordingUi::new("Send");

    FormSubmitter::new(&base)
        .unwrap()
        .submit(&form, &FormFields::new(), &mut ui)
        .await;

    assert_eq!(ui.alerts(), vec![format!("Error: {FALLBACK_ERROR}").as_str()]);
}

#[tokio::test]
async fn unreadable_body_is_a_network_error() {
    let (base, _) = scripted_site(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").await;
    let form = FormRegistry::standard().get("followup-7d-form").cloned().unwrap();
    let mut ui = RecordingUi::new("Send");

    let outcome = FormSubmitter::new(&base)
        .unwrap()
        .submit(&form, &FormFields::new(), &mut ui)
        .await;

    assert!(matches!(outcome, SubmitOutcome::NetworkError(_)));
    assert_eq!(
        ui.events,
        vec![busy(), UiEvent::Alert(NETWORK_ERROR.into()), restored("Send")]
    );
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let form = FormRegistry::standard().get("field-questionnaire").cloned().unwrap();
    let mut ui = RecordingUi::new("Send");

    let outcome = FormSubmitter::new(format!("http://{addr}"))
        .unwrap()
        .submit(&form, &FormFields::new(), &mut ui)
        .await;

    assert!(!outcome.is_success());
    assert_eq!(ui.alerts(), vec![NETWORK_ERROR]);
    assert_eq!(ui.events.last(), Some(&restored("Send")));
}
