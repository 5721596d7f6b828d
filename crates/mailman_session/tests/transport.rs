use std::time::Duration;

use mailman_core::{FormPayload, PageLayout};
use mailman_session::{
    ListSession, ReqwestTransport, SessionError, Transport, TransportErrorKind, TransportSettings,
};
use url::Url;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HTML: &str = "text/html; charset=utf-8";

// The blocking client owns its own runtime, so it is built and used off the
// async test runtime.
async fn blocking<R: Send + 'static>(f: impl FnOnce() -> R + Send + 'static) -> R {
    tokio::task::spawn_blocking(f).await.expect("blocking task")
}

#[tokio::test(flavor = "multi_thread")]
async fn form_body_keeps_repeated_keys_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mailman/admin/team/members"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "adminpw=pw&user=a%40x.com&user=b%40x.com&setmemberopts_btn=Submit+Your+Changes",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>done</html>", HTML))
        .expect(1)
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/mailman/admin/team/members", server.uri())).unwrap();
    let response = blocking(move || {
        let transport = ReqwestTransport::new(&TransportSettings::default()).unwrap();
        let mut payload = FormPayload::new();
        payload.push("adminpw", "pw");
        payload.push("user", "a@x.com");
        payload.push("user", "b@x.com");
        payload.push("setmemberopts_btn", "Submit Your Changes");
        transport.post_form(&url, &payload)
    })
    .await
    .expect("post ok");

    assert_eq!(response.status, 200);
    assert_eq!(response.content_type.as_deref(), Some(HTML));
    assert_eq!(response.body, b"<html>done</html>");
}

#[tokio::test(flavor = "multi_thread")]
async fn login_cookie_is_sent_on_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mailman/admin/team"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "team+admin=c00kie; Path=/mailman")
                .set_body_raw("<html>welcome</html>", HTML),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mailman/admindb/team"))
        .and(query_param("msgid", "5"))
        .and(header("cookie", "team+admin=c00kie"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<strong>Message Headers:</strong><textarea>Subject: hi</textarea>\
             <strong>Message Excerpt:</strong><textarea>body</textarea>",
            HTML,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/mailman", server.uri());
    let details = blocking(move || {
        let session = ListSession::connect(
            &base,
            "team",
            "pw",
            &TransportSettings::default(),
            PageLayout::default(),
        )?;
        session.moderation_request_details(5)
    })
    .await
    .expect("session ok")
    .expect("held message");

    assert_eq!(details.message_id, 5);
    assert_eq!(details.headers, "Subject: hi");
    assert_eq!(details.message_contents, "body");
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_with_wrong_password_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mailman/admin/team"))
        .respond_with(ResponseTemplate::new(401).set_body_raw("Authorization failed.", HTML))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/mailman", server.uri());
    let result = blocking(move || {
        ListSession::connect(
            &base,
            "team",
            "wrong",
            &TransportSettings::default(),
            PageLayout::default(),
        )
        .map(|_| ())
    })
    .await;

    assert!(matches!(
        result,
        Err(SessionError::IncorrectPassword { list }) if list == "team"
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mailman/roster/team"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/mailman/roster/team", server.uri())).unwrap();
    let err = blocking(move || {
        let settings = TransportSettings {
            connect_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_millis(200),
        };
        ReqwestTransport::new(&settings).unwrap().get(&url)
    })
    .await
    .unwrap_err();

    assert_eq!(err.kind, TransportErrorKind::Timeout);
}
