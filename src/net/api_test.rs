use super::*;
use crate::net::bearer;

#[test]
fn endpoint_url_joins_without_double_slash() {
    assert_eq!(endpoint_url("http://h:8000", "/api/auth/me"), "http://h:8000/api/auth/me");
    assert_eq!(endpoint_url("http://h:8000/", "/api/auth/me"), "http://h:8000/api/auth/me");
    assert_eq!(endpoint_url("http://h:8000", "api/alerts"), "http://h:8000/api/alerts");
}

#[test]
fn check_status_passes_2xx_body_through() {
    assert_eq!(check_status(200, "{}".to_owned()).unwrap(), "{}");
    assert_eq!(check_status(201, String::new()).unwrap(), "");
}

#[test]
fn check_status_rejects_with_detail() {
    let err = check_status(401, r#"{"detail":"Incorrect credentials"}"#.to_owned()).unwrap_err();
    match err {
        ApiError::Rejected { status, detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail.as_deref(), Some("Incorrect credentials"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn check_status_rejects_without_detail() {
    let err = check_status(502, "<html>bad gateway</html>".to_owned()).unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 502, detail: None }));
}

#[test]
fn parse_body_reports_schema_mismatch() {
    let err = parse_body::<User>(r#"{"id":"nope"}"#).unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[test]
fn new_trims_trailing_slash_from_base_url() {
    let (_installer, auth) = bearer::pair();
    let client = ServiceClient::new("http://127.0.0.1:8000/", Timeouts::default(), auth).unwrap();
    assert_eq!(client.base_url(), "http://127.0.0.1:8000");
}

#[test]
fn request_carries_installed_token() {
    let (installer, auth) = bearer::pair();
    let client = ServiceClient::new("http://127.0.0.1:8000", Timeouts::default(), auth).unwrap();

    installer.install("t1");
    let request = client.request(reqwest::Method::GET, ME_PATH).build().unwrap();
    assert_eq!(request.url().as_str(), "http://127.0.0.1:8000/api/auth/me");
    assert_eq!(
        request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
        "Bearer t1"
    );

    installer.clear();
    let request = client.request(reqwest::Method::GET, ME_PATH).build().unwrap();
    assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
}

#[test]
fn default_timeouts() {
    assert_eq!(
        Timeouts::default(),
        Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}
