//! Registration, login, profile and logout over HTTP with in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use support::{fixture_clock, session_cookie, test_app};

#[actix_web::test]
async fn duplicate_email_registration_conflicts() {
    let app = actix_test::init_service(test_app(fixture_clock())).await;
    let payload = json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" });

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["details"]["field"], "email");
}

#[rstest]
#[case("ada@example.com", "wrong", StatusCode::UNAUTHORIZED)]
#[case("ghost@example.com", "pw", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn failed_logins_set_no_session(
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(test_app(fixture_clock())).await;
    actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" }))
            .to_request(),
    )
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
    assert!(session_cookie(&res).is_none());
}

#[actix_web::test]
async fn signup_then_login_reaches_profile_until_logout() {
    let app = actix_test::init_service(test_app(fixture_clock())).await;

    let signup = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "pw",
                "mobile": "9999999999",
                "aadhar": "123412341234",
                "faceData": "[0.1, 0.2]"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(signup.status(), StatusCode::CREATED);
    let signup: Value = actix_test::read_body_json(signup).await;
    let user_id = signup["userId"].as_str().expect("userId").to_owned();

    let anonymous = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/users/me").to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let login = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "pw" }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let cookie = session_cookie(&login).expect("session cookie");
    let login: Value = actix_test::read_body_json(login).await;
    assert_eq!(login["userId"], user_id.as_str());
    assert!(login.get("password").is_none());

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/users/me")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let me: Value = actix_test::read_body_json(me).await;
    assert_eq!(me["id"], user_id.as_str());
    assert_eq!(me["mobile"], "9999999999");
    assert!(me.get("password").is_none());
    assert!(me.get("faceData").is_none());

    let logout = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&logout).expect("removal cookie");

    let after = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/users/me")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn face_login_is_disabled_by_default() {
    let app = actix_test::init_service(test_app(fixture_clock())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/face-login")
            .set_json(json!({ "faceData": "[0.1, 0.2]" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);
}
