//! Profile handler.
//!
//! ```text
//! GET /api/users/me
//! ```

use actix_web::{get, web};

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Profile of the signed-in user. Credentials are never included.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.profile.fetch_profile(&user_id).await?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, http::StatusCode, test as actix_test, web};
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    use super::*;
    use crate::domain::{Email, Error, UserId, UserName};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};

    fn ada() -> User {
        User {
            id: UserId::new("u-1").expect("id"),
            name: UserName::new("Ada").expect("name"),
            email: Email::new("ada@example.com").expect("email"),
            mobile: None,
            aadhar: None,
            created_at: Utc
                .with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
                .single()
                .expect("timestamp"),
        }
    }

    macro_rules! init_app {
        ($ports:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new($ports.into_state()))
                    .wrap(test_session_middleware())
                    .route(
                        "/seed",
                        web::get().to(|session: SessionContext| async move {
                            session.persist_user(&UserId::new("u-1").expect("id"))?;
                            Ok::<_, Error>(HttpResponse::Ok().finish())
                        }),
                    )
                    .service(web::scope("/api").service(current_user)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn anonymous_caller_is_unauthorised() {
        let mut ports = MockPorts::default();
        ports.profile.expect_fetch_profile().never();
        let app = init_app!(ports);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/users/me").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn signed_in_caller_gets_profile_without_credentials() {
        let mut ports = MockPorts::default();
        ports
            .profile
            .expect_fetch_profile()
            .withf(|id| id.to_string() == "u-1")
            .times(1)
            .return_once(|_| Ok(ada()));
        let app = init_app!(ports);

        let seed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/seed").to_request(),
        )
        .await;
        let cookie = session_cookie(&seed).expect("session cookie");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["id"], "u-1");
        assert_eq!(body["email"], "ada@example.com");
        assert!(body.get("password").is_none());
        assert!(body.get("faceData").is_none());
    }

    #[actix_web::test]
    async fn stale_session_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .profile
            .expect_fetch_profile()
            .return_once(|_| Err(Error::not_found("user not found")));
        let app = init_app!(ports);

        let seed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/seed").to_request(),
        )
        .await;
        let cookie = session_cookie(&seed).expect("session cookie");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
