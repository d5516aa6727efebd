//! Tests for the account service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ErrorCode, SignupParts, StoredUser, UserName};
use crate::test_support::FixtureClock;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_service(
    repo: MockUserRepository,
    now: DateTime<Utc>,
) -> AccountService<MockUserRepository> {
    AccountService::new(Arc::new(repo), Arc::new(FixtureClock::new(now)))
}

fn stored_user(
    id: &str,
    password: Option<&str>,
    face_data: Option<&str>,
    now: DateTime<Utc>,
) -> StoredUser {
    NewUser {
        name: UserName::new("Ada").expect("name"),
        email: Email::new(format!("{id}@example.com")).expect("email"),
        password_hash: password.map(|pw| PasswordHash::hash(pw).expect("hash")),
        mobile: None,
        aadhar: None,
        face_data: face_data.map(str::to_owned),
        created_at: now,
    }
    .with_id(UserId::new(id).expect("id"))
}

fn signup() -> Signup {
    Signup::try_from_parts(SignupParts {
        name: "Ada",
        email: "ada@example.com",
        password: "pw",
        mobile: "9999999999",
        aadhar: "123412341234",
        face_data: "[0.1, 0.2]",
    })
    .expect("valid signup")
}

#[rstest]
#[tokio::test]
async fn register_hashes_password_and_hides_it(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists()
        .with(eq(UniqueUserField::Email), eq("ada@example.com"))
        .returning(|_, _| Ok(false));
    repo.expect_insert()
        .withf(|user| {
            user.password_hash
                .as_ref()
                .is_some_and(|hash| hash.as_phc().starts_with("$argon2") && hash.verify("secret"))
        })
        .returning(|user| Ok(user.with_id(UserId::new("u-1").expect("id"))));

    let service = make_service(repo, now);
    let registration =
        Registration::try_from_parts("Ada", "ada@example.com", Some("secret"), None)
            .expect("registration");
    let user = service.register(registration).await.expect("registered");

    assert_eq!(user.id.as_ref(), "u-1");
    assert_eq!(user.created_at, now);
}

#[rstest]
#[tokio::test]
async fn register_rejects_duplicate_email(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists().returning(|_, _| Ok(true));
    repo.expect_insert().never();

    let service = make_service(repo, now);
    let registration = Registration::try_from_parts("Ada", "ada@example.com", None, None)
        .expect("registration");
    let error = service.register(registration).await.expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.details(), Some(&json!({ "field": "email" })));
}

#[rstest]
#[tokio::test]
async fn register_maps_index_race_to_conflict(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists().returning(|_, _| Ok(false));
    repo.expect_insert()
        .returning(|_| Err(UserPersistenceError::duplicate("email")));

    let service = make_service(repo, now);
    let registration = Registration::try_from_parts("Ada", "ada@example.com", None, None)
        .expect("registration");
    let error = service.register(registration).await.expect_err("race");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(UniqueUserField::Email, "email")]
#[case(UniqueUserField::Aadhar, "aadhar")]
#[case(UniqueUserField::Mobile, "mobile")]
#[tokio::test]
async fn signup_reports_first_duplicate_in_order(
    now: DateTime<Utc>,
    #[case] taken: UniqueUserField,
    #[case] expected_field: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists()
        .returning(move |field, _| Ok(field == taken));
    repo.expect_insert().never();

    let service = make_service(repo, now);
    let error = service.signup(signup()).await.expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.details(), Some(&json!({ "field": expected_field })));
}

#[rstest]
#[tokio::test]
async fn signup_stores_every_field(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists().times(3).returning(|_, _| Ok(false));
    repo.expect_insert()
        .withf(|user| {
            user.mobile.as_deref() == Some("9999999999")
                && user.aadhar.as_deref() == Some("123412341234")
                && user.face_data.as_deref() == Some("[0.1, 0.2]")
                && user.password_hash.is_some()
        })
        .returning(|user| Ok(user.with_id(UserId::new("u-2").expect("id"))));

    let service = make_service(repo, now);
    let user = service.signup(signup()).await.expect("signup");
    assert_eq!(user.mobile.as_deref(), Some("9999999999"));
}

#[rstest]
#[case("ghost@example.com", "secret", ErrorCode::NotFound)]
#[case("ada@example.com", "wrong", ErrorCode::Unauthorized)]
#[case("nopw@example.com", "secret", ErrorCode::Unauthorized)]
#[case("not-an-email", "secret", ErrorCode::InvalidRequest)]
#[tokio::test]
async fn login_failures_map_to_codes(
    now: DateTime<Utc>,
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(move |email| {
        Ok(match email.as_ref() {
            "ada@example.com" => Some(stored_user("ada", Some("secret"), None, now)),
            "nopw@example.com" => Some(stored_user("nopw", None, None, now)),
            _ => None,
        })
    });

    let service = make_service(repo, now);
    let credentials = LoginCredentials::try_from_parts(email, password).expect("credentials");
    let error = service
        .authenticate(&credentials)
        .await
        .expect_err("login fails");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn login_succeeds_with_matching_password(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .returning(move |_| Ok(Some(stored_user("ada", Some("secret"), None, now))));

    let service = make_service(repo, now);
    let credentials =
        LoginCredentials::try_from_parts("ada@example.com", "secret").expect("credentials");
    let user = service.authenticate(&credentials).await.expect("login");

    assert_eq!(user.id.as_ref(), "ada");
}

#[rstest]
#[tokio::test]
async fn face_login_is_not_implemented_when_disabled(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_list_with_face_data().never();

    let service = make_service(repo, now);
    let error = service
        .authenticate_face("[0.1, 0.2]")
        .await
        .expect_err("disabled");

    assert_eq!(error.code(), ErrorCode::NotImplemented);
}

#[rstest]
#[case("[0.1, 0.2]", Ok("near"))]
#[case("[5.0, 5.0]", Err(ErrorCode::Unauthorized))]
#[case("data:image/png;base64,AAAA", Err(ErrorCode::InvalidRequest))]
#[tokio::test]
async fn face_login_matches_closest_enrolled_user(
    now: DateTime<Utc>,
    #[case] probe: &str,
    #[case] expected: Result<&str, ErrorCode>,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_list_with_face_data().returning(move || {
        Ok(vec![
            stored_user("far", None, Some("[0.9, 0.9]"), now),
            stored_user("near", None, Some("[0.1, 0.25]"), now),
        ])
    });

    let service = make_service(repo, now).with_face_matching(0.6);
    let outcome = service
        .authenticate_face(probe)
        .await
        .map(|user| user.id.to_string())
        .map_err(|err| err.code());

    assert_eq!(outcome, expected.map(str::to_owned));
}

#[rstest]
#[tokio::test]
async fn face_login_without_enrolments_is_not_found(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_list_with_face_data().returning(|| Ok(Vec::new()));

    let service = make_service(repo, now).with_face_matching(0.6);
    let error = service
        .authenticate_face("[0.1, 0.2]")
        .await
        .expect_err("nobody enrolled");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn profile_for_stale_session_is_not_found(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = make_service(repo, now);
    let error = service
        .fetch_profile(&UserId::new("gone").expect("id"))
        .await
        .expect_err("stale");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn store_outage_is_internal(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(|_| Err(UserPersistenceError::connection("no reachable servers")));

    let service = make_service(repo, now);
    let error = service
        .fetch_profile(&UserId::new("u-1").expect("id"))
        .await
        .expect_err("outage");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "user store error");
}
