use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rcw_portal_client::auth::error::{
    ResendError, ResetConfirmError, ResetRequestError, SignInError, SignUpError, VerifyError,
};
use rcw_portal_client::auth::types::ProfileAttribute;
use rcw_portal_client::config::ClientOptions;
use rcw_portal_client::session::MemoryStorage;
use rcw_portal_client::PortalClient;

fn portal_with_storage(uri: &str) -> (PortalClient, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::default());
    let portal = PortalClient::new_with_storage(uri, ClientOptions::default(), storage.clone());
    (portal, storage)
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User logged in successfully",
            "id_token": "test_id_token",
            "access_token": "test_access_token",
            "refresh_token": "test_refresh_token"
        })))
        .mount(server)
        .await;
}

async fn mount_user_attributes(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(query_param("email", "a@b.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User data retrieved successfully",
            "user_attributes": {
                "custom:firstName": "A",
                "custom:lastName": "B",
                "email": "a@b.com",
                "email_verified": "false"
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn sign_in_establishes_session_and_persists_both_blobs() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_user_attributes(&server).await;

    let (portal, storage) = portal_with_storage(&server.uri());

    let tokens = portal.auth().sign_in("a@b.com", "Passw0rd").await.unwrap();
    assert_eq!(tokens.access_token.as_deref(), Some("test_access_token"));
    assert!(tokens.is_complete());

    let session = portal.session().snapshot();
    assert!(session.is_logged_in());
    let user = session.user.unwrap();
    assert_eq!(user.name, "A B");
    assert_eq!(user.email, "a@b.com");

    // The persisted blobs mirror the live state.
    use rcw_portal_client::session::StorageBackend;
    let user_blob: serde_json::Value =
        serde_json::from_str(&storage.get("user").unwrap()).unwrap();
    assert_eq!(user_blob["user_name"], "A B");
    assert_eq!(user_blob["email"], "a@b.com");
    let token_blob: serde_json::Value =
        serde_json::from_str(&storage.get("userToken").unwrap()).unwrap();
    assert_eq!(token_blob["access_token"], "test_access_token");
    assert_eq!(token_blob["refresh_token"], "test_refresh_token");
}

#[tokio::test]
async fn sign_in_with_wrong_password_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Incorrect username or password"
        })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal.auth().sign_in("a@b.com", "Wrong1234").await;

    assert!(matches!(result, Err(SignInError::IncorrectCredentials)));
    assert!(!portal.session().is_logged_in());
}

#[tokio::test]
async fn sign_in_classifies_on_error_type_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "ignored",
            "errorType": "UserNotFound"
        })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal.auth().sign_in("a@b.com", "Passw0rd").await;

    assert!(matches!(result, Err(SignInError::UserNotFound)));
}

#[tokio::test]
async fn sign_in_fails_whole_operation_when_profile_fetch_fails() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "An internal server error occurred"
        })))
        .mount(&server)
        .await;

    let (portal, storage) = portal_with_storage(&server.uri());
    let result = portal.auth().sign_in("a@b.com", "Passw0rd").await;

    assert!(matches!(result, Err(SignInError::Other(_))));
    assert!(!portal.session().is_logged_in());
    // Nothing was persisted either.
    use rcw_portal_client::session::StorageBackend;
    assert_eq!(storage.get("user"), None);
    assert_eq!(storage.get("userToken"), None);
}

#[tokio::test]
async fn sign_out_clears_state_and_storage_without_network() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_user_attributes(&server).await;

    let (portal, storage) = portal_with_storage(&server.uri());
    portal.auth().sign_in("a@b.com", "Passw0rd").await.unwrap();
    assert!(portal.session().is_logged_in());

    portal.auth().sign_out();

    use rcw_portal_client::session::StorageBackend;
    assert!(!portal.session().is_logged_in());
    assert_eq!(storage.get("user"), None);
    assert_eq!(storage.get("userToken"), None);
}

#[tokio::test]
async fn resend_without_access_token_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal.auth().resend_verification_code(None).await;

    assert!(matches!(result, Err(ResendError::NotLoggedIn)));
}

#[tokio::test]
async fn sign_up_runs_the_full_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(body_json(json!({
            "first_name": "A",
            "last_name": "B",
            "email": "a@b.com",
            "password": "Passw0rd"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User signed up successfully"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/confirm"))
        .and(body_json(json!({ "email": "a@b.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User confirmed successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_login(&server).await;
    mount_user_attributes(&server).await;
    Mock::given(method("POST"))
        .and(path("/confirm-email-resend"))
        .and(body_json(json!({ "access_token": "test_access_token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Verification code sent successfully."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let outcome = portal.auth().sign_up("A", "B", "a@b.com", "Passw0rd").await.unwrap();

    assert!(outcome.tokens.is_complete());
    assert!(outcome.confirmed.is_ok());
    assert!(outcome.code_sent.is_ok());

    let session = portal.session().snapshot();
    assert!(session.is_logged_in());
    assert_eq!(session.user.unwrap().name, "A B");
}

#[tokio::test]
async fn sign_up_confirmation_failure_is_best_effort() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User signed up successfully"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/confirm"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Not authorized to confirm user"
        })))
        .mount(&server)
        .await;
    mount_login(&server).await;
    mount_user_attributes(&server).await;
    Mock::given(method("POST"))
        .and(path("/confirm-email-resend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Verification code sent successfully."
        })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let outcome = portal.auth().sign_up("A", "B", "a@b.com", "Passw0rd").await.unwrap();

    // The flow still succeeds; the step's own failure is reported.
    assert!(outcome.confirmed.is_err());
    assert!(outcome.code_sent.is_ok());
    assert!(portal.session().is_logged_in());
}

#[tokio::test]
async fn sign_up_with_existing_email_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "User already exists"
        })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal.auth().sign_up("A", "B", "a@b.com", "Passw0rd").await;

    assert!(matches!(result, Err(SignUpError::EmailExists)));
    assert!(!portal.session().is_logged_in());
}

#[tokio::test]
async fn verify_email_classifies_code_faults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/confirm-email"))
        .and(body_json(json!({
            "access_token": "test_access_token",
            "confirmation_code": "000000"
        })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid confirmation code"
        })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal.auth().verify_email("test_access_token", "000000").await;

    assert!(matches!(result, Err(VerifyError::CodeMismatch)));
}

#[tokio::test]
async fn password_reset_request_hits_the_attempt_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/forgot-password"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "message": "Attempt limit exceeded, please try again later"
        })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal.auth().request_password_reset("a@b.com").await;

    assert!(matches!(result, Err(ResetRequestError::AttemptLimitExceeded)));
}

#[tokio::test]
async fn confirm_password_reset_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/confirm-forgot-password"))
        .and(body_json(json!({
            "email": "a@b.com",
            "confirmation_code": "123456",
            "new_password": "NewPassw0rd"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Password reset successfully."
        })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal
        .auth()
        .confirm_password_reset("a@b.com", "123456", "NewPassw0rd")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn confirm_password_reset_expired_code_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/confirm-forgot-password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Confirmation code expired"
        })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal
        .auth()
        .confirm_password_reset("a@b.com", "123456", "NewPassw0rd")
        .await;

    assert!(matches!(result, Err(ResetConfirmError::ExpiredCode)));
}

#[tokio::test]
async fn update_profile_sends_the_backend_attribute_identifier() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/user"))
        .and(body_json(json!({
            "email": "a@b.com",
            "attribute_updates": { "custom:firstName": "New" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User attributes updated successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal
        .auth()
        .update_profile_attribute("a@b.com", ProfileAttribute::FirstName, "New")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn fetch_profile_attributes_returns_the_raw_map() {
    let server = MockServer::start().await;
    mount_user_attributes(&server).await;

    let (portal, _) = portal_with_storage(&server.uri());
    let attributes = portal.auth().fetch_profile_attributes("a@b.com").await.unwrap();

    assert_eq!(attributes.get("custom:firstName").map(String::as_str), Some("A"));
    assert_eq!(attributes.get("email_verified").map(String::as_str), Some("false"));
}

#[tokio::test]
async fn donation_order_and_subscription_return_provider_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-paypal-order"))
        .and(body_json(json!({
            "amount": 25.0,
            "currency": "USD",
            "custom_id": "general-fund"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ORDER-123" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/create-paypal-subscription"))
        .and(body_json(json!({ "plan_id": "PLAN-9" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "SUB-456" })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let order = portal
        .donations()
        .create_order(25.0, "USD", "general-fund")
        .await
        .unwrap();
    assert_eq!(order, "ORDER-123");

    let subscription = portal.donations().create_subscription("PLAN-9").await.unwrap();
    assert_eq!(subscription, "SUB-456");
}

#[tokio::test]
async fn contact_form_posts_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/contact-us"))
        .and(body_json(json!({
            "first_name": "A",
            "email": "a@b.com",
            "message": "hello"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Message sent successfully."
        })))
        .mount(&server)
        .await;

    let (portal, _) = portal_with_storage(&server.uri());
    let result = portal.contact().send("A", "a@b.com", "hello").await;

    assert!(result.is_ok());
}
