//! Contract tests for CardClient against a simulated card API.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/api/credit-cards` | `list_*`, `next_page_*`, `previous_page_*` |
//! | GET    | `/api/credit-cards/search` | `search_*` |
//! | GET    | `/api/credit-cards/{cardNumber}` | `get_*` |
//! | PUT    | `/api/credit-cards/{cardNumber}` | `update_*` |
//! | POST   | `/api/credit-cards` | `create_*` |
//! | DELETE | `/api/credit-cards/{cardNumber}` | `delete_*` |

use ccard_client::{BearerToken, CardApiConfig, CardClient, CardClientError};
use ccard_core::{
    ActiveStatus, CreateCreditCardRequest, ListCardsParams, SearchCriteria,
    UpdateCreditCardRequest, ValidationError,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CARD: &str = "4111111111111111";
const ACCOUNT: &str = "12345678901";

fn test_client(mock_server: &MockServer) -> CardClient {
    let config = CardApiConfig::new(&mock_server.uri(), 5).unwrap();
    CardClient::new(config).unwrap()
}

fn card_json() -> serde_json::Value {
    json!({
        "cardNumber": CARD,
        "accountId": ACCOUNT,
        "embossedName": "JANE DOE",
        "cvvCode": "123",
        "expirationDate": "2029-04-01",
        "activeStatus": "Y",
        "createdAt": "2026-01-15T12:00:00Z",
        "updatedAt": "2026-01-15T12:00:00Z"
    })
}

fn page_json(page: u32, has_next: bool) -> serde_json::Value {
    json!({
        "cards": [{"cardNumber": CARD, "accountId": ACCOUNT, "activeStatus": "Y"}],
        "currentPage": page,
        "hasNextPage": has_next,
        "hasPreviousPage": page > 1,
        "totalRecordsOnPage": 1
    })
}

// ── GET /api/credit-cards ────────────────────────────────────────────

#[tokio::test]
async fn list_sends_filters_and_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/credit-cards"))
        .and(query_param("accountId", ACCOUNT))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(2, false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let params = ListCardsParams {
        account_id: Some(ACCOUNT.into()),
        card_number: Some(String::new()),
        page: Some(2),
    };
    let page = client.list(&params).await.unwrap();
    assert_eq!(page.current_page, 2);
    assert!(page.has_previous_page);
    assert_eq!(page.cards[0].active_status, ActiveStatus::Active);
}

#[tokio::test]
async fn list_rejects_invalid_filter_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let params = ListCardsParams {
        account_id: Some("123".into()),
        ..Default::default()
    };
    let err = client.list(&params).await.unwrap_err();
    let fields = err.field_errors().unwrap();
    assert_eq!(
        fields.get("accountId"),
        Some("Account ID must be exactly 11 digits")
    );
}

#[tokio::test]
async fn next_page_requests_following_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/credit-cards"))
        .and(query_param("page", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(4, true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let page = client
        .next_page(3, &ListCardsParams::default())
        .await
        .unwrap();
    assert_eq!(page.current_page, 4);
    assert!(page.has_next_page);
}

#[tokio::test]
async fn next_page_past_last_representable_page_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .next_page(u32::MAX, &ListCardsParams::default())
        .await
        .unwrap_err();
    let fields = err.field_errors().unwrap();
    assert!(fields.get("page").is_some());
}

#[tokio::test]
async fn previous_page_on_first_page_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .previous_page(1, &ListCardsParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CardClientError::AlreadyOnFirstPage));
}

#[tokio::test]
async fn previous_page_requests_prior_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/credit-cards"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1, true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let page = client
        .previous_page(2, &ListCardsParams::default())
        .await
        .unwrap();
    assert_eq!(page.current_page, 1);
}

// ── GET /api/credit-cards/{cardNumber} ───────────────────────────────

#[tokio::test]
async fn get_returns_card_without_cvv() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let card = client.get(CARD).await.unwrap().unwrap();
    assert_eq!(card.card_number.as_str(), CARD);
    assert_eq!(card.account_id.as_str(), ACCOUNT);
    assert!(card.created_at.is_some());
    let out = serde_json::to_value(&card).unwrap();
    assert!(out.get("cvvCode").is_none());
}

#[tokio::test]
async fn get_returns_none_on_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.get(CARD).await.unwrap().is_none());
}

#[tokio::test]
async fn get_rejects_short_card_number_locally() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server);
    let err = client.get("4111").await.unwrap_err();
    assert!(matches!(
        err,
        CardClientError::Validation(ValidationError::InvalidCardNumber)
    ));
}

#[tokio::test]
async fn get_sends_bearer_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).with_credential(Some(BearerToken::new("tok-123")));
    assert!(client.get(CARD).await.unwrap().is_some());
}

#[tokio::test]
async fn get_maps_401_and_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/credit-cards/4000000000000002"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(matches!(
        client.get(CARD).await.unwrap_err(),
        CardClientError::Unauthorized { .. }
    ));
    match client.get("4000000000000002").await.unwrap_err() {
        CardClientError::ApiError { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected ApiError, got: {other:?}"),
    }
}

#[tokio::test]
async fn get_reports_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cardNumber": "x"})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(matches!(
        client.get(CARD).await.unwrap_err(),
        CardClientError::Deserialization { .. }
    ));
}

// ── GET /api/credit-cards/search ─────────────────────────────────────

#[tokio::test]
async fn search_by_account_returns_card() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/credit-cards/search"))
        .and(query_param("accountId", ACCOUNT))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let card = client
        .search(&SearchCriteria::by_account(ACCOUNT))
        .await
        .unwrap();
    assert_eq!(card.unwrap().embossed_name, "JANE DOE");
}

#[tokio::test]
async fn search_404_is_no_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/credit-cards/search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let found = client.search(&SearchCriteria::by_card(CARD)).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn search_without_criteria_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.search(&SearchCriteria::default()).await.unwrap_err();
    assert!(matches!(
        err,
        CardClientError::Validation(ValidationError::MissingSearchCriterion)
    ));
}

// ── PUT /api/credit-cards/{cardNumber} ───────────────────────────────

#[tokio::test]
async fn update_sends_partial_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .and(body_json(json!({"embossedName": "JANE Q DOE", "activeStatus": "N"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let req = UpdateCreditCardRequest {
        embossed_name: Some("JANE Q DOE".into()),
        active_status: Some("N".into()),
        ..Default::default()
    };
    client.update(CARD, &req).await.unwrap();
}

#[tokio::test]
async fn update_conflict_is_distinct() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "status": 409,
            "code": "CONFLICT",
            "message": "Card was modified by another user. Please refresh and try again.",
            "timestamp": "2026-01-15T12:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let req = UpdateCreditCardRequest {
        active_status: Some("N".into()),
        ..Default::default()
    };
    let err = client.update(CARD, &req).await.unwrap_err();
    assert!(err.is_conflict());
    match err {
        CardClientError::Conflict { message, .. } => assert!(message.contains("refresh")),
        other => panic!("expected Conflict, got: {other:?}"),
    }
}

#[tokio::test]
async fn update_with_mismatched_body_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let req = UpdateCreditCardRequest {
        card_number: Some("4000000000000002".into()),
        active_status: Some("Y".into()),
        ..Default::default()
    };
    let err = client.update(CARD, &req).await.unwrap_err();
    assert!(matches!(
        err,
        CardClientError::Validation(ValidationError::CardNumberMismatch)
    ));
}

#[tokio::test]
async fn update_bad_request_carries_field_map() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Validation failed",
            "errors": {"embossedName": "Embossed name must contain only alphabets and spaces"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let req = UpdateCreditCardRequest {
        embossed_name: Some("JANE".into()),
        ..Default::default()
    };
    let err = client.update(CARD, &req).await.unwrap_err();
    assert!(err.field_errors().unwrap().get("embossedName").is_some());
}

#[tokio::test]
async fn update_missing_card_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .update(CARD, &UpdateCreditCardRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ── POST /api/credit-cards ───────────────────────────────────────────

#[tokio::test]
async fn create_posts_full_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/credit-cards"))
        .respond_with(ResponseTemplate::new(201).set_body_json(card_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let req = CreateCreditCardRequest {
        card_number: CARD.into(),
        account_id: ACCOUNT.into(),
        embossed_name: "JANE DOE".into(),
        cvv_code: "123".into(),
        expiration_date: "2029-04-01".into(),
        active_status: "Y".into(),
    };
    let card = client.create(&req).await.unwrap();
    assert_eq!(card.card_number.as_str(), CARD);
}

#[tokio::test]
async fn create_reports_all_fields_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .create(&CreateCreditCardRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.field_errors().unwrap().len(), 6);
}

// ── DELETE /api/credit-cards/{cardNumber} ────────────────────────────

#[tokio::test]
async fn delete_returns_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Credit card deleted successfully"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let resp = client.delete(CARD).await.unwrap();
    assert_eq!(resp.message, "Credit card deleted successfully");
}

#[tokio::test]
async fn delete_missing_card_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.delete(CARD).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let config = CardApiConfig::new("http://127.0.0.1:1", 2).unwrap();
    let client = CardClient::new(config).unwrap();
    assert!(matches!(
        client.get(CARD).await.unwrap_err(),
        CardClientError::Http { .. }
    ));
}
