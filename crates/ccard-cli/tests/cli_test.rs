//! Subcommand behaviour against a simulated card API.

use ccard_cli::cards::{
    run_create, run_delete, run_edit, run_list, run_search, run_show, CreateArgs, DeleteArgs,
    EditArgs, ListArgs, Output, SearchArgs, ShowArgs,
};
use ccard_cli::connect::ConnectArgs;
use ccard_cli::{EXIT_CONFLICT, EXIT_INVALID, EXIT_NOT_FOUND, EXIT_OK};
use ccard_client::CardClient;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CARD: &str = "4111111111111111";
const ACCOUNT: &str = "12345678901";

fn client(server: &MockServer, token: Option<&str>) -> CardClient {
    ConnectArgs {
        base_url: server.uri(),
        token: token.map(str::to_string),
        timeout_secs: 5,
    }
    .client()
    .unwrap()
}

fn output() -> Output {
    Output {
        json: false,
        full_numbers: false,
        today: NaiveDate::from_ymd_opt(2026, 10, 18),
    }
}

fn card_json(date: &str) -> serde_json::Value {
    json!({
        "cardNumber": CARD,
        "accountId": ACCOUNT,
        "embossedName": "JANE DOE",
        "expirationDate": date,
        "activeStatus": "Y"
    })
}

fn list_args(page: u32, next: bool, prev: bool) -> ListArgs {
    ListArgs {
        account_id: Some(ACCOUNT.into()),
        card_number: None,
        page,
        next,
        prev,
    }
}

#[tokio::test]
async fn show_renders_masked_card_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("2025-02-01")))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let code = run_show(
        &ShowArgs { card_number: CARD.into() },
        &client(&server, Some("secret")),
        output(),
        &mut out,
    )
    .await
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(code, EXIT_OK);
    assert!(text.contains("**** **** **** 1111"));
    assert!(text.contains("123-4567-8901"));
    assert!(text.contains("02/25  (EXPIRED)"));
}

#[tokio::test]
async fn show_missing_card_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let code = run_show(
        &ShowArgs { card_number: CARD.into() },
        &client(&server, None),
        output(),
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(code, EXIT_NOT_FOUND);
    assert_eq!(String::from_utf8(out).unwrap(), "Credit card not found.\n");
}

#[tokio::test]
async fn show_malformed_number_never_calls_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let code = run_show(
        &ShowArgs { card_number: "41".into() },
        &client(&server, None),
        output(),
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(code, EXIT_INVALID);
    assert!(String::from_utf8(out).unwrap().contains("cardNumber"));
}

#[tokio::test]
async fn list_next_requests_following_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/credit-cards"))
        .and(query_param("accountId", ACCOUNT))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cards": [{"cardNumber": CARD, "accountId": ACCOUNT, "activeStatus": "N"}],
            "currentPage": 3,
            "hasNextPage": true,
            "hasPreviousPage": true,
            "totalRecordsOnPage": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let code = run_list(&list_args(2, true, false), &client(&server, None), output(), &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(code, EXIT_OK);
    assert!(text.contains("Inactive"));
    assert!(text.contains("Previous: ccard list --account-id 12345678901 --page 2"));
    assert!(text.contains("Next:     ccard list --account-id 12345678901 --page 4"));
}

#[tokio::test]
async fn list_prev_on_first_page_stays_local() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let code = run_list(&list_args(1, false, true), &client(&server, None), output(), &mut out)
        .await
        .unwrap();
    assert_eq!(code, EXIT_INVALID);
    assert_eq!(String::from_utf8(out).unwrap(), "Already on the first page.\n");
}

#[tokio::test]
async fn search_without_criteria_stays_local() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let code = run_search(
        &SearchArgs {
            account_id: None,
            card_number: None,
        },
        &client(&server, None),
        output(),
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(code, EXIT_INVALID);
}

#[tokio::test]
async fn search_json_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/credit-cards/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("2029-04-01")))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let code = run_search(
        &SearchArgs {
            account_id: Some(ACCOUNT.into()),
            card_number: None,
        },
        &client(&server, None),
        Output {
            json: true,
            ..output()
        },
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(code, EXIT_OK);
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["cardNumber"], CARD);
}

#[tokio::test]
async fn edit_conflict_prompts_reload() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "version mismatch"})),
        )
        .mount(&server)
        .await;

    let args = EditArgs {
        card_number: CARD.into(),
        name: Some("JANE Q DOE".into()),
        status: None,
        month: None,
        year: None,
        account_id: None,
    };
    let mut out = Vec::new();
    let code = run_edit(&args, &client(&server, None), output(), &mut out)
        .await
        .unwrap();
    assert_eq!(code, EXIT_CONFLICT);
    assert!(String::from_utf8(out)
        .unwrap()
        .contains(&format!("ccard show {CARD}")));
}

#[tokio::test]
async fn edit_without_changes_stays_local() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let args = EditArgs {
        card_number: CARD.into(),
        name: None,
        status: None,
        month: None,
        year: None,
        account_id: None,
    };
    let mut out = Vec::new();
    let code = run_edit(&args, &client(&server, None), output(), &mut out)
        .await
        .unwrap();
    assert_eq!(code, EXIT_INVALID);
}

#[tokio::test]
async fn create_lists_every_invalid_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let args = CreateArgs {
        card_number: "1234".into(),
        account_id: "x".into(),
        name: "J4NE".into(),
        cvv: "1".into(),
        expires: "04/29".into(),
        status: "maybe".into(),
    };
    let mut out = Vec::new();
    let code = run_create(&args, &client(&server, None), output(), &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(code, EXIT_INVALID);
    for field in [
        "cardNumber",
        "accountId",
        "embossedName",
        "cvvCode",
        "expirationDate",
        "activeStatus",
    ] {
        assert!(text.contains(field), "missing {field} in {text}");
    }
}

#[tokio::test]
async fn delete_prints_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/credit-cards/{CARD}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Credit card deleted successfully"})),
        )
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let code = run_delete(
        &DeleteArgs { card_number: CARD.into() },
        &client(&server, None),
        output(),
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(code, EXIT_OK);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Credit card deleted successfully\n"
    );
}

#[tokio::test]
async fn server_error_is_returned_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let result = run_delete(
        &DeleteArgs { card_number: CARD.into() },
        &client(&server, None),
        output(),
        &mut out,
    )
    .await;
    assert!(result.is_err());
}
