use crate::common::helpers::spawn_service;
use crate::common::mock_service::{
    mount_authentication, mount_blank_create_rejection, mount_list, mount_story_service,
    mount_unknown_story_paths,
};
use crate::common::test_data::TEST_TOKEN;
use storyspoil_suite::credentials::AuthenticationError;
use storyspoil_suite::scenario::{
    Case, CaseError, CaseOutcome, NON_EXISTING_STORY_ID, ORDERED_CASES, run_scenario,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn the_full_scenario_passes_against_a_faithful_service() {
    // Arrange
    let service = spawn_service().await;
    let story_id = uuid::Uuid::new_v4().to_string();
    mount_story_service(&service.server, TEST_TOKEN, &story_id).await;

    // Act
    let report = run_scenario(&service.settings)
        .await
        .expect("scenario setup failed");

    // Assert
    assert_eq!(report.cases.len(), ORDERED_CASES.len());
    let failures: Vec<_> = report.failures().collect();
    assert!(report.all_passed(), "failed cases: {:?}", failures);
    let executed: Vec<Case> = report.cases.iter().map(|case_report| case_report.case).collect();
    assert_eq!(executed, ORDERED_CASES);
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test]
async fn the_run_issues_the_seven_calls_in_their_fixed_order() {
    // Arrange
    let service = spawn_service().await;
    let story_id = uuid::Uuid::new_v4().to_string();
    mount_story_service(&service.server, TEST_TOKEN, &story_id).await;

    // Act
    let report = run_scenario(&service.settings)
        .await
        .expect("scenario setup failed");

    // Assert
    assert!(report.all_passed());
    let requests = service.server.received_requests().await.unwrap();
    let sequence: Vec<(String, String)> = requests
        .iter()
        .map(|request| (request.method.to_string(), request.url.path().to_owned()))
        .collect();
    let expected = vec![
        ("POST".to_owned(), "/api/Story/Create".to_owned()),
        ("PUT".to_owned(), format!("/api/Story/Edit/{}", story_id)),
        ("GET".to_owned(), "/api/Story/All".to_owned()),
        ("DELETE".to_owned(), format!("/api/Story/Delete/{}", story_id)),
        ("POST".to_owned(), "/api/Story/Create".to_owned()),
        (
            "PUT".to_owned(),
            format!("/api/Story/Edit/{}", NON_EXISTING_STORY_ID),
        ),
        (
            "DELETE".to_owned(),
            format!("/api/Story/Delete/{}", NON_EXISTING_STORY_ID),
        ),
    ];
    // The edit and delete paths embed the created id byte-for-byte.
    assert_eq!(sequence, expected);
}

#[tokio::test]
async fn two_runs_against_an_identically_scripted_service_yield_identical_reports() {
    // Arrange
    let service = spawn_service().await;
    let story_id = uuid::Uuid::new_v4().to_string();
    mount_story_service(&service.server, TEST_TOKEN, &story_id).await;

    // Act
    let first = run_scenario(&service.settings)
        .await
        .expect("scenario setup failed");
    let second = run_scenario(&service.settings)
        .await
        .expect("scenario setup failed");

    // Assert
    let outcomes = |report: &storyspoil_suite::scenario::RunReport| {
        report
            .cases
            .iter()
            .map(|case_report| (case_report.case, case_report.outcome.is_passed()))
            .collect::<Vec<_>>()
    };
    assert_eq!(outcomes(&first), outcomes(&second));
}

#[tokio::test]
async fn a_failed_create_does_not_abort_the_rest_of_the_run() {
    // Arrange
    let service = spawn_service().await;
    // The blank-fields rejection must be mounted before the failing create,
    // so the missing-fields case still sees its 400.
    mount_blank_create_rejection(&service.server, TEST_TOKEN).await;
    Mock::given(path("/api/Story/Create"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&service.server)
        .await;
    let story_id = uuid::Uuid::new_v4().to_string();
    mount_list(&service.server, TEST_TOKEN, &story_id).await;
    mount_unknown_story_paths(&service.server, TEST_TOKEN).await;

    // Act
    let report = run_scenario(&service.settings)
        .await
        .expect("scenario setup failed");

    // Assert
    assert_eq!(report.cases.len(), ORDERED_CASES.len());
    for case_report in &report.cases {
        match case_report.case {
            Case::CreateValid => {
                assert!(matches!(
                    case_report.outcome,
                    CaseOutcome::Failed(CaseError::Assertion { status: 500, .. })
                ));
            }
            // The dependent cases fail fast with an explicit diagnostic
            // instead of hitting the service with a stale or empty id.
            Case::EditExisting | Case::DeleteExisting => {
                assert!(matches!(
                    case_report.outcome,
                    CaseOutcome::Failed(CaseError::MissingStoryId)
                ));
            }
            Case::ListAll
            | Case::CreateMissingFields
            | Case::EditNonExisting
            | Case::DeleteNonExisting => {
                assert!(
                    case_report.outcome.is_passed(),
                    "{} should not be affected by the failed create",
                    case_report.case.name()
                );
            }
        }
    }
}

#[tokio::test]
async fn a_rejected_login_aborts_the_run_before_any_case() {
    // Arrange
    let service = spawn_service().await;
    let mut settings = service.settings.clone();
    settings.credentials.static_token = None;
    Mock::given(path("/api/User/Authentication"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&service.server)
        .await;

    // Act
    let outcome = run_scenario(&settings).await;

    // Assert
    match outcome {
        Err(AuthenticationError::LoginRejected { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected a rejected login, got {:?}", other.map(|_| ())),
    }
    // The only request on the wire is the login attempt.
    let requests = service.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/User/Authentication");
}

#[tokio::test]
async fn a_token_from_the_login_flow_authenticates_the_whole_run() {
    // Arrange
    let service = spawn_service().await;
    let mut settings = service.settings.clone();
    settings.credentials.static_token = None;
    let story_id = uuid::Uuid::new_v4().to_string();
    mount_authentication(&service.server, "a-fresh-token").await;
    // Every story mock demands the freshly issued bearer token.
    mount_story_service(&service.server, "a-fresh-token", &story_id).await;

    // Act
    let report = run_scenario(&settings)
        .await
        .expect("scenario setup failed");

    // Assert
    let failures: Vec<_> = report.failures().collect();
    assert!(report.all_passed(), "failed cases: {:?}", failures);
}
