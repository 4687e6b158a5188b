//! Integration tests for the mentoring sign-up and the admin export.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::TestApp;
use faking::domain::foundation::Timestamp;
use faking::domain::mentoring::{Faculty, Program};
use faking::ports::FacultyRepository;

async fn faculty(app: &TestApp, slug: &str, deadline: Timestamp) -> Program {
    let faculty = Faculty::new("Informatik", slug, "0068b4", deadline).unwrap();
    let program = Program::new(faculty.id, "Ingenieurinformatik");
    app.store.save_faculty(&faculty).await.unwrap();
    app.store.save_program(&program).await.unwrap();
    program
}

fn mentor_form(program: &Program, email: &str) -> Value {
    json!({
        "first_name": "max",
        "last_name": "mustermann",
        "email": email,
        "phone": "0049 176 / 123 4567",
        "program_id": program.id,
        "privacy": true,
    })
}

fn deletion_token(mail_text: &str) -> String {
    mail_text
        .split("token=")
        .nth(1)
        .map(|rest| rest.trim().to_string())
        .expect("deletion link")
}

#[tokio::test]
async fn mentor_signs_up_gets_a_mentee_and_deletes_the_account() {
    let app = TestApp::new();
    let program = faculty(&app, "fin", Timestamp::now().plus_days(7)).await;

    let (status, signup) = app
        .post(
            "/api/mentoring/faculties/fin/mentors",
            None,
            mentor_form(&program, "Max.Mustermann@st.ovgu.de"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let nickname = signup["nickname"].as_str().unwrap().to_string();
    assert!(!nickname.is_empty());

    let (status, mentors) = app.get("/api/mentoring/faculties/fin/mentors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mentors, json!([nickname]));

    let (status, mentee) = app
        .post(
            "/api/mentoring/faculties/fin/mentees",
            None,
            json!({
                "first_name": "erika",
                "last_name": "musterfrau",
                "email": "erika@ovgu.de",
                "program_id": program.id,
                "mentor": nickname.to_lowercase(),
                "privacy": true,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(mentee["mentor"], nickname);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, vec!["max.mustermann@st.ovgu.de".to_string()]);
    assert!(sent[0].html.is_some());
    assert!(sent[1].text.contains(&nickname));

    let token = deletion_token(&sent[0].text);
    let (status, _) = app
        .post("/api/mentoring/mentors/delete", None, json!({ "token": token }))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, mentors) = app.get("/api/mentoring/faculties/fin/mentors", None).await;
    assert_eq!(mentors, json!([]));

    let (status, body) = app
        .post("/api/mentoring/mentors/delete", None, json!({ "token": token }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MENTOR_NOT_FOUND");
}

#[tokio::test]
async fn duplicate_mentor_email_is_a_field_error() {
    let app = TestApp::new();
    let program = faculty(&app, "fin", Timestamp::now().plus_days(7)).await;
    let form = mentor_form(&program, "max@st.ovgu.de");

    let (status, _) = app
        .post("/api/mentoring/faculties/fin/mentors", None, form.clone())
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post("/api/mentoring/faculties/fin/mentors", None, form)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"][0]["field"], "email");
}

#[tokio::test]
async fn mentor_form_errors_are_collected() {
    let app = TestApp::new();
    faculty(&app, "fin", Timestamp::now().plus_days(7)).await;

    let (status, body) = app
        .post(
            "/api/mentoring/faculties/fin/mentors",
            None,
            json!({
                "first_name": "Max",
                "last_name": "Mustermann",
                "email": "max@gmail.com",
                "phone": "0176 1234567",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"phone"));
    assert!(fields.contains(&"program"));
    assert!(fields.contains(&"privacy"));
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn sign_up_closes_after_the_deadline() {
    let app = TestApp::new();
    let program = faculty(&app, "fin", Timestamp::now().minus_minutes(1)).await;

    let (status, body) = app
        .post(
            "/api/mentoring/faculties/fin/mentors",
            None,
            mentor_form(&program, "max@st.ovgu.de"),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "REGISTRATION_CLOSED");

    let (_, faculties) = app.get("/api/mentoring/faculties", None).await;
    assert_eq!(faculties[0]["open"], false);
    assert_eq!(faculties[0]["color"], "#0068b4");
}

#[tokio::test]
async fn unknown_faculty_and_malformed_token() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/mentoring/faculties/nope/programs", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "FACULTY_NOT_FOUND");

    let (status, body) = app
        .post("/api/mentoring/mentors/delete", None, json!({ "token": "garbage" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "TOKEN_MALFORMED");
}

#[tokio::test]
async fn exports_are_for_superusers_only() {
    let app = TestApp::new();
    let program = faculty(&app, "fin", Timestamp::now().plus_days(7)).await;
    app.post(
        "/api/mentoring/faculties/fin/mentors",
        None,
        mentor_form(&program, "max@st.ovgu.de"),
    )
    .await;

    let member = app.user("Anna", "Alt", "anna").await;
    let (status, _) = app
        .get("/api/admin/export/mentors", Some(&app.token_for(&member)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.superuser("Ada", "Admin", "ada").await;
    let admin_token = app.token_for(&admin);

    let (status, rows) = app.get("/api/admin/export/mentors", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "nickname");
    assert_eq!(rows[1][3], "max@st.ovgu.de");

    let (status, _) = app.get("/api/admin/export/passwords", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
