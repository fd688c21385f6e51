use std::{path::PathBuf, sync::Arc};

use httpmock::prelude::*;
use moviefan::api::{ApiClient, ApiError};
use moviefan::config::parse_api_url;
use moviefan::forms::{
    Field, ImportForm, LoginForm, MSG_FILL_ALL, MovieForm, RegisterForm, SubmitError, parse_year,
};
use moviefan::management::{ACCESS_TOKEN, CookieAccess, MemoryCookies, Store};
use moviefan::route::Route;
use moviefan::types::{Format, Movie};
use serde_json::json;

fn setup(server: &MockServer) -> (Store, ApiClient) {
    let cookies: Arc<dyn CookieAccess> = Arc::new(MemoryCookies::new());
    let base = parse_api_url(&server.base_url()).unwrap();
    let client = ApiClient::new(base, Arc::clone(&cookies)).unwrap();
    (Store::bootstrap(cookies), client)
}

fn filled_movie_form() -> MovieForm {
    let mut form = MovieForm::new();
    form.title = "Casablanca".to_string();
    form.year = "1942".to_string();
    form.format = "DVD".to_string();
    form.push_actor("Humphrey Bogart");
    form
}

#[test]
fn test_year_bounds() {
    assert!(parse_year("1899").is_err());
    assert_eq!(parse_year("1900"), Ok(1900));
    assert_eq!(parse_year(" 2021 "), Ok(2021));
    assert!(parse_year("2022").is_err());
    assert!(parse_year("abc").is_err());
    assert!(parse_year("2000.5").is_err());
    assert_eq!(parse_year(""), Err("Year is required.".to_string()));
    assert_eq!(
        parse_year("1850"),
        Err("Year must be a number between 1900 and 2021.".to_string())
    );
}

#[test]
fn test_movie_form_reports_each_missing_field() {
    let mut form = MovieForm::new();
    let errors = form.validate().unwrap_err();

    assert_eq!(errors.get(Field::Title), Some("Title is required."));
    assert_eq!(errors.get(Field::Year), Some("Year is required."));
    assert_eq!(errors.get(Field::Format), Some("Format is required."));
    assert_eq!(errors.get(Field::Actors), Some("At least one actor is required."));
    assert_eq!(form.errors(), &errors);
}

#[test]
fn test_movie_form_rejects_unknown_format() {
    let mut form = filled_movie_form();
    form.format = "Laserdisc".to_string();

    let errors = form.validate().unwrap_err();
    assert_eq!(
        errors.get(Field::Format),
        Some("Format must be one of VHS, DVD, Blu-Ray.")
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_movie_form_builds_payload() {
    let mut form = filled_movie_form();
    form.format = "blu-ray".to_string();
    form.title = "  Casablanca ".to_string();

    let movie = form.validate().unwrap();
    assert_eq!(movie.title, "Casablanca");
    assert_eq!(movie.year, 1942);
    assert_eq!(movie.format, Format::BluRay);
    assert_eq!(movie.actors, vec!["Humphrey Bogart"]);
}

#[test]
fn test_actor_list_editing() {
    let mut form = MovieForm::new();
    form.actor_input = "  Ingrid Bergman ".to_string();
    assert!(form.add_actor());
    assert!(form.actor_input.is_empty());

    form.actor_input = "Ingrid Bergman".to_string();
    assert!(!form.add_actor());
    form.actor_input = "   ".to_string();
    assert!(!form.add_actor());

    assert!(form.push_actor("Paul Henreid"));
    assert_eq!(form.actors(), ["Ingrid Bergman", "Paul Henreid"]);
    assert_eq!(form.remove_actor(0), Some("Ingrid Bergman".to_string()));
    assert_eq!(form.remove_actor(5), None);
    assert_eq!(form.actors(), ["Paul Henreid"]);
}

#[test]
fn test_edit_form_prefills_from_movie() {
    let movie = Movie {
        id: Some(4),
        title: "Heat".to_string(),
        year: 1995,
        format: Format::Dvd,
        actors: vec!["Al Pacino".to_string(), "Robert De Niro".to_string()],
    };

    let mut form = MovieForm::from_movie(&movie);
    assert_eq!(form.year, "1995");
    assert_eq!(form.format, "DVD");
    assert_eq!(form.validate().unwrap().actors, movie.actors);
}

#[test]
fn test_edit_form_keeps_stored_actors_as_is() {
    let movie = Movie {
        id: Some(8),
        title: "The Prestige".to_string(),
        year: 2006,
        format: Format::BluRay,
        actors: vec![
            "Hugh Jackman".to_string(),
            "Hugh Jackman".to_string(),
            "Christian Bale".to_string(),
        ],
    };

    let mut form = MovieForm::from_movie(&movie);
    assert_eq!(form.actors(), movie.actors.as_slice());
    assert_eq!(form.validate().unwrap().actors.len(), 3);
}

#[tokio::test]
async fn test_invalid_movie_never_reaches_network() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/movies");
            then.status(200).json_body(json!({ "status": 1 }));
        })
        .await;

    let (_, client) = setup(&server);
    let mut form = filled_movie_form();
    form.year = "1899".to_string();

    let outcome = form.submit_create(&client).await;
    assert!(matches!(outcome, Err(SubmitError::Invalid(_))));
    mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_server_failure_keeps_input() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/movies");
            then.status(500);
        })
        .await;

    let (_, client) = setup(&server);
    let mut form = filled_movie_form();

    match form.submit_create(&client).await {
        Err(SubmitError::Rejected { message, cause }) => {
            assert_eq!(message, "Failed to add movie.");
            assert!(matches!(cause, ApiError::Server(_)));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(form.errors().get(Field::Title), Some("Failed to add movie."));
    assert_eq!(form.title, "Casablanca");
    assert_eq!(form.actors().len(), 1);
}

#[tokio::test]
async fn test_successful_create_clears_form() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/movies");
            then.status(201).json_body(json!({
                "data": { "id": 12, "title": "Casablanca", "year": 1942, "format": "DVD", "actors": [] },
                "status": 1
            }));
        })
        .await;

    let (_, client) = setup(&server);
    let mut form = filled_movie_form();

    let created = form.submit_create(&client).await.unwrap();
    assert_eq!(created.and_then(|movie| movie.id), Some(12));
    assert_eq!(form, MovieForm::new());
}

#[test]
fn test_import_requires_txt_file() {
    let mut form = ImportForm::new(None);
    assert_eq!(
        form.validate().unwrap_err().get(Field::File),
        Some("File is required.")
    );

    let mut form = ImportForm::new(Some(PathBuf::from("movies.csv")));
    assert_eq!(
        form.validate().unwrap_err().get(Field::File),
        Some("Only .txt files are supported.")
    );

    let mut form = ImportForm::new(Some(PathBuf::from("movies.txt")));
    assert_eq!(form.validate(), Ok(PathBuf::from("movies.txt")));
}

#[tokio::test]
async fn test_import_failure_message() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("movies.txt");
    std::fs::write(&file, "Title: Heat\n").unwrap();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/movies/import");
            then.status(400).json_body(json!({ "message": "bad file" }));
        })
        .await;

    let (_, client) = setup(&server);
    let mut form = ImportForm::new(Some(file.clone()));
    let outcome = form.submit(&client).await;

    assert!(matches!(outcome, Err(SubmitError::Rejected { .. })));
    assert_eq!(form.errors().get(Field::File), Some("Failed to import movies."));
    assert_eq!(form.file, Some(file));
}

#[tokio::test]
async fn test_login_requires_all_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(200).json_body(json!({ "token": "t", "status": 1 }));
        })
        .await;

    let (mut store, client) = setup(&server);
    let mut form = LoginForm::new("user@example.com", "   ");

    let outcome = form.submit(&mut store, &client).await;
    assert!(matches!(outcome, Err(SubmitError::Invalid(_))));
    assert_eq!(form.errors().get(Field::Form), Some(MSG_FILL_ALL));
    assert!(form.errors().has(Field::Password));
    assert!(!form.errors().has(Field::Email));
    mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_login_without_token_stays_logged_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(200).json_body(json!({ "status": 1 }));
        })
        .await;

    let (mut store, client) = setup(&server);
    let mut form = LoginForm::new("user@example.com", "secret");

    match form.submit(&mut store, &client).await {
        Err(SubmitError::Rejected { message, .. }) => {
            assert_eq!(message, "Incorrect email or password.")
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(!store.is_authenticated());
    assert_eq!(store.cookies().get(ACCESS_TOKEN), None);
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(200).json_body(json!({
                "status": 0,
                "error": { "code": "AUTHENTICATION_FAILED", "fields": { "email": "AUTHENTICATION_FAILED" } }
            }));
        })
        .await;

    let (mut store, client) = setup(&server);
    let mut form = LoginForm::new("user@example.com", "wrong");
    let outcome = form.submit(&mut store, &client).await;

    assert_eq!(
        outcome.unwrap_err().cause(),
        Some(&ApiError::Unauthorized)
    );
    assert_eq!(
        form.errors().get(Field::Form),
        Some("Incorrect email or password.")
    );
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_login_stores_session_and_goes_home() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sessions")
                .json_body(json!({ "email": "user@example.com", "password": "secret" }));
            then.status(200).json_body(json!({ "token": "tok-1", "status": 1 }));
        })
        .await;

    let (mut store, client) = setup(&server);
    let mut form = LoginForm::new(" user@example.com ", "secret");

    let route = form.submit(&mut store, &client).await.unwrap();
    mock.assert_async().await;
    assert_eq!(route, Route::Home);
    assert!(store.is_authenticated());
    assert_eq!(store.cookies().get(ACCESS_TOKEN).as_deref(), Some("tok-1"));
}

#[test]
fn test_registration_checks_in_order() {
    let mut form = RegisterForm::new("Rick", "rick@example.com", "", "");
    assert_eq!(form.validate().unwrap_err().get(Field::Form), Some(MSG_FILL_ALL));

    let mut form = RegisterForm::new("Rick", "rick@example.com", "12345", "54321");
    let errors = form.validate().unwrap_err();
    assert_eq!(
        errors.get(Field::Password),
        Some("Password must be at least 6 characters long.")
    );
    assert_eq!(errors.len(), 1);

    let mut form = RegisterForm::new("Rick", "rick@example.com", "123456", "1234567");
    assert_eq!(
        form.validate().unwrap_err().get(Field::ConfirmPassword),
        Some("Passwords do not match.")
    );

    let mut form = RegisterForm::new("Rick", "rick@example.com", "123456", "123456");
    let registration = form.validate().unwrap();
    assert_eq!(registration.confirm_password, "123456");
}

#[tokio::test]
async fn test_registration_sends_confirm_password_and_logs_in() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/users").json_body(json!({
                "email": "rick@example.com",
                "name": "Rick",
                "password": "123456",
                "confirmPassword": "123456"
            }));
            then.status(200).json_body(json!({ "token": "new-token", "status": 1 }));
        })
        .await;

    let (mut store, client) = setup(&server);
    let mut form = RegisterForm::new("Rick", "rick@example.com", "123456", "123456");

    assert_eq!(form.submit(&mut store, &client).await.unwrap(), Route::Home);
    mock.assert_async().await;
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn test_registration_shows_server_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/users");
            then.status(200).json_body(json!({
                "status": 0,
                "error": { "code": "EMAIL_NOT_UNIQUE", "fields": { "email": "rick@example.com" } }
            }));
        })
        .await;

    let (mut store, client) = setup(&server);
    let mut form = RegisterForm::new("Rick", "rick@example.com", "123456", "123456");
    let outcome = form.submit(&mut store, &client).await;

    assert!(matches!(outcome, Err(SubmitError::Rejected { .. })));
    let message = form.errors().get(Field::Form).unwrap();
    assert!(message.contains("EMAIL_NOT_UNIQUE"));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_login_sends_password_as_registered() {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/users")
                .body_includes("\"password\":\" secret1 \"");
            then.status(200).json_body(json!({ "token": "new-token", "status": 1 }));
        })
        .await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sessions")
                .json_body(json!({ "email": "rick@example.com", "password": " secret1 " }));
            then.status(200).json_body(json!({ "token": "tok-2", "status": 1 }));
        })
        .await;

    let (mut store, client) = setup(&server);
    let mut form = RegisterForm::new("Rick", "rick@example.com", " secret1 ", " secret1 ");
    form.submit(&mut store, &client).await.unwrap();

    let mut form = LoginForm::new("rick@example.com", " secret1 ");
    assert_eq!(form.validate().unwrap().password, " secret1 ");
    form.submit(&mut store, &client).await.unwrap();

    register.assert_async().await;
    login.assert_async().await;
    assert_eq!(store.cookies().get(ACCESS_TOKEN).as_deref(), Some("tok-2"));
}
