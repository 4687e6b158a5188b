//! Shared fixtures for the integration tests.
//!
//! Builds the full router over the in-memory store, a recording mailer and
//! real JWT sessions, and offers small helpers for JSON requests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use faking::adapters::auth::{Argon2Hasher, JwtSessions, JwtTokenSigner};
use faking::adapters::email::RecordingMailer;
use faking::adapters::http::{api_router, AppState};
use faking::adapters::memory::InMemoryStore;
use faking::application::handlers::mentoring::MentoringSettings;
use faking::domain::accounts::User;
use faking::domain::foundation::{TeamId, Timestamp};
use faking::domain::teams::{Membership, Team};
use faking::ports::{MembershipRepository, SessionIssuer, TeamRepository, UserRepository};

pub const ALLOWED_DOMAIN: &str = "st.ovgu.de";
pub const BASE_URL: &str = "https://faking.test";

pub struct TestApp {
    pub store: InMemoryStore,
    pub mailer: RecordingMailer,
    pub sessions: Arc<JwtSessions>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let mailer = RecordingMailer::new();
        let sessions = Arc::new(JwtSessions::new(
            "integration-session-secret",
            Duration::from_secs(3600),
        ));

        let state = AppState {
            users: Arc::new(store.clone()),
            teams: Arc::new(store.clone()),
            memberships: Arc::new(store.clone()),
            invitations: Arc::new(store.clone()),
            decisions: Arc::new(store.clone()),
            ledger: Arc::new(store.clone()),
            faculties: Arc::new(store.clone()),
            mentors: Arc::new(store.clone()),
            mentees: Arc::new(store.clone()),
            mailer: Arc::new(mailer.clone()),
            hasher: Arc::new(Argon2Hasher::new()),
            session_issuer: sessions.clone(),
            session_validator: sessions.clone(),
            deletion_signer: Arc::new(JwtTokenSigner::new("integration-deletion-secret")),
            allowed_email_domain: ALLOWED_DOMAIN.to_string(),
            public_base_url: BASE_URL.to_string(),
            mentoring: MentoringSettings {
                allowed_email_domains: vec!["st.ovgu.de".to_string(), "ovgu.de".to_string()],
                public_base_url: BASE_URL.to_string(),
                deletion_validity_days: 30,
            },
        };

        Self {
            store,
            mailer,
            sessions,
            router: api_router(state),
        }
    }

    /// Stores a user with an argon2 hash of `password`.
    pub async fn user_with_password(&self, first: &str, last: &str, username: &str, password: &str) -> User {
        let user = User::new(
            first,
            last,
            username,
            format!("{}@{}", username, ALLOWED_DOMAIN),
            Timestamp::now(),
        );
        let hash = faking::ports::CredentialHasher::hash(&Argon2Hasher::new(), password).unwrap();
        UserRepository::save(&self.store, &user, &hash).await.unwrap();
        user
    }

    /// Stores a user without a usable password.
    pub async fn user(&self, first: &str, last: &str, username: &str) -> User {
        let user = User::new(
            first,
            last,
            username,
            format!("{}@{}", username, ALLOWED_DOMAIN),
            Timestamp::now(),
        );
        UserRepository::save(&self.store, &user, "!").await.unwrap();
        user
    }

    pub async fn superuser(&self, first: &str, last: &str, username: &str) -> User {
        let mut user = self.user(first, last, username).await;
        self.store.promote(&user.id).await;
        user.is_superuser = true;
        user
    }

    pub async fn team(&self, name: &str, members: &[&User]) -> TeamId {
        let team = Team::new(name, Timestamp::now());
        TeamRepository::save(&self.store, &team).await.unwrap();
        for member in members {
            let membership = Membership::new(team.id, member.id, None, Timestamp::now());
            self.store.add_if_absent(&membership).await.unwrap();
        }
        team.id
    }

    pub fn token_for(&self, user: &User) -> String {
        self.sessions.issue(&user.as_actor(), Timestamp::now()).unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}
