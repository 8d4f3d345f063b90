//! Simulated authentication store.
//!
//! There is no identity provider: credentials are checked against two seeded
//! demo accounts plus locally registered users, with a fixed artificial delay
//! standing in for the network round trip. Demo-grade by construction; the
//! registered-accounts list keeps passwords as-is.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{Duration, sleep};
use webshop_core::{Role, User, UserId};

use super::{Store, Subscription, derive, load_or, persist};
use crate::kv::{SharedKv, keys};

/// Simulated network latency for login and register.
const AUTH_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("User with this email already exists")]
    EmailTaken,
}

/// Current authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// Registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

/// A locally registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAccount {
    user: User,
    password: String,
}

pub struct AuthStore {
    state: Store<AuthState>,
    is_admin: Store<bool>,
    is_logged_in: Store<bool>,
    kv: SharedKv,
    _subscriptions: Vec<Subscription<AuthState>>,
}

impl AuthStore {
    /// Restore the session from the persisted user record and session token;
    /// both must be present, otherwise the store starts signed out.
    #[must_use]
    pub fn new(kv: SharedKv) -> Self {
        let mut initial = AuthState::default();
        if kv.get(keys::SESSION).is_some() {
            let user: Option<User> = load_or(&kv, keys::USER, || None);
            if let Some(user) = user {
                initial.user = Some(user);
                initial.authenticated = true;
            }
        }
        let state = Store::new(initial);
        let (is_admin, admin_sub) = derive(&state, |s: &AuthState| {
            s.user.as_ref().is_some_and(|u| u.role == Role::Admin)
        });
        let (is_logged_in, login_sub) = derive(&state, |s: &AuthState| s.authenticated);
        Self {
            state,
            is_admin,
            is_logged_in,
            kv,
            _subscriptions: vec![admin_sub, login_sub],
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.snapshot()
    }

    #[must_use]
    pub fn observe(&self) -> Store<AuthState> {
        self.state.clone()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin.snapshot()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in.snapshot()
    }

    /// Sign in against the demo accounts and locally registered users.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when no account matches; the error
    /// message is also left in the auth state.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        sleep(AUTH_DELAY).await;

        let user = demo_users()
            .into_iter()
            .find(|(u, pw)| u.email == email && *pw == password)
            .map(|(u, _)| u)
            .or_else(|| {
                let accounts: Vec<StoredAccount> = load_or(&self.kv, keys::USERS, Vec::new);
                accounts
                    .into_iter()
                    .find(|a| a.user.email == email && a.password == password)
                    .map(|a| a.user)
            });

        match user {
            Some(mut user) => {
                user.last_login = Some(Utc::now());
                self.establish_session(&user);
                Ok(user)
            }
            None => {
                let err = AuthError::InvalidCredentials;
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Create a local account and sign it in.
    ///
    /// # Errors
    ///
    /// Rejects mismatched confirmation, short passwords, and duplicate
    /// emails; the error message is also left in the auth state.
    pub async fn register(&self, input: Registration) -> Result<User, AuthError> {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.do_register(input).await;
        if let Err(ref err) = result {
            self.state.update(|s| {
                s.loading = false;
                s.error = Some(err.to_string());
            });
        }
        result
    }

    async fn do_register(&self, input: Registration) -> Result<User, AuthError> {
        if input.password != input.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if input.password.len() < 6 {
            return Err(AuthError::PasswordTooShort);
        }

        sleep(AUTH_DELAY).await;

        let mut accounts: Vec<StoredAccount> = load_or(&self.kv, keys::USERS, Vec::new);
        if accounts.iter().any(|a| a.user.email == input.email)
            || demo_users().iter().any(|(u, _)| u.email == input.email)
        {
            return Err(AuthError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(uuid::Uuid::new_v4().to_string()),
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            role: Role::User,
            avatar: None,
            created_at: now,
            last_login: Some(now),
        };
        accounts.push(StoredAccount {
            user: user.clone(),
            password: input.password,
        });
        persist(&self.kv, keys::USERS, &accounts);

        self.establish_session(&user);
        Ok(user)
    }

    /// Sign out and drop the persisted session.
    pub fn logout(&self) {
        self.kv.remove(keys::USER);
        self.kv.remove(keys::SESSION);
        self.state.set(AuthState::default());
    }

    /// Apply a partial profile update to the signed-in user. No-op when
    /// signed out.
    pub fn update_profile(&self, updates: ProfileUpdate) {
        let updated = self.state.update(|s| {
            let Some(user) = s.user.as_mut() else {
                return None;
            };
            if let Some(first_name) = updates.first_name {
                user.first_name = first_name;
            }
            if let Some(last_name) = updates.last_name {
                user.last_name = last_name;
            }
            if let Some(avatar) = updates.avatar {
                user.avatar = Some(avatar);
            }
            Some(user.clone())
        });
        if let Some(user) = updated {
            persist(&self.kv, keys::USER, &Some(user));
        }
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.state
            .read(|s| s.user.as_ref().is_some_and(|u| u.role == role))
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    fn establish_session(&self, user: &User) {
        let token = format!("token_{}_{}", user.id, Utc::now().timestamp_millis());
        persist(&self.kv, keys::USER, &Some(user.clone()));
        self.kv.set(keys::SESSION, &token);
        self.state.update(|s| {
            s.user = Some(user.clone());
            s.authenticated = true;
            s.loading = false;
            s.error = None;
        });
        tracing::debug!(email = %user.email, "Session established");
    }
}

/// The two built-in demo accounts and their passwords.
fn demo_users() -> Vec<(User, &'static str)> {
    let date = |y: i32, m: u32, d: u32| {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().unwrap_or_default()
    };
    vec![
        (
            User {
                id: UserId::new("1"),
                email: "user@example.com".to_string(),
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                role: Role::User,
                avatar: Some("/img/avatars/user.png".to_string()),
                created_at: date(2023, 1, 15),
                last_login: None,
            },
            "password123",
        ),
        (
            User {
                id: UserId::new("2"),
                email: "admin@example.com".to_string(),
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                role: Role::Admin,
                avatar: Some("/img/avatars/admin.png".to_string()),
                created_at: date(2023, 1, 1),
                last_login: None,
            },
            "admin123",
        ),
    ]
}
