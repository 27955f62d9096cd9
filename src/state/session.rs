// ============================================================================
// SESSION STORE - Single writer of authentication state
// ============================================================================
// Gates every protected request: no other store talks to the backend until
// the session reaches a terminal state. All mutation funnels through these
// methods; everything else only reads and reacts to transitions.
// ============================================================================

use std::rc::Rc;

use crate::models::{Credential, LoginRequest, RegisterRequest};
use crate::services::api::AuthApi;
use crate::services::error::AuthError;
use crate::state::observable::Observable;
use crate::utils::storage::CredentialStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Terminal until the user acts again
    Unauthenticated,
    /// Bootstrap in progress; the UI must not flash a login form yet
    Verifying,
    Authenticated,
}

/// Which backend holds the credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Survives restarts (localStorage)
    Durable,
    /// Cleared at end of browser session (sessionStorage)
    Ephemeral,
}

/// Invariant: `credential` is present iff `status == Authenticated`.
/// Constructed only through the helpers below.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub status: SessionStatus,
    pub credential: Option<Credential>,
    pub persistence: Persistence,
}

impl Session {
    fn verifying() -> Self {
        Self {
            status: SessionStatus::Verifying,
            credential: None,
            persistence: Persistence::Durable,
        }
    }

    fn unauthenticated() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            credential: None,
            persistence: Persistence::Durable,
        }
    }

    fn authenticated(credential: Credential, persistence: Persistence) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            credential: Some(credential),
            persistence,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
    /// true → durable backend, false → ephemeral
    pub remember: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
}

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Clone)]
pub struct SessionStore {
    state: Observable<Session>,
    durable: Rc<dyn CredentialStore>,
    ephemeral: Rc<dyn CredentialStore>,
}

impl SessionStore {
    /// Starts in `Verifying`: consumers never see `Unauthenticated` before
    /// `bootstrap` has actually resolved the persisted credential.
    pub fn new(durable: Rc<dyn CredentialStore>, ephemeral: Rc<dyn CredentialStore>) -> Self {
        Self {
            state: Observable::new(Session::verifying()),
            durable,
            ephemeral,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.get()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.with(|s| s.status)
    }

    /// Runs synchronously on every transition
    pub fn subscribe(&self, callback: impl Fn() + 'static) {
        self.state.subscribe(callback);
    }

    /// Resolves the persisted credential (if any) into exactly one terminal
    /// state. The completion notification fires once, after that state is
    /// set, never interleaved with it.
    pub async fn bootstrap(&self, api: &impl AuthApi) {
        let stored = self
            .durable
            .load()
            .map(|c| (c, Persistence::Durable))
            .or_else(|| self.ephemeral.load().map(|c| (c, Persistence::Ephemeral)));

        let Some((credential, persistence)) = stored else {
            log::info!("ℹ️ No stored credential, session starts unauthenticated");
            self.state.set(Session::unauthenticated());
            return;
        };

        log::info!("🔍 Stored credential found, verifying...");
        match api.verify(&credential.token).await {
            Ok(response) if response.valid => {
                let credential = Credential {
                    token: credential.token,
                    // Prefer the name the backend reports for the token
                    subject_name: response.username.unwrap_or(credential.subject_name),
                };
                log::info!("✅ Session restored for: {}", credential.subject_name);
                self.state
                    .set(Session::authenticated(credential, persistence));
            }
            // Fail closed: a verification error is treated like an invalid
            // credential, and the stale credential is purged everywhere
            other => {
                match other {
                    Ok(_) => log::warn!("⚠️ Stored credential rejected by backend"),
                    Err(e) => log::warn!("⚠️ Credential verification failed: {}", e),
                }
                self.purge_credentials();
                self.state.set(Session::unauthenticated());
            }
        }
    }

    /// Submits credentials; on success the persisted credential and the
    /// observable state are written together before this returns.
    pub async fn login(&self, api: &impl AuthApi, payload: LoginPayload) -> Result<(), AuthError> {
        let username = payload.username.trim().to_string();
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        if payload.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        let response = api
            .login(&LoginRequest {
                username: username.clone(),
                password: payload.password,
            })
            .await?;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "Invalid username or password".to_string());
            log::warn!("❌ Login failed for {}: {}", username, message);
            return Err(AuthError::Rejected(message));
        }

        let token = response
            .token
            .ok_or_else(|| AuthError::Rejected("Login response carried no token".to_string()))?;
        let credential = Credential {
            subject_name: response.username.unwrap_or(username),
            token,
        };

        let persistence = if payload.remember {
            Persistence::Durable
        } else {
            Persistence::Ephemeral
        };
        self.persist(&credential, persistence)?;

        log::info!("✅ Login successful: {}", credential.subject_name);
        self.state
            .set(Session::authenticated(credential, persistence));
        Ok(())
    }

    /// Creates an account. The caller follows up with `login`.
    pub async fn register(
        &self,
        api: &impl AuthApi,
        payload: RegisterPayload,
    ) -> Result<(), AuthError> {
        let username = payload.username.trim().to_string();
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        if payload.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_CHARS
            )));
        }

        let response = api
            .register(&RegisterRequest {
                username: username.clone(),
                password: payload.password,
            })
            .await?;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "Registration failed".to_string());
            return Err(AuthError::Rejected(message));
        }

        log::info!("📝 Account created: {}", username);
        Ok(())
    }

    /// Clears both persistence backends, then notifies. Subscribers tear
    /// down polling and resources on this call stack, so by the time logout
    /// returns no dependent state survives.
    pub fn logout(&self) {
        self.purge_credentials();
        log::info!("👋 Logged out");
        self.state.set(Session::unauthenticated());
    }

    /// Writes the credential to the chosen backend and guarantees the other
    /// one is empty: never both, never partially.
    fn persist(&self, credential: &Credential, persistence: Persistence) -> Result<(), AuthError> {
        let (target, other): (&Rc<dyn CredentialStore>, &Rc<dyn CredentialStore>) =
            match persistence {
                Persistence::Durable => (&self.durable, &self.ephemeral),
                Persistence::Ephemeral => (&self.ephemeral, &self.durable),
            };
        other.clear();
        if let Err(e) = target.save(credential) {
            // Half-written state is worse than no session at all
            self.purge_credentials();
            return Err(e.into());
        }
        Ok(())
    }

    fn purge_credentials(&self) {
        self.durable.clear();
        self.ephemeral.clear();
    }
}
