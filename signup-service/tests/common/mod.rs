use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use signup_service::account::models::Account;
use signup_service::account::models::AccountId;
use signup_service::account::models::EmailAddress;
use signup_service::account::models::NewAccount;
use signup_service::account::models::RecordStatus;
use signup_service::account::ports::AccountRepository;
use signup_service::account::ports::EmailNotifier;
use signup_service::account::service::SignupService;
use signup_service::account::service::SignupSettings;
use signup_service::domain::errors::NotifierError;
use signup_service::domain::errors::RepositoryError;
use signup_service::inbound::http::router::create_router;
use signup_service::role::models::Role;
use signup_service::role::models::RoleId;
use signup_service::role::ports::RoleRepository;

pub const PATIENT_ROLE_ID: RoleId = RoleId(1);

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with a seeded, active `patient` role
    pub async fn spawn() -> Self {
        Self::spawn_with(
            InMemoryRoleRepository::with_patient(RecordStatus::Active),
            RecordingNotifier::new(),
        )
        .await
    }

    pub async fn spawn_with(roles: InMemoryRoleRepository, notifier: RecordingNotifier) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let accounts = Arc::new(InMemoryAccountRepository::default());
        let notifier = Arc::new(notifier);

        let settings = SignupSettings {
            notification_timeout: Duration::from_secs(2),
            ..SignupSettings::default()
        };
        let signup_service = Arc::new(SignupService::new(
            Arc::clone(&accounts),
            Arc::new(roles),
            Arc::clone(&notifier),
            settings,
        ));

        let router = create_router(signup_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            accounts,
            notifier,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }
}

/// Account storage keyed by email, with a unique constraint like the real table
#[derive(Default)]
pub struct InMemoryAccountRepository {
    rows: Mutex<Vec<Account>>,
    next_id: AtomicI64,
}

impl InMemoryAccountRepository {
    /// Insert an account directly, bypassing signup
    pub fn seed(&self, email: &str, status: RecordStatus) -> Account {
        let email = EmailAddress::new(email.to_string()).expect("Invalid seed email");
        let mut new_account = NewAccount::new(
            PATIENT_ROLE_ID,
            email,
            "$argon2id$seeded".to_string(),
            None,
            Utc::now(),
        );
        new_account.record_status = status;

        let account = new_account.into_account(self.allocate_id());
        self.rows.lock().unwrap().push(account.clone());
        account
    }

    pub fn all(&self) -> Vec<Account> {
        self.rows.lock().unwrap().clone()
    }

    fn allocate_id(&self) -> AccountId {
        AccountId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|a| a.email == *email).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|a| a.email == account.email) {
            return Err(RepositoryError::UniqueViolation(
                account.email.as_str().to_string(),
            ));
        }

        let created = account.into_account(self.allocate_id());
        rows.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct InMemoryRoleRepository {
    roles: Mutex<Vec<Role>>,
}

impl InMemoryRoleRepository {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_patient(status: RecordStatus) -> Self {
        Self {
            roles: Mutex::new(vec![Role {
                id: PATIENT_ROLE_ID,
                code: "patient".to_string(),
                name: "Patient".to_string(),
                record_status: status,
            }]),
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Role>, RepositoryError> {
        let roles = self.roles.lock().unwrap();
        Ok(roles.iter().find(|r| r.code == code).cloned())
    }
}

/// Notifier that records every verification email instead of sending it
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier whose every delivery fails after recording the attempt
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailNotifier for RecordingNotifier {
    async fn send_verification(
        &self,
        email: &EmailAddress,
        token: &str,
    ) -> Result<(), NotifierError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.as_str().to_string(), token.to_string()));

        if self.fail {
            return Err(NotifierError::DeliveryFailed("SMTP relay unreachable".to_string()));
        }
        Ok(())
    }
}
