//! Mock remote services shared by the store tests.

use async_trait::async_trait;
use mindful_core::meditation::{Meditation, MeditationCategory, MeditationCompletion, MeditationService};
use mindful_core::subscription::{
    BillingPeriod, Offering, Offerings, Package, SubscriptionInfo, SubscriptionService,
};
use mindful_core::user::{AuthService, Credentials, RegistrationData, User};
use mindful_core::{MindfulError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Polls `condition` until it holds, failing the test after one second.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Holds a mocked call open until the test releases it.
#[derive(Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }

    /// Resolves once a call is parked at the gate.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one parked (or the next) call through.
    pub fn open(&self) {
        self.release.notify_one();
    }
}

async fn pass_gate(slot: &Mutex<Option<Arc<Gate>>>) {
    let gate = slot.lock().unwrap().clone();
    if let Some(gate) = gate {
        gate.pass().await;
    }
}

fn install_gate(slot: &Mutex<Option<Arc<Gate>>>) -> Arc<Gate> {
    let gate = Arc::new(Gate::default());
    *slot.lock().unwrap() = Some(Arc::clone(&gate));
    gate
}

// ============================================================================
// Auth
// ============================================================================

pub struct MockAuthService {
    pub calls: Mutex<Vec<&'static str>>,
    pub login_error: Mutex<Option<MindfulError>>,
    pub register_error: Mutex<Option<MindfulError>>,
    pub logout_error: Mutex<Option<MindfulError>>,
    pub current_user: Mutex<Result<User>>,
    pub has_token: Mutex<bool>,
    pub login_gate: Mutex<Option<Arc<Gate>>>,
}

impl MockAuthService {
    pub fn new(user: User) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            login_error: Mutex::new(None),
            register_error: Mutex::new(None),
            logout_error: Mutex::new(None),
            current_user: Mutex::new(Ok(user)),
            has_token: Mutex::new(false),
            login_gate: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_login(&self, error: MindfulError) {
        *self.login_error.lock().unwrap() = Some(error);
    }

    pub fn fail_register(&self, error: MindfulError) {
        *self.register_error.lock().unwrap() = Some(error);
    }

    pub fn fail_logout(&self, error: MindfulError) {
        *self.logout_error.lock().unwrap() = Some(error);
    }

    pub fn fail_current_user(&self, error: MindfulError) {
        *self.current_user.lock().unwrap() = Err(error);
    }

    pub fn set_current_user(&self, user: User) {
        *self.current_user.lock().unwrap() = Ok(user);
    }

    pub fn set_token(&self, present: bool) {
        *self.has_token.lock().unwrap() = present;
    }

    /// Parks every following `login` call at the returned gate.
    pub fn gate_login(&self) -> Arc<Gate> {
        install_gate(&self.login_gate)
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, _credentials: &Credentials) -> Result<()> {
        self.record("login");
        pass_gate(&self.login_gate).await;
        match self.login_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => {
                self.set_token(true);
                Ok(())
            }
        }
    }

    async fn register(&self, _data: &RegistrationData) -> Result<()> {
        self.record("register");
        match self.register_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => {
                self.set_token(true);
                Ok(())
            }
        }
    }

    async fn logout(&self) -> Result<()> {
        self.record("logout");
        self.set_token(false);
        match self.logout_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn get_current_user(&self) -> Result<User> {
        self.record("get_current_user");
        self.current_user.lock().unwrap().clone()
    }

    async fn is_authenticated(&self) -> Result<bool> {
        self.record("is_authenticated");
        Ok(*self.has_token.lock().unwrap())
    }
}

// ============================================================================
// Subscriptions
// ============================================================================

pub struct MockSubscriptionService {
    pub calls: Mutex<Vec<&'static str>>,
    pub status: Mutex<Result<SubscriptionInfo>>,
    pub offerings: Mutex<Result<Offerings>>,
    pub purchase_error: Mutex<Option<MindfulError>>,
    pub restore_result: Mutex<Result<bool>>,
    pub cancel_error: Mutex<Option<MindfulError>>,
    pub status_gate: Mutex<Option<Arc<Gate>>>,
    pub purchase_gate: Mutex<Option<Arc<Gate>>>,
}

impl MockSubscriptionService {
    pub fn new(status: SubscriptionInfo) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status: Mutex::new(Ok(status)),
            offerings: Mutex::new(Ok(sample_offerings())),
            purchase_error: Mutex::new(None),
            restore_result: Mutex::new(Ok(true)),
            cancel_error: Mutex::new(None),
            status_gate: Mutex::new(None),
            purchase_gate: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn set_status(&self, status: Result<SubscriptionInfo>) {
        *self.status.lock().unwrap() = status;
    }

    pub fn set_offerings(&self, offerings: Result<Offerings>) {
        *self.offerings.lock().unwrap() = offerings;
    }

    pub fn gate_status(&self) -> Arc<Gate> {
        install_gate(&self.status_gate)
    }

    pub fn gate_purchase(&self) -> Arc<Gate> {
        install_gate(&self.purchase_gate)
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SubscriptionService for MockSubscriptionService {
    async fn get_subscription_status(&self) -> Result<SubscriptionInfo> {
        self.record("get_subscription_status");
        pass_gate(&self.status_gate).await;
        self.status.lock().unwrap().clone()
    }

    async fn get_offerings(&self) -> Result<Offerings> {
        self.record("get_offerings");
        self.offerings.lock().unwrap().clone()
    }

    async fn purchase_package(&self, _package: &Package) -> Result<()> {
        self.record("purchase_package");
        pass_gate(&self.purchase_gate).await;
        match self.purchase_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn restore_purchases(&self) -> Result<bool> {
        self.record("restore_purchases");
        self.restore_result.lock().unwrap().clone()
    }

    async fn cancel_subscription(&self, _reason: Option<&str>) -> Result<()> {
        self.record("cancel_subscription");
        match self.cancel_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn sample_package() -> Package {
    Package {
        id: "monthly".to_string(),
        product_id: "premium_monthly".to_string(),
        period: BillingPeriod::Monthly,
        price_display: "$9.99".to_string(),
        trial_days: 7,
    }
}

pub fn sample_offerings() -> Offerings {
    Offerings {
        current_offering_id: Some("default".to_string()),
        offerings: vec![Offering {
            id: "default".to_string(),
            title: "Mindful Premium".to_string(),
            description: "Unlock the full library".to_string(),
            packages: vec![sample_package()],
        }],
    }
}

// ============================================================================
// Meditations
// ============================================================================

pub struct MockMeditationService {
    pub meditations: HashMap<String, Meditation>,
    pub recorded: Mutex<Vec<MeditationCompletion>>,
    pub record_gate: Mutex<Option<Arc<Gate>>>,
}

impl MockMeditationService {
    pub fn new(meditations: Vec<Meditation>) -> Self {
        Self {
            meditations: meditations.into_iter().map(|m| (m.id.clone(), m)).collect(),
            recorded: Mutex::new(Vec::new()),
            record_gate: Mutex::new(None),
        }
    }

    pub fn recorded(&self) -> Vec<MeditationCompletion> {
        self.recorded.lock().unwrap().clone()
    }

    /// Parks every following `record_session` call at the returned gate.
    pub fn gate_record(&self) -> Arc<Gate> {
        install_gate(&self.record_gate)
    }
}

#[async_trait]
impl MeditationService for MockMeditationService {
    async fn list_meditations(&self) -> Result<Vec<Meditation>> {
        let mut all: Vec<Meditation> = self.meditations.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn get_meditation(&self, id: &str) -> Result<Meditation> {
        self.meditations
            .get(id)
            .cloned()
            .ok_or_else(|| MindfulError::not_found("meditation", id))
    }

    async fn record_session(&self, completion: &MeditationCompletion) -> Result<()> {
        pass_gate(&self.record_gate).await;
        self.recorded.lock().unwrap().push(completion.clone());
        Ok(())
    }
}

pub fn meditation(id: &str, duration_secs: u64, premium: bool) -> Meditation {
    Meditation {
        id: id.to_string(),
        title: format!("Meditation {id}"),
        description: String::new(),
        duration_secs,
        category: MeditationCategory::Breathing,
        premium,
    }
}
