//! Test doubles for controller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nextcar_api::{ClientError, ClientResult, RemoteApi};
use nextcar_core::{ListingPayload, ListingRecord, LoginRequest, LoginResponse, RegisterRequest};
use nextcar_store::{KeyValueStore, StoreError, StoreResult};
use tokio::sync::Notify;

use crate::picker::{ImagePicker, PickerError, PickerOptions};

/// How the fake backend answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Reject(u16),
    Transport,
    Decode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(LoginRequest),
    Register(RegisterRequest),
    CreateListing { token: String, payload: ListingPayload },
    ListListings,
}

/// Scripted backend that records every request.
pub struct FakeApi {
    outcome: Mutex<Outcome>,
    calls: Mutex<Vec<Call>>,
    listings: Vec<ListingRecord>,
    login_response: LoginResponse,
    gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn new() -> Self {
        FakeApi {
            outcome: Mutex::new(Outcome::Ok),
            calls: Mutex::new(Vec::new()),
            listings: Vec::new(),
            login_response: LoginResponse {
                token: "tok-1".into(),
                role: "USER".into(),
            },
            gate: None,
        }
    }

    pub fn with_outcome(outcome: Outcome) -> Self {
        let api = Self::new();
        api.set_outcome(outcome);
        api
    }

    pub fn with_listings(mut self, listings: Vec<ListingRecord>) -> Self {
        self.listings = listings;
        self
    }

    pub fn with_login_response(mut self, token: &str, role: &str) -> Self {
        self.login_response = LoginResponse {
            token: token.into(),
            role: role.into(),
        };
        self
    }

    /// Every request waits for a notification before answering.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_outcome(&self, outcome: Outcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer<T>(&self, call: Call, ok: T) -> ClientResult<T> {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let outcome = *self.outcome.lock().unwrap();
        match outcome {
            Outcome::Ok => Ok(ok),
            Outcome::Reject(status) => Err(ClientError::Rejected { status }),
            Outcome::Transport => Err(ClientError::Transport("connection refused".into())),
            Outcome::Decode => Err(ClientError::Decode("expected value".into())),
        }
    }
}

#[async_trait]
impl RemoteApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let response = self.login_response.clone();
        self.answer(Call::Login(request.clone()), response).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        self.answer(Call::Register(request.clone()), ()).await
    }

    async fn create_listing(&self, token: &str, payload: &ListingPayload) -> ClientResult<()> {
        let call = Call::CreateListing {
            token: token.to_string(),
            payload: payload.clone(),
        };
        self.answer(call, ()).await
    }

    async fn list_listings(&self) -> ClientResult<Vec<ListingRecord>> {
        let listings = self.listings.clone();
        self.answer(Call::ListListings, listings).await
    }
}

/// Store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::QueryFailed("store offline".into()))
    }

    async fn set_many(&self, _entries: &[(&str, &str)]) -> StoreResult<()> {
        Err(StoreError::QueryFailed("store offline".into()))
    }

    async fn remove_many(&self, _keys: &[&str]) -> StoreResult<()> {
        Err(StoreError::QueryFailed("store offline".into()))
    }
}

/// Picker answering from a script, counting invocations.
#[derive(Default)]
pub struct FakePicker {
    script: Mutex<VecDeque<Option<String>>>,
    broken: bool,
    calls: AtomicUsize,
}

impl FakePicker {
    pub fn new(script: impl IntoIterator<Item = Option<&'static str>>) -> Self {
        FakePicker {
            script: Mutex::new(script.into_iter().map(|s| s.map(str::to_string)).collect()),
            ..Self::default()
        }
    }

    pub fn broken() -> Self {
        FakePicker {
            broken: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImagePicker for FakePicker {
    async fn pick(&self, _options: &PickerOptions) -> Result<Option<String>, PickerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(PickerError::Unavailable("no gallery".into()));
        }
        Ok(self.script.lock().unwrap().pop_front().flatten())
    }
}

pub fn record(marca: &str, modelo: &str) -> ListingRecord {
    ListingRecord {
        id: None,
        marca: marca.into(),
        modelo: modelo.into(),
        versao: None,
        ano: 2020,
        km: 10000,
        preco: 50000.0,
        fotos: None,
    }
}
