//! # Login Controller
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit()                                                               │
//! │    │                                                                    │
//! │    ├── email or password empty ──► "Preencha todos os campos!"         │
//! │    ├── already loading ──────────► Busy                                 │
//! │    ▼                                                                    │
//! │  POST /auth/login                                                       │
//! │    ├── non-2xx ──────────────────► "Login ou senha inválidos!"         │
//! │    ├── no answer / bad body ─────► "Falha ao conectar com o servidor." │
//! │    ▼                                                                    │
//! │  store token, role, email ──► reset(Tabs(Home))                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use nextcar_api::RemoteApi;
use nextcar_core::validation::validate_credentials;
use nextcar_core::LoginRequest;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use super::{lock, LoadingFlag};
use crate::error::{AppError, AppResult};
use crate::notice::{self, Notice};
use crate::state::{Navigator, Route, SessionContext, Tab};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub struct LoginController {
    api: Arc<dyn RemoteApi>,
    session: SessionContext,
    navigator: Navigator,
    form: Mutex<LoginForm>,
    loading: LoadingFlag,
}

impl LoginController {
    pub fn new(api: Arc<dyn RemoteApi>, session: SessionContext, navigator: Navigator) -> Self {
        LoginController {
            api,
            session,
            navigator,
            form: Mutex::new(LoginForm::default()),
            loading: LoadingFlag::default(),
        }
    }

    pub fn set_email(&self, email: &str) {
        lock(&self.form).email = email.to_string();
    }

    pub fn set_password(&self, password: &str) {
        lock(&self.form).password = password.to_string();
    }

    pub fn form(&self) -> LoginForm {
        lock(&self.form).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            notice::LABEL_LOADING
        } else {
            notice::LABEL_SIGN_IN
        }
    }

    /// Signs in with the current form and opens the tabs.
    pub async fn submit(&self) -> AppResult<()> {
        let form = self.form();
        validate_credentials(&form.email, &form.password)
            .map_err(|_| AppError::validation(Notice::error(notice::FILL_ALL_FIELDS)))?;

        let _guard = self.loading.try_begin().ok_or_else(AppError::busy)?;

        let request = LoginRequest {
            login: form.email.clone(),
            password: form.password,
        };
        let response = self.api.login(&request).await.map_err(|e| {
            AppError::from_client(e, notice::INVALID_CREDENTIALS, notice::LOGIN_UNREACHABLE)
        })?;

        self.session
            .set_session(&response.token, &response.role, &form.email)
            .await
            .map_err(|e| AppError::storage(e, notice::LOGIN_UNREACHABLE))?;

        info!(login = %form.email, role = %response.role, "Signed in");
        self.navigator.reset(Route::Tabs(Tab::Home));
        Ok(())
    }
}
