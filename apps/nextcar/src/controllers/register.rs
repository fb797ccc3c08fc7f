//! # Registration Controller
//!
//! Same flow as login, sending the chosen role along. On success the login
//! screen is pushed on top of the registration screen.

use std::sync::{Arc, Mutex};

use nextcar_api::RemoteApi;
use nextcar_core::validation::validate_credentials;
use nextcar_core::{RegisterRequest, Role};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use super::{lock, LoadingFlag};
use crate::error::{AppError, AppResult};
use crate::notice::{self, Notice};
use crate::state::{Navigator, Route};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub struct RegisterController {
    api: Arc<dyn RemoteApi>,
    navigator: Navigator,
    form: Mutex<RegisterForm>,
    loading: LoadingFlag,
}

impl RegisterController {
    pub fn new(api: Arc<dyn RemoteApi>, navigator: Navigator) -> Self {
        RegisterController {
            api,
            navigator,
            form: Mutex::new(RegisterForm::default()),
            loading: LoadingFlag::default(),
        }
    }

    pub fn set_email(&self, email: &str) {
        lock(&self.form).email = email.to_string();
    }

    pub fn set_password(&self, password: &str) {
        lock(&self.form).password = password.to_string();
    }

    pub fn set_role(&self, role: Role) {
        lock(&self.form).role = role;
    }

    /// Choices for the role selector, in display order.
    pub fn role_options(&self) -> [(Role, &'static str); 2] {
        Role::ALL.map(|role| (role, role.label()))
    }

    pub fn form(&self) -> RegisterForm {
        lock(&self.form).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            notice::LABEL_LOADING
        } else {
            notice::LABEL_SIGN_UP
        }
    }

    /// Creates the account and moves on to the login screen.
    pub async fn submit(&self) -> AppResult<Notice> {
        let form = self.form();
        validate_credentials(&form.email, &form.password)
            .map_err(|_| AppError::validation(Notice::error(notice::FILL_ALL_FIELDS)))?;

        let _guard = self.loading.try_begin().ok_or_else(AppError::busy)?;

        let request = RegisterRequest {
            login: form.email,
            password: form.password,
            role: form.role,
        };
        self.api.register(&request).await.map_err(|e| {
            AppError::from_client(e, notice::ACCOUNT_REJECTED, notice::REGISTER_UNREACHABLE)
        })?;

        info!(login = %request.login, role = %request.role, "Account created");
        self.navigator.push(Route::Login);
        Ok(Notice::success(notice::ACCOUNT_CREATED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::{Call, FakeApi, Outcome};

    fn controller(api: Arc<FakeApi>) -> (RegisterController, Navigator) {
        let navigator = Navigator::new();
        navigator.push(Route::Login);
        navigator.push(Route::Register);
        (RegisterController::new(api, navigator.clone()), navigator)
    }

    #[test]
    fn test_role_defaults_to_user() {
        let (ctrl, _) = controller(Arc::new(FakeApi::new()));
        assert_eq!(ctrl.form().role, Role::User);
        assert_eq!(
            ctrl.role_options(),
            [(Role::User, "Usuario"), (Role::Admin, "Administrador")]
        );
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let api = Arc::new(FakeApi::new());
        let (ctrl, _) = controller(api.clone());
        ctrl.set_password("pw");

        let err = ctrl.submit().await.unwrap_err();
        assert_eq!(err.notice.message, "Preencha todos os campos!");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_sends_role_and_pushes_login() {
        let api = Arc::new(FakeApi::new());
        let (ctrl, navigator) = controller(api.clone());
        ctrl.set_email("bia@nextcar.com");
        ctrl.set_password("pw");
        ctrl.set_role(Role::Admin);

        let notice = ctrl.submit().await.unwrap();
        assert_eq!(notice, Notice::new("Sucesso", "Conta criada com sucesso!"));
        assert_eq!(
            api.calls(),
            vec![Call::Register(RegisterRequest {
                login: "bia@nextcar.com".into(),
                password: "pw".into(),
                role: Role::Admin,
            })]
        );
        assert_eq!(
            navigator.history(),
            vec![
                Route::Tabs(crate::state::Tab::Home),
                Route::Login,
                Route::Register,
                Route::Login
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_reset_loading() {
        let api = Arc::new(FakeApi::with_outcome(Outcome::Reject(409)));
        let (ctrl, navigator) = controller(api.clone());
        ctrl.set_email("bia@nextcar.com");
        ctrl.set_password("pw");

        let err = ctrl.submit().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Rejected);
        assert_eq!(
            err.notice.message,
            "Erro ao criar conta. Verifique se o email já está em uso."
        );
        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.submit_label(), "CADASTRAR");

        api.set_outcome(Outcome::Transport);
        let err = ctrl.submit().await.unwrap_err();
        assert_eq!(err.notice.message, "Erro de conexão com o servidor.");
        assert!(!ctrl.is_loading());

        // A later attempt is not blocked by the earlier failures.
        api.set_outcome(Outcome::Ok);
        assert!(ctrl.submit().await.is_ok());
        assert_eq!(navigator.current(), Route::Login);
        assert_eq!(api.calls().len(), 3);
    }
}
