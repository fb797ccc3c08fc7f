//! # Tab Shell
//!
//! Header action, the guarded "Anuncie" tab and logout.
//!
//! ## Header State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Unchecked ──on_focus──► Unauthenticated ──login ok──► Authenticated  │
//! │   (no action)             header "LOGIN"                header "SAIR"   │
//! │                                  ▲                           │          │
//! │                                  └────────── logout ─────────┘          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use nextcar_core::AuthState;
use serde::Serialize;
use tracing::{error, info};
use ts_rs::TS;

use super::lock;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::notice::{self, Notice};
use crate::state::{Navigator, Route, SessionContext, Tab};

/// What the header shows on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum HeaderAction {
    /// Session not checked yet.
    Hidden,
    Login,
    Logout,
}

impl HeaderAction {
    pub fn for_state(state: &AuthState) -> Self {
        match state {
            AuthState::Unchecked => HeaderAction::Hidden,
            AuthState::Unauthenticated => HeaderAction::Login,
            AuthState::Authenticated { .. } => HeaderAction::Logout,
        }
    }

    pub const fn label(&self) -> Option<&'static str> {
        match self {
            HeaderAction::Hidden => None,
            HeaderAction::Login => Some(notice::LABEL_HEADER_LOGIN),
            HeaderAction::Logout => Some(notice::LABEL_HEADER_LOGOUT),
        }
    }
}

/// Result of pressing a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabPress {
    Opened(Tab),
    /// Sent to login instead; show the notice.
    Redirected(Notice),
    /// Nothing changed.
    Cancelled,
}

pub struct TabShell {
    session: SessionContext,
    navigator: Navigator,
    auth: Mutex<AuthState>,
}

impl TabShell {
    pub fn new(session: SessionContext, navigator: Navigator) -> Self {
        TabShell {
            session,
            navigator,
            auth: Mutex::new(AuthState::Unchecked),
        }
    }

    /// Re-runs the session gate. Called every time the tabs regain focus.
    pub async fn on_focus(&self) -> AuthState {
        let state = self.session.evaluate().await;
        *lock(&self.auth) = state.clone();
        state
    }

    pub fn auth_state(&self) -> AuthState {
        lock(&self.auth).clone()
    }

    pub fn header_action(&self) -> HeaderAction {
        HeaderAction::for_state(&lock(&self.auth))
    }

    /// "LOGIN" opens the login screen; "SAIR" logs out.
    pub async fn press_header_action(&self) -> AppResult<()> {
        match self.header_action() {
            HeaderAction::Hidden => Ok(()),
            HeaderAction::Login => {
                self.navigator.push(Route::Login);
                Ok(())
            }
            HeaderAction::Logout => self.logout().await,
        }
    }

    /// Clears the session and returns to the root tab.
    pub async fn logout(&self) -> AppResult<()> {
        self.session.clear_session().await.map_err(|e| {
            error!(error = %e, "Logout failed");
            AppError::new(ErrorCode::StorageError, Notice::error(notice::LOGOUT_FAILED))
        })?;

        *lock(&self.auth) = AuthState::Unauthenticated;
        self.navigator.replace(Route::Tabs(Tab::Home));
        info!("Signed out");
        Ok(())
    }

    /// Re-checks the session and logs out only if one is stored.
    /// Returns whether a session was ended.
    pub async fn sign_out(&self) -> AppResult<bool> {
        if !self.on_focus().await.is_authenticated() {
            info!("Sign out requested without a session");
            return Ok(false);
        }
        self.logout().await?;
        Ok(true)
    }

    /// Handles a tab bar press. "Anuncie" needs a stored token.
    pub async fn press_tab(&self, tab: Tab) -> TabPress {
        if tab != Tab::Anuncie {
            self.navigator.switch_tab(tab);
            return TabPress::Opened(tab);
        }

        match self.session.token().await {
            Ok(Some(_)) => {
                self.navigator.push(Route::Tabs(Tab::Anuncie));
                TabPress::Opened(Tab::Anuncie)
            }
            Ok(None) => {
                info!("Anuncie requires login");
                self.navigator.push(Route::Login);
                TabPress::Redirected(Notice::new(notice::TITLE_RESTRICTED, notice::LOGIN_REQUIRED))
            }
            Err(e) => {
                error!(error = %e, "Failed to check session for Anuncie");
                TabPress::Cancelled
            }
        }
    }

    /// Home's "Acessar estoque completo" link.
    pub fn open_inventory(&self) {
        self.navigator.switch_tab(Tab::Estoque);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FailingStore;
    use nextcar_store::MemoryKeyValueStore;
    use std::sync::Arc;

    fn shell() -> (TabShell, SessionContext, Navigator) {
        let session = SessionContext::new(Arc::new(MemoryKeyValueStore::new()));
        let navigator = Navigator::new();
        (
            TabShell::new(session.clone(), navigator.clone()),
            session,
            navigator,
        )
    }

    #[tokio::test]
    async fn test_header_follows_gate() {
        let (shell, session, _) = shell();
        assert_eq!(shell.header_action(), HeaderAction::Hidden);
        assert_eq!(shell.header_action().label(), None);

        shell.on_focus().await;
        assert_eq!(shell.header_action().label(), Some("LOGIN"));

        session.set_session("tok", "USER", "a@b.c").await.unwrap();
        shell.on_focus().await;
        assert_eq!(shell.header_action().label(), Some("SAIR"));
    }

    #[tokio::test]
    async fn test_header_login_pushes_login() {
        let (shell, _, navigator) = shell();
        shell.on_focus().await;
        shell.press_header_action().await.unwrap();
        assert_eq!(navigator.current(), Route::Login);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (shell, session, navigator) = shell();
        session.set_session("tok", "ADMIN", "a@b.c").await.unwrap();
        shell.on_focus().await;
        navigator.switch_tab(Tab::Estoque);

        shell.press_header_action().await.unwrap();

        assert_eq!(shell.auth_state(), AuthState::Unauthenticated);
        assert_eq!(session.evaluate().await, AuthState::Unauthenticated);
        assert_eq!(session.get_session().await.unwrap().role, None);
        assert_eq!(navigator.current(), Route::Tabs(Tab::Home));
    }

    #[tokio::test]
    async fn test_sign_out_reports_whether_session_existed() {
        let (shell, session, _) = shell();
        assert!(!shell.sign_out().await.unwrap());
        assert_eq!(shell.auth_state(), AuthState::Unauthenticated);

        session.set_session("tok", "USER", "a@b.c").await.unwrap();
        assert!(shell.sign_out().await.unwrap());
        assert_eq!(session.evaluate().await, AuthState::Unauthenticated);
        assert!(!shell.sign_out().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_failure() {
        let shell = TabShell::new(SessionContext::new(Arc::new(FailingStore)), Navigator::new());
        let err = shell.logout().await.unwrap_err();
        assert_eq!(err.notice.message, "Falha ao sair da conta. Tente novamente.");
    }

    #[tokio::test]
    async fn test_anuncie_without_token_redirects() {
        let (shell, _, navigator) = shell();

        let press = shell.press_tab(Tab::Anuncie).await;
        assert_eq!(
            press,
            TabPress::Redirected(Notice::new(
                "Acesso Restrito",
                "Faça login para anunciar seu veículo."
            ))
        );
        assert_eq!(navigator.current(), Route::Login);
    }

    #[tokio::test]
    async fn test_anuncie_with_token_opens() {
        let (shell, session, navigator) = shell();
        session.set_session("tok", "USER", "a@b.c").await.unwrap();

        assert_eq!(
            shell.press_tab(Tab::Anuncie).await,
            TabPress::Opened(Tab::Anuncie)
        );
        assert_eq!(navigator.current(), Route::Tabs(Tab::Anuncie));
    }

    #[tokio::test]
    async fn test_anuncie_lookup_failure_leaves_navigation() {
        let navigator = Navigator::new();
        let shell = TabShell::new(SessionContext::new(Arc::new(FailingStore)), navigator.clone());

        assert_eq!(shell.press_tab(Tab::Anuncie).await, TabPress::Cancelled);
        assert_eq!(navigator.history(), vec![Route::Tabs(Tab::Home)]);
    }

    #[tokio::test]
    async fn test_other_tabs_and_inventory_link() {
        let (shell, _, navigator) = shell();
        assert_eq!(shell.press_tab(Tab::Estoque).await, TabPress::Opened(Tab::Estoque));
        shell.press_tab(Tab::Home).await;
        shell.open_inventory();
        assert_eq!(navigator.current(), Route::Tabs(Tab::Estoque));
        assert_eq!(navigator.depth(), 1);
    }
}
