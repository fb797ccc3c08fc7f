//! # Notices
//!
//! A notice is the blocking title + message pair a screen shows after an
//! action. Every user-facing text the controllers produce lives here.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

pub const TITLE_ERROR: &str = "Erro";
pub const TITLE_SUCCESS: &str = "Sucesso";
pub const TITLE_ATTENTION: &str = "Atenção";
pub const TITLE_LIMIT: &str = "Limite atingido";
pub const TITLE_RESTRICTED: &str = "Acesso Restrito";

// Login / Register
pub const FILL_ALL_FIELDS: &str = "Preencha todos os campos!";
pub const INVALID_CREDENTIALS: &str = "Login ou senha inválidos!";
pub const LOGIN_UNREACHABLE: &str = "Falha ao conectar com o servidor.";
pub const ACCOUNT_CREATED: &str = "Conta criada com sucesso!";
pub const ACCOUNT_REJECTED: &str = "Erro ao criar conta. Verifique se o email já está em uso.";
pub const REGISTER_UNREACHABLE: &str = "Erro de conexão com o servidor.";

// Anuncie
pub const PHOTO_LIMIT: &str = "Você pode enviar no máximo 5 fotos.";
pub const PICKER_UNAVAILABLE: &str = "Não foi possível abrir a galeria.";
pub const FILL_REQUIRED_FIELDS: &str = "Preencha os campos obrigatórios.";
pub const SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";
pub const LISTING_CREATED: &str = "Anúncio cadastrado com sucesso!";
pub const LISTING_REJECTED: &str = "Erro ao salvar. Verifique os dados.";
pub const LISTING_UNREACHABLE: &str = "Erro de conexão.";

// Estoque
pub const INVENTORY_REJECTED: &str = "Não foi possível carregar o estoque.";
pub const INVENTORY_UNREACHABLE: &str = "Falha na conexão com o servidor.\nVerifique seu IP.";
pub const INVENTORY_EMPTY: &str = "Nenhum veículo encontrado.";

// Tabs
pub const LOGIN_REQUIRED: &str = "Faça login para anunciar seu veículo.";
pub const LOGOUT_FAILED: &str = "Falha ao sair da conta. Tente novamente.";

// Labels
pub const LABEL_SIGN_IN: &str = "ENTRAR";
pub const LABEL_SIGN_UP: &str = "CADASTRAR";
pub const LABEL_LOADING: &str = "Carregando...";
pub const LABEL_HEADER_LOGIN: &str = "LOGIN";
pub const LABEL_HEADER_LOGOUT: &str = "SAIR";

// Generic
pub const REQUEST_IN_PROGRESS: &str = "Aguarde a conclusão da operação.";
pub const LOCAL_DATA_FAILED: &str = "Falha ao acessar os dados do aparelho.";
pub const UNEXPECTED: &str = "Erro inesperado.";

/// What the screen shows in its alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::new(TITLE_ERROR, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice::new(TITLE_SUCCESS, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
