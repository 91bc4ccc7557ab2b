use serde::Deserialize;

use crate::contract::model::NewCliente;

/// Create form fields; missing fields arrive as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClienteForm {
    pub nome: String,
    pub email: String,
    pub telefone: String,
}

impl ClienteForm {
    /// Trimmed copy, used both for validation and for repopulating the form.
    pub fn trimmed(&self) -> Self {
        Self {
            nome: self.nome.trim().to_string(),
            email: self.email.trim().to_string(),
            telefone: self.telefone.trim().to_string(),
        }
    }
}

impl From<ClienteForm> for NewCliente {
    fn from(form: ClienteForm) -> Self {
        NewCliente {
            nome: form.nome,
            email: Some(form.email),
            telefone: Some(form.telefone),
        }
        .normalized()
    }
}

/// `GET /clientes?status=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Outcome acknowledged on the list page after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Created,
    Deleted,
}

impl Status {
    /// Unknown values are ignored.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw? {
            "created" => Some(Self::Created),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Deleted => "deleted",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Cliente added.",
            Self::Deleted => "Cliente deleted.",
        }
    }
}
