/// A stored customer record. `id` is assigned by the store and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cliente {
    pub id: i32,
    pub nome: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
}

/// Customer data as submitted, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCliente {
    pub nome: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
}

impl NewCliente {
    /// Trim every field; blank optional fields become `None`.
    pub fn normalized(self) -> Self {
        fn opt(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            nome: self.nome.trim().to_string(),
            email: opt(self.email),
            telefone: opt(self.telefone),
        }
    }
}
