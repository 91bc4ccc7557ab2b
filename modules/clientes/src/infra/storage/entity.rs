use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cliente")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub nome: String,
    #[sea_orm(column_type = "String(StringLen::N(120))")]
    pub email: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub telefone: Option<String>,
    /// `email_key(email)`; unique, NULL when there is no email.
    #[sea_orm(column_type = "String(StringLen::None)", unique)]
    pub email_normalizado: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
