use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(indexed)]
    pub list_id: i32,
    #[sea_orm(default_value = false)]
    pub completed: bool,
    #[sea_orm(belongs_to, from = "list_id", to = "id")]
    pub list: HasOne<super::list::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
