// entities/user.rs
//! Mirror of the identity subsystem's user table. Only the columns the blog
//! references are mapped.
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "auth_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(150))")]
    pub username: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const USERNAME_MAX_LEN: u32 = 150;

impl Model {
    pub async fn posts<C>(&self, db: &C) -> Result<Vec<super::post::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::post::Entity).all(db).await
    }

    pub async fn comments<C>(&self, db: &C) -> Result<Vec<super::comment::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::comment::Entity).all(db).await
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.username)
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            username: Set(self.username),
            ..ActiveModelBehavior::new()
        }
    }
}
