// entities/location.rs
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::base::{self, CREATED_AT, IS_PUBLISHED};
use crate::meta::{Described, FieldMeta, ModelMeta};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_location")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(256))")]
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            is_published: Set(true),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        base::stamp_created_at(&mut self.created_at, insert);
        Ok(self)
    }
}

impl Described for Entity {
    const META: ModelMeta = ModelMeta {
        verbose_name: "местоположение",
        verbose_name_plural: "Местоположения",
        ordering: &[],
        fields: &[FieldMeta::new("name", "Название места"), IS_PUBLISHED, CREATED_AT],
    };
}

impl Model {
    pub async fn posts<C>(&self, db: &C) -> Result<Vec<super::post::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::post::Entity).all(db).await
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewLocation {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[serde(default = "base::published_by_default")]
    pub is_published: bool,
}

impl NewLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_published: true,
        }
    }

    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            name: Set(self.name),
            is_published: Set(self.is_published),
            ..ActiveModelBehavior::new()
        }
    }
}
