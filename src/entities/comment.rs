// entities/comment.rs
use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::base::{self, CREATED_AT};
use crate::meta::{Described, FieldMeta, ModelMeta, Ordering};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub post_id: i32,
    pub author_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
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
        verbose_name: "комментарий",
        verbose_name_plural: "Комментарии",
        ordering: &[Ordering::Asc("created_at")],
        fields: &[
            FieldMeta::new("text", "Текст"),
            FieldMeta::new("post", "Пост"),
            FieldMeta::new("author", "Автор публикации"),
            CREATED_AT,
        ],
    };
}

impl Entity {
    /// Oldest first.
    pub fn find_ordered() -> Select<Entity> {
        Self::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
    }

    pub fn find_for_post(post_id: i32) -> Select<Entity> {
        Self::find_ordered().filter(Column::PostId.eq(post_id))
    }
}

impl Model {
    /// Pairs the comment with its author for display.
    pub fn labeled<'a>(&'a self, author: &'a super::user::Model) -> Label<'a> {
        Label { comment: self, author }
    }

    /// Loads the author and renders `"<username>: <text>"`.
    pub async fn label<C: ConnectionTrait>(&self, db: &C) -> Result<String, DbErr> {
        let author = self
            .find_related(super::user::Entity)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {}", self.author_id)))?;
        Ok(self.labeled(&author).to_string())
    }
}

pub struct Label<'a> {
    comment: &'a Model,
    author: &'a super::user::Model,
}

impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.author.username, self.comment.text)
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewComment {
    #[validate(length(min = 1))]
    pub text: String,
    pub post_id: i32,
    pub author_id: i32,
}

impl NewComment {
    pub fn new(text: impl Into<String>, post_id: i32, author_id: i32) -> Self {
        Self {
            text: text.into(),
            post_id,
            author_id,
        }
    }

    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            text: Set(self.text),
            post_id: Set(self.post_id),
            author_id: Set(self.author_id),
            ..ActiveModelBehavior::new()
        }
    }
}
