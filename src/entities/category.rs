// entities/category.rs
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::base::{self, CREATED_AT, IS_PUBLISHED};
use crate::meta::{Described, FieldMeta, ModelMeta};

pub const SLUG_MAX_LEN: u32 = 50;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(256))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(unique, column_type = "String(StringLen::N(50))")]
    pub slug: String,
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
        verbose_name: "категория",
        verbose_name_plural: "Категории",
        ordering: &[],
        fields: &[
            FieldMeta::new("title", "Заголовок"),
            FieldMeta::new("description", "Описание"),
            FieldMeta::new("slug", "Идентификатор").with_help(
                "Идентификатор страницы для URL; \
                 разрешены символы латиницы, цифры, дефис и подчёркивание.",
            ),
            IS_PUBLISHED,
            CREATED_AT,
        ],
    };
}

impl Entity {
    pub fn find_by_slug(slug: &str) -> Select<Entity> {
        use sea_orm::QueryFilter;

        Self::find().filter(Column::Slug.eq(slug))
    }
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
        f.write_str(&self.title)
    }
}

/// Latin letters, digits, hyphen and underscore; nothing else.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("slug")
            .with_message("letters, digits, hyphens or underscores only".into()))
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(max = 50), custom(function = validate_slug))]
    pub slug: String,
    #[serde(default = "base::published_by_default")]
    pub is_published: bool,
}

impl NewCategory {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            slug: slug.into(),
            is_published: true,
        }
    }

    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            title: Set(self.title),
            description: Set(self.description),
            slug: Set(self.slug),
            is_published: Set(self.is_published),
            ..ActiveModelBehavior::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_charset() {
        for ok in ["news", "travel-2024", "long_read", "A1"] {
            assert!(validate_slug(ok).is_ok(), "{ok} should pass");
        }
        for bad in ["", "with space", "новости", "a/b", "dot.ted"] {
            assert!(validate_slug(bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn new_category_limits() {
        assert!(NewCategory::new("News", "Daily news", "news").validate().is_ok());

        let errors = NewCategory::new("News", "Daily news", "x".repeat(SLUG_MAX_LEN as usize + 1))
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));

        let errors = NewCategory::new("t".repeat(257), "", "ok").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn missing_flag_defaults_to_published() {
        let input: NewCategory =
            serde_json::from_str(r#"{"title":"News","description":"d","slug":"news"}"#).unwrap();
        assert!(input.is_published);
    }
}
