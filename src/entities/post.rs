// entities/post.rs
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::base::{self, CREATED_AT, IS_PUBLISHED};
use crate::meta::{Described, FieldMeta, ModelMeta, Ordering};

/// Upload area for post images, relative to the media root.
pub const IMAGE_UPLOAD_TO: &str = "posts_images";
pub const IMAGE_MAX_LEN: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(256))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub image: Option<String>,
    pub pub_date: DateTimeWithTimeZone,
    pub author_id: i32,
    pub location_id: Option<i32>,
    pub category_id: Option<i32>,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
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
        base::store_as_utc(&mut self.pub_date);
        Ok(self)
    }
}

impl Described for Entity {
    const META: ModelMeta = ModelMeta {
        verbose_name: "публикация",
        verbose_name_plural: "Публикации",
        ordering: &[Ordering::Desc("pub_date")],
        fields: &[
            FieldMeta::new("title", "Заголовок"),
            FieldMeta::new("text", "Текст"),
            FieldMeta::new("image", "Фото"),
            FieldMeta::new("pub_date", "Дата и время публикации").with_help(
                "Если установить дату и время \
                 в будущем — можно делать отложенные публикации.",
            ),
            FieldMeta::new("author", "Автор публикации"),
            FieldMeta::new("location", "Местоположение"),
            FieldMeta::new("category", "Категория"),
            IS_PUBLISHED,
            CREATED_AT,
        ],
    };
}

impl Entity {
    /// Newest first. Ties fall back to insertion order.
    pub fn find_ordered() -> Select<Entity> {
        Self::find()
            .order_by_desc(Column::PubDate)
            .order_by_desc(Column::Id)
    }

    /// Published posts whose publication time has come.
    ///
    /// Scheduling is a read-path policy; nothing in the schema applies this
    /// filter implicitly.
    pub fn find_visible(now: DateTimeWithTimeZone) -> Select<Entity> {
        Self::find_ordered()
            .filter(Column::IsPublished.eq(true))
            .filter(Column::PubDate.lte(base::utc(now)))
    }
}

impl Model {
    pub fn is_scheduled(&self, now: DateTimeWithTimeZone) -> bool {
        self.pub_date > now
    }

    pub async fn author<C>(&self, db: &C) -> Result<Option<super::user::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::user::Entity).one(db).await
    }

    pub async fn comments<C>(&self, db: &C) -> Result<Vec<super::comment::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        super::comment::Entity::find_for_post(self.id).all(db).await
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// Path stored in [`Model::image`] for an uploaded file.
pub fn image_path(file_name: &str) -> String {
    format!("{IMAGE_UPLOAD_TO}/{file_name}")
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(length(max = 100))]
    pub image: Option<String>,
    pub pub_date: DateTimeWithTimeZone,
    pub author_id: i32,
    pub location_id: Option<i32>,
    pub category_id: Option<i32>,
    #[serde(default = "base::published_by_default")]
    pub is_published: bool,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        pub_date: DateTimeWithTimeZone,
        author_id: i32,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            image: None,
            pub_date,
            author_id,
            location_id: None,
            category_id: None,
            is_published: true,
        }
    }

    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            title: Set(self.title),
            text: Set(self.text),
            image: Set(self.image),
            pub_date: Set(self.pub_date),
            author_id: Set(self.author_id),
            location_id: Set(self.location_id),
            category_id: Set(self.category_id),
            is_published: Set(self.is_published),
            ..ActiveModelBehavior::new()
        }
    }
}

/// Partial edit. `None` leaves a column untouched; the nullable references
/// take `Some(None)` to clear them.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct PostUpdate {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[validate(length(max = 100))]
    pub image: Option<Option<String>>,
    pub pub_date: Option<DateTimeWithTimeZone>,
    pub location_id: Option<Option<i32>>,
    pub category_id: Option<Option<i32>>,
    pub is_published: Option<bool>,
}

impl PostUpdate {
    pub fn apply(self, am: &mut ActiveModel) {
        if let Some(title) = self.title {
            am.title = Set(title);
        }
        if let Some(text) = self.text {
            am.text = Set(text);
        }
        if let Some(image) = self.image {
            am.image = Set(image);
        }
        if let Some(pub_date) = self.pub_date {
            am.pub_date = Set(pub_date);
        }
        if let Some(location_id) = self.location_id {
            am.location_id = Set(location_id);
        }
        if let Some(category_id) = self.category_id {
            am.category_id = Set(category_id);
        }
        if let Some(is_published) = self.is_published {
            am.is_published = Set(is_published);
        }
    }
}
