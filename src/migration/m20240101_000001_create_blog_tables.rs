// migration/m20240101_000001_create_blog_tables.rs
use sea_orm_migration::sea_orm::entity::prelude::{EntityName, EntityTrait, IdenStatic};
use sea_orm_migration::{prelude::*, schema::*};

use crate::entities::base::NAME_MAX_LEN;
use crate::entities::{category, comment, location, post, user};
use crate::schema::{ForeignKeyRule, foreign_keys_of};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(user::Entity)
                    .if_not_exists()
                    .col(pk_auto(user::Column::Id))
                    .col(string_len_uniq(user::Column::Username, user::USERNAME_MAX_LEN))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(location::Entity)
                    .if_not_exists()
                    .col(pk_auto(location::Column::Id))
                    .col(string_len(location::Column::Name, NAME_MAX_LEN))
                    .col(boolean(location::Column::IsPublished).default(true))
                    .col(created_at(location::Column::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(category::Entity)
                    .if_not_exists()
                    .col(pk_auto(category::Column::Id))
                    .col(string_len(category::Column::Title, NAME_MAX_LEN))
                    .col(text(category::Column::Description))
                    .col(string_len_uniq(category::Column::Slug, category::SLUG_MAX_LEN))
                    .col(boolean(category::Column::IsPublished).default(true))
                    .col(created_at(category::Column::CreatedAt))
                    .to_owned(),
            )
            .await?;

        let mut posts = Table::create()
            .table(post::Entity)
            .if_not_exists()
            .col(pk_auto(post::Column::Id))
            .col(string_len(post::Column::Title, NAME_MAX_LEN))
            .col(text(post::Column::Text))
            .col(string_len_null(post::Column::Image, post::IMAGE_MAX_LEN))
            .col(timestamp_with_time_zone(post::Column::PubDate))
            .col(integer(post::Column::AuthorId))
            .col(integer_null(post::Column::LocationId))
            .col(integer_null(post::Column::CategoryId))
            .col(boolean(post::Column::IsPublished).default(true))
            .col(created_at(post::Column::CreatedAt))
            .to_owned();
        let table = post::Entity;
        for rule in foreign_keys_of(table.table_name()) {
            posts.foreign_key(&mut foreign_key(rule));
        }
        manager.create_table(posts).await?;

        let mut comments = Table::create()
            .table(comment::Entity)
            .if_not_exists()
            .col(pk_auto(comment::Column::Id))
            .col(text(comment::Column::Text))
            .col(integer(comment::Column::PostId))
            .col(integer(comment::Column::AuthorId))
            .col(created_at(comment::Column::CreatedAt))
            .to_owned();
        let table = comment::Entity;
        for rule in foreign_keys_of(table.table_name()) {
            comments.foreign_key(&mut foreign_key(rule));
        }
        manager.create_table(comments).await?;

        let indexes = [
            index::<location::Entity>(location::Column::IsPublished),
            index::<category::Entity>(category::Column::IsPublished),
            index::<post::Entity>(post::Column::PubDate),
            index::<post::Entity>(post::Column::IsPublished),
            index::<post::Entity>(post::Column::AuthorId),
            index::<post::Entity>(post::Column::LocationId),
            index::<post::Entity>(post::Column::CategoryId),
            index::<comment::Entity>(comment::Column::PostId),
            index::<comment::Entity>(comment::Column::AuthorId),
            index::<comment::Entity>(comment::Column::CreatedAt),
        ];
        for statement in indexes {
            manager.create_index(statement).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dependents first.
        manager
            .drop_table(Table::drop().table(comment::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(post::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(category::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(location::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(user::Entity).if_exists().to_owned())
            .await
    }
}

fn created_at<T: IntoIden>(column: T) -> ColumnDef {
    timestamp_with_time_zone(column)
        .default(Expr::current_timestamp())
        .to_owned()
}

fn foreign_key(rule: &ForeignKeyRule) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(rule.name)
        .from(Alias::new(rule.table), Alias::new(rule.column))
        .to(Alias::new(rule.references), Alias::new("id"))
        .on_delete(rule.on_delete.into())
        .on_update(ForeignKeyAction::NoAction)
        .to_owned()
}

fn index<E: EntityTrait>(column: E::Column) -> IndexCreateStatement {
    let table = E::default();
    Index::create()
        .if_not_exists()
        .name(format!("idx_{}_{}", table.table_name(), column.as_str()))
        .table(table)
        .col(column)
        .to_owned()
}
