// store.rs
//! Validated writes and default-ordered reads over the blog tables.
//!
//! Deletions rely on the foreign-key rules declared in [`crate::schema`]; the
//! database removes or detaches dependent rows.

use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, PrimaryKeyTrait};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::entities::category::{self, NewCategory};
use crate::entities::comment::{self, NewComment};
use crate::entities::location::{self, NewLocation};
use crate::entities::post::{self, NewPost, PostUpdate};
use crate::entities::user::{self, NewUser};
use crate::error::{Error, Result};

fn rejected(entity: &'static str) -> impl FnOnce(DbErr) -> Error {
    move |err| {
        let err = Error::from(err);
        if let Error::Integrity(reason) = &err {
            warn!(entity, %reason, "write rejected");
        }
        err
    }
}

pub async fn create_user<C: ConnectionTrait>(db: &C, input: NewUser) -> Result<user::Model> {
    input.validate()?;
    let created = input.into_active_model().insert(db).await.map_err(rejected("user"))?;
    debug!(id = created.id, username = %created.username, "user created");
    Ok(created)
}

pub async fn create_location<C: ConnectionTrait>(
    db: &C,
    input: NewLocation,
) -> Result<location::Model> {
    input.validate()?;
    let created = input
        .into_active_model()
        .insert(db)
        .await
        .map_err(rejected("location"))?;
    debug!(id = created.id, "location created");
    Ok(created)
}

pub async fn create_category<C: ConnectionTrait>(
    db: &C,
    input: NewCategory,
) -> Result<category::Model> {
    input.validate()?;
    let created = input
        .into_active_model()
        .insert(db)
        .await
        .map_err(rejected("category"))?;
    debug!(id = created.id, slug = %created.slug, "category created");
    Ok(created)
}

pub async fn create_post<C: ConnectionTrait>(db: &C, input: NewPost) -> Result<post::Model> {
    input.validate()?;
    let created = input.into_active_model().insert(db).await.map_err(rejected("post"))?;
    debug!(id = created.id, author_id = created.author_id, "post created");
    Ok(created)
}

pub async fn create_comment<C: ConnectionTrait>(
    db: &C,
    input: NewComment,
) -> Result<comment::Model> {
    input.validate()?;
    let created = input
        .into_active_model()
        .insert(db)
        .await
        .map_err(rejected("comment"))?;
    debug!(id = created.id, post_id = created.post_id, "comment created");
    Ok(created)
}

pub async fn get_post<C: ConnectionTrait>(db: &C, id: i32) -> Result<post::Model> {
    post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::NotFound("post"))
}

pub async fn update_post<C: ConnectionTrait>(
    db: &C,
    id: i32,
    input: PostUpdate,
) -> Result<post::Model> {
    input.validate()?;
    let found = post::Entity::find_by_id(id).one(db).await?;
    let mut am: post::ActiveModel = found.ok_or(Error::NotFound("post"))?.into();
    input.apply(&mut am);
    let updated = am.update(db).await.map_err(rejected("post"))?;
    debug!(id, "post updated");
    Ok(updated)
}

/// All posts, newest `pub_date` first.
pub async fn list_posts<C: ConnectionTrait>(db: &C) -> Result<Vec<post::Model>> {
    Ok(post::Entity::find_ordered().all(db).await?)
}

/// Comments of one post in the order they were written.
pub async fn list_comments<C: ConnectionTrait>(
    db: &C,
    post_id: i32,
) -> Result<Vec<comment::Model>> {
    Ok(comment::Entity::find_for_post(post_id).all(db).await?)
}

async fn delete_by_id<E, C>(db: &C, id: i32, what: &'static str) -> Result<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let res = E::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(Error::NotFound(what));
    }
    info!(entity = what, id, "deleted");
    Ok(())
}

/// Also removes the user's posts, their comments and the user's own comments.
pub async fn delete_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
    delete_by_id::<user::Entity, _>(db, id, "user").await
}

/// Posts at this location survive with `location_id` cleared.
pub async fn delete_location<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
    delete_by_id::<location::Entity, _>(db, id, "location").await
}

/// Posts in this category survive with `category_id` cleared.
pub async fn delete_category<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
    delete_by_id::<category::Entity, _>(db, id, "category").await
}

pub async fn delete_post<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
    delete_by_id::<post::Entity, _>(db, id, "post").await
}

pub async fn delete_comment<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
    delete_by_id::<comment::Entity, _>(db, id, "comment").await
}
