// entities/base.rs
//! Fields shared by locations, categories and posts.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, QueryFilter, Select};
use serde::{Deserialize, Serialize};

use crate::meta::FieldMeta;

/// Publication state embedded in every publishable row.
///
/// A read-side projection: the columns live flat on each model and
/// [`Published::publication`] regroups them.
///
/// `is_published` hides a row instead of deleting it; `created_at` is stamped
/// once on insert and never written again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
}

/// Length of every title and name column.
pub const NAME_MAX_LEN: u32 = 256;

pub const IS_PUBLISHED: FieldMeta = FieldMeta::new("is_published", "Опубликовано")
    .with_help("Снимите галочку, чтобы скрыть публикацию.");
pub const CREATED_AT: FieldMeta = FieldMeta::new("created_at", "Добавлено");

pub(crate) fn published_by_default() -> bool {
    true
}

pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

/// Keeps `created_at` insert-only: stamped on insert, dropped from updates.
pub(crate) fn stamp_created_at(value: &mut ActiveValue<DateTimeWithTimeZone>, insert: bool) {
    if insert {
        *value = ActiveValue::Set(now());
    } else if value.is_set() {
        *value = ActiveValue::NotSet;
    }
}

/// Normalises a timestamp to UTC.
///
/// Text-backed timestamps compare as strings, so every stored or compared
/// value must share one offset.
pub fn utc(value: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    value.with_timezone(&Utc).into()
}

pub(crate) fn store_as_utc(value: &mut ActiveValue<DateTimeWithTimeZone>) {
    if let ActiveValue::Set(at) = value {
        *at = utc(*at);
    }
}

/// Models embedding [`Publication`].
pub trait Published {
    fn publication(&self) -> Publication;

    fn is_published(&self) -> bool {
        self.publication().is_published
    }
}

/// Entities whose rows carry the `is_published` flag.
pub trait Publishable: EntityTrait {
    fn is_published_column() -> Self::Column;

    /// Rows with the visibility flag set. Read paths opt into this filter.
    fn find_published() -> Select<Self> {
        Self::find().filter(Self::is_published_column().eq(true))
    }
}

macro_rules! impl_published {
    ($($module:ident),+ $(,)?) => {
        $(
            impl Published for super::$module::Model {
                fn publication(&self) -> Publication {
                    Publication {
                        is_published: self.is_published,
                        created_at: self.created_at,
                    }
                }
            }

            impl Publishable for super::$module::Entity {
                fn is_published_column() -> Self::Column {
                    super::$module::Column::IsPublished
                }
            }
        )+
    };
}

impl_published!(location, category, post);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overrides_supplied_timestamp() {
        let stale = DateTimeWithTimeZone::parse_from_rfc3339("2000-01-01T00:00:00+00:00").unwrap();
        let mut value = ActiveValue::Set(stale);
        stamp_created_at(&mut value, true);
        match value {
            ActiveValue::Set(stamped) => assert!(stamped > stale),
            other => panic!("expected a fresh timestamp, got {other:?}"),
        }
    }

    #[test]
    fn offsets_collapse_to_utc() {
        let moscow = DateTimeWithTimeZone::parse_from_rfc3339("2024-05-01T10:00:00+03:00").unwrap();
        let mut value = ActiveValue::Set(moscow);
        store_as_utc(&mut value);
        match value {
            ActiveValue::Set(at) => {
                assert_eq!(at, moscow);
                assert_eq!(at.offset().local_minus_utc(), 0);
                assert_eq!(at.to_rfc3339(), "2024-05-01T07:00:00+00:00");
            }
            other => panic!("expected a set value, got {other:?}"),
        }

        let mut untouched = ActiveValue::<DateTimeWithTimeZone>::NotSet;
        store_as_utc(&mut untouched);
        assert!(matches!(untouched, ActiveValue::NotSet));
    }

    #[test]
    fn update_never_writes_created_at() {
        let mut value = ActiveValue::Set(now());
        stamp_created_at(&mut value, false);
        assert!(matches!(value, ActiveValue::NotSet));

        let mut untouched = ActiveValue::Unchanged(now());
        stamp_created_at(&mut untouched, false);
        assert!(matches!(untouched, ActiveValue::Unchanged(_)));
    }
}
