// schema.rs
//! Referential rules for every foreign key in the blog tables.

use sea_orm::sea_query::ForeignKeyAction;

/// What happens to a referencing row when its target is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

impl From<OnDelete> for ForeignKeyAction {
    fn from(rule: OnDelete) -> Self {
        match rule {
            OnDelete::Cascade => ForeignKeyAction::Cascade,
            OnDelete::SetNull => ForeignKeyAction::SetNull,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForeignKeyRule {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    pub references: &'static str,
    pub on_delete: OnDelete,
}

impl ForeignKeyRule {
    /// Set-null columns must accept NULL.
    pub fn nullable(&self) -> bool {
        self.on_delete == OnDelete::SetNull
    }
}

pub const FOREIGN_KEYS: &[ForeignKeyRule] = &[
    ForeignKeyRule {
        name: "fk_blog_post_author_id",
        table: "blog_post",
        column: "author_id",
        references: "auth_user",
        on_delete: OnDelete::Cascade,
    },
    ForeignKeyRule {
        name: "fk_blog_post_location_id",
        table: "blog_post",
        column: "location_id",
        references: "blog_location",
        on_delete: OnDelete::SetNull,
    },
    ForeignKeyRule {
        name: "fk_blog_post_category_id",
        table: "blog_post",
        column: "category_id",
        references: "blog_category",
        on_delete: OnDelete::SetNull,
    },
    ForeignKeyRule {
        name: "fk_blog_comment_post_id",
        table: "blog_comment",
        column: "post_id",
        references: "blog_post",
        on_delete: OnDelete::Cascade,
    },
    ForeignKeyRule {
        name: "fk_blog_comment_author_id",
        table: "blog_comment",
        column: "author_id",
        references: "auth_user",
        on_delete: OnDelete::Cascade,
    },
];

pub fn foreign_keys_of(table: &str) -> impl Iterator<Item = &'static ForeignKeyRule> + '_ {
    FOREIGN_KEYS.iter().filter(move |rule| rule.table == table)
}

#[cfg(test)]
mod tests {
    use sea_orm::RelationTrait;

    use super::*;
    use crate::entities::{comment, post};

    fn rule_for(table: &str, column: &str) -> &'static ForeignKeyRule {
        FOREIGN_KEYS
            .iter()
            .find(|rule| rule.table == table && rule.column == column)
            .unwrap_or_else(|| panic!("no rule for {table}.{column}"))
    }

    fn same_action(a: Option<ForeignKeyAction>, b: ForeignKeyAction) -> bool {
        matches!(
            (a, b),
            (Some(ForeignKeyAction::Cascade), ForeignKeyAction::Cascade)
                | (Some(ForeignKeyAction::SetNull), ForeignKeyAction::SetNull)
        )
    }

    #[test]
    fn relations_agree_with_rules() {
        let cases = [
            (post::Relation::Author.def(), "blog_post", "author_id"),
            (post::Relation::Location.def(), "blog_post", "location_id"),
            (post::Relation::Category.def(), "blog_post", "category_id"),
            (comment::Relation::Post.def(), "blog_comment", "post_id"),
            (comment::Relation::Author.def(), "blog_comment", "author_id"),
        ];
        assert_eq!(FOREIGN_KEYS.len(), cases.len());
        for (def, table, column) in cases {
            let rule = rule_for(table, column);
            assert!(
                same_action(def.on_delete, rule.on_delete.into()),
                "{table}.{column} disagrees with its relation"
            );
        }
    }

    #[test]
    fn only_optional_references_set_null() {
        let nullable: Vec<_> = FOREIGN_KEYS
            .iter()
            .filter(|rule| rule.nullable())
            .map(|rule| (rule.table, rule.column))
            .collect();
        assert_eq!(
            nullable,
            [("blog_post", "location_id"), ("blog_post", "category_id")]
        );
        assert!(foreign_keys_of("blog_comment").all(|rule| rule.on_delete == OnDelete::Cascade));
    }
}
