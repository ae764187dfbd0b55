// meta.rs
//! Human-readable labels consumed by admin and form tooling.

/// Label and optional help text of a single column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: &'static str,
    pub verbose_name: &'static str,
    pub help_text: Option<&'static str>,
}

impl FieldMeta {
    pub const fn new(name: &'static str, verbose_name: &'static str) -> Self {
        Self {
            name,
            verbose_name,
            help_text: None,
        }
    }

    pub const fn with_help(mut self, help_text: &'static str) -> Self {
        self.help_text = Some(help_text);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ordering {
    Asc(&'static str),
    Desc(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelMeta {
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub ordering: &'static [Ordering],
    pub fields: &'static [FieldMeta],
}

impl ModelMeta {
    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Falls back to the column name for fields without a label.
    pub fn label(&self, name: &'static str) -> &'static str {
        self.field(name).map_or(name, |field| field.verbose_name)
    }
}

/// Implemented by every entity that renders in the admin.
pub trait Described {
    const META: ModelMeta;
}
