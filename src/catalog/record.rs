//! Field access for records the query engine operates on

use chrono::{DateTime, Utc};

/// Which collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Product,
    Artisan,
}

impl RecordKind {
    /// Sort field used when none (or an unknown one) is requested
    pub fn default_sort_field(&self) -> &'static str {
        match self {
            Self::Product => "createdAt",
            Self::Artisan => "joinedDate",
        }
    }

    /// Fields a caller may sort by
    pub fn sortable_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Product => &[
                "createdAt",
                "price",
                "rating",
                "title",
                "category",
                "location",
                "status",
            ],
            Self::Artisan => &["joinedDate", "rating", "name", "specialty", "location"],
        }
    }

    /// Map a requested sort field onto a sortable field of this kind.
    ///
    /// `createdAt` is the generic date field, so artisans translate it to
    /// `joinedDate`. Anything unrecognised falls back to the default.
    pub fn resolve_sort_field(&self, requested: Option<&str>) -> &'static str {
        let requested = match requested {
            Some(r) => r.trim(),
            None => return self.default_sort_field(),
        };

        if *self == Self::Artisan && requested == "createdAt" {
            return "joinedDate";
        }

        self.sortable_fields()
            .iter()
            .find(|f| **f == requested)
            .copied()
            .unwrap_or_else(|| self.default_sort_field())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Artisan => "artisan",
        }
    }

    /// Capitalised name for user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Artisan => "Artisan",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A borrowed view of one record field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Flag(bool),
    Tags(&'a [String]),
}

/// A product or artisan as seen by the query engine.
///
/// Implementors expose their fields by wire name; `None` means the record has
/// no value for that field.
pub trait Record: Clone + Send + Sync + 'static {
    /// Collection this record type lives in
    const KIND: RecordKind;

    fn id(&self) -> &str;

    /// Replace the identifier (used by repositories on insert)
    fn set_id(&mut self, id: String);

    /// `title` for products, `name` for artisans
    fn headline(&self) -> &str;

    fn description(&self) -> &str;

    /// Free-text labels matched by search
    fn tags(&self) -> &[String];

    /// Resolve a field by name
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}
