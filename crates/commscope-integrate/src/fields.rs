//! Field-mapping tables from collector columns to the canonical schema.
//!
//! Every canonical field has an ordered list of candidate columns and a
//! literal default. Candidates are tried left to right and the first present
//! value wins, so supporting a new collector column is a one-line table edit.

use commscope_core::{Platform, RawRecord};

/// Text field: first present candidate, else `default`.
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub keys: &'static [&'static str],
    pub default: &'static str,
}

impl TextField {
    #[must_use]
    pub fn resolve(&self, record: &RawRecord) -> String {
        self.lookup(record).unwrap_or_else(|| self.default.to_string())
    }

    /// First present candidate, without the default.
    #[must_use]
    pub fn lookup(&self, record: &RawRecord) -> Option<String> {
        self.keys.iter().find_map(|key| record.text(key))
    }
}

/// Numeric field: first candidate readable as a number, else `default`.
#[derive(Debug, Clone, Copy)]
pub struct NumberField {
    pub keys: &'static [&'static str],
    pub default: f64,
}

impl NumberField {
    #[must_use]
    pub fn resolve(&self, record: &RawRecord) -> f64 {
        self.keys
            .iter()
            .find_map(|key| record.number(key))
            .unwrap_or(self.default)
    }
}

/// How `is_public` is derived from a collector's columns.
#[derive(Debug, Clone, Copy)]
pub enum PublicRule {
    /// Public when the flag is true.
    Flag {
        keys: &'static [&'static str],
        default: bool,
    },
    /// Public when the flag is false (e.g. `over18`, `is_private`).
    Negated {
        keys: &'static [&'static str],
        default: bool,
    },
    /// Public when the text equals `expected` exactly.
    Equals {
        field: TextField,
        expected: &'static str,
    },
}

impl PublicRule {
    #[must_use]
    pub fn resolve(&self, record: &RawRecord) -> bool {
        let flag = |keys: &[&str], default: bool| {
            keys.iter()
                .find_map(|key| record.flag(key))
                .unwrap_or(default)
        };
        match self {
            PublicRule::Flag { keys, default } => flag(*keys, *default),
            PublicRule::Negated { keys, default } => !flag(*keys, *default),
            PublicRule::Equals { field, expected } => field.resolve(record) == *expected,
        }
    }
}

/// How `source_url` is built.
#[derive(Debug, Clone, Copy)]
pub enum UrlRule {
    /// `prefix` followed by the resolved handle.
    Template { prefix: &'static str, handle: TextField },
    /// Taken verbatim from a column.
    Column(TextField),
}

impl UrlRule {
    #[must_use]
    pub fn resolve(&self, record: &RawRecord) -> String {
        match self {
            UrlRule::Template { prefix, handle } => format!("{prefix}{}", handle.resolve(record)),
            UrlRule::Column(field) => field.resolve(record),
        }
    }
}

/// Complete mapping for one platform.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    pub native_id: TextField,
    pub name: TextField,
    pub description: TextField,
    pub member_count: NumberField,
    pub creation_date: &'static [&'static str],
    pub category: TextField,
    pub is_public: PublicRule,
    pub location: TextField,
    pub post_frequency: NumberField,
    pub related_topics: TextField,
    pub source_url: UrlRule,
}

const fn text(keys: &'static [&'static str], default: &'static str) -> TextField {
    TextField { keys, default }
}

const fn number(keys: &'static [&'static str]) -> NumberField {
    NumberField { keys, default: 0.0 }
}

const GLOBAL: TextField = text(&[], "Global");

pub const REDDIT_FIELDS: FieldMap = FieldMap {
    native_id: text(&["subreddit_id", "id"], "unknown"),
    name: text(&["display_name", "subreddit"], "Unknown Reddit Community"),
    description: text(&["public_description", "description"], ""),
    member_count: number(&["subscribers"]),
    creation_date: &["created_utc"],
    category: text(&["category"], "General"),
    is_public: PublicRule::Negated {
        keys: &["over18"],
        default: false,
    },
    location: GLOBAL,
    post_frequency: number(&["posts_per_day"]),
    related_topics: text(&["related_topics", "keywords"], ""),
    source_url: UrlRule::Template {
        prefix: "https://www.reddit.com/r/",
        handle: text(&["display_name", "subreddit"], "unknown"),
    },
};

pub const DISCORD_FIELDS: FieldMap = FieldMap {
    native_id: text(&["server_id", "id"], "unknown"),
    name: text(&["server_name", "name"], "Unknown Discord Server"),
    description: text(&["description"], ""),
    member_count: number(&["member_count"]),
    creation_date: &["created_at"],
    category: text(&["category", "primary_topic"], "General"),
    is_public: PublicRule::Flag {
        keys: &["is_public"],
        default: true,
    },
    location: GLOBAL,
    post_frequency: number(&["messages_per_day"]),
    related_topics: text(&["related_topics", "tags"], ""),
    source_url: UrlRule::Column(text(&["invite_url"], "")),
};

pub const INSTAGRAM_FIELDS: FieldMap = FieldMap {
    native_id: text(&["profile_id", "id"], "unknown"),
    name: text(&["username", "handle"], "Unknown Instagram Community"),
    description: text(&["biography", "bio"], ""),
    member_count: number(&["followers"]),
    creation_date: &["created_at"],
    category: text(&["category"], "General"),
    // Profiles whose privacy was never collected are assumed private.
    is_public: PublicRule::Negated {
        keys: &["is_private"],
        default: true,
    },
    location: text(&["location"], "Global"),
    post_frequency: number(&["posts_per_day"]),
    related_topics: text(&["hashtags", "tags"], ""),
    source_url: UrlRule::Template {
        prefix: "https://www.instagram.com/",
        handle: text(&["username", "handle"], "unknown"),
    },
};

pub const FACEBOOK_FIELDS: FieldMap = FieldMap {
    native_id: text(&["group_id", "id"], "unknown"),
    name: text(&["name"], "Unknown Facebook Group"),
    description: text(&["description"], ""),
    member_count: number(&["member_count"]),
    creation_date: &["creation_date"],
    category: text(&["category"], "General"),
    is_public: PublicRule::Equals {
        field: text(&["privacy"], "Closed"),
        expected: "Public",
    },
    location: text(&["location"], "Global"),
    post_frequency: number(&["post_frequency"]),
    related_topics: text(&["related_keywords"], ""),
    source_url: UrlRule::Template {
        prefix: "https://www.facebook.com/groups/",
        handle: text(&["group_id"], "unknown"),
    },
};

#[must_use]
pub fn field_map(platform: Platform) -> &'static FieldMap {
    match platform {
        Platform::Reddit => &REDDIT_FIELDS,
        Platform::Discord => &DISCORD_FIELDS,
        Platform::Instagram => &INSTAGRAM_FIELDS,
        Platform::Facebook => &FACEBOOK_FIELDS,
    }
}
