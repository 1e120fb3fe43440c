//! Classification of raw provider records.
//!
//! The provider mixes post metadata, the caption and viewer comments in one
//! flat list with no record type. Every record is classified exactly once
//! here; nothing past this module touches `serde_json::Value`.

use serde_json::{Map, Value};

use crate::types::{Comment, UNKNOWN_USERNAME};

/// Boolean markers the provider sets on some records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RecordFlags {
    pub(crate) is_caption: bool,
    pub(crate) is_post_author: bool,
    pub(crate) is_verified: bool,
}

/// Username fields of a record or of a `postData` sub-object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct OwnerFields {
    /// Flat `ownerUsername`.
    pub(crate) owner_username: Option<String>,
    /// Nested `owner.username`.
    pub(crate) nested_username: Option<String>,
}

impl OwnerFields {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            owner_username: non_empty_str(obj, "ownerUsername"),
            nested_username: obj
                .get("owner")
                .and_then(Value::as_object)
                .and_then(|owner| non_empty_str(owner, "username")),
        }
    }

    /// `ownerUsername`, falling back to `owner.username`.
    pub(crate) fn username(&self) -> Option<&str> {
        self.owner_username
            .as_deref()
            .or(self.nested_username.as_deref())
    }
}

/// State of a record's `postData` (or `postInfo`) key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum PostData {
    #[default]
    Absent,
    /// Key present, value empty or not an object.
    Unusable,
    Owner(OwnerFields),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordKind {
    /// The post's own description. Never a comment, whatever fields it has.
    Caption,
    Comment(Comment),
    /// Carries a `postData`/`postInfo` object and no comment text.
    PostMetadata,
    /// Neither a comment nor metadata: non-object items, records without text.
    Unrecognized,
}

/// A provider record reduced to the fields extraction cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProviderRecord {
    pub(crate) kind: RecordKind,
    pub(crate) flags: RecordFlags,
    pub(crate) owner: OwnerFields,
    pub(crate) post_data: PostData,
}

impl ProviderRecord {
    pub(crate) fn classify(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self {
                kind: RecordKind::Unrecognized,
                flags: RecordFlags::default(),
                owner: OwnerFields::default(),
                post_data: PostData::Absent,
            };
        };

        let flags = RecordFlags {
            is_caption: flag(obj, "isCaption"),
            is_post_author: flag(obj, "isPostAuthor"),
            is_verified: flag(obj, "isVerified"),
        };

        // `postData` shadows `postInfo` whenever the key is present, even if
        // its value turns out to be unusable.
        let post_data = match obj.get("postData").or_else(|| obj.get("postInfo")) {
            None => PostData::Absent,
            Some(value) => value
                .as_object()
                .filter(|inner| !inner.is_empty())
                .map_or(PostData::Unusable, |inner| {
                    PostData::Owner(OwnerFields::from_object(inner))
                }),
        };

        let kind = if flags.is_caption {
            RecordKind::Caption
        } else if let Some(comment) = comment_from(obj) {
            RecordKind::Comment(comment)
        } else if matches!(post_data, PostData::Owner(_)) {
            RecordKind::PostMetadata
        } else {
            RecordKind::Unrecognized
        };

        Self {
            kind,
            flags,
            owner: OwnerFields::from_object(obj),
            post_data,
        }
    }
}

/// Reads a comment, preferring `text` over `commentText`.
fn comment_from(obj: &Map<String, Value>) -> Option<Comment> {
    let text = non_empty_str(obj, "text").or_else(|| non_empty_str(obj, "commentText"))?;
    let username = non_empty_str(obj, "ownerUsername")
        .or_else(|| non_empty_str(obj, "username"))
        .unwrap_or_else(|| UNKNOWN_USERNAME.to_owned());
    Some(Comment { username, text })
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn non_empty_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
