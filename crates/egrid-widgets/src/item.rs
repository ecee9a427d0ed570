#![forbid(unsafe_code)]

//! Explorer item model.
//!
//! An [`ExplorerItem`] is one cell of the grid: an indexed file path, an
//! object with its file paths, a location, an ephemeral (non-indexed) path, a
//! nearby peer, or a label. Every item has a stable [`ItemId`] of the form
//! `"<Kind>:<key>"`.

use std::fmt;

/// Stable identity of an item within a collection.
///
/// The id stays the same across re-renders for as long as the underlying
/// entity is unchanged, so it is safe to keep in a selection while pages are
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Build an id from its kind prefix and key.
    #[must_use]
    pub fn new(kind: ItemKind, key: impl fmt::Display) -> Self {
        Self(format!("{}:{key}", kind.prefix()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Discriminant of [`ExplorerItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Path,
    Object,
    Location,
    NonIndexedPath,
    Peer,
    Label,
}

impl ItemKind {
    /// The prefix used in [`ItemId`]s.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Path => "FilePath",
            Self::Object => "Object",
            Self::Location => "Location",
            Self::NonIndexedPath => "NonIndexedPath",
            Self::Peer => "SpacedropPeer",
            Self::Label => "Label",
        }
    }
}

/// Opaque key the host uses to fetch a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbnailKey(pub String);

/// An indexed file path row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilePathItem {
    pub id: i32,
    pub location_id: Option<i32>,
    /// Directory containing the entry, with leading and trailing slash.
    pub materialized_path: String,
    pub name: String,
    pub extension: String,
    pub is_dir: bool,
    pub object_id: Option<i32>,
    pub size_in_bytes: u64,
}

impl FilePathItem {
    /// Path of this entry as a directory, relative to its location root:
    /// `<materialized_path><name>/`.
    #[must_use]
    pub fn directory_path(&self) -> String {
        format!("{}{}/", self.materialized_path, self.name)
    }
}

/// An object row with the file paths that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectItem {
    pub id: i32,
    pub kind: i32,
    pub file_paths: Vec<FilePathItem>,
}

/// A location row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationItem {
    pub id: i32,
    pub name: String,
    pub path: String,
}

/// A filesystem entry that is not indexed (ephemeral browsing).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NonIndexedPathItem {
    /// Absolute path; also the identity key.
    pub path: String,
    pub name: String,
    pub extension: String,
    pub is_dir: bool,
    pub hidden: bool,
    pub size_in_bytes: u64,
}

/// A nearby peer reachable for file transfer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeerItem {
    /// Display name; also the identity key.
    pub name: String,
    pub device_model: Option<String>,
}

/// A user label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelItem {
    pub id: i32,
    /// Label name; also the identity key.
    pub name: String,
}

/// Maximum number of preview thumbnails carried by a label.
pub const LABEL_THUMBNAILS_MAX: usize = 4;

/// One cell of the explorer grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerItem {
    Path {
        thumbnail: Option<ThumbnailKey>,
        item: FilePathItem,
    },
    Object {
        thumbnail: Option<ThumbnailKey>,
        item: ObjectItem,
    },
    Location {
        item: LocationItem,
    },
    NonIndexedPath {
        thumbnail: Option<ThumbnailKey>,
        item: NonIndexedPathItem,
    },
    Peer {
        item: PeerItem,
    },
    Label {
        thumbnails: Vec<ThumbnailKey>,
        item: LabelItem,
    },
}

impl ExplorerItem {
    /// Plain file path item without thumbnail.
    #[must_use]
    pub fn path(item: FilePathItem) -> Self {
        Self::Path { thumbnail: None, item }
    }

    /// Plain object item without thumbnail.
    #[must_use]
    pub fn object(item: ObjectItem) -> Self {
        Self::Object { thumbnail: None, item }
    }

    /// Plain location item.
    #[must_use]
    pub fn location(item: LocationItem) -> Self {
        Self::Location { item }
    }

    /// Plain non-indexed item without thumbnail.
    #[must_use]
    pub fn non_indexed(item: NonIndexedPathItem) -> Self {
        Self::NonIndexedPath { thumbnail: None, item }
    }

    /// Plain peer item.
    #[must_use]
    pub fn peer(item: PeerItem) -> Self {
        Self::Peer { item }
    }

    /// Label item; thumbnails beyond [`LABEL_THUMBNAILS_MAX`] are dropped.
    #[must_use]
    pub fn label(item: LabelItem, mut thumbnails: Vec<ThumbnailKey>) -> Self {
        thumbnails.truncate(LABEL_THUMBNAILS_MAX);
        Self::Label { thumbnails, item }
    }

    /// Variant discriminant.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Path { .. } => ItemKind::Path,
            Self::Object { .. } => ItemKind::Object,
            Self::Location { .. } => ItemKind::Location,
            Self::NonIndexedPath { .. } => ItemKind::NonIndexedPath,
            Self::Peer { .. } => ItemKind::Peer,
            Self::Label { .. } => ItemKind::Label,
        }
    }

    /// Stable identity: `"<Kind>:<key>"`.
    #[must_use]
    pub fn id(&self) -> ItemId {
        let kind = self.kind();
        match self {
            Self::Path { item, .. } => ItemId::new(kind, item.id),
            Self::Object { item, .. } => ItemId::new(kind, item.id),
            Self::Location { item } => ItemId::new(kind, item.id),
            Self::NonIndexedPath { item, .. } => ItemId::new(kind, &item.path),
            Self::Peer { item } => ItemId::new(kind, &item.name),
            Self::Label { item, .. } => ItemId::new(kind, &item.name),
        }
    }

    /// Display name, empty for objects.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Path { item, .. } => &item.name,
            Self::Location { item } => &item.name,
            Self::NonIndexedPath { item, .. } => &item.name,
            Self::Peer { item } => &item.name,
            Self::Label { item, .. } => &item.name,
            Self::Object { .. } => "",
        }
    }

    /// Whether the item is a directory-like entry.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        match self {
            Self::Path { item, .. } => item.is_dir,
            Self::NonIndexedPath { item, .. } => item.is_dir,
            _ => false,
        }
    }

    /// Size in bytes, zero where not applicable.
    #[must_use]
    pub fn size_in_bytes(&self) -> u64 {
        match self {
            Self::Path { item, .. } => item.size_in_bytes,
            Self::NonIndexedPath { item, .. } => item.size_in_bytes,
            _ => 0,
        }
    }
}
