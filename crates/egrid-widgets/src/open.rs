#![forbid(unsafe_code)]

//! Double-click (and Enter) open dispatch.
//!
//! The selection is split into buckets and exactly one action runs, for the
//! first non-empty bucket in priority order:
//!
//! | Bucket | Action |
//! |--------|--------|
//! | files | open with the host, or show the quick preview |
//! | directories | navigate into the first one |
//! | locations | navigate to the first location's root |
//! | non-indexed | navigate into a directory, or open files with the host |
//! | labels | search by the first label |
//!
//! Peers never open. Objects contribute each of their file paths.

use crate::collection::ItemCollection;
use crate::context::{ExplorerContext, QuickPreview};
use crate::error::PlatformError;
use crate::item::{ExplorerItem, FilePathItem, LabelItem, LocationItem, NonIndexedPathItem};
use crate::notification_queue::Toast;
use crate::selection::SelectionModel;

use web_time::Instant;

/// What double-clicking a file does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum OpenOnDoubleClick {
    #[default]
    OpenFile,
    QuickPreview,
}

/// Where the explorer should navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// An indexed location, at `path` relative to its root.
    Location { id: i32, path: String },
    /// A non-indexed directory, by absolute path.
    Ephemeral { path: String },
    /// Search results for a label.
    LabelSearch { label_id: i32 },
}

/// Host services the dispatcher calls into.
pub trait ExplorerHost {
    fn navigate(&mut self, target: NavigationTarget);

    /// Open indexed file paths with their default applications.
    fn open_file_paths(&mut self, ids: &[i32]) -> Result<(), PlatformError>;

    /// Open non-indexed files by absolute path.
    fn open_ephemeral_files(&mut self, paths: &[String]) -> Result<(), PlatformError>;
}

/// Result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Nothing opened: empty selection, only peers, or a directory-bound
    /// preview request.
    Nothing,
    OpenedFiles(Vec<i32>),
    OpenedEphemeral(Vec<String>),
    QuickPreview { index: Option<usize> },
    Navigated(NavigationTarget),
    /// The host call failed; the error was queued as a toast.
    Failed(PlatformError),
}

/// Selection split by open action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenBuckets {
    pub files: Vec<FilePathItem>,
    pub directories: Vec<FilePathItem>,
    pub locations: Vec<LocationItem>,
    pub non_indexed: Vec<NonIndexedPathItem>,
    pub labels: Vec<LabelItem>,
}

impl OpenBuckets {
    /// Split `selection` in display order, with `clicked` (if selected)
    /// moved to the front of its bucket.
    #[must_use]
    pub fn partition(selection: &SelectionModel, items: &ItemCollection, clicked: Option<&ExplorerItem>) -> Self {
        let clicked_id = clicked.map(ExplorerItem::id).filter(|id| selection.has(id));
        let mut ordered: Vec<(usize, &ExplorerItem)> = selection
            .items()
            .map(|item| {
                let id = item.id();
                let rank = if Some(&id) == clicked_id.as_ref() {
                    0
                } else {
                    items.index_of(&id).map_or(usize::MAX, |i| i + 1)
                };
                (rank, item)
            })
            .collect();
        ordered.sort_by(|(a, x), (b, y)| a.cmp(b).then_with(|| x.id().cmp(&y.id())));

        let mut buckets = Self::default();
        for (_, item) in ordered {
            buckets.push(item);
        }
        buckets
    }

    fn push(&mut self, item: &ExplorerItem) {
        match item {
            ExplorerItem::Path { item, .. } => self.push_path(item),
            ExplorerItem::Object { item, .. } => {
                for path in &item.file_paths {
                    self.push_path(path);
                }
            }
            ExplorerItem::Location { item } => self.locations.push(item.clone()),
            ExplorerItem::NonIndexedPath { item, .. } => self.non_indexed.push(item.clone()),
            ExplorerItem::Label { item, .. } => self.labels.push(item.clone()),
            ExplorerItem::Peer { .. } => {}
        }
    }

    fn push_path(&mut self, path: &FilePathItem) {
        if path.is_dir {
            self.directories.push(path.clone());
        } else {
            self.files.push(path.clone());
        }
    }
}

/// Runs the open action for the current selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenDispatcher {
    mode: OpenOnDoubleClick,
}

impl OpenDispatcher {
    #[must_use]
    pub const fn new(mode: OpenOnDoubleClick) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> OpenOnDoubleClick {
        self.mode
    }

    pub fn set_mode(&mut self, mode: OpenOnDoubleClick) {
        self.mode = mode;
    }

    /// Open the selection. `clicked` is the double-clicked item and its grid
    /// index, if the pointer was over one.
    ///
    /// Host failures are queued on the context as error toasts and reported
    /// as [`OpenOutcome::Failed`]; the selection is never touched.
    pub fn dispatch(
        &self,
        clicked: Option<(usize, &ExplorerItem)>,
        selection: &SelectionModel,
        items: &ItemCollection,
        host: &mut dyn ExplorerHost,
        ctx: &ExplorerContext,
        now: Instant,
    ) -> OpenOutcome {
        let buckets = OpenBuckets::partition(selection, items, clicked.map(|(_, item)| item));
        let outcome = self.run(&buckets, clicked, host);
        tracing::debug!(
            message = "open.dispatch",
            files = buckets.files.len(),
            directories = buckets.directories.len(),
            locations = buckets.locations.len(),
            non_indexed = buckets.non_indexed.len(),
            labels = buckets.labels.len(),
            outcome = ?outcome,
        );

        match &outcome {
            OpenOutcome::QuickPreview { index } => {
                ctx.quick_preview.set(QuickPreview {
                    open: true,
                    index: *index,
                });
            }
            OpenOutcome::Failed(err) => {
                tracing::warn!(message = "open.failed", error = %err);
                ctx.toast(Toast::error("Failed to open file", err.message()), now);
            }
            _ => {}
        }
        outcome
    }

    fn run(
        &self,
        buckets: &OpenBuckets,
        clicked: Option<(usize, &ExplorerItem)>,
        host: &mut dyn ExplorerHost,
    ) -> OpenOutcome {
        if !buckets.files.is_empty() {
            return match self.mode {
                OpenOnDoubleClick::OpenFile => {
                    let ids: Vec<i32> = buckets.files.iter().map(|f| f.id).collect();
                    match host.open_file_paths(&ids) {
                        Ok(()) => OpenOutcome::OpenedFiles(ids),
                        Err(err) => OpenOutcome::Failed(err),
                    }
                }
                OpenOnDoubleClick::QuickPreview => match clicked {
                    Some((_, item)) if item.is_dir() || matches!(item, ExplorerItem::Location { .. }) => {
                        OpenOutcome::Nothing
                    }
                    _ => OpenOutcome::QuickPreview {
                        index: clicked.map(|(index, _)| index),
                    },
                },
            };
        }

        if let Some(dir) = buckets.directories.first() {
            let Some(id) = dir.location_id else {
                tracing::warn!(message = "open.no_location", file_path = dir.id);
                return OpenOutcome::Nothing;
            };
            return navigate(
                host,
                NavigationTarget::Location {
                    id,
                    path: dir.directory_path(),
                },
            );
        }

        if let Some(location) = buckets.locations.first() {
            return navigate(
                host,
                NavigationTarget::Location {
                    id: location.id,
                    path: "/".to_owned(),
                },
            );
        }

        if let Some(first) = buckets.non_indexed.first() {
            if first.is_dir {
                return navigate(
                    host,
                    NavigationTarget::Ephemeral {
                        path: first.path.clone(),
                    },
                );
            }
            let paths: Vec<String> = buckets
                .non_indexed
                .iter()
                .filter(|p| !p.is_dir)
                .map(|p| p.path.clone())
                .collect();
            return match host.open_ephemeral_files(&paths) {
                Ok(()) => OpenOutcome::OpenedEphemeral(paths),
                Err(err) => OpenOutcome::Failed(err),
            };
        }

        if let Some(label) = buckets.labels.first() {
            return navigate(host, NavigationTarget::LabelSearch { label_id: label.id });
        }

        OpenOutcome::Nothing
    }
}

fn navigate(host: &mut dyn ExplorerHost, target: NavigationTarget) -> OpenOutcome {
    host.navigate(target.clone());
    OpenOutcome::Navigated(target)
}
