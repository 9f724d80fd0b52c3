//! Reconciles a blog's ordered media list against a client edit.
//!
//! Pure list logic: callers hand in paths that are already allocated for the
//! new uploads and get back the final list plus the file-level diff. Nothing
//! here touches the database or the disk.

use std::collections::HashSet;

use crate::core::error::AppError;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MediaEditError {
    #[error("The number of replacement files ({files}) must match the number of indices ({indices})")]
    CountMismatch { files: usize, indices: usize },

    #[error("Invalid media index: {index} (blog has {len} media)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Media index {0} is listed more than once")]
    DuplicateIndex(i64),
}

impl From<MediaEditError> for AppError {
    fn from(e: MediaEditError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Edit instructions for one update request
#[derive(Debug, Clone, Default)]
pub struct MediaEdit {
    /// Paths allocated for the replacement uploads, paired with `replace_indices`
    pub replacements: Vec<String>,
    pub replace_indices: Vec<i64>,
    pub remove_indices: Vec<i64>,
    /// Paths allocated for uploads pushed to the end of the list
    pub appended: Vec<String>,
    pub main_media_index: Option<i64>,
}

impl MediaEdit {
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
            && self.replace_indices.is_empty()
            && self.remove_indices.is_empty()
            && self.appended.is_empty()
    }
}

/// Result of applying a [`MediaEdit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPlan {
    pub medias: Vec<String>,
    pub main_media: Option<String>,
    /// Previously stored files that are no longer referenced
    pub removed: Vec<String>,
    /// New uploads that made it into the final list and must be written
    pub uploads_to_write: Vec<String>,
}

/// Choose the primary media among freshly uploaded paths.
///
/// An in-range `index` wins, anything else falls back to the first upload.
pub fn select_main_media(uploads: &[String], index: Option<i64>) -> Option<String> {
    index
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| uploads.get(i))
        .or_else(|| uploads.first())
        .cloned()
}

fn check_index(index: i64, len: usize) -> Result<usize, MediaEditError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(MediaEditError::IndexOutOfRange { index, len })
}

/// Apply replace, remove and append in that order.
///
/// Every instruction is validated before anything changes, so an error means
/// the blog keeps its current media.
pub fn plan(
    current: &[String],
    current_main: Option<&str>,
    edit: &MediaEdit,
) -> Result<MediaPlan, MediaEditError> {
    let mut medias = current.to_vec();
    let mut main_media = current_main.map(str::to_string);

    // replace by index
    if edit.replacements.len() != edit.replace_indices.len() {
        return Err(MediaEditError::CountMismatch {
            files: edit.replacements.len(),
            indices: edit.replace_indices.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut slots = Vec::with_capacity(edit.replace_indices.len());
    for &index in &edit.replace_indices {
        let slot = check_index(index, medias.len())?;
        if !seen.insert(slot) {
            return Err(MediaEditError::DuplicateIndex(index));
        }
        slots.push(slot);
    }

    for (slot, new_path) in slots.into_iter().zip(&edit.replacements) {
        if main_media.as_deref() == Some(medias[slot].as_str()) {
            main_media = Some(new_path.clone());
        }
        medias[slot] = new_path.clone();
    }

    // remove by index, highest first so lower indices stay valid
    let mut to_remove = Vec::with_capacity(edit.remove_indices.len());
    for &index in &edit.remove_indices {
        to_remove.push(check_index(index, medias.len())?);
    }
    to_remove.sort_unstable_by(|a, b| b.cmp(a));
    to_remove.dedup();

    for slot in to_remove {
        medias.remove(slot);
    }

    // append
    medias.extend(edit.appended.iter().cloned());

    let explicit_main = if edit.appended.is_empty() {
        None
    } else {
        edit.main_media_index
            .and_then(|_| select_main_media(&edit.appended, edit.main_media_index))
    };

    let main_media = explicit_main.or_else(|| match main_media {
        Some(path) if medias.contains(&path) => Some(path),
        _ => medias.first().cloned(),
    });

    let removed = current
        .iter()
        .filter(|path| !medias.contains(path))
        .cloned()
        .collect();

    let uploads_to_write = edit
        .replacements
        .iter()
        .chain(&edit.appended)
        .filter(|path| medias.contains(path))
        .cloned()
        .collect();

    Ok(MediaPlan {
        medias,
        main_media,
        removed,
        uploads_to_write,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| format!("uploads/blog/{}", n)).collect()
    }

    #[test]
    fn test_remove_is_independent_of_listed_order() {
        let current = paths(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
        let edit = MediaEdit {
            remove_indices: vec![3, 0, 2],
            ..Default::default()
        };

        let plan = plan(&current, None, &edit).unwrap();

        assert_eq!(plan.medias, paths(&["b.jpg"]));
        assert_eq!(plan.removed, paths(&["a.jpg", "c.jpg", "d.jpg"]));
        assert!(plan.uploads_to_write.is_empty());
    }

    #[test]
    fn test_remove_ignores_repeated_indices() {
        let current = paths(&["a.jpg", "b.jpg", "c.jpg"]);
        let edit = MediaEdit {
            remove_indices: vec![1, 1],
            ..Default::default()
        };

        let plan = plan(&current, None, &edit).unwrap();
        assert_eq!(plan.medias, paths(&["a.jpg", "c.jpg"]));
    }

    #[test]
    fn test_replace_count_mismatch_is_rejected() {
        let current = paths(&["a.jpg", "b.jpg"]);
        let edit = MediaEdit {
            replacements: paths(&["new1.jpg", "new2.jpg"]),
            replace_indices: vec![0],
            ..Default::default()
        };

        assert_eq!(
            plan(&current, None, &edit),
            Err(MediaEditError::CountMismatch {
                files: 2,
                indices: 1
            })
        );
    }

    #[test]
    fn test_out_of_range_and_duplicate_indices_are_rejected() {
        let current = paths(&["a.jpg", "b.jpg"]);

        let out_of_range = MediaEdit {
            replacements: paths(&["new.jpg"]),
            replace_indices: vec![2],
            ..Default::default()
        };
        assert!(matches!(
            plan(&current, None, &out_of_range),
            Err(MediaEditError::IndexOutOfRange { index: 2, len: 2 })
        ));

        let negative = MediaEdit {
            remove_indices: vec![-1],
            ..Default::default()
        };
        assert!(plan(&current, None, &negative).is_err());

        let duplicate = MediaEdit {
            replacements: paths(&["x.jpg", "y.jpg"]),
            replace_indices: vec![1, 1],
            ..Default::default()
        };
        assert_eq!(
            plan(&current, None, &duplicate),
            Err(MediaEditError::DuplicateIndex(1))
        );
    }

    #[test]
    fn test_replace_moves_main_media_with_its_slot() {
        let current = paths(&["a.jpg", "b.jpg"]);
        let edit = MediaEdit {
            replacements: paths(&["new.png"]),
            replace_indices: vec![1],
            ..Default::default()
        };

        let plan = plan(&current, Some("uploads/blog/b.jpg"), &edit).unwrap();

        assert_eq!(plan.medias, paths(&["a.jpg", "new.png"]));
        assert_eq!(plan.main_media.as_deref(), Some("uploads/blog/new.png"));
        assert_eq!(plan.removed, paths(&["b.jpg"]));
        assert_eq!(plan.uploads_to_write, paths(&["new.png"]));
    }

    #[test]
    fn test_removed_main_media_falls_back_to_first() {
        let current = paths(&["a.jpg", "b.jpg", "c.jpg"]);
        let edit = MediaEdit {
            remove_indices: vec![0],
            ..Default::default()
        };

        let plan = plan(&current, Some("uploads/blog/a.jpg"), &edit).unwrap();
        assert_eq!(plan.main_media.as_deref(), Some("uploads/blog/b.jpg"));

        let edit = MediaEdit {
            remove_indices: vec![0, 1, 2],
            ..Default::default()
        };
        let plan = super::plan(&current, Some("uploads/blog/a.jpg"), &edit).unwrap();
        assert!(plan.medias.is_empty());
        assert_eq!(plan.main_media, None);
    }

    #[test]
    fn test_main_media_index_applies_to_appended_uploads() {
        let current = paths(&["a.jpg"]);
        let edit = MediaEdit {
            appended: paths(&["n1.jpg", "n2.jpg"]),
            main_media_index: Some(1),
            ..Default::default()
        };

        let plan = plan(&current, Some("uploads/blog/a.jpg"), &edit).unwrap();
        assert_eq!(plan.medias, paths(&["a.jpg", "n1.jpg", "n2.jpg"]));
        assert_eq!(plan.main_media.as_deref(), Some("uploads/blog/n2.jpg"));

        let out_of_range = MediaEdit {
            appended: paths(&["n1.jpg"]),
            main_media_index: Some(7),
            ..Default::default()
        };
        let plan = super::plan(&current, Some("uploads/blog/a.jpg"), &out_of_range).unwrap();
        assert_eq!(plan.main_media.as_deref(), Some("uploads/blog/n1.jpg"));
    }

    #[test]
    fn test_append_without_index_keeps_existing_main_media() {
        let current = paths(&["a.jpg"]);
        let edit = MediaEdit {
            appended: paths(&["n1.jpg"]),
            ..Default::default()
        };

        let plan = plan(&current, Some("uploads/blog/a.jpg"), &edit).unwrap();
        assert_eq!(plan.main_media.as_deref(), Some("uploads/blog/a.jpg"));

        let plan = super::plan(&[], None, &edit).unwrap();
        assert_eq!(plan.main_media.as_deref(), Some("uploads/blog/n1.jpg"));
    }

    #[test]
    fn test_replaced_then_removed_upload_is_not_written() {
        let current = paths(&["a.jpg", "b.jpg"]);
        let edit = MediaEdit {
            replacements: paths(&["new.jpg"]),
            replace_indices: vec![0],
            remove_indices: vec![0],
            ..Default::default()
        };

        let plan = plan(&current, None, &edit).unwrap();

        assert_eq!(plan.medias, paths(&["b.jpg"]));
        assert!(plan.uploads_to_write.is_empty());
        assert_eq!(plan.removed, paths(&["a.jpg"]));
    }

    #[test]
    fn test_select_main_media() {
        let uploads = paths(&["a.jpg", "b.jpg"]);

        assert_eq!(
            select_main_media(&uploads, Some(1)).as_deref(),
            Some("uploads/blog/b.jpg")
        );
        assert_eq!(
            select_main_media(&uploads, Some(5)).as_deref(),
            Some("uploads/blog/a.jpg")
        );
        assert_eq!(
            select_main_media(&uploads, Some(-1)).as_deref(),
            Some("uploads/blog/a.jpg")
        );
        assert_eq!(
            select_main_media(&uploads, None).as_deref(),
            Some("uploads/blog/a.jpg")
        );
        assert_eq!(select_main_media(&[], Some(0)), None);
    }
}
