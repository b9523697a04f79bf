// selection.rs - Current category / point-of-interest selection and its subscribers

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::catalog::Category;
use crate::error_handling::{NavigatorError, Result};

/// What the user has picked. `path` only means something when `category`
/// is set; it is not checked against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub category: Option<Category>,
    pub path: Option<String>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn category(category: Category) -> Self {
        Self { category: Some(category), path: None }
    }

    pub fn path(category: Category, name: impl Into<String>) -> Self {
        Self { category: Some(category), path: Some(name.into()) }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.path.is_none()
    }
}

/// Cloneable handle given to whatever UI component needs to read or change
/// the selection.
///
/// Mutations publish on a watch channel: every [`SelectionListener`] sees
/// the latest value on its next poll, and values overwritten before a poll
/// are never observed.
#[derive(Clone)]
pub struct SelectionHandle {
    tx: Arc<watch::Sender<Selection>>,
}

impl SelectionHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Selection::none());
        Self { tx: Arc::new(tx) }
    }

    /// Select a category and drop any selected path.
    ///
    /// Returns true when the selection changed.
    pub fn select_category(&self, category: Category) -> bool {
        let changed = self.tx.send_if_modified(|s| {
            let next = Selection::category(category);
            if *s == next {
                return false;
            }
            *s = next;
            true
        });
        if changed {
            log::info!("selected category {category}");
        }
        changed
    }

    /// Select a point of interest within the current category.
    pub fn select_path(&self, name: impl Into<String>) -> Result<bool> {
        let name = name.into();
        let mut rejected = false;
        let changed = self.tx.send_if_modified(|s| {
            if s.category.is_none() {
                rejected = true;
                return false;
            }
            if s.path.as_deref() == Some(name.as_str()) {
                return false;
            }
            s.path = Some(name.clone());
            true
        });

        if rejected {
            log::warn!("ignored path {name:?}: no category selected");
            return Err(NavigatorError::NoCategorySelected);
        }
        if changed {
            log::info!("selected path {name:?}");
        }
        Ok(changed)
    }

    pub fn clear(&self) -> bool {
        let changed = self.tx.send_if_modified(|s| {
            if s.is_empty() {
                return false;
            }
            *s = Selection::none();
            true
        });
        if changed {
            log::info!("selection cleared");
        }
        changed
    }

    /// Synchronous read of the latest value
    pub fn current(&self) -> Selection {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> SelectionListener {
        SelectionListener { rx: self.tx.subscribe() }
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SelectionHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of the selection channel
pub struct SelectionListener {
    rx: watch::Receiver<Selection>,
}

impl SelectionListener {
    /// Latest selection if it changed since the previous poll
    pub fn poll(&mut self) -> Option<Selection> {
        match self.rx.has_changed() {
            Ok(true) => Some(self.rx.borrow_and_update().clone()),
            _ => None,
        }
    }
}
