//! Example parcel collection desk for demonstrating step chains.
//!
//! The desk keeps checked-in parcels behind interior mutability so the
//! closures of one chain can share it by reference.

use std::cell::RefCell;

use thiserror::Error;

/// Errors raised by the desk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeskError {
    /// A parcel with the same label is already on the shelf.
    #[error("parcel {0} is already checked in")]
    Duplicate(String),
    /// No parcel with the label is on the shelf.
    #[error("no parcel labelled {0}")]
    Unknown(String),
    /// The shelf has no free slot.
    #[error("the shelf is full ({0} parcels)")]
    Full(usize),
}

/// A counter holding parcels until they are collected.
///
/// # Examples
///
/// ```
/// use parcel_desk::ParcelDesk;
///
/// let desk = ParcelDesk::with_capacity(2);
/// desk.check_in("A-1")?;
/// assert_eq!(desk.len(), 1);
/// assert_eq!(desk.collect("A-1")?, "A-1");
/// assert!(desk.is_empty());
/// # Ok::<(), parcel_desk::DeskError>(())
/// ```
#[derive(Debug, Default)]
pub struct ParcelDesk {
    capacity: usize,
    shelf: RefCell<Vec<String>>,
}

impl ParcelDesk {
    /// Creates an empty desk with room for `capacity` parcels.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            shelf: RefCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Number of parcels on the shelf.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shelf.borrow().len()
    }

    /// Returns `true` when no parcel is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shelf.borrow().is_empty()
    }

    /// Returns `true` when a parcel with `label` is waiting.
    #[must_use]
    pub fn holds(&self, label: &str) -> bool {
        self.shelf.borrow().iter().any(|held| held == label)
    }

    /// Puts a parcel on the shelf.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Duplicate`] when the label is already shelved and
    /// [`DeskError::Full`] when there is no room left.
    pub fn check_in(&self, label: &str) -> Result<(), DeskError> {
        if self.holds(label) {
            return Err(DeskError::Duplicate(label.to_owned()));
        }
        let mut shelf = self.shelf.borrow_mut();
        if shelf.len() >= self.capacity {
            return Err(DeskError::Full(self.capacity));
        }
        shelf.push(label.to_owned());
        Ok(())
    }

    /// Hands a parcel over, removing it from the shelf.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Unknown`] when no parcel carries `label`.
    pub fn collect(&self, label: &str) -> Result<String, DeskError> {
        let mut shelf = self.shelf.borrow_mut();
        let position = shelf
            .iter()
            .position(|held| held == label)
            .ok_or_else(|| DeskError::Unknown(label.to_owned()))?;
        Ok(shelf.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::{DeskError, ParcelDesk};
    use rstest::{fixture, rstest};

    #[fixture]
    fn desk() -> ParcelDesk {
        ParcelDesk::with_capacity(2)
    }

    #[rstest]
    fn rejects_duplicates(desk: ParcelDesk) {
        assert_eq!(desk.check_in("A-1"), Ok(()));
        assert_eq!(
            desk.check_in("A-1"),
            Err(DeskError::Duplicate("A-1".into()))
        );
    }

    #[rstest]
    fn rejects_parcels_beyond_capacity(desk: ParcelDesk) {
        assert_eq!(desk.check_in("A-1"), Ok(()));
        assert_eq!(desk.check_in("A-2"), Ok(()));
        assert_eq!(desk.check_in("A-3"), Err(DeskError::Full(2)));
    }

    #[rstest]
    fn collecting_unknown_parcel_fails(desk: ParcelDesk) {
        assert_eq!(desk.collect("Z-9"), Err(DeskError::Unknown("Z-9".into())));
    }
}
