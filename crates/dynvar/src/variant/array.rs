// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array operations of [`Variant`].
//!
//! Indices are signed: a negative index counts back from the end
//! (`i + length`). Every access is bounds-checked and fails with
//! `IndexOutOfRange` rather than panicking.

use crate::{Result, Variant, VariantError};

fn resolve(index: isize, length: usize, inclusive_end: bool) -> Result<usize> {
    let signed_len = isize::try_from(length).unwrap_or(isize::MAX);
    let resolved = if index < 0 { index + signed_len } else { index };
    let upper = if inclusive_end { signed_len } else { signed_len - 1 };
    if resolved < 0 || resolved > upper {
        return Err(VariantError::IndexOutOfRange { index, length });
    }
    Ok(resolved as usize)
}

impl Variant {
    pub fn len(&self) -> Result<usize> {
        Ok(self.array_ref("Array::length()")?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.array_ref("Array::length()")?.is_empty())
    }

    /// Copy `value` onto the end of the Array; returns the new length.
    pub fn append(&mut self, value: impl Into<Variant>) -> Result<usize> {
        let items = self.array_mut("Array::append()")?;
        let value: Variant = value.into();
        items.push(value.adopt());
        Ok(items.len())
    }

    /// Element at `index`; negative indices wrap around once.
    pub fn index(&self, index: isize) -> Result<&Variant> {
        let items = self.array_ref("Array::index()")?;
        let at = resolve(index, items.len(), false)?;
        Ok(&items[at])
    }

    pub fn index_mut(&mut self, index: isize) -> Result<&mut Variant> {
        let items = self.array_mut("Array::index()")?;
        let at = resolve(index, items.len(), false)?;
        Ok(&mut items[at])
    }

    /// Insert before `index` (`0..=length`, negative wraps); returns the new
    /// length.
    pub fn insert(&mut self, index: isize, value: impl Into<Variant>) -> Result<usize> {
        let items = self.array_mut("Array::insert()")?;
        let at = resolve(index, items.len(), true)?;
        let value: Variant = value.into();
        items.insert(at, value.adopt());
        Ok(items.len())
    }

    /// Remove and return the element at `index`, shifting the tail down.
    pub fn remove(&mut self, index: isize) -> Result<Variant> {
        let items = self.array_mut("Array::remove()")?;
        let at = resolve(index, items.len(), false)?;
        Ok(items.remove(at))
    }

    /// Overwrite the element at a raw, non-negative `index`.
    ///
    /// The element is assigned in place, so a locked element is not replaced.
    pub fn set(&mut self, index: usize, value: impl Into<Variant>) -> Result<()> {
        let items = self.array_mut("Array::set()")?;
        let length = items.len();
        let slot = items
            .get_mut(index)
            .ok_or(VariantError::IndexOutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                length,
            })?;
        slot.assign(value)?;
        Ok(())
    }

    // Stack / queue sugar

    pub fn push(&mut self, value: impl Into<Variant>) -> Result<usize> {
        self.append(value)
    }

    pub fn pop(&mut self) -> Result<Variant> {
        self.remove(-1)
    }

    pub fn top(&self) -> Result<&Variant> {
        self.index(-1)
    }

    pub fn unshift(&mut self, value: impl Into<Variant>) -> Result<usize> {
        self.insert(0, value)
    }

    pub fn shift(&mut self) -> Result<Variant> {
        self.remove(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    fn sample() -> Variant {
        Variant::array([Variant::number(10), Variant::number(20), Variant::number(30)])
    }

    #[test]
    fn test_negative_index_wraps() {
        let arr = sample();
        assert_eq!(arr.index(-1).unwrap(), arr.index(2).unwrap());
        assert_eq!(arr.index(-3).unwrap().as_number().unwrap(), 10);
    }

    #[test]
    fn test_index_out_of_range() {
        let arr = sample();
        assert!(matches!(
            arr.index(-4),
            Err(VariantError::IndexOutOfRange {
                index: -4,
                length: 3
            })
        ));
        assert!(matches!(
            arr.index(3),
            Err(VariantError::IndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn test_append_copies_value() {
        let mut arr = Variant::empty_array();
        let source = Variant::array([1]);
        assert_eq!(arr.append(&source).unwrap(), 1);
        arr.index_mut(0).unwrap().append(2).unwrap();

        assert_eq!(source.len().unwrap(), 1);
        assert_eq!(arr.index(0).unwrap().len().unwrap(), 2);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut arr = sample();
        assert_eq!(arr.insert(1, 15).unwrap(), 4);
        assert_eq!(arr.insert(4, 40).unwrap(), 5);
        assert_eq!(arr, Variant::array([10, 15, 20, 30, 40]));

        let removed = arr.remove(-2).unwrap();
        assert_eq!(removed.as_number().unwrap(), 30);
        assert_eq!(arr, Variant::array([10, 15, 20, 40]));

        assert!(matches!(
            arr.insert(5, 0),
            Err(VariantError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            arr.remove(4),
            Err(VariantError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_set_honors_element_lock() {
        let mut arr = sample();
        arr.set(0, "first").unwrap();
        assert_eq!(arr.index(0).unwrap().kind(), Kind::String);

        arr.index_mut(1).unwrap().lock().unwrap();
        assert!(matches!(
            arr.set(1, 0),
            Err(VariantError::ConstantViolation { .. })
        ));
        assert!(matches!(
            arr.set(3, 0),
            Err(VariantError::IndexOutOfRange { index: 3, length: 3 })
        ));
    }

    #[test]
    fn test_locked_array_accepts_element_mutation() {
        let mut arr = sample();
        arr.lock().unwrap();
        assert_eq!(arr.append(40).unwrap(), 4);
        assert!(matches!(
            arr.assign(1),
            Err(VariantError::ConstantViolation { .. })
        ));
        assert!(matches!(
            arr.delete(),
            Err(VariantError::ConstantViolation { .. })
        ));
        assert_eq!(arr.len().unwrap(), 4);
    }

    #[test]
    fn test_stack_and_queue_sugar() {
        let mut arr = Variant::empty_array();
        arr.push(1).unwrap();
        arr.push(2).unwrap();
        arr.unshift(0).unwrap();
        assert_eq!(arr.top().unwrap().as_number().unwrap(), 2);

        assert_eq!(arr.pop().unwrap().as_number().unwrap(), 2);
        assert_eq!(arr.shift().unwrap().as_number().unwrap(), 0);
        assert_eq!(arr, Variant::array([1]));

        arr.pop().unwrap();
        assert!(arr.is_empty().unwrap());
        assert!(matches!(
            arr.pop(),
            Err(VariantError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            arr.shift(),
            Err(VariantError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_array_ops_need_array() {
        let mut n = Variant::number(1);
        assert!(matches!(
            n.append(2),
            Err(VariantError::InvalidOperationOnWrongKind { .. })
        ));
        assert!(matches!(
            Variant::undefined().len(),
            Err(VariantError::InvalidOperationOnUndefined { .. })
        ));
    }

    #[test]
    fn test_clean_compacts_undefined_elements() {
        let mut arr = sample();
        arr.index_mut(1).unwrap().delete().unwrap();
        assert_eq!(arr.len().unwrap(), 3);
        arr.clean().unwrap();
        assert_eq!(arr, Variant::array([10, 30]));
    }
}
