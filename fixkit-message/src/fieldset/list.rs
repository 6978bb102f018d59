/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

use super::FieldSet;
use fixkit_core::error::FieldSetError;
use fixkit_core::field::Field;
use smallvec::SmallVec;

/// Field set backed by an ordered vector.
///
/// Tags may repeat, which is what repeating groups need. Lookups are linear
/// and [`FieldSet::get`] returns the first match; use [`FieldSet::get_all`]
/// to read every occurrence of a repeated tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFieldSet {
    fields: SmallVec<[Field; 16]>,
}

impl ListFieldSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fields as a slice, in insertion order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Field] {
        &self.fields
    }

    /// Appends a field. Never fails.
    #[inline]
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }
}

impl FieldSet for ListFieldSet {
    fn get(&self, tag: u32) -> Result<&Field, FieldSetError> {
        self.fields
            .iter()
            .find(|f| f.tag_number() == tag)
            .ok_or(FieldSetError::TagNotFound { tag })
    }

    fn get_all(&self, tag: u32) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.tag_number() == tag).collect()
    }

    fn insert(&mut self, field: Field) -> Result<(), FieldSetError> {
        self.push(field);
        Ok(())
    }

    fn update(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.tag() == field.tag()) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    fn remove(&mut self, tag: u32) -> Result<Field, FieldSetError> {
        let first = self
            .fields
            .iter()
            .position(|f| f.tag_number() == tag)
            .ok_or(FieldSetError::TagNotFound { tag })?;
        let removed = self.fields.remove(first);
        self.fields.retain(|f| f.tag_number() != tag);
        Ok(removed)
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn clear(&mut self) {
        self.fields.clear();
    }

    fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }
}

impl FromIterator<Field> for ListFieldSet {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_fields() -> ListFieldSet {
        [
            Field::new(35, "W"),
            Field::new(268, 2u64),
            Field::new(269, '0'),
            Field::new(270, "100.5"),
            Field::new(269, '1'),
            Field::new(270, "101.0"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_insert_keeps_duplicates_in_order() {
        let mut set = ListFieldSet::new();
        set.insert(Field::new(269, '0')).unwrap();
        set.insert(Field::new(269, '1')).unwrap();

        assert_eq!(set.len(), 2);
        let values: Vec<&str> = set.iter().map(|f| f.as_str().unwrap()).collect();
        assert_eq!(values, vec!["0", "1"]);
    }

    #[test]
    fn test_get_returns_first_match() {
        let set = group_fields();
        assert_eq!(set.get(270).unwrap().as_str().unwrap(), "100.5");
    }

    #[test]
    fn test_get_all_returns_every_occurrence() {
        let set = group_fields();
        let prices: Vec<&str> = set
            .get_all(270)
            .into_iter()
            .map(|f| f.as_str().unwrap())
            .collect();
        assert_eq!(prices, vec!["100.5", "101.0"]);
        assert!(set.get_all(999).is_empty());
    }

    #[test]
    fn test_update_replaces_first_only() {
        let mut set = group_fields();
        set.update(Field::new(269, '2'));

        let types: Vec<&str> = set
            .get_all(269)
            .into_iter()
            .map(|f| f.as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["2", "1"]);
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_remove_drops_all_occurrences() {
        let mut set = group_fields();
        let removed = set.remove(269).unwrap();

        assert_eq!(removed.as_str().unwrap(), "0");
        assert!(!set.contains(269));
        assert_eq!(set.len(), 4);
        assert!(matches!(
            set.remove(269),
            Err(FieldSetError::TagNotFound { tag: 269 })
        ));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a: ListFieldSet = [Field::new(35, "D"), Field::new(34, 1u64)]
            .into_iter()
            .collect();
        let b: ListFieldSet = [Field::new(34, 1u64), Field::new(35, "D")]
            .into_iter()
            .collect();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = group_fields();
        let mut copy = original.clone();
        copy.update(Field::new(35, "X"));
        copy.push(Field::new(58, "note"));

        assert_eq!(original.get(35).unwrap().as_str().unwrap(), "W");
        assert!(!original.contains(58));
    }
}
