//! Bidirectional value/index tables for choice widgets.
//!
//! Sliders and combo boxes work on indices; viewers work on values. A
//! [`ChoiceMap`] holds an ordered list of values and converts both ways, and
//! the [`Choice`] trait does the same for small ordinal enums.

/// An ordinal enum usable in choice widgets.
pub trait Choice: Copy + PartialEq + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Display label of this variant.
    fn label(self) -> &'static str;

    /// Position of this variant in [`Choice::ALL`].
    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|variant| *variant == self)
            .unwrap_or(0)
    }

    /// Variant at `index`, if any.
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Looks a variant up by its label.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|variant| variant.label() == label)
    }
}

/// Ordered list of values with value → index lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceMap<T> {
    values: Vec<T>,
    labels: Vec<String>,
}

impl<T: PartialEq + ToString> ChoiceMap<T> {
    /// Builds a map over `values`, labelling each with its `Display` text.
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        let labels = values.iter().map(ToString::to_string).collect();
        Self { values, labels }
    }
}

impl<T: PartialEq> ChoiceMap<T> {
    /// Builds a map with explicit labels.
    ///
    /// # Panics
    /// Panics if `values` and `labels` differ in length.
    pub fn with_labels(values: Vec<T>, labels: Vec<String>) -> Self {
        assert_eq!(
            values.len(),
            labels.len(),
            "ChoiceMap needs one label per value"
        );
        Self { values, labels }
    }

    /// Index of `value`, if present.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Value at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Label at `index`, if any.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// All labels in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// All values in order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<C: Choice> From<&[C]> for ChoiceMap<C> {
    fn from(variants: &[C]) -> Self {
        Self {
            values: variants.to_vec(),
            labels: variants.iter().map(|v| v.label().to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Animal {
        Cat,
        Dog,
        Bunny,
    }

    impl Choice for Animal {
        const ALL: &'static [Self] = &[Animal::Cat, Animal::Dog, Animal::Bunny];

        fn label(self) -> &'static str {
            match self {
                Animal::Cat => "cat",
                Animal::Dog => "dog",
                Animal::Bunny => "bunny",
            }
        }
    }

    #[test]
    fn test_list_map_resolutions() {
        let map = ChoiceMap::new((0..12).map(|i| 1u32 << i));
        assert_eq!(map.len(), 12);
        assert_eq!(map.index_of(&32), Some(5));
        assert_eq!(map.get(5), Some(&32));
        assert_eq!(map.label(11), Some("2048"));
        assert_eq!(map.index_of(&33), None);
    }

    #[test]
    fn test_enum_choice() {
        assert_eq!(Animal::Bunny.index(), 2);
        assert_eq!(Animal::from_index(1), Some(Animal::Dog));
        assert_eq!(Animal::from_index(3), None);
        assert_eq!(Animal::from_label("cat"), Some(Animal::Cat));

        let map = ChoiceMap::from(Animal::ALL);
        assert_eq!(map.labels(), ["cat", "dog", "bunny"]);
        assert_eq!(map.index_of(&Animal::Dog), Some(1));
    }

    #[test]
    #[should_panic(expected = "one label per value")]
    fn test_with_labels_length_mismatch() {
        let _ = ChoiceMap::with_labels(vec![1, 2], vec!["one".to_string()]);
    }
}
