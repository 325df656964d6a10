//! Domain model for a list with at most one selected item.

/// An immutable list of items where at most one value is marked as selected.
///
/// The selected value is stored by value rather than by position. Whenever it is present it
/// is equal to at least one entry of the list, and every entry equal to it counts as
/// selected when the list is rendered or mapped. Every operation consumes the selection and
/// returns a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection<T> {
    items: Vec<T>,
    selected: Option<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
        }
    }
}

impl<T> Selection<T> {
    /// Wrap `items` verbatim with nothing selected.
    pub fn from_list(items: Vec<T>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Access the items in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The currently selected value, if any.
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Discard the selection state and return the underlying items.
    pub fn into_list(self) -> Vec<T> {
        self.items
    }

    /// Clone the underlying items, ignoring the selection.
    pub fn to_list(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    /// Clear the selection. The items are left untouched.
    pub fn deselect(self) -> Self {
        Self {
            items: self.items,
            selected: None,
        }
    }

    /// Select the first item matching `predicate`.
    ///
    /// When nothing matches the selection is returned unchanged, so a previous valid
    /// selection survives a failed lookup.
    pub fn select_by<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
        T: Clone,
    {
        let found = self.items.iter().find(|item| predicate(item)).cloned();
        match found {
            Some(value) => Self {
                items: self.items,
                selected: Some(value),
            },
            None => {
                tracing::trace!(
                    items = self.items.len(),
                    "no item matched; keeping previous selection"
                );
                self
            }
        }
    }

    /// Apply `f` to every item and to the selected value.
    pub fn map<U, F>(self, mut f: F) -> Selection<U>
    where
        F: FnMut(T) -> U,
    {
        let items = self.items.into_iter().map(&mut f).collect();
        let selected = self.selected.map(f);
        Selection { items, selected }
    }
}

impl<T: PartialEq> Selection<T> {
    /// Returns whether `item` is equal to the selected value.
    pub fn is_selected(&self, item: &T) -> bool {
        self.selected.as_ref().is_some_and(|selected| selected == item)
    }

    /// Iterate over the items paired with their selected flag.
    ///
    /// Every item equal to the selected value is flagged, including duplicates.
    pub fn iter_with_selected(&self) -> impl Iterator<Item = (&T, bool)> + '_ {
        self.items.iter().map(|item| (item, self.is_selected(item)))
    }

    /// Clone the items paired with their selected flag.
    pub fn to_list_with_selected(&self) -> Vec<(T, bool)>
    where
        T: Clone,
    {
        self.iter_with_selected()
            .map(|(item, flag)| (item.clone(), flag))
            .collect()
    }

    /// Consume the selection, pairing each item with its selected flag.
    pub fn into_list_with_selected(self) -> Vec<(T, bool)> {
        let Self { items, selected } = self;
        items
            .into_iter()
            .map(|item| {
                let flag = selected.as_ref().is_some_and(|value| *value == item);
                (item, flag)
            })
            .collect()
    }

    /// Select the first item equal to `target`. Missing targets leave the selection as is.
    pub fn select(self, target: &T) -> Self
    where
        T: Clone,
    {
        self.select_by(|item| item == target)
    }

    /// Map selected and unselected items with separate functions.
    ///
    /// `selected` is applied to the selected value and to every item equal to it; `rest`
    /// is applied to all other items. Passing the same function twice is equivalent to
    /// [`Selection::map`].
    pub fn map_selected<U, S, R>(self, mut selected: S, mut rest: R) -> Selection<U>
    where
        S: FnMut(T) -> U,
        R: FnMut(T) -> U,
    {
        let Self {
            items,
            selected: current,
        } = self;

        let items = items
            .into_iter()
            .map(|item| {
                if current.as_ref().is_some_and(|value| *value == item) {
                    selected(item)
                } else {
                    rest(item)
                }
            })
            .collect();

        Selection {
            items,
            selected: current.map(selected),
        }
    }

    /// Keep the items matching `predicate`, in order.
    ///
    /// The selected value stays selected only if it matches as well; otherwise the result
    /// is unselected.
    pub fn filter<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
        T: Clone,
    {
        let Self { items, selected } = self;
        let kept: Vec<T> = items.into_iter().filter(|item| predicate(item)).collect();
        let filtered = Self::from_list(kept);

        match selected {
            Some(value) if predicate(&value) => filtered.select(&value),
            Some(_) => {
                tracing::trace!(
                    items = filtered.len(),
                    "selected item filtered out; clearing selection"
                );
                filtered
            }
            None => filtered,
        }
    }
}

impl<T> From<Vec<T>> for Selection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_list(items)
    }
}

impl<T> From<Selection<T>> for Vec<T> {
    fn from(selection: Selection<T>) -> Self {
        selection.into_list()
    }
}

impl<T> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_list(iter.into_iter().collect())
    }
}
