#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a click combines with the existing selection.
pub enum SelectMode {
    /// Make the clicked layer the only selection.
    Replace,
    /// Add the clicked layer, or remove it if already selected.
    Toggle,
    /// Extend from the most recently selected layer to the clicked one.
    Range,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Ordered set of selected layer ids.
///
/// Ids keep the order they were selected in, not timeline order; the last id
/// is the anchor for range selection.
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids, oldest first.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of selected layers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|held| held == id)
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Make `id` the only selected layer.
    pub fn select_sole(&mut self, id: &str) {
        self.ids = vec![id.to_owned()];
    }

    /// Apply a click on `id` under `mode`. `order` is the visible row order
    /// of the layer list and is only consulted for range selection.
    pub fn apply(&mut self, id: &str, mode: SelectMode, order: &[String]) {
        match mode {
            SelectMode::Replace => self.select_sole(id),
            SelectMode::Toggle => {
                if self.contains(id) {
                    self.ids.retain(|held| held != id);
                } else {
                    self.ids.push(id.to_owned());
                }
            }
            SelectMode::Range => self.extend_range(id, order),
        }
    }

    /// Union the rows between the anchor and `id` into the selection,
    /// keeping first-selected-first order. Falls back to a plain replace
    /// when there is no anchor or either endpoint is not a visible row.
    fn extend_range(&mut self, id: &str, order: &[String]) {
        let Some(anchor) = self.ids.last() else {
            self.select_sole(id);
            return;
        };
        let anchor_at = order.iter().position(|row| row == anchor);
        let target_at = order.iter().position(|row| row == id);
        let (Some(a), Some(b)) = (anchor_at, target_at) else {
            self.select_sole(id);
            return;
        };
        let (lo, hi) = (a.min(b), a.max(b));
        for row in &order[lo..=hi] {
            if !self.contains(row) {
                self.ids.push(row.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/selection.rs"]
mod tests;
