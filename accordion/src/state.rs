use std::collections::BTreeSet;

/// Direction of a visual update a panel must receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Open,
    Close,
}

/// One pending visual update, addressed by panel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelChange {
    pub index: usize,
    pub transition: Transition,
}

impl PanelChange {
    pub fn open(index: usize) -> Self {
        Self {
            index,
            transition: Transition::Open,
        }
    }

    pub fn close(index: usize) -> Self {
        Self {
            index,
            transition: Transition::Close,
        }
    }
}

/// Tracks which panels are expanded and decides how the set may change.
///
/// When `allow_multiple` is false the open set never holds more than one
/// index. All methods treat out-of-range indices as no-ops.
#[derive(Debug, Clone)]
pub struct AccordionState {
    open: BTreeSet<usize>,
    len: usize,
    allow_multiple: bool,
}

impl AccordionState {
    pub fn new(len: usize, allow_multiple: bool) -> Self {
        Self {
            open: BTreeSet::new(),
            len,
            allow_multiple,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains(&index)
    }

    pub fn open_indices(&self) -> Vec<usize> {
        self.open.iter().copied().collect()
    }

    /// Reconciles panels found already expanded in the markup.
    ///
    /// Under single-open mode only the first discovered index stays open;
    /// every other panel gets an explicit close so stale markup is
    /// corrected silently. Duplicates and out-of-range indices in `marked`
    /// are ignored.
    pub fn reconcile_initial(&mut self, marked: &[usize]) -> Vec<PanelChange> {
        let mut discovered: Vec<usize> = Vec::new();
        for &index in marked {
            if index < self.len && !discovered.contains(&index) {
                discovered.push(index);
            }
        }
        if !self.allow_multiple {
            discovered.truncate(1);
        }
        self.open = discovered.into_iter().collect();

        (0..self.len)
            .map(|index| {
                if self.open.contains(&index) {
                    PanelChange::open(index)
                } else {
                    PanelChange::close(index)
                }
            })
            .collect()
    }

    /// Toggles one panel, returning the visual updates to apply in order.
    ///
    /// Closes always precede the open so mutual exclusion is settled
    /// before any deferred animation step runs.
    pub fn toggle(&mut self, index: usize) -> Vec<PanelChange> {
        if index >= self.len {
            return Vec::new();
        }
        if self.open.remove(&index) {
            return vec![PanelChange::close(index)];
        }

        let mut changes = Vec::new();
        if !self.allow_multiple {
            for open_index in std::mem::take(&mut self.open) {
                changes.push(PanelChange::close(open_index));
            }
        }
        self.open.insert(index);
        changes.push(PanelChange::open(index));
        changes
    }

    pub fn prev(&self, current: usize) -> Option<usize> {
        if self.len == 0 || current >= self.len {
            return None;
        }
        Some((current + self.len - 1) % self.len)
    }

    pub fn next(&self, current: usize) -> Option<usize> {
        if self.len == 0 || current >= self.len {
            return None;
        }
        Some((current + 1) % self.len)
    }

    pub fn first(&self) -> Option<usize> {
        (self.len > 0).then_some(0)
    }

    pub fn last(&self) -> Option<usize> {
        self.len.checked_sub(1)
    }
}
