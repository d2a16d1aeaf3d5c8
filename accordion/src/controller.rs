use crate::state::{AccordionState, PanelChange, Transition};
use crate::view::{MaxHeight, PanelView};

/// Owns the open set for a group of panels and drives their visual state
/// through the [`PanelView`] seam.
///
/// Opening animates from zero height: the content is revealed at height
/// zero, layout is flushed, and the open markers plus natural height land
/// on the next animation frame. An interactive close zeroes the height
/// immediately but hides the content only once its opacity transition
/// completes, and only if the panel is still marked closed by then.
pub struct AccordionController<V: PanelView> {
    views: Vec<V>,
    state: AccordionState,
}

impl<V: PanelView> AccordionController<V> {
    pub fn new(views: Vec<V>, allow_multiple: bool) -> Self {
        let state = AccordionState::new(views.len(), allow_multiple);
        Self { views, state }
    }

    /// Applies the initial reconciliation for panels the markup already
    /// marks expanded. Closes on this path hide synchronously; nothing
    /// was animating yet.
    pub fn init(&mut self, marked: &[usize]) {
        let changes = self.state.reconcile_initial(marked);
        self.apply(&changes, true);
    }

    pub fn toggle(&mut self, index: usize) {
        let changes = self.state.toggle(index);
        self.apply(&changes, false);
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.state.is_open(index)
    }

    pub fn open_indices(&self) -> Vec<usize> {
        self.state.open_indices()
    }

    pub fn panel_count(&self) -> usize {
        self.views.len()
    }

    pub fn focus_prev(&self, current: usize) {
        self.focus(self.state.prev(current));
    }

    pub fn focus_next(&self, current: usize) {
        self.focus(self.state.next(current));
    }

    pub fn focus_first(&self) {
        self.focus(self.state.first());
    }

    pub fn focus_last(&self) {
        self.focus(self.state.last());
    }

    fn focus(&self, index: Option<usize>) {
        if let Some(view) = index.and_then(|index| self.views.get(index)) {
            view.focus_trigger();
        }
    }

    fn apply(&self, changes: &[PanelChange], during_init: bool) {
        for change in changes {
            let Some(view) = self.views.get(change.index) else {
                continue;
            };
            match change.transition {
                Transition::Open => self.open_panel(view, during_init),
                Transition::Close => self.close_panel(view, during_init),
            }
        }
    }

    fn open_panel(&self, view: &V, during_init: bool) {
        view.set_hidden(false);
        if during_init {
            view.set_open_markers(true);
            view.set_max_height(MaxHeight::Natural);
            return;
        }

        // Start from zero height with layout flushed, so the browser has
        // something to animate from on the next frame.
        view.set_max_height(MaxHeight::Zero);
        view.force_reflow();
        let deferred = view.clone();
        view.defer_to_next_frame(Box::new(move || {
            deferred.set_open_markers(true);
            deferred.set_max_height(MaxHeight::Natural);
        }));
    }

    fn close_panel(&self, view: &V, during_init: bool) {
        view.set_open_markers(false);
        view.set_max_height(MaxHeight::Zero);
        if during_init {
            view.set_hidden(true);
            return;
        }

        let deferred = view.clone();
        view.defer_until_opacity_end(Box::new(move || {
            if deferred.is_marked_closed() {
                deferred.set_hidden(true);
            }
        }));
    }
}
