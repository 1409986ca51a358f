// crates/regionpick-core/src/options.rs

//! # Selectable Options
//!
//! The picker talks to its two dropdowns only through [`SelectableOptions`].
//! The browser crate backs it with `<select>` elements; [`MemorySelect`] backs
//! it with plain memory for tests and command-line use.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// One entry of a dropdown. Placeholders carry an empty `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new(String::new(), label)
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Callback fired after the user changes the selection.
pub type ChangeHandler = Box<dyn FnMut()>;

pub trait SelectableOptions {
    /// `false` when the control does not exist in the current document.
    fn is_attached(&self) -> bool;

    /// Replaces every option. The option flagged `selected` becomes the
    /// current value; with none flagged, the first option does.
    fn render(&mut self, options: &[SelectOption]);

    /// Current value, `None` when detached or empty.
    fn selected(&self) -> Option<String>;

    /// Programmatic selection. Does not fire change handlers.
    fn select(&mut self, value: &str) -> bool;

    /// Subscribes to user-driven selection changes.
    fn on_change(&mut self, handler: ChangeHandler);
}

#[derive(Default)]
struct SelectState {
    attached: bool,
    options: Vec<SelectOption>,
    selected: Option<usize>,
    handlers: Vec<ChangeHandler>,
    renders: usize,
}

/// In-memory dropdown.
///
/// Clones share state, so a test can keep a handle after moving the control
/// into a picker and drive it like a user would with [`MemorySelect::choose`].
#[derive(Clone)]
pub struct MemorySelect {
    state: Rc<RefCell<SelectState>>,
}

impl Default for MemorySelect {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySelect {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SelectState {
                attached: true,
                ..SelectState::default()
            })),
        }
    }

    /// A control that is missing from the document.
    pub fn detached() -> Self {
        Self {
            state: Rc::new(RefCell::new(SelectState::default())),
        }
    }

    pub fn options(&self) -> Vec<SelectOption> {
        self.state.borrow().options.clone()
    }

    pub fn values(&self) -> Vec<String> {
        self.state
            .borrow()
            .options
            .iter()
            .map(|o| o.value.clone())
            .collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.state
            .borrow()
            .options
            .iter()
            .map(|o| o.label.clone())
            .collect()
    }

    /// Number of `render` calls so far.
    pub fn render_count(&self) -> usize {
        self.state.borrow().renders
    }

    /// Simulates a user picking `value`, then fires change handlers.
    pub fn choose(&self, value: &str) -> bool {
        let mut handlers = {
            let mut state = self.state.borrow_mut();
            let Some(idx) = state.options.iter().position(|o| o.value == value) else {
                return false;
            };
            state.selected = Some(idx);
            std::mem::take(&mut state.handlers)
        };

        // Handlers may read this control again, so no borrow is held here.
        for handler in handlers.iter_mut() {
            handler();
        }

        let mut state = self.state.borrow_mut();
        handlers.append(&mut state.handlers);
        state.handlers = handlers;
        true
    }
}

impl SelectableOptions for MemorySelect {
    fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    fn render(&mut self, options: &[SelectOption]) {
        let mut state = self.state.borrow_mut();
        if !state.attached {
            return;
        }
        state.options = options.to_vec();
        state.selected = match options.iter().position(|o| o.selected) {
            Some(idx) => Some(idx),
            None if options.is_empty() => None,
            None => Some(0),
        };
        state.renders += 1;
    }

    fn selected(&self) -> Option<String> {
        let state = self.state.borrow();
        if !state.attached {
            return None;
        }
        state
            .selected
            .and_then(|idx| state.options.get(idx))
            .map(|o| o.value.clone())
    }

    fn select(&mut self, value: &str) -> bool {
        let mut state = self.state.borrow_mut();
        match state.options.iter().position(|o| o.value == value) {
            Some(idx) => {
                state.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    fn on_change(&mut self, handler: ChangeHandler) {
        self.state.borrow_mut().handlers.push(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn render_selects_flagged_or_first() {
        let mut select = MemorySelect::new();
        select.render(&[
            SelectOption::placeholder("--"),
            SelectOption::new("a", "A"),
        ]);
        assert_eq!(select.selected().as_deref(), Some(""));

        select.render(&[
            SelectOption::placeholder("--"),
            SelectOption::new("a", "A").selected(true),
        ]);
        assert_eq!(select.selected().as_deref(), Some("a"));
        assert_eq!(select.render_count(), 2);
    }

    #[test]
    fn detached_control_ignores_everything() {
        let mut select = MemorySelect::detached();
        select.render(&[SelectOption::new("a", "A")]);
        assert!(!select.is_attached());
        assert!(select.options().is_empty());
        assert_eq!(select.selected(), None);
        assert_eq!(select.render_count(), 0);
    }

    #[test]
    fn choose_fires_handlers_but_select_does_not() {
        let fired = Rc::new(Cell::new(0));
        let mut select = MemorySelect::new();
        select.render(&[SelectOption::new("a", "A"), SelectOption::new("b", "B")]);

        let counter = Rc::clone(&fired);
        select.on_change(Box::new(move || counter.set(counter.get() + 1)));

        assert!(select.select("b"));
        assert_eq!(fired.get(), 0);

        assert!(select.choose("a"));
        assert_eq!(fired.get(), 1);
        assert_eq!(select.selected().as_deref(), Some("a"));

        assert!(!select.choose("missing"));
        assert_eq!(fired.get(), 1);
    }
}
