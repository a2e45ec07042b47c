//! Broadcast messages and the filters receivers subscribe with.

use wedge_core::{Command, WireContainer};

/// A broadcast message: an action, optional categories and typed extras.
#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub action: String,
    pub categories: Vec<String>,
    pub extras: WireContainer,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            categories: Vec::new(),
            extras: WireContainer::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn with_extras(mut self, extras: WireContainer) -> Self {
        self.extras = extras;
        self
    }
}

impl From<Command> for Intent {
    fn from(command: Command) -> Self {
        Intent::new(command.action).with_extras(command.extras)
    }
}

/// The actions and categories a receiver accepts.
///
/// An intent matches when its action is one of the filter's actions and each
/// of its categories is listed in the filter.  An intent without categories
/// passes the category check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentFilter {
    actions: Vec<String>,
    categories: Vec<String>,
}

impl IntentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(mut self, action: impl Into<String>) -> Self {
        let action = action.into();
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }

    pub fn add_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn matches(&self, intent: &Intent) -> bool {
        self.actions.iter().any(|a| *a == intent.action)
            && intent
                .categories
                .iter()
                .all(|c| self.categories.contains(c))
    }
}
