// Store Snapshot
// Immutable view of categories plus the flattened widget list

use crate::core::{Category, Widget};

/// Current value of the dashboard data as seen by the renderer
///
/// `all_widgets` is always the concatenation, in category order, of every
/// category's widgets. It is rebuilt whenever a snapshot is constructed, so
/// it can never drift from `categories`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    categories: Vec<Category>,
    all_widgets: Vec<Widget>,
}

impl Snapshot {
    pub fn new(categories: Vec<Category>) -> Self {
        let all_widgets = categories
            .iter()
            .flat_map(|c| c.widgets.iter().cloned())
            .collect();

        Self {
            categories,
            all_widgets,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn all_widgets(&self) -> &[Widget] {
        &self.all_widgets
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn contains_widget(&self, widget_id: &str) -> bool {
        self.all_widgets.iter().any(|w| w.id == widget_id)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Snapshot with the category `category_id` replaced by `updated`
    ///
    /// `updated` is stored under `category_id` whatever id it carries.
    pub fn with_category(&self, category_id: &str, mut updated: Category) -> Self {
        updated.id = category_id.to_string();
        let categories = self
            .categories
            .iter()
            .map(|c| {
                if c.id == category_id {
                    updated.clone()
                } else {
                    c.clone()
                }
            })
            .collect();

        Self::new(categories)
    }
}
