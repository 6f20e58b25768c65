// Widget Form
// State of the "Add Widget" side panel

use super::model::{Category, Widget};

/// Input field that currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Category,
    Name,
    Text,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Category => FormField::Name,
            FormField::Name => FormField::Text,
            FormField::Text => FormField::Category,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::Category => FormField::Text,
            FormField::Name => FormField::Category,
            FormField::Text => FormField::Name,
        }
    }
}

/// Draft of a new widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetForm {
    pub category_id: Option<String>,
    pub name: String,
    pub text: String,
    pub field: FormField,
}

impl WidgetForm {
    /// Open the form, optionally with a category already chosen
    pub fn new(category_id: Option<String>) -> Self {
        let field = if category_id.is_some() {
            FormField::Name
        } else {
            FormField::Category
        };

        Self {
            category_id,
            name: String::new(),
            text: String::new(),
            field,
        }
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.previous();
    }

    /// Type a character into the focused text field
    pub fn input(&mut self, c: char) {
        match self.field {
            FormField::Name => self.name.push(c),
            FormField::Text => self.text.push(c),
            FormField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Text => {
                self.text.pop();
            }
            FormField::Category => self.category_id = None,
        }
    }

    /// Step the category selection through `categories`
    ///
    /// Stepping past either end returns to "no category".
    pub fn cycle_category(&mut self, categories: &[Category], forward: bool) {
        if categories.is_empty() {
            self.category_id = None;
            return;
        }

        let current = self
            .category_id
            .as_deref()
            .and_then(|id| categories.iter().position(|c| c.id == id));

        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(categories.len() - 1),
            (Some(i), true) if i + 1 < categories.len() => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            (Some(_), _) => None,
        };

        self.category_id = next.map(|i| categories[i].id.clone());
    }

    /// Name of the selected category, if it still exists
    pub fn category_name<'a>(&self, categories: &'a [Category]) -> Option<&'a str> {
        let id = self.category_id.as_deref()?;
        categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Whether the form passes its presence checks: a category is chosen
    /// and both name and text are non-empty
    pub fn is_complete(&self) -> bool {
        self.category_id.is_some() && !self.name.is_empty() && !self.text.is_empty()
    }

    /// Build the widget to submit, allocating a fresh id
    pub fn build(&self) -> Option<(String, Widget)> {
        if !self.is_complete() {
            return None;
        }
        let category_id = self.category_id.clone()?;

        Some((category_id, Widget::new(self.name.clone(), self.text.clone())))
    }

    /// Clear the entered name and text
    pub fn clear(&mut self) {
        self.name.clear();
        self.text.clear();
    }
}
