// Data Model
// Categories and widgets as exchanged with the category API

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Last id handed out by [`next_widget_id`]
static LAST_WIDGET_ID: AtomicU64 = AtomicU64::new(0);

/// A named display card with text content
///
/// The id is assigned by the client when the widget is created and never
/// changes afterwards. There is no update operation; widgets are only added
/// and deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub text: String,
}

impl Widget {
    /// Create a widget with a freshly generated id
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_id(next_widget_id(), name, text)
    }

    /// Create a widget with a caller-chosen id
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A named group of widgets, identified by a server-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    /// Server-defined order, preserved as received
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, widgets: Vec<Widget>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            widgets,
        }
    }

    /// Widget list with `widget` appended
    pub fn widgets_with(&self, widget: Widget) -> Vec<Widget> {
        let mut widgets = self.widgets.clone();
        widgets.push(widget);
        widgets
    }

    /// Widget list with the first entry matching `widget_id` removed
    pub fn widgets_without(&self, widget_id: &str) -> Vec<Widget> {
        let mut widgets = self.widgets.clone();
        if let Some(pos) = widgets.iter().position(|w| w.id == widget_id) {
            widgets.remove(pos);
        }
        widgets
    }
}

/// Generate a time-derived widget id
///
/// Milliseconds since the Unix epoch, bumped so ids handed out by this
/// process are strictly increasing even within the same millisecond.
pub fn next_widget_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut last = LAST_WIDGET_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_WIDGET_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate.to_string(),
            Err(actual) => last = actual,
        }
    }
}

/// Accept ids serialized either as JSON strings or as JSON numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
