//! The document root the theme is applied onto.
//!
//! The service drives two attributes on a single root element: the inline
//! `style` attribute carrying the full custom-property block, and the `class`
//! attribute carrying the variant name. Both writes are full overwrites, so
//! the root element must not be shared with other style writers.

use std::sync::Mutex;

/// A document root element with writable `style` and `class` attributes.
///
/// Implementations are synchronous; applying a theme is a plain attribute
/// write, not an I/O operation.
pub trait DocumentRoot: Send + Sync {
    /// Overwrites the root element's inline style attribute.
    fn set_style_attribute(&self, style: &str);

    /// Overwrites the root element's class attribute.
    fn set_class_attribute(&self, class: &str);
}

/// A [`DocumentRoot`] that records every write, for tests and headless use.
#[derive(Default)]
pub struct RecordingDocument {
    inner: Mutex<RecordingState>,
}

#[derive(Default)]
struct RecordingState {
    style: String,
    class: String,
    style_history: Vec<String>,
    class_history: Vec<String>,
}

impl RecordingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value of the style attribute.
    pub fn style(&self) -> String {
        self.inner.lock().unwrap().style.clone()
    }

    /// The current value of the class attribute.
    pub fn class(&self) -> String {
        self.inner.lock().unwrap().class.clone()
    }

    /// Every style value ever written, oldest first.
    pub fn style_history(&self) -> Vec<String> {
        self.inner.lock().unwrap().style_history.clone()
    }

    /// Every class value ever written, oldest first.
    pub fn class_history(&self) -> Vec<String> {
        self.inner.lock().unwrap().class_history.clone()
    }
}

impl DocumentRoot for RecordingDocument {
    fn set_style_attribute(&self, style: &str) {
        let mut state = self.inner.lock().unwrap();
        state.style = style.to_string();
        state.style_history.push(style.to_string());
    }

    fn set_class_attribute(&self, class: &str) {
        let mut state = self.inner.lock().unwrap();
        state.class = class.to_string();
        state.class_history.push(class.to_string());
    }
}
