//! Mock DOM for the page adapter
//!
//! Stands in for the handful of browser facilities the calculator page
//! touches: elements looked up by id, their text and class lists, click and
//! keydown events, and `alert()`.

use std::collections::HashMap;

use crate::command::{keypad_commands, Command};
use crate::core::Operator;

/// Id of the readout element
pub const DISPLAY_ID: &str = "display";

/// Id of the memory indicator element
pub const MEMORY_INDICATOR_ID: &str = "memoryIndicator";

/// Class set on the memory indicator while memory is nonzero
pub const ACTIVE_CLASS: &str = "active";

/// A DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text_content);
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// `classList.toggle(class, force)`
    pub fn toggle_class(&mut self, class: &str, force: bool) {
        if force {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events seen by the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Document-level keydown
    KeyDown {
        /// `event.key`
        key: String,
        /// Whether the handler called `preventDefault()`
        default_prevented: bool,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str, default_prevented: bool) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            default_prevented,
        }
    }
}

/// Mock DOM
#[derive(Debug, Default)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
    /// Messages passed to `alert()`
    alerts: Vec<String>,
}

impl MockDom {
    /// Creates an empty DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator page: readout, memory indicator and one
    /// button per keypad key
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        dom.register_element(
            DomElement::new("div")
                .with_id(DISPLAY_ID)
                .with_class("display")
                .with_text("0"),
        );
        dom.register_element(
            DomElement::new("span")
                .with_id(MEMORY_INDICATOR_ID)
                .with_class("memory-indicator")
                .with_text("M"),
        );

        for command in keypad_commands() {
            let label = command.label();
            dom.register_element(
                DomElement::new("button")
                    .with_id(&button_id(command))
                    .with_class("btn")
                    .with_attr("data-key", &label)
                    .with_text(&label),
            );
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Number of registered elements
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// `window.alert(message)`
    pub fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    /// Every alert shown, oldest first
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

/// Element id of the button for `command`, e.g. `"btn-7"` or `"btn-add"`
#[must_use]
pub fn button_id(command: Command) -> String {
    let name = match command {
        Command::Digit(d) => return format!("btn-{}", d.value()),
        Command::Operator(Operator::Add) => "add",
        Command::Operator(Operator::Subtract) => "subtract",
        Command::Operator(Operator::Multiply) => "multiply",
        Command::Operator(Operator::Divide) => "divide",
        Command::DecimalPoint => "decimal",
        Command::Evaluate => "equals",
        Command::ClearAll => "clear",
        Command::ClearEntry => "clear-entry",
        Command::Backspace => "backspace",
        Command::MemoryStore => "ms",
        Command::MemoryRecall => "mr",
        Command::MemoryAdd => "m-plus",
        Command::MemorySubtract => "m-minus",
        Command::MemoryClear => "mc",
    };
    format!("btn-{name}")
}
