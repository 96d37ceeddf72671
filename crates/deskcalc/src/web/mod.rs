//! Browser-style page adapter
//!
//! The calculator page as a browser would host it, over a mock DOM: a
//! `display` element, a `memoryIndicator` toggling its `active` class, one
//! button per key, document keydown handling and `alert()` for notices.

mod dom;
mod driver;
mod page;

pub use dom::{
    button_id, DomElement, DomEvent, MockDom, ACTIVE_CLASS, DISPLAY_ID, MEMORY_INDICATOR_ID,
};
pub use driver::WebDriver;
pub use page::{DomSink, WebCalculator};
