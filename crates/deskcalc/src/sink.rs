//! Display sinks: where the engine sends its readout
//!
//! The engine never touches a presentation layer. After every operation it
//! hands the formatted readout and the memory flag to a [`DisplaySink`], and
//! it reports user-visible failures through [`DisplaySink::notify`].

use crate::core::CalcError;

/// Receiver for calculator output
pub trait DisplaySink {
    /// Called after every operation with the formatted readout and whether
    /// the memory register holds a nonzero value
    fn render(&mut self, display: &str, memory_active: bool);

    /// Called when an operation hits a failure the user should see.
    ///
    /// The engine has already applied its fallback by the time this runs.
    fn notify(&mut self, error: &CalcError) {
        let _ = error;
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn render(&mut self, display: &str, memory_active: bool) {
        (**self).render(display, memory_active);
    }

    fn notify(&mut self, error: &CalcError) {
        (**self).notify(error);
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn render(&mut self, display: &str, memory_active: bool) {
        (**self).render(display, memory_active);
    }

    fn notify(&mut self, error: &CalcError) {
        (**self).notify(error);
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn render(&mut self, _display: &str, _memory_active: bool) {}
}

/// Sink backed by a render closure
pub struct FnSink<F> {
    render: F,
}

impl<F> FnSink<F>
where
    F: FnMut(&str, bool),
{
    /// Wraps a `(display, memory_active)` callback
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

impl<F> std::fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

impl<F> DisplaySink for FnSink<F>
where
    F: FnMut(&str, bool),
{
    fn render(&mut self, display: &str, memory_active: bool) {
        (self.render)(display, memory_active);
    }
}

/// One rendered readout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Formatted readout
    pub display: String,
    /// Memory indicator state
    pub memory_active: bool,
}

/// Sink that keeps every frame and notification
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    frames: Vec<Frame>,
    notices: Vec<CalcError>,
}

impl RecordingSink {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames, oldest first
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Most recent frame
    #[must_use]
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// All notifications, oldest first
    #[must_use]
    pub fn notices(&self) -> &[CalcError] {
        &self.notices
    }

    /// Drops recorded frames and notifications
    pub fn clear(&mut self) {
        self.frames.clear();
        self.notices.clear();
    }
}

impl DisplaySink for RecordingSink {
    fn render(&mut self, display: &str, memory_active: bool) {
        self.frames.push(Frame {
            display: display.to_string(),
            memory_active,
        });
    }

    fn notify(&mut self, error: &CalcError) {
        self.notices.push(error.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_frames() {
        let mut sink = RecordingSink::new();
        sink.render("0", false);
        sink.render("42", true);
        assert_eq!(sink.frames().len(), 2);
        assert_eq!(
            sink.last(),
            Some(&Frame {
                display: "42".into(),
                memory_active: true
            })
        );
    }

    #[test]
    fn test_recording_sink_keeps_notices() {
        let mut sink = RecordingSink::new();
        sink.notify(&CalcError::DivideByZero);
        assert_eq!(sink.notices(), &[CalcError::DivideByZero]);
        sink.clear();
        assert!(sink.notices().is_empty());
        assert!(sink.frames().is_empty());
    }

    #[test]
    fn test_fn_sink_forwards_render() {
        let mut seen = Vec::new();
        {
            let mut sink = FnSink::new(|display: &str, memory: bool| {
                seen.push((display.to_string(), memory));
            });
            sink.render("7", false);
            sink.notify(&CalcError::Overflow);
        }
        assert_eq!(seen, vec![("7".to_string(), false)]);
    }

    #[test]
    fn test_mut_ref_sink_forwards() {
        let mut inner = RecordingSink::new();
        {
            let mut by_ref: &mut RecordingSink = &mut inner;
            DisplaySink::render(&mut by_ref, "1", false);
            DisplaySink::notify(&mut by_ref, &CalcError::DivideByZero);
        }
        assert_eq!(inner.frames().len(), 1);
        assert_eq!(inner.notices().len(), 1);
    }

    #[test]
    fn test_boxed_sink_forwards() {
        let mut boxed: Box<dyn DisplaySink> = Box::new(NullSink);
        boxed.render("0", false);
        boxed.notify(&CalcError::Overflow);
    }
}
