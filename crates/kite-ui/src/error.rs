//! Error types for the UI layer.

use std::fmt;

use kite_render::RenderError;

pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug)]
pub enum UiError {
    /// The widget has no retrievable value (plain buttons).
    NoData { widget: String },
    /// No widget with this id exists in the window.
    UnknownWidget { id: String },
    /// A registered event handler reported a failure.
    Handler { widget: String, message: String },
    Render(RenderError),
    /// The listener task pool could not be started.
    TaskPool(std::io::Error),
    /// The host runner could not be set up.
    HostInit(String),
    /// Several recipients of one dispatch failed.
    Dispatch(Vec<UiError>),
}

impl UiError {
    pub fn handler(widget: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            widget: widget.into(),
            message: message.into(),
        }
    }

    /// The individual failures carried by this error.
    ///
    /// A single error is returned as a one-element slice.
    pub fn errors(&self) -> &[UiError] {
        match self {
            Self::Dispatch(errors) => errors,
            other => std::slice::from_ref(other),
        }
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData { widget } => write!(f, "Widget '{}' has no data", widget),
            Self::UnknownWidget { id } => write!(f, "No widget with id '{}'", id),
            Self::Handler { widget, message } => {
                write!(f, "Handler for widget '{}' failed: {}", widget, message)
            }
            Self::Render(e) => write!(f, "Render error: {}", e),
            Self::TaskPool(e) => write!(f, "Failed to start listener task pool: {}", e),
            Self::HostInit(msg) => write!(f, "Failed to initialize host: {}", msg),
            Self::Dispatch(errors) => {
                write!(f, "{} errors during dispatch", errors.len())?;
                for e in errors {
                    write!(f, "; {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(e) => Some(e),
            Self::TaskPool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderError> for UiError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

/// Accumulates failures from a dispatch that must reach every recipient.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<UiError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one delivery.
    pub fn push(&mut self, result: UiResult<()>) {
        if let Err(e) = result {
            self.record(e);
        }
    }

    pub fn record(&mut self, error: UiError) {
        match error {
            UiError::Dispatch(nested) => self.errors.extend(nested),
            other => self.errors.push(other),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` if nothing failed, the error itself if one did, an aggregate otherwise.
    pub fn finish(mut self) -> UiResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(UiError::Dispatch(self.errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collector_is_ok() {
        assert!(ErrorCollector::new().finish().is_ok());
    }

    #[test]
    fn test_single_error_returned_as_is() {
        let mut collector = ErrorCollector::new();
        collector.push(Ok(()));
        collector.push(Err(UiError::handler("ok", "boom")));

        match collector.finish() {
            Err(UiError::Handler { widget, message }) => {
                assert_eq!(widget, "ok");
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_many_errors_are_flattened() {
        let mut collector = ErrorCollector::new();
        collector.push(Err(UiError::handler("a", "1")));
        collector.push(Err(UiError::Dispatch(vec![
            UiError::handler("b", "2"),
            UiError::handler("c", "3"),
        ])));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.errors().len(), 3);
        assert!(err.to_string().starts_with("3 errors during dispatch"));
    }

    #[test]
    fn test_render_error_converts() {
        let err: UiError = RenderError::FontNotFound("missing.ttf".into()).into();
        assert!(matches!(err, UiError::Render(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
