//! The resolution walk and its result.

use std::error::Error;
use std::fmt;

use excat_catalog::Catalog;
use excat_types::{Frame, MethodKey};
use tracing::debug;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The error a [`ResolvedException`] was built around.
#[derive(Debug)]
pub struct Cause {
    message: Option<String>,
    type_name: String,
    error: Option<BoxError>,
}

impl Cause {
    /// A cause known only by its type name and, optionally, a message.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            message: None,
            type_name: type_name.into(),
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message = (!message.is_empty()).then_some(message);
        self
    }

    /// Capture `error`'s message and type name, keeping the error as the source.
    ///
    /// An empty `Display` output counts as "no message".
    pub fn of<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let message = error.to_string();
        Self {
            message: (!message.is_empty()).then_some(message),
            type_name: std::any::type_name::<E>().to_string(),
            error: Some(Box::new(error)),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// ` (<message> - <type>)` or ` (<type>)`.
    fn suffix(&self) -> String {
        match &self.message {
            Some(message) => format!(" ({message} - {})", self.type_name),
            None => format!(" ({})", self.type_name),
        }
    }
}

/// A catalog-resolved error: the message for the innermost frame that has a
/// catalog entry, or the catalog's default message.
///
/// `Display` renders the message, prefixed with the located frame and line
/// when debug mode is on:
///
/// ```text
/// (shop::Cart.checkout - line 42) Checkout failed
/// ```
#[derive(Debug)]
pub struct ResolvedException {
    key: Option<MethodKey>,
    message: String,
    debug: bool,
    frame: Option<Frame>,
    line_label: String,
    cause: Option<Cause>,
}

impl ResolvedException {
    /// Key of the frame that matched, or `None` if the default message was used.
    pub fn key(&self) -> Option<&MethodKey> {
        self.key.as_ref()
    }

    /// The resolved text, including any wrapped-error suffix.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Override debug rendering for this instance only.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// The frame used in debug rendering.
    ///
    /// This is the matched frame, or frame 0 when nothing matched. `None`
    /// only for an empty stack.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn line_label(&self) -> &str {
        &self.line_label
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Whether a stack frame matched a catalog entry.
    pub fn is_located(&self) -> bool {
        self.key.is_some()
    }
}

impl fmt::Display for ResolvedException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.debug
            && let Some(frame) = &self.frame
        {
            write!(
                f,
                "({}.{} - {} ",
                frame.class_name, frame.method_name, self.line_label
            )?;
            match frame.line {
                Some(line) => write!(f, "{line}) ")?,
                None => f.write_str("?) ")?,
            }
        }
        f.write_str(&self.message)
    }
}

impl Error for ResolvedException {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .and_then(|c| c.error.as_deref())
            .map(|e| e as &(dyn Error + 'static))
    }
}

/// Resolve `stack` (innermost frame first) against `catalog`.
pub fn resolve(stack: &[Frame], catalog: &Catalog) -> ResolvedException {
    let matched = stack.iter().find_map(|frame| {
        let key = frame.key();
        catalog
            .get(key.as_str())
            .map(|message| (frame, key, message.to_string()))
    });

    let (frame, key, message) = match matched {
        Some((frame, key, message)) => (Some(frame.clone()), Some(key), message),
        None => {
            debug!(frames = stack.len(), "no frame has a catalog entry, using defaultMessage");
            (
                stack.first().cloned(),
                None,
                catalog.default_message().to_string(),
            )
        }
    };

    ResolvedException {
        key,
        message,
        debug: catalog.debug(),
        frame,
        line_label: catalog.line_label().to_string(),
        cause: None,
    }
}

/// [`resolve`], then append the wrapped error as ` (<message> - <type>)`.
pub fn resolve_wrapped(stack: &[Frame], catalog: &Catalog, cause: Cause) -> ResolvedException {
    let mut resolved = resolve(stack, catalog);
    resolved.message.push_str(&cause.suffix());
    resolved.cause = Some(cause);
    resolved
}
