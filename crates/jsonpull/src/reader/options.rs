/// Configuration of a [`JsonReader`](crate::JsonReader).
///
/// The two grammar flags select one of the format variants the reader
/// understands; the variants differ only in those two points.
///
/// # Examples
///
/// ```rust
/// use jsonpull::{JsonReader, ReaderOptions};
///
/// let options = ReaderOptions {
///     allow_annotations: true,
///     ..Default::default()
/// };
/// let mut reader = JsonReader::from_text(r#"{@odata.type: "x"}"#, options);
/// assert!(reader.read().unwrap());
/// ```
///
/// # Default
///
/// Both flags default to `false` and the buffer starts at
/// [`ReaderOptions::DEFAULT_BUFFER_CAPACITY`] characters.
#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    /// Whether unquoted property names may also contain `.` and `@`.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_annotations: bool,

    /// Whether strings written as `"\/Date(millis[+-hhmm])\/"` are decoded into
    /// [`Value::DateTime`](crate::Value::DateTime).
    ///
    /// Only strings whose source text begins with a backslash are examined.
    /// Strings that look close but do not match stay strings.
    ///
    /// # Default
    ///
    /// `false`
    pub detect_aspnet_dates: bool,

    /// Initial size of the character window, in characters. The window
    /// doubles as needed; `0` is treated as `1`.
    pub initial_buffer_capacity: usize,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl ReaderOptions {
    /// Initial window size used by [`Default`].
    pub const DEFAULT_BUFFER_CAPACITY: usize = 2040;

    /// The verbose variant: ASP.NET dates are decoded, annotation names are
    /// not allowed.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            detect_aspnet_dates: true,
            ..Self::default()
        }
    }

    /// The light variant: annotation names are allowed, dates stay strings.
    #[must_use]
    pub fn light() -> Self {
        Self {
            allow_annotations: true,
            ..Self::default()
        }
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            allow_annotations: false,
            detect_aspnet_dates: false,
            initial_buffer_capacity: Self::DEFAULT_BUFFER_CAPACITY,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}
