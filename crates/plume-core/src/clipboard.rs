//! Clipboard interface.

/// The host's clipboard.
///
/// Reads are asynchronous on every host worth supporting, so the trait
/// splits them: [`Clipboard::request_read`] kicks the read off and the
/// host delivers the text later as [`crate::event::Event::ClipboardText`].
/// The requesting tool must cope with the scene having changed in the
/// meantime.
pub trait Clipboard {
    /// Replace the clipboard contents.
    fn write_text(&mut self, text: &str);

    /// Start an asynchronous read of the clipboard's text.
    fn request_read(&mut self);
}
