//! Host capabilities the scanner consumes.

pub mod camera;
pub mod detector;
pub mod host;
#[cfg(test)]
pub mod testing;
pub mod webview;
