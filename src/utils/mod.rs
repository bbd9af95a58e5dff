pub mod clipboard;
pub mod diagnostics;
pub mod logging;
pub mod sound;
#[cfg(test)]
pub mod test_utils;
pub mod url;
