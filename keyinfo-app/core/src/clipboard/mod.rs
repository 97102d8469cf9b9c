pub mod notice;
pub mod system;

pub use notice::{CopiedNotice, CopyNotice, COPIED_NOTICE_WINDOW};
#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub use system::SystemClipboard;
pub use system::{Clipboard, MemoryClipboard};
