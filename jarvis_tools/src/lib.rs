//! Local collaborators: the browser, the machine itself, reminders and the clock.

pub mod browser;
pub mod clock;
pub mod command_runner;
pub mod reminder;
pub mod system_info;

pub use browser::{Browser, KNOWN_SITES, Launcher, SystemLauncher};
pub use clock::SystemClock;
pub use reminder::{InMemoryReminders, Reminder};
pub use system_info::SystemInfo;
