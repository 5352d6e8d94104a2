//! CLI progress display utilities
//!
//! Step indicators and completion messages for commands that read and
//! rewrite files.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::HumanDuration;

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Gear - for processing operations
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Document - for file operations
pub static DOCUMENT: Emoji<'_, '_> = Emoji("📄 ", "");

/// Print a step indicator: `[1/3] 🔍 Message...`
///
/// # Example
/// ```ignore
/// print_step(1, 3, LOOKING_GLASS, "Reading GMD file...");
/// print_step(2, 3, GEAR, "Importing texts...");
/// print_step(3, 3, DISK, "Writing GMD file...");
/// ```
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}
