//! CLI commands for GMD message file operations

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{DISK, DOCUMENT, GEAR, LOOKING_GLASS, print_done, print_step};
use crate::formats::gmd::{
    ExportOptions, GmdDocument, GmdLoad, ImportMode, LINE_BREAK_MARKER, export_to_path,
    import_from_path, read_gmd, write_gmd,
};

/// Read a GMD file, failing if it is not one
fn load(path: &Path) -> anyhow::Result<GmdDocument> {
    match read_gmd(path)? {
        GmdLoad::Parsed(doc) => Ok(doc),
        GmdLoad::UnrecognizedFormat { magic } => {
            anyhow::bail!("Not a GMD file: {} (magic {:02x?})", path.display(), magic)
        }
    }
}

/// Show header information
pub fn info(path: &Path, json: bool) -> anyhow::Result<()> {
    let doc = load(path)?;
    let summary = doc.summary()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}:", path.display());
    println!("  Version: {:?}", summary.version);
    println!("  Language: {:?}", summary.language);
    println!("  Internal name: {}", summary.internal_name);
    println!("  Labels: {}", summary.label_count);
    println!("  Sections: {}", summary.section_count);
    println!("  Name table: {} bytes", summary.label_size);
    println!("  Text table: {} bytes", summary.section_size);
    if let Some(len) = summary.unknown_block_len {
        println!("  Unknown block: {len} bytes");
    }
    if !summary.has_name_table {
        println!("  (no name table, names are generated)");
    }

    Ok(())
}

/// List labels
pub fn list(path: &Path, limit: usize) -> anyhow::Result<()> {
    let doc = load(path)?;
    let take = if limit == 0 { doc.len() } else { limit };

    for label in doc.labels().iter().take(take) {
        println!("{:05} {}", label.text_id(), label.display_name());
        println!("  {}", truncate_text(label.text(), 100));
    }

    if take < doc.len() {
        println!("... {} more", doc.len() - take);
    }

    Ok(())
}

/// Print one label
pub fn get(path: &Path, index: usize) -> anyhow::Result<()> {
    let doc = load(path)?;

    let Some(label) = doc.label(index) else {
        anyhow::bail!("Label {} not found ({} labels)", index, doc.len());
    };

    println!("Id: {}", label.text_id());
    println!("Name: {}", label.display_name());
    println!("Text:");
    println!("{}", label.text());

    Ok(())
}

/// Replace one label's text
pub fn set(path: &Path, index: usize, text: &str) -> anyhow::Result<()> {
    let mut doc = load(path)?;

    doc.set_text(index, text.replace(LINE_BREAK_MARKER, "\r\n"))?;
    write_gmd(path, &mut doc)?;

    println!("Updated label {index}");
    Ok(())
}

/// Search labels by text or name
pub fn search(path: &Path, query: &str, by_name: bool, limit: usize) -> anyhow::Result<()> {
    let doc = load(path)?;

    let matches = if by_name {
        doc.find_by_name_pattern(query)
    } else {
        doc.find_by_text(query, false)
    };

    if matches.is_empty() {
        println!("No labels found matching '{query}'");
        return Ok(());
    }

    println!("Found {} labels matching '{}':", matches.len(), query);
    println!();
    for label in matches.iter().take(limit) {
        println!("{:05} {}", label.text_id(), label.display_name());
        println!("  {}", truncate_text(label.text(), 100));
    }

    Ok(())
}

/// Find and replace text
pub fn replace(
    path: &Path,
    find: &str,
    replace_with: &str,
    case_sensitive: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut doc = load(path)?;

    let result = doc.replace_all(find, replace_with, case_sensitive);

    if result.labels_modified == 0 {
        println!("No matches found for '{find}'");
        return Ok(());
    }

    println!(
        "Found {} replacements in {} labels:",
        result.replacements, result.labels_modified
    );
    for &id in &result.modified_ids {
        if let Some(label) = doc.label(id) {
            println!("  {:05} -> {}", id, truncate_text(label.text(), 60));
        }
    }

    if dry_run {
        println!("\n(Dry run - no changes made)");
    } else {
        write_gmd(path, &mut doc)?;
        println!("\nChanges saved to {}", path.display());
    }

    Ok(())
}

/// Export texts to a line-based file
pub fn export(path: &Path, output: Option<&Path>, options: ExportOptions) -> anyhow::Result<()> {
    let doc = load(path)?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.with_extension("csv"));

    let count = export_to_path(&doc, &output_path, options)?;
    println!("Exported {} labels to {}", count, output_path.display());

    Ok(())
}

/// Import texts from a line-based file
pub fn import(path: &Path, records: &Path, mode: ImportMode, backup: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    print_step(1, 3, LOOKING_GLASS, "Reading GMD file...");
    let mut doc = load(path)?;

    print_step(2, 3, GEAR, &format!("Importing texts ({mode:?})..."));
    let result = import_from_path(&mut doc, records, mode)?;

    if backup {
        let backup_path = path.with_extension("gmd.bak");
        std::fs::copy(path, &backup_path)?;
        println!("Created backup: {}", backup_path.display());
    }

    print_step(3, 3, DISK, "Writing GMD file...");
    write_gmd(path, &mut doc)?;

    println!("  Updated: {}", result.updated);
    if !result.unmatched.is_empty() {
        println!("  Not found: {}", result.unmatched.len());
        for name in result.unmatched.iter().take(5) {
            println!("    - {name}");
        }
    }
    print_done(started.elapsed());

    Ok(())
}

/// Copy texts from another GMD file
pub fn merge(path: &Path, source: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let started = Instant::now();

    print_step(1, 3, LOOKING_GLASS, "Reading GMD files...");
    let mut doc = load(path)?;
    let source_doc = load(source)?;

    print_step(2, 3, DOCUMENT, "Copying texts...");
    let result = doc.merge_texts_from(&source_doc)?;

    let output_path = output.unwrap_or(path);
    print_step(3, 3, DISK, &format!("Writing {}...", output_path.display()));
    write_gmd(output_path, &mut doc)?;

    println!("  Updated: {}", result.updated);
    if !result.unmatched.is_empty() {
        println!("  Without a match: {}", result.unmatched.len());
    }
    print_done(started.elapsed());

    Ok(())
}

/// Truncate text for display
fn truncate_text(text: &str, max_chars: usize) -> String {
    let text = text.replace("\r\n", "\\n").replace('\n', "\\n");
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text
    }
}
