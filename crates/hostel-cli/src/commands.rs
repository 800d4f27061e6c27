use anyhow::Context;
use colored::Colorize;
use hostel_merge::{
    ConflictKind, MergeClassification, MergeEngine, RoomStatus, RunReport, ScanReport,
    SecondaryMerge, ValidationReport,
};
use hostel_store::JsonFileStore;
use serde::Serialize;
use tracing::debug;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = CliConfig::resolve(cli.config.as_deref())?;
    let path = config.store_path(cli.store.as_deref())?;
    debug!(
        store = %path.display(),
        hostels = %config.merge.hostels_collection,
        allocations = %config.merge.allocations_collection,
        "configuration resolved"
    );
    let store = JsonFileStore::open(&path)
        .with_context(|| format!("cannot open store {}", path.display()))?;

    match cli.command {
        Command::Scan => {
            let engine = MergeEngine::new(store, config.merge);
            emit(cli.format, &engine.scan()?, print_scan)
        }
        Command::Plan => {
            config.merge.dry_run = true;
            let engine = MergeEngine::new(store, config.merge);
            emit(cli.format, &engine.run()?, print_run)
        }
        Command::Run(args) => {
            config.merge.dry_run |= args.dry_run;
            if args.no_validate {
                config.merge.validate_after_merge = false;
            }
            let engine = MergeEngine::new(store, config.merge);
            emit(cli.format, &engine.run()?, print_run)
        }
        Command::Validate => {
            let engine = MergeEngine::new(store, config.merge);
            emit(cli.format, &engine.validate()?, print_validation)
        }
    }
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: fn(&T)) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(value),
    }
    Ok(())
}

fn print_scan(scan: &ScanReport) {
    println!("{} hostels", scan.hostels.len().to_string().bold());
    for hostel in &scan.hostels {
        println!(
            "  {}  {}  {} occupants",
            hostel.id.short_id().dimmed(),
            hostel.name,
            hostel.occupants
        );
    }
    if scan.groups.is_empty() {
        println!("{} No duplicate hostels.", "✓".green().bold());
        return;
    }
    println!("\n{} duplicate groups", scan.groups.len().to_string().yellow().bold());
    for group in &scan.groups {
        println!("  '{}': {} hostels", group.name.yellow(), group.len());
    }
}

fn print_run(report: &RunReport) {
    if report.hostels_loaded == 0 {
        println!("No hostels found.");
        return;
    }
    if report.is_noop() {
        println!("{} No duplicate hostels to merge.", "✓".green().bold());
        return;
    }

    for group in &report.groups {
        let merge = &group.merge;
        println!("\n{} '{}'", "Group".bold(), merge.name.yellow().bold());
        println!("  Primary: {}", merge.primary.as_str().cyan());
        for secondary in &merge.secondaries {
            print_secondary(secondary);
        }
        println!(
            "  Queued: {} updates, {} deletes",
            group.queued_updates, group.queued_deletes
        );
    }

    println!("\n{}", "Summary".bold());
    println!("  Students merged: {}", report.successful_merges.to_string().green());
    println!("  Room conflicts: {}", paint_count(report.conflicts));
    println!("  Groups processed: {}", report.groups.len());
    println!("  Hostels deleted: {}", report.completely_merged);
    println!("  Partially merged: {}", report.partially_merged);

    if !report.committed {
        println!("\n{} Dry run: nothing written.", "!".yellow().bold());
        return;
    }

    println!("\n{} Merge committed (run {})", "✓".green().bold(), report.run_id);
    let allocations = &report.allocations;
    println!("  Allocations redirected: {}", allocations.updated);
    if !allocations.skipped.is_empty() {
        println!("  Allocations skipped: {}", allocations.skipped.len().to_string().yellow());
        for skipped in &allocations.skipped {
            println!("    - {} (hostel {})", skipped.allocation, skipped.hostel.short_id());
        }
    }
    if allocations.errors > 0 {
        println!("  Allocation errors: {}", allocations.errors.to_string().red());
        for issue in &allocations.issues {
            println!("    - {issue}");
        }
    }

    if let Some(validation) = &report.validation {
        println!("\n{}", "Post-merge validation".bold());
        print_validation(validation);
    }
}

fn print_secondary(secondary: &SecondaryMerge) {
    let label = match secondary.classification {
        MergeClassification::CompletelyMerged => secondary.classification.label().green(),
        MergeClassification::PartiallyMerged => secondary.classification.label().yellow(),
        MergeClassification::NotMerged => secondary.classification.label().red(),
    };
    println!(
        "  {} {}: {}/{} students merged, {} conflicts",
        label,
        secondary.secondary.short_id(),
        secondary.merged_occupants,
        secondary.initial_occupants,
        secondary.conflicts
    );
    for room in &secondary.rooms {
        match &room.status {
            RoomStatus::Merged {
                moved,
                target_occupants,
                capacity,
                ..
            } => println!(
                "    {} room {}: {} moved ({}/{})",
                "✓".green(),
                room.room_number,
                moved,
                target_occupants,
                capacity
            ),
            RoomStatus::Conflict {
                kind: ConflictKind::NoMatchingRoom,
                ..
            } => println!(
                "    {} room {}: no matching room in primary ({} students)",
                "✗".red(),
                room.room_number,
                room.source_occupants
            ),
            RoomStatus::Conflict {
                kind: ConflictKind::CapacityExceeded,
                target_occupants,
                capacity,
            } => println!(
                "    {} room {}: capacity exceeded ({} + {} > {})",
                "✗".red(),
                room.room_number,
                target_occupants.unwrap_or_default(),
                room.source_occupants,
                capacity.unwrap_or_default()
            ),
        }
    }
}

fn print_validation(report: &ValidationReport) {
    println!("  Allocations checked: {}", report.total);
    println!("  Valid: {}", report.valid.to_string().green());
    println!("  Fixed: {}/{}", report.fixed, report.invalid);
    println!("  Orphaned: {}", paint_count(report.orphaned));
    if report.errors > 0 {
        println!("  Errors: {}", report.errors.to_string().red());
    }
    if !report.issues.is_empty() {
        println!("  Issues:");
        for issue in &report.issues {
            println!("    - {issue}");
        }
    }
    if !report.fixes.is_empty() {
        println!("  Fixes applied:");
        for fix in &report.fixes {
            println!("    - {fix}");
        }
    }
    if report.is_clean() {
        println!("{} All allocations agree with occupant lists.", "✓".green().bold());
    }
}

fn paint_count(n: usize) -> colored::ColoredString {
    if n == 0 {
        n.to_string().green()
    } else {
        n.to_string().yellow()
    }
}
