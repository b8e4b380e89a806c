//! Level file serialization
//!
//! Writes the nine sections of the level format in their fixed order:
//! background, player, platforms, goals, lavas, back platforms, boxes,
//! labels, script regions. Every section after the player opens with a
//! decimal count line; records follow one per line, fields space separated.

use crate::error::Result;
use crate::level::{
    BackgroundRecord, BoxRecord, GoalRecord, LabelRecord, Level, PlatformRecord, PlayerRecord,
    ScriptRegionRecord,
};
use crate::script::ScriptRef;
use std::io::Write;
use std::path::Path;

/// Serialize a decoded level
///
/// Script references are resolved against `script_root` while writing, so a
/// missing script file aborts the write partway through. Callers that need
/// all-or-nothing output should stage the stream (see `convert`).
///
/// # Errors
///
/// Returns an error if a referenced script file cannot be read or the sink
/// rejects a write.
pub fn write_level<W: Write>(level: &Level, script_root: &Path, out: &mut W) -> Result<()> {
    save_background(&level.background, out)?;
    save_player(&level.player, script_root, out)?;
    save_platform_section(&level.platforms, out)?;
    save_goals(&level.goals, out)?;
    save_platform_section(&level.lavas, out)?;
    save_platform_section(&level.back_platforms, out)?;
    save_boxes(&level.boxes, out)?;
    save_labels(&level.labels, out)?;
    save_script_regions(&level.script_regions, script_root, out)?;
    Ok(())
}

fn save_background<W: Write>(background: &BackgroundRecord, out: &mut W) -> Result<()> {
    writeln!(out, "{}", background.color)?;
    Ok(())
}

fn save_player<W: Write>(player: &PlayerRecord, script_root: &Path, out: &mut W) -> Result<()> {
    writeln!(out, "{} {} {}", player.x, player.y, player.color)?;
    if let Some(script) = &player.script {
        save_script(script, script_root, out)?;
    }
    Ok(())
}

/// Shared by the platforms, lavas and back platforms sections
fn save_platform_section<W: Write>(records: &[PlatformRecord], out: &mut W) -> Result<()> {
    writeln!(out, "{}", records.len())?;
    for record in records {
        writeln!(
            out,
            "{} {} {} {} {}",
            record.x, record.y, record.width, record.height, record.color
        )?;
    }
    Ok(())
}

fn save_goals<W: Write>(goals: &[GoalRecord], out: &mut W) -> Result<()> {
    writeln!(out, "{}", goals.len())?;
    for goal in goals {
        writeln!(out, "{} {} {} {}", goal.id, goal.x, goal.y, goal.color)?;
    }
    Ok(())
}

fn save_boxes<W: Write>(boxes: &[BoxRecord], out: &mut W) -> Result<()> {
    writeln!(out, "{}", boxes.len())?;
    for record in boxes {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            record.id, record.x, record.y, record.width, record.height, record.color
        )?;
    }
    Ok(())
}

fn save_labels<W: Write>(labels: &[LabelRecord], out: &mut W) -> Result<()> {
    writeln!(out, "{}", labels.len())?;
    for label in labels {
        writeln!(out, "{} {} {} {}", label.id, label.x, label.y, label.color)?;
        writeln!(out, "{}", label.text)?;
    }
    Ok(())
}

fn save_script_regions<W: Write>(
    regions: &[ScriptRegionRecord],
    script_root: &Path,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", regions.len())?;
    for region in regions {
        writeln!(
            out,
            "{} {} {} {} {}",
            region.x, region.y, region.width, region.height, region.color
        )?;
        save_script(&region.script, script_root, out)?;
    }
    Ok(())
}

/// Resolve one script reference and emit its block
fn save_script<W: Write>(script: &ScriptRef, script_root: &Path, out: &mut W) -> Result<()> {
    let block = script.resolve(script_root)?;
    writeln!(out, "{}", block.line_count())?;
    writeln!(out, "{}", block.args_line)?;
    for line in &block.body {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
