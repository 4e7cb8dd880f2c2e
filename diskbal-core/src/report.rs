//! Plan report rendering
//!
//! Fixed-width tabular summary of planned moves. Pure formatting over
//! already-computed plans; writing to the terminal is the CLI's concern.

use crate::datamodel::format_bytes;
use crate::plan::NodePlan;

const FRAME_WIDTH: usize = 80;
const DISK_COL: usize = 30;
const SIZE_COL: usize = 10;

fn center(text: &str, width: usize) -> String {
    if text.len() >= width {
        return text.to_string();
    }
    let pad = width - text.len();
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

/// Render the tabular plan report.
pub fn render_plan_report(plans: &[NodePlan]) -> String {
    let mut out = String::new();

    out.push_str("\nPlan :\n\n");
    out.push_str(&"=".repeat(FRAME_WIDTH));
    out.push('\n');

    out.push_str(&center("Source Disk", DISK_COL));
    out.push_str(&center("Dest.Disk", DISK_COL));
    out.push_str(&center("Size", SIZE_COL));
    out.push_str(&center("Type", SIZE_COL));
    out.push('\n');

    for plan in plans {
        for step in &plan.steps {
            out.push_str(&format!(
                "{} {} {} {}\n",
                center(&step.source.path, DISK_COL),
                center(&step.destination.path, DISK_COL),
                center(&format_bytes(step.bytes_to_move), SIZE_COL),
                center(&step.destination.storage_type, SIZE_COL),
            ));
        }
    }

    out.push_str(&"=".repeat(FRAME_WIDTH));
    out.push('\n');

    out
}
