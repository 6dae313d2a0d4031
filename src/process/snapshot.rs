//! Memory-ranked process summary used as model context

use crate::core::format::format_bytes;
use crate::core::types::ProcessRecord;
use std::collections::HashMap;

/// Processes sharing a name, aggregated for the prompt summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessGroup {
    pub name: String,
    pub instance_count: usize,
    pub total_memory_bytes: u64,
}

impl ProcessGroup {
    /// One summary line: `<name> (<n> instances, <size>)`
    pub fn summary_line(&self) -> String {
        format!(
            "{} ({} instances, {})",
            self.name,
            self.instance_count,
            format_bytes(self.total_memory_bytes)
        )
    }
}

/// Group records by name, rank by total memory and keep the top `max_groups`
///
/// Groups appear in first-seen order before ranking, and the sort is
/// stable, so ties keep enumeration order.
pub fn capture(records: &[ProcessRecord], max_groups: usize) -> Vec<ProcessGroup> {
    let mut groups: Vec<ProcessGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|r| !r.name.is_empty()) {
        match index.get(record.name.as_str()) {
            Some(&i) => {
                let group = &mut groups[i];
                group.instance_count += 1;
                group.total_memory_bytes = group.total_memory_bytes.saturating_add(record.memory_bytes);
            }
            None => {
                index.insert(record.name.as_str(), groups.len());
                groups.push(ProcessGroup {
                    name: record.name.clone(),
                    instance_count: 1,
                    total_memory_bytes: record.memory_bytes,
                });
            }
        }
    }

    groups.sort_by(|a, b| b.total_memory_bytes.cmp(&a.total_memory_bytes));
    groups.truncate(max_groups);
    groups
}

/// Render groups as newline-terminated summary lines
pub fn render_summary(groups: &[ProcessGroup]) -> String {
    let mut summary = String::new();
    for group in groups {
        summary.push_str(&group.summary_line());
        summary.push('\n');
    }
    summary
}
