use serde_json::Value;

use super::is_truthy;

pub const UNGROUPED_KEY: &str = "__ungrouped__";
pub const DEFAULT_RATIO: f64 = 0.2;
pub const DEFAULT_MIN_TRUE: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioPolicy {
    pub ratio: f64,
    pub min_true: i64,
}

impl Default for RatioPolicy {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            min_true: DEFAULT_MIN_TRUE,
        }
    }
}

impl RatioPolicy {
    /// `max(min_true, trunc(total * ratio))`. Not clamped to `total`: a larger
    /// target just marks the whole group premium.
    pub fn true_count(&self, total: usize) -> i64 {
        let scaled = (total as f64 * self.ratio) as i64;
        self.min_true.max(scaled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStat {
    pub key: String,
    pub true_count: i64,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebalanceOutcome {
    pub changes: usize,
    /// One entry per group, in order of first appearance.
    pub stats: Vec<GroupStat>,
}

/// Grouping key: `categories` if truthy, then `name` if truthy, else [`UNGROUPED_KEY`].
pub fn group_key(entry: &Value) -> String {
    ["categories", "name"]
        .iter()
        .filter_map(|field| entry.get(*field))
        .find(|value| is_truthy(value))
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| UNGROUPED_KEY.to_string())
}

/// Marks the first `true_count` members of each group premium and the rest not.
/// Non-object entries are left untouched.
///
/// A flag counts as changed unless it is already the JSON boolean `target`, so
/// `"premium": 1` is counted and rewritten as `true`. Loose equality (`1 == true`)
/// would leave it uncounted; the rewritten bytes are identical either way.
pub fn rebalance(entries: &mut [Value], policy: RatioPolicy) -> RebalanceOutcome {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_object() {
            continue;
        }
        let key = group_key(entry);
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, members)) => members.push(index),
            None => groups.push((key, vec![index])),
        }
    }

    let mut outcome = RebalanceOutcome::default();
    for (key, members) in groups {
        let true_count = policy.true_count(members.len());
        for (order, &index) in members.iter().enumerate() {
            let target = (order as i64) < true_count;
            let Some(object) = entries[index].as_object_mut() else {
                continue;
            };
            if object.get("premium").and_then(Value::as_bool) != Some(target) {
                object.insert("premium".to_string(), Value::Bool(target));
                outcome.changes += 1;
            }
        }
        outcome.stats.push(GroupStat {
            key,
            true_count,
            total: members.len(),
        });
    }
    outcome
}
