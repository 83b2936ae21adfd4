//! Importance/urgency priority model.
//!
//! Both scales run 1 (lowest) to 10 (highest); their product is the derived
//! priority score in 1..=100. The banding tables map each scale to five
//! human-readable labels for display only; they never affect stored data or
//! ordering. Out-of-range values yield an empty label (band unknown), not an
//! error.

/// Derived priority score: importance x urgency
pub fn priority_score(importance: i32, urgency: i32) -> i32 {
    importance * urgency
}

/// Display label for an importance value, or `""` outside 1..=10
pub fn importance_label(value: i32) -> &'static str {
    match value {
        9..=10 => {
            "Critical – Essential for core strategy, major security/legal risk, or unblocks company/flagship launch"
        }
        7..=8 => "High – Significant value to many users, major pain point, or key roadmap item",
        5..=6 => "Medium – Meaningful improvement, highly requested, or moderate technical debt",
        3..=4 => "Low – Minor enhancement, edge-case bug, or small process improvement",
        1..=2 => "Trivial – Cosmetic, no data, or easy workaround exists",
        _ => "",
    }
}

/// Display label for an urgency value, or `""` outside 1..=10
pub fn urgency_label(value: i32) -> &'static str {
    match value {
        9..=10 => {
            "Immediate – Production outage, data loss, or business actively losing money/customers"
        }
        7..=8 => "High – Imminent deadline, blocking team, or critical client commitment",
        5..=6 => "Medium – Needed for current sprint/near-term release, or looming event",
        3..=4 => "Low – Can be scheduled for a future sprint/cycle, no negative impact",
        1..=2 => "None – No deadline, can be backlogged indefinitely",
        _ => "",
    }
}
