//! Keyword heuristics over the raw visitor message.

pub const PROVIDE_SERVICE_INFO: &str = "provide_service_info";
pub const SCHEDULE_APPOINTMENT: &str = "schedule_appointment";
pub const PROVIDE_CONTACT_INFO: &str = "provide_contact_info";
pub const CONTACT_SUPPORT: &str = "contact_support";

const ACTION_TRIGGERS: &[(&[&str], &str)] = &[
    (&["service"], PROVIDE_SERVICE_INFO),
    (&["appointment", "meeting"], SCHEDULE_APPOINTMENT),
    (&["contact"], PROVIDE_CONTACT_INFO),
];

const FOLLOWUP_TRIGGERS: &[&str] = &["urgent", "asap", "complaint"];

/// Suggested UI actions, in a fixed order, each at most once.
pub fn extract_suggested_actions(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    ACTION_TRIGGERS
        .iter()
        .filter(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, action)| action.to_string())
        .collect()
}

/// Whether staff should follow up on this message.
pub fn requires_followup(message: &str) -> bool {
    let lower = message.to_lowercase();
    FOLLOWUP_TRIGGERS.iter().any(|n| lower.contains(n))
}
