//! The system preamble that seeds every session.

use receptionist_core::config::CompanyConfig;

/// Render the receptionist persona for `company`.
///
/// Built once per orchestrator; every session gets the same text.
pub fn build_preamble(company: &CompanyConfig) -> String {
    let services = company
        .services
        .iter()
        .map(|s| format!("- {}", s))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are {name}'s AI Receptionist.\n\n\
         You behave like a real human receptionist.\n\
         You are polite, friendly, proactive, and professional.\n\n\
         IMPORTANT RULES:\n\
         - Ask only ONE question at a time\n\
         - Keep responses short and clear\n\n\
         Services:\n\
         {services}\n\n\
         Company Details:\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Hours: {hours}\n",
        name = company.name,
        services = services,
        email = company.email,
        phone = company.phone,
        hours = company.business_hours,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_mentions_company_details() {
        let company = CompanyConfig::default();
        let text = build_preamble(&company);
        assert!(text.starts_with("You are Softechsol's AI Receptionist."));
        assert!(text.contains("- Web Development\n- Mobile Applications"));
        assert!(text.contains(&format!("Email: {}", company.email)));
        assert!(text.contains(&format!("Hours: {}", company.business_hours)));
    }

    #[test]
    fn test_preamble_uses_configured_services() {
        let company = CompanyConfig {
            name: "Acme".to_string(),
            services: vec!["Plumbing".to_string()],
            ..CompanyConfig::default()
        };
        let text = build_preamble(&company);
        assert!(text.contains("Services:\n- Plumbing\n\nCompany Details:"));
        assert!(!text.contains("Web Development"));
    }
}
