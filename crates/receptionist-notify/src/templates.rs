//! Message bodies for visitor auto-replies and staff lead notifications.

use receptionist_core::config::CompanyConfig;
use receptionist_core::types::{Appointment, ContactInfo};

use crate::notifier::Notification;
use crate::reminder::CallbackLead;

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("-")
}

/// Auto-reply sent to a visitor who requested an appointment.
pub fn appointment_auto_reply(company: &CompanyConfig, appt: &Appointment) -> Notification {
    Notification {
        to: appt.contact.email.clone(),
        subject: format!("Thanks for contacting {}", company.name),
        body: format!(
            "Hello {name},\n\n\
             Thank you for contacting {company}.\n\
             We have received your appointment request for {date} at {time}.\n\n\
             Our team will call you shortly to confirm.\n\n\
             Phone: {phone}\n\
             Email: {email}\n\n\
             Best regards,\n\
             {company} Team\n",
            name = appt.contact.name,
            company = company.name,
            date = appt.scheduled_date,
            time = appt.scheduled_time,
            phone = company.phone,
            email = company.email,
        ),
    }
}

/// Staff notification for a new appointment lead.
pub fn appointment_lead(company: &CompanyConfig, appt: &Appointment) -> Notification {
    Notification {
        to: company.email.clone(),
        subject: "New Appointment Lead Received".to_string(),
        body: format!(
            "New appointment request received.\n\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Company: {org}\n\n\
             Preferred Date: {date}\n\
             Preferred Time: {time}\n\
             Duration: {duration} minutes\n\
             Purpose: {purpose}\n\n\
             Please follow up with the customer.\n",
            name = appt.contact.name,
            email = appt.contact.email,
            phone = or_dash(&appt.contact.phone),
            org = or_dash(&appt.contact.company),
            date = appt.scheduled_date,
            time = appt.scheduled_time,
            duration = appt.duration,
            purpose = appt.purpose,
        ),
    }
}

/// Auto-reply sent to a visitor who submitted the contact form.
pub fn contact_auto_reply(company: &CompanyConfig, contact: &ContactInfo) -> Notification {
    Notification {
        to: contact.email.clone(),
        subject: format!("Thanks for contacting {}", company.name),
        body: format!(
            "Hello {},\n\nThanks for contacting us. Our team will call you shortly.\n\n{} Team\n",
            contact.name, company.name
        ),
    }
}

/// Staff notification for a new contact-form lead.
pub fn contact_lead(company: &CompanyConfig, contact: &ContactInfo) -> Notification {
    Notification {
        to: company.email.clone(),
        subject: "New Contact Lead".to_string(),
        body: format!(
            "Name: {}\nEmail: {}\nPhone: {}\nCompany: {}\nMessage: {}\n",
            contact.name,
            contact.email,
            or_dash(&contact.phone),
            or_dash(&contact.company),
            or_dash(&contact.notes),
        ),
    }
}

/// Delayed reminder asking staff to call a lead back.
pub fn callback_reminder(company: &CompanyConfig, lead: &CallbackLead) -> Notification {
    Notification {
        to: company.email.clone(),
        subject: "Callback Reminder - New Lead".to_string(),
        body: format!(
            "Reminder!\n\n\
             You have a pending lead callback.\n\n\
             Name: {}\n\
             Phone: {}\n\
             Email: {}\n\n\
             Please call the client as soon as possible.\n",
            lead.name,
            or_dash(&lead.phone),
            lead.email,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use receptionist_core::types::AppointmentStatus;
    use uuid::Uuid;

    fn make_contact() -> ContactInfo {
        ContactInfo {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+44 20 7946 0000".to_string()),
            company: None,
            notes: Some("Need a quote".to_string()),
        }
    }

    fn make_appointment() -> Appointment {
        let now = Utc::now();
        Appointment {
            id: Uuid::new_v4(),
            contact: make_contact(),
            scheduled_date: "2026-10-21".to_string(),
            scheduled_time: "10:00".to_string(),
            duration: 30,
            purpose: "Mobile app scoping".to_string(),
            status: AppointmentStatus::Pending,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_appointment_auto_reply_goes_to_visitor() {
        let company = CompanyConfig::default();
        let n = appointment_auto_reply(&company, &make_appointment());
        assert_eq!(n.to, "ada@example.com");
        assert_eq!(n.subject, "Thanks for contacting Softechsol");
        assert!(n.body.contains("Hello Ada"));
        assert!(n.body.contains(&company.phone));
    }

    #[test]
    fn test_appointment_lead_goes_to_company() {
        let company = CompanyConfig::default();
        let n = appointment_lead(&company, &make_appointment());
        assert_eq!(n.to, company.email);
        assert!(n.body.contains("Purpose: Mobile app scoping"));
        assert!(n.body.contains("Company: -"));
    }

    #[test]
    fn test_contact_templates() {
        let company = CompanyConfig::default();
        let contact = make_contact();
        assert_eq!(contact_auto_reply(&company, &contact).to, "ada@example.com");

        let lead = contact_lead(&company, &contact);
        assert_eq!(lead.to, company.email);
        assert!(lead.body.contains("Message: Need a quote"));
    }

    #[test]
    fn test_callback_reminder_body() {
        let company = CompanyConfig::default();
        let lead = CallbackLead {
            name: "Ada".to_string(),
            phone: None,
            email: "ada@example.com".to_string(),
        };
        let n = callback_reminder(&company, &lead);
        assert_eq!(n.to, company.email);
        assert!(n.body.contains("Phone: -"));
        assert!(n.body.contains("Email: ada@example.com"));
    }
}
