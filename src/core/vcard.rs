//! vCard 3.0 payloads for the virtual business card QR code.
//!
//! Only the text payload is produced here; rendering it as a QR image is left
//! to the presentation layer.

use crate::models::{MyBusinessCard, User};

/// Contact fields of a vCard. Blank optional fields produce no line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct VCard {
    pub full_name: String,
    pub organization: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
}

impl VCard {
    /// Card for the signed-in user; the URL is their LinkedIn profile.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.name.clone(),
            email: Some(user.email.clone()),
            phone: user.phone_number.clone(),
            url: user.linked_in_profile.clone(),
            ..Self::default()
        }
    }

    /// Card for the user's own business card.
    #[must_use]
    pub fn from_business_card(card: &MyBusinessCard) -> Self {
        Self {
            full_name: card.name.clone(),
            organization: Some(card.company.clone()),
            title: Some(card.position.clone()),
            email: Some(card.email.clone()),
            phone: Some(card.phone.clone()),
            url: card.website.clone(),
            address: card.address.clone(),
        }
    }

    /// Renders the card as newline-separated vCard 3.0 text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = vec![
            "BEGIN:VCARD".to_string(),
            "VERSION:3.0".to_string(),
            format!("FN:{}", escape(&self.full_name)),
        ];

        let optional = [
            ("ORG", &self.organization),
            ("TITLE", &self.title),
            ("EMAIL", &self.email),
            ("TEL", &self.phone),
            ("URL", &self.url),
        ];
        for (name, value) in optional {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                lines.push(format!("{name}:{}", escape(value)));
            }
        }

        // ADR is structured; the free-text address goes in the street component.
        if let Some(address) = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
        {
            lines.push(format!("ADR:;;{};;;;", escape(address)));
        }

        lines.push("END:VCARD".to_string());
        lines.join("\n")
    }
}

/// Escapes text per RFC 2426: backslash, comma, semicolon and newlines.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::test_utils::*;

    #[test]
    fn test_user_card_renders_all_fields() {
        let mut user = sample_user();
        user.phone_number = Some("+1-555-0100".to_string());
        user.linked_in_profile = Some("https://linkedin.com/in/alex".to_string());

        assert_eq!(
            VCard::from_user(&user).render(),
            "BEGIN:VCARD\n\
             VERSION:3.0\n\
             FN:Alex Traveler\n\
             EMAIL:alex@example.com\n\
             TEL:+1-555-0100\n\
             URL:https://linkedin.com/in/alex\n\
             END:VCARD"
        );
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let mut user = sample_user();
        user.phone_number = Some("   ".to_string());

        let rendered = VCard::from_user(&user).render();
        assert!(!rendered.contains("TEL:"));
        assert!(!rendered.contains("URL:"));
        assert!(!rendered.contains("undefined"));
    }

    #[test]
    fn test_business_card_escapes_special_characters() {
        let card = AppConfig::default().my_business_card;
        let rendered = VCard::from_business_card(&card).render();

        assert!(rendered.contains("ORG:Tech Solutions Inc."));
        assert!(rendered.contains("TITLE:Senior Product Manager"));
        assert!(rendered.contains("ADR:;;San Francisco\\, CA;;;;"));
        assert!(rendered.ends_with("END:VCARD"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a;b,c\\d\r\ne"), "a\\;b\\,c\\\\d\\ne");
    }
}
