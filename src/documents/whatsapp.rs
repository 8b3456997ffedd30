//! Deep-links into WhatsApp with a pre-filled message. Pure URL
//! construction; there is no API integration behind this.

use serde::Serialize;

use crate::customers::repo::Customer;
use crate::rentals::repo::Rental;
use crate::settings::repo::CompanySettings;
use crate::toys::repo::Toy;

#[derive(Debug, Serialize)]
pub struct WhatsAppLink {
    pub phone: String,
    pub text: String,
    pub url: String,
}

/// Strip formatting from a stored phone number; wa.me only accepts digits.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Minimal percent-encoding for the `text` query parameter: everything but
/// unreserved characters is escaped.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

pub fn wa_link(phone: &str, text: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        phone_digits(phone),
        percent_encode(text)
    )
}

/// Booking summary sent to the customer.
pub fn rental_message(
    company: &CompanySettings,
    customer: &Customer,
    rental: &Rental,
    toys: &[Toy],
) -> String {
    let items = toys
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Ola {}! Aqui e da {}. Sua reserva para {} ({} - {}) esta confirmada: {}. Total: R$ {:.2}, entrada: R$ {:.2}.",
        customer.name,
        company.name,
        rental.date,
        rental.start_time,
        rental.end_time,
        items,
        rental.total_value,
        rental.entry_value,
    )
}

pub fn link_for_rental(
    company: &CompanySettings,
    customer: &Customer,
    rental: &Rental,
    toys: &[Toy],
) -> WhatsAppLink {
    let text = rental_message(company, customer, rental, toys);
    WhatsAppLink {
        phone: phone_digits(&customer.phone),
        url: wa_link(&customer.phone, &text),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_is_reduced_to_digits() {
        assert_eq!(phone_digits("+55 (11) 99999-0000"), "5511999990000");
    }

    #[test]
    fn encoding_escapes_reserved_characters() {
        assert_eq!(percent_encode("a b&c"), "a%20b%26c");
        assert_eq!(percent_encode("safe-chars_.~"), "safe-chars_.~");
    }

    #[test]
    fn link_contains_digits_and_encoded_payload_only() {
        let url = wa_link("+55 11 98888-7777", "Ola Maria!");
        assert_eq!(url, "https://wa.me/5511988887777?text=Ola%20Maria%21");
    }
}
