//! Read-side stock computation: how many units of each toy remain bookable
//! on a given date. Never persisted and never enforced on write; bookings
//! that oversubscribe a toy simply show up here as zero (or negative)
//! availability.

use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::toys::repo::Toy;

use super::repo::{Rental, RentalStatus};

#[derive(Debug, Serialize)]
pub struct ToyAvailability {
    pub toy_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub booked: i32,
    pub available: i32,
    pub is_available: bool,
}

/// For each toy: booked = count of non-cancelled rentals on `date` whose
/// toy list references it; available = quantity - booked.
pub fn availability_for_date(toys: &[Toy], rentals: &[Rental], date: Date) -> Vec<ToyAvailability> {
    toys.iter()
        .map(|toy| {
            let booked = rentals
                .iter()
                .filter(|r| {
                    r.date == date
                        && r.status != RentalStatus::Cancelled
                        && r.toy_ids.contains(&toy.id)
                })
                .count() as i32;
            let available = toy.quantity - booked;
            ToyAvailability {
                toy_id: toy.id,
                name: toy.name.clone(),
                quantity: toy.quantity,
                booked,
                available,
                is_available: available > 0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toys::repo::ToyStatus;
    use time::macros::{date, time};
    use time::OffsetDateTime;

    fn toy(id: Uuid, quantity: i32) -> Toy {
        Toy {
            id,
            name: "Castelo Inflavel".into(),
            category: "inflatables".into(),
            price: 250.0,
            quantity,
            size: Some("3x3m".into()),
            status: ToyStatus::Available,
            image_keys: vec![],
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn rental(toy_ids: Vec<Uuid>, date: Date, status: RentalStatus) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            date,
            start_time: time!(14:00),
            end_time: time!(18:00),
            toy_ids,
            total_value: 250.0,
            entry_value: 50.0,
            payment_method: "pix".into(),
            status,
            notes: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn available_equals_quantity_minus_same_date_bookings() {
        let toy_id = Uuid::new_v4();
        let target = date!(2026 - 09 - 12);
        let toys = vec![toy(toy_id, 3)];
        let rentals = vec![
            rental(vec![toy_id], target, RentalStatus::Confirmed),
            rental(vec![toy_id], target, RentalStatus::Pending),
            rental(vec![toy_id], date!(2026 - 09 - 13), RentalStatus::Confirmed),
        ];

        let avail = availability_for_date(&toys, &rentals, target);
        assert_eq!(avail.len(), 1);
        assert_eq!(avail[0].booked, 2);
        assert_eq!(avail[0].available, 1);
        assert!(avail[0].is_available);
    }

    #[test]
    fn cancelled_bookings_do_not_consume_stock() {
        let toy_id = Uuid::new_v4();
        let target = date!(2026 - 09 - 12);
        let toys = vec![toy(toy_id, 1)];
        let rentals = vec![rental(vec![toy_id], target, RentalStatus::Cancelled)];

        let avail = availability_for_date(&toys, &rentals, target);
        assert_eq!(avail[0].booked, 0);
        assert_eq!(avail[0].available, 1);
    }

    #[test]
    fn fully_booked_toy_is_unavailable() {
        let toy_id = Uuid::new_v4();
        let target = date!(2026 - 09 - 12);
        let toys = vec![toy(toy_id, 1)];
        let rentals = vec![rental(vec![toy_id], target, RentalStatus::Confirmed)];

        let avail = availability_for_date(&toys, &rentals, target);
        assert_eq!(avail[0].available, 0);
        assert!(!avail[0].is_available);
    }

    #[test]
    fn rentals_not_referencing_the_toy_are_ignored() {
        let toy_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let target = date!(2026 - 09 - 12);
        let toys = vec![toy(toy_id, 2)];
        let rentals = vec![rental(vec![other], target, RentalStatus::Confirmed)];

        let avail = availability_for_date(&toys, &rentals, target);
        assert_eq!(avail[0].booked, 0);
        assert_eq!(avail[0].available, 2);
    }

    #[test]
    fn oversubscription_surfaces_as_negative_availability() {
        // Writes are not blocked, so the read side must tolerate more
        // bookings than stock.
        let toy_id = Uuid::new_v4();
        let target = date!(2026 - 09 - 12);
        let toys = vec![toy(toy_id, 1)];
        let rentals = vec![
            rental(vec![toy_id], target, RentalStatus::Confirmed),
            rental(vec![toy_id], target, RentalStatus::Confirmed),
        ];

        let avail = availability_for_date(&toys, &rentals, target);
        assert_eq!(avail[0].available, -1);
        assert!(!avail[0].is_available);
    }
}
