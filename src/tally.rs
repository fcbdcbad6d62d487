//! Attendance totals per response category.

use serde::Serialize;

use crate::models::ResponseType;
use crate::store::{RsvpStore, StoreResult};

/// Summed guest counts. Every category is always present, zero when nobody
/// picked it.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    #[serde(rename = "YES")]
    pub yes: i64,
    #[serde(rename = "MAYBE")]
    pub maybe: i64,
    #[serde(rename = "NO")]
    pub no: i64,
}

impl Tally {
    pub fn get(&self, response: ResponseType) -> i64 {
        match response {
            ResponseType::Yes => self.yes,
            ResponseType::Maybe => self.maybe,
            ResponseType::No => self.no,
        }
    }

    fn slot(&mut self, response: ResponseType) -> &mut i64 {
        match response {
            ResponseType::Yes => &mut self.yes,
            ResponseType::Maybe => &mut self.maybe,
            ResponseType::No => &mut self.no,
        }
    }

    /// Folds per-category sums onto a zeroed tally.
    pub fn from_sums(sums: impl IntoIterator<Item = (ResponseType, i64)>) -> Self {
        sums.into_iter().fold(Tally::default(), |mut tally, (response, guests)| {
            *tally.slot(response) += guests;
            tally
        })
    }
}

/// Recomputed from the store on every call; nothing is cached.
pub async fn aggregate(store: &dyn RsvpStore, party_id: &str) -> StoreResult<Tally> {
    let sums = store.sum_by_response(party_id).await?;
    Ok(Tally::from_sums(sums))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::fixtures::party;
    use crate::models::Rsvp;
    use crate::store::MemoryStore;

    fn rsvp(id: &str, response: ResponseType, guests: i32) -> Rsvp {
        Rsvp {
            id: id.to_string(),
            party_id: "p1".to_string(),
            name: "Jo".to_string(),
            response,
            guests,
            message: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn missing_categories_are_zero() {
        let tally = Tally::from_sums([(ResponseType::Maybe, 4)]);
        assert_eq!(tally, Tally { yes: 0, maybe: 4, no: 0 });
        assert_eq!(tally.get(ResponseType::Yes), 0);
    }

    #[test]
    fn serializes_all_three_keys() {
        let json = serde_json::to_value(Tally::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "YES": 0, "MAYBE": 0, "NO": 0 }));
    }

    #[rocket::async_test]
    async fn empty_party_reports_zeroes() {
        let store = MemoryStore::new();
        assert_eq!(aggregate(&store, "p1").await.unwrap(), Tally::default());
    }

    #[rocket::async_test]
    async fn sums_guests_per_response_and_is_repeatable() {
        let store = MemoryStore::with_party(party("p1"));
        store.create(&rsvp("A", ResponseType::Yes, 3)).await.unwrap();
        store.create(&rsvp("B", ResponseType::Yes, 2)).await.unwrap();
        store.create(&rsvp("C", ResponseType::No, 1)).await.unwrap();

        let first = aggregate(&store, "p1").await.unwrap();
        assert_eq!(first, Tally { yes: 5, maybe: 0, no: 1 });
        assert_eq!(aggregate(&store, "p1").await.unwrap(), first);
    }
}
