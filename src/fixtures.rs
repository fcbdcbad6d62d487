use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{Host, Location, Party, PartyDetails};

pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 7, 30)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

pub fn party(id: &str) -> PartyDetails {
    PartyDetails {
        party: Party {
            id: id.to_string(),
            name: "Corgi Party".to_string(),
            start_date: at(12, 0),
            end_date: at(16, 0),
            host_id: "h1".to_string(),
            location_id: "l1".to_string(),
        },
        host: Host {
            id: "h1".to_string(),
            first_name: "Atticus".to_string(),
            phone: "12025550171".to_string(),
        },
        location: Location {
            id: "l1".to_string(),
            name: "Boris & Horton".to_string(),
            address1: "195 Avenue A".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip: "10009".to_string(),
            cross_streets: Some("12th & Avenue A".to_string()),
            instructions: None,
        },
    }
}
