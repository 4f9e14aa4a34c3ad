// Decoded booking (PNR) as returned by a <booking> query

use crate::ledger::{PassengerId, PriceLedger, SegmentId};
use chrono::NaiveDateTime;

// Protocol-native time formats
pub const TIME_DATE_FORMAT: &str = "%H:%M %d.%m.%Y";
pub const DATE_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Booking {
    pub regnum: String,
    pub agency: String,
    pub version: u32,
    pub utc_timelimit: String,
    pub timelimit: String,
    pub latin_registration: bool,
    pub passengers: Vec<Passenger>,
    pub segments: Vec<Segment>,
    pub ticket_series: String,
    pub form_of_payment: String,
    pub prices: PriceLedger,
    pub contacts: Vec<Contact>,
    pub customer: Customer,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contact {
    // "phone", "email", ...
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Passenger {
    pub id: PassengerId,
    pub lead: bool,
    pub name: String,
    pub surname: String,
    pub birthdate: String,
    pub sex: String,
    pub age: u32,
    // Passenger-type category, matches PriceLine::code
    pub category: String,
    pub document: TravelDocument,
    pub nationality: String,
    pub residence: String,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TravelDocument {
    pub code: String,
    pub number: String,
    // Protocol-native date, not reparsed
    pub expiry: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
    pub id: SegmentId,
    pub company: String,
    pub flight: String,
    pub subclass: String,
    pub departure: SegmentPoint,
    pub arrival: SegmentPoint,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentPoint {
    pub city: String,
    pub airport: String,
    pub date: String,
    pub time: String,
}

impl Booking {
    /// UTC ticketing time limit, `None` when absent or not in a known format.
    pub fn utc_time_limit(&self) -> Option<NaiveDateTime> {
        parse_protocol_datetime(&self.utc_timelimit)
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.iter().find(|p| p.id == id)
    }
}

pub fn parse_protocol_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIME_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT))
        .ok()
}
