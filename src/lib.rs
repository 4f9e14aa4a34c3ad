// Sirena XML SDK: booking retrieval and pricing aggregation

pub mod aggregation;
pub mod booking;
pub mod config;
pub mod dedup;
pub mod error;
pub mod ledger;
pub mod random;
pub mod request;
pub mod resolver;
pub mod service;
pub mod xml_response;

// Re-export key types for convenience
pub use aggregation::{PassengerCostSummary, PricingEngine};
pub use booking::{Booking, Contact, Customer, Passenger, Segment, SegmentPoint, TravelDocument};
pub use config::SdkConfig;
pub use dedup::dedupe_taxes;
pub use error::{ConfigError, PricingError, SdkError, TransportError};
pub use ledger::{
    FareCode, FareDetail, MonetaryValue, PassengerId, PaymentInfo, PriceDetails, PriceLedger, PriceLine,
    SegmentId, TaxLine, VariantTotal, VatInfo,
};
pub use request::{
    encode_request, encode_set_agent_discount, BookingRequest, DiscountFare, SetAgentDiscountRequest,
};
pub use resolver::{resolve_passenger, AllOfTypeResolver, FirstMatchResolver, PassengerResolver};
pub use service::{Request, SirenaService, Transport};
pub use xml_response::{decode_acknowledgement, decode_booking};
