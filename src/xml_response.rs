// Wire structures for the <booking> answer and their conversion into the
// pricing model. The domain types never see serde attributes.

use crate::booking::{Booking, Contact, Customer, Passenger, Segment, SegmentPoint, TravelDocument};
use crate::error::SdkError;
use crate::ledger::{
    FareCode, FareDetail, MonetaryValue, PaymentInfo, PriceDetails, PriceLedger, PriceLine, TaxLine,
    VariantTotal, VatInfo,
};
use quick_xml::de::from_str;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Decode a <booking> answer into a booking with its price ledger
pub fn decode_booking(xml: &str) -> Result<Booking, SdkError> {
    let response: XmlBookingResponse =
        from_str(xml).map_err(|e| SdkError::XmlParse(e.to_string()))?;
    let mut answer = response.answer;

    if let Some(error) = answer.error.or_else(|| answer.booking.error.take()) {
        warn!(code = %error.code, message = %error.message, "booking answer carries an error");
        return Err(error.into());
    }

    let booking: Booking = answer.booking.into();
    debug!(
        regnum = %booking.regnum,
        price_lines = booking.prices.lines().len(),
        "decoded booking answer"
    );
    Ok(booking)
}

// Decode an answer that only reports success or an <error>, such as the
// reply to <set_agent_discount>
pub fn decode_acknowledgement(xml: &str) -> Result<(), SdkError> {
    let response: XmlAckResponse =
        from_str(xml).map_err(|e| SdkError::XmlParse(e.to_string()))?;
    let mut answer = response.answer;

    match answer.error.or_else(|| answer.set_agent_discount.error.take()) {
        Some(error) => {
            warn!(code = %error.code, message = %error.message, "answer carries an error");
            Err(error.into())
        }
        None => Ok(()),
    }
}

fn parse_amount(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

fn parse_id(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

#[derive(Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
#[serde(rename = "sirena")]
pub struct XmlBookingResponse {
    pub answer: XmlAnswer,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlAnswer {
    #[serde(rename = "@pult")]
    pub pult: String,
    #[serde(rename = "@msgid")]
    pub msg_id: String,
    #[serde(rename = "@time")]
    pub time: String,
    #[serde(rename = "@instance")]
    pub instance: String,
    pub booking: XmlBooking,
    pub error: Option<XmlError>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
#[serde(rename = "sirena")]
pub struct XmlAckResponse {
    pub answer: XmlAckAnswer,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlAckAnswer {
    pub set_agent_discount: XmlAckBody,
    pub error: Option<XmlError>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlAckBody {
    pub error: Option<XmlError>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlBooking {
    #[serde(rename = "@regnum")]
    pub regnum: String,
    #[serde(rename = "@agency")]
    pub agency: String,
    pub pnr: XmlPnr,
    pub contacts: XmlContacts,
    pub error: Option<XmlError>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlContacts {
    #[serde(rename = "contact")]
    pub contacts: Vec<XmlContact>,
    pub customer: XmlCustomer,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlContact {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "$value")]
    pub value: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlCustomer {
    pub firstname: String,
    pub lastname: String,
}

impl From<XmlContact> for Contact {
    fn from(item: XmlContact) -> Self {
        Contact {
            kind: item.kind,
            value: item.value.trim().to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlError {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "$value")]
    pub message: String,
}

impl From<XmlError> for SdkError {
    fn from(item: XmlError) -> Self {
        SdkError::Remote {
            code: item.code.trim().parse().unwrap_or(0),
            message: item.message.trim().to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlPnr {
    pub regnum: String,
    pub utc_timelimit: String,
    pub timelimit: String,
    pub latin_registration: String,
    pub version: String,
    pub segments: XmlSegments,
    pub passengers: XmlPassengers,
    pub prices: XmlPrices,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlSegments {
    #[serde(rename = "segment")]
    pub segments: Vec<XmlSegment>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlSegment {
    #[serde(rename = "@id")]
    pub id: String,
    pub company: String,
    pub flight: String,
    pub subclass: String,
    pub departure: XmlSegmentPoint,
    pub arrival: XmlSegmentPoint,
    pub status: XmlStatus,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlSegmentPoint {
    pub city: String,
    pub airport: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlStatus {
    #[serde(rename = "@text")]
    pub text: String,
    #[serde(rename = "$value")]
    pub status: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlPassengers {
    #[serde(rename = "passenger")]
    pub passengers: Vec<XmlPassenger>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlPassenger {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@lead_pass")]
    pub lead_pass: String,
    pub name: String,
    pub surname: String,
    pub sex: String,
    pub birthdate: String,
    pub age: String,
    pub doccode: String,
    pub doc: String,
    pub pspexpire: String,
    pub category: XmlCategory,
    pub doc_country: String,
    pub nationality: String,
    pub residence: String,
    pub contacts: XmlContacts,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlCategory {
    #[serde(rename = "@rbm")]
    pub rbm: String,
    #[serde(rename = "$value")]
    pub value: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlPrices {
    #[serde(rename = "@tick_ser")]
    pub tick_ser: String,
    #[serde(rename = "@fop")]
    pub fop: String,
    #[serde(rename = "price")]
    pub prices: Vec<XmlPrice>,
    pub variant_total: XmlValue,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlPrice {
    #[serde(rename = "@segment-id")]
    pub segment_id: String,
    #[serde(rename = "@passenger-id")]
    pub passenger_id: String,
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "@orig_code")]
    pub orig_code: String,
    #[serde(rename = "@count")]
    pub count: String,
    #[serde(rename = "@currency")]
    pub currency: String,
    #[serde(rename = "@fc")]
    pub fare_calculation: String,
    #[serde(rename = "@baggage")]
    pub baggage: String,
    #[serde(rename = "@ticket")]
    pub ticket: String,
    #[serde(rename = "@validating_company")]
    pub validating_company: String,
    #[serde(rename = "@brand")]
    pub brand: String,
    pub fare: XmlFare,
    pub taxes: XmlTaxes,
    pub payment_info: XmlPaymentInfo,
    pub total: String,
    pub vat: Option<XmlVat>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlFare {
    #[serde(rename = "@remark")]
    pub remark: String,
    #[serde(rename = "@fare_expdate")]
    pub fare_expdate: String,
    pub value: XmlValue,
    pub code: XmlFareCode,
}

// <value currency="..">amount</value>, also used for <variant_total>
#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlValue {
    #[serde(rename = "@currency")]
    pub currency: String,
    #[serde(rename = "$value")]
    pub value: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlFareCode {
    #[serde(rename = "@base_code")]
    pub base_code: String,
    #[serde(rename = "$value")]
    pub code: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlTaxes {
    #[serde(rename = "tax")]
    pub taxes: Vec<XmlTax>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlTax {
    #[serde(rename = "@owner")]
    pub owner: String,
    pub code: String,
    pub value: XmlValue,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlPaymentInfo {
    pub payment: XmlPayment,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlPayment {
    #[serde(rename = "@fop")]
    pub fop: String,
    #[serde(rename = "@curr")]
    pub curr: String,
    #[serde(rename = "$value")]
    pub payment: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default)]
pub struct XmlVat {
    #[serde(rename = "@rate")]
    pub rate: String,
    pub value: Option<XmlValue>,
}

impl From<XmlValue> for MonetaryValue {
    fn from(item: XmlValue) -> Self {
        MonetaryValue {
            amount: parse_amount(&item.value),
            currency: item.currency,
        }
    }
}

impl From<XmlVat> for VatInfo {
    fn from(item: XmlVat) -> Self {
        let rate = item.rate.trim();
        VatInfo {
            rate: if rate.is_empty() { None } else { rate.parse().ok() },
            amount: item.value.map(MonetaryValue::from),
        }
    }
}

impl From<XmlPrice> for PriceLine {
    fn from(item: XmlPrice) -> Self {
        PriceLine {
            segment_id: parse_id(&item.segment_id),
            passenger_id: parse_id(&item.passenger_id),
            code: item.code,
            currency: item.currency,
            fare: FareDetail {
                remark: item.fare.remark,
                expiry_date: item.fare.fare_expdate,
                value: item.fare.value.into(),
                code: FareCode {
                    code: item.fare.code.code,
                    base_code: item.fare.code.base_code,
                },
            },
            taxes: item
                .taxes
                .taxes
                .into_iter()
                .map(|tax| TaxLine {
                    owner: tax.owner,
                    code: tax.code,
                    value: tax.value.into(),
                })
                .collect(),
            payment: PaymentInfo {
                form_of_payment: item.payment_info.payment.fop,
                currency: item.payment_info.payment.curr,
                amount: parse_amount(&item.payment_info.payment.payment),
            },
            details: PriceDetails {
                orig_code: item.orig_code,
                count: parse_id(&item.count),
                fare_calculation: item.fare_calculation,
                baggage: item.baggage,
                ticket: item.ticket,
                validating_company: item.validating_company,
                brand: item.brand,
            },
            total: parse_amount(&item.total),
            vat: item.vat.map(VatInfo::from),
        }
    }
}

impl From<XmlPrices> for PriceLedger {
    fn from(item: XmlPrices) -> Self {
        let variant_total = VariantTotal {
            amount: parse_amount(&item.variant_total.value),
            currency: item.variant_total.currency,
        };
        PriceLedger::new(
            item.prices.into_iter().map(PriceLine::from).collect(),
            variant_total,
        )
    }
}

impl From<XmlSegmentPoint> for SegmentPoint {
    fn from(item: XmlSegmentPoint) -> Self {
        SegmentPoint {
            city: item.city,
            airport: item.airport,
            date: item.date,
            time: item.time,
        }
    }
}

impl From<XmlBooking> for Booking {
    fn from(item: XmlBooking) -> Self {
        let pnr = item.pnr;
        let regnum = if pnr.regnum.is_empty() {
            item.regnum
        } else {
            pnr.regnum
        };

        Booking {
            regnum,
            agency: item.agency,
            version: parse_id(&pnr.version),
            utc_timelimit: pnr.utc_timelimit,
            timelimit: pnr.timelimit,
            latin_registration: parse_flag(&pnr.latin_registration),
            passengers: pnr
                .passengers
                .passengers
                .into_iter()
                .map(|p| Passenger {
                    id: parse_id(&p.id),
                    lead: parse_flag(&p.lead_pass),
                    name: p.name,
                    surname: p.surname,
                    birthdate: p.birthdate,
                    sex: p.sex,
                    age: parse_id(&p.age),
                    category: p.category.value,
                    document: TravelDocument {
                        code: p.doccode,
                        number: p.doc,
                        expiry: p.pspexpire,
                        country: p.doc_country,
                    },
                    nationality: p.nationality,
                    residence: p.residence,
                    contacts: p.contacts.contacts.into_iter().map(Contact::from).collect(),
                })
                .collect(),
            segments: pnr
                .segments
                .segments
                .into_iter()
                .map(|s| Segment {
                    id: parse_id(&s.id),
                    company: s.company,
                    flight: s.flight,
                    subclass: s.subclass,
                    departure: s.departure.into(),
                    arrival: s.arrival.into(),
                    status: s.status.status,
                })
                .collect(),
            ticket_series: pnr.prices.tick_ser.clone(),
            form_of_payment: pnr.prices.fop.clone(),
            prices: pnr.prices.into(),
            contacts: item
                .contacts
                .contacts
                .into_iter()
                .map(Contact::from)
                .collect(),
            customer: Customer {
                first_name: item.contacts.customer.firstname,
                last_name: item.contacts.customer.lastname,
            },
        }
    }
}

// Sample file path (relative to the crate root)
pub const SAMPLE_BOOKING_PATH: &str = "samples/booking_response.xml";

// A small sample for inline testing
pub const SMALL_SAMPLE_XML: &str = r#"
<sirena>
  <answer pult="ГРС001" msgid="17" time="10:15:41 18.06.2025" instance="ГРС">
    <booking regnum="08VXKT" agency="12345">
      <pnr>
        <regnum>08VXKT</regnum>
        <utc_timelimit>18:45 21.06.2025</utc_timelimit>
        <timelimit>21:45 21.06.2025</timelimit>
        <latin_registration>true</latin_registration>
        <version>1</version>
        <segments>
          <segment id="0">
            <company>UT</company>
            <flight>369</flight>
            <subclass>Y</subclass>
            <departure><city>MOW</city><airport>VKO</airport><date>01.07.2025</date><time>08:10</time></departure>
            <arrival><city>LED</city><airport>PUL</airport><date>01.07.2025</date><time>09:40</time></arrival>
            <status text="confirmed">HK</status>
          </segment>
        </segments>
        <passengers>
          <passenger id="1" lead_pass="true">
            <name>IVAN</name>
            <surname>IVANOV</surname>
            <birthdate>01.01.1980</birthdate>
            <category rbm="0">ADT</category>
          </passenger>
        </passengers>
        <prices tick_ser="ЭБМ" fop="cash">
          <price segment-id="0" passenger-id="1" code="ADT" orig_code="ААА" count="1" currency="RUB" fc="MOW UT LED3000RUB3000END" baggage="1PC" ticket="2981234567890" validating_company="UT" brand="LITE">
            <fare remark="" fare_expdate="2025-12-31">
              <value currency="RUB">3000</value>
              <code base_code="YOW">YOW</code>
            </fare>
            <taxes>
              <tax owner="UT"><code>YQ</code><value currency="RUB">500</value></tax>
              <tax owner="RU"><code>RI</code><value currency="RUB">200.50</value></tax>
            </taxes>
            <payment_info>
              <payment fop="cash" curr="RUB">3700.50</payment>
            </payment_info>
            <total>3700.50</total>
            <vat rate="10"><value currency="RUB">336.41</value></vat>
          </price>
          <variant_total currency="RUB">3700.50</variant_total>
        </prices>
      </pnr>
    </booking>
  </answer>
</sirena>
"#;
