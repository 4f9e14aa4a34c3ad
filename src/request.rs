// Request documents sent to the reservation system

use crate::error::SdkError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub regnum: String,
    pub surname: String,
    // PNR version to read, latest when None
    pub version: Option<u32>,
    pub lang: String,
}

impl BookingRequest {
    pub fn new(regnum: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            regnum: regnum.into(),
            surname: surname.into(),
            version: None,
            lang: "en".to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename = "sirena")]
pub struct XmlBookingRequest {
    pub query: XmlBookingQuery,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlBookingQuery {
    pub booking: XmlBookingBody,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlBookingBody {
    pub regnum: XmlRegnum,
    pub surname: String,
    pub answer_params: XmlAnswerParams,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlRegnum {
    #[serde(rename = "@version", skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(rename = "$value")]
    pub value: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlAnswerParams {
    pub lang: String,
}

impl From<&BookingRequest> for XmlBookingRequest {
    fn from(item: &BookingRequest) -> Self {
        XmlBookingRequest {
            query: XmlBookingQuery {
                booking: XmlBookingBody {
                    regnum: XmlRegnum {
                        version: item.version,
                        value: item.regnum.clone(),
                    },
                    surname: item.surname.clone(),
                    answer_params: XmlAnswerParams {
                        lang: item.lang.clone(),
                    },
                },
            },
        }
    }
}

pub fn encode_request(request: &BookingRequest) -> Result<String, SdkError> {
    let xml_request = XmlBookingRequest::from(request);
    quick_xml::se::to_string(&xml_request).map_err(|e| SdkError::Encode(e.to_string()))
}

// Agent discount applied to fares of an existing PNR
#[derive(Debug, Clone, PartialEq)]
pub struct SetAgentDiscountRequest {
    pub regnum: String,
    pub version: u32,
    pub fares: Vec<DiscountFare>,
    pub ticket_series: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscountFare {
    pub discount: i32,
    pub brand: String,
    pub fare_code: String,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename = "sirena")]
pub struct XmlSetAgentDiscountRequest {
    pub query: XmlSetAgentDiscountQuery,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlSetAgentDiscountQuery {
    pub set_agent_discount: XmlSetAgentDiscount,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlSetAgentDiscount {
    pub regnum: XmlRegnum,
    #[serde(rename = "unit")]
    pub units: Vec<XmlDiscountUnit>,
    pub request_params: XmlRequestParams,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlDiscountUnit {
    pub fare: XmlDiscountFare,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlDiscountFare {
    #[serde(rename = "@discount")]
    pub discount: i32,
    #[serde(rename = "@brand", skip_serializing_if = "String::is_empty")]
    pub brand: String,
    #[serde(rename = "$value")]
    pub value: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct XmlRequestParams {
    pub tick_ser: String,
}

impl From<&SetAgentDiscountRequest> for XmlSetAgentDiscountRequest {
    fn from(item: &SetAgentDiscountRequest) -> Self {
        XmlSetAgentDiscountRequest {
            query: XmlSetAgentDiscountQuery {
                set_agent_discount: XmlSetAgentDiscount {
                    regnum: XmlRegnum {
                        version: Some(item.version),
                        value: item.regnum.clone(),
                    },
                    units: item
                        .fares
                        .iter()
                        .map(|fare| XmlDiscountUnit {
                            fare: XmlDiscountFare {
                                discount: fare.discount,
                                brand: fare.brand.clone(),
                                value: fare.fare_code.clone(),
                            },
                        })
                        .collect(),
                    request_params: XmlRequestParams {
                        tick_ser: item.ticket_series.clone(),
                    },
                },
            },
        }
    }
}

pub fn encode_set_agent_discount(request: &SetAgentDiscountRequest) -> Result<String, SdkError> {
    let xml_request = XmlSetAgentDiscountRequest::from(request);
    quick_xml::se::to_string(&xml_request).map_err(|e| SdkError::Encode(e.to_string()))
}
