// SDK facade: builds requests, hands them to a transport, decodes answers.
// Framing, encryption, compression and pooling live behind `Transport`.

use crate::booking::Booking;
use crate::config::SdkConfig;
use crate::error::{SdkError, TransportError};
use crate::random::message_id;
use crate::request::{encode_request, encode_set_agent_discount, BookingRequest, SetAgentDiscountRequest};
use crate::xml_response::{decode_acknowledgement, decode_booking};
use async_trait::async_trait;
use bytes::Bytes;
use futures::future::join_all;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub message_id: u32,
    pub body: Bytes,
}

// Sends one request document and returns the decoded (plain XML) answer
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: Request) -> Result<Bytes, TransportError>;
}

pub struct SirenaService<T: Transport, R: Rng + Send = StdRng> {
    transport: T,
    config: SdkConfig,
    rng: Mutex<R>,
}

impl<T: Transport, R: Rng + Send> SirenaService<T, R> {
    // The random source is supplied by the caller, seeded however they like
    pub fn new(transport: T, config: SdkConfig, rng: R) -> Result<Self, SdkError> {
        config.validate()?;
        Ok(Self {
            transport,
            config,
            rng: Mutex::new(rng),
        })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    fn next_message_id(&self) -> u32 {
        message_id(&mut *self.rng.lock())
    }

    #[instrument(skip(self, body), fields(len = body.len()))]
    pub async fn raw_request(&self, body: Bytes) -> Result<Bytes, SdkError> {
        let message_id = self.next_message_id();
        let request = Request { message_id, body };

        match tokio::time::timeout(self.config.request_timeout(), self.transport.send(request))
            .await
        {
            Ok(result) => {
                let response = result?;
                debug!(message_id, response_len = response.len(), "received answer");
                Ok(response)
            }
            Err(_) => {
                warn!(message_id, timeout_ms = self.config.request_timeout_ms, "request timed out");
                Err(SdkError::Timeout(self.config.request_timeout_ms))
            }
        }
    }

    pub async fn booking(&self, regnum: &str, surname: &str) -> Result<Booking, SdkError> {
        let mut request = BookingRequest::new(regnum, surname);
        request.lang = self.config.lang.clone();
        self.fetch_booking(&request).await
    }

    #[instrument(skip(self, request), fields(regnum = %request.regnum))]
    pub async fn fetch_booking(&self, request: &BookingRequest) -> Result<Booking, SdkError> {
        let xml = encode_request(request)?;
        let response = self.raw_request(Bytes::from(xml)).await?;
        let text = std::str::from_utf8(&response).map_err(|e| SdkError::XmlParse(e.to_string()))?;
        decode_booking(text)
    }

    #[instrument(skip(self, request), fields(regnum = %request.regnum, fares = request.fares.len()))]
    pub async fn set_agent_discount(&self, request: &SetAgentDiscountRequest) -> Result<(), SdkError> {
        let xml = encode_set_agent_discount(request)?;
        let response = self.raw_request(Bytes::from(xml)).await?;
        let text = std::str::from_utf8(&response).map_err(|e| SdkError::XmlParse(e.to_string()))?;
        decode_acknowledgement(text)
    }

    // Results come back in request order
    pub async fn bookings(&self, requests: &[BookingRequest]) -> Vec<Result<Booking, SdkError>> {
        join_all(requests.iter().map(|request| self.fetch_booking(request))).await
    }
}
