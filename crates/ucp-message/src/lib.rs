//! UCP/EMI message layer.
//!
//! Interprets the body of a validated frame according to its header:
//!
//! | Operation | Role | Body                  |
//! |-----------|------|-----------------------|
//! | `31`      | `O`  | [`AddressInfoRequest`] |
//! | `60`      | `O`  | [`SessionRequest`]     |
//! | `51`-`53` | `O`  | [`SubmitShortMessage`] |
//! | any       | `R`  | [`Ack`] or [`Nack`]    |
//!
//! ```
//! use ucp_frame::FrameConfig;
//! use ucp_message::{Body, Message, SubmitShortMessage};
//!
//! let submit = SubmitShortMessage::text("0612345678", "orange.pl", "Hello");
//! let message = Message::operation(1, "51", Body::SubmitShortMessage(submit));
//! let wire = message.encode(&FrameConfig::default()).unwrap();
//!
//! let decoded = Message::decode(&wire, &FrameConfig::default()).unwrap();
//! assert_eq!(decoded.body, message.body);
//! ```

pub mod address;
pub mod body;
pub mod error;
pub mod message;
pub mod nack;
pub mod submit;

pub use address::{decode_sender, decode_sender_with, encode_sender, encode_sender_with, ALPHANUMERIC_OTOA};
pub use body::{parse_body, parse_body_with, Ack, AddressInfoRequest, Body, Nack, SessionRequest, SubmitShortMessage};
pub use error::{MessageError, Result};
pub use message::{create_message, respond, Message};
pub use nack::NackCode;
pub use submit::{concat_user_data_header, split_for_concatenation};
