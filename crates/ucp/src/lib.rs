//! UCP/EMI codec for talking to SMS centres.
//!
//! # Crate Structure
//!
//! - [`gsm`]: GSM 03.38 alphabet and 7-bit septet packing
//! - [`frame`]: delimited, checksummed frames plus hex, semi-octet and counter helpers
//! - [`message`]: typed operation bodies, sender address codec and dispatch
//!
//! ```
//! use ucp::frame::FrameConfig;
//! use ucp::message::Message;
//!
//! let wire = b"\x0201/00023/R/31/A/0003/2A\x03";
//! let message = Message::decode(wire, &FrameConfig::default()).unwrap();
//! assert_eq!(message.header.operation_type, "31");
//! ```

/// Re-export alphabet types.
pub mod gsm {
    pub use ucp_gsm::*;
}

/// Re-export frame types.
pub mod frame {
    pub use ucp_frame::*;
}

/// Re-export message types.
pub mod message {
    pub use ucp_message::*;
}
