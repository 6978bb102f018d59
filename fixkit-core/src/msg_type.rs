/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message types and display-name resolution.
//!
//! This module provides:
//! - [`MsgType`]: Enumeration of standard FIX message types (tag 35)
//! - [`MsgTypeRegistry`]: Name lookup that also accepts custom registrations

use crate::error::UnknownType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Display name used when a message type cannot be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

macro_rules! msg_types {
    ($($variant:ident => $code:literal,)+) => {
        /// Standard FIX message types.
        ///
        /// Custom or less common message types are represented as `Custom(String)`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum MsgType {
            $(
                #[doc = concat!(stringify!($variant), " (", $code, ").")]
                $variant,
            )+
            /// Custom or unknown message type.
            Custom(String),
        }

        impl std::str::FromStr for MsgType {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $($code => Self::$variant,)+
                    other => Self::Custom(other.to_string()),
                })
            }
        }

        impl MsgType {
            /// Returns the tag 35 value of this message type.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Custom(s) => s.as_str(),
                }
            }

            /// Returns the FIX name of this message type.
            ///
            /// # Errors
            /// Returns [`UnknownType`] for `Custom` types.
            pub fn name(&self) -> Result<&'static str, UnknownType> {
                match self {
                    $(Self::$variant => Ok(stringify!($variant)),)+
                    Self::Custom(s) => Err(UnknownType(s.clone())),
                }
            }
        }
    };
}

msg_types! {
    Heartbeat => "0",
    TestRequest => "1",
    ResendRequest => "2",
    Reject => "3",
    SequenceReset => "4",
    Logout => "5",
    IndicationOfInterest => "6",
    Advertisement => "7",
    ExecutionReport => "8",
    OrderCancelReject => "9",
    Logon => "A",
    News => "B",
    Email => "C",
    NewOrderSingle => "D",
    NewOrderList => "E",
    OrderCancelRequest => "F",
    OrderCancelReplaceRequest => "G",
    OrderStatusRequest => "H",
    AllocationInstruction => "J",
    ListCancelRequest => "K",
    ListExecute => "L",
    ListStatusRequest => "M",
    ListStatus => "N",
    AllocationInstructionAck => "P",
    DontKnowTrade => "Q",
    QuoteRequest => "R",
    Quote => "S",
    SettlementInstructions => "T",
    MarketDataRequest => "V",
    MarketDataSnapshotFullRefresh => "W",
    MarketDataIncrementalRefresh => "X",
    MarketDataRequestReject => "Y",
    QuoteCancel => "Z",
    QuoteStatusRequest => "a",
    MassQuoteAcknowledgement => "b",
    SecurityDefinitionRequest => "c",
    SecurityDefinition => "d",
    SecurityStatusRequest => "e",
    SecurityStatus => "f",
    TradingSessionStatusRequest => "g",
    TradingSessionStatus => "h",
    MassQuote => "i",
    BusinessMessageReject => "j",
    BidRequest => "k",
    BidResponse => "l",
    ListStrikePrice => "m",
    XmlMessage => "n",
    RegistrationInstructions => "o",
    RegistrationInstructionsResponse => "p",
    OrderMassCancelRequest => "q",
    OrderMassCancelReport => "r",
    NewOrderCross => "s",
    CrossOrderCancelReplaceRequest => "t",
    CrossOrderCancelRequest => "u",
    SecurityTypeRequest => "v",
    SecurityTypes => "w",
    SecurityListRequest => "x",
    SecurityList => "y",
    DerivativeSecurityListRequest => "z",
}

impl MsgType {
    /// Returns true if this is an administrative (session level) message.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Heartbeat
                | Self::TestRequest
                | Self::ResendRequest
                | Self::Reject
                | Self::SequenceReset
                | Self::Logout
                | Self::Logon
        )
    }

    /// Returns true if this is an application message.
    #[must_use]
    pub fn is_app(&self) -> bool {
        !self.is_admin()
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolves tag 35 values to display names.
///
/// Standard types resolve through [`MsgType::name`]. Venue-specific types
/// can be registered and take precedence over the standard table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MsgTypeRegistry {
    custom: HashMap<String, String>,
}

impl MsgTypeRegistry {
    /// Creates a registry that only knows the standard FIX types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a display name for a message type.
    #[must_use]
    pub fn with(mut self, msg_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.register(msg_type, name);
        self
    }

    /// Registers a display name for a message type, replacing any previous one.
    pub fn register(&mut self, msg_type: impl Into<String>, name: impl Into<String>) {
        self.custom.insert(msg_type.into(), name.into());
    }

    /// Resolves a message type to its display name.
    ///
    /// # Errors
    /// Returns [`UnknownType`] if the type is neither registered nor standard.
    pub fn resolve<'a>(&'a self, msg_type: &str) -> Result<&'a str, UnknownType> {
        if let Some(name) = self.custom.get(msg_type) {
            return Ok(name.as_str());
        }
        let parsed: MsgType = match msg_type.parse() {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        };
        parsed.name()
    }

    /// Resolves a message type to its display name, or [`UNKNOWN_NAME`].
    #[must_use]
    pub fn display_name<'a>(&'a self, msg_type: Option<&str>) -> &'a str {
        msg_type
            .and_then(|t| self.resolve(t).ok())
            .unwrap_or(UNKNOWN_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_type_from_str() {
        assert_eq!("0".parse::<MsgType>().unwrap(), MsgType::Heartbeat);
        assert_eq!("A".parse::<MsgType>().unwrap(), MsgType::Logon);
        assert_eq!("D".parse::<MsgType>().unwrap(), MsgType::NewOrderSingle);
        assert_eq!("8".parse::<MsgType>().unwrap(), MsgType::ExecutionReport);
    }

    #[test]
    fn test_msg_type_as_str() {
        assert_eq!(MsgType::Heartbeat.as_str(), "0");
        assert_eq!(MsgType::Logon.as_str(), "A");
        assert_eq!(MsgType::NewOrderSingle.as_str(), "D");
    }

    #[test]
    fn test_msg_type_name() {
        assert_eq!(MsgType::NewOrderSingle.name().unwrap(), "NewOrderSingle");
        assert_eq!(
            MsgType::Custom("XX".to_string()).name(),
            Err(UnknownType("XX".to_string()))
        );
    }

    #[test]
    fn test_msg_type_is_admin() {
        assert!(MsgType::Heartbeat.is_admin());
        assert!(MsgType::Logon.is_admin());
        assert!(!MsgType::NewOrderSingle.is_admin());
        assert!(MsgType::ExecutionReport.is_app());
    }

    #[test]
    fn test_msg_type_custom() {
        let custom: MsgType = "XX".parse().unwrap();
        assert!(matches!(custom, MsgType::Custom(_)));
        assert_eq!(custom.as_str(), "XX");
    }

    #[test]
    fn test_registry_standard_and_unknown() {
        let registry = MsgTypeRegistry::new();
        assert_eq!(registry.resolve("W").unwrap(), "MarketDataSnapshotFullRefresh");
        assert!(registry.resolve("U1").is_err());
        assert_eq!(registry.display_name(Some("U1")), UNKNOWN_NAME);
        assert_eq!(registry.display_name(None), UNKNOWN_NAME);
    }

    #[test]
    fn test_registry_custom_registration() {
        let registry = MsgTypeRegistry::new().with("U1", "VenueOrderAck");
        assert_eq!(registry.resolve("U1").unwrap(), "VenueOrderAck");
        assert_eq!(registry.display_name(Some("D")), "NewOrderSingle");
    }
}
