/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Standard FIX tag numbers.
//!
//! Header and trailer tags used by the message layer, a selection of common
//! body tags, and the count/member tags of frequently used repeating groups.

/// BeginString (8).
pub const BEGIN_STRING: u32 = 8;
/// BodyLength (9).
pub const BODY_LENGTH: u32 = 9;
/// CheckSum (10).
pub const CHECK_SUM: u32 = 10;
/// ClOrdID (11).
pub const CL_ORD_ID: u32 = 11;
/// MsgSeqNum (34).
pub const MSG_SEQ_NUM: u32 = 34;
/// MsgType (35).
pub const MSG_TYPE: u32 = 35;
/// OrderQty (38).
pub const ORDER_QTY: u32 = 38;
/// OrdType (40).
pub const ORD_TYPE: u32 = 40;
/// PossDupFlag (43).
pub const POSS_DUP_FLAG: u32 = 43;
/// Price (44).
pub const PRICE: u32 = 44;
/// SenderCompID (49).
pub const SENDER_COMP_ID: u32 = 49;
/// SendingTime (52).
pub const SENDING_TIME: u32 = 52;
/// Side (54).
pub const SIDE: u32 = 54;
/// Symbol (55).
pub const SYMBOL: u32 = 55;
/// TargetCompID (56).
pub const TARGET_COMP_ID: u32 = 56;
/// Text (58).
pub const TEXT: u32 = 58;
/// TransactTime (60).
pub const TRANSACT_TIME: u32 = 60;
/// EncryptMethod (98).
pub const ENCRYPT_METHOD: u32 = 98;
/// HeartBtInt (108).
pub const HEART_BT_INT: u32 = 108;
/// TestReqID (112).
pub const TEST_REQ_ID: u32 = 112;
/// NoRelatedSym (146).
pub const NO_RELATED_SYM: u32 = 146;
/// MDReqID (262).
pub const MD_REQ_ID: u32 = 262;
/// NoMDEntryTypes (267).
pub const NO_MD_ENTRY_TYPES: u32 = 267;
/// NoMDEntries (268).
pub const NO_MD_ENTRIES: u32 = 268;
/// MDEntryType (269).
pub const MD_ENTRY_TYPE: u32 = 269;
/// MDEntryPx (270).
pub const MD_ENTRY_PX: u32 = 270;
/// MDEntrySize (271).
pub const MD_ENTRY_SIZE: u32 = 271;
/// PartyIDSource (447).
pub const PARTY_ID_SOURCE: u32 = 447;
/// PartyID (448).
pub const PARTY_ID: u32 = 448;
/// PartyRole (452).
pub const PARTY_ROLE: u32 = 452;
/// NoPartyIDs (453).
pub const NO_PARTY_IDS: u32 = 453;

/// Returns the FIX field name for a tag, or `None` if the tag is not known.
#[must_use]
pub fn name(tag: u32) -> Option<&'static str> {
    Some(match tag {
        BEGIN_STRING => "BeginString",
        BODY_LENGTH => "BodyLength",
        CHECK_SUM => "CheckSum",
        CL_ORD_ID => "ClOrdID",
        MSG_SEQ_NUM => "MsgSeqNum",
        MSG_TYPE => "MsgType",
        ORDER_QTY => "OrderQty",
        ORD_TYPE => "OrdType",
        POSS_DUP_FLAG => "PossDupFlag",
        PRICE => "Price",
        SENDER_COMP_ID => "SenderCompID",
        SENDING_TIME => "SendingTime",
        SIDE => "Side",
        SYMBOL => "Symbol",
        TARGET_COMP_ID => "TargetCompID",
        TEXT => "Text",
        TRANSACT_TIME => "TransactTime",
        ENCRYPT_METHOD => "EncryptMethod",
        HEART_BT_INT => "HeartBtInt",
        TEST_REQ_ID => "TestReqID",
        NO_RELATED_SYM => "NoRelatedSym",
        MD_REQ_ID => "MDReqID",
        NO_MD_ENTRY_TYPES => "NoMDEntryTypes",
        NO_MD_ENTRIES => "NoMDEntries",
        MD_ENTRY_TYPE => "MDEntryType",
        MD_ENTRY_PX => "MDEntryPx",
        MD_ENTRY_SIZE => "MDEntrySize",
        PARTY_ID_SOURCE => "PartyIDSource",
        PARTY_ID => "PartyID",
        PARTY_ROLE => "PartyRole",
        NO_PARTY_IDS => "NoPartyIDs",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_tag_numbers() {
        assert_eq!(BEGIN_STRING, 8);
        assert_eq!(BODY_LENGTH, 9);
        assert_eq!(CHECK_SUM, 10);
        assert_eq!(MSG_SEQ_NUM, 34);
        assert_eq!(MSG_TYPE, 35);
        assert_eq!(SENDER_COMP_ID, 49);
        assert_eq!(TARGET_COMP_ID, 56);
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(name(35), Some("MsgType"));
        assert_eq!(name(268), Some("NoMDEntries"));
        assert_eq!(name(9999), None);
    }
}
