// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! The tiny header document that precedes a multi-packet response,
//! announcing how many block messages to expect and their total size.

use crate::error::Result;
use crate::xml::dom::{collect_parameters, parameter_int, parse_document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadMessage {
    pub source_op_id: i64,
    pub msg_size: i64,
    pub msg_block_count: i64,
    pub msg_type: i64,
}

impl LeadMessage {
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = parse_document(xml)?;
        let params = collect_parameters(doc.root_element());
        Ok(LeadMessage {
            source_op_id: parameter_int(&params, "SourceOpId")?,
            msg_size: parameter_int(&params, "MsgSize")?,
            msg_block_count: parameter_int(&params, "MsgBlockCount")?,
            msg_type: parameter_int(&params, "Type")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_example_lead_message() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Response xmlns="http://nextgen.hayward.com/api">
    <Name>LeadMessage</Name>
    <Parameters>
        <Parameter name="SourceOpId" dataType="int">1003</Parameter>
        <Parameter name="MsgSize" dataType="int">3709</Parameter>
        <Parameter name="MsgBlockCount" dataType="int">4</Parameter>
        <Parameter name="Type" dataType="int">0</Parameter>
    </Parameters>
</Response>"#;

        let lead = LeadMessage::parse(xml).expect("valid lead message");
        assert_eq!(lead.source_op_id, 1003);
        assert_eq!(lead.msg_size, 3709);
        assert_eq!(lead.msg_block_count, 4);
        assert_eq!(lead.msg_type, 0);
    }

    #[test]
    fn rejects_missing_parameter() {
        let xml = r#"<Response xmlns="http://nextgen.hayward.com/api">
    <Parameters><Parameter name="SourceOpId" dataType="int">1</Parameter></Parameters>
</Response>"#;
        assert!(LeadMessage::parse(xml).is_err());
    }
}
