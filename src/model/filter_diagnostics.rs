// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Filter/pump diagnostic counters, reported as a flat `Parameter` list
//! rather than a structured document.

use crate::error::{OmniError, Result};
use crate::xml::dom::{collect_parameters, parse_document};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDiagnostics {
    params: std::collections::HashMap<String, i64>,
}

impl FilterDiagnostics {
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = parse_document(xml)?;
        let raw = collect_parameters(doc.root_element());
        let mut params = std::collections::HashMap::new();
        for (name, text) in raw {
            let value: i64 = text
                .parse()
                .map_err(|_| OmniError::parsing(format!("Parameter '{name}' is not an integer")))?;
            params.insert(name.to_string(), value);
        }
        Ok(FilterDiagnostics { params })
    }

    pub fn get_param(&self, name: &str) -> Result<i64> {
        self.params
            .get(name)
            .copied()
            .ok_or_else(|| OmniError::parsing(format!("missing Parameter '{name}'")))
    }

    /// Concatenate `{prefix}B1`..`{prefix}B6` byte parameters into the
    /// ASCII firmware revision string they spell out, trimming trailing
    /// NULs/spaces (`DisplayFWRevisionB1..B6` -> e.g. "1.015").
    pub fn firmware_revision(&self, prefix: &str) -> Result<String> {
        let mut bytes = Vec::with_capacity(6);
        for i in 1..=6 {
            let value = self.get_param(&format!("{prefix}B{i}"))?;
            bytes.push(value as u8);
        }
        Ok(String::from_utf8_lossy(&bytes).trim_matches(['\0', ' ']).to_string())
    }

    /// `PowerMSB << 8 | PowerLSB`, in watts.
    pub fn power(&self) -> Result<i64> {
        let msb = self.get_param("PowerMSB")?;
        let lsb = self.get_param("PowerLSB")?;
        Ok((msb << 8) | lsb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<Response xmlns="http://nextgen.hayward.com/api">
    <Name>GetUIFilterDiagnosticInfoRsp</Name>
    <Parameters>
        <Parameter name="PoolID" dataType="int">7</Parameter>
        <Parameter name="EquipmentID" dataType="int">8</Parameter>
        <Parameter name="PowerLSB" dataType="byte">133</Parameter>
        <Parameter name="PowerMSB" dataType="byte">4</Parameter>
        <Parameter name="ErrorStatus" dataType="byte">0</Parameter>
        <Parameter name="DisplayFWRevisionB1" dataType="byte">49</Parameter>
        <Parameter name="DisplayFWRevisionB2" dataType="byte">48</Parameter>
        <Parameter name="DisplayFWRevisionB3" dataType="byte">49</Parameter>
        <Parameter name="DisplayFWRevisionB4" dataType="byte">53</Parameter>
        <Parameter name="DisplayFWRevisionB5" dataType="byte">32</Parameter>
        <Parameter name="DisplayFWRevisionB6" dataType="byte">0</Parameter>
        <Parameter name="DriveFWRevisionB1" dataType="byte">48</Parameter>
        <Parameter name="DriveFWRevisionB2" dataType="byte">48</Parameter>
        <Parameter name="DriveFWRevisionB3" dataType="byte">55</Parameter>
        <Parameter name="DriveFWRevisionB4" dataType="byte">48</Parameter>
        <Parameter name="DriveFWRevisionB5" dataType="byte">32</Parameter>
        <Parameter name="DriveFWRevisionB6" dataType="byte">0</Parameter>
    </Parameters>
</Response>"#;

    #[test]
    fn get_param_by_name() {
        let diag = FilterDiagnostics::parse(EXAMPLE).expect("valid diagnostics");
        assert_eq!(diag.get_param("ErrorStatus").unwrap(), 0);
        assert_eq!(diag.get_param("PoolID").unwrap(), 7);
    }

    #[test]
    fn power_combines_msb_lsb() {
        let diag = FilterDiagnostics::parse(EXAMPLE).expect("valid diagnostics");
        assert_eq!(diag.power().unwrap(), (4 << 8) | 133);
    }

    #[test]
    fn firmware_revision_spells_out_ascii() {
        let diag = FilterDiagnostics::parse(EXAMPLE).expect("valid diagnostics");
        assert_eq!(diag.firmware_revision("DisplayFWRevision").unwrap(), "1.015");
        assert_eq!(diag.firmware_revision("DriveFWRevision").unwrap(), "0070");
    }

    #[test]
    fn missing_parameter_errors() {
        let diag = FilterDiagnostics::parse(EXAMPLE).expect("valid diagnostics");
        assert!(diag.get_param("DoesNotExist").is_err());
    }
}
