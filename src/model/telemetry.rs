// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Real-time equipment state, as reported by `RequestTelemetryData`.
//!
//! Every element is a flat attribute bag (`<Filter systemId="8" ... />`),
//! unlike the nested tree `model::config` parses — there is no recursive
//! descent here, just one pass per equipment tag.

use roxmltree::Node;

use crate::error::Result;
use crate::types::{
    BackyardState, ChlorinatorAlert, ChlorinatorError, ChlorinatorOperatingMode, ChlorinatorStatus, ColorLogicBrightness,
    ColorLogicLightType, ColorLogicPowerState, ColorLogicShow25, ColorLogicShowUcl, ColorLogicShowUclV2, ColorLogicSpeed, CsadMode,
    CsadStatus, FilterState, FilterValvePosition, FilterWhyOn, GroupState, HeaterMode, HeaterState, KnownOrRaw, LightShow, PentairShow,
    PumpState, RelayState, RelayWhyOn, ValveActuatorState, ZodiacShow,
};
use crate::xml::dom::{attr, attr_float, attr_int, attr_int_or, attr_or, child_elements, first_child, parse_document};

fn known<T>(value: i64, from_i64: fn(i64) -> Option<T>) -> KnownOrRaw<T> {
    match from_i64(value) {
        Some(v) => KnownOrRaw::Known(v),
        None => KnownOrRaw::Raw(value.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryBackyard {
    pub system_id: i64,
    pub status_version: i64,
    pub air_temp: Option<i64>,
    pub state: KnownOrRaw<BackyardState>,
    pub config_checksum: i64,
    pub msp_version: Option<String>,
}

impl TelemetryBackyard {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryBackyard {
            system_id: attr_int(node, "systemId")?,
            status_version: attr_int(node, "statusVersion")?,
            air_temp: node.attribute("airTemp").and_then(|v| v.parse().ok()),
            state: known(attr_int(node, "state")?, BackyardState::from_i64),
            config_checksum: attr_int_or(node, "ConfigChksum", 0),
            msp_version: node.attribute("mspVersion").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryBoW {
    pub system_id: i64,
    pub water_temp: i64,
    pub flow: i64,
}

impl TelemetryBoW {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryBoW {
            system_id: attr_int(node, "systemId")?,
            water_temp: attr_int(node, "waterTemp")?,
            flow: attr_int(node, "flow")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryChlorinator {
    pub system_id: i64,
    pub status_raw: u16,
    pub instant_salt_level: i64,
    pub avg_salt_level: i64,
    pub chlr_alert_raw: u16,
    pub chlr_error_raw: u16,
    pub sc_mode: i64,
    pub operating_state: i64,
    pub timed_percent: Option<i64>,
    pub operating_mode: ChlorinatorOperatingModeField,
    pub enable: bool,
}

pub type ChlorinatorOperatingModeField = KnownOrRaw<ChlorinatorOperatingMode>;

impl TelemetryChlorinator {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryChlorinator {
            system_id: attr_int(node, "systemId")?,
            status_raw: attr_int(node, "status")? as u16,
            instant_salt_level: attr_int(node, "instantSaltLevel")?,
            avg_salt_level: attr_int(node, "avgSaltLevel")?,
            chlr_alert_raw: attr_int(node, "chlrAlert")? as u16,
            chlr_error_raw: attr_int(node, "chlrError")? as u16,
            sc_mode: attr_int(node, "scMode")?,
            operating_state: attr_int(node, "operatingState")?,
            timed_percent: node.attribute("Timed-Percent").and_then(|v| v.parse().ok()),
            operating_mode: known(attr_int(node, "operatingMode")?, ChlorinatorOperatingMode::from_i64),
            enable: attr_int(node, "enable")? != 0,
        })
    }

    /// Decoded `status` bitmask (no synthetic combinations, unlike alerts/errors).
    pub fn status(&self) -> Vec<&'static str> {
        ChlorinatorStatus(self.status_raw).names()
    }

    /// Decoded `chlrAlert` bitmask, with bits 4&5 collapsed into `CELL_TEMP_HIGH`.
    pub fn alerts(&self) -> Vec<&'static str> {
        ChlorinatorAlert(self.chlr_alert_raw).names()
    }

    /// Decoded `chlrError` bitmask, with bits 12&13 collapsed into `CELL_COMM_LOSS`.
    pub fn errors(&self) -> Vec<&'static str> {
        ChlorinatorError(self.chlr_error_raw).names()
    }

    pub fn active(&self) -> bool {
        ChlorinatorStatus(self.status_raw).is_generating()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryCsad {
    pub system_id: i64,
    pub status: KnownOrRaw<CsadStatus>,
    pub ph: f64,
    pub orp: i64,
    pub mode: KnownOrRaw<CsadMode>,
}

impl TelemetryCsad {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryCsad {
            system_id: attr_int(node, "systemId")?,
            status: known(attr_int(node, "status")?, CsadStatus::from_i64),
            ph: attr_float(node, "ph")?,
            orp: attr_int(node, "orp")?,
            mode: known(attr_int(node, "mode")?, CsadMode::from_i64),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryColorLogicLight {
    pub system_id: i64,
    pub state: KnownOrRaw<ColorLogicPowerState>,
    pub show: i64,
    pub speed: KnownOrRaw<ColorLogicSpeed>,
    pub brightness: KnownOrRaw<ColorLogicBrightness>,
    pub special_effect: i64,
}

impl TelemetryColorLogicLight {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryColorLogicLight {
            system_id: attr_int(node, "systemId")?,
            state: known(attr_int(node, "lightState")?, ColorLogicPowerState::from_i64),
            show: attr_int(node, "currentShow")?,
            speed: known(attr_int(node, "speed")?, ColorLogicSpeed::from_i64),
            brightness: known(attr_int(node, "brightness")?, ColorLogicBrightness::from_i64),
            special_effect: attr_int(node, "specialEffect")?,
        })
    }

    /// Decode `show` according to the light model's own vocabulary; each
    /// model type has a disjoint enum so the raw integer alone is ambiguous.
    pub fn show_name(&self, model: ColorLogicLightType, v2_active: bool) -> LightShow {
        match model {
            ColorLogicLightType::TwoFive => ColorLogicShow25::from_i64(self.show).map(LightShow::Show25),
            ColorLogicLightType::FourZero => ColorLogicShow25::from_i64(self.show).map(LightShow::Show40),
            ColorLogicLightType::Ucl if v2_active => ColorLogicShowUclV2::from_i64(self.show).map(LightShow::ShowUclV2),
            ColorLogicLightType::Ucl => ColorLogicShowUcl::from_i64(self.show).map(LightShow::ShowUcl),
            ColorLogicLightType::PentairColor => PentairShow::from_i64(self.show).map(LightShow::Pentair),
            ColorLogicLightType::ZodiacColor => ZodiacShow::from_i64(self.show).map(LightShow::Zodiac),
            ColorLogicLightType::Sam => None,
        }
        .unwrap_or(LightShow::Raw(self.show))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryFilter {
    pub system_id: i64,
    pub state: KnownOrRaw<FilterState>,
    pub speed: i64,
    pub valve_position: KnownOrRaw<FilterValvePosition>,
    pub why_on: KnownOrRaw<FilterWhyOn>,
    pub reported_speed: i64,
    pub power: i64,
    pub last_speed: i64,
}

impl TelemetryFilter {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryFilter {
            system_id: attr_int(node, "systemId")?,
            state: known(attr_int(node, "filterState")?, FilterState::from_i64),
            speed: attr_int(node, "filterSpeed")?,
            valve_position: known(attr_int(node, "valvePosition")?, FilterValvePosition::from_i64),
            why_on: known(attr_int(node, "whyFilterIsOn")?, FilterWhyOn::from_i64),
            reported_speed: attr_int(node, "reportedFilterSpeed")?,
            power: attr_int(node, "power")?,
            last_speed: attr_int(node, "lastSpeed")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryGroup {
    pub system_id: i64,
    pub state: KnownOrRaw<GroupState>,
}

impl TelemetryGroup {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryGroup {
            system_id: attr_int(node, "systemId")?,
            state: known(attr_int(node, "groupState")?, GroupState::from_i64),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryHeater {
    pub system_id: i64,
    pub state: KnownOrRaw<HeaterState>,
    pub temp: i64,
    pub enabled: bool,
    pub priority: i64,
    pub maintain_for: i64,
}

impl TelemetryHeater {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryHeater {
            system_id: attr_int(node, "systemId")?,
            state: known(attr_int(node, "heaterState")?, HeaterState::from_i64),
            temp: attr_int(node, "temp")?,
            enabled: attr_int(node, "enable")? != 0,
            priority: attr_int(node, "priority")?,
            maintain_for: attr_int(node, "maintainFor")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryPump {
    pub system_id: i64,
    pub state: KnownOrRaw<PumpState>,
    pub speed: i64,
    pub last_speed: i64,
    pub why_on: i64,
}

impl TelemetryPump {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryPump {
            system_id: attr_int(node, "systemId")?,
            state: known(attr_int(node, "pumpState")?, PumpState::from_i64),
            speed: attr_int(node, "pumpSpeed")?,
            last_speed: attr_int(node, "lastSpeed")?,
            why_on: attr_int(node, "whyOn")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRelay {
    pub system_id: i64,
    pub state: KnownOrRaw<RelayState>,
    pub why_on: KnownOrRaw<RelayWhyOn>,
}

impl TelemetryRelay {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryRelay {
            system_id: attr_int(node, "systemId")?,
            state: known(attr_int(node, "relayState")?, RelayState::from_i64),
            why_on: known(attr_int(node, "whyOn")?, RelayWhyOn::from_i64),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryValveActuator {
    pub system_id: i64,
    pub state: KnownOrRaw<ValveActuatorState>,
    /// Valve actuators are electrically relays; the controller reuses `RelayWhyOn`.
    pub why_on: KnownOrRaw<RelayWhyOn>,
}

impl TelemetryValveActuator {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryValveActuator {
            system_id: attr_int(node, "systemId")?,
            state: known(attr_int(node, "valveActuatorState")?, ValveActuatorState::from_i64),
            why_on: known(attr_int(node, "whyOn")?, RelayWhyOn::from_i64),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryVirtualHeater {
    pub system_id: i64,
    pub current_set_point: i64,
    pub enabled: bool,
    pub solar_set_point: i64,
    pub mode: KnownOrRaw<HeaterMode>,
    pub silent_mode: i64,
    pub why_on: i64,
}

impl TelemetryVirtualHeater {
    fn parse(node: Node) -> Result<Self> {
        Ok(TelemetryVirtualHeater {
            system_id: attr_int(node, "systemId")?,
            current_set_point: attr_int(node, "Current-Set-Point")?,
            enabled: attr_int(node, "enable")? != 0,
            solar_set_point: attr_int(node, "SolarSetPoint")?,
            mode: known(attr_int(node, "Mode")?, HeaterMode::from_i64),
            silent_mode: attr_int(node, "SilentMode")?,
            why_on: attr_int(node, "whyHeaterIsOn")?,
        })
    }
}

/// A single decoded equipment entry, returned by [`Telemetry::get_telem_by_systemid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryEntry<'a> {
    Backyard(&'a TelemetryBackyard),
    BoW(&'a TelemetryBoW),
    Chlorinator(&'a TelemetryChlorinator),
    Csad(&'a TelemetryCsad),
    ColorLogicLight(&'a TelemetryColorLogicLight),
    Filter(&'a TelemetryFilter),
    Group(&'a TelemetryGroup),
    Heater(&'a TelemetryHeater),
    Pump(&'a TelemetryPump),
    Relay(&'a TelemetryRelay),
    ValveActuator(&'a TelemetryValveActuator),
    VirtualHeater(&'a TelemetryVirtualHeater),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    pub version: String,
    pub backyard: TelemetryBackyard,
    pub bow: Vec<TelemetryBoW>,
    pub chlorinator: Vec<TelemetryChlorinator>,
    pub colorlogic_light: Vec<TelemetryColorLogicLight>,
    pub csad: Vec<TelemetryCsad>,
    pub filter: Vec<TelemetryFilter>,
    pub group: Vec<TelemetryGroup>,
    pub heater: Vec<TelemetryHeater>,
    pub pump: Vec<TelemetryPump>,
    pub relay: Vec<TelemetryRelay>,
    pub valve_actuator: Vec<TelemetryValveActuator>,
    pub virtual_heater: Vec<TelemetryVirtualHeater>,
}

impl Telemetry {
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = parse_document(xml)?;
        let root = doc.root_element();

        let backyard_node = first_child(root, "Backyard")
            .ok_or_else(|| crate::error::OmniError::parsing("telemetry document missing <Backyard>"))?;

        Ok(Telemetry {
            version: attr_or(root, "version", "").to_string(),
            backyard: TelemetryBackyard::parse(backyard_node)?,
            bow: child_elements(root, "BodyOfWater").map(TelemetryBoW::parse).collect::<Result<_>>()?,
            chlorinator: child_elements(root, "Chlorinator").map(TelemetryChlorinator::parse).collect::<Result<_>>()?,
            colorlogic_light: child_elements(root, "ColorLogic-Light")
                .map(TelemetryColorLogicLight::parse)
                .collect::<Result<_>>()?,
            csad: child_elements(root, "CSAD").map(TelemetryCsad::parse).collect::<Result<_>>()?,
            filter: child_elements(root, "Filter").map(TelemetryFilter::parse).collect::<Result<_>>()?,
            group: child_elements(root, "Group").map(TelemetryGroup::parse).collect::<Result<_>>()?,
            heater: child_elements(root, "Heater").map(TelemetryHeater::parse).collect::<Result<_>>()?,
            pump: child_elements(root, "Pump").map(TelemetryPump::parse).collect::<Result<_>>()?,
            relay: child_elements(root, "Relay").map(TelemetryRelay::parse).collect::<Result<_>>()?,
            valve_actuator: child_elements(root, "ValveActuator").map(TelemetryValveActuator::parse).collect::<Result<_>>()?,
            virtual_heater: child_elements(root, "VirtualHeater").map(TelemetryVirtualHeater::parse).collect::<Result<_>>()?,
        })
    }

    pub fn get_telem_by_systemid(&self, system_id: i64) -> Option<TelemetryEntry<'_>> {
        if self.backyard.system_id == system_id {
            return Some(TelemetryEntry::Backyard(&self.backyard));
        }
        macro_rules! find {
            ($field:expr, $variant:ident) => {
                if let Some(m) = $field.iter().find(|m| m.system_id == system_id) {
                    return Some(TelemetryEntry::$variant(m));
                }
            };
        }
        find!(self.bow, BoW);
        find!(self.chlorinator, Chlorinator);
        find!(self.csad, Csad);
        find!(self.colorlogic_light, ColorLogicLight);
        find!(self.filter, Filter);
        find!(self.group, Group);
        find!(self.heater, Heater);
        find!(self.pump, Pump);
        find!(self.relay, Relay);
        find!(self.valve_actuator, ValveActuator);
        find!(self.virtual_heater, VirtualHeater);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<STATUS version="1.11">
    <Backyard systemId="0" statusVersion="11" airTemp="77" state="1" ConfigChksum="2211028" mspVersion="R0408000" />
    <BodyOfWater systemId="7" waterTemp="-1" flow="255" />
    <Filter systemId="8" filterState="0" filterSpeed="0" valvePosition="1" whyFilterIsOn="0" fpOverride="0" reportedFilterSpeed="0" power="0" lastSpeed="50" />
    <ValveActuator systemId="9" valveActuatorState="0" whyOn="0" />
    <ColorLogic-Light systemId="10" lightState="6" currentShow="0" speed="4" brightness="4" specialEffect="0" />
    <VirtualHeater systemId="18" Current-Set-Point="85" enable="1" SolarSetPoint="90" Mode="0" SilentMode="0" whyHeaterIsOn="1" />
    <Heater systemId="19" heaterState="0" temp="74" enable="1" priority="254" maintainFor="24" />
    <Group systemId="21" groupState="0" />
</STATUS>"#;

    #[test]
    fn parses_full_example() {
        let telem = Telemetry::parse(EXAMPLE).expect("valid telemetry");
        assert_eq!(telem.backyard.system_id, 0);
        assert_eq!(telem.bow.len(), 1);
        assert_eq!(telem.filter.len(), 1);
        assert_eq!(telem.group[0].state, KnownOrRaw::Known(GroupState::Off));
    }

    #[test]
    fn get_telem_by_systemid_finds_nested_equipment() {
        let telem = Telemetry::parse(EXAMPLE).expect("valid telemetry");
        match telem.get_telem_by_systemid(19) {
            Some(TelemetryEntry::Heater(h)) => assert_eq!(h.temp, 74),
            other => panic!("expected heater entry, got {other:?}"),
        }
        assert!(telem.get_telem_by_systemid(9999).is_none());
    }

    #[test]
    fn chlorinator_alert_combo_decodes_to_cell_temp_high() {
        let chlor = TelemetryChlorinator {
            system_id: 1,
            status_raw: 0,
            instant_salt_level: 3200,
            avg_salt_level: 3100,
            chlr_alert_raw: 0x10 | 0x20,
            chlr_error_raw: 0,
            sc_mode: 0,
            operating_state: 1,
            timed_percent: Some(50),
            operating_mode: KnownOrRaw::Known(ChlorinatorOperatingMode::Timed),
            enable: true,
        };
        assert_eq!(chlor.alerts(), vec!["CELL_TEMP_HIGH"]);
    }
}
