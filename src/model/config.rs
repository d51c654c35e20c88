// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! The full equipment inventory (`MSPConfig`), parsed from
//! `RequestConfiguration`'s response.
//!
//! Unlike telemetry's flat attribute bags, this tree's fields are child
//! elements (`<System-Id>20</System-Id>`), and a handful of equipment
//! kinds (heater/chlorinator sub-equipment) are nested inside anonymous
//! `<Operation>` wrapper elements alongside unrelated siblings.

use roxmltree::Node;

use crate::error::{OmniError, Result};
use crate::types::{
    BodyOfWaterType, ChlorinatorDispenserType, ColorLogicLightType, ColorLogicShow25, ColorLogicShowUcl, ColorLogicShowUclV2,
    CsadType, FilterType, HeaterType, KnownOrRaw, PentairShow, PumpFunction, PumpType, RelayFunction, RelayType, SensorType,
    SensorUnits, ZodiacShow,
};
use crate::xml::dom::{child_elements, child_int, child_int_opt, child_text, child_text_opt, child_yes_no, child_yes_no_opt, parse_document};

fn known<T>(value: &str, from_str: fn(&str) -> Option<T>) -> KnownOrRaw<T> {
    match from_str(value) {
        Some(v) => KnownOrRaw::Known(v),
        None => KnownOrRaw::Raw(value.to_string()),
    }
}

/// Fields common to every equipment node: a site-unique id, an optional
/// display name, and the body-of-water id propagated down from its
/// enclosing `body-of-water` (unset on the backyard and its direct
/// children).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeId {
    pub system_id: i64,
    pub name: Option<String>,
    pub bow_id: Option<i64>,
}

impl NodeId {
    fn parse(node: Node) -> Result<Self> {
        Ok(NodeId {
            system_id: child_int(node, "System-Id")?,
            name: child_text_opt(node, "Name").map(str::to_string),
            bow_id: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MspSystem {
    pub vsp_speed_format: String,
    pub units: String,
}

impl MspSystem {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspSystem {
            vsp_speed_format: child_text(node, "Msp-Vsp-Speed-Format")?.to_string(),
            units: child_text(node, "Units")?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspSensor {
    pub id: NodeId,
    pub sensor_type: KnownOrRaw<SensorType>,
    pub units: KnownOrRaw<SensorUnits>,
}

impl MspSensor {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspSensor {
            id: NodeId::parse(node)?,
            sensor_type: known(child_text(node, "Type")?, SensorType::from_str_value),
            units: known(child_text(node, "Units")?, SensorUnits::from_str_value),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspFilter {
    pub id: NodeId,
    pub filter_type: KnownOrRaw<FilterType>,
    pub max_percent: i64,
    pub min_percent: i64,
    pub max_rpm: i64,
    pub min_rpm: i64,
    pub priming_enabled: bool,
    pub low_speed: i64,
    pub medium_speed: i64,
    pub high_speed: i64,
}

impl MspFilter {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspFilter {
            id: NodeId::parse(node)?,
            filter_type: known(child_text(node, "Filter-Type")?, FilterType::from_str_value),
            max_percent: child_int(node, "Max-Pump-Speed")?,
            min_percent: child_int(node, "Min-Pump-Speed")?,
            max_rpm: child_int(node, "Max-Pump-RPM")?,
            min_rpm: child_int(node, "Min-Pump-RPM")?,
            priming_enabled: child_yes_no(node, "Priming-Enabled")?,
            low_speed: child_int(node, "Vsp-Low-Pump-Speed")?,
            medium_speed: child_int(node, "Vsp-Medium-Pump-Speed")?,
            high_speed: child_int(node, "Vsp-High-Pump-Speed")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspPump {
    pub id: NodeId,
    pub pump_type: KnownOrRaw<PumpType>,
    pub function: KnownOrRaw<PumpFunction>,
    pub max_percent: i64,
    pub min_percent: i64,
    pub max_rpm: i64,
    pub min_rpm: i64,
    pub priming_enabled: bool,
    pub low_speed: i64,
    pub medium_speed: i64,
    pub high_speed: i64,
}

impl MspPump {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspPump {
            id: NodeId::parse(node)?,
            pump_type: known(child_text(node, "Type")?, PumpType::from_str_value),
            function: known(child_text(node, "Function")?, PumpFunction::from_str_value),
            max_percent: child_int(node, "Max-Pump-Speed")?,
            min_percent: child_int(node, "Min-Pump-Speed")?,
            max_rpm: child_int(node, "Max-Pump-RPM")?,
            min_rpm: child_int(node, "Min-Pump-RPM")?,
            priming_enabled: child_yes_no(node, "Priming-Enabled")?,
            low_speed: child_int(node, "Vsp-Low-Pump-Speed")?,
            medium_speed: child_int(node, "Vsp-Medium-Pump-Speed")?,
            high_speed: child_int(node, "Vsp-High-Pump-Speed")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspRelay {
    pub id: NodeId,
    pub relay_type: KnownOrRaw<RelayType>,
    pub function: KnownOrRaw<RelayFunction>,
}

impl MspRelay {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspRelay {
            id: NodeId::parse(node)?,
            relay_type: known(child_text(node, "Type")?, RelayType::from_str_value),
            function: known(child_text(node, "Function")?, RelayFunction::from_str_value),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspHeaterEquip {
    pub id: NodeId,
    pub heater_type: KnownOrRaw<HeaterType>,
    pub enabled: bool,
    pub min_filter_speed: i64,
    pub sensor_id: i64,
    pub supports_cooling: Option<bool>,
}

impl MspHeaterEquip {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspHeaterEquip {
            id: NodeId::parse(node)?,
            heater_type: known(child_text(node, "Heater-Type")?, HeaterType::from_str_value),
            enabled: child_yes_no(node, "Enabled")?,
            min_filter_speed: child_int(node, "Min-Speed-For-Operation")?,
            sensor_id: child_int(node, "Sensor-System-Id")?,
            supports_cooling: child_yes_no_opt(node, "SupportsCooling"),
        })
    }

    fn set_bow_id(&mut self, bow_id: i64) {
        self.id.bow_id = Some(bow_id);
    }
}

/// Equipment nested inside anonymous `<Operation>` wrappers, filtered by
/// the one child tag we care about. Unrelated `<Operation>` siblings are
/// ignored.
fn operation_children<'a, 'input>(node: Node<'a, 'input>, tag: &'a str) -> impl Iterator<Item = Node<'a, 'input>> {
    child_elements(node, "Operation").filter_map(move |op| child_elements(op, tag).next())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspVirtualHeater {
    pub id: NodeId,
    pub enabled: bool,
    pub set_point: i64,
    pub solar_set_point: Option<i64>,
    pub max_temp: i64,
    pub min_temp: i64,
    pub heater_equipment: Vec<MspHeaterEquip>,
}

impl MspVirtualHeater {
    fn parse(node: Node) -> Result<Self> {
        let heater_equipment = operation_children(node, "Heater-Equipment")
            .map(MspHeaterEquip::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(MspVirtualHeater {
            id: NodeId::parse(node)?,
            enabled: child_yes_no(node, "Enabled")?,
            set_point: child_int(node, "Current-Set-Point")?,
            solar_set_point: child_int_opt(node, "SolarSetPoint"),
            max_temp: child_int(node, "Max-Settable-Water-Temp")?,
            min_temp: child_int(node, "Min-Settable-Water-Temp")?,
            heater_equipment,
        })
    }

    fn set_bow_id(&mut self, bow_id: i64) {
        self.id.bow_id = Some(bow_id);
        for equip in &mut self.heater_equipment {
            equip.set_bow_id(bow_id);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MspChlorinatorEquip {
    pub id: NodeId,
    pub enabled: bool,
}

impl MspChlorinatorEquip {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspChlorinatorEquip { id: NodeId::parse(node)?, enabled: child_yes_no(node, "Enabled")? })
    }

    fn set_bow_id(&mut self, bow_id: i64) {
        self.id.bow_id = Some(bow_id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspChlorinator {
    pub id: NodeId,
    pub enabled: bool,
    pub timed_percent: i64,
    pub superchlor_timeout: i64,
    pub dispenser_type: KnownOrRaw<ChlorinatorDispenserType>,
    pub chlorinator_equipment: Vec<MspChlorinatorEquip>,
}

impl MspChlorinator {
    fn parse(node: Node) -> Result<Self> {
        let chlorinator_equipment = operation_children(node, "Chlorinator-Equipment")
            .map(MspChlorinatorEquip::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(MspChlorinator {
            id: NodeId::parse(node)?,
            enabled: child_yes_no(node, "Enabled")?,
            timed_percent: child_int(node, "Timed-Percent")?,
            superchlor_timeout: child_int(node, "SuperChlor-Timeout")?,
            dispenser_type: known(child_text(node, "Dispenser-Type")?, ChlorinatorDispenserType::from_str_value),
            chlorinator_equipment,
        })
    }

    fn set_bow_id(&mut self, bow_id: i64) {
        self.id.bow_id = Some(bow_id);
        for equip in &mut self.chlorinator_equipment {
            equip.set_bow_id(bow_id);
        }
    }
}

fn enum_names<T: std::fmt::Debug>(count: i64, from_i64: fn(i64) -> Option<T>) -> Vec<String> {
    (0..count).filter_map(|v| from_i64(v).map(|x| format!("{x:?}"))).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspColorLogicLight {
    pub id: NodeId,
    pub light_type: KnownOrRaw<ColorLogicLightType>,
    pub v2_active: Option<bool>,
    /// Pre-computed valid show names for this light's `type`/`V2-Active`.
    pub effects: Vec<String>,
}

impl MspColorLogicLight {
    fn parse(node: Node) -> Result<Self> {
        let light_type = known(child_text(node, "Type")?, ColorLogicLightType::from_str_value);
        let v2_active = child_yes_no_opt(node, "V2-Active");
        let effects = match &light_type {
            KnownOrRaw::Known(ColorLogicLightType::Ucl) if v2_active == Some(true) => enum_names(27, ColorLogicShowUclV2::from_i64),
            KnownOrRaw::Known(ColorLogicLightType::Ucl) => enum_names(17, ColorLogicShowUcl::from_i64),
            KnownOrRaw::Known(ColorLogicLightType::TwoFive) | KnownOrRaw::Known(ColorLogicLightType::FourZero) => {
                enum_names(12, ColorLogicShow25::from_i64)
            }
            KnownOrRaw::Known(ColorLogicLightType::PentairColor) => enum_names(12, PentairShow::from_i64),
            KnownOrRaw::Known(ColorLogicLightType::ZodiacColor) => enum_names(14, ZodiacShow::from_i64),
            _ => Vec::new(),
        };
        Ok(MspColorLogicLight { id: NodeId::parse(node)?, light_type, v2_active, effects })
    }

    fn set_bow_id(&mut self, bow_id: i64) {
        self.id.bow_id = Some(bow_id);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MspCsadEquip {
    pub id: NodeId,
    pub enabled: bool,
}

impl MspCsadEquip {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspCsadEquip { id: NodeId::parse(node)?, enabled: child_yes_no(node, "Enabled")? })
    }

    fn set_bow_id(&mut self, bow_id: i64) {
        self.id.bow_id = Some(bow_id);
    }
}

/// Minimal shape: upstream's own `csad.py` model is a near-stub, so this
/// doesn't invent fields the source never gave.
#[derive(Debug, Clone, PartialEq)]
pub struct MspCsad {
    pub id: NodeId,
    pub csad_type: KnownOrRaw<CsadType>,
    pub csad_equipment: Vec<MspCsadEquip>,
}

impl MspCsad {
    fn parse(node: Node) -> Result<Self> {
        let csad_equipment = child_elements(node, "CSAD-Equipment").map(MspCsadEquip::parse).collect::<Result<Vec<_>>>()?;
        Ok(MspCsad {
            id: NodeId::parse(node)?,
            csad_type: known(child_text(node, "Type")?, CsadType::from_str_value),
            csad_equipment,
        })
    }

    fn set_bow_id(&mut self, bow_id: i64) {
        self.id.bow_id = Some(bow_id);
        for equip in &mut self.csad_equipment {
            equip.set_bow_id(bow_id);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspBow {
    pub id: NodeId,
    pub bow_type: KnownOrRaw<BodyOfWaterType>,
    pub filter: Vec<MspFilter>,
    pub relay: Vec<MspRelay>,
    pub heater: Option<MspVirtualHeater>,
    pub sensor: Vec<MspSensor>,
    pub colorlogic_light: Vec<MspColorLogicLight>,
    pub pump: Vec<MspPump>,
    pub chlorinator: Option<MspChlorinator>,
    pub csad: Vec<MspCsad>,
}

impl MspBow {
    fn parse(node: Node) -> Result<Self> {
        let mut bow = MspBow {
            id: NodeId::parse(node)?,
            bow_type: known(child_text(node, "Type")?, BodyOfWaterType::from_str_value),
            filter: child_elements(node, "Filter").map(MspFilter::parse).collect::<Result<Vec<_>>>()?,
            relay: child_elements(node, "Relay").map(MspRelay::parse).collect::<Result<Vec<_>>>()?,
            heater: node.children().find(|n| n.is_element() && n.tag_name().name() == "Heater").map(MspVirtualHeater::parse).transpose()?,
            sensor: child_elements(node, "Sensor").map(MspSensor::parse).collect::<Result<Vec<_>>>()?,
            colorlogic_light: child_elements(node, "ColorLogic-Light").map(MspColorLogicLight::parse).collect::<Result<Vec<_>>>()?,
            pump: child_elements(node, "Pump").map(MspPump::parse).collect::<Result<Vec<_>>>()?,
            chlorinator: first_chlorinator(node)?,
            csad: child_elements(node, "CSAD").map(MspCsad::parse).collect::<Result<Vec<_>>>()?,
        };
        // Each body-of-water propagates its own system-id down to every
        // descendant equipment node, transitively.
        let bow_id = bow.id.system_id;
        bow.set_bow_id(bow_id);
        Ok(bow)
    }

    fn set_bow_id(&mut self, bow_id: i64) {
        self.id.bow_id = Some(bow_id);
        for f in &mut self.filter {
            f.id.bow_id = Some(bow_id);
        }
        for r in &mut self.relay {
            r.id.bow_id = Some(bow_id);
        }
        if let Some(h) = &mut self.heater {
            h.set_bow_id(bow_id);
        }
        for s in &mut self.sensor {
            s.id.bow_id = Some(bow_id);
        }
        for l in &mut self.colorlogic_light {
            l.set_bow_id(bow_id);
        }
        for p in &mut self.pump {
            p.id.bow_id = Some(bow_id);
        }
        if let Some(c) = &mut self.chlorinator {
            c.set_bow_id(bow_id);
        }
        for c in &mut self.csad {
            c.set_bow_id(bow_id);
        }
    }
}

fn first_chlorinator(node: Node) -> Result<Option<MspChlorinator>> {
    child_elements(node, "Chlorinator").next().map(MspChlorinator::parse).transpose()
}

/// An equipment kind the original gave no typed schema for (favorites);
/// surfaced as a raw attribute/child-text map instead of a fabricated shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEquipment {
    pub system_id: i64,
    pub name: Option<String>,
    pub fields: std::collections::HashMap<String, String>,
}

fn parse_raw_equipment(node: Node) -> Result<RawEquipment> {
    let fields = node
        .children()
        .filter(|n| n.is_element())
        .filter_map(|n| Some((n.tag_name().name().to_string(), n.text()?.to_string())))
        .collect();
    Ok(RawEquipment { system_id: child_int(node, "System-Id")?, name: child_text_opt(node, "Name").map(str::to_string), fields })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MspGroup {
    pub id: NodeId,
    pub icon_id: Option<i64>,
}

impl MspGroup {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspGroup { id: NodeId::parse(node)?, icon_id: child_int_opt(node, "Icon-Id") })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspBackyard {
    pub id: NodeId,
    pub sensor: Vec<MspSensor>,
    pub bow: Vec<MspBow>,
    pub relay: Vec<MspRelay>,
    pub group: Vec<MspGroup>,
    pub favorites: Vec<RawEquipment>,
}

impl MspBackyard {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspBackyard {
            id: NodeId::parse(node)?,
            sensor: child_elements(node, "Sensor").map(MspSensor::parse).collect::<Result<Vec<_>>>()?,
            bow: child_elements(node, "Body-of-water").map(MspBow::parse).collect::<Result<Vec<_>>>()?,
            relay: child_elements(node, "Relay").map(MspRelay::parse).collect::<Result<Vec<_>>>()?,
            group: child_elements(node, "Group").map(MspGroup::parse).collect::<Result<Vec<_>>>()?,
            favorites: child_elements(node, "Favorites").map(parse_raw_equipment).collect::<Result<Vec<_>>>()?,
        })
        // Backyard itself never propagates a bow-id: it has none, and
        // neither do its direct children.
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MspSchedule {
    pub system_id: i64,
    pub bow_id: i64,
    pub equipment_id: i64,
    pub event: i64,
    pub data: i64,
    pub start_hour: i64,
    pub start_minute: i64,
    pub end_hour: i64,
    pub end_minute: i64,
    pub days_active: i64,
    pub enabled: bool,
    pub recurring: bool,
}

impl MspSchedule {
    fn parse(node: Node) -> Result<Self> {
        Ok(MspSchedule {
            system_id: child_int(node, "schedule-system-id")?,
            bow_id: child_int(node, "bow-system-id")?,
            equipment_id: child_int(node, "equipment-id")?,
            event: child_int(node, "event")?,
            data: child_int(node, "data")?,
            start_hour: child_int(node, "start-hour")?,
            start_minute: child_int(node, "start-minute")?,
            end_hour: child_int(node, "end-hour")?,
            end_minute: child_int(node, "end-minute")?,
            days_active: child_int(node, "days-active")?,
            enabled: child_int(node, "enabled")? != 0,
            recurring: child_int_opt(node, "recurring").unwrap_or(0) != 0,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MspConfig {
    pub system: MspSystem,
    pub backyard: MspBackyard,
    pub schedule: Vec<MspSchedule>,
}

/// Any node in the tree, returned by [`MspConfig::find_by_system_id`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigEntry<'a> {
    Backyard(&'a MspBackyard),
    Bow(&'a MspBow),
    Filter(&'a MspFilter),
    Pump(&'a MspPump),
    Relay(&'a MspRelay),
    Sensor(&'a MspSensor),
    ColorLogicLight(&'a MspColorLogicLight),
    VirtualHeater(&'a MspVirtualHeater),
    HeaterEquip(&'a MspHeaterEquip),
    Chlorinator(&'a MspChlorinator),
    ChlorinatorEquip(&'a MspChlorinatorEquip),
    Csad(&'a MspCsad),
    CsadEquip(&'a MspCsadEquip),
    Group(&'a MspGroup),
    Schedule(&'a MspSchedule),
}

impl MspConfig {
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = parse_document(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != "MSPConfig" {
            return Err(OmniError::parsing(format!("expected <MSPConfig> root, got <{}>", root.tag_name().name())));
        }
        let system_node = root
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "System")
            .ok_or_else(|| OmniError::parsing("MSPConfig missing <System>"))?;
        let backyard_node = root
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "Backyard")
            .ok_or_else(|| OmniError::parsing("MSPConfig missing <Backyard>"))?;

        Ok(MspConfig {
            system: MspSystem::parse(system_node)?,
            backyard: MspBackyard::parse(backyard_node)?,
            schedule: child_elements(root, "Schedule").map(MspSchedule::parse).collect::<Result<Vec<_>>>()?,
        })
    }

    pub fn find_by_system_id(&self, system_id: i64) -> Option<ConfigEntry<'_>> {
        if self.backyard.id.system_id == system_id {
            return Some(ConfigEntry::Backyard(&self.backyard));
        }
        for s in &self.schedule {
            if s.system_id == system_id {
                return Some(ConfigEntry::Schedule(s));
            }
        }
        for g in &self.backyard.group {
            if g.id.system_id == system_id {
                return Some(ConfigEntry::Group(g));
            }
        }
        macro_rules! check {
            ($iter:expr, $variant:ident) => {
                for item in $iter {
                    if item.id.system_id == system_id {
                        return Some(ConfigEntry::$variant(item));
                    }
                }
            };
        }
        check!(&self.backyard.sensor, Sensor);
        check!(&self.backyard.relay, Relay);
        for bow in &self.backyard.bow {
            if bow.id.system_id == system_id {
                return Some(ConfigEntry::Bow(bow));
            }
            check!(&bow.filter, Filter);
            check!(&bow.pump, Pump);
            check!(&bow.relay, Relay);
            check!(&bow.sensor, Sensor);
            check!(&bow.colorlogic_light, ColorLogicLight);
            check!(&bow.csad, Csad);
            for csad in &bow.csad {
                check!(&csad.csad_equipment, CsadEquip);
            }
            if let Some(heater) = &bow.heater {
                if heater.id.system_id == system_id {
                    return Some(ConfigEntry::VirtualHeater(heater));
                }
                check!(&heater.heater_equipment, HeaterEquip);
            }
            if let Some(chlor) = &bow.chlorinator {
                if chlor.id.system_id == system_id {
                    return Some(ConfigEntry::Chlorinator(chlor));
                }
                check!(&chlor.chlorinator_equipment, ChlorinatorEquip);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MSPConfig>
  <System>
    <Msp-Vsp-Speed-Format>RPM</Msp-Vsp-Speed-Format>
    <Units>Standard</Units>
  </System>
  <Backyard>
    <System-Id>0</System-Id>
    <Name>My Backyard</Name>
    <Body-of-water>
      <System-Id>7</System-Id>
      <Name>Pool</Name>
      <Type>BOW_POOL</Type>
      <Filter>
        <System-Id>8</System-Id>
        <Name>Filter Pump</Name>
        <Filter-Type>FMT_VARIABLE_SPEED_PUMP</Filter-Type>
        <Max-Pump-Speed>100</Max-Pump-Speed>
        <Min-Pump-Speed>18</Min-Pump-Speed>
        <Max-Pump-RPM>3450</Max-Pump-RPM>
        <Min-Pump-RPM>600</Min-Pump-RPM>
        <Priming-Enabled>yes</Priming-Enabled>
        <Vsp-Low-Pump-Speed>20</Vsp-Low-Pump-Speed>
        <Vsp-Medium-Pump-Speed>50</Vsp-Medium-Pump-Speed>
        <Vsp-High-Pump-Speed>80</Vsp-High-Pump-Speed>
      </Filter>
      <Heater>
        <System-Id>18</System-Id>
        <Name>Heater</Name>
        <Enabled>yes</Enabled>
        <Current-Set-Point>85</Current-Set-Point>
        <SolarSetPoint>90</SolarSetPoint>
        <Max-Settable-Water-Temp>104</Max-Settable-Water-Temp>
        <Min-Settable-Water-Temp>65</Min-Settable-Water-Temp>
        <Operation>
          <Heater-Equipment>
            <System-Id>19</System-Id>
            <Name>Gas Heater</Name>
            <Heater-Type>HTR_GAS</Heater-Type>
            <Enabled>yes</Enabled>
            <Min-Speed-For-Operation>30</Min-Speed-For-Operation>
            <Sensor-System-Id>20</Sensor-System-Id>
          </Heater-Equipment>
        </Operation>
      </Heater>
    </Body-of-water>
  </Backyard>
</MSPConfig>"#;

    #[test]
    fn parses_full_tree_and_resolves_types() {
        let cfg = MspConfig::parse(EXAMPLE).expect("valid config");
        assert_eq!(cfg.system.vsp_speed_format, "RPM");
        assert_eq!(cfg.backyard.bow.len(), 1);
        assert_eq!(cfg.backyard.bow[0].filter[0].filter_type, KnownOrRaw::Known(FilterType::VariableSpeed));
    }

    #[test]
    fn bow_id_propagates_transitively_but_not_to_backyard() {
        let cfg = MspConfig::parse(EXAMPLE).expect("valid config");
        assert_eq!(cfg.backyard.id.bow_id, None);
        let bow = &cfg.backyard.bow[0];
        assert_eq!(bow.id.bow_id, Some(7));
        assert_eq!(bow.filter[0].id.bow_id, Some(7));
        let heater = bow.heater.as_ref().unwrap();
        assert_eq!(heater.id.bow_id, Some(7));
        assert_eq!(heater.heater_equipment[0].id.bow_id, Some(7));
    }

    #[test]
    fn operation_wrapper_is_unwrapped_for_heater_equipment() {
        let cfg = MspConfig::parse(EXAMPLE).expect("valid config");
        let heater = cfg.backyard.bow[0].heater.as_ref().unwrap();
        assert_eq!(heater.heater_equipment.len(), 1);
        assert_eq!(heater.heater_equipment[0].id.system_id, 19);
    }

    #[test]
    fn find_by_system_id_locates_nested_equipment() {
        let cfg = MspConfig::parse(EXAMPLE).expect("valid config");
        match cfg.find_by_system_id(19) {
            Some(ConfigEntry::HeaterEquip(h)) => assert_eq!(h.sensor_id, 20),
            other => panic!("expected heater equip entry, got {other:?}"),
        }
        assert!(cfg.find_by_system_id(99999).is_none());
    }
}
