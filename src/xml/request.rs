// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Builders for outgoing `<Request>` XML bodies.
//!
//! Every operation's parameter shape (names, `dataType`s, `unit`s and
//! `alias`es) is copied verbatim from the controller's own API, quirks
//! included: the lowercase `alias="equipment_id"` on a couple of commands
//! and the `ORPTimout` typo on `SetCHLORParams` are both load-bearing for
//! firmware compatibility, not mistakes to tidy up.

use crate::constants::XML_NAMESPACE;

/// One `<Parameter>` element.
pub struct Parameter {
    pub name: &'static str,
    pub data_type: &'static str,
    pub unit: Option<&'static str>,
    pub alias: Option<&'static str>,
    pub value: String,
}

impl Parameter {
    pub fn new(name: &'static str, data_type: &'static str, value: impl ToString) -> Self {
        Parameter { name, data_type, unit: None, alias: None, value: value.to_string() }
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }
}

fn escape(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn int_param(name: &'static str, value: impl ToString) -> Parameter {
    Parameter::new(name, "int", value)
}

fn bool_param(name: &'static str, value: bool) -> Parameter {
    Parameter::new(name, "bool", i32::from(value))
}

fn byte_param(name: &'static str, value: impl ToString) -> Parameter {
    Parameter::new(name, "byte", value)
}

/// Render a full request body: XML declaration, `<Request>`, `<Name>`, and
/// a `<Parameters>` block (always present, even when empty, matching
/// `RestoreIdleState`'s empty `<Parameters/>`). NUL-terminated per the wire
/// framing convention.
pub fn build_request(name: &str, parameters: &[Parameter]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>");
    out.push_str(&format!("<Request xmlns=\"{XML_NAMESPACE}\">"));
    out.push_str(&format!("<Name>{name}</Name>"));
    out.push_str("<Parameters>");
    for p in parameters {
        out.push_str(&format!("<Parameter name=\"{}\" dataType=\"{}\"", p.name, p.data_type));
        if let Some(unit) = p.unit {
            out.push_str(&format!(" unit=\"{unit}\""));
        }
        if let Some(alias) = p.alias {
            out.push_str(&format!(" alias=\"{alias}\""));
        }
        out.push('>');
        out.push_str(&escape(&p.value));
        out.push_str("</Parameter>");
    }
    out.push_str("</Parameters>");
    out.push_str("</Request>");
    out.push('\0');
    out
}

pub fn request_configuration() -> String {
    build_request("RequestConfiguration", &[])
}

pub fn request_telemetry_data() -> String {
    build_request("RequestTelemetryData", &[])
}

pub fn get_ui_filter_diagnostic_info(pool_id: i32, equipment_id: i32) -> String {
    build_request(
        "GetUIFilterDiagnosticInfo",
        &[int_param("poolId", pool_id), int_param("equipmentId", equipment_id)],
    )
}

pub fn set_ui_heater_cmd(pool_id: i32, equipment_id: i32, temperature: i32) -> String {
    build_request(
        "SetUIHeaterCmd",
        &[
            int_param("poolId", pool_id),
            int_param("HeaterID", equipment_id).alias("EquipmentID"),
            int_param("Temp", temperature).unit("F").alias("Data"),
        ],
    )
}

pub fn set_ui_solar_set_point_cmd(pool_id: i32, equipment_id: i32, temperature: i32) -> String {
    build_request(
        "SetUISolarSetPointCmd",
        &[
            int_param("poolId", pool_id),
            int_param("HeaterID", equipment_id).alias("EquipmentID"),
            int_param("Temp", temperature).unit("F").alias("Data"),
        ],
    )
}

pub fn set_ui_heater_mode_cmd(pool_id: i32, equipment_id: i32, mode: i32) -> String {
    build_request(
        "SetUIHeaterModeCmd",
        &[
            int_param("poolId", pool_id),
            int_param("HeaterID", equipment_id).alias("EquipmentID"),
            int_param("Mode", mode).alias("Data"),
        ],
    )
}

pub fn set_heater_enable(pool_id: i32, equipment_id: i32, enabled: bool) -> String {
    build_request(
        "SetHeaterEnable",
        &[
            int_param("poolId", pool_id),
            int_param("HeaterID", equipment_id).alias("EquipmentID"),
            bool_param("Enabled", enabled).alias("Data"),
        ],
    )
}

#[allow(clippy::too_many_arguments)]
pub fn set_ui_equipment_cmd(
    pool_id: i32,
    equipment_id: i32,
    is_on: i32,
    is_countdown_timer: bool,
    start_time_hours: i32,
    start_time_minutes: i32,
    end_time_hours: i32,
    end_time_minutes: i32,
    days_active: i32,
    recurring: bool,
) -> String {
    build_request(
        "SetUIEquipmentCmd",
        &[
            int_param("poolId", pool_id),
            int_param("equipmentId", equipment_id),
            int_param("isOn", is_on).alias("Data"),
            bool_param("IsCountDownTimer", is_countdown_timer),
            int_param("StartTimeHours", start_time_hours),
            int_param("StartTimeMinutes", start_time_minutes),
            int_param("EndTimeHours", end_time_hours),
            int_param("EndTimeMinutes", end_time_minutes),
            int_param("DaysActive", days_active),
            bool_param("Recurring", recurring),
        ],
    )
}

pub fn set_ui_filter_speed_cmd(pool_id: i32, equipment_id: i32, speed: i32) -> String {
    build_request(
        "SetUIFilterSpeedCmd",
        &[
            int_param("poolId", pool_id),
            int_param("FilterID", equipment_id).alias("equipment_id"),
            int_param("Speed", speed).unit("RPM").alias("Data"),
        ],
    )
}

#[allow(clippy::too_many_arguments)]
pub fn set_standalone_light_show(
    pool_id: i32,
    equipment_id: i32,
    show: i32,
    speed: i32,
    brightness: i32,
    reserved: i32,
    is_countdown_timer: bool,
    start_time_hours: i32,
    start_time_minutes: i32,
    end_time_hours: i32,
    end_time_minutes: i32,
    days_active: i32,
    recurring: bool,
) -> String {
    build_request(
        "SetStandAloneLightShow",
        &[
            int_param("poolId", pool_id),
            int_param("LightID", equipment_id).alias("equipment_id"),
            byte_param("Show", show),
            byte_param("Speed", speed),
            byte_param("Brightness", brightness),
            byte_param("Reserved", reserved),
            bool_param("IsCountDownTimer", is_countdown_timer),
            int_param("StartTimeHours", start_time_hours),
            int_param("StartTimeMinutes", start_time_minutes),
            int_param("EndTimeHours", end_time_hours),
            int_param("EndTimeMinutes", end_time_minutes),
            int_param("DaysActive", days_active),
            bool_param("Recurring", recurring),
        ],
    )
}

pub fn set_chlor_enable(pool_id: i32, enabled: bool) -> String {
    build_request("SetCHLOREnable", &[int_param("poolId", pool_id), bool_param("Enabled", enabled).alias("Data")])
}

#[allow(clippy::too_many_arguments)]
pub fn set_chlor_params(
    pool_id: i32,
    equipment_id: i32,
    timed_percent: i32,
    cell_type: i32,
    op_mode: i32,
    sc_timeout: i32,
    bow_type: i32,
    orp_timeout: i32,
    cfg_state: i32,
) -> String {
    build_request(
        "SetCHLORParams",
        &[
            int_param("poolId", pool_id),
            int_param("ChlorID", equipment_id).alias("EquipmentID"),
            byte_param("CfgState", cfg_state).alias("Data1"),
            byte_param("OpMode", op_mode).alias("Data2"),
            byte_param("BOWType", bow_type).alias("Data3"),
            byte_param("CellType", cell_type).alias("Data4"),
            byte_param("TimedPercent", timed_percent).alias("Data5"),
            byte_param("SCTimeout", sc_timeout).unit("hour").alias("Data6"),
            // "ORPTimout" is the controller's own spelling, not a typo to fix.
            byte_param("ORPTimout", orp_timeout).unit("hour").alias("Data7"),
        ],
    )
}

pub fn set_ui_super_chlor_cmd(pool_id: i32, equipment_id: i32, enabled: bool) -> String {
    build_request(
        "SetUISuperCHLORCmd",
        &[
            int_param("poolId", pool_id),
            int_param("ChlorID", equipment_id).alias("EquipmentID"),
            byte_param("IsOn", i32::from(enabled)).alias("Data1"),
        ],
    )
}

pub fn restore_idle_state() -> String {
    build_request("RestoreIdleState", &[])
}

#[allow(clippy::too_many_arguments)]
pub fn set_ui_spillover_cmd(
    pool_id: i32,
    speed: i32,
    is_countdown_timer: bool,
    start_time_hours: i32,
    start_time_minutes: i32,
    end_time_hours: i32,
    end_time_minutes: i32,
    days_active: i32,
    recurring: bool,
) -> String {
    build_request(
        "SetUISpilloverCmd",
        &[
            int_param("poolId", pool_id),
            int_param("Speed", speed),
            bool_param("IsCountDownTimer", is_countdown_timer),
            int_param("StartTimeHours", start_time_hours),
            int_param("StartTimeMinutes", start_time_minutes),
            int_param("EndTimeHours", end_time_hours),
            int_param("EndTimeMinutes", end_time_minutes),
            int_param("DaysActive", days_active),
            bool_param("Recurring", recurring),
        ],
    )
}

#[allow(clippy::too_many_arguments)]
pub fn run_group_cmd(
    group_id: i32,
    enabled: bool,
    is_countdown_timer: bool,
    start_time_hours: i32,
    start_time_minutes: i32,
    end_time_hours: i32,
    end_time_minutes: i32,
    days_active: i32,
    recurring: bool,
) -> String {
    build_request(
        "RunGroupCmd",
        &[
            int_param("GroupID", group_id),
            int_param("Data", i32::from(enabled)),
            bool_param("IsCountDownTimer", is_countdown_timer),
            int_param("StartTimeHours", start_time_hours),
            int_param("StartTimeMinutes", start_time_minutes),
            int_param("EndTimeHours", end_time_hours),
            int_param("EndTimeMinutes", end_time_minutes),
            int_param("DaysActive", days_active),
            bool_param("Recurring", recurring),
        ],
    )
}

#[allow(clippy::too_many_arguments)]
pub fn edit_ui_schedule_cmd(
    equipment_id: i32,
    data: i32,
    action_id: i32,
    start_time_hours: i32,
    start_time_minutes: i32,
    end_time_hours: i32,
    end_time_minutes: i32,
    days_active: i32,
    is_enabled: bool,
    recurring: bool,
) -> String {
    build_request(
        "EditUIScheduleCmd",
        &[
            int_param("EquipmentID", equipment_id),
            int_param("Data", data),
            // Duplicates the outer message's opcode; the controller expects it
            // as an explicit parameter too. See DESIGN.md Open Question 3.
            int_param("ActionID", action_id),
            int_param("StartTimeHours", start_time_hours),
            int_param("StartTimeMinutes", start_time_minutes),
            int_param("EndTimeHours", end_time_hours),
            int_param("EndTimeMinutes", end_time_minutes),
            int_param("DaysActive", days_active),
            bool_param("IsEnabled", is_enabled),
            bool_param("Recurring", recurring),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_filter_speed_matches_expected_wire_xml() {
        let xml = set_ui_filter_speed_cmd(1, 2, 75);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<Name>SetUIFilterSpeedCmd</Name>"));
        assert!(xml.contains(r#"<Parameter name="poolId" dataType="int">1</Parameter>"#));
        assert!(xml.contains(r#"<Parameter name="FilterID" dataType="int" alias="equipment_id">2</Parameter>"#));
        assert!(xml.contains(r#"<Parameter name="Speed" dataType="int" unit="RPM" alias="Data">75</Parameter>"#));
        assert!(xml.ends_with('\0'));
    }

    #[test]
    fn restore_idle_state_has_empty_parameters_block() {
        let xml = restore_idle_state();
        assert!(xml.contains("<Parameters></Parameters>"));
    }

    #[test]
    fn chlor_params_preserves_orp_timout_spelling() {
        let xml = set_chlor_params(1, 2, 50, 1, 2, 24, 0, 24, 3);
        assert!(xml.contains(r#"name="ORPTimout""#));
    }
}
