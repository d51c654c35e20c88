// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! The public request/response orchestrator: one method per operation in
//! spec.md §4.D, each validating its arguments, opening a transient
//! channel, dispatching the XML request, and (for reads) parsing the
//! reassembled reply into a typed model.

use std::time::Duration;

use crate::channel::Channel;
use crate::constants::{DEFAULT_CONTROLLER_PORT, DEFAULT_RESPONSE_TIMEOUT};
use crate::error::{OmniError, Result};
use crate::model::config::MspConfig;
use crate::model::filter_diagnostics::FilterDiagnostics;
use crate::model::telemetry::Telemetry;
use crate::types::{ClientType, MessageType};
use crate::validate;
use crate::wire::Message;
use crate::xml::request as req;

/// Connection parameters for a controller, validated eagerly so a bad
/// argument never results in an endpoint being opened.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub response_timeout: Duration,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        ClientConfig { host: host.into(), port: DEFAULT_CONTROLLER_PORT, response_timeout: DEFAULT_RESPONSE_TIMEOUT }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    fn validate(&self) -> Result<()> {
        validate::hostname(&self.host)?;
        validate::port(self.port)?;
        validate::timeout(self.response_timeout)?;
        Ok(())
    }
}

/// A stateless client for one controller. Every method opens its own
/// transient [`Channel`] (spec.md §5) — there is no shared mutable state
/// between concurrent calls.
#[derive(Debug, Clone)]
pub struct OmniLogicClient {
    config: ClientConfig,
}

impl OmniLogicClient {
    pub fn new(host: impl Into<String>, port: u16, response_timeout: Duration) -> Result<Self> {
        Self::with_config(ClientConfig { host: host.into(), port, response_timeout })
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(OmniLogicClient { config })
    }

    async fn exchange(&self, msg_type: u32, client_type: ClientType, payload: Option<String>, expect_response: bool) -> Result<Option<String>> {
        let id = rand::random::<u32>();
        let body = payload.map(String::into_bytes).unwrap_or_default();
        let msg = Message::new(id, msg_type, client_type, false, body);

        let work = async {
            let mut channel = Channel::connect(&self.config.host, self.config.port).await?;
            channel.send(&msg).await?;
            if expect_response {
                Ok(Some(crate::reassembly::receive_response(&mut channel).await?))
            } else {
                Ok(None)
            }
        };

        match tokio::time::timeout(self.config.response_timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(OmniError::timeout(format!("request (type={msg_type}) did not complete within {:?}", self.config.response_timeout))),
        }
    }

    async fn read(&self, msg_type: u32, payload: String) -> Result<String> {
        self.exchange(msg_type, ClientType::Xml, Some(payload), true).await.map(|r| r.expect("reads always produce a body"))
    }

    async fn read_no_body(&self, msg_type: u32) -> Result<String> {
        self.exchange(msg_type, ClientType::Simple, None, true).await.map(|r| r.expect("reads always produce a body"))
    }

    async fn write(&self, msg_type: u32, payload: String) -> Result<()> {
        self.exchange(msg_type, ClientType::Xml, Some(payload), false).await.map(|_| ())
    }

    /// Escape hatch matching `async_send_message` in the original: send an
    /// arbitrary opcode/payload pair and optionally await the reassembled
    /// response. Kept for callers needing an operation this catalog
    /// doesn't name yet.
    pub async fn send_raw(&self, msg_type: u32, payload: Option<String>, expect_response: bool) -> Result<Option<String>> {
        let client_type = if payload.is_some() { ClientType::Xml } else { ClientType::Simple };
        self.exchange(msg_type, client_type, payload, expect_response).await
    }

    pub async fn get_config(&self) -> Result<MspConfig> {
        let xml = self.get_config_raw().await?;
        MspConfig::parse(&xml)
    }

    pub async fn get_config_raw(&self) -> Result<String> {
        self.read(MessageType::RequestConfiguration.as_u32(), req::request_configuration()).await
    }

    pub async fn get_telemetry(&self) -> Result<Telemetry> {
        let xml = self.get_telemetry_raw().await?;
        Telemetry::parse(&xml)
    }

    pub async fn get_telemetry_raw(&self) -> Result<String> {
        self.read(MessageType::GetTelemetry.as_u32(), req::request_telemetry_data()).await
    }

    pub async fn get_alarm_list(&self) -> Result<String> {
        self.read(MessageType::GetAlarmList.as_u32(), req::build_request("GetAllAlarmList", &[])).await
    }

    pub async fn get_log_config(&self) -> Result<String> {
        self.read_no_body(MessageType::RequestLogConfig.as_u32()).await
    }

    pub async fn get_filter_diagnostics(&self, pool_id: i32, equipment_id: i32) -> Result<FilterDiagnostics> {
        let xml = self.get_filter_diagnostics_raw(pool_id, equipment_id).await?;
        FilterDiagnostics::parse(&xml)
    }

    pub async fn get_filter_diagnostics_raw(&self, pool_id: i32, equipment_id: i32) -> Result<String> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        self.read(MessageType::GetFilterDiagnosticInfo.as_u32(), req::get_ui_filter_diagnostic_info(pool_id, equipment_id)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn set_equipment(
        &self,
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
    ) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        let days_active = validate::days_active(days_active)?;
        let payload = req::set_ui_equipment_cmd(
            pool_id,
            equipment_id,
            is_on,
            is_countdown_timer,
            start_time_hours,
            start_time_minutes,
            end_time_hours,
            end_time_minutes,
            days_active,
            recurring,
        );
        self.write(MessageType::SetEquipment.as_u32(), payload).await
    }

    pub async fn set_filter_speed(&self, pool_id: i32, equipment_id: i32, speed: i32) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        let speed = validate::speed(speed)?;
        self.write(MessageType::SetFilterSpeed.as_u32(), req::set_ui_filter_speed_cmd(pool_id, equipment_id, speed)).await
    }

    pub async fn set_heater(&self, pool_id: i32, equipment_id: i32, temperature_f: i32) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        let temperature_f = validate::temperature_f(temperature_f)?;
        self.write(MessageType::SetHeaterCommand.as_u32(), req::set_ui_heater_cmd(pool_id, equipment_id, temperature_f)).await
    }

    pub async fn set_solar_heater(&self, pool_id: i32, equipment_id: i32, temperature_f: i32) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        let temperature_f = validate::temperature_f(temperature_f)?;
        self.write(MessageType::SetSolarSetPointCommand.as_u32(), req::set_ui_solar_set_point_cmd(pool_id, equipment_id, temperature_f))
            .await
    }

    pub async fn set_heater_mode(&self, pool_id: i32, equipment_id: i32, mode: i32) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        self.write(MessageType::SetHeaterModeCommand.as_u32(), req::set_ui_heater_mode_cmd(pool_id, equipment_id, mode)).await
    }

    pub async fn set_heater_enable(&self, pool_id: i32, equipment_id: i32, enabled: bool) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        self.write(MessageType::SetHeaterEnabled.as_u32(), req::set_heater_enable(pool_id, equipment_id, enabled)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn set_light_show(
        &self,
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
    ) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        let speed = validate::light_speed(speed)?;
        let brightness = validate::light_brightness(brightness)?;
        let days_active = validate::days_active(days_active)?;
        let payload = req::set_standalone_light_show(
            pool_id,
            equipment_id,
            show,
            speed,
            brightness,
            reserved,
            is_countdown_timer,
            start_time_hours,
            start_time_minutes,
            end_time_hours,
            end_time_minutes,
            days_active,
            recurring,
        );
        self.write(MessageType::SetStandaloneLightShow.as_u32(), payload).await
    }

    pub async fn set_chlorinator_enable(&self, pool_id: i32, enabled: bool) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        self.write(MessageType::SetChlorEnabled.as_u32(), req::set_chlor_enable(pool_id, enabled)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn set_chlorinator_params(
        &self,
        pool_id: i32,
        equipment_id: i32,
        timed_percent: i32,
        cell_type: i32,
        op_mode: i32,
        sc_timeout: i32,
        bow_type: i32,
        orp_timeout: i32,
    ) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        const CFG_STATE: i32 = 3;
        let payload =
            req::set_chlor_params(pool_id, equipment_id, timed_percent, cell_type, op_mode, sc_timeout, bow_type, orp_timeout, CFG_STATE);
        self.write(MessageType::SetChlorParams.as_u32(), payload).await
    }

    pub async fn set_chlorinator_superchlorinate(&self, pool_id: i32, equipment_id: i32, enabled: bool) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let equipment_id = validate::system_id(equipment_id)?;
        self.write(MessageType::SetSuperchlorinate.as_u32(), req::set_ui_super_chlor_cmd(pool_id, equipment_id, enabled)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn set_spillover(
        &self,
        pool_id: i32,
        speed: i32,
        is_countdown_timer: bool,
        start_time_hours: i32,
        start_time_minutes: i32,
        end_time_hours: i32,
        end_time_minutes: i32,
        days_active: i32,
        recurring: bool,
    ) -> Result<()> {
        let pool_id = validate::system_id(pool_id)?;
        let speed = validate::speed(speed)?;
        let days_active = validate::days_active(days_active)?;
        let payload = req::set_ui_spillover_cmd(
            pool_id,
            speed,
            is_countdown_timer,
            start_time_hours,
            start_time_minutes,
            end_time_hours,
            end_time_minutes,
            days_active,
            recurring,
        );
        self.write(MessageType::SetSpillover.as_u32(), payload).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn run_group(
        &self,
        group_id: i32,
        enabled: bool,
        is_countdown_timer: bool,
        start_time_hours: i32,
        start_time_minutes: i32,
        end_time_hours: i32,
        end_time_minutes: i32,
        days_active: i32,
        recurring: bool,
    ) -> Result<()> {
        let group_id = validate::system_id(group_id)?;
        let days_active = validate::days_active(days_active)?;
        let payload = req::run_group_cmd(
            group_id,
            enabled,
            is_countdown_timer,
            start_time_hours,
            start_time_minutes,
            end_time_hours,
            end_time_minutes,
            days_active,
            recurring,
        );
        self.write(MessageType::RunGroupCmd.as_u32(), payload).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn edit_schedule(
        &self,
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
    ) -> Result<()> {
        let equipment_id = validate::system_id(equipment_id)?;
        let days_active = validate::days_active(days_active)?;
        let payload = req::edit_ui_schedule_cmd(
            equipment_id,
            data,
            action_id,
            start_time_hours,
            start_time_minutes,
            end_time_hours,
            end_time_minutes,
            days_active,
            is_enabled,
            recurring,
        );
        self.write(MessageType::EditSchedule.as_u32(), payload).await
    }

    pub async fn restore_idle_state(&self) -> Result<()> {
        self.write(MessageType::RestoreIdleState.as_u32(), req::restore_idle_state()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_host() {
        assert!(OmniLogicClient::new("", 10444, Duration::from_secs(5)).is_err());
    }

    #[test]
    fn config_rejects_zero_port() {
        assert!(OmniLogicClient::new("10.0.0.5", 0, Duration::from_secs(5)).is_err());
    }

    #[test]
    fn config_rejects_zero_timeout() {
        assert!(OmniLogicClient::new("10.0.0.5", 10444, Duration::ZERO).is_err());
    }

    #[test]
    fn config_accepts_valid_arguments() {
        assert!(OmniLogicClient::new("10.0.0.5", 10444, Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn set_filter_speed_rejects_out_of_range_speed() {
        let client = OmniLogicClient::new("10.0.0.5", 10444, Duration::from_millis(50)).unwrap();
        let err = client.set_filter_speed(7, 8, 150).await.unwrap_err();
        assert!(matches!(err, OmniError::Validation(_)));
    }

    #[tokio::test]
    async fn set_heater_rejects_out_of_range_temperature() {
        let client = OmniLogicClient::new("10.0.0.5", 10444, Duration::from_millis(50)).unwrap();
        let err = client.set_heater(7, 8, 40).await.unwrap_err();
        assert!(matches!(err, OmniError::Validation(_)));
    }
}
