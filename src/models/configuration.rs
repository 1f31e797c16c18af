//! Configuration (asset) models for the ConnectWise Manage API.
//!
//! A configuration is a tracked device or asset belonging to a company,
//! which can be attached to tickets.

use serde::{Deserialize, Deserializer};

use super::{null_as_default, ref_id, ref_name, Reference};

fn default_true() -> bool {
    true
}

fn true_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// A configuration item (device/asset).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Unique configuration ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,

    /// Configuration name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Owning company.
    #[serde(default)]
    pub company: Option<Reference>,

    /// Configuration type (e.g., Workstation, Server).
    #[serde(default, rename = "type")]
    pub config_type: Option<Reference>,

    /// Status.
    #[serde(default)]
    pub status: Option<Reference>,

    /// Serial number.
    #[serde(default)]
    pub serial_number: Option<String>,

    /// Model number.
    #[serde(default)]
    pub model_number: Option<String>,

    /// Asset tag.
    #[serde(default)]
    pub tag_number: Option<String>,

    /// Purchase date (raw API timestamp).
    #[serde(default)]
    pub purchase_date: Option<String>,

    /// Installation date (raw API timestamp).
    #[serde(default)]
    pub installation_date: Option<String>,

    /// Warranty expiration date (raw API timestamp).
    #[serde(default)]
    pub warranty_expiration_date: Option<String>,

    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,

    /// Vendor notes.
    #[serde(default)]
    pub vendor_notes: Option<String>,

    /// MAC address.
    #[serde(default)]
    pub mac_address: Option<String>,

    /// IP address.
    #[serde(default)]
    pub ip_address: Option<String>,

    /// Default gateway.
    #[serde(default)]
    pub default_gateway: Option<String>,

    /// Operating system type.
    #[serde(default)]
    pub os_type: Option<String>,

    /// Operating system details.
    #[serde(default)]
    pub os_info: Option<String>,

    /// CPU speed as reported.
    #[serde(default)]
    pub cpu_speed: Option<String>,

    /// RAM as reported.
    #[serde(default)]
    pub ram: Option<String>,

    /// Local drives as reported.
    #[serde(default)]
    pub local_hard_drives: Option<String>,

    /// Last login name.
    #[serde(default)]
    pub last_login_name: Option<String>,

    /// Parent configuration.
    #[serde(default)]
    pub parent_configuration_id: Option<u64>,

    /// Vendor.
    #[serde(default)]
    pub vendor: Option<Reference>,

    /// Manufacturer.
    #[serde(default)]
    pub manufacturer: Option<Reference>,

    /// Last backup date (raw API timestamp).
    #[serde(default)]
    pub last_backup_date: Option<String>,

    /// Backup server.
    #[serde(default)]
    pub backup_server_name: Option<String>,

    /// Remote access link.
    #[serde(default)]
    pub remote_link: Option<String>,

    /// Management link.
    #[serde(default)]
    pub management_link: Option<String>,

    /// Device identifier.
    #[serde(default)]
    pub device_identifier: Option<String>,

    /// Whether the configuration is billable.
    #[serde(default = "default_true", deserialize_with = "true_if_null")]
    pub bill_flag: bool,

    /// Whether the configuration is active.
    #[serde(default = "default_true", deserialize_with = "true_if_null")]
    pub active_flag: bool,
}

impl Configuration {
    /// Returns the company name, if present.
    pub fn company_name(&self) -> Option<&str> {
        ref_name(&self.company)
    }

    /// Returns the company ID, if present.
    pub fn company_id(&self) -> Option<u64> {
        ref_id(&self.company)
    }

    /// Returns the type name, if present.
    pub fn type_name(&self) -> Option<&str> {
        ref_name(&self.config_type)
    }

    /// Returns the status name, if present.
    pub fn status_name(&self) -> Option<&str> {
        ref_name(&self.status)
    }

    /// Returns the vendor name, if present.
    pub fn vendor_name(&self) -> Option<&str> {
        ref_name(&self.vendor)
    }

    /// Returns the manufacturer name, if present.
    pub fn manufacturer_name(&self) -> Option<&str> {
        ref_name(&self.manufacturer)
    }

    /// Returns true if the configuration is active.
    pub fn is_active(&self) -> bool {
        self.active_flag
    }
}
